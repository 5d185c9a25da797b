//! Visual theming for the org chart.
//!
//! Cards are coloured by tier (management, department, unit). Vacant
//! positions get a muted style of their own.

use serde::Deserialize;

use super::types::CardTier;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Opacity in `[0, 1]`.
	pub a: f64,
}

impl Color {
	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Color with explicit opacity.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Same color, different opacity.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Mix towards white (0.0 = unchanged, 1.0 = white)
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		let up = |c: u8| (c as f64 + (255.0 - c as f64) * f).round() as u8;
		Self {
			r: up(self.r),
			g: up(self.g),
			b: up(self.b),
			a: self.a,
		}
	}

	/// Mix towards black (0.0 = unchanged, 1.0 = black)
	pub fn darken(self, factor: f64) -> Self {
		let f = 1.0 - factor.clamp(0.0, 1.0);
		let down = |c: u8| (c as f64 * f).round() as u8;
		Self {
			r: down(self.r),
			g: down(self.g),
			b: down(self.b),
			a: self.a,
		}
	}

	/// CSS color string: `#rrggbb` when opaque, `rgba(..)` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Theme selector used in configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
	/// Light background.
	#[default]
	Light,
	/// Dark background.
	Dark,
}

/// Look of one kind of card.
#[derive(Clone, Debug)]
pub struct CardStyle {
	/// Card body.
	pub fill: Color,
	/// Card outline.
	pub border: Color,
	/// Stripe along the top edge.
	pub accent: Color,
	/// Name text.
	pub name: Color,
	/// Title text.
	pub title: Color,
}

/// Manager-to-report connector lines.
#[derive(Clone, Debug)]
pub struct ConnectorStyle {
	/// Line and arrow color.
	pub color: Color,
	/// Line width in screen pixels.
	pub width: f64,
}

/// Expand/collapse badge at the bottom of cards with reports.
#[derive(Clone, Debug)]
pub struct BadgeStyle {
	/// Badge body.
	pub fill: Color,
	/// Badge outline.
	pub border: Color,
	/// Count or minus sign.
	pub text: Color,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	/// Theme name, for logging.
	pub name: &'static str,
	/// Canvas background.
	pub background: Color,
	/// Level 0 cards.
	pub management: CardStyle,
	/// Level 1 cards.
	pub department: CardStyle,
	/// Deeper cards.
	pub unit: CardStyle,
	/// Unfilled positions, whatever their tier.
	pub vacant: CardStyle,
	/// Manager-to-report lines.
	pub connector: ConnectorStyle,
	/// Expand/collapse badges.
	pub badge: BadgeStyle,
	/// Border drawn around the hovered card.
	pub hover: Color,
	/// Avatar placeholder background.
	pub avatar: Color,
	/// Secondary detail lines (grade, id number).
	pub detail: Color,
}

impl Theme {
	/// Bright theme matching typical dashboard surfaces
	pub fn light() -> Self {
		let ink = Color::rgb(33, 37, 41);
		let muted = Color::rgb(96, 105, 115);
		let card = |accent: Color| CardStyle {
			fill: Color::rgb(255, 255, 255),
			border: accent.lighten(0.55),
			accent,
			name: ink,
			title: muted,
		};
		Self {
			name: "light",
			background: Color::rgb(246, 247, 249),
			management: card(Color::rgb(31, 78, 121)),
			department: card(Color::rgb(46, 125, 110)),
			unit: card(Color::rgb(120, 112, 170)),
			vacant: CardStyle {
				fill: Color::rgb(240, 241, 243),
				border: Color::rgb(170, 176, 184),
				accent: Color::rgb(190, 195, 201),
				name: muted,
				title: muted,
			},
			connector: ConnectorStyle {
				color: Color::rgb(150, 158, 168),
				width: 1.5,
			},
			badge: BadgeStyle {
				fill: Color::rgb(255, 255, 255),
				border: Color::rgb(150, 158, 168),
				text: ink,
			},
			hover: Color::rgb(242, 153, 0),
			avatar: Color::rgb(214, 220, 228),
			detail: Color::rgb(128, 136, 146),
		}
	}

	/// Dark theme for dark report canvases
	pub fn dark() -> Self {
		let ink = Color::rgb(230, 233, 237);
		let muted = Color::rgb(160, 168, 178);
		let card = |accent: Color| CardStyle {
			fill: Color::rgb(36, 41, 48),
			border: accent.darken(0.3),
			accent,
			name: ink,
			title: muted,
		};
		Self {
			name: "dark",
			background: Color::rgb(22, 27, 34),
			management: card(Color::rgb(94, 129, 172)),
			department: card(Color::rgb(100, 148, 160)),
			unit: card(Color::rgb(130, 120, 150)),
			vacant: CardStyle {
				fill: Color::rgb(30, 34, 40),
				border: Color::rgb(80, 86, 94),
				accent: Color::rgb(70, 76, 84),
				name: muted,
				title: muted,
			},
			connector: ConnectorStyle {
				color: Color::rgba(140, 160, 180, 0.6),
				width: 1.5,
			},
			badge: BadgeStyle {
				fill: Color::rgb(36, 41, 48),
				border: Color::rgb(110, 120, 132),
				text: ink,
			},
			hover: Color::rgb(255, 196, 87),
			avatar: Color::rgb(58, 65, 75),
			detail: Color::rgb(120, 128, 138),
		}
	}

	/// Theme for a configured name.
	pub fn from_name(name: ThemeName) -> Self {
		match name {
			ThemeName::Light => Self::light(),
			ThemeName::Dark => Self::dark(),
		}
	}

	/// Card style for a tier, or the vacant style.
	pub fn card(&self, tier: CardTier, vacant: bool) -> &CardStyle {
		if vacant {
			return &self.vacant;
		}
		match tier {
			CardTier::Management => &self.management,
			CardTier::Department => &self.department,
			CardTier::Unit => &self.unit,
		}
	}
}
