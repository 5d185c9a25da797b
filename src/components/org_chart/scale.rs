//! Zoom-dependent sizing for chart visuals.
//!
//! Cards live in chart space and grow or shrink with the zoom factor `k`.
//! Strokes should stay crisp, and secondary text becomes unreadable when
//! zoomed far out, so those follow their own rules:
//!
//! - [`ScaleBehavior::Chart`]: plain chart-space size, scales with zoom.
//! - [`ScaleBehavior::Screen`]: fixed pixel size, divided by `k`.
//! - [`ScaleBehavior::Clamped`]: chart-space size kept within pixel bounds.

/// How a size reacts to the zoom factor.
#[derive(Clone, Debug)]
pub enum ScaleBehavior {
	/// Scales with the chart.
	Chart,
	/// Constant on screen.
	Screen,
	/// Scales with the chart within screen-pixel limits.
	Clamped {
		/// Smallest on-screen size.
		min_screen: f64,
		/// Largest on-screen size.
		max_screen: f64,
	},
}

impl ScaleBehavior {
	/// Chart-space value to draw with, given a base value and zoom `k`.
	pub fn apply(&self, base: f64, k: f64) -> f64 {
		match self {
			ScaleBehavior::Chart => base,
			ScaleBehavior::Screen => base / k,
			ScaleBehavior::Clamped {
				min_screen,
				max_screen,
			} => base.clamp(min_screen / k, max_screen / k),
		}
	}
}

/// Opacity as a function of zoom: zero at `hidden_k`, full at `shown_k`.
#[derive(Clone, Debug)]
pub struct FadeBehavior {
	/// Zoom at and below which the element is invisible.
	pub hidden_k: f64,
	/// Zoom at and above which the element is fully opaque.
	pub shown_k: f64,
}

impl FadeBehavior {
	/// Opacity at zoom `k`.
	pub fn apply(&self, k: f64) -> f64 {
		if self.hidden_k == self.shown_k {
			return if k >= self.shown_k { 1.0 } else { 0.0 };
		}
		((k - self.hidden_k) / (self.shown_k - self.hidden_k)).clamp(0.0, 1.0)
	}
}

/// Text and decoration sizes inside a card.
#[derive(Clone, Debug)]
pub struct CardScaleConfig {
	/// Name font size in chart units.
	pub name_size: f64,
	/// Title font size in chart units.
	pub title_size: f64,
	/// Grade / id-number line font size.
	pub detail_size: f64,
	/// Fades the detail line out when zoomed away.
	pub detail_fade: FadeBehavior,
	/// Card corner rounding.
	pub corner_radius: f64,
	/// Avatar circle radius.
	pub avatar_radius: f64,
	/// Height of the accent stripe.
	pub accent_height: f64,
	/// Card border width in screen pixels.
	pub border_width: f64,
	/// Hover outline width in screen pixels.
	pub hover_width: f64,
}

/// Expand/collapse badge sizing.
#[derive(Clone, Debug)]
pub struct BadgeScaleConfig {
	/// Base radius in chart units.
	pub radius: f64,
	/// How the radius follows zoom.
	pub radius_behavior: ScaleBehavior,
	/// Font size at the base radius.
	pub font_size: f64,
}

/// Complete scale configuration.
#[derive(Clone, Debug)]
pub struct ScaleConfig {
	/// Card contents.
	pub card: CardScaleConfig,
	/// Expand/collapse badges.
	pub badge: BadgeScaleConfig,
	/// Connector width behaviour; the base width comes from the theme.
	pub connector_behavior: ScaleBehavior,
}

impl Default for ScaleConfig {
	fn default() -> Self {
		Self {
			card: CardScaleConfig {
				name_size: 14.0,
				title_size: 12.0,
				detail_size: 10.0,
				detail_fade: FadeBehavior {
					hidden_k: 0.6,
					shown_k: 0.9,
				},
				corner_radius: 8.0,
				avatar_radius: 22.0,
				accent_height: 5.0,
				border_width: 1.0,
				hover_width: 2.5,
			},
			badge: BadgeScaleConfig {
				radius: 11.0,
				radius_behavior: ScaleBehavior::Clamped {
					min_screen: 8.0,
					max_screen: 16.0,
				},
				font_size: 11.0,
			},
			connector_behavior: ScaleBehavior::Screen,
		}
	}
}

/// Scale values resolved for one zoom level. Build once per frame.
#[derive(Clone, Debug)]
pub struct ScaledValues {
	/// Zoom factor these values were resolved for.
	pub k: f64,
	/// CSS font for names.
	pub name_font: String,
	/// CSS font for titles.
	pub title_font: String,
	/// CSS font for the detail line.
	pub detail_font: String,
	/// Detail line opacity in `[0, 1]`; skip drawing at zero.
	pub detail_alpha: f64,
	/// Card border width in chart units.
	pub border_width: f64,
	/// Hover outline width in chart units.
	pub hover_width: f64,
	/// Badge radius in chart units.
	pub badge_radius: f64,
	/// CSS font for badge labels.
	pub badge_font: String,
}

impl ScaledValues {
	/// Resolves `config` at zoom `k`.
	pub fn new(config: &ScaleConfig, k: f64) -> Self {
		let card = &config.card;
		let badge_radius = config.badge.radius_behavior.apply(config.badge.radius, k);
		let badge_font_size = config.badge.font_size * badge_radius / config.badge.radius;

		Self {
			k,
			name_font: format!("600 {}px sans-serif", card.name_size),
			title_font: format!("{}px sans-serif", card.title_size),
			detail_font: format!("{}px sans-serif", card.detail_size),
			detail_alpha: card.detail_fade.apply(k),
			border_width: card.border_width / k,
			hover_width: card.hover_width / k,
			badge_radius,
			badge_font: format!("600 {}px sans-serif", badge_font_size),
		}
	}

	/// Connector line width for a theme base width.
	pub fn connector_width(&self, config: &ScaleConfig, base: f64) -> f64 {
		config.connector_behavior.apply(base, self.k)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn behaviors() {
		assert_eq!(ScaleBehavior::Chart.apply(10.0, 2.0), 10.0);
		assert_eq!(ScaleBehavior::Screen.apply(10.0, 2.0), 5.0);
		let clamped = ScaleBehavior::Clamped {
			min_screen: 8.0,
			max_screen: 16.0,
		};
		assert_eq!(clamped.apply(11.0, 0.5), 16.0);
		assert_eq!(clamped.apply(11.0, 2.0), 8.0);
		assert_eq!(clamped.apply(11.0, 1.0), 11.0);
	}

	#[test]
	fn detail_fades_when_zoomed_out() {
		let config = ScaleConfig::default();
		assert_eq!(ScaledValues::new(&config, 0.5).detail_alpha, 0.0);
		assert_eq!(ScaledValues::new(&config, 1.0).detail_alpha, 1.0);
		let mid = ScaledValues::new(&config, 0.75).detail_alpha;
		assert!(mid > 0.0 && mid < 1.0);
	}

	#[test]
	fn strokes_keep_screen_width() {
		let config = ScaleConfig::default();
		let scaled = ScaledValues::new(&config, 2.0);
		assert_eq!(scaled.border_width, 0.5);
		assert_eq!(scaled.connector_width(&config, 1.5), 0.75);
	}
}
