//! Canvas rendering for the org chart.
//!
//! Draw order:
//! 1. Background (screen space)
//! 2. Connectors, then cards with their badges (chart space)

use std::collections::HashMap;
use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::avatars::AvatarCache;
use super::layout::{Connector, NodeBox};
use super::scale::{ScaleConfig, ScaledValues};
use super::state::ChartState;
use super::theme::{CardStyle, Theme};
use super::tree::Node;
use super::types::{CardInfo, RecordId};

const VACANT_LABEL: &str = "Vacant position";
/// Rough advance of an average glyph, as a fraction of the font size.
const GLYPH_WIDTH: f64 = 0.56;
const INNER_PADDING: f64 = 12.0;

/// Renders the complete chart to the canvas.
pub fn render(
	state: &ChartState,
	ctx: &CanvasRenderingContext2d,
	config: &ScaleConfig,
	theme: &Theme,
	avatars: &mut AvatarCache,
) {
	let scale = ScaledValues::new(config, state.transform.k);

	ctx.set_fill_style_str(&theme.background.to_css());
	ctx.fill_rect(0.0, 0.0, state.width, state.height);

	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);

	let layout = state.layout();
	let width = scale.connector_width(config, theme.connector.width);
	for connector in &layout.connectors {
		draw_connector(ctx, connector, theme, width);
	}

	let nodes: HashMap<RecordId, &Node> = state.forest().iter().map(|(_, n)| (n.id, n)).collect();
	for b in &layout.boxes {
		let Some(node) = nodes.get(&b.id) else {
			continue;
		};
		let card = &node.card;
		let style = theme.card(card.tier(b.depth), card.is_vacant());
		draw_card(ctx, b, card, style, theme, config, &scale, avatars);

		if state.hovered == Some(b.id) {
			rounded_rect(ctx, b.x, b.y, b.width, b.height, config.card.corner_radius);
			ctx.set_fill_style_str(&theme.hover.with_alpha(0.08).to_css());
			ctx.fill();
			ctx.set_stroke_style_str(&theme.hover.to_css());
			ctx.set_line_width(scale.hover_width);
			ctx.stroke();
		}

		let reports = state.direct_reports(b.id);
		if reports > 0 {
			draw_badge(ctx, b, reports, state.is_expanded(b.id), theme, &scale);
		}
	}

	ctx.restore();
}

fn draw_connector(ctx: &CanvasRenderingContext2d, connector: &Connector, theme: &Theme, width: f64) {
	let [start, bend, across, end] = connector.points;
	ctx.set_stroke_style_str(&theme.connector.color.to_css());
	ctx.set_line_width(width);
	ctx.begin_path();
	ctx.move_to(start.0, start.1);
	ctx.line_to(bend.0, bend.1);
	ctx.line_to(across.0, across.1);
	ctx.line_to(end.0, end.1);
	ctx.stroke();

	// Arrow head pointing into the report's card.
	let size = width * 4.0;
	ctx.set_fill_style_str(&theme.connector.color.to_css());
	ctx.begin_path();
	ctx.move_to(end.0, end.1);
	ctx.line_to(end.0 - size * 0.6, end.1 - size);
	ctx.line_to(end.0 + size * 0.6, end.1 - size);
	ctx.close_path();
	ctx.fill();
}

#[allow(clippy::too_many_arguments)]
fn draw_card(
	ctx: &CanvasRenderingContext2d,
	b: &NodeBox,
	card: &CardInfo,
	style: &CardStyle,
	theme: &Theme,
	config: &ScaleConfig,
	scale: &ScaledValues,
	avatars: &mut AvatarCache,
) {
	let radius = config.card.corner_radius;
	let vacant = card.is_vacant();

	// Body and accent stripe, clipped to the rounded outline.
	ctx.save();
	rounded_rect(ctx, b.x, b.y, b.width, b.height, radius);
	ctx.set_fill_style_str(&style.fill.to_css());
	ctx.fill();
	ctx.clip();
	ctx.set_fill_style_str(&style.accent.to_css());
	ctx.fill_rect(b.x, b.y, b.width, config.card.accent_height);
	ctx.restore();

	rounded_rect(ctx, b.x, b.y, b.width, b.height, radius);
	ctx.set_stroke_style_str(&style.border.to_css());
	ctx.set_line_width(scale.border_width);
	if vacant {
		let _ = ctx.set_line_dash(&js_sys::Array::of2(
			&JsValue::from_f64(6.0),
			&JsValue::from_f64(4.0),
		));
	}
	ctx.stroke();
	let _ = ctx.set_line_dash(&js_sys::Array::new());

	let avatar_r = config.card.avatar_radius;
	let (ax, ay) = (b.x + INNER_PADDING + avatar_r, b.y + b.height / 2.0);
	let text_x = if vacant {
		b.x + INNER_PADDING
	} else {
		draw_avatar(ctx, card, b.id, ax, ay, avatar_r, style, theme, scale, avatars);
		ax + avatar_r + INNER_PADDING
	};
	let text_width = b.x + b.width - INNER_PADDING - text_x;

	ctx.set_text_align("left");
	ctx.set_text_baseline("middle");

	let name = if vacant { VACANT_LABEL } else { card.name.as_str() };
	let title = if card.title.trim().is_empty() {
		"No designation"
	} else {
		card.title.as_str()
	};
	let mid = b.y + b.height / 2.0;

	ctx.set_fill_style_str(&style.name.to_css());
	ctx.set_font(&scale.name_font);
	let _ = ctx.fill_text(
		&ellipsize(name, max_chars(text_width, config.card.name_size)),
		text_x,
		mid - config.card.title_size,
	);

	ctx.set_fill_style_str(&style.title.to_css());
	ctx.set_font(&scale.title_font);
	let _ = ctx.fill_text(
		&ellipsize(title, max_chars(text_width, config.card.title_size)),
		text_x,
		mid + 2.0,
	);

	if scale.detail_alpha > 0.0 {
		if let Some(detail) = detail_line(card) {
			ctx.set_global_alpha(scale.detail_alpha);
			ctx.set_fill_style_str(&theme.detail.to_css());
			ctx.set_font(&scale.detail_font);
			let _ = ctx.fill_text(
				&ellipsize(&detail, max_chars(text_width, config.card.detail_size)),
				text_x,
				mid + config.card.title_size + 6.0,
			);
			ctx.set_global_alpha(1.0);
		}
	}
}

#[allow(clippy::too_many_arguments)]
fn draw_avatar(
	ctx: &CanvasRenderingContext2d,
	card: &CardInfo,
	id: RecordId,
	x: f64,
	y: f64,
	r: f64,
	style: &CardStyle,
	theme: &Theme,
	scale: &ScaledValues,
	avatars: &mut AvatarCache,
) {
	let image = card
		.image
		.as_deref()
		.filter(|src| !src.is_empty())
		.and_then(|src| avatars.get(id, src));

	ctx.save();
	ctx.begin_path();
	let _ = ctx.arc(x, y, r, 0.0, 2.0 * PI);
	ctx.set_fill_style_str(&theme.avatar.to_css());
	ctx.fill();

	match image {
		Some(image) => {
			ctx.clip();
			let _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(
				image,
				x - r,
				y - r,
				r * 2.0,
				r * 2.0,
			);
		}
		None => {
			ctx.set_fill_style_str(&style.accent.to_css());
			ctx.set_font(&scale.name_font);
			ctx.set_text_align("center");
			ctx.set_text_baseline("middle");
			let _ = ctx.fill_text(&card.initials(), x, y);
		}
	}
	ctx.restore();

	ctx.begin_path();
	let _ = ctx.arc(x, y, r, 0.0, 2.0 * PI);
	ctx.set_stroke_style_str(&style.accent.to_css());
	ctx.set_line_width(scale.border_width * 1.5);
	ctx.stroke();
}

fn draw_badge(
	ctx: &CanvasRenderingContext2d,
	b: &NodeBox,
	reports: usize,
	expanded: bool,
	theme: &Theme,
	scale: &ScaledValues,
) {
	let (x, y) = (b.x + b.width / 2.0, b.y + b.height);
	let r = scale.badge_radius;

	ctx.begin_path();
	let _ = ctx.arc(x, y, r, 0.0, 2.0 * PI);
	ctx.set_fill_style_str(&theme.badge.fill.to_css());
	ctx.fill();
	ctx.set_stroke_style_str(&theme.badge.border.to_css());
	ctx.set_line_width(scale.border_width);
	ctx.stroke();

	ctx.set_fill_style_str(&theme.badge.text.to_css());
	ctx.set_font(&scale.badge_font);
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	let _ = ctx.fill_text(&badge_label(reports, expanded), x, y + 0.5);
}

fn rounded_rect(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, r: f64) {
	let r = r.min(w / 2.0).min(h / 2.0);
	ctx.begin_path();
	ctx.move_to(x + r, y);
	let _ = ctx.arc_to(x + w, y, x + w, y + h, r);
	let _ = ctx.arc_to(x + w, y + h, x, y + h, r);
	let _ = ctx.arc_to(x, y + h, x, y, r);
	let _ = ctx.arc_to(x, y, x + w, y, r);
	ctx.close_path();
}

/// Minus sign while expanded, otherwise the number of hidden reports.
fn badge_label(reports: usize, expanded: bool) -> String {
	if expanded {
		"\u{2212}".to_string()
	} else {
		reports.to_string()
	}
}

/// Secondary line built from grade and employee number.
fn detail_line(card: &CardInfo) -> Option<String> {
	let parts: Vec<&str> = [card.grade.as_deref(), card.id_number.as_deref()]
		.into_iter()
		.flatten()
		.filter(|s| !s.trim().is_empty())
		.collect();
	(!parts.is_empty()).then(|| parts.join(" \u{b7} "))
}

fn max_chars(width: f64, font_size: f64) -> usize {
	(width / (font_size * GLYPH_WIDTH)).floor().max(1.0) as usize
}

/// Shortens `text` to at most `max` characters, ending in an ellipsis when cut.
fn ellipsize(text: &str, max: usize) -> String {
	if text.chars().count() <= max {
		return text.to_string();
	}
	let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
	out.push('\u{2026}');
	out
}
