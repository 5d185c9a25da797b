//! Leptos component wrapping the org chart canvas.
//!
//! The component owns one [`ChartState`] and forwards pointer, wheel and
//! button events into it. A `requestAnimationFrame` loop redraws the canvas
//! whenever something changed, and keeps polling while card images are still
//! decoding.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{error, info};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::avatars::AvatarCache;
use super::render;
use super::scale::ScaleConfig;
use super::state::ChartState;
use super::theme::Theme;
use super::types::{ChartData, Record};

/// Bundles chart state with visual configuration.
struct ChartContext {
	state: ChartState,
	scale: ScaleConfig,
	theme: Theme,
	avatars: AvatarCache,
	dirty: bool,
}

type SharedContext = Rc<RefCell<Option<ChartContext>>>;

/// Records from the input, converting a table when no record list is given.
fn records_of(data: &ChartData) -> Vec<Record> {
	match (&data.records, &data.table) {
		(Some(records), table) => {
			if table.is_some() {
				log::warn!("org-chart: both records and table supplied, using records");
			}
			records.clone()
		}
		(None, Some(table)) => table.to_records().unwrap_or_else(|e| {
			error!("org-chart: {}", e);
			Vec::new()
		}),
		(None, None) => Vec::new(),
	}
}

fn viewport_size(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

/// Pointer position relative to the canvas.
fn local_position(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

/// Runs `f` against the chart context, if mounted, and schedules a redraw.
fn with_chart(context: &SharedContext, f: impl FnOnce(&mut ChartState)) {
	if let Some(ref mut c) = *context.borrow_mut() {
		f(&mut c.state);
		c.dirty = true;
	}
}

/// Cursor for the pointer's current situation.
fn cursor_for(state: &ChartState) -> &'static str {
	if state.drag.is_active() {
		"grabbing"
	} else if state.hovered.is_some_and(|id| state.direct_reports(id) > 0) {
		"pointer"
	} else {
		"grab"
	}
}

/// Renders an interactive org chart on a canvas element.
///
/// Pass chart data via the reactive `data` signal. When the data changes the
/// hierarchy is rebuilt and the new configuration applied, while expansion,
/// pan and zoom are kept. The component
/// sizes itself to its parent container by default; set `fullscreen = true`
/// to fill the viewport and follow window resizes.
#[component]
pub fn OrgChartCanvas(
	/// Records (or a table) plus chart settings.
	#[prop(into)]
	data: Signal<ChartData>,
	/// Fill the viewport and follow window resizes.
	#[prop(default = false)]
	fullscreen: bool,
	/// Fixed canvas width; defaults to the parent's width.
	#[prop(default = None)]
	width: Option<f64>,
	/// Fixed canvas height; defaults to the parent's height.
	#[prop(default = None)]
	height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: SharedContext = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (context_init, animate_init, resize_cb_init) =
		(context.clone(), animate.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let data = data.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let records = records_of(&data);

		// Later data changes refresh settings and the hierarchy.
		if let Some(ref mut c) = *context_init.borrow_mut() {
			if c.state.config.theme != data.config.theme {
				c.theme = Theme::from_name(data.config.theme);
			}
			c.state.set_config(data.config.clone());
			c.state.set_records(&records);
			let state = &c.state;
			c.avatars.retain(|id| state.contains(id));
			c.dirty = true;
			return;
		}

		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			error!("org-chart: no window available");
			return;
		};

		let (w, h) = if fullscreen {
			viewport_size(&window).unwrap_or((800.0, 600.0))
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.filter(|w| *w > 0.0)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.filter(|h| *h > 0.0)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = match canvas.get_context("2d") {
			Ok(Some(ctx)) => match ctx.dyn_into() {
				Ok(ctx) => ctx,
				Err(_) => {
					error!("org-chart: 2d context has an unexpected type");
					return;
				}
			},
			_ => {
				error!("org-chart: canvas 2d context unavailable");
				return;
			}
		};

		let theme = Theme::from_name(data.config.theme);
		info!("org-chart: mounting {}x{} canvas with {} theme", w, h, theme.name);
		*context_init.borrow_mut() = Some(ChartContext {
			state: ChartState::new(&records, data.config.clone(), w, h),
			scale: ScaleConfig::default(),
			theme,
			avatars: AvatarCache::default(),
			dirty: true,
		});

		if fullscreen {
			let (context_resize, canvas_resize) = (context_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let Some((nw, nh)) = web_sys::window().as_ref().and_then(viewport_size) else {
					return;
				};
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut c) = *context_resize.borrow_mut() {
					c.state.resize(nw, nh);
					c.dirty = true;
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (context_anim, animate_inner) = (context_init.clone(), animate_init.clone());
		let mut frames_since_draw = 0u32;
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				// Images finish decoding asynchronously; repaint a few times a second.
				frames_since_draw += 1;
				if c.dirty || frames_since_draw >= 15 {
					render::render(&c.state, &ctx, &c.scale, &c.theme, &mut c.avatars);
					c.dirty = false;
					frames_since_draw = 0;
				}
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				if let Some(win) = web_sys::window() {
					let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
				}
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let (x, y) = local_position(&canvas.into(), &ev);
		with_chart(&context_md, |state| state.pointer_down(x, y));
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (x, y) = local_position(&canvas, &ev);

		if let Some(ref mut c) = *context_mm.borrow_mut() {
			let hovered_before = c.state.hovered;
			let panned = c.state.pointer_move(x, y);
			if panned || hovered_before != c.state.hovered {
				c.dirty = true;
			}
			let style = web_sys::HtmlElement::style(&canvas);
			let _ = style.set_property("cursor", cursor_for(&c.state));
		}
	};

	let context_mu = context.clone();
	let on_mouseup = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let (x, y) = local_position(&canvas.into(), &ev);
		with_chart(&context_mu, |state| {
			state.pointer_up(x, y);
		});
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		with_chart(&context_ml, |state| state.pointer_leave());
	};

	let context_wh = context.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let (x, y) = local_position(&canvas.into(), &ev);
		with_chart(&context_wh, |state| state.wheel(ev.delta_y(), x, y));
	};

	let (context_zi, context_zo, context_fit, context_ea, context_ca) = (
		context.clone(),
		context.clone(),
		context.clone(),
		context.clone(),
		context.clone(),
	);

	view! {
		<div class="org-chart" style="position: relative; width: 100%; height: 100%;">
			<canvas
				node_ref=canvas_ref
				class="org-chart-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				style="display: block; cursor: grab;"
			/>
			<div class="zoom-control-container">
				<button class="zoom-control-btn" title="Zoom in"
					on:click=move |_| with_chart(&context_zi, |s| s.zoom_in())>"+"</button>
				<button class="zoom-control-btn" title="Zoom out"
					on:click=move |_| with_chart(&context_zo, |s| s.zoom_out())>"\u{2212}"</button>
				<button class="zoom-control-btn" title="Fit to view"
					on:click=move |_| with_chart(&context_fit, |s| s.fit_to_view())>"Fit"</button>
				<button class="zoom-control-btn" title="Expand all"
					on:click=move |_| with_chart(&context_ea, |s| s.expand_all())>"Expand"</button>
				<button class="zoom-control-btn" title="Collapse all"
					on:click=move |_| with_chart(&context_ca, |s| s.collapse_all())>"Collapse"</button>
			</div>
		</div>
	}
}
