//! Chart instance state: expansion flags, pan/zoom transform and pointer gestures.
//!
//! Everything here is plain data mutated synchronously by the component's
//! event handlers. One [`ChartState`] belongs to exactly one rendered chart.

use std::collections::HashMap;

use log::{debug, info};
use serde::Deserialize;

use super::layout::{Bounds, LayoutConfig, TreeLayout, compute_layout};
use super::theme::ThemeName;
use super::tree::{BuildOutput, Forest, ForestDiagnostic, build_forest};
use super::types::{Record, RecordId};

/// Per-node expanded/collapsed flags. Nodes without an entry are expanded.
#[derive(Clone, Debug, Default)]
pub struct ExpansionState {
	flags: HashMap<RecordId, bool>,
}

impl ExpansionState {
	/// Whether the node's reports are shown. Defaults to `true`.
	pub fn is_expanded(&self, id: RecordId) -> bool {
		self.flags.get(&id).copied().unwrap_or(true)
	}

	/// Flips the node's flag and returns the new value.
	pub fn toggle(&mut self, id: RecordId) -> bool {
		let flag = self.flags.entry(id).or_insert(true);
		*flag = !*flag;
		*flag
	}

	/// Stores an explicit flag for `id`.
	pub fn set_expanded(&mut self, id: RecordId, expanded: bool) {
		self.flags.insert(id, expanded);
	}

	/// Marks every node in `forest`, and every node already tracked, expanded.
	pub fn expand_all(&mut self, forest: &Forest) {
		self.flags.values_mut().for_each(|flag| *flag = true);
		for (_, node) in forest.iter() {
			self.flags.insert(node.id, true);
		}
	}

	/// Stores an explicit collapsed flag for every node in `forest`.
	///
	/// Clearing the map would re-expand everything, since absence means expanded.
	pub fn collapse_all(&mut self, forest: &Forest) {
		for (_, node) in forest.iter() {
			self.flags.insert(node.id, false);
		}
	}

	/// Drops flags for ids that no longer appear in `forest`.
	pub fn retain_known(&mut self, forest: &Forest) {
		let known: HashMap<RecordId, usize> = forest.direct_reports();
		self.flags.retain(|id, _| known.contains_key(id));
	}

	/// Number of nodes with an explicit flag.
	pub fn tracked(&self) -> usize {
		self.flags.len()
	}
}

/// Copy of `forest` where collapsed nodes keep their place but lose their reports.
pub fn visible_forest(forest: &Forest, expansion: &ExpansionState) -> Forest {
	forest.pruned(|node| expansion.is_expanded(node.id))
}

/// Allowed zoom range and wheel/button step.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
	/// Smallest zoom factor.
	pub min: f64,
	/// Largest zoom factor.
	pub max: f64,
	/// Change per wheel tick or button press.
	pub step: f64,
}

impl Default for ZoomConfig {
	fn default() -> Self {
		Self {
			min: 0.5,
			max: 2.0,
			step: 0.1,
		}
	}
}

impl ZoomConfig {
	/// Clamps `k` into the configured range.
	pub fn clamp(&self, k: f64) -> f64 {
		k.max(self.min).min(self.max)
	}

	/// Zoom factor after moving `steps` increments (negative zooms out).
	pub fn stepped(&self, k: f64, steps: i32) -> f64 {
		self.clamp(k + self.step * steps as f64)
	}
}

/// Pan and zoom transform applied to the whole chart.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
	/// Horizontal pan offset in screen pixels.
	pub x: f64,
	/// Vertical pan offset in screen pixels.
	pub y: f64,
	/// Zoom factor (1.0 = 100%).
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self { x: 0.0, y: 0.0, k: 1.0 }
	}
}

impl ViewTransform {
	/// Sets a new zoom factor while keeping the screen point `(ax, ay)` fixed.
	pub fn zoom_about(&mut self, new_k: f64, ax: f64, ay: f64) {
		let ratio = new_k / self.k;
		self.x = ax - (ax - self.x) * ratio;
		self.y = ay - (ay - self.y) * ratio;
		self.k = new_k;
	}

	/// Converts screen coordinates into chart coordinates.
	pub fn screen_to_chart(&self, sx: f64, sy: f64) -> (f64, f64) {
		((sx - self.x) / self.k, (sy - self.y) / self.k)
	}
}

/// Background drag gesture. Only `Dragging` lets pointer moves change the pan.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum DragGesture {
	/// No drag in progress.
	#[default]
	Idle,
	/// A drag is in progress.
	Dragging {
		/// Pointer x when the gesture started.
		start_x: f64,
		/// Pointer y when the gesture started.
		start_y: f64,
		/// Pan x when the gesture started.
		origin_x: f64,
		/// Pan y when the gesture started.
		origin_y: f64,
	},
}

impl DragGesture {
	/// Starts a drag at the pointer, remembering the current pan.
	pub fn begin(&mut self, x: f64, y: f64, transform: &ViewTransform) {
		*self = DragGesture::Dragging {
			start_x: x,
			start_y: y,
			origin_x: transform.x,
			origin_y: transform.y,
		};
	}

	/// Pan offset for the pointer at `(x, y)`, or `None` when idle.
	pub fn update(&self, x: f64, y: f64) -> Option<(f64, f64)> {
		match *self {
			DragGesture::Idle => None,
			DragGesture::Dragging {
				start_x,
				start_y,
				origin_x,
				origin_y,
			} => Some((origin_x + (x - start_x), origin_y + (y - start_y))),
		}
	}

	/// Ends the drag; later moves are ignored until the next `begin`.
	pub fn end(&mut self) {
		*self = DragGesture::Idle;
	}

	/// Whether a drag is in progress.
	pub fn is_active(&self) -> bool {
		matches!(self, DragGesture::Dragging { .. })
	}
}

/// Transform that fits `bounds` inside a `width` x `height` viewport with
/// `padding` on each side, centred, with the zoom clamped to `zoom`.
pub fn fit_to_view(
	bounds: &Bounds,
	width: f64,
	height: f64,
	padding: f64,
	zoom: &ZoomConfig,
) -> ViewTransform {
	if bounds.is_empty() {
		return ViewTransform::default();
	}
	let avail_w = width - 2.0 * padding;
	let avail_h = height - 2.0 * padding;
	let k = zoom.clamp((avail_w / bounds.width()).min(avail_h / bounds.height()));
	let (cx, cy) = bounds.center();
	ViewTransform {
		x: width / 2.0 - cx * k,
		y: height / 2.0 - cy * k,
		k,
	}
}

/// Chart-level settings, usually delivered next to the data.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartConfig {
	/// Zoom range and step.
	pub zoom: ZoomConfig,
	/// Card size and spacing.
	pub layout: LayoutConfig,
	/// Screen-space margin kept around the chart by fit-to-view.
	pub fit_padding: f64,
	/// Fit the chart to the viewport when it is first shown.
	pub fit_on_load: bool,
	/// Maximum pointer travel (px) for a press/release to count as a click.
	pub click_slop: f64,
	/// Colour scheme.
	pub theme: ThemeName,
}

impl Default for ChartConfig {
	fn default() -> Self {
		Self {
			zoom: ZoomConfig::default(),
			layout: LayoutConfig::default(),
			fit_padding: 40.0,
			fit_on_load: true,
			click_slop: 4.0,
			theme: ThemeName::default(),
		}
	}
}

/// State of one chart instance.
///
/// Created when the component mounts. The forest is rebuilt whenever records
/// change, while expansion flags and the transform survive the rebuild.
pub struct ChartState {
	/// Active settings. Change them through [`ChartState::set_config`].
	pub config: ChartConfig,
	/// Expanded/collapsed flags.
	pub expansion: ExpansionState,
	/// Current pan and zoom.
	pub transform: ViewTransform,
	/// Background drag in progress, if any.
	pub drag: DragGesture,
	/// Card under the pointer.
	pub hovered: Option<RecordId>,
	/// Viewport width in screen pixels.
	pub width: f64,
	/// Viewport height in screen pixels.
	pub height: f64,
	forest: Forest,
	reports: HashMap<RecordId, usize>,
	diagnostics: Vec<ForestDiagnostic>,
	layout: TreeLayout,
	press: Option<(f64, f64)>,
}

impl ChartState {
	/// Builds the chart for `records` in a `width` x `height` viewport.
	pub fn new(records: &[Record], config: ChartConfig, width: f64, height: f64) -> Self {
		let mut state = Self {
			config,
			expansion: ExpansionState::default(),
			transform: ViewTransform::default(),
			drag: DragGesture::Idle,
			hovered: None,
			width,
			height,
			forest: Forest::default(),
			reports: HashMap::new(),
			diagnostics: Vec::new(),
			layout: TreeLayout::default(),
			press: None,
		};
		state.set_records(records);
		if state.config.fit_on_load {
			state.fit_to_view();
		}
		state
	}

	/// Rebuilds the forest from fresh records, keeping view state for surviving ids.
	pub fn set_records(&mut self, records: &[Record]) {
		let BuildOutput {
			forest,
			diagnostics,
		} = build_forest(records);
		info!(
			"org-chart: built {} nodes in {} trees ({} diagnostics)",
			forest.len(),
			forest.roots.len(),
			diagnostics.len()
		);
		self.expansion.retain_known(&forest);
		self.reports = forest.direct_reports();
		self.forest = forest;
		self.diagnostics = diagnostics;
		if self.hovered.is_some_and(|id| !self.reports.contains_key(&id)) {
			self.hovered = None;
		}
		self.relayout();
	}

	/// Applies new settings. The zoom is pulled back into the new range and
	/// the layout is recomputed with the new card metrics.
	pub fn set_config(&mut self, config: ChartConfig) {
		self.config = config;
		let k = self.config.zoom.clamp(self.transform.k);
		if k != self.transform.k {
			self.transform
				.zoom_about(k, self.width / 2.0, self.height / 2.0);
		}
		self.relayout();
	}

	/// The full hierarchy, collapsed parts included.
	pub fn forest(&self) -> &Forest {
		&self.forest
	}

	/// Problems found while building the current forest.
	pub fn diagnostics(&self) -> &[ForestDiagnostic] {
		&self.diagnostics
	}

	/// Layout of the currently visible nodes, in chart coordinates.
	pub fn layout(&self) -> &TreeLayout {
		&self.layout
	}

	/// Whether `id` is part of the current hierarchy.
	pub fn contains(&self, id: RecordId) -> bool {
		self.reports.contains_key(&id)
	}

	/// Number of direct reports a node has, visible or not.
	pub fn direct_reports(&self, id: RecordId) -> usize {
		self.reports.get(&id).copied().unwrap_or(0)
	}

	/// Whether the node's reports are shown.
	pub fn is_expanded(&self, id: RecordId) -> bool {
		self.expansion.is_expanded(id)
	}

	/// Flips a node between expanded and collapsed. Unknown ids are ignored.
	pub fn toggle(&mut self, id: RecordId) {
		if !self.contains(id) {
			return;
		}
		let expanded = self.expansion.toggle(id);
		debug!("org-chart: node {} expanded={}", id, expanded);
		self.relayout();
	}

	/// Shows every node.
	pub fn expand_all(&mut self) {
		self.expansion.expand_all(&self.forest);
		debug!("org-chart: expanded all nodes");
		self.relayout();
	}

	/// Hides every report, leaving only the roots.
	pub fn collapse_all(&mut self) {
		self.expansion.collapse_all(&self.forest);
		debug!("org-chart: collapsed all nodes");
		self.relayout();
	}

	fn relayout(&mut self) {
		let visible = visible_forest(&self.forest, &self.expansion);
		self.layout = compute_layout(&visible, &self.config.layout);
	}

	/// Node under the screen point, if any.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<RecordId> {
		let (cx, cy) = self.transform.screen_to_chart(sx, sy);
		self.layout.box_at(cx, cy).map(|b| b.id)
	}

	/// Starts a press, which becomes a drag or a click.
	pub fn pointer_down(&mut self, x: f64, y: f64) {
		self.drag.begin(x, y, &self.transform);
		self.press = Some((x, y));
	}

	/// Applies a pointer move. Returns `true` when the pan offset changed.
	pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
		if !self.drag.is_active() {
			self.hovered = self.node_at_position(x, y);
		}
		match self.drag.update(x, y) {
			Some((px, py)) => {
				self.transform.x = px;
				self.transform.y = py;
				true
			}
			None => false,
		}
	}

	/// Ends the gesture. A release close to the press point on a card toggles
	/// that card, and its id is returned.
	pub fn pointer_up(&mut self, x: f64, y: f64) -> Option<RecordId> {
		self.drag.end();
		let (px, py) = self.press.take()?;
		let slop = self.config.click_slop;
		if (x - px).abs() > slop || (y - py).abs() > slop {
			return None;
		}
		let id = self.node_at_position(x, y)?;
		if self.direct_reports(id) == 0 {
			return None;
		}
		self.toggle(id);
		Some(id)
	}

	/// Cancels the gesture and the hover when the pointer leaves the canvas.
	pub fn pointer_leave(&mut self) {
		self.drag.end();
		self.press = None;
		self.hovered = None;
	}

	/// Wheel zoom anchored at the pointer. Scrolling up (negative delta) zooms in.
	pub fn wheel(&mut self, delta_y: f64, x: f64, y: f64) {
		let steps = if delta_y < 0.0 {
			1
		} else if delta_y > 0.0 {
			-1
		} else {
			return;
		};
		let new_k = self.config.zoom.stepped(self.transform.k, steps);
		self.transform.zoom_about(new_k, x, y);
	}

	/// One zoom step in, about the viewport centre.
	pub fn zoom_in(&mut self) {
		self.zoom_centered(1);
	}

	/// One zoom step out, about the viewport centre.
	pub fn zoom_out(&mut self) {
		self.zoom_centered(-1);
	}

	fn zoom_centered(&mut self, steps: i32) {
		let new_k = self.config.zoom.stepped(self.transform.k, steps);
		self.transform
			.zoom_about(new_k, self.width / 2.0, self.height / 2.0);
	}

	/// Fits all visible nodes inside the viewport.
	pub fn fit_to_view(&mut self) {
		self.transform = fit_to_view(
			&self.layout.bounds,
			self.width,
			self.height,
			self.config.fit_padding,
			&self.config.zoom,
		);
	}

	/// Records a new viewport size.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;

	use super::*;
	use crate::components::org_chart::types::CardInfo;

	fn rec(id: i64, parent: Option<i64>) -> Record {
		let r = Record::new(id, CardInfo::new(format!("P{id}"), "T"));
		match parent {
			Some(p) => r.reporting_to(p),
			None => r,
		}
	}

	fn sample() -> Vec<Record> {
		vec![
			rec(1, None),
			rec(2, Some(1)),
			rec(3, Some(1)),
			rec(4, Some(2)),
			rec(5, Some(2)),
		]
	}

	fn no_fit() -> ChartConfig {
		ChartConfig {
			fit_on_load: false,
			..ChartConfig::default()
		}
	}

	#[test]
	fn expanded_by_default_then_toggled() {
		let mut expansion = ExpansionState::default();
		assert!(expansion.is_expanded(RecordId(2)));
		expansion.toggle(RecordId(2));
		assert!(!expansion.is_expanded(RecordId(2)));
	}

	#[test]
	fn unknown_ids_are_harmless() {
		let mut expansion = ExpansionState::default();
		assert!(expansion.is_expanded(RecordId(-42)));
		let forest = build_forest(&sample()).forest;
		expansion.toggle(RecordId(-42));
		assert_eq!(visible_forest(&forest, &expansion), forest);
	}

	#[test]
	fn collapse_all_is_explicit_and_expand_all_undoes_it() {
		let forest = build_forest(&sample()).forest;
		let mut expansion = ExpansionState::default();
		expansion.collapse_all(&forest);
		assert_eq!(expansion.tracked(), 5);

		let visible = visible_forest(&forest, &expansion);
		assert_eq!(visible.len(), 1);
		assert!(!visible.roots[0].has_children());

		expansion.expand_all(&forest);
		assert_eq!(visible_forest(&forest, &expansion), forest);
	}

	#[test]
	fn collapsed_node_stays_but_loses_reports() {
		let forest = build_forest(&sample()).forest;
		let mut expansion = ExpansionState::default();
		expansion.set_expanded(RecordId(2), false);

		let visible = visible_forest(&forest, &expansion);
		let ids: Vec<i64> = visible.iter().map(|(_, n)| n.id.0).collect();
		assert_eq!(ids, vec![1, 2, 3]);
	}

	#[test]
	fn toggling_an_absent_id_changes_nothing() {
		let mut state = ChartState::new(&[rec(1, None)], no_fit(), 800.0, 600.0);
		state.toggle(RecordId(999));
		assert!(state.is_expanded(RecordId(999)));
		assert_eq!(state.expansion.tracked(), 0);
		assert_eq!(state.layout().boxes.len(), 1);
	}

	#[test]
	fn new_config_reclamps_zoom_and_relayouts() {
		let mut state = ChartState::new(&sample(), no_fit(), 800.0, 600.0);
		state.transform.k = 2.0;
		let mut config = no_fit();
		config.zoom.max = 1.5;
		config.layout.card_width = 120.0;
		state.set_config(config);

		assert_eq!(state.transform.k, 1.5);
		assert!(state.layout().boxes.iter().all(|b| b.width == 120.0));
	}

	#[test]
	fn deep_chain_stays_interactive() {
		let records: Vec<Record> = (0..30_000)
			.map(|i| rec(i, (i > 0).then(|| i - 1)))
			.collect();
		let mut state = ChartState::new(&records, ChartConfig::default(), 800.0, 600.0);
		assert_eq!(state.layout().boxes.len(), 30_000);

		state.toggle(RecordId(10));
		assert_eq!(state.layout().boxes.len(), 11);
		state.collapse_all();
		assert_eq!(state.layout().boxes.len(), 1);
		state.expand_all();
		assert_eq!(visible_forest(state.forest(), &state.expansion).len(), 30_000);
	}

	#[test]
	fn drag_scenario() {
		let mut gesture = DragGesture::default();
		let transform = ViewTransform::default();
		gesture.begin(100.0, 100.0, &transform);
		assert_eq!(gesture.update(130.0, 80.0), Some((30.0, -20.0)));
		gesture.end();
		assert_eq!(gesture.update(200.0, 200.0), None);
	}

	#[test]
	fn chart_state_drag_pans_only_while_dragging() {
		let mut state = ChartState::new(&sample(), no_fit(), 800.0, 600.0);
		assert!(!state.pointer_move(50.0, 50.0));

		state.pointer_down(100.0, 100.0);
		assert!(state.pointer_move(130.0, 80.0));
		assert_eq!((state.transform.x, state.transform.y), (30.0, -20.0));

		assert_eq!(state.pointer_up(130.0, 80.0), None);
		assert!(!state.pointer_move(300.0, 300.0));
		assert_eq!((state.transform.x, state.transform.y), (30.0, -20.0));
	}

	#[test]
	fn click_on_card_toggles_it() {
		let mut state = ChartState::new(&sample(), no_fit(), 800.0, 600.0);
		let target = state
			.layout()
			.boxes
			.iter()
			.find(|b| b.id == RecordId(2))
			.cloned()
			.unwrap();
		let (x, y) = target.center();

		state.pointer_down(x, y);
		assert_eq!(state.pointer_up(x + 1.0, y), Some(RecordId(2)));
		assert!(!state.is_expanded(RecordId(2)));
		assert_eq!(state.layout().boxes.len(), 3);
		assert_eq!(state.direct_reports(RecordId(2)), 2);
	}

	#[test]
	fn refresh_keeps_view_state_and_prunes_stale_ids() {
		let mut state = ChartState::new(&sample(), no_fit(), 800.0, 600.0);
		state.toggle(RecordId(2));
		state.toggle(RecordId(5));
		state.transform.x = 12.0;

		let mut refreshed = sample();
		refreshed.pop();
		state.set_records(&refreshed);

		assert!(!state.is_expanded(RecordId(2)));
		assert_eq!(state.expansion.tracked(), 1);
		assert_eq!(state.transform.x, 12.0);
		assert_eq!(state.forest().len(), 4);
	}

	#[test]
	fn wheel_steps_and_clamps() {
		let mut state = ChartState::new(&sample(), no_fit(), 800.0, 600.0);
		state.wheel(-1.0, 0.0, 0.0);
		assert!((state.transform.k - 1.1).abs() < 1e-9);
		state.wheel(0.0, 0.0, 0.0);
		assert!((state.transform.k - 1.1).abs() < 1e-9);
		for _ in 0..30 {
			state.wheel(-3.0, 10.0, 10.0);
		}
		assert_eq!(state.transform.k, 2.0);
		for _ in 0..30 {
			state.zoom_out();
		}
		assert_eq!(state.transform.k, 0.5);
	}

	#[test]
	fn wheel_zoom_keeps_anchor_fixed() {
		let mut state = ChartState::new(&sample(), no_fit(), 800.0, 600.0);
		let before = state.transform.screen_to_chart(200.0, 150.0);
		state.wheel(-1.0, 200.0, 150.0);
		let after = state.transform.screen_to_chart(200.0, 150.0);
		assert!((before.0 - after.0).abs() < 1e-9);
		assert!((before.1 - after.1).abs() < 1e-9);
	}

	#[test]
	fn fit_to_view_contains_bounds() {
		let bounds = Bounds {
			min_x: -100.0,
			min_y: 0.0,
			max_x: 300.0,
			max_y: 200.0,
		};
		let t = fit_to_view(&bounds, 500.0, 300.0, 50.0, &ZoomConfig::default());
		assert_eq!(t.k, 1.0);
		assert_eq!((t.x, t.y), (150.0, 50.0));

		let tiny = fit_to_view(&bounds, 100.0, 100.0, 10.0, &ZoomConfig::default());
		assert_eq!(tiny.k, 0.5);

		let empty = fit_to_view(&Bounds::default(), 500.0, 300.0, 50.0, &ZoomConfig::default());
		assert_eq!(empty, ViewTransform::default());
	}

	#[test]
	fn fit_on_load_centres_chart() {
		let state = ChartState::new(&sample(), ChartConfig::default(), 1600.0, 1200.0);
		let (cx, cy) = state.layout().bounds.center();
		let sx = cx * state.transform.k + state.transform.x;
		let sy = cy * state.transform.k + state.transform.y;
		assert!((sx - 800.0).abs() < 1e-9);
		assert!((sy - 600.0).abs() < 1e-9);
	}

	proptest! {
		#[test]
		fn prop_toggle_twice_is_identity(id in any::<i64>(), preset in prop::option::of(any::<bool>())) {
			let mut expansion = ExpansionState::default();
			if let Some(flag) = preset {
				expansion.set_expanded(RecordId(id), flag);
			}
			let before = expansion.is_expanded(RecordId(id));
			expansion.toggle(RecordId(id));
			expansion.toggle(RecordId(id));
			prop_assert_eq!(expansion.is_expanded(RecordId(id)), before);
		}

		#[test]
		fn prop_visible_forest_hides_only_collapsed_descendants(
			parents in prop::collection::vec(any::<prop::sample::Index>(), 1..40),
			collapsed in prop::collection::vec(any::<bool>(), 40),
		) {
			let records: Vec<Record> = parents
				.iter()
				.enumerate()
				.map(|(i, p)| rec(i as i64, (i > 0).then(|| p.index(i) as i64)))
				.collect();
			let forest = build_forest(&records).forest;
			let mut expansion = ExpansionState::default();
			for (i, &c) in collapsed.iter().enumerate().take(records.len()) {
				if c {
					expansion.set_expanded(RecordId(i as i64), false);
				}
			}

			let visible = visible_forest(&forest, &expansion);
			for (_, node) in visible.iter() {
				if !expansion.is_expanded(node.id) {
					prop_assert!(node.children.is_empty());
				} else {
					let full = forest.find(node.id).unwrap();
					prop_assert_eq!(node.children.len(), full.children.len());
				}
			}
			// A node is visible iff no ancestor is collapsed.
			let expected = forest
				.iter()
				.filter(|(_, n)| {
					let mut id = n.id.0;
					while let Some(parent) = records[id as usize].parent_id {
						if !expansion.is_expanded(parent) {
							return false;
						}
						id = parent.0;
					}
					true
				})
				.count();
			prop_assert_eq!(visible.len(), expected);
		}

		#[test]
		fn prop_zoom_stays_in_bounds(deltas in prop::collection::vec((-5.0f64..5.0, 0.0f64..800.0, 0.0f64..600.0), 0..80)) {
			let mut state = ChartState::new(&[], no_fit(), 800.0, 600.0);
			for (delta, x, y) in deltas {
				state.wheel(delta, x, y);
				prop_assert!(state.transform.k >= 0.5 && state.transform.k <= 2.0);
			}
		}
	}
}
