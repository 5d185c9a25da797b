//! Top-down tidy layout for the visible forest.
//!
//! Each subtree gets a horizontal band wide enough for its own card and for
//! all of its children side by side. Parents are centred over their band, so
//! siblings never overlap and reports read left to right in input order.
//!
//! All coordinates are in chart space; the view transform maps them to the
//! screen.

use std::collections::HashMap;

use serde::Deserialize;

use super::tree::{Forest, Node};
use super::types::RecordId;

/// Card size and spacing used by the layout.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
	/// Card width in chart units.
	pub card_width: f64,
	/// Card height in chart units.
	pub card_height: f64,
	/// Horizontal gap between sibling subtrees.
	pub sibling_gap: f64,
	/// Horizontal gap between separate root trees.
	pub root_gap: f64,
	/// Vertical gap between a manager row and its reports.
	pub level_gap: f64,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			card_width: 200.0,
			card_height: 96.0,
			sibling_gap: 24.0,
			root_gap: 64.0,
			level_gap: 56.0,
		}
	}
}

/// Axis-aligned rectangle in chart space. Zero-sized bounds are empty.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
	/// Left edge.
	pub min_x: f64,
	/// Top edge.
	pub min_y: f64,
	/// Right edge.
	pub max_x: f64,
	/// Bottom edge.
	pub max_y: f64,
}

impl Bounds {
	/// Whether the bounds enclose no area.
	pub fn is_empty(&self) -> bool {
		self.max_x <= self.min_x || self.max_y <= self.min_y
	}

	/// Horizontal extent.
	pub fn width(&self) -> f64 {
		self.max_x - self.min_x
	}

	/// Vertical extent.
	pub fn height(&self) -> f64 {
		self.max_y - self.min_y
	}

	/// Midpoint.
	pub fn center(&self) -> (f64, f64) {
		(
			(self.min_x + self.max_x) / 2.0,
			(self.min_y + self.max_y) / 2.0,
		)
	}

	/// Smallest bounds containing both.
	pub fn union(self, other: Bounds) -> Bounds {
		if self.is_empty() {
			return other;
		}
		if other.is_empty() {
			return self;
		}
		Bounds {
			min_x: self.min_x.min(other.min_x),
			min_y: self.min_y.min(other.min_y),
			max_x: self.max_x.max(other.max_x),
			max_y: self.max_y.max(other.max_y),
		}
	}
}

/// Placed card.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeBox {
	/// Card id.
	pub id: RecordId,
	/// Tree depth, 0 for roots.
	pub depth: usize,
	/// Left edge.
	pub x: f64,
	/// Top edge.
	pub y: f64,
	/// Card width.
	pub width: f64,
	/// Card height.
	pub height: f64,
}

impl NodeBox {
	/// Card centre.
	pub fn center(&self) -> (f64, f64) {
		(self.x + self.width / 2.0, self.y + self.height / 2.0)
	}

	/// Whether the chart-space point lies on the card.
	pub fn contains(&self, x: f64, y: f64) -> bool {
		x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
	}

	/// The card's rectangle as bounds.
	pub fn bounds(&self) -> Bounds {
		Bounds {
			min_x: self.x,
			min_y: self.y,
			max_x: self.x + self.width,
			max_y: self.y + self.height,
		}
	}
}

/// Elbow connector from a manager to one report.
#[derive(Clone, Debug, PartialEq)]
pub struct Connector {
	/// Manager id.
	pub parent: RecordId,
	/// Report id.
	pub child: RecordId,
	/// Polyline: manager bottom-centre, down to mid-gap, across, down to report top-centre.
	pub points: [(f64, f64); 4],
}

/// Result of laying out a forest.
#[derive(Clone, Debug, Default)]
pub struct TreeLayout {
	/// Cards in depth-first order.
	pub boxes: Vec<NodeBox>,
	/// One connector per visible manager/report pair.
	pub connectors: Vec<Connector>,
	/// Union of all card rectangles; empty when nothing is visible.
	pub bounds: Bounds,
}

impl TreeLayout {
	/// Card containing the chart-space point, if any.
	pub fn box_at(&self, x: f64, y: f64) -> Option<&NodeBox> {
		self.boxes.iter().rev().find(|b| b.contains(x, y))
	}
}

/// Lays out every node of `forest`. Callers pass the already-pruned visible forest.
pub fn compute_layout(forest: &Forest, config: &LayoutConfig) -> TreeLayout {
	let widths = subtree_widths(forest, config);
	let mut layout = TreeLayout::default();
	let mut left = 0.0;

	for root in &forest.roots {
		place(root, left, &widths, config, &mut layout);
		left += widths[&root.id] + config.root_gap;
	}

	layout.bounds = layout
		.boxes
		.iter()
		.fold(Bounds::default(), |acc, b| acc.union(b.bounds()));
	layout
}

/// Band width of every subtree, filled in post-order so each node is sized once.
fn subtree_widths(forest: &Forest, config: &LayoutConfig) -> HashMap<RecordId, f64> {
	let order: Vec<&Node> = forest.iter().map(|(_, n)| n).collect();
	let mut widths = HashMap::with_capacity(order.len());
	for node in order.into_iter().rev() {
		let width = if node.children.is_empty() {
			config.card_width
		} else {
			let children: f64 = node.children.iter().map(|c| widths[&c.id]).sum();
			let gaps = config.sibling_gap * (node.children.len() - 1) as f64;
			config.card_width.max(children + gaps)
		};
		widths.insert(node.id, width);
	}
	widths
}

/// Places the tree under `root` in the band starting at `left`. Each node is
/// centred in its band and its reports share the band below it.
fn place(
	root: &Node,
	left: f64,
	widths: &HashMap<RecordId, f64>,
	config: &LayoutConfig,
	layout: &mut TreeLayout,
) {
	let row_height = config.card_height + config.level_gap;
	let mut stack = vec![(root, left, 0usize)];

	while let Some((node, left, depth)) = stack.pop() {
		let width = widths[&node.id];
		let y = depth as f64 * row_height;
		let x = left + (width - config.card_width) / 2.0;

		layout.boxes.push(NodeBox {
			id: node.id,
			depth,
			x,
			y,
			width: config.card_width,
			height: config.card_height,
		});

		if node.children.is_empty() {
			continue;
		}

		let span: f64 = node.children.iter().map(|c| widths[&c.id]).sum::<f64>()
			+ config.sibling_gap * (node.children.len() - 1) as f64;
		let mut child_left = left + (width - span) / 2.0;

		let start = (x + config.card_width / 2.0, y + config.card_height);
		let mid_y = y + config.card_height + config.level_gap / 2.0;
		let child_y = y + row_height;

		let mut placed = Vec::with_capacity(node.children.len());
		for child in &node.children {
			let child_width = widths[&child.id];
			let child_cx = child_left + child_width / 2.0;
			layout.connectors.push(Connector {
				parent: node.id,
				child: child.id,
				points: [start, (start.0, mid_y), (child_cx, mid_y), (child_cx, child_y)],
			});
			placed.push((child, child_left, depth + 1));
			child_left += child_width + config.sibling_gap;
		}
		// Reversed so the first report is placed next, keeping depth-first order.
		stack.extend(placed.into_iter().rev());
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::org_chart::tree::build_forest;
	use crate::components::org_chart::types::{CardInfo, Record};

	fn forest(pairs: &[(i64, Option<i64>)]) -> Forest {
		let records: Vec<Record> = pairs
			.iter()
			.map(|&(id, parent)| {
				let r = Record::new(id, CardInfo::new("n", "t"));
				match parent {
					Some(p) => r.reporting_to(p),
					None => r,
				}
			})
			.collect();
		build_forest(&records).forest
	}

	fn config() -> LayoutConfig {
		LayoutConfig {
			card_width: 100.0,
			card_height: 50.0,
			sibling_gap: 10.0,
			root_gap: 40.0,
			level_gap: 30.0,
		}
	}

	fn find(layout: &TreeLayout, id: i64) -> &NodeBox {
		layout.boxes.iter().find(|b| b.id == RecordId(id)).unwrap()
	}

	#[test]
	fn empty_forest_has_empty_bounds() {
		let layout = compute_layout(&Forest::default(), &config());
		assert!(layout.boxes.is_empty());
		assert!(layout.bounds.is_empty());
	}

	#[test]
	fn parent_is_centred_over_reports() {
		let layout = compute_layout(&forest(&[(1, None), (2, Some(1)), (3, Some(1))]), &config());

		let (b1, b2, b3) = (find(&layout, 1), find(&layout, 2), find(&layout, 3));
		assert_eq!((b2.x, b3.x), (0.0, 110.0));
		assert_eq!(b1.x, 55.0);
		assert_eq!(b2.y, 80.0);
		assert_eq!(b2.depth, 1);
		assert_eq!(
			layout.bounds,
			Bounds {
				min_x: 0.0,
				min_y: 0.0,
				max_x: 210.0,
				max_y: 130.0,
			}
		);

		let connector = &layout.connectors[1];
		assert_eq!(connector.child, RecordId(3));
		assert_eq!(connector.points[0], (105.0, 50.0));
		assert_eq!(connector.points[3], (160.0, 80.0));
	}

	#[test]
	fn roots_sit_side_by_side_without_overlap() {
		let layout = compute_layout(
			&forest(&[(1, None), (2, Some(1)), (3, Some(1)), (4, None)]),
			&config(),
		);
		assert_eq!(find(&layout, 4).x, 250.0);
		for a in &layout.boxes {
			for b in &layout.boxes {
				if a.id != b.id && a.depth == b.depth {
					assert!(a.x + a.width <= b.x || b.x + b.width <= a.x);
				}
			}
		}
	}

	#[test]
	fn deep_chain_is_laid_out_without_recursion() {
		let pairs: Vec<(i64, Option<i64>)> = (0..40_000).map(|i| (i, (i > 0).then(|| i - 1))).collect();
		let layout = compute_layout(&forest(&pairs), &config());
		assert_eq!(layout.boxes.len(), 40_000);
		assert_eq!(layout.connectors.len(), 39_999);
		assert_eq!(find(&layout, 39_999).y, 39_999.0 * 80.0);
		assert_eq!(find(&layout, 39_999).x, 0.0);
	}

	#[test]
	fn hit_testing_finds_cards() {
		let layout = compute_layout(&forest(&[(1, None), (2, Some(1))]), &config());
		assert_eq!(layout.box_at(10.0, 90.0).map(|b| b.id), Some(RecordId(2)));
		assert_eq!(layout.box_at(10.0, 65.0), None);
	}
}
