//! Hierarchy construction from flat records.
//!
//! Records are indexed first, then linked to their managers in a second pass,
//! so the result never depends on the order in which managers and reports
//! appear. The forest owns copies of every card; later edits to the input have
//! no effect on it.

use std::collections::{HashMap, HashSet};

use log::warn;
use thiserror::Error;

use super::types::{CardInfo, Record, RecordId};

/// A hierarchy member together with its direct reports.
///
/// Dropping, cloning and comparing never recurse, so arbitrarily deep chains
/// are safe to handle.
#[derive(Debug)]
pub struct Node {
	/// Id of the source record.
	pub id: RecordId,
	/// Display attributes copied from the source record.
	pub card: CardInfo,
	/// Direct reports, in input order.
	pub children: Vec<Node>,
}

impl Node {
	/// Whether the node has any direct reports in this tree.
	pub fn has_children(&self) -> bool {
		!self.children.is_empty()
	}
}

impl Drop for Node {
	fn drop(&mut self) {
		let mut pending = std::mem::take(&mut self.children);
		while let Some(mut node) = pending.pop() {
			pending.append(&mut node.children);
		}
	}
}

/// Ordered list of root nodes.
#[derive(Debug, Default)]
pub struct Forest {
	/// Trees in input order.
	pub roots: Vec<Node>,
}

impl Forest {
	/// Total number of nodes across all trees.
	pub fn len(&self) -> usize {
		self.iter().count()
	}

	/// Whether the forest has no nodes at all.
	pub fn is_empty(&self) -> bool {
		self.roots.is_empty()
	}

	/// Depth-first, pre-order traversal yielding `(depth, node)`.
	pub fn iter(&self) -> DepthFirst<'_> {
		DepthFirst {
			stack: self.roots.iter().rev().map(|n| (0, n)).collect(),
		}
	}

	/// Finds a node anywhere in the forest.
	pub fn find(&self, id: RecordId) -> Option<&Node> {
		self.iter().map(|(_, n)| n).find(|n| n.id == id)
	}

	/// Number of direct reports per node id.
	pub fn direct_reports(&self) -> HashMap<RecordId, usize> {
		self.iter().map(|(_, n)| (n.id, n.children.len())).collect()
	}

	/// Copy of the forest where only nodes accepted by `keep_children` keep
	/// their reports. The nodes themselves always stay.
	pub fn pruned(&self, keep_children: impl Fn(&Node) -> bool) -> Forest {
		// Pre-order slots, each remembering its parent's slot.
		let mut order: Vec<(&Node, Option<usize>)> = Vec::new();
		let mut stack: Vec<(&Node, Option<usize>)> = self.roots.iter().rev().map(|n| (n, None)).collect();
		while let Some((node, parent)) = stack.pop() {
			let slot = order.len();
			order.push((node, parent));
			if keep_children(node) {
				stack.extend(node.children.iter().rev().map(|c| (c, Some(slot))));
			}
		}

		// Descendants always sit in later slots; build back to front.
		let mut children: Vec<Vec<Node>> = (0..order.len()).map(|_| Vec::new()).collect();
		let mut roots = Vec::new();
		for slot in (0..order.len()).rev() {
			let (node, parent) = order[slot];
			let mut kids = std::mem::take(&mut children[slot]);
			kids.reverse();
			let copy = Node {
				id: node.id,
				card: node.card.clone(),
				children: kids,
			};
			match parent {
				Some(p) => children[p].push(copy),
				None => roots.push(copy),
			}
		}
		roots.reverse();
		Forest { roots }
	}
}

impl Clone for Forest {
	fn clone(&self) -> Self {
		self.pruned(|_| true)
	}
}

impl PartialEq for Forest {
	/// Pre-order `(depth, id, card)` sequences pin down the whole shape.
	fn eq(&self, other: &Self) -> bool {
		fn key((depth, node): (usize, &Node)) -> (usize, RecordId, &CardInfo) {
			(depth, node.id, &node.card)
		}
		self.iter().map(key).eq(other.iter().map(key))
	}
}

/// Pre-order iterator over a [`Forest`].
pub struct DepthFirst<'a> {
	stack: Vec<(usize, &'a Node)>,
}

impl<'a> Iterator for DepthFirst<'a> {
	type Item = (usize, &'a Node);

	fn next(&mut self) -> Option<Self::Item> {
		let (depth, node) = self.stack.pop()?;
		self.stack
			.extend(node.children.iter().rev().map(|child| (depth + 1, child)));
		Some((depth, node))
	}
}

/// Problems found while building a forest. None of them abort construction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ForestDiagnostic {
	/// A later record reused an id; it was dropped and the first one kept.
	#[error("duplicate record id {id}: keeping the first occurrence")]
	DuplicateId {
		/// The repeated id.
		id: RecordId,
	},
	/// The manager id matched no record; the record became a root.
	#[error("manager {parent_id} not found for record {id}: treating as root")]
	UnresolvedParent {
		/// Record that was promoted.
		id: RecordId,
		/// Manager id that matched nothing.
		parent_id: RecordId,
	},
	/// The record's manager chain loops back on itself; the link was cut and
	/// the record became a root.
	#[error("manager chain of record {id} forms a cycle: treating as root")]
	ParentCycle {
		/// Cycle member whose manager link was cut.
		id: RecordId,
	},
}

/// A forest plus everything worth reporting about how it was built.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BuildOutput {
	/// The assembled hierarchy.
	pub forest: Forest,
	/// Problems found, in the order they were detected.
	pub diagnostics: Vec<ForestDiagnostic>,
}

/// Builds a forest from flat records.
///
/// Sibling order and root order follow the input order. Records whose manager
/// is missing, or whose manager chain is cyclic, are kept as roots.
pub fn build_forest(records: &[Record]) -> BuildOutput {
	let mut diagnostics = Vec::new();

	// Pass 1: index accepted records by id.
	let mut index: HashMap<RecordId, usize> = HashMap::with_capacity(records.len());
	let mut accepted: Vec<&Record> = Vec::with_capacity(records.len());
	for record in records {
		if index.contains_key(&record.id) {
			diagnostics.push(ForestDiagnostic::DuplicateId { id: record.id });
			continue;
		}
		index.insert(record.id, accepted.len());
		accepted.push(record);
	}

	// Pass 2: resolve managers and link reports in input order.
	let mut parent: Vec<Option<usize>> = vec![None; accepted.len()];
	let mut children: Vec<Vec<usize>> = vec![Vec::new(); accepted.len()];
	for (slot, record) in accepted.iter().enumerate() {
		let Some(parent_id) = record.parent_id else {
			continue;
		};
		match index.get(&parent_id) {
			Some(&p) => {
				parent[slot] = Some(p);
				children[p].push(slot);
			}
			None => diagnostics.push(ForestDiagnostic::UnresolvedParent {
				id: record.id,
				parent_id,
			}),
		}
	}

	// Anything unreachable from a root hangs off a cycle. Promote the first
	// cycle member met on its manager chain and cut that link.
	let mut reached = vec![false; accepted.len()];
	for slot in 0..accepted.len() {
		if parent[slot].is_none() {
			mark_reachable(slot, &children, &mut reached);
		}
	}
	for slot in 0..accepted.len() {
		if reached[slot] {
			continue;
		}
		let member = cycle_member(slot, &parent);
		if let Some(p) = parent[member].take() {
			children[p].retain(|&c| c != member);
		}
		diagnostics.push(ForestDiagnostic::ParentCycle {
			id: accepted[member].id,
		});
		mark_reachable(member, &children, &mut reached);
	}

	for diagnostic in &diagnostics {
		warn!("org-chart: {}", diagnostic);
	}

	let roots: Vec<usize> = (0..accepted.len()).filter(|&s| parent[s].is_none()).collect();
	BuildOutput {
		forest: assemble(&roots, &accepted, &children),
		diagnostics,
	}
}

/// Follows the manager chain from `slot` until it repeats.
fn cycle_member(slot: usize, parent: &[Option<usize>]) -> usize {
	let mut seen = HashSet::new();
	let mut current = slot;
	while seen.insert(current) {
		match parent[current] {
			Some(p) => current = p,
			None => break,
		}
	}
	current
}

fn mark_reachable(start: usize, children: &[Vec<usize>], reached: &mut [bool]) {
	let mut stack = vec![start];
	while let Some(slot) = stack.pop() {
		if std::mem::replace(&mut reached[slot], true) {
			continue;
		}
		stack.extend(children[slot].iter().copied());
	}
}

/// Turns the linked slots into owned nodes, bottom-up.
fn assemble(roots: &[usize], records: &[&Record], children: &[Vec<usize>]) -> Forest {
	let mut order = Vec::with_capacity(records.len());
	let mut stack: Vec<usize> = roots.iter().rev().copied().collect();
	while let Some(slot) = stack.pop() {
		order.push(slot);
		stack.extend(children[slot].iter().rev().copied());
	}

	// Reverse pre-order visits every child before its parent.
	let mut built: Vec<Option<Node>> = (0..records.len()).map(|_| None).collect();
	for &slot in order.iter().rev() {
		let kids = children[slot]
			.iter()
			.filter_map(|&c| built[c].take())
			.collect();
		built[slot] = Some(Node {
			id: records[slot].id,
			card: records[slot].card.clone(),
			children: kids,
		});
	}

	Forest {
		roots: roots.iter().filter_map(|&r| built[r].take()).collect(),
	}
}
