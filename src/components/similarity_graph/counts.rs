use std::collections::BTreeMap;

use super::store::GraphStore;

/// Visible vs total members of one cluster or tag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CategoryCount {
	pub total: usize,
	pub visible: usize,
}

/// Counts derived from the hidden flags the filter pass last wrote.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GraphCounts {
	/// Total nodes.
	pub nodes: usize,
	/// Non-hidden nodes.
	pub visible_nodes: usize,
	/// Total edges.
	pub edges: usize,
	/// Edges with both endpoints visible.
	pub visible_edges: usize,
	/// Per-cluster membership.
	pub clusters: BTreeMap<String, CategoryCount>,
	/// Per-tag membership.
	pub tags: BTreeMap<String, CategoryCount>,
}

impl GraphCounts {
	/// Tally the store in one pass over nodes and one over edges.
	pub fn collect(store: &GraphStore) -> Self {
		let mut counts = Self {
			nodes: store.node_count(),
			edges: store.edge_count(),
			..Self::default()
		};

		for (_, node) in store.nodes() {
			let visible = !node.hidden();
			if visible {
				counts.visible_nodes += 1;
			}
			for key in &node.clusters {
				bump(&mut counts.clusters, key, visible);
			}
			for key in &node.tags {
				bump(&mut counts.tags, key, visible);
			}
		}

		counts.visible_edges = store
			.edges()
			.filter(|(source, target)| !source.hidden() && !target.hidden())
			.count();
		counts
	}
}

fn bump(index: &mut BTreeMap<String, CategoryCount>, key: &str, visible: bool) {
	let entry = index.entry(key.to_string()).or_default();
	entry.total += 1;
	if visible {
		entry.visible += 1;
	}
}
