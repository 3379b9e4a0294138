use std::collections::HashMap;

use super::store::{GraphStore, Node};
use super::types::Dataset;

/// Current cluster and tag selection. A key counts as selected only when it
/// is present and mapped to `true`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterState {
	pub clusters: HashMap<String, bool>,
	pub tags: HashMap<String, bool>,
}

impl FilterState {
	/// Every cluster and tag the dataset declares, all selected.
	pub fn select_all(dataset: &Dataset) -> Self {
		Self {
			clusters: dataset
				.clusters
				.iter()
				.map(|c| (c.key.clone(), true))
				.collect(),
			tags: dataset.tags.iter().map(|t| (t.key.clone(), true)).collect(),
		}
	}

	pub fn is_cluster_active(&self, key: &str) -> bool {
		self.clusters.get(key).copied().unwrap_or(false)
	}

	pub fn is_tag_active(&self, key: &str) -> bool {
		self.tags.get(key).copied().unwrap_or(false)
	}

	pub fn active_tag_count(&self) -> usize {
		self.tags.values().filter(|&&active| active).count()
	}

	pub fn has_active_tags(&self) -> bool {
		self.tags.values().any(|&active| active)
	}

	/// Deselect an active tag (dropping its key), or select it.
	pub fn toggle_tag(&mut self, key: &str) {
		if self.is_tag_active(key) {
			self.tags.remove(key);
		} else {
			self.tags.insert(key.to_string(), true);
		}
	}

	pub fn set_tags(&mut self, tags: HashMap<String, bool>) {
		self.tags = tags;
	}
}

/// Passes when at least one of the node's clusters is selected.
pub fn passes_cluster_filter(node: &Node, filters: &FilterState) -> bool {
	node.clusters.iter().any(|c| filters.is_cluster_active(c))
}

/// Passes when at least one of the node's tags is selected. With no tag
/// selected at all nothing passes, unlike the cluster filter.
pub fn passes_tag_filter(node: &Node, filters: &FilterState) -> bool {
	filters.has_active_tags() && node.tags.iter().any(|t| filters.is_tag_active(t))
}

pub fn is_visible(node: &Node, filters: &FilterState) -> bool {
	passes_cluster_filter(node, filters) && passes_tag_filter(node, filters)
}

/// Rewrite every node's hidden flag from `filters` and return how many
/// nodes remain visible.
pub fn recompute_visibility(store: &mut GraphStore, filters: &FilterState) -> usize {
	log::debug!("Filters applied: {filters:?}");
	let mut visible = 0;
	store.rewrite_hidden(|node| {
		let shown = is_visible(node, filters);
		if shown {
			visible += 1;
		}
		!shown
	});
	log::info!("Nodes visible: {}/{}", visible, store.node_count());
	visible
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::similarity_graph::settings::GraphSettings;

	fn filters(clusters: &[&str], tags: &[&str]) -> FilterState {
		FilterState {
			clusters: clusters.iter().map(|k| (k.to_string(), true)).collect(),
			tags: tags.iter().map(|k| (k.to_string(), true)).collect(),
		}
	}

	fn hidden(store: &GraphStore, id: &str) -> bool {
		store.node_by_id(id).unwrap().hidden()
	}

	fn scenario() -> GraphStore {
		let mut store = GraphStore::new();
		store.add_node(Node::new("A", 0.0, 0.0).with_clusters(["c1"]).with_tags(["t1"]));
		store.add_node(Node::new("B", 1.0, 1.0).with_clusters(["c2"]).with_tags(["t1"]));
		store
	}

	#[test]
	fn cluster_mismatch_hides_node() {
		let mut store = scenario();
		let visible = recompute_visibility(&mut store, &filters(&["c1"], &["t1"]));
		assert_eq!(visible, 1);
		assert!(!hidden(&store, "A"));
		assert!(hidden(&store, "B"));
	}

	#[test]
	fn empty_tag_selection_hides_everything() {
		let mut store = scenario();
		let visible = recompute_visibility(&mut store, &filters(&["c1", "c2"], &[]));
		assert_eq!(visible, 0);
		assert!(hidden(&store, "A"));
		assert!(hidden(&store, "B"));
	}

	#[test]
	fn tags_mapped_to_false_count_as_unselected() {
		let mut store = scenario();
		let mut state = filters(&["c1", "c2"], &[]);
		state.tags.insert("t1".into(), false);
		assert!(!state.has_active_tags());
		assert_eq!(recompute_visibility(&mut store, &state), 0);
	}

	#[test]
	fn any_selected_cluster_is_enough() {
		let node = Node::new("n", 0.0, 0.0).with_clusters(["a", "b"]).with_tags(["t"]);
		assert!(passes_cluster_filter(&node, &filters(&["a"], &["t"])));
		assert!(passes_cluster_filter(&node, &filters(&["b"], &["t"])));
		assert!(!passes_cluster_filter(&node, &filters(&["c"], &["t"])));
		assert!(!passes_cluster_filter(&node, &filters(&[], &["t"])));
	}

	#[test]
	fn uncategorised_nodes_fail_both_checks() {
		let node = Node::new("bare", 0.0, 0.0);
		let state = filters(&["a"], &["t"]);
		assert!(!passes_cluster_filter(&node, &state));
		assert!(!passes_tag_filter(&node, &state));
	}

	#[test]
	fn recompute_ignores_previous_flags() {
		let mut store = scenario();
		let wide = filters(&["c1", "c2"], &["t1"]);
		let narrow = filters(&["c2"], &["t1"]);

		recompute_visibility(&mut store, &narrow);
		recompute_visibility(&mut store, &wide);
		let after_wide: Vec<bool> = store.nodes().map(|(_, n)| n.hidden()).collect();
		recompute_visibility(&mut store, &wide);
		let again: Vec<bool> = store.nodes().map(|(_, n)| n.hidden()).collect();

		assert_eq!(after_wide, vec![false, false]);
		assert_eq!(after_wide, again);
	}

	#[test]
	fn hidden_matches_predicates_for_every_node() {
		let mut store = GraphStore::new();
		store.add_node(Node::new("1", 0.0, 0.0).with_clusters(["a"]).with_tags(["x", "y"]));
		store.add_node(Node::new("2", 0.0, 0.0).with_clusters(["b"]).with_tags(["y"]));
		store.add_node(Node::new("3", 0.0, 0.0).with_clusters(["a", "b"]));
		store.add_node(Node::new("4", 0.0, 0.0).with_tags(["x"]));
		let state = filters(&["a"], &["y"]);

		recompute_visibility(&mut store, &state);
		for (_, node) in store.nodes() {
			assert_eq!(
				node.hidden(),
				!(passes_cluster_filter(node, &state) && passes_tag_filter(node, &state)),
				"node {}",
				node.id
			);
		}
		assert!(!hidden(&store, "1"));
	}

	#[test]
	fn legacy_and_list_tags_filter_identically() {
		let dataset = Dataset::from_json(
			r#"{"nodes": [
				{"key": "legacy", "cluster": "c", "tag": "x"},
				{"key": "list", "cluster": "c", "tags": ["x"]},
				{"key": "tag-list", "cluster": "c", "tag": ["x"]}
			]}"#,
		)
		.unwrap();
		let mut store = GraphStore::from_dataset(&dataset, &GraphSettings::default());
		for state in [filters(&["c"], &["x"]), filters(&["c"], &["y"]), filters(&["c"], &[])] {
			recompute_visibility(&mut store, &state);
			let flags: Vec<bool> = store.nodes().map(|(_, n)| n.hidden()).collect();
			assert!(flags.iter().all(|&h| h == flags[0]), "{flags:?}");
		}
	}

	#[test]
	fn toggle_tag_removes_and_restores_key() {
		let mut state = filters(&[], &["t1", "t2"]);
		state.toggle_tag("t1");
		assert!(!state.tags.contains_key("t1"));
		assert_eq!(state.active_tag_count(), 1);
		state.toggle_tag("t1");
		assert!(state.is_tag_active("t1"));
		state.set_tags(HashMap::new());
		assert!(!state.has_active_tags());
		state.set_tags([("t1".to_string(), true), ("t3".to_string(), false)].into());
		assert_eq!(state.active_tag_count(), 1);
	}

	#[test]
	fn select_all_covers_dataset_keys() {
		let dataset = Dataset::from_json(
			r#"{"clusters": [{"key": "c1"}, {"key": "c2"}], "tags": [{"key": "t1"}]}"#,
		)
		.unwrap();
		let state = FilterState::select_all(&dataset);
		assert!(state.is_cluster_active("c1"));
		assert!(state.is_cluster_active("c2"));
		assert!(state.is_tag_active("t1"));
	}
}
