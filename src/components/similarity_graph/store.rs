use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use super::scale::SizeScale;
use super::settings::GraphSettings;
use super::types::Dataset;

const COLORS: &[&str] = &[
	"#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
	"#bcbd22", "#17becf",
];

const FALLBACK_RADIUS: f64 = 100.0;

/// Position of a node inside a [`GraphStore`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIdx(usize);

/// A node with its category memberships already normalised.
#[derive(Clone, Debug)]
pub struct Node {
	pub id: String,
	pub label: Option<String>,
	pub color: String,
	pub x: f64,
	pub y: f64,
	pub score: f64,
	pub size: f64,
	pub clusters: Vec<String>,
	pub tags: Vec<String>,
	hidden: bool,
}

impl Node {
	pub fn new(id: impl Into<String>, x: f64, y: f64) -> Self {
		Self {
			id: id.into(),
			label: None,
			color: COLORS[0].into(),
			x,
			y,
			score: 0.0,
			size: 1.0,
			clusters: Vec::new(),
			tags: Vec::new(),
			hidden: false,
		}
	}

	pub fn with_clusters<I, S>(mut self, clusters: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.clusters = clusters.into_iter().map(Into::into).collect();
		self
	}

	pub fn with_tags<I, S>(mut self, tags: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.tags = tags.into_iter().map(Into::into).collect();
		self
	}

	/// Written by the filter pass only.
	pub fn hidden(&self) -> bool {
		self.hidden
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edge {
	pub source: NodeIdx,
	pub target: NodeIdx,
}

/// Owned node/edge store shared by the filter pass and the drag controller.
///
/// Nodes and edges are only ever added. At runtime the store exposes two
/// mutations: position changes ([`GraphStore::translate_node`]) and the
/// wholesale visibility rewrite ([`GraphStore::rewrite_hidden`]).
#[derive(Clone, Debug, Default)]
pub struct GraphStore {
	nodes: Vec<Node>,
	index_by_id: HashMap<String, NodeIdx>,
	edges: Vec<Edge>,
	edge_set: HashSet<(NodeIdx, NodeIdx)>,
}

impl GraphStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Build a store from a parsed dataset: normalise categories, resolve
	/// colours, place unpositioned nodes and size nodes by score.
	pub fn from_dataset(dataset: &Dataset, settings: &GraphSettings) -> Self {
		let cluster_colors: HashMap<&str, String> = dataset
			.clusters
			.iter()
			.enumerate()
			.map(|(i, c)| {
				let color = c
					.color
					.clone()
					.unwrap_or_else(|| COLORS[i % COLORS.len()].into());
				(c.key.as_str(), color)
			})
			.collect();

		let count = dataset.nodes.len().max(1);
		let mut store = Self::new();
		for (i, raw) in dataset.nodes.iter().enumerate() {
			let id = raw.key().unwrap_or_else(|| format!("node-{i}"));
			if store.has_node(&id) {
				continue;
			}
			let angle = (i as f64) * 2.0 * PI / count as f64;
			let clusters = raw.cluster_keys();
			let color = clusters
				.first()
				.and_then(|c| cluster_colors.get(c.as_str()).cloned())
				.unwrap_or_else(|| COLORS[0].into());

			let (x, y) = raw
				.position()
				.unwrap_or((FALLBACK_RADIUS * angle.cos(), FALLBACK_RADIUS * angle.sin()));

			let mut node = Node::new(id, x, y)
				.with_clusters(clusters)
				.with_tags(raw.tag_keys());
			node.label = raw.label();
			node.color = color;
			node.score = raw.score();
			store.add_node(node);
		}

		for (source, target) in dataset.edge_pairs() {
			if !store.has_edge(&source, &target) {
				store.add_edge(&source, &target);
			}
		}

		store.apply_size_scale(settings);
		log::debug!(
			"Graph loaded: {} nodes, {} edges",
			store.node_count(),
			store.edge_count()
		);
		store
	}

	fn apply_size_scale(&mut self, settings: &GraphSettings) {
		let scores: Vec<f64> = self.nodes.iter().map(|n| n.score).collect();
		let scale = SizeScale::new(
			&scores,
			settings.min_node_size,
			settings.max_node_size,
			settings.size_epsilon,
		);
		for node in &mut self.nodes {
			node.size = scale.size(node.score);
		}
	}

	/// Insert a node. Re-adding an existing id is a no-op and returns the
	/// existing index.
	pub fn add_node(&mut self, node: Node) -> NodeIdx {
		if let Some(&idx) = self.index_by_id.get(&node.id) {
			return idx;
		}
		let idx = NodeIdx(self.nodes.len());
		self.index_by_id.insert(node.id.clone(), idx);
		self.nodes.push(node);
		idx
	}

	/// Insert an edge between two existing ids. Returns `false` without
	/// touching the store when an endpoint is unknown or the pair exists.
	pub fn add_edge(&mut self, source: &str, target: &str) -> bool {
		let (Some(source), Some(target)) = (self.node_idx(source), self.node_idx(target)) else {
			return false;
		};
		if !self.edge_set.insert((source, target)) {
			return false;
		}
		self.edges.push(Edge { source, target });
		true
	}

	pub fn has_node(&self, id: &str) -> bool {
		self.index_by_id.contains_key(id)
	}

	pub fn has_edge(&self, source: &str, target: &str) -> bool {
		match (self.node_idx(source), self.node_idx(target)) {
			(Some(s), Some(t)) => self.edge_set.contains(&(s, t)),
			_ => false,
		}
	}

	pub fn node_idx(&self, id: &str) -> Option<NodeIdx> {
		self.index_by_id.get(id).copied()
	}

	pub fn node(&self, idx: NodeIdx) -> Option<&Node> {
		self.nodes.get(idx.0)
	}

	#[cfg(test)]
	pub fn node_by_id(&self, id: &str) -> Option<&Node> {
		self.node_idx(id).and_then(|idx| self.node(idx))
	}

	pub fn nodes(&self) -> impl Iterator<Item = (NodeIdx, &Node)> {
		self.nodes.iter().enumerate().map(|(i, n)| (NodeIdx(i), n))
	}

	pub fn edges(&self) -> impl Iterator<Item = (&Node, &Node)> {
		self.edges
			.iter()
			.map(|e| (&self.nodes[e.source.0], &self.nodes[e.target.0]))
	}

	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	pub fn edge_count(&self) -> usize {
		self.edges.len()
	}

	/// Shift a node by a graph-space delta.
	pub fn translate_node(&mut self, idx: NodeIdx, dx: f64, dy: f64) -> bool {
		match self.nodes.get_mut(idx.0) {
			Some(node) => {
				node.x += dx;
				node.y += dy;
				true
			}
			None => false,
		}
	}

	/// Rewrite every node's hidden flag from `is_hidden`, visiting each node
	/// exactly once in store order.
	pub fn rewrite_hidden(&mut self, mut is_hidden: impl FnMut(&Node) -> bool) {
		for node in &mut self.nodes {
			node.hidden = is_hidden(node);
		}
	}

	/// `(min_x, min_y, max_x, max_y)` over all node centres.
	pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
		self.nodes.iter().fold(None, |acc, n| {
			Some(match acc {
				None => (n.x, n.y, n.x, n.y),
				Some((x0, y0, x1, y1)) => (x0.min(n.x), y0.min(n.y), x1.max(n.x), y1.max(n.y)),
			})
		})
	}
}
