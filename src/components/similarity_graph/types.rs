use serde::Deserialize;
use serde_json::Value;

/// Raw dataset document as published next to the app.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Dataset {
	/// Node records in their on-disk shape.
	pub nodes: Vec<RawNode>,
	/// `[source, target]` key pairs; see [`Dataset::edge_pairs`].
	pub edges: Vec<Value>,
	/// Cluster definitions, used for colouring and the initial selection.
	pub clusters: Vec<ClusterDef>,
	/// Tag definitions, used for the initial selection.
	pub tags: Vec<TagDef>,
}

impl Dataset {
	/// Parse a dataset document.
	pub fn from_json(source: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(source)
	}

	/// Edge endpoints of every well-formed `[source, target]` entry.
	/// Anything else in the list is skipped.
	pub fn edge_pairs(&self) -> impl Iterator<Item = (String, String)> + '_ {
		self.edges.iter().filter_map(|edge| match edge.as_array()?.as_slice() {
			[source, target] => Some((scalar_key(source)?, scalar_key(target)?)),
			_ => None,
		})
	}
}

/// Cluster definition.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ClusterDef {
	/// Cluster key referenced by nodes.
	pub key: String,
	/// CSS colour for member nodes.
	pub color: Option<String>,
}

/// Tag definition.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct TagDef {
	/// Tag key referenced by nodes.
	pub key: String,
}

/// A node as it appears in the dataset.
///
/// Every field is kept as untyped JSON because datasets mix several
/// generations of the format: `clustersList` next to a legacy `cluster`
/// key, `tags` arrays next to a `tag` field that may be a string or an
/// array, numeric keys, quoted coordinates. The accessors below read them
/// and return `None` or an empty list for shapes they don't understand.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawNode {
	/// Unique node key.
	pub key: Value,
	/// Display label.
	pub label: Value,
	/// Graph-space x.
	pub x: Value,
	/// Graph-space y.
	pub y: Value,
	/// Relevance score, drives node size.
	pub score: Value,
	/// Legacy single cluster key.
	pub cluster: Value,
	/// Cluster key list.
	#[serde(rename = "clustersList")]
	pub clusters_list: Value,
	/// Tag key list.
	pub tags: Value,
	/// Single tag: a string, or a list in some exports.
	pub tag: Value,
}

impl RawNode {
	/// Node key, with numbers stringified. Empty keys count as missing.
	pub fn key(&self) -> Option<String> {
		scalar_key(&self.key).filter(|k| !k.is_empty())
	}

	pub fn label(&self) -> Option<String> {
		self.label.as_str().map(str::to_string)
	}

	/// Graph-space position, when both coordinates are finite numbers.
	pub fn position(&self) -> Option<(f64, f64)> {
		Some((finite(&self.x)?, finite(&self.y)?))
	}
	/// Canonical cluster keys: the list when it is non-empty, otherwise the
	/// legacy single key.
	pub fn cluster_keys(&self) -> Vec<String> {
		match non_empty_keys(&self.clusters_list) {
			Some(keys) => keys,
			None => scalar_key(&self.cluster).into_iter().collect(),
		}
	}

	/// Canonical tag keys: the `tags` list when non-empty, else `tag` as a
	/// list, else `tag` as a plain non-empty string.
	pub fn tag_keys(&self) -> Vec<String> {
		if let Some(keys) = non_empty_keys(&self.tags) {
			return keys;
		}
		match &self.tag {
			Value::Array(items) => items.iter().filter_map(scalar_key).collect(),
			Value::String(tag) if !tag.is_empty() => vec![tag.clone()],
			_ => Vec::new(),
		}
	}

	/// Score, with anything non-numeric read as zero.
	pub fn score(&self) -> f64 {
		finite(&self.score).unwrap_or(0.0)
	}
}

fn finite(value: &Value) -> Option<f64> {
	value.as_f64().filter(|v| v.is_finite())
}

fn non_empty_keys(value: &Value) -> Option<Vec<String>> {
	match value {
		Value::Array(items) if !items.is_empty() => {
			Some(items.iter().filter_map(scalar_key).collect())
		}
		_ => None,
	}
}

fn scalar_key(value: &Value) -> Option<String> {
	match value {
		Value::String(s) => Some(s.clone()),
		Value::Number(n) => Some(n.to_string()),
		_ => None,
	}
}
