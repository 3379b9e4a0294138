/// Tunables for the graph view.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphSettings {
	/// Pointer-down hit radius, in graph-space units.
	pub hit_threshold: f64,
	/// Smallest node radius, in graph-space units.
	pub min_node_size: f64,
	/// Largest node radius, in graph-space units.
	pub max_node_size: f64,
	/// Lower bound for the score range denominator.
	pub size_epsilon: f64,
	/// Minimum camera scale.
	pub min_zoom: f64,
	/// Maximum camera scale.
	pub max_zoom: f64,
	/// Scale factor per wheel notch.
	pub zoom_step: f64,
	/// Screen padding kept around the graph when fitting it to the canvas.
	pub fit_padding: f64,
}

impl Default for GraphSettings {
	fn default() -> Self {
		Self {
			hit_threshold: 10.0,
			min_node_size: 1.0,
			max_node_size: 10.0,
			size_epsilon: 0.001,
			min_zoom: 0.1,
			max_zoom: 10.0,
			zoom_step: 1.1,
			fit_padding: 40.0,
		}
	}
}
