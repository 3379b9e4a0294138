use super::camera::{Point, Viewport};
use super::store::{GraphStore, NodeIdx};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum DragState {
	#[default]
	Idle,
	Dragging {
		node: NodeIdx,
		/// Device-space pointer position of the last processed event.
		last_pointer: Point,
	},
}

/// Pointer gesture state machine for moving nodes.
///
/// While a drag is active the viewport's own gestures are disabled, so a
/// single pointer-down is either a node drag or a camera pan, never both.
#[derive(Clone, Debug)]
pub struct DragController {
	state: DragState,
	hit_threshold: f64,
}

impl DragController {
	pub fn new(hit_threshold: f64) -> Self {
		Self {
			state: DragState::Idle,
			hit_threshold,
		}
	}

	pub fn is_dragging(&self) -> bool {
		matches!(self.state, DragState::Dragging { .. })
	}

	pub fn active_node(&self) -> Option<NodeIdx> {
		match self.state {
			DragState::Dragging { node, .. } => Some(node),
			DragState::Idle => None,
		}
	}

	/// Try to grab a node under `pointer`. On a hit the viewport is disabled
	/// and the grabbed node returned; on a miss nothing changes.
	pub fn pointer_down<V: Viewport>(
		&mut self,
		store: &GraphStore,
		viewport: &mut V,
		pointer: Point,
	) -> Option<NodeIdx> {
		if self.is_dragging() {
			self.release(viewport);
		}
		let graph_point = viewport.viewport_to_graph(pointer);
		let node = node_at(store, graph_point, self.hit_threshold)?;
		self.state = DragState::Dragging {
			node,
			last_pointer: pointer,
		};
		viewport.set_enabled(false);
		if let Some(n) = store.node(node) {
			log::debug!("Drag start: {}", n.id);
		}
		Some(node)
	}

	/// Move the grabbed node by the graph-space delta since the last event.
	pub fn pointer_move<V: Viewport>(
		&mut self,
		store: &mut GraphStore,
		viewport: &V,
		pointer: Point,
	) -> bool {
		let DragState::Dragging { node, last_pointer } = self.state else {
			return false;
		};
		let from = viewport.viewport_to_graph(last_pointer);
		let to = viewport.viewport_to_graph(pointer);
		store.translate_node(node, to.x - from.x, to.y - from.y);
		self.state = DragState::Dragging {
			node,
			last_pointer: pointer,
		};
		true
	}

	/// End the drag, if any, and hand gestures back to the viewport.
	pub fn pointer_up<V: Viewport>(&mut self, viewport: &mut V) -> bool {
		if !self.is_dragging() {
			return false;
		}
		self.release(viewport);
		true
	}

	/// Unconditionally return to idle with the viewport enabled. Used on
	/// teardown where a drag may still be in progress.
	pub fn release<V: Viewport>(&mut self, viewport: &mut V) {
		if self.is_dragging() {
			log::debug!("Drag end");
		}
		self.state = DragState::Idle;
		viewport.set_enabled(true);
	}
}

/// Closest node whose centre lies strictly within `threshold` graph units of
/// `point`. Ties go to the earliest node in store order.
pub fn node_at(store: &GraphStore, point: Point, threshold: f64) -> Option<NodeIdx> {
	store
		.nodes()
		.map(|(idx, node)| (idx, Point::new(node.x, node.y).distance(point)))
		.filter(|&(_, distance)| distance < threshold)
		.min_by(|a, b| a.1.total_cmp(&b.1))
		.map(|(idx, _)| idx)
}
