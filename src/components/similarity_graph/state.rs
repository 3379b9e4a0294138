use super::camera::{Camera, Point};
use super::counts::GraphCounts;
use super::drag::DragController;
use super::filter::{self, FilterState};
use super::settings::GraphSettings;
use super::store::GraphStore;
use super::types::Dataset;

/// Everything the canvas needs between events: the store, the camera and
/// the drag controller that coordinates between them.
pub struct GraphViewState {
	pub store: GraphStore,
	pub camera: Camera,
	pub drag: DragController,
	pub width: f64,
	pub height: f64,
}

impl GraphViewState {
	pub fn new(dataset: &Dataset, settings: &GraphSettings, width: f64, height: f64) -> Self {
		let store = GraphStore::from_dataset(dataset, settings);
		let camera = Camera::fit(store.bounds(), width, height, settings);
		Self {
			store,
			camera,
			drag: DragController::new(settings.hit_threshold),
			width,
			height,
		}
	}

	pub fn apply_filters(&mut self, filters: &FilterState) -> usize {
		filter::recompute_visibility(&mut self.store, filters)
	}

	pub fn counts(&self) -> GraphCounts {
		GraphCounts::collect(&self.store)
	}

	/// A press either grabs a node or starts a camera pan.
	pub fn pointer_down(&mut self, pointer: Point) {
		if self
			.drag
			.pointer_down(&self.store, &mut self.camera, pointer)
			.is_none()
		{
			self.camera.begin_pan(pointer);
		}
	}

	pub fn pointer_move(&mut self, pointer: Point) {
		if self.drag.pointer_move(&mut self.store, &self.camera, pointer) {
			return;
		}
		if self.camera.is_panning() {
			self.camera.pan_to(pointer);
		}
	}

	pub fn pointer_up(&mut self) {
		self.drag.pointer_up(&mut self.camera);
		self.camera.end_pan();
	}

	pub fn wheel(&mut self, pointer: Point, delta_y: f64) {
		self.camera.zoom_at(pointer, delta_y < 0.0);
	}

	/// Teardown: drop any drag in progress and leave the camera usable.
	pub fn release(&mut self) {
		self.drag.release(&mut self.camera);
		self.camera.end_pan();
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}
