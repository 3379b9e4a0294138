use super::settings::GraphSettings;

/// A 2D point, in device pixels or graph units depending on context.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	pub fn distance(self, other: Point) -> f64 {
		let (dx, dy) = (self.x - other.x, self.y - other.y);
		(dx * dx + dy * dy).sqrt()
	}
}

/// What the drag controller needs from the renderer's camera.
pub trait Viewport {
	/// Project a device-space point into graph space.
	fn viewport_to_graph(&self, point: Point) -> Point;
	/// Turn camera pan/zoom gesture handling on or off.
	fn set_enabled(&mut self, enabled: bool);
	fn is_enabled(&self) -> bool;
}

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Copy, Debug)]
struct PanAnchor {
	start: Point,
	transform_start_x: f64,
	transform_start_y: f64,
}

/// Translate+scale camera: `device = graph * k + (x, y)`.
#[derive(Clone, Debug)]
pub struct Camera {
	pub transform: ViewTransform,
	enabled: bool,
	pan: Option<PanAnchor>,
	min_zoom: f64,
	max_zoom: f64,
	zoom_step: f64,
}

impl Camera {
	pub fn new(transform: ViewTransform, settings: &GraphSettings) -> Self {
		Self {
			transform,
			enabled: true,
			pan: None,
			min_zoom: settings.min_zoom,
			max_zoom: settings.max_zoom,
			zoom_step: settings.zoom_step,
		}
	}

	/// Camera centred on `bounds` with the whole box visible inside a
	/// `width` x `height` canvas.
	pub fn fit(
		bounds: Option<(f64, f64, f64, f64)>,
		width: f64,
		height: f64,
		settings: &GraphSettings,
	) -> Self {
		let mut camera = Self::new(
			ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			settings,
		);
		if let Some((x0, y0, x1, y1)) = bounds {
			let padding = settings.fit_padding;
			let (span_x, span_y) = ((x1 - x0).max(1.0), (y1 - y0).max(1.0));
			let k = ((width - 2.0 * padding).max(1.0) / span_x)
				.min((height - 2.0 * padding).max(1.0) / span_y)
				.clamp(camera.min_zoom, camera.max_zoom);
			let (cx, cy) = ((x0 + x1) / 2.0, (y0 + y1) / 2.0);
			camera.transform = ViewTransform {
				x: width / 2.0 - cx * k,
				y: height / 2.0 - cy * k,
				k,
			};
		}
		camera
	}

	pub fn graph_to_viewport(&self, point: Point) -> Point {
		Point::new(
			point.x * self.transform.k + self.transform.x,
			point.y * self.transform.k + self.transform.y,
		)
	}

	/// Start a background pan. Ignored while gestures are disabled.
	pub fn begin_pan(&mut self, pointer: Point) -> bool {
		if !self.enabled {
			return false;
		}
		self.pan = Some(PanAnchor {
			start: pointer,
			transform_start_x: self.transform.x,
			transform_start_y: self.transform.y,
		});
		true
	}

	pub fn pan_to(&mut self, pointer: Point) {
		if !self.enabled {
			return;
		}
		if let Some(anchor) = self.pan {
			self.transform.x = anchor.transform_start_x + (pointer.x - anchor.start.x);
			self.transform.y = anchor.transform_start_y + (pointer.y - anchor.start.y);
		}
	}

	pub fn end_pan(&mut self) {
		self.pan = None;
	}

	pub fn is_panning(&self) -> bool {
		self.pan.is_some()
	}

	/// Zoom one wheel step around `pointer`, keeping the graph point under it
	/// fixed. `zoom_in` picks the direction.
	pub fn zoom_at(&mut self, pointer: Point, zoom_in: bool) {
		if !self.enabled {
			return;
		}
		let factor = if zoom_in {
			self.zoom_step
		} else {
			1.0 / self.zoom_step
		};
		let new_k = (self.transform.k * factor).clamp(self.min_zoom, self.max_zoom);
		let ratio = new_k / self.transform.k;
		self.transform.x = pointer.x - (pointer.x - self.transform.x) * ratio;
		self.transform.y = pointer.y - (pointer.y - self.transform.y) * ratio;
		self.transform.k = new_k;
	}
}

impl Viewport for Camera {
	fn viewport_to_graph(&self, point: Point) -> Point {
		Point::new(
			(point.x - self.transform.x) / self.transform.k,
			(point.y - self.transform.y) / self.transform.k,
		)
	}

	fn set_enabled(&mut self, enabled: bool) {
		self.enabled = enabled;
		if !enabled {
			self.pan = None;
		}
	}

	fn is_enabled(&self) -> bool {
		self.enabled
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn camera(x: f64, y: f64, k: f64) -> Camera {
		Camera::new(ViewTransform { x, y, k }, &GraphSettings::default())
	}

	#[test]
	fn projections_are_inverse() {
		let cam = camera(100.0, 50.0, 2.0);
		let graph = cam.viewport_to_graph(Point::new(120.0, 70.0));
		assert_eq!(graph, Point::new(10.0, 10.0));
		assert_eq!(cam.graph_to_viewport(graph), Point::new(120.0, 70.0));
	}

	#[test]
	fn pan_follows_pointer() {
		let mut cam = camera(0.0, 0.0, 1.0);
		assert!(cam.begin_pan(Point::new(10.0, 10.0)));
		cam.pan_to(Point::new(25.0, 5.0));
		assert_eq!((cam.transform.x, cam.transform.y), (15.0, -5.0));
		cam.end_pan();
		cam.pan_to(Point::new(100.0, 100.0));
		assert_eq!((cam.transform.x, cam.transform.y), (15.0, -5.0));
	}

	#[test]
	fn disabled_camera_ignores_gestures() {
		let mut cam = camera(0.0, 0.0, 1.0);
		cam.set_enabled(false);
		assert!(!cam.begin_pan(Point::new(0.0, 0.0)));
		cam.pan_to(Point::new(40.0, 40.0));
		cam.zoom_at(Point::new(0.0, 0.0), true);
		assert_eq!((cam.transform.x, cam.transform.y, cam.transform.k), (0.0, 0.0, 1.0));

		cam.set_enabled(true);
		assert!(cam.begin_pan(Point::new(0.0, 0.0)));
	}

	#[test]
	fn disabling_cancels_a_pan_in_progress() {
		let mut cam = camera(0.0, 0.0, 1.0);
		cam.begin_pan(Point::new(0.0, 0.0));
		cam.set_enabled(false);
		assert!(!cam.is_panning());
	}

	#[test]
	fn zoom_keeps_point_under_pointer() {
		let mut cam = camera(30.0, 40.0, 1.0);
		let pointer = Point::new(200.0, 120.0);
		let before = cam.viewport_to_graph(pointer);
		cam.zoom_at(pointer, true);
		let after = cam.viewport_to_graph(pointer);
		assert!(before.distance(after) < 1e-9);
		assert!(cam.transform.k > 1.0);
	}

	#[test]
	fn zoom_is_clamped() {
		let mut cam = camera(0.0, 0.0, 10.0);
		cam.zoom_at(Point::new(0.0, 0.0), true);
		assert_eq!(cam.transform.k, 10.0);
	}

	#[test]
	fn fit_centres_bounds() {
		let cam = Camera::fit(
			Some((-100.0, -50.0, 100.0, 50.0)),
			480.0,
			280.0,
			&GraphSettings::default(),
		);
		assert_eq!(cam.transform.k, 2.0);
		assert_eq!(cam.graph_to_viewport(Point::new(0.0, 0.0)), Point::new(240.0, 140.0));
	}
}
