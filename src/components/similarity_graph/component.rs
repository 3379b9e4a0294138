use std::cell::RefCell;
use std::rc::{Rc, Weak};

use leptos::prelude::*;
use send_wrapper::SendWrapper;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

use super::camera::Point;
use super::counts::GraphCounts;
use super::filter::FilterState;
use super::frame::{AnimationLoop, next_frame};
use super::listener::EventListener;
use super::render;
use super::settings::GraphSettings;
use super::state::GraphViewState;
use super::types::Dataset;

type SharedState = Rc<RefCell<Option<GraphViewState>>>;

/// Canvas view of a similarity graph.
///
/// `filters` changes re-run the visibility pass synchronously; when
/// `counts` is given it receives fresh [`GraphCounts`] one frame later.
#[component]
pub fn SimilarityGraphCanvas(
	#[prop(into)] dataset: Signal<Dataset>,
	#[prop(into)] filters: Signal<FilterState>,
	#[prop(optional)] counts: Option<WriteSignal<GraphCounts>>,
	#[prop(optional)] settings: GraphSettings,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: SharedState = Rc::new(RefCell::new(None));
	let session: Rc<RefCell<Option<PointerSession>>> = Rc::new(RefCell::new(None));
	let (state_init, session_init) = (state.clone(), session.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let dataset = dataset.get();
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			log::error!("No window available, graph not mounted");
			return;
		};

		let (w, h) = canvas_size(&window, &canvas, fullscreen, width, height);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(ctx) = context_2d(&canvas) else {
			log::error!("Canvas 2d context unavailable");
			return;
		};

		// Tear down listeners bound to the previous graph before replacing it.
		session_init.borrow_mut().take();
		let mut view = GraphViewState::new(&dataset, &settings, w, h);
		view.apply_filters(&filters.get_untracked());
		*state_init.borrow_mut() = Some(view);

		*session_init.borrow_mut() = Some(PointerSession::attach(
			&window,
			&canvas,
			ctx,
			Rc::downgrade(&state_init),
			fullscreen,
		));
		publish_counts(&state_init, counts);
	});

	let state_filters = state.clone();
	Effect::new(move |_| {
		let filters = filters.get();
		let applied = state_filters
			.borrow_mut()
			.as_mut()
			.map(|s| s.apply_filters(&filters))
			.is_some();
		if applied {
			publish_counts(&state_filters, counts);
		}
	});

	let session_cleanup = SendWrapper::new(session);
	on_cleanup(move || {
		session_cleanup.borrow_mut().take();
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="similarity-graph-canvas"
			style="display: block; cursor: grab;"
		/>
	}
}

/// Listeners and render loop bound to one mounted graph. Dropping it
/// detaches every listener, ends any drag and stops rendering.
struct PointerSession {
	state: Weak<RefCell<Option<GraphViewState>>>,
	_listeners: Vec<EventListener>,
	_animation: AnimationLoop,
}

impl PointerSession {
	fn attach(
		window: &Window,
		canvas: &HtmlCanvasElement,
		ctx: CanvasRenderingContext2d,
		state: Weak<RefCell<Option<GraphViewState>>>,
		fullscreen: bool,
	) -> Self {
		let mut listeners = Vec::with_capacity(5);

		let (state_md, canvas_md) = (state.clone(), canvas.clone());
		listeners.push(EventListener::mouse(canvas, "mousedown", move |ev| {
			with_state(&state_md, |s| s.pointer_down(pointer_in(&canvas_md, ev)));
		}));

		let (state_mm, canvas_mm) = (state.clone(), canvas.clone());
		listeners.push(EventListener::mouse(canvas, "mousemove", move |ev| {
			with_state(&state_mm, |s| s.pointer_move(pointer_in(&canvas_mm, ev)));
		}));

		let (state_wh, canvas_wh) = (state.clone(), canvas.clone());
		listeners.push(EventListener::wheel(canvas, "wheel", move |ev| {
			ev.prevent_default();
			let pointer = pointer_in(&canvas_wh, ev);
			with_state(&state_wh, |s| s.wheel(pointer, ev.delta_y()));
		}));

		// Released on the window so a drag ending off-canvas still ends.
		let state_mu = state.clone();
		listeners.push(EventListener::mouse(window, "mouseup", move |_| {
			with_state(&state_mu, GraphViewState::pointer_up);
		}));

		if fullscreen {
			let (state_rs, canvas_rs) = (state.clone(), canvas.clone());
			listeners.push(EventListener::new(window, "resize", move |_| {
				let Some(win) = web_sys::window() else {
					return;
				};
				let (nw, nh) = window_size(&win);
				canvas_rs.set_width(nw as u32);
				canvas_rs.set_height(nh as u32);
				with_state(&state_rs, |s| s.resize(nw, nh));
			}));
		}

		let state_anim = state.clone();
		let animation = AnimationLoop::start(window, move || {
			if let Some(state) = state_anim.upgrade() {
				if let Some(s) = state.borrow().as_ref() {
					render::render(s, &ctx);
				}
			}
		});

		Self {
			state,
			_listeners: listeners,
			_animation: animation,
		}
	}
}

impl Drop for PointerSession {
	fn drop(&mut self) {
		with_state(&self.state, GraphViewState::release);
	}
}

fn with_state(state: &Weak<RefCell<Option<GraphViewState>>>, f: impl FnOnce(&mut GraphViewState)) {
	let Some(state) = state.upgrade() else {
		return;
	};
	let Ok(mut guard) = state.try_borrow_mut() else {
		return;
	};
	if let Some(s) = guard.as_mut() {
		f(s);
	}
}

fn publish_counts(state: &SharedState, counts: Option<WriteSignal<GraphCounts>>) {
	let Some(counts) = counts else {
		return;
	};
	// Read after the frame so every hidden flag of this pass is settled.
	let state = Rc::downgrade(state);
	next_frame(move || {
		let Some(state) = state.upgrade() else {
			return;
		};
		if let Some(s) = state.borrow().as_ref() {
			counts.set(s.counts());
		}
	});
}

fn pointer_in(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> Point {
	let rect = canvas.get_bounding_client_rect();
	Point::new(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok().flatten()?.dyn_into().ok()
}

fn window_size(window: &Window) -> (f64, f64) {
	(
		window
			.inner_width()
			.ok()
			.and_then(|v| v.as_f64())
			.unwrap_or(800.0),
		window
			.inner_height()
			.ok()
			.and_then(|v| v.as_f64())
			.unwrap_or(600.0),
	)
}

fn canvas_size(
	window: &Window,
	canvas: &HtmlCanvasElement,
	fullscreen: bool,
	width: Option<f64>,
	height: Option<f64>,
) -> (f64, f64) {
	if fullscreen {
		return window_size(window);
	}
	(
		width.unwrap_or_else(|| {
			canvas
				.parent_element()
				.map(|p| p.client_width() as f64)
				.unwrap_or(800.0)
		}),
		height.unwrap_or_else(|| {
			canvas
				.parent_element()
				.map(|p| p.client_height() as f64)
				.unwrap_or(600.0)
		}),
	)
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
	use wasm_bindgen_test::*;
	use web_sys::MouseEventInit;

	use super::*;
	use crate::components::similarity_graph::camera::Viewport;

	wasm_bindgen_test_configure!(run_in_browser);

	struct Mounted {
		window: Window,
		canvas: HtmlCanvasElement,
		state: SharedState,
		session: Option<PointerSession>,
	}

	impl Mounted {
		/// Node "A" sits at canvas (40, 40): the two nodes span 200 units and
		/// fit a 280 px canvas with 40 px padding at scale 1.
		fn new() -> Self {
			let window = web_sys::window().unwrap();
			let document = window.document().unwrap();
			let canvas: HtmlCanvasElement = document
				.create_element("canvas")
				.unwrap()
				.dyn_into()
				.unwrap();
			canvas.set_width(280);
			canvas.set_height(280);
			document.body().unwrap().append_child(&canvas).unwrap();

			let dataset = Dataset::from_json(
				r#"{
					"nodes": [
						{"key": "A", "cluster": "c1", "tag": "t1", "x": -100, "y": -100},
						{"key": "B", "cluster": "c1", "tag": "t1", "x": 100, "y": 100}
					],
					"clusters": [{"key": "c1"}],
					"tags": [{"key": "t1"}]
				}"#,
			)
			.unwrap();
			let mut view = GraphViewState::new(&dataset, &GraphSettings::default(), 280.0, 280.0);
			view.apply_filters(&FilterState::select_all(&dataset));
			let state: SharedState = Rc::new(RefCell::new(Some(view)));

			let ctx = context_2d(&canvas).unwrap();
			let session = PointerSession::attach(&window, &canvas, ctx, Rc::downgrade(&state), false);
			Self {
				window,
				canvas,
				state,
				session: Some(session),
			}
		}

		fn mouse(&self, target: &web_sys::EventTarget, kind: &str, x: f64, y: f64) {
			let rect = self.canvas.get_bounding_client_rect();
			let init = MouseEventInit::new();
			init.set_bubbles(true);
			init.set_client_x((rect.left() + x) as i32);
			init.set_client_y((rect.top() + y) as i32);
			let event = MouseEvent::new_with_mouse_event_init_dict(kind, &init).unwrap();
			target.dispatch_event(&event).unwrap();
		}

		fn on_canvas(&self, kind: &str, x: f64, y: f64) {
			self.mouse(&self.canvas, kind, x, y);
		}

		fn on_window(&self, kind: &str) {
			self.mouse(&self.window, kind, 0.0, 0.0);
		}

		fn node_a(&self) -> (f64, f64) {
			let state = self.state.borrow();
			let node = state.as_ref().unwrap().store.node_by_id("A").unwrap();
			(node.x, node.y)
		}

		fn dragging(&self) -> bool {
			self.state.borrow().as_ref().unwrap().drag.is_dragging()
		}

		fn camera_enabled(&self) -> bool {
			self.state.borrow().as_ref().unwrap().camera.is_enabled()
		}
	}

	impl Drop for Mounted {
		fn drop(&mut self) {
			self.session.take();
			self.canvas.remove();
		}
	}

	#[wasm_bindgen_test]
	fn canvas_drag_moves_node() {
		let mounted = Mounted::new();
		mounted.on_canvas("mousedown", 40.0, 40.0);
		assert!(mounted.dragging());
		assert!(!mounted.camera_enabled());

		mounted.on_canvas("mousemove", 70.0, 50.0);
		assert_eq!(mounted.node_a(), (-70.0, -90.0));
	}

	#[wasm_bindgen_test]
	fn window_mouseup_ends_drag() {
		let mounted = Mounted::new();
		mounted.on_canvas("mousedown", 40.0, 40.0);
		assert!(mounted.dragging());

		mounted.on_window("mouseup");
		assert!(!mounted.dragging());
		assert!(mounted.camera_enabled());

		mounted.on_canvas("mousemove", 90.0, 90.0);
		assert_eq!(mounted.node_a(), (-100.0, -100.0));
	}

	#[wasm_bindgen_test]
	fn dropping_session_mid_drag_detaches_and_releases() {
		let mut mounted = Mounted::new();
		mounted.on_canvas("mousedown", 40.0, 40.0);
		assert!(!mounted.camera_enabled());

		mounted.session.take();
		assert!(!mounted.dragging());
		assert!(mounted.camera_enabled());

		mounted.on_canvas("mousemove", 90.0, 90.0);
		mounted.on_window("mouseup");
		assert_eq!(mounted.node_a(), (-100.0, -100.0));

		mounted.on_canvas("mousedown", 40.0, 40.0);
		assert!(!mounted.dragging());
		assert!(mounted.camera_enabled());
	}
}
