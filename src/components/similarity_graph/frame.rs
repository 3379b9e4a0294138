use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::Window;

/// Run `f` once on the next animation frame.
pub fn next_frame(f: impl FnOnce() + 'static) {
	let Some(window) = web_sys::window() else {
		return;
	};
	let callback = Closure::once_into_js(f);
	if let Err(err) = window.request_animation_frame(callback.unchecked_ref()) {
		log::warn!("requestAnimationFrame failed: {err:?}");
	}
}

/// A `requestAnimationFrame` loop that runs until dropped.
pub struct AnimationLoop {
	window: Window,
	handle: Rc<Cell<Option<i32>>>,
	_frame: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
}

impl AnimationLoop {
	pub fn start(window: &Window, mut on_frame: impl FnMut() + 'static) -> Self {
		let frame: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
		let handle = Rc::new(Cell::new(None));
		let (frame_weak, handle_inner, window_inner) =
			(Rc::downgrade(&frame), handle.clone(), window.clone());

		*frame.borrow_mut() = Some(Closure::new(move || {
			on_frame();
			let Some(cell) = frame_weak.upgrade() else {
				return;
			};
			let callback = cell.borrow();
			if let Some(cb) = callback.as_ref() {
				handle_inner.set(
					window_inner
						.request_animation_frame(cb.as_ref().unchecked_ref())
						.ok(),
				);
			}
		}));

		if let Some(cb) = frame.borrow().as_ref() {
			handle.set(window.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
		}

		Self {
			window: window.clone(),
			handle,
			_frame: frame,
		}
	}
}

impl Drop for AnimationLoop {
	fn drop(&mut self) {
		if let Some(id) = self.handle.take() {
			let _ = self.window.cancel_animation_frame(id);
		}
	}
}
