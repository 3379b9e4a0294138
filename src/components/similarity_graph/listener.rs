use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget, MouseEvent, WheelEvent};

/// A DOM event listener that stays attached for as long as the guard lives.
pub struct EventListener {
	target: EventTarget,
	event_type: &'static str,
	callback: Closure<dyn FnMut(Event)>,
}

impl EventListener {
	pub fn new(
		target: &EventTarget,
		event_type: &'static str,
		callback: impl FnMut(Event) + 'static,
	) -> Self {
		let callback = Closure::<dyn FnMut(Event)>::new(callback);
		if let Err(err) =
			target.add_event_listener_with_callback(event_type, callback.as_ref().unchecked_ref())
		{
			log::error!("Failed to attach {event_type} listener: {err:?}");
		}
		Self {
			target: target.clone(),
			event_type,
			callback,
		}
	}

	pub fn mouse(
		target: &EventTarget,
		event_type: &'static str,
		mut callback: impl FnMut(&MouseEvent) + 'static,
	) -> Self {
		Self::new(target, event_type, move |event: Event| {
			if let Some(ev) = event.dyn_ref::<MouseEvent>() {
				callback(ev);
			}
		})
	}

	pub fn wheel(
		target: &EventTarget,
		event_type: &'static str,
		mut callback: impl FnMut(&WheelEvent) + 'static,
	) -> Self {
		Self::new(target, event_type, move |event: Event| {
			if let Some(ev) = event.dyn_ref::<WheelEvent>() {
				callback(ev);
			}
		})
	}
}

impl Drop for EventListener {
	fn drop(&mut self) {
		let _ = self.target.remove_event_listener_with_callback(
			self.event_type,
			self.callback.as_ref().unchecked_ref(),
		);
	}
}
