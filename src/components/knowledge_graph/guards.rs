//! Browser registrations that undo themselves on drop.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{Element, ResizeObserver};

pub struct WindowListener {
	event: &'static str,
	callback: Closure<dyn FnMut()>,
}

impl WindowListener {
	pub fn new(event: &'static str, handler: impl FnMut() + 'static) -> Self {
		let callback = Closure::<dyn FnMut()>::new(handler);
		if let Some(window) = web_sys::window() {
			let _ = window
				.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref());
		}
		Self { event, callback }
	}
}

impl Drop for WindowListener {
	fn drop(&mut self) {
		if let Some(window) = web_sys::window() {
			let _ = window.remove_event_listener_with_callback(
				self.event,
				self.callback.as_ref().unchecked_ref(),
			);
		}
	}
}

pub struct ResizeGuard {
	observer: Option<ResizeObserver>,
	_callback: Closure<dyn FnMut()>,
}

impl ResizeGuard {
	pub fn observe(target: &Element, handler: impl FnMut() + 'static) -> Self {
		let callback = Closure::<dyn FnMut()>::new(handler);
		let observer = match ResizeObserver::new(callback.as_ref().unchecked_ref()) {
			Ok(observer) => {
				observer.observe(target);
				Some(observer)
			}
			Err(e) => {
				warn!("ResizeObserver unavailable: {:?}", e);
				None
			}
		};
		Self {
			observer,
			_callback: callback,
		}
	}
}

impl Drop for ResizeGuard {
	fn drop(&mut self) {
		if let Some(observer) = &self.observer {
			observer.disconnect();
		}
	}
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// `requestAnimationFrame` loop that runs until dropped.
pub struct AnimationLoop {
	frame: Rc<Cell<Option<i32>>>,
	callback: FrameCallback,
}

impl AnimationLoop {
	pub fn start(mut on_frame: impl FnMut() + 'static) -> Self {
		let frame = Rc::new(Cell::new(None));
		let callback: FrameCallback = Rc::new(RefCell::new(None));
		let (frame_inner, callback_inner) = (frame.clone(), callback.clone());

		*callback.borrow_mut() = Some(Closure::new(move || {
			on_frame();
			frame_inner.set(request_frame(&callback_inner));
		}));
		frame.set(request_frame(&callback));

		Self { frame, callback }
	}
}

fn request_frame(callback: &FrameCallback) -> Option<i32> {
	let window = web_sys::window()?;
	let callback = callback.borrow();
	window
		.request_animation_frame(callback.as_ref()?.as_ref().unchecked_ref())
		.ok()
}

impl Drop for AnimationLoop {
	fn drop(&mut self) {
		if let (Some(id), Some(window)) = (self.frame.take(), web_sys::window()) {
			let _ = window.cancel_animation_frame(id);
		}
		// Breaks the closure's reference to itself.
		self.callback.borrow_mut().take();
	}
}
