use web_sys::Element;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasSize {
	pub width: f64,
	pub height: f64,
}

/// Canvas size for a container: its width, and its height floored at
/// `min_height`. A collapsed container borrows the window height instead.
pub fn measure(
	client_width: f64,
	client_height: f64,
	window_height: f64,
	min_height: f64,
) -> CanvasSize {
	let height = if client_height > 0.0 {
		client_height
	} else {
		window_height
	};
	CanvasSize {
		width: client_width.max(0.0),
		height: height.max(min_height),
	}
}

/// Reports the current size the canvas should take.
pub trait SizeObserver {
	fn size(&self) -> CanvasSize;
}

/// Reads a DOM container and the window.
pub struct ContainerSize {
	pub container: Element,
	pub min_height: f64,
}

impl SizeObserver for ContainerSize {
	fn size(&self) -> CanvasSize {
		let window_height = web_sys::window()
			.and_then(|w| w.inner_height().ok())
			.and_then(|h| h.as_f64())
			.unwrap_or(0.0);
		measure(
			self.container.client_width() as f64,
			self.container.client_height() as f64,
			window_height,
			self.min_height,
		)
	}
}
