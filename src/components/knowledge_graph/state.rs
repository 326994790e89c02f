use super::geometry::Point;
use super::layout::Simulation;
use super::types::{GraphData, Node};
use super::viewport::CanvasSize;
use crate::config::GraphConfig;

/// Screen pixels a press may wander before it counts as a drag.
const CLICK_SLOP: f64 = 3.0;

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub moved: bool,
	pub node: Option<usize>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start: Point,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

pub struct GraphViewState<S> {
	pub data: GraphData,
	pub layout: S,
	pub config: GraphConfig,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub width: f64,
	pub height: f64,
}

impl<S: Simulation> GraphViewState<S> {
	pub fn new(data: GraphData, layout: S, size: CanvasSize, config: GraphConfig) -> Self {
		Self {
			data,
			layout,
			config,
			transform: ViewTransform {
				x: 0.0,
				y: 0.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			width: size.width,
			height: size.height,
		}
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> Point {
		Point::new(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Index of the topmost node under a screen position.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<usize> {
		let at = self.screen_to_graph(sx, sy);
		let positions = self.layout.positions();
		// Later nodes paint on top, so search back to front.
		self.data
			.nodes
			.iter()
			.enumerate()
			.rev()
			.find(|(_, node)| {
				positions
					.get(&node.id)
					.is_some_and(|p| p.distance(at) < self.config.hit_radius)
			})
			.map(|(i, _)| i)
	}

	pub fn pointer_down(&mut self, x: f64, y: f64) {
		if let Some(i) = self.node_at_position(x, y) {
			let node_start = self
				.layout
				.positions()
				.get(&self.data.nodes[i].id)
				.unwrap_or_default();
			self.drag = DragState {
				active: true,
				moved: false,
				node: Some(i),
				start_x: x,
				start_y: y,
				node_start,
			};
		} else {
			self.pan = PanState {
				active: true,
				start_x: x,
				start_y: y,
				transform_start_x: self.transform.x,
				transform_start_y: self.transform.y,
			};
		}
	}

	pub fn pointer_move(&mut self, x: f64, y: f64) {
		if self.drag.active {
			let (dx, dy) = (x - self.drag.start_x, y - self.drag.start_y);
			if !self.drag.moved && dx.hypot(dy) <= CLICK_SLOP {
				return;
			}
			self.drag.moved = true;
			if let Some(i) = self.drag.node {
				let at = Point::new(
					self.drag.node_start.x + dx / self.transform.k,
					self.drag.node_start.y + dy / self.transform.k,
				);
				let id = self.data.nodes[i].id.clone();
				self.layout.pin(&id, at);
			}
		} else if self.pan.active {
			self.transform.x = self.pan.transform_start_x + (x - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (y - self.pan.start_y);
		}
	}

	/// Ends any drag or pan. Returns the node if the press was a click on it.
	pub fn pointer_up(&mut self) -> Option<Node> {
		let clicked = match self.drag {
			DragState {
				active: true,
				moved: false,
				node: Some(i),
				..
			} => self.data.nodes.get(i).cloned(),
			_ => None,
		};
		self.cancel_pointer();
		clicked
	}

	pub fn cancel_pointer(&mut self) {
		self.drag = DragState::default();
		self.pan.active = false;
	}

	/// Zoom around a screen position. `delta_y > 0` zooms out.
	pub fn zoom(&mut self, x: f64, y: f64, delta_y: f64) {
		let factor = if delta_y > 0.0 { 0.9 } else { 1.1 };
		let new_k = (self.transform.k * factor).clamp(0.1, 10.0);
		let ratio = new_k / self.transform.k;
		self.transform.x = x - (x - self.transform.x) * ratio;
		self.transform.y = y - (y - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	/// Keep the graph centre in the middle of the canvas.
	pub fn resize(&mut self, size: CanvasSize) {
		self.transform.x += (size.width - self.width) / 2.0;
		self.transform.y += (size.height - self.height) / 2.0;
		self.width = size.width;
		self.height = size.height;
	}

	pub fn tick(&mut self, dt: f32) {
		self.layout.tick(dt);
	}
}
