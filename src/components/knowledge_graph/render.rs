use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::geometry::{self, Point};
use super::layout::Simulation;
use super::state::{GraphViewState, ViewTransform};
use super::types::Node;

const BACKGROUND: &str = "#ffffff";
const LINK_COLOR: &str = "#999999";
const LINK_LABEL_COLOR: &str = "#555555";
const NODE_LABEL_COLOR: &str = "#222222";

const COLORS: &[&str] = &[
	"#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
	"#bcbd22", "#17becf",
];

/// The handful of 2D drawing calls a frame needs.
pub trait Painter {
	fn clear(&mut self, width: f64, height: f64, color: &str);
	fn push_transform(&mut self, transform: &ViewTransform);
	fn pop_transform(&mut self);
	fn line(&mut self, from: Point, to: Point, width: f64, color: &str);
	fn polygon(&mut self, points: &[Point], color: &str);
	fn circle(&mut self, center: Point, radius: f64, color: &str);
	fn text(&mut self, text: &str, at: Point, font_px: f64, color: &str);
}

impl Painter for CanvasRenderingContext2d {
	fn clear(&mut self, width: f64, height: f64, color: &str) {
		self.set_fill_style_str(color);
		self.fill_rect(0.0, 0.0, width, height);
	}

	fn push_transform(&mut self, transform: &ViewTransform) {
		self.save();
		let _ = self.translate(transform.x, transform.y);
		let _ = self.scale(transform.k, transform.k);
	}

	fn pop_transform(&mut self) {
		self.restore();
	}

	fn line(&mut self, from: Point, to: Point, width: f64, color: &str) {
		self.set_stroke_style_str(color);
		self.set_line_width(width);
		self.begin_path();
		self.move_to(from.x, from.y);
		self.line_to(to.x, to.y);
		self.stroke();
	}

	fn polygon(&mut self, points: &[Point], color: &str) {
		let Some((first, rest)) = points.split_first() else {
			return;
		};
		self.set_fill_style_str(color);
		self.begin_path();
		self.move_to(first.x, first.y);
		for p in rest {
			self.line_to(p.x, p.y);
		}
		self.close_path();
		self.fill();
	}

	fn circle(&mut self, center: Point, radius: f64, color: &str) {
		self.set_fill_style_str(color);
		self.begin_path();
		let _ = self.arc(center.x, center.y, radius, 0.0, 2.0 * PI);
		self.fill();
	}

	fn text(&mut self, text: &str, at: Point, font_px: f64, color: &str) {
		self.set_fill_style_str(color);
		self.set_font(&format!("{}px sans-serif", font_px));
		self.set_text_align("center");
		self.set_text_baseline("middle");
		let _ = self.fill_text(text, at.x, at.y);
	}
}

/// `node.color`, or a palette colour picked from the node type.
pub fn node_color(node: &Node) -> &str {
	if !node.color.is_empty() {
		return &node.color;
	}
	let hash = node
		.node_type
		.bytes()
		.fold(0usize, |h, b| h.wrapping_mul(31).wrapping_add(b as usize));
	COLORS[hash % COLORS.len()]
}

pub fn render<S: Simulation>(state: &GraphViewState<S>, painter: &mut impl Painter) {
	painter.clear(state.width, state.height, BACKGROUND);
	painter.push_transform(&state.transform);
	draw_links(state, painter);
	draw_nodes(state, painter);
	painter.pop_transform();
}

fn draw_links<S: Simulation>(state: &GraphViewState<S>, painter: &mut impl Painter) {
	let (config, k) = (&state.config, state.transform.k);
	let positions = state.layout.positions();
	let font = geometry::scaled_font(config.link_font_px, k);

	for (i, link) in state.data.links.iter().enumerate() {
		// Dangling ends have no position to draw from.
		let Some((source, target)) = link.resolved() else {
			continue;
		};
		let (Some(from), Some(to)) = (positions.get(&source.id), positions.get(&target.id))
		else {
			continue;
		};
		let edge = geometry::edge(
			from,
			to,
			i,
			config.node_radius,
			config.arrow_length,
			config.arrow_spread,
			config.link_label_offset,
		);
		painter.line(edge.start, edge.end, 1.0 / k, LINK_COLOR);
		painter.polygon(&edge.arrow, LINK_COLOR);
		if !link.label.is_empty() {
			painter.text(&link.label, edge.label_at, font, LINK_LABEL_COLOR);
		}
	}
}

fn draw_nodes<S: Simulation>(state: &GraphViewState<S>, painter: &mut impl Painter) {
	let (config, k) = (&state.config, state.transform.k);
	let positions = state.layout.positions();
	let font = geometry::scaled_font(config.node_font_px, k);

	for node in &state.data.nodes {
		let Some(at) = positions.get(&node.id) else {
			continue;
		};
		painter.circle(at, config.node_radius, node_color(node));
		if !node.label.is_empty() {
			let below = Point::new(at.x, at.y + config.node_radius + font);
			painter.text(&node.label, below, font, NODE_LABEL_COLOR);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::knowledge_graph::state::tests::{node, two_node_state};
	use crate::components::knowledge_graph::types::{Endpoint, Link};
	use crate::components::knowledge_graph::viewport::measure;

	#[derive(Debug, PartialEq)]
	enum Op {
		Clear(f64, f64),
		Push(f64),
		Pop,
		Line(Point, Point),
		Polygon(Vec<Point>),
		Circle(Point, f64, String),
		Text(String, Point, f64),
	}

	#[derive(Default)]
	struct Recorder(Vec<Op>);

	impl Painter for Recorder {
		fn clear(&mut self, width: f64, height: f64, _color: &str) {
			self.0.push(Op::Clear(width, height));
		}
		fn push_transform(&mut self, transform: &ViewTransform) {
			self.0.push(Op::Push(transform.k));
		}
		fn pop_transform(&mut self) {
			self.0.push(Op::Pop);
		}
		fn line(&mut self, from: Point, to: Point, _width: f64, _color: &str) {
			self.0.push(Op::Line(from, to));
		}
		fn polygon(&mut self, points: &[Point], _color: &str) {
			self.0.push(Op::Polygon(points.to_vec()));
		}
		fn circle(&mut self, center: Point, radius: f64, color: &str) {
			self.0.push(Op::Circle(center, radius, color.into()));
		}
		fn text(&mut self, text: &str, at: Point, font_px: f64, _color: &str) {
			self.0.push(Op::Text(text.into(), at, font_px));
		}
	}

	fn frame<S: Simulation>(state: &GraphViewState<S>) -> Vec<Op> {
		let mut rec = Recorder::default();
		render(state, &mut rec);
		rec.0
	}

	#[test]
	fn draws_links_then_nodes_inside_transform() {
		let ops = frame(&two_node_state());
		assert_eq!(ops[0], Op::Clear(800.0, 600.0));
		assert_eq!(ops[1], Op::Push(1.0));
		assert_eq!(
			ops[2],
			Op::Line(Point::new(0.0, 0.0), Point::new(95.0, 0.0))
		);
		assert!(matches!(ops[3], Op::Polygon(ref p) if p[0] == Point::new(95.0, 0.0)));
		assert_eq!(
			ops[4],
			Op::Text("knows".into(), Point::new(50.0, 10.0), 10.0)
		);
		assert_eq!(
			ops[5],
			Op::Circle(Point::new(0.0, 0.0), 5.0, "red".into())
		);
		assert_eq!(ops[6], Op::Text("A".into(), Point::new(0.0, 17.0), 12.0));
		assert_eq!(ops.last(), Some(&Op::Pop));
	}

	#[test]
	fn odd_links_put_labels_on_the_other_side() {
		let mut state = two_node_state();
		state.data.links.push(Link {
			source: Endpoint::Node(node("a", "red")),
			target: Endpoint::Node(node("b", "blue")),
			label: "likes".into(),
		});
		let labels: Vec<Point> = frame(&state)
			.into_iter()
			.filter_map(|op| match op {
				Op::Text(text, at, _) if text == "knows" || text == "likes" => Some(at),
				_ => None,
			})
			.collect();
		assert_eq!(labels, [Point::new(50.0, 10.0), Point::new(50.0, -10.0)]);
	}

	#[test]
	fn dangling_links_are_skipped() {
		let mut state = two_node_state();
		state.data.links = vec![Link {
			source: Endpoint::Node(node("a", "red")),
			target: Endpoint::Dangling("ghost".into()),
			label: "haunts".into(),
		}];
		let ops = frame(&state);
		assert!(!ops.iter().any(|op| matches!(op, Op::Line(..) | Op::Polygon(_))));
		assert_eq!(
			ops.iter().filter(|op| matches!(op, Op::Circle(..))).count(),
			2
		);
	}

	#[test]
	fn labels_keep_screen_size_when_zoomed() {
		let mut state = two_node_state();
		state.transform.k = 2.0;
		let fonts: Vec<f64> = frame(&state)
			.into_iter()
			.filter_map(|op| match op {
				Op::Text(_, _, px) => Some(px),
				_ => None,
			})
			.collect();
		assert_eq!(fonts, [5.0, 6.0, 6.0]);
	}

	#[test]
	fn repaint_after_resize_uses_new_size() {
		let mut state = two_node_state();
		assert_eq!(frame(&state)[0], Op::Clear(800.0, 600.0));
		state.resize(measure(400.0, 200.0, 700.0, state.config.min_height));
		let Op::Clear(width, height) = frame(&state)[0] else {
			panic!("frame must start with a clear");
		};
		assert_eq!(width, 400.0);
		assert!(height >= 500.0);
	}

	#[test]
	fn self_loops_are_drawn_at_the_node() {
		let mut state = two_node_state();
		state.data.links = vec![Link {
			source: Endpoint::Node(node("a", "red")),
			target: Endpoint::Node(node("a", "red")),
			label: "self_ref".into(),
		}];
		let ops = frame(&state);
		assert!(ops.contains(&Op::Line(Point::new(0.0, 0.0), Point::new(-5.0, 0.0))));
		assert!(
			ops.iter()
				.any(|op| matches!(op, Op::Polygon(p) if p[0] == Point::new(-5.0, 0.0)))
		);
		assert!(ops.contains(&Op::Text("self_ref".into(), Point::new(0.0, 10.0), 10.0)));
	}

	#[test]
	fn empty_color_falls_back_to_palette_by_type() {
		let mut a = node("a", "");
		let b = node("b", "");
		assert_eq!(node_color(&a), node_color(&b));
		assert!(COLORS.contains(&node_color(&a)));
		a.color = "#123456".into();
		assert_eq!(node_color(&a), "#123456");
	}
}
