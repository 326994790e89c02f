use std::collections::HashMap;
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::geometry::Point;
use super::types::GraphData;

/// Node positions keyed by node id. Owned by whatever runs the layout.
#[derive(Clone, Debug, Default)]
pub struct Positions {
	index: HashMap<String, usize>,
	points: Vec<Point>,
}

impl Positions {
	pub fn new<'a>(ids: impl IntoIterator<Item = &'a str>) -> Self {
		let mut positions = Self::default();
		for id in ids {
			positions.index.insert(id.to_owned(), positions.points.len());
			positions.points.push(Point::default());
		}
		positions
	}

	pub fn get(&self, id: &str) -> Option<Point> {
		self.index.get(id).map(|&i| self.points[i])
	}

	pub fn set(&mut self, id: &str, at: Point) {
		if let Some(&i) = self.index.get(id) {
			self.points[i] = at;
		}
	}

	fn set_at(&mut self, i: usize, at: Point) {
		if let Some(slot) = self.points.get_mut(i) {
			*slot = at;
		}
	}
}

/// Something that moves nodes around over time.
pub trait Simulation {
	/// Advance by `dt` seconds.
	fn tick(&mut self, dt: f32);
	fn positions(&self) -> &Positions;
	/// Fix a node in place, e.g. while it is being dragged.
	fn pin(&mut self, id: &str, at: Point);
}

/// Continuous force-directed layout backed by `force_graph`.
pub struct ForceLayout {
	graph: ForceGraph<usize, ()>,
	handles: HashMap<String, DefaultNodeIdx>,
	positions: Positions,
}

impl ForceLayout {
	pub fn new(data: &GraphData, width: f64, height: f64, params: SimulationParameters) -> Self {
		let mut graph = ForceGraph::new(params);
		let mut handles = HashMap::new();
		let mut positions = Positions::new(data.nodes.iter().map(|n| n.id.as_str()));

		for (i, node) in data.nodes.iter().enumerate() {
			let angle = (i as f64) * 2.0 * PI / data.nodes.len() as f64;
			let at = Point::new(
				width / 2.0 + 100.0 * angle.cos(),
				height / 2.0 + 100.0 * angle.sin(),
			);
			let idx = graph.add_node(NodeData {
				x: at.x as f32,
				y: at.y as f32,
				mass: 10.0,
				is_anchor: false,
				user_data: i,
			});
			handles.insert(node.id.clone(), idx);
			positions.set_at(i, at);
		}

		for link in &data.links {
			let (Some(&src), Some(&tgt)) = (
				handles.get(link.source.id()),
				handles.get(link.target.id()),
			) else {
				continue;
			};
			if src != tgt {
				graph.add_edge(src, tgt, EdgeData::default());
			}
		}

		Self {
			graph,
			handles,
			positions,
		}
	}

	fn sync_positions(&mut self) {
		let positions = &mut self.positions;
		self.graph.visit_nodes(|node| {
			positions.set_at(
				node.data.user_data,
				Point::new(node.x() as f64, node.y() as f64),
			);
		});
	}
}

impl Simulation for ForceLayout {
	fn tick(&mut self, dt: f32) {
		self.graph.update(dt);
		self.sync_positions();
	}

	fn positions(&self) -> &Positions {
		&self.positions
	}

	fn pin(&mut self, id: &str, at: Point) {
		let Some(&idx) = self.handles.get(id) else {
			return;
		};
		self.graph.visit_nodes_mut(|node| {
			if node.index() == idx {
				node.data.x = at.x as f32;
				node.data.y = at.y as f32;
				node.data.is_anchor = true;
			}
		});
		self.positions.set(id, at);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::knowledge_graph::types::{Endpoint, Link, Node};
	use crate::config::GraphConfig;

	fn node(id: &str) -> Node {
		Node {
			id: id.into(),
			label: id.into(),
			node_type: String::new(),
			color: String::new(),
		}
	}

	fn data() -> GraphData {
		GraphData {
			nodes: vec![node("a"), node("b"), node("c")],
			links: vec![
				Link {
					source: Endpoint::Node(node("a")),
					target: Endpoint::Node(node("b")),
					label: "r".into(),
				},
				Link {
					source: Endpoint::Node(node("b")),
					target: Endpoint::Dangling("ghost".into()),
					label: "r".into(),
				},
			],
		}
	}

	#[test]
	fn seeds_nodes_on_a_circle_around_the_centre() {
		let layout = ForceLayout::new(&data(), 800.0, 600.0, GraphConfig::default().simulation());
		let centre = Point::new(400.0, 300.0);
		for id in ["a", "b", "c"] {
			let at = layout.positions().get(id).unwrap();
			assert!((at.distance(centre) - 100.0).abs() < 1e-6);
		}
		assert_eq!(layout.positions().get("ghost"), None);
	}

	#[test]
	fn tick_moves_nodes() {
		let mut layout =
			ForceLayout::new(&data(), 800.0, 600.0, GraphConfig::default().simulation());
		let before = layout.positions().get("a").unwrap();
		for _ in 0..10 {
			layout.tick(0.016);
		}
		let after = layout.positions().get("a").unwrap();
		assert!(after.x.is_finite() && after.y.is_finite());
		assert_ne!(before, after);
	}

	#[test]
	fn pinned_node_stays_put() {
		let mut layout =
			ForceLayout::new(&data(), 800.0, 600.0, GraphConfig::default().simulation());
		let at = Point::new(10.0, 20.0);
		layout.pin("b", at);
		layout.tick(0.016);
		assert_eq!(layout.positions().get("b"), Some(at));
	}

	#[test]
	fn pinning_unknown_id_is_ignored() {
		let mut layout =
			ForceLayout::new(&data(), 800.0, 600.0, GraphConfig::default().simulation());
		layout.pin("ghost", Point::new(1.0, 1.0));
		assert_eq!(layout.positions().get("ghost"), None);
	}
}
