//! Tunables for the graph view and the API it talks to.

use force_graph::SimulationParameters;

const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Graph view configuration. `Default` reads the API base URL from the
/// `KG_API_URL` build-time environment variable.
#[derive(Clone, Debug)]
pub struct GraphConfig {
	pub api_base_url: String,
	pub graph_path: String,
	pub min_height: f64,
	pub node_radius: f64,
	/// Pick distance around a node centre, in graph units (scales with zoom).
	pub hit_radius: f64,
	pub arrow_length: f64,
	/// Half-angle of the arrowhead, in radians.
	pub arrow_spread: f64,
	/// Sideways distance of a link label from the link, in pixels.
	pub link_label_offset: f64,
	pub node_font_px: f64,
	pub link_font_px: f64,
	pub force_charge: f32,
	pub force_spring: f32,
	pub force_max: f32,
	pub node_speed: f32,
	pub damping_factor: f32,
}

impl Default for GraphConfig {
	fn default() -> Self {
		Self {
			api_base_url: option_env!("KG_API_URL")
				.unwrap_or(DEFAULT_API_URL)
				.trim_end_matches('/')
				.to_owned(),
			graph_path: "/graph".into(),
			min_height: 500.0,
			node_radius: 5.0,
			hit_radius: 8.0,
			arrow_length: 6.0,
			arrow_spread: 30f64.to_radians(),
			link_label_offset: 10.0,
			node_font_px: 12.0,
			link_font_px: 10.0,
			force_charge: 150.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		}
	}
}

impl GraphConfig {
	pub fn graph_url(&self) -> String {
		format!("{}{}", self.api_base_url, self.graph_path)
	}

	pub fn simulation(&self) -> SimulationParameters {
		SimulationParameters {
			force_charge: self.force_charge,
			force_spring: self.force_spring,
			force_max: self.force_max,
			node_speed: self.node_speed,
			damping_factor: self.damping_factor,
		}
	}
}
