use log::{error, info};

use super::dedup::deduplicate;
use super::normalize::normalize;
use super::types::GraphData;
use crate::api::GraphSource;

pub const LOAD_ERROR_MESSAGE: &str = "Failed to load graph data.";

/// `Loading -> Error | Ready`. Neither outcome transitions again until remount.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ViewStatus {
	#[default]
	Loading,
	Error(String),
	Ready(GraphData),
}

/// Fetch, normalize and deduplicate once. Any failure becomes the generic error state.
pub async fn load_graph<S: GraphSource>(source: &S) -> ViewStatus {
	match source.fetch_graph().await {
		Ok(raw) => {
			let mut data = normalize(raw);
			let before = data.links.len();
			data.links = deduplicate(data.links);
			info!(
				"Graph ready: {} nodes, {} links ({} duplicates dropped)",
				data.nodes.len(),
				data.links.len(),
				before - data.links.len()
			);
			ViewStatus::Ready(data)
		}
		Err(e) => {
			error!("Graph load failed: {}", e);
			ViewStatus::Error(LOAD_ERROR_MESSAGE.into())
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::knowledge_graph::types::{Endpoint, RawGraph};
	use crate::error::FetchError;

	struct Fixed(&'static str);

	impl GraphSource for Fixed {
		async fn fetch_graph(&self) -> Result<RawGraph, FetchError> {
			Ok(RawGraph::from_json(self.0)?)
		}
	}

	struct Down;

	impl GraphSource for Down {
		async fn fetch_graph(&self) -> Result<RawGraph, FetchError> {
			Err(FetchError::Status(503))
		}
	}

	#[test]
	fn ready_with_deduplicated_links() {
		let source = Fixed(
			r#"{
				"nodes": [
					{"id": "a", "label": "A", "type": "T", "color": "red"},
					{"id": "b", "label": "B", "type": "T", "color": "blue"}
				],
				"links": [
					{"source": "a", "target": "b", "label": "knows"},
					{"source": "b", "target": "a", "label": "knows"},
					{"source": "b", "target": "zz", "label": "points"}
				]
			}"#,
		);

		let ViewStatus::Ready(data) = pollster::block_on(load_graph(&source)) else {
			panic!("expected ready");
		};
		assert_eq!(data.nodes.len(), 2);
		assert_eq!(data.links.len(), 2);
		assert_eq!(data.links[1].target, Endpoint::Dangling("zz".into()));
	}

	#[test]
	fn http_failure_is_generic_error() {
		assert_eq!(
			pollster::block_on(load_graph(&Down)),
			ViewStatus::Error(LOAD_ERROR_MESSAGE.into())
		);
	}

	#[test]
	fn decode_failure_is_generic_error() {
		assert_eq!(
			pollster::block_on(load_graph(&Fixed("{\"nodes\": 3}"))),
			ViewStatus::Error(LOAD_ERROR_MESSAGE.into())
		);
	}

	#[test]
	fn starts_loading() {
		assert_eq!(ViewStatus::default(), ViewStatus::Loading);
	}
}
