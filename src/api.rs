//! Graph endpoint client.

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

use crate::components::knowledge_graph::RawGraph;
use crate::config::GraphConfig;
use crate::error::FetchError;

/// Where the graph document comes from.
#[allow(async_fn_in_trait)]
pub trait GraphSource {
	async fn fetch_graph(&self) -> Result<RawGraph, FetchError>;
}

#[derive(Clone, Debug)]
pub struct GraphClient {
	url: String,
}

impl GraphClient {
	pub fn new(config: &GraphConfig) -> Self {
		Self {
			url: config.graph_url(),
		}
	}

	async fn get_text(&self) -> Result<String, FetchError> {
		let opts = RequestInit::new();
		opts.set_method("GET");
		opts.set_mode(RequestMode::Cors);

		let request = Request::new_with_str_and_init(&self.url, &opts)
			.map_err(|e| FetchError::Request(format!("{:?}", e)))?;

		let window = web_sys::window().ok_or_else(|| FetchError::Request("no window".into()))?;
		let resp_value = JsFuture::from(window.fetch_with_request(&request))
			.await
			.map_err(|e| FetchError::Network(format!("{:?}", e)))?;

		let resp: Response = resp_value
			.dyn_into()
			.map_err(|_| FetchError::Network("response is not a Response".into()))?;
		if !resp.ok() {
			return Err(FetchError::Status(resp.status()));
		}

		let text = resp
			.text()
			.map_err(|e| FetchError::Body(format!("{:?}", e)))?;
		JsFuture::from(text)
			.await
			.map_err(|e| FetchError::Body(format!("{:?}", e)))?
			.as_string()
			.ok_or_else(|| FetchError::Body("body is not text".into()))
	}
}

impl GraphSource for GraphClient {
	async fn fetch_graph(&self) -> Result<RawGraph, FetchError> {
		log::info!("Fetching graph from {}", self.url);
		let text = self.get_text().await?;
		Ok(RawGraph::from_json(&text)?)
	}
}
