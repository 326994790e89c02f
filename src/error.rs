use thiserror::Error;

/// Anything that stops the initial graph load.
#[derive(Debug, Error)]
pub enum FetchError {
	#[error("could not build request: {0}")]
	Request(String),
	#[error("network error: {0}")]
	Network(String),
	#[error("HTTP {0}")]
	Status(u16),
	#[error("could not read response body: {0}")]
	Body(String),
	#[error("invalid graph document: {0}")]
	Decode(#[from] serde_json::Error),
}
