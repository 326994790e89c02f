use serde::Deserialize;

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Node {
	pub id: String,
	#[serde(default)]
	pub label: String,
	#[serde(rename = "type", default)]
	pub node_type: String,
	#[serde(default)]
	pub color: String,
}

/// A link exactly as it arrives over the wire.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct RawLink {
	pub source: String,
	pub target: String,
	#[serde(default)]
	pub label: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct RawGraph {
	#[serde(default)]
	pub nodes: Vec<Node>,
	#[serde(default)]
	pub links: Vec<RawLink>,
}

/// One end of a link after id resolution. Ids with no matching node stay as-is.
#[derive(Clone, Debug, PartialEq)]
pub enum Endpoint {
	Node(Node),
	Dangling(String),
}

impl Endpoint {
	pub fn id(&self) -> &str {
		match self {
			Endpoint::Node(node) => &node.id,
			Endpoint::Dangling(id) => id,
		}
	}

	pub fn node(&self) -> Option<&Node> {
		match self {
			Endpoint::Node(node) => Some(node),
			Endpoint::Dangling(_) => None,
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct Link {
	pub source: Endpoint,
	pub target: Endpoint,
	pub label: String,
}

impl Link {
	/// Both endpoints as nodes, or `None` if either side is dangling.
	pub fn resolved(&self) -> Option<(&Node, &Node)> {
		Some((self.source.node()?, self.target.node()?))
	}
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphData {
	pub nodes: Vec<Node>,
	pub links: Vec<Link>,
}

impl RawGraph {
	pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(text)
	}
}
