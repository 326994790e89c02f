use log::{debug, warn};

use super::types::{Endpoint, GraphData, Link, Node, RawGraph};

fn resolve(nodes: &[Node], id: String) -> Endpoint {
	match nodes.iter().find(|node| node.id == id) {
		Some(node) => Endpoint::Node(node.clone()),
		None => Endpoint::Dangling(id),
	}
}

/// Replace string endpoints with the nodes they name.
pub fn normalize(raw: RawGraph) -> GraphData {
	let RawGraph { nodes, links } = raw;

	let links: Vec<Link> = links
		.into_iter()
		.map(|link| Link {
			source: resolve(&nodes, link.source),
			target: resolve(&nodes, link.target),
			label: link.label,
		})
		.collect();

	let dangling = links
		.iter()
		.flat_map(|link| [&link.source, &link.target])
		.filter(|end| matches!(end, Endpoint::Dangling(_)))
		.count();
	if dangling > 0 {
		warn!("{} link endpoint(s) reference unknown node ids", dangling);
	}
	debug!("Normalized {} nodes, {} links", nodes.len(), links.len());

	GraphData { nodes, links }
}
