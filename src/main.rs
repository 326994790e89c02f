//! Browser entry point: mounts the knowledge graph app.

use knowledge_graph_viewer::{App, init_logging};
use leptos::prelude::*;

fn main() {
	init_logging();
	mount_to_body(App)
}
