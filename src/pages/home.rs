use leptos::prelude::*;

use crate::components::knowledge_graph::{KnowledgeGraph, Node};

/// Graph page with a panel for the last clicked node.
#[component]
pub fn Home() -> impl IntoView {
	let selected = RwSignal::new(None::<Node>);
	let on_node_click = Callback::new(move |node: Node| selected.set(Some(node)));

	view! {
		<div class="graph-page">
			<header class="graph-header">
				<h1>"Knowledge Graph"</h1>
				<p class="subtitle">"Click a node to inspect it. Drag to move, scroll to zoom."</p>
			</header>

			<main class="graph-body">
				<KnowledgeGraph on_node_click=on_node_click />
			</main>

			<aside class="graph-inspector">
				{move || match selected.get() {
					Some(node) => view! {
						<h2>{node.label}</h2>
						<dl>
							<dt>"Type"</dt>
							<dd>{node.node_type}</dd>
							<dt>"Id"</dt>
							<dd>{node.id}</dd>
						</dl>
					}
					.into_any(),
					None => view! { <p>"No node selected."</p> }.into_any(),
				}}
			</aside>
		</div>
	}
}
