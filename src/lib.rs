//! cortex-graph: Real-time force-directed concept graph for the browser.
//!
//! This crate provides a WASM-based canvas component that lays out a small
//! graph of concepts with a force simulation, animates the nodes, highlights
//! the hovered node and its neighbors, and reports clicked nodes to the host.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use serde::de::DeserializeOwned;
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::force_graph::{
	BindError, ConceptLink, ConceptNode, Controller, CortexGraph, GraphConfig, GraphData,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("cortex-graph: logging initialized");
}

/// Parse the JSON body of the `<script>` element with the given id.
fn load_json<T: DeserializeOwned>(element_id: &str) -> Option<T> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id(element_id)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match serde_json::from_str::<T>(&json_text) {
		Ok(value) => Some(value),
		Err(e) => {
			warn!("cortex-graph: failed to parse #{}: {}", element_id, e);
			None
		}
	}
}

/// Load graph data from a script element with id="graph-data".
/// Expected format: JSON with { nodes: [...], links: [...] }
fn load_graph_data() -> Option<GraphData> {
	let data = load_json::<GraphData>("graph-data")?;
	info!(
		"cortex-graph: loaded {} nodes, {} links",
		data.nodes.len(),
		data.links.len()
	);
	Some(data)
}

/// Main application component.
/// Loads graph data and optional config from the DOM, renders the graph and
/// shows the description of the last selected concept.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let graph_data = load_graph_data().unwrap_or_default();
	let config = load_json::<GraphConfig>("graph-config").unwrap_or_default();
	let descriptions: Vec<(String, String)> = graph_data
		.nodes
		.iter()
		.map(|n| (n.id.clone(), n.description.clone()))
		.collect();
	let graph_signal = Signal::stored(graph_data);

	let selected = RwSignal::new(None::<String>);
	let on_select = Callback::new(move |id: String| selected.set(Some(id)));
	let selected_description = move || {
		selected.get().map(|id| {
			let description = descriptions
				.iter()
				.find(|(node_id, _)| *node_id == id)
				.map(|(_, d)| d.clone())
				.unwrap_or_default();
			(id, description)
		})
	};

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Resonant Reader" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-graph">
			<CortexGraph data=graph_signal config=config on_select=on_select fullscreen=true />
			<div class="graph-overlay">
				<h1>"Resonant Reader"</h1>
				{move || match selected_description() {
					Some((id, description)) => view! {
						<p class="selected"><strong>{id}</strong>": "{description}</p>
					}.into_any(),
					None => view! {
						<p class="subtitle">"Hover a concept to see its links. Click to select it."</p>
					}.into_any(),
				}}
			</div>
		</div>
	}
}
