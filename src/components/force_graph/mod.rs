//! Force-directed concept graph.
//!
//! Lays out a small graph of concepts with a d3-style force simulation and
//! renders it on an HTML canvas with:
//! - Link springs, many-body repulsion, centering and collision forces
//! - A per-node "breathing" radius animation
//! - Hover highlighting of the node under the pointer and its neighbors
//! - A selection callback when a hovered node is clicked
//!
//! The engine itself ([`Controller`], [`Simulation`], [`render`]) does not touch
//! the browser; [`CortexGraph`] is the Leptos wrapper that feeds it pointer
//! events and animation frames.
//!
//! # Example
//!
//! ```ignore
//! use cortex_graph::{CortexGraph, ConceptLink, ConceptNode, GraphData};
//!
//! let data = GraphData {
//!     nodes: vec![ConceptNode::new("Entropy", 20.0), ConceptNode::new("Time", 15.0)],
//!     links: vec![ConceptLink::new("Entropy", "Time")],
//! };
//!
//! view! {
//!     <CortexGraph
//!         data=Signal::stored(data)
//!         on_select=Callback::new(|id: String| log::info!("selected {id}"))
//!     />
//! }
//! ```

mod component;
pub mod config;
mod controller;
mod error;
mod forces;
mod graph;
pub mod render;
mod simulation;
mod state;
pub mod surface;
pub mod theme;
mod types;

pub use component::CortexGraph;
pub use config::GraphConfig;
pub use controller::{Controller, Cursor};
pub use error::BindError;
pub use graph::{BoundLink, Graph, SimNode};
pub use hit_test::node_at;
pub use simulation::Simulation;
pub use state::{ForceGraphState, Interaction, NodeState};
pub use surface::Surface;
pub use theme::Theme;
pub use types::{ConceptLink, ConceptNode, GraphData};
