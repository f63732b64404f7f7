//! Graph data structures supplied by the host.
//!
//! These records are the immutable input snapshot. The engine clones them into
//! a bound working copy (see [`super::graph::Graph`]) before simulating.

use serde::Deserialize;

/// A concept in the graph.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ConceptNode {
	/// Unique identifier, also drawn as the node label.
	pub id: String,
	/// Classification, display-only.
	#[serde(default)]
	pub group: i64,
	/// Free-form description shown by the host on selection.
	#[serde(default)]
	pub description: String,
	/// Base radius and physical bulk. Must be positive.
	pub val: f64,
	/// Prior position, kept when re-binding instead of re-seeding the layout.
	#[serde(default)]
	pub x: Option<f64>,
	#[serde(default)]
	pub y: Option<f64>,
	#[serde(default)]
	pub vx: Option<f64>,
	#[serde(default)]
	pub vy: Option<f64>,
	/// Pinned position overriding the solver.
	#[serde(default)]
	pub fx: Option<f64>,
	#[serde(default)]
	pub fy: Option<f64>,
}

impl ConceptNode {
	/// Build an unpositioned node with the given id and radius.
	pub fn new(id: impl Into<String>, val: f64) -> Self {
		Self {
			id: id.into(),
			group: 0,
			description: String::new(),
			val,
			x: None,
			y: None,
			vx: None,
			vy: None,
			fx: None,
			fy: None,
		}
	}
}

/// An unbound link between two node ids.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ConceptLink {
	/// Source node id.
	pub source: String,
	/// Target node id.
	pub target: String,
	/// Link weight. Reserved for spring-strength scaling.
	#[serde(default = "default_link_value")]
	pub value: f64,
}

fn default_link_value() -> f64 {
	1.0
}

impl ConceptLink {
	/// Build a unit-weight link.
	pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
		Self {
			source: source.into(),
			target: target.into(),
			value: 1.0,
		}
	}
}

/// Complete graph snapshot: nodes and links.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct GraphData {
	/// Concepts, in draw and hit-test order.
	pub nodes: Vec<ConceptNode>,
	/// Relations between concepts by id.
	pub links: Vec<ConceptLink>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn deserializes_minimal_records() {
		let data: GraphData = serde_json::from_str(
			r#"{
				"nodes": [{ "id": "A", "val": 20 }, { "id": "B", "group": 2, "val": 10 }],
				"links": [{ "source": "A", "target": "B" }]
			}"#,
		)
		.unwrap();

		assert_eq!(data.nodes.len(), 2);
		assert_eq!(data.nodes[1].group, 2);
		assert!(data.nodes[0].x.is_none());
		assert_eq!(data.links[0].value, 1.0);
	}

	#[test]
	fn sample_dataset_parses() {
		let data: GraphData =
			serde_json::from_str(include_str!("../../../demos/cortex.json")).unwrap();
		assert_eq!(data.nodes.len(), 7);
		assert_eq!(data.links.len(), 7);
		assert!(data.nodes.iter().all(|n| n.val > 0.0));
	}
}
