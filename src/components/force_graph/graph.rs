//! Bound working copy of a graph snapshot.
//!
//! [`Graph::bind`] clones the host's [`GraphData`] and resolves each link's
//! endpoint ids to node indices once, so the simulation can mutate node state
//! freely while links stay valid.

use std::collections::HashMap;

use super::error::BindError;
use super::types::GraphData;

/// A node in the working copy, owned by the simulation.
#[derive(Clone, Debug, PartialEq)]
pub struct SimNode {
	/// Unique identifier, also the label.
	pub id: String,
	/// Display grouping, not used by the physics.
	pub group: i64,
	/// Free text shown by the host on selection.
	pub description: String,
	/// Base radius and physical bulk.
	pub val: f64,
	/// Ordinal assigned at bind time, drives the breathing phase.
	pub index: usize,
	/// Position. NaN until the simulation places the node.
	pub x: f64,
	/// See [`SimNode::x`].
	pub y: f64,
	/// Velocity, zeroed at placement.
	pub vx: f64,
	/// See [`SimNode::vx`].
	pub vy: f64,
	/// Pinned x coordinate, overrides the solver.
	pub fx: Option<f64>,
	/// Pinned y coordinate, overrides the solver.
	pub fy: Option<f64>,
}

impl SimNode {
	/// Current position, or `None` while it is undefined or non-finite.
	pub fn position(&self) -> Option<(f64, f64)> {
		(self.x.is_finite() && self.y.is_finite()).then_some((self.x, self.y))
	}
}

/// A link whose endpoints are resolved to indices into [`Graph::nodes`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundLink {
	/// Index of the source node.
	pub source: usize,
	/// Index of the target node.
	pub target: usize,
	/// Link weight, carried through but not used by the forces.
	pub value: f64,
}

impl BoundLink {
	/// Whether this link connects `a` and `b`, in either direction.
	pub fn connects(&self, a: usize, b: usize) -> bool {
		(self.source == a && self.target == b) || (self.source == b && self.target == a)
	}
}

/// Nodes and bound links, plus per-node link counts.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Graph {
	/// Working nodes in snapshot order.
	pub nodes: Vec<SimNode>,
	/// Links in snapshot order.
	pub links: Vec<BoundLink>,
	degree: Vec<usize>,
}

impl Graph {
	/// Clone the snapshot into a working copy and bind its links.
	///
	/// Fails on unknown link endpoints, duplicate ids and non-positive radii.
	pub fn bind(data: &GraphData) -> Result<Self, BindError> {
		let mut id_to_idx = HashMap::with_capacity(data.nodes.len());
		let mut nodes = Vec::with_capacity(data.nodes.len());

		for (index, node) in data.nodes.iter().enumerate() {
			if !(node.val.is_finite() && node.val > 0.0) {
				return Err(BindError::InvalidRadius {
					id: node.id.clone(),
					val: node.val,
				});
			}
			if id_to_idx.insert(node.id.as_str(), index).is_some() {
				return Err(BindError::DuplicateNode(node.id.clone()));
			}
			nodes.push(SimNode {
				id: node.id.clone(),
				group: node.group,
				description: node.description.clone(),
				val: node.val,
				index,
				x: node.x.unwrap_or(f64::NAN),
				y: node.y.unwrap_or(f64::NAN),
				vx: node.vx.unwrap_or(f64::NAN),
				vy: node.vy.unwrap_or(f64::NAN),
				fx: node.fx,
				fy: node.fy,
			});
		}

		let resolve = |link: usize, id: &str| {
			id_to_idx
				.get(id)
				.copied()
				.ok_or_else(|| BindError::UnknownNode {
					link,
					id: id.to_string(),
				})
		};

		let mut degree = vec![0; nodes.len()];
		let mut links = Vec::with_capacity(data.links.len());
		for (i, link) in data.links.iter().enumerate() {
			let source = resolve(i, &link.source)?;
			let target = resolve(i, &link.target)?;
			degree[source] += 1;
			degree[target] += 1;
			links.push(BoundLink {
				source,
				target,
				value: link.value,
			});
		}

		Ok(Self {
			nodes,
			links,
			degree,
		})
	}

	/// Number of link endpoints touching node `idx`.
	pub fn degree(&self, idx: usize) -> usize {
		self.degree.get(idx).copied().unwrap_or(0)
	}

	/// Whether `candidate` shares a link with `hovered`. Never true for the node itself.
	pub fn is_neighbor(&self, hovered: usize, candidate: usize) -> bool {
		hovered != candidate && self.links.iter().any(|l| l.connects(hovered, candidate))
	}
}
