//! Per-run graph state: the simulation plus hover tracking and animation time.
//!
//! Created when a snapshot is bound and discarded when it is replaced, so
//! hover always starts out idle on a fresh graph.

use super::config::{AnimationConfig, InteractionConfig};
use super::graph::{Graph, SimNode};
use super::hit_test;
use super::simulation::Simulation;

/// Pointer state machine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Interaction {
	/// Pointer is over no node.
	#[default]
	Idle,
	/// Pointer is over the node at this index.
	Hovering(usize),
}

impl Interaction {
	/// Index of the hovered node, if any.
	pub fn hovered(self) -> Option<usize> {
		match self {
			Interaction::Idle => None,
			Interaction::Hovering(idx) => Some(idx),
		}
	}
}

/// Visual state of a node, highest precedence first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeState {
	/// Under the pointer.
	Hovered,
	/// Linked to the hovered node.
	Neighbor,
	/// Neither.
	Default,
}

/// Simulation combined with interaction state for one bound graph.
pub struct ForceGraphState {
	/// Physics for this graph.
	pub simulation: Simulation,
	/// Hover state.
	pub interaction: Interaction,
	/// Seconds of animation time, drives the breathing effect.
	pub time: f64,
}

impl ForceGraphState {
	/// Fresh state with idle hover and zero animation time.
	pub fn new(simulation: Simulation) -> Self {
		Self {
			simulation,
			interaction: Interaction::Idle,
			time: 0.0,
		}
	}

	/// The bound graph.
	pub fn graph(&self) -> &Graph {
		self.simulation.graph()
	}

	/// Nodes at their current positions.
	pub fn nodes(&self) -> &[SimNode] {
		self.simulation.nodes()
	}

	/// Index of the hovered node, if any.
	pub fn hovered(&self) -> Option<usize> {
		self.interaction.hovered()
	}

	/// First node under `(x, y)`.
	pub fn node_at_position(&self, x: f64, y: f64, config: &InteractionConfig) -> Option<usize> {
		hit_test::node_at(self.nodes(), x, y, config.hit_padding)
	}

	/// Hover `node`, or go idle on `None`.
	pub fn set_hover(&mut self, node: Option<usize>) {
		self.interaction = match node {
			Some(idx) => Interaction::Hovering(idx),
			None => Interaction::Idle,
		};
	}

	/// Hovered beats neighbor-of-hovered beats default.
	pub fn node_state(&self, idx: usize) -> NodeState {
		match self.hovered() {
			Some(h) if h == idx => NodeState::Hovered,
			Some(h) if self.graph().is_neighbor(h, idx) => NodeState::Neighbor,
			_ => NodeState::Default,
		}
	}

	/// Whether exactly one endpoint of link `idx` is the hovered node.
	pub fn is_link_emphasized(&self, idx: usize) -> bool {
		let link = &self.graph().links[idx];
		self.hovered()
			.is_some_and(|h| (link.source == h) != (link.target == h))
	}

	/// Drawn radius: enlarged when hovered, breathing otherwise.
	pub fn node_radius(&self, node: &SimNode, hovered: bool, animation: &AnimationConfig) -> f64 {
		let radius = if hovered {
			node.val * animation.hover_scale
		} else {
			let phase = self.time * animation.breathing_speed
				+ node.index as f64 * animation.breathing_phase_step;
			node.val + phase.sin() * animation.breathing_amplitude
		};
		radius.max(0.0)
	}

	/// Advance animation time and the simulation by one frame's worth.
	pub fn advance(&mut self, elapsed_ms: f64) -> u32 {
		if elapsed_ms.is_finite() && elapsed_ms > 0.0 {
			self.time += elapsed_ms / 1000.0;
		}
		self.simulation.advance(elapsed_ms)
	}

	/// Queue new canvas dimensions for the simulation.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.simulation.resize(width, height);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::config::SimulationConfig;
	use crate::components::force_graph::types::{ConceptLink, ConceptNode, GraphData};

	fn state(links: &[(&str, &str)]) -> ForceGraphState {
		let data = GraphData {
			nodes: ["A", "B", "C"]
				.iter()
				.map(|id| ConceptNode::new(*id, 10.0))
				.collect(),
			links: links.iter().map(|&(s, t)| ConceptLink::new(s, t)).collect(),
		};
		let graph = Graph::bind(&data).unwrap();
		ForceGraphState::new(Simulation::new(
			graph,
			SimulationConfig::default(),
			800.0,
			600.0,
		))
	}

	#[test]
	fn node_state_precedence() {
		let mut state = state(&[("A", "B"), ("A", "A")]);
		assert_eq!(state.node_state(0), NodeState::Default);

		state.set_hover(Some(0));
		assert_eq!(state.node_state(0), NodeState::Hovered);
		assert_eq!(state.node_state(1), NodeState::Neighbor);
		assert_eq!(state.node_state(2), NodeState::Default);

		state.set_hover(Some(1));
		assert_eq!(state.node_state(0), NodeState::Neighbor);
	}

	#[test]
	fn self_link_is_never_emphasized() {
		let mut state = state(&[("A", "B"), ("A", "A"), ("B", "C")]);
		state.set_hover(Some(0));

		assert!(state.is_link_emphasized(0));
		assert!(!state.is_link_emphasized(1));
		assert!(!state.is_link_emphasized(2));

		state.set_hover(None);
		assert!(!state.is_link_emphasized(0));
	}

	#[test]
	fn hovered_radius_overrides_breathing() {
		let mut state = state(&[]);
		let animation = AnimationConfig::default();
		state.time = 1.234;
		let node = state.nodes()[1].clone();

		assert!((state.node_radius(&node, true, &animation) - 13.0).abs() < 1e-9);
		let breathing = state.node_radius(&node, false, &animation);
		assert!((breathing - 10.0).abs() <= animation.breathing_amplitude);
	}

	#[test]
	fn breathing_phase_differs_per_index() {
		let state = state(&[]);
		let animation = AnimationConfig::default();
		let nodes = state.nodes();
		assert_ne!(
			state.node_radius(&nodes[0], false, &animation),
			state.node_radius(&nodes[1], false, &animation)
		);
	}

	#[test]
	fn radius_never_negative() {
		let state = state(&[]);
		let animation = AnimationConfig {
			breathing_amplitude: 100.0,
			breathing_phase_step: -std::f64::consts::FRAC_PI_2,
			..AnimationConfig::default()
		};
		assert_eq!(state.node_radius(&state.nodes()[1], false, &animation), 0.0);
		for node in state.nodes() {
			assert!(state.node_radius(node, false, &animation) >= 0.0);
		}
	}
}
