//! Force simulation owning the bound graph.
//!
//! Each tick cools `alpha`, applies link, charge, center and collide forces in
//! that order, then integrates velocity into position with decay. Alpha is
//! floored at `alpha_min` instead of stopping, so the layout keeps settling
//! for as long as the simulation runs.

use std::f64::consts::PI;

use log::{debug, warn};

use super::config::SimulationConfig;
use super::forces::{self, Lcg};
use super::graph::{Graph, SimNode};

const INITIAL_RADIUS: f64 = 10.0;

/// The physics solver. Sole owner of node positions and velocities.
pub struct Simulation {
	graph: Graph,
	config: SimulationConfig,
	alpha: f64,
	width: f64,
	height: f64,
	pending_size: Option<(f64, f64)>,
	rng: Lcg,
	/// Wall time not yet consumed by a tick, in milliseconds.
	accumulator: f64,
	running: bool,
	ticks: u64,
}

impl Simulation {
	/// Take ownership of a bound graph and place any unpositioned nodes.
	pub fn new(graph: Graph, config: SimulationConfig, width: f64, height: f64) -> Self {
		let mut sim = Self {
			alpha: config.alpha,
			rng: Lcg::new(config.seed),
			graph,
			config,
			width,
			height,
			pending_size: None,
			accumulator: 0.0,
			running: true,
			ticks: 0,
		};
		sim.initialize_nodes();
		sim
	}

	/// Phyllotaxis placement around the canvas centre for nodes without a
	/// prior position. Pinned coordinates win over both.
	fn initialize_nodes(&mut self) {
		let initial_angle = PI * (3.0 - 5f64.sqrt());
		let (cx, cy) = (self.width / 2.0, self.height / 2.0);

		for (i, node) in self.graph.nodes.iter_mut().enumerate() {
			node.index = i;
			if node.x.is_nan() || node.y.is_nan() {
				let radius = INITIAL_RADIUS * (0.5 + i as f64).sqrt();
				let angle = i as f64 * initial_angle;
				node.x = cx + radius * angle.cos();
				node.y = cy + radius * angle.sin();
			}
			if let Some(fx) = node.fx {
				node.x = fx;
			}
			if let Some(fy) = node.fy {
				node.y = fy;
			}
			if node.vx.is_nan() || node.vy.is_nan() {
				node.vx = 0.0;
				node.vy = 0.0;
			}
		}
	}

	/// Working nodes with their current positions.
	pub fn nodes(&self) -> &[SimNode] {
		&self.graph.nodes
	}

	/// The bound graph being simulated.
	pub fn graph(&self) -> &Graph {
		&self.graph
	}

	/// Current cooling parameter.
	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	/// Number of ticks run since construction.
	pub fn ticks(&self) -> u64 {
		self.ticks
	}

	/// Dimensions the center force currently targets.
	pub fn size(&self) -> (f64, f64) {
		(self.width, self.height)
	}

	/// False once [`Simulation::stop`] has been called.
	pub fn is_running(&self) -> bool {
		self.running
	}

	/// Halt ticking. Positions stay where they are.
	pub fn stop(&mut self) {
		if self.running {
			debug!("cortex-graph: simulation stopped after {} ticks", self.ticks);
		}
		self.running = false;
		self.accumulator = 0.0;
	}

	/// Raise alpha to at least `alpha` so the layout moves again.
	pub fn reheat(&mut self, alpha: f64) {
		self.alpha = self.alpha.max(alpha);
	}

	/// Queue new canvas dimensions. Applied before the next tick.
	///
	/// Non-finite or non-positive dimensions are ignored.
	pub fn resize(&mut self, width: f64, height: f64) {
		if !valid_size(width, height) {
			warn!("cortex-graph: ignoring invalid size {}x{}", width, height);
			return;
		}
		self.pending_size = Some((width, height));
	}

	/// Run as many ticks as `elapsed_ms` of wall time covers at the nominal
	/// tick rate, capped per call. Returns the number of ticks run.
	pub fn advance(&mut self, elapsed_ms: f64) -> u32 {
		if !self.running || !elapsed_ms.is_finite() || elapsed_ms <= 0.0 {
			return 0;
		}
		let step = 1000.0 / self.config.tick_rate.max(1.0);
		self.accumulator += elapsed_ms;

		let mut ran = 0;
		while self.accumulator >= step {
			if ran == self.config.max_ticks_per_frame.max(1) {
				self.accumulator %= step;
				break;
			}
			self.tick();
			self.accumulator -= step;
			ran += 1;
		}
		ran
	}

	/// Advance the layout by exactly one step.
	pub fn tick(&mut self) {
		if let Some((width, height)) = self.pending_size.take() {
			debug!("cortex-graph: centering on {}x{}", width, height);
			self.width = width;
			self.height = height;
		}

		self.alpha += (self.config.alpha_target - self.alpha) * self.config.alpha_decay;
		self.alpha = self.alpha.max(self.config.alpha_min);

		let before: Vec<(f64, f64)> = self.graph.nodes.iter().map(|n| (n.x, n.y)).collect();
		let config = &self.config;

		forces::apply_links(&mut self.graph, config, self.alpha, &mut self.rng);
		forces::apply_charge(&mut self.graph.nodes, config, self.alpha, &mut self.rng);
		forces::apply_center(
			&mut self.graph.nodes,
			self.width / 2.0,
			self.height / 2.0,
			config.center_strength,
		);
		forces::apply_collide(&mut self.graph.nodes, config, &mut self.rng);

		let decay = 1.0 - config.velocity_decay;
		for (node, &(px, py)) in self.graph.nodes.iter_mut().zip(&before) {
			integrate(node, decay);
			if !(node.x.is_finite() && node.y.is_finite()) {
				warn!(
					"cortex-graph: node '{}' diverged, restoring last position",
					node.id
				);
				node.x = px;
				node.y = py;
				node.vx = 0.0;
				node.vy = 0.0;
			}
		}

		self.ticks += 1;
	}
}

/// Whether `(width, height)` can serve as a centering target.
pub(crate) fn valid_size(width: f64, height: f64) -> bool {
	width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0
}

fn integrate(node: &mut SimNode, decay: f64) {
	match node.fx {
		Some(fx) => {
			node.x = fx;
			node.vx = 0.0;
		}
		None => {
			node.vx *= decay;
			node.x += node.vx;
		}
	}
	match node.fy {
		Some(fy) => {
			node.y = fy;
			node.vy = 0.0;
		}
		None => {
			node.vy *= decay;
			node.y += node.vy;
		}
	}
}
