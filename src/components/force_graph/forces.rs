//! The four forces composed by the simulation.
//!
//! Link, charge and collide accumulate into node velocities. Center shifts
//! positions directly. Coincident points get a tiny deterministic jiggle
//! rather than dividing by zero.

use super::config::SimulationConfig;
use super::graph::{Graph, SimNode};

/// Linear congruential generator for reproducible jiggle.
#[derive(Clone, Debug)]
pub struct Lcg(u32);

impl Lcg {
	/// Generator starting from `seed`.
	pub fn new(seed: u32) -> Self {
		Self(seed)
	}

	/// Next value in `[0, 1)`.
	pub fn next_f64(&mut self) -> f64 {
		self.0 = self.0.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
		self.0 as f64 / 4_294_967_296.0
	}

	fn jiggle(&mut self) -> f64 {
		(self.next_f64() - 0.5) * 1e-6
	}
}

/// Replace an exactly-zero component with a jiggle.
fn nonzero(v: f64, rng: &mut Lcg) -> f64 {
	if v == 0.0 { rng.jiggle() } else { v }
}

/// Springs along every link toward `link_distance`.
///
/// Strength is `1 / min(degree)` of the endpoints, and the correction is split
/// by relative degree so hubs move less than leaves.
pub fn apply_links(graph: &mut Graph, config: &SimulationConfig, alpha: f64, rng: &mut Lcg) {
	for i in 0..graph.links.len() {
		let link = graph.links[i];
		let (ds, dt) = (graph.degree(link.source), graph.degree(link.target));
		let strength = 1.0 / ds.min(dt).max(1) as f64;
		let bias = ds as f64 / (ds + dt).max(1) as f64;

		let (s, t) = (&graph.nodes[link.source], &graph.nodes[link.target]);
		let x = nonzero(t.x + t.vx - s.x - s.vx, rng);
		let y = nonzero(t.y + t.vy - s.y - s.vy, rng);
		let l = (x * x + y * y).sqrt();
		let k = (l - config.link_distance) / l * alpha * strength;
		let (x, y) = (x * k, y * k);

		let t = &mut graph.nodes[link.target];
		t.vx -= x * bias;
		t.vy -= y * bias;
		let s = &mut graph.nodes[link.source];
		s.vx += x * (1.0 - bias);
		s.vy += y * (1.0 - bias);
	}
}

/// Pairwise many-body force, inverse in squared distance.
pub fn apply_charge(nodes: &mut [SimNode], config: &SimulationConfig, alpha: f64, rng: &mut Lcg) {
	let positions: Vec<(f64, f64)> = nodes.iter().map(|n| (n.x, n.y)).collect();
	let min2 = config.distance_min * config.distance_min;

	for (i, node) in nodes.iter_mut().enumerate() {
		for (j, &(px, py)) in positions.iter().enumerate() {
			if i == j {
				continue;
			}
			let (mut x, mut y) = (px - node.x, py - node.y);
			let mut l = x * x + y * y;
			if x == 0.0 {
				x = rng.jiggle();
				l += x * x;
			}
			if y == 0.0 {
				y = rng.jiggle();
				l += y * y;
			}
			if l < min2 {
				l = (min2 * l).sqrt();
			}
			node.vx += x * config.charge_strength * alpha / l;
			node.vy += y * config.charge_strength * alpha / l;
		}
	}
}

/// Translate all nodes so their centroid moves toward `(cx, cy)`.
pub fn apply_center(nodes: &mut [SimNode], cx: f64, cy: f64, strength: f64) {
	if nodes.is_empty() {
		return;
	}
	let n = nodes.len() as f64;
	let (sx, sy) = nodes
		.iter()
		.fold((0.0, 0.0), |(sx, sy), node| (sx + node.x, sy + node.y));
	let (dx, dy) = ((sx / n - cx) * strength, (sy / n - cy) * strength);
	for node in nodes {
		node.x -= dx;
		node.y -= dy;
	}
}

/// Push apart overlapping circles of radius `val + collide_padding`.
///
/// Overlap is measured on predicted positions and resolved along the axis
/// between centres, the smaller node taking the larger share.
pub fn apply_collide(nodes: &mut [SimNode], config: &SimulationConfig, rng: &mut Lcg) {
	let radius = |n: &SimNode| n.val + config.collide_padding;

	for i in 0..nodes.len() {
		let ri = radius(&nodes[i]);
		let ri2 = ri * ri;
		let (xi, yi) = (nodes[i].x + nodes[i].vx, nodes[i].y + nodes[i].vy);

		for j in (i + 1)..nodes.len() {
			let rj = radius(&nodes[j]);
			let r = ri + rj;
			let mut x = xi - nodes[j].x - nodes[j].vx;
			let mut y = yi - nodes[j].y - nodes[j].vy;
			let mut l = x * x + y * y;
			if l >= r * r {
				continue;
			}
			if x == 0.0 {
				x = rng.jiggle();
				l += x * x;
			}
			if y == 0.0 {
				y = rng.jiggle();
				l += y * y;
			}
			let l = l.sqrt();
			let k = (r - l) / l * config.collide_strength;
			let (x, y) = (x * k, y * k);
			let share = rj * rj / (ri2 + rj * rj);

			nodes[i].vx += x * share;
			nodes[i].vy += y * share;
			nodes[j].vx -= x * (1.0 - share);
			nodes[j].vy -= y * (1.0 - share);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::types::{ConceptLink, ConceptNode, GraphData};

	fn placed(points: &[(&str, f64, f64, f64)], links: &[(&str, &str)]) -> Graph {
		let data = GraphData {
			nodes: points
				.iter()
				.map(|&(id, val, x, y)| ConceptNode {
					x: Some(x),
					y: Some(y),
					vx: Some(0.0),
					vy: Some(0.0),
					..ConceptNode::new(id, val)
				})
				.collect(),
			links: links.iter().map(|&(s, t)| ConceptLink::new(s, t)).collect(),
		};
		Graph::bind(&data).unwrap()
	}

	#[test]
	fn lcg_stays_in_unit_interval() {
		let mut rng = Lcg::new(1);
		for _ in 0..1000 {
			let v = rng.next_f64();
			assert!((0.0..1.0).contains(&v));
		}
	}

	#[test]
	fn stretched_link_pulls_endpoints_together() {
		let mut graph = placed(&[("A", 5.0, 0.0, 0.0), ("B", 5.0, 400.0, 0.0)], &[("A", "B")]);
		apply_links(&mut graph, &SimulationConfig::default(), 1.0, &mut Lcg::new(1));

		assert!(graph.nodes[0].vx > 0.0);
		assert!(graph.nodes[1].vx < 0.0);
	}

	#[test]
	fn charge_repels() {
		let mut graph = placed(&[("A", 5.0, 0.0, 0.0), ("B", 5.0, 10.0, 0.0)], &[]);
		apply_charge(&mut graph.nodes, &SimulationConfig::default(), 1.0, &mut Lcg::new(1));

		assert!(graph.nodes[0].vx < 0.0);
		assert!(graph.nodes[1].vx > 0.0);
	}

	#[test]
	fn coincident_nodes_stay_finite() {
		let mut graph = placed(&[("A", 5.0, 3.0, 3.0), ("B", 5.0, 3.0, 3.0)], &[("A", "B")]);
		let config = SimulationConfig::default();
		let mut rng = Lcg::new(1);
		apply_links(&mut graph, &config, 1.0, &mut rng);
		apply_charge(&mut graph.nodes, &config, 1.0, &mut rng);
		apply_collide(&mut graph.nodes, &config, &mut rng);

		for node in &graph.nodes {
			assert!(node.vx.is_finite() && node.vy.is_finite());
		}
	}

	#[test]
	fn center_moves_centroid() {
		let mut graph = placed(&[("A", 5.0, 0.0, 0.0), ("B", 5.0, 20.0, 40.0)], &[]);
		apply_center(&mut graph.nodes, 100.0, 100.0, 1.0);

		let cx = (graph.nodes[0].x + graph.nodes[1].x) / 2.0;
		let cy = (graph.nodes[0].y + graph.nodes[1].y) / 2.0;
		assert!((cx - 100.0).abs() < 1e-9);
		assert!((cy - 100.0).abs() < 1e-9);
		assert_eq!(graph.nodes[1].x - graph.nodes[0].x, 20.0);
	}

	#[test]
	fn collide_separates_overlap_only() {
		let config = SimulationConfig::default();
		let mut graph = placed(&[("A", 10.0, 0.0, 0.0), ("B", 10.0, 5.0, 0.0)], &[]);
		apply_collide(&mut graph.nodes, &config, &mut Lcg::new(1));
		assert!(graph.nodes[0].vx < 0.0);
		assert!(graph.nodes[1].vx > 0.0);

		let mut apart = placed(&[("A", 10.0, 0.0, 0.0), ("B", 10.0, 500.0, 0.0)], &[]);
		apply_collide(&mut apart.nodes, &config, &mut Lcg::new(1));
		assert_eq!(apart.nodes[0].vx, 0.0);
		assert_eq!(apart.nodes[1].vx, 0.0);
	}
}
