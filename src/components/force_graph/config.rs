//! Tunable parameters for the solver, hit-testing and animation.
//!
//! Every field has a default, so a host-supplied JSON config only needs the
//! values it wants to change:
//!
//! ```json
//! { "simulation": { "link_distance": 120 }, "theme": "minimal" }
//! ```

use serde::Deserialize;

use super::theme::Theme;

/// Force and integration parameters.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
	/// Target separation of linked nodes.
	pub link_distance: f64,
	/// Many-body strength. Negative repels.
	pub charge_strength: f64,
	/// Charge distances below this are clamped.
	pub distance_min: f64,
	/// Fraction of the centroid offset corrected per tick.
	pub center_strength: f64,
	/// Added to `val` to get the collision radius.
	pub collide_padding: f64,
	/// Fraction of an overlap resolved per tick.
	pub collide_strength: f64,
	/// Fraction of velocity lost per tick.
	pub velocity_decay: f64,
	/// Starting energy of the layout.
	pub alpha: f64,
	/// Alpha never cools below this, so ticking continues indefinitely.
	pub alpha_min: f64,
	/// Cooling rate. Defaults to reaching `alpha_min` in about 300 ticks.
	pub alpha_decay: f64,
	/// Value alpha cools toward.
	pub alpha_target: f64,
	/// Nominal ticks per second.
	pub tick_rate: f64,
	/// Upper bound on ticks run for a single frame.
	pub max_ticks_per_frame: u32,
	/// Seed for the jitter applied to coincident nodes.
	pub seed: u32,
}

impl Default for SimulationConfig {
	fn default() -> Self {
		let alpha_min = 0.001;
		Self {
			link_distance: 150.0,
			charge_strength: -400.0,
			distance_min: 1.0,
			center_strength: 1.0,
			collide_padding: 10.0,
			collide_strength: 1.0,
			velocity_decay: 0.4,
			alpha: 1.0,
			alpha_min,
			alpha_decay: 1.0 - alpha_min.powf(1.0 / 300.0),
			alpha_target: 0.0,
			tick_rate: 60.0,
			max_ticks_per_frame: 4,
			seed: 1,
		}
	}
}

/// Pointer handling parameters.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct InteractionConfig {
	/// Added to `val` to get the hit radius.
	pub hit_padding: f64,
}

impl Default for InteractionConfig {
	fn default() -> Self {
		Self { hit_padding: 5.0 }
	}
}

/// Cosmetic animation parameters.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnimationConfig {
	/// Peak radius change of the breathing effect.
	pub breathing_amplitude: f64,
	/// Breathing angular speed in radians per second.
	pub breathing_speed: f64,
	/// Phase offset between consecutive node indices.
	pub breathing_phase_step: f64,
	/// Radius multiplier of the hovered node.
	pub hover_scale: f64,
	/// Gap between a node's edge and its label.
	pub label_margin: f64,
}

impl Default for AnimationConfig {
	fn default() -> Self {
		Self {
			breathing_amplitude: 2.0,
			breathing_speed: 3.0,
			breathing_phase_step: 0.5,
			hover_scale: 1.3,
			label_margin: 15.0,
		}
	}
}

/// Complete engine configuration.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct GraphConfig {
	/// Solver parameters.
	pub simulation: SimulationConfig,
	/// Pointer handling.
	pub interaction: InteractionConfig,
	/// Breathing and hover animation.
	pub animation: AnimationConfig,
	/// Name of a [`Theme`] preset.
	pub theme: String,
}

impl Default for GraphConfig {
	fn default() -> Self {
		Self {
			simulation: SimulationConfig::default(),
			interaction: InteractionConfig::default(),
			animation: AnimationConfig::default(),
			theme: "cortex".to_string(),
		}
	}
}

impl GraphConfig {
	/// Resolve the configured theme, falling back to the default preset.
	pub fn theme(&self) -> Theme {
		Theme::by_name(&self.theme).unwrap_or_else(|| {
			log::warn!("cortex-graph: unknown theme '{}', using default", self.theme);
			Theme::default()
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn partial_json_keeps_defaults() {
		let config: GraphConfig =
			serde_json::from_str(r#"{ "simulation": { "link_distance": 120 }, "theme": "minimal" }"#)
				.unwrap();

		assert_eq!(config.simulation.link_distance, 120.0);
		assert_eq!(config.simulation.charge_strength, -400.0);
		assert_eq!(config.interaction.hit_padding, 5.0);
		assert_eq!(config.theme().name, "minimal");
	}

	#[test]
	fn alpha_cools_to_minimum_in_about_300_ticks() {
		let config = SimulationConfig::default();
		let mut alpha = config.alpha;
		for _ in 0..300 {
			alpha += (config.alpha_target - alpha) * config.alpha_decay;
		}
		assert!((alpha - config.alpha_min).abs() < 1e-6);
	}

	#[test]
	fn unknown_theme_falls_back() {
		let config = GraphConfig {
			theme: "nope".into(),
			..GraphConfig::default()
		};
		assert_eq!(config.theme().name, Theme::default().name);
	}
}
