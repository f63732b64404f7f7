//! Interaction controller and engine lifecycle.
//!
//! The controller is the single owner of the running simulation. It binds
//! snapshots, turns pointer events into hover transitions and selection
//! events, and drives one frame at a time: advance the solver, then render.
//! It has no dependency on the browser, so the component in
//! [`super::component`] only forwards events and frame timestamps to it.

use log::{debug, error, info};

use super::config::GraphConfig;
use super::error::BindError;
use super::graph::Graph;
use super::render;
use super::simulation::{self, Simulation};
use super::state::{ForceGraphState, Interaction};
use super::surface::Surface;
use super::theme::Theme;
use super::types::GraphData;

/// Pointer affordance to show over the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cursor {
	/// Not over a node.
	Default,
	/// Over a clickable node.
	Pointer,
}

impl Cursor {
	/// Value for the CSS `cursor` property.
	pub fn css(self) -> &'static str {
		match self {
			Cursor::Default => "default",
			Cursor::Pointer => "pointer",
		}
	}
}

type SelectHandler = Box<dyn FnMut(&str)>;

/// Owns the simulation lifecycle and the hover state machine.
pub struct Controller {
	config: GraphConfig,
	theme: Theme,
	state: Option<ForceGraphState>,
	size: (f64, f64),
	last_frame: Option<f64>,
	on_select: Option<SelectHandler>,
}

impl Controller {
	/// Idle controller for a canvas of the given size. Call [`Controller::start`] to bind data.
	pub fn new(config: GraphConfig, width: f64, height: f64) -> Self {
		let theme = config.theme();
		Self {
			config,
			theme,
			state: None,
			size: (width, height),
			last_frame: None,
			on_select: None,
		}
	}

	/// Register the callback invoked with a node id on click-while-hovering.
	pub fn on_select(&mut self, handler: impl FnMut(&str) + 'static) {
		self.on_select = Some(Box::new(handler));
	}

	/// Tear down any previous run, bind `data` and start a fresh simulation.
	///
	/// On a bind error nothing is left running.
	pub fn start(&mut self, data: &GraphData) -> Result<(), BindError> {
		self.teardown();

		let graph = Graph::bind(data).inspect_err(|e| {
			error!("cortex-graph: cannot start simulation: {}", e);
		})?;
		info!(
			"cortex-graph: simulating {} nodes, {} links",
			graph.nodes.len(),
			graph.links.len()
		);

		let simulation = Simulation::new(
			graph,
			self.config.simulation.clone(),
			self.size.0,
			self.size.1,
		);
		self.state = Some(ForceGraphState::new(simulation));
		Ok(())
	}

	/// Halt the solver. The last layout stays drawable.
	pub fn stop(&mut self) {
		if let Some(state) = &mut self.state {
			state.simulation.stop();
		}
		self.last_frame = None;
	}

	/// Stop and discard the current run entirely.
	pub fn teardown(&mut self) {
		self.stop();
		if self.state.take().is_some() {
			debug!("cortex-graph: previous simulation discarded");
		}
	}

	/// Whether a simulation exists and is ticking.
	pub fn is_running(&self) -> bool {
		self.state
			.as_ref()
			.is_some_and(|s| s.simulation.is_running())
	}

	/// State of the current run, if any.
	pub fn state(&self) -> Option<&ForceGraphState> {
		self.state.as_ref()
	}

	/// Current hover state. Idle when nothing is running.
	pub fn interaction(&self) -> Interaction {
		self.state
			.as_ref()
			.map_or(Interaction::Idle, |s| s.interaction)
	}

	/// Canvas size as last set.
	pub fn size(&self) -> (f64, f64) {
		self.size
	}

	/// New canvas dimensions. The centering target follows on the next tick.
	///
	/// Non-finite or non-positive dimensions are ignored.
	pub fn resize(&mut self, width: f64, height: f64) {
		if self.size == (width, height) || !simulation::valid_size(width, height) {
			return;
		}
		self.size = (width, height);
		if let Some(state) = &mut self.state {
			state.resize(width, height);
			state.simulation.reheat(0.3);
		}
	}

	/// Hit-test the pointer and move between idle and hovering.
	pub fn pointer_move(&mut self, x: f64, y: f64) -> Cursor {
		let Some(state) = &mut self.state else {
			return Cursor::Default;
		};
		let hit = state.node_at_position(x, y, &self.config.interaction);
		if hit != state.hovered() {
			debug!(
				"cortex-graph: hover {:?}",
				hit.map(|idx| state.nodes()[idx].id.as_str())
			);
		}
		state.set_hover(hit);
		if hit.is_some() {
			Cursor::Pointer
		} else {
			Cursor::Default
		}
	}

	/// The pointer left the canvas.
	pub fn pointer_leave(&mut self) {
		if let Some(state) = &mut self.state {
			state.set_hover(None);
		}
	}

	/// Emit a selection for the hovered node, if any. Returns its id.
	pub fn click(&mut self) -> Option<String> {
		let state = self.state.as_ref()?;
		let idx = state.hovered()?;
		let id = state.nodes()[idx].id.clone();
		info!("cortex-graph: selected '{}'", id);
		if let Some(handler) = &mut self.on_select {
			handler(&id);
		}
		Some(id)
	}

	/// Advance the simulation by the time since the previous frame, then draw.
	pub fn frame<S: Surface + ?Sized>(&mut self, now_ms: f64, surface: &mut S) {
		let elapsed = self.last_frame.map_or(0.0, |last| now_ms - last);
		self.last_frame = Some(now_ms);

		match &mut self.state {
			Some(state) => {
				state.advance(elapsed);
				render::render(state, surface, self.size, &self.config.animation, &self.theme);
			}
			None => surface.clear(self.size.0, self.size.1),
		}
	}
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;
	use std::rc::Rc;

	use super::*;
	use crate::components::force_graph::surface::recording::RecordingSurface;
	use crate::components::force_graph::types::{ConceptLink, ConceptNode};

	fn pair() -> GraphData {
		GraphData {
			nodes: vec![ConceptNode::new("A", 20.0), ConceptNode::new("B", 10.0)],
			links: vec![ConceptLink::new("A", "B")],
		}
	}

	fn run_frames(controller: &mut Controller, frames: usize) -> RecordingSurface {
		let mut surface = RecordingSurface::default();
		for i in 0..frames {
			surface.ops.clear();
			controller.frame(i as f64 * 1000.0 / 60.0, &mut surface);
		}
		surface
	}

	#[test]
	fn settle_hover_click_scenario() {
		let selected = Rc::new(RefCell::new(Vec::new()));
		let mut controller = Controller::new(GraphConfig::default(), 800.0, 600.0);
		let sink = selected.clone();
		controller.on_select(move |id| sink.borrow_mut().push(id.to_string()));
		controller.start(&pair()).unwrap();

		run_frames(&mut controller, 400);
		let state = controller.state().unwrap();
		assert!(state.simulation.ticks() > 300);
		let (ax, ay) = state.nodes()[0].position().unwrap();

		assert_eq!(controller.pointer_move(ax, ay), Cursor::Pointer);
		assert_eq!(controller.interaction(), Interaction::Hovering(0));

		let state = controller.state().unwrap();
		assert_eq!(
			state.node_state(1),
			crate::components::force_graph::state::NodeState::Neighbor
		);
		assert!(state.is_link_emphasized(0));

		let surface = run_frames(&mut controller, 1);
		assert_eq!(surface.segment_widths(), vec![Theme::default().link.emphasized.width]);

		assert_eq!(controller.click(), Some("A".to_string()));
		assert_eq!(*selected.borrow(), vec!["A".to_string()]);
	}

	#[test]
	fn idle_click_is_a_noop() {
		let selected = Rc::new(RefCell::new(0));
		let mut controller = Controller::new(GraphConfig::default(), 800.0, 600.0);
		let sink = selected.clone();
		controller.on_select(move |_| *sink.borrow_mut() += 1);
		controller.start(&pair()).unwrap();

		assert_eq!(controller.pointer_move(-1000.0, -1000.0), Cursor::Default);
		assert_eq!(controller.click(), None);
		assert_eq!(*selected.borrow(), 0);
	}

	#[test]
	fn pointer_leave_returns_to_idle() {
		let mut controller = Controller::new(GraphConfig::default(), 800.0, 600.0);
		controller.start(&pair()).unwrap();
		let (ax, ay) = controller.state().unwrap().nodes()[0].position().unwrap();

		controller.pointer_move(ax, ay);
		assert_ne!(controller.interaction(), Interaction::Idle);
		controller.pointer_leave();
		assert_eq!(controller.interaction(), Interaction::Idle);
	}

	#[test]
	fn unknown_link_fails_and_nothing_runs() {
		let mut controller = Controller::new(GraphConfig::default(), 800.0, 600.0);
		controller.start(&pair()).unwrap();

		let mut data = pair();
		data.links.push(ConceptLink::new("A", "ghost"));
		assert!(matches!(
			controller.start(&data),
			Err(BindError::UnknownNode { .. })
		));
		assert!(!controller.is_running());
		assert!(controller.state().is_none());

		let surface = run_frames(&mut controller, 2);
		assert_eq!(surface.ops.len(), 1);
	}

	#[test]
	fn restart_rebuilds_and_resets_hover() {
		let mut controller = Controller::new(GraphConfig::default(), 800.0, 600.0);
		let data = pair();
		controller.start(&data).unwrap();
		run_frames(&mut controller, 30);
		let (ax, ay) = controller.state().unwrap().nodes()[0].position().unwrap();
		controller.pointer_move(ax, ay);

		controller.start(&data).unwrap();
		let state = controller.state().unwrap();
		assert_eq!(state.simulation.ticks(), 0);
		assert_eq!(controller.interaction(), Interaction::Idle);
		assert_eq!(data, pair());
	}

	#[test]
	fn stop_freezes_layout() {
		let mut controller = Controller::new(GraphConfig::default(), 800.0, 600.0);
		controller.start(&pair()).unwrap();
		run_frames(&mut controller, 10);
		controller.stop();
		assert!(!controller.is_running());

		let before = controller.state().unwrap().simulation.ticks();
		let mut surface = RecordingSurface::default();
		controller.frame(10_000.0, &mut surface);
		controller.frame(20_000.0, &mut surface);
		assert_eq!(controller.state().unwrap().simulation.ticks(), before);
	}

	#[test]
	fn resize_recenters_layout() {
		let mut controller = Controller::new(GraphConfig::default(), 800.0, 600.0);
		controller.start(&pair()).unwrap();
		controller.resize(400.0, 200.0);
		run_frames(&mut controller, 200);

		let nodes = controller.state().unwrap().nodes();
		let cx = (nodes[0].x + nodes[1].x) / 2.0;
		let cy = (nodes[0].y + nodes[1].y) / 2.0;
		assert!((cx - 200.0).abs() < 5.0 && (cy - 100.0).abs() < 5.0);
	}

	#[test]
	fn container_growth_recenters_without_rebuild() {
		let mut controller = Controller::new(GraphConfig::default(), 800.0, 600.0);
		controller.start(&pair()).unwrap();
		run_frames(&mut controller, 100);
		let ticks = controller.state().unwrap().simulation.ticks();

		controller.resize(1200.0, 900.0);
		let mut surface = RecordingSurface::default();
		for i in 0..200 {
			controller.frame(10_000.0 + i as f64 * 1000.0 / 60.0, &mut surface);
		}

		let state = controller.state().unwrap();
		assert!(state.simulation.ticks() > ticks);
		assert_eq!(controller.size(), (1200.0, 900.0));
		let nodes = state.nodes();
		let cx = (nodes[0].x + nodes[1].x) / 2.0;
		let cy = (nodes[0].y + nodes[1].y) / 2.0;
		assert!((cx - 600.0).abs() < 5.0 && (cy - 450.0).abs() < 5.0);
	}

	#[test]
	fn invalid_resize_keeps_layout_moving() {
		let mut controller = Controller::new(GraphConfig::default(), 800.0, 600.0);
		controller.start(&pair()).unwrap();
		controller.resize(f64::NAN, 600.0);
		controller.resize(-10.0, 0.0);
		assert_eq!(controller.size(), (800.0, 600.0));

		let before = controller.state().unwrap().nodes()[0].position();
		run_frames(&mut controller, 50);
		let after = controller.state().unwrap().nodes()[0].position();
		assert!(after.is_some());
		assert_ne!(before, after);
	}
}
