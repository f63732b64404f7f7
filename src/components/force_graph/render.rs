//! Frame rendering for the concept graph.
//!
//! Draws the simulation's current state in two passes over a cleared canvas:
//! 1. Links, emphasized when exactly one endpoint is hovered
//! 2. Nodes with their labels, styled by [`NodeState`]
//!
//! Elements without a defined position are skipped.

use super::config::AnimationConfig;
use super::state::{ForceGraphState, NodeState};
use super::surface::Surface;
use super::theme::{NodeLook, Theme};

/// Renders one frame of the graph.
pub fn render<S: Surface + ?Sized>(
	state: &ForceGraphState,
	surface: &mut S,
	size: (f64, f64),
	animation: &AnimationConfig,
	theme: &Theme,
) {
	surface.clear(size.0, size.1);
	draw_links(state, surface, theme);
	draw_nodes(state, surface, animation, theme);
}

fn draw_links<S: Surface + ?Sized>(state: &ForceGraphState, surface: &mut S, theme: &Theme) {
	let nodes = state.nodes();

	for (idx, link) in state.graph().links.iter().enumerate() {
		let (Some((x1, y1)), Some((x2, y2))) = (
			nodes[link.source].position(),
			nodes[link.target].position(),
		) else {
			continue;
		};

		let look = if state.is_link_emphasized(idx) {
			&theme.link.emphasized
		} else {
			&theme.link.default
		};

		surface.begin_path();
		surface.move_to(x1, y1);
		surface.line_to(x2, y2);
		surface.set_shadow(look.glow_blur, &look.glow.to_css());
		surface.stroke(&look.color.to_css(), look.width);
		surface.set_shadow(0.0, "transparent");
	}
}

fn draw_nodes<S: Surface + ?Sized>(
	state: &ForceGraphState,
	surface: &mut S,
	animation: &AnimationConfig,
	theme: &Theme,
) {
	for (idx, node) in state.nodes().iter().enumerate() {
		let Some((x, y)) = node.position() else {
			continue;
		};

		let node_state = state.node_state(idx);
		let hovered = node_state == NodeState::Hovered;
		let radius = state.node_radius(node, hovered, animation);
		let look = look_for(theme, node_state);

		surface.begin_path();
		surface.circle(x, y, radius);
		surface.set_shadow(look.glow_blur, &look.glow.to_css());
		surface.fill(&look.fill.to_css());
		if look.outline_width > 0.0 {
			surface.stroke(&look.outline.to_css(), look.outline_width);
		}
		surface.set_shadow(0.0, "transparent");

		let (font, color) = match node_state {
			NodeState::Hovered => (&theme.label.hovered_font, theme.label.highlighted),
			NodeState::Neighbor => (&theme.label.font, theme.label.highlighted),
			NodeState::Default => (&theme.label.font, theme.label.default),
		};
		surface.fill_text(
			&node.id,
			x,
			y + radius + animation.label_margin,
			font,
			&color.to_css(),
		);
	}
}

fn look_for(theme: &Theme, state: NodeState) -> &NodeLook {
	match state {
		NodeState::Hovered => &theme.node.hovered,
		NodeState::Neighbor => &theme.node.neighbor,
		NodeState::Default => &theme.node.default,
	}
}
