//! Visual theming for the concept graph.
//!
//! A theme fixes the colours and glows for the three node states (hovered,
//! neighbor of hovered, default), the two link states and the labels.

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Opacity in `[0, 1]`.
	pub a: f64,
}

impl Color {
	/// Opaque colour.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Colour with explicit opacity.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Same colour at a different opacity.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// CSS form: `#rrggbb` when opaque, `rgba(...)` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Fill and glow for one node state.
#[derive(Clone, Debug)]
pub struct NodeLook {
	/// Circle fill.
	pub fill: Color,
	/// Glow colour and blur radius. Zero blur disables the glow.
	pub glow: Color,
	/// Blur radius of [`NodeLook::glow`].
	pub glow_blur: f64,
	/// Outline colour and width. Zero width disables the outline.
	pub outline: Color,
	/// Stroke width of [`NodeLook::outline`].
	pub outline_width: f64,
}

/// Node visual style.
#[derive(Clone, Debug)]
pub struct NodeStyle {
	/// The node under the pointer.
	pub hovered: NodeLook,
	/// Nodes sharing a link with the hovered node.
	pub neighbor: NodeLook,
	/// Everything else.
	pub default: NodeLook,
}

/// Stroke for one link state.
#[derive(Clone, Debug)]
pub struct LinkLook {
	/// Stroke colour.
	pub color: Color,
	/// Stroke width.
	pub width: f64,
	/// Glow colour.
	pub glow: Color,
	/// Glow blur radius. Zero disables it.
	pub glow_blur: f64,
}

/// Link visual style.
#[derive(Clone, Debug)]
pub struct LinkStyle {
	/// Links touching the hovered node.
	pub emphasized: LinkLook,
	/// All other links.
	pub default: LinkLook,
}

/// Label text style.
#[derive(Clone, Debug)]
pub struct LabelStyle {
	/// Colour for hovered and neighbor labels.
	pub highlighted: Color,
	/// Colour for all other labels.
	pub default: Color,
	/// CSS font of the hovered node's label.
	pub hovered_font: String,
	/// CSS font of all other labels.
	pub font: String,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	/// Preset name, as selected from config.
	pub name: &'static str,
	/// Node styles.
	pub node: NodeStyle,
	/// Link styles.
	pub link: LinkStyle,
	/// Label styles.
	pub label: LabelStyle,
}

const CYAN: Color = Color::rgb(6, 182, 212);
const PURPLE: Color = Color::rgb(168, 85, 247);
const SLATE: Color = Color::rgb(30, 41, 59);

impl Theme {
	/// Dark neon look: cyan hover, purple neighbors, slate nodes (default)
	pub fn cortex() -> Self {
		let no_outline = Color::rgba(0, 0, 0, 0.0);
		Self {
			name: "cortex",
			node: NodeStyle {
				hovered: NodeLook {
					fill: CYAN,
					glow: CYAN,
					glow_blur: 30.0,
					outline: no_outline,
					outline_width: 0.0,
				},
				neighbor: NodeLook {
					fill: PURPLE,
					glow: PURPLE,
					glow_blur: 15.0,
					outline: no_outline,
					outline_width: 0.0,
				},
				default: NodeLook {
					fill: SLATE,
					glow: CYAN.with_alpha(0.3),
					glow_blur: 10.0,
					outline: CYAN,
					outline_width: 1.5,
				},
			},
			link: LinkStyle {
				emphasized: LinkLook {
					color: CYAN.with_alpha(0.8),
					width: 3.0,
					glow: CYAN,
					glow_blur: 10.0,
				},
				default: LinkLook {
					color: Color::rgba(255, 255, 255, 0.1),
					width: 1.0,
					glow: Color::rgba(0, 0, 0, 0.0),
					glow_blur: 0.0,
				},
			},
			label: LabelStyle {
				highlighted: Color::rgb(255, 255, 255),
				default: Color::rgba(255, 255, 255, 0.6),
				hovered_font: "bold 14px Roboto Mono".to_string(),
				font: "12px Roboto Mono".to_string(),
			},
		}
	}

	/// Flat, glow-free variant for low-power devices
	pub fn minimal() -> Self {
		let none = Color::rgba(0, 0, 0, 0.0);
		let flat = |fill: Color| NodeLook {
			fill,
			glow: none,
			glow_blur: 0.0,
			outline: none,
			outline_width: 0.0,
		};
		Self {
			name: "minimal",
			node: NodeStyle {
				hovered: flat(Color::rgb(94, 129, 172)),
				neighbor: flat(Color::rgb(129, 161, 193)),
				default: NodeLook {
					outline: Color::rgba(140, 160, 180, 0.5),
					outline_width: 1.0,
					..flat(Color::rgb(25, 28, 35))
				},
			},
			link: LinkStyle {
				emphasized: LinkLook {
					color: Color::rgba(140, 160, 180, 0.9),
					width: 2.0,
					glow: none,
					glow_blur: 0.0,
				},
				default: LinkLook {
					color: Color::rgba(130, 145, 165, 0.3),
					width: 1.0,
					glow: none,
					glow_blur: 0.0,
				},
			},
			label: LabelStyle {
				highlighted: Color::rgb(235, 235, 235),
				default: Color::rgba(235, 235, 235, 0.6),
				hovered_font: "bold 13px sans-serif".to_string(),
				font: "11px sans-serif".to_string(),
			},
		}
	}

	/// Look up a preset by name.
	pub fn by_name(name: &str) -> Option<Self> {
		match name {
			"cortex" => Some(Self::cortex()),
			"minimal" => Some(Self::minimal()),
			_ => None,
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::cortex()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn css_output() {
		assert_eq!(CYAN.to_css(), "#06b6d4");
		assert_eq!(CYAN.with_alpha(0.8).to_css(), "rgba(6, 182, 212, 0.8)");
	}
}
