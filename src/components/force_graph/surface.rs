//! Drawing surface abstraction.
//!
//! The renderer only needs a handful of 2D canvas calls. Routing them through
//! [`Surface`] keeps the drawing code independent of `web-sys`, so frames can
//! be rendered into a recorder under test.

use web_sys::CanvasRenderingContext2d;

/// The subset of a 2D canvas used by the renderer.
pub trait Surface {
	/// Clear the rectangle `(0, 0, width, height)` to transparent.
	fn clear(&mut self, width: f64, height: f64);
	/// Start a new path.
	fn begin_path(&mut self);
	/// Move the pen without drawing.
	fn move_to(&mut self, x: f64, y: f64);
	/// Add a straight segment to the current path.
	fn line_to(&mut self, x: f64, y: f64);
	/// Add a full circle to the current path.
	fn circle(&mut self, x: f64, y: f64, radius: f64);
	/// Fill the current path with a CSS colour.
	fn fill(&mut self, css: &str);
	/// Stroke the current path with a CSS colour and line width.
	fn stroke(&mut self, css: &str, width: f64);
	/// Glow applied to subsequent fills and strokes. Zero blur disables it.
	fn set_shadow(&mut self, blur: f64, css: &str);
	/// Draw text centred horizontally and vertically on `(x, y)`.
	fn fill_text(&mut self, text: &str, x: f64, y: f64, font: &str, css: &str);
}

impl Surface for CanvasRenderingContext2d {
	fn clear(&mut self, width: f64, height: f64) {
		self.clear_rect(0.0, 0.0, width, height);
	}

	fn begin_path(&mut self) {
		CanvasRenderingContext2d::begin_path(self);
	}

	fn move_to(&mut self, x: f64, y: f64) {
		CanvasRenderingContext2d::move_to(self, x, y);
	}

	fn line_to(&mut self, x: f64, y: f64) {
		CanvasRenderingContext2d::line_to(self, x, y);
	}

	fn circle(&mut self, x: f64, y: f64, radius: f64) {
		let _ = self.arc(x, y, radius, 0.0, std::f64::consts::TAU);
	}

	fn fill(&mut self, css: &str) {
		self.set_fill_style_str(css);
		CanvasRenderingContext2d::fill(self);
	}

	fn stroke(&mut self, css: &str, width: f64) {
		self.set_stroke_style_str(css);
		self.set_line_width(width);
		CanvasRenderingContext2d::stroke(self);
	}

	fn set_shadow(&mut self, blur: f64, css: &str) {
		self.set_shadow_blur(blur);
		self.set_shadow_color(css);
	}

	fn fill_text(&mut self, text: &str, x: f64, y: f64, font: &str, css: &str) {
		self.set_font(font);
		self.set_text_align("center");
		self.set_text_baseline("middle");
		self.set_fill_style_str(css);
		let _ = CanvasRenderingContext2d::fill_text(self, text, x, y);
	}
}
