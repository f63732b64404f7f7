//! Leptos component wrapping the concept graph canvas.
//!
//! The component creates an HTML canvas, forwards pointer events to the
//! [`Controller`] and drives it from a `requestAnimationFrame` loop. The loop
//! and the resize listener live in guards returned from the mount effect, so
//! re-running the effect (new snapshot) or unmounting drops them and cancels
//! the pending frame before anything new starts.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, MouseEvent, Window};

use super::config::GraphConfig;
use super::controller::{Controller, Cursor};
use super::types::GraphData;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// A running `requestAnimationFrame` loop. Dropping it cancels the pending frame.
struct FrameLoop {
	handle: Rc<Cell<Option<i32>>>,
	callback: FrameCallback,
}

impl FrameLoop {
	fn start(controller: Rc<RefCell<Controller>>, mut ctx: CanvasRenderingContext2d) -> Self {
		let handle = Rc::new(Cell::new(None));
		let callback: FrameCallback = Rc::new(RefCell::new(None));
		let (handle_inner, callback_inner) = (handle.clone(), callback.clone());

		*callback.borrow_mut() = Some(Closure::new(move |now: f64| {
			controller.borrow_mut().frame(now, &mut ctx);
			handle_inner.set(None);
			if let (Some(window), Some(cb)) = (web_sys::window(), callback_inner.borrow().as_ref()) {
				handle_inner.set(window.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
			}
		}));

		if let (Some(window), Some(cb)) = (web_sys::window(), callback.borrow().as_ref()) {
			handle.set(window.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
		}
		Self { handle, callback }
	}
}

impl Drop for FrameLoop {
	fn drop(&mut self) {
		if let (Some(window), Some(id)) = (web_sys::window(), self.handle.take()) {
			let _ = window.cancel_animation_frame(id);
		}
		// Releases the closure, which also breaks its reference to `callback`.
		self.callback.borrow_mut().take();
		debug!("cortex-graph: frame loop cancelled");
	}
}

/// Window resize subscription. Dropping it removes the listener.
struct ResizeListener {
	callback: Closure<dyn FnMut()>,
}

impl ResizeListener {
	fn attach(
		window: &Window,
		canvas: HtmlCanvasElement,
		sizing: Sizing,
		controller: Rc<RefCell<Controller>>,
	) -> Self {
		let callback = Closure::<dyn FnMut()>::new(move || {
			apply_size(&canvas, &controller, sizing.measure(&canvas));
		});
		let _ = window.add_event_listener_with_callback("resize", callback.as_ref().unchecked_ref());
		Self { callback }
	}
}

impl Drop for ResizeListener {
	fn drop(&mut self) {
		if let Some(window) = web_sys::window() {
			let _ = window.remove_event_listener_with_callback(
				"resize",
				self.callback.as_ref().unchecked_ref(),
			);
		}
	}
}

/// Everything alive while a snapshot is mounted on the canvas.
struct Mounted {
	_frame_loop: FrameLoop,
	_resize: ResizeListener,
}

const FALLBACK_SIZE: (f64, f64) = (800.0, 600.0);

/// Where the canvas takes its dimensions from.
#[derive(Clone, Copy)]
struct Sizing {
	fullscreen: bool,
	width: MaybeProp<f64>,
	height: MaybeProp<f64>,
}

impl Sizing {
	/// Current canvas size. Reads the props without tracking them.
	fn measure(&self, canvas: &HtmlCanvasElement) -> (f64, f64) {
		let parent = canvas
			.parent_element()
			.map(|p| (p.client_width() as f64, p.client_height() as f64));
		resolve_size(
			self.fullscreen,
			(
				self.width.try_get_untracked().flatten(),
				self.height.try_get_untracked().flatten(),
			),
			web_sys::window().and_then(|w| viewport_size(&w)),
			parent,
		)
	}
}

/// The viewport in fullscreen mode. Otherwise explicit dimensions, falling
/// back to the parent element per axis.
fn resolve_size(
	fullscreen: bool,
	explicit: (Option<f64>, Option<f64>),
	viewport: Option<(f64, f64)>,
	parent: Option<(f64, f64)>,
) -> (f64, f64) {
	if fullscreen {
		return viewport.unwrap_or(FALLBACK_SIZE);
	}
	let (pw, ph) = parent.unwrap_or(FALLBACK_SIZE);
	(explicit.0.unwrap_or(pw), explicit.1.unwrap_or(ph))
}

fn apply_size(canvas: &HtmlCanvasElement, controller: &RefCell<Controller>, (w, h): (f64, f64)) {
	canvas.set_width(w as u32);
	canvas.set_height(h as u32);
	controller.borrow_mut().resize(w, h);
}

fn set_cursor(canvas: &HtmlCanvasElement, css: &str) {
	// `HtmlElement::style`, not the tachys `ElementExt::style` setter.
	let _ = HtmlElement::style(canvas).set_property("cursor", css);
}

fn viewport_size(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

fn pointer_position(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

/// Renders the concept graph on a canvas element.
///
/// Pass the snapshot via the reactive `data` signal; a new snapshot tears down
/// the running simulation and starts over. `on_select` receives the id of a
/// clicked node. The canvas sizes itself to its parent unless `fullscreen` is
/// set or explicit `width`/`height` are given. Size changes, from the window or
/// from the reactive `width`/`height`, re-centre the layout without rebuilding it.
#[component]
pub fn CortexGraph(
	#[prop(into)] data: Signal<GraphData>,
	#[prop(default = GraphConfig::default())] config: GraphConfig,
	#[prop(optional)] on_select: Option<Callback<String>>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(optional, into)] width: MaybeProp<f64>,
	#[prop(optional, into)] height: MaybeProp<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let error = RwSignal::new(None::<String>);
	let controller = Rc::new(RefCell::new(Controller::new(
		config,
		FALLBACK_SIZE.0,
		FALLBACK_SIZE.1,
	)));
	if let Some(cb) = on_select {
		controller
			.borrow_mut()
			.on_select(move |id| cb.run(id.to_string()));
	}
	let controller_init = controller.clone();
	let sizing = Sizing {
		fullscreen,
		width,
		height,
	};

	Effect::new(move |previous: Option<Option<Mounted>>| {
		// Stop the old loop before a new simulation exists.
		drop(previous);

		let snapshot = data.get();
		let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
		let window = web_sys::window()?;

		let (w, h) = sizing.measure(&canvas);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = match canvas.get_context("2d") {
			Ok(Some(ctx)) => ctx.dyn_into().ok()?,
			_ => {
				warn!("cortex-graph: canvas has no 2d context");
				return None;
			}
		};

		{
			let mut controller = controller_init.borrow_mut();
			controller.resize(w, h);
			match controller.start(&snapshot) {
				Ok(()) => error.set(None),
				Err(e) => error.set(Some(e.to_string())),
			}
		}

		Some(Mounted {
			_frame_loop: FrameLoop::start(controller_init.clone(), ctx),
			_resize: ResizeListener::attach(&window, canvas, sizing, controller_init.clone()),
		})
	});

	// Host-driven size changes move the centering target only.
	let controller_size = controller.clone();
	Effect::new(move |_| {
		let _ = (width.get(), height.get());
		let Some(canvas) = canvas_ref.get_untracked() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		apply_size(&canvas, &controller_size, sizing.measure(&canvas));
	});

	let controller_mm = controller.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (x, y) = pointer_position(&canvas, &ev);
		let cursor = controller_mm.borrow_mut().pointer_move(x, y);
		set_cursor(&canvas, cursor.css());
	};

	let controller_ml = controller.clone();
	let on_mouseleave = move |_: MouseEvent| {
		controller_ml.borrow_mut().pointer_leave();
		if let Some(canvas) = canvas_ref.get() {
			let canvas: HtmlCanvasElement = canvas.into();
			set_cursor(&canvas, Cursor::Default.css());
		}
	};

	let controller_click = controller;
	let on_click = move |_: MouseEvent| {
		controller_click.borrow_mut().click();
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="cortex-graph-canvas"
			on:mousemove=on_mousemove
			on:mouseleave=on_mouseleave
			on:click=on_click
			style="display: block; cursor: default;"
		/>
		{move || error.get().map(|message| view! {
			<div class="graph-error">{message}</div>
		})}
	}
}
