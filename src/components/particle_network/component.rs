//! Leptos component wrapping the particle network canvas.
//!
//! The component creates a fixed, full-viewport canvas behind the page and
//! wires window-level listeners for pointer, touch, resize and visibility. An
//! animation loop runs via `requestAnimationFrame`, pacing itself through the
//! [`FrameScheduler`] and stopping while the tab is hidden.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, error, info, warn};
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget, HtmlCanvasElement, MouseEvent, TouchEvent, Window};

use super::config::NetworkConfig;
use super::pointer::Source;
use super::render;
use super::scheduler::FrameScheduler;
use super::state::NetworkState;
use super::surface::{Surface, prefers_reduced_motion};
use super::theme::Theme;

/// Bundles simulation state with the surface it draws on and its frame pacing.
struct NetworkContext {
	state: NetworkState,
	surface: Surface,
	scheduler: FrameScheduler,
}

type SharedContext = Rc<RefCell<Option<NetworkContext>>>;

/// The re-arming frame callback and the id of its pending request.
#[derive(Clone, Default)]
struct FrameLoop {
	callback: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>,
	pending: Rc<Cell<Option<i32>>>,
}

impl FrameLoop {
	fn request(&self) {
		if self.pending.get().is_some() {
			return;
		}
		let Some(window) = web_sys::window() else {
			return;
		};
		if let Some(ref cb) = *self.callback.borrow() {
			match window.request_animation_frame(cb.as_ref().unchecked_ref()) {
				Ok(id) => self.pending.set(Some(id)),
				Err(e) => warn!("particle-network: requestAnimationFrame failed: {:?}", e),
			}
		}
	}

	fn cancel(&self) {
		if let (Some(id), Some(window)) = (self.pending.take(), web_sys::window()) {
			let _ = window.cancel_animation_frame(id);
		}
	}
}

/// Attach `handler` to `event` on `target` for the lifetime of the page.
fn listen<E>(target: &EventTarget, event: &str, handler: impl FnMut(E) + 'static)
where
	E: FromWasmAbi + 'static,
{
	let closure = Closure::<dyn FnMut(E)>::new(handler);
	if let Err(e) =
		target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
	{
		warn!("particle-network: could not listen for '{}': {:?}", event, e);
	}
	closure.forget();
}

/// Renders the animated particle network as a fixed background layer.
///
/// Configuration is read once on mount; the user's reduced-motion preference
/// is applied on top of it.
#[component]
pub fn ParticleNetworkCanvas(#[prop(into)] config: Signal<NetworkConfig>) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: SharedContext = Rc::new(RefCell::new(None));
	let frames = FrameLoop::default();

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if context.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			error!("particle-network: no window, not starting");
			return;
		};

		let config = config
			.get_untracked()
			.with_reduced_motion(prefers_reduced_motion(&window));
		let surface = match Surface::attach(canvas, config.max_pixel_ratio) {
			Ok(surface) => surface,
			Err(e) => {
				error!("particle-network: not starting: {}", e);
				return;
			}
		};

		let theme = Theme::by_name(config.theme_name());
		let scheduler = FrameScheduler::new(config.fps_cap);
		let seed = js_sys::Date::now() as u64;
		let state = NetworkState::new(config.clone(), theme, surface.viewport, seed);
		info!(
			"particle-network: {:?} with {} points on {}x{} @{}x",
			config.variant,
			state.point_count(),
			surface.viewport.width,
			surface.viewport.height,
			surface.viewport.pixel_ratio
		);

		*context.borrow_mut() = Some(NetworkContext {
			state,
			surface,
			scheduler,
		});

		install_pointer_listeners(&window, &context);
		install_resize_listener(&window, &context, config.resize_debounce_ms);
		install_visibility_listener(&window, &context, &frames);

		let (context_anim, frames_anim) = (context.clone(), frames.clone());
		*frames.callback.borrow_mut() = Some(Closure::new(move |now: f64| {
			frames_anim.pending.set(None);
			let mut rearm = false;
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				if let Some(dt) = c.scheduler.advance(now) {
					c.state.tick(now, dt);
					render::render(&c.state, &c.surface.ctx);
				}
				rearm = c.scheduler.is_running();
			}
			if rearm {
				frames_anim.request();
			}
		}));

		let hidden = window.document().is_some_and(|d| d.hidden());
		if let Some(ref mut c) = *context.borrow_mut() {
			if hidden {
				c.scheduler.pause();
			}
		}
		if !hidden {
			frames.request();
		}
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="particle-network-canvas"
			aria-hidden="true"
			style="position: fixed; top: 0; left: 0; z-index: -1; pointer-events: none; display: block;"
		/>
	}
}

fn install_pointer_listeners(window: &Window, context: &SharedContext) {
	let ctx = context.clone();
	listen(window, "mousemove", move |ev: MouseEvent| {
		if let Some(ref mut c) = *ctx.borrow_mut() {
			if c.state.pointer.accepts(Source::Mouse, ev.time_stamp()) {
				c.state
					.pointer
					.move_to(ev.client_x() as f64, ev.client_y() as f64);
			}
		}
	});

	let ctx = context.clone();
	listen(window, "mousedown", move |ev: MouseEvent| {
		if let Some(ref mut c) = *ctx.borrow_mut() {
			if c.state.pointer.accepts(Source::Mouse, ev.time_stamp()) {
				c.state.tap(ev.client_x() as f64, ev.client_y() as f64);
			}
		}
	});

	let ctx = context.clone();
	listen(window, "mouseup", move |ev: MouseEvent| {
		if let Some(ref mut c) = *ctx.borrow_mut() {
			if c.state.pointer.accepts(Source::Mouse, ev.time_stamp()) {
				c.state.pointer.release(false);
			}
		}
	});

	// `mouseout` with no related target means the pointer left the window.
	let ctx = context.clone();
	listen(window, "mouseout", move |ev: MouseEvent| {
		if ev.related_target().is_some() {
			return;
		}
		if let Some(ref mut c) = *ctx.borrow_mut() {
			c.state.pointer.leave();
		}
	});

	let ctx = context.clone();
	listen(window, "blur", move |_: Event| {
		if let Some(ref mut c) = *ctx.borrow_mut() {
			c.state.pointer.leave();
		}
	});

	let ctx = context.clone();
	listen(window, "touchstart", move |ev: TouchEvent| {
		let Some(touch) = ev.touches().get(0) else {
			return;
		};
		if let Some(ref mut c) = *ctx.borrow_mut() {
			c.state.pointer.accepts(Source::Touch, ev.time_stamp());
			c.state.tap(touch.client_x() as f64, touch.client_y() as f64);
		}
	});

	let ctx = context.clone();
	listen(window, "touchmove", move |ev: TouchEvent| {
		let Some(touch) = ev.touches().get(0) else {
			return;
		};
		if let Some(ref mut c) = *ctx.borrow_mut() {
			c.state.pointer.accepts(Source::Touch, ev.time_stamp());
			c.state
				.pointer
				.move_to(touch.client_x() as f64, touch.client_y() as f64);
		}
	});

	for name in ["touchend", "touchcancel"] {
		let ctx = context.clone();
		listen(window, name, move |ev: TouchEvent| {
			if let Some(ref mut c) = *ctx.borrow_mut() {
				c.state.pointer.accepts(Source::Touch, ev.time_stamp());
				if ev.touches().length() == 0 {
					c.state.pointer.release(true);
				}
			}
		});
	}
}

fn install_resize_listener(window: &Window, context: &SharedContext, debounce_ms: i32) {
	let pending: Rc<Cell<Option<i32>>> = Rc::default();

	let (ctx, pending_apply) = (context.clone(), pending.clone());
	let apply = Closure::<dyn FnMut()>::new(move || {
		pending_apply.set(None);
		if let Some(ref mut c) = *ctx.borrow_mut() {
			match c.surface.resize() {
				Ok(viewport) => {
					debug!(
						"particle-network: resized to {}x{} @{}x",
						viewport.width, viewport.height, viewport.pixel_ratio
					);
					c.state.resize(viewport);
				}
				Err(e) => warn!("particle-network: resize failed: {}", e),
			}
		}
	});

	listen(window, "resize", move |_: Event| {
		let Some(win) = web_sys::window() else {
			return;
		};
		if let Some(id) = pending.take() {
			win.clear_timeout_with_handle(id);
		}
		match win.set_timeout_with_callback_and_timeout_and_arguments_0(
			apply.as_ref().unchecked_ref(),
			debounce_ms.max(0),
		) {
			Ok(id) => pending.set(Some(id)),
			Err(e) => warn!("particle-network: could not schedule resize: {:?}", e),
		}
	});
}

fn install_visibility_listener(window: &Window, context: &SharedContext, frames: &FrameLoop) {
	let Some(document) = window.document() else {
		return;
	};
	let (ctx, frames, doc) = (context.clone(), frames.clone(), document.clone());

	listen(&document, "visibilitychange", move |_: Event| {
		let hidden = doc.hidden();
		let mut restart = false;
		if let Some(ref mut c) = *ctx.borrow_mut() {
			if hidden {
				c.scheduler.pause();
				debug!("particle-network: hidden, loop paused");
			} else if !c.scheduler.is_running() {
				c.scheduler.resume();
				restart = true;
				debug!("particle-network: visible, loop resumed");
			}
		}
		if hidden {
			frames.cancel();
		} else if restart {
			frames.request();
		}
	});
}
