//! Canvas sizing and 2D context acquisition.
//!
//! The backing store is sized in device pixels while all drawing happens in
//! CSS pixels through a `setTransform` scale.

use std::fmt;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use super::state::Viewport;

/// Reasons the drawing surface could not be set up.
#[derive(Debug)]
pub enum SurfaceError {
	/// No global `window` (not running in a browser).
	NoWindow,
	/// The canvas refused to hand out a 2D context.
	NoContext,
	/// A DOM call threw.
	Js(String),
}

impl fmt::Display for SurfaceError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			SurfaceError::NoWindow => write!(f, "no browser window available"),
			SurfaceError::NoContext => write!(f, "canvas has no 2d rendering context"),
			SurfaceError::Js(msg) => write!(f, "DOM call failed: {}", msg),
		}
	}
}

impl std::error::Error for SurfaceError {}

impl From<JsValue> for SurfaceError {
	fn from(value: JsValue) -> Self {
		SurfaceError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
	}
}

/// A canvas plus its 2D context, kept in sync with the window size.
pub struct Surface {
	pub canvas: HtmlCanvasElement,
	pub ctx: CanvasRenderingContext2d,
	pub viewport: Viewport,
	max_pixel_ratio: f64,
}

impl Surface {
	/// Acquire the 2D context and size the canvas to the window.
	pub fn attach(canvas: HtmlCanvasElement, max_pixel_ratio: f64) -> Result<Self, SurfaceError> {
		let window = web_sys::window().ok_or(SurfaceError::NoWindow)?;
		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")?
			.ok_or(SurfaceError::NoContext)?
			.dyn_into()
			.map_err(|_| SurfaceError::NoContext)?;

		let mut surface = Self {
			canvas,
			ctx,
			viewport: measure(&window, max_pixel_ratio)?,
			max_pixel_ratio,
		};
		surface.apply()?;
		Ok(surface)
	}

	/// Re-measure the window and resize the backing store.
	pub fn resize(&mut self) -> Result<Viewport, SurfaceError> {
		let window = web_sys::window().ok_or(SurfaceError::NoWindow)?;
		self.viewport = measure(&window, self.max_pixel_ratio)?;
		self.apply()?;
		Ok(self.viewport)
	}

	fn apply(&mut self) -> Result<(), SurfaceError> {
		let Viewport {
			width,
			height,
			pixel_ratio,
		} = self.viewport;

		self.canvas.set_width((width * pixel_ratio).round() as u32);
		self.canvas.set_height((height * pixel_ratio).round() as u32);
		let style = self.canvas.style();
		style.set_property("width", &format!("{}px", width))?;
		style.set_property("height", &format!("{}px", height))?;

		// Resizing the backing store resets the transform.
		self.ctx
			.set_transform(pixel_ratio, 0.0, 0.0, pixel_ratio, 0.0, 0.0)?;
		Ok(())
	}
}

fn measure(window: &Window, max_pixel_ratio: f64) -> Result<Viewport, SurfaceError> {
	let width = window.inner_width()?.as_f64().unwrap_or(0.0);
	let height = window.inner_height()?.as_f64().unwrap_or(0.0);
	let pixel_ratio = window.device_pixel_ratio().clamp(1.0, max_pixel_ratio.max(1.0));
	Ok(Viewport {
		width,
		height,
		pixel_ratio,
	})
}

/// Whether the user asked the OS for reduced motion.
pub fn prefers_reduced_motion(window: &Window) -> bool {
	window
		.match_media("(prefers-reduced-motion: reduce)")
		.ok()
		.flatten()
		.is_some_and(|query| query.matches())
}
