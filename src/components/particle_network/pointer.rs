//! Shared pointer record fed by mouse and touch listeners.

use super::state::Viewport;

/// How long after a touch event mouse events are treated as browser
/// compatibility echoes of that touch and ignored.
pub const TOUCH_MOUSE_SUPPRESS_MS: f64 = 800.0;

/// Which kind of device produced an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Source {
	Mouse,
	Touch,
}

/// Latest pointer position and motion, in CSS pixels.
///
/// Written by the event listeners between frames and read by the update step.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointerState {
	pub x: f64,
	pub y: f64,
	/// Movement since the previous event.
	pub vx: f64,
	pub vy: f64,
	pub active: bool,
	pub pressed: bool,
	/// Event timestamp of the latest touch, in milliseconds.
	last_touch_ms: Option<f64>,
}

impl PointerState {
	/// Whether an event from `source` at `time_ms` should be applied.
	///
	/// Touch events always pass and open the suppression window. Mouse events
	/// inside that window are the ones browsers synthesise after a tap
	/// (`mousemove`, `mousedown`, `mouseup`) and are rejected.
	pub fn accepts(&mut self, source: Source, time_ms: f64) -> bool {
		match source {
			Source::Touch => {
				self.last_touch_ms = Some(time_ms);
				true
			}
			Source::Mouse => self
				.last_touch_ms
				.is_none_or(|t| time_ms - t >= TOUCH_MOUSE_SUPPRESS_MS),
		}
	}

	/// Record a move. Velocity is the delta from the last recorded position,
	/// or zero when the pointer was not being tracked.
	pub fn move_to(&mut self, x: f64, y: f64) {
		if self.active {
			self.vx = x - self.x;
			self.vy = y - self.y;
		} else {
			self.vx = 0.0;
			self.vy = 0.0;
		}
		self.x = x;
		self.y = y;
		self.active = true;
	}

	/// Pointer left the page.
	pub fn leave(&mut self) {
		self.active = false;
		self.pressed = false;
		self.vx = 0.0;
		self.vy = 0.0;
	}

	/// Mouse down or tap start at `(x, y)`.
	pub fn press(&mut self, x: f64, y: f64) {
		self.move_to(x, y);
		self.pressed = true;
	}

	/// Mouse up or tap end. Touch pointers also stop being tracked.
	pub fn release(&mut self, touch: bool) {
		self.pressed = false;
		if touch {
			self.leave();
		}
	}

	pub fn position(&self) -> Option<(f64, f64)> {
		self.active.then_some((self.x, self.y))
	}

	/// Position mapped to `[-1, 1]` on both axes; centre when inactive.
	pub fn normalized(&self, viewport: &Viewport) -> (f64, f64) {
		if !self.active || viewport.width <= 0.0 || viewport.height <= 0.0 {
			return (0.0, 0.0);
		}
		(
			((self.x / viewport.width - 0.5) * 2.0).clamp(-1.0, 1.0),
			((self.y / viewport.height - 0.5) * 2.0).clamp(-1.0, 1.0),
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn first_move_has_no_velocity() {
		let mut pointer = PointerState::default();
		pointer.move_to(100.0, 50.0);
		assert!(pointer.active);
		assert_eq!((pointer.vx, pointer.vy), (0.0, 0.0));
	}

	#[test]
	fn velocity_is_delta_from_previous_move() {
		let mut pointer = PointerState::default();
		pointer.move_to(100.0, 50.0);
		pointer.move_to(110.0, 45.0);
		assert_eq!((pointer.vx, pointer.vy), (10.0, -5.0));
		pointer.move_to(110.0, 45.0);
		assert_eq!((pointer.vx, pointer.vy), (0.0, 0.0));
	}

	#[test]
	fn leave_resets_velocity_and_activity() {
		let mut pointer = PointerState::default();
		pointer.press(10.0, 10.0);
		pointer.move_to(30.0, 10.0);
		pointer.leave();
		assert!(!pointer.active);
		assert!(!pointer.pressed);
		assert_eq!((pointer.vx, pointer.vy), (0.0, 0.0));
		assert_eq!(pointer.position(), None);

		// re-entry starts from rest
		pointer.move_to(500.0, 500.0);
		assert_eq!((pointer.vx, pointer.vy), (0.0, 0.0));
	}

	#[test]
	fn touch_release_stops_tracking() {
		let mut pointer = PointerState::default();
		pointer.press(5.0, 5.0);
		pointer.release(false);
		assert!(pointer.active && !pointer.pressed);

		pointer.press(5.0, 5.0);
		pointer.release(true);
		assert!(!pointer.active && !pointer.pressed);
	}

	#[test]
	fn mouse_echo_after_tap_is_ignored() {
		let mut pointer = PointerState::default();

		// touchstart, touchend
		assert!(pointer.accepts(Source::Touch, 1_000.0));
		pointer.press(40.0, 40.0);
		assert!(pointer.accepts(Source::Touch, 1_080.0));
		pointer.release(true);

		// compatibility mousemove / mousedown / mouseup shortly after
		for t in [1_090.0, 1_095.0, 1_100.0] {
			if pointer.accepts(Source::Mouse, t) {
				pointer.press(40.0, 40.0);
			}
		}
		assert!(!pointer.active);
		assert!(!pointer.pressed);
		assert_eq!(pointer.position(), None);
	}

	#[test]
	fn mouse_resumes_after_touch_window() {
		let mut pointer = PointerState::default();
		assert!(pointer.accepts(Source::Mouse, 0.0));
		assert!(pointer.accepts(Source::Touch, 500.0));
		assert!(!pointer.accepts(Source::Mouse, 500.0 + TOUCH_MOUSE_SUPPRESS_MS - 1.0));
		assert!(pointer.accepts(Source::Mouse, 500.0 + TOUCH_MOUSE_SUPPRESS_MS));
	}

	#[test]
	fn normalized_maps_corners() {
		let viewport = Viewport {
			width: 200.0,
			height: 100.0,
			pixel_ratio: 1.0,
		};
		let mut pointer = PointerState::default();
		assert_eq!(pointer.normalized(&viewport), (0.0, 0.0));
		pointer.move_to(0.0, 100.0);
		assert_eq!(pointer.normalized(&viewport), (-1.0, 1.0));
		pointer.move_to(100.0, 50.0);
		assert_eq!(pointer.normalized(&viewport), (0.0, 0.0));
	}
}
