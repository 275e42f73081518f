//! Frame pacing for the `requestAnimationFrame` loop.
//!
//! The browser calls back with a millisecond timestamp; the scheduler decides
//! whether that callback does work and how much simulated time it covers.

/// Nominal frame length in seconds (60 Hz).
pub const NOMINAL_DT: f64 = 1.0 / 60.0;

/// Upper bound on simulated time for any single frame.
pub const MAX_DT: f64 = 0.1;

/// Slack for display refresh jitter when enforcing the frame cap.
const CAP_TOLERANCE_MS: f64 = 1.0;

/// Tracks the render baseline, frame cap and visibility gate.
#[derive(Clone, Debug)]
pub struct FrameScheduler {
	min_interval_ms: f64,
	last_frame_ms: Option<f64>,
	running: bool,
}

impl FrameScheduler {
	/// `fps_cap` of `None` renders on every display refresh.
	pub fn new(fps_cap: Option<f64>) -> Self {
		let min_interval_ms = match fps_cap {
			Some(fps) if fps > 0.0 => 1000.0 / fps,
			_ => 0.0,
		};
		Self {
			min_interval_ms,
			last_frame_ms: None,
			running: true,
		}
	}

	/// Decide whether the frame at `now_ms` renders.
	///
	/// Returns the simulated delta in seconds, or `None` when paused or when the
	/// frame falls inside the cap interval. The first frame after start or resume
	/// covers one nominal frame only.
	pub fn advance(&mut self, now_ms: f64) -> Option<f64> {
		if !self.running {
			return None;
		}
		let Some(last) = self.last_frame_ms else {
			self.last_frame_ms = Some(now_ms);
			return Some(self.nominal_dt());
		};

		let elapsed = now_ms - last;
		if elapsed + CAP_TOLERANCE_MS < self.min_interval_ms {
			return None;
		}
		self.last_frame_ms = Some(now_ms);
		Some((elapsed / 1000.0).clamp(0.0, MAX_DT))
	}

	/// Stop rendering; the loop should not re-arm.
	pub fn pause(&mut self) {
		self.running = false;
	}

	/// Start again with a fresh baseline so hidden time is never simulated.
	pub fn resume(&mut self) {
		self.running = true;
		self.last_frame_ms = None;
	}

	pub fn is_running(&self) -> bool {
		self.running
	}

	fn nominal_dt(&self) -> f64 {
		NOMINAL_DT.max(self.min_interval_ms / 1000.0)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn first_frame_is_nominal() {
		let mut scheduler = FrameScheduler::new(None);
		assert_eq!(scheduler.advance(5_000.0), Some(NOMINAL_DT));
		let dt = scheduler.advance(5_016.0).unwrap();
		assert!((dt - 0.016).abs() < 1e-9);
	}

	#[test]
	fn cap_skips_early_frames() {
		let mut scheduler = FrameScheduler::new(Some(30.0));
		assert!(scheduler.advance(0.0).is_some());
		assert_eq!(scheduler.advance(16.7), None);
		let dt = scheduler.advance(33.4).unwrap();
		assert!((dt - 0.0334).abs() < 1e-9);
	}

	#[test]
	fn cap_tolerates_refresh_jitter() {
		let mut scheduler = FrameScheduler::new(Some(60.0));
		scheduler.advance(0.0);
		assert!(scheduler.advance(16.2).is_some());
	}

	#[test]
	fn long_gaps_are_clamped() {
		let mut scheduler = FrameScheduler::new(None);
		scheduler.advance(0.0);
		assert_eq!(scheduler.advance(2_000.0), Some(MAX_DT));
	}

	#[test]
	fn resume_does_not_catch_up() {
		let mut scheduler = FrameScheduler::new(Some(60.0));
		scheduler.advance(1_000.0);
		scheduler.advance(1_017.0);

		scheduler.pause();
		assert!(!scheduler.is_running());
		assert_eq!(scheduler.advance(1_034.0), None);

		scheduler.resume();
		let dt = scheduler.advance(61_000.0).unwrap();
		assert!(dt <= NOMINAL_DT + 1e-12, "resumed frame simulated {}s", dt);

		let dt = scheduler.advance(61_017.0).unwrap();
		assert!((dt - 0.017).abs() < 1e-9);
	}

	#[test]
	fn capped_nominal_frame_matches_interval() {
		let mut scheduler = FrameScheduler::new(Some(30.0));
		let dt = scheduler.advance(0.0).unwrap();
		assert!((dt - 1.0 / 30.0).abs() < 1e-12);
	}
}
