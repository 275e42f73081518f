//! Persistent points of the galaxy network and their per-frame physics.

use std::f64::consts::TAU;

use rand::Rng;

use super::config::NetworkConfig;
use super::links::Spatial;
use super::pointer::PointerState;
use super::state::Viewport;
use super::theme::PointStyle;

/// Distances below this are treated as coincident and produce no field force.
pub const FIELD_EPSILON: f64 = 1e-6;

/// Uniform sample in `[lo, hi)`; tolerates an empty range.
pub(super) fn uniform(rng: &mut impl Rng, lo: f64, hi: f64) -> f64 {
	lo + rng.random::<f64>() * (hi - lo)
}

/// A single moving point.
#[derive(Clone, Debug)]
pub struct Point {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	pub radius: f64,
	pub hue: f64,
	/// Hue change per frame; sign flips at the ends of the theme's hue range.
	pub hue_velocity: f64,
	pub alpha: f64,
	pub phase: f64, // For twinkling
	/// Timestamp (ms) before which this point cannot trigger effects again.
	pub cooldown_until: f64,
}

/// What happened to a point during one update.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepOutcome {
	/// Squared distance to the active pointer, measured after the field force.
	pub pointer_distance_sq: Option<f64>,
}

impl Point {
	pub fn random(
		rng: &mut impl Rng,
		viewport: &Viewport,
		config: &NetworkConfig,
		style: &PointStyle,
	) -> Self {
		let angle = rng.random::<f64>() * TAU;
		let speed = config.base_speed * uniform(rng, 0.5, 1.0);
		let hue_velocity = style.hue_drift * uniform(rng, 0.5, 1.0);

		Self {
			x: rng.random::<f64>() * viewport.width,
			y: rng.random::<f64>() * viewport.height,
			vx: angle.cos() * speed,
			vy: angle.sin() * speed,
			radius: uniform(rng, style.radius_min, style.radius_max),
			hue: uniform(rng, style.hue_min, style.hue_max),
			hue_velocity: if rng.random::<bool>() {
				hue_velocity
			} else {
				-hue_velocity
			},
			alpha: style.opacity * uniform(rng, 0.5, 1.0),
			phase: rng.random::<f64>() * TAU,
			cooldown_until: 0.0,
		}
	}

	/// Advance one update of `frames` 60 Hz frames.
	///
	/// Order: drift, pointer field, damping, speed clamp, integration, boundary
	/// reflection, hue wander.
	pub fn step(
		&mut self,
		frames: f64,
		pointer: &PointerState,
		viewport: &Viewport,
		config: &NetworkConfig,
		style: &PointStyle,
		rng: &mut impl Rng,
	) -> StepOutcome {
		if config.drift > 0.0 {
			self.vx += (rng.random::<f64>() - 0.5) * config.drift * frames;
			self.vy += (rng.random::<f64>() - 0.5) * config.drift * frames;
		}

		if pointer.active {
			let force = if pointer.pressed {
				config.field_force * config.press_force_scale
			} else {
				config.field_force
			};
			self.apply_field(pointer.x, pointer.y, config.field_radius, force * frames);
		}

		let damp = config.damping.powf(frames);
		self.vx *= damp;
		self.vy *= damp;

		let speed = self.vx.hypot(self.vy);
		if speed > config.max_speed {
			let s = config.max_speed / speed;
			self.vx *= s;
			self.vy *= s;
		}

		self.x += self.vx * frames;
		self.y += self.vy * frames;
		self.reflect(viewport.width, viewport.height);

		self.hue += self.hue_velocity * frames;
		if self.hue < style.hue_min {
			self.hue = style.hue_min;
			self.hue_velocity = self.hue_velocity.abs();
		} else if self.hue > style.hue_max {
			self.hue = style.hue_max;
			self.hue_velocity = -self.hue_velocity.abs();
		}

		StepOutcome {
			pointer_distance_sq: pointer.position().map(|(px, py)| {
				let (dx, dy) = (px - self.x, py - self.y);
				dx * dx + dy * dy
			}),
		}
	}

	/// Push velocity toward (positive `strength`) or away from `(px, py)`,
	/// scaled by `1 - distance / radius`. Coincident positions are skipped.
	pub fn apply_field(&mut self, px: f64, py: f64, radius: f64, strength: f64) {
		let (dx, dy) = (px - self.x, py - self.y);
		let dist_sq = dx * dx + dy * dy;
		if dist_sq >= radius * radius || dist_sq < FIELD_EPSILON * FIELD_EPSILON {
			return;
		}
		let dist = dist_sq.sqrt();
		let falloff = 1.0 - dist / radius;
		self.vx += dx / dist * strength * falloff;
		self.vy += dy / dist * strength * falloff;
	}

	/// Clamp to `[0, width] x [0, height]`, turning velocity back inward.
	pub fn reflect(&mut self, width: f64, height: f64) {
		if self.x < 0.0 {
			self.x = 0.0;
			self.vx = self.vx.abs();
		} else if self.x > width {
			self.x = width;
			self.vx = -self.vx.abs();
		}
		if self.y < 0.0 {
			self.y = 0.0;
			self.vy = self.vy.abs();
		} else if self.y > height {
			self.y = height;
			self.vy = -self.vy.abs();
		}
	}

	pub fn can_trigger(&self, now_ms: f64) -> bool {
		now_ms >= self.cooldown_until
	}

	/// Arm the cooldown and throw the point in a random direction.
	pub fn kick(&mut self, rng: &mut impl Rng, strength: f64, now_ms: f64, cooldown_ms: f64) {
		let angle = rng.random::<f64>() * TAU;
		let magnitude = strength * uniform(rng, 0.6, 1.0);
		self.vx += angle.cos() * magnitude;
		self.vy += angle.sin() * magnitude;
		self.cooldown_until = now_ms + cooldown_ms;
	}

	/// Get twinkle alpha for a point
	pub fn twinkle_alpha(&self, time: f64) -> f64 {
		let twinkle = ((time * 1.5 + self.phase).sin() * 0.5 + 0.5) * 0.4 + 0.6;
		self.alpha * twinkle
	}
}

impl Spatial for Point {
	fn distance_sq(&self, other: &Self) -> f64 {
		let (dx, dy) = (self.x - other.x, self.y - other.y);
		dx * dx + dy * dy
	}

	fn planar(&self) -> (f64, f64) {
		(self.x, self.y)
	}
}

/// Seed `count` points spread over the viewport.
pub fn seed(
	rng: &mut impl Rng,
	count: usize,
	viewport: &Viewport,
	config: &NetworkConfig,
	style: &PointStyle,
) -> Vec<Point> {
	(0..count)
		.map(|_| Point::random(rng, viewport, config, style))
		.collect()
}

/// Scale positions proportionally when the viewport changes without reseeding.
pub fn rescale(points: &mut [Point], from: &Viewport, to: &Viewport) {
	let scale_x = if from.width > 0.0 { to.width / from.width } else { 1.0 };
	let scale_y = if from.height > 0.0 { to.height / from.height } else { 1.0 };

	for p in points {
		p.x *= scale_x;
		p.y *= scale_y;
		p.reflect(to.width, to.height);
	}
}
