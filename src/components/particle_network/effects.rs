//! Short-lived sparks and rings spawned when the pointer brushes a point.
//!
//! Both collections are capped; a burst larger than the remaining headroom
//! evicts the oldest entries first.

use std::collections::VecDeque;
use std::f64::consts::TAU;

use rand::Rng;

use super::config::NetworkConfig;
use super::points::uniform;

/// FIFO collection that never holds more than `capacity` items.
#[derive(Clone, Debug)]
pub struct BoundedQueue<T> {
	items: VecDeque<T>,
	capacity: usize,
}

impl<T> BoundedQueue<T> {
	pub fn new(capacity: usize) -> Self {
		Self {
			items: VecDeque::with_capacity(capacity),
			capacity,
		}
	}

	/// Append, evicting the oldest entry when full.
	pub fn push(&mut self, item: T) {
		if self.capacity == 0 {
			return;
		}
		if self.items.len() == self.capacity {
			self.items.pop_front();
		}
		self.items.push_back(item);
	}

	#[cfg(test)]
	pub fn len(&self) -> usize {
		self.items.len()
	}

	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &T> {
		self.items.iter()
	}

	/// Keep only items for which `keep` returns true, preserving order.
	pub fn retain_mut(&mut self, keep: impl FnMut(&mut T) -> bool) {
		self.items.retain_mut(keep);
	}
}

impl<T> Extend<T> for BoundedQueue<T> {
	fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
		for item in iter {
			self.push(item);
		}
	}
}

/// Remaining and initial life, in frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Life {
	pub remaining: f64,
	pub initial: f64,
}

impl Life {
	pub fn new(frames: f64) -> Self {
		Self {
			remaining: frames,
			initial: frames,
		}
	}

	/// Fraction of life left, for fading.
	pub fn ratio(&self) -> f64 {
		if self.initial <= 0.0 {
			0.0
		} else {
			(self.remaining / self.initial).clamp(0.0, 1.0)
		}
	}
}

#[derive(Clone, Debug)]
pub struct Spark {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	pub radius: f64,
	pub hue: f64,
	pub life: Life,
}

#[derive(Clone, Debug)]
pub struct Ring {
	pub x: f64,
	pub y: f64,
	pub radius: f64,
	pub hue: f64,
	pub life: Life,
}

/// Where a burst comes from.
#[derive(Clone, Copy, Debug)]
pub struct Burst {
	pub x: f64,
	pub y: f64,
	pub hue: f64,
	/// Pointer motion carried into the sparks.
	pub inherit: (f64, f64),
}

/// Both effect collections.
#[derive(Clone, Debug)]
pub struct Effects {
	pub sparks: BoundedQueue<Spark>,
	pub rings: BoundedQueue<Ring>,
}

/// Share of pointer velocity handed to new sparks.
const INHERIT_FACTOR: f64 = 0.15;

impl Effects {
	pub fn new(config: &NetworkConfig) -> Self {
		Self {
			sparks: BoundedQueue::new(config.max_sparks),
			rings: BoundedQueue::new(config.max_rings),
		}
	}

	/// Spawn one ring and `sparks_per_burst` sparks at the burst origin.
	pub fn burst(
		&mut self,
		burst: Burst,
		config: &NetworkConfig,
		hue_jitter: f64,
		rng: &mut impl Rng,
	) {
		self.rings.push(Ring {
			x: burst.x,
			y: burst.y,
			radius: config.ring_radius,
			hue: burst.hue,
			life: Life::new(config.ring_life),
		});

		let (ix, iy) = (burst.inherit.0 * INHERIT_FACTOR, burst.inherit.1 * INHERIT_FACTOR);
		self.sparks.extend((0..config.sparks_per_burst).map(|_| {
			let angle = rng.random::<f64>() * TAU;
			let speed = config.spark_speed * uniform(rng, 0.35, 1.0);
			Spark {
				x: burst.x,
				y: burst.y,
				vx: angle.cos() * speed + ix,
				vy: angle.sin() * speed + iy,
				radius: config.spark_radius * uniform(rng, 0.6, 1.0),
				hue: burst.hue + uniform(rng, -hue_jitter, hue_jitter),
				life: Life::new(config.spark_life * uniform(rng, 0.7, 1.0)),
			}
		}));
	}

	/// Age every effect by `frames` and drop expired or invisible ones.
	pub fn sweep(&mut self, frames: f64, config: &NetworkConfig) {
		let decay = config.effect_decay.powf(frames);
		let friction = config.spark_friction.powf(frames);
		let min_radius = config.effect_min_radius;

		self.sparks.retain_mut(|s| {
			s.life.remaining -= frames;
			s.x += s.vx * frames;
			s.y += s.vy * frames;
			s.vx *= friction;
			s.vy *= friction;
			s.radius *= decay;
			s.life.remaining > 0.0 && s.radius >= min_radius
		});
		self.rings.retain_mut(|r| {
			r.life.remaining -= frames;
			r.radius *= decay;
			r.life.remaining > 0.0 && r.radius >= min_radius
		});
	}
}
