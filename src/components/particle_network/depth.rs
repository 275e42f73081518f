//! Rotating 3-D point cloud with pointer parallax.
//!
//! Points drift inside a cube and bounce off its walls. The cloud slowly
//! rotates, a perspective camera eases toward the pointer, and linear fog fades
//! distant points and lines.

use rand::Rng;

use super::config::DepthConfig;
use super::links::Spatial;
use super::points::uniform;
use super::state::Viewport;

/// Nearest camera-space depth that is still drawn.
pub const NEAR_PLANE: f64 = 0.1;

#[derive(Clone, Debug, PartialEq)]
pub struct DepthPoint {
	pub position: [f64; 3],
	pub velocity: [f64; 3],
}

impl DepthPoint {
	pub fn random(rng: &mut impl Rng, config: &DepthConfig) -> Self {
		let mut position = [0.0; 3];
		let mut velocity = [0.0; 3];
		for axis in 0..3 {
			position[axis] = uniform(rng, -config.spawn_extent, config.spawn_extent);
			velocity[axis] = uniform(rng, -config.initial_speed, config.initial_speed);
		}
		Self { position, velocity }
	}

	/// Integrate and reflect off `[-bound, bound]` per axis.
	pub fn step(&mut self, frames: f64, bound: f64) {
		for axis in 0..3 {
			let p = &mut self.position[axis];
			let v = &mut self.velocity[axis];
			*p += *v * frames;
			if *p > bound {
				*p = bound;
				*v = -v.abs();
			} else if *p < -bound {
				*p = -bound;
				*v = v.abs();
			}
		}
	}
}

impl Spatial for DepthPoint {
	fn distance_sq(&self, other: &Self) -> f64 {
		let [dx, dy, dz] = [
			self.position[0] - other.position[0],
			self.position[1] - other.position[1],
			self.position[2] - other.position[2],
		];
		dx * dx + dy * dy + dz * dz
	}

	fn planar(&self) -> (f64, f64) {
		(self.position[0], self.position[1])
	}
}

/// A point mapped onto the canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projected {
	pub x: f64,
	pub y: f64,
	/// Pixels per world unit at this depth.
	pub scale: f64,
	/// Fog visibility in `[0, 1]`.
	pub visibility: f64,
}

/// The cloud plus its rotation and camera.
#[derive(Clone, Debug)]
pub struct DepthScene {
	pub points: Vec<DepthPoint>,
	/// Accumulated rotation around (x, y), radians.
	pub rotation: (f64, f64),
	pub camera: [f64; 3],
}

impl DepthScene {
	pub fn new(rng: &mut impl Rng, count: usize, config: &DepthConfig) -> Self {
		Self {
			points: (0..count).map(|_| DepthPoint::random(rng, config)).collect(),
			rotation: (0.0, 0.0),
			camera: [0.0, 0.0, config.camera_distance],
		}
	}

	/// Advance the cloud; `pointer` is in normalised `[-1, 1]` coordinates.
	pub fn step(&mut self, frames: f64, pointer: (f64, f64), config: &DepthConfig) {
		for p in &mut self.points {
			p.step(frames, config.bound);
		}

		self.rotation.0 += config.rotation_speed.0 * frames;
		self.rotation.1 += config.rotation_speed.1 * frames;

		let ease = 1.0 - (1.0 - config.parallax_ease.clamp(0.0, 1.0)).powf(frames);
		let target = (pointer.0 * config.parallax, -pointer.1 * config.parallax);
		self.camera[0] += (target.0 - self.camera[0]) * ease;
		self.camera[1] += (target.1 - self.camera[1]) * ease;
	}

	/// Rotate a world position by the cloud rotation (x first, then y).
	fn rotate(&self, [x, y, z]: [f64; 3]) -> [f64; 3] {
		let (sx, cx) = self.rotation.0.sin_cos();
		let (sy, cy) = self.rotation.1.sin_cos();
		let (y1, z1) = (y * cx - z * sx, y * sx + z * cx);
		let (x2, z2) = (x * cy + z1 * sy, -x * sy + z1 * cy);
		[x2, y1, z2]
	}

	/// Perspective-project a world position. `None` at or behind the near plane.
	pub fn project(
		&self,
		position: [f64; 3],
		viewport: &Viewport,
		config: &DepthConfig,
	) -> Option<Projected> {
		let [x, y, z] = self.rotate(position);
		// The camera looks down -z toward the origin.
		let depth = self.camera[2] - z;
		if depth <= NEAR_PLANE {
			return None;
		}
		let focal = viewport.height / 2.0 / (config.fov.to_radians() / 2.0).tan();
		let scale = focal / depth;
		Some(Projected {
			x: viewport.width / 2.0 + (x - self.camera[0]) * scale,
			y: viewport.height / 2.0 - (y - self.camera[1]) * scale,
			scale,
			visibility: fog(depth, config.fog_near, config.fog_far),
		})
	}
}

/// Linear fog: 1 before `near`, 0 beyond `far`.
pub fn fog(depth: f64, near: f64, far: f64) -> f64 {
	if far <= near {
		return if depth <= near { 1.0 } else { 0.0 };
	}
	(1.0 - (depth - near) / (far - near)).clamp(0.0, 1.0)
}
