//! Proximity connections between points.
//!
//! Every unordered pair is tested with squared distances against the squared
//! threshold; the square root is only taken for pairs that pass.

/// Anything the link pass can measure.
pub trait Spatial {
	/// Squared Euclidean distance to another element.
	fn distance_sq(&self, other: &Self) -> f64;
	/// Screen-plane position, used for pointer proximity.
	fn planar(&self) -> (f64, f64);
}

/// A connection between points `a` and `b` (indices into the point slice).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
	pub a: usize,
	pub b: usize,
	pub opacity: f64,
}

/// Parameters for one link pass.
#[derive(Clone, Copy, Debug)]
pub struct LinkParams {
	pub max_distance: f64,
	pub max_opacity: f64,
	/// Share of `max_opacity` only reached next to the pointer (0..1).
	pub pointer_boost: f64,
	pub boost_radius: f64,
}

impl LinkParams {
	/// Opacity of a segment of length `dist`, given the pointer's distance
	/// to its midpoint (`None` when there is no pointer).
	///
	/// Result lies in `(0, max_opacity]` for `dist < max_distance` and falls
	/// strictly as `dist` grows.
	pub fn opacity(&self, dist: f64, pointer_dist: Option<f64>) -> f64 {
		let strength = 1.0 - dist / self.max_distance;
		let boost = self.pointer_boost.clamp(0.0, 1.0);
		let proximity = match pointer_dist {
			Some(d) if self.boost_radius > 0.0 && d < self.boost_radius => {
				1.0 - d / self.boost_radius
			}
			_ => 0.0,
		};
		self.max_opacity * strength * (1.0 - boost + boost * proximity)
	}
}

/// Fill `out` with every pair closer than `params.max_distance`.
///
/// `focus` is the active pointer position, if any.
pub fn collect_links<T: Spatial>(
	points: &[T],
	params: &LinkParams,
	focus: Option<(f64, f64)>,
	out: &mut Vec<Link>,
) {
	out.clear();
	if params.max_distance <= 0.0 {
		return;
	}
	let max_sq = params.max_distance * params.max_distance;

	for (i, p) in points.iter().enumerate() {
		for (j, q) in points.iter().enumerate().skip(i + 1) {
			let dist_sq = p.distance_sq(q);
			if dist_sq >= max_sq {
				continue;
			}
			let pointer_dist = focus.map(|(fx, fy)| {
				let ((x1, y1), (x2, y2)) = (p.planar(), q.planar());
				let (mx, my) = ((x1 + x2) / 2.0 - fx, (y1 + y2) / 2.0 - fy);
				(mx * mx + my * my).sqrt()
			});
			let opacity = params.opacity(dist_sq.sqrt(), pointer_dist);
			if opacity > 0.0 {
				out.push(Link { a: i, b: j, opacity });
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	struct Dot(f64, f64);

	impl Spatial for Dot {
		fn distance_sq(&self, other: &Self) -> f64 {
			let (dx, dy) = (self.0 - other.0, self.1 - other.1);
			dx * dx + dy * dy
		}

		fn planar(&self) -> (f64, f64) {
			(self.0, self.1)
		}
	}

	fn plain(max_distance: f64) -> LinkParams {
		LinkParams {
			max_distance,
			max_opacity: 1.0,
			pointer_boost: 0.0,
			boost_radius: 0.0,
		}
	}

	#[test]
	fn half_distance_gives_half_opacity() {
		let mut out = Vec::new();
		collect_links(&[Dot(0.0, 0.0), Dot(50.0, 0.0)], &plain(100.0), None, &mut out);
		assert_eq!(out.len(), 1);
		assert_eq!((out[0].a, out[0].b), (0, 1));
		assert!((out[0].opacity - 0.5).abs() < 1e-9);
	}

	#[test]
	fn no_link_at_or_beyond_threshold() {
		let mut out = Vec::new();
		collect_links(
			&[Dot(0.0, 0.0), Dot(100.0, 0.0), Dot(0.0, 250.0)],
			&plain(100.0),
			None,
			&mut out,
		);
		assert!(out.is_empty());
	}

	#[test]
	fn threshold_compares_squared_to_squared() {
		// 60-80-100 triangle: squared distance 10_000 must not pass a 100 threshold,
		// 99.9 apart must.
		let mut out = Vec::new();
		collect_links(&[Dot(0.0, 0.0), Dot(60.0, 80.0)], &plain(100.0), None, &mut out);
		assert!(out.is_empty());
		collect_links(&[Dot(0.0, 0.0), Dot(59.9, 80.0)], &plain(100.0), None, &mut out);
		assert_eq!(out.len(), 1);
	}

	#[test]
	fn opacity_is_bounded_and_monotonic() {
		let params = LinkParams {
			max_distance: 120.0,
			max_opacity: 0.6,
			pointer_boost: 0.4,
			boost_radius: 150.0,
		};
		for pointer in [None, Some(0.0), Some(75.0), Some(400.0)] {
			let mut last = f64::INFINITY;
			let mut d = 0.0;
			while d < params.max_distance {
				let o = params.opacity(d, pointer);
				assert!(o > 0.0 && o <= params.max_opacity, "opacity {} at {}", o, d);
				assert!(o < last, "opacity must fall with distance");
				last = o;
				d += 0.5;
			}
		}
	}

	#[test]
	fn pointer_near_midpoint_boosts() {
		let params = LinkParams {
			max_distance: 100.0,
			max_opacity: 1.0,
			pointer_boost: 0.5,
			boost_radius: 100.0,
		};
		let points = [Dot(0.0, 0.0), Dot(40.0, 0.0)];
		let mut far = Vec::new();
		let mut near = Vec::new();
		collect_links(&points, &params, Some((500.0, 500.0)), &mut far);
		collect_links(&points, &params, Some((20.0, 0.0)), &mut near);
		assert!((far[0].opacity - 0.3).abs() < 1e-9);
		assert!((near[0].opacity - 0.6).abs() < 1e-9);
	}

	#[test]
	fn visits_each_pair_once() {
		let points: Vec<Dot> = (0..10).map(|i| Dot(i as f64, 0.0)).collect();
		let mut out = Vec::new();
		collect_links(&points, &plain(100.0), None, &mut out);
		assert_eq!(out.len(), 45);
		assert!(out.iter().all(|l| l.a < l.b));
	}
}
