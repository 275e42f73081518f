//! Tunable constants for the particle network.
//!
//! Defaults reproduce the "premium galaxy" background. Any field can be
//! overridden per page through a JSON blob; missing fields keep their default.

use serde::Deserialize;

use super::state::Viewport;

/// Which simulation drives the background.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
	/// Flat pointer-reactive network with sparks and rings.
	#[default]
	Galaxy,
	/// Rotating 3-D point cloud with camera parallax.
	Depth,
}

/// Settings specific to [`Variant::Depth`].
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct DepthConfig {
	pub desktop_points: usize,
	pub mobile_points: usize,
	/// Half-size of the cube points are spawned in.
	pub spawn_extent: f64,
	/// Points reflect once they leave `[-bound, bound]` on any axis.
	pub bound: f64,
	/// Maximum initial velocity component (world units per frame).
	pub initial_speed: f64,
	pub max_link_distance: f64,
	pub link_opacity: f64,
	/// Cloud rotation per frame around (x, y), radians.
	pub rotation_speed: (f64, f64),
	pub camera_distance: f64,
	/// Vertical field of view in degrees.
	pub fov: f64,
	/// How far (world units) the camera follows the pointer.
	pub parallax: f64,
	/// Fraction of the remaining camera offset closed per frame.
	pub parallax_ease: f64,
	pub fog_near: f64,
	pub fog_far: f64,
	pub desktop_point_size: f64,
	pub mobile_point_size: f64,
}

impl Default for DepthConfig {
	fn default() -> Self {
		Self {
			desktop_points: 1600,
			mobile_points: 800,
			spawn_extent: 12.5,
			bound: 12.0,
			initial_speed: 0.0015,
			max_link_distance: 1.8,
			link_opacity: 0.15,
			rotation_speed: (0.0002, 0.0004),
			camera_distance: 10.0,
			fov: 65.0,
			parallax: 2.0,
			parallax_ease: 0.02,
			fog_near: 8.0,
			fog_far: 20.0,
			desktop_point_size: 0.025,
			mobile_point_size: 0.03,
		}
	}
}

/// Complete configuration for one background instance.
///
/// Distances are CSS pixels, speeds are pixels per 60 Hz frame, lifetimes are
/// frames and cooldowns are milliseconds.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
	pub variant: Variant,
	/// Theme preset name (see [`super::Theme::by_name`]). When unset the
	/// variant picks its own preset.
	pub theme: Option<String>,

	pub desktop_max_points: usize,
	pub mobile_max_points: usize,
	pub min_points: usize,
	/// Viewport area (px²) per point before the device cap applies.
	pub area_per_point: f64,
	/// Viewports narrower than this count as mobile.
	pub mobile_breakpoint: f64,

	pub max_link_distance: f64,
	pub link_max_opacity: f64,
	/// Share of link opacity reserved for segments near the pointer (0..1).
	pub link_pointer_boost: f64,
	pub link_boost_radius: f64,

	pub base_speed: f64,
	pub max_speed: f64,
	/// Random velocity perturbation per frame.
	pub drift: f64,
	/// Velocity multiplier per frame.
	pub damping: f64,

	pub field_radius: f64,
	/// Positive pulls points toward the pointer, negative pushes them away.
	pub field_force: f64,
	/// Field multiplier while the pointer is pressed.
	pub press_force_scale: f64,

	pub trigger_radius: f64,
	pub trigger_cooldown_ms: f64,
	pub kick_strength: f64,

	pub sparks_per_burst: usize,
	pub spark_life: f64,
	pub spark_speed: f64,
	pub spark_friction: f64,
	pub spark_radius: f64,
	pub ring_life: f64,
	pub ring_radius: f64,
	/// Radius multiplier per frame for sparks and rings.
	pub effect_decay: f64,
	/// Effects smaller than this are dropped.
	pub effect_min_radius: f64,
	pub max_sparks: usize,
	pub max_rings: usize,

	/// Frames per second ceiling, `None` for display rate.
	pub fps_cap: Option<f64>,
	/// Alpha of the background repaint; `None` clears fully every frame.
	pub trail_fade: Option<f64>,
	pub honor_reduced_motion: bool,
	pub reseed_on_resize: bool,
	pub resize_debounce_ms: i32,
	pub max_pixel_ratio: f64,

	pub depth: DepthConfig,
}

impl Default for NetworkConfig {
	fn default() -> Self {
		Self {
			variant: Variant::Galaxy,
			theme: None,
			desktop_max_points: 260,
			mobile_max_points: 150,
			min_points: 40,
			area_per_point: 7_000.0,
			mobile_breakpoint: 768.0,
			max_link_distance: 130.0,
			link_max_opacity: 0.55,
			link_pointer_boost: 0.45,
			link_boost_radius: 180.0,
			base_speed: 0.35,
			max_speed: 2.4,
			drift: 0.03,
			damping: 0.985,
			field_radius: 200.0,
			field_force: 0.045,
			press_force_scale: -2.0,
			trigger_radius: 48.0,
			trigger_cooldown_ms: 900.0,
			kick_strength: 1.8,
			sparks_per_burst: 10,
			spark_life: 42.0,
			spark_speed: 3.2,
			spark_friction: 0.94,
			spark_radius: 1.8,
			ring_life: 36.0,
			ring_radius: 26.0,
			effect_decay: 0.955,
			effect_min_radius: 0.2,
			max_sparks: 240,
			max_rings: 24,
			fps_cap: Some(60.0),
			trail_fade: Some(0.22),
			honor_reduced_motion: true,
			reseed_on_resize: true,
			resize_debounce_ms: 150,
			max_pixel_ratio: 2.0,
			depth: DepthConfig::default(),
		}
	}
}

impl NetworkConfig {
	/// Parse a JSON override blob on top of the defaults.
	pub fn from_json(text: &str) -> serde_json::Result<Self> {
		serde_json::from_str(text)
	}

	/// Explicit theme name, or the preset matching the variant.
	pub fn theme_name(&self) -> &str {
		match (&self.theme, self.variant) {
			(Some(name), _) => name,
			(None, Variant::Galaxy) => "galaxy",
			(None, Variant::Depth) => "depth",
		}
	}

	pub fn is_mobile(&self, viewport: &Viewport) -> bool {
		viewport.width < self.mobile_breakpoint
	}

	/// Number of points to seed for a viewport, scaled by area and capped per device class.
	pub fn point_count(&self, viewport: &Viewport) -> usize {
		let mobile = self.is_mobile(viewport);
		match self.variant {
			Variant::Depth => {
				if mobile {
					self.depth.mobile_points
				} else {
					self.depth.desktop_points
				}
			}
			Variant::Galaxy => {
				let cap = if mobile {
					self.mobile_max_points
				} else {
					self.desktop_max_points
				};
				let by_area = (viewport.width * viewport.height / self.area_per_point.max(1.0))
					.round() as usize;
				by_area.clamp(self.min_points.min(cap), cap)
			}
		}
	}

	/// Apply the user's reduced-motion preference.
	///
	/// Halves the frame-rate cap (30 fps when uncapped) and turns off trails.
	pub fn with_reduced_motion(mut self, prefers_reduced: bool) -> Self {
		if self.honor_reduced_motion && prefers_reduced {
			self.fps_cap = Some(self.fps_cap.unwrap_or(60.0) / 2.0);
			self.trail_fade = None;
		}
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn viewport(width: f64, height: f64) -> Viewport {
		Viewport {
			width,
			height,
			pixel_ratio: 1.0,
		}
	}

	#[test]
	fn partial_json_keeps_defaults() {
		let config = NetworkConfig::from_json(r#"{ "max_link_distance": 90, "fps_cap": null }"#)
			.unwrap();
		assert_eq!(config.max_link_distance, 90.0);
		assert_eq!(config.fps_cap, None);
		assert_eq!(config.max_sparks, NetworkConfig::default().max_sparks);
		assert_eq!(config.variant, Variant::Galaxy);
	}

	#[test]
	fn variant_and_nested_depth_parse() {
		let config =
			NetworkConfig::from_json(r#"{ "variant": "depth", "depth": { "bound": 5 } }"#).unwrap();
		assert_eq!(config.variant, Variant::Depth);
		assert_eq!(config.depth.bound, 5.0);
		assert_eq!(config.depth.fog_far, 20.0);
	}

	#[test]
	fn theme_follows_variant_unless_named() {
		assert_eq!(NetworkConfig::default().theme_name(), "galaxy");

		let depth = NetworkConfig::from_json(r#"{ "variant": "depth" }"#).unwrap();
		assert_eq!(depth.theme_name(), "depth");

		let named =
			NetworkConfig::from_json(r#"{ "variant": "depth", "theme": "ember" }"#).unwrap();
		assert_eq!(named.theme_name(), "ember");
	}

	#[test]
	fn malformed_json_is_an_error() {
		assert!(NetworkConfig::from_json("{ not json").is_err());
		assert!(NetworkConfig::from_json(r#"{ "variant": "spiral" }"#).is_err());
	}

	#[test]
	fn point_count_respects_device_caps() {
		let config = NetworkConfig::default();
		assert_eq!(config.point_count(&viewport(3840.0, 2160.0)), 260);
		assert_eq!(config.point_count(&viewport(700.0, 3000.0)), 150);
		assert_eq!(config.point_count(&viewport(200.0, 200.0)), 40);
		assert_eq!(config.point_count(&viewport(1000.0, 700.0)), 100);
	}

	#[test]
	fn depth_point_count_by_device() {
		let config = NetworkConfig {
			variant: Variant::Depth,
			..Default::default()
		};
		assert_eq!(config.point_count(&viewport(1440.0, 900.0)), 1600);
		assert_eq!(config.point_count(&viewport(390.0, 844.0)), 800);
	}

	#[test]
	fn reduced_motion_halves_cap_and_disables_trails() {
		let config = NetworkConfig::default().with_reduced_motion(true);
		assert_eq!(config.fps_cap, Some(30.0));
		assert_eq!(config.trail_fade, None);

		let uncapped = NetworkConfig {
			fps_cap: None,
			..Default::default()
		}
		.with_reduced_motion(true);
		assert_eq!(uncapped.fps_cap, Some(30.0));
	}

	#[test]
	fn reduced_motion_ignored_when_not_honored() {
		let config = NetworkConfig {
			honor_reduced_motion: false,
			..Default::default()
		}
		.with_reduced_motion(true);
		assert_eq!(config.fps_cap, Some(60.0));
		assert!(config.trail_fade.is_some());

		let untouched = NetworkConfig::default().with_reduced_motion(false);
		assert_eq!(untouched.fps_cap, Some(60.0));
	}
}
