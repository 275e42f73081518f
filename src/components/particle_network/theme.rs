//! Visual theming for the particle network.
//!
//! Provides colors, hue ranges, and the per-layer style configuration used by
//! the renderer. Presets are selected by name from the page configuration.

use log::warn;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Build an opaque color from hue (degrees), saturation and lightness (0..1).
	pub fn from_hsl(hue: f64, saturation: f64, lightness: f64) -> Self {
		let h = hue.rem_euclid(360.0) / 60.0;
		let s = saturation.clamp(0.0, 1.0);
		let l = lightness.clamp(0.0, 1.0);

		let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
		let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
		let (r, g, b) = match h as u32 {
			0 => (chroma, x, 0.0),
			1 => (x, chroma, 0.0),
			2 => (0.0, chroma, x),
			3 => (0.0, x, chroma),
			4 => (x, 0.0, chroma),
			_ => (chroma, 0.0, x),
		};
		let m = l - chroma / 2.0;
		let channel = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;

		Self::rgb(channel(r), channel(g), channel(b))
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Lighten the color by a factor (0.0 = unchanged, 1.0 = white)
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 + (255.0 - self.r as f64) * f) as u8,
			g: (self.g as f64 + (255.0 - self.g as f64) * f) as u8,
			b: (self.b as f64 + (255.0 - self.b as f64) * f) as u8,
			a: self.a,
		}
	}

	/// Linear interpolation between two colors
	pub fn lerp(self, other: Color, t: f64) -> Self {
		let t = t.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 * (1.0 - t) + other.r as f64 * t) as u8,
			g: (self.g as f64 * (1.0 - t) + other.g as f64 * t) as u8,
			b: (self.b as f64 * (1.0 - t) + other.b as f64 * t) as u8,
			a: self.a * (1.0 - t) + other.a * t,
		}
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {:.3})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Hue and lightness envelope for persistent points.
#[derive(Clone, Debug)]
pub struct PointStyle {
	/// Lowest hue (degrees) a point may take
	pub hue_min: f64,
	/// Highest hue (degrees) a point may take
	pub hue_max: f64,
	/// How fast hues wander inside the range (degrees per frame)
	pub hue_drift: f64,
	pub saturation: f64,
	pub lightness: f64,
	/// Minimum point radius in CSS pixels
	pub radius_min: f64,
	/// Maximum point radius in CSS pixels
	pub radius_max: f64,
	/// Halo radius multiplier (0 = no halo)
	pub halo: f64,
	/// Base point opacity
	pub opacity: f64,
}

/// Background style configuration.
#[derive(Clone, Debug)]
pub struct BackgroundStyle {
	/// Primary background color
	pub color: Color,
	/// Secondary color for gradients
	pub color_secondary: Color,
	/// Whether to use radial gradient
	pub use_gradient: bool,
	/// Vignette intensity (0.0 = none, 1.0 = strong)
	pub vignette: f64,
	/// Glow painted under the pointer while it is active (alpha, 0 = off)
	pub pointer_glow: f64,
}

/// Connection line style.
#[derive(Clone, Debug)]
pub struct LinkStyle {
	pub hue: f64,
	pub saturation: f64,
	pub lightness: f64,
	pub width: f64,
}

/// Spark and ring style.
#[derive(Clone, Debug)]
pub struct EffectStyle {
	/// Random hue offset applied to each spark around its source point
	pub hue_jitter: f64,
	pub spark_lightness: f64,
	pub ring_lightness: f64,
	pub ring_width: f64,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	pub name: &'static str,
	pub background: BackgroundStyle,
	pub point: PointStyle,
	pub link: LinkStyle,
	pub effect: EffectStyle,
}

impl Theme {
	/// Deep blue-violet galaxy with bright sparks (default)
	pub fn galaxy() -> Self {
		Self {
			name: "galaxy",
			background: BackgroundStyle {
				color: Color::rgb(5, 8, 16),
				color_secondary: Color::rgb(18, 16, 42),
				use_gradient: true,
				vignette: 0.25,
				pointer_glow: 0.12,
			},
			point: PointStyle {
				hue_min: 195.0,
				hue_max: 275.0,
				hue_drift: 0.15,
				saturation: 0.85,
				lightness: 0.65,
				radius_min: 0.8,
				radius_max: 2.4,
				halo: 3.0,
				opacity: 0.9,
			},
			link: LinkStyle {
				hue: 215.0,
				saturation: 0.9,
				lightness: 0.6,
				width: 0.8,
			},
			effect: EffectStyle {
				hue_jitter: 25.0,
				spark_lightness: 0.72,
				ring_lightness: 0.7,
				ring_width: 1.2,
			},
		}
	}

	/// Green-teal curtains over a dark sky
	pub fn aurora() -> Self {
		Self {
			name: "aurora",
			background: BackgroundStyle {
				color: Color::rgb(6, 14, 18),
				color_secondary: Color::rgb(12, 34, 38),
				use_gradient: true,
				vignette: 0.2,
				pointer_glow: 0.1,
			},
			point: PointStyle {
				hue_min: 140.0,
				hue_max: 200.0,
				hue_drift: 0.1,
				saturation: 0.7,
				lightness: 0.6,
				radius_min: 0.8,
				radius_max: 2.0,
				halo: 2.5,
				opacity: 0.85,
			},
			link: LinkStyle {
				hue: 170.0,
				saturation: 0.6,
				lightness: 0.55,
				width: 0.7,
			},
			effect: EffectStyle {
				hue_jitter: 20.0,
				spark_lightness: 0.7,
				ring_lightness: 0.65,
				ring_width: 1.0,
			},
		}
	}

	/// Warm orange embers
	pub fn ember() -> Self {
		Self {
			name: "ember",
			background: BackgroundStyle {
				color: Color::rgb(16, 10, 8),
				color_secondary: Color::rgb(36, 20, 14),
				use_gradient: true,
				vignette: 0.22,
				pointer_glow: 0.14,
			},
			point: PointStyle {
				hue_min: 12.0,
				hue_max: 48.0,
				hue_drift: 0.12,
				saturation: 0.9,
				lightness: 0.58,
				radius_min: 0.9,
				radius_max: 2.2,
				halo: 2.8,
				opacity: 0.9,
			},
			link: LinkStyle {
				hue: 28.0,
				saturation: 0.8,
				lightness: 0.5,
				width: 0.8,
			},
			effect: EffectStyle {
				hue_jitter: 15.0,
				spark_lightness: 0.68,
				ring_lightness: 0.62,
				ring_width: 1.2,
			},
		}
	}

	/// Sky-blue point cloud for the depth variant
	pub fn depth() -> Self {
		Self {
			name: "depth",
			background: BackgroundStyle {
				color: Color::rgb(5, 8, 16),
				color_secondary: Color::rgb(5, 8, 16),
				use_gradient: false,
				vignette: 0.0,
				pointer_glow: 0.0,
			},
			// #38bdf8
			point: PointStyle {
				hue_min: 198.0,
				hue_max: 198.0,
				hue_drift: 0.0,
				saturation: 0.93,
				lightness: 0.6,
				radius_min: 1.0,
				radius_max: 1.0,
				halo: 0.0,
				opacity: 0.9,
			},
			// #1e90ff
			link: LinkStyle {
				hue: 210.0,
				saturation: 1.0,
				lightness: 0.56,
				width: 0.6,
			},
			effect: EffectStyle {
				hue_jitter: 0.0,
				spark_lightness: 0.7,
				ring_lightness: 0.7,
				ring_width: 1.0,
			},
		}
	}

	/// Look up a preset by name, falling back to the default theme.
	pub fn by_name(name: &str) -> Self {
		match name {
			"galaxy" => Self::galaxy(),
			"aurora" => Self::aurora(),
			"ember" => Self::ember(),
			"depth" => Self::depth(),
			other => {
				warn!("particle-network: unknown theme '{}', using default", other);
				Self::default()
			}
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::galaxy()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn hsl_primaries() {
		assert_eq!(Color::from_hsl(0.0, 1.0, 0.5), Color::rgb(255, 0, 0));
		assert_eq!(Color::from_hsl(120.0, 1.0, 0.5), Color::rgb(0, 255, 0));
		assert_eq!(Color::from_hsl(240.0, 1.0, 0.5), Color::rgb(0, 0, 255));
	}

	#[test]
	fn hsl_wraps_hue() {
		assert_eq!(Color::from_hsl(360.0, 1.0, 0.5), Color::from_hsl(0.0, 1.0, 0.5));
		assert_eq!(Color::from_hsl(-120.0, 1.0, 0.5), Color::from_hsl(240.0, 1.0, 0.5));
	}

	#[test]
	fn hsl_grey_when_unsaturated() {
		let c = Color::from_hsl(200.0, 0.0, 0.5);
		assert_eq!((c.r, c.g, c.b), (128, 128, 128));
	}

	#[test]
	fn css_output_switches_on_alpha() {
		assert_eq!(Color::rgb(255, 0, 16).to_css(), "#ff0010");
		assert_eq!(Color::rgba(1, 2, 3, 0.5).to_css(), "rgba(1, 2, 3, 0.500)");
	}

	#[test]
	fn unknown_theme_falls_back() {
		assert_eq!(Theme::by_name("nope").name, "galaxy");
		assert_eq!(Theme::by_name("ember").name, "ember");
	}

	#[test]
	fn presets_have_ordered_ranges() {
		for theme in [Theme::galaxy(), Theme::aurora(), Theme::ember(), Theme::depth()] {
			assert!(theme.point.hue_min <= theme.point.hue_max, "{}", theme.name);
			assert!(theme.point.radius_min <= theme.point.radius_max, "{}", theme.name);
		}
	}
}
