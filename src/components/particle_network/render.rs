//! Canvas rendering for the particle network.
//!
//! Galaxy frames are painted in layers:
//! 1. Background (full clear with gradient, or a translucent trail fill)
//! 2. Pointer glow
//! 3. Points, links, rings, then sparks with additive (`lighter`) blending
//! 4. Vignette
//!
//! Depth frames clear, then draw fogged links and points additively.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::depth::{DepthScene, Projected};
use super::effects::Effects;
use super::points::Point;
use super::state::{NetworkState, Scene, Viewport};
use super::theme::{BackgroundStyle, Color, Theme};

/// Opacity bands used to batch depth links into a few strokes.
const DEPTH_LINK_BANDS: usize = 4;

/// Renders the current state to the canvas.
pub fn render(state: &NetworkState, ctx: &CanvasRenderingContext2d) {
	match &state.scene {
		Scene::Galaxy { points, effects } => render_galaxy(state, points, effects, ctx),
		Scene::Depth(scene) => render_depth(state, scene, ctx),
	}
}

fn render_galaxy(
	state: &NetworkState,
	points: &[Point],
	effects: &Effects,
	ctx: &CanvasRenderingContext2d,
) {
	let theme = &state.theme;
	let viewport = &state.viewport;

	draw_background(ctx, viewport, theme, state.config.trail_fade);
	if let Some((x, y)) = state.pointer.position() {
		draw_pointer_glow(ctx, theme, x, y, state.config.field_radius);
	}

	let _ = ctx.set_global_composite_operation("lighter");
	draw_points(ctx, points, theme, state.elapsed);
	draw_links(ctx, state, points);
	draw_effects(ctx, effects, theme);
	let _ = ctx.set_global_composite_operation("source-over");

	if theme.background.vignette > 0.0 {
		draw_vignette(ctx, viewport, theme);
	}
}

/// How the background is painted for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
enum BackgroundFill {
	Flat(Color),
	Radial { inner: Color, outer: Color },
}

/// Pick the background fill; trails paint it at the trail alpha instead of
/// clearing first.
fn background_fill(background: &BackgroundStyle, trail_fade: Option<f64>) -> BackgroundFill {
	let alpha = trail_fade.unwrap_or(1.0);
	if background.use_gradient {
		BackgroundFill::Radial {
			inner: background.color_secondary.with_alpha(alpha),
			outer: background.color.with_alpha(alpha),
		}
	} else {
		BackgroundFill::Flat(background.color.with_alpha(alpha))
	}
}

fn draw_background(
	ctx: &CanvasRenderingContext2d,
	viewport: &Viewport,
	theme: &Theme,
	trail_fade: Option<f64>,
) {
	let (w, h) = (viewport.width, viewport.height);
	if trail_fade.is_none() {
		ctx.clear_rect(0.0, 0.0, w, h);
	}

	match background_fill(&theme.background, trail_fade) {
		BackgroundFill::Radial { inner, outer } => {
			let (cx, cy) = (w / 2.0, h / 2.0);
			match ctx.create_radial_gradient(cx, cy, 0.0, cx, cy, w.max(h) * 0.8) {
				Ok(gradient) => {
					let _ = gradient.add_color_stop(0.0, &inner.to_css());
					let _ = gradient.add_color_stop(1.0, &outer.to_css());
					#[allow(deprecated)]
					ctx.set_fill_style(&gradient);
				}
				Err(_) => ctx.set_fill_style_str(&outer.to_css()),
			}
		}
		BackgroundFill::Flat(color) => ctx.set_fill_style_str(&color.to_css()),
	}
	ctx.fill_rect(0.0, 0.0, w, h);
}

fn draw_pointer_glow(ctx: &CanvasRenderingContext2d, theme: &Theme, x: f64, y: f64, radius: f64) {
	let alpha = theme.background.pointer_glow;
	if alpha <= 0.0 || radius <= 0.0 {
		return;
	}
	let Ok(gradient) = ctx.create_radial_gradient(x, y, 0.0, x, y, radius) else {
		return;
	};
	let style = &theme.point;
	let hue = (style.hue_min + style.hue_max) / 2.0;
	let core = Color::from_hsl(hue, style.saturation, style.lightness)
		.lerp(theme.background.color_secondary, 0.3);

	let _ = gradient.add_color_stop(0.0, &core.with_alpha(alpha).to_css());
	let _ = gradient.add_color_stop(1.0, "rgba(0, 0, 0, 0)");
	#[allow(deprecated)]
	ctx.set_fill_style(&gradient);
	ctx.begin_path();
	let _ = ctx.arc(x, y, radius, 0.0, PI * 2.0);
	ctx.fill();
}

fn draw_vignette(ctx: &CanvasRenderingContext2d, viewport: &Viewport, theme: &Theme) {
	let (w, h) = (viewport.width, viewport.height);
	let (cx, cy) = (w / 2.0, h / 2.0);
	let Ok(gradient) =
		ctx.create_radial_gradient(cx, cy, w.min(h) * 0.3, cx, cy, w.max(h) * 0.7)
	else {
		return;
	};

	let _ = gradient.add_color_stop(0.0, "rgba(0, 0, 0, 0)");
	let _ = gradient.add_color_stop(
		1.0,
		&format!("rgba(0, 0, 0, {})", theme.background.vignette),
	);

	#[allow(deprecated)]
	ctx.set_fill_style(&gradient);
	ctx.fill_rect(0.0, 0.0, w, h);
}

fn draw_points(ctx: &CanvasRenderingContext2d, points: &[Point], theme: &Theme, time: f64) {
	let style = &theme.point;

	for p in points {
		let alpha = p.twinkle_alpha(time);
		let color = Color::from_hsl(p.hue, style.saturation, style.lightness);

		if style.halo > 0.0 {
			ctx.set_fill_style_str(&color.with_alpha(alpha * 0.12).to_css());
			ctx.begin_path();
			let _ = ctx.arc(p.x, p.y, p.radius * style.halo, 0.0, PI * 2.0);
			ctx.fill();
		}

		ctx.set_fill_style_str(&color.with_alpha(alpha).to_css());
		ctx.begin_path();
		let _ = ctx.arc(p.x, p.y, p.radius, 0.0, PI * 2.0);
		ctx.fill();
	}
}

fn draw_links(ctx: &CanvasRenderingContext2d, state: &NetworkState, points: &[Point]) {
	let style = &state.theme.link;
	let color = Color::from_hsl(style.hue, style.saturation, style.lightness);
	ctx.set_line_width(style.width);

	for link in &state.links {
		let (a, b) = (&points[link.a], &points[link.b]);
		ctx.set_stroke_style_str(&color.with_alpha(link.opacity).to_css());
		ctx.begin_path();
		ctx.move_to(a.x, a.y);
		ctx.line_to(b.x, b.y);
		ctx.stroke();
	}
}

fn draw_effects(ctx: &CanvasRenderingContext2d, effects: &Effects, theme: &Theme) {
	if effects.rings.is_empty() && effects.sparks.is_empty() {
		return;
	}
	let style = &theme.effect;
	let saturation = theme.point.saturation;

	ctx.set_line_width(style.ring_width);
	for ring in effects.rings.iter() {
		let color = Color::from_hsl(ring.hue, saturation, style.ring_lightness);
		ctx.set_stroke_style_str(&color.with_alpha(ring.life.ratio() * 0.8).to_css());
		ctx.begin_path();
		let _ = ctx.arc(ring.x, ring.y, ring.radius, 0.0, PI * 2.0);
		ctx.stroke();
	}

	for spark in effects.sparks.iter() {
		let fade = spark.life.ratio();
		let color = Color::from_hsl(spark.hue, saturation, style.spark_lightness);
		ctx.set_fill_style_str(&color.lighten(0.3 * fade).with_alpha(fade).to_css());
		ctx.begin_path();
		let _ = ctx.arc(spark.x, spark.y, spark.radius, 0.0, PI * 2.0);
		ctx.fill();
	}
}

fn render_depth(state: &NetworkState, scene: &DepthScene, ctx: &CanvasRenderingContext2d) {
	let theme = &state.theme;
	let viewport = &state.viewport;
	let config = &state.config.depth;

	draw_background(ctx, viewport, theme, None);

	let projected: Vec<Option<Projected>> = scene
		.points
		.iter()
		.map(|p| scene.project(p.position, viewport, config))
		.collect();

	let _ = ctx.set_global_composite_operation("lighter");

	// Links: group by fogged opacity so each band is a single path.
	let link = &theme.link;
	let link_color = Color::from_hsl(link.hue, link.saturation, link.lightness);
	let band_step = config.link_opacity / DEPTH_LINK_BANDS as f64;
	let mut bands: Vec<Vec<(Projected, Projected)>> = vec![Vec::new(); DEPTH_LINK_BANDS];
	for l in &state.links {
		let (Some(a), Some(b)) = (projected[l.a], projected[l.b]) else {
			continue;
		};
		let alpha = l.opacity * (a.visibility + b.visibility) / 2.0;
		if alpha <= 0.0 || band_step <= 0.0 {
			continue;
		}
		let band = ((alpha / band_step) as usize).min(DEPTH_LINK_BANDS - 1);
		bands[band].push((a, b));
	}

	ctx.set_line_width(link.width);
	for (i, segments) in bands.iter().enumerate() {
		if segments.is_empty() {
			continue;
		}
		let alpha = band_step * (i as f64 + 0.5);
		ctx.set_stroke_style_str(&link_color.with_alpha(alpha).to_css());
		ctx.begin_path();
		for (a, b) in segments {
			ctx.move_to(a.x, a.y);
			ctx.line_to(b.x, b.y);
		}
		ctx.stroke();
	}

	// Points
	let style = &theme.point;
	let point_color = Color::from_hsl(style.hue_min, style.saturation, style.lightness);
	let size = if state.config.is_mobile(viewport) {
		config.mobile_point_size
	} else {
		config.desktop_point_size
	};
	for p in projected.iter().flatten() {
		let alpha = style.opacity * p.visibility;
		if alpha < 0.01 {
			continue;
		}
		let radius = (size * p.scale).max(0.5);
		ctx.set_fill_style_str(&point_color.with_alpha(alpha).to_css());
		ctx.begin_path();
		let _ = ctx.arc(p.x, p.y, radius, 0.0, PI * 2.0);
		ctx.fill();
	}

	let _ = ctx.set_global_composite_operation("source-over");
}
