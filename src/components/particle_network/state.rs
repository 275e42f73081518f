//! Simulation state for one background instance.
//!
//! Owns every entity plus the pointer and viewport records that event
//! listeners write between frames. Created once when the component mounts,
//! then advanced by the animation loop through [`NetworkState::tick`].

use log::debug;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::config::{NetworkConfig, Variant};
use super::depth::DepthScene;
use super::effects::{Burst, Effects};
use super::links::{Link, LinkParams, collect_links};
use super::pointer::PointerState;
use super::points::{self, Point};
use super::theme::Theme;

/// Drawing surface size in CSS pixels plus the device pixel ratio in use.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
	pub width: f64,
	pub height: f64,
	pub pixel_ratio: f64,
}

/// The entities of the active variant.
#[derive(Clone, Debug)]
pub enum Scene {
	Galaxy { points: Vec<Point>, effects: Effects },
	Depth(DepthScene),
}

/// Core state advanced once per rendered frame.
pub struct NetworkState {
	pub config: NetworkConfig,
	pub theme: Theme,
	pub viewport: Viewport,
	pub pointer: PointerState,
	pub scene: Scene,
	/// Connections found by the last tick.
	pub links: Vec<Link>,
	/// Seconds simulated so far.
	pub elapsed: f64,
	rng: SmallRng,
	triggers: Vec<usize>,
}

impl NetworkState {
	pub fn new(config: NetworkConfig, theme: Theme, viewport: Viewport, seed: u64) -> Self {
		let mut rng = SmallRng::seed_from_u64(seed);
		let scene = Self::build_scene(&config, &theme, &viewport, &mut rng);

		Self {
			config,
			theme,
			viewport,
			pointer: PointerState::default(),
			scene,
			links: Vec::new(),
			elapsed: 0.0,
			rng,
			triggers: Vec::new(),
		}
	}

	fn build_scene(
		config: &NetworkConfig,
		theme: &Theme,
		viewport: &Viewport,
		rng: &mut SmallRng,
	) -> Scene {
		let count = config.point_count(viewport);
		match config.variant {
			Variant::Galaxy => Scene::Galaxy {
				points: points::seed(rng, count, viewport, config, &theme.point),
				effects: Effects::new(config),
			},
			Variant::Depth => Scene::Depth(DepthScene::new(rng, count, &config.depth)),
		}
	}

	pub fn point_count(&self) -> usize {
		match &self.scene {
			Scene::Galaxy { points, .. } => points.len(),
			Scene::Depth(scene) => scene.points.len(),
		}
	}

	/// Advance the simulation by `dt` seconds at wall-clock time `now_ms`.
	pub fn tick(&mut self, now_ms: f64, dt: f64) {
		let frames = dt * 60.0;
		self.elapsed += dt;

		match &mut self.scene {
			Scene::Galaxy { points, effects } => {
				self.triggers.clear();
				let trigger_sq = self.config.trigger_radius * self.config.trigger_radius;

				for (i, p) in points.iter_mut().enumerate() {
					let outcome = p.step(
						frames,
						&self.pointer,
						&self.viewport,
						&self.config,
						&self.theme.point,
						&mut self.rng,
					);
					if let Some(dist_sq) = outcome.pointer_distance_sq {
						if dist_sq < trigger_sq && p.can_trigger(now_ms) {
							self.triggers.push(i);
						}
					}
				}

				for &i in &self.triggers {
					let p = &mut points[i];
					effects.burst(
						Burst {
							x: p.x,
							y: p.y,
							hue: p.hue,
							inherit: (self.pointer.vx, self.pointer.vy),
						},
						&self.config,
						self.theme.effect.hue_jitter,
						&mut self.rng,
					);
					p.kick(
						&mut self.rng,
						self.config.kick_strength,
						now_ms,
						self.config.trigger_cooldown_ms,
					);
				}

				effects.sweep(frames, &self.config);

				let params = LinkParams {
					max_distance: self.config.max_link_distance,
					max_opacity: self.config.link_max_opacity,
					pointer_boost: self.config.link_pointer_boost,
					boost_radius: self.config.link_boost_radius,
				};
				collect_links(points, &params, self.pointer.position(), &mut self.links);
			}
			Scene::Depth(scene) => {
				let target = self.pointer.normalized(&self.viewport);
				scene.step(frames, target, &self.config.depth);

				let params = LinkParams {
					max_distance: self.config.depth.max_link_distance,
					max_opacity: self.config.depth.link_opacity,
					pointer_boost: 0.0,
					boost_radius: 0.0,
				};
				collect_links(&scene.points, &params, None, &mut self.links);
			}
		}
	}

	/// Tap or click: burst at the pointer without touching any point.
	pub fn tap(&mut self, x: f64, y: f64) {
		self.pointer.press(x, y);
		if let Scene::Galaxy { effects, .. } = &mut self.scene {
			let style = &self.theme.point;
			effects.burst(
				Burst {
					x,
					y,
					hue: (style.hue_min + style.hue_max) / 2.0,
					inherit: (0.0, 0.0),
				},
				&self.config,
				self.theme.effect.hue_jitter,
				&mut self.rng,
			);
		}
	}

	/// Apply a new viewport, reseeding or rescaling the galaxy.
	pub fn resize(&mut self, viewport: Viewport) {
		let previous = self.viewport;
		self.viewport = viewport;

		if self.config.reseed_on_resize {
			debug!(
				"particle-network: reseeding for {}x{}",
				viewport.width, viewport.height
			);
			self.scene = Self::build_scene(&self.config, &self.theme, &viewport, &mut self.rng);
			self.links.clear();
		} else if let Scene::Galaxy { points, .. } = &mut self.scene {
			points::rescale(points, &previous, &viewport);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn viewport() -> Viewport {
		Viewport {
			width: 1024.0,
			height: 768.0,
			pixel_ratio: 1.0,
		}
	}

	fn single_point_state(x: f64, y: f64, config: NetworkConfig) -> NetworkState {
		let mut state = NetworkState::new(config, Theme::galaxy(), viewport(), 42);
		if let Scene::Galaxy { points, .. } = &mut state.scene {
			points.truncate(1);
			let p = &mut points[0];
			p.x = x;
			p.y = y;
			p.vx = 0.0;
			p.vy = 0.0;
			p.hue_velocity = 0.0;
		}
		state
	}

	fn galaxy(state: &NetworkState) -> (&Vec<Point>, &Effects) {
		match &state.scene {
			Scene::Galaxy { points, effects } => (points, effects),
			Scene::Depth(_) => panic!("expected galaxy scene"),
		}
	}

	#[test]
	fn seeds_by_viewport() {
		let state = NetworkState::new(NetworkConfig::default(), Theme::galaxy(), viewport(), 1);
		assert_eq!(state.point_count(), NetworkConfig::default().point_count(&viewport()));
	}

	#[test]
	fn coincident_pointer_is_stable() {
		let config = NetworkConfig {
			drift: 0.0,
			trigger_radius: 0.0,
			..Default::default()
		};
		let mut state = single_point_state(500.0, 384.0, config);
		state.pointer.move_to(500.0, 384.0);
		state.tick(16.0, 1.0 / 60.0);

		let (points, _) = galaxy(&state);
		assert_eq!((points[0].x, points[0].y), (500.0, 384.0));
		assert!(points[0].vx.is_finite() && points[0].vy.is_finite());
	}

	#[test]
	fn proximity_triggers_once_per_cooldown() {
		let config = NetworkConfig {
			drift: 0.0,
			field_force: 0.0,
			kick_strength: 0.0,
			sparks_per_burst: 5,
			..Default::default()
		};
		let mut state = single_point_state(300.0, 300.0, config);
		state.pointer.move_to(310.0, 300.0);

		state.tick(1_000.0, 1.0 / 60.0);
		{
			let (_, effects) = galaxy(&state);
			assert_eq!(effects.rings.len(), 1);
			assert_eq!(effects.sparks.len(), 5);
		}

		// still inside cooldown
		state.tick(1_100.0, 1.0 / 60.0);
		assert_eq!(galaxy(&state).1.rings.len(), 1);

		// cooldown elapsed
		state.tick(2_000.0, 1.0 / 60.0);
		assert_eq!(galaxy(&state).1.rings.len(), 2);
	}

	#[test]
	fn no_trigger_without_pointer() {
		let config = NetworkConfig {
			drift: 0.0,
			..Default::default()
		};
		let mut state = single_point_state(300.0, 300.0, config);
		state.tick(1_000.0, 1.0 / 60.0);
		assert!(galaxy(&state).1.rings.is_empty());
	}

	#[test]
	fn tap_bursts_at_pointer() {
		let mut state = NetworkState::new(NetworkConfig::default(), Theme::galaxy(), viewport(), 3);
		state.tap(40.0, 60.0);
		let (_, effects) = galaxy(&state);
		let ring = effects.rings.iter().next().unwrap();
		assert_eq!((ring.x, ring.y), (40.0, 60.0));
		assert_eq!(effects.sparks.len(), NetworkConfig::default().sparks_per_burst);
		assert!(state.pointer.pressed);
	}

	#[test]
	fn links_follow_positions() {
		let config = NetworkConfig {
			drift: 0.0,
			link_pointer_boost: 0.0,
			link_max_opacity: 1.0,
			max_link_distance: 100.0,
			..Default::default()
		};
		let mut state = NetworkState::new(config, Theme::galaxy(), viewport(), 5);
		if let Scene::Galaxy { points, .. } = &mut state.scene {
			points.truncate(2);
			for (p, x) in points.iter_mut().zip([0.0, 50.0]) {
				p.x = x;
				p.y = 0.0;
				p.vx = 0.0;
				p.vy = 0.0;
			}
		}
		state.tick(0.0, 1.0 / 60.0);
		assert_eq!(state.links.len(), 1);
		assert!((state.links[0].opacity - 0.5).abs() < 1e-9);
	}

	#[test]
	fn resize_reseeds_or_rescales() {
		let mut state = NetworkState::new(NetworkConfig::default(), Theme::galaxy(), viewport(), 8);
		let small = Viewport {
			width: 400.0,
			height: 700.0,
			pixel_ratio: 2.0,
		};
		state.resize(small);
		assert_eq!(state.viewport, small);
		assert_eq!(state.point_count(), NetworkConfig::default().point_count(&small));

		let config = NetworkConfig {
			reseed_on_resize: false,
			..Default::default()
		};
		let mut state = NetworkState::new(config, Theme::galaxy(), viewport(), 8);
		let before = state.point_count();
		state.resize(small);
		assert_eq!(state.point_count(), before);
		let (points, _) = galaxy(&state);
		assert!(points.iter().all(|p| p.x <= small.width && p.y <= small.height));
	}

	#[test]
	fn depth_variant_ticks() {
		let config = NetworkConfig {
			variant: Variant::Depth,
			depth: super::super::config::DepthConfig {
				desktop_points: 120,
				..Default::default()
			},
			..Default::default()
		};
		let mut state = NetworkState::new(config, Theme::depth(), viewport(), 12);
		assert_eq!(state.point_count(), 120);
		state.pointer.move_to(1024.0, 0.0);
		for i in 0..10 {
			state.tick(i as f64 * 16.0, 1.0 / 60.0);
		}
		match &state.scene {
			Scene::Depth(scene) => assert!(scene.camera[0] > 0.0 && scene.camera[1] > 0.0),
			Scene::Galaxy { .. } => panic!("expected depth scene"),
		}
		assert!(state.links.iter().all(|l| l.opacity <= 0.15));
	}
}
