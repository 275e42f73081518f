//! Animated particle network background.
//!
//! Renders a field of drifting points on a full-viewport HTML canvas with:
//! - Proximity links whose opacity falls off with distance
//! - A pointer field that pulls (or, while pressed, pushes) nearby points
//! - Spark and ring bursts when the pointer brushes a point or taps
//! - Optional motion trails, frame-rate cap and reduced-motion handling
//! - A rotating 3-D point cloud variant with camera parallax
//!
//! The simulation modules are plain Rust and independent of the browser;
//! only `surface`, `render` and `component` touch `web-sys`.
//!
//! # Example
//!
//! ```ignore
//! use particle_network::{NetworkConfig, ParticleNetworkCanvas};
//!
//! let config = NetworkConfig { max_link_distance: 110.0, ..Default::default() };
//! view! { <ParticleNetworkCanvas config=config /> }
//! ```

mod component;
pub mod config;
mod depth;
mod effects;
mod links;
mod pointer;
mod points;
mod render;
mod scheduler;
mod state;
mod surface;
pub mod theme;

pub use component::ParticleNetworkCanvas;
pub use config::{DepthConfig, NetworkConfig, Variant};
pub use state::Viewport;
pub use theme::Theme;
