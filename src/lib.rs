//! particle-network: animated, pointer-reactive particle background.
//!
//! This crate provides a WASM canvas component that draws a drifting network of
//! points with proximity links, pointer forces and spark bursts behind a page.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::particle_network::{
	DepthConfig, NetworkConfig, ParticleNetworkCanvas, Theme, Variant, Viewport,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("particle-network: logging initialized");
}

/// Load configuration overrides from a script element with id="network-config".
/// Expected format: JSON object with any subset of [`NetworkConfig`] fields.
fn load_config() -> Option<NetworkConfig> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("network-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match NetworkConfig::from_json(&json_text) {
		Ok(config) => {
			info!(
				"particle-network: loaded {:?} config, theme '{}'",
				config.variant,
				config.theme_name()
			);
			Some(config)
		}
		Err(e) => {
			warn!("particle-network: failed to parse config: {}", e);
			None
		}
	}
}

/// Main application component.
/// Loads configuration from the DOM and mounts the background canvas.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_config().unwrap_or_default();

	view! {
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />
		<Meta name="color-scheme" content="dark" />

		<ParticleNetworkCanvas config=config />
	}
}
