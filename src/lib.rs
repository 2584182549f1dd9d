//! disintegration-canvas: particle lettering that blows apart under the pointer.
//!
//! This crate provides a WASM-based canvas component that renders a line of
//! hero text as dust particles over a drifting starfield, plus the host page
//! that mounts it.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::disintegration::{
	BlockGlyphPainter, CanvasSettings, DisintegrationCanvas, EngineConfig, EngineEvent, GlyphPainter, ParticleEngine,
	Rect, SurfaceError, Theme, ThemeMode, Vec2,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("disintegration-canvas: logging initialized");
}

/// Load canvas settings from a script element with id="canvas-settings".
/// Expected format: JSON with optional { text, theme, anchor_id, config }.
fn load_settings() -> Option<CanvasSettings> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("canvas-settings")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match serde_json::from_str::<CanvasSettings>(&json_text) {
		Ok(settings) => {
			info!(
				"disintegration-canvas: loaded settings for {:?} ({:?} theme)",
				settings.text, settings.theme
			);
			Some(settings)
		}
		Err(e) => {
			warn!("disintegration-canvas: failed to parse canvas settings: {}", e);
			None
		}
	}
}

/// Main application component.
/// Reads settings from the DOM and renders the hero with the lettering canvas behind it.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let CanvasSettings {
		text,
		theme,
		anchor_id,
		config,
	} = load_settings().unwrap_or_default();
	let data_theme = match theme {
		ThemeMode::Dark => "dark",
		ThemeMode::Light => "light",
	};
	let heading = text.clone();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme=data_theme />
		<Title text=text.clone() />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<DisintegrationCanvas text=text theme=theme anchor_id=anchor_id.clone() config=config />
		<section class="hero">
			<h1 class="sr-only">{heading}</h1>
			<div id=anchor_id class="lettering-anchor" aria-hidden="true"></div>
		</section>
	}
}
