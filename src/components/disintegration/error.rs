//! Errors raised at the DOM boundary.
//!
//! The simulation itself never fails; these only surface while acquiring the
//! window, the drawing context, or the offscreen glyph canvas.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Errors that can occur while setting up or using the drawing surface
#[derive(Debug, Error)]
pub enum SurfaceError {
	/// No global `window` (not running in a browser)
	#[error("no window available")]
	NoWindow,

	/// The window has no document
	#[error("no document available")]
	NoDocument,

	/// `getContext("2d")` returned nothing
	#[error("2d context unavailable on {0}")]
	NoContext(&'static str),

	/// A DOM call threw
	#[error("javascript error: {0}")]
	Js(String),
}

impl From<JsValue> for SurfaceError {
	fn from(value: JsValue) -> Self {
		SurfaceError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
	}
}
