//! Browser-side drawing surface and glyph painting.
//!
//! [`Surface`] owns the visible canvas and keeps its backing store scaled to
//! the device pixel ratio. [`CanvasPainter`] renders text onto an offscreen
//! canvas and reads the alpha channel back for particle sampling.

use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, Window};

use super::error::SurfaceError;
use super::glyphs::{AlphaMask, FontSpec, GlyphPainter};
use super::types::{Rect, Vec2};

/// Acquire a 2D context, optionally tuned for frequent pixel reads.
fn context_2d(
	canvas: &HtmlCanvasElement,
	label: &'static str,
	read_back: bool,
) -> Result<CanvasRenderingContext2d, SurfaceError> {
	let context = if read_back {
		let options = js_sys::Object::new();
		js_sys::Reflect::set(&options, &JsValue::from_str("willReadFrequently"), &JsValue::TRUE)?;
		canvas.get_context_with_context_options("2d", &options)?
	} else {
		canvas.get_context("2d")?
	};
	context
		.ok_or(SurfaceError::NoContext(label))?
		.dyn_into::<CanvasRenderingContext2d>()
		.map_err(|_| SurfaceError::NoContext(label))
}

/// Current viewport size in CSS pixels.
pub fn viewport_size(window: &Window) -> Result<(f64, f64), SurfaceError> {
	Ok((
		window.inner_width()?.as_f64().unwrap_or(0.0),
		window.inner_height()?.as_f64().unwrap_or(0.0),
	))
}

/// Read the anchor element's viewport rectangle. `None` if it is not mounted.
pub fn read_hero_rect(document: &Document, anchor_id: &str) -> Option<Rect> {
	let element = document.get_element_by_id(anchor_id)?;
	let r = element.get_bounding_client_rect();
	Some(Rect::new(r.left(), r.top(), r.width(), r.height()))
}

/// The visible, full-viewport canvas.
pub struct Surface {
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
	dpr: f64,
	width: f64,
	height: f64,
}

impl Surface {
	/// Wrap `canvas`, fixing the pixel ratio at `min(devicePixelRatio, max_dpr)`.
	pub fn attach(canvas: HtmlCanvasElement, window: &Window, max_dpr: f64) -> Result<Self, SurfaceError> {
		let ctx = context_2d(&canvas, "surface", false)?;
		let ratio = window.device_pixel_ratio();
		let dpr = (if ratio > 0.0 { ratio } else { 1.0 }).min(max_dpr);
		Ok(Self {
			canvas,
			ctx,
			dpr,
			width: 0.0,
			height: 0.0,
		})
	}

	/// Size the canvas to the viewport and return the CSS size.
	///
	/// The backing store is `floor(size * dpr)` and the context transform maps
	/// CSS pixels onto it, so drawing code works in CSS pixels throughout.
	pub fn fit_viewport(&mut self, window: &Window) -> Result<(f64, f64), SurfaceError> {
		let (w, h) = viewport_size(window)?;
		let style = self.canvas.style();
		style.set_property("width", &format!("{w}px"))?;
		style.set_property("height", &format!("{h}px"))?;
		self.canvas.set_width((w * self.dpr).floor() as u32);
		self.canvas.set_height((h * self.dpr).floor() as u32);
		self.ctx.set_transform(self.dpr, 0.0, 0.0, self.dpr, 0.0, 0.0)?;
		self.width = w;
		self.height = h;
		Ok((w, h))
	}

	pub fn context(&self) -> &CanvasRenderingContext2d {
		&self.ctx
	}

	pub fn size(&self) -> (f64, f64) {
		(self.width, self.height)
	}
}

/// Paints glyphs on a detached offscreen canvas.
pub struct CanvasPainter {
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
}

impl CanvasPainter {
	pub fn new(document: &Document) -> Result<Self, SurfaceError> {
		let canvas: HtmlCanvasElement = document
			.create_element("canvas")?
			.dyn_into()
			.map_err(|_| SurfaceError::Js("created element is not a canvas".to_string()))?;
		let ctx = context_2d(&canvas, "offscreen glyph canvas", true)?;
		Ok(Self { canvas, ctx })
	}
}

impl GlyphPainter for CanvasPainter {
	fn measure(&mut self, text: &str, font: &FontSpec) -> Result<f64, SurfaceError> {
		self.ctx.set_font(&font.css);
		Ok(self.ctx.measure_text(text)?.width())
	}

	fn paint(
		&mut self,
		text: &str,
		font: &FontSpec,
		center: Vec2,
		width: u32,
		height: u32,
	) -> Result<AlphaMask, SurfaceError> {
		// Resizing resets context state, so it happens before any styling.
		if self.canvas.width() != width || self.canvas.height() != height {
			self.canvas.set_width(width);
			self.canvas.set_height(height);
		}
		let (w, h) = (width as f64, height as f64);
		self.ctx.clear_rect(0.0, 0.0, w, h);
		self.ctx.set_font(&font.css);
		self.ctx.set_text_align("center");
		self.ctx.set_text_baseline("middle");
		self.ctx.set_fill_style_str("rgba(255, 255, 255, 1)");
		self.ctx.fill_text(text, center.x, center.y)?;

		let pixels = self.ctx.get_image_data(0.0, 0.0, w, h)?.data();
		Ok(AlphaMask::from_rgba(width, height, &pixels.0))
	}
}
