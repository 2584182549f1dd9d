//! Glyph rasterization: text to alpha mask plus per-character boxes.
//!
//! The fitting geometry (font auto-size, centring, box layout) is pure and
//! lives in [`rasterize`]. Actual text painting goes through the
//! [`GlyphPainter`] seam so the same layout drives the browser canvas painter
//! and the headless [`BlockGlyphPainter`].

use log::{debug, warn};

use super::config::GlyphConfig;
use super::error::SurfaceError;
use super::types::{GlyphBox, Rect, Vec2};

/// A resolved font: pixel size plus the CSS shorthand a canvas understands.
#[derive(Clone, Debug, PartialEq)]
pub struct FontSpec {
	pub px: f64,
	pub css: String,
}

impl FontSpec {
	pub fn new(px: f64, config: &GlyphConfig) -> Self {
		Self {
			px,
			css: config.font_css(px),
		}
	}
}

/// Alpha channel of a surface-sized bitmap, row-major.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AlphaMask {
	pub width: u32,
	pub height: u32,
	pub alpha: Vec<u8>,
}

impl AlphaMask {
	/// A fully transparent mask.
	pub fn blank(width: u32, height: u32) -> Self {
		Self {
			width,
			height,
			alpha: vec![0; width as usize * height as usize],
		}
	}

	/// Build from RGBA bytes as returned by `getImageData`.
	pub fn from_rgba(width: u32, height: u32, rgba: &[u8]) -> Self {
		Self {
			width,
			height,
			alpha: rgba.chunks_exact(4).map(|px| px[3]).collect(),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.width == 0 || self.height == 0
	}

	/// Alpha at `(x, y)`, zero outside the mask.
	pub fn alpha_at(&self, x: u32, y: u32) -> u8 {
		if x >= self.width || y >= self.height {
			return 0;
		}
		self.alpha
			.get(y as usize * self.width as usize + x as usize)
			.copied()
			.unwrap_or(0)
	}

	/// Number of pixels whose alpha exceeds `threshold`.
	pub fn coverage(&self, threshold: u8) -> usize {
		self.alpha.iter().filter(|&&a| a > threshold).count()
	}
}

/// Paints text for the rasterizer.
///
/// Implementors render `text` horizontally and vertically centred on `center`
/// (canvas `textAlign = "center"`, `textBaseline = "middle"`).
pub trait GlyphPainter {
	/// Advance width of `text` in the given font.
	fn measure(&mut self, text: &str, font: &FontSpec) -> Result<f64, SurfaceError>;

	/// Paint `text` into a fresh `width` x `height` mask.
	fn paint(
		&mut self,
		text: &str,
		font: &FontSpec,
		center: Vec2,
		width: u32,
		height: u32,
	) -> Result<AlphaMask, SurfaceError>;
}

/// Where the text landed and how big it is.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GlyphLayout {
	pub font_px: f64,
	pub center: Vec2,
	pub text_width: f64,
	pub boxes: Vec<GlyphBox>,
}

impl GlyphLayout {
	/// Whether `p` lies inside any glyph box.
	pub fn contains(&self, p: Vec2) -> bool {
		self.boxes.iter().any(|b| b.rect.contains(p))
	}
}

/// Output of one rasterization pass.
#[derive(Clone, Debug, Default)]
pub struct Rasterized {
	pub mask: AlphaMask,
	pub layout: GlyphLayout,
}

/// Fit `text` into `hero` and paint it onto a `surface`-sized mask.
///
/// An empty surface or hero rectangle yields an empty mask and no boxes. So
/// does a painter failure, which is logged.
pub fn rasterize<P: GlyphPainter + ?Sized>(
	painter: &mut P,
	text: &str,
	hero: &Rect,
	surface: (u32, u32),
	config: &GlyphConfig,
) -> Rasterized {
	let (width, height) = surface;
	if width == 0 || height == 0 || hero.is_empty() {
		return Rasterized::default();
	}

	match fit_and_paint(painter, text, hero, surface, config) {
		Ok(r) => r,
		Err(e) => {
			warn!("disintegration-canvas: glyph rasterization failed: {}", e);
			Rasterized::default()
		}
	}
}

fn fit_and_paint<P: GlyphPainter + ?Sized>(
	painter: &mut P,
	text: &str,
	hero: &Rect,
	(width, height): (u32, u32),
	config: &GlyphConfig,
) -> Result<Rasterized, SurfaceError> {
	let mut size = hero.width.min(hero.height) * config.initial_fraction;
	let measured = painter.measure(text, &FontSpec::new(size, config))?;
	if measured > 0.0 {
		size *= hero.width * config.width_fill / measured;
	}
	size = size.min(hero.height * config.height_cap);

	let font = FontSpec::new(size, config);
	let center = hero.center();
	let mask = painter.paint(text, &font, center, width, height)?;

	let text_width = painter.measure(text, &font)?;
	let box_height = size * config.box_height;
	let mut x = center.x - text_width / 2.0;
	let mut boxes = Vec::with_capacity(text.chars().count());
	let mut buf = [0u8; 4];
	for ch in text.chars() {
		let w = painter.measure(ch.encode_utf8(&mut buf), &font)?;
		let w = if w > 0.0 { w } else { 1.0 };
		boxes.push(GlyphBox {
			ch,
			rect: Rect::new(x, center.y - box_height / 2.0, w, box_height),
		});
		x += w;
	}

	debug!(
		"disintegration-canvas: rasterized {:?} at {:.1}px ({} boxes)",
		text,
		size,
		boxes.len()
	);

	Ok(Rasterized {
		mask,
		layout: GlyphLayout {
			font_px: size,
			center,
			text_width,
			boxes,
		},
	})
}

/// Headless painter that draws every non-whitespace character as a solid block.
///
/// Glyphs have a fixed advance of `advance * px`; ink covers the middle
/// `ink_width` of the advance and `ink_height * px` vertically. Useful where no
/// canvas exists, such as native tests.
#[derive(Clone, Debug)]
pub struct BlockGlyphPainter {
	pub advance: f64,
	pub ink_width: f64,
	pub ink_height: f64,
}

impl Default for BlockGlyphPainter {
	fn default() -> Self {
		Self {
			advance: 0.6,
			ink_width: 0.8,
			ink_height: 0.7,
		}
	}
}

impl GlyphPainter for BlockGlyphPainter {
	fn measure(&mut self, text: &str, font: &FontSpec) -> Result<f64, SurfaceError> {
		Ok(text.chars().count() as f64 * self.advance * font.px)
	}

	fn paint(
		&mut self,
		text: &str,
		font: &FontSpec,
		center: Vec2,
		width: u32,
		height: u32,
	) -> Result<AlphaMask, SurfaceError> {
		let mut mask = AlphaMask::blank(width, height);
		let advance = self.advance * font.px;
		let inset = advance * (1.0 - self.ink_width) / 2.0;
		let half_h = self.ink_height * font.px / 2.0;
		let left = center.x - self.measure(text, font)? / 2.0;

		for (i, ch) in text.chars().enumerate() {
			if ch.is_whitespace() {
				continue;
			}
			let x0 = left + i as f64 * advance + inset;
			let ink = Rect::new(x0, center.y - half_h, advance - 2.0 * inset, 2.0 * half_h);
			fill_rect(&mut mask, &ink);
		}
		Ok(mask)
	}
}

/// Fill every pixel whose centre lies inside `rect`.
fn fill_rect(mask: &mut AlphaMask, rect: &Rect) {
	let x_start = (rect.x - 0.5).ceil().max(0.0) as u32;
	let y_start = (rect.y - 0.5).ceil().max(0.0) as u32;
	let x_end = ((rect.x + rect.width - 0.5).floor() + 1.0).clamp(0.0, mask.width as f64) as u32;
	let y_end = ((rect.y + rect.height - 0.5).floor() + 1.0).clamp(0.0, mask.height as f64) as u32;
	for y in y_start..y_end {
		let row = y as usize * mask.width as usize;
		for x in x_start..x_end {
			mask.alpha[row + x as usize] = 255;
		}
	}
}
