//! Geometry and pointer state shared by the rasterizer, simulation, and host.

use serde::Deserialize;

use super::config::PointerConfig;

/// A 2D vector in surface (CSS pixel) coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
	pub x: f64,
	pub y: f64,
}

impl Vec2 {
	pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	pub fn length(self) -> f64 {
		(self.x * self.x + self.y * self.y).sqrt()
	}

	pub fn distance(self, other: Self) -> f64 {
		(self - other).length()
	}
}

impl std::ops::Add for Vec2 {
	type Output = Self;

	fn add(self, rhs: Self) -> Self {
		Self::new(self.x + rhs.x, self.y + rhs.y)
	}
}

impl std::ops::AddAssign for Vec2 {
	fn add_assign(&mut self, rhs: Self) {
		self.x += rhs.x;
		self.y += rhs.y;
	}
}

impl std::ops::Sub for Vec2 {
	type Output = Self;

	fn sub(self, rhs: Self) -> Self {
		Self::new(self.x - rhs.x, self.y - rhs.y)
	}
}

impl std::ops::Mul<f64> for Vec2 {
	type Output = Self;

	fn mul(self, rhs: f64) -> Self {
		Self::new(self.x * rhs, self.y * rhs)
	}
}

impl std::ops::MulAssign<f64> for Vec2 {
	fn mul_assign(&mut self, rhs: f64) {
		self.x *= rhs;
		self.y *= rhs;
	}
}

/// Axis-aligned rectangle. Used for the hero anchor and the drawing surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
pub struct Rect {
	pub x: f64,
	pub y: f64,
	pub width: f64,
	pub height: f64,
}

impl Rect {
	pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
		Self {
			x,
			y,
			width,
			height,
		}
	}

	/// True when either dimension is zero (or negative).
	pub fn is_empty(&self) -> bool {
		self.width <= 0.0 || self.height <= 0.0
	}

	pub fn center(&self) -> Vec2 {
		Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
	}

	/// Inclusive containment test.
	pub fn contains(&self, p: Vec2) -> bool {
		p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
	}

	/// Whether `other` differs in size by more than `tolerance` on either axis.
	pub fn size_differs(&self, other: &Rect, tolerance: f64) -> bool {
		(self.width - other.width).abs() > tolerance || (self.height - other.height).abs() > tolerance
	}

	pub fn translated(&self, delta: Vec2) -> Self {
		Self {
			x: self.x + delta.x,
			y: self.y + delta.y,
			..*self
		}
	}
}

/// Bounding box of a single rendered character.
///
/// Boxes are laid out left to right from the text's horizontal origin and
/// centred vertically on the text's middle line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphBox {
	pub ch: char,
	pub rect: Rect,
}

/// Pointer position and motion, written by the host and read once per frame.
#[derive(Clone, Debug, PartialEq)]
pub struct PointerState {
	pub position: Vec2,
	pub previous: Vec2,
	/// Displacement magnitude since the previous move event, scaled and capped.
	pub velocity: f64,
	/// Engine clock (ms) of the last pointer move or repulsion.
	pub last_interaction_ms: f64,
}

impl PointerState {
	/// A pointer that has never entered the surface.
	pub fn parked(config: &PointerConfig) -> Self {
		let parked = Vec2::new(config.parked, config.parked);
		Self {
			position: parked,
			previous: parked,
			velocity: 0.0,
			last_interaction_ms: 0.0,
		}
	}

	/// Record a move to `to` at engine time `now_ms`.
	///
	/// Velocity is raw per-event displacement, not time-normalized, so the
	/// attract/repel threshold depends on the host's event rate.
	pub fn move_to(&mut self, to: Vec2, now_ms: f64, config: &PointerConfig) {
		let travelled = to.distance(self.previous);
		self.velocity = (travelled / config.velocity_divisor).min(config.max_velocity);
		self.previous = to;
		self.position = to;
		self.last_interaction_ms = now_ms;
	}

	/// Park the pointer off-surface. The previous position is kept.
	pub fn leave(&mut self, config: &PointerConfig) {
		self.position = Vec2::new(config.parked, config.parked);
		self.velocity = 0.0;
	}
}
