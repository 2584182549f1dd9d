//! Tunable constants for the lettering effect.
//!
//! Every number the simulation depends on lives here rather than in ambient
//! globals. All sections deserialize with defaults, so a host page may
//! override a single field and inherit the rest.
//!
//! # Sections
//!
//! - [`PhysicsConfig`]: sampling grid, pointer forces, spring, friction, opacity.
//! - [`PointerConfig`]: parking position and velocity scaling.
//! - [`GlyphConfig`]: font selection and auto-fit geometry.
//! - [`StarfieldConfig`]: star drift, radii, and shooting-streak lifecycle.

use serde::Deserialize;

use super::theme::ThemeMode;

/// Everything a host page can say about the canvas it embeds.
///
/// Read from a JSON `<script id="canvas-settings">` element; missing fields
/// fall back to the defaults below.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct CanvasSettings {
	/// Text rendered as particles.
	pub text: String,
	pub theme: ThemeMode,
	/// Id of the element whose rectangle the lettering is placed in.
	pub anchor_id: String,
	pub config: EngineConfig,
}

impl Default for CanvasSettings {
	fn default() -> Self {
		Self {
			text: "Shango Bashi".to_string(),
			theme: ThemeMode::Dark,
			anchor_id: "lettering-anchor".to_string(),
			config: EngineConfig::default(),
		}
	}
}

/// Complete engine configuration.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
	pub physics: PhysicsConfig,
	pub pointer: PointerConfig,
	pub glyphs: GlyphConfig,
	pub starfield: StarfieldConfig,
	/// Upper bound on the device pixel ratio used for the backing store.
	pub max_device_pixel_ratio: f64,
	/// Hero size changes at or below this many pixels count as a pure move.
	pub hero_resize_tolerance: f64,
}

impl Default for EngineConfig {
	fn default() -> Self {
		Self {
			physics: PhysicsConfig::default(),
			pointer: PointerConfig::default(),
			glyphs: GlyphConfig::default(),
			starfield: StarfieldConfig::default(),
			max_device_pixel_ratio: 2.0,
			hero_resize_tolerance: 0.5,
		}
	}
}

/// Particle sampling and per-frame force constants.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
	/// Sampling stride over the glyph mask, in surface pixels.
	pub grid_gap: u32,
	/// Mask alpha must exceed this to spawn a particle (filters antialiasing).
	pub alpha_threshold: u8,
	pub radius_min: f64,
	pub radius_spread: f64,
	pub interaction_radius: f64,
	/// Pointer velocity below this attracts, at or above it repels.
	pub speed_threshold: f64,
	pub attract: f64,
	/// Perpendicular impulse added while attracting.
	pub swirl: f64,
	pub burst: f64,
	/// Fraction of `burst` applied at zero distance.
	pub burst_fraction: f64,
	pub spring: f64,
	pub friction: f64,
	pub opacity_floor: f64,
	pub opacity_decay: f64,
	pub opacity_recovery: f64,
	/// Particles at or below this opacity are not drawn.
	pub visible_threshold: f64,
	pub reaccretion_delay_ms: f64,
	/// Distance floor guarding the direction normalization.
	pub epsilon: f64,
}

impl Default for PhysicsConfig {
	fn default() -> Self {
		Self {
			grid_gap: 3,
			alpha_threshold: 8,
			radius_min: 0.7,
			radius_spread: 0.9,
			interaction_radius: 78.0,
			speed_threshold: 0.6,
			attract: 0.07,
			swirl: 0.02,
			burst: 6.0,
			burst_fraction: 0.18,
			spring: 0.055,
			friction: 0.9,
			opacity_floor: 0.15,
			opacity_decay: 0.02,
			opacity_recovery: 0.03,
			visible_threshold: 0.02,
			reaccretion_delay_ms: 1200.0,
			epsilon: 1e-3,
		}
	}
}

/// Pointer tracking constants.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PointerConfig {
	/// Coordinate (both axes) used while the pointer is outside the surface.
	pub parked: f64,
	pub velocity_divisor: f64,
	pub max_velocity: f64,
}

impl Default for PointerConfig {
	fn default() -> Self {
		Self {
			parked: -9999.0,
			velocity_divisor: 16.0,
			max_velocity: 3.0,
		}
	}
}

/// Font selection and text fitting inside the hero rectangle.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GlyphConfig {
	/// CSS font-family list, heaviest preference first.
	pub font_family: String,
	pub font_weight: u16,
	/// Starting font size as a fraction of the hero's smaller side.
	pub initial_fraction: f64,
	/// Target text width as a fraction of hero width.
	pub width_fill: f64,
	/// Maximum font size as a fraction of hero height.
	pub height_cap: f64,
	/// Glyph box height as a multiple of font size.
	pub box_height: f64,
}

impl Default for GlyphConfig {
	fn default() -> Self {
		Self {
			font_family: "\"Inter Black\", Inter, \"Arial Black\", system-ui, sans-serif".to_string(),
			font_weight: 900,
			initial_fraction: 0.5,
			width_fill: 0.85,
			height_cap: 0.7,
			box_height: 1.05,
		}
	}
}

/// Background star layers and shooting streaks.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct StarfieldConfig {
	/// Drift per elapsed millisecond, `(x, y)`.
	pub far_drift: (f64, f64),
	pub near_drift: (f64, f64),
	pub far_radius_max: f64,
	pub near_radius_min: f64,
	pub near_radius_spread: f64,
	pub spawn_interval_ms: u32,
	pub max_streaks: usize,
	/// Frames a streak may live.
	pub max_streak_age: u32,
	/// Distance past the surface edge at which streaks are discarded.
	pub cull_margin: f64,
	/// Spawn height, above the top edge.
	pub spawn_y: f64,
	/// Horizontal velocity `base + U * spread` (leftwards when negative).
	pub streak_vx: (f64, f64),
	pub streak_vy: (f64, f64),
	pub streak_len: (f64, f64),
	pub streak_line_width: f64,
	/// Lower bound on streak opacity, regardless of theme.
	pub streak_min_opacity: f64,
}

impl Default for StarfieldConfig {
	fn default() -> Self {
		Self {
			far_drift: (0.005, 0.003),
			near_drift: (0.01, 0.006),
			far_radius_max: 1.5,
			near_radius_min: 1.2,
			near_radius_spread: 2.5,
			spawn_interval_ms: 4000,
			max_streaks: 3,
			max_streak_age: 400,
			cull_margin: 200.0,
			spawn_y: -20.0,
			streak_vx: (-3.0, -2.0),
			streak_vy: (2.0, 1.5),
			streak_len: (80.0, 40.0),
			streak_line_width: 1.2,
			streak_min_opacity: 0.12,
		}
	}
}

impl GlyphConfig {
	/// CSS `font` shorthand for a given pixel size.
	pub fn font_css(&self, px: f64) -> String {
		format!("{} {}px {}", self.font_weight, px, self.font_family)
	}
}
