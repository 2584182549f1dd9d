//! Visual theming for the lettering effect.
//!
//! Provides the dust palettes particles draw from and the starfield densities
//! for the dark and light page themes.

use serde::Deserialize;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const WHITE: Self = Self::rgb(255, 255, 255);

	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Page theme selector accepted by the component.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
	#[default]
	Dark,
	Light,
}

/// One of the three dust tones a particle is tinted with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorTier {
	/// Brightest tone, ~10% of particles.
	Highlight,
	/// Body tone, ~60% of particles.
	Main,
	/// Shadow tone, ~30% of particles.
	Low,
}

impl ColorTier {
	/// Map a uniform sample in `[0, 1)` onto the 10/60/30 tier split.
	pub fn from_unit(u: f64) -> Self {
		if u < 0.1 {
			ColorTier::Highlight
		} else if u < 0.7 {
			ColorTier::Main
		} else {
			ColorTier::Low
		}
	}
}

/// Chrome/graphite dust tones.
#[derive(Clone, Debug)]
pub struct DustPalette {
	pub main: Color,
	pub highlight: Color,
	pub low: Color,
}

impl DustPalette {
	pub fn color(&self, tier: ColorTier) -> Color {
		match tier {
			ColorTier::Highlight => self.highlight,
			ColorTier::Main => self.main,
			ColorTier::Low => self.low,
		}
	}
}

/// Starfield density and brightness.
#[derive(Clone, Debug)]
pub struct StarStyle {
	pub color: Color,
	pub far_count: usize,
	pub far_opacity: f64,
	pub near_count: usize,
	pub near_opacity: f64,
	/// Chance a shooting streak spawns on each spawn tick.
	pub streak_chance: f64,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	pub name: &'static str,
	pub mode: ThemeMode,
	pub dust: DustPalette,
	pub stars: StarStyle,
}

impl Theme {
	/// Bright chrome dust over a dense starfield (default)
	pub fn dark() -> Self {
		Self {
			name: "dark",
			mode: ThemeMode::Dark,
			dust: DustPalette {
				main: Color::rgb(0xe3, 0xe7, 0xed),
				highlight: Color::rgb(0xff, 0xff, 0xff),
				low: Color::rgb(0xae, 0xb7, 0xc4),
			},
			stars: StarStyle {
				color: Color::WHITE,
				far_count: 160,
				far_opacity: 0.18,
				near_count: 80,
				near_opacity: 0.45,
				streak_chance: 0.4,
			},
		}
	}

	/// Graphite dust with a sparse, faint starfield
	pub fn light() -> Self {
		Self {
			name: "light",
			mode: ThemeMode::Light,
			dust: DustPalette {
				main: Color::rgb(0x6b, 0x72, 0x80),
				highlight: Color::rgb(0x9c, 0xa3, 0xaf),
				low: Color::rgb(0xa1, 0xa1, 0xaa),
			},
			stars: StarStyle {
				color: Color::WHITE,
				far_count: 100,
				far_opacity: 0.06,
				near_count: 40,
				near_opacity: 0.12,
				streak_chance: 0.15,
			},
		}
	}

	pub fn for_mode(mode: ThemeMode) -> Self {
		match mode {
			ThemeMode::Dark => Self::dark(),
			ThemeMode::Light => Self::light(),
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::dark()
	}
}
