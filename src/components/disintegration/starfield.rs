//! Parallax starfield and shooting streaks drawn behind the lettering.

use rand::Rng;

use super::config::StarfieldConfig;
use super::theme::StarStyle;
use super::types::Vec2;

/// A background star. Its drawn position is derived from time, never integrated.
#[derive(Clone, Debug, PartialEq)]
pub struct Star {
	pub origin: Vec2,
	pub radius: f64,
}

/// A short-lived shooting star.
#[derive(Clone, Debug, PartialEq)]
pub struct Streak {
	pub head: Vec2,
	pub velocity: Vec2,
	/// Tail length as a multiple of `velocity`.
	pub length: f64,
	/// Frames lived.
	pub age: u32,
}

impl Streak {
	/// End of the trailing line segment.
	pub fn tail(&self) -> Vec2 {
		self.head - self.velocity * self.length
	}
}

/// Which parallax layer a star belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
	Far,
	Near,
}

/// Both star layers plus live streaks.
#[derive(Clone, Debug, Default)]
pub struct Starfield {
	pub far: Vec<Star>,
	pub near: Vec<Star>,
	pub streaks: Vec<Streak>,
	width: f64,
	height: f64,
}

impl Starfield {
	/// Scatter both layers over a `width` x `height` surface.
	pub fn new<R: Rng>(
		width: f64,
		height: f64,
		style: &StarStyle,
		config: &StarfieldConfig,
		rng: &mut R,
	) -> Self {
		let far = scatter(style.far_count, width, height, rng, |u| u * config.far_radius_max);
		let near = scatter(style.near_count, width, height, rng, |u| {
			config.near_radius_min + u * config.near_radius_spread
		});

		Self {
			far,
			near,
			streaks: Vec::new(),
			width,
			height,
		}
	}

	pub fn size(&self) -> (f64, f64) {
		(self.width, self.height)
	}

	/// Where `star` is drawn at engine time `time_ms`.
	///
	/// The drift offset wraps modulo the surface, so coordinates stay bounded
	/// however long the page is open.
	pub fn star_position(&self, star: &Star, layer: Layer, time_ms: f64, config: &StarfieldConfig) -> Vec2 {
		if self.width <= 0.0 || self.height <= 0.0 {
			return star.origin;
		}
		let (sx, sy) = match layer {
			Layer::Far => config.far_drift,
			Layer::Near => config.near_drift,
		};
		Vec2::new(
			(star.origin.x + (time_ms * sx) % self.width) % self.width,
			(star.origin.y + (time_ms * sy) % self.height) % self.height,
		)
	}

	/// Maybe launch a streak; called once per spawn interval.
	///
	/// Returns true if a streak was added.
	pub fn try_spawn<R: Rng>(&mut self, style: &StarStyle, config: &StarfieldConfig, rng: &mut R) -> bool {
		if self.streaks.len() >= config.max_streaks || rng.random::<f64>() >= style.streak_chance {
			return false;
		}
		let (vx, vx_spread) = config.streak_vx;
		let (vy, vy_spread) = config.streak_vy;
		let (len, len_spread) = config.streak_len;
		self.streaks.push(Streak {
			head: Vec2::new(rng.random::<f64>() * self.width, config.spawn_y),
			velocity: Vec2::new(
				vx + rng.random::<f64>() * vx_spread,
				vy + rng.random::<f64>() * vy_spread,
			),
			length: len + rng.random::<f64>() * len_spread,
			age: 0,
		});
		true
	}

	/// Move streaks one frame and drop those that left the surface or expired.
	pub fn advance_streaks(&mut self, config: &StarfieldConfig) {
		for s in &mut self.streaks {
			s.head += s.velocity;
			s.age += 1;
		}
		let (margin, height) = (config.cull_margin, self.height);
		self.streaks
			.retain(|s| s.head.x > -margin && s.head.y < height + margin && s.age < config.max_streak_age);
	}
}

fn scatter<R: Rng>(
	count: usize,
	width: f64,
	height: f64,
	rng: &mut R,
	radius: impl Fn(f64) -> f64,
) -> Vec<Star> {
	(0..count)
		.map(|_| Star {
			origin: Vec2::new(rng.random::<f64>() * width, rng.random::<f64>() * height),
			radius: radius(rng.random::<f64>()),
		})
		.collect()
}
