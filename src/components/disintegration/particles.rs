//! Particle field built from a glyph mask.

use rand::Rng;

use super::config::PhysicsConfig;
use super::glyphs::AlphaMask;
use super::theme::ColorTier;
use super::types::Vec2;

/// A single dust particle.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	pub position: Vec2,
	/// Rest position, sampled from the mask.
	pub home: Vec2,
	pub velocity: Vec2,
	/// 0.0 to 1.0; decays under repulsion, recovers during re-accretion.
	pub opacity: f64,
	/// Side length of the drawn square.
	pub radius: f64,
	pub tier: ColorTier,
}

impl Particle {
	fn at_rest(home: Vec2, radius: f64, tier: ColorTier) -> Self {
		Self {
			position: home,
			home,
			velocity: Vec2::ZERO,
			opacity: 1.0,
			radius,
			tier,
		}
	}

	/// Whether this particle is drawn this frame.
	pub fn is_visible(&self, config: &PhysicsConfig) -> bool {
		self.opacity > config.visible_threshold
	}

	pub fn distance_from_home(&self) -> f64 {
		self.position.distance(self.home)
	}
}

/// Sample `mask` on a square grid and spawn one particle per opaque sample.
///
/// Particles are ordered row by row, top to bottom. The grid starts at the
/// mask origin, so positions are multiples of `grid_gap`.
pub fn build_particles<R: Rng>(
	mask: &AlphaMask,
	config: &PhysicsConfig,
	rng: &mut R,
) -> Vec<Particle> {
	let mut particles = Vec::new();
	if mask.is_empty() {
		return particles;
	}

	let gap = config.grid_gap.max(1) as usize;
	for y in (0..mask.height).step_by(gap) {
		for x in (0..mask.width).step_by(gap) {
			if mask.alpha_at(x, y) <= config.alpha_threshold {
				continue;
			}
			let tier = ColorTier::from_unit(rng.random::<f64>());
			let radius = config.radius_min + rng.random::<f64>() * config.radius_spread;
			particles.push(Particle::at_rest(Vec2::new(x as f64, y as f64), radius, tier));
		}
	}
	particles
}

/// Shift every particle and its home by `delta`, leaving everything else intact.
pub fn translate_particles(particles: &mut [Particle], delta: Vec2) {
	for p in particles {
		p.position += delta;
		p.home += delta;
	}
}
