//! Per-frame particle physics.
//!
//! Each frame runs two coupled phases over every particle:
//!
//! 1. **Interaction**: inside the interaction radius, a slow pointer pulls
//!    particles in with a slight swirl; a fast pointer blasts them outward and
//!    fades them.
//! 2. **Re-accretion**: once the pointer is off the lettering and has been
//!    quiet for the configured delay, a spring pulls each particle home and its
//!    opacity recovers.
//!
//! Velocity is then damped by friction and integrated into position. The
//! step is frame-locked: forces are per frame, not scaled by elapsed time.

use super::config::PhysicsConfig;
use super::glyphs::GlyphLayout;
use super::particles::Particle;
use super::types::{PointerState, Vec2};

/// What happened during a physics frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
	/// At least one particle was repelled.
	pub repelled: bool,
	/// Particles above the visibility threshold after the step.
	pub visible: usize,
}

/// Whether particles may spring home this frame.
///
/// Requires the pointer to be outside every glyph box and the last interaction
/// to be more than the configured delay in the past.
pub fn reaccretion_open(
	layout: &GlyphLayout,
	pointer: &PointerState,
	now_ms: f64,
	config: &PhysicsConfig,
) -> bool {
	!layout.contains(pointer.position)
		&& now_ms - pointer.last_interaction_ms > config.reaccretion_delay_ms
}

/// Advance every particle by one frame.
///
/// `reaccrete` is evaluated once per frame by the caller; a repulsion during
/// this frame only affects the gate from the next frame on.
pub fn advance(
	particles: &mut [Particle],
	pointer: &PointerState,
	reaccrete: bool,
	config: &PhysicsConfig,
) -> FrameReport {
	let mut report = FrameReport::default();
	let radius = config.interaction_radius;

	for p in particles.iter_mut() {
		let offset = p.position - pointer.position;
		let d2 = offset.x * offset.x + offset.y * offset.y;
		if d2 < radius * radius {
			let d = d2.sqrt().max(config.epsilon);
			let dir = offset * (1.0 / d);
			let falloff = 1.0 - d / radius;
			if pointer.velocity < config.speed_threshold {
				// attract with a spiral swirl
				p.velocity += dir * (-config.attract * falloff);
				p.velocity += Vec2::new(-dir.y, dir.x) * config.swirl;
			} else {
				let force = falloff * config.burst * config.burst_fraction;
				p.velocity += dir * force;
				p.opacity = (p.opacity - config.opacity_decay).max(config.opacity_floor);
				report.repelled = true;
			}
		}

		if reaccrete {
			p.velocity += (p.home - p.position) * config.spring;
			p.opacity = (p.opacity + config.opacity_recovery).min(1.0);
		}

		p.velocity *= config.friction;
		p.position += p.velocity;

		if p.is_visible(config) {
			report.visible += 1;
		}
	}

	report
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::disintegration::config::PointerConfig;
	use crate::components::disintegration::theme::ColorTier;
	use crate::components::disintegration::types::{GlyphBox, Rect};

	fn particle(x: f64, y: f64) -> Particle {
		Particle {
			position: Vec2::new(x, y),
			home: Vec2::new(x, y),
			velocity: Vec2::ZERO,
			opacity: 1.0,
			radius: 1.0,
			tier: ColorTier::Main,
		}
	}

	fn pointer_at(x: f64, y: f64, velocity: f64) -> PointerState {
		PointerState {
			position: Vec2::new(x, y),
			previous: Vec2::new(x, y),
			velocity,
			last_interaction_ms: 0.0,
		}
	}

	#[test]
	fn slow_pointer_attracts_with_swirl() {
		let config = PhysicsConfig::default();
		let mut ps = vec![particle(130.0, 100.0)];
		let report = advance(&mut ps, &pointer_at(100.0, 100.0, 0.1), false, &config);

		assert!(!report.repelled);
		// pulled left toward the pointer, swirled along +y
		assert!(ps[0].velocity.x < 0.0);
		assert!(ps[0].velocity.y > 0.0);
		assert_eq!(ps[0].opacity, 1.0);
	}

	#[test]
	fn fast_pointer_repels_and_fades() {
		let config = PhysicsConfig::default();
		let mut ps = vec![particle(130.0, 100.0)];
		let report = advance(&mut ps, &pointer_at(100.0, 100.0, 2.0), false, &config);

		assert!(report.repelled);
		assert!(ps[0].velocity.x > 0.0);
		assert!((ps[0].opacity - 0.98).abs() < 1e-12);
	}

	#[test]
	fn repulsion_never_fades_below_floor() {
		let config = PhysicsConfig::default();
		let mut ps = vec![particle(101.0, 100.0)];
		let pointer = pointer_at(100.0, 100.0, 3.0);
		for _ in 0..100 {
			ps[0].position = Vec2::new(101.0, 100.0);
			advance(&mut ps, &pointer, false, &config);
		}
		assert_eq!(ps[0].opacity, config.opacity_floor);
	}

	#[test]
	fn particles_outside_radius_are_untouched() {
		let config = PhysicsConfig::default();
		let mut ps = vec![particle(300.0, 100.0)];
		let report = advance(&mut ps, &pointer_at(100.0, 100.0, 3.0), false, &config);
		assert!(!report.repelled);
		assert_eq!(ps[0], particle(300.0, 100.0));
	}

	#[test]
	fn coincident_pointer_does_not_produce_nan() {
		let config = PhysicsConfig::default();
		let mut ps = vec![particle(100.0, 100.0)];
		advance(&mut ps, &pointer_at(100.0, 100.0, 0.0), false, &config);
		assert!(ps[0].position.x.is_finite() && ps[0].position.y.is_finite());
	}

	#[test]
	fn spring_and_recovery_when_open() {
		let config = PhysicsConfig::default();
		let mut p = particle(0.0, 0.0);
		p.position = Vec2::new(10.0, 0.0);
		p.opacity = 0.5;
		let mut ps = vec![p];
		let pointer = PointerState::parked(&PointerConfig::default());
		advance(&mut ps, &pointer, true, &config);

		let expected_v = -10.0 * config.spring * config.friction;
		assert!((ps[0].velocity.x - expected_v).abs() < 1e-12);
		assert!((ps[0].position.x - (10.0 + expected_v)).abs() < 1e-12);
		assert!((ps[0].opacity - 0.53).abs() < 1e-12);
	}

	#[test]
	fn invisible_particles_are_not_counted() {
		let config = PhysicsConfig::default();
		let mut p = particle(0.0, 0.0);
		p.opacity = 0.02;
		let mut ps = vec![p, particle(5.0, 5.0)];
		let pointer = PointerState::parked(&PointerConfig::default());
		let report = advance(&mut ps, &pointer, false, &config);
		assert_eq!(report.visible, 1);
		assert_eq!(ps.len(), 2);
	}

	#[test]
	fn gate_requires_quiet_pointer_off_glyphs() {
		let config = PhysicsConfig::default();
		let layout = GlyphLayout {
			boxes: vec![GlyphBox {
				ch: 'A',
				rect: Rect::new(0.0, 0.0, 50.0, 50.0),
			}],
			..GlyphLayout::default()
		};

		let over = pointer_at(25.0, 25.0, 0.0);
		assert!(!reaccretion_open(&layout, &over, 10_000.0, &config));

		let off = pointer_at(200.0, 25.0, 0.0);
		assert!(!reaccretion_open(&layout, &off, 1200.0, &config));
		assert!(reaccretion_open(&layout, &off, 1200.5, &config));
	}
}
