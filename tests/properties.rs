//! Behavioural properties of the lettering engine, driven headlessly.

#![allow(unused_crate_dependencies)]

use disintegration_canvas::components::disintegration::config::{GlyphConfig, PhysicsConfig};
use disintegration_canvas::components::disintegration::glyphs::{AlphaMask, FontSpec, rasterize};
use disintegration_canvas::components::disintegration::particles::build_particles;
use disintegration_canvas::components::disintegration::physics::reaccretion_open;
use disintegration_canvas::{
	BlockGlyphPainter, EngineConfig, EngineEvent, GlyphPainter, ParticleEngine, Rect, Theme, Vec2,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;

const TEXT: &str = "Shango Bashi";
const HERO: Rect = Rect::new(100.0, 200.0, 600.0, 160.0);
const SURFACE: (f64, f64) = (800.0, 600.0);
const FRAME_MS: f64 = 16.0;

fn engine_with(theme: Theme, hero: Rect, seed: u64) -> ParticleEngine<BlockGlyphPainter> {
	let mut engine = ParticleEngine::new(TEXT, theme, EngineConfig::default(), BlockGlyphPainter::default(), seed);
	engine.resize(SURFACE.0, SURFACE.1, Some(hero));
	engine
}

fn engine(seed: u64) -> ParticleEngine<BlockGlyphPainter> {
	engine_with(Theme::dark(), HERO, seed)
}

/// Drag the pointer quickly along the hero's middle line, one move per frame.
fn sweep(engine: &mut ParticleEngine<BlockGlyphPainter>) {
	let y = HERO.center().y;
	for x in (100..=700).step_by(20) {
		engine.dispatch(EngineEvent::PointerMove { x: x as f64, y });
		engine.step(FRAME_MS);
	}
}

/// Step until the re-accretion gate opens; returns frames taken.
fn wait_for_gate(engine: &mut ParticleEngine<BlockGlyphPainter>) -> usize {
	for frame in 1..=200 {
		engine.step(FRAME_MS);
		if engine.is_reaccreting() {
			return frame;
		}
	}
	panic!("re-accretion gate never opened");
}

fn max_distance(engine: &ParticleEngine<BlockGlyphPainter>) -> f64 {
	engine
		.particles()
		.iter()
		.map(|p| p.distance_from_home())
		.fold(0.0, f64::max)
}

/// Paint `text` with its left edge pinned, so a longer string only adds ink.
fn paint_pinned(text: &str, px: f64) -> AlphaMask {
	let mut painter = BlockGlyphPainter {
		advance: 0.5,
		ink_width: 0.75,
		ink_height: 0.5,
	};
	let font = FontSpec::new(px, &GlyphConfig::default());
	let width = painter.measure(text, &font).unwrap();
	painter
		.paint(text, &font, Vec2::new(10.0 + width / 2.0, 100.0), 800, 200)
		.unwrap()
}

proptest! {
	#![proptest_config(ProptestConfig::with_cases(32))]

	#[test]
	fn longer_text_never_yields_fewer_particles(
		text in "[A-Za-z ]{0,20}",
		extra in prop::char::range('A', 'z'),
		k in 1u32..=6,
	) {
		let px = 8.0 * k as f64;
		let longer = format!("{text}{extra}");
		let (short_mask, long_mask) = (paint_pinned(&text, px), paint_pinned(&longer, px));

		for (a, b) in short_mask.alpha.iter().zip(&long_mask.alpha) {
			prop_assert!(a <= b);
		}
		let config = PhysicsConfig::default();
		let short = build_particles(&short_mask, &config, &mut SmallRng::seed_from_u64(7)).len();
		let long = build_particles(&long_mask, &config, &mut SmallRng::seed_from_u64(7)).len();
		prop_assert!(long >= short);
	}

	#[test]
	fn opacity_stays_bounded_and_recovers(
		moves in prop::collection::vec((0.0..800.0f64, 0.0..600.0f64), 1..40),
		seed in any::<u64>(),
	) {
		let mut engine = engine(seed);
		for (x, y) in moves {
			engine.dispatch(EngineEvent::PointerMove { x, y });
			engine.step(FRAME_MS);
			prop_assert!(engine.particles().iter().all(|p| (0.15..=1.0).contains(&p.opacity)));
		}

		engine.dispatch(EngineEvent::PointerLeave);
		wait_for_gate(&mut engine);
		for _ in 0..40 {
			let before: Vec<f64> = engine.particles().iter().map(|p| p.opacity).collect();
			engine.step(FRAME_MS);
			prop_assert!(engine.is_reaccreting());
			for (p, old) in engine.particles().iter().zip(before) {
				prop_assert!(p.opacity >= old);
				prop_assert!(p.opacity <= 1.0);
			}
		}
		prop_assert!(engine.particles().iter().all(|p| p.opacity == 1.0));
	}

	#[test]
	fn gate_stays_shut_while_pointer_is_on_a_glyph(
		index in 0usize..TEXT.len(),
		fx in 0.0..=1.0f64,
		fy in 0.0..=1.0f64,
	) {
		let mut engine = engine(3);
		let rect = engine.glyph_boxes()[index].rect;
		let target = Vec2::new(rect.x + fx * rect.width, rect.y + fy * rect.height);

		engine.dispatch(EngineEvent::PointerMove { x: target.x, y: target.y });
		for _ in 0..200 {
			engine.step(FRAME_MS);
			prop_assert!(!engine.is_reaccreting());
		}
		// Far past the delay, the gate still depends on the pointer position.
		let config = PhysicsConfig::default();
		prop_assert!(!reaccretion_open(engine.layout(), engine.pointer(), 1e9, &config));
	}

	#[test]
	fn scroll_translates_field_exactly(
		dx in -500.0..500.0f64,
		dy in -500.0..500.0f64,
		seed in any::<u64>(),
	) {
		let mut engine = engine(seed);
		sweep(&mut engine);
		let before = engine.particles().to_vec();
		let boxes_before = engine.glyph_boxes().to_vec();

		let moved = HERO.translated(Vec2::new(dx, dy));
		engine.set_hero_rect(moved);
		let delta = Vec2::new(moved.x - HERO.x, moved.y - HERO.y);

		prop_assert_eq!(engine.particles().len(), before.len());
		for (p, old) in engine.particles().iter().zip(&before) {
			prop_assert_eq!(p.position, old.position + delta);
			prop_assert_eq!(p.home, old.home + delta);
			prop_assert_eq!(p.velocity, old.velocity);
			prop_assert_eq!(p.opacity, old.opacity);
			prop_assert_eq!(p.tier, old.tier);
		}
		for (b, old) in engine.glyph_boxes().iter().zip(&boxes_before) {
			prop_assert_eq!(b.rect, old.rect.translated(delta));
		}
	}

	#[test]
	fn resizing_hero_resamples_from_scratch(
		x in 0.0..200.0f64,
		y in 0.0..300.0f64,
		width in 100.0..700.0f64,
		height in 40.0..300.0f64,
	) {
		prop_assume!((width - HERO.width).abs() > 0.5 || (height - HERO.height).abs() > 0.5);
		let resized = Rect::new(x, y, width, height);

		let mut engine = engine(5);
		sweep(&mut engine);
		engine.set_hero_rect(resized);
		let fresh = engine_with(Theme::dark(), resized, 9);

		let homes: Vec<Vec2> = engine.particles().iter().map(|p| p.home).collect();
		let fresh_homes: Vec<Vec2> = fresh.particles().iter().map(|p| p.home).collect();
		prop_assert_eq!(homes, fresh_homes);
		for p in engine.particles() {
			prop_assert_eq!(p.position, p.home);
			prop_assert_eq!(p.velocity, Vec2::ZERO);
			prop_assert_eq!(p.opacity, 1.0);
		}
	}

	#[test]
	fn streaks_stay_bounded(
		actions in prop::collection::vec((any::<bool>(), 1usize..120), 1..40),
		seed in any::<u64>(),
	) {
		let mut theme = Theme::dark();
		theme.stars.streak_chance = 1.0;
		// No lettering, so only the starfield is exercised.
		let mut engine = engine_with(theme, Rect::default(), seed);
		let (_, height) = engine.surface_size();

		for (spawn, frames) in actions {
			if spawn {
				engine.dispatch(EngineEvent::SpawnTick);
			}
			for _ in 0..frames {
				engine.step(FRAME_MS);
				let streaks = &engine.starfield().streaks;
				prop_assert!(streaks.len() <= 3);
				for s in streaks {
					prop_assert!(s.head.x > -200.0);
					prop_assert!(s.head.y < height + 200.0);
					prop_assert!(s.age < 400);
				}
			}
		}
	}

	#[test]
	fn parked_pointer_never_disturbs_the_field(
		x in 0.0..400.0f64,
		y in 0.0..400.0f64,
		width in 50.0..400.0f64,
		height in 20.0..200.0f64,
		seed in any::<u64>(),
	) {
		let mut engine = engine_with(Theme::dark(), Rect::new(x, y, width, height), seed);
		for _ in 0..150 {
			engine.step(FRAME_MS);
			prop_assert!(!engine.last_report().repelled);
		}
		let radius = engine.config().physics.interaction_radius;
		let pointer = engine.pointer().position;
		for p in engine.particles() {
			prop_assert!(p.position.distance(pointer) > radius);
			prop_assert_eq!(p.position, p.home);
			prop_assert_eq!(p.opacity, 1.0);
		}
	}
}

#[test]
fn disturbed_field_settles_home_within_bounded_frames() {
	let mut engine = engine(21);
	sweep(&mut engine);
	engine.dispatch(EngineEvent::PointerLeave);
	wait_for_gate(&mut engine);

	let mut window_max = Vec::new();
	for _ in 0..5 {
		let mut peak: f64 = 0.0;
		for _ in 0..60 {
			engine.step(FRAME_MS);
			peak = peak.max(max_distance(&engine));
		}
		window_max.push(peak);
	}

	assert!(window_max[0] > 1.0, "sweep should displace particles");
	// The spring is underdamped, so particles overshoot; the envelope shrinks.
	for pair in window_max.windows(2) {
		assert!(pair[1] < pair[0], "envelope grew: {window_max:?}");
	}
	assert!(max_distance(&engine) < 0.01);
}

#[test]
fn hero_jitter_below_tolerance_is_a_pure_move() {
	let mut engine = engine(2);
	let before = engine.particles().to_vec();
	let nudged = Rect::new(HERO.x + 4.0, HERO.y, HERO.width + 0.4, HERO.height - 0.4);
	engine.set_hero_rect(nudged);

	assert_eq!(engine.particles().len(), before.len());
	for (p, old) in engine.particles().iter().zip(&before) {
		assert_eq!(p.home, old.home + Vec2::new(4.0, 0.0));
	}
	assert_eq!(engine.hero(), nudged);
}

#[test]
fn field_matches_direct_sampling() {
	let engine = engine(13);
	let mut painter = BlockGlyphPainter::default();
	let config = EngineConfig::default();
	let raster = rasterize(&mut painter, TEXT, &HERO, (800, 600), &config.glyphs);
	let sampled = build_particles(&raster.mask, &config.physics, &mut SmallRng::seed_from_u64(0));

	assert!(!sampled.is_empty());
	assert_eq!(engine.particles().len(), sampled.len());
	assert_eq!(engine.layout(), &raster.layout);
}

#[test]
fn light_theme_is_sparser() {
	let dark = engine_with(Theme::dark(), HERO, 1);
	let light = engine_with(Theme::light(), HERO, 1);
	assert_eq!(dark.starfield().far.len(), 160);
	assert_eq!(light.starfield().far.len(), 100);
	assert_eq!(light.starfield().near.len(), 40);
	assert_eq!(light.particles().len(), dark.particles().len());
}
