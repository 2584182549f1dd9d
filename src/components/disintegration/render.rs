//! Canvas rendering for the lettering effect.
//!
//! Compositing order, back to front:
//! 1. Clear to transparent so the page background shows through
//! 2. Far stars, near stars, shooting streaks
//! 3. Particles, clipped to the hero rectangle

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::config::StarfieldConfig;
use super::engine::ParticleEngine;
use super::glyphs::GlyphPainter;
use super::starfield::{Layer, Star, Starfield};
use super::theme::{ColorTier, Theme};

/// Draws one frame of `engine` onto `ctx`.
pub fn render<P: GlyphPainter>(engine: &ParticleEngine<P>, ctx: &CanvasRenderingContext2d) {
	let (width, height) = engine.surface_size();
	ctx.clear_rect(0.0, 0.0, width, height);
	if engine.is_idle() {
		return;
	}

	let theme = engine.theme();
	let config = &engine.config().starfield;
	let time = engine.clock_ms();

	draw_star_layer(ctx, engine.starfield(), &engine.starfield().far, Layer::Far, theme, config, time);
	draw_star_layer(ctx, engine.starfield(), &engine.starfield().near, Layer::Near, theme, config, time);
	draw_streaks(ctx, engine.starfield(), theme, config);
	draw_particles(engine, ctx);

	ctx.set_global_alpha(1.0);
}

fn draw_star_layer(
	ctx: &CanvasRenderingContext2d,
	field: &Starfield,
	stars: &[Star],
	layer: Layer,
	theme: &Theme,
	config: &StarfieldConfig,
	time: f64,
) {
	let opacity = match layer {
		Layer::Far => theme.stars.far_opacity,
		Layer::Near => theme.stars.near_opacity,
	};
	ctx.set_global_alpha(opacity);
	ctx.set_fill_style_str(&theme.stars.color.to_css());

	for star in stars {
		let p = field.star_position(star, layer, time, config);
		ctx.begin_path();
		let _ = ctx.arc(p.x, p.y, star.radius, 0.0, PI * 2.0);
		ctx.fill();
	}
}

fn draw_streaks(ctx: &CanvasRenderingContext2d, field: &Starfield, theme: &Theme, config: &StarfieldConfig) {
	if field.streaks.is_empty() {
		return;
	}
	ctx.set_global_alpha(theme.stars.near_opacity.max(config.streak_min_opacity));
	ctx.set_line_width(config.streak_line_width);
	ctx.set_stroke_style_str(&theme.stars.color.to_css());

	for s in &field.streaks {
		let tail = s.tail();
		ctx.begin_path();
		ctx.move_to(s.head.x, s.head.y);
		ctx.line_to(tail.x, tail.y);
		ctx.stroke();
	}
}

fn draw_particles<P: GlyphPainter>(engine: &ParticleEngine<P>, ctx: &CanvasRenderingContext2d) {
	let hero = engine.hero();
	let physics = &engine.config().physics;
	let dust = &engine.theme().dust;
	let tones = [
		(ColorTier::Highlight, dust.highlight.to_css()),
		(ColorTier::Main, dust.main.to_css()),
		(ColorTier::Low, dust.low.to_css()),
	];

	ctx.save();
	ctx.begin_path();
	ctx.rect(hero.x, hero.y, hero.width, hero.height);
	ctx.clip();

	let mut current: Option<ColorTier> = None;
	for p in engine.particles() {
		if !p.is_visible(physics) {
			continue;
		}
		if current != Some(p.tier) {
			if let Some((_, css)) = tones.iter().find(|(tier, _)| *tier == p.tier) {
				ctx.set_fill_style_str(css);
			}
			current = Some(p.tier);
		}
		ctx.set_global_alpha(p.opacity);
		ctx.fill_rect(p.position.x, p.position.y, p.radius, p.radius);
	}

	ctx.set_global_alpha(1.0);
	ctx.restore();
}
