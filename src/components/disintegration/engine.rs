//! The particle lettering engine.
//!
//! [`ParticleEngine`] owns every piece of simulation state: the glyph layout,
//! the particle field, the pointer, and the starfield. Hosts feed it
//! [`EngineEvent`]s as they arrive and call [`ParticleEngine::step`] once per
//! animation frame; queued events are applied at the start of the next step so
//! a frame always sees a consistent snapshot.
//!
//! The engine knows nothing about the DOM. Text is painted through a
//! [`GlyphPainter`], and randomness comes from a seeded [`SmallRng`], so the
//! whole lifecycle can be driven synthetically.

use std::collections::VecDeque;

use log::debug;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::config::EngineConfig;
use super::glyphs::{GlyphLayout, GlyphPainter, rasterize};
use super::particles::{Particle, build_particles, translate_particles};
use super::physics::{self, FrameReport};
use super::starfield::Starfield;
use super::theme::Theme;
use super::types::{GlyphBox, PointerState, Rect, Vec2};

/// A host signal, queued until the next frame.
#[derive(Clone, Debug, PartialEq)]
pub enum EngineEvent {
	/// Pointer moved to surface coordinates `(x, y)`.
	PointerMove { x: f64, y: f64 },
	/// Pointer left the page.
	PointerLeave,
	/// Viewport resized. `hero` is the freshly read anchor rectangle, if any.
	Resize {
		width: f64,
		height: f64,
		hero: Option<Rect>,
	},
	/// Anchor rectangle re-read after a scroll.
	HeroMoved(Rect),
	/// The shooting-streak spawn interval fired.
	SpawnTick,
}

/// Particle lettering simulation over a parallax starfield.
pub struct ParticleEngine<P: GlyphPainter> {
	text: String,
	theme: Theme,
	config: EngineConfig,
	painter: P,
	rng: SmallRng,
	width: f64,
	height: f64,
	hero: Rect,
	layout: GlyphLayout,
	particles: Vec<Particle>,
	pointer: PointerState,
	starfield: Starfield,
	clock_ms: f64,
	reaccreting: bool,
	last_report: FrameReport,
	events: VecDeque<EngineEvent>,
}

impl<P: GlyphPainter> ParticleEngine<P> {
	/// Create an engine with no surface yet. Nothing is built until the first
	/// [`EngineEvent::Resize`] supplies non-zero dimensions.
	pub fn new(text: impl Into<String>, theme: Theme, config: EngineConfig, painter: P, seed: u64) -> Self {
		let pointer = PointerState::parked(&config.pointer);
		Self {
			text: text.into(),
			theme,
			config,
			painter,
			rng: SmallRng::seed_from_u64(seed),
			width: 0.0,
			height: 0.0,
			hero: Rect::default(),
			layout: GlyphLayout::default(),
			particles: Vec::new(),
			pointer,
			starfield: Starfield::default(),
			clock_ms: 0.0,
			reaccreting: false,
			last_report: FrameReport::default(),
			events: VecDeque::new(),
		}
	}

	/// Queue a host event for the next [`step`](Self::step).
	pub fn dispatch(&mut self, event: EngineEvent) {
		self.events.push_back(event);
	}

	/// Advance the clock by `dt_ms`, apply queued events, and run one frame.
	///
	/// With a zero-sized surface only the clock and the queue are processed.
	pub fn step(&mut self, dt_ms: f64) {
		self.clock_ms += dt_ms.max(0.0);
		while let Some(event) = self.events.pop_front() {
			self.apply(event);
		}

		if self.width <= 0.0 || self.height <= 0.0 {
			return;
		}

		self.starfield.advance_streaks(&self.config.starfield);

		let physics_config = &self.config.physics;
		self.reaccreting =
			physics::reaccretion_open(&self.layout, &self.pointer, self.clock_ms, physics_config);
		self.last_report =
			physics::advance(&mut self.particles, &self.pointer, self.reaccreting, physics_config);
		if self.last_report.repelled {
			self.pointer.last_interaction_ms = self.clock_ms;
		}
	}

	fn apply(&mut self, event: EngineEvent) {
		match event {
			EngineEvent::PointerMove { x, y } => self.pointer_move(x, y),
			EngineEvent::PointerLeave => self.pointer_leave(),
			EngineEvent::Resize {
				width,
				height,
				hero,
			} => self.resize(width, height, hero),
			EngineEvent::HeroMoved(rect) => self.set_hero_rect(rect),
			EngineEvent::SpawnTick => {
				self.spawn_tick();
			}
		}
	}

	/// Record a pointer move at the current engine time.
	pub fn pointer_move(&mut self, x: f64, y: f64) {
		self.pointer
			.move_to(Vec2::new(x, y), self.clock_ms, &self.config.pointer);
	}

	/// Park the pointer off-surface.
	pub fn pointer_leave(&mut self) {
		self.pointer.leave(&self.config.pointer);
	}

	/// Resize the surface and rebuild everything derived from it.
	///
	/// Star layers are rescattered and live streaks dropped. A `None` hero keeps
	/// the last known rectangle.
	pub fn resize(&mut self, width: f64, height: f64, hero: Option<Rect>) {
		self.width = width.max(0.0);
		self.height = height.max(0.0);
		if let Some(rect) = hero {
			self.hero = rect;
		}
		self.starfield = Starfield::new(
			self.width,
			self.height,
			&self.theme.stars,
			&self.config.starfield,
			&mut self.rng,
		);
		self.rebuild();
	}

	/// Follow the anchor rectangle after a scroll or layout change.
	///
	/// A pure move translates particles and their homes in place; a size change
	/// rebuilds the field.
	pub fn set_hero_rect(&mut self, rect: Rect) {
		let delta = Vec2::new(rect.x - self.hero.x, rect.y - self.hero.y);
		if delta != Vec2::ZERO {
			translate_particles(&mut self.particles, delta);
			for b in &mut self.layout.boxes {
				b.rect = b.rect.translated(delta);
			}
			self.layout.center += delta;
		}

		let resized = self
			.hero
			.size_differs(&rect, self.config.hero_resize_tolerance);
		self.hero = rect;
		if resized {
			self.rebuild();
		}
	}

	/// Maybe launch a shooting streak. Returns true if one was added.
	pub fn spawn_tick(&mut self) -> bool {
		self.starfield
			.try_spawn(&self.theme.stars, &self.config.starfield, &mut self.rng)
	}

	/// Re-rasterize the text and replace the particle field.
	pub fn rebuild(&mut self) {
		let surface = (self.width.floor() as u32, self.height.floor() as u32);
		let rasterized = rasterize(
			&mut self.painter,
			&self.text,
			&self.hero,
			surface,
			&self.config.glyphs,
		);
		self.particles = build_particles(&rasterized.mask, &self.config.physics, &mut self.rng);
		self.layout = rasterized.layout;
		debug!(
			"disintegration-canvas: rebuilt {} particles for {}x{} surface",
			self.particles.len(),
			surface.0,
			surface.1
		);
	}

	pub fn particles(&self) -> &[Particle] {
		&self.particles
	}

	pub fn glyph_boxes(&self) -> &[GlyphBox] {
		&self.layout.boxes
	}

	pub fn layout(&self) -> &GlyphLayout {
		&self.layout
	}

	pub fn hero(&self) -> Rect {
		self.hero
	}

	pub fn pointer(&self) -> &PointerState {
		&self.pointer
	}

	pub fn starfield(&self) -> &Starfield {
		&self.starfield
	}

	pub fn theme(&self) -> &Theme {
		&self.theme
	}

	pub fn config(&self) -> &EngineConfig {
		&self.config
	}

	pub fn text(&self) -> &str {
		&self.text
	}

	/// Engine time in milliseconds (sum of all `dt_ms` passed to `step`).
	pub fn clock_ms(&self) -> f64 {
		self.clock_ms
	}

	pub fn surface_size(&self) -> (f64, f64) {
		(self.width, self.height)
	}

	/// Whether the last frame ran with the re-accretion gate open.
	pub fn is_reaccreting(&self) -> bool {
		self.reaccreting
	}

	pub fn last_report(&self) -> FrameReport {
		self.last_report
	}

	/// Whether the surface is zero-sized, so frames are skipped.
	pub fn is_idle(&self) -> bool {
		self.width <= 0.0 || self.height <= 0.0
	}
}
