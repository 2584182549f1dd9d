//! Particle lettering canvas.
//!
//! A line of text is rasterized into the rectangle of a page element and
//! sampled into a field of small square particles. Fast pointer motion blows
//! particles apart; slow motion drags them into a swirl; after a pause they
//! spring back home. A two-layer drifting starfield with occasional shooting
//! streaks sits behind the lettering.
//!
//! The simulation ([`ParticleEngine`]) is independent of the browser and can
//! be driven headlessly with [`BlockGlyphPainter`]. [`DisintegrationCanvas`]
//! wires it to a real canvas, window events, and the animation frame loop.
//!
//! # Example
//!
//! ```ignore
//! use disintegration_canvas::{DisintegrationCanvas, ThemeMode};
//!
//! view! {
//!     <DisintegrationCanvas text="Shango Bashi" theme=ThemeMode::Dark />
//!     <section class="hero"><div id="lettering-anchor"></div></section>
//! }
//! ```

mod component;
pub mod config;
pub mod engine;
mod error;
pub mod glyphs;
pub mod particles;
pub mod physics;
mod render;
pub mod starfield;
mod surface;
pub mod theme;
pub mod types;

pub use component::DisintegrationCanvas;
pub use config::{CanvasSettings, EngineConfig};
pub use engine::{EngineEvent, ParticleEngine};
pub use error::SurfaceError;
pub use glyphs::{BlockGlyphPainter, GlyphPainter};
pub use theme::{Theme, ThemeMode};
pub use types::{Rect, Vec2};
