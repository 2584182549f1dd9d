//! Leptos component hosting the lettering effect.
//!
//! The component creates a fixed, full-viewport canvas that never takes
//! pointer events, then attaches a [`HostAdapter`] once it is mounted. The
//! adapter owns every browser registration: window listeners that forward
//! pointer, resize, and scroll signals into the engine's event queue, the
//! shooting-streak spawn interval, and the `requestAnimationFrame` loop that
//! steps and renders the engine. Unmounting tears all of it down.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{Event, HtmlCanvasElement, MouseEvent, Window};

use super::config::{CanvasSettings, EngineConfig};
use super::engine::{EngineEvent, ParticleEngine};
use super::error::SurfaceError;
use super::render;
use super::surface::{CanvasPainter, Surface, read_hero_rect};
use super::theme::{Theme, ThemeMode};

type Engine = ParticleEngine<CanvasPainter>;
type Listener = Closure<dyn FnMut(Event)>;

/// Browser registrations for one mounted canvas.
struct HostAdapter {
	window: Window,
	running: Rc<Cell<bool>>,
	frame: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>,
	frame_handle: Rc<Cell<Option<i32>>>,
	listeners: Vec<(&'static str, Listener)>,
	spawn_timer: Option<(i32, Closure<dyn FnMut()>)>,
}

impl HostAdapter {
	fn attach(canvas: HtmlCanvasElement, settings: &CanvasSettings) -> Result<Self, SurfaceError> {
		let window = web_sys::window().ok_or(SurfaceError::NoWindow)?;
		let document = window.document().ok_or(SurfaceError::NoDocument)?;

		let mut surface = Surface::attach(canvas, &window, settings.config.max_device_pixel_ratio)?;
		let painter = CanvasPainter::new(&document)?;
		let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;
		let mut engine = ParticleEngine::new(
			settings.text.clone(),
			Theme::for_mode(settings.theme),
			settings.config.clone(),
			painter,
			seed,
		);

		let (width, height) = surface.fit_viewport(&window)?;
		engine.dispatch(EngineEvent::Resize {
			width,
			height,
			hero: read_hero_rect(&document, &settings.anchor_id),
		});

		let engine = Rc::new(RefCell::new(engine));
		let surface = Rc::new(RefCell::new(surface));
		let mut adapter = Self {
			window,
			running: Rc::new(Cell::new(true)),
			frame: Rc::new(RefCell::new(None)),
			frame_handle: Rc::new(Cell::new(None)),
			listeners: Vec::new(),
			spawn_timer: None,
		};

		adapter.listen_pointer(&engine)?;
		adapter.listen_layout(&engine, &surface, &settings.anchor_id)?;
		adapter.start_spawn_timer(&engine, &settings.config)?;
		adapter.start_frames(&engine, &surface)?;

		info!(
			"disintegration-canvas: attached {}x{} surface for {:?}",
			width, height, settings.text
		);
		Ok(adapter)
	}

	fn listen(&mut self, event: &'static str, listener: Listener) -> Result<(), SurfaceError> {
		self.window
			.add_event_listener_with_callback(event, listener.as_ref().unchecked_ref())?;
		self.listeners.push((event, listener));
		Ok(())
	}

	fn listen_pointer(&mut self, engine: &Rc<RefCell<Engine>>) -> Result<(), SurfaceError> {
		let engine_mm = engine.clone();
		self.listen(
			"mousemove",
			Closure::new(move |ev: Event| {
				if let Some(ev) = ev.dyn_ref::<MouseEvent>() {
					engine_mm.borrow_mut().dispatch(EngineEvent::PointerMove {
						x: ev.client_x() as f64,
						y: ev.client_y() as f64,
					});
				}
			}),
		)?;

		let engine_ml = engine.clone();
		self.listen(
			"mouseleave",
			Closure::new(move |_: Event| {
				engine_ml.borrow_mut().dispatch(EngineEvent::PointerLeave);
			}),
		)
	}

	fn listen_layout(
		&mut self,
		engine: &Rc<RefCell<Engine>>,
		surface: &Rc<RefCell<Surface>>,
		anchor_id: &str,
	) -> Result<(), SurfaceError> {
		let (engine_rs, surface_rs, anchor_rs) = (engine.clone(), surface.clone(), anchor_id.to_string());
		self.listen(
			"resize",
			Closure::new(move |_: Event| {
				let Some(win) = web_sys::window() else {
					return;
				};
				let size = surface_rs.borrow_mut().fit_viewport(&win);
				match size {
					Ok((width, height)) => {
						let hero = win.document().and_then(|d| read_hero_rect(&d, &anchor_rs));
						engine_rs.borrow_mut().dispatch(EngineEvent::Resize {
							width,
							height,
							hero,
						});
					}
					Err(e) => warn!("disintegration-canvas: resize failed: {}", e),
				}
			}),
		)?;

		let (engine_sc, anchor_sc) = (engine.clone(), anchor_id.to_string());
		self.listen(
			"scroll",
			Closure::new(move |_: Event| {
				let hero = web_sys::window()
					.and_then(|w| w.document())
					.and_then(|d| read_hero_rect(&d, &anchor_sc));
				if let Some(rect) = hero {
					engine_sc.borrow_mut().dispatch(EngineEvent::HeroMoved(rect));
				}
			}),
		)
	}

	fn start_spawn_timer(&mut self, engine: &Rc<RefCell<Engine>>, config: &EngineConfig) -> Result<(), SurfaceError> {
		let engine_sp = engine.clone();
		let tick: Closure<dyn FnMut()> = Closure::new(move || {
			engine_sp.borrow_mut().dispatch(EngineEvent::SpawnTick);
		});
		let id = self.window.set_interval_with_callback_and_timeout_and_arguments_0(
			tick.as_ref().unchecked_ref(),
			config.starfield.spawn_interval_ms as i32,
		)?;
		self.spawn_timer = Some((id, tick));
		Ok(())
	}

	fn start_frames(&mut self, engine: &Rc<RefCell<Engine>>, surface: &Rc<RefCell<Surface>>) -> Result<(), SurfaceError> {
		let (engine_af, surface_af) = (engine.clone(), surface.clone());
		let (frame_inner, handle_inner, running) =
			(self.frame.clone(), self.frame_handle.clone(), self.running.clone());
		let last_timestamp: Cell<Option<f64>> = Cell::new(None);

		*self.frame.borrow_mut() = Some(Closure::new(move |timestamp: f64| {
			if !running.get() {
				return;
			}
			let dt = last_timestamp.get().map_or(0.0, |prev| timestamp - prev);
			last_timestamp.set(Some(timestamp));
			{
				let mut engine = engine_af.borrow_mut();
				engine.step(dt);
				render::render(&*engine, surface_af.borrow().context());
			}
			if let Some(ref cb) = *frame_inner.borrow() {
				let next = web_sys::window().and_then(|w| w.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
				handle_inner.set(next);
			}
		}));

		if let Some(ref cb) = *self.frame.borrow() {
			let handle = self.window.request_animation_frame(cb.as_ref().unchecked_ref())?;
			self.frame_handle.set(Some(handle));
		}
		Ok(())
	}

	/// Stop the frame loop and the spawn timer, and remove every listener.
	fn teardown(&mut self) {
		self.running.set(false);
		if let Some(handle) = self.frame_handle.take() {
			let _ = self.window.cancel_animation_frame(handle);
		}
		// Dropping the frame closure breaks its self-reference.
		self.frame.borrow_mut().take();
		if let Some((id, _tick)) = self.spawn_timer.take() {
			self.window.clear_interval_with_handle(id);
		}
		for (event, listener) in self.listeners.drain(..) {
			let _ = self
				.window
				.remove_event_listener_with_callback(event, listener.as_ref().unchecked_ref());
		}
		info!("disintegration-canvas: detached");
	}
}

impl Drop for HostAdapter {
	fn drop(&mut self) {
		self.teardown();
	}
}

/// Full-viewport particle lettering behind page content.
///
/// `text` is rasterized into the rectangle of the element with id `anchor_id`
/// and follows it across scrolls and resizes. The canvas is purely decorative
/// and transparent, so the page background shows through.
#[component]
pub fn DisintegrationCanvas(
	#[prop(into)] text: String,
	#[prop(default = ThemeMode::Dark)] theme: ThemeMode,
	#[prop(into, default = "lettering-anchor".to_string())] anchor_id: String,
	#[prop(optional)] config: Option<EngineConfig>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let host = StoredValue::new_local(None::<HostAdapter>);
	let aria_label = format!("{text} — disintegration canvas");
	let settings = CanvasSettings {
		text,
		theme,
		anchor_id,
		config: config.unwrap_or_default(),
	};

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if host.with_value(Option::is_some) {
			return;
		}
		match HostAdapter::attach(canvas, &settings) {
			Ok(adapter) => host.set_value(Some(adapter)),
			Err(e) => warn!("disintegration-canvas: canvas left inert: {}", e),
		}
	});

	// Dropping the adapter tears it down.
	on_cleanup(move || {
		host.try_update_value(|h| h.take());
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="disintegration-canvas"
			aria-label=aria_label
			style="position: fixed; inset: 0; z-index: 0; pointer-events: none; display: block;"
		/>
	}
}
