//! Animated particle background.
//!
//! `start` builds the particle field for the current viewport, registers the
//! resize and pointer listeners once, and drives `ParticleField::frame` from a
//! self-rescheduling `requestAnimationFrame` callback. The returned handle can
//! stop the loop; nothing else ever does.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use fcst_core::particles::{FieldConfig, ParticleField};
use fcst_core::{DashboardError, Result};
use log::{info, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{MouseEvent, Window};

use crate::canvas::CanvasSurface;
use crate::js_error;

/// Field, canvas and loop clock, shared by the frame callback and listeners.
struct Background {
    field: ParticleField,
    surface: CanvasSurface,
    started_at: Option<f64>,
}

impl Background {
    fn resize(&mut self, width: f64, height: f64) {
        self.field.resize(&mut self.surface, width, height);
    }

    fn frame(&mut self, timestamp: f64) {
        let started = *self.started_at.get_or_insert(timestamp);
        self.field.frame(&mut self.surface, timestamp - started);
    }
}

/// Stops the frame loop. Cloning shares the same flag.
#[derive(Clone)]
pub struct FrameLoopHandle {
    running: Rc<Cell<bool>>,
    background: Rc<RefCell<Background>>,
}

impl FrameLoopHandle {
    pub fn stop(&self) {
        if self.running.replace(false) {
            info!("Background frame loop stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    /// Frames drawn so far; zero while the loop is still idle.
    pub fn frames(&self) -> u64 {
        self.background.borrow().field.frame_count()
    }
}

fn viewport(window: &Window) -> (f64, f64) {
    let width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    (width, height)
}

/// Start the background on the canvas with the given id.
pub fn start(canvas_id: &str, config: FieldConfig) -> Result<FrameLoopHandle> {
    let window = web_sys::window().ok_or_else(|| DashboardError::Browser("no window".to_string()))?;
    let mut surface = CanvasSurface::from_element_id(canvas_id)?;

    let (width, height) = viewport(&window);
    let mut rng = rand::thread_rng();
    let mut field = ParticleField::new(config, width, height, &mut rng);
    field.resize(&mut surface, width, height);
    info!(
        "Background started: {} particles on {}x{}",
        field.len(),
        width,
        height
    );

    let background = Rc::new(RefCell::new(Background {
        field,
        surface,
        started_at: None,
    }));
    register_listeners(&window, &background)?;

    let handle = FrameLoopHandle {
        running: Rc::new(Cell::new(true)),
        background,
    };
    start_frame_loop(handle.clone())?;
    Ok(handle)
}

fn register_listeners(window: &Window, background: &Rc<RefCell<Background>>) -> Result<()> {
    // resize
    {
        let background = background.clone();
        let win = window.clone();
        let closure = Closure::<dyn FnMut()>::wrap(Box::new(move || {
            let (width, height) = viewport(&win);
            background.borrow_mut().resize(width, height);
        }));
        window
            .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())
            .map_err(js_error)?;
        closure.forget();
    }

    // mousemove
    {
        let background = background.clone();
        let closure = Closure::<dyn FnMut(MouseEvent)>::wrap(Box::new(move |event: MouseEvent| {
            background
                .borrow_mut()
                .field
                .set_pointer(event.client_x() as f64, event.client_y() as f64);
        }));
        window
            .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())
            .map_err(js_error)?;
        closure.forget();
    }

    // mouseleave fires on the root element, not on window
    {
        let background = background.clone();
        let closure = Closure::<dyn FnMut()>::wrap(Box::new(move || {
            background.borrow_mut().field.clear_pointer();
        }));
        let root = window
            .document()
            .and_then(|doc| doc.document_element())
            .ok_or_else(|| DashboardError::MissingElement("html".to_string()))?;
        root.add_event_listener_with_callback("mouseleave", closure.as_ref().unchecked_ref())
            .map_err(js_error)?;
        closure.forget();
    }

    Ok(())
}

fn request_frame(callback: &Closure<dyn FnMut(f64)>) {
    let scheduled = web_sys::window()
        .map(|w| w.request_animation_frame(callback.as_ref().unchecked_ref()));
    if !matches!(scheduled, Some(Ok(_))) {
        warn!("requestAnimationFrame failed; background frozen");
    }
}

fn start_frame_loop(handle: FrameLoopHandle) -> Result<()> {
    let f = Rc::new(RefCell::new(None::<Closure<dyn FnMut(f64)>>));
    let g = f.clone();

    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp: f64| {
        if !handle.is_running() {
            return;
        }
        handle.background.borrow_mut().frame(timestamp);
        if let Some(callback) = f.borrow().as_ref() {
            request_frame(callback);
        }
    }) as Box<dyn FnMut(f64)>));

    let first = g.borrow();
    let callback = first
        .as_ref()
        .ok_or_else(|| DashboardError::Browser("frame callback missing".to_string()))?;
    request_frame(callback);
    Ok(())
}
