//! Full-viewport canvas carrying the animated particle background.

use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;
use fcst_core::particles::FieldConfig;
use log::error;

use crate::background::{self, FrameLoopHandle};
use crate::BACKGROUND_CANVAS_ID;

/// Fixed canvas behind the page content. The frame loop starts once the
/// canvas is mounted and stops when the component unmounts.
#[component]
pub fn ParticleCanvas() -> Element {
    let handle: Rc<RefCell<Option<FrameLoopHandle>>> = use_hook(|| Rc::new(RefCell::new(None)));

    let starter = handle.clone();
    use_effect(move || {
        if starter.borrow().is_some() {
            return;
        }
        match background::start(BACKGROUND_CANVAS_ID, FieldConfig::default()) {
            Ok(h) => *starter.borrow_mut() = Some(h),
            Err(e) => error!("Background failed to start: {}", e),
        }
    });

    use_drop(move || {
        if let Some(h) = handle.borrow().as_ref() {
            h.stop();
        }
    });

    rsx! {
        canvas {
            id: BACKGROUND_CANVAS_ID,
            style: "position: fixed; top: 0; left: 0; width: 100vw; height: 100vh; z-index: -1; background: #05070d; display: block;",
        }
    }
}
