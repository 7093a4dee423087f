use crate::input::{key_command, KeyCommand};
use museum_core::Viewer;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn handle_global_keydown(
    ev: &web::KeyboardEvent,
    viewer: &Rc<RefCell<Viewer>>,
    canvas: &web::HtmlCanvasElement,
) {
    // Sliders own their arrow keys
    let from_input = ev
        .target()
        .and_then(|t| t.dyn_into::<web::HtmlInputElement>().ok())
        .is_some();
    if from_input {
        return;
    }
    let Some(cmd) = key_command(&ev.key()) else {
        return;
    };
    if ev.repeat() && !matches!(cmd, KeyCommand::FocusPrev | KeyCommand::FocusNext) {
        return;
    }
    match cmd {
        KeyCommand::FocusPrev => {
            let i = viewer.borrow_mut().focus_prev();
            log::debug!("[keys] focus {i}");
            ev.prevent_default();
        }
        KeyCommand::FocusNext => {
            let i = viewer.borrow_mut().focus_next();
            log::debug!("[keys] focus {i}");
            ev.prevent_default();
        }
        KeyCommand::CloseExhibit => viewer.borrow_mut().close_exhibit(),
        KeyCommand::Calibrate => {
            viewer.borrow_mut().calibrate();
            log::info!("[keys] calibrated");
        }
        KeyCommand::ToggleTracking => viewer.borrow_mut().toggle_tracking(),
        KeyCommand::ToggleFullscreen => {
            if let Some(doc) = crate::dom::window_document() {
                if doc.fullscreen_element().is_some() {
                    _ = doc.exit_fullscreen();
                } else {
                    _ = canvas.request_fullscreen();
                }
            }
            ev.prevent_default();
        }
    }
}

pub fn wire_global_keydown(viewer: Rc<RefCell<Viewer>>, canvas: web::HtmlCanvasElement) {
    if let Some(window) = web::window() {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                handle_global_keydown(&ev, &viewer, &canvas);
            }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
