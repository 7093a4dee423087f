use crate::input::{self, DragTracker, Release, WheelAction};
use glam::Vec2;
use museum_core::Viewer;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

const HOVER_CLASS: &str = "hovering";

#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub viewer: Rc<RefCell<Viewer>>,
    pub drag: Rc<RefCell<DragTracker>>,
}

pub fn wire_input_handlers(w: InputWiring) {
    wire_pointerdown(&w);
    wire_pointermove(&w);
    wire_pointerup(&w);
    wire_pointercancel(&w);
    wire_wheel(&w);
}

fn wire_pointerdown(w: &InputWiring) {
    let w = w.clone();
    let target = w.canvas.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        if ev.button() != 0 {
            return;
        }
        let pos = input::pointer_canvas_css(&ev, &w.canvas);
        w.drag.borrow_mut().press(pos);
        w.viewer.borrow_mut().begin_drag();
        _ = w.canvas.set_pointer_capture(ev.pointer_id());
    }) as Box<dyn FnMut(_)>);
    _ = target.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointermove(w: &InputWiring) {
    let w = w.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        // Mouse parallax fallback reads the whole viewport
        if let Some([u, v]) = viewport_uv(&ev) {
            w.viewer.borrow_mut().pointer_moved(u, v);
        }

        let pos = input::pointer_canvas_css(&ev, &w.canvas);
        let delta = w.drag.borrow_mut().move_to(pos);
        match delta {
            Some(d) => {
                let height = w.canvas.get_bounding_client_rect().height() as f32;
                w.viewer.borrow_mut().drag(d.x, d.y, height);
            }
            None => {
                let ndc = input::pointer_canvas_ndc(&ev, &w.canvas)
                    .filter(|p| p.abs().max_element() <= 1.0);
                let mut viewer = w.viewer.borrow_mut();
                viewer.hover(ndc);
                _ = w
                    .canvas
                    .class_list()
                    .toggle_with_force(HOVER_CLASS, viewer.hovered().is_some());
            }
        }
    }) as Box<dyn FnMut(_)>);
    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_pointerup(w: &InputWiring) {
    let w = w.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let Some(release) = w.drag.borrow_mut().release() else {
            return;
        };
        let mut viewer = w.viewer.borrow_mut();
        viewer.end_drag();
        if release == Release::Click {
            if let Some(hit) = input::pointer_canvas_ndc(&ev, &w.canvas).and_then(|p| viewer.pick(p))
            {
                viewer.select(Some(hit));
            }
        }
    }) as Box<dyn FnMut(_)>);
    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_pointercancel(w: &InputWiring) {
    let w = w.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
        if w.drag.borrow().is_pressed() {
            w.drag.borrow_mut().cancel();
            w.viewer.borrow_mut().end_drag();
        }
    }) as Box<dyn FnMut(_)>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("pointercancel", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_wheel(w: &InputWiring) {
    let w = w.clone();
    let target = w.canvas.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::WheelEvent| {
        let delta = input::wheel_delta_px(ev.delta_y(), ev.delta_mode());
        match input::wheel_action(delta, ev.ctrl_key()) {
            WheelAction::Focus(d) => {
                w.viewer.borrow_mut().focus_wheel(d);
            }
            WheelAction::Dolly(d) => {
                // keep the browser from zooming the page
                ev.prevent_default();
                w.viewer.borrow_mut().dolly_wheel(d);
            }
        }
    }) as Box<dyn FnMut(_)>);
    _ = target.add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn viewport_uv(ev: &web::PointerEvent) -> Option<[f32; 2]> {
    let window = web::window()?;
    let vw = window.inner_width().ok()?.as_f64()? as f32;
    let vh = window.inner_height().ok()?.as_f64()? as f32;
    input::viewport_uv(
        Vec2::new(ev.client_x() as f32, ev.client_y() as f32),
        Vec2::new(vw, vh),
    )
}
