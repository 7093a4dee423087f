use crate::constants::*;
use crate::dom;
use museum_core::{HudState, Viewer};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

/// Wires HUD buttons, sliders and the exhibit panel to the viewer.
pub fn wire_controls(document: &web::Document, viewer: &Rc<RefCell<Viewer>>) {
    let v = viewer.clone();
    dom::add_click_listener(document, HUD_CALIBRATE_ID, move || v.borrow_mut().calibrate());

    let v = viewer.clone();
    dom::add_click_listener(document, HUD_TRACKING_TOGGLE_ID, move || {
        v.borrow_mut().toggle_tracking()
    });

    let v = viewer.clone();
    dom::add_click_listener(document, HUD_PREV_ID, move || {
        v.borrow_mut().focus_prev();
    });

    let v = viewer.clone();
    dom::add_click_listener(document, HUD_NEXT_ID, move || {
        v.borrow_mut().focus_next();
    });

    let v = viewer.clone();
    dom::add_click_listener(document, PANEL_CLOSE_ID, move || v.borrow_mut().close_exhibit());

    let (strength, smoothing) = {
        let s = viewer.borrow();
        (s.settings().strength, s.settings().smoothing.alpha)
    };
    if let Some(input) = dom::range_input(document, HUD_STRENGTH_ID) {
        input.set_value(&format!("{strength:.2}"));
    }
    if let Some(input) = dom::range_input(document, HUD_SMOOTHING_ID) {
        input.set_value(&format!("{smoothing:.2}"));
    }

    let v = viewer.clone();
    dom::add_range_listener(document, HUD_STRENGTH_ID, move |x| {
        v.borrow_mut().set_strength(x);
    });

    let v = viewer.clone();
    dom::add_range_listener(document, HUD_SMOOTHING_ID, move |x| {
        v.borrow_mut().set_smoothing(x);
    });
}

/// Mirrors the viewer's read model into the DOM once per frame.
pub struct Hud {
    document: web::Document,
    shown: Option<&'static str>,
}

impl Hud {
    pub fn new(document: web::Document) -> Self {
        Self {
            document,
            shown: None,
        }
    }

    pub fn sync(&mut self, state: &HudState<'_>) {
        let d = &self.document;

        dom::toggle_class(d, HUD_STATUS_DOT_ID, DOT_ON_CLASS, state.tracking_enabled);
        dom::set_text(d, HUD_STATUS_LABEL_ID, status_text(state));
        dom::set_title(d, HUD_STATUS_LABEL_ID, state.tracking_detail);
        dom::set_text(
            d,
            HUD_TRACKING_TOGGLE_ID,
            if state.tracking_enabled {
                "Tracking off"
            } else {
                "Tracking on"
            },
        );
        dom::toggle_class(d, HUD_TRACKING_TOGGLE_ID, DANGER_CLASS, state.tracking_enabled);

        dom::set_text(d, HUD_HEAD_ID, &head_text(state));
        dom::set_text(
            d,
            HUD_FOCUS_ID,
            &format!("{} / {}", state.focus_index + 1, state.focus_total),
        );
        dom::set_disabled(d, HUD_PREV_ID, !state.can_focus_prev());
        dom::set_disabled(d, HUD_NEXT_ID, !state.can_focus_next());

        let selected_id = state.selected.map(|e| e.id);
        if selected_id != self.shown {
            match state.selected {
                Some(e) => {
                    dom::set_text(d, PANEL_TITLE_ID, e.title);
                    dom::set_text(d, PANEL_NOTE_ID, e.note);
                    dom::set_text(d, PANEL_ARTIST_ID, e.artist);
                    dom::set_text(d, PANEL_YEAR_ID, e.year);
                    dom::toggle_class(d, PANEL_ID, HIDDEN_CLASS, false);
                }
                None => dom::toggle_class(d, PANEL_ID, HIDDEN_CLASS, true),
            }
            self.shown = selected_id;
        }
    }
}

#[inline]
fn status_text(state: &HudState<'_>) -> &'static str {
    if state.tracking_enabled {
        "Tracking"
    } else {
        "Tracking Off"
    }
}

fn head_text(state: &HudState<'_>) -> String {
    let o = state.head.offset;
    format!(
        "{} · {} · x {:+.2} y {:+.2}",
        state.tracking_label, state.head.message, o.nx, o.ny
    )
}
