use crate::constants::{DRAG_CLICK_THRESHOLD_PX, WHEEL_LINE_PX, WHEEL_PAGE_PX};
use glam::Vec2;
use web_sys as web;

/// How a press ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Release {
    /// Pointer stayed within the click threshold: pick.
    Click,
    /// Pointer travelled: the press was an orbit gesture.
    Drag,
}

/// Tells a click from an orbit drag and yields per-move deltas.
#[derive(Default, Clone, Copy, Debug)]
pub struct DragTracker {
    origin: Option<Vec2>,
    last: Vec2,
    travelled: bool,
}

impl DragTracker {
    pub fn press(&mut self, pos: Vec2) {
        self.origin = Some(pos);
        self.last = pos;
        self.travelled = false;
    }

    #[inline]
    pub fn is_pressed(&self) -> bool {
        self.origin.is_some()
    }

    /// Delta since the previous move, `None` while not pressed.
    pub fn move_to(&mut self, pos: Vec2) -> Option<Vec2> {
        let origin = self.origin?;
        if pos.distance(origin) > DRAG_CLICK_THRESHOLD_PX {
            self.travelled = true;
        }
        let delta = pos - self.last;
        self.last = pos;
        Some(delta)
    }

    pub fn release(&mut self) -> Option<Release> {
        self.origin.take()?;
        Some(if self.travelled {
            Release::Drag
        } else {
            Release::Click
        })
    }

    pub fn cancel(&mut self) {
        self.origin = None;
        self.travelled = false;
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WheelAction {
    /// Step the orbit focus preset by the wheel delta (px).
    Focus(f32),
    /// Dolly by the wheel delta (px).
    Dolly(f32),
}

/// Plain wheel walks the focus presets, ctrl+wheel (and pinch) dollies.
#[inline]
pub fn wheel_action(delta_y: f32, ctrl: bool) -> WheelAction {
    if ctrl {
        WheelAction::Dolly(delta_y)
    } else {
        WheelAction::Focus(delta_y)
    }
}

/// `WheelEvent.deltaY` in pixels whatever `deltaMode` the browser used.
#[inline]
pub fn wheel_delta_px(delta_y: f64, delta_mode: u32) -> f32 {
    let scale = match delta_mode {
        1 => WHEEL_LINE_PX,
        2 => WHEEL_PAGE_PX,
        _ => 1.0,
    };
    delta_y as f32 * scale
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyCommand {
    FocusPrev,
    FocusNext,
    CloseExhibit,
    Calibrate,
    ToggleTracking,
    ToggleFullscreen,
}

#[inline]
pub fn key_command(key: &str) -> Option<KeyCommand> {
    match key {
        "ArrowLeft" => Some(KeyCommand::FocusPrev),
        "ArrowRight" => Some(KeyCommand::FocusNext),
        "Escape" => Some(KeyCommand::CloseExhibit),
        "c" | "C" => Some(KeyCommand::Calibrate),
        "t" | "T" => Some(KeyCommand::ToggleTracking),
        "Enter" => Some(KeyCommand::ToggleFullscreen),
        _ => None,
    }
}

/// Viewport position as uv (0..1, y down) for the mouse parallax fallback.
#[inline]
pub fn viewport_uv(client: Vec2, viewport: Vec2) -> Option<[f32; 2]> {
    if viewport.x > 0.0 && viewport.y > 0.0 {
        Some([client.x / viewport.x, client.y / viewport.y])
    } else {
        None
    }
}

// ---------------- Pointer helpers ----------------
#[inline]
pub fn pointer_canvas_css(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    Vec2::new(
        ev.client_x() as f32 - rect.left() as f32,
        ev.client_y() as f32 - rect.top() as f32,
    )
}

/// Canvas-relative pointer position in NDC, `None` for a zero-sized canvas.
#[inline]
pub fn pointer_canvas_ndc(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> Option<Vec2> {
    let rect = canvas.get_bounding_client_rect();
    let w = rect.width() as f32;
    let h = rect.height() as f32;
    (w > 0.0 && h > 0.0).then(|| museum_core::pixel_to_ndc(pointer_canvas_css(ev, canvas), w, h))
}
