/// DOM ids and interaction thresholds for the web front-end.
///
/// Element ids must match `web/index.html`.
pub const CANVAS_ID: &str = "app-canvas";

// HUD controls
pub const HUD_CALIBRATE_ID: &str = "hud-calibrate";
pub const HUD_TRACKING_TOGGLE_ID: &str = "hud-tracking";
pub const HUD_PREV_ID: &str = "hud-prev";
pub const HUD_NEXT_ID: &str = "hud-next";
pub const HUD_STRENGTH_ID: &str = "hud-strength";
pub const HUD_SMOOTHING_ID: &str = "hud-smoothing";

// HUD read-outs
pub const HUD_STATUS_DOT_ID: &str = "hud-dot";
pub const HUD_STATUS_LABEL_ID: &str = "hud-status";
pub const HUD_HEAD_ID: &str = "hud-head";
pub const HUD_FOCUS_ID: &str = "hud-focus";

// Exhibit side panel
pub const PANEL_ID: &str = "side-panel";
pub const PANEL_CLOSE_ID: &str = "panel-close";
pub const PANEL_TITLE_ID: &str = "panel-title";
pub const PANEL_NOTE_ID: &str = "panel-note";
pub const PANEL_ARTIST_ID: &str = "panel-artist";
pub const PANEL_YEAR_ID: &str = "panel-year";

// CSS classes toggled by the HUD
pub const HIDDEN_CLASS: &str = "hidden";
pub const DOT_ON_CLASS: &str = "on";
pub const DANGER_CLASS: &str = "btnDanger";

// Input thresholds are shared with the desktop front-end
pub use museum_core::constants::{DRAG_CLICK_THRESHOLD_PX, WHEEL_LINE_PX, WHEEL_PAGE_PX};
