//! Per-frame orchestration shared by the web and native frontends.
//!
//! A frontend owns one [`Viewer`], forwards user gestures to its command
//! methods, and calls [`Viewer::frame`] once per rendered frame. Face samples
//! and status reports from the detection glue arrive through the two
//! mailboxes and are drained at the start of each frame.

use std::sync::Arc;
use std::time::Duration;

use glam::{Mat4, Vec2, Vec3};

use crate::constants::{
    DEFAULT_STRENGTH, DOLLY_PER_WHEEL_UNIT, INITIAL_EYE, INITIAL_FOCUS_INDEX, INITIAL_LOOK_TARGET,
    MAX_SMOOTHING_ALPHA, MAX_STRENGTH, MIN_SMOOTHING_ALPHA, MIN_STRENGTH,
};
use crate::focus::{CameraFocusController, RigMode};
use crate::gallery::{wheel_focus_index, Exhibit, Gallery};
use crate::head::{HeadDiagnostics, HeadOffset, HeadSignalProcessor, SmoothingParams};
use crate::light::{InspectLight, SpotLight};
use crate::orbit::{CameraPose, OrbitControls, OrbitRig};
use crate::pick::screen_ray;
use crate::projection::{self, Lens, Projection};
use crate::scene::{build_instances, QuadInstance, SceneUniforms};
use crate::tracking::{
    pointer_fallback, prefers_pointer_fallback, DetectionSource, HeadInput, Mailbox,
    TrackingReport, TrackingStatus,
};

/// Runtime-adjustable settings. Setters clamp into the supported ranges.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewerSettings {
    pub tracking_enabled: bool,
    pub strength: f32,
    pub smoothing: SmoothingParams,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            tracking_enabled: true,
            strength: DEFAULT_STRENGTH,
            smoothing: SmoothingParams::default(),
        }
    }
}

impl ViewerSettings {
    pub fn set_strength(&mut self, strength: f32) -> f32 {
        if strength.is_finite() {
            self.strength = strength.clamp(MIN_STRENGTH, MAX_STRENGTH);
        }
        self.strength
    }

    pub fn set_smoothing(&mut self, alpha: f32) -> f32 {
        if alpha.is_finite() {
            self.smoothing.alpha = alpha.clamp(MIN_SMOOTHING_ALPHA, MAX_SMOOTHING_ALPHA);
        }
        self.smoothing.alpha
    }
}

/// Everything a renderer needs for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameView {
    pub view: Mat4,
    pub projection: Projection,
    pub view_proj: Mat4,
    pub inverse_view_proj: Mat4,
    pub eye: Vec3,
    pub light: SpotLight,
}

impl FrameView {
    pub fn uniforms(&self) -> SceneUniforms {
        SceneUniforms::new(self.view_proj, self.eye, &self.light)
    }
}

/// Read model for the HUD.
#[derive(Clone, Debug)]
pub struct HudState<'a> {
    pub tracking_enabled: bool,
    /// `off` when disabled, otherwise the detection status.
    pub tracking_label: &'static str,
    pub tracking_detail: &'a str,
    pub head: &'a HeadDiagnostics,
    pub strength: f32,
    pub smoothing: f32,
    pub focus_index: usize,
    pub focus_total: usize,
    pub mode: RigMode,
    pub selected: Option<&'a Exhibit>,
}

impl HudState<'_> {
    pub fn can_focus_prev(&self) -> bool {
        self.focus_index > 0
    }

    pub fn can_focus_next(&self) -> bool {
        self.focus_index + 1 < self.focus_total
    }
}

pub struct Viewer {
    gallery: Gallery,
    settings: ViewerSettings,
    lens: Lens,
    head: HeadSignalProcessor,
    head_inbox: Arc<Mailbox<HeadInput>>,
    status_inbox: Arc<Mailbox<TrackingReport>>,
    detector: Box<dyn DetectionSource>,
    report: TrackingReport,
    controller: CameraFocusController,
    orbit: OrbitControls,
    light: InspectLight,
    selected: Option<usize>,
    hovered: Option<usize>,
    last_frame: Option<FrameView>,
}

impl Viewer {
    /// Build a viewer and start detection if `settings` asks for it.
    pub fn new(
        gallery: Gallery,
        detector: Box<dyn DetectionSource>,
        settings: ViewerSettings,
    ) -> Self {
        let initial = CameraPose::new(Vec3::from(INITIAL_EYE), Vec3::from(INITIAL_LOOK_TARGET));
        let controller =
            CameraFocusController::new(gallery.presets.clone(), INITIAL_FOCUS_INDEX, initial);
        let mut viewer = Self {
            gallery,
            settings: ViewerSettings {
                tracking_enabled: false,
                ..settings
            },
            lens: Lens::default(),
            head: HeadSignalProcessor::new(),
            head_inbox: Arc::new(Mailbox::new()),
            status_inbox: Arc::new(Mailbox::new()),
            detector,
            report: TrackingReport::default(),
            controller,
            orbit: OrbitControls::new(initial),
            light: InspectLight::new(),
            selected: None,
            hovered: None,
            last_frame: None,
        };
        viewer.settings.set_strength(settings.strength);
        viewer.settings.set_smoothing(settings.smoothing.alpha);
        viewer.set_tracking_enabled(settings.tracking_enabled);
        viewer
    }

    /// Producer handle for face samples.
    pub fn head_inbox(&self) -> Arc<Mailbox<HeadInput>> {
        Arc::clone(&self.head_inbox)
    }

    /// Producer handle for detection status reports.
    pub fn status_inbox(&self) -> Arc<Mailbox<TrackingReport>> {
        Arc::clone(&self.status_inbox)
    }

    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    pub fn settings(&self) -> &ViewerSettings {
        &self.settings
    }

    pub fn controller(&self) -> &CameraFocusController {
        &self.controller
    }

    pub fn orbit(&self) -> &OrbitControls {
        &self.orbit
    }

    pub fn head_offset(&self) -> HeadOffset {
        self.head.offset()
    }

    pub fn tracking_status(&self) -> TrackingStatus {
        self.report.status
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn last_frame(&self) -> Option<&FrameView> {
        self.last_frame.as_ref()
    }

    // --- tracking -------------------------------------------------------

    pub fn set_tracking_enabled(&mut self, enabled: bool) {
        if enabled == self.settings.tracking_enabled {
            return;
        }
        self.settings.tracking_enabled = enabled;
        self.head_inbox.clear();
        self.status_inbox.clear();
        if enabled {
            self.report = TrackingReport::new(TrackingStatus::Starting, "Starting camera");
            log::info!("[tracking] starting");
            if let Err(e) = self.detector.start() {
                log::warn!("[tracking] {e}");
                self.report = e.report();
            }
        } else {
            self.detector.stop();
            self.report = TrackingReport::new(TrackingStatus::Off, "Tracking off");
            log::info!("[tracking] stopped");
        }
    }

    pub fn toggle_tracking(&mut self) {
        self.set_tracking_enabled(!self.settings.tracking_enabled);
    }

    pub fn calibrate(&mut self) {
        self.head.calibrate();
    }

    pub fn set_strength(&mut self, strength: f32) -> f32 {
        self.settings.set_strength(strength)
    }

    pub fn set_smoothing(&mut self, alpha: f32) -> f32 {
        self.settings.set_smoothing(alpha)
    }

    /// Cursor moved to screen uv (`0..1`, y down). Ignored while the face pipeline is live.
    pub fn pointer_moved(&mut self, u: f32, v: f32) {
        if prefers_pointer_fallback(self.settings.tracking_enabled, self.report.status) {
            self.head_inbox
                .post(pointer_fallback(u, v, self.settings.tracking_enabled));
        }
    }

    fn drain_inboxes(&mut self) {
        if let Some(report) = self.status_inbox.take() {
            if self.settings.tracking_enabled && report != self.report {
                match report.status {
                    TrackingStatus::Denied | TrackingStatus::Error => {
                        log::warn!("[tracking] {}: {}", report.status, report.detail)
                    }
                    _ => log::info!("[tracking] {}", report.status),
                }
                self.report = report;
            }
        }

        let fallback = prefers_pointer_fallback(self.settings.tracking_enabled, self.report.status);
        match self.head_inbox.take() {
            Some(HeadInput::Face(sample)) if !fallback => {
                self.head.update(sample, self.settings.smoothing);
            }
            Some(HeadInput::Pointer { nx, ny, reason }) if fallback => {
                self.head.hard_set(nx, ny, reason);
            }
            _ => {}
        }
    }

    // --- selection and focus -------------------------------------------

    /// Inspect the exhibit at `index`, or leave inspect with `None`.
    pub fn select(&mut self, index: Option<usize>) {
        match index {
            Some(i) => {
                let Some(exhibit) = self.gallery.exhibit(i) else {
                    log::warn!("[viewer] no exhibit at index {i}");
                    return;
                };
                log::info!("[viewer] select {} \"{}\"", exhibit.id, exhibit.title);
                self.controller.select(Some(exhibit.inspect_pose()));
                self.selected = Some(i);
            }
            None => self.close_exhibit(),
        }
    }

    pub fn close_exhibit(&mut self) {
        if self.selected.take().is_some() {
            self.controller.select(None);
        }
    }

    pub fn focus_prev(&mut self) -> usize {
        let i = self.controller.focus_index() as isize - 1;
        self.controller.set_focus_index(i)
    }

    pub fn focus_next(&mut self) -> usize {
        let i = self.controller.focus_index() as isize + 1;
        self.controller.set_focus_index(i)
    }

    pub fn focus_wheel(&mut self, delta_y: f32) -> usize {
        let next = wheel_focus_index(
            self.controller.focus_index(),
            delta_y,
            self.controller.preset_count(),
        );
        self.controller.set_focus_index(next as isize)
    }

    // --- orbiter gestures ----------------------------------------------

    pub fn begin_drag(&mut self) {
        self.orbit.begin_drag();
    }

    pub fn drag(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        self.orbit.rotate_by_pixels(dx, dy, viewport_height);
    }

    pub fn end_drag(&mut self) {
        self.orbit.end_drag();
    }

    pub fn dolly(&mut self, factor: f32) {
        self.orbit.dolly(factor);
    }

    /// Ctrl+wheel: positive deltas move away from the target.
    pub fn dolly_wheel(&mut self, delta_y: f32) {
        if delta_y.is_finite() {
            self.orbit.dolly((delta_y * DOLLY_PER_WHEEL_UNIT).exp());
        }
    }

    /// Exhibit under `ndc` in the last rendered frame.
    pub fn pick(&self, ndc: Vec2) -> Option<usize> {
        let frame = self.last_frame.as_ref()?;
        let (origin, dir) = screen_ray(ndc, frame.inverse_view_proj)?;
        self.gallery.pick(origin, dir)
    }

    pub fn hover(&mut self, ndc: Option<Vec2>) {
        self.hovered = ndc.and_then(|p| self.pick(p));
    }

    // --- frame ----------------------------------------------------------

    /// Advance one tick and produce the matrices for this frame.
    pub fn frame(&mut self, dt: Duration, aspect: f32) -> FrameView {
        self.drain_inboxes();

        self.controller.update(dt, &mut self.orbit);
        self.orbit.update();

        let pose = self.orbit.pose();
        let light = self
            .light
            .update(dt.as_secs_f32(), pose.position, self.controller.selection());

        let view = Mat4::look_at_rh(pose.position, pose.target, Vec3::Y);
        let projection = if self.settings.tracking_enabled {
            projection::solve_for_lens(&self.lens, aspect, self.head.offset(), self.settings.strength)
        } else {
            projection::symmetric(self.lens.fov_y_degrees, aspect, self.lens.near, self.lens.far)
        };
        let frame = FrameView {
            view,
            projection,
            view_proj: projection.matrix * view,
            inverse_view_proj: view.inverse() * projection.inverse,
            eye: pose.position,
            light,
        };
        self.last_frame = Some(frame);
        frame
    }

    pub fn instances(&self) -> Vec<QuadInstance> {
        build_instances(&self.gallery, self.hovered, self.selected)
    }

    pub fn hud(&self) -> HudState<'_> {
        HudState {
            tracking_enabled: self.settings.tracking_enabled,
            tracking_label: if self.settings.tracking_enabled {
                self.report.status.as_str()
            } else {
                TrackingStatus::Off.as_str()
            },
            tracking_detail: &self.report.detail,
            head: self.head.diagnostics(),
            strength: self.settings.strength,
            smoothing: self.settings.smoothing.alpha,
            focus_index: self.controller.focus_index(),
            focus_total: self.controller.preset_count(),
            mode: self.controller.mode(),
            selected: self.selected.and_then(|i| self.gallery.exhibit(i)),
        }
    }
}

impl Drop for Viewer {
    fn drop(&mut self) {
        if self.settings.tracking_enabled {
            self.detector.stop();
        }
    }
}
