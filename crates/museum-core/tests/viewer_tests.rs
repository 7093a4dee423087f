use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use glam::{Vec2, Vec3};
use museum_core::projection::symmetric;
use museum_core::{
    DetectionSource, FaceSample, Gallery, HeadInput, RigMode, TrackingError, TrackingReport,
    TrackingStatus, Viewer, ViewerSettings,
};

const FRAME: Duration = Duration::from_millis(16);
const ASPECT: f32 = 1.6;

#[derive(Clone, Default)]
struct CallLog(Rc<RefCell<Vec<&'static str>>>);

impl CallLog {
    fn calls(&self) -> Vec<&'static str> {
        self.0.borrow().clone()
    }
}

struct FakeDetector {
    log: CallLog,
    fail: Option<TrackingError>,
}

impl DetectionSource for FakeDetector {
    fn start(&mut self) -> Result<(), TrackingError> {
        self.log.0.borrow_mut().push("start");
        match &self.fail {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }

    fn stop(&mut self) {
        self.log.0.borrow_mut().push("stop");
    }
}

fn viewer(tracking: bool, fail: Option<TrackingError>) -> (Viewer, CallLog) {
    let log = CallLog::default();
    let detector = FakeDetector {
        log: log.clone(),
        fail,
    };
    let settings = ViewerSettings {
        tracking_enabled: tracking,
        ..ViewerSettings::default()
    };
    (
        Viewer::new(Gallery::default(), Box::new(detector), settings),
        log,
    )
}

fn run(v: &mut Viewer, frames: usize) {
    for _ in 0..frames {
        v.frame(FRAME, ASPECT);
    }
}

fn make_ready(v: &mut Viewer) {
    v.status_inbox()
        .post(TrackingReport::new(TrackingStatus::Ready, "Tracking ready"));
    v.frame(FRAME, ASPECT);
}

#[test]
fn starts_detection_when_enabled() {
    let (v, log) = viewer(true, None);
    assert_eq!(log.calls(), vec!["start"]);
    assert_eq!(v.tracking_status(), TrackingStatus::Starting);
    assert_eq!(v.hud().tracking_label, "starting");

    let (v, log) = viewer(false, None);
    assert!(log.calls().is_empty());
    assert_eq!(v.hud().tracking_label, "off");
}

#[test]
fn start_failure_falls_back_to_pointer() {
    let (mut v, _) = viewer(true, Some(TrackingError::classify("Permission denied")));
    assert_eq!(v.tracking_status(), TrackingStatus::Denied);

    v.pointer_moved(1.0, 0.5);
    v.frame(FRAME, ASPECT);
    assert!((v.head_offset().nx - 0.45).abs() < 1e-6);
    assert_eq!(v.hud().head.message, "Camera unavailable, mouse fallback");
    assert!(!v.hud().head.ok);
}

#[test]
fn face_samples_only_count_once_ready() {
    let (mut v, _) = viewer(true, None);
    let inbox = v.head_inbox();

    inbox.post(HeadInput::Face(FaceSample::new(0.3, 0.5, 0.04)));
    v.frame(FRAME, ASPECT);
    assert!(!v.hud().head.ok);

    make_ready(&mut v);
    assert_eq!(v.hud().tracking_label, "ready");

    inbox.post(HeadInput::Face(FaceSample::new(0.5, 0.5, 0.04)));
    v.frame(FRAME, ASPECT);
    assert!(v.hud().head.ok);
    assert_eq!(v.head_offset().nx, 0.0);

    inbox.post(HeadInput::Face(FaceSample::new(0.7, 0.5, 0.04)));
    v.frame(FRAME, ASPECT);
    assert!(v.head_offset().nx > 0.0);
}

#[test]
fn pointer_is_ignored_while_face_pipeline_is_live() {
    let (mut v, _) = viewer(true, None);
    make_ready(&mut v);
    v.pointer_moved(0.0, 0.0);
    v.frame(FRAME, ASPECT);
    assert_eq!(v.head_offset().nx, 0.0);
}

#[test]
fn tracking_on_shifts_projection() {
    let (mut v, _) = viewer(true, None);
    make_ready(&mut v);
    let inbox = v.head_inbox();
    inbox.post(HeadInput::Face(FaceSample::new(0.5, 0.5, 0.04)));
    v.frame(FRAME, ASPECT);
    inbox.post(HeadInput::Face(FaceSample::new(0.9, 0.5, 0.04)));
    let frame = v.frame(FRAME, ASPECT);
    let f = frame.projection.frustum;
    assert!(f.left + f.right > 0.0);
}

#[test]
fn disabling_tracking_restores_symmetric_projection() {
    let (mut v, log) = viewer(true, Some(TrackingError::classify("no camera")));
    v.pointer_moved(0.9, 0.1);
    v.frame(FRAME, ASPECT);
    assert!(v.head_offset().nx > 0.0);

    v.set_tracking_enabled(false);
    assert_eq!(log.calls(), vec!["start", "stop"]);
    assert_eq!(v.hud().tracking_label, "off");

    v.pointer_moved(0.1, 0.9);
    let frame = v.frame(FRAME, ASPECT);
    assert_eq!(v.hud().head.message, "Mouse parallax");
    assert!(v.head_offset().nx < 0.0);
    assert_eq!(frame.projection, symmetric(45.0, ASPECT, 0.1, 200.0));

    // late reports from a stopped detector are dropped
    v.status_inbox()
        .post(TrackingReport::new(TrackingStatus::Ready, ""));
    v.frame(FRAME, ASPECT);
    assert_eq!(v.tracking_status(), TrackingStatus::Off);
}

#[test]
fn toggle_restarts_detection() {
    let (mut v, log) = viewer(true, None);
    v.toggle_tracking();
    v.toggle_tracking();
    assert_eq!(log.calls(), vec!["start", "stop", "start"]);
    assert!(v.settings().tracking_enabled);
}

#[test]
fn drop_releases_detector() {
    let (v, log) = viewer(true, None);
    drop(v);
    assert_eq!(log.calls(), vec!["start", "stop"]);
}

#[test]
fn settings_are_clamped() {
    let (mut v, _) = viewer(false, None);
    assert_eq!(v.set_strength(2.0), 0.55);
    assert_eq!(v.set_strength(0.0), 0.12);
    assert_eq!(v.set_strength(f32::NAN), 0.12);
    assert_eq!(v.set_smoothing(0.0), 0.08);
    assert_eq!(v.set_smoothing(0.2), 0.2);
    assert_eq!(v.hud().smoothing, 0.2);
}

#[test]
fn select_and_close_drive_focus_controller() {
    let (mut v, _) = viewer(false, None);
    v.select(Some(1));
    assert_eq!(v.hud().selected.map(|e| e.id), Some("a2"));
    assert_eq!(v.hud().mode, RigMode::EnteringInspect);

    run(&mut v, 300);
    assert_eq!(v.hud().mode, RigMode::Inspecting);
    let eye = v.last_frame().expect("frame").eye;
    assert!(eye.distance(Vec3::new(0.0, 2.9, -3.482)) < 0.03);
    assert!(v.last_frame().expect("frame").light.intensity > 2.0);

    v.select(Some(99));
    assert_eq!(v.selected(), Some(1));

    v.close_exhibit();
    assert!(v.hud().selected.is_none());
    assert_eq!(v.hud().mode, RigMode::Exiting);
    run(&mut v, 60);
    assert_eq!(v.hud().mode, RigMode::Orbit);
}

#[test]
fn focus_commands_are_clamped() {
    let (mut v, _) = viewer(false, None);
    assert_eq!(v.hud().focus_index, 1);
    assert_eq!(v.hud().focus_total, 4);
    assert_eq!(v.focus_prev(), 0);
    assert_eq!(v.focus_prev(), 0);
    assert!(!v.hud().can_focus_prev());
    assert_eq!(v.focus_wheel(2.0), 0);
    assert_eq!(v.focus_wheel(30.0), 1);
    assert_eq!(v.focus_next(), 2);
    assert_eq!(v.focus_next(), 3);
    assert_eq!(v.focus_next(), 3);
    assert!(!v.hud().can_focus_next());
}

#[test]
fn pick_uses_last_frame() {
    let (mut v, _) = viewer(false, None);
    assert_eq!(v.pick(Vec2::ZERO), None);

    run(&mut v, 200);
    let frame = *v.last_frame().expect("frame");
    let anchor = v.gallery().exhibits[1].position;
    let ndc = frame.view_proj.project_point3(anchor);
    assert_eq!(v.pick(Vec2::new(ndc.x, ndc.y)), Some(1));

    v.hover(Some(Vec2::new(ndc.x, ndc.y)));
    assert_eq!(v.hovered(), Some(1));
    v.hover(None);
    assert_eq!(v.hovered(), None);
}

#[test]
fn frame_matrices_are_consistent() {
    let (mut v, _) = viewer(false, None);
    let frame = v.frame(FRAME, ASPECT);
    let product = frame.view_proj * frame.inverse_view_proj;
    assert!(product.abs_diff_eq(glam::Mat4::IDENTITY, 1e-3));
    let u = frame.uniforms();
    assert_eq!(u.eye[..3], frame.eye.to_array());
}
