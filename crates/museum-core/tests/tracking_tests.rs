use std::sync::Arc;
use std::thread;

use glam::Vec2;
use museum_core::{
    pointer_fallback, prefers_pointer_fallback, FaceSample, HeadInput, Mailbox, TrackingError,
    TrackingStatus,
};

#[test]
fn status_strings_round_trip() {
    for s in [
        TrackingStatus::Off,
        TrackingStatus::Starting,
        TrackingStatus::Ready,
        TrackingStatus::Denied,
        TrackingStatus::Error,
    ] {
        assert_eq!(TrackingStatus::parse(s.as_str()), s);
        assert_eq!(s.to_string(), s.as_str());
    }
    assert_eq!(TrackingStatus::parse(" Ready "), TrackingStatus::Ready);
    assert_eq!(TrackingStatus::parse("weird"), TrackingStatus::Error);
}

#[test]
fn permission_failures_are_classified_as_denied() {
    let e = TrackingError::classify("NotAllowedError: Permission denied by user");
    assert!(matches!(e, TrackingError::PermissionDenied(_)));
    assert_eq!(e.status(), TrackingStatus::Denied);
    assert_eq!(e.report().detail, "Camera permission denied");

    let e = TrackingError::classify("Failed to load face landmark model");
    assert!(matches!(e, TrackingError::Unavailable(_)));
    assert_eq!(e.status(), TrackingStatus::Error);
    assert_eq!(e.report().detail, "Failed to load face landmark model");
}

#[test]
fn face_sample_uses_landmark_bounding_box() {
    let points = [
        Vec2::new(0.4, 0.3),
        Vec2::new(0.6, 0.5),
        Vec2::new(0.5, 0.7),
        Vec2::new(f32::NAN, 0.1),
    ];
    let s = FaceSample::from_landmarks(&points).expect("sample");
    assert!((s.cx - 0.5).abs() < 1e-6);
    assert!((s.cy - 0.5).abs() < 1e-6);
    assert!((s.box_area - 0.08).abs() < 1e-6);

    assert!(FaceSample::from_landmarks(&[]).is_none());
    assert!(FaceSample::from_landmarks(&[Vec2::NAN]).is_none());
}

#[test]
fn face_sample_from_flat_buffer() {
    let s = FaceSample::from_flat_xy(&[0.2, 0.2, 0.4, 0.6, 0.9]).expect("sample");
    // trailing odd value is ignored
    assert!((s.cx - 0.3).abs() < 1e-6);
    assert!((s.cy - 0.4).abs() < 1e-6);
    assert!(FaceSample::from_flat_xy(&[0.5]).is_none());
}

#[test]
fn mailbox_keeps_latest_value_only() {
    let m = Mailbox::new();
    assert!(m.take().is_none());
    m.post(1);
    m.post(2);
    assert_eq!(m.take(), Some(2));
    assert_eq!(m.take(), None);

    m.post(3);
    m.clear();
    assert_eq!(m.take(), None);
}

#[test]
fn mailbox_accepts_posts_from_other_threads() {
    let m = Arc::new(Mailbox::new());
    let producer = Arc::clone(&m);
    thread::spawn(move || {
        for i in 0..100 {
            producer.post(HeadInput::Face(FaceSample::new(0.5, 0.5, i as f32)));
        }
    })
    .join()
    .expect("producer thread");
    match m.take() {
        Some(HeadInput::Face(s)) => assert_eq!(s.box_area, 99.0),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn pointer_fallback_only_when_face_pipeline_not_live() {
    assert!(prefers_pointer_fallback(false, TrackingStatus::Ready));
    assert!(prefers_pointer_fallback(true, TrackingStatus::Denied));
    assert!(prefers_pointer_fallback(true, TrackingStatus::Error));
    assert!(prefers_pointer_fallback(true, TrackingStatus::Starting));
    assert!(!prefers_pointer_fallback(true, TrackingStatus::Ready));
}

#[test]
fn pointer_fallback_maps_cursor_with_gains() {
    match pointer_fallback(1.0, 0.0, false) {
        HeadInput::Pointer { nx, ny, reason } => {
            assert!((nx - 0.45).abs() < 1e-6);
            assert!((ny - 0.35).abs() < 1e-6);
            assert_eq!(reason, "Mouse parallax");
        }
        other => panic!("unexpected {other:?}"),
    }
    match pointer_fallback(0.5, 0.5, true) {
        HeadInput::Pointer { nx, ny, reason } => {
            assert_eq!((nx, ny), (0.0, 0.0));
            assert_eq!(reason, "Camera unavailable, mouse fallback");
        }
        other => panic!("unexpected {other:?}"),
    }
}
