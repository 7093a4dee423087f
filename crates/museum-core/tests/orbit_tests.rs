use std::f32::consts::{FRAC_PI_2, PI};
use std::time::Duration;

use glam::Vec3;
use museum_core::{
    damp, CameraPose, ClampMargins, ClampSnapshot, OrbitAngles, OrbitBounds, OrbitClampPolicy,
    OrbitConstraints, OrbitControls, OrbitRig, RigMode, TransitionScheduler,
};

fn pose_at(offset: Vec3) -> CameraPose {
    CameraPose::new(offset, Vec3::ZERO)
}

#[test]
fn angles_follow_orbit_convention() {
    let a = OrbitAngles::from_pose(&pose_at(Vec3::new(0.0, 0.0, 4.0)));
    assert_eq!(a.azimuth, 0.0);
    assert!((a.polar - FRAC_PI_2).abs() < 1e-6);
    assert_eq!(a.distance, 4.0);

    let a = OrbitAngles::from_pose(&pose_at(Vec3::new(2.0, 0.0, 0.0)));
    assert!((a.azimuth - FRAC_PI_2).abs() < 1e-6);

    let a = OrbitAngles::from_pose(&pose_at(Vec3::new(0.0, 3.0, 0.0)));
    assert!(a.polar.abs() < 1e-6);

    let offset = Vec3::new(1.0, 2.0, -3.0);
    let back = OrbitAngles::from_pose(&pose_at(offset)).offset();
    assert!(back.abs_diff_eq(offset, 1e-5));
}

#[test]
fn drag_right_turns_azimuth_negative() {
    let mut orbit = OrbitControls::new(pose_at(Vec3::new(0.0, 0.0, 5.0)));
    orbit.rotate_by_pixels(100.0, 0.0, 1000.0);
    assert!(orbit.update());
    let a = orbit.orbit_angles();
    // 2π * 0.1 * 0.55, applied at damping factor 0.1
    assert!((a.azimuth + 0.034_557).abs() < 1e-4, "azimuth = {}", a.azimuth);
    assert!((a.distance - 5.0).abs() < 1e-4);
}

#[test]
fn momentum_decays_to_idle() {
    let mut orbit = OrbitControls::new(pose_at(Vec3::new(0.0, 0.0, 5.0)));
    orbit.begin_drag();
    orbit.rotate_by_pixels(50.0, 0.0, 800.0);
    assert!(!orbit.is_idle());
    orbit.end_drag();
    for _ in 0..200 {
        orbit.update();
    }
    assert!(orbit.is_idle());
}

#[test]
fn bounds_never_pull_camera_back() {
    // distance 2 is below the free minimum of 3.6
    let mut orbit = OrbitControls::new(pose_at(Vec3::new(0.0, 0.0, 2.0)));
    assert!(!orbit.update());
    assert_eq!(orbit.pose().position, Vec3::new(0.0, 0.0, 2.0));

    orbit.dolly(0.5);
    orbit.update();
    assert!((orbit.orbit_angles().distance - 2.0).abs() < 1e-5);

    orbit.dolly(2.0);
    orbit.update();
    assert!((orbit.orbit_angles().distance - 4.0).abs() < 1e-4);

    orbit.dolly(10.0);
    orbit.update();
    assert!((orbit.orbit_angles().distance - 9.5).abs() < 1e-4);
}

#[test]
fn disabled_orbiter_ignores_gestures_and_drops_momentum() {
    let mut orbit = OrbitControls::new(pose_at(Vec3::new(0.0, 0.0, 5.0)));
    orbit.rotate_by_pixels(200.0, 0.0, 800.0);

    let off = OrbitConstraints {
        enabled: false,
        ..OrbitConstraints::default()
    };
    orbit.apply_constraints(&off);
    assert!(!orbit.update());
    orbit.rotate_by_pixels(200.0, 0.0, 800.0);
    orbit.dolly(0.5);

    orbit.apply_constraints(&OrbitConstraints::default());
    assert!(!orbit.update());
    assert!(orbit.is_idle());
}

#[test]
fn zoom_flag_blocks_dolly() {
    let mut orbit = OrbitControls::new(pose_at(Vec3::new(0.0, 0.0, 5.0)));
    orbit.apply_constraints(&OrbitConstraints {
        zoom: false,
        ..OrbitConstraints::default()
    });
    orbit.dolly(1.5);
    assert!(!orbit.update());
}

#[test]
fn sanitize_pulls_snapshot_inside_absolute_limits() {
    let m = ClampMargins::default();
    let s = m.sanitize(OrbitAngles {
        azimuth: f32::NAN,
        polar: 0.05,
        distance: 0.2,
    });
    assert_eq!(s.azimuth, 0.0);
    assert!((s.polar - 0.15).abs() < 1e-6);
    assert!((s.distance - 0.9).abs() < 1e-6);

    let s = m.sanitize(OrbitAngles {
        azimuth: 0.4,
        polar: PI,
        distance: f32::INFINITY,
    });
    assert!((s.polar - (PI - 0.15)).abs() < 1e-6);
    assert!((s.distance - 1.55).abs() < 1e-6);
}

#[test]
fn window_brackets_snapshot() {
    let m = ClampMargins::default();
    let snap = ClampSnapshot {
        azimuth: 0.0,
        polar: 1.5,
        distance: 1.0,
    };
    let w = m.window(&snap);
    assert!((w.min_distance - 0.9).abs() < 1e-6);
    assert!((w.max_distance - 1.12).abs() < 1e-6);
    assert!((w.min_polar - 1.4).abs() < 1e-6);
    assert!((w.max_polar - 1.6).abs() < 1e-6);
    assert!((w.min_azimuth + 0.18).abs() < 1e-6);
    assert!((w.max_azimuth - 0.18).abs() < 1e-6);
    assert!(w.contains(&OrbitAngles {
        azimuth: snap.azimuth,
        polar: snap.polar,
        distance: snap.distance,
    }));
}

#[test]
fn window_holds_any_orbiter_reading_within_absolute_limits() {
    let m = ClampMargins::default();
    let azimuths = [-PI, 0.0, 3.0, 1.0e6, f32::NAN, f32::INFINITY, f32::NEG_INFINITY];
    let polars = [
        -1.0,
        0.0,
        0.15,
        0.2,
        1.5,
        PI - 0.15,
        PI,
        10.0,
        f32::NAN,
        f32::INFINITY,
        f32::NEG_INFINITY,
    ];
    let distances = [-5.0, 0.0, 0.5, 0.9, 0.95, 1.55, 12.0, 1.0e6, f32::NAN, f32::INFINITY];

    for &azimuth in &azimuths {
        for &polar in &polars {
            for &distance in &distances {
                let reading = OrbitAngles {
                    azimuth,
                    polar,
                    distance,
                };
                let s = m.sanitize(reading);
                let w = m.window(&s);
                let snap = OrbitAngles {
                    azimuth: s.azimuth,
                    polar: s.polar,
                    distance: s.distance,
                };
                assert!(w.contains(&snap), "{reading:?} -> {s:?} outside {w:?}");
                assert!(w.min_distance >= 0.9, "{reading:?} -> {w:?}");
                assert!(w.min_polar >= 0.15, "{reading:?} -> {w:?}");
                assert!(w.max_polar <= PI - 0.15, "{reading:?} -> {w:?}");
                assert!(w.min_distance <= w.max_distance);
                assert!(w.min_polar <= w.max_polar);
                assert!(w.min_azimuth <= w.max_azimuth);
                assert!(w.max_distance.is_finite() && w.max_azimuth.is_finite());
            }
        }
    }
}

#[test]
fn snapshot_is_deferred_and_taken_once() {
    let mut p = OrbitClampPolicy::new(ClampMargins::default());
    let angles = OrbitAngles {
        azimuth: 0.1,
        polar: 1.5,
        distance: 2.0,
    };
    assert!(p.capture(angles).is_none());

    p.arm();
    assert!(!p.is_due());
    assert!(p.capture(angles).is_none());

    p.pose_written();
    assert!(p.is_due());
    let s = p.capture(angles).expect("snapshot");
    assert_eq!(s.distance, 2.0);
    assert!(p.capture(angles).is_none());
    assert_eq!(p.snapshot(), Some(s));

    p.discard();
    assert!(p.snapshot().is_none());
}

#[test]
fn constraints_follow_rig_mode() {
    let p = OrbitClampPolicy::new(ClampMargins::default());

    let k = p.constraints(RigMode::EnteringInspect, false);
    assert!(!k.enabled);

    let k = p.constraints(RigMode::Inspecting, false);
    assert!(!k.enabled);

    let k = p.constraints(RigMode::Inspecting, true);
    assert!(k.enabled && !k.zoom);
    assert!((k.rotate_speed - 0.18).abs() < 1e-6);
    // no snapshot yet: fallback window
    assert!((k.bounds.max_distance - (1.55 + 0.12)).abs() < 1e-6);

    for mode in [RigMode::Orbit, RigMode::Exiting] {
        let k = p.constraints(mode, false);
        assert!(k.enabled && k.zoom);
        assert!((k.rotate_speed - 0.55).abs() < 1e-6);
        assert_eq!(k.bounds, OrbitBounds::FREE);
    }
}

#[test]
fn transition_counts_down_in_tick_time() {
    let mut t = TransitionScheduler::new(Duration::from_millis(900));
    assert!(!t.is_active());
    assert_eq!(t.boost(), 0.0);

    t.start();
    assert_eq!(t.boost(), 1.0);
    assert!(!t.advance(Duration::from_millis(450)));
    assert!((t.boost() - 0.5).abs() < 1e-6);
    assert!(t.advance(Duration::from_millis(500)));
    assert!(!t.is_active());
    assert!(!t.advance(Duration::from_millis(16)));

    t.start();
    t.cancel();
    assert_eq!(t.boost(), 0.0);
}

#[test]
fn damping_is_frame_rate_independent() {
    let one = damp(0.0, 1.0, 6.2, 0.032);
    let two = damp(damp(0.0, 1.0, 6.2, 0.016), 1.0, 6.2, 0.016);
    assert!((one - two).abs() < 1e-6);
    assert_eq!(damp(3.0, 1.0, 6.2, 0.0), 3.0);
}
