use glam::Mat4;
use museum_core::projection::{is_degenerate, symmetric};
use museum_core::{aspect_ratio, solve, solve_for_lens, HeadOffset, Lens};

#[test]
fn zero_offset_is_bit_identical_to_symmetric() {
    let base = symmetric(45.0, 16.0 / 9.0, 0.1, 200.0);
    for strength in [0.0, 0.12, 0.32, 0.55, 3.0] {
        let p = solve(45.0, 16.0 / 9.0, 0.1, 200.0, 0.0, 0.0, strength);
        assert_eq!(p, base);
        assert_eq!(p.matrix.to_cols_array(), base.matrix.to_cols_array());
    }
}

#[test]
fn symmetric_matches_standard_perspective() {
    let p = symmetric(45.0, 1.5, 0.1, 200.0);
    let reference = Mat4::perspective_rh(45f32.to_radians(), 1.5, 0.1, 200.0);
    assert!(p.matrix.abs_diff_eq(reference, 1e-5));
}

#[test]
fn offset_shifts_edges_without_resizing_window() {
    let base = symmetric(45.0, 1.5, 0.1, 200.0).frustum;
    let p = solve(45.0, 1.5, 0.1, 200.0, 1.0, -0.5, 0.5);
    let f = p.frustum;

    let dx = 0.5 * base.right;
    let dy = -0.25 * base.top;
    assert!((f.left - (base.left + dx)).abs() < 1e-7);
    assert!((f.right - (base.right + dx)).abs() < 1e-7);
    assert!((f.bottom - (base.bottom + dy)).abs() < 1e-7);
    assert!((f.top - (base.top + dy)).abs() < 1e-7);
    assert!(((f.right - f.left) - (base.right - base.left)).abs() < 1e-6);
    assert_eq!(f.near, base.near);
    assert_eq!(f.far, base.far);
}

#[test]
fn off_axis_matrix_has_skew_terms() {
    let p = solve(45.0, 1.0, 0.1, 200.0, 0.5, 0.5, 0.32);
    let c2 = p.matrix.z_axis;
    assert!(c2.x > 0.0);
    assert!(c2.y > 0.0);
    assert_eq!(c2.w, -1.0);
}

#[test]
fn inverse_is_exact_inverse() {
    let p = solve(45.0, 1.7, 0.1, 200.0, -0.4, 0.7, 0.45);
    assert!((p.matrix * p.inverse).abs_diff_eq(Mat4::IDENTITY, 1e-4));
    assert!(p.inverse.abs_diff_eq(p.matrix.inverse(), 1e-2));
}

#[test]
fn offsets_are_clamped_to_unit_range() {
    let a = solve(45.0, 1.0, 0.1, 200.0, 5.0, -9.0, 0.32);
    let b = solve(45.0, 1.0, 0.1, 200.0, 1.0, -1.0, 0.32);
    assert_eq!(a, b);
}

#[test]
fn zero_strength_is_symmetric() {
    let p = solve(45.0, 1.0, 0.1, 200.0, 0.8, -0.3, 0.0);
    assert_eq!(p, symmetric(45.0, 1.0, 0.1, 200.0));
}

#[test]
fn degenerate_input_stays_finite() {
    let p = solve(f32::NAN, 0.0, -1.0, 0.0, f32::NAN, 0.2, f32::INFINITY);
    assert!(p.matrix.is_finite());
    assert!(p.inverse.is_finite());
    assert_eq!(aspect_ratio(1600, 800), 2.0);
}

#[test]
fn degenerate_geometry_drops_head_shift() {
    let square = symmetric(45.0, 1.0, 0.1, 200.0);
    for aspect in [0.0, -1.5, f32::NAN, f32::INFINITY] {
        let p = solve(45.0, aspect, 0.1, 200.0, 0.5, 0.5, 0.32);
        assert_eq!(p, symmetric(45.0, aspect, 0.1, 200.0));
        assert_eq!(p, square);
        assert_eq!(p.matrix.z_axis.x, 0.0);
        assert_eq!(p.matrix.z_axis.y, 0.0);
    }

    // zero-area surfaces come through aspect_ratio
    for (w, h) in [(0, 720), (1280, 0), (0, 0)] {
        let p = solve(45.0, aspect_ratio(w, h), 0.1, 200.0, -0.7, 0.4, 0.55);
        assert_eq!(p, square);
    }

    // bad lens or clip planes fall back to the default lens, unshifted
    let lens = Lens::default();
    let fallback = symmetric(lens.fov_y_degrees, 1.5, lens.near, lens.far);
    assert_eq!(solve(0.0, 1.5, 0.1, 200.0, 0.5, 0.5, 0.32), fallback);
    assert_eq!(solve(45.0, 1.5, 5.0, 1.0, 0.5, 0.5, 0.32), fallback);
    assert!(is_degenerate(45.0, 0.0, 0.1, 200.0));
    assert!(!is_degenerate(45.0, 1.5, 0.1, 200.0));
}

#[test]
fn lens_helper_matches_solve() {
    let lens = Lens::default();
    let head = HeadOffset { nx: 0.3, ny: -0.2 };
    let a = solve_for_lens(&lens, 1.25, head, 0.32);
    let b = solve(lens.fov_y_degrees, 1.25, lens.near, lens.far, 0.3, -0.2, 0.32);
    assert_eq!(a, b);
}
