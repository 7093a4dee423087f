//! Off-axis ("window") projection.
//!
//! The head offset shifts the whole frustum window sideways instead of
//! rotating or translating the camera, so the scene behaves like a view
//! through a fixed pane of glass. Matrices are right-handed with a `[0, 1]`
//! clip depth range, matching wgpu.

use glam::{Mat4, Vec4};

use crate::constants::{FOV_Y_DEGREES, Z_FAR, Z_NEAR};
use crate::head::HeadOffset;

/// Vertical field of view and clip planes of the viewing camera.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lens {
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Lens {
    fn default() -> Self {
        Self {
            fov_y_degrees: FOV_Y_DEGREES,
            near: Z_NEAR,
            far: Z_FAR,
        }
    }
}

/// The six edges of a perspective frustum, measured on the near plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frustum {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    pub near: f32,
    pub far: f32,
}

impl Frustum {
    /// Symmetric frustum for the given lens and aspect ratio.
    ///
    /// Degenerate input is replaced by the default lens / a square aspect so
    /// the edges are always finite and non-empty.
    pub fn symmetric(fov_y_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        let defaults = Lens::default();
        let fov = if fov_is_usable(fov_y_degrees) {
            fov_y_degrees
        } else {
            defaults.fov_y_degrees
        };
        let aspect = if aspect_is_usable(aspect) { aspect } else { 1.0 };
        let (near, far) = if clip_is_usable(near, far) {
            (near, far)
        } else {
            (defaults.near, defaults.far)
        };

        let top = near * (fov.to_radians() * 0.5).tan();
        let right = top * aspect;
        Self {
            left: -right,
            right,
            bottom: -top,
            top,
            near,
            far,
        }
    }

    /// Slide all four side edges by `(dx, dy)`.
    pub fn shifted(self, dx: f32, dy: f32) -> Self {
        Self {
            left: self.left + dx,
            right: self.right + dx,
            bottom: self.bottom + dy,
            top: self.top + dy,
            ..self
        }
    }

    /// Perspective matrix built directly from the edges.
    pub fn matrix(&self) -> Mat4 {
        let Frustum {
            left: l,
            right: r,
            bottom: b,
            top: t,
            near: n,
            far: f,
        } = *self;
        let x = 2.0 * n / (r - l);
        let y = 2.0 * n / (t - b);
        let a = (r + l) / (r - l);
        let c = (t + b) / (t - b);
        let d = f / (n - f);
        Mat4::from_cols(
            Vec4::new(x, 0.0, 0.0, 0.0),
            Vec4::new(0.0, y, 0.0, 0.0),
            Vec4::new(a, c, d, -1.0),
            Vec4::new(0.0, 0.0, d * n, 0.0),
        )
    }

    /// Closed-form inverse of [`Frustum::matrix`].
    pub fn inverse_matrix(&self) -> Mat4 {
        let Frustum {
            left: l,
            right: r,
            bottom: b,
            top: t,
            near: n,
            far: f,
        } = *self;
        let two_n = 2.0 * n;
        Mat4::from_cols(
            Vec4::new((r - l) / two_n, 0.0, 0.0, 0.0),
            Vec4::new(0.0, (t - b) / two_n, 0.0, 0.0),
            Vec4::new(0.0, 0.0, 0.0, (n - f) / (f * n)),
            Vec4::new((r + l) / two_n, (t + b) / two_n, -1.0, 1.0 / n),
        )
    }
}

fn fov_is_usable(fov_y_degrees: f32) -> bool {
    fov_y_degrees.is_finite() && fov_y_degrees > 0.0 && fov_y_degrees < 180.0
}

fn aspect_is_usable(aspect: f32) -> bool {
    aspect.is_finite() && aspect > 0.0
}

fn clip_is_usable(near: f32, far: f32) -> bool {
    near.is_finite() && far.is_finite() && near > 0.0 && far > near
}

/// True when [`Frustum::symmetric`] would have to substitute defaults.
pub fn is_degenerate(fov_y_degrees: f32, aspect: f32, near: f32, far: f32) -> bool {
    !(fov_is_usable(fov_y_degrees) && aspect_is_usable(aspect) && clip_is_usable(near, far))
}

/// Projection matrix together with its inverse, as handed to the projection host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    pub frustum: Frustum,
    pub matrix: Mat4,
    pub inverse: Mat4,
}

impl Projection {
    fn from_frustum(frustum: Frustum) -> Self {
        Self {
            frustum,
            matrix: frustum.matrix(),
            inverse: frustum.inverse_matrix(),
        }
    }
}

/// Default symmetric projection, used whenever head tracking is disabled.
pub fn symmetric(fov_y_degrees: f32, aspect: f32, near: f32, far: f32) -> Projection {
    Projection::from_frustum(Frustum::symmetric(fov_y_degrees, aspect, near, far))
}

/// Asymmetric projection for a viewer at normalized offset `(nx, ny)`.
///
/// The offset is clamped to `[-1, 1]` and each edge moves by
/// `nx * strength * right` / `ny * strength * top`. A zero offset returns
/// exactly [`symmetric`], and so does degenerate lens or aspect input.
pub fn solve(
    fov_y_degrees: f32,
    aspect: f32,
    near: f32,
    far: f32,
    nx: f32,
    ny: f32,
    strength: f32,
) -> Projection {
    let base = Frustum::symmetric(fov_y_degrees, aspect, near, far);
    let head = HeadOffset::clamped(nx, ny);
    let strength = if strength.is_finite() { strength } else { 0.0 };
    if head == HeadOffset::ZERO
        || strength == 0.0
        || is_degenerate(fov_y_degrees, aspect, near, far)
    {
        return Projection::from_frustum(base);
    }
    let dx = head.nx * strength * base.right;
    let dy = head.ny * strength * base.top;
    Projection::from_frustum(base.shifted(dx, dy))
}

/// [`solve`] for a [`Lens`].
pub fn solve_for_lens(lens: &Lens, aspect: f32, head: HeadOffset, strength: f32) -> Projection {
    solve(
        lens.fov_y_degrees,
        aspect,
        lens.near,
        lens.far,
        head.nx,
        head.ny,
        strength,
    )
}

/// Viewport aspect ratio. A zero-sized surface reports 0.0, which the solver
/// treats as degenerate and answers with the square symmetric projection.
#[inline]
pub fn aspect_ratio(width: u32, height: u32) -> f32 {
    if width == 0 || height == 0 {
        0.0
    } else {
        width as f32 / height as f32
    }
}
