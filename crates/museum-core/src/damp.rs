//! Frame-rate independent exponential damping.

use glam::Vec3;

/// Move `value` toward `target` by `value = target + (value - target) * e^(-lambda * dt)`.
#[inline]
pub fn damp(value: f32, target: f32, lambda: f32, dt_sec: f32) -> f32 {
    target + (value - target) * (-lambda * dt_sec).exp()
}

/// Per-axis [`damp`] on a vector.
#[inline]
pub fn damp_vec3(value: Vec3, target: Vec3, lambda: f32, dt_sec: f32) -> Vec3 {
    Vec3::new(
        damp(value.x, target.x, lambda, dt_sec),
        damp(value.y, target.y, lambda, dt_sec),
        damp(value.z, target.z, lambda, dt_sec),
    )
}
