//! User-drivable orbiter and the rig interface the focus controller writes to.
//!
//! The controller never touches a renderer camera directly; it talks to an
//! [`OrbitRig`]. [`OrbitControls`] is the implementation both frontends use.

use std::f32::consts::{PI, TAU};

use glam::Vec3;

use crate::constants::{
    FREE_MAX_DISTANCE, FREE_MAX_POLAR, FREE_MIN_DISTANCE, FREE_MIN_POLAR, ORBIT_DAMPING_FACTOR,
    ORBIT_ROTATE_SPEED,
};

/// Camera body position and look-at point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub target: Vec3,
}

impl CameraPose {
    pub fn new(position: Vec3, target: Vec3) -> Self {
        Self { position, target }
    }
}

/// Spherical coordinates of the camera around its target.
///
/// `azimuth = atan2(x, z)` of the target-to-camera offset, `polar` is measured
/// from +Y.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitAngles {
    pub azimuth: f32,
    pub polar: f32,
    pub distance: f32,
}

impl OrbitAngles {
    pub fn from_pose(pose: &CameraPose) -> Self {
        let offset = pose.position - pose.target;
        let distance = offset.length();
        if distance <= f32::EPSILON {
            return Self {
                azimuth: 0.0,
                polar: PI * 0.5,
                distance: 0.0,
            };
        }
        Self {
            azimuth: offset.x.atan2(offset.z),
            polar: (offset.y / distance).clamp(-1.0, 1.0).acos(),
            distance,
        }
    }

    /// Offset from the target for these angles.
    pub fn offset(&self) -> Vec3 {
        let (sin_p, cos_p) = self.polar.sin_cos();
        let (sin_a, cos_a) = self.azimuth.sin_cos();
        Vec3::new(sin_p * sin_a, cos_p, sin_p * cos_a) * self.distance
    }
}

/// Inclusive ranges for the orbiter. Infinite azimuth bounds mean unbounded.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitBounds {
    pub min_distance: f32,
    pub max_distance: f32,
    pub min_polar: f32,
    pub max_polar: f32,
    pub min_azimuth: f32,
    pub max_azimuth: f32,
}

impl OrbitBounds {
    /// Free-orbit bounds used outside inspect.
    pub const FREE: Self = Self {
        min_distance: FREE_MIN_DISTANCE,
        max_distance: FREE_MAX_DISTANCE,
        min_polar: FREE_MIN_POLAR,
        max_polar: FREE_MAX_POLAR,
        min_azimuth: f32::NEG_INFINITY,
        max_azimuth: f32::INFINITY,
    };

    pub fn contains(&self, angles: &OrbitAngles) -> bool {
        (self.min_distance..=self.max_distance).contains(&angles.distance)
            && (self.min_polar..=self.max_polar).contains(&angles.polar)
            && (self.min_azimuth..=self.max_azimuth).contains(&angles.azimuth)
    }
}

impl Default for OrbitBounds {
    fn default() -> Self {
        Self::FREE
    }
}

/// What the orbiter is allowed to do this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitConstraints {
    pub enabled: bool,
    pub rotate_speed: f32,
    pub zoom: bool,
    pub bounds: OrbitBounds,
}

impl Default for OrbitConstraints {
    fn default() -> Self {
        Self {
            enabled: true,
            rotate_speed: ORBIT_ROTATE_SPEED,
            zoom: true,
            bounds: OrbitBounds::FREE,
        }
    }
}

/// Opaque handle to the renderer-side camera + orbiter.
pub trait OrbitRig {
    fn pose(&self) -> CameraPose;
    fn set_pose(&mut self, pose: CameraPose);
    fn set_target(&mut self, target: Vec3);
    fn orbit_angles(&self) -> OrbitAngles;
    /// True when no user gesture or leftover damping is moving the camera.
    fn is_idle(&self) -> bool;
    fn apply_constraints(&mut self, constraints: &OrbitConstraints);
}

/// Damped spherical orbiter around a target point.
///
/// Bounds restrict user-driven motion: a step may not carry the camera further
/// outside a bound than it already is, but a bound never pulls it back.
#[derive(Clone, Debug)]
pub struct OrbitControls {
    position: Vec3,
    target: Vec3,
    constraints: OrbitConstraints,
    damping_factor: f32,
    delta_azimuth: f32,
    delta_polar: f32,
    scale: f32,
    dragging: bool,
}

const IDLE_EPSILON: f32 = 1e-5;

impl OrbitControls {
    pub fn new(pose: CameraPose) -> Self {
        Self {
            position: pose.position,
            target: pose.target,
            constraints: OrbitConstraints::default(),
            damping_factor: ORBIT_DAMPING_FACTOR,
            delta_azimuth: 0.0,
            delta_polar: 0.0,
            scale: 1.0,
            dragging: false,
        }
    }

    pub fn constraints(&self) -> &OrbitConstraints {
        &self.constraints
    }

    pub fn begin_drag(&mut self) {
        self.dragging = true;
    }

    pub fn end_drag(&mut self) {
        self.dragging = false;
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Rotate by a pointer movement of `(dx, dy)` pixels on a viewport `height` pixels tall.
    pub fn rotate_by_pixels(&mut self, dx: f32, dy: f32, height: f32) {
        if !self.constraints.enabled || height <= 0.0 {
            return;
        }
        let speed = self.constraints.rotate_speed;
        self.delta_azimuth -= TAU * dx / height * speed;
        self.delta_polar -= TAU * dy / height * speed;
    }

    /// Multiply the distance by `factor` on the next update (`< 1` moves closer).
    pub fn dolly(&mut self, factor: f32) {
        if !self.constraints.enabled || !self.constraints.zoom || !factor.is_finite() {
            return;
        }
        if factor > 0.0 {
            self.scale *= factor;
        }
    }

    /// Apply pending user motion. Returns true if the camera moved.
    pub fn update(&mut self) -> bool {
        if !self.constraints.enabled {
            return false;
        }
        let bounds = self.constraints.bounds;
        let current = OrbitAngles::from_pose(&CameraPose::new(self.position, self.target));
        if current.distance <= f32::EPSILON {
            return false;
        }

        let mut azimuth = current.azimuth;
        if bounds.min_azimuth.is_finite() && bounds.max_azimuth.is_finite() {
            azimuth = unwrap_near(azimuth, (bounds.min_azimuth + bounds.max_azimuth) * 0.5);
        }
        let next_azimuth = limit(
            azimuth,
            azimuth + self.delta_azimuth * self.damping_factor,
            bounds.min_azimuth,
            bounds.max_azimuth,
        );
        let next_polar = limit(
            current.polar,
            current.polar + self.delta_polar * self.damping_factor,
            bounds.min_polar,
            bounds.max_polar,
        )
        .clamp(1e-6, PI - 1e-6);
        let next_distance = limit(
            current.distance,
            current.distance * self.scale,
            bounds.min_distance,
            bounds.max_distance,
        );

        self.delta_azimuth *= 1.0 - self.damping_factor;
        self.delta_polar *= 1.0 - self.damping_factor;
        self.scale = 1.0;

        let moved = (next_azimuth - azimuth).abs() > f32::EPSILON
            || (next_polar - current.polar).abs() > f32::EPSILON
            || (next_distance - current.distance).abs() > f32::EPSILON;
        if moved {
            let angles = OrbitAngles {
                azimuth: next_azimuth,
                polar: next_polar,
                distance: next_distance,
            };
            self.position = self.target + angles.offset();
        }
        moved
    }
}

/// Clamp `proposed` into `[min, max]` widened to include `current`.
#[inline]
fn limit(current: f32, proposed: f32, min: f32, max: f32) -> f32 {
    let lo = min.min(current);
    let hi = max.max(current);
    proposed.max(lo).min(hi)
}

/// Shift `angle` by whole turns so it lies within half a turn of `center`.
#[inline]
fn unwrap_near(angle: f32, center: f32) -> f32 {
    let mut a = angle;
    while a - center > PI {
        a -= TAU;
    }
    while a - center < -PI {
        a += TAU;
    }
    a
}

impl OrbitRig for OrbitControls {
    fn pose(&self) -> CameraPose {
        CameraPose::new(self.position, self.target)
    }

    fn set_pose(&mut self, pose: CameraPose) {
        self.position = pose.position;
        self.target = pose.target;
    }

    fn set_target(&mut self, target: Vec3) {
        self.target = target;
    }

    fn orbit_angles(&self) -> OrbitAngles {
        OrbitAngles::from_pose(&self.pose())
    }

    fn is_idle(&self) -> bool {
        !self.dragging
            && self.delta_azimuth.abs() < IDLE_EPSILON
            && self.delta_polar.abs() < IDLE_EPSILON
            && (self.scale - 1.0).abs() < IDLE_EPSILON
    }

    fn apply_constraints(&mut self, constraints: &OrbitConstraints) {
        if !constraints.enabled && self.constraints.enabled {
            // leftover momentum must not replay when control comes back
            self.delta_azimuth = 0.0;
            self.delta_polar = 0.0;
            self.scale = 1.0;
            self.dragging = false;
        }
        self.constraints = *constraints;
    }
}
