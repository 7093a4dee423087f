//! Boundary with the face-detection subsystem and the pointer fallback.
//!
//! Detection runs on its own cadence outside the render tick. It talks to the
//! core only through [`Mailbox`] slots: the producer overwrites, the render
//! tick drains once per frame.

use std::fmt;
use std::sync::Mutex;

use glam::Vec2;
use thiserror::Error;

use crate::constants::{POINTER_GAIN_X, POINTER_GAIN_Y};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TrackingStatus {
    #[default]
    Off,
    Starting,
    Ready,
    Denied,
    Error,
}

impl TrackingStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TrackingStatus::Off => "off",
            TrackingStatus::Starting => "starting",
            TrackingStatus::Ready => "ready",
            TrackingStatus::Denied => "denied",
            TrackingStatus::Error => "error",
        }
    }

    /// Parse the status strings used by the detection glue. Unknown strings map to `Error`.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "off" => TrackingStatus::Off,
            "starting" => TrackingStatus::Starting,
            "ready" => TrackingStatus::Ready,
            "denied" => TrackingStatus::Denied,
            _ => TrackingStatus::Error,
        }
    }
}

impl fmt::Display for TrackingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrackingReport {
    pub status: TrackingStatus,
    pub detail: String,
}

impl TrackingReport {
    pub fn new(status: TrackingStatus, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }
}

/// Environment failures of the detection subsystem. Never fatal to the camera rig.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TrackingError {
    #[error("camera permission denied: {0}")]
    PermissionDenied(String),
    #[error("tracking unavailable: {0}")]
    Unavailable(String),
}

impl TrackingError {
    /// Classify a free-text failure from the camera/model stack.
    pub fn classify(message: impl Into<String>) -> Self {
        let message = message.into();
        let lower = message.to_lowercase();
        if lower.contains("permission") || lower.contains("denied") {
            TrackingError::PermissionDenied(message)
        } else {
            TrackingError::Unavailable(message)
        }
    }

    pub fn status(&self) -> TrackingStatus {
        match self {
            TrackingError::PermissionDenied(_) => TrackingStatus::Denied,
            TrackingError::Unavailable(_) => TrackingStatus::Error,
        }
    }

    pub fn report(&self) -> TrackingReport {
        let detail = match self {
            TrackingError::PermissionDenied(_) => "Camera permission denied".to_string(),
            TrackingError::Unavailable(msg) => msg.clone(),
        };
        TrackingReport::new(self.status(), detail)
    }
}

/// Camera + landmark model owned by a frontend.
///
/// `stop` must cancel the recurring detection callback and release the camera.
pub trait DetectionSource {
    fn start(&mut self) -> Result<(), TrackingError>;
    fn stop(&mut self);
}

/// One accepted detection: face-box center in normalized video space plus its area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceSample {
    pub cx: f32,
    pub cy: f32,
    /// Diagnostic only.
    pub box_area: f32,
}

impl FaceSample {
    pub fn new(cx: f32, cy: f32, box_area: f32) -> Self {
        Self { cx, cy, box_area }
    }

    /// Center and area of the landmarks' bounding box. `None` when no landmark is usable.
    pub fn from_landmarks(points: &[Vec2]) -> Option<Self> {
        let mut min = Vec2::splat(1.0);
        let mut max = Vec2::splat(0.0);
        let mut any = false;
        for p in points.iter().filter(|p| p.is_finite()) {
            min = min.min(*p);
            max = max.max(*p);
            any = true;
        }
        if !any {
            return None;
        }
        let center = (min + max) * 0.5;
        let extent = (max - min).max(Vec2::ZERO);
        Some(Self::new(center.x, center.y, extent.x * extent.y))
    }

    /// Same as [`FaceSample::from_landmarks`] for a flat `[x0, y0, x1, y1, ..]` buffer.
    pub fn from_flat_xy(xy: &[f32]) -> Option<Self> {
        let points: Vec<Vec2> = xy
            .chunks_exact(2)
            .map(|c| Vec2::new(c[0], c[1]))
            .collect();
        Self::from_landmarks(&points)
    }
}

/// Latest input for the head processor.
#[derive(Clone, Debug, PartialEq)]
pub enum HeadInput {
    Face(FaceSample),
    Pointer { nx: f32, ny: f32, reason: String },
}

/// Single-slot, last-value-wins handoff between a producer and the render tick.
#[derive(Debug, Default)]
pub struct Mailbox<T> {
    slot: Mutex<Option<T>>,
}

impl<T> Mailbox<T> {
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }

    /// Overwrite whatever is waiting.
    pub fn post(&self, value: T) {
        let mut slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        *slot = Some(value);
    }

    /// Drain the slot.
    pub fn take(&self) -> Option<T> {
        self.slot.lock().unwrap_or_else(|e| e.into_inner()).take()
    }

    pub fn clear(&self) {
        drop(self.take());
    }
}

/// Whether the pointer should drive the parallax instead of the face pipeline.
#[inline]
pub fn prefers_pointer_fallback(tracking_enabled: bool, status: TrackingStatus) -> bool {
    !tracking_enabled || status != TrackingStatus::Ready
}

/// Map a cursor position in screen uv (`0..1`, y down) to a fallback head offset.
pub fn pointer_fallback(u: f32, v: f32, tracking_enabled: bool) -> HeadInput {
    let nx = (u - 0.5) * 2.0;
    let ny = (0.5 - v) * 2.0;
    let reason = if tracking_enabled {
        "Camera unavailable, mouse fallback"
    } else {
        "Mouse parallax"
    };
    HeadInput::Pointer {
        nx: nx * POINTER_GAIN_X,
        ny: ny * POINTER_GAIN_Y,
        reason: reason.to_string(),
    }
}
