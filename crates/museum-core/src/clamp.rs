//! Look-around window for the inspect hand-off.
//!
//! When an item is selected the policy arms a snapshot; the orbiter's live
//! angles are read one frame later (after the controller's first written
//! pose) and turned into a narrow window that only applies once the rig is
//! locked.

use crate::constants::{
    CLAMP_AZIMUTH_MARGIN, CLAMP_DISTANCE_MARGIN, CLAMP_MIN_DISTANCE, CLAMP_POLAR_EDGE,
    CLAMP_POLAR_MARGIN, FALLBACK_SNAPSHOT_DISTANCE, FALLBACK_SNAPSHOT_POLAR, INSPECT_ROTATE_SPEED,
    ORBIT_ROTATE_SPEED,
};
use crate::focus::RigMode;
use crate::orbit::{OrbitAngles, OrbitBounds, OrbitConstraints};
use std::f32::consts::PI;

/// Orbiter reading the inspect window is centered on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClampSnapshot {
    pub azimuth: f32,
    pub polar: f32,
    pub distance: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClampMargins {
    pub distance: f32,
    pub min_distance: f32,
    pub polar: f32,
    pub polar_edge: f32,
    pub azimuth: f32,
}

impl Default for ClampMargins {
    fn default() -> Self {
        Self {
            distance: CLAMP_DISTANCE_MARGIN,
            min_distance: CLAMP_MIN_DISTANCE,
            polar: CLAMP_POLAR_MARGIN,
            polar_edge: CLAMP_POLAR_EDGE,
            azimuth: CLAMP_AZIMUTH_MARGIN,
        }
    }
}

impl ClampMargins {
    /// Pull a raw orbiter reading inside the absolute limits of the window.
    pub fn sanitize(&self, angles: OrbitAngles) -> ClampSnapshot {
        let azimuth = if angles.azimuth.is_finite() {
            angles.azimuth
        } else {
            0.0
        };
        let polar = if angles.polar.is_finite() {
            angles.polar
        } else {
            FALLBACK_SNAPSHOT_POLAR
        }
        .clamp(self.polar_edge, PI - self.polar_edge);
        let distance = if angles.distance.is_finite() {
            angles.distance
        } else {
            FALLBACK_SNAPSHOT_DISTANCE
        }
        .max(self.min_distance);
        ClampSnapshot {
            azimuth,
            polar,
            distance,
        }
    }

    /// Bounds around a snapshot.
    pub fn window(&self, s: &ClampSnapshot) -> OrbitBounds {
        OrbitBounds {
            min_distance: self.min_distance.max(s.distance - self.distance),
            max_distance: s.distance + self.distance,
            min_polar: self.polar_edge.max(s.polar - self.polar),
            max_polar: (PI - self.polar_edge).min(s.polar + self.polar),
            min_azimuth: s.azimuth - self.azimuth,
            max_azimuth: s.azimuth + self.azimuth,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
enum SnapshotState {
    #[default]
    Idle,
    /// Armed on selection, waiting for the first written pose.
    Armed,
    /// First pose written; read the orbiter at the start of the next frame.
    Due,
    Captured(ClampSnapshot),
}

#[derive(Clone, Debug, Default)]
pub struct OrbitClampPolicy {
    margins: ClampMargins,
    state: SnapshotState,
}

impl OrbitClampPolicy {
    pub fn new(margins: ClampMargins) -> Self {
        Self {
            margins,
            state: SnapshotState::Idle,
        }
    }

    /// Forget any previous window and arm a fresh deferred snapshot.
    pub fn arm(&mut self) {
        self.state = SnapshotState::Armed;
    }

    pub fn discard(&mut self) {
        self.state = SnapshotState::Idle;
    }

    /// Called after the controller wrote a pose this frame.
    pub fn pose_written(&mut self) {
        if self.state == SnapshotState::Armed {
            self.state = SnapshotState::Due;
        }
    }

    pub fn is_due(&self) -> bool {
        self.state == SnapshotState::Due
    }

    /// Take the snapshot if one is due. At most once per arm.
    pub fn capture(&mut self, angles: OrbitAngles) -> Option<ClampSnapshot> {
        if self.state != SnapshotState::Due {
            return None;
        }
        let snapshot = self.margins.sanitize(angles);
        self.state = SnapshotState::Captured(snapshot);
        log::debug!(
            "[clamp] snapshot az={:.3} pol={:.3} dist={:.3}",
            snapshot.azimuth,
            snapshot.polar,
            snapshot.distance
        );
        Some(snapshot)
    }

    pub fn snapshot(&self) -> Option<ClampSnapshot> {
        match self.state {
            SnapshotState::Captured(s) => Some(s),
            _ => None,
        }
    }

    /// Inspect window, or the free bounds when no snapshot is live.
    pub fn bounds(&self, mode: RigMode, locked: bool) -> OrbitBounds {
        match (mode, locked) {
            (RigMode::Inspecting, true) => {
                let snapshot = self.snapshot().unwrap_or(ClampSnapshot {
                    azimuth: 0.0,
                    polar: FALLBACK_SNAPSHOT_POLAR,
                    distance: FALLBACK_SNAPSHOT_DISTANCE,
                });
                self.margins.window(&snapshot)
            }
            _ => OrbitBounds::FREE,
        }
    }

    /// Orbiter permissions for the current rig state.
    pub fn constraints(&self, mode: RigMode, locked: bool) -> OrbitConstraints {
        match mode {
            // the orbiter must not fight the programmatic glide
            RigMode::EnteringInspect => OrbitConstraints {
                enabled: false,
                rotate_speed: INSPECT_ROTATE_SPEED,
                zoom: false,
                bounds: OrbitBounds::FREE,
            },
            RigMode::Inspecting => OrbitConstraints {
                enabled: locked,
                rotate_speed: INSPECT_ROTATE_SPEED,
                zoom: false,
                bounds: self.bounds(mode, locked),
            },
            RigMode::Orbit | RigMode::Exiting => OrbitConstraints {
                enabled: true,
                rotate_speed: ORBIT_ROTATE_SPEED,
                zoom: true,
                bounds: OrbitBounds::FREE,
            },
        }
    }
}
