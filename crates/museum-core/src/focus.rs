//! Camera focus state machine.
//!
//! ```text
//!   Orbit ──select──▶ EnteringInspect ──errors < ε──▶ Inspecting
//!     ▲                    │                              │
//!     └──boost spent── Exiting ◀──────deselect────────────┘
//! ```
//!
//! Outside `Inspecting` the controller damps the camera body and its look-at
//! point toward the desired pose every frame and writes both to the rig. Once
//! locked it stops writing and lets the user orbit inside the clamp window.

use std::time::Duration;

use glam::Vec3;

use crate::clamp::{ClampMargins, ClampSnapshot, OrbitClampPolicy};
use crate::constants::{
    EXIT_BOOST_DURATION, EXIT_POSITION_BOOST, EXIT_TARGET_BOOST, INSPECT_EYE_LIFT,
    INSPECT_TARGET_LIFT, LOCK_EPSILON, POSITION_LAMBDA, STANDOFF_BASE, STANDOFF_PER_EXTENT,
    TARGET_LAMBDA,
};
use crate::damp::damp_vec3;
use crate::gallery::{clamp_focus_index, FocusPreset, InspectPose};
use crate::orbit::{CameraPose, OrbitRig};
use crate::transition::TransitionScheduler;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RigMode {
    #[default]
    Orbit,
    EnteringInspect,
    Inspecting,
    Exiting,
}

impl RigMode {
    pub fn as_str(self) -> &'static str {
        match self {
            RigMode::Orbit => "orbit",
            RigMode::EnteringInspect => "entering-inspect",
            RigMode::Inspecting => "inspecting",
            RigMode::Exiting => "exiting",
        }
    }
}

/// Rates, thresholds and inspect geometry of the focus rig.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FocusTuning {
    pub position_lambda: f32,
    pub target_lambda: f32,
    pub exit_position_boost: f32,
    pub exit_target_boost: f32,
    pub lock_epsilon: f32,
    pub standoff_base: f32,
    pub standoff_per_extent: f32,
    pub eye_lift: f32,
    pub target_lift: f32,
    pub exit_boost_duration: Duration,
}

impl Default for FocusTuning {
    fn default() -> Self {
        Self {
            position_lambda: POSITION_LAMBDA,
            target_lambda: TARGET_LAMBDA,
            exit_position_boost: EXIT_POSITION_BOOST,
            exit_target_boost: EXIT_TARGET_BOOST,
            lock_epsilon: LOCK_EPSILON,
            standoff_base: STANDOFF_BASE,
            standoff_per_extent: STANDOFF_PER_EXTENT,
            eye_lift: INSPECT_EYE_LIFT,
            target_lift: INSPECT_TARGET_LIFT,
            exit_boost_duration: EXIT_BOOST_DURATION,
        }
    }
}

impl FocusTuning {
    /// Viewing distance in front of an item.
    pub fn standoff(&self, pose: &InspectPose) -> f32 {
        self.standoff_base + self.standoff_per_extent * pose.size.w.max(pose.size.h)
    }

    /// Where the camera should end up to inspect `pose`.
    pub fn inspect_pose(&self, pose: &InspectPose) -> CameraPose {
        let up = Vec3::Y;
        let forward = pose.forward();
        let d = self.standoff(pose);
        CameraPose::new(
            pose.anchor + forward * d + up * self.eye_lift,
            pose.anchor + up * self.target_lift,
        )
    }
}

/// The controller's own view of the camera. Read-only outside the controller.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraRigState {
    pub position: Vec3,
    pub look_target: Vec3,
    pub mode: RigMode,
    pub locked: bool,
    pub boost: f32,
}

pub struct CameraFocusController {
    presets: Vec<FocusPreset>,
    focus_index: usize,
    selection: Option<InspectPose>,
    state: CameraRigState,
    tuning: FocusTuning,
    clamp: OrbitClampPolicy,
    transition: TransitionScheduler,
}

impl CameraFocusController {
    pub fn new(presets: Vec<FocusPreset>, focus_index: usize, initial: CameraPose) -> Self {
        Self::with_tuning(
            presets,
            focus_index,
            initial,
            FocusTuning::default(),
            ClampMargins::default(),
        )
    }

    pub fn with_tuning(
        presets: Vec<FocusPreset>,
        focus_index: usize,
        initial: CameraPose,
        tuning: FocusTuning,
        margins: ClampMargins,
    ) -> Self {
        let focus_index = clamp_focus_index(focus_index as isize, presets.len());
        Self {
            presets,
            focus_index,
            selection: None,
            state: CameraRigState {
                position: initial.position,
                look_target: initial.target,
                mode: RigMode::Orbit,
                locked: false,
                boost: 0.0,
            },
            tuning,
            clamp: OrbitClampPolicy::new(margins),
            transition: TransitionScheduler::new(tuning.exit_boost_duration),
        }
    }

    pub fn state(&self) -> &CameraRigState {
        &self.state
    }

    pub fn mode(&self) -> RigMode {
        self.state.mode
    }

    pub fn is_locked(&self) -> bool {
        self.state.locked
    }

    pub fn boost(&self) -> f32 {
        self.state.boost
    }

    pub fn tuning(&self) -> &FocusTuning {
        &self.tuning
    }

    pub fn selection(&self) -> Option<&InspectPose> {
        self.selection.as_ref()
    }

    pub fn clamp_snapshot(&self) -> Option<ClampSnapshot> {
        self.clamp.snapshot()
    }

    pub fn clamp_policy(&self) -> &OrbitClampPolicy {
        &self.clamp
    }

    pub fn focus_index(&self) -> usize {
        self.focus_index
    }

    pub fn preset_count(&self) -> usize {
        self.presets.len()
    }

    /// Change the orbit preset. Out-of-range requests are clamped. Returns the index in use.
    pub fn set_focus_index(&mut self, index: isize) -> usize {
        let next = clamp_focus_index(index, self.presets.len());
        if next != self.focus_index {
            log::info!("[focus] preset {} -> {}", self.focus_index, next);
            self.focus_index = next;
        }
        self.focus_index
    }

    pub fn preset(&self) -> Option<&FocusPreset> {
        self.presets.get(self.focus_index)
    }

    /// Select an item to inspect, or `None` to leave inspect.
    ///
    /// A different item (or any item while orbiting) restarts the glide from
    /// scratch. Selecting the item already being inspected is a no-op.
    pub fn select(&mut self, pose: Option<InspectPose>) {
        match pose {
            Some(pose) => {
                let inspecting = matches!(
                    self.state.mode,
                    RigMode::EnteringInspect | RigMode::Inspecting
                );
                if inspecting && self.selection == Some(pose) {
                    return;
                }
                self.selection = Some(pose);
                self.state.mode = RigMode::EnteringInspect;
                self.state.locked = false;
                self.clamp.arm();
                self.transition.cancel();
                self.state.boost = 0.0;
                log::info!(
                    "[focus] entering inspect at ({:.2},{:.2},{:.2})",
                    pose.anchor.x,
                    pose.anchor.y,
                    pose.anchor.z
                );
            }
            None => {
                if self.selection.take().is_none() {
                    return;
                }
                self.state.mode = RigMode::Exiting;
                self.state.locked = false;
                self.clamp.discard();
                self.transition.start();
                self.state.boost = self.transition.boost();
                log::info!("[focus] exiting inspect");
            }
        }
    }

    /// Pose the controller is gliding toward in the current mode.
    pub fn desired_pose(&self) -> Option<CameraPose> {
        match (self.state.mode, self.selection.as_ref()) {
            (RigMode::EnteringInspect | RigMode::Inspecting, Some(pose)) => {
                Some(self.tuning.inspect_pose(pose))
            }
            _ => self
                .preset()
                .map(|p| CameraPose::new(p.position, p.target)),
        }
    }

    /// `(position, target)` damping rates for the current mode.
    pub fn damping_rates(&self) -> (f32, f32) {
        let t = &self.tuning;
        match self.state.mode {
            RigMode::Exiting => (
                t.position_lambda + self.state.boost * t.exit_position_boost,
                t.target_lambda + self.state.boost * t.exit_target_boost,
            ),
            _ => (t.position_lambda, t.target_lambda),
        }
    }

    /// Advance one render tick.
    pub fn update<R: OrbitRig + ?Sized>(&mut self, dt: Duration, rig: &mut R) {
        if self.state.mode == RigMode::Exiting {
            self.transition.advance(dt);
            if !self.transition.is_active() {
                self.state.mode = RigMode::Orbit;
                log::info!("[focus] back to orbit preset {}", self.focus_index);
            }
        }
        self.state.boost = self.transition.boost();

        if self.clamp.is_due() {
            self.clamp.capture(rig.orbit_angles());
        }
        rig.apply_constraints(&self.clamp.constraints(self.state.mode, self.state.locked));

        // the camera body may have been moved by the user through the orbiter
        self.state.position = rig.pose().position;

        if self.state.mode == RigMode::Inspecting && self.state.locked {
            if rig.is_idle() {
                rig.set_target(self.state.look_target);
            }
            return;
        }

        let Some(desired) = self.desired_pose() else {
            return;
        };
        let dt_sec = dt.as_secs_f32();
        let (pos_lambda, tgt_lambda) = self.damping_rates();
        self.state.position = damp_vec3(self.state.position, desired.position, pos_lambda, dt_sec);
        self.state.look_target =
            damp_vec3(self.state.look_target, desired.target, tgt_lambda, dt_sec);
        rig.set_pose(CameraPose::new(self.state.position, self.state.look_target));
        self.clamp.pose_written();

        if self.state.mode == RigMode::EnteringInspect {
            let eps = self.tuning.lock_epsilon;
            let pos_err = self.state.position.distance(desired.position);
            let tgt_err = self.state.look_target.distance(desired.target);
            if pos_err < eps && tgt_err < eps {
                self.state.locked = true;
                self.state.mode = RigMode::Inspecting;
                rig.apply_constraints(&self.clamp.constraints(self.state.mode, true));
                log::info!("[focus] inspect locked; orbiter takes over");
            }
        }
    }
}
