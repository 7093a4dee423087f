//! Track light that fades in over the inspected item.

use glam::Vec3;

use crate::constants::{SPOT_ANGLE, SPOT_FADE_LAMBDA, SPOT_INTENSITY, SPOT_PENUMBRA, SPOT_RANGE};
use crate::damp::damp;
use crate::gallery::InspectPose;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpotLight {
    pub position: Vec3,
    pub target: Vec3,
    pub intensity: f32,
    pub angle: f32,
    pub penumbra: f32,
    pub range: f32,
}

impl Default for SpotLight {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 3.5, 2.0),
            target: Vec3::ZERO,
            intensity: 0.0,
            angle: SPOT_ANGLE,
            penumbra: SPOT_PENUMBRA,
            range: SPOT_RANGE,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct InspectLight {
    light: SpotLight,
}

impl InspectLight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fade toward on/off and follow the camera while an item is selected.
    pub fn update(&mut self, dt_sec: f32, camera: Vec3, selection: Option<&InspectPose>) -> SpotLight {
        let goal = if selection.is_some() { SPOT_INTENSITY } else { 0.0 };
        self.light.intensity = damp(self.light.intensity, goal, SPOT_FADE_LAMBDA, dt_sec);

        if let Some(pose) = selection {
            // slightly above and behind the viewer, like a ceiling track light
            self.light.position = camera + Vec3::Y * 0.65 - pose.forward() * 0.25;
            self.light.target = pose.anchor + Vec3::Y * 0.08;
        }
        self.light
    }

    pub fn light(&self) -> &SpotLight {
        &self.light
    }
}
