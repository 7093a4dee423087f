//! Exhibits, orbit presets and focus navigation for the gallery room.

use glam::{EulerRot, Quat, Vec3};

use crate::constants::WHEEL_FOCUS_THRESHOLD;

/// Orbit viewpoint selected by the focus index.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FocusPreset {
    pub position: Vec3,
    pub target: Vec3,
}

impl FocusPreset {
    pub const fn new(position: Vec3, target: Vec3) -> Self {
        Self { position, target }
    }
}

/// Half extents are `w / 2`, `h / 2`; the full size is kept because the
/// standoff distance is derived from it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExhibitSize {
    pub w: f32,
    pub h: f32,
}

impl Default for ExhibitSize {
    fn default() -> Self {
        Self { w: 1.05, h: 1.45 }
    }
}

/// Placement of the item being inspected.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InspectPose {
    pub anchor: Vec3,
    /// XYZ euler angles, radians.
    pub orientation: Vec3,
    pub size: ExhibitSize,
}

impl InspectPose {
    pub fn new(anchor: Vec3, orientation: Vec3, size: ExhibitSize) -> Self {
        Self {
            anchor,
            orientation,
            size,
        }
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_euler(
            EulerRot::XYZ,
            self.orientation.x,
            self.orientation.y,
            self.orientation.z,
        )
    }

    /// Unit normal of the item's face, pointing into the room.
    pub fn forward(&self) -> Vec3 {
        (self.rotation() * Vec3::Z).normalize_or_zero()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Exhibit {
    pub id: &'static str,
    pub title: &'static str,
    pub artist: &'static str,
    pub year: &'static str,
    pub note: &'static str,
    pub position: Vec3,
    pub rotation: Vec3,
    pub size: ExhibitSize,
    /// Flat canvas tint.
    pub color: [f32; 3],
}

impl Exhibit {
    pub fn inspect_pose(&self) -> InspectPose {
        InspectPose::new(self.position, self.rotation, self.size)
    }
}

/// Axis-aligned interior of the room.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoomExtents {
    pub width: f32,
    pub depth: f32,
    pub height: f32,
    /// z of the back wall.
    pub back_z: f32,
}

impl Default for RoomExtents {
    fn default() -> Self {
        Self {
            width: 18.0,
            depth: 10.0,
            height: 6.0,
            back_z: -5.0,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Gallery {
    pub exhibits: Vec<Exhibit>,
    pub presets: Vec<FocusPreset>,
    pub room: RoomExtents,
}

impl Default for Gallery {
    fn default() -> Self {
        Self {
            exhibits: default_exhibits(),
            presets: default_presets(),
            room: RoomExtents::default(),
        }
    }
}

impl Gallery {
    pub fn exhibit(&self, index: usize) -> Option<&Exhibit> {
        self.exhibits.get(index)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.exhibits.iter().position(|e| e.id == id)
    }

    pub fn preset_count(&self) -> usize {
        self.presets.len()
    }
}

/// Clamp a requested focus index into `[0, count - 1]`.
#[inline]
pub fn clamp_focus_index(index: isize, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    index.clamp(0, count as isize - 1) as usize
}

/// Focus index after a wheel gesture. Small deltas are ignored.
pub fn wheel_focus_index(current: usize, delta_y: f32, count: usize) -> usize {
    if !delta_y.is_finite() || delta_y.abs() < WHEEL_FOCUS_THRESHOLD {
        return clamp_focus_index(current as isize, count);
    }
    let dir = if delta_y > 0.0 { 1 } else { -1 };
    clamp_focus_index(current as isize + dir, count)
}

pub fn default_presets() -> Vec<FocusPreset> {
    vec![
        FocusPreset::new(Vec3::new(-3.8, 1.65, 4.8), Vec3::new(-3.7, 2.4, -3.0)),
        FocusPreset::new(Vec3::new(0.0, 1.65, 5.2), Vec3::new(0.0, 2.45, -3.9)),
        FocusPreset::new(Vec3::new(3.8, 1.65, 4.8), Vec3::new(3.7, 2.4, -3.0)),
        FocusPreset::new(Vec3::new(-1.8, 1.65, 6.2), Vec3::new(-5.6, 2.35, -1.4)),
    ]
}

pub fn default_exhibits() -> Vec<Exhibit> {
    vec![
        Exhibit {
            id: "a1",
            title: "River Parallax Study",
            artist: "Layered Study",
            year: "2025",
            note: "A 2.5D test piece built from background, figure and foreground layers.",
            position: Vec3::new(-4.2, 2.8, -4.2),
            rotation: Vec3::new(0.0, 0.30, 0.0),
            size: ExhibitSize { w: 1.65, h: 1.05 },
            color: [0.32, 0.45, 0.62],
        },
        Exhibit {
            id: "a2",
            title: "Pic1 Study",
            artist: "Reference",
            year: "2025",
            note: "Single-image reference piece.",
            position: Vec3::new(0.0, 2.8, -4.45),
            rotation: Vec3::ZERO,
            size: ExhibitSize { w: 1.55, h: 1.16 },
            color: [0.70, 0.58, 0.42],
        },
        Exhibit {
            id: "a3",
            title: "Soft Geometry",
            artist: "Procedural",
            year: "2025",
            note: "Procedural abstract layers.",
            position: Vec3::new(4.2, 2.8, -4.2),
            rotation: Vec3::new(0.0, -0.30, 0.0),
            size: ExhibitSize::default(),
            color: [0.55, 0.40, 0.68],
        },
        Exhibit {
            id: "a4",
            title: "Near Silence",
            artist: "Procedural",
            year: "2025",
            note: "Procedural abstract layers.",
            position: Vec3::new(-6.8, 2.8, -1.2),
            rotation: Vec3::new(0.0, 0.85, 0.0),
            size: ExhibitSize { w: 0.95, h: 1.32 },
            color: [0.36, 0.62, 0.52],
        },
    ]
}
