//! GPU-facing scene data shared by both frontends.
//!
//! The room and the exhibits are drawn as instanced unit quads (XY plane,
//! facing +Z). This module only builds the instance list and the uniform
//! block; pipelines live in each frontend and use [`crate::SCENE_WGSL`]:
//! vertex slot 0 is [`QUAD_CORNERS`], slot 1 is [`QuadInstance`]
//! (locations 1-5), bind group 0 is [`SceneUniforms`].

use std::f32::consts::FRAC_PI_2;

use glam::{Mat4, Quat, Vec3};

use crate::constants::{FOG_FAR, FOG_NEAR};
use crate::gallery::Gallery;
use crate::light::SpotLight;

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct QuadInstance {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
}

impl QuadInstance {
    pub fn new(center: Vec3, rotation: Quat, width: f32, height: f32, color: [f32; 4]) -> Self {
        let model = Mat4::from_scale_rotation_translation(
            Vec3::new(width, height, 1.0),
            rotation,
            center,
        );
        Self {
            model: model.to_cols_array_2d(),
            color,
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub eye: [f32; 4],
    pub spot_pos: [f32; 4],
    pub spot_dir: [f32; 4],
    pub spot_params: [f32; 4],
}

impl SceneUniforms {
    pub fn new(view_proj: Mat4, eye: Vec3, spot: &SpotLight) -> Self {
        let dir = (spot.target - spot.position).normalize_or_zero();
        let outer = spot.angle.cos();
        let inner = (spot.angle * (1.0 - spot.penumbra)).cos();
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            eye: eye.extend(1.0).to_array(),
            spot_pos: spot.position.extend(spot.intensity).to_array(),
            spot_dir: dir.extend(outer).to_array(),
            spot_params: [inner, spot.range, FOG_NEAR, FOG_FAR],
        }
    }
}

/// Two triangles covering the unit quad, as `(x, y)` corners.
pub const QUAD_CORNERS: [f32; 12] = [
    -0.5, -0.5, 0.5, -0.5, 0.5, 0.5, -0.5, -0.5, 0.5, 0.5, -0.5, 0.5,
];

const WALL_COLOR: [f32; 4] = [0.055, 0.067, 0.09, 1.0];
const FLOOR_COLOR: [f32; 4] = [0.043, 0.047, 0.063, 1.0];
const CEILING_COLOR: [f32; 4] = [0.039, 0.043, 0.063, 1.0];
const FRAME_COLOR: [f32; 4] = [0.09, 0.09, 0.11, 1.0];
const SELECTED_FRAME_COLOR: [f32; 4] = [0.78, 0.70, 0.52, 1.0];

/// Room planes followed by a frame and canvas quad per exhibit.
pub fn build_instances(
    gallery: &Gallery,
    hovered: Option<usize>,
    selected: Option<usize>,
) -> Vec<QuadInstance> {
    let room = gallery.room;
    let half_w = room.width * 0.5;
    let mid_y = room.height * 0.5;
    let mut out = Vec::with_capacity(5 + gallery.exhibits.len() * 2);

    out.push(QuadInstance::new(
        Vec3::ZERO,
        Quat::from_rotation_x(-FRAC_PI_2),
        room.width,
        room.depth + 2.0,
        FLOOR_COLOR,
    ));
    out.push(QuadInstance::new(
        Vec3::new(0.0, mid_y, room.back_z),
        Quat::IDENTITY,
        room.width,
        room.height,
        WALL_COLOR,
    ));
    out.push(QuadInstance::new(
        Vec3::new(-half_w, mid_y, 0.0),
        Quat::from_rotation_y(FRAC_PI_2),
        room.depth,
        room.height,
        WALL_COLOR,
    ));
    out.push(QuadInstance::new(
        Vec3::new(half_w, mid_y, 0.0),
        Quat::from_rotation_y(-FRAC_PI_2),
        room.depth,
        room.height,
        WALL_COLOR,
    ));
    out.push(QuadInstance::new(
        Vec3::new(0.0, room.height, 0.0),
        Quat::from_rotation_x(FRAC_PI_2),
        room.width,
        room.depth,
        CEILING_COLOR,
    ));

    for (i, e) in gallery.exhibits.iter().enumerate() {
        let pose = e.inspect_pose();
        let rotation = pose.rotation();
        let forward = pose.forward();
        let frame_color = if selected == Some(i) {
            SELECTED_FRAME_COLOR
        } else {
            FRAME_COLOR
        };
        out.push(QuadInstance::new(
            e.position - forward * 0.005,
            rotation,
            e.size.w + 0.1,
            e.size.h + 0.1,
            frame_color,
        ));
        let lift = if hovered == Some(i) { 1.25 } else { 1.0 };
        let [r, g, b] = e.color;
        out.push(QuadInstance::new(
            e.position + forward * 0.004,
            rotation,
            e.size.w,
            e.size.h,
            [
                (r * lift).min(1.0),
                (g * lift).min(1.0),
                (b * lift).min(1.0),
                1.0,
            ],
        ));
    }
    out
}

