use glam::{Mat4, Quat, Vec2, Vec3, Vec4};

use crate::gallery::Gallery;

/// Pixel position → normalized device coordinates (y up).
#[inline]
pub fn pixel_to_ndc(px: Vec2, width: f32, height: f32) -> Vec2 {
    let w = width.max(1.0);
    let h = height.max(1.0);
    Vec2::new(2.0 * px.x / w - 1.0, 1.0 - 2.0 * px.y / h)
}

/// Compute a world-space ray through `ndc` for the inverse of `projection * view`.
///
/// Returns `(ray_origin, ray_direction)`; the origin lies on the near plane.
pub fn screen_ray(ndc: Vec2, inverse_view_proj: Mat4) -> Option<(Vec3, Vec3)> {
    let p_near = inverse_view_proj * Vec4::new(ndc.x, ndc.y, 0.0, 1.0);
    let p_far = inverse_view_proj * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
    if p_near.w.abs() < f32::EPSILON || p_far.w.abs() < f32::EPSILON {
        return None;
    }
    let near = p_near.truncate() / p_near.w;
    let far = p_far.truncate() / p_far.w;
    let dir = (far - near).try_normalize()?;
    Some((near, dir))
}

/// Hit distance of a ray against a rectangle centered at `center`, facing
/// `rotation * +Z`, with half extents `half`.
pub fn ray_rect(
    ray_origin: Vec3,
    ray_dir: Vec3,
    center: Vec3,
    rotation: Quat,
    half: Vec2,
) -> Option<f32> {
    let normal = rotation * Vec3::Z;
    let denom = normal.dot(ray_dir);
    if denom.abs() < 1e-6 {
        return None;
    }
    let t = normal.dot(center - ray_origin) / denom;
    if t < 0.0 {
        return None;
    }
    let local = rotation.inverse() * (ray_origin + ray_dir * t - center);
    (local.x.abs() <= half.x && local.y.abs() <= half.y).then_some(t)
}

impl Gallery {
    /// Nearest exhibit under the ray, by index.
    pub fn pick(&self, ray_origin: Vec3, ray_dir: Vec3) -> Option<usize> {
        let mut best = None::<(usize, f32)>;
        for (i, e) in self.exhibits.iter().enumerate() {
            let pose = e.inspect_pose();
            // include the frame border
            let half = Vec2::new(e.size.w + 0.1, e.size.h + 0.1) * 0.5;
            if let Some(t) = ray_rect(ray_origin, ray_dir, e.position, pose.rotation(), half) {
                match best {
                    Some((_, bt)) if t >= bt => {}
                    _ => best = Some((i, t)),
                }
            }
        }
        best.map(|(i, _)| i)
    }
}
