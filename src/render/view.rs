use crate::math::{Ray, Vec2, Vec3};

const EYE: Vec3 = Vec3::ZERO;
const LOOK_AT: Vec3 = Vec3::new(0.0, 0.0, 1000.0);
const MIN_FOV_DEG: f64 = 1.0;
const MAX_FOV_DEG: f64 = 179.0;
const PARALLEL_EPSILON: f64 = 1e-9;

#[derive(Clone, Copy, Debug)]
pub struct Camera {
    pub origin: Vec3,
    pub right: Vec3,
    pub up: Vec3,
    pub forward: Vec3,
    pub half_extent: f64,
}

impl Camera {
    /// Fixed eye and target; `rotation_angle` tilts the up vector around the
    /// view axis through `(cos a, 1, sin a)`.
    pub fn aurora(rotation_angle: f64, fov_deg: f64) -> Self {
        let up = Vec3::new(rotation_angle.cos(), 1.0, rotation_angle.sin());
        Self::look_at(EYE, LOOK_AT, up, fov_deg)
    }

    pub fn look_at(origin: Vec3, target: Vec3, up: Vec3, fov_deg: f64) -> Self {
        let forward = (target - origin).normalize_or(Vec3::Z);
        let up_hint = up.normalize_or(Vec3::Y);

        let mut right = forward.cross(up_hint);
        if right.length() < PARALLEL_EPSILON {
            // Up is parallel to the view axis; pick any axis not aligned with it.
            let axis = if forward.x.abs() < 0.9 { Vec3::X } else { Vec3::Z };
            right = forward.cross(axis);
        }
        let right = right.normalize_or(Vec3::X);
        let up = right.cross(forward).normalize_or(Vec3::Y);

        let theta = fov_deg.clamp(MIN_FOV_DEG, MAX_FOV_DEG).to_radians();
        Self {
            origin,
            right,
            up,
            forward,
            half_extent: (theta * 0.5).tan(),
        }
    }

    /// Ray through `ndc`, where `ndc.y` spans `[-1, 1]` and `ndc.x` spans the
    /// aspect-scaled width.
    pub fn ray(&self, ndc: Vec2, aspect_ratio: f64) -> Ray {
        let viewport = Vec2::new(self.half_extent * aspect_ratio, self.half_extent);
        let direction = ((self.right * (ndc.x * viewport.x))
            + (self.up * (ndc.y * viewport.y))
            + self.forward)
            .normalize_or(self.forward);
        Ray {
            origin: self.origin,
            direction,
        }
    }
}

/// Maps a bottom-left-origin fragment coordinate to the centered,
/// height-normalized screen space `(2 * frag - res) / res.y`.
pub fn fragment_to_ndc(frag: Vec2, width: u32, height: u32) -> Vec2 {
    let res = Vec2::new(width as f64, height as f64);
    Vec2::new(
        (2.0 * frag.x - res.x) / res.y,
        (2.0 * frag.y - res.y) / res.y,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_orthonormal(camera: &Camera) {
        for axis in [camera.right, camera.up, camera.forward] {
            assert!(axis.is_finite());
            assert!((axis.length() - 1.0).abs() < 1e-9);
        }
        assert!(camera.right.dot(camera.up).abs() < 1e-9);
        assert!(camera.right.dot(camera.forward).abs() < 1e-9);
        assert!(camera.up.dot(camera.forward).abs() < 1e-9);
    }

    #[test]
    fn aurora_camera_looks_down_positive_z() {
        let camera = Camera::aurora(1.2, 45.0);
        assert_eq!(camera.forward, Vec3::Z);
        assert_orthonormal(&camera);
        let center = camera.ray(Vec2::new(0.0, 0.0), 1.0);
        assert!((center.direction.z - 1.0).abs() < 1e-12);
    }

    #[test]
    fn basis_is_orthonormal_for_all_rotations() {
        for i in 0..64 {
            let angle = i as f64 * (std::f64::consts::TAU / 64.0);
            assert_orthonormal(&Camera::aurora(angle, 60.0));
        }
    }

    #[test]
    fn degenerate_up_uses_fallback_axis() {
        let camera = Camera::look_at(Vec3::ZERO, Vec3::new(0.0, 50.0, 0.0), Vec3::Y, 45.0);
        assert_orthonormal(&camera);
        let ray = camera.ray(Vec2::new(0.3, -0.2), 1.5);
        assert!(ray.direction.is_finite());
        assert!((ray.direction.length() - 1.0).abs() < 1e-9);

        let camera = Camera::look_at(Vec3::ZERO, Vec3::new(9.0, 0.0, 0.0), Vec3::X, 45.0);
        assert_orthonormal(&camera);
    }

    #[test]
    fn coincident_eye_and_target_still_produce_rays() {
        let camera = Camera::look_at(Vec3::ONE, Vec3::ONE, Vec3::Y, 45.0);
        assert_orthonormal(&camera);
    }

    #[test]
    fn field_of_view_widens_rays() {
        let narrow = Camera::aurora(0.0, 30.0).ray(Vec2::new(1.0, 0.0), 1.0);
        let wide = Camera::aurora(0.0, 90.0).ray(Vec2::new(1.0, 0.0), 1.0);
        assert!(wide.direction.z < narrow.direction.z);
        // tan(45 deg) = 1 at the edge of a 90 degree frustum.
        assert!((wide.direction.z - 0.5f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn extreme_fov_is_clamped() {
        let camera = Camera::aurora(0.4, 400.0);
        assert!(camera.half_extent.is_finite());
        assert!(camera.half_extent > 0.0);
    }

    #[test]
    fn ndc_is_centered_and_height_normalized() {
        assert_eq!(fragment_to_ndc(Vec2::new(2.0, 2.0), 4, 4), Vec2::new(0.0, 0.0));
        assert_eq!(fragment_to_ndc(Vec2::new(0.0, 4.0), 8, 4), Vec2::new(-2.0, 1.0));
    }
}
