//! Camera view transforms.
//!
//! Views are left-handed: the eye moves to the origin, +X points right, +Y
//! up and the view direction becomes +Z.

use super::Mat44;
use crate::vector::{Vec3, Vec4};

impl Mat44 {
    /// View transform for an eye at `position` looking along `direction`.
    ///
    /// `up` only needs to be non-parallel to `direction`; the returned basis
    /// is orthonormal.
    pub fn look_from(position: Vec3, direction: Vec3, up: Vec3) -> Mat44 {
        let z = direction.normalized();
        let x = up.cross(z).normalized();
        let y = z.cross(x);

        // rows are the camera axes
        let mut view = Mat44::new(
            Vec4::from_vec3(x, 0.0),
            Vec4::from_vec3(y, 0.0),
            Vec4::from_vec3(z, 0.0),
            Vec4::new(0.0, 0.0, 0.0, 1.0),
        )
        .transposed_3x3();
        view.set_translation(-view.multiply_3x3(position));
        view
    }

    /// View transform for an eye at `position` looking at `target`.
    pub fn look_at(position: Vec3, target: Vec3, up: Vec3) -> Mat44 {
        Self::look_from(position, target - position, up)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_look_at_maps_target_onto_positive_z() {
        let eye = Vec3::new(0.0, 0.0, -5.0);
        let view = Mat44::look_at(eye, Vec3::zero(), Vec3::up());
        assert!((view * eye).is_near_zero());
        assert!((view * Vec3::zero()).is_close(Vec3::new(0.0, 0.0, 5.0)));
        assert!((view * Vec3::new(1.0, 0.0, -5.0)).is_close(Vec3::axis_x()));
        assert!((view * Vec3::new(0.0, 1.0, -5.0)).is_close(Vec3::axis_y()));
    }

    #[test]
    fn test_look_from_is_rigid() {
        let eye = Vec3::new(3.0, 4.0, -2.0);
        let view = Mat44::look_from(eye, Vec3::new(1.0, -1.0, 2.0), Vec3::up());
        assert!((view.determinant_3x3() - 1.0).abs() < 1.0e-5);
        let world = view.inversed_rotation_translation();
        assert!(world.translation_part().is_close_within(eye, 1.0e-10));
        assert!(
            world
                .multiply_3x3(Vec3::axis_z())
                .is_close_within(Vec3::new(1.0, -1.0, 2.0).normalized(), 1.0e-10)
        );
    }
}
