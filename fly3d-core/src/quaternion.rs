/// Rotation quaternions
use std::ops::Mul;

use nalgebra::{Quaternion, UnitQuaternion, Vector3};

use crate::matrix::Mat4;
use crate::vector::{Vec3, EPSILON};

/// Quaternion `w + xi + yj + zk`. Orientations are expected to stay unit-norm;
/// [`quat_mul`] does not renormalize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quat {
    pub w: f32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Quat {
    pub const IDENTITY: Self = Self::new(1.0, 0.0, 0.0, 0.0);

    pub const fn new(w: f32, x: f32, y: f32, z: f32) -> Self {
        Self { w, x, y, z }
    }

    /// Rotation about `rot`'s direction by `|rot|` radians.
    ///
    /// Returns the identity when the angle is not above [`EPSILON`].
    pub fn from_axis_angle(rot: Vec3) -> Self {
        // the threshold applies to the half angle
        UnitQuaternion::from_scaled_axis_eps(Vector3::from(rot), EPSILON / 2.0)
            .into_inner()
            .into()
    }

    /// Negates the vector part. For unit quaternions this is the inverse rotation.
    pub fn conjugate(self) -> Self {
        Quaternion::from(self).conjugate().into()
    }

    pub fn norm(self) -> f32 {
        Quaternion::from(self).norm()
    }

    /// Rescales to unit norm, falling back to the identity for degenerate input.
    pub fn normalize(self) -> Self {
        UnitQuaternion::try_new(Quaternion::from(self), EPSILON)
            .map_or(Self::IDENTITY, |q| q.into_inner().into())
    }

    /// Rotation matrix for a unit quaternion. Non-unit input is not corrected.
    pub fn to_matrix(self) -> Mat4 {
        UnitQuaternion::new_unchecked(Quaternion::from(self))
            .to_homogeneous()
            .into()
    }
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Hamilton product `a * b`: applies `b` within `a`'s frame. Not commutative.
pub fn quat_mul(a: Quat, b: Quat) -> Quat {
    (Quaternion::from(a) * Quaternion::from(b)).into()
}

impl Mul for Quat {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        quat_mul(self, rhs)
    }
}

impl From<Quaternion<f32>> for Quat {
    fn from(q: Quaternion<f32>) -> Self {
        Self::new(q.w, q.i, q.j, q.k)
    }
}

impl From<Quat> for Quaternion<f32> {
    fn from(q: Quat) -> Self {
        Quaternion::new(q.w, q.x, q.y, q.z)
    }
}
