/// Position, rotation and scale of an object or free-flying camera
use crate::matrix::Mat4;
use crate::quaternion::Quat;
use crate::vector::Vec3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    pub fn new(position: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Moves by `v` expressed in the transform's own rotated frame
    pub fn translate_local(&mut self, v: Vec3) {
        self.position += self.rotation.to_matrix().transform_vector(v);
    }

    /// Composes a rotation expressed in the local frame and renormalizes to
    /// keep repeated composition from drifting off unit length.
    pub fn rotate_local(&mut self, delta: Quat) {
        self.rotation = (self.rotation * delta).normalize();
    }

    /// Model matrix `T * R * S`
    pub fn matrix(&self) -> Mat4 {
        Mat4::translation(self.position) * self.rotation.to_matrix() * Mat4::scale(self.scale)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}
