/// Row-major 4x4 matrices
///
/// Matrices act on column vectors (`M * v`), so translation lives in the last
/// column and products apply right to left.
use std::ops::Mul;

use nalgebra::{Matrix4, Vector3, Vector4};

use crate::vector::{Vec3, EPSILON};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    /// Elements in row-major order
    pub m: [f32; 16],
}

impl Mat4 {
    pub fn from_rows(rows: [[f32; 4]; 4]) -> Self {
        let mut m = [0.0; 16];
        for (r, row) in rows.iter().enumerate() {
            m[r * 4..r * 4 + 4].copy_from_slice(row);
        }
        Self { m }
    }

    fn to_na(&self) -> Matrix4<f32> {
        Matrix4::from_row_slice(&self.m)
    }

    pub fn identity() -> Self {
        Matrix4::identity().into()
    }

    pub fn translation(pos: Vec3) -> Self {
        Matrix4::new_translation(&Vector3::from(pos)).into()
    }

    pub fn scale(scale: Vec3) -> Self {
        Matrix4::new_nonuniform_scaling(&Vector3::from(scale)).into()
    }

    pub fn rotation_x(angle: f32) -> Self {
        Matrix4::new_rotation(Vector3::x() * angle).into()
    }

    pub fn rotation_z(angle: f32) -> Self {
        Matrix4::new_rotation(Vector3::z() * angle).into()
    }

    /// Right-handed perspective projection into OpenGL clip space.
    ///
    /// `fov_y` is the vertical field of view in radians and `aspect` is
    /// width / height. Panics if `aspect` is zero or `near == far`.
    pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Self {
        Matrix4::new_perspective(aspect, fov_y, near, far).into()
    }

    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.m[row * 4 + col]
    }

    pub fn transpose(&self) -> Self {
        self.to_na().transpose().into()
    }

    /// Applies only the upper 3x3 part, so translation is ignored
    pub fn transform_vector(&self, v: Vec3) -> Vec3 {
        let m = self.to_na();
        (m.fixed_view::<3, 3>(0, 0) * Vector3::from(v)).into()
    }

    /// Applies the matrix with an implicit `w = 1`, discarding the resulting w
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        let m = self.to_na();
        (m.fixed_view::<3, 3>(0, 0) * Vector3::from(p) + m.fixed_view::<3, 1>(0, 3)).into()
    }

    /// Full homogeneous transform followed by the perspective divide.
    ///
    /// Returns `None` for points at or behind the eye (`w` not positive).
    pub fn project_point(&self, p: Vec3) -> Option<Vec3> {
        let clip = self.to_na() * Vector4::new(p.x, p.y, p.z, 1.0);
        if clip.w < EPSILON {
            return None;
        }
        Some((clip.xyz() / clip.w).into())
    }

    pub fn approx_eq(&self, other: &Self, tolerance: f32) -> bool {
        self.m
            .iter()
            .zip(other.m.iter())
            .all(|(a, b)| (a - b).abs() <= tolerance)
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::identity()
    }
}

pub fn mat_mul(l: &Mat4, r: &Mat4) -> Mat4 {
    (l.to_na() * r.to_na()).into()
}

impl Mul for Mat4 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        mat_mul(&self, &rhs)
    }
}

impl From<Mat4> for Matrix4<f32> {
    fn from(mat: Mat4) -> Self {
        mat.to_na()
    }
}

impl From<Matrix4<f32>> for Mat4 {
    fn from(mat: Matrix4<f32>) -> Self {
        // nalgebra stores columns contiguously
        let mut m = [0.0; 16];
        m.copy_from_slice(mat.transpose().as_slice());
        Self { m }
    }
}
