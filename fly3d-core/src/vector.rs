/// Three-component vectors and the free functions built on them
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

use nalgebra::Vector3;

/// Threshold below which a vector is treated as having no direction
pub const EPSILON: f32 = f32::EPSILON;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const X: Self = Self::new(1.0, 0.0, 0.0);
    pub const Y: Self = Self::new(0.0, 1.0, 0.0);
    pub const Z: Self = Self::new(0.0, 0.0, 1.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    fn to_na(self) -> Vector3<f32> {
        Vector3::new(self.x, self.y, self.z)
    }

    pub fn dot(self, other: Self) -> f32 {
        self.to_na().dot(&other.to_na())
    }

    /// Right-handed cross product
    pub fn cross(self, other: Self) -> Self {
        self.to_na().cross(&other.to_na()).into()
    }

    pub fn scale(self, s: f32) -> Self {
        (self.to_na() * s).into()
    }

    pub fn length_squared(self) -> f32 {
        self.to_na().norm_squared()
    }

    pub fn length(self) -> f32 {
        self.to_na().norm()
    }

    /// Sum of absolute components (L1 norm)
    pub fn manhattan_length(self) -> f32 {
        self.to_na().lp_norm(1)
    }

    /// Unit vector in the same direction, or `None` when the length is not above [`EPSILON`]
    pub fn try_normalize(self) -> Option<Self> {
        self.to_na().try_normalize(EPSILON).map(Self::from)
    }

    /// Unit vector in the same direction. Degenerate input yields the zero vector
    /// rather than a non-finite result.
    pub fn normalize(self) -> Self {
        self.try_normalize().unwrap_or(Self::ZERO)
    }

    /// Projection of `from` onto `self`
    pub fn project(self, from: Self) -> Self {
        let len_sq = self.length_squared();
        if len_sq < EPSILON {
            return Self::ZERO;
        }
        self.scale(self.dot(from) / len_sq)
    }

    /// Conditions a movement vector so that combined axes do not move faster
    /// than a single axis.
    ///
    /// The result is rescaled so its Euclidean length equals the input's L1
    /// length. Vectors shorter than [`EPSILON`] pass through untouched.
    pub fn to_circular(self) -> Self {
        let len = self.length();
        if len < EPSILON {
            return self;
        }
        self.scale(len / self.manhattan_length())
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

/// Difference `to - from`, the edge running from one point to another
pub fn edge(from: Vec3, to: Vec3) -> Vec3 {
    to - from
}

pub fn cross(a: Vec3, b: Vec3) -> Vec3 {
    a.cross(b)
}

impl Add for Vec3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Vec3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for Vec3 {
    type Output = Self;

    fn neg(self) -> Self {
        self.scale(-1.0)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        self.scale(rhs)
    }
}

impl From<[f32; 3]> for Vec3 {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<Vector3<f32>> for Vec3 {
    fn from(v: Vector3<f32>) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Vec3> for Vector3<f32> {
    fn from(v: Vec3) -> Self {
        v.to_na()
    }
}
