/// Perspective projection state, rebuilt when the viewport changes size
use crate::matrix::Mat4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Vertical field of view in radians
    fov_y: f32,
    /// Viewport width / height
    aspect: f32,
    near: f32,
    far: f32,
    matrix: Mat4,
}

impl Projection {
    pub fn new(fov_y: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            fov_y,
            aspect,
            near,
            far,
            matrix: Mat4::perspective(fov_y, aspect, near, far),
        }
    }

    /// Projection for a viewport given in pixels (or cells), `fov_deg` in degrees
    pub fn for_viewport(width: u32, height: u32, fov_deg: f32) -> Self {
        let defaults = Self::default();
        let mut projection = Self::new(fov_deg.to_radians(), defaults.aspect, defaults.near, defaults.far);
        projection.resize(width, height);
        projection
    }

    /// Recomputes the matrix for a new viewport. A zero-height viewport keeps
    /// the previous aspect ratio.
    pub fn resize(&mut self, width: u32, height: u32) {
        if height > 0 && width > 0 {
            self.aspect = width as f32 / height as f32;
        }
        self.matrix = Mat4::perspective(self.fov_y, self.aspect, self.near, self.far);
    }

    pub fn matrix(&self) -> Mat4 {
        self.matrix
    }

    pub fn fov_y(&self) -> f32 {
        self.fov_y
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn clip_range(&self) -> (f32, f32) {
        (self.near, self.far)
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self::new(60f32.to_radians(), 852.0 / 480.0, 0.01, 300.0)
    }
}
