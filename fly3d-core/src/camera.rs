/// Free-fly and walking cameras driven by per-frame input
use std::f32::consts::PI;

use crate::input::{InputState, Key};
use crate::matrix::Mat4;
use crate::quaternion::Quat;
use crate::settings::CameraSettings;
use crate::transform::Transform;
use crate::vector::Vec3;

/// Common capability of both camera representations
pub trait CameraRig {
    /// Advances the camera by one frame of input, `dt` seconds long
    fn update(&mut self, input: &InputState, dt: f32, settings: &CameraSettings);

    /// World-to-camera transform
    fn view_matrix(&self) -> Mat4;

    fn position(&self) -> Vec3;

    fn position_mut(&mut self) -> &mut Vec3;
}

/// Which camera drives rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMode {
    Walking,
    FreeFly,
}

impl CameraMode {
    pub fn toggled(self) -> Self {
        match self {
            CameraMode::Walking => CameraMode::FreeFly,
            CameraMode::FreeFly => CameraMode::Walking,
        }
    }
}

/// Quaternion-oriented camera moving along its own facing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FreeFlyCamera {
    pub transform: Transform,
}

impl FreeFlyCamera {
    pub fn new(position: Vec3, orientation: Quat) -> Self {
        Self {
            transform: Transform {
                position,
                rotation: orientation,
                ..Transform::default()
            },
        }
    }

    pub fn orientation(&self) -> Quat {
        self.transform.rotation
    }

    /// Moves by `v` in camera-local coordinates (-Z is forward)
    pub fn translate_local(&mut self, v: Vec3) {
        self.transform.translate_local(v);
    }

    /// Composes a local-frame rotation given as an axis-angle vector
    pub fn rotate_local(&mut self, rot: Vec3) {
        self.transform.rotate_local(Quat::from_axis_angle(rot));
    }
}

impl Default for FreeFlyCamera {
    fn default() -> Self {
        Self::new(
            Vec3::new(0.0, 0.0, 1.6),
            Quat::from_axis_angle(Vec3::new(PI * 0.2, 0.0, 0.0)),
        )
    }
}

impl CameraRig for FreeFlyCamera {
    fn update(&mut self, input: &InputState, dt: f32, settings: &CameraSettings) {
        let (dx, dy) = input.pointer_delta();
        let k = settings.look_sensitivity;
        self.rotate_local(Vec3::new(-k * dy, -k * dx, 0.0));

        if input.is_held(Key::Left) {
            self.rotate_local(Vec3::new(0.0, 0.0, settings.roll_step));
        }
        if input.is_held(Key::Right) {
            self.rotate_local(Vec3::new(0.0, 0.0, -settings.roll_step));
        }

        let step = settings.fly_speed * dt;
        let mut direction = Vec3::ZERO;
        if input.is_held(Key::Forward) {
            direction += Vec3::new(0.0, 0.0, -step);
        }
        if input.is_held(Key::Backward) {
            direction += Vec3::new(0.0, 0.0, step);
        }
        self.translate_local(direction.to_circular());
    }

    fn view_matrix(&self) -> Mat4 {
        self.transform.rotation.conjugate().to_matrix() * Mat4::translation(-self.transform.position)
    }

    fn position(&self) -> Vec3 {
        self.transform.position
    }

    fn position_mut(&mut self) -> &mut Vec3 {
        &mut self.transform.position
    }
}

/// Ground-bound camera with clamped pitch and free yaw, Z up
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WalkingCamera {
    pub position: Vec3,
    /// Radians in [0, PI]; 0 looks straight down, PI/2 at the horizon
    pub pitch: f32,
    /// Radians about world Z, never wrapped
    pub yaw: f32,
}

impl WalkingCamera {
    pub fn new(position: Vec3, pitch: f32, yaw: f32) -> Self {
        Self {
            position,
            pitch: pitch.clamp(0.0, PI),
            yaw,
        }
    }

    /// Adds pointer-driven look deltas, keeping pitch from flipping over
    pub fn look(&mut self, d_pitch: f32, d_yaw: f32) {
        self.pitch = (self.pitch + d_pitch).clamp(0.0, PI);
        self.yaw += d_yaw;
    }

    /// Moves by `v`, rotating its ground-plane part by the current yaw.
    /// The vertical component is applied as is.
    pub fn translate_local(&mut self, v: Vec3) {
        let (s, c) = self.yaw.sin_cos();
        self.position.x += v.x * c - v.y * s;
        self.position.y += v.y * c + v.x * s;
        self.position.z += v.z;
    }
}

impl Default for WalkingCamera {
    fn default() -> Self {
        Self::new(Vec3::new(7.0, 5.0, 1.7), PI / 2.0, PI * 0.65)
    }
}

impl CameraRig for WalkingCamera {
    fn update(&mut self, input: &InputState, dt: f32, settings: &CameraSettings) {
        let (dx, dy) = input.pointer_delta();
        let k = settings.look_sensitivity;
        self.look(-k * dy, -k * dx);

        let step = settings.walk_speed * dt;
        let mut direction = Vec3::ZERO;
        if input.is_held(Key::Left) {
            direction += Vec3::new(-step, 0.0, 0.0);
        }
        if input.is_held(Key::Right) {
            direction += Vec3::new(step, 0.0, 0.0);
        }
        if input.is_held(Key::Forward) {
            direction += Vec3::new(0.0, step, 0.0);
        }
        if input.is_held(Key::Backward) {
            direction += Vec3::new(0.0, -step, 0.0);
        }
        self.translate_local(direction.to_circular());
    }

    fn view_matrix(&self) -> Mat4 {
        Mat4::rotation_x(-self.pitch) * Mat4::rotation_z(-self.yaw) * Mat4::translation(-self.position)
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn position_mut(&mut self) -> &mut Vec3 {
        &mut self.position
    }
}

/// Direct world-axis movement shared by both rigs
fn axis_nudge(input: &InputState, dt: f32, settings: &CameraSettings) -> Vec3 {
    let step = if input.is_held(Key::Modifier) {
        -settings.nudge_speed * dt
    } else {
        settings.nudge_speed * dt
    };
    let axis = |key| if input.is_held(key) { step } else { 0.0 };
    Vec3::new(axis(Key::AxisX), axis(Key::AxisY), axis(Key::AxisZ))
}

/// Both camera rigs plus the mode selecting the active one.
///
/// Only the active rig is updated. Toggling never copies state between rigs,
/// so each resumes exactly where it was left.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    mode: CameraMode,
    pub free_fly: FreeFlyCamera,
    pub walking: WalkingCamera,
    pub settings: CameraSettings,
}

impl Camera {
    pub fn new(settings: CameraSettings) -> Self {
        Self {
            mode: CameraMode::Walking,
            free_fly: FreeFlyCamera::default(),
            walking: WalkingCamera::default(),
            settings,
        }
    }

    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    pub fn toggle_mode(&mut self) -> CameraMode {
        self.mode = self.mode.toggled();
        log::debug!("camera mode switched to {:?}", self.mode);
        self.mode
    }

    pub fn active(&self) -> &dyn CameraRig {
        match self.mode {
            CameraMode::Walking => &self.walking,
            CameraMode::FreeFly => &self.free_fly,
        }
    }

    pub fn active_mut(&mut self) -> &mut dyn CameraRig {
        match self.mode {
            CameraMode::Walking => &mut self.walking,
            CameraMode::FreeFly => &mut self.free_fly,
        }
    }

    pub fn update(&mut self, input: &InputState, dt: f32) {
        let settings = self.settings;
        let rig = self.active_mut();
        rig.update(input, dt, &settings);
        *rig.position_mut() += axis_nudge(input, dt, &settings);
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.active().view_matrix()
    }

    pub fn position(&self) -> Vec3 {
        self.active().position()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(CameraSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn held(keys: &[Key]) -> InputState {
        let mut input = InputState::new();
        for key in keys {
            input.press(*key);
        }
        input
    }

    #[test]
    fn test_free_fly_translate_local_identity() {
        let mut cam = FreeFlyCamera::new(Vec3::ZERO, Quat::IDENTITY);
        let dt = 0.25;
        cam.translate_local(Vec3::new(0.0, 0.0, -1.0).scale(dt));
        assert_eq!(cam.position(), Vec3::new(0.0, 0.0, -0.25));
    }

    #[test]
    fn test_free_fly_forward_moves_along_facing() {
        let settings = CameraSettings::default();
        let mut cam = FreeFlyCamera::new(Vec3::ZERO, Quat::IDENTITY);
        cam.update(&held(&[Key::Forward]), 0.5, &settings);
        assert!((cam.position().z + settings.fly_speed * 0.5).abs() < 1e-5);
        assert!(cam.position().x.abs() < 1e-6);
    }

    #[test]
    fn test_free_fly_forward_and_backward_cancel() {
        let settings = CameraSettings::default();
        let mut cam = FreeFlyCamera::new(Vec3::new(1.0, 2.0, 3.0), Quat::IDENTITY);
        cam.update(&held(&[Key::Forward, Key::Backward]), 0.1, &settings);
        assert_eq!(cam.position(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_free_fly_roll_keys() {
        let settings = CameraSettings::default();
        let mut cam = FreeFlyCamera::new(Vec3::ZERO, Quat::IDENTITY);
        cam.update(&held(&[Key::Left]), 0.016, &settings);
        let expected = Quat::from_axis_angle(Vec3::new(0.0, 0.0, settings.roll_step));
        assert!((cam.orientation().z - expected.z).abs() < 1e-6);
        assert!((cam.orientation().norm() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_free_fly_view_undoes_pose() {
        let cam = FreeFlyCamera::new(
            Vec3::new(3.0, -1.0, 2.0),
            Quat::from_axis_angle(Vec3::new(0.3, 0.5, -0.2)),
        );
        let world = cam.transform.matrix();
        assert!((cam.view_matrix() * world).approx_eq(&Mat4::identity(), 1e-5));
    }

    #[test]
    fn test_walking_pitch_clamped() {
        let settings = CameraSettings::default();
        let mut cam = WalkingCamera::default();
        let mut input = InputState::new();
        for _ in 0..100 {
            input.add_pointer_delta(0.0, 1e4);
            cam.update(&input, 0.016, &settings);
            input.end_frame();
            assert!((0.0..=PI).contains(&cam.pitch));
        }
        assert_eq!(cam.pitch, 0.0);

        for _ in 0..100 {
            input.add_pointer_delta(0.0, -1e4);
            cam.update(&input, 0.016, &settings);
            input.end_frame();
            assert!((0.0..=PI).contains(&cam.pitch));
        }
        assert_eq!(cam.pitch, PI);
    }

    #[test]
    fn test_walking_yaw_unbounded() {
        let mut cam = WalkingCamera::new(Vec3::ZERO, PI / 2.0, 0.0);
        for _ in 0..10 {
            cam.look(0.0, PI);
        }
        assert!((cam.yaw - 10.0 * PI).abs() < 1e-4);
    }

    #[test]
    fn test_walking_translate_rotates_by_yaw() {
        let mut cam = WalkingCamera::new(Vec3::ZERO, PI / 2.0, PI / 2.0);
        cam.translate_local(Vec3::new(0.0, 1.0, 0.5));
        assert!((cam.position - Vec3::new(-1.0, 0.0, 0.5)).length() < 1e-6);
    }

    #[test]
    fn test_walking_diagonal_speed() {
        let settings = CameraSettings::default();
        let mut cam = WalkingCamera::new(Vec3::ZERO, PI / 2.0, 0.0);
        cam.update(&held(&[Key::Forward, Key::Right]), 1.0, &settings);
        assert!((cam.position.length() - settings.walk_speed).abs() < 1e-4);
    }

    #[test]
    fn test_walking_view_at_horizon() {
        // pitch PI/2 with yaw 0 looks along +Y
        let cam = WalkingCamera::new(Vec3::ZERO, PI / 2.0, 0.0);
        let ahead = cam.view_matrix().transform_point(Vec3::new(0.0, 5.0, 0.0));
        assert!((ahead - Vec3::new(0.0, 0.0, -5.0)).length() < 1e-5);
    }

    #[test]
    fn test_walking_view_pitch_then_yaw() {
        let cam = WalkingCamera::new(Vec3::ZERO, PI / 2.0, PI / 2.0);
        let view = cam.view_matrix();

        // yaw PI/2 walks forward along world -X
        let mut walked = cam;
        walked.translate_local(Vec3::Y);
        let forward = view.transform_vector(walked.position);
        assert!((forward - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-5);

        let up = view.transform_vector(Vec3::Z);
        assert!((up - Vec3::Y).length() < 1e-5);

        let cam = WalkingCamera::new(Vec3::new(2.0, -1.0, 1.7), 0.3 * PI, 0.7 * PI);
        let expected = Mat4::rotation_x(-cam.pitch)
            * Mat4::rotation_z(-cam.yaw)
            * Mat4::translation(-cam.position);
        assert!(cam.view_matrix().approx_eq(&expected, 1e-5));
        let swapped = Mat4::rotation_z(-cam.yaw)
            * Mat4::rotation_x(-cam.pitch)
            * Mat4::translation(-cam.position);
        assert!(!cam.view_matrix().approx_eq(&swapped, 1e-3));
        assert!(cam.view_matrix().transform_point(cam.position).length() < 1e-5);
    }

    #[test]
    fn test_free_fly_pointer_look() {
        let settings = CameraSettings::default();
        let k = settings.look_sensitivity;
        let forward = |cam: &FreeFlyCamera| cam.orientation().to_matrix().transform_vector(-Vec3::Z);

        // pointer moving right yaws about local Y towards +X
        let mut cam = FreeFlyCamera::new(Vec3::ZERO, Quat::IDENTITY);
        let mut input = InputState::new();
        input.add_pointer_delta(100.0, 0.0);
        cam.update(&input, 0.016, &settings);
        let expected = Quat::from_axis_angle(Vec3::new(0.0, -k * 100.0, 0.0));
        assert!((cam.orientation().y - expected.y).abs() < 1e-6);
        assert!((cam.orientation().w - expected.w).abs() < 1e-6);
        assert!(cam.orientation().x.abs() < 1e-6);
        assert!(forward(&cam).x > 0.0);
        assert!(forward(&cam).y.abs() < 1e-6);

        // pointer moving down pitches about local X towards -Y
        let mut cam = FreeFlyCamera::new(Vec3::ZERO, Quat::IDENTITY);
        let mut input = InputState::new();
        input.add_pointer_delta(0.0, 100.0);
        cam.update(&input, 0.016, &settings);
        let expected = Quat::from_axis_angle(Vec3::new(-k * 100.0, 0.0, 0.0));
        assert!((cam.orientation().x - expected.x).abs() < 1e-6);
        assert!((cam.orientation().w - expected.w).abs() < 1e-6);
        assert!(cam.orientation().y.abs() < 1e-6);
        assert!(forward(&cam).y < 0.0);
        assert!(forward(&cam).x.abs() < 1e-6);
    }

    #[test]
    fn test_axis_nudge_with_modifier() {
        let mut camera = Camera::default();
        let start = camera.position();
        camera.update(&held(&[Key::AxisX, Key::AxisZ, Key::Modifier]), 0.5);
        let moved = camera.position() - start;
        assert!((moved - Vec3::new(-0.5, 0.0, -0.5)).length() < 1e-6);
    }

    #[test]
    fn test_toggle_keeps_independent_state() {
        let mut camera = Camera::default();
        assert_eq!(camera.mode(), CameraMode::Walking);
        let fly_before = camera.free_fly;

        camera.update(&held(&[Key::Forward]), 1.0);
        let walked = camera.walking;
        assert_eq!(camera.free_fly, fly_before);

        assert_eq!(camera.toggle_mode(), CameraMode::FreeFly);
        assert_eq!(camera.position(), fly_before.position());
        camera.update(&held(&[Key::Forward]), 1.0);
        assert_eq!(camera.walking, walked);

        camera.toggle_mode();
        assert_eq!(camera.position(), walked.position);
    }
}
