/// Camera movement tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSettings {
    /// Free-fly translation speed in units per second
    pub fly_speed: f32,
    /// Walking translation speed in units per second
    pub walk_speed: f32,
    /// Radians of rotation per unit of pointer motion
    pub look_sensitivity: f32,
    /// Radians of roll applied per frame while a roll key is held
    pub roll_step: f32,
    /// Axis nudge speed in units per second
    pub nudge_speed: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            fly_speed: 10.0,
            walk_speed: 4.0,
            look_sensitivity: 0.003,
            roll_step: 0.03,
            nudge_speed: 1.0,
        }
    }
}
