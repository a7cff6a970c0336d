/// Per-frame input state handed to camera updates
///
/// The windowing layer owns one `InputState` and feeds decoded events into
/// it. Cameras read it in `Camera::update`, after which the owner
/// calls `end_frame`.
use log::trace;

/// Discrete controls the camera understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Forward,
    Backward,
    Left,
    Right,
    AxisX,
    AxisY,
    AxisZ,
    /// Reverses the direction of axis nudges while held
    Modifier,
}

impl Key {
    pub const ALL: [Key; 8] = [
        Key::Forward,
        Key::Backward,
        Key::Left,
        Key::Right,
        Key::AxisX,
        Key::AxisY,
        Key::AxisZ,
        Key::Modifier,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputState {
    held: [bool; 8],
    pointer_dx: f32,
    pointer_dy: f32,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: Key, down: bool) {
        self.held[key.index()] = down;
    }

    pub fn press(&mut self, key: Key) {
        self.set(key, true);
    }

    pub fn release(&mut self, key: Key) {
        self.set(key, false);
    }

    pub fn release_all(&mut self) {
        trace!("releasing all held keys");
        self.held = [false; 8];
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held[key.index()]
    }

    /// Accumulates relative pointer motion until the end of the frame
    pub fn add_pointer_delta(&mut self, dx: f32, dy: f32) {
        self.pointer_dx += dx;
        self.pointer_dy += dy;
    }

    pub fn pointer_delta(&self) -> (f32, f32) {
        (self.pointer_dx, self.pointer_dy)
    }

    /// Clears per-frame pointer motion. Held keys persist.
    pub fn end_frame(&mut self) {
        self.pointer_dx = 0.0;
        self.pointer_dy = 0.0;
    }
}
