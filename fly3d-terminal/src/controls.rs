/// Decodes crossterm events into the core's input state
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use fly3d_core::{InputState, Key};

/// Viewer-level commands that are not camera input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    Quit,
    ToggleCameraMode,
    /// Esc grabs or releases the mouse
    ToggleMouseCapture,
    Resize(u16, u16),
}

pub struct Controls {
    /// Whether the terminal reports key releases. Without them every press is
    /// held for a single frame.
    reports_release: bool,
    pulsed: Vec<Key>,
    last_mouse: Option<(u16, u16)>,
    /// Pointer units per terminal column and row
    pointer_scale: (f32, f32),
}

impl Controls {
    pub fn new(reports_release: bool, pointer_scale: (f32, f32)) -> Self {
        Self {
            reports_release,
            pulsed: Vec::new(),
            last_mouse: None,
            pointer_scale,
        }
    }

    pub fn handle_event(&mut self, event: &Event, input: &mut InputState) -> Action {
        match event {
            Event::Key(key) => self.handle_key(key, input),
            Event::Mouse(mouse) => {
                self.handle_mouse(mouse, input);
                Action::None
            }
            Event::Resize(width, height) => Action::Resize(*width, *height),
            Event::FocusLost => {
                input.release_all();
                self.last_mouse = None;
                Action::None
            }
            _ => Action::None,
        }
    }

    fn handle_key(&mut self, event: &KeyEvent, input: &mut InputState) -> Action {
        let pressed = event.kind != KeyEventKind::Release;
        if pressed {
            match event.code {
                KeyCode::Char('q') => return Action::Quit,
                KeyCode::Esc if event.kind == KeyEventKind::Press => {
                    // the pointer re-anchors on the next motion event
                    self.last_mouse = None;
                    return Action::ToggleMouseCapture;
                }
                KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => {
                    return Action::Quit
                }
                KeyCode::Char(' ') if event.kind == KeyEventKind::Press => {
                    return Action::ToggleCameraMode
                }
                _ => {}
            }
        }

        let Some(key) = map_key(event.code) else {
            return Action::None;
        };
        let shifted = event.modifiers.contains(KeyModifiers::SHIFT)
            || matches!(event.code, KeyCode::Char(c) if c.is_ascii_uppercase());

        if pressed {
            self.hold(key, input);
            if shifted {
                self.hold(Key::Modifier, input);
            } else if input.is_held(Key::Modifier) && !self.pulsed.contains(&Key::Modifier) {
                input.release(Key::Modifier);
            }
        } else {
            input.release(key);
            if !shifted {
                input.release(Key::Modifier);
            }
        }
        Action::None
    }

    fn hold(&mut self, key: Key, input: &mut InputState) {
        input.press(key);
        if !self.reports_release && !self.pulsed.contains(&key) {
            self.pulsed.push(key);
        }
    }

    fn handle_mouse(&mut self, event: &MouseEvent, input: &mut InputState) {
        match event.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                if let Some((column, row)) = self.last_mouse {
                    let dx = event.column as f32 - column as f32;
                    let dy = event.row as f32 - row as f32;
                    input.add_pointer_delta(dx * self.pointer_scale.0, dy * self.pointer_scale.1);
                }
                self.last_mouse = Some((event.column, event.row));
            }
            _ => {}
        }
    }

    /// Releases keys that were only pulsed this frame and clears pointer motion
    pub fn end_frame(&mut self, input: &mut InputState) {
        for key in self.pulsed.drain(..) {
            input.release(key);
        }
        input.end_frame();
    }
}

fn map_key(code: KeyCode) -> Option<Key> {
    let key = match code {
        KeyCode::Up => Key::Forward,
        KeyCode::Down => Key::Backward,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'w' => Key::Forward,
            's' => Key::Backward,
            'a' => Key::Left,
            'd' => Key::Right,
            'x' => Key::AxisX,
            'y' => Key::AxisY,
            'z' => Key::AxisZ,
            _ => return None,
        },
        _ => return None,
    };
    Some(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, MouseButton};

    fn key(code: KeyCode, modifiers: KeyModifiers, kind: KeyEventKind) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind,
            state: KeyEventState::NONE,
        })
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_press_without_release_reports_is_pulsed() {
        let mut controls = Controls::new(false, (1.0, 1.0));
        let mut input = InputState::new();
        let w = key(KeyCode::Char('w'), KeyModifiers::NONE, KeyEventKind::Press);
        assert_eq!(controls.handle_event(&w, &mut input), Action::None);
        assert!(input.is_held(Key::Forward));

        controls.end_frame(&mut input);
        assert!(!input.is_held(Key::Forward));
    }

    #[test]
    fn test_press_and_release() {
        let mut controls = Controls::new(true, (1.0, 1.0));
        let mut input = InputState::new();
        controls.handle_event(&key(KeyCode::Char('a'), KeyModifiers::NONE, KeyEventKind::Press), &mut input);
        controls.end_frame(&mut input);
        assert!(input.is_held(Key::Left));

        controls.handle_event(&key(KeyCode::Char('a'), KeyModifiers::NONE, KeyEventKind::Release), &mut input);
        assert!(!input.is_held(Key::Left));
    }

    #[test]
    fn test_shift_sets_modifier() {
        let mut controls = Controls::new(false, (1.0, 1.0));
        let mut input = InputState::new();
        controls.handle_event(&key(KeyCode::Char('X'), KeyModifiers::SHIFT, KeyEventKind::Press), &mut input);
        assert!(input.is_held(Key::AxisX));
        assert!(input.is_held(Key::Modifier));

        controls.end_frame(&mut input);
        controls.handle_event(&key(KeyCode::Char('x'), KeyModifiers::NONE, KeyEventKind::Press), &mut input);
        assert!(input.is_held(Key::AxisX));
        assert!(!input.is_held(Key::Modifier));
    }

    #[test]
    fn test_commands() {
        let mut controls = Controls::new(false, (1.0, 1.0));
        let mut input = InputState::new();
        let space = key(KeyCode::Char(' '), KeyModifiers::NONE, KeyEventKind::Press);
        assert_eq!(controls.handle_event(&space, &mut input), Action::ToggleCameraMode);
        let quit = key(KeyCode::Char('q'), KeyModifiers::NONE, KeyEventKind::Press);
        assert_eq!(controls.handle_event(&quit, &mut input), Action::Quit);
        let ctrl_c = key(KeyCode::Char('c'), KeyModifiers::CONTROL, KeyEventKind::Press);
        assert_eq!(controls.handle_event(&ctrl_c, &mut input), Action::Quit);
        let esc = key(KeyCode::Esc, KeyModifiers::NONE, KeyEventKind::Press);
        assert_eq!(controls.handle_event(&esc, &mut input), Action::ToggleMouseCapture);
        let esc_release = key(KeyCode::Esc, KeyModifiers::NONE, KeyEventKind::Release);
        assert_eq!(controls.handle_event(&esc_release, &mut input), Action::None);
        assert_eq!(
            controls.handle_event(&Event::Resize(120, 40), &mut input),
            Action::Resize(120, 40)
        );
    }

    #[test]
    fn test_mouse_motion_accumulates_delta() {
        let mut controls = Controls::new(false, (8.0, 16.0));
        let mut input = InputState::new();
        controls.handle_event(&mouse(MouseEventKind::Moved, 10, 10), &mut input);
        assert_eq!(input.pointer_delta(), (0.0, 0.0));

        controls.handle_event(&mouse(MouseEventKind::Moved, 12, 9), &mut input);
        controls.handle_event(&mouse(MouseEventKind::Drag(MouseButton::Left), 13, 9), &mut input);
        assert_eq!(input.pointer_delta(), (24.0, -16.0));

        controls.end_frame(&mut input);
        assert_eq!(input.pointer_delta(), (0.0, 0.0));
    }

    #[test]
    fn test_mouse_capture_toggle_drops_anchor() {
        let mut controls = Controls::new(false, (1.0, 1.0));
        let mut input = InputState::new();
        controls.handle_event(&mouse(MouseEventKind::Moved, 10, 10), &mut input);
        let esc = key(KeyCode::Esc, KeyModifiers::NONE, KeyEventKind::Press);
        controls.handle_event(&esc, &mut input);

        controls.handle_event(&mouse(MouseEventKind::Moved, 40, 2), &mut input);
        assert_eq!(input.pointer_delta(), (0.0, 0.0));
    }
}
