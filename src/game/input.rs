use crate::game::geometry::Point;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Escape,
    /// Toggles the debug overlay.
    F4,
    /// Quick save.
    F5,
    Up,
    Down,
    Enter,
    Other,
}

impl Key {
    /// Maps a DOM `KeyboardEvent.key` value.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Escape" | "Esc" => Key::Escape,
            "F4" => Key::F4,
            "F5" => Key::F5,
            "ArrowUp" | "Up" => Key::Up,
            "ArrowDown" | "Down" => Key::Down,
            "Enter" | "Return" => Key::Enter,
            _ => Key::Other,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

impl MouseButton {
    /// Maps a DOM `MouseEvent.button` value.
    pub fn from_dom(button: i16) -> Option<Self> {
        match button {
            0 => Some(MouseButton::Left),
            1 => Some(MouseButton::Middle),
            2 => Some(MouseButton::Right),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    KeyDown(Key),
    MouseDown { button: MouseButton, pos: Point },
    MouseMove(Point),
    Quit,
}

impl InputEvent {
    pub fn click(x: f64, y: f64) -> Self {
        InputEvent::MouseDown {
            button: MouseButton::Left,
            pos: Point::new(x, y),
        }
    }

    pub fn right_click(x: f64, y: f64) -> Self {
        InputEvent::MouseDown {
            button: MouseButton::Right,
            pos: Point::new(x, y),
        }
    }
}
