//! Input and scene-lifecycle events
//!
//! Events are built at their source (an input backend, or a hierarchy
//! mutation inside [`Scene`](crate::scene::Scene)), dispatched once
//! synchronously, then dropped. Every instance carries a `handled` flag;
//! once a handler sets it, no further node sees that instance.

use glam::Vec2;

use crate::scene::NodeHandle;

/// Keyboard key (platform-agnostic).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum Key {
    #[default]
    None,

    // Letter keys
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,

    // Number keys
    Key0,
    Key1,
    Key2,
    Key3,
    Key4,
    Key5,
    Key6,
    Key7,
    Key8,
    Key9,

    // Function keys
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,

    // Control keys
    Space,
    Enter,
    Escape,
    Backspace,
    Tab,
    Delete,
    Insert,
    Home,
    End,
    PageUp,
    PageDown,
    CapsLock,

    // Modifier keys
    LeftShift,
    RightShift,
    LeftControl,
    RightControl,
    LeftAlt,
    RightAlt,
    LeftSuper,
    RightSuper,

    // Arrow keys
    Up,
    Down,
    Left,
    Right,

    // Punctuation
    Apostrophe,
    Comma,
    Minus,
    Period,
    Slash,
    Semicolon,
    Equal,
    LeftBracket,
    Backslash,
    RightBracket,
    GraveAccent,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum MouseButton {
    #[default]
    None,
    Left,
    Right,
    Middle,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum KeyboardEventKind {
    Pressed,
    Released,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeyboardEvent {
    pub kind: KeyboardEventKind,
    pub key: Key,
    pub handled: bool,
}

impl KeyboardEvent {
    #[must_use]
    pub fn new(kind: KeyboardEventKind, key: Key) -> Self {
        Self {
            kind,
            key,
            handled: false,
        }
    }

    #[must_use]
    pub fn pressed(key: Key) -> Self {
        Self::new(KeyboardEventKind::Pressed, key)
    }

    #[must_use]
    pub fn released(key: Key) -> Self {
        Self::new(KeyboardEventKind::Released, key)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MouseEventKind {
    Moved,
    ButtonPressed,
    ButtonReleased,
    Scrolled,
}

/// Mouse input. `position` is in window space: origin top-left, X right,
/// Y down.
#[derive(Debug, Clone, PartialEq)]
pub struct MouseEvent {
    pub kind: MouseEventKind,
    pub position: Vec2,
    pub scroll: Vec2,
    pub button: MouseButton,
    pub handled: bool,
}

impl MouseEvent {
    #[must_use]
    pub fn moved(position: Vec2) -> Self {
        Self {
            kind: MouseEventKind::Moved,
            position,
            scroll: Vec2::ZERO,
            button: MouseButton::None,
            handled: false,
        }
    }

    #[must_use]
    pub fn button_pressed(button: MouseButton, position: Vec2) -> Self {
        Self {
            kind: MouseEventKind::ButtonPressed,
            button,
            ..Self::moved(position)
        }
    }

    #[must_use]
    pub fn button_released(button: MouseButton, position: Vec2) -> Self {
        Self {
            kind: MouseEventKind::ButtonReleased,
            button,
            ..Self::moved(position)
        }
    }

    #[must_use]
    pub fn scrolled(scroll: Vec2, position: Vec2) -> Self {
        Self {
            kind: MouseEventKind::Scrolled,
            scroll,
            ..Self::moved(position)
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SceneEventKind {
    NodeAdded,
    NodeRemoved,
}

/// Raised by the scene when a subtree enters or leaves it.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneEvent {
    pub kind: SceneEventKind,
    pub node: NodeHandle,
    pub handled: bool,
}

impl SceneEvent {
    #[must_use]
    pub fn new(kind: SceneEventKind, node: NodeHandle) -> Self {
        Self {
            kind,
            node,
            handled: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Keyboard(KeyboardEvent),
    Mouse(MouseEvent),
    Scene(SceneEvent),
}

impl Event {
    #[inline]
    #[must_use]
    pub fn handled(&self) -> bool {
        match self {
            Event::Keyboard(e) => e.handled,
            Event::Mouse(e) => e.handled,
            Event::Scene(e) => e.handled,
        }
    }

    pub fn set_handled(&mut self, handled: bool) {
        match self {
            Event::Keyboard(e) => e.handled = handled,
            Event::Mouse(e) => e.handled = handled,
            Event::Scene(e) => e.handled = handled,
        }
    }
}

impl From<KeyboardEvent> for Event {
    fn from(event: KeyboardEvent) -> Self {
        Event::Keyboard(event)
    }
}

impl From<MouseEvent> for Event {
    fn from(event: MouseEvent) -> Self {
        Event::Mouse(event)
    }
}

impl From<SceneEvent> for Event {
    fn from(event: SceneEvent) -> Self {
        Event::Scene(event)
    }
}
