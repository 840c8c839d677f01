/// Mouse button identifier.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MouseButtonState {
    Pressed,
    Released,
}

/// Pointer move event in logical pixels (client coordinates).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerMoveEvent {
    pub x: f32,
    pub y: f32,
}

/// Pointer button event.
///
/// Coordinates are included so a press or release can be processed without
/// an external "current pointer position".
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerButtonEvent {
    pub button: MouseButton,
    pub state: MouseButtonState,
    pub x: f32,
    pub y: f32,
}

/// Platform-agnostic input events, in arrival order.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum InputEvent {
    PointerMoved(PointerMoveEvent),
    PointerButton(PointerButtonEvent),
}

impl InputEvent {
    /// Shorthand for a primary-button press at `(x, y)`.
    pub fn left_press(x: f32, y: f32) -> Self {
        Self::PointerButton(PointerButtonEvent {
            button: MouseButton::Left,
            state: MouseButtonState::Pressed,
            x,
            y,
        })
    }

    /// Shorthand for a primary-button release at `(x, y)`.
    pub fn left_release(x: f32, y: f32) -> Self {
        Self::PointerButton(PointerButtonEvent {
            button: MouseButton::Left,
            state: MouseButtonState::Released,
            x,
            y,
        })
    }

    pub fn moved(x: f32, y: f32) -> Self {
        Self::PointerMoved(PointerMoveEvent { x, y })
    }
}
