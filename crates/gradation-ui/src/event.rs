use gradation_engine::coords::Vec2;
use gradation_engine::input::{InputEvent, MouseButton, MouseButtonState};

/// Pointer events routed to the editor, in logical pixels.
///
/// Clicks are not a separate event: a press followed by a release with no
/// move in between is treated as a click by whatever received the press.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum UiEvent {
    /// Primary button pressed at `pos`.
    PointerDown { pos: Vec2 },
    /// Pointer moved to `pos`, button held or not.
    PointerMove { pos: Vec2 },
    /// Primary button released at `pos`.
    PointerUp { pos: Vec2 },
}

impl UiEvent {
    /// Translates an engine input event. Only the primary button drives gestures.
    pub fn from_input(ev: &InputEvent) -> Option<Self> {
        match *ev {
            InputEvent::PointerMoved(m) => Some(UiEvent::PointerMove { pos: Vec2::new(m.x, m.y) }),
            InputEvent::PointerButton(b) if b.button == MouseButton::Left => {
                let pos = Vec2::new(b.x, b.y);
                Some(match b.state {
                    MouseButtonState::Pressed => UiEvent::PointerDown { pos },
                    MouseButtonState::Released => UiEvent::PointerUp { pos },
                })
            }
            InputEvent::PointerButton(_) => None,
        }
    }
}

/// Result returned by [`crate::GradationEditor::on_event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Event was handled; the host should not route it further.
    Consumed,
    /// Event was not handled, keep routing.
    Ignored,
}

impl EventResult {
    #[inline]
    pub fn is_consumed(self) -> bool {
        self == EventResult::Consumed
    }
}
