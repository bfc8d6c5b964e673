//! Passive input event carriers.
//!
//! The layout engine does not dispatch input itself: an external dispatcher
//! hit-tests pointer coordinates against the positioned tree (via
//! [`GuiTree::element_at`](crate::tree::GuiTree::element_at) and the bounds
//! queries) and hands these structures to the owning widget system. Nothing
//! in here affects layout.

use crate::math::Vector2I;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum MouseButton {
    #[default]
    Left,
    Middle,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum MouseEventType {
    /// Pointer entered the element's bounds.
    MouseOver,
    /// Pointer left the element's bounds.
    MouseOut,
    MouseDown,
    MouseUp,
    MouseDoubleClick,
    MouseMove,
    MouseWheelScroll,
    MouseDrag,
    MouseDragStart,
    MouseDragEnd,
}

/// One pointer event, in the coordinate space of the positioned tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseEvent {
    pub event_type: MouseEventType,
    pub position: Vector2I,
    pub button: MouseButton,
    /// Pointer movement since the last drag event; zero otherwise.
    pub drag_amount: Vector2I,
    /// Wheel delta in scroll steps; zero for non-wheel events.
    pub wheel_scroll_amount: f32,
    pub shift: bool,
    pub control: bool,
    pub alt: bool,
}

impl MouseEvent {
    pub fn new(event_type: MouseEventType, position: Vector2I) -> Self {
        Self {
            event_type,
            position,
            button: MouseButton::Left,
            drag_amount: Vector2I::ZERO,
            wheel_scroll_amount: 0.0,
            shift: false,
            control: false,
            alt: false,
        }
    }
}

/// One character of text input, routed to the focused element by the
/// embedding widget system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextInputEvent {
    pub input: char,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn mouse_event_defaults() {
        let event = MouseEvent::new(MouseEventType::MouseDown, Vector2I::new(10, 20));
        assert_eq!(event.button, MouseButton::Left);
        assert_eq!(event.drag_amount, Vector2I::ZERO);
        assert_eq!(event.wheel_scroll_amount, 0.0);
        assert!(!event.shift && !event.control && !event.alt);
    }
}
