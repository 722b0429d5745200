//! Press tracking for a single button.

use super::layout::{Point, Rect};
use crate::calculator::Key;

/// How a button should be drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visual {
    Idle,
    /// The pointer is over the button.
    Hovered,
    /// A press started on the button and the pointer is still inside.
    Pressed,
}

/// One keypad button and its pointer state.
#[derive(Clone, Debug)]
pub struct Button {
    key: Key,
    rect: Rect,
    focused: bool,
    touched: bool,
}

impl Button {
    pub fn new(key: Key, rect: Rect) -> Self {
        Self {
            key,
            rect,
            focused: false,
            touched: false,
        }
    }

    pub fn key(&self) -> Key {
        self.key
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn visual(&self) -> Visual {
        match (self.focused, self.touched) {
            (true, true) => Visual::Pressed,
            (true, false) => Visual::Hovered,
            (false, _) => Visual::Idle,
        }
    }

    /// Track the pointer. Leaving the button cancels a press in progress.
    pub fn pointer_moved(&mut self, point: Point) {
        self.focused = self.rect.contains(point);
        if !self.focused {
            self.touched = false;
        }
    }

    pub fn pointer_down(&mut self) {
        if self.focused {
            self.touched = true;
        }
    }

    /// Release the pointer. Returns `true` when this completes a press.
    pub fn pointer_up(&mut self) -> bool {
        let activated = self.touched && self.focused;
        self.touched = false;
        activated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn button() -> Button {
        Button::new(
            Key::Digit(5),
            Rect {
                x: 10,
                y: 10,
                width: 20,
                height: 20,
            },
        )
    }

    #[test]
    fn test_press_inside_fires_once() {
        let mut b = button();
        b.pointer_moved(Point::new(15, 15));
        assert_eq!(b.visual(), Visual::Hovered);
        b.pointer_down();
        assert_eq!(b.visual(), Visual::Pressed);
        assert!(b.pointer_up());
        assert!(!b.pointer_up());
        assert_eq!(b.visual(), Visual::Hovered);
    }

    #[test]
    fn test_press_then_leave_does_not_fire() {
        let mut b = button();
        b.pointer_moved(Point::new(15, 15));
        b.pointer_down();
        b.pointer_moved(Point::new(50, 50));
        assert_eq!(b.visual(), Visual::Idle);
        b.pointer_moved(Point::new(15, 15));
        assert!(!b.pointer_up());
    }

    #[test]
    fn test_press_outside_then_enter_does_not_fire() {
        let mut b = button();
        b.pointer_moved(Point::new(50, 50));
        b.pointer_down();
        b.pointer_moved(Point::new(15, 15));
        assert!(!b.pointer_up());
    }
}
