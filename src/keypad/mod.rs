//! Headless keypad: button geometry and pointer tracking.
//!
//! Turns raw pointer events into key activations. A key fires once per
//! press-and-release that starts and ends on its button without the pointer
//! leaving it in between. Rendering is left to the host.

mod button;
mod layout;

pub use button::{Button, Visual};
pub use layout::{COLUMNS, GRID, Layout, LayoutError, Point, ROWS, Rect};

use crate::calculator::Key;
use tracing::debug;

/// Position used when the window loses pointer focus.
const OUTSIDE: Point = Point { x: -1000, y: -1000 };

/// All buttons of the keypad and the last known pointer position.
#[derive(Clone, Debug)]
pub struct Keypad {
    layout: Layout,
    buttons: Vec<Button>,
    line: u32,
    pointer: Point,
}

impl Keypad {
    pub fn new(width: u32, height: u32, line: u32) -> Result<Self, LayoutError> {
        let layout = Layout::new(width, height, line)?;
        let buttons = build_buttons(&layout);
        Ok(Self {
            layout,
            buttons,
            line,
            pointer: OUTSIDE,
        })
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    /// Rebuild the geometry for a new window size.
    ///
    /// Presses in progress are dropped; hover follows the last pointer
    /// position.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), LayoutError> {
        self.layout = Layout::new(width, height, self.line)?;
        self.buttons = build_buttons(&self.layout);
        let pointer = self.pointer;
        self.pointer_moved(pointer);
        debug!(width, height, snapped = ?self.layout.window_size(), "keypad resized");
        Ok(())
    }

    pub fn pointer_moved(&mut self, point: Point) {
        self.pointer = point;
        for button in &mut self.buttons {
            button.pointer_moved(point);
        }
    }

    pub fn pointer_down(&mut self) {
        for button in &mut self.buttons {
            button.pointer_down();
        }
    }

    /// Release the pointer, returning the key that was activated, if any.
    pub fn pointer_up(&mut self) -> Option<Key> {
        let mut activated = None;
        for button in &mut self.buttons {
            if button.pointer_up() && activated.is_none() {
                activated = Some(button.key());
            }
        }
        if let Some(key) = activated {
            debug!(%key, "button activated");
        }
        activated
    }

    /// The pointer left the window.
    pub fn pointer_left(&mut self) {
        self.pointer_moved(OUTSIDE);
    }

    /// A complete press-and-release at one position.
    pub fn tap(&mut self, point: Point) -> Option<Key> {
        self.pointer_moved(point);
        self.pointer_down();
        self.pointer_up()
    }
}

fn build_buttons(layout: &Layout) -> Vec<Button> {
    layout
        .buttons()
        .iter()
        .map(|&(key, rect)| Button::new(key, rect))
        .collect()
}
