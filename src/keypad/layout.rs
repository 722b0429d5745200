//! Keypad geometry.
//!
//! The window is split into equal blocks: two block rows at the top hold the
//! display desk, the remaining rows hold one button per block. Buttons are
//! inset by the separator line width so a line of background shows between
//! them.

use crate::calculator::{Key, MemoryKey, Operator};
use thiserror::Error;

pub const COLUMNS: usize = 5;
pub const ROWS: usize = 5;

/// Block rows reserved for the display desk.
const DESK_ROWS: i32 = 2;

/// Keys in keypad order, top row first.
pub const GRID: [[Key; COLUMNS]; ROWS] = [
    [
        Key::Clear,
        Key::Memory(MemoryKey::Clear),
        Key::Memory(MemoryKey::Add),
        Key::Memory(MemoryKey::Subtract),
        Key::Backspace,
    ],
    [
        Key::Digit(7),
        Key::Digit(8),
        Key::Digit(9),
        Key::OpenParen,
        Key::CloseParen,
    ],
    [
        Key::Digit(4),
        Key::Digit(5),
        Key::Digit(6),
        Key::Operator(Operator::Pow),
        Key::Sqrt,
    ],
    [
        Key::Digit(1),
        Key::Digit(2),
        Key::Digit(3),
        Key::Operator(Operator::Mul),
        Key::Operator(Operator::Div),
    ],
    [
        Key::Evaluate,
        Key::Digit(0),
        Key::Point,
        Key::Operator(Operator::Add),
        Key::Operator(Operator::Sub),
    ],
];

/// A pointer position in window coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// Containment, inclusive of all four edges.
    pub fn contains(&self, point: Point) -> bool {
        (self.x..=self.x + self.width).contains(&point.x)
            && (self.y..=self.y + self.height).contains(&point.y)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("window {width}x{height} is too small for the keypad")]
    TooSmall { width: u32, height: u32 },

    #[error("separator line width must be at least 1 pixel")]
    NoSeparator,
}

/// Computed positions of the desk and every button.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    width: i32,
    height: i32,
    desk: Rect,
    buttons: Vec<(Key, Rect)>,
}

impl Layout {
    /// Lay out the keypad for a window of the requested size.
    ///
    /// The window snaps down to a whole number of blocks; see
    /// [`Layout::window_size`].
    pub fn new(width: u32, height: u32, line: u32) -> Result<Self, LayoutError> {
        if line == 0 {
            return Err(LayoutError::NoSeparator);
        }

        let too_small = LayoutError::TooSmall { width, height };
        let w = i32::try_from(width).map_err(|_| too_small.clone())?;
        let h = i32::try_from(height).map_err(|_| too_small.clone())?;
        let line = i32::try_from(line).map_err(|_| too_small.clone())?;

        let block_w = (w - line) / COLUMNS as i32;
        let block_h = (h - line) / (ROWS as i32 + DESK_ROWS);
        if block_w <= line || block_h <= line {
            return Err(too_small);
        }

        let desk = Rect {
            x: line,
            y: line,
            width: w - 2 * line,
            height: block_h * DESK_ROWS - line,
        };

        let top = desk.height + 2 * line;
        let mut buttons = Vec::with_capacity(ROWS * COLUMNS);
        for (r, row) in GRID.iter().enumerate() {
            for (c, &key) in row.iter().enumerate() {
                let rect = Rect {
                    x: line + c as i32 * block_w,
                    y: top + r as i32 * block_h,
                    width: block_w - line,
                    height: block_h - line,
                };
                buttons.push((key, rect));
            }
        }

        Ok(Self {
            width: block_w * COLUMNS as i32 + line,
            height: block_h * (ROWS as i32 + DESK_ROWS) + line,
            desk,
            buttons,
        })
    }

    /// The window size actually used, snapped to whole blocks.
    pub fn window_size(&self) -> (u32, u32) {
        (self.width.unsigned_abs(), self.height.unsigned_abs())
    }

    /// Area where the expression and result line are drawn.
    pub fn desk(&self) -> Rect {
        self.desk
    }

    /// Every button with its rectangle, row by row.
    pub fn buttons(&self) -> &[(Key, Rect)] {
        &self.buttons
    }

    /// The key whose button contains `point`.
    pub fn key_at(&self, point: Point) -> Option<Key> {
        self.buttons
            .iter()
            .find(|(_, rect)| rect.contains(point))
            .map(|&(key, _)| key)
    }

    /// The rectangle of the button for `key`.
    pub fn rect_of(&self, key: Key) -> Option<Rect> {
        self.buttons
            .iter()
            .find(|(k, _)| *k == key)
            .map(|&(_, rect)| rect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_window_geometry() {
        let layout = Layout::new(350, 450, 1).unwrap();
        // 349 / 5 = 69 wide blocks, 449 / 7 = 64 tall blocks.
        assert_eq!(layout.window_size(), (346, 449));
        assert_eq!(
            layout.desk(),
            Rect {
                x: 1,
                y: 1,
                width: 348,
                height: 127
            }
        );
        assert_eq!(
            layout.rect_of(Key::Clear),
            Some(Rect {
                x: 1,
                y: 129,
                width: 68,
                height: 63
            })
        );
        assert_eq!(
            layout.rect_of(Key::Operator(Operator::Sub)),
            Some(Rect {
                x: 277,
                y: 385,
                width: 68,
                height: 63
            })
        );
    }

    #[test]
    fn test_every_key_has_a_button() {
        let layout = Layout::new(350, 450, 1).unwrap();
        assert_eq!(layout.buttons().len(), 25);
        for d in 0..=9 {
            assert!(layout.rect_of(Key::Digit(d)).is_some());
        }
    }

    #[test]
    fn test_hit_testing() {
        let layout = Layout::new(350, 450, 1).unwrap();
        assert_eq!(layout.key_at(Point::new(1, 129)), Some(Key::Clear));
        assert_eq!(layout.key_at(Point::new(69, 192)), Some(Key::Clear));
        assert_eq!(
            layout.key_at(Point::new(70, 150)),
            Some(Key::Memory(MemoryKey::Clear))
        );
        // The desk holds no buttons.
        assert_eq!(layout.key_at(Point::new(100, 50)), None);
    }

    #[test]
    fn test_wide_separator_is_dead_space() {
        let layout = Layout::new(350, 450, 4).unwrap();
        let clear = layout.rect_of(Key::Clear).unwrap();
        let gap = Point::new(clear.x + clear.width + 1, clear.y + 1);
        assert_eq!(layout.key_at(gap), None);
    }

    #[test]
    fn test_too_small() {
        assert_eq!(
            Layout::new(10, 10, 1),
            Err(LayoutError::TooSmall {
                width: 10,
                height: 10
            })
        );
        assert_eq!(Layout::new(350, 450, 0), Err(LayoutError::NoSeparator));
    }
}
