//! Box - Rectangle regions
//!
//! Pixel-aligned rectangles used as glyph bounding boxes.

use crate::point::Point;

/// A rectangle region
///
/// A simple Copy type; `w` and `h` count pixels, so a single pixel has a
/// 1x1 box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Box {
    /// Left x coordinate
    pub x: u32,
    /// Top y coordinate
    pub y: u32,
    /// Width
    pub w: u32,
    /// Height
    pub h: u32,
}

impl Box {
    /// Create a box without validation
    pub const fn new_unchecked(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// Smallest box enclosing every point, or `None` for no points.
    ///
    /// Single pass over the points tracking min/max x and y.
    pub fn enclosing<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let (mut left, mut right, mut top, mut bottom) = (first.x, first.x, first.y, first.y);
        for p in iter {
            left = left.min(p.x);
            right = right.max(p.x);
            top = top.min(p.y);
            bottom = bottom.max(p.y);
        }
        Some(Self {
            x: left,
            y: top,
            w: right - left + 1,
            h: bottom - top + 1,
        })
    }

    /// Rightmost column inside the box (inclusive)
    #[inline]
    pub fn right(&self) -> u32 {
        self.x + self.w - 1
    }

    /// Bottom row inside the box (inclusive)
    #[inline]
    pub fn bottom(&self) -> u32 {
        self.y + self.h - 1
    }

    /// Midpoint of the box, rounded down: `((left + right) / 2, (top + bottom) / 2)`.
    #[inline]
    pub fn midpoint(&self) -> Point {
        Point::new(
            (self.x + self.right()) / 2,
            (self.y + self.bottom()) / 2,
        )
    }
}
