//! Pixel access functions
//!
//! Functions for getting and setting individual pixels and filling
//! rectangles.

use super::{Pix, PixMut};
use crate::box_::Box;
use crate::color;
use crate::error::{Error, Result};

impl Pix {
    /// Get a pixel value at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        self.inner.index(x, y).map(|i| self.inner.data[i])
    }

    /// Get RGB values at (x, y).
    pub fn get_rgb(&self, x: u32, y: u32) -> Option<(u8, u8, u8)> {
        self.get_pixel(x, y).map(color::extract_rgb)
    }

    /// Get RGBA values at (x, y).
    pub fn get_rgba(&self, x: u32, y: u32) -> Option<(u8, u8, u8, u8)> {
        self.get_pixel(x, y).map(color::extract_rgba)
    }
}

impl PixMut {
    /// Get a pixel value at (x, y).
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        self.inner.index(x, y).map(|i| self.inner.data[i])
    }

    /// Set a pixel value at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::PixelOutOfBounds`] if coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, val: u32) -> Result<()> {
        let i = self.inner.index(x, y).ok_or(Error::PixelOutOfBounds {
            x,
            y,
            width: self.inner.width,
            height: self.inner.height,
        })?;
        self.inner.data[i] = val;
        Ok(())
    }

    /// Set an opaque RGB pixel at (x, y).
    pub fn set_rgb(&mut self, x: u32, y: u32, r: u8, g: u8, b: u8) -> Result<()> {
        self.set_pixel(x, y, color::compose_rgb(r, g, b))
    }

    /// Set an RGBA pixel at (x, y).
    pub fn set_rgba(&mut self, x: u32, y: u32, r: u8, g: u8, b: u8, a: u8) -> Result<()> {
        self.set_pixel(x, y, color::compose_rgba(r, g, b, a))
    }

    /// Fill a rectangle with `val`, clipped to the image.
    ///
    /// Returns the number of pixels written.
    pub fn fill_box(&mut self, b: &Box, val: u32) -> usize {
        let mut written = 0;
        let x_end = b.x.saturating_add(b.w).min(self.inner.width);
        let y_end = b.y.saturating_add(b.h).min(self.inner.height);
        for y in b.y..y_end {
            for x in b.x..x_end {
                if let Some(i) = self.inner.index(x, y) {
                    self.inner.data[i] = val;
                    written += 1;
                }
            }
        }
        written
    }
}
