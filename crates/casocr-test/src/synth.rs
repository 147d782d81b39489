//! Synthetic captcha generation
//!
//! Captchas are assembled from small glyph bitmaps drawn in an ink color on
//! a white background, optionally overlaid with the pure-black anti-OCR
//! lines and the isolated ink specks found on real captchas. Both kinds of
//! clutter must be ignored by segmentation: black falls outside the ink band
//! and specks stay under the noise floor.

use crate::error::{TestError, TestResult};
use casocr_core::{Box, Pix, PixMut};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Stroke color used for glyphs: RGB (0, 0, 200)
pub const INK: u32 = 0x0000_c8ff;

/// Background color: opaque white
pub const BACKGROUND: u32 = 0xffff_ffff;

/// Anti-OCR line color: opaque black
pub const CLUTTER: u32 = 0x0000_00ff;

/// Horizontal pitch used by [`SyntheticCaptcha::row`]
pub const PITCH: u32 = 10;

/// Left margin used by [`SyntheticCaptcha::row`]
pub const MARGIN: u32 = 2;

/// Top of glyphs placed by [`SyntheticCaptcha::row`]
pub const BASELINE_TOP: u32 = 3;

/// A binary glyph bitmap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyph {
    width: u32,
    height: u32,
    cells: Vec<bool>,
}

impl Glyph {
    /// Build a glyph from text rows; `#` marks ink, anything else is blank.
    pub fn from_rows(rows: &[&str]) -> TestResult<Self> {
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |r| r.chars().count()) as u32;
        if width == 0 || height == 0 {
            return Err(TestError::InvalidGlyph("empty bitmap".to_string()));
        }
        let mut cells = Vec::with_capacity((width * height) as usize);
        for (i, row) in rows.iter().enumerate() {
            if row.chars().count() as u32 != width {
                return Err(TestError::InvalidGlyph(format!(
                    "row {} has {} columns, expected {}",
                    i,
                    row.chars().count(),
                    width
                )));
            }
            cells.extend(row.chars().map(|c| c == '#'));
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Solid rectangle
    pub fn block(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![true; (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether the cell at `(x, y)` is ink
    pub fn is_set(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height && self.cells[(y * self.width + x) as usize]
    }

    /// Number of ink cells
    pub fn ink_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }
}

/// Reference glyphs, each 20 pixels with a distinct quadrant histogram.
pub mod glyphs {
    use super::Glyph;

    /// 4x5 solid block; histogram `[6, 6, 4, 4]`
    pub fn block() -> Glyph {
        Glyph::block(4, 5)
    }

    /// 6x6 top-left corner; histogram `[8, 6, 6, 0]`
    pub fn corner_top_left() -> Glyph {
        Glyph {
            width: 6,
            height: 6,
            cells: (0..36).map(|i| i / 6 < 2 || i % 6 < 2).collect(),
        }
    }

    /// 6x6 bottom-right corner; histogram `[0, 6, 6, 8]`
    pub fn corner_bottom_right() -> Glyph {
        Glyph {
            width: 6,
            height: 6,
            cells: (0..36).map(|i| i / 6 >= 4 || i % 6 >= 4).collect(),
        }
    }

    /// 2x10 vertical bar; histogram `[5, 5, 5, 5]`
    pub fn bar() -> Glyph {
        Glyph::block(2, 10)
    }

    /// The four reference glyphs in the order above
    pub fn all() -> [Glyph; 4] {
        [block(), corner_top_left(), corner_bottom_right(), bar()]
    }
}

#[derive(Debug, Clone)]
struct Placement {
    glyph: Glyph,
    x: u32,
    y: u32,
}

/// Builder for a synthetic captcha image.
#[derive(Debug, Clone)]
pub struct SyntheticCaptcha {
    width: u32,
    height: u32,
    ink: u32,
    placements: Vec<Placement>,
    lines: Vec<u32>,
    specks: usize,
    seed: u64,
}

impl SyntheticCaptcha {
    /// Blank canvas
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ink: INK,
            placements: Vec::new(),
            lines: Vec::new(),
            specks: 0,
            seed: 0,
        }
    }

    /// Canvas sized for `glyphs` laid out left to right at [`PITCH`] spacing.
    pub fn row(glyphs: &[Glyph]) -> Self {
        let width = MARGIN * 2 + PITCH * glyphs.len().max(1) as u32;
        let mut captcha = Self::new(width, 16);
        for (i, g) in glyphs.iter().enumerate() {
            captcha = captcha.glyph(g, MARGIN + PITCH * i as u32, BASELINE_TOP);
        }
        captcha
    }

    /// Place a glyph with its top-left corner at `(x, y)`.
    pub fn glyph(mut self, glyph: &Glyph, x: u32, y: u32) -> Self {
        self.placements.push(Placement {
            glyph: glyph.clone(),
            x,
            y,
        });
        self
    }

    /// Set the stroke color.
    pub fn with_ink(mut self, ink: u32) -> Self {
        self.ink = ink;
        self
    }

    /// Draw a full-width black line on row `y`; rows outside the image are ignored.
    pub fn with_line(mut self, y: u32) -> Self {
        self.lines.push(y);
        self
    }

    /// Scatter up to `count` single ink pixels on the bottom row.
    ///
    /// Positions come from a `StdRng` seeded with `seed`, so the output is
    /// reproducible.
    pub fn with_specks(mut self, count: usize, seed: u64) -> Self {
        self.specks = count;
        self.seed = seed;
        self
    }

    /// Rasterize the captcha.
    pub fn render(&self) -> TestResult<Pix> {
        let mut pm = PixMut::new_filled(self.width, self.height, BACKGROUND)?;

        for &y in &self.lines {
            pm.fill_box(&Box::new_unchecked(0, y, self.width, 1), CLUTTER);
        }

        for p in &self.placements {
            for gy in 0..p.glyph.height() {
                for gx in 0..p.glyph.width() {
                    if p.glyph.is_set(gx, gy) {
                        pm.set_pixel(p.x + gx, p.y + gy, self.ink)?;
                    }
                }
            }
        }

        if self.specks > 0 {
            let mut rng = StdRng::seed_from_u64(self.seed);
            let y = self.height - 1;
            for _ in 0..self.specks {
                let x = rng.gen_range(0..self.width);
                pm.set_pixel(x, y, self.ink)?;
            }
        }

        Ok(pm.into())
    }
}
