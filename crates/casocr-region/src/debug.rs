//! Debug rendering of ink classification

use crate::ink::InkBand;
use casocr_core::{Pix, color};

/// Color painted over ink pixels by [`render_ink`]
pub const HIGHLIGHT: u32 = 0xff00_00ff;

/// Copy of `pix` with every ink pixel painted [`HIGHLIGHT`].
///
/// Non-ink pixels keep their original color, made opaque.
pub fn render_ink(pix: &Pix, band: &InkBand) -> Pix {
    let mut out = pix.to_mut();
    for p in out.data_mut() {
        *p = if band.is_ink(*p) {
            HIGHLIGHT
        } else {
            color::opaque(*p)
        };
    }
    out.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use casocr_core::color::compose_rgba;

    #[test]
    fn test_render_ink() {
        let pix = Pix::from_raster(
            3,
            1,
            vec![
                compose_rgba(255, 255, 255, 255),
                compose_rgba(0, 0, 200, 255),
                compose_rgba(0, 0, 0, 10),
            ],
        )
        .unwrap();
        let out = render_ink(&pix, &InkBand::default());
        assert_eq!(out.width(), 3);
        assert_eq!(out.get_pixel(0, 0), Some(compose_rgba(255, 255, 255, 255)));
        assert_eq!(out.get_pixel(1, 0), Some(HIGHLIGHT));
        assert_eq!(out.get_pixel(2, 0), Some(compose_rgba(0, 0, 0, 255)));
        // Source untouched
        assert_eq!(pix.get_pixel(1, 0), Some(compose_rgba(0, 0, 200, 255)));
    }

    #[test]
    fn test_highlight_is_red() {
        assert_eq!(color::extract_rgba(HIGHLIGHT), (255, 0, 0, 255));
    }
}
