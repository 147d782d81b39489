//! PIX - The main image container
//!
//! `Pix` holds a decoded captcha raster. Every pixel is one packed 32-bit
//! word in `0xRRGGBBAA` order (see [`crate::color`]), stored row-major.
//!
//! # Ownership model
//!
//! `Pix` uses `Arc` for efficient cloning (shared ownership), so a decoded
//! image can be handed to several recognition threads without copying.
//! To modify pixel data, convert to `PixMut` via [`Pix::try_into_mut`]
//! or [`Pix::to_mut`], then convert back with `Into<Pix>`.

mod access;

use crate::error::{Error, Result};
use std::sync::Arc;

/// Image file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageFormat {
    /// Unknown format
    #[default]
    Unknown,
    /// PNG format
    Png,
    /// JFIF JPEG format
    Jpeg,
}

impl ImageFormat {
    /// Get the file extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Unknown => "dat",
            Self::Png => "png",
            Self::Jpeg => "jpg",
        }
    }
}

/// Internal PIX data
#[derive(Debug, Clone, PartialEq, Eq)]
struct PixData {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Input file format
    informat: ImageFormat,
    /// Packed RGBA pixels, row-major
    data: Vec<u32>,
}

impl PixData {
    #[inline]
    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }
}

/// PIX - Main image container
///
/// # Examples
///
/// ```
/// use casocr_core::Pix;
///
/// let pix = Pix::new(90, 32).unwrap();
/// assert_eq!(pix.width(), 90);
/// assert_eq!(pix.height(), 32);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pix {
    inner: Arc<PixData>,
}

impl Pix {
    /// Create a new PIX with the specified dimensions.
    ///
    /// The image data is initialized to zero (transparent black).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::new_filled(width, height, 0)
    }

    /// Create a new PIX with every pixel set to `pixel`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new_filled(width: u32, height: u32, pixel: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let size = width as usize * height as usize;
        Ok(Self::from_inner(PixData {
            width,
            height,
            informat: ImageFormat::Unknown,
            data: vec![pixel; size],
        }))
    }

    /// Create a PIX from a row-major raster of packed RGBA pixels.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] for a zero dimension and
    /// [`Error::RasterSizeMismatch`] if `data.len() != width * height`.
    pub fn from_raster(width: u32, height: u32, data: Vec<u32>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(Error::RasterSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self::from_inner(PixData {
            width,
            height,
            informat: ImageFormat::Unknown,
            data,
        }))
    }

    fn from_inner(inner: PixData) -> Self {
        Pix {
            inner: Arc::new(inner),
        }
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the input file format.
    #[inline]
    pub fn informat(&self) -> ImageFormat {
        self.inner.informat
    }

    /// Get raw access to the image data.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// Get one row of pixels.
    ///
    /// Returns `None` if `y` is out of bounds.
    pub fn row(&self, y: u32) -> Option<&[u32]> {
        if y >= self.inner.height {
            return None;
        }
        let w = self.inner.width as usize;
        let start = y as usize * w;
        Some(&self.inner.data[start..start + w])
    }

    /// Get the number of strong references to this PIX.
    #[inline]
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Try to take exclusive ownership of the pixel data.
    ///
    /// Fails (returning `self`) when other clones are alive.
    pub fn try_into_mut(self) -> std::result::Result<PixMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(PixMut { inner: data }),
            Err(arc) => Err(Pix { inner: arc }),
        }
    }

    /// Create a mutable copy of this PIX.
    ///
    /// Always creates a new copy that can be modified.
    pub fn to_mut(&self) -> PixMut {
        PixMut {
            inner: (*self.inner).clone(),
        }
    }
}

/// Mutable PIX
///
/// Exclusive owner of a raster under construction.
#[derive(Debug)]
pub struct PixMut {
    inner: PixData,
}

impl PixMut {
    /// Create a new `PixMut` with every pixel set to `pixel`.
    pub fn new_filled(width: u32, height: u32, pixel: u32) -> Result<Self> {
        Ok(Pix::new_filled(width, height, pixel)?.to_mut())
    }

    /// Get the image width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the input file format.
    #[inline]
    pub fn informat(&self) -> ImageFormat {
        self.inner.informat
    }

    /// Record the format the raster was decoded from.
    #[inline]
    pub fn set_informat(&mut self, format: ImageFormat) {
        self.inner.informat = format;
    }

    /// Get raw access to the image data.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// Get mutable access to the image data.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u32] {
        &mut self.inner.data
    }
}

impl From<PixMut> for Pix {
    fn from(pix_mut: PixMut) -> Self {
        Pix::from_inner(pix_mut.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pix_creation() {
        let pix = Pix::new(100, 50).unwrap();
        assert_eq!(pix.width(), 100);
        assert_eq!(pix.height(), 50);
        assert_eq!(pix.data().len(), 5000);
        assert!(pix.data().iter().all(|&p| p == 0));
        assert_eq!(pix.informat(), ImageFormat::Unknown);
    }

    #[test]
    fn test_invalid_dimensions() {
        assert!(Pix::new(0, 100).is_err());
        assert!(Pix::new(100, 0).is_err());
    }

    #[test]
    fn test_from_raster_size_check() {
        assert!(Pix::from_raster(2, 2, vec![0; 4]).is_ok());
        assert!(matches!(
            Pix::from_raster(2, 2, vec![0; 3]),
            Err(Error::RasterSizeMismatch {
                expected: 4,
                actual: 3
            })
        ));
    }

    #[test]
    fn test_row_access() {
        let pix = Pix::from_raster(3, 2, vec![1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(pix.row(1), Some(&[4, 5, 6][..]));
        assert!(pix.row(2).is_none());
    }

    #[test]
    fn test_clone_shares_data() {
        let pix1 = Pix::new(10, 10).unwrap();
        let pix2 = pix1.clone();
        assert_eq!(pix1.ref_count(), 2);
        assert_eq!(pix2.ref_count(), 2);
        // A shared pix cannot be mutated in place
        let pix1 = pix1.try_into_mut().unwrap_err();
        drop(pix2);
        assert!(pix1.try_into_mut().is_ok());
    }

    #[test]
    fn test_to_mut_round_trip() {
        let pix = Pix::new_filled(4, 4, 0xffff_ffff).unwrap();
        let mut pm = pix.to_mut();
        pm.data_mut()[0] = 0x0000_00ff;
        pm.set_informat(ImageFormat::Png);
        let edited: Pix = pm.into();
        assert_eq!(edited.data()[0], 0x0000_00ff);
        assert_eq!(edited.informat(), ImageFormat::Png);
        // original untouched
        assert_eq!(pix.data()[0], 0xffff_ffff);
    }
}
