//! casocr-io - Image I/O for casocr
//!
//! Decodes captcha images into [`Pix`] and writes PNG output.
//!
//! - **PNG**: read and write (feature `png-format`)
//! - **JPEG**: read only (feature `jpeg`)
//!
//! Formats are detected from magic bytes, not file extensions.

mod error;
pub mod format;
#[cfg(feature = "jpeg")]
pub mod jpeg;
#[cfg(feature = "png-format")]
pub mod png;

pub use casocr_core::ImageFormat;
pub use error::{IoError, IoResult};
pub use format::{detect_format, detect_format_from_bytes};

use casocr_core::Pix;
use std::fs::File;
use std::io::{BufWriter, Cursor, Write};
use std::path::Path;

/// Read an image from a file path.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Pix> {
    let data = std::fs::read(path)?;
    read_image_mem(&data)
}

/// Read an image from an in-memory buffer.
pub fn read_image_mem(data: &[u8]) -> IoResult<Pix> {
    match detect_format_from_bytes(data)? {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::read_png(Cursor::new(data)),
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::read_jpeg(Cursor::new(data)),
        other => Err(IoError::UnsupportedFormat(format!(
            "{:?} reading is not enabled",
            other
        ))),
    }
}

/// Encode an image into a writer.
pub fn write_image_to<W: Write>(pix: &Pix, writer: W, format: ImageFormat) -> IoResult<()> {
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::write_png(pix, writer),
        other => {
            let _ = writer;
            Err(IoError::UnsupportedFormat(format!(
                "{:?} writing is not supported",
                other
            )))
        }
    }
}

/// Encode an image into a byte vector.
pub fn write_image_mem(pix: &Pix, format: ImageFormat) -> IoResult<Vec<u8>> {
    let mut buf = Vec::new();
    write_image_to(pix, &mut buf, format)?;
    Ok(buf)
}

/// Write an image to a file path.
pub fn write_image<P: AsRef<Path>>(pix: &Pix, path: P, format: ImageFormat) -> IoResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_image_to(pix, &mut writer, format)?;
    writer.flush()?;
    Ok(())
}

#[cfg(all(test, feature = "png-format"))]
mod tests {
    use super::*;
    use casocr_core::{PixMut, color};

    fn sample() -> Pix {
        let mut pm = PixMut::new_filled(6, 3, color::compose_rgb(255, 255, 255)).unwrap();
        pm.set_rgb(2, 1, 0, 0, 200).unwrap();
        pm.into()
    }

    #[test]
    fn test_mem_roundtrip() {
        let pix = sample();
        let bytes = write_image_mem(&pix, ImageFormat::Png).unwrap();
        assert_eq!(detect_format_from_bytes(&bytes).unwrap(), ImageFormat::Png);
        let back = read_image_mem(&bytes).unwrap();
        assert_eq!(back.data(), pix.data());
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("captcha.png");
        let pix = sample();
        write_image(&pix, &path, ImageFormat::Png).unwrap();
        assert_eq!(detect_format(&path).unwrap(), ImageFormat::Png);
        let back = read_image(&path).unwrap();
        assert_eq!(back.get_rgb(2, 1), Some((0, 0, 200)));
    }

    #[test]
    fn test_write_jpeg_unsupported() {
        assert!(matches!(
            write_image_mem(&sample(), ImageFormat::Jpeg),
            Err(IoError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_read_missing_file() {
        assert!(matches!(
            read_image("/nonexistent/captcha.jpg"),
            Err(IoError::Io(_))
        ));
    }
}
