//! JPEG image format support
//!
//! Reads JPEG images using the `jpeg-decoder` crate. The login portal
//! serves its captchas as JPEG, so this is the usual input path.
//!
//! **Note:** JPEG *writing* is not supported because `jpeg-decoder`
//! is decode-only; debug output and saved samples use PNG.

use crate::{IoError, IoResult};
use casocr_core::{ImageFormat, Pix, color};
use jpeg_decoder::{Decoder, PixelFormat};
use std::io::Read;

/// Read a JPEG image from a reader.
///
/// Grayscale, 16-bit grayscale, RGB and CMYK inputs are all converted
/// to opaque packed RGBA.
pub fn read_jpeg<R: Read>(reader: R) -> IoResult<Pix> {
    let mut decoder = Decoder::new(reader);
    let data = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(format!("JPEG decode error: {}", e)))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("JPEG header missing".to_string()))?;

    let width = u32::from(info.width);
    let height = u32::from(info.height);
    let npixels = width as usize * height as usize;

    let bytes_per_pixel = match info.pixel_format {
        PixelFormat::L8 => 1,
        PixelFormat::L16 => 2,
        PixelFormat::RGB24 => 3,
        PixelFormat::CMYK32 => 4,
    };
    if data.len() < npixels * bytes_per_pixel {
        return Err(IoError::InvalidData(format!(
            "JPEG data too short: {} bytes for {}x{}",
            data.len(),
            width,
            height
        )));
    }

    let raster: Vec<u32> = data
        .chunks_exact(bytes_per_pixel)
        .take(npixels)
        .map(|px| match info.pixel_format {
            PixelFormat::L8 => color::compose_rgb(px[0], px[0], px[0]),
            PixelFormat::L16 => {
                let v = (u16::from_ne_bytes([px[0], px[1]]) >> 8) as u8;
                color::compose_rgb(v, v, v)
            }
            PixelFormat::RGB24 => color::compose_rgb(px[0], px[1], px[2]),
            PixelFormat::CMYK32 => {
                let k = 255 - u32::from(px[3]);
                let channel = |c: u8| ((255 - u32::from(c)) * k / 255) as u8;
                color::compose_rgb(channel(px[0]), channel(px[1]), channel(px[2]))
            }
        })
        .collect();

    let mut pix_mut = Pix::from_raster(width, height, raster)?.to_mut();
    pix_mut.set_informat(ImageFormat::Jpeg);
    Ok(pix_mut.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_jpeg_garbage() {
        let data = [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x00, 0x00];
        assert!(read_jpeg(Cursor::new(data)).is_err());
    }

    #[test]
    fn test_jpeg_empty() {
        assert!(read_jpeg(Cursor::new(Vec::<u8>::new())).is_err());
    }
}
