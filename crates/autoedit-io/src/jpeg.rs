//! JPEG image format support
//!
//! Decoding uses the `jpeg-decoder` crate and encoding the `jpeg-encoder`
//! crate. Gray JPEGs decode to `Gray8`; RGB and CMYK JPEGs decode to
//! `Rgb32`.

use crate::{IoError, IoResult};
use autoedit_core::{PixelLayout, Raster};
use jpeg_decoder::PixelFormat;
use std::io::{Read, Write};

/// Quality used by [`crate::write_image`] for JPEG output.
pub const DEFAULT_QUALITY: u8 = 90;

/// Read a JPEG image from a reader.
///
/// 16-bit grayscale JPEGs are rejected with `UnsupportedFormat`.
pub fn read_jpeg<R: Read>(reader: R) -> IoResult<Raster> {
    let mut decoder = jpeg_decoder::Decoder::new(reader);
    let pixels = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(format!("JPEG decode error: {}", e)))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("JPEG header missing".to_string()))?;

    let width = info.width as u32;
    let height = info.height as u32;
    let n = width as usize * height as usize;

    let raster = match info.pixel_format {
        PixelFormat::L8 => {
            Raster::from_interleaved(width, height, 1, &pixels, PixelLayout::Rgb32)?
        }
        PixelFormat::RGB24 => {
            Raster::from_interleaved(width, height, 3, &pixels, PixelLayout::Rgb32)?
        }
        PixelFormat::CMYK32 => {
            if pixels.len() != n * 4 {
                return Err(IoError::InvalidData(format!(
                    "CMYK buffer holds {} bytes, expected {}",
                    pixels.len(),
                    n * 4
                )));
            }
            let mut rgb = Vec::with_capacity(n * 3);
            for px in pixels.chunks_exact(4) {
                let k = 255 - px[3] as u32;
                for &c in &px[..3] {
                    rgb.push(((255 - c as u32) * k / 255) as u8);
                }
            }
            Raster::from_interleaved(width, height, 3, &rgb, PixelLayout::Rgb32)?
        }
        PixelFormat::L16 => {
            return Err(IoError::UnsupportedFormat(
                "16-bit grayscale JPEG".to_string(),
            ));
        }
    };

    log::trace!(
        "decoded JPEG {}x{} ({:?})",
        width,
        height,
        info.pixel_format
    );
    Ok(raster)
}

/// Write a JPEG image.
///
/// `Gray8` is written as a single-channel JPEG; color rasters are written
/// as RGB in true channel order. Alpha is dropped.
///
/// # Errors
///
/// Returns `InvalidData` if either dimension exceeds 65535, the JPEG limit.
pub fn write_jpeg<W: Write>(raster: &Raster, writer: W, quality: u8) -> IoResult<()> {
    let (width, height) = raster.dimensions();
    if width > u16::MAX as u32 || height > u16::MAX as u32 {
        return Err(IoError::InvalidData(format!(
            "{}x{} exceeds the JPEG size limit",
            width, height
        )));
    }

    let (data, color_type) = match raster.layout() {
        PixelLayout::Gray8 => (raster.to_interleaved(), jpeg_encoder::ColorType::Luma),
        layout => {
            let mut data = Vec::with_capacity(width as usize * height as usize * 3);
            for y in 0..height {
                for x in 0..width {
                    let pixel = raster.get_pixel_unchecked(x, y);
                    let (r, g, b) = autoedit_core::raster::pixel_to_rgb(layout, pixel);
                    data.extend_from_slice(&[r, g, b]);
                }
            }
            (data, jpeg_encoder::ColorType::Rgb)
        }
    };

    let mut writer = writer;
    let encoder = jpeg_encoder::Encoder::new(&mut writer, quality);
    encoder
        .encode(&data, width as u16, height as u16, color_type)
        .map_err(|e| IoError::EncodeError(format!("JPEG encode error: {}", e)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use autoedit_core::color;

    fn max_diff(a: &Raster, b: &Raster) -> u8 {
        let mut max = 0u8;
        for y in 0..a.height() {
            for x in 0..a.width() {
                let pa = a.get_pixel_unchecked(x, y);
                let pb = b.get_pixel_unchecked(x, y);
                for (ca, cb) in [
                    (color::slot0(pa), color::slot0(pb)),
                    (color::slot1(pa), color::slot1(pb)),
                    (color::slot2(pa), color::slot2(pb)),
                ] {
                    max = max.max(ca.abs_diff(cb));
                }
            }
        }
        max
    }

    fn flat(w: u32, h: u32, r: u8, g: u8, b: u8) -> Raster {
        let data: Vec<u8> = (0..w * h).flat_map(|_| [r, g, b]).collect();
        Raster::from_interleaved(w, h, 3, &data, PixelLayout::Rgb32).unwrap()
    }

    #[test]
    fn test_jpeg_roundtrip_color() {
        let raster = flat(16, 16, 200, 100, 50);
        let mut buf = Vec::new();
        write_jpeg(&raster, &mut buf, 95).unwrap();
        assert_eq!(&buf[..2], &[0xFF, 0xD8]);

        let decoded = read_jpeg(buf.as_slice()).unwrap();
        assert_eq!(decoded.dimensions(), (16, 16));
        assert_eq!(decoded.layout(), PixelLayout::Rgb32);
        assert!(max_diff(&raster, &decoded) <= 4);
    }

    #[test]
    fn test_jpeg_roundtrip_gray() {
        let data = vec![128u8; 64];
        let raster = Raster::from_interleaved(8, 8, 1, &data, PixelLayout::Rgb32).unwrap();
        let mut buf = Vec::new();
        write_jpeg(&raster, &mut buf, 95).unwrap();

        let decoded = read_jpeg(buf.as_slice()).unwrap();
        assert_eq!(decoded.layout(), PixelLayout::Gray8);
        let v = decoded.get_pixel(3, 3).unwrap();
        assert!(v.abs_diff(128) <= 2);
    }

    #[test]
    fn test_jpeg_bgr_written_as_rgb() {
        let rgb = flat(8, 8, 220, 30, 30);
        let bgr = rgb.to_layout(PixelLayout::Bgr32);
        let mut buf = Vec::new();
        write_jpeg(&bgr, &mut buf, 95).unwrap();

        let decoded = read_jpeg(buf.as_slice()).unwrap();
        let (r, _, b) = decoded.get_rgb(4, 4).unwrap();
        assert!(r > 180 && b < 70);
    }

    #[test]
    fn test_jpeg_garbage() {
        assert!(read_jpeg(&[0xFFu8, 0xD8, 0x00, 0x01][..]).is_err());
    }
}
