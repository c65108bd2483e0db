//! PNG image format support
//!
//! Palettes and low bit depths are expanded and 16-bit samples are reduced
//! to their high byte, so every decoded image is 8 bits per sample.

use crate::{IoError, IoResult};
use autoedit_core::{PixelLayout, Raster, color};
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use std::io::{BufRead, Seek, Write};

/// Read a PNG image
///
/// Gray images decode to `Gray8`. Gray+alpha, RGB and RGBA decode to
/// `Rgb32`, with the alpha byte set when the source carries one.
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<Raster> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::normalize_to_color8());
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let (width, height) = {
        let info = reader.info();
        (info.width, info.height)
    };
    let (color_type, bit_depth) = reader.output_color_type();
    if bit_depth != BitDepth::Eight {
        return Err(IoError::UnsupportedFormat(format!(
            "unsupported PNG output depth: {:?}",
            bit_depth
        )));
    }

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let bytes_per_row = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];

    let layout = match color_type {
        ColorType::Grayscale => PixelLayout::Gray8,
        ColorType::GrayscaleAlpha | ColorType::Rgb | ColorType::Rgba => PixelLayout::Rgb32,
        ColorType::Indexed => {
            return Err(IoError::UnsupportedFormat(
                "indexed PNG was not expanded".to_string(),
            ));
        }
    };
    let mut rm = Raster::new(width, height, layout)?.to_mut();
    rm.set_has_alpha(matches!(
        color_type,
        ColorType::GrayscaleAlpha | ColorType::Rgba
    ));

    for y in 0..height {
        let row = &data[y as usize * bytes_per_row..];
        for x in 0..width {
            let i = x as usize;
            let val = match color_type {
                ColorType::Grayscale => row[i] as u32,
                ColorType::GrayscaleAlpha => {
                    let (g, a) = (row[i * 2], row[i * 2 + 1]);
                    color::compose_with_alpha(g, g, g, a)
                }
                ColorType::Rgb => color::compose(row[i * 3], row[i * 3 + 1], row[i * 3 + 2]),
                _ => color::compose_with_alpha(
                    row[i * 4],
                    row[i * 4 + 1],
                    row[i * 4 + 2],
                    row[i * 4 + 3],
                ),
            };
            rm.set_pixel_unchecked(x, y, val);
        }
    }

    log::trace!("decoded PNG {}x{} as {:?}", width, height, color_type);
    Ok(rm.into())
}

/// Write a PNG image
///
/// `Gray8` is written as 8-bit grayscale. Color rasters are written as RGB,
/// or RGBA when they carry alpha, in true red/green/blue order whatever
/// their storage layout.
pub fn write_png<W: Write>(raster: &Raster, writer: W) -> IoResult<()> {
    let (width, height) = raster.dimensions();
    let (color_type, samples) = match (raster.layout(), raster.has_alpha()) {
        (PixelLayout::Gray8, _) => (ColorType::Grayscale, 1usize),
        (_, false) => (ColorType::Rgb, 3),
        (_, true) => (ColorType::Rgba, 4),
    };

    let mut encoder = Encoder::new(writer, width, height);
    encoder.set_color(color_type);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;

    let mut data = Vec::with_capacity(width as usize * height as usize * samples);
    let layout = raster.layout();
    for y in 0..height {
        for x in 0..width {
            let pixel = raster.get_pixel_unchecked(x, y);
            if layout == PixelLayout::Gray8 {
                data.push(pixel as u8);
                continue;
            }
            let (r, g, b) = autoedit_core::raster::pixel_to_rgb(layout, pixel);
            data.extend_from_slice(&[r, g, b]);
            if samples == 4 {
                data.push(color::alpha(pixel));
            }
        }
    }

    writer
        .write_image_data(&data)
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;
    writer
        .finish()
        .map_err(|e| IoError::EncodeError(format!("PNG finish error: {}", e)))?;

    Ok(())
}
