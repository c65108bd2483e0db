//! Raster - The main image container
//!
//! The `Raster` structure is the image type that flows through every
//! stage of the enhancement pipeline.
//!
//! # Pixel layout
//!
//! - Image data is stored in 32-bit words
//! - Every row starts on a 32-bit boundary
//! - 8-bit gray pixels are packed four per word, MSB first
//! - 32-bit color pixels occupy one word each; the order of the three
//!   color slots is given by the raster's [`PixelLayout`]
//!
//! # Ownership model
//!
//! `Raster` uses `Arc` for efficient cloning (shared ownership).
//! To modify pixel data, copy it into a `RasterMut` with [`Raster::to_mut`],
//! then convert back with `Into<Raster>`.

mod access;
pub mod convert;
pub mod statistics;

pub use access::*;

use crate::error::{Error, Result};
use std::sync::Arc;

/// Pixel layout of a raster.
///
/// The layout is part of the raster value, so channel order can never
/// drift silently between stages: a stage that needs a specific order
/// checks the tag, and [`Raster::to_layout`] is the only way to change it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelLayout {
    /// 8-bit single-channel intensity
    Gray8,
    /// 32-bit color, slots ordered red, green, blue, alpha
    Rgb32,
    /// 32-bit color, slots ordered blue, green, red, alpha
    Bgr32,
}

impl PixelLayout {
    /// Get the number of bits per pixel.
    pub fn bits(self) -> u32 {
        match self {
            PixelLayout::Gray8 => 8,
            PixelLayout::Rgb32 | PixelLayout::Bgr32 => 32,
        }
    }

    /// Check whether this layout stores three color channels.
    pub fn is_color(self) -> bool {
        !matches!(self, PixelLayout::Gray8)
    }
}

/// Internal raster data
#[derive(Debug)]
struct RasterData {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Pixel layout
    layout: PixelLayout,
    /// Samples per pixel (1 for gray, 3 for color, 4 for color with alpha)
    spp: u32,
    /// 32-bit words per line
    wpl: u32,
    /// The image data (packed 32-bit words)
    data: Vec<u32>,
}

impl RasterData {
    fn zeroed(width: u32, height: u32, layout: PixelLayout) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let wpl = compute_wpl(width, layout)?;
        let data = vec![0u32; (wpl as usize) * (height as usize)];
        let spp = if layout.is_color() { 3 } else { 1 };
        Ok(RasterData {
            width,
            height,
            layout,
            spp,
            wpl,
            data,
        })
    }
}

/// Compute words per line for a given width and layout.
fn compute_wpl(width: u32, layout: PixelLayout) -> Result<u32> {
    let bits_per_line = u64::from(width) * u64::from(layout.bits());
    u32::try_from(bits_per_line.div_ceil(32)).map_err(|_| Error::InvalidDimension {
        width,
        height: 0,
    })
}

/// Word range of row `y`, computed in `usize` so large rasters cannot
/// overflow the offset.
#[inline]
fn row_range(y: u32, wpl: u32) -> std::ops::Range<usize> {
    let start = y as usize * wpl as usize;
    start..start + wpl as usize
}

/// Raster - Main image container
///
/// `Raster` is immutable and uses reference counting via `Arc` for
/// efficient cloning. Every pipeline stage takes a `&Raster` and returns
/// a new `Raster`; the input is never modified.
///
/// # Examples
///
/// ```
/// use autoedit_core::{PixelLayout, Raster};
///
/// let raster = Raster::new(640, 480, PixelLayout::Rgb32).unwrap();
/// assert_eq!(raster.width(), 640);
/// assert_eq!(raster.height(), 480);
/// assert_eq!(raster.layout(), PixelLayout::Rgb32);
/// ```
#[derive(Debug, Clone)]
pub struct Raster {
    inner: Arc<RasterData>,
}

impl Raster {
    /// Create a new raster with the specified dimensions and layout.
    ///
    /// The image data is initialized to zero. Color rasters start
    /// without alpha (spp = 3).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32, layout: PixelLayout) -> Result<Self> {
        Ok(Raster {
            inner: Arc::new(RasterData::zeroed(width, height, layout)?),
        })
    }

    /// Build a raster from interleaved 8-bit samples.
    ///
    /// `channels` selects the layout: 1 gives `Gray8`; 3 or 4 give
    /// `color_layout` (which must be `Rgb32` or `Bgr32`), with 4 meaning
    /// the last sample of each pixel is alpha. For color input the samples
    /// are taken to already be in `color_layout` order.
    ///
    /// # Errors
    ///
    /// - [`Error::UnsupportedChannels`] for channel counts other than 1, 3, 4
    /// - [`Error::UnsupportedLayout`] if `color_layout` is `Gray8`
    /// - [`Error::BufferSize`] if `data` does not hold exactly
    ///   `width * height * channels` bytes
    pub fn from_interleaved(
        width: u32,
        height: u32,
        channels: u32,
        data: &[u8],
        color_layout: PixelLayout,
    ) -> Result<Self> {
        let layout = match channels {
            1 => PixelLayout::Gray8,
            3 | 4 if color_layout.is_color() => color_layout,
            3 | 4 => return Err(Error::UnsupportedLayout(color_layout)),
            n => return Err(Error::UnsupportedChannels(n)),
        };
        let expected = (width as usize) * (height as usize) * (channels as usize);
        if data.len() != expected {
            return Err(Error::BufferSize {
                expected,
                actual: data.len(),
            });
        }

        let mut rm = RasterMut {
            inner: RasterData::zeroed(width, height, layout)?,
        };
        rm.set_has_alpha(channels == 4);

        let nc = channels as usize;
        for (i, px) in data.chunks_exact(nc).enumerate() {
            let x = (i % width as usize) as u32;
            let y = (i / width as usize) as u32;
            let val = match nc {
                1 => px[0] as u32,
                3 => crate::color::compose(px[0], px[1], px[2]),
                _ => crate::color::compose_with_alpha(px[0], px[1], px[2], px[3]),
            };
            rm.set_pixel_unchecked(x, y, val);
        }

        Ok(rm.into())
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

    /// Get `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.inner.width, self.inner.height)
    }

    /// Get the pixel layout.
    #[inline]
    pub fn layout(&self) -> PixelLayout {
        self.inner.layout
    }

    /// Get the samples per pixel.
    #[inline]
    pub fn spp(&self) -> u32 {
        self.inner.spp
    }

    /// Check whether the alpha byte of color pixels carries data.
    #[inline]
    pub fn has_alpha(&self) -> bool {
        self.inner.spp == 4
    }

    /// Get the words per line.
    #[inline]
    pub fn wpl(&self) -> u32 {
        self.inner.wpl
    }

    /// Get raw access to the image data.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// Get the words of a specific row.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_data(&self, y: u32) -> &[u32] {
        &self.inner.data[row_range(y, self.inner.wpl)]
    }

    /// Create a zeroed raster with the same dimensions and alpha flag but
    /// a different layout.
    pub fn create_template_with_layout(&self, layout: PixelLayout) -> Self {
        let wpl = if layout.bits() == 32 {
            self.inner.width
        } else {
            self.inner.width.div_ceil(4)
        };
        let spp = match (layout.is_color(), self.inner.spp) {
            (false, _) => 1,
            (true, 4) => 4,
            (true, _) => 3,
        };
        let inner = RasterData {
            width: self.inner.width,
            height: self.inner.height,
            layout,
            spp,
            wpl,
            data: vec![0u32; (wpl as usize) * (self.inner.height as usize)],
        };
        Raster {
            inner: Arc::new(inner),
        }
    }

    /// Check if two rasters have the same width, height and layout.
    pub fn sizes_equal(&self, other: &Raster) -> bool {
        self.inner.width == other.inner.width
            && self.inner.height == other.inner.height
            && self.inner.layout == other.inner.layout
    }

    /// Check if two rasters hold the same pixels in the same layout.
    ///
    /// Padding bits at the end of gray rows are ignored.
    pub fn same_pixels(&self, other: &Raster) -> bool {
        if !self.sizes_equal(other) || self.inner.spp != other.inner.spp {
            return false;
        }
        (0..self.inner.height).all(|y| {
            (0..self.inner.width)
                .all(|x| self.get_pixel_unchecked(x, y) == other.get_pixel_unchecked(x, y))
        })
    }

    /// Create a mutable copy of this raster.
    ///
    /// Always creates a new copy that can be modified.
    pub fn to_mut(&self) -> RasterMut {
        RasterMut {
            inner: self.copy_data(),
        }
    }

    fn copy_data(&self) -> RasterData {
        RasterData {
            width: self.inner.width,
            height: self.inner.height,
            layout: self.inner.layout,
            spp: self.inner.spp,
            wpl: self.inner.wpl,
            data: self.inner.data.clone(),
        }
    }
}

/// Mutable raster
///
/// Allows modification of image data. Convert back to an immutable
/// [`Raster`] using `Into<Raster>`.
#[derive(Debug)]
pub struct RasterMut {
    inner: RasterData,
}

impl RasterMut {
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

    /// Get the pixel layout.
    #[inline]
    pub fn layout(&self) -> PixelLayout {
        self.inner.layout
    }

    /// Get the samples per pixel.
    #[inline]
    pub fn spp(&self) -> u32 {
        self.inner.spp
    }

    /// Get the words per line.
    #[inline]
    pub fn wpl(&self) -> u32 {
        self.inner.wpl
    }

    /// Mark whether the alpha byte carries data. Ignored for gray rasters.
    pub fn set_has_alpha(&mut self, has_alpha: bool) {
        if self.inner.layout.is_color() {
            self.inner.spp = if has_alpha { 4 } else { 3 };
        }
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

    /// Get mutable access to a specific row.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_data_mut(&mut self, y: u32) -> &mut [u32] {
        let range = row_range(y, self.inner.wpl);
        &mut self.inner.data[range]
    }
}

impl From<RasterMut> for Raster {
    fn from(rm: RasterMut) -> Self {
        Raster {
            inner: Arc::new(rm.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_layout() {
        assert_eq!(PixelLayout::Gray8.bits(), 8);
        assert_eq!(PixelLayout::Rgb32.bits(), 32);
        assert_eq!(PixelLayout::Bgr32.bits(), 32);
        assert!(!PixelLayout::Gray8.is_color());
        assert!(PixelLayout::Bgr32.is_color());
    }

    #[test]
    fn test_raster_creation() {
        let raster = Raster::new(100, 200, PixelLayout::Gray8).unwrap();
        assert_eq!(raster.width(), 100);
        assert_eq!(raster.height(), 200);
        assert_eq!(raster.spp(), 1);
        // 100 * 8 = 800 bits = 25 words
        assert_eq!(raster.wpl(), 25);

        let raster = Raster::new(10, 1, PixelLayout::Rgb32).unwrap();
        assert_eq!(raster.wpl(), 10);
        assert_eq!(raster.spp(), 3);
        assert!(!raster.has_alpha());
    }

    #[test]
    fn test_raster_creation_invalid() {
        assert!(Raster::new(0, 100, PixelLayout::Gray8).is_err());
        assert!(Raster::new(100, 0, PixelLayout::Rgb32).is_err());
    }

    #[test]
    fn test_clone_shares_data() {
        let r1 = Raster::new(100, 100, PixelLayout::Rgb32).unwrap();
        let r2 = r1.clone();
        assert_eq!(r1.data().as_ptr(), r2.data().as_ptr());
    }

    #[test]
    fn test_to_mut_copies() {
        let r1 = Raster::new(4, 4, PixelLayout::Gray8).unwrap();
        let mut rm = r1.to_mut();
        rm.set_pixel(1, 1, 9).unwrap();
        let r2: Raster = rm.into();
        assert_ne!(r1.data().as_ptr(), r2.data().as_ptr());
        assert_eq!(r1.get_pixel(1, 1), Some(0));
        assert_eq!(r2.get_pixel(1, 1), Some(9));
    }

    #[test]
    fn test_from_interleaved_rgb() {
        let data = [1u8, 2, 3, 4, 5, 6];
        let r = Raster::from_interleaved(2, 1, 3, &data, PixelLayout::Rgb32).unwrap();
        assert_eq!(r.layout(), PixelLayout::Rgb32);
        assert_eq!(r.get_rgb(0, 0), Some((1, 2, 3)));
        assert_eq!(r.get_rgb(1, 0), Some((4, 5, 6)));
    }

    #[test]
    fn test_from_interleaved_rgba_keeps_alpha() {
        let data = [10u8, 20, 30, 40];
        let r = Raster::from_interleaved(1, 1, 4, &data, PixelLayout::Rgb32).unwrap();
        assert!(r.has_alpha());
        assert_eq!(r.to_interleaved(), data.to_vec());
    }

    #[test]
    fn test_from_interleaved_errors() {
        let data = [0u8; 8];
        assert!(matches!(
            Raster::from_interleaved(2, 2, 2, &data, PixelLayout::Rgb32),
            Err(Error::UnsupportedChannels(2))
        ));
        assert!(matches!(
            Raster::from_interleaved(2, 2, 3, &data, PixelLayout::Rgb32),
            Err(Error::BufferSize {
                expected: 12,
                actual: 8
            })
        ));
        assert!(matches!(
            Raster::from_interleaved(2, 1, 4, &data, PixelLayout::Gray8),
            Err(Error::UnsupportedLayout(PixelLayout::Gray8))
        ));
        assert!(Raster::from_interleaved(0, 2, 1, &[], PixelLayout::Rgb32).is_err());
    }

    #[test]
    fn test_same_pixels() {
        let a = Raster::from_interleaved(2, 2, 1, &[1, 2, 3, 4], PixelLayout::Rgb32).unwrap();
        let b = Raster::from_interleaved(2, 2, 1, &[1, 2, 3, 4], PixelLayout::Rgb32).unwrap();
        let c = Raster::from_interleaved(2, 2, 1, &[1, 2, 3, 5], PixelLayout::Rgb32).unwrap();
        assert!(a.same_pixels(&b));
        assert!(!a.same_pixels(&c));
    }

    #[test]
    fn test_template_with_layout_keeps_alpha() {
        let r = Raster::from_interleaved(3, 1, 4, &[0u8; 12], PixelLayout::Rgb32).unwrap();
        let t = r.create_template_with_layout(PixelLayout::Bgr32);
        assert_eq!(t.layout(), PixelLayout::Bgr32);
        assert!(t.has_alpha());
        let g = r.create_template_with_layout(PixelLayout::Gray8);
        assert_eq!(g.spp(), 1);
        assert_eq!(g.wpl(), 1);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_row_range_past_u32() {
        // 70_000 * 70_000 words does not fit in u32
        let r = row_range(70_000, 70_000);
        assert_eq!(r.start, 4_900_000_000);
        assert_eq!(r.len(), 70_000);
    }

    #[test]
    fn test_row_data_last_row() {
        let data: Vec<u8> = (0..15).collect();
        let r = Raster::from_interleaved(5, 3, 1, &data, PixelLayout::Rgb32).unwrap();
        // 5 gray pixels pack into 2 words per row
        assert_eq!(r.row_data(2).len(), 2);
        assert_eq!(r.row_data(2)[0], 0x0A0B_0C0D);
        assert_eq!(r.row_data(2)[1] >> 24, 14);

        let mut rm = r.to_mut();
        rm.row_data_mut(2)[1] = 0;
        let back: Raster = rm.into();
        assert_eq!(back.get_pixel(4, 2), Some(0));
        assert_eq!(back.get_pixel(3, 2), Some(13));
    }
}
