//! Layout conversion
//!
//! The only place where channel order changes. Every conversion returns a
//! new raster tagged with its target layout.
//!
//! | From \ To | Gray8 | Rgb32 | Bgr32 |
//! |---|---|---|---|
//! | Gray8 | share | replicate | replicate |
//! | Rgb32 | luma | share | swap |
//! | Bgr32 | luma | swap | share |

use super::{PixelLayout, Raster, access::pixel_to_rgb};
use crate::color;

impl Raster {
    /// Convert to another pixel layout.
    ///
    /// Converting to the current layout returns a clone that shares the
    /// pixel data. Color to gray uses BT.601 luma ([`color::luma`]); gray
    /// to color replicates the intensity into all three channels. The
    /// alpha byte is carried across color layouts.
    pub fn to_layout(&self, target: PixelLayout) -> Raster {
        let source = self.layout();
        if source == target {
            return self.clone();
        }

        let (w, h) = self.dimensions();
        let mut out = self.create_template_with_layout(target).to_mut();

        for y in 0..h {
            for x in 0..w {
                let pixel = self.get_pixel_unchecked(x, y);
                let val = match (source, target) {
                    (PixelLayout::Rgb32, PixelLayout::Bgr32)
                    | (PixelLayout::Bgr32, PixelLayout::Rgb32) => color::swap_outer(pixel),
                    (_, PixelLayout::Gray8) => {
                        let (r, g, b) = pixel_to_rgb(source, pixel);
                        color::luma(r, g, b) as u32
                    }
                    (PixelLayout::Gray8, _) => {
                        let v = pixel as u8;
                        color::compose(v, v, v)
                    }
                    _ => pixel,
                };
                out.set_pixel_unchecked(x, y, val);
            }
        }

        out.into()
    }

    /// Convert to 8-bit luma.
    ///
    /// Shorthand for `to_layout(PixelLayout::Gray8)`.
    pub fn to_gray(&self) -> Raster {
        self.to_layout(PixelLayout::Gray8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_rgba() -> Raster {
        let data = [
            10u8, 20, 30, 255, 40, 50, 60, 128, //
            70, 80, 90, 0, 200, 210, 220, 7,
        ];
        Raster::from_interleaved(2, 2, 4, &data, PixelLayout::Rgb32).unwrap()
    }

    #[test]
    fn test_same_layout_shares() {
        let r = sample_rgba();
        let same = r.to_layout(PixelLayout::Rgb32);
        assert_eq!(r.data().as_ptr(), same.data().as_ptr());
    }

    #[test]
    fn test_rgb_bgr_roundtrip() {
        let r = sample_rgba();
        let bgr = r.to_layout(PixelLayout::Bgr32);
        assert_eq!(bgr.layout(), PixelLayout::Bgr32);
        assert!(bgr.has_alpha());
        for y in 0..2 {
            for x in 0..2 {
                assert_eq!(bgr.get_rgb(x, y), r.get_rgb(x, y));
            }
        }
        let back = bgr.to_layout(PixelLayout::Rgb32);
        assert!(back.same_pixels(&r));
    }

    #[test]
    fn test_bgr_storage_order() {
        let r = sample_rgba();
        let bgr = r.to_layout(PixelLayout::Bgr32);
        assert_eq!(&bgr.to_interleaved()[..4], &[30, 20, 10, 255]);
    }

    #[test]
    fn test_to_gray() {
        let data = [255u8, 0, 0, 100, 100, 100];
        let r = Raster::from_interleaved(2, 1, 3, &data, PixelLayout::Rgb32).unwrap();
        let g = r.to_gray();
        assert_eq!(g.layout(), PixelLayout::Gray8);
        assert_eq!(g.get_pixel(0, 0), Some(76));
        assert_eq!(g.get_pixel(1, 0), Some(100));

        // Same luma regardless of storage order
        let g2 = r.to_layout(PixelLayout::Bgr32).to_gray();
        assert!(g.same_pixels(&g2));
    }

    #[test]
    fn test_gray_to_color() {
        let g = Raster::from_interleaved(2, 1, 1, &[7, 9], PixelLayout::Rgb32).unwrap();
        let c = g.to_layout(PixelLayout::Rgb32);
        assert_eq!(c.layout(), PixelLayout::Rgb32);
        assert!(!c.has_alpha());
        assert_eq!(c.get_rgb(1, 0), Some((9, 9, 9)));
    }
}
