//! CIE Lab conversions
//!
//! D65 white point, L in `[0, 100]`. RGB input is `[0, 1]` floats; the
//! [`Transfer`] selects whether it is sRGB-encoded or already linear.

/// D65 reference white, X and Z (Y is 1)
const WHITE_X: f32 = 0.950456;
const WHITE_Z: f32 = 1.088754;

/// CIE threshold between the cube-root and linear segments
const LAB_EPSILON: f32 = 0.008856;
const LAB_KAPPA: f32 = 903.3;
const LAB_LINEAR_SLOPE: f32 = 7.787;
const LAB_LINEAR_OFFSET: f32 = 16.0 / 116.0;

/// RGB transfer function applied before the XYZ matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transfer {
    /// sRGB gamma curve
    Srgb,
    /// No curve; RGB values are treated as linear light
    Linear,
}

/// A CIE Lab triple
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lab {
    pub l: f32,
    pub a: f32,
    pub b: f32,
}

#[inline]
fn srgb_to_linear(v: f32) -> f32 {
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

#[inline]
fn linear_to_srgb(v: f32) -> f32 {
    if v <= 0.0031308 {
        12.92 * v
    } else {
        1.055 * v.powf(1.0 / 2.4) - 0.055
    }
}

#[inline]
fn lab_f(t: f32) -> f32 {
    if t > LAB_EPSILON {
        t.cbrt()
    } else {
        LAB_LINEAR_SLOPE * t + LAB_LINEAR_OFFSET
    }
}

#[inline]
fn lab_f_inv(f: f32) -> f32 {
    // 6/29, the f value at the segment boundary
    if f > 0.206893 {
        f * f * f
    } else {
        (f - LAB_LINEAR_OFFSET) / LAB_LINEAR_SLOPE
    }
}

/// Convert an RGB triple in `[0, 1]` to Lab.
pub fn rgb_to_lab(r: f32, g: f32, b: f32, transfer: Transfer) -> Lab {
    let (r, g, b) = match transfer {
        Transfer::Srgb => (srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b)),
        Transfer::Linear => (r, g, b),
    };

    let x = (0.412453 * r + 0.357580 * g + 0.180423 * b) / WHITE_X;
    let y = 0.212671 * r + 0.715160 * g + 0.072169 * b;
    let z = (0.019334 * r + 0.119193 * g + 0.950227 * b) / WHITE_Z;

    let fx = lab_f(x);
    let fy = lab_f(y);
    let fz = lab_f(z);

    let l = if y > LAB_EPSILON {
        116.0 * fy - 16.0
    } else {
        LAB_KAPPA * y
    };

    Lab {
        l,
        a: 500.0 * (fx - fy),
        b: 200.0 * (fy - fz),
    }
}

/// Convert Lab to an RGB triple clipped to `[0, 1]`.
pub fn lab_to_rgb(lab: Lab, transfer: Transfer) -> (f32, f32, f32) {
    let (y, fy) = if lab.l <= 8.0 {
        let y = lab.l / LAB_KAPPA;
        (y, LAB_LINEAR_SLOPE * y + LAB_LINEAR_OFFSET)
    } else {
        let fy = (lab.l + 16.0) / 116.0;
        (fy * fy * fy, fy)
    };
    let x = lab_f_inv(lab.a / 500.0 + fy) * WHITE_X;
    let z = lab_f_inv(fy - lab.b / 200.0) * WHITE_Z;

    let r = 3.240479 * x - 1.537150 * y - 0.498535 * z;
    let g = -0.969256 * x + 1.875991 * y + 0.041556 * z;
    let b = 0.055648 * x - 0.204043 * y + 1.057311 * z;

    let encode = |v: f32| {
        let v = match transfer {
            Transfer::Srgb => linear_to_srgb(v.max(0.0)),
            Transfer::Linear => v,
        };
        v.clamp(0.0, 1.0)
    };
    (encode(r), encode(g), encode(b))
}

/// Saturating conversion of a float to 8 bits, rounding half to even.
#[inline]
pub fn saturate_u8(v: f32) -> u8 {
    if v.is_nan() {
        return 0;
    }
    v.round_ties_even().clamp(0.0, 255.0) as u8
}

/// Convert 8-bit RGB to 8-bit Lab: `L * 255 / 100`, `a + 128`, `b + 128`.
pub fn rgb8_to_lab8(r: u8, g: u8, b: u8, transfer: Transfer) -> (u8, u8, u8) {
    let lab = rgb_to_lab(
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
        transfer,
    );
    (
        saturate_u8(lab.l * 255.0 / 100.0),
        saturate_u8(lab.a + 128.0),
        saturate_u8(lab.b + 128.0),
    )
}

/// Inverse of [`rgb8_to_lab8`].
pub fn lab8_to_rgb8(l: u8, a: u8, b: u8, transfer: Transfer) -> (u8, u8, u8) {
    let lab = Lab {
        l: l as f32 * 100.0 / 255.0,
        a: a as f32 - 128.0,
        b: b as f32 - 128.0,
    };
    let (r, g, b) = lab_to_rgb(lab, transfer);
    (
        saturate_u8(r * 255.0),
        saturate_u8(g * 255.0),
        saturate_u8(b * 255.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_white_and_black() {
        let w = rgb_to_lab(1.0, 1.0, 1.0, Transfer::Srgb);
        assert!((w.l - 100.0).abs() < 0.01);
        assert!(w.a.abs() < 0.01 && w.b.abs() < 0.01);

        let k = rgb_to_lab(0.0, 0.0, 0.0, Transfer::Srgb);
        assert_eq!(k.l, 0.0);
    }

    #[test]
    fn test_srgb_mid_gray() {
        // sRGB 0.5 is about 21.4% linear light, L close to 53.4
        let lab = rgb_to_lab(0.5, 0.5, 0.5, Transfer::Srgb);
        assert!((lab.l - 53.39).abs() < 0.05, "L = {}", lab.l);
    }

    #[test]
    fn test_float_roundtrip() {
        for &(r, g, b) in &[(0.2, 0.4, 0.6), (0.9, 0.1, 0.05), (0.01, 0.02, 0.03)] {
            for transfer in [Transfer::Srgb, Transfer::Linear] {
                let (r2, g2, b2) = lab_to_rgb(rgb_to_lab(r, g, b, transfer), transfer);
                assert!((r - r2).abs() < 1e-3, "{:?} r {} vs {}", transfer, r, r2);
                assert!((g - g2).abs() < 1e-3);
                assert!((b - b2).abs() < 1e-3);
            }
        }
    }

    #[test]
    fn test_lab8_gray_is_neutral() {
        let (_, a, b) = rgb8_to_lab8(120, 120, 120, Transfer::Linear);
        assert_eq!((a, b), (128, 128));
        let (l, a, b) = rgb8_to_lab8(255, 255, 255, Transfer::Linear);
        assert_eq!((l, a, b), (255, 128, 128));
    }

    #[test]
    fn test_lab8_roundtrip_close() {
        for &(r, g, b) in &[(200u8, 120u8, 40u8), (30, 60, 90), (128, 128, 128)] {
            let (l, a, bb) = rgb8_to_lab8(r, g, b, Transfer::Linear);
            let (r2, g2, b2) = lab8_to_rgb8(l, a, bb, Transfer::Linear);
            assert!(r.abs_diff(r2) <= 6, "{} vs {}", r, r2);
            assert!(g.abs_diff(g2) <= 6, "{} vs {}", g, g2);
            assert!(b.abs_diff(b2) <= 6, "{} vs {}", b, b2);
        }
    }

    #[test]
    fn test_saturate() {
        assert_eq!(saturate_u8(2.5), 2);
        assert_eq!(saturate_u8(3.5), 4);
        assert_eq!(saturate_u8(-3.0), 0);
        assert_eq!(saturate_u8(300.0), 255);
        assert_eq!(saturate_u8(f32::NAN), 0);
    }
}
