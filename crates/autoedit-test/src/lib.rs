//! autoedit-test - Regression test helpers for autoedit
//!
//! Provides [`RegParams`], an accumulate-then-report checker, and a set of
//! deterministic synthetic image builders so tests do not depend on image
//! files on disk.
//!
//! # Usage
//!
//! ```ignore
//! use autoedit_test::{RegParams, uniform_rgb};
//!
//! let mut rp = RegParams::new("measure");
//! let m = measure(&uniform_rgb(16, 16, 30))?;
//! rp.compare_values(30.0, m.brightness, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: set to "display" to also write rasters to `tests/regout`

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

use autoedit_core::{PixelLayout, Raster, color};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // autoedit-test is at crates/autoedit-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}

fn build(w: u32, h: u32, layout: PixelLayout, f: impl Fn(u32, u32) -> u32) -> TestResult<Raster> {
    let mut rm = Raster::new(w, h, layout)?.to_mut();
    for y in 0..h {
        for x in 0..w {
            rm.set_pixel_unchecked(x, y, f(x, y));
        }
    }
    Ok(rm.into())
}

/// Uniform gray-valued `Rgb32` raster.
///
/// # Panics
///
/// Panics if `w` or `h` is zero.
pub fn uniform_rgb(w: u32, h: u32, val: u8) -> Raster {
    build(w, h, PixelLayout::Rgb32, |_, _| color::compose(val, val, val))
        .expect("uniform_rgb: non-zero dimensions")
}

/// Uniform `Gray8` raster.
pub fn uniform_gray(w: u32, h: u32, val: u8) -> Raster {
    build(w, h, PixelLayout::Gray8, |_, _| val as u32).expect("uniform_gray: non-zero dimensions")
}

/// `Rgb32` raster with a horizontal red ramp, vertical green ramp and
/// constant blue.
pub fn gradient_rgb(w: u32, h: u32) -> Raster {
    build(w, h, PixelLayout::Rgb32, |x, y| {
        let r = (x * 255 / w.max(2).saturating_sub(1).max(1)).min(255) as u8;
        let g = (y * 255 / h.max(2).saturating_sub(1).max(1)).min(255) as u8;
        color::compose(r, g, 128)
    })
    .expect("gradient_rgb: non-zero dimensions")
}

/// `Rgb32` checkerboard of square cells alternating between two gray levels.
pub fn checkerboard_rgb(w: u32, h: u32, cell: u32, lo: u8, hi: u8) -> Raster {
    let cell = cell.max(1);
    build(w, h, PixelLayout::Rgb32, |x, y| {
        let v = if (x / cell + y / cell) % 2 == 0 { lo } else { hi };
        color::compose(v, v, v)
    })
    .expect("checkerboard_rgb: non-zero dimensions")
}

/// `Rgb32` raster of a uniform base color plus seeded uniform noise in
/// `[-amplitude, amplitude]` on every channel.
pub fn noisy_rgb(w: u32, h: u32, base: (u8, u8, u8), amplitude: i32, seed: u64) -> Raster {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut rm = uniform_rgb(w, h, 0).to_mut();
    for y in 0..h {
        for x in 0..w {
            let mut jitter = |c: u8| -> u8 {
                let n = rng.random_range(-amplitude..=amplitude);
                (c as i32 + n).clamp(0, 255) as u8
            };
            let r = jitter(base.0);
            let g = jitter(base.1);
            let b = jitter(base.2);
            rm.set_pixel_unchecked(x, y, color::compose(r, g, b));
        }
    }
    rm.into()
}

/// Largest absolute per-channel difference between two same-sized rasters.
///
/// Compares true RGB values, so rasters in different color layouts can be
/// compared directly.
///
/// # Panics
///
/// Panics if the dimensions differ.
pub fn max_channel_diff(a: &Raster, b: &Raster) -> u8 {
    assert_eq!(a.dimensions(), b.dimensions(), "dimension mismatch");
    let mut max = 0u8;
    for y in 0..a.height() {
        for x in 0..a.width() {
            let (ar, ag, ab) = a.get_rgb(x, y).unwrap_or_default();
            let (br, bg, bb) = b.get_rgb(x, y).unwrap_or_default();
            max = max
                .max(ar.abs_diff(br))
                .max(ag.abs_diff(bg))
                .max(ab.abs_diff(bb));
        }
    }
    max
}
