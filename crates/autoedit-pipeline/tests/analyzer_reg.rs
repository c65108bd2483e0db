//! Analyzer regression test
//!
//! Exact statistics on synthetic images and the category/preset chosen
//! for uniform gray levels.

use autoedit_core::{PixelLayout, Raster};
use autoedit_pipeline::{
    Category, PipelineError, classify, measure, measure_bytes, preset_for,
};
use autoedit_test::{RegParams, checkerboard_rgb, gradient_rgb, uniform_gray, uniform_rgb};

#[test]
fn analyzer_checkerboard_reg() {
    let mut rp = RegParams::new("analyzer_checkerboard");

    // 1-pixel cells of 0 and 100: every Laplacian tap is +-400
    let board = checkerboard_rgb(8, 6, 1, 0, 100);
    let m = measure(&board).unwrap();
    rp.compare_values(50.0, m.brightness, 1e-12);
    rp.compare_values(50.0, m.contrast, 1e-12);
    rp.compare_values(160_000.0, m.sharpness, 1e-6);
    rp.check(m.blurness == m.sharpness, "blurness equals sharpness");
    rp.check(classify(m.brightness) == Category::Normal, "50 is normal");

    // Coarser cells have edges only at cell borders
    let coarse = measure(&checkerboard_rgb(8, 6, 2, 0, 100)).unwrap();
    rp.check(coarse.sharpness < m.sharpness, "coarser is less sharp");

    assert!(rp.cleanup());
}

#[test]
fn analyzer_uniform_reg() {
    let mut rp = RegParams::new("analyzer_uniform");

    for (level, category) in [
        (30u8, Category::Dark),
        (75, Category::Normal),
        (200, Category::Bright),
    ] {
        let m = measure(&uniform_rgb(16, 12, level)).unwrap();
        rp.compare_values(level as f64, m.brightness, 0.0);
        rp.compare_values(0.0, m.contrast, 0.0);
        rp.compare_values(0.0, m.sharpness, 0.0);
        let c = classify(m.brightness);
        rp.check(c == category, &format!("gray {} -> {}", level, category));
        rp.check(preset_for(c) == category.preset(), "preset lookup");
    }

    // Gray and colour rasters of the same intensity measure the same
    let g = measure(&uniform_gray(5, 5, 42)).unwrap();
    let c = measure(&uniform_rgb(5, 5, 42)).unwrap();
    rp.check(g == c, "gray matches replicated colour");

    assert!(rp.cleanup());
}

#[test]
fn analyzer_layout_reg() {
    let mut rp = RegParams::new("analyzer_layout");

    let grad = gradient_rgb(20, 10);
    let a = measure(&grad).unwrap();
    let b = measure(&grad.to_layout(PixelLayout::Bgr32)).unwrap();
    rp.check(a == b, "BGR input measured with its layout");
    rp.check(a.blurness == a.sharpness, "blurness equals sharpness");

    let before: Raster = grad.to_mut().into();
    let _ = measure(&grad).unwrap();
    rp.compare_rasters(&before, &grad);

    assert!(rp.cleanup());
}

#[test]
fn analyzer_bytes_reg() {
    let mut rp = RegParams::new("analyzer_bytes");

    let img = uniform_rgb(8, 8, 90);
    let png = autoedit_io::write_image_mem(&img, autoedit_io::ImageFormat::Png).unwrap();
    let m = measure_bytes(&png).unwrap();
    rp.compare_values(90.0, m.brightness, 0.0);

    rp.check(
        matches!(measure_bytes(&[]), Err(PipelineError::Decode(_))),
        "empty buffer",
    );
    rp.check(
        matches!(
            measure_bytes(&png[..png.len() / 2]),
            Err(PipelineError::Decode(_))
        ),
        "truncated buffer",
    );

    assert!(rp.cleanup());
}
