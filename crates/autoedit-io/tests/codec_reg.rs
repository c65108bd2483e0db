//! Codec regression test
//!
//! Round-trips synthetic rasters through PNG and JPEG, in memory and on
//! disk, and checks that malformed input is rejected cleanly.

use autoedit_core::PixelLayout;
use autoedit_io::{
    ImageFormat, IoError, read_image, read_image_mem, write_image, write_image_mem,
};
use autoedit_test::{RegParams, checkerboard_rgb, gradient_rgb, max_channel_diff, uniform_gray};

#[test]
fn codec_png_lossless_reg() {
    let mut rp = RegParams::new("codec_png");

    let src = gradient_rgb(40, 30);
    let bytes = write_image_mem(&src, ImageFormat::Png).unwrap();
    let back = read_image_mem(&bytes).unwrap();
    rp.compare_rasters(&src, &back);

    let bgr = src.to_layout(PixelLayout::Bgr32);
    let bytes = write_image_mem(&bgr, ImageFormat::Png).unwrap();
    let back = read_image_mem(&bytes).unwrap();
    rp.check(back.layout() == PixelLayout::Rgb32, "PNG decodes to Rgb32");
    rp.compare_values(0.0, max_channel_diff(&bgr, &back) as f64, 0.0);

    let gray = uniform_gray(9, 7, 77);
    let bytes = write_image_mem(&gray, ImageFormat::Png).unwrap();
    let back = read_image_mem(&bytes).unwrap();
    rp.compare_rasters(&gray, &back);

    assert!(rp.cleanup());
}

#[test]
fn codec_jpeg_lossy_reg() {
    let mut rp = RegParams::new("codec_jpeg");

    let src = checkerboard_rgb(64, 48, 16, 40, 210);
    let bytes = write_image_mem(&src, ImageFormat::Jpeg).unwrap();
    let back = read_image_mem(&bytes).unwrap();
    rp.check(back.dimensions() == (64, 48), "JPEG keeps dimensions");
    rp.check(back.layout() == PixelLayout::Rgb32, "JPEG decodes to Rgb32");
    // Sample cell centers, away from ringing at the edges
    let (r, _, _) = back.get_rgb(8, 8).unwrap();
    rp.compare_values(40.0, r as f64, 6.0);
    let (r, _, _) = back.get_rgb(24, 8).unwrap();
    rp.compare_values(210.0, r as f64, 6.0);

    assert!(rp.cleanup());
}

#[test]
fn codec_file_roundtrip_reg() {
    let mut rp = RegParams::new("codec_file");

    let dir = std::env::temp_dir().join(format!("autoedit-codec-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let src = gradient_rgb(20, 20);

    let png_path = dir.join("g.png");
    write_image(&src, &png_path, ImageFormat::Png).unwrap();
    rp.compare_rasters(&src, &read_image(&png_path).unwrap());

    let jpg_path = dir.join("g.jpg");
    write_image(&src, &jpg_path, ImageFormat::from_path(&jpg_path).unwrap()).unwrap();
    let back = read_image(&jpg_path).unwrap();
    rp.check(back.dimensions() == (20, 20), "JPEG file keeps dimensions");

    std::fs::remove_dir_all(&dir).unwrap();
    assert!(rp.cleanup());
}

#[test]
fn codec_malformed_reg() {
    let mut rp = RegParams::new("codec_malformed");

    rp.check(
        matches!(read_image_mem(&[]), Err(IoError::InvalidData(_))),
        "empty input",
    );
    rp.check(
        matches!(
            read_image_mem(b"not an image at all"),
            Err(IoError::UnsupportedFormat(_))
        ),
        "unknown signature",
    );

    let bytes = write_image_mem(&gradient_rgb(32, 32), ImageFormat::Png).unwrap();
    rp.check(
        read_image_mem(&bytes[..bytes.len() / 3]).is_err(),
        "truncated PNG",
    );
    let bytes = write_image_mem(&gradient_rgb(32, 32), ImageFormat::Jpeg).unwrap();
    rp.check(read_image_mem(&bytes[..20]).is_err(), "truncated JPEG");

    rp.check(
        matches!(
            read_image("/nonexistent/autoedit/input.png"),
            Err(IoError::Io(_))
        ),
        "missing file",
    );

    assert!(rp.cleanup());
}
