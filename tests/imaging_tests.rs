use darkroom::imaging::{
    ascii_art, decode, encode_jpeg, heatmap, invert, mirror, pixelate, resize, resize_for_output,
    MirrorOrientation,
};
use darkroom::imaging_config::MESSAGE_CHAR_LIMIT;
use darkroom::imaging_errors::ImagingError;
use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};

/// Deterministic color pattern so flips and inversions are observable
fn pattern_image(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        Rgb([
            (x * 7 % 256) as u8,
            (y * 13 % 256) as u8,
            ((x + y) * 5 % 256) as u8,
        ])
    }))
}

fn solid_gray(width: u32, height: u32, level: u8) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([level, level, level])))
}

#[test]
fn test_resize_truncates_height() {
    let resized = resize(&pattern_image(333, 217), 100).unwrap();
    // 100 * 217 / 333 = 65.16..., truncated
    assert_eq!((resized.width(), resized.height()), (100, 65));
}

#[test]
fn test_resize_rejects_zero_width() {
    assert!(matches!(
        resize(&pattern_image(10, 10), 0),
        Err(ImagingError::InvalidDimensions(_))
    ));
}

#[test]
fn test_resize_for_output_caps_long_edge() {
    let landscape = resize_for_output(&pattern_image(1000, 500), 512);
    assert_eq!((landscape.width(), landscape.height()), (512, 256));

    let portrait = resize_for_output(&pattern_image(500, 1000), 512);
    assert_eq!((portrait.width(), portrait.height()), (256, 512));

    let square = resize_for_output(&pattern_image(600, 600), 512);
    assert_eq!((square.width(), square.height()), (512, 512));
}

#[test]
fn test_resize_for_output_preserves_aspect_within_rounding() {
    let output = resize_for_output(&pattern_image(600, 100), 512);
    assert!(output.width() <= 512 && output.height() <= 512);
    let original_ratio: f64 = 600.0 / 100.0;
    let output_ratio = output.width() as f64 / output.height() as f64;
    // One pixel of truncation on the short edge
    let worst_case = 512.0 / (512.0 / original_ratio - 1.0).max(1.0);
    assert!(output_ratio >= original_ratio - 0.01 && output_ratio <= worst_case);
}

#[test]
fn test_resize_for_output_leaves_small_images_alone() {
    let small = pattern_image(100, 80);
    let output = resize_for_output(&small, 512);
    assert_eq!((output.width(), output.height()), (100, 80));
    assert_eq!(small.to_rgb8().as_raw(), output.to_rgb8().as_raw());
}

#[test]
fn test_pixelate_truncates_to_whole_blocks() {
    let output = pixelate(&pattern_image(105, 53), 20).unwrap();
    assert_eq!((output.width(), output.height()), (100, 40));
}

#[test]
fn test_pixelate_rejects_images_smaller_than_one_block() {
    assert!(matches!(
        pixelate(&pattern_image(15, 30), 20),
        Err(ImagingError::InvalidDimensions(_))
    ));
    assert!(matches!(
        pixelate(&pattern_image(100, 100), 0),
        Err(ImagingError::InvalidDimensions(_))
    ));
}

#[test]
fn test_mirror_twice_is_identity() {
    let original = pattern_image(64, 48);
    for orientation in [MirrorOrientation::Horizontal, MirrorOrientation::Vertical] {
        let twice = mirror(&mirror(&original, orientation), orientation);
        assert_eq!(original.to_rgb8().as_raw(), twice.to_rgb8().as_raw());
    }
}

#[test]
fn test_mirror_horizontal_flips_left_right() {
    let original = pattern_image(10, 4);
    let flipped = mirror(&original, MirrorOrientation::Horizontal);
    let (source, mirrored) = (original.to_rgb8(), flipped.to_rgb8());
    for y in 0..4 {
        for x in 0..10 {
            assert_eq!(source.get_pixel(x, y), mirrored.get_pixel(9 - x, y));
        }
    }
}

#[test]
fn test_invert_twice_is_identity() {
    let original = pattern_image(32, 32);
    let twice = invert(&invert(&original));
    assert_eq!(original.to_rgb8().as_raw(), twice.to_rgb8().as_raw());
}

#[test]
fn test_invert_drops_alpha_instead_of_failing() {
    let rgba = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
        8,
        8,
        Rgba([10, 20, 30, 128]),
    ));
    let inverted = invert(&rgba);
    assert!(matches!(inverted, DynamicImage::ImageRgb8(_)));
    assert_eq!(inverted.to_rgb8().get_pixel(0, 0), &Rgb([245, 235, 225]));
}

#[test]
fn test_heatmap_gradient_anchors() {
    assert_eq!(
        heatmap(&solid_gray(4, 4, 0)).to_rgb8().get_pixel(0, 0),
        &Rgb([0, 0, 255])
    );
    assert_eq!(
        heatmap(&solid_gray(4, 4, 127)).to_rgb8().get_pixel(0, 0),
        &Rgb([0, 128, 0])
    );
    assert_eq!(
        heatmap(&solid_gray(4, 4, 255)).to_rgb8().get_pixel(0, 0),
        &Rgb([255, 0, 0])
    );
}

#[test]
fn test_ascii_art_fits_in_one_message() {
    let tall = pattern_image(200, 2000);
    for width in [10u32, 40, 62, 90] {
        let art = ascii_art(&tall, width, "@#+. ", MESSAGE_CHAR_LIMIT).unwrap();
        assert!(
            art.len() <= MESSAGE_CHAR_LIMIT,
            "width {width} produced {} chars",
            art.len()
        );
        assert!(!art.is_empty());
    }
}

#[test]
fn test_ascii_art_single_glyph_charset() {
    let art = ascii_art(&pattern_image(80, 80), 40, "#", MESSAGE_CHAR_LIMIT).unwrap();
    assert!(art.chars().all(|c| c == '#' || c == '\n'));
    assert!(art.contains('#'));
}

#[test]
fn test_ascii_art_row_shape() {
    let art = ascii_art(&pattern_image(100, 100), 40, "@#+. ", MESSAGE_CHAR_LIMIT).unwrap();
    // Square input: rows = 40 * 0.55 = 22, each 40 glyphs wide
    let lines: Vec<&str> = art.lines().collect();
    assert_eq!(lines.len(), 22);
    assert!(lines.iter().all(|line| line.chars().count() == 40));
}

#[test]
fn test_ascii_art_very_wide_image_still_renders_one_row() {
    let art = ascii_art(&pattern_image(1000, 10), 40, "#", MESSAGE_CHAR_LIMIT).unwrap();
    assert_eq!(art.lines().count(), 1);
}

#[test]
fn test_ascii_art_rejects_empty_charset() {
    assert!(matches!(
        ascii_art(&pattern_image(10, 10), 40, "", MESSAGE_CHAR_LIMIT),
        Err(ImagingError::EmptyCharset)
    ));
}

#[test]
fn test_encode_decode_round_trip_keeps_dimensions() {
    let original = pattern_image(120, 90);
    let jpeg = encode_jpeg(&original).unwrap();
    let decoded = decode(&jpeg).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (120, 90));
}

#[test]
fn test_encode_jpeg_accepts_alpha_input() {
    let rgba = DynamicImage::ImageRgba8(RgbaImage::from_pixel(16, 16, Rgba([200, 10, 10, 40])));
    assert!(encode_jpeg(&rgba).is_ok());
}

#[test]
fn test_decode_rejects_garbage() {
    assert!(matches!(
        decode(b"definitely not an image"),
        Err(ImagingError::Decode(_))
    ));
}
