//! Pure image transforms behind the effect menu.
//!
//! Every function borrows a decoded [`DynamicImage`] and produces a new
//! image or a text rendering; nothing here talks to Telegram.

use std::io::Cursor;

use image::imageops::FilterType;
use image::{imageops, DynamicImage, ImageOutputFormat, Rgb, RgbImage};

use crate::imaging_config::MESSAGE_CHAR_LIMIT;
use crate::imaging_errors::ImagingError;

/// Direction for the mirror effect
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MirrorOrientation {
    Horizontal,
    Vertical,
}

impl MirrorOrientation {
    /// Callback tag carried by the direction keyboard buttons
    pub fn tag(&self) -> &'static str {
        match self {
            MirrorOrientation::Horizontal => "horizontal",
            MirrorOrientation::Vertical => "vertical",
        }
    }
}

/// A fully-parameterized transform request, ready to run
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    Pixelate { block_size: u32 },
    AsciiArt { width: u32, charset: String },
    Negative,
    Mirror(MirrorOrientation),
    Heatmap,
    Resize { max_dimension: u32 },
}

/// What an effect produced: pixels to attach or text to send
pub enum Rendered {
    Image(DynamicImage),
    Text(String),
}

/// Run an effect against a decoded image
pub fn apply(image: &DynamicImage, effect: &Effect) -> Result<Rendered, ImagingError> {
    match effect {
        Effect::Pixelate { block_size } => pixelate(image, *block_size).map(Rendered::Image),
        Effect::AsciiArt { width, charset } => {
            ascii_art(image, *width, charset, MESSAGE_CHAR_LIMIT).map(Rendered::Text)
        }
        Effect::Negative => Ok(Rendered::Image(invert(image))),
        Effect::Mirror(orientation) => Ok(Rendered::Image(mirror(image, *orientation))),
        Effect::Heatmap => Ok(Rendered::Image(heatmap(image))),
        Effect::Resize { max_dimension } => {
            Ok(Rendered::Image(resize_for_output(image, *max_dimension)))
        }
    }
}

/// Decode raw photo bytes into an image
pub fn decode(bytes: &[u8]) -> Result<DynamicImage, ImagingError> {
    image::load_from_memory(bytes).map_err(|e| ImagingError::Decode(e.to_string()))
}

/// Encode an image as JPEG for sending back as a photo.
///
/// JPEG has no alpha channel, so the image is flattened to RGB first.
pub fn encode_jpeg(image: &DynamicImage) -> Result<Vec<u8>, ImagingError> {
    let rgb = DynamicImage::ImageRgb8(image.to_rgb8());
    let mut buffer = Cursor::new(Vec::new());
    rgb.write_to(&mut buffer, ImageOutputFormat::Jpeg(90))
        .map_err(|e| ImagingError::Encode(e.to_string()))?;
    Ok(buffer.into_inner())
}

/// Scale to `target_width`, height following in proportion (truncated)
pub fn resize(image: &DynamicImage, target_width: u32) -> Result<DynamicImage, ImagingError> {
    let (width, height) = (image.width(), image.height());
    if target_width == 0 || width == 0 || height == 0 {
        return Err(ImagingError::InvalidDimensions(format!(
            "cannot resize {width}x{height} to width {target_width}"
        )));
    }
    let target_height = (target_width as u64 * height as u64 / width as u64) as u32;
    if target_height == 0 {
        return Err(ImagingError::InvalidDimensions(format!(
            "{width}x{height} collapses to zero height at width {target_width}"
        )));
    }
    Ok(image.resize_exact(target_width, target_height, FilterType::CatmullRom))
}

/// Cap the longer edge at `max_dimension`, preserving proportions.
///
/// Images already inside the cap are returned unchanged.
pub fn resize_for_output(image: &DynamicImage, max_dimension: u32) -> DynamicImage {
    let (width, height) = (image.width(), image.height());
    if width < max_dimension && height < max_dimension {
        return image.clone();
    }
    let (new_width, new_height) = if height > width {
        let new_width = (max_dimension as u64 * width as u64 / height as u64) as u32;
        (new_width.max(1), max_dimension)
    } else {
        let new_height = (max_dimension as u64 * height as u64 / width as u64) as u32;
        (max_dimension, new_height.max(1))
    };
    image.resize_exact(new_width, new_height, FilterType::CatmullRom)
}

/// Per-channel color inversion (the negative effect).
///
/// Inversion is defined on plain RGB; any alpha channel is dropped first.
pub fn invert(image: &DynamicImage) -> DynamicImage {
    let mut rgb = image.to_rgb8();
    imageops::invert(&mut rgb);
    DynamicImage::ImageRgb8(rgb)
}

/// Reflect left-right or top-bottom
pub fn mirror(image: &DynamicImage, orientation: MirrorOrientation) -> DynamicImage {
    match orientation {
        MirrorOrientation::Horizontal => image.fliph(),
        MirrorOrientation::Vertical => image.flipv(),
    }
}

// Gradient anchors: black maps to blue, mid-gray to green, white to red.
const HEAT_COLD: [u8; 3] = [0, 0, 255];
const HEAT_MID: [u8; 3] = [0, 128, 0];
const HEAT_HOT: [u8; 3] = [255, 0, 0];

/// Recolor the image as a cold-to-hot heat map of its intensity
pub fn heatmap(image: &DynamicImage) -> DynamicImage {
    let gray = image.to_luma8();
    let lut = heatmap_lut();
    let mut output = RgbImage::new(gray.width(), gray.height());
    for (x, y, pixel) in gray.enumerate_pixels() {
        output.put_pixel(x, y, Rgb(lut[pixel.0[0] as usize]));
    }
    DynamicImage::ImageRgb8(output)
}

fn heatmap_lut() -> [[u8; 3]; 256] {
    let mut lut = [[0u8; 3]; 256];
    for (intensity, entry) in lut.iter_mut().enumerate() {
        *entry = if intensity <= 127 {
            lerp_rgb(HEAT_COLD, HEAT_MID, intensity as i32, 127)
        } else {
            lerp_rgb(HEAT_MID, HEAT_HOT, intensity as i32 - 128, 127)
        };
    }
    lut
}

fn lerp_rgb(from: [u8; 3], to: [u8; 3], step: i32, span: i32) -> [u8; 3] {
    let mut out = [0u8; 3];
    for (channel, slot) in out.iter_mut().enumerate() {
        let a = from[channel] as i32;
        let b = to[channel] as i32;
        *slot = (a + (b - a) * step / span) as u8;
    }
    out
}

/// Downscale then upscale with nearest-neighbor sampling, leaving visible
/// square blocks. Output dimensions are both truncated to whole blocks.
pub fn pixelate(image: &DynamicImage, block_size: u32) -> Result<DynamicImage, ImagingError> {
    if block_size == 0 {
        return Err(ImagingError::InvalidDimensions(
            "pixel block size must be non-zero".to_string(),
        ));
    }
    let (width, height) = (image.width(), image.height());
    let (down_width, down_height) = (width / block_size, height / block_size);
    if down_width == 0 || down_height == 0 {
        return Err(ImagingError::InvalidDimensions(format!(
            "image {width}x{height} is smaller than one {block_size}px block"
        )));
    }
    let downsampled = image.resize_exact(down_width, down_height, FilterType::Nearest);
    Ok(downsampled.resize_exact(
        down_width * block_size,
        down_height * block_size,
        FilterType::Nearest,
    ))
}

/// Render the image as line-broken ASCII text.
///
/// `charset` is ordered darkest glyph first. Rows past the character
/// cap are silently dropped so the result always fits in one message.
pub fn ascii_art(
    image: &DynamicImage,
    width: u32,
    charset: &str,
    char_limit: usize,
) -> Result<String, ImagingError> {
    let glyphs: Vec<char> = charset.chars().collect();
    if glyphs.is_empty() {
        return Err(ImagingError::EmptyCharset);
    }
    let (source_width, source_height) = (image.width(), image.height());
    if width == 0 || source_width == 0 || source_height == 0 {
        return Err(ImagingError::InvalidDimensions(format!(
            "cannot render {source_width}x{source_height} at {width} columns"
        )));
    }

    // 0.55 compensates for glyph cells being taller than they are wide.
    let target_height =
        (source_height as f64 / source_width as f64 * width as f64 * 0.55) as u32;
    let gray = image.to_luma8();
    let scaled = imageops::resize(&gray, width, target_height.max(1), FilterType::CatmullRom);

    let columns = width as usize;
    let max_rows = char_limit.saturating_sub(columns + 1) / (columns + 1);
    let rows = (scaled.height() as usize).min(max_rows);

    let mut art = String::with_capacity(rows * (columns + 1));
    for y in 0..rows as u32 {
        for x in 0..width {
            let intensity = scaled.get_pixel(x, y).0[0] as usize;
            art.push(glyphs[intensity * glyphs.len() / 256]);
        }
        art.push('\n');
    }
    Ok(art)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heatmap_lut_anchors() {
        let lut = heatmap_lut();
        assert_eq!(lut[0], HEAT_COLD);
        assert_eq!(lut[127], HEAT_MID);
        assert_eq!(lut[255], HEAT_HOT);
    }

    #[test]
    fn test_lerp_rgb_endpoints() {
        assert_eq!(lerp_rgb(HEAT_COLD, HEAT_MID, 0, 127), HEAT_COLD);
        assert_eq!(lerp_rgb(HEAT_COLD, HEAT_MID, 127, 127), HEAT_MID);
    }

    #[test]
    fn test_ascii_glyph_index_stays_in_bounds() {
        let glyphs = 10usize;
        assert_eq!(255 * glyphs / 256, 9);
        assert_eq!(128 * glyphs / 256, 5);
    }
}
