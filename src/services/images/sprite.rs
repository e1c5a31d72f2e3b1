//! Pixel-level helpers for atlas sprites: crop, orient, sample, extrude.

use image::{DynamicImage, GenericImageView, Rgba, RgbaImage};

/// Raw channel values of one pixel, in the image's native channel count
/// (1 = L, 2 = LA, 3 = RGB, 4 = RGBA). Coordinates are clamped to the image.
pub fn sample_pixel(image: &DynamicImage, x: u32, y: u32) -> Vec<u8> {
    let x = x.min(image.width().saturating_sub(1));
    let y = y.min(image.height().saturating_sub(1));
    match image {
        DynamicImage::ImageLuma8(buf) => buf.get_pixel(x, y).0.to_vec(),
        DynamicImage::ImageLumaA8(buf) => buf.get_pixel(x, y).0.to_vec(),
        DynamicImage::ImageRgb8(buf) => buf.get_pixel(x, y).0.to_vec(),
        DynamicImage::ImageRgba8(buf) => buf.get_pixel(x, y).0.to_vec(),
        other => other.get_pixel(x, y).0.to_vec(),
    }
}

/// Split a pixel into a 24-bit RGB color and a 0..=1 alpha.
/// One or two channels are grayscale, the second one being alpha.
pub fn expand_pixel(pixel: &[u8]) -> (u32, f64) {
    match pixel {
        [r, g, b, a] => (pack_rgb(*r, *g, *b), f64::from(*a) / 255.0),
        [r, g, b] => (pack_rgb(*r, *g, *b), 1.0),
        [l, a] => (pack_rgb(*l, *l, *l), f64::from(*a) / 255.0),
        [l] => (pack_rgb(*l, *l, *l), 1.0),
        _ => (0, 1.0),
    }
}

fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
}

/// Crop a region, clamped to the image and at least 1x1.
pub fn crop_region(image: &DynamicImage, x: u32, y: u32, width: u32, height: u32) -> DynamicImage {
    let x = x.min(image.width().saturating_sub(1));
    let y = y.min(image.height().saturating_sub(1));
    let width = width.clamp(1, image.width().saturating_sub(x).max(1));
    let height = height.clamp(1, image.height().saturating_sub(y).max(1));
    image.crop_imm(x, y, width, height)
}

/// Rotate clockwise by `quarter_turns` * 90°, then mirror horizontally.
pub fn orient(image: &DynamicImage, quarter_turns: u8, mirror: bool) -> DynamicImage {
    let rotated = match quarter_turns % 4 {
        1 => image.rotate90(),
        2 => image.rotate180(),
        3 => image.rotate270(),
        _ => image.clone(),
    };
    if mirror {
        rotated.fliph()
    } else {
        rotated
    }
}

/// Grow the image by one pixel on every side, duplicating edge pixels, so
/// tiled fills never sample a transparent seam.
pub fn extrude(image: &DynamicImage) -> DynamicImage {
    let source = image.to_rgba8();
    let (width, height) = source.dimensions();
    if width == 0 || height == 0 {
        return DynamicImage::ImageRgba8(source);
    }

    let extruded = RgbaImage::from_fn(width + 2, height + 2, |x, y| {
        let sx = x.saturating_sub(1).min(width - 1);
        let sy = y.saturating_sub(1).min(height - 1);
        let Rgba(px) = *source.get_pixel(sx, sy);
        Rgba(px)
    });
    DynamicImage::ImageRgba8(extruded)
}

#[cfg(test)]
#[path = "tests/sprite_tests.rs"]
mod tests;
