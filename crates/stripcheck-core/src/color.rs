//! HSV conversion and zone coverage sampling.

use crate::config::{HsvRange, HUE_LIMIT};
use crate::model::Rect;
use image::{Rgb, RgbImage};
use palette::{FromColor, Hsv, Srgb};

/// Convert an 8-bit RGB pixel to 8-bit HSV.
///
/// Hue is stored as degrees halved so it fits a byte (`[0, 180)`); saturation
/// and value are scaled to `[0, 255]`. Achromatic pixels get hue 0.
pub fn rgb_to_hsv(pixel: Rgb<u8>) -> [u8; 3] {
    let [r, g, b] = pixel.0;
    let hsv: Hsv = Hsv::from_color(Srgb::new(r, g, b).into_format::<f32>());

    let hue = (hsv.hue.into_positive_degrees() / 2.0).round() as u32 % HUE_LIMIT as u32;
    let saturation = (hsv.saturation.clamp(0.0, 1.0) * 255.0).round() as u8;
    let value = (hsv.value.clamp(0.0, 1.0) * 255.0).round() as u8;

    [hue as u8, saturation, value]
}

/// Fraction of pixels in `rect` whose HSV color falls inside `range`.
///
/// The rectangle is intersected with the image first. An empty rectangle, or
/// one entirely outside the image, yields exactly `0.0`.
pub fn sample(image: &RgbImage, rect: Rect, range: &HsvRange) -> f64 {
    if rect.is_empty() {
        return 0.0;
    }

    let x_end = rect.right().min(image.width() as u64) as u32;
    let y_end = rect.bottom().min(image.height() as u64) as u32;
    if rect.x >= x_end || rect.y >= y_end {
        return 0.0;
    }

    let mut hits = 0u64;
    for y in rect.y..y_end {
        for x in rect.x..x_end {
            if range.contains(rgb_to_hsv(*image.get_pixel(x, y))) {
                hits += 1;
            }
        }
    }

    let total = (x_end - rect.x) as u64 * (y_end - rect.y) as u64;
    hits as f64 / total as f64
}
