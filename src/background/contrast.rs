use image::RgbaImage;

use crate::foundation::core::TextTone;

/// Mean luminance below which a background counts as dark.
pub const DARK_THRESHOLD: f64 = 128.0;

/// Mean of `(r + g + b) / 3` over the central box spanning 1/4..3/4 of each axis.
pub fn center_luminance(pixels: &RgbaImage) -> f64 {
    let (w, h) = pixels.dimensions();
    let (x0, x1) = (w / 4, (3 * w / 4).max(w / 4 + 1).min(w));
    let (y0, y1) = (h / 4, (3 * h / 4).max(h / 4 + 1).min(h));

    let mut sum = 0u64;
    let mut count = 0u64;
    for y in y0..y1 {
        for x in x0..x1 {
            let [r, g, b, _] = pixels.get_pixel(x, y).0;
            sum += u64::from(r) + u64::from(g) + u64::from(b);
            count += 1;
        }
    }
    if count == 0 {
        return 255.0;
    }
    sum as f64 / (count as f64 * 3.0)
}

/// Light text on dark backgrounds, dark text on light ones.
pub fn choose_text_tone(pixels: &RgbaImage) -> TextTone {
    if center_luminance(pixels) < DARK_THRESHOLD {
        TextTone::Light
    } else {
        TextTone::Dark
    }
}

#[cfg(test)]
#[path = "../../tests/unit/background/contrast.rs"]
mod tests;
