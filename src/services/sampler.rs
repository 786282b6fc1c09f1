use crate::models::analysis::RgbSample;
use crate::models::annotation::AnchorPoint;
use image::RgbImage;

/// Average a 3x3 pixel neighborhood centered on the anchor.
///
/// Offsets that fall outside the image are clamped to the nearest edge
/// pixel, so anchors near (or past) the border still sample deterministically
/// instead of aborting the slot. Returns the integer-rounded mean of each
/// channel across the nine samples.
pub fn sample_mean_rgb(image: &RgbImage, anchor: &AnchorPoint) -> RgbSample {
    let (width, height) = image.dimensions();
    let max_x = width.saturating_sub(1) as i64;
    let max_y = height.saturating_sub(1) as i64;

    let center_x = anchor.x.round() as i64;
    let center_y = anchor.y.round() as i64;

    let mut sums = [0u32; 3];
    for dy in -1..=1 {
        for dx in -1..=1 {
            let px = (center_x + dx).clamp(0, max_x) as u32;
            let py = (center_y + dy).clamp(0, max_y) as u32;

            let pixel = image.get_pixel(px, py);
            sums[0] += pixel[0] as u32;
            sums[1] += pixel[1] as u32;
            sums[2] += pixel[2] as u32;
        }
    }

    RgbSample {
        r: (sums[0] as f64 / 9.0).round() as u8,
        g: (sums[1] as f64 / 9.0).round() as u8,
        b: (sums[2] as f64 / 9.0).round() as u8,
    }
}
