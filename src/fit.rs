//! Scale-to-fill with center crop.
//!
//! A source image is first cropped (centered) to the target aspect ratio,
//! then resized to exactly the target size. Equal sizes pass through
//! untouched so pixel-exact layouts stay pixel-exact.

use image::RgbaImage;
use image::imageops::{self, FilterType};

use crate::geometry::{Rect, Size};

/// Resampling filter used when a cell is not the same size as its input.
pub const FILTER: FilterType = FilterType::CatmullRom;

/// Scale `source` to exactly `target`, center-cropping any aspect mismatch.
pub fn fill(source: &RgbaImage, target: Size) -> RgbaImage {
    let (sw, sh) = source.dimensions();
    if (sw, sh) == (target.width, target.height) {
        return source.clone();
    }
    let crop = crop_to_aspect(sw, sh, target.width, target.height);
    let cropped = if crop.size() == Size::new(sw, sh) {
        source.clone()
    } else {
        imageops::crop_imm(source, crop.x, crop.y, crop.width, crop.height).to_image()
    };
    if crop.size() == target {
        cropped
    } else {
        imageops::resize(&cropped, target.width, target.height, FILTER)
    }
}

/// Centered crop of a `sw`×`sh` source matching the `tw`:`th` aspect ratio.
pub fn crop_to_aspect(sw: u32, sh: u32, tw: u32, th: u32) -> Rect {
    let full = Rect::new(0, 0, sw, sh);
    // Cross-multiply so exact matches avoid floating point.
    let cross_s = u64::from(sw) * u64::from(th);
    let cross_t = u64::from(sh) * u64::from(tw);
    if cross_s == cross_t {
        return full;
    }

    if cross_s > cross_t {
        // Source is wider: keep full height, crop width.
        let new_w = proportional(tw, th, sh, false, sw, sh);
        if new_w >= sw {
            return full;
        }
        Rect::new((sw - new_w) / 2, 0, new_w, sh)
    } else {
        // Source is taller: keep full width, crop height.
        let new_h = proportional(tw, th, sw, true, sw, sh);
        if new_h >= sh {
            return full;
        }
        Rect::new(0, (sh - new_h) / 2, sw, new_h)
    }
}

/// Free dimension of a `ratio_w`:`ratio_h` box given one fixed side, snapped
/// to the source or target dimension when that is within rounding loss.
///
/// Snapping keeps e.g. 1200×400 → 100×33 at 100 rather than 99.
fn proportional(
    ratio_w: u32,
    ratio_h: u32,
    basis: u32,
    basis_is_width: bool,
    target_w: u32,
    target_h: u32,
) -> u32 {
    let ratio = f64::from(ratio_w) / f64::from(ratio_h);

    let snap_amount = if basis_is_width {
        rounding_loss_height(ratio_w, ratio_h, target_h)
    } else {
        rounding_loss_width(ratio_w, ratio_h, target_w)
    };
    let snap_a = if basis_is_width { ratio_h } else { ratio_w };
    let snap_b = if basis_is_width { target_h } else { target_w };

    let float = if basis_is_width {
        f64::from(basis) / ratio
    } else {
        ratio * f64::from(basis)
    };

    let delta_a = (float - f64::from(snap_a)).abs();
    let delta_b = (float - f64::from(snap_b)).abs();

    let v = if delta_a <= snap_amount && delta_a <= delta_b {
        snap_a
    } else if delta_b <= snap_amount {
        snap_b
    } else {
        num_traits::cast::<f64, u32>(float.round()).unwrap_or(u32::MAX)
    };
    v.max(1)
}

fn rounding_loss_width(ratio_w: u32, ratio_h: u32, target_width: u32) -> f64 {
    let ratio = f64::from(ratio_w) / f64::from(ratio_h);
    let recreate_y = f64::from(ratio_h) * (f64::from(target_width) / f64::from(ratio_w));
    (f64::from(target_width) - recreate_y.round() * ratio).abs()
}

fn rounding_loss_height(ratio_w: u32, ratio_h: u32, target_height: u32) -> f64 {
    let ratio = f64::from(ratio_w) / f64::from(ratio_h);
    let recreate_x = f64::from(ratio_w) * (f64::from(target_height) / f64::from(ratio_h));
    (f64::from(target_height) - recreate_x.round() / ratio).abs()
}
