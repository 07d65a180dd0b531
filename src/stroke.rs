//! Border stroking onto an RGBA canvas.
//!
//! Strokes are drawn inside the rectangle: a border of thickness `t` around
//! `rect` paints the outermost `t` pixels of `rect` and nothing outside it.
//! Dash and dot runs restart at the top-left corner of every edge, so the
//! same inputs always produce the same pixels.

use image::{Rgba, RgbaImage};
use log::trace;

use crate::border::{Border, BorderType};
use crate::error::ErrorKind;
use crate::geometry::Rect;

/// Dotted runs: on and off, in multiples of the thickness.
pub const DOT_PATTERN: (u32, u32) = (1, 1);
/// Dashed runs: on and off, in multiples of the thickness.
pub const DASH_PATTERN: (u32, u32) = (4, 2);
/// Corner segment length in multiples of the thickness.
pub const CORNER_LENGTH: u32 = 8;

/// Stroke `border` around `rect`.
///
/// A percent thickness is relative to the shorter side of `rect`. The
/// resolved thickness is at least one pixel and at most half that side.
pub fn stroke(canvas: &mut RgbaImage, rect: Rect, border: &Border, ppi: f64) -> Result<(), ErrorKind> {
    let shorter = rect.width.min(rect.height);
    if shorter == 0 {
        return Ok(());
    }
    let requested = border.thickness.to_pixels(ppi, Some(shorter))?;
    let limit = (shorter / 2).max(1);
    let t = u32::try_from(requested).unwrap_or(0).clamp(1, limit);
    let color = border.color.to_rgba();
    trace!("stroke {} border, {t}px, around {rect:?}", border.kind);

    match border.kind {
        BorderType::Plain => outline(canvas, rect, t, None, color),
        BorderType::Dotted => outline(canvas, rect, t, Some(scale(DOT_PATTERN, t)), color),
        BorderType::Dashed => outline(canvas, rect, t, Some(scale(DASH_PATTERN, t)), color),
        BorderType::Corner => corners(canvas, rect, t, color),
    }
    Ok(())
}

fn scale((on, off): (u32, u32), t: u32) -> (u32, u32) {
    (on * t, off * t)
}

/// `(offset, length)` runs covering `len`, solid when `pattern` is `None`.
fn runs(len: u32, pattern: Option<(u32, u32)>) -> Vec<(u32, u32)> {
    match pattern {
        None => vec![(0, len)],
        Some((on, off)) => {
            let pitch = (on + off).max(1);
            (0..len)
                .step_by(pitch as usize)
                .map(|start| (start, on.min(len - start)))
                .collect()
        }
    }
}

fn outline(canvas: &mut RgbaImage, rect: Rect, t: u32, pattern: Option<(u32, u32)>, color: Rgba<u8>) {
    let Rect {
        x,
        y,
        width: w,
        height: h,
    } = rect;

    for (o, len) in runs(w, pattern) {
        fill_rect(canvas, Rect::new(x + o, y, len, t), color);
        fill_rect(canvas, Rect::new(x + o, y + h - t, len, t), color);
    }
    // Sides skip the rows the top and bottom edges already cover.
    let (lo, hi) = (t, h.saturating_sub(t));
    for (o, len) in runs(h, pattern) {
        let start = o.max(lo);
        let end = (o + len).min(hi);
        if start < end {
            fill_rect(canvas, Rect::new(x, y + start, t, end - start), color);
            fill_rect(canvas, Rect::new(x + w - t, y + start, t, end - start), color);
        }
    }
}

fn corners(canvas: &mut RgbaImage, rect: Rect, t: u32, color: Rgba<u8>) {
    let len = (CORNER_LENGTH * t)
        .min(rect.width / 2)
        .min(rect.height / 2)
        .max(t);
    let (left, top) = (rect.x, rect.y);
    let (right, bottom) = (rect.right(), rect.bottom());
    let arm = len - t;

    // Top-left, top-right, bottom-left, bottom-right: horizontal bar, then
    // the vertical bar below/above it.
    fill_rect(canvas, Rect::new(left, top, len, t), color);
    fill_rect(canvas, Rect::new(left, top + t, t, arm), color);

    fill_rect(canvas, Rect::new(right - len, top, len, t), color);
    fill_rect(canvas, Rect::new(right - t, top + t, t, arm), color);

    fill_rect(canvas, Rect::new(left, bottom - t, len, t), color);
    fill_rect(canvas, Rect::new(left, bottom - len, t, arm), color);

    fill_rect(canvas, Rect::new(right - len, bottom - t, len, t), color);
    fill_rect(canvas, Rect::new(right - t, bottom - len, t, arm), color);
}

/// Composite `color` over every pixel of `rect` that lies on the canvas.
pub(crate) fn fill_rect(canvas: &mut RgbaImage, rect: Rect, color: Rgba<u8>) {
    let x_end = rect.right().min(canvas.width());
    let y_end = rect.bottom().min(canvas.height());
    for py in rect.y..y_end {
        for px in rect.x..x_end {
            source_over(canvas.get_pixel_mut(px, py), color);
        }
    }
}

/// Integer Porter-Duff source-over. An opaque destination stays opaque.
fn source_over(dst: &mut Rgba<u8>, src: Rgba<u8>) {
    let sa = u32::from(src[3]);
    match sa {
        0 => return,
        255 => {
            *dst = src;
            return;
        }
        _ => {}
    }
    let div255 = |v: u32| (v + 127) / 255;
    let dst_weight = div255(u32::from(dst[3]) * (255 - sa));
    let out_a = sa + dst_weight;
    for c in 0..3 {
        let v = u32::from(src[c]) * sa + u32::from(dst[c]) * dst_weight;
        dst[c] = ((v + out_a / 2) / out_a) as u8;
    }
    dst[3] = out_a as u8;
}
