//! Pure crop-geometry calculations.
//!
//! All functions here are pure and testable without any I/O or images.
//! Given the original dimensions and a normalized [`CropConfig`], the engine
//! derives the extraction rectangle in four moves:
//!
//! 1. Pick the largest "cover" rectangle matching the output aspect ratio
//!    that fits inside the original.
//! 2. Shrink it symmetrically by the zoom factor (smaller window, more
//!    magnification after resize), never below 1×1.
//! 3. Center it, then shift horizontally toward the focus side by
//!    `cut_percent` of the available slack. Vertical bias does not exist.
//! 4. Clamp against the image bounds to absorb rounding drift.

use crate::params::{CropConfig, Focus};

/// Pixel dimensions of a decoded image. Both sides are non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    width: u32,
    height: u32,
}

impl Dimensions {
    /// Returns `None` if either side is zero.
    pub fn new(width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        Some(Self { width, height })
    }

    pub fn width(self) -> u32 {
        self.width
    }

    pub fn height(self) -> u32 {
        self.height
    }
}

/// Extraction rectangle inside an original image.
///
/// Invariants, guaranteed by [`compute_crop`]: `width ≥ 1`, `height ≥ 1`,
/// `x + width` and `y + height` never exceed the original dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Compute the extraction rectangle for one request.
///
/// Deterministic: identical inputs always produce an identical rectangle.
pub fn compute_crop(orig: Dimensions, cfg: &CropConfig) -> CropRect {
    let w = orig.width() as f64;
    let h = orig.height() as f64;
    let out_ratio = cfg.width as f64 / cfg.height as f64;

    // Cover-fit base rectangle: match the output ratio, fill the limiting
    // dimension of the original.
    let (base_w, base_h) = if w / h > out_ratio {
        ((h * out_ratio).round(), h)
    } else {
        (w, (w / out_ratio).round())
    };

    // Zoom shrinks the window symmetrically; floor at 1px so extreme zoom
    // can never produce a zero-area extraction.
    let crop_w = (base_w / cfg.zoom).round().max(1.0);
    let crop_h = (base_h / cfg.zoom).round().max(1.0);

    let mut x = ((w - crop_w) / 2.0).round();
    let y = ((h - crop_h) / 2.0).round();

    // Horizontal focus bias: cut_percent of the slack, toward the focus side.
    // When the crop fills the width exactly the slack is zero and this is a
    // no-op.
    let max_shift = ((w - crop_w) * cfg.cut_percent).round();
    match cfg.focus {
        Focus::Left => x = (x - max_shift).max(0.0),
        Focus::Right => x = (x + max_shift).min(w - crop_w),
    }

    // Final clamp against rounding drift from the steps above.
    let x = x.clamp(0.0, w - crop_w);
    let y = y.clamp(0.0, h - crop_h);

    CropRect {
        x: x as u32,
        y: y as u32,
        width: crop_w as u32,
        height: crop_h as u32,
    }
}
