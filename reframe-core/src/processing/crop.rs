//! Crop rectangle computation.
//!
//! The cropper keeps one full source dimension and cuts the other down so the
//! result matches the target aspect ratio as closely as integer pixels allow.
//! All arithmetic is done on integers so `floor(H * 9 / 16)` is exact.

use std::fmt;

use crate::error::{CoreError, CoreResult};

/// A width:height ratio with non-zero terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AspectRatio {
    width: u32,
    height: u32,
}

impl AspectRatio {
    /// Portrait 9:16, the ratio used for short-form vertical video.
    pub const VERTICAL_9_16: AspectRatio = AspectRatio {
        width: 9,
        height: 16,
    };

    /// Returns `None` if either term is zero.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Option<Self> {
        (width > 0 && height > 0).then_some(Self { width, height })
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `floor(height * width_term / height_term)`
    fn width_for_height(&self, height: u32) -> u64 {
        u64::from(height) * u64::from(self.width) / u64::from(self.height)
    }

    /// `floor(width * height_term / width_term)`
    fn height_for_width(&self, width: u32) -> u64 {
        u64::from(width) * u64::from(self.height) / u64::from(self.width)
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.width, self.height)
    }
}

/// Region of a source frame kept in the output, as corner coordinates.
///
/// `x2` and `y2` are exclusive, so `width() == x2 - x1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub x1: u32,
    pub y1: u32,
    pub x2: u32,
    pub y2: u32,
}

impl CropRect {
    #[must_use]
    pub fn width(&self) -> u32 {
        self.x2 - self.x1
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.y2 - self.y1
    }

    /// True when both output dimensions can be encoded as 4:2:0 without padding.
    #[must_use]
    pub fn has_even_size(&self) -> bool {
        self.width() % 2 == 0 && self.height() % 2 == 0
    }

    /// ffmpeg `crop` filter expression (`crop=w:h:x:y`).
    #[must_use]
    pub fn ffmpeg_filter(&self) -> String {
        format!(
            "crop={}:{}:{}:{}",
            self.width(),
            self.height(),
            self.x1,
            self.y1
        )
    }
}

impl fmt::Display for CropRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "x1={}, y1={}, x2={}, y2={}",
            self.x1, self.y1, self.x2, self.y2
        )
    }
}

/// Computes the centered crop of a `width` x `height` frame for `ratio`.
///
/// The full height is kept when the ratio-derived width fits inside the
/// frame; otherwise the full width is kept and the height is derived instead.
/// Zero-sized sources, and sources too small to yield a non-empty crop, are
/// rejected.
pub fn compute_crop(width: u32, height: u32, ratio: AspectRatio) -> CoreResult<CropRect> {
    if width == 0 || height == 0 {
        return Err(CoreError::InvalidDimensions { width, height });
    }

    let mut new_height = u64::from(height);
    let mut new_width = ratio.width_for_height(height);

    if new_width > u64::from(width) {
        new_width = u64::from(width);
        new_height = ratio.height_for_width(width);
    }

    // The fallback branch only runs when the derived height is below the
    // source height, so both values fit the source bounds here.
    let new_width = new_width.min(u64::from(width)) as u32;
    let new_height = new_height.min(u64::from(height)) as u32;

    if new_width == 0 || new_height == 0 {
        return Err(CoreError::DegenerateCrop {
            width,
            height,
            ratio: ratio.to_string(),
        });
    }

    let x1 = (width - new_width) / 2;
    let y1 = (height - new_height) / 2;

    let rect = CropRect {
        x1,
        y1,
        x2: x1 + new_width,
        y2: y1 + new_height,
    };
    log::debug!("Computed crop for {width}x{height} at {ratio}: {rect}");
    Ok(rect)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NINE_SIXTEEN: AspectRatio = AspectRatio::VERTICAL_9_16;

    #[test]
    fn landscape_1080p_keeps_height() {
        let rect = compute_crop(1920, 1080, NINE_SIXTEEN).unwrap();
        assert_eq!(
            rect,
            CropRect {
                x1: 656,
                y1: 0,
                x2: 1263,
                y2: 1080
            }
        );
        assert_eq!(rect.width(), 607);
        assert_eq!(rect.height(), 1080);
    }

    #[test]
    fn portrait_1080p_is_untouched() {
        let rect = compute_crop(1080, 1920, NINE_SIXTEEN).unwrap();
        assert_eq!(
            rect,
            CropRect {
                x1: 0,
                y1: 0,
                x2: 1080,
                y2: 1920
            }
        );
    }

    #[test]
    fn small_landscape_source() {
        let rect = compute_crop(400, 300, NINE_SIXTEEN).unwrap();
        assert_eq!(rect.width(), 168);
        assert_eq!(rect.height(), 300);
        assert_eq!(rect.x1, 116);
        assert_eq!(rect.y1, 0);
    }

    #[test]
    fn tall_narrow_source_falls_back_to_width() {
        // floor(3000 * 9 / 16) = 1687 > 1000, so the width is kept.
        let rect = compute_crop(1000, 3000, NINE_SIXTEEN).unwrap();
        assert_eq!(rect.width(), 1000);
        assert_eq!(rect.height(), 1777);
        assert_eq!(rect.x1, 0);
        assert_eq!(rect.y1, 611);
        assert_eq!(rect.y2, 2388);
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert!(matches!(
            compute_crop(0, 1080, NINE_SIXTEEN),
            Err(CoreError::InvalidDimensions {
                width: 0,
                height: 1080
            })
        ));
        assert!(matches!(
            compute_crop(1920, 0, NINE_SIXTEEN),
            Err(CoreError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn single_row_source_is_degenerate() {
        assert!(matches!(
            compute_crop(100, 1, NINE_SIXTEEN),
            Err(CoreError::DegenerateCrop { .. })
        ));
    }

    #[test]
    fn rect_stays_in_bounds_and_centered() {
        for width in (2..=4000).step_by(37) {
            for height in (2..=4000).step_by(41) {
                let rect = compute_crop(width, height, NINE_SIXTEEN).unwrap();
                assert!(rect.x1 < rect.x2 && rect.x2 <= width, "{width}x{height}");
                assert!(rect.y1 < rect.y2 && rect.y2 <= height, "{width}x{height}");

                let kept_width = rect.width() == width;
                let kept_height = rect.height() == height;
                assert!(kept_width || kept_height, "{width}x{height}");
                if kept_height {
                    assert_eq!(u64::from(rect.width()), u64::from(height) * 9 / 16);
                } else {
                    assert_eq!(u64::from(rect.height()), u64::from(width) * 16 / 9);
                }

                assert!((width - rect.width()).abs_diff(rect.x1 * 2) <= 1);
                assert!((height - rect.height()).abs_diff(rect.y1 * 2) <= 1);
            }
        }
    }

    #[test]
    fn ffmpeg_filter_uses_size_then_offset() {
        let rect = compute_crop(1920, 1080, NINE_SIXTEEN).unwrap();
        assert_eq!(rect.ffmpeg_filter(), "crop=607:1080:656:0");
        assert!(!rect.has_even_size());
    }

    #[test]
    fn aspect_ratio_rejects_zero_terms() {
        assert!(AspectRatio::new(0, 16).is_none());
        assert!(AspectRatio::new(9, 0).is_none());
        assert_eq!(AspectRatio::new(9, 16), Some(NINE_SIXTEEN));
        assert_eq!(NINE_SIXTEEN.to_string(), "9:16");
    }
}
