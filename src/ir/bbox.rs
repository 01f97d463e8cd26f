//! Bounding box type in corner (XYXY) form.

use serde::{Deserialize, Serialize};

/// An axis-aligned pixel-space bounding box (xmin, ymin, xmax, ymax).
///
/// COCO stores boxes as `[x, y, width, height]` with a top-left origin; KITTI
/// wants the two corners. The constructor does NOT enforce `min <= max`:
/// a negative COCO width is carried through to the label file unchanged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BBoxXYXY {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

impl BBoxXYXY {
    /// Creates a new bounding box from explicit corners.
    #[inline]
    pub fn from_xyxy(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        Self {
            xmin,
            ymin,
            xmax,
            ymax,
        }
    }

    /// Creates a box from COCO's top-left `[x, y, width, height]`.
    #[inline]
    pub fn from_xywh(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self::from_xyxy(x, y, x + w, y + h)
    }

    #[inline]
    pub fn xmin(&self) -> f64 {
        self.xmin
    }

    #[inline]
    pub fn ymin(&self) -> f64 {
        self.ymin
    }

    #[inline]
    pub fn xmax(&self) -> f64 {
        self.xmax
    }

    #[inline]
    pub fn ymax(&self) -> f64 {
        self.ymax
    }

    /// Width of the box. Negative if the source width was negative.
    #[inline]
    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    /// Height of the box. Negative if the source height was negative.
    #[inline]
    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }
}
