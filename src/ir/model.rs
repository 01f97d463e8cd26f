//! In-memory model of one parsed COCO annotation document.
//!
//! Only the fields the KITTI writer needs (plus a few cheap optional ones)
//! are kept. Every collection stays in source order: label line order and
//! image processing order are both derived from it.

use serde::{Deserialize, Serialize};

use super::bbox::BBoxXYXY;
use super::ids::{CategoryId, ImageId};

/// A parsed COCO document: the three top-level arrays, in source order.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AnnotationDocument {
    pub images: Vec<Image>,
    pub categories: Vec<Category>,
    pub annotations: Vec<Annotation>,
}

/// A COCO image entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub id: ImageId,

    /// File name relative to the split's images directory.
    pub file_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

impl Image {
    /// Creates an image entry without dimensions.
    pub fn new(id: impl Into<ImageId>, file_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            file_name: file_name.into(),
            width: None,
            height: None,
        }
    }
}

/// A COCO category entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,

    /// Display name as written in the document (may contain spaces).
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supercategory: Option<String>,
}

impl Category {
    pub fn new(id: impl Into<CategoryId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            supercategory: None,
        }
    }
}

/// A COCO annotation entry, with its box already in corner form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// COCO annotation id, when the document has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    pub image_id: ImageId,
    pub category_id: CategoryId,
    pub bbox: BBoxXYXY,
}

impl Annotation {
    pub fn new(
        image_id: impl Into<ImageId>,
        category_id: impl Into<CategoryId>,
        bbox: BBoxXYXY,
    ) -> Self {
        Self {
            id: None,
            image_id: image_id.into(),
            category_id: category_id.into(),
            bbox,
        }
    }
}
