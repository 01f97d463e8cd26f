//! COCO JSON format reader.
//!
//! COCO bounding boxes use `[x, y, width, height]` format where:
//! - `(x, y)` is the top-left corner in absolute pixel coordinates
//! - `width` and `height` are the dimensions
//!
//! The reader converts them to corner form on the way in. Only the keys the
//! KITTI writer needs are required; everything else in the document
//! (`info`, `licenses`, `segmentation`, `area`, ...) is ignored. The optional
//! fields that are kept (`width`, `height`, `supercategory`, annotation `id`)
//! are read best-effort: a value of an unexpected type becomes `None`.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use super::model::{Annotation, AnnotationDocument, Category, Image};
use super::{BBoxXYXY, CategoryId, ImageId};
use crate::error::Coco2KittiError;

// ============================================================================
// COCO Schema Types (internal to this module)
// ============================================================================

/// Top-level COCO dataset structure.
#[derive(Debug, Deserialize)]
struct CocoDataset {
    images: Vec<CocoImage>,
    annotations: Vec<CocoAnnotation>,
    categories: Vec<CocoCategory>,
}

/// COCO image entry.
#[derive(Debug, Deserialize)]
struct CocoImage {
    id: i64,
    file_name: String,

    #[serde(default, deserialize_with = "lenient_dimension")]
    width: Option<u32>,

    #[serde(default, deserialize_with = "lenient_dimension")]
    height: Option<u32>,
}

/// COCO category entry.
#[derive(Debug, Deserialize)]
struct CocoCategory {
    id: i64,
    name: String,

    #[serde(default, deserialize_with = "lenient")]
    supercategory: Option<String>,
}

/// COCO annotation entry.
#[derive(Debug, Deserialize)]
struct CocoAnnotation {
    #[serde(default, deserialize_with = "lenient")]
    id: Option<i64>,

    image_id: i64,
    category_id: i64,

    /// COCO bbox format: [x, y, width, height] with (x,y) as top-left corner
    bbox: [f64; 4],
}

/// Deserializes an optional field, mapping a value of the wrong type to `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Like [`lenient`], but also accepts whole-number floats such as `640.0`.
fn lenient_dimension<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value
        .as_f64()
        .filter(|v| v.fract() == 0.0 && *v >= 0.0 && *v <= f64::from(u32::MAX))
        .map(|v| v as u32))
}

// ============================================================================
// Public API
// ============================================================================

/// Reads an annotation document from a COCO JSON file.
///
/// # Errors
/// [`Coco2KittiError::Io`] if the file cannot be opened, and
/// [`Coco2KittiError::CocoJsonParse`] if a required key is missing or has
/// the wrong shape.
///
/// # Example
/// ```no_run
/// use std::path::Path;
/// use coco2kitti::ir::io_coco_json::read_coco_json;
///
/// let document = read_coco_json(Path::new("train/_annotations.coco.json"))?;
/// # Ok::<(), coco2kitti::Coco2KittiError>(())
/// ```
pub fn read_coco_json(path: &Path) -> Result<AnnotationDocument, Coco2KittiError> {
    let file = File::open(path).map_err(|source| Coco2KittiError::io(path, source))?;
    let reader = BufReader::new(file);

    let coco: CocoDataset =
        serde_json::from_reader(reader).map_err(|source| Coco2KittiError::CocoJsonParse {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(coco_to_document(coco))
}

/// Reads an annotation document from a COCO JSON string.
///
/// Useful for testing without file I/O.
pub fn from_coco_str(json: &str) -> Result<AnnotationDocument, serde_json::Error> {
    let coco: CocoDataset = serde_json::from_str(json)?;
    Ok(coco_to_document(coco))
}

/// Reads an annotation document from a COCO JSON byte slice.
///
/// Useful for fuzzing and processing raw bytes without UTF-8 validation overhead.
pub fn from_coco_slice(bytes: &[u8]) -> Result<AnnotationDocument, serde_json::Error> {
    let coco: CocoDataset = serde_json::from_slice(bytes)?;
    Ok(coco_to_document(coco))
}

// ============================================================================
// Conversion: COCO -> document model
// ============================================================================

fn coco_to_document(coco: CocoDataset) -> AnnotationDocument {
    let images = coco
        .images
        .into_iter()
        .map(|img| Image {
            id: ImageId::new(img.id),
            file_name: img.file_name,
            width: img.width,
            height: img.height,
        })
        .collect();

    let categories = coco
        .categories
        .into_iter()
        .map(|cat| Category {
            id: CategoryId::new(cat.id),
            name: cat.name,
            supercategory: cat.supercategory,
        })
        .collect();

    let annotations = coco
        .annotations
        .into_iter()
        .map(|ann| {
            let [x, y, w, h] = ann.bbox;
            Annotation {
                id: ann.id,
                image_id: ImageId::new(ann.image_id),
                category_id: CategoryId::new(ann.category_id),
                bbox: BBoxXYXY::from_xywh(x, y, w, h),
            }
        })
        .collect();

    AnnotationDocument {
        images,
        categories,
        annotations,
    }
}

// ============================================================================
// Tests
// ============================================================================
