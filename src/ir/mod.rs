//! Data model and format I/O for coco2kitti.
//!
//! A COCO document is parsed into an [`AnnotationDocument`] (boxes already
//! in corner form), indexed with [`CategoryIndex`], [`ImageIndex`] and
//! [`AnnotationsByImage`], and rendered line by line as [`KittiObject`]s.
//!
//! # Example
//!
//! ```
//! use coco2kitti::ir::io_coco_json::from_coco_str;
//! use coco2kitti::ir::{CategoryIndex, KittiObject};
//!
//! let doc = from_coco_str(r#"{
//!     "categories": [{"id": 1, "name": "traffic light"}],
//!     "images": [{"id": 5, "file_name": "a.jpg"}],
//!     "annotations": [{"image_id": 5, "category_id": 1, "bbox": [1, 2, 3, 4]}]
//! }"#).unwrap();
//!
//! let categories = CategoryIndex::build(&doc);
//! let ann = &doc.annotations[0];
//! let name = categories.name(ann.category_id).unwrap();
//! let line = KittiObject::new(name, ann.bbox).to_string();
//! assert_eq!(line, "traffic_light 0 0 0 1.00 2.00 4.00 6.00 0 0 0 0 0 0 0");
//! ```

mod bbox;
mod ids;
mod index;
pub mod io_coco_json;
pub mod io_kitti;
mod model;

// Re-export core types for convenient access
pub use bbox::BBoxXYXY;
pub use ids::{CategoryId, ImageId};
pub use index::{AnnotationsByImage, CategoryIndex, ImageIndex};
pub use io_kitti::{kitti_class_name, KittiObject};
pub use model::{Annotation, AnnotationDocument, Category, Image};
