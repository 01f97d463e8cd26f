//! Fuzz target for parse + index + render.
//!
//! Any document the reader accepts must render without panicking, and each
//! rendered label line must have exactly 15 fields.
//!
//! Run with:
//!   cargo +nightly fuzz run kitti_render

#![no_main]

use coco2kitti::ir::io_coco_json::from_coco_slice;
use coco2kitti::ir::{AnnotationsByImage, CategoryIndex, ImageIndex, KittiObject};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 1024 * 1024 {
        return;
    }

    let Ok(doc) = from_coco_slice(data) else {
        return;
    };

    let categories = CategoryIndex::build(&doc);
    let images = ImageIndex::build(&doc);
    let groups = AnnotationsByImage::build(&doc);

    for image in images.iter() {
        for ann in groups.for_image(image.id) {
            let Some(name) = categories.name(ann.category_id) else {
                continue;
            };
            let line = KittiObject::new(name, ann.bbox).to_string();
            assert_eq!(line.split(' ').count(), 15);
        }
    }
});
