#![allow(dead_code)]

use std::fs;
use std::path::Path;

use proptest::prelude::*;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(32);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// A generated COCO document plus which of its images exist on disk.
#[derive(Clone, Debug)]
pub struct DocSpec {
    /// Category names; category id is the index.
    pub categories: Vec<String>,
    /// One flag per image (id = index): is the image file present?
    pub present: Vec<bool>,
    /// `(image index, category index, [x, y, w, h])` in document order.
    pub annotations: Vec<(usize, usize, [f64; 4])>,
}

impl DocSpec {
    pub fn file_name(image: usize) -> String {
        format!("img_{image:03}.jpg")
    }

    pub fn to_json(&self) -> String {
        let categories: Vec<_> = self
            .categories
            .iter()
            .enumerate()
            .map(|(id, name)| serde_json::json!({"id": id, "name": name, "supercategory": "none"}))
            .collect();
        let images: Vec<_> = (0..self.present.len())
            .map(|id| {
                serde_json::json!({
                    "id": id,
                    "file_name": Self::file_name(id),
                    "width": 640,
                    "height": 480
                })
            })
            .collect();
        let annotations: Vec<_> = self
            .annotations
            .iter()
            .enumerate()
            .map(|(id, (image, category, bbox))| {
                serde_json::json!({
                    "id": id,
                    "image_id": image,
                    "category_id": category,
                    "bbox": bbox,
                    "area": bbox[2] * bbox[3],
                    "iscrowd": 0,
                    "segmentation": []
                })
            })
            .collect();

        serde_json::json!({
            "categories": categories,
            "images": images,
            "annotations": annotations
        })
        .to_string()
    }

    /// Writes the annotation file and the present images into `dir`.
    pub fn write_to(&self, dir: &Path) {
        fs::create_dir_all(dir).expect("create images dir");
        fs::write(dir.join("_annotations.coco.json"), self.to_json()).expect("write json");
        for (idx, present) in self.present.iter().enumerate() {
            if *present {
                fs::write(dir.join(Self::file_name(idx)), format!("image {idx}"))
                    .expect("write image");
            }
        }
    }

    /// Expected label file contents for a present image.
    pub fn expected_label(&self, image: usize) -> String {
        self.annotations
            .iter()
            .filter(|(img, _, _)| *img == image)
            .map(|(_, cat, [x, y, w, h])| {
                format!(
                    "{} 0 0 0 {:.2} {:.2} {:.2} {:.2} 0 0 0 0 0 0 0\n",
                    self.categories[*cat].replace(' ', "_"),
                    x,
                    y,
                    x + w,
                    y + h
                )
            })
            .collect()
    }

    pub fn present_count(&self) -> usize {
        self.present.iter().filter(|p| **p).count()
    }
}

fn arb_coord() -> impl Strategy<Value = f64> {
    prop_oneof![
        (0u32..=400_000u32).prop_map(|v| v as f64 / 100.0),
        -1000.0f64..4000.0f64,
    ]
}

fn arb_category_name() -> impl Strategy<Value = String> {
    "[a-z]{1,8}( [a-z]{1,8}){0,2}"
}

pub fn arb_doc_spec(
    max_categories: usize,
    max_images: usize,
    max_annotations: usize,
) -> impl Strategy<Value = DocSpec> {
    (
        proptest::collection::vec(arb_category_name(), 1..=max_categories),
        proptest::collection::vec(any::<bool>(), 1..=max_images),
    )
        .prop_flat_map(move |(categories, present)| {
            let n_cats = categories.len();
            let n_imgs = present.len();
            let ann = (
                0..n_imgs,
                0..n_cats,
                proptest::array::uniform4(arb_coord()),
            );
            proptest::collection::vec(ann, 0..=max_annotations).prop_map(move |annotations| {
                DocSpec {
                    categories: categories.clone(),
                    present: present.clone(),
                    annotations,
                }
            })
        })
}
