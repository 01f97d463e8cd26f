#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

pub const SAMPLE_COCO: &str = include_str!("../fixtures/sample.coco.json");

/// Image files referenced by `SAMPLE_COCO`.
pub const SAMPLE_IMAGES: [&str; 3] = ["frame_0001.jpg", "frame_0002.jpg", "frame_0003.jpg"];

/// A tiny but valid 24-bit BMP, so copied "images" are real image bytes.
pub fn bmp_bytes(width: u32, height: u32) -> Vec<u8> {
    let row_stride = (width * 3).div_ceil(4) * 4;
    let pixel_array_size = row_stride * height;
    let file_size = 54 + pixel_array_size;

    let mut bytes = Vec::with_capacity(file_size as usize);
    bytes.extend_from_slice(b"BM");
    bytes.extend_from_slice(&file_size.to_le_bytes());
    bytes.extend_from_slice(&[0, 0, 0, 0]);
    bytes.extend_from_slice(&54u32.to_le_bytes());

    bytes.extend_from_slice(&40u32.to_le_bytes());
    bytes.extend_from_slice(&(width as i32).to_le_bytes());
    bytes.extend_from_slice(&(height as i32).to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&24u16.to_le_bytes());
    bytes.extend_from_slice(&[0u8; 24]);

    // Fill pixels with a gradient so two images of the same size still differ.
    bytes.extend((0..pixel_array_size).map(|i| (i % 251) as u8 ^ (width as u8)));
    bytes
}

pub fn write_image(path: &Path, width: u32, height: u32) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(path, bmp_bytes(width, height)).expect("write image file");
}

/// Writes `json` as `<root>/<split>/_annotations.coco.json` plus the given images.
pub fn write_split(root: &Path, split: &str, json: &str, images: &[&str]) -> PathBuf {
    let dir = root.join(split);
    fs::create_dir_all(&dir).expect("create split dir");
    fs::write(dir.join("_annotations.coco.json"), json).expect("write annotations");
    for (idx, name) in images.iter().enumerate() {
        write_image(&dir.join(name), 4 + idx as u32, 4);
    }
    dir
}

/// Reads every `.txt` under `labels_dir`, keyed by relative path, sorted.
pub fn read_labels(labels_dir: &Path) -> Vec<(String, String)> {
    let mut out = Vec::new();
    collect_labels(labels_dir, labels_dir, &mut out);
    out.sort();
    out
}

fn collect_labels(root: &Path, dir: &Path, out: &mut Vec<(String, String)>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries {
        let path = entry.expect("read dir entry").path();
        if path.is_dir() {
            collect_labels(root, &path, out);
        } else if path.extension().is_some_and(|ext| ext == "txt") {
            let rel = path
                .strip_prefix(root)
                .expect("label under root")
                .to_string_lossy()
                .replace('\\', "/");
            out.push((rel, fs::read_to_string(&path).expect("read label")));
        }
    }
}
