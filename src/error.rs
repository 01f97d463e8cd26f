use std::path::PathBuf;
use thiserror::Error;

use crate::ir::{CategoryId, ImageId};

/// The main error type for coco2kitti operations.
#[derive(Debug, Error)]
pub enum Coco2KittiError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed COCO JSON in {path}: {source}")]
    CocoJsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(
        "Annotation on image {image_id} ('{file_name}') in {path} references unknown category {category_id}"
    )]
    UnknownCategory {
        path: PathBuf,
        image_id: ImageId,
        file_name: String,
        category_id: CategoryId,
    },

    #[error("Failed to copy image {from} to {to}: {source}")]
    ImageCopy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write label file {path}: {source}")]
    LabelWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse split config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid split config {path}: {message}")]
    ConfigInvalid { path: PathBuf, message: String },

    #[error("Split '{split}' failed: {source}")]
    SplitFailed {
        split: String,
        #[source]
        source: Box<Coco2KittiError>,
    },

    #[error("Failed to write JSON report: {0}")]
    ReportWrite(#[source] serde_json::Error),
}

impl Coco2KittiError {
    /// Wraps an I/O error with the path it happened on.
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Coco2KittiError::Io {
            path: path.into(),
            source,
        }
    }
}
