//! Dataset splits: which COCO files to convert, and where to put the output.
//!
//! A [`DatasetConfig`] is an ordered list of splits, each naming its
//! annotation file, image directory and output directory. It can be derived
//! from the conventional export layout
//!
//! ```text
//! <root>/train/_annotations.coco.json   (+ images next to it)
//! <root>/valid/_annotations.coco.json
//! <root>/test/_annotations.coco.json    (optional)
//! ```
//!
//! or loaded from a YAML file:
//!
//! ```yaml
//! splits:
//!   - name: train
//!     annotations: train/_annotations.coco.json
//!     images: train
//!     output: kitti/train
//!   - name: test
//!     annotations: test/_annotations.coco.json
//!     images: test
//!     output: kitti/test
//!     optional: true
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::conversion::{convert, ConvertOptions, DatasetSummary, SplitSummary};
use crate::error::Coco2KittiError;

/// File name of a split's annotations in the conventional layout.
pub const ANNOTATIONS_FILE_NAME: &str = "_annotations.coco.json";

/// `(split name, optional)` in conversion order for the conventional layout.
pub const DEFAULT_SPLITS: [(&str, bool); 3] = [("train", false), ("valid", false), ("test", true)];

/// One split to convert.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SplitConfig {
    pub name: String,
    pub annotations: PathBuf,
    pub images: PathBuf,
    pub output: PathBuf,

    /// Skip the split (instead of failing) when `annotations` does not exist.
    #[serde(default)]
    pub optional: bool,
}

/// Ordered list of splits.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatasetConfig {
    pub splits: Vec<SplitConfig>,
}

impl DatasetConfig {
    /// Splits for the conventional layout under `root`.
    ///
    /// Output goes to `output_root/<split>`, defaulting to `root/kitti`.
    pub fn from_dataset_root(root: &Path, output_root: Option<&Path>) -> Self {
        let output_root = output_root
            .map(Path::to_path_buf)
            .unwrap_or_else(|| root.join("kitti"));

        let splits = DEFAULT_SPLITS
            .iter()
            .map(|&(name, optional)| SplitConfig {
                name: name.to_string(),
                annotations: root.join(name).join(ANNOTATIONS_FILE_NAME),
                images: root.join(name),
                output: output_root.join(name),
                optional,
            })
            .collect();

        Self { splits }
    }

    /// Loads a YAML split config.
    ///
    /// Relative paths are resolved against the config file's directory.
    pub fn from_yaml_file(path: &Path) -> Result<Self, Coco2KittiError> {
        let text = fs::read_to_string(path).map_err(|e| Coco2KittiError::io(path, e))?;
        let mut config = Self::from_yaml_str(&text).map_err(|source| {
            Coco2KittiError::ConfigParse {
                path: path.to_path_buf(),
                source,
            }
        })?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        for split in &mut config.splits {
            split.annotations = resolve(base, &split.annotations);
            split.images = resolve(base, &split.images);
            split.output = resolve(base, &split.output);
        }

        config.check(path)?;
        Ok(config)
    }

    /// Parses a YAML split config without touching the filesystem.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    fn check(&self, path: &Path) -> Result<(), Coco2KittiError> {
        let invalid = |message: String| Coco2KittiError::ConfigInvalid {
            path: path.to_path_buf(),
            message,
        };

        if self.splits.is_empty() {
            return Err(invalid("no splits configured".to_string()));
        }

        let mut names = HashSet::new();
        for split in &self.splits {
            if split.name.trim().is_empty() {
                return Err(invalid("split name must not be empty".to_string()));
            }
            if !names.insert(split.name.as_str()) {
                return Err(invalid(format!("split '{}' listed twice", split.name)));
            }
        }
        Ok(())
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Converts every split in order.
///
/// Optional splits whose annotation file is absent are skipped. The first
/// failure stops the run and is returned as [`Coco2KittiError::SplitFailed`];
/// output already written for earlier splits is left in place.
pub fn convert_splits(
    config: &DatasetConfig,
    opts: &ConvertOptions,
) -> Result<DatasetSummary, Coco2KittiError> {
    let mut dataset = DatasetSummary::default();

    for split in &config.splits {
        if split.optional && !split.annotations.exists() {
            log::info!(
                "Skipping optional split '{}': {} not found",
                split.name,
                split.annotations.display()
            );
            continue;
        }

        log::info!("Converting {} set...", split.name);
        let summary = convert(&split.annotations, &split.images, &split.output, opts).map_err(
            |source| Coco2KittiError::SplitFailed {
                split: split.name.clone(),
                source: Box::new(source),
            },
        )?;

        dataset.splits.push(SplitSummary {
            split: split.name.clone(),
            summary,
        });
    }

    Ok(dataset)
}
