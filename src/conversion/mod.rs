//! COCO to KITTI conversion.
//!
//! [`convert`] is a single sequential pass: parse the document, build the
//! category/image/annotation indices, then for each image (in document
//! order) copy the image file and write its KITTI label file.
//!
//! Missing source images are recovered from (warning + skip). Everything
//! else (malformed JSON, I/O failures, and by default unknown categories)
//! aborts the conversion.

pub mod report;

pub use report::{
    ConversionIssue, ConversionIssueCode, ConversionSeverity, ConversionSummary, DatasetSummary,
    SplitSummary,
};

use std::fs;
use std::path::Path;

use crate::error::Coco2KittiError;
use crate::ir::io_coco_json::read_coco_json;
use crate::ir::io_kitti::{label_file_name, write_kitti_labels};
use crate::ir::{
    Annotation, AnnotationDocument, AnnotationsByImage, CategoryIndex, Image, ImageIndex,
    KittiObject,
};

/// Default number of converted images between progress log lines.
pub const DEFAULT_PROGRESS_EVERY: usize = 100;

/// What to do with an annotation whose category id is not in the document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UnknownCategoryPolicy {
    /// Abort the conversion with [`Coco2KittiError::UnknownCategory`].
    #[default]
    Fail,
    /// Drop the annotation, record a warning and keep going.
    Skip,
}

/// Options for a single conversion.
#[derive(Clone, Debug)]
pub struct ConvertOptions {
    pub unknown_category: UnknownCategoryPolicy,
    /// Log progress every this many converted images; `0` disables it.
    pub progress_every: usize,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            unknown_category: UnknownCategoryPolicy::Fail,
            progress_every: DEFAULT_PROGRESS_EVERY,
        }
    }
}

/// Converts one COCO annotation file into a KITTI tree under `output_dir`.
///
/// Creates `output_dir/images` and `output_dir/labels` if needed. Existing
/// files with the same names are overwritten, so re-running over unchanged
/// input reproduces the same bytes.
///
/// # Example
/// ```no_run
/// use std::path::Path;
/// use coco2kitti::conversion::{convert, ConvertOptions};
///
/// let summary = convert(
///     Path::new("train/_annotations.coco.json"),
///     Path::new("train"),
///     Path::new("kitti/train"),
///     &ConvertOptions::default(),
/// )?;
/// println!("{summary}");
/// # Ok::<(), coco2kitti::Coco2KittiError>(())
/// ```
pub fn convert(
    annotation_path: &Path,
    images_dir: &Path,
    output_dir: &Path,
    opts: &ConvertOptions,
) -> Result<ConversionSummary, Coco2KittiError> {
    let document = read_coco_json(annotation_path)?;
    convert_document(&document, annotation_path, images_dir, output_dir, opts)
}

/// Converts an already parsed document.
///
/// `source` is only used to give errors context.
pub fn convert_document(
    document: &AnnotationDocument,
    source: &Path,
    images_dir: &Path,
    output_dir: &Path,
    opts: &ConvertOptions,
) -> Result<ConversionSummary, Coco2KittiError> {
    let categories = CategoryIndex::build(document);
    let images = ImageIndex::build(document);
    let annotations = AnnotationsByImage::build(document);

    let mut summary = ConversionSummary::new(output_dir);
    fs::create_dir_all(&summary.images_dir)
        .map_err(|e| Coco2KittiError::io(&summary.images_dir, e))?;
    fs::create_dir_all(&summary.labels_dir)
        .map_err(|e| Coco2KittiError::io(&summary.labels_dir, e))?;

    add_duplicate_notes(&categories, &images, &mut summary);

    for image in images.iter() {
        let image_path = images_dir.join(&image.file_name);
        if !image_path.is_file() {
            log::warn!("Image not found: {}", image_path.display());
            summary.add(ConversionIssue::warning(
                ConversionIssueCode::MissingImage,
                format!("Image not found: {}", image_path.display()),
            ));
            continue;
        }

        // Resolve every line first so a fatal lookup leaves no partial output for this image.
        let objects = kitti_objects(
            image,
            annotations.for_image(image.id),
            &categories,
            source,
            opts.unknown_category,
            &mut summary,
        )?;

        let output_image_path = summary.images_dir.join(&image.file_name);
        copy_image(&image_path, &output_image_path)?;

        let label_path = summary.labels_dir.join(label_file_name(&image.file_name));
        ensure_parent_dir(&label_path)?;
        write_kitti_labels(&label_path, &objects)?;

        summary.converted_images += 1;
        summary.written_objects += objects.len();

        if opts.progress_every > 0 && summary.converted_images % opts.progress_every == 0 {
            log::info!("Converted {} images...", summary.converted_images);
        }
    }

    log::info!(
        "Converted {} image(s) from {} into {}",
        summary.converted_images,
        source.display(),
        output_dir.display()
    );

    Ok(summary)
}

/// Builds the KITTI lines for one image, in annotation order.
fn kitti_objects(
    image: &Image,
    annotations: &[&Annotation],
    categories: &CategoryIndex<'_>,
    source: &Path,
    policy: UnknownCategoryPolicy,
    summary: &mut ConversionSummary,
) -> Result<Vec<KittiObject>, Coco2KittiError> {
    let mut objects = Vec::with_capacity(annotations.len());

    for ann in annotations {
        let Some(name) = categories.name(ann.category_id) else {
            match policy {
                UnknownCategoryPolicy::Fail => {
                    return Err(Coco2KittiError::UnknownCategory {
                        path: source.to_path_buf(),
                        image_id: image.id,
                        file_name: image.file_name.clone(),
                        category_id: ann.category_id,
                    });
                }
                UnknownCategoryPolicy::Skip => {
                    let message = format!(
                        "Skipped annotation on '{}': unknown category {}",
                        image.file_name, ann.category_id
                    );
                    log::warn!("{message}");
                    summary.add(ConversionIssue::warning(
                        ConversionIssueCode::UnknownCategory,
                        message,
                    ));
                    continue;
                }
            }
        };

        objects.push(KittiObject::new(name, ann.bbox));
    }

    Ok(objects)
}

fn add_duplicate_notes(
    categories: &CategoryIndex<'_>,
    images: &ImageIndex<'_>,
    summary: &mut ConversionSummary,
) {
    if categories.duplicates() > 0 {
        summary.add(ConversionIssue::info(
            ConversionIssueCode::DuplicateCategoryId,
            format!(
                "{} category entr(ies) reused an existing id; the last name was used",
                categories.duplicates()
            ),
        ));
    }

    if images.duplicates() > 0 {
        summary.add(ConversionIssue::info(
            ConversionIssueCode::DuplicateImageId,
            format!(
                "{} image entr(ies) reused an existing id; the last entry was used",
                images.duplicates()
            ),
        ));
    }
}

/// Byte-for-byte copy, overwriting `to`.
fn copy_image(from: &Path, to: &Path) -> Result<(), Coco2KittiError> {
    ensure_parent_dir(to)?;

    // fs::copy onto itself would truncate the source.
    if is_same_file(from, to) {
        log::debug!("{} is already in place", to.display());
        return Ok(());
    }

    fs::copy(from, to)
        .map(|_| ())
        .map_err(|source| Coco2KittiError::ImageCopy {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
            source,
        })
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn ensure_parent_dir(path: &Path) -> Result<(), Coco2KittiError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| Coco2KittiError::io(parent, e))?;
    }
    Ok(())
}
