//! Lookup tables derived from an [`AnnotationDocument`].
//!
//! All three borrow from the document and are rebuilt on every conversion.
//! Duplicate ids follow dictionary semantics: the last entry's value wins,
//! but an image keeps the position of its first occurrence in iteration order.

use std::collections::HashMap;

use indexmap::IndexMap;

use super::ids::{CategoryId, ImageId};
use super::model::{Annotation, AnnotationDocument, Image};

/// Category id to display name.
#[derive(Debug, Default)]
pub struct CategoryIndex<'a> {
    names: HashMap<CategoryId, &'a str>,
    duplicates: usize,
}

impl<'a> CategoryIndex<'a> {
    pub fn build(document: &'a AnnotationDocument) -> Self {
        let mut index = Self::default();
        for category in &document.categories {
            if index
                .names
                .insert(category.id, category.name.as_str())
                .is_some()
            {
                log::debug!("category id {} defined more than once", category.id);
                index.duplicates += 1;
            }
        }
        index
    }

    /// Returns the raw display name for `id`.
    pub fn name(&self, id: CategoryId) -> Option<&'a str> {
        self.names.get(&id).copied()
    }

    /// Number of category entries that overwrote an earlier one.
    pub fn duplicates(&self) -> usize {
        self.duplicates
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Image id to image entry, iterated in document order.
#[derive(Debug, Default)]
pub struct ImageIndex<'a> {
    images: IndexMap<ImageId, &'a Image>,
    duplicates: usize,
}

impl<'a> ImageIndex<'a> {
    pub fn build(document: &'a AnnotationDocument) -> Self {
        let mut index = Self::default();
        for image in &document.images {
            // IndexMap keeps the original slot and swaps in the new value.
            if index.images.insert(image.id, image).is_some() {
                log::debug!("image id {} defined more than once", image.id);
                index.duplicates += 1;
            }
        }
        index
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Image> + '_ {
        self.images.values().copied()
    }

    /// Number of image entries that overwrote an earlier one.
    pub fn duplicates(&self) -> usize {
        self.duplicates
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

/// Annotations grouped by the image they reference, each group in document order.
#[derive(Debug, Default)]
pub struct AnnotationsByImage<'a> {
    groups: HashMap<ImageId, Vec<&'a Annotation>>,
}

impl<'a> AnnotationsByImage<'a> {
    pub fn build(document: &'a AnnotationDocument) -> Self {
        let mut groups: HashMap<ImageId, Vec<&'a Annotation>> = HashMap::new();
        for ann in &document.annotations {
            groups.entry(ann.image_id).or_default().push(ann);
        }
        Self { groups }
    }

    /// Annotations for `image_id`; empty when the image has none.
    pub fn for_image(&self, image_id: ImageId) -> &[&'a Annotation] {
        self.groups
            .get(&image_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
