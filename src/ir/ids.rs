//! Newtype IDs for COCO images and categories.
//!
//! Keeping the two apart stops an image id from being looked up in the
//! category table (and vice versa) when grouping annotations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The `id` of a COCO image entry.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageId(pub i64);

impl ImageId {
    /// Creates a new ImageId.
    #[inline]
    pub fn new(id: i64) -> Self {
        Self(id)
    }
}

impl From<i64> for ImageId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Debug for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ImageId({})", self.0)
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The `id` of a COCO category entry.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub i64);

impl CategoryId {
    /// Creates a new CategoryId.
    #[inline]
    pub fn new(id: i64) -> Self {
        Self(id)
    }
}

impl From<i64> for CategoryId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Debug for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CategoryId({})", self.0)
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_deserialize_from_bare_integers() {
        let ids: Vec<ImageId> = serde_json::from_str("[0, 7, 42]").unwrap();
        assert_eq!(ids, vec![ImageId(0), ImageId(7), ImageId(42)]);
    }

    #[test]
    fn negative_ids_are_accepted() {
        assert_eq!(serde_json::from_str::<CategoryId>("-1").unwrap(), CategoryId(-1));
    }

    #[test]
    fn display_is_the_bare_number() {
        assert_eq!(ImageId::new(5).to_string(), "5");
        assert_eq!(format!("{:?}", CategoryId::new(3)), "CategoryId(3)");
    }
}
