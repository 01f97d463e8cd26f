//! KITTI label writer.
//!
//! A KITTI label file has one object per line with 15 space-separated fields:
//!
//! ```text
//! type truncated occluded alpha xmin ymin xmax ymax h w l x y z rotation_y
//! ```
//!
//! Only the class name and the 2D box carry information here. Every other
//! field is written as a literal `0`, which is what 2D detection trainers
//! (e.g. DetectNet_v2) expect. Box coordinates use two fractional digits.

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use super::BBoxXYXY;
use crate::error::Coco2KittiError;

pub const LABEL_EXTENSION: &str = "txt";

/// One line of a KITTI label file.
#[derive(Clone, Debug, PartialEq)]
pub struct KittiObject {
    /// Class name, already normalized with [`kitti_class_name`].
    pub class_name: String,
    pub bbox: BBoxXYXY,
}

impl KittiObject {
    /// Builds an object from a raw category name, normalizing it.
    pub fn new(category_name: &str, bbox: BBoxXYXY) -> Self {
        Self {
            class_name: kitti_class_name(category_name),
            bbox,
        }
    }
}

impl fmt::Display for KittiObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} 0 0 0 {:.2} {:.2} {:.2} {:.2} 0 0 0 0 0 0 0",
            self.class_name,
            self.bbox.xmin(),
            self.bbox.ymin(),
            self.bbox.xmax(),
            self.bbox.ymax()
        )
    }
}

/// KITTI splits on whitespace, so spaces in category names become `_`.
pub fn kitti_class_name(name: &str) -> String {
    name.replace(' ', "_")
}

/// Label path for an image file name: extension swapped for `.txt`.
///
/// Any relative directory in `file_name` is kept, so `"sub/a.jpg"` maps to
/// `"sub/a.txt"`.
pub fn label_file_name(file_name: &str) -> PathBuf {
    Path::new(file_name).with_extension(LABEL_EXTENSION)
}

/// Renders label file contents in memory.
pub fn to_kitti_string(objects: &[KittiObject]) -> String {
    let mut out = String::new();
    for object in objects {
        out.push_str(&object.to_string());
        out.push('\n');
    }
    out
}

/// Writes (or truncates) a label file with one line per object.
///
/// An empty `objects` slice still creates an empty file.
pub fn write_kitti_labels(path: &Path, objects: &[KittiObject]) -> Result<(), Coco2KittiError> {
    let to_err = |source| Coco2KittiError::LabelWrite {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(to_err)?;
    let mut writer = BufWriter::new(file);
    for object in objects {
        writeln!(writer, "{object}").map_err(to_err)?;
    }
    writer.flush().map_err(to_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn line_has_fifteen_fields() {
        let object = KittiObject::new("drone", BBoxXYXY::from_xywh(1.0, 2.0, 3.0, 4.0));
        let line = object.to_string();
        assert_eq!(line, "drone 0 0 0 1.00 2.00 4.00 6.00 0 0 0 0 0 0 0");
        assert_eq!(line.split(' ').count(), 15);
    }

    #[test]
    fn coordinates_use_two_fraction_digits() {
        let object = KittiObject::new("car", BBoxXYXY::from_xywh(10.0, 20.0, 30.5, 40.0));
        assert_eq!(
            object.to_string(),
            "car 0 0 0 10.00 20.00 40.50 60.00 0 0 0 0 0 0 0"
        );

        let object = KittiObject::new("car", BBoxXYXY::from_xywh(0.126, 1.0 / 3.0, 2.0, 0.0));
        assert_eq!(
            object.to_string(),
            "car 0 0 0 0.13 0.33 2.13 0.33 0 0 0 0 0 0 0"
        );
    }

    #[test]
    fn spaces_in_class_names_become_underscores() {
        assert_eq!(kitti_class_name("traffic light"), "traffic_light");
        assert_eq!(kitti_class_name("a  b"), "a__b");
        assert_eq!(kitti_class_name("drone"), "drone");
    }

    #[test]
    fn label_file_name_swaps_extension() {
        assert_eq!(label_file_name("a.jpg"), PathBuf::from("a.txt"));
        assert_eq!(
            label_file_name("frame.rf.0a1b.jpg"),
            PathBuf::from("frame.rf.0a1b.txt")
        );
        assert_eq!(label_file_name("noext"), PathBuf::from("noext.txt"));
        assert_eq!(label_file_name("sub/b.png"), PathBuf::from("sub/b.txt"));
    }

    #[test]
    fn to_kitti_string_terminates_every_line() {
        let objects = vec![
            KittiObject::new("a", BBoxXYXY::from_xywh(0.0, 0.0, 1.0, 1.0)),
            KittiObject::new("b", BBoxXYXY::from_xywh(1.0, 1.0, 1.0, 1.0)),
        ];
        let text = to_kitti_string(&objects);
        assert_eq!(text.lines().count(), 2);
        assert!(text.ends_with('\n'));
        assert_eq!(to_kitti_string(&[]), "");
    }

    #[test]
    fn write_kitti_labels_truncates_existing_file() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let path = temp.path().join("a.txt");
        fs::write(&path, "stale line\nanother\n").expect("seed file");

        write_kitti_labels(&path, &[]).expect("write empty labels");
        assert!(fs::read_to_string(&path).expect("read label").is_empty());

        let objects = vec![KittiObject::new(
            "drone",
            BBoxXYXY::from_xywh(1.0, 2.0, 3.0, 4.0),
        )];
        write_kitti_labels(&path, &objects).expect("write labels");
        assert_eq!(
            fs::read_to_string(&path).expect("read label"),
            to_kitti_string(&objects)
        );
    }
}
