//! Conversion summary types.
//!
//! Every run of the converter returns a [`ConversionSummary`]: where the
//! output went, how much was written, and the per-item issues that were
//! recovered from instead of aborting the run.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Outcome of converting one COCO document.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ConversionSummary {
    /// Output root for this conversion.
    pub output_dir: PathBuf,
    /// `output_dir/images`.
    pub images_dir: PathBuf,
    /// `output_dir/labels`.
    pub labels_dir: PathBuf,
    /// Images copied, each with a label file (possibly empty).
    pub converted_images: usize,
    /// KITTI lines written across all label files.
    pub written_objects: usize,
    /// Recovered issues and notes, in the order they occurred.
    pub issues: Vec<ConversionIssue>,
}

impl ConversionSummary {
    /// Create an empty summary rooted at `output_dir`.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        let output_dir = output_dir.into();
        Self {
            images_dir: output_dir.join("images"),
            labels_dir: output_dir.join("labels"),
            output_dir,
            ..Default::default()
        }
    }

    /// Add an issue to the summary.
    pub fn add(&mut self, issue: ConversionIssue) {
        self.issues.push(issue);
    }

    /// Count of warning-level issues.
    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == ConversionSeverity::Warning)
            .count()
    }

    /// Count of info-level issues.
    pub fn info_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == ConversionSeverity::Info)
            .count()
    }

    /// Number of issues carrying `code`.
    pub fn count_of(&self, code: ConversionIssueCode) -> usize {
        self.issues.iter().filter(|i| i.code == code).count()
    }

    /// Images listed in the document whose source file was absent.
    pub fn missing_images(&self) -> usize {
        self.count_of(ConversionIssueCode::MissingImage)
    }
}

impl fmt::Display for ConversionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total images converted: {}", self.converted_images)?;
        writeln!(f, "Objects written: {}", self.written_objects)?;
        writeln!(f, "Output directory: {}", self.output_dir.display())?;
        writeln!(f, "Images saved to: {}", self.images_dir.display())?;
        writeln!(f, "Labels saved to: {}", self.labels_dir.display())?;

        let warnings = self.warning_count();
        if warnings > 0 {
            writeln!(f)?;
            writeln!(f, "Warnings ({}):", warnings)?;
            for issue in self
                .issues
                .iter()
                .filter(|i| i.severity == ConversionSeverity::Warning)
            {
                writeln!(f, "  - {}", issue.message)?;
            }
        }

        let infos = self.info_count();
        if infos > 0 {
            writeln!(f)?;
            writeln!(f, "Notes ({}):", infos)?;
            for issue in self
                .issues
                .iter()
                .filter(|i| i.severity == ConversionSeverity::Info)
            {
                writeln!(f, "  - {}", issue.message)?;
            }
        }

        Ok(())
    }
}

/// A single recovered issue or policy note.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ConversionIssue {
    pub severity: ConversionSeverity,
    pub code: ConversionIssueCode,
    pub message: String,
}

impl ConversionIssue {
    /// Create a warning-level issue (something was skipped).
    pub fn warning(code: ConversionIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: ConversionSeverity::Warning,
            code,
            message: message.into(),
        }
    }

    /// Create an info-level issue (policy note, nothing was dropped).
    pub fn info(code: ConversionIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: ConversionSeverity::Info,
            code,
            message: message.into(),
        }
    }
}

/// Severity level for conversion issues.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionSeverity {
    Warning,
    Info,
}

/// Stable issue codes for programmatic consumption.
///
/// These codes are part of the JSON report and should remain stable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionIssueCode {
    /// Source image file was absent; image skipped, no label written.
    MissingImage,
    /// Annotation referenced an unknown category and was dropped.
    UnknownCategory,
    /// Several images shared an id; the last entry was used.
    DuplicateImageId,
    /// Several categories shared an id; the last name was used.
    DuplicateCategoryId,
}

/// Summaries of every split converted in one dataset run.
#[derive(Clone, Debug, Default, Serialize)]
pub struct DatasetSummary {
    pub splits: Vec<SplitSummary>,
}

/// A split's name next to its conversion summary.
#[derive(Clone, Debug, Serialize)]
pub struct SplitSummary {
    pub split: String,
    #[serde(flatten)]
    pub summary: ConversionSummary,
}

impl DatasetSummary {
    /// Images converted across all splits.
    pub fn converted_images(&self) -> usize {
        self.splits.iter().map(|s| s.summary.converted_images).sum()
    }
}

impl fmt::Display for DatasetSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for split in &self.splits {
            writeln!(f, "[{}]", split.split)?;
            write!(f, "{}", split.summary)?;
            writeln!(f)?;
        }
        writeln!(f, "{}", "=".repeat(50))?;
        writeln!(
            f,
            "All conversions complete! {} split(s), {} image(s) converted.",
            self.splits.len(),
            self.converted_images()
        )?;
        writeln!(f, "{}", "=".repeat(50))
    }
}
