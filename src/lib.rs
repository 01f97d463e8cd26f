//! coco2kitti: convert COCO JSON detection datasets into KITTI label trees.
//!
//! For every image listed in a COCO annotation file, the image is copied to
//! `<output>/images/` and a KITTI label file is written to
//! `<output>/labels/<stem>.txt`, one line per annotation:
//!
//! ```text
//! <class_name> 0 0 0 <xmin> <ymin> <xmax> <ymax> 0 0 0 0 0 0 0
//! ```
//!
//! # Modules
//!
//! - [`ir`]: COCO document model, indices, COCO reader and KITTI writer
//! - [`conversion`]: the single-document converter and its summary
//! - [`splits`]: train/valid/test orchestration and the YAML split config
//! - [`error`]: Error types for coco2kitti operations

pub mod conversion;
pub mod error;
pub mod ir;
pub mod splits;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

pub use error::Coco2KittiError;

use conversion::{ConvertOptions, UnknownCategoryPolicy, DEFAULT_PROGRESS_EVERY};
use splits::DatasetConfig;

/// The coco2kitti CLI application.
#[derive(Parser)]
#[command(name = "coco2kitti")]
#[command(version, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Convert a single COCO annotation file.
    Convert(ConvertArgs),
    /// Convert the train/valid/test splits of a dataset.
    Dataset(DatasetArgs),
}

/// Arguments for the convert subcommand.
#[derive(clap::Args)]
struct ConvertArgs {
    /// COCO annotation JSON file.
    #[arg(long, short = 'a')]
    annotations: PathBuf,

    /// Directory holding the images named by `file_name`.
    #[arg(long, short = 'i')]
    images: PathBuf,

    /// Output root; `images/` and `labels/` are created inside it.
    #[arg(long, short = 'o')]
    output: PathBuf,

    #[command(flatten)]
    common: CommonArgs,
}

/// Arguments for the dataset subcommand.
#[derive(clap::Args)]
struct DatasetArgs {
    /// Dataset root containing train/, valid/ and optionally test/.
    #[arg(env = "COCO2KITTI_DATASET_ROOT", required_unless_present = "config")]
    root: Option<PathBuf>,

    /// Output root for the per-split trees (default: <root>/kitti).
    #[arg(long, short = 'o', conflicts_with = "config")]
    output: Option<PathBuf>,

    /// YAML file listing the splits to convert (takes precedence over the root).
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    #[command(flatten)]
    common: CommonArgs,
}

/// Flags shared by both subcommands.
#[derive(clap::Args)]
struct CommonArgs {
    /// Drop annotations with an unknown category id instead of failing.
    #[arg(long)]
    skip_unknown_categories: bool,

    /// Log progress every N converted images (0 disables).
    #[arg(long, default_value_t = DEFAULT_PROGRESS_EVERY)]
    progress_every: usize,

    /// Format of the final summary.
    #[arg(long, value_enum, default_value = "text")]
    report: ReportFormat,
}

impl CommonArgs {
    fn convert_options(&self) -> ConvertOptions {
        ConvertOptions {
            unknown_category: if self.skip_unknown_categories {
                UnknownCategoryPolicy::Skip
            } else {
                UnknownCategoryPolicy::Fail
            },
            progress_every: self.progress_every,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ReportFormat {
    Text,
    Json,
}

/// Run the coco2kitti CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), Coco2KittiError> {
    let cli = Cli::parse();

    // A second init (e.g. from an embedding binary) is not an error.
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();

    match cli.command {
        Some(Commands::Convert(args)) => run_convert(args),
        Some(Commands::Dataset(args)) => run_dataset(args),
        None => {
            println!("coco2kitti {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Convert COCO JSON detection datasets into KITTI label trees.");
            println!();
            println!("Run 'coco2kitti --help' for usage information.");
            Ok(())
        }
    }
}

/// Execute the convert subcommand.
fn run_convert(args: ConvertArgs) -> Result<(), Coco2KittiError> {
    let opts = args.common.convert_options();
    let summary = conversion::convert(&args.annotations, &args.images, &args.output, &opts)?;

    match args.common.report {
        ReportFormat::Json => print_json(&summary),
        ReportFormat::Text => {
            println!("Conversion complete!");
            print!("{}", summary);
            Ok(())
        }
    }
}

/// Execute the dataset subcommand.
fn run_dataset(args: DatasetArgs) -> Result<(), Coco2KittiError> {
    let config = match (&args.config, &args.root) {
        (Some(path), _) => DatasetConfig::from_yaml_file(path)?,
        (None, root) => {
            // clap requires the root whenever --config is absent
            let root = root.as_deref().unwrap_or_else(|| Path::new("."));
            DatasetConfig::from_dataset_root(root, args.output.as_deref())
        }
    };

    let opts = args.common.convert_options();
    let summary = splits::convert_splits(&config, &opts)?;

    match args.common.report {
        ReportFormat::Json => print_json(&summary),
        ReportFormat::Text => {
            print!("{}", summary);
            Ok(())
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Coco2KittiError> {
    let json = serde_json::to_string_pretty(value).map_err(Coco2KittiError::ReportWrite)?;
    println!("{json}");
    Ok(())
}
