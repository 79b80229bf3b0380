//! cocoedit: filter, correct and sample COCO datasets.
//!
//! A COCO document links `annotations` to `images` and `categories` by id.
//! cocoedit lets you narrow any of those collections with inclusion and
//! exclusion filters, then repairs the references the narrowing broke.
//!
//! # Modules
//!
//! - [`model`]: typed COCO records and JSON IO
//! - [`filter`]: filters, built-in predicates and per-collection filter sets
//! - [`editor`]: the [`CocoEditor`] and reference correction
//! - [`sample`]: random image subsets
//! - [`validation`]: required-key checks and the integrity report
//! - [`error`]: error types

pub mod editor;
pub mod error;
pub mod filter;
pub mod model;
pub mod sample;
pub mod validation;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use editor::{CocoEditor, CorrectOptions};
pub use error::CocoEditError;
pub use filter::{Filter, FilterKind, TargetType};

/// The cocoedit CLI application.
#[derive(Parser)]
#[command(name = "cocoedit")]
#[command(version, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Filter a dataset and write the corrected result.
    Filter(FilterArgs),
    /// Keep a random subset of images and their annotations.
    Sample(SampleArgs),
    /// Report broken references, orphans and duplicate ids.
    Check(CheckArgs),
}

#[derive(clap::Args)]
struct FilterArgs {
    /// Input COCO JSON file.
    input: PathBuf,

    /// Output COCO JSON file. Its directory must exist.
    output: PathBuf,

    /// Keep only images with these file names (comma-separated).
    #[arg(long, value_delimiter = ',')]
    include_files: Vec<String>,

    /// Drop images with these file names (comma-separated).
    #[arg(long, value_delimiter = ',')]
    exclude_files: Vec<String>,

    /// Keep only these categories (comma-separated).
    #[arg(long, value_delimiter = ',')]
    include_categories: Vec<String>,

    /// Drop these categories (comma-separated).
    #[arg(long, value_delimiter = ',')]
    exclude_categories: Vec<String>,

    /// Keep only annotations with at least this area.
    #[arg(long)]
    min_area: Option<f64>,

    /// Keep only annotations with at most this area.
    #[arg(long)]
    max_area: Option<f64>,

    /// Keep images that end up without annotations.
    #[arg(long)]
    keep_empty_images: bool,

    /// Drop categories that end up without annotations.
    #[arg(long)]
    prune_categories: bool,
}

#[derive(clap::Args)]
struct SampleArgs {
    /// Input COCO JSON file.
    input: PathBuf,

    /// Output COCO JSON file. Its directory must exist.
    output: PathBuf,

    /// Number of images to keep.
    #[arg(short = 'n', long)]
    n: usize,

    /// Seed for a reproducible sample.
    #[arg(long, env = "COCOEDIT_SEED")]
    seed: Option<u64>,

    /// Drop categories that end up without annotations.
    #[arg(long)]
    prune_categories: bool,
}

#[derive(clap::Args)]
struct CheckArgs {
    /// Input COCO JSON file.
    input: PathBuf,

    /// Fail on warnings (orphaned images or categories) as well as errors.
    #[arg(long)]
    strict: bool,
}

/// Run the cocoedit CLI.
///
/// This is the entry point called from `main.rs`.
pub fn run() -> Result<(), CocoEditError> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Filter(args)) => run_filter(args),
        Some(Commands::Sample(args)) => run_sample(args),
        Some(Commands::Check(args)) => run_check(args),
        None => {
            println!("cocoedit {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Filter, correct and sample COCO datasets.");
            println!();
            println!("Run 'cocoedit --help' for usage information.");
            Ok(())
        }
    }
}

fn run_filter(args: FilterArgs) -> Result<(), CocoEditError> {
    let mut editor = CocoEditor::open(&args.input)?;

    let include_files: Vec<&str> = args.include_files.iter().map(String::as_str).collect();
    let exclude_files: Vec<&str> = args.exclude_files.iter().map(String::as_str).collect();
    let include_categories: Vec<&str> =
        args.include_categories.iter().map(String::as_str).collect();
    let exclude_categories: Vec<&str> =
        args.exclude_categories.iter().map(String::as_str).collect();

    editor
        .add_file_name_filter(&include_files, &exclude_files)
        .add_category_filter(&include_categories, &exclude_categories);

    if args.min_area.is_some() || args.max_area.is_some() {
        editor.add_box_area_filter(FilterKind::Inclusion, args.min_area, args.max_area);
    }

    let opts = CorrectOptions::new(!args.keep_empty_images, args.prune_categories);
    editor.apply_filter().save(&args.output, opts)?;

    print_summary(editor.dataset(), &args.output);
    Ok(())
}

fn run_sample(args: SampleArgs) -> Result<(), CocoEditError> {
    let mut editor = CocoEditor::open(&args.input)?;

    let opts = sample::SampleOptions {
        n: args.n,
        seed: args.seed,
        correct_category: args.prune_categories,
    };
    let sampled = editor.sample_with_options(&opts)?;
    model::write_coco_json(&args.output, sampled)?;

    print_summary(editor.dataset(), &args.output);
    Ok(())
}

fn run_check(args: CheckArgs) -> Result<(), CocoEditError> {
    let dataset = model::read_coco_json(&args.input)?;
    let report = validation::check_integrity(&dataset);

    print!("{}", report);

    let has_errors = report.error_count() > 0;
    let has_warnings = report.warning_count() > 0;

    if has_errors || (args.strict && has_warnings) {
        Err(CocoEditError::IntegrityFailed {
            error_count: report.error_count(),
            warning_count: report.warning_count(),
        })
    } else {
        Ok(())
    }
}

fn print_summary(dataset: &model::Dataset, output: &std::path::Path) {
    println!(
        "Wrote {} images, {} annotations and {} categories to {}",
        dataset.images.len(),
        dataset.annotations.len(),
        dataset.categories.len(),
        output.display()
    );
}
