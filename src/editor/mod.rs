//! The COCO dataset editor.
//!
//! [`CocoEditor`] owns a loaded dataset and the filters registered against
//! it. A typical session registers filters, applies them, repairs the
//! references the filtering broke, and writes the result:
//!
//! ```no_run
//! use cocoedit::editor::{CocoEditor, CorrectOptions};
//! use cocoedit::filter::{Filter, FilterKind};
//!
//! let mut editor = CocoEditor::open("instances_val2017.json")?;
//! editor
//!     .add_filter(Filter::category_names(FilterKind::Inclusion, ["person", "dog"]))
//!     .add_filter(Filter::box_area(FilterKind::Exclusion, None, Some(32.0 * 32.0)))
//!     .apply_filter();
//! editor.save("filtered.json", CorrectOptions::default())?;
//! # Ok::<(), cocoedit::CocoEditError>(())
//! ```
//!
//! Filtering is cumulative: each call to [`CocoEditor::apply_filter`] runs
//! the registered filters against the current, already filtered collections.
//! [`CocoEditor::reset`] returns to the dataset as it was loaded.

mod correct;

pub use correct::{correct_dataset, CorrectOptions, CorrectionSummary};

use std::path::Path;

use rand::Rng;
use serde_json::Value;
use tracing::debug;

use crate::error::CocoEditError;
use crate::filter::{Filter, FilterKind, FilterRegistry, FilterSet, Predicate, TargetType};
use crate::model::{self, Dataset};
use crate::sample::{sample_dataset, sample_dataset_with_rng, SampleOptions};
use crate::validation::{check_integrity, IntegrityReport};

/// Editor over a single COCO dataset.
///
/// The editor owns its data; nothing it does is visible through the value or
/// file it was built from.
#[derive(Debug)]
pub struct CocoEditor {
    dataset: Dataset,
    original: Dataset,
    filters: FilterRegistry,
    filter_applied: bool,
}

impl CocoEditor {
    /// Wraps an already loaded dataset.
    pub fn new(dataset: Dataset) -> Self {
        Self {
            original: dataset.clone(),
            dataset,
            filters: FilterRegistry::new(),
            filter_applied: false,
        }
    }

    /// Loads and validates a COCO JSON file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, CocoEditError> {
        Ok(Self::new(model::read_coco_json(path.as_ref())?))
    }

    /// Validates and deep-copies an in-memory COCO document.
    pub fn from_value(value: &Value) -> Result<Self, CocoEditError> {
        Ok(Self::new(model::dataset_from_value(value)?))
    }

    /// Parses and validates a COCO JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, CocoEditError> {
        Ok(Self::new(model::from_coco_str(json)?))
    }

    /// Drops all filters and restores the dataset as it was loaded.
    pub fn reset(&mut self) -> &mut Self {
        self.dataset = self.original.clone();
        self.filters = FilterRegistry::new();
        self.filter_applied = false;
        self
    }

    /// Replaces the loaded dataset and drops all filters.
    ///
    /// Load the replacement with [`model::read_coco_json`] or
    /// [`model::dataset_from_value`] first; a failed load leaves the editor
    /// untouched.
    pub fn reload(&mut self, dataset: Dataset) -> &mut Self {
        self.original = dataset;
        self.reset()
    }

    /// Registers a filter with the collection named by its target type.
    pub fn add_filter(&mut self, filter: Filter) -> &mut Self {
        self.filters.add(filter);
        self
    }

    /// Registers a predicate against a collection named by string.
    ///
    /// # Errors
    /// [`CocoEditError::InvalidArgument`] if `target` is not one of `image`,
    /// `annotation`, `category` or `license`.
    pub fn add_custom_filter(
        &mut self,
        kind: FilterKind,
        target: &str,
        predicate: impl Predicate + 'static,
    ) -> Result<&mut Self, CocoEditError> {
        let target: TargetType = target.parse()?;
        Ok(self.add_filter(Filter::new(kind, target, predicate)))
    }

    /// Registers image file-name filters. An empty list registers nothing.
    pub fn add_file_name_filter(&mut self, include: &[&str], exclude: &[&str]) -> &mut Self {
        if !include.is_empty() {
            self.add_filter(Filter::file_names(FilterKind::Inclusion, include.iter().copied()));
        }
        if !exclude.is_empty() {
            self.add_filter(Filter::file_names(FilterKind::Exclusion, exclude.iter().copied()));
        }
        self
    }

    /// Registers category-name filters. An empty list registers nothing.
    pub fn add_category_filter(&mut self, include: &[&str], exclude: &[&str]) -> &mut Self {
        if !include.is_empty() {
            self.add_filter(Filter::category_names(
                FilterKind::Inclusion,
                include.iter().copied(),
            ));
        }
        if !exclude.is_empty() {
            self.add_filter(Filter::category_names(
                FilterKind::Exclusion,
                exclude.iter().copied(),
            ));
        }
        self
    }

    /// Registers an annotation area filter.
    pub fn add_box_area_filter(
        &mut self,
        kind: FilterKind,
        min: Option<f64>,
        max: Option<f64>,
    ) -> &mut Self {
        self.add_filter(Filter::box_area(kind, min, max))
    }

    /// The filters registered for `target`.
    pub fn filters(&self, target: TargetType) -> &FilterSet {
        self.filters.get(target)
    }

    /// Whether [`Self::apply_filter`] has run since loading or the last reset.
    pub fn is_filter_applied(&self) -> bool {
        self.filter_applied
    }

    /// Runs the registered filters over each collection.
    ///
    /// Per collection, inclusion filters run first (a record survives if any
    /// of them accepts it), then exclusion filters (a record is dropped if
    /// any of them matches). References are not repaired here; see
    /// [`Self::correct`].
    pub fn apply_filter(&mut self) -> &mut Self {
        for target in TargetType::ALL {
            let set = self.filters.get(target);
            if set.is_empty() {
                continue;
            }

            let removed = match target {
                TargetType::Image => set.retain(&mut self.dataset.images),
                TargetType::Annotation => set.retain(&mut self.dataset.annotations),
                TargetType::Category => set.retain(&mut self.dataset.categories),
                TargetType::License => set.retain(&mut self.dataset.licenses),
            };
            debug!(
                %target,
                include = set.include().len(),
                exclude = set.exclude().len(),
                removed,
                "applied filters"
            );
        }

        self.filter_applied = true;
        self
    }

    /// Removes dangling references, applying filters first if that has not
    /// happened yet.
    pub fn correct(&mut self, opts: CorrectOptions) -> &mut Self {
        if !self.filter_applied {
            self.apply_filter();
        }

        let summary = correct_dataset(&mut self.dataset, opts);
        debug!(
            annotations_without_category = summary.annotations_without_category,
            annotations_without_image = summary.annotations_without_image,
            orphan_images = summary.orphan_images,
            orphan_categories = summary.orphan_categories,
            "corrected dataset"
        );
        self
    }

    /// Replaces the current images with a random subset of `n` and keeps only
    /// their annotations.
    ///
    /// # Errors
    /// [`CocoEditError::InvalidArgument`] if `n` exceeds the number of
    /// images. The editor is left unchanged on error.
    pub fn sample(&mut self, n: usize, correct_category: bool) -> Result<&Dataset, CocoEditError> {
        self.sample_with_options(&SampleOptions {
            n,
            seed: None,
            correct_category,
        })
    }

    /// Like [`Self::sample`], with an optional seed for a reproducible draw.
    pub fn sample_with_options(&mut self, opts: &SampleOptions) -> Result<&Dataset, CocoEditError> {
        self.dataset = sample_dataset(&self.dataset, opts)?;
        debug!(n = opts.n, seed = ?opts.seed, "sampled dataset");
        Ok(&self.dataset)
    }

    /// Like [`Self::sample`], drawing from a caller-supplied RNG.
    pub fn sample_with_rng<R: Rng + ?Sized>(
        &mut self,
        n: usize,
        correct_category: bool,
        rng: &mut R,
    ) -> Result<&Dataset, CocoEditError> {
        self.dataset = sample_dataset_with_rng(&self.dataset, n, correct_category, rng)?;
        Ok(&self.dataset)
    }

    /// The current state of the dataset.
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn into_dataset(self) -> Dataset {
        self.dataset
    }

    /// The current state as a JSON document.
    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(&self.dataset)
    }

    /// Inspects the current state for broken references.
    pub fn integrity(&self) -> IntegrityReport {
        check_integrity(&self.dataset)
    }

    /// Corrects the dataset with `opts` and writes it as COCO JSON.
    ///
    /// The parent directory of `path` must exist.
    pub fn save(
        &mut self,
        path: impl AsRef<Path>,
        opts: CorrectOptions,
    ) -> Result<(), CocoEditError> {
        self.correct(opts);
        model::write_coco_json(path.as_ref(), &self.dataset)
    }
}
