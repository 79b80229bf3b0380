//! Referential cleanup after filtering.

use std::collections::HashSet;

use crate::model::{CategoryId, Dataset, ImageId};

/// Which orphaned records [`correct_dataset`] removes.
///
/// Annotations with a dangling `image_id` or `category_id` are always
/// removed; these flags only control the reverse direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CorrectOptions {
    /// Drop images no remaining annotation refers to.
    pub correct_image: bool,
    /// Drop categories no remaining annotation refers to.
    pub correct_category: bool,
}

impl CorrectOptions {
    pub fn new(correct_image: bool, correct_category: bool) -> Self {
        Self {
            correct_image,
            correct_category,
        }
    }
}

impl Default for CorrectOptions {
    fn default() -> Self {
        Self {
            correct_image: true,
            correct_category: false,
        }
    }
}

/// Counts of records removed by one correction pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CorrectionSummary {
    pub annotations_without_category: usize,
    pub annotations_without_image: usize,
    pub orphan_images: usize,
    pub orphan_categories: usize,
}

impl CorrectionSummary {
    pub fn total(&self) -> usize {
        self.annotations_without_category
            + self.annotations_without_image
            + self.orphan_images
            + self.orphan_categories
    }
}

/// Removes dangling references from `dataset`.
///
/// Runs in a fixed order: annotations with an unknown category, then
/// annotations with an unknown image, then (optionally) images and
/// categories left without annotations. Orphans are computed from the
/// annotations that survived both foreign-key checks. `info` and `licenses`
/// are not touched.
pub fn correct_dataset(dataset: &mut Dataset, opts: CorrectOptions) -> CorrectionSummary {
    let mut summary = CorrectionSummary::default();

    let category_ids: HashSet<CategoryId> = dataset.categories.iter().map(|c| c.id).collect();
    let before = dataset.annotations.len();
    dataset
        .annotations
        .retain(|ann| category_ids.contains(&ann.category_id));
    summary.annotations_without_category = before - dataset.annotations.len();

    let image_ids: HashSet<ImageId> = dataset.images.iter().map(|i| i.id).collect();
    let before = dataset.annotations.len();
    dataset
        .annotations
        .retain(|ann| image_ids.contains(&ann.image_id));
    summary.annotations_without_image = before - dataset.annotations.len();

    if opts.correct_image {
        let used: HashSet<ImageId> = dataset.annotations.iter().map(|a| a.image_id).collect();
        let before = dataset.images.len();
        dataset.images.retain(|image| used.contains(&image.id));
        summary.orphan_images = before - dataset.images.len();
    }

    if opts.correct_category {
        let used: HashSet<CategoryId> =
            dataset.annotations.iter().map(|a| a.category_id).collect();
        let before = dataset.categories.len();
        dataset.categories.retain(|cat| used.contains(&cat.id));
        summary.orphan_categories = before - dataset.categories.len();
    }

    summary
}
