#![allow(dead_code)]

use cocoedit::model::{Annotation, Category, Dataset, Image};
use proptest::prelude::*;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// Raw annotation: (image id, category id, box side).
type AnnSeed = (u64, u64, u32);

/// Datasets with 1..=8 images and 1..=5 categories. Annotations may point
/// one or two ids past the last image or category, so dangling references
/// and orphans both show up.
pub fn arb_dataset() -> impl Strategy<Value = Dataset> {
    (1u64..=8, 1u64..=5)
        .prop_flat_map(|(num_images, num_categories)| {
            let ann = (1..=num_images + 2, 1..=num_categories + 2, 1u32..=40);
            (
                Just(num_images),
                Just(num_categories),
                prop::collection::vec(ann, 0..16),
            )
        })
        .prop_map(|(num_images, num_categories, anns)| {
            build_dataset(num_images, num_categories, &anns)
        })
}

fn build_dataset(num_images: u64, num_categories: u64, anns: &[AnnSeed]) -> Dataset {
    let images = (1..=num_images)
        .map(|id| Image::new(id, format!("image{id}.jpg"), 64, 64))
        .collect();
    let categories = (1..=num_categories)
        .map(|id| Category::new(id, format!("category{id}"), "thing"))
        .collect();
    let annotations = anns
        .iter()
        .zip(1u64..)
        .map(|(&(image_id, category_id, side), id)| {
            let side = f64::from(side);
            Annotation::new(id, image_id, category_id, [0.0, 0.0, side, side])
        })
        .collect();

    Dataset {
        images,
        categories,
        annotations,
        ..Dataset::default()
    }
}

/// File names `image1.jpg..=image8.jpg`, some of which may not exist.
pub fn arb_file_names() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec((1u64..=8).prop_map(|id| format!("image{id}.jpg")), 0..4)
}

/// An optional `(min, max)` box-area window over the areas `arb_dataset`
/// produces.
pub fn arb_area_window() -> impl Strategy<Value = (Option<f64>, Option<f64>)> {
    (
        prop::option::of(0u32..=1600),
        prop::option::of(0u32..=1600),
    )
        .prop_map(|(min, max)| (min.map(f64::from), max.map(f64::from)))
}
