use std::collections::HashSet;

use cocoedit::editor::{CocoEditor, CorrectOptions};
use cocoedit::filter::{FilterKind, RecordRef};
use cocoedit::model::ImageId;
use cocoedit::validation::{check_integrity, IssueCode};
use proptest::prelude::*;
use rand::{rngs::StdRng, SeedableRng};

mod proptest_helpers;

use proptest_helpers::{arb_area_window, arb_dataset, arb_file_names};

fn as_strs(names: &[String]) -> Vec<&str> {
    names.iter().map(String::as_str).collect()
}

proptest! {
    #![proptest_config(proptest_helpers::proptest_config())]

    #[test]
    fn apply_filter_is_idempotent(
        dataset in arb_dataset(),
        include in arb_file_names(),
        exclude in arb_file_names(),
        (min, max) in arb_area_window(),
    ) {
        let mut editor = CocoEditor::new(dataset);
        editor
            .add_file_name_filter(&as_strs(&include), &as_strs(&exclude))
            .add_box_area_filter(FilterKind::Inclusion, min, max)
            .apply_filter();
        let once = editor.dataset().clone();

        editor.apply_filter();
        prop_assert_eq!(editor.dataset(), &once);
    }

    #[test]
    fn surviving_images_match_include_then_exclude(
        dataset in arb_dataset(),
        include in arb_file_names(),
        exclude in arb_file_names(),
    ) {
        let expected: Vec<String> = dataset
            .images
            .iter()
            .map(|image| image.file_name.clone())
            .filter(|name| include.is_empty() || include.contains(name))
            .filter(|name| !exclude.contains(name))
            .collect();

        let mut editor = CocoEditor::new(dataset);
        editor
            .add_file_name_filter(&as_strs(&include), &as_strs(&exclude))
            .apply_filter();

        let kept: Vec<String> = editor
            .dataset()
            .images
            .iter()
            .map(|image| image.file_name.clone())
            .collect();
        prop_assert_eq!(kept, expected);
    }

    #[test]
    fn correct_restores_referential_integrity(
        dataset in arb_dataset(),
        exclude in arb_file_names(),
        correct_category in any::<bool>(),
    ) {
        let mut editor = CocoEditor::new(dataset);
        editor
            .add_file_name_filter(&[], &as_strs(&exclude))
            .correct(CorrectOptions::new(true, correct_category));

        let report = check_integrity(editor.dataset());
        prop_assert_eq!(report.count_code(IssueCode::MissingImageRef), 0);
        prop_assert_eq!(report.count_code(IssueCode::MissingCategoryRef), 0);
        prop_assert_eq!(report.count_code(IssueCode::OrphanImage), 0);
        if correct_category {
            prop_assert_eq!(report.count_code(IssueCode::OrphanCategory), 0);
        }

        let once = editor.dataset().clone();
        editor.correct(CorrectOptions::new(true, correct_category));
        prop_assert_eq!(editor.dataset(), &once);
    }

    #[test]
    fn disabled_corrections_keep_images_and_categories(dataset in arb_dataset()) {
        let images = dataset.images.clone();
        let categories = dataset.categories.clone();

        let mut editor = CocoEditor::new(dataset);
        editor.correct(CorrectOptions::new(false, false));

        prop_assert_eq!(&editor.dataset().images, &images);
        prop_assert_eq!(&editor.dataset().categories, &categories);
    }

    #[test]
    fn excluding_everything_empties_the_collection(dataset in arb_dataset()) {
        let mut editor = CocoEditor::new(dataset);
        editor
            .add_custom_filter(FilterKind::Exclusion, "annotation", |_: RecordRef<'_>| true)
            .unwrap()
            .correct(CorrectOptions::new(true, true));

        prop_assert!(editor.dataset().annotations.is_empty());
        prop_assert!(editor.dataset().images.is_empty());
        prop_assert!(editor.dataset().categories.is_empty());
    }

    #[test]
    fn sample_keeps_exactly_n_images_and_their_annotations(
        dataset in arb_dataset(),
        n in 0usize..=8,
        seed in any::<u64>(),
    ) {
        let total = dataset.images.len();
        let original_images = dataset.images.clone();
        let mut editor = CocoEditor::new(dataset.clone());
        let mut rng = StdRng::seed_from_u64(seed);

        let result = editor.sample_with_rng(n, false, &mut rng);
        if n > total {
            prop_assert!(result.is_err());
            prop_assert_eq!(editor.dataset(), &dataset);
            return Ok(());
        }

        let sampled = result.unwrap().clone();
        prop_assert_eq!(sampled.images.len(), n);
        prop_assert_eq!(&sampled.categories, &dataset.categories);

        let kept: HashSet<ImageId> = sampled.images.iter().map(|image| image.id).collect();
        let expected: Vec<_> = dataset
            .annotations
            .iter()
            .filter(|ann| kept.contains(&ann.image_id))
            .cloned()
            .collect();
        prop_assert_eq!(&sampled.annotations, &expected);

        let positions: Vec<usize> = sampled
            .images
            .iter()
            .map(|image| original_images.iter().position(|o| o.id == image.id).unwrap())
            .collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }
}
