//! Dataset validation.
//!
//! Two layers live here:
//! - Structural checks run on the raw JSON at load time. They fail fast with
//!   the missing key names and the record id.
//! - [`check_integrity`] inspects a loaded [`Dataset`] for broken references,
//!   orphaned records and duplicate ids, and reports every issue it finds.

mod report;

pub use report::{IntegrityIssue, IntegrityReport, IssueCode, Severity};

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use serde_json::Value;

use crate::error::CocoEditError;
use crate::filter::TargetType;
use crate::model::{CategoryId, Dataset, ImageId};

/// Keys every entry of `images` must carry.
pub const IMAGE_KEYS: &[&str] = &["id", "file_name", "width", "height"];

/// Keys every entry of `categories` must carry.
pub const CATEGORY_KEYS: &[&str] = &["id", "name", "supercategory"];

/// Keys every entry of `annotations` must carry.
pub const ANNOTATION_KEYS: &[&str] = &[
    "id",
    "image_id",
    "category_id",
    "bbox",
    "area",
    "segmentation",
];

/// Checks that every record carries `required` keys.
///
/// Stops at the first offending record. A record that is not a JSON object
/// is reported as malformed.
pub fn validate_keys(
    records: &[Value],
    required: &[&str],
    target: TargetType,
) -> Result<(), CocoEditError> {
    for (index, record) in records.iter().enumerate() {
        let obj = record.as_object().ok_or_else(|| {
            CocoEditError::Malformed(format!("{target} at index {index} is not a JSON object"))
        })?;

        let missing: Vec<String> = required
            .iter()
            .filter(|key| !obj.contains_key(**key))
            .map(|key| key.to_string())
            .collect();

        if !missing.is_empty() {
            let id = match obj.get("id") {
                Some(Value::String(s)) => s.clone(),
                Some(other) => other.to_string(),
                None => "Unknown".to_string(),
            };
            return Err(CocoEditError::MissingKeys {
                target,
                keys: missing,
                id,
            });
        }
    }

    Ok(())
}

pub fn validate_images(images: &[Value]) -> Result<(), CocoEditError> {
    validate_keys(images, IMAGE_KEYS, TargetType::Image)
}

pub fn validate_categories(categories: &[Value]) -> Result<(), CocoEditError> {
    validate_keys(categories, CATEGORY_KEYS, TargetType::Category)
}

pub fn validate_annotations(annotations: &[Value]) -> Result<(), CocoEditError> {
    validate_keys(annotations, ANNOTATION_KEYS, TargetType::Annotation)
}

/// Inspects a dataset for referential problems.
///
/// Reported issues:
/// - duplicate image, category and annotation ids (errors)
/// - annotations pointing at a missing image or category (errors)
/// - images and categories no annotation refers to (warnings)
pub fn check_integrity(dataset: &Dataset) -> IntegrityReport {
    let mut report = IntegrityReport::new();

    let image_ids = unique_ids(
        dataset.images.iter().map(|i| i.id),
        |id, first_index, index| IntegrityIssue::DuplicateImage {
            id,
            first_index,
            index,
        },
        &mut report,
    );
    let category_ids = unique_ids(
        dataset.categories.iter().map(|c| c.id),
        |id, first_index, index| IntegrityIssue::DuplicateCategory {
            id,
            first_index,
            index,
        },
        &mut report,
    );
    unique_ids(
        dataset.annotations.iter().map(|a| a.id),
        |id, first_index, index| IntegrityIssue::DuplicateAnnotation {
            id,
            first_index,
            index,
        },
        &mut report,
    );

    let mut used_images: HashSet<ImageId> = HashSet::new();
    let mut used_categories: HashSet<CategoryId> = HashSet::new();

    for ann in &dataset.annotations {
        if image_ids.contains(&ann.image_id) {
            used_images.insert(ann.image_id);
        } else {
            report.push(IntegrityIssue::DanglingImage {
                annotation: ann.id,
                image_id: ann.image_id,
            });
        }

        if category_ids.contains(&ann.category_id) {
            used_categories.insert(ann.category_id);
        } else {
            report.push(IntegrityIssue::DanglingCategory {
                annotation: ann.id,
                category_id: ann.category_id,
            });
        }
    }

    for image in dataset.images.iter().filter(|i| !used_images.contains(&i.id)) {
        report.push(IntegrityIssue::OrphanImage {
            id: image.id,
            file_name: image.file_name.clone(),
        });
    }

    for category in dataset
        .categories
        .iter()
        .filter(|c| !used_categories.contains(&c.id))
    {
        report.push(IntegrityIssue::OrphanCategory {
            id: category.id,
            name: category.name.clone(),
        });
    }

    report
}

/// Reports every repeat of an id and returns the distinct ids.
fn unique_ids<Id, F>(
    ids: impl Iterator<Item = Id>,
    duplicate: F,
    report: &mut IntegrityReport,
) -> HashSet<Id>
where
    Id: Copy + Eq + Hash,
    F: Fn(Id, usize, usize) -> IntegrityIssue,
{
    let mut first_seen: HashMap<Id, usize> = HashMap::new();

    for (index, id) in ids.enumerate() {
        match first_seen.get(&id) {
            Some(&first_index) => report.push(duplicate(id, first_index, index)),
            None => {
                first_seen.insert(id, index);
            }
        }
    }

    first_seen.into_keys().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Annotation, Category, Image};
    use serde_json::json;

    #[test]
    fn validate_keys_accepts_complete_records() {
        let data = vec![
            json!({"id": 1, "name": "Data 1", "category": "A"}),
            json!({"id": 2, "name": "Data 2", "category": "B"}),
        ];
        assert!(validate_keys(&data, &["id", "name", "category"], TargetType::Category).is_ok());
    }

    #[test]
    fn validate_keys_names_missing_keys_and_id() {
        let data = vec![
            json!({"id": 1, "name": "Data 1", "category": "A"}),
            json!({"id": 2, "category": "B"}),
        ];
        let err = validate_keys(&data, &["id", "name", "category"], TargetType::Category)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing keys [\"name\"] in category with ID: 2"
        );
    }

    #[test]
    fn validate_keys_uses_unknown_without_id() {
        let data = vec![json!({"file_name": "a.jpg"})];
        let err = validate_images(&data).unwrap_err();
        match err {
            CocoEditError::MissingKeys { keys, id, target } => {
                assert_eq!(keys, vec!["id", "width", "height"]);
                assert_eq!(id, "Unknown");
                assert_eq!(target, TargetType::Image);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_object_record_is_malformed() {
        let err = validate_annotations(&[json!(5)]).unwrap_err();
        assert!(matches!(err, CocoEditError::Malformed(_)));
    }

    fn dataset() -> Dataset {
        Dataset {
            images: vec![
                Image::new(1u64, "a.jpg", 10, 10),
                Image::new(2u64, "b.jpg", 10, 10),
                Image::new(2u64, "c.jpg", 10, 10),
            ],
            categories: vec![
                Category::new(1u64, "cat", "animal"),
                Category::new(2u64, "dog", "animal"),
            ],
            annotations: vec![
                Annotation::new(1u64, 1u64, 1u64, [0.0, 0.0, 1.0, 1.0]),
                Annotation::new(2u64, 9u64, 1u64, [0.0, 0.0, 1.0, 1.0]),
                Annotation::new(3u64, 1u64, 7u64, [0.0, 0.0, 1.0, 1.0]),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn integrity_report_finds_every_issue_kind() {
        let report = check_integrity(&dataset());
        let codes: Vec<IssueCode> = report.issues.iter().map(|i| i.code()).collect();

        assert!(codes.contains(&IssueCode::DuplicateImageId));
        assert!(codes.contains(&IssueCode::MissingImageRef));
        assert!(codes.contains(&IssueCode::MissingCategoryRef));
        assert!(codes.contains(&IssueCode::OrphanImage));
        assert!(codes.contains(&IssueCode::OrphanCategory));
        assert_eq!(report.error_count(), 3);
        assert!(!report.is_ok());
        assert!(report.issues.contains(&IntegrityIssue::DuplicateImage {
            id: ImageId(2),
            first_index: 1,
            index: 2,
        }));
        assert!(report.issues.contains(&IntegrityIssue::DanglingCategory {
            annotation: crate::model::AnnotationId(3),
            category_id: CategoryId(7),
        }));
    }

    #[test]
    fn consistent_dataset_is_clean() {
        let dataset = Dataset {
            images: vec![Image::new(1u64, "a.jpg", 10, 10)],
            categories: vec![Category::new(1u64, "cat", "animal")],
            annotations: vec![Annotation::new(1u64, 1u64, 1u64, [0.0, 0.0, 1.0, 1.0])],
            ..Default::default()
        };
        assert!(check_integrity(&dataset).is_clean());
    }
}
