//! COCO JSON reader and writer.
//!
//! Loading goes through an untyped [`serde_json::Value`] first so that the
//! required-key checks can name every missing key (and the record id) before
//! any typed deserialization runs. The typed records are then built from
//! borrowed values, so the caller's document is never aliased.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::info;

use super::records::{Annotation, Category, Dataset, Image, Info, License};
use crate::error::CocoEditError;
use crate::filter::TargetType;
use crate::validation;

/// Reads and validates a dataset from a COCO JSON file.
///
/// # Errors
/// Returns [`CocoEditError::Io`] if the file cannot be opened,
/// [`CocoEditError::JsonParse`] if it is not JSON, and a structural error if
/// required collections or keys are missing.
///
/// # Example
/// ```no_run
/// use std::path::Path;
/// use cocoedit::model::read_coco_json;
///
/// let dataset = read_coco_json(Path::new("instances_val2017.json"))?;
/// println!("{} images", dataset.images.len());
/// # Ok::<(), cocoedit::CocoEditError>(())
/// ```
pub fn read_coco_json(path: &Path) -> Result<Dataset, CocoEditError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let value: Value =
        serde_json::from_reader(reader).map_err(|source| CocoEditError::JsonParse {
            path: path.to_path_buf(),
            source,
        })?;

    let dataset = dataset_from_value(&value)?;
    info!(
        path = %path.display(),
        images = dataset.images.len(),
        annotations = dataset.annotations.len(),
        categories = dataset.categories.len(),
        "loaded COCO dataset"
    );
    Ok(dataset)
}

/// Writes a dataset to a COCO JSON file.
///
/// The parent directory must already exist; it is not created.
pub fn write_coco_json(path: &Path, dataset: &Dataset) -> Result<(), CocoEditError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, dataset).map_err(|source| {
        CocoEditError::JsonWrite {
            path: path.to_path_buf(),
            source,
        }
    })?;
    writer.flush()?;

    info!(
        path = %path.display(),
        images = dataset.images.len(),
        annotations = dataset.annotations.len(),
        "wrote COCO dataset"
    );
    Ok(())
}

/// Parses and validates a dataset from a COCO JSON string.
pub fn from_coco_str(json: &str) -> Result<Dataset, CocoEditError> {
    let value: Value = serde_json::from_str(json)
        .map_err(|e| CocoEditError::Malformed(format!("invalid JSON: {e}")))?;
    dataset_from_value(&value)
}

/// Parses and validates a dataset from raw bytes.
pub fn from_coco_slice(bytes: &[u8]) -> Result<Dataset, CocoEditError> {
    let value: Value = serde_json::from_slice(bytes)
        .map_err(|e| CocoEditError::Malformed(format!("invalid JSON: {e}")))?;
    dataset_from_value(&value)
}

/// Serializes a dataset to a pretty-printed COCO JSON string.
pub fn to_coco_string(dataset: &Dataset) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(dataset)
}

/// Builds a validated [`Dataset`] from an in-memory COCO document.
///
/// `images`, `annotations` and `categories` are required; `licenses`
/// defaults to empty. `info` is kept as given, whatever its type, and
/// defaults to an empty object only when the key is absent. The returned dataset
/// owns copies of every record.
pub fn dataset_from_value(value: &Value) -> Result<Dataset, CocoEditError> {
    let root = value
        .as_object()
        .ok_or_else(|| CocoEditError::Malformed("top level is not a JSON object".to_string()))?;

    let images = required_collection(root, "images")?;
    let annotations = required_collection(root, "annotations")?;
    let categories = required_collection(root, "categories")?;

    validation::validate_images(images)?;
    validation::validate_categories(categories)?;
    validation::validate_annotations(annotations)?;

    let licenses = match root.get("licenses") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => parse_records::<License>(items, TargetType::License)?,
        Some(_) => {
            return Err(CocoEditError::Malformed(
                "'licenses' is not an array".to_string(),
            ))
        }
    };

    let info: Info = root
        .get("info")
        .cloned()
        .unwrap_or_else(|| Value::Object(Map::new()));

    Ok(Dataset {
        info,
        licenses,
        images: parse_records::<Image>(images, TargetType::Image)?,
        categories: parse_records::<Category>(categories, TargetType::Category)?,
        annotations: parse_records::<Annotation>(annotations, TargetType::Annotation)?,
    })
}

fn required_collection<'a>(
    root: &'a Map<String, Value>,
    key: &'static str,
) -> Result<&'a [Value], CocoEditError> {
    match root.get(key) {
        Some(Value::Array(items)) => Ok(items),
        Some(_) => Err(CocoEditError::Malformed(format!("'{key}' is not an array"))),
        None => Err(CocoEditError::MissingCollection(key)),
    }
}

fn parse_records<'a, T: Deserialize<'a>>(
    items: &'a [Value],
    target: TargetType,
) -> Result<Vec<T>, CocoEditError> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            T::deserialize(item).map_err(|source| CocoEditError::InvalidRecord {
                target,
                index,
                source,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn minimal() -> Value {
        json!({
            "images": [{"id": 1, "file_name": "a.jpg", "width": 10, "height": 10}],
            "annotations": [{
                "id": 1, "image_id": 1, "category_id": 1,
                "bbox": [0, 0, 1, 1], "area": 1, "segmentation": []
            }],
            "categories": [{"id": 1, "name": "cat", "supercategory": "animal"}]
        })
    }

    #[test]
    fn optional_collections_default_to_empty() {
        let dataset = dataset_from_value(&minimal()).unwrap();
        assert_eq!(dataset.info, json!({}));
        assert!(dataset.licenses.is_empty());
        assert_eq!(dataset.images.len(), 1);
    }

    #[test]
    fn info_is_kept_as_given() {
        for info in [json!(null), json!("COCO 2017"), json!({"year": 2017})] {
            let mut value = minimal();
            value["info"] = info.clone();
            let dataset = dataset_from_value(&value).unwrap();
            assert_eq!(dataset.info, info);
            assert_eq!(serde_json::to_value(&dataset).unwrap()["info"], info);
        }
    }

    #[test]
    fn missing_collection_is_reported_by_name() {
        let mut value = minimal();
        value.as_object_mut().unwrap().remove("categories");
        let err = dataset_from_value(&value).unwrap_err();
        assert!(matches!(err, CocoEditError::MissingCollection("categories")));
    }

    #[test]
    fn wrong_value_type_reports_record_position() {
        let mut value = minimal();
        value["images"][0]["width"] = json!("wide");
        let err = dataset_from_value(&value).unwrap_err();
        assert!(matches!(
            err,
            CocoEditError::InvalidRecord {
                target: TargetType::Image,
                index: 0,
                ..
            }
        ));
    }

    #[test]
    fn non_object_document_is_malformed() {
        let err = from_coco_str("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, CocoEditError::Malformed(_)));
        assert!(from_coco_slice(b"{not json").is_err());
    }

    #[test]
    fn string_round_trip_preserves_document() {
        let dataset = dataset_from_value(&minimal()).unwrap();
        let json = to_coco_string(&dataset).unwrap();
        assert_eq!(from_coco_str(&json).unwrap(), dataset);
    }
}
