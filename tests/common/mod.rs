#![allow(dead_code)]

use std::fs;
use std::path::Path;

use serde_json::{json, Value};

pub const SAMPLE_FIXTURE: &str = "tests/fixtures/sample.coco.json";

/// The three-image fixture as a JSON value.
pub fn sample_value() -> Value {
    let text = fs::read_to_string(SAMPLE_FIXTURE).expect("read sample fixture");
    serde_json::from_str(&text).expect("parse sample fixture")
}

/// Two images, two annotations (image 1 -> category 1, image 2 -> category 2),
/// two categories.
pub fn two_by_two() -> Value {
    json!({
        "info": {},
        "licenses": [],
        "images": [
            {"file_name": "image1.jpg", "id": 1, "height": 100, "width": 100},
            {"file_name": "image2.jpg", "id": 2, "height": 200, "width": 200}
        ],
        "annotations": [
            {"id": 1, "image_id": 1, "category_id": 1,
             "segmentation": [], "area": 100, "bbox": [0, 0, 10, 10]},
            {"id": 2, "image_id": 2, "category_id": 2,
             "segmentation": [], "area": 100, "bbox": [0, 0, 10, 10]}
        ],
        "categories": [
            {"id": 1, "name": "cat1", "supercategory": "cat"},
            {"id": 2, "name": "cat2", "supercategory": "cat"}
        ]
    })
}

/// Element `index` of collection `key`.
pub fn item(value: &Value, key: &str, index: usize) -> Value {
    value[key][index].clone()
}

/// Elements of collection `key` at `indices`, as a JSON array.
pub fn items(value: &Value, key: &str, indices: &[usize]) -> Value {
    Value::Array(indices.iter().map(|&i| item(value, key, i)).collect())
}

pub fn write_json(path: &Path, value: &Value) {
    fs::write(path, serde_json::to_string(value).expect("serialize")).expect("write json");
}

pub fn read_json(path: &Path) -> Value {
    let text = fs::read_to_string(path).expect("read json");
    serde_json::from_str(&text).expect("parse json")
}
