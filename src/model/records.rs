//! Typed COCO records.
//!
//! Each record types the keys cocoedit works with and keeps every other key
//! in a flattened `extra` map, so a dataset written back out carries the same
//! fields it was loaded with. Numeric geometry (`bbox`, `area`) is held as
//! [`serde_json::Number`] to keep integers integral on re-emission.
//! Licenses and `info` are not interpreted at all and stay raw JSON.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use super::ids::{AnnotationId, CategoryId, ImageId, LicenseId};

/// The free-form `info` block, kept as loaded. Never touched by filtering
/// or correction.
pub type Info = Value;

/// A complete COCO document: the unit of load and save.
///
/// All five collections are always serialized, even when empty.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default = "empty_info")]
    pub info: Info,

    #[serde(default)]
    pub licenses: Vec<License>,

    pub images: Vec<Image>,

    pub categories: Vec<Category>,

    pub annotations: Vec<Annotation>,
}

impl Default for Dataset {
    fn default() -> Self {
        Self {
            info: empty_info(),
            licenses: Vec::new(),
            images: Vec::new(),
            categories: Vec::new(),
            annotations: Vec::new(),
        }
    }
}

impl Dataset {
    /// Total number of records across the four filterable collections.
    pub fn record_count(&self) -> usize {
        self.licenses.len() + self.images.len() + self.categories.len() + self.annotations.len()
    }
}

/// An entry of `images`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub id: ImageId,
    pub file_name: String,
    pub width: u32,
    pub height: u32,

    /// Keys cocoedit does not interpret (`license`, `date_captured`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Image {
    pub fn new(
        id: impl Into<ImageId>,
        file_name: impl Into<String>,
        width: u32,
        height: u32,
    ) -> Self {
        Self {
            id: id.into(),
            file_name: file_name.into(),
            width,
            height,
            extra: Map::new(),
        }
    }

    /// Looks up a key by its JSON name.
    pub fn field(&self, key: &str) -> Option<Value> {
        match key {
            "id" => Some(self.id.as_u64().into()),
            "file_name" => Some(self.file_name.clone().into()),
            "width" => Some(self.width.into()),
            "height" => Some(self.height.into()),
            other => self.extra.get(other).cloned(),
        }
    }
}

/// An entry of `categories`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub supercategory: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Category {
    pub fn new(
        id: impl Into<CategoryId>,
        name: impl Into<String>,
        supercategory: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            supercategory: supercategory.into(),
            extra: Map::new(),
        }
    }

    pub fn field(&self, key: &str) -> Option<Value> {
        match key {
            "id" => Some(self.id.as_u64().into()),
            "name" => Some(self.name.clone().into()),
            "supercategory" => Some(self.supercategory.clone().into()),
            other => self.extra.get(other).cloned(),
        }
    }
}

/// An entry of `annotations`, the join between images and categories.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub id: AnnotationId,
    pub image_id: ImageId,
    pub category_id: CategoryId,

    /// `[x, y, width, height]` in pixels.
    pub bbox: [Number; 4],

    pub area: Number,

    /// Polygon list or RLE; opaque to cocoedit.
    pub segmentation: Value,

    /// Keys cocoedit does not interpret (`iscrowd`, `score`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Annotation {
    /// Creates an annotation from an XYWH box. The area is `width * height`
    /// and the segmentation is empty.
    ///
    /// Non-finite coordinates cannot be represented in JSON and are stored
    /// as `0`.
    pub fn new(
        id: impl Into<AnnotationId>,
        image_id: impl Into<ImageId>,
        category_id: impl Into<CategoryId>,
        bbox: [f64; 4],
    ) -> Self {
        Self {
            id: id.into(),
            image_id: image_id.into(),
            category_id: category_id.into(),
            bbox: bbox.map(json_number),
            area: json_number(bbox[2] * bbox[3]),
            segmentation: Value::Array(Vec::new()),
            extra: Map::new(),
        }
    }

    /// Replaces the stored area.
    pub fn with_area(mut self, area: f64) -> Self {
        self.area = json_number(area);
        self
    }

    /// The area as a float; `NaN` if the stored number has no `f64` form.
    pub fn area(&self) -> f64 {
        self.area.as_f64().unwrap_or(f64::NAN)
    }

    pub fn field(&self, key: &str) -> Option<Value> {
        match key {
            "id" => Some(self.id.as_u64().into()),
            "image_id" => Some(self.image_id.as_u64().into()),
            "category_id" => Some(self.category_id.as_u64().into()),
            "bbox" => Some(Value::Array(
                self.bbox.iter().cloned().map(Value::Number).collect(),
            )),
            "area" => Some(Value::Number(self.area.clone())),
            "segmentation" => Some(self.segmentation.clone()),
            other => self.extra.get(other).cloned(),
        }
    }
}

/// An entry of `licenses`, held as the raw JSON object.
///
/// Licenses take no part in the join logic, so none of their keys are
/// required and every value is written back exactly as it was read.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct License(pub Map<String, Value>);

impl License {
    pub fn new(id: impl Into<LicenseId>, name: impl Into<String>) -> Self {
        let id: LicenseId = id.into();
        let mut fields = Map::new();
        fields.insert("id".to_string(), id.as_u64().into());
        fields.insert("name".to_string(), Value::String(name.into()));
        Self(fields)
    }

    /// The `id`, if present and a non-negative integer.
    pub fn id(&self) -> Option<LicenseId> {
        self.0.get("id").and_then(Value::as_u64).map(LicenseId::new)
    }

    /// The `name`, if present and a string.
    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }

    pub fn field(&self, key: &str) -> Option<Value> {
        self.0.get(key).cloned()
    }
}

fn empty_info() -> Info {
    Value::Object(Map::new())
}

fn json_number(value: f64) -> Number {
    Number::from_f64(value).unwrap_or_else(|| Number::from(0u8))
}
