//! Ready-made predicates for the common COCO fields.
//!
//! Each predicate only matches records of its own collection; any other
//! record yields `false`.

use std::collections::HashSet;

use super::{Predicate, RecordRef};

/// Image `file_name` membership.
#[derive(Clone, Debug, Default)]
pub struct FileNames {
    names: HashSet<String>,
}

impl FileNames {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }
}

impl Predicate for FileNames {
    fn apply(&self, record: RecordRef<'_>) -> bool {
        match record {
            RecordRef::Image(image) => self.names.contains(&image.file_name),
            _ => false,
        }
    }
}

/// Category `name` membership.
#[derive(Clone, Debug, Default)]
pub struct CategoryNames {
    names: HashSet<String>,
}

impl CategoryNames {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }
}

impl Predicate for CategoryNames {
    fn apply(&self, record: RecordRef<'_>) -> bool {
        match record {
            RecordRef::Category(category) => self.names.contains(&category.name),
            _ => false,
        }
    }
}

/// Inclusive annotation `area` range with optional bounds.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BoxArea {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl BoxArea {
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, area: f64) -> bool {
        let above = self.min.is_none_or(|min| min <= area);
        let below = self.max.is_none_or(|max| area <= max);
        above && below
    }
}

impl Predicate for BoxArea {
    fn apply(&self, record: RecordRef<'_>) -> bool {
        match record {
            RecordRef::Annotation(ann) => self.contains(ann.area()),
            _ => false,
        }
    }
}
