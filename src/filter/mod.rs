//! Record filters.
//!
//! A [`Filter`] pairs a predicate with two tags: the collection it applies to
//! ([`TargetType`]) and how its verdict is read ([`FilterKind`]). The
//! predicate itself is kind-agnostic; only the combination step in
//! [`FilterSet::retain`] interprets `true` as "keep" (inclusion) or
//! "remove" (exclusion).
//!
//! # Example
//!
//! ```
//! use cocoedit::filter::{Filter, FilterKind, RecordRef, TargetType};
//!
//! let large = Filter::new(FilterKind::Exclusion, TargetType::Annotation, |r: RecordRef<'_>| {
//!     matches!(r, RecordRef::Annotation(a) if a.area() > 250.0)
//! });
//! assert_eq!(large.kind(), FilterKind::Exclusion);
//! ```

mod builtin;
mod set;

pub use builtin::{BoxArea, CategoryNames, FileNames};
pub use set::{FilterRegistry, FilterSet};

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::error::CocoEditError;
use crate::model::{Annotation, Category, Image, License};

/// How a filter's verdict is interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FilterKind {
    /// `true` is a vote to keep the record.
    Inclusion,
    /// `true` is a vote to remove the record.
    Exclusion,
}

impl FilterKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterKind::Inclusion => "inclusion",
            FilterKind::Exclusion => "exclusion",
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterKind {
    type Err = CocoEditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inclusion" | "include" => Ok(FilterKind::Inclusion),
            "exclusion" | "exclude" => Ok(FilterKind::Exclusion),
            other => Err(CocoEditError::InvalidArgument(format!(
                "unknown filter kind '{other}' (expected inclusion or exclusion)"
            ))),
        }
    }
}

/// The collection a filter applies to. `info` is never filtered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TargetType {
    Image,
    Annotation,
    Category,
    License,
}

impl TargetType {
    pub const ALL: [TargetType; 4] = [
        TargetType::Image,
        TargetType::Annotation,
        TargetType::Category,
        TargetType::License,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TargetType::Image => "image",
            TargetType::Annotation => "annotation",
            TargetType::Category => "category",
            TargetType::License => "license",
        }
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetType {
    type Err = CocoEditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "image" | "images" => Ok(TargetType::Image),
            "annotation" | "annotations" => Ok(TargetType::Annotation),
            "category" | "categories" => Ok(TargetType::Category),
            "license" | "licenses" => Ok(TargetType::License),
            other => Err(CocoEditError::InvalidArgument(format!(
                "unknown target type '{other}' (expected image, annotation, category or license)"
            ))),
        }
    }
}

/// A borrowed view of one record from any filterable collection.
#[derive(Clone, Copy, Debug)]
pub enum RecordRef<'a> {
    Image(&'a Image),
    Annotation(&'a Annotation),
    Category(&'a Category),
    License(&'a License),
}

impl RecordRef<'_> {
    pub fn target(&self) -> TargetType {
        match self {
            RecordRef::Image(_) => TargetType::Image,
            RecordRef::Annotation(_) => TargetType::Annotation,
            RecordRef::Category(_) => TargetType::Category,
            RecordRef::License(_) => TargetType::License,
        }
    }

    /// Looks up a field by its JSON key, for predicates that are not tied to
    /// one record type.
    pub fn field(&self, key: &str) -> Option<Value> {
        match self {
            RecordRef::Image(r) => r.field(key),
            RecordRef::Annotation(r) => r.field(key),
            RecordRef::Category(r) => r.field(key),
            RecordRef::License(r) => r.field(key),
        }
    }
}

/// A record type that belongs to one filterable collection.
pub trait Record {
    const TARGET: TargetType;

    fn as_record(&self) -> RecordRef<'_>;
}

impl Record for Image {
    const TARGET: TargetType = TargetType::Image;

    fn as_record(&self) -> RecordRef<'_> {
        RecordRef::Image(self)
    }
}

impl Record for Annotation {
    const TARGET: TargetType = TargetType::Annotation;

    fn as_record(&self) -> RecordRef<'_> {
        RecordRef::Annotation(self)
    }
}

impl Record for Category {
    const TARGET: TargetType = TargetType::Category;

    fn as_record(&self) -> RecordRef<'_> {
        RecordRef::Category(self)
    }
}

impl Record for License {
    const TARGET: TargetType = TargetType::License;

    fn as_record(&self) -> RecordRef<'_> {
        RecordRef::License(self)
    }
}

/// A test over a single record.
///
/// Any `Fn(RecordRef<'_>) -> bool` closure is a predicate.
pub trait Predicate {
    fn apply(&self, record: RecordRef<'_>) -> bool;
}

impl<F> Predicate for F
where
    F: Fn(RecordRef<'_>) -> bool,
{
    fn apply(&self, record: RecordRef<'_>) -> bool {
        self(record)
    }
}

/// A predicate tagged with its kind and target collection.
pub struct Filter {
    kind: FilterKind,
    target: TargetType,
    predicate: Box<dyn Predicate>,
}

impl Filter {
    pub fn new(kind: FilterKind, target: TargetType, predicate: impl Predicate + 'static) -> Self {
        Self {
            kind,
            target,
            predicate: Box::new(predicate),
        }
    }

    /// Shorthand for an inclusion filter.
    pub fn include(target: TargetType, predicate: impl Predicate + 'static) -> Self {
        Self::new(FilterKind::Inclusion, target, predicate)
    }

    /// Shorthand for an exclusion filter.
    pub fn exclude(target: TargetType, predicate: impl Predicate + 'static) -> Self {
        Self::new(FilterKind::Exclusion, target, predicate)
    }

    /// Builds a filter from textual tags, e.g. `("exclusion", "annotation")`.
    ///
    /// # Errors
    /// [`CocoEditError::InvalidArgument`] if either tag is not recognized.
    pub fn from_tags(
        kind: &str,
        target: &str,
        predicate: impl Predicate + 'static,
    ) -> Result<Self, CocoEditError> {
        Ok(Self::new(kind.parse()?, target.parse()?, predicate))
    }

    /// Keeps images whose `file_name` is in `names`.
    pub fn file_names<I, S>(kind: FilterKind, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(kind, TargetType::Image, FileNames::new(names))
    }

    /// Matches categories whose `name` is in `names`.
    pub fn category_names<I, S>(kind: FilterKind, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(kind, TargetType::Category, CategoryNames::new(names))
    }

    /// Matches annotations with `min <= area <= max`. A `None` bound is
    /// unconstrained.
    pub fn box_area(kind: FilterKind, min: Option<f64>, max: Option<f64>) -> Self {
        Self::new(kind, TargetType::Annotation, BoxArea::new(min, max))
    }

    pub fn kind(&self) -> FilterKind {
        self.kind
    }

    pub fn target(&self) -> TargetType {
        self.target
    }

    /// Evaluates the predicate. What `true` means depends on [`Self::kind`].
    pub fn apply(&self, record: RecordRef<'_>) -> bool {
        self.predicate.apply(record)
    }
}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filter")
            .field("kind", &self.kind)
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}
