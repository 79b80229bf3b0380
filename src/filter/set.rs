//! Filter containers and the include/exclude combination rule.

use super::{Filter, FilterKind, Record, TargetType};

/// The filters registered for one collection, split by kind.
///
/// Both lists keep insertion order; nothing is de-duplicated.
#[derive(Debug, Default)]
pub struct FilterSet {
    include: Vec<Filter>,
    exclude: Vec<Filter>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `filter` to the list matching its kind.
    pub fn add(&mut self, filter: Filter) {
        match filter.kind() {
            FilterKind::Inclusion => self.include.push(filter),
            FilterKind::Exclusion => self.exclude.push(filter),
        }
    }

    pub fn include(&self) -> &[Filter] {
        &self.include
    }

    pub fn exclude(&self) -> &[Filter] {
        &self.exclude
    }

    pub fn len(&self) -> usize {
        self.include.len() + self.exclude.len()
    }

    pub fn is_empty(&self) -> bool {
        self.include.is_empty() && self.exclude.is_empty()
    }

    /// Filters `records` in place and returns how many were removed.
    ///
    /// With inclusion filters present, a record survives only if at least one
    /// of them returns `true`. The exclusion filters then run on what is
    /// left and remove a record if any of them returns `true`. A kind with
    /// no filters leaves the collection untouched. Relative order is kept.
    pub fn retain<T: Record>(&self, records: &mut Vec<T>) -> usize {
        let before = records.len();

        if !self.include.is_empty() {
            records.retain(|r| self.include.iter().any(|f| f.apply(r.as_record())));
        }

        if !self.exclude.is_empty() {
            records.retain(|r| !self.exclude.iter().any(|f| f.apply(r.as_record())));
        }

        before - records.len()
    }
}

/// One [`FilterSet`] per filterable collection.
#[derive(Debug, Default)]
pub struct FilterRegistry {
    images: FilterSet,
    annotations: FilterSet,
    categories: FilterSet,
    licenses: FilterSet,
}

impl FilterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Routes `filter` to the set of its target collection.
    pub fn add(&mut self, filter: Filter) {
        self.get_mut(filter.target()).add(filter);
    }

    pub fn get(&self, target: TargetType) -> &FilterSet {
        match target {
            TargetType::Image => &self.images,
            TargetType::Annotation => &self.annotations,
            TargetType::Category => &self.categories,
            TargetType::License => &self.licenses,
        }
    }

    pub fn get_mut(&mut self, target: TargetType) -> &mut FilterSet {
        match target {
            TargetType::Image => &mut self.images,
            TargetType::Annotation => &mut self.annotations,
            TargetType::Category => &mut self.categories,
            TargetType::License => &mut self.licenses,
        }
    }

    /// Total number of registered filters.
    pub fn len(&self) -> usize {
        TargetType::ALL.iter().map(|t| self.get(*t).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
