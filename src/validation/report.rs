//! Integrity report types.
//!
//! Every issue is one broken or suspicious link in the COCO id graph. Its
//! severity follows from its kind: a reference that cannot be resolved or an
//! ambiguous id is an error, a record nothing points at is a warning.

use std::fmt;

use crate::model::{AnnotationId, CategoryId, ImageId};

/// All issues found in one dataset, in discovery order.
#[derive(Clone, Debug, Default)]
pub struct IntegrityReport {
    pub issues: Vec<IntegrityIssue>,
}

impl IntegrityReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, issue: IntegrityIssue) {
        self.issues.push(issue);
    }

    pub fn error_count(&self) -> usize {
        self.issues.iter().filter(|i| i.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.issues.len() - self.error_count()
    }

    /// True if every reference resolves and every id is unique. Orphans
    /// alone do not fail a dataset.
    pub fn is_ok(&self) -> bool {
        self.error_count() == 0
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn count_code(&self, code: IssueCode) -> usize {
        self.issues.iter().filter(|i| i.code() == code).count()
    }
}

impl fmt::Display for IntegrityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.issues.is_empty() {
            return writeln!(f, "Integrity check passed: no issues found");
        }

        writeln!(
            f,
            "Integrity check found {} error(s) and {} warning(s):",
            self.error_count(),
            self.warning_count()
        )?;
        for issue in &self.issues {
            writeln!(f, "  {issue}")?;
        }
        Ok(())
    }
}

/// One problem in the id graph.
#[derive(Clone, Debug, PartialEq)]
pub enum IntegrityIssue {
    /// `id` appears again at `index`; `first_index` is where it first appeared.
    DuplicateImage {
        id: ImageId,
        first_index: usize,
        index: usize,
    },
    DuplicateCategory {
        id: CategoryId,
        first_index: usize,
        index: usize,
    },
    DuplicateAnnotation {
        id: AnnotationId,
        first_index: usize,
        index: usize,
    },
    /// An annotation whose `image_id` matches no image.
    DanglingImage {
        annotation: AnnotationId,
        image_id: ImageId,
    },
    /// An annotation whose `category_id` matches no category.
    DanglingCategory {
        annotation: AnnotationId,
        category_id: CategoryId,
    },
    /// An image no annotation refers to.
    OrphanImage { id: ImageId, file_name: String },
    /// A category no annotation refers to.
    OrphanCategory { id: CategoryId, name: String },
}

impl IntegrityIssue {
    pub fn code(&self) -> IssueCode {
        match self {
            IntegrityIssue::DuplicateImage { .. } => IssueCode::DuplicateImageId,
            IntegrityIssue::DuplicateCategory { .. } => IssueCode::DuplicateCategoryId,
            IntegrityIssue::DuplicateAnnotation { .. } => IssueCode::DuplicateAnnotationId,
            IntegrityIssue::DanglingImage { .. } => IssueCode::MissingImageRef,
            IntegrityIssue::DanglingCategory { .. } => IssueCode::MissingCategoryRef,
            IntegrityIssue::OrphanImage { .. } => IssueCode::OrphanImage,
            IntegrityIssue::OrphanCategory { .. } => IssueCode::OrphanCategory,
        }
    }

    pub fn severity(&self) -> Severity {
        match self.code() {
            IssueCode::OrphanImage | IssueCode::OrphanCategory => Severity::Warning,
            _ => Severity::Error,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }
}

impl fmt::Display for IntegrityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{:?}]: ", self.severity(), self.code())?;
        match self {
            IntegrityIssue::DuplicateImage {
                id,
                first_index,
                index,
            } => write!(f, "image id {id} at index {index} (first at {first_index})"),
            IntegrityIssue::DuplicateCategory {
                id,
                first_index,
                index,
            } => write!(f, "category id {id} at index {index} (first at {first_index})"),
            IntegrityIssue::DuplicateAnnotation {
                id,
                first_index,
                index,
            } => write!(f, "annotation id {id} at index {index} (first at {first_index})"),
            IntegrityIssue::DanglingImage {
                annotation,
                image_id,
            } => write!(f, "annotation {annotation} -> image {image_id}, which does not exist"),
            IntegrityIssue::DanglingCategory {
                annotation,
                category_id,
            } => write!(
                f,
                "annotation {annotation} -> category {category_id}, which does not exist"
            ),
            IntegrityIssue::OrphanImage { id, file_name } => {
                write!(f, "image {id} ('{file_name}') has no annotations")
            }
            IntegrityIssue::OrphanCategory { id, name } => {
                write!(f, "category {id} ('{name}') has no annotations")
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
        })
    }
}

/// A stable name for each kind of issue, printed in reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IssueCode {
    DuplicateImageId,
    DuplicateCategoryId,
    DuplicateAnnotationId,
    MissingImageRef,
    MissingCategoryRef,
    OrphanImage,
    OrphanCategory,
}
