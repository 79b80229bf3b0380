//! The COCO dataset model.
//!
//! Records are typed for the keys the editor reasons about (ids, foreign
//! keys, names, geometry) and carry any other key through untouched.
//!
//! # Example
//!
//! ```
//! use cocoedit::model::{Annotation, Category, Dataset, Image};
//!
//! let dataset = Dataset {
//!     images: vec![Image::new(1u64, "image.jpg", 640, 480)],
//!     categories: vec![Category::new(1u64, "person", "human")],
//!     annotations: vec![Annotation::new(1u64, 1u64, 1u64, [10.0, 20.0, 90.0, 180.0])],
//!     ..Default::default()
//! };
//! assert_eq!(dataset.record_count(), 3);
//! ```

mod ids;
mod io;
mod records;

pub use ids::{AnnotationId, CategoryId, ImageId, LicenseId};
pub use io::{
    dataset_from_value, from_coco_slice, from_coco_str, read_coco_json, to_coco_string,
    write_coco_json,
};
pub use records::{Annotation, Category, Dataset, Image, Info, License};
