//! Request validation
//!
//! Input types carry their rules through `validator::Validate`; the
//! extractors here apply them at the HTTP boundary.

pub mod extractor;

pub use extractor::{Validated, ValidatedQuery};
