//! Core invoice types, validation rules, and errors.
//!
//! Validation is split the way form layers usually split it: field-level
//! predicates per line item, then an ordered aggregate pass over the whole
//! draft that stops at the first failure.

mod error;
mod types;
mod validation;

pub use error::*;
pub use types::*;
pub use validation::*;
