//! Core domain logic for recipe-rs.
//!
//! Pure functions over configuration and model output. Nothing in this
//! module performs I/O, so it can be shared by the workflow, the CLI, and
//! tests without a provider.

pub mod cookware;
pub mod relevance;

pub use cookware::{
    CookwareExtraction, CookwareValidation, DEFAULT_COOKWARE, normalize_cookware,
    normalize_cookware_item, parse_cookware_lines, validate_cookware,
};
pub use relevance::{Relevance, RelevanceCheck};
