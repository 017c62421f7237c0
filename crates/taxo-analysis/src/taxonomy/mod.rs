//! Versioned technology taxonomy: the read-only reference shared by every
//! component within a run.

pub mod loader;
pub mod types;

pub use loader::load_taxonomy;
pub use types::{Area, Taxonomy};
