//! Entity profiles — rolling the flat classification table up into one
//! profile per entity.

pub mod aggregator;
pub mod types;

pub use aggregator::EntityAggregator;
pub use types::{ClassifiedRecord, EntityProfile};
