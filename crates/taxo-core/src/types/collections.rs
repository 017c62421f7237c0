//! Re-exports of performance-oriented collection types.

pub use rustc_hash::{FxHashMap, FxHashSet};
pub use smallvec::SmallVec;
pub use std::collections::BTreeMap;

/// SmallVec optimized for supporting category assignments (≤3 per record).
pub type SmallVec4<T> = SmallVec<[T; 4]>;
