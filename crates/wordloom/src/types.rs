//! # Common Types
//!
//! Ordered-container aliases for the crate.
//!
//! Token iteration order decides which tokens are admitted under a size
//! cap, so every token collection here is insertion-ordered; a hash map
//! would make the size-bounded fill non-deterministic.

use indexmap::{IndexMap, IndexSet};

/// Insertion-ordered token → row-index mapping.
pub type TokenIndexMap = IndexMap<String, usize>;

/// Insertion-ordered token set.
pub type TokenSet = IndexSet<String>;
