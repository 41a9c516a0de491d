//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.

mod hierarchy;

pub use hierarchy::{HierarchyService, DEFAULT_TREE_LABEL};
