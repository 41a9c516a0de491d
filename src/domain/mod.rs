//! Domain layer: path ordering, tree construction and flattening
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod error;
pub mod flatten;
pub mod ordering;
pub mod path;
pub mod render;
pub mod tree;

pub use error::{DomainError, TreeResult};
pub use flatten::{flatten, inspect, list, Entry};
pub use ordering::compare_paths;
pub use path::{join_path, split_path, validate_path, DelimitedPath, HierPath, DEFAULT_DELIMITER};
pub use render::{forest_to_tree, leaf_paths, TreeNodeConvert};
pub use tree::{build_tree, build_tree_refs, node_count, Node};
