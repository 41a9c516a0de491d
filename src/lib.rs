//! Arrange flat, path-bearing elements into a hierarchical tree and flatten
//! it back into an ordered, annotated entry list.
//!
//! ```
//! use hiertree::domain::{inspect, list, DelimitedPath};
//!
//! let elems = vec![DelimitedPath::slash("foo/bar"), DelimitedPath::slash("foo/baz")];
//! let entries = list(&elems).unwrap();
//! assert_eq!(inspect(&entries), vec!["foo>", "[foo/]bar*", "[foo/]baz*"]);
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;

pub use domain::{build_tree, flatten, inspect, list, DomainError, Entry, HierPath, Node};
