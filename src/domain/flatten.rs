//! Flattening a forest into an ordered list of positioned entries.

use std::fmt;

use tracing::instrument;

use crate::domain::error::TreeResult;
use crate::domain::path::HierPath;
use crate::domain::tree::{build_tree, node_count, Node};

/// A node restated with its position: parent path, name, element and leaf flag.
#[derive(Debug)]
pub struct Entry<'a, E: ?Sized> {
    /// Slash-joined path of the parent, empty at the top level
    pub parent: String,
    /// Name of this entry (without the parent path)
    pub name: String,
    /// Element at this position, `None` for a stub
    pub element: Option<&'a E>,
    /// True if the node has no children
    pub leaf: bool,
}

impl<E: ?Sized> Clone for Entry<'_, E> {
    fn clone(&self) -> Self {
        Self {
            parent: self.parent.clone(),
            name: self.name.clone(),
            element: self.element,
            leaf: self.leaf,
        }
    }
}

impl<E: ?Sized> Entry<'_, E> {
    /// Full slash-joined path of this entry.
    pub fn full_path(&self) -> String {
        join_parent(&self.parent, &self.name)
    }

    pub fn is_stub(&self) -> bool {
        self.element.is_none()
    }
}

/// Debug rendering: `[parent/]name`, then `*` if an element is present, or
/// `>` for a stub that only groups children.
///
/// An entry with an element and children renders `*` alone, never `*>`.
impl<E: ?Sized> fmt::Display for Entry<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.parent.is_empty() {
            write!(f, "[{}/]", self.parent)?;
        }
        write!(f, "{}", self.name)?;
        match (self.element.is_some(), self.leaf) {
            (true, _) => write!(f, "*"),
            (false, false) => write!(f, ">"),
            (false, true) => Ok(()),
        }
    }
}

fn join_parent(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}/{name}")
    }
}

/// Walks `forest` depth-first in pre-order, emitting one entry per node.
///
/// Never fails on a forest produced by [`build_tree`]; the `Result` lets it
/// chain with construction errors.
#[instrument(level = "debug", skip_all, fields(roots = forest.len()))]
pub fn flatten<'a, E: ?Sized>(forest: &[Node<'a, E>]) -> TreeResult<Vec<Entry<'a, E>>> {
    let mut entries = Vec::with_capacity(node_count(forest));
    let mut stack: Vec<(&Node<'a, E>, String)> =
        forest.iter().rev().map(|n| (n, String::new())).collect();

    while let Some((node, parent)) = stack.pop() {
        let path = join_parent(&parent, &node.name);
        for child in node.children.iter().rev() {
            stack.push((child, path.clone()));
        }
        entries.push(Entry {
            parent,
            name: node.name.clone(),
            element: node.element,
            leaf: node.is_leaf(),
        });
    }

    Ok(entries)
}

/// Arranges `elements` into a flat, hierarchically ordered entry list.
pub fn list<E: HierPath>(elements: &[E]) -> TreeResult<Vec<Entry<'_, E>>> {
    let forest = build_tree(elements)?;
    flatten(&forest)
}

/// Renders every entry in the `Display` format of [`Entry`].
pub fn inspect<E: ?Sized>(entries: &[Entry<'_, E>]) -> Vec<String> {
    entries.iter().map(ToString::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_nested_forest_when_flattening_then_emits_parent_before_children() {
        let elems = vec![vec!["foo", "bar", "baz"], vec!["foo", "qux"], vec!["zed"]];
        let forest = build_tree(&elems).unwrap();
        let entries = flatten(&forest).unwrap();

        let paths: Vec<String> = entries.iter().map(Entry::full_path).collect();
        assert_eq!(
            paths,
            vec!["foo", "foo/bar", "foo/bar/baz", "foo/qux", "zed"]
        );
        assert_eq!(entries[2].parent, "foo/bar");
        assert!(entries[2].leaf);
        assert!(!entries[1].leaf);
    }

    #[test]
    fn given_stub_entry_when_displaying_then_marks_children_only() {
        let entry: Entry<'_, Vec<String>> = Entry {
            parent: String::new(),
            name: "foo".to_string(),
            element: None,
            leaf: false,
        };
        assert_eq!(entry.to_string(), "foo>");
        assert!(entry.is_stub());
    }

    #[test]
    fn given_element_with_children_when_displaying_then_element_marker_only() {
        let elem = vec!["a".to_string(), "b".to_string()];
        let entry = Entry {
            parent: "a".to_string(),
            name: "b".to_string(),
            element: Some(&elem),
            leaf: false,
        };
        assert_eq!(entry.to_string(), "[a/]b*");
    }

    #[test]
    fn given_empty_forest_when_flattening_then_no_entries() {
        let forest: Vec<Node<'_, Vec<String>>> = Vec::new();
        assert!(flatten(&forest).unwrap().is_empty());
    }
}
