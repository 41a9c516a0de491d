//! Tree construction from flat path-bearing elements.
//!
//! The builder sorts all elements once with [`compare_paths`], which places
//! every group of paths sharing a prefix in one contiguous window. Each level
//! of the tree is then produced by a single left-to-right sweep over such a
//! window, recursing into the sub-window of each child and skipping the
//! elements the recursion consumed.

use tracing::{debug, instrument, trace};

use crate::domain::error::{DomainError, TreeResult};
use crate::domain::ordering::{compare_paths, has_prefix};
use crate::domain::path::{validate_path, HierPath};

/// One position in the tree.
///
/// `element` is `None` for a stub: a grouping node that only exists because
/// deeper elements live below it.
#[derive(Debug)]
pub struct Node<'a, E: ?Sized> {
    pub name: String,
    pub element: Option<&'a E>,
    pub children: Vec<Node<'a, E>>,
}

// Cloning copies the element reference, so `E: Clone` is not required.
impl<E: ?Sized> Clone for Node<'_, E> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            element: self.element,
            children: self.children.clone(),
        }
    }
}

impl<'a, E: ?Sized> Node<'a, E> {
    fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            element: None,
            children: Vec::new(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn is_stub(&self) -> bool {
        self.element.is_none()
    }

    /// Number of nodes below this one.
    pub fn descendant_count(&self) -> usize {
        self.children
            .iter()
            .map(|c| 1 + c.descendant_count())
            .sum()
    }

    /// Levels in the subtree rooted here, counting this node.
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(Node::depth).max().unwrap_or(0)
    }
}

/// Total number of nodes in a forest.
pub fn node_count<E: ?Sized>(forest: &[Node<'_, E>]) -> usize {
    forest.iter().map(|n| 1 + n.descendant_count()).sum()
}

/// Element paired with its components, extracted once before sorting.
struct Keyed<'a, E: ?Sized> {
    path: Vec<String>,
    element: &'a E,
}

/// Arranges `elements` into a forest based on their hierarchical paths.
///
/// The input order does not matter; the result is deterministic. Fails with
/// [`DomainError::InvalidPath`] for empty paths or empty components and with
/// [`DomainError::DuplicatePath`] when two elements share a full path.
///
/// Recursion depth equals the longest path's component count, so extremely
/// deep paths are bounded by the thread's stack size.
pub fn build_tree<E: HierPath>(elements: &[E]) -> TreeResult<Vec<Node<'_, E>>> {
    let refs: Vec<&E> = elements.iter().collect();
    build_tree_refs(&refs)
}

/// Same as [`build_tree`] for callers holding references to their elements.
#[instrument(level = "debug", skip_all, fields(elements = elements.len()))]
pub fn build_tree_refs<'a, E: HierPath + ?Sized>(elements: &[&'a E]) -> TreeResult<Vec<Node<'a, E>>> {
    let mut keyed: Vec<Keyed<'a, E>> = elements
        .iter()
        .map(|&element| Keyed {
            path: element.hier_path(),
            element,
        })
        .collect();
    // Only the outermost call sorts; partition() expects a sorted window.
    keyed.sort_by(|a, b| compare_paths(&a.path, &b.path));

    let (roots, consumed) = partition(&keyed, &[])?;
    debug!(roots = roots.len(), consumed, "built forest");
    Ok(roots)
}

/// Builds one level below `prefix` from the sorted window `sorted`.
///
/// Returns the nodes of this level and the number of input elements that
/// belong to them. Scanning stops at the first element outside `prefix`.
fn partition<'a, E: ?Sized>(
    sorted: &[Keyed<'a, E>],
    prefix: &[String],
) -> TreeResult<(Vec<Node<'a, E>>, usize)> {
    let mut nodes = Vec::new();
    let mut current: Option<Node<'a, E>> = None;
    let mut i = 0;

    while i < sorted.len() {
        let keyed = &sorted[i];
        let path = keyed.path.as_slice();
        validate_path(path)?;

        if !has_prefix(path, prefix) {
            break;
        }
        let relpath = &path[prefix.len()..];
        let Some((root, rest)) = relpath.split_first() else {
            return Err(DomainError::invalid(path));
        };

        let same_node = current.as_ref().is_some_and(|n| n.name == *root);
        if same_node && rest.is_empty() {
            return Err(DomainError::duplicate(path));
        }
        if !same_node {
            nodes.extend(current.replace(Node::named(root)));
        }
        let node = current.get_or_insert_with(|| Node::named(root));

        if rest.is_empty() {
            trace!(path = ?path, "attach element");
            node.element = Some(keyed.element);
            i += 1;
            continue;
        }

        let mut child_prefix = prefix.to_vec();
        child_prefix.push(root.clone());
        let (children, consumed) = partition(&sorted[i..], &child_prefix)?;
        node.children.extend(children);
        // The element at index i always has child_prefix, so consumed >= 1.
        i += consumed.max(1);
    }

    nodes.extend(current);
    Ok((nodes, i))
}
