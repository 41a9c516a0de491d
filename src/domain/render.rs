//! Conversions of a built forest into displayable forms.

use termtree::Tree;
use tracing::instrument;

use crate::domain::path::join_path;
use crate::domain::tree::Node;

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl<E: ?Sized> TreeNodeConvert for Node<'_, E> {
    fn to_tree_string(&self) -> Tree<String> {
        let label = if self.element.is_some() {
            format!("{}*", self.name)
        } else {
            self.name.clone()
        };
        let leaves: Vec<_> = self.children.iter().map(|c| c.to_tree_string()).collect();
        Tree::new(label).with_leaves(leaves)
    }
}

/// Hangs every root of `forest` below a synthetic `label` node.
#[instrument(level = "debug", skip(forest))]
pub fn forest_to_tree<E: ?Sized>(forest: &[Node<'_, E>], label: &str) -> Tree<String> {
    Tree::new(label.to_string()).with_leaves(forest.iter().map(|n| n.to_tree_string()))
}

/// Full paths of all leaf nodes in pre-order, joined with `delimiter`.
pub fn leaf_paths<E: ?Sized>(forest: &[Node<'_, E>], delimiter: &str) -> Vec<String> {
    fn walk<E: ?Sized>(
        nodes: &[Node<'_, E>],
        prefix: &mut Vec<String>,
        delimiter: &str,
        out: &mut Vec<String>,
    ) {
        for node in nodes {
            prefix.push(node.name.clone());
            if node.is_leaf() {
                out.push(join_path(prefix.as_slice(), delimiter));
            } else {
                walk(&node.children, prefix, delimiter, out);
            }
            prefix.pop();
        }
    }

    let mut out = Vec::new();
    walk(forest, &mut Vec::new(), delimiter, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::tree::build_tree;

    #[test]
    fn given_forest_when_converting_then_renders_markers_and_nesting() {
        let elems = vec![vec!["foo", "bar"], vec!["foo", "baz"], vec!["qux"]];
        let forest = build_tree(&elems).unwrap();
        let rendered = forest_to_tree(&forest, ".").to_string();

        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], ".");
        assert!(lines[1].ends_with("foo"));
        assert!(lines[2].ends_with("bar*"));
        assert!(lines[3].ends_with("baz*"));
        assert!(lines[4].ends_with("qux*"));
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn given_custom_delimiter_when_listing_leaves_then_joins_with_it() {
        let elems = vec![vec!["a", "b", "c"], vec!["a", "d"], vec!["a"]];
        let forest = build_tree(&elems).unwrap();
        assert_eq!(leaf_paths(&forest, "::"), vec!["a::b::c", "a::d"]);
    }
}
