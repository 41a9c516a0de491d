//! Tests for building and flattening hierarchies from slash-delimited paths

use rstest::rstest;

use hiertree::domain::{inspect, list, DelimitedPath, DomainError};
use hiertree::util::testing;

fn elems(paths: &[&str]) -> Vec<DelimitedPath> {
    paths.iter().map(|p| DelimitedPath::slash(*p)).collect()
}

// ============================================================
// Successful arrangements
// ============================================================

#[rstest]
#[case::empty(&[], &[])]
#[case::siblings(&["bar", "foo"], &["bar*", "foo*"])]
#[case::element_with_child(&["foo", "foo/bar"], &["foo*", "[foo/]bar*"])]
#[case::stub_with_children(&["foo/bar", "foo/baz"], &["foo>", "[foo/]bar*", "[foo/]baz*"])]
#[case::element_with_children(
    &["foo", "foo/bar", "foo/baz"],
    &["foo*", "[foo/]bar*", "[foo/]baz*"]
)]
#[case::stub_chain(&["foo/bar/baz"], &["foo>", "[foo/]bar>", "[foo/bar/]baz*"])]
#[case::element_below_stub(
    &["foo/bar", "foo/bar/baz"],
    &["foo>", "[foo/]bar*", "[foo/bar/]baz*"]
)]
#[case::siblings_below_stubs(
    &["foo/bar/baz", "foo/bar/qux"],
    &["foo>", "[foo/]bar>", "[foo/bar/]baz*", "[foo/bar/]qux*"]
)]
#[case::parallel_stub_chains(
    &["foo/bar/baz/bud", "foo/bar/qux/qup"],
    &[
        "foo>",
        "[foo/]bar>",
        "[foo/bar/]baz>",
        "[foo/bar/baz/]bud*",
        "[foo/bar/]qux>",
        "[foo/bar/qux/]qup*",
    ]
)]
#[case::deep_path_listed_first(
    &["foo/bar/baz/qux", "foo/bar"],
    &["foo>", "[foo/]bar*", "[foo/bar/]baz>", "[foo/bar/baz/]qux*"]
)]
#[case::unsorted_roots(
    &["foo/bar", "baz/qux"],
    &["baz>", "[baz/]qux*", "foo>", "[foo/]bar*"]
)]
#[case::interleaved_roots(
    &["foo/bar", "baz/qux", "foo/baz"],
    &["baz>", "[baz/]qux*", "foo>", "[foo/]bar*", "[foo/]baz*"]
)]
#[case::sibling_after_stub_chain(
    &["a/b/c", "d"],
    &["a>", "[a/]b>", "[a/b/]c*", "d*"]
)]
#[case::dash_sorts_before_slash(
    &["foo-bar", "foo/bar", "foo"],
    &["foo*", "[foo/]bar*", "foo-bar*"]
)]
fn given_paths_when_listing_then_renders_expected_entries(
    #[case] input: &[&str],
    #[case] expected: &[&str],
) {
    testing::init_test_setup();
    let elems = elems(input);

    let entries = list(&elems).expect("list should succeed");

    assert_eq!(inspect(&entries), expected);
}

// ============================================================
// Errors
// ============================================================

#[rstest]
#[case::separator_only(&["/"])]
#[case::empty(&[""])]
#[case::two_empty(&["", ""])]
#[case::trailing_separators(&["bar//"])]
#[case::trailing_separator_next_to_element(&["bar/", "bar"])]
#[case::empty_inner_component(&["foo//bar"])]
fn given_malformed_path_when_listing_then_invalid_path(#[case] input: &[&str]) {
    let elems = elems(input);

    let err = list(&elems).unwrap_err();

    assert!(
        matches!(err, DomainError::InvalidPath { .. }),
        "expected invalid path, got {err:?}"
    );
    assert!(err.to_string().contains("invalid"));
}

#[rstest]
#[case::top_level(&["bar", "bar"], "bar")]
#[case::nested(&["foo/bar", "foo", "foo/bar"], "foo/bar")]
#[case::below_stub(&["a/b/c", "a/b/c", "a/d"], "a/b/c")]
fn given_repeated_path_when_listing_then_duplicate_path(
    #[case] input: &[&str],
    #[case] path: &str,
) {
    let elems = elems(input);

    let err = list(&elems).unwrap_err();

    assert_eq!(
        err,
        DomainError::DuplicatePath {
            path: path.to_string()
        }
    );
    assert!(err.to_string().contains("duplicate"));
    assert!(err.to_string().contains(path));
}

#[test]
fn given_duplicate_after_valid_paths_when_listing_then_no_partial_result() {
    let elems = elems(&["ok/one", "ok/two", "bar", "bar"]);

    let result = list(&elems);

    assert!(result.is_err());
}

// ============================================================
// Element references
// ============================================================

#[test]
fn given_entries_when_listing_then_elements_reference_inputs() {
    let elems = elems(&["foo/bar", "foo"]);

    let entries = list(&elems).unwrap();

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].element.map(DelimitedPath::raw), Some("foo"));
    assert_eq!(entries[1].element.map(DelimitedPath::raw), Some("foo/bar"));
    assert!(std::ptr::eq(entries[1].element.unwrap(), &elems[0]));
}

#[test]
fn given_custom_delimiter_when_listing_then_parent_is_slash_joined() {
    let elems = vec![
        DelimitedPath::new("pkg::mod::item", "::"),
        DelimitedPath::new("pkg::mod", "::"),
    ];

    let entries = list(&elems).unwrap();

    assert_eq!(inspect(&entries), vec!["pkg>", "[pkg/]mod*", "[pkg/mod/]item*"]);
}
