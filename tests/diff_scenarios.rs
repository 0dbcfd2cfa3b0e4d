use crate::common::chars;
use pretty_assertions::assert_eq;
use rstest::rstest;
use sesdiff::artifacts::diff::{Edit, EditScript, MyersDiff, Operation, clean, compute};

mod common;

fn script(edits: &[(Operation, &str)]) -> EditScript<char> {
    edits
        .iter()
        .map(|(operation, segment)| Edit::new(*operation, chars(segment)))
        .collect()
}

#[rstest]
#[case::insertion_inside("ab", "aXb", &[(Operation::Equal, "a"), (Operation::Insert, "X"), (Operation::Equal, "b")])]
#[case::empty_old("", "abc", &[(Operation::Insert, "abc")])]
#[case::empty_new("abc", "", &[(Operation::Remove, "abc")])]
#[case::identical("same", "same", &[(Operation::Equal, "same")])]
#[case::containment("a123bc", "123", &[(Operation::Remove, "a"), (Operation::Equal, "123"), (Operation::Remove, "bc")])]
#[case::single_element("a", "b", &[(Operation::Remove, "a"), (Operation::Insert, "b")])]
fn compute_scenarios(#[case] old: &str, #[case] new: &str, #[case] expected: &[(Operation, &str)]) {
    assert_eq!(compute(&chars(old), &chars(new)), script(expected));
}

#[test]
fn changed_word_keeps_shared_prefix_and_suffix() {
    let old = chars("This is first string");
    let new = chars("This is second string");

    let minimal = compute(&old, &new);
    let semantic = MyersDiff::new(&old, &new).diff_semantic();

    assert_eq!(minimal.first(), Some(&Edit::equal(chars("This is "))));
    assert_eq!(minimal.last(), Some(&Edit::equal(chars(" string"))));
    assert_eq!(
        semantic,
        script(&[
            (Operation::Equal, "This is "),
            (Operation::Remove, "first"),
            (Operation::Insert, "second"),
            (Operation::Equal, " string"),
        ])
    );
}

#[test]
fn semantic_cleanup_keeps_the_longest_equality() {
    let result = clean(compute(&chars("mississippi"), &chars("mississipi")));

    assert_eq!(
        result,
        script(&[
            (Operation::Equal, "mississip"),
            (Operation::Remove, "p"),
            (Operation::Equal, "i"),
        ])
    );
}

#[test]
fn semantic_cleanup_moves_edit_to_word_boundary() {
    let old = chars("The cat came.");
    let new = chars("The cat cat came.");

    let minimal = compute(&old, &new);
    let semantic = clean(minimal.clone());

    assert_eq!(semantic.len(), 3);
    assert_eq!(semantic[1].operation, Operation::Insert);
    assert_eq!(semantic[1].segment.len(), 4);
    assert_eq!(semantic[0].segment.last(), Some(&' '));
    assert_eq!(semantic[1].segment.last(), Some(&' '));
}
