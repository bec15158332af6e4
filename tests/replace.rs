use std::borrow::Cow;

use dotnet_regex::{Flag, Match, Options, Regex};

const ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

fn first_re() -> Regex {
    Regex::with_options("(?<first>[A-E]+)", Flag::IgnoreCase).unwrap()
}

#[test]
fn fixed_string_replaces_every_occurrence() {
    let re = first_re();
    assert_eq!(
        re.replace(ALPHABET, "XXX"),
        "XXXFGHIJKLMNOPQRSTUVWXYZXXXfghijklmnopqrstuvwxyz"
    );
}

#[test]
fn static_form_agrees_with_the_instance_form() {
    let out =
        dotnet_regex::replace(ALPHABET, "([A-E]+)", "XXX", Flag::IgnoreCase)
            .unwrap();
    assert_eq!(out, "XXXFGHIJKLMNOPQRSTUVWXYZXXXfghijklmnopqrstuvwxyz");
}

#[test]
fn empty_string_replacement_deletes_matches() {
    let re = first_re();
    assert_eq!(
        re.replace(ALPHABET, ""),
        "FGHIJKLMNOPQRSTUVWXYZfghijklmnopqrstuvwxyz"
    );
}

#[test]
fn absent_replacement_leaves_the_subject_unchanged() {
    let re = first_re();
    let out = re.replace(ALPHABET, None::<&str>);
    assert_eq!(out, ALPHABET);
    assert!(matches!(out, Cow::Borrowed(_)));
}

#[test]
fn evaluator_runs_once_per_occurrence() {
    let re = first_re();
    assert_eq!(
        re.replace(ALPHABET, |_: &Match, _: usize| "*"),
        "*FGHIJKLMNOPQRSTUVWXYZ*fghijklmnopqrstuvwxyz"
    );
    assert_eq!(
        re.replace(ALPHABET, |m: &Match, _: usize| format!("{}*", m.value())),
        "ABCDE*FGHIJKLMNOPQRSTUVWXYZabcde*fghijklmnopqrstuvwxyz"
    );
}

#[test]
fn evaluator_sees_the_zero_based_occurrence_index() {
    let re = first_re();
    assert_eq!(
        re.replace(ALPHABET, |_: &Match, i: usize| i),
        "0FGHIJKLMNOPQRSTUVWXYZ1fghijklmnopqrstuvwxyz"
    );
}

#[test]
fn numeric_and_boolean_primitives_are_replacements() {
    let re = Regex::new("[0-9]+").unwrap();
    assert_eq!(re.replace("a1b22", 7), "a7b7");
    assert_eq!(re.replace("a1b22", true), "atruebtrue");
    assert_eq!(re.replace("a1b22", '#'), "a#b#");
}

#[test]
fn replacen_respects_the_limit() {
    let re = first_re();
    assert_eq!(
        re.replacen(ALPHABET, 1, "XXX"),
        "XXXFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz"
    );
    assert_eq!(re.replacen(ALPHABET, 2, "XXX"), re.replace(ALPHABET, "XXX"));
}

#[test]
fn zero_limit_is_a_no_op() {
    let re = first_re();
    let out = re.replacen(ALPHABET, 0, "XXX");
    assert_eq!(out, ALPHABET);
    assert!(matches!(out, Cow::Borrowed(_)));
}

#[test]
fn empty_subject_is_a_no_op() {
    let re = first_re();
    let out = re.replace("", "XXX");
    assert_eq!(out, "");
    assert!(matches!(out, Cow::Borrowed(_)));
}

#[test]
fn no_match_borrows_the_subject() {
    let re = first_re();
    let out = re.replace("ZYXWV", "XXX");
    assert_eq!(out, "ZYXWV");
    assert!(matches!(out, Cow::Borrowed(_)));
}

#[test]
fn a_successful_replacement_owns_its_result() {
    let re = first_re();
    assert!(matches!(re.replace(ALPHABET, "XXX"), Cow::Owned(_)));
}

#[test]
fn zero_length_matches_do_not_stall_replacement() {
    let re = Regex::new("x*").unwrap();
    assert_eq!(re.replace("abc", "-"), "-a-b-c");
}

#[test]
fn unmatched_slices_are_preserved_verbatim() {
    let re = Regex::with_options("[0-9]+", Options::new()).unwrap();
    assert_eq!(re.replace("a1b22c333d", "#"), "a#b#c#d");
}

#[test]
fn evaluator_can_read_named_groups() {
    let re = Regex::new(r"(?<word>[a-z]+)").unwrap();
    let out = re.replace("one two", |m: &Match, _: usize| {
        m.name("word").map(|g| g.value().to_uppercase()).unwrap_or_default()
    });
    assert_eq!(out, "ONE TWO");
}
