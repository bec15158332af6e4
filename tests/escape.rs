use dotnet_regex::{escape, Error, Regex};
use quickcheck::{quickcheck, TestResult};

#[test]
fn plain_text_is_untouched() {
    assert_eq!(escape("hello"), "hello");
    assert_eq!(escape(""), "");
    assert_eq!(escape("snowman ☃"), "snowman ☃");
}

#[test]
fn every_special_character_is_escaped() {
    assert_eq!(escape("hello.world"), r"hello\.world");
    assert_eq!(escape("test[123]"), r"test\[123\]");
    assert_eq!(escape("path/to/file"), r"path\/to\/file");
    assert_eq!(escape("braces{1,2}"), r"braces\{1,2\}");
    assert_eq!(escape("parentheses(group)"), r"parentheses\(group\)");
    assert_eq!(escape("asterisk*plus+"), r"asterisk\*plus\+");
    assert_eq!(escape("question?"), r"question\?");
    assert_eq!(escape("backslash\\n"), r"backslash\\n");
    assert_eq!(escape("caret^dollar$"), r"caret\^dollar\$");
    assert_eq!(escape("pipe|or"), r"pipe\|or");
    assert_eq!(
        escape("-[]/{}()*+?.\\^$|"),
        r"\-\[\]\/\{\}\(\)\*\+\?\.\\\^\$\|"
    );
}

#[test]
fn escaped_text_matches_itself_literally() {
    let text = "special.chars[here]";
    let re = Regex::new(&escape(text)).unwrap();
    assert!(re.is_match(text));
    assert!(re.is_match("prefix special.chars[here] suffix"));
    // Without escaping, `.` and `[...]` would have made this match too.
    assert!(!re.is_match("special-chars-h"));
}

#[test]
fn escaping_the_empty_string_still_rejects_compilation() {
    assert!(matches!(Regex::new(&escape("")), Err(Error::EmptyPattern)));
}

quickcheck! {
    fn escaped_literal_round_trips(s: String) -> TestResult {
        if s.is_empty() {
            return TestResult::discard();
        }
        let re = match Regex::new(&escape(&s)) {
            Ok(re) => re,
            Err(err) => {
                return TestResult::error(format!(
                    "escaped pattern failed to compile: {}",
                    err
                ))
            }
        };
        let embedded = format!("abc{}xyz", s);
        TestResult::from_bool(re.is_match(&s) && re.is_match(&embedded))
    }
}
