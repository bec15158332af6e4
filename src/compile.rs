use std::collections::HashMap;

use regex::RegexBuilder;

use crate::{error::Error, options::Options};

/// Escapes all characters in `text` that carry meaning in a pattern.
///
/// The string returned may be safely embedded as a literal in a larger
/// pattern.
///
/// ```
/// use dotnet_regex::escape;
///
/// assert_eq!(escape("a.b"), r"a\.b");
/// assert_eq!(escape("1+1=2"), r"1\+1=2");
/// ```
pub fn escape(text: &str) -> String {
    let mut buf = String::with_capacity(text.len());
    for ch in text.chars() {
        if is_meta_character(ch) {
            buf.push('\\');
        }
        buf.push(ch);
    }
    buf
}

/// Returns true for the fixed set of characters that `escape` prefixes
/// with a backslash.
///
/// The set intentionally includes `/`, which has no meaning to the engine
/// here but is a delimiter in several other regex dialects, and omits
/// characters like `#` that only matter in engine modes this crate never
/// enables.
fn is_meta_character(ch: char) -> bool {
    match ch {
        '-' | '[' | ']' | '/' | '{' | '}' | '(' | ')' | '*' | '+' | '?'
        | '.' | '\\' | '^' | '$' | '|' => true,
        _ => false,
    }
}

/// The ordinal-to-name table extracted from a pattern.
///
/// Ordinal 0 is the whole match and never has a name. The k-th named group
/// in the pattern, counting from 1 in order of appearance, is recorded at
/// ordinal k. When a name is declared more than once, lookups by name
/// resolve to the last declaration, while the per-ordinal table keeps every
/// declaration.
#[derive(Debug, Default, Eq, PartialEq)]
pub(crate) struct CaptureNames {
    ords: Vec<Box<str>>,
    index: HashMap<Box<str>, usize>,
}

impl CaptureNames {
    /// Records the next named group in order of appearance and returns its
    /// ordinal.
    fn push(&mut self, name: &str) -> usize {
        let ord = self.ords.len() + 1;
        self.ords.push(Box::from(name));
        self.index.insert(Box::from(name), ord);
        ord
    }

    /// Returns the ordinal that `name` resolves to, if the pattern declared
    /// it.
    pub(crate) fn to_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Returns the name declared at `ord`, if any. Ordinals count from 1.
    pub(crate) fn get(&self, ord: usize) -> Option<&str> {
        match ord.checked_sub(1) {
            None => None,
            Some(k) => self.ords.get(k).map(|name| &**name),
        }
    }

    /// Returns the number of named groups, counting duplicates.
    pub(crate) fn len(&self) -> usize {
        self.ords.len()
    }
}

/// Rewrites `pattern` and compiles it into an engine matcher, returning the
/// matcher together with the extracted name table.
///
/// This is the construction-time half of the crate: the searching half in
/// `string.rs` only ever sees the finished matcher and table.
pub(crate) fn compile(
    pattern: &str,
    opts: Options,
) -> Result<(regex::Regex, CaptureNames), Error> {
    if pattern.is_empty() {
        return Err(Error::EmptyPattern);
    }
    let (mut rewritten, names) = strip_group_names(pattern);
    if opts.ignore_whitespace {
        rewritten = relax_whitespace(&rewritten);
    }
    if opts.sticky {
        // Searches always run against the slice that starts at the cursor,
        // so anchoring at the slice start is exactly "must match at the
        // search position".
        rewritten = format!(r"\A(?:{})", rewritten);
    }
    debug!(
        "compiling {:?} (rewritten from {:?}, {} named group(s))",
        rewritten,
        pattern,
        names.len(),
    );
    let re = RegexBuilder::new(&rewritten)
        .case_insensitive(opts.ignore_case)
        .multi_line(opts.multi_line)
        .unicode(opts.unicode)
        .build()?;
    Ok((re, names))
}

fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

/// Extracts `(?<name>` group openers from `pattern`, reverting each one to
/// a plain `(` and recording the name in a `CaptureNames` table.
///
/// Look-behind assertions (`(?<=`, `(?<!`) are left untouched, as is any
/// `(?<` that is not followed by a word-character name and a closing `>`;
/// whatever the engine thinks of those is its business. Named ordinals are
/// assigned sequentially over named groups only, so a pattern mixing named
/// and unnamed groups resolves names positionally among the named ones.
fn strip_group_names(pattern: &str) -> (String, CaptureNames) {
    let mut names = CaptureNames::default();
    let mut out = String::with_capacity(pattern.len());
    let mut rest = pattern;
    while let Some(at) = rest.find("(?<") {
        out.push_str(&rest[..at]);
        let candidate = &rest[at + 3..];
        let name_end = candidate
            .find(|ch: char| !is_word_char(ch))
            .unwrap_or(candidate.len());
        if name_end > 0 && candidate[name_end..].starts_with('>') {
            names.push(&candidate[..name_end]);
            out.push('(');
            rest = &candidate[name_end + 1..];
        } else {
            out.push_str("(?<");
            rest = candidate;
        }
    }
    out.push_str(rest);
    (out, names)
}

/// Replaces every run of whitespace in `pattern` with `\s*`, implementing
/// the whitespace-insensitive option entirely before the engine sees the
/// pattern.
fn relax_whitespace(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut in_whitespace = false;
    for ch in pattern.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                out.push_str(r"\s*");
                in_whitespace = true;
            }
        } else {
            out.push(ch);
            in_whitespace = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip(pattern: &str) -> (String, Vec<String>) {
        let (out, names) = strip_group_names(pattern);
        let listed =
            (1..=names.len()).map(|i| names.get(i).unwrap().to_string());
        (out, listed.collect())
    }

    #[test]
    fn strips_a_single_named_group() {
        let (out, names) = strip("(?<first>[A-E]+)");
        assert_eq!(out, "([A-E]+)");
        assert_eq!(names, vec!["first"]);
    }

    #[test]
    fn strips_multiple_named_groups_in_order() {
        let (out, names) = strip(r"(?<year>\d{4})-(?<month>\d{2})");
        assert_eq!(out, r"(\d{4})-(\d{2})");
        assert_eq!(names, vec!["year", "month"]);
    }

    #[test]
    fn unnamed_groups_are_untouched() {
        let (out, names) = strip(r"(\w+)@(?<host>\w+)");
        assert_eq!(out, r"(\w+)@(\w+)");
        // Sequential numbering over named occurrences only: `host` resolves
        // to ordinal 1 even though the engine numbers it 2.
        assert_eq!(names, vec!["host"]);
    }

    #[test]
    fn lookbehind_syntax_is_not_a_name() {
        let (out, names) = strip(r"(?<=a)b(?<!c)d");
        assert_eq!(out, r"(?<=a)b(?<!c)d");
        assert!(names.is_empty());
    }

    #[test]
    fn unterminated_name_passes_through() {
        let (out, names) = strip("(?<broken");
        assert_eq!(out, "(?<broken");
        assert!(names.is_empty());
        let (out, names) = strip("(?<>x)");
        assert_eq!(out, "(?<>x)");
        assert!(names.is_empty());
    }

    #[test]
    fn duplicate_names_resolve_to_the_last_declaration() {
        let (_, names) = strip_group_names("(?<x>a)(?<x>b)");
        assert_eq!(names.len(), 2);
        assert_eq!(names.get(1), Some("x"));
        assert_eq!(names.get(2), Some("x"));
        assert_eq!(names.to_index("x"), Some(2));
    }

    #[test]
    fn whitespace_runs_become_optional() {
        assert_eq!(relax_whitespace("A\tB C D  E"), r"A\s*B\s*C\s*D\s*E");
        assert_eq!(relax_whitespace("nospace"), "nospace");
        assert_eq!(relax_whitespace(" "), r"\s*");
    }

    #[test]
    fn empty_pattern_is_rejected() {
        assert!(matches!(
            compile("", Options::new()),
            Err(Error::EmptyPattern)
        ));
    }

    #[test]
    fn engine_rejections_propagate() {
        assert!(matches!(
            compile("(unbalanced", Options::new()),
            Err(Error::Syntax(_))
        ));
    }

    #[test]
    fn escape_uses_the_fixed_meta_set() {
        assert_eq!(escape("hello"), "hello");
        assert_eq!(
            escape("-[]/{}()*+?.\\^$|"),
            r"\-\[\]\/\{\}\(\)\*\+\?\.\\\^\$\|",
        );
        // `#` and `&` are not in the set.
        assert_eq!(escape("a#b&c"), "a#b&c");
    }
}
