use std::{borrow::Cow, fmt, str::FromStr, sync::Arc};

use crate::{
    captures::{Group, Match},
    compile::{self, CaptureNames},
    error::Error,
    options::Options,
    replacer::Replacer,
};

/// A compiled pattern with .NET-flavored search, iteration and replacement.
///
/// Construction rewrites `(?<name>...)` groups into the engine's plain
/// positional syntax and keeps the name table on the side; everything else
/// is delegated to a [`regex::Regex`] compiled once and reused for the
/// lifetime of this value. A `Regex` is immutable after construction and
/// freely shareable across threads.
///
/// # Example
///
/// ```
/// use dotnet_regex::Regex;
///
/// let re = Regex::new(r"(?<area>[0-9]{3})-(?<line>[0-9]{4})")?;
/// let m = re.find("call 555-0100 today");
/// assert_eq!(m.value(), "555-0100");
/// assert_eq!(m.index(), Some(5));
/// assert_eq!(&m["area"], "555");
/// # Ok::<(), dotnet_regex::Error>(())
/// ```
#[derive(Clone)]
pub struct Regex {
    re: regex::Regex,
    names: Arc<CaptureNames>,
    pattern: Box<str>,
    options: Options,
}

impl fmt::Display for Regex {
    /// Shows the original pattern, before any rewriting.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Debug for Regex {
    /// Shows the original pattern, before any rewriting.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Regex").field(&self.as_str()).finish()
    }
}

impl FromStr for Regex {
    type Err = Error;

    /// Attempts to compile a pattern with default options.
    fn from_str(pattern: &str) -> Result<Regex, Error> {
        Regex::new(pattern)
    }
}

impl TryFrom<&str> for Regex {
    type Error = Error;

    /// Attempts to compile a pattern with default options.
    fn try_from(pattern: &str) -> Result<Regex, Error> {
        Regex::new(pattern)
    }
}

impl TryFrom<String> for Regex {
    type Error = Error;

    /// Attempts to compile a pattern with default options.
    fn try_from(pattern: String) -> Result<Regex, Error> {
        Regex::new(&pattern)
    }
}

impl Regex {
    /// Compiles a pattern with default options.
    ///
    /// # Errors
    ///
    /// Returns an error when the pattern is empty or when the engine
    /// rejects it.
    ///
    /// ```
    /// use dotnet_regex::{Error, Regex};
    ///
    /// assert!(Regex::new("[0-9]+").is_ok());
    /// assert!(matches!(Regex::new(""), Err(Error::EmptyPattern)));
    /// assert!(matches!(Regex::new("(oops"), Err(Error::Syntax(_))));
    /// ```
    pub fn new(pattern: &str) -> Result<Regex, Error> {
        Regex::with_options(pattern, Options::new())
    }

    /// Compiles a pattern with the given options. This is the canonical
    /// constructor: `options` may be an [`Options`] value, a single
    /// [`Flag`](crate::Flag), or an array or slice of flags.
    ///
    /// ```
    /// use dotnet_regex::{Flag, Regex};
    ///
    /// let re = Regex::with_options("abc", [Flag::IgnoreCase, Flag::Sticky])?;
    /// assert!(re.is_match("xABCx") == false && re.is_match("ABCx"));
    /// # Ok::<(), dotnet_regex::Error>(())
    /// ```
    pub fn with_options<O: Into<Options>>(
        pattern: &str,
        options: O,
    ) -> Result<Regex, Error> {
        let options = options.into();
        let (re, names) = compile::compile(pattern, options)?;
        Ok(Regex {
            re,
            names: Arc::new(names),
            pattern: Box::from(pattern),
            options,
        })
    }

    /// Compiles a pattern with options given as a flag string, e.g. `"im"`.
    /// A thin adapter over [`Regex::with_options`]; see
    /// [`Options`](crate::Options#impl-FromStr-for-Options) for the
    /// accepted characters.
    pub fn with_flags(pattern: &str, flags: &str) -> Result<Regex, Error> {
        Regex::with_options(pattern, flags.parse::<Options>()?)
    }

    /// Recompiles an already-constructed `Regex` under additional options.
    ///
    /// The source's pattern string is reused, and its `IgnoreCase` and
    /// `MultiLine` settings are carried over into the new options.
    ///
    /// ```
    /// use dotnet_regex::{Flag, Regex};
    ///
    /// let ci = Regex::with_options("[a-e]+", Flag::IgnoreCase)?;
    /// let sticky = Regex::from_pattern(&ci, Flag::Sticky)?;
    /// assert!(sticky.options().get_ignore_case());
    /// assert!(sticky.options().get_sticky());
    /// # Ok::<(), dotnet_regex::Error>(())
    /// ```
    pub fn from_pattern<O: Into<Options>>(
        source: &Regex,
        options: O,
    ) -> Result<Regex, Error> {
        let mut options = options.into();
        if source.options.ignore_case {
            options = options.ignore_case(true);
        }
        if source.options.multi_line {
            options = options.multi_line(true);
        }
        Regex::with_options(source.as_str(), options)
    }

    /// Returns the original pattern string, before any rewriting.
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Returns the options this `Regex` was compiled with.
    pub fn options(&self) -> Options {
        self.options
    }

    /// Returns true if and only if the pattern matches somewhere in
    /// `subject`. No [`Match`] is allocated.
    pub fn is_match(&self, subject: &str) -> bool {
        self.re.is_match(subject)
    }

    /// Searches `subject` and returns the first match.
    ///
    /// Equivalent to [`Regex::find_at`] with a start of 0. A failed search
    /// returns an unsuccessful [`Match`], not an error.
    pub fn find(&self, subject: &str) -> Match {
        self.find_at(subject, 0)
    }

    /// Searches `subject` from byte offset `start` and returns the first
    /// match at or after it.
    ///
    /// All offsets on the returned match are absolute positions in
    /// `subject`, not positions in the searched tail. A `start` that is out
    /// of range or not on a character boundary yields an unsuccessful
    /// match rather than an error.
    ///
    /// ```
    /// use dotnet_regex::Regex;
    ///
    /// let re = Regex::new("[0-9]+")?;
    /// let m = re.find_at("a1b22c333", 4);
    /// assert_eq!((m.value(), m.index()), ("22", Some(4)));
    /// # Ok::<(), dotnet_regex::Error>(())
    /// ```
    pub fn find_at(&self, subject: &str, start: usize) -> Match {
        if start >= subject.len() {
            return Match::empty().clone();
        }
        let tail = match subject.get(start..) {
            None => return Match::empty().clone(),
            Some(tail) => tail,
        };
        let caps = match self.re.captures(tail) {
            None => return Match::empty().clone(),
            Some(caps) => caps,
        };
        trace!(
            "matched {:?} at {:?}",
            &caps[0],
            start + caps.get(0).map_or(0, |m| m.start()),
        );
        let mut slots: Vec<Option<Group>> = Vec::with_capacity(caps.len());
        for ord in 0..caps.len() {
            // The engine reports exact per-group offsets, relative to the
            // searched tail; translating by `start` makes them absolute.
            slots.push(
                caps.get(ord)
                    .map(|g| Group::new(g.as_str(), start + g.start())),
            );
        }
        Match::new(slots, Arc::clone(&self.names))
    }

    /// Searches `subject` and eagerly returns every non-overlapping match,
    /// in order, left to right.
    ///
    /// Each search restarts at the end of the previous match. A zero-length
    /// match advances the cursor by one character so that an empty-matching
    /// pattern cannot loop.
    ///
    /// ```
    /// use dotnet_regex::Regex;
    ///
    /// let re = Regex::new("[0-9]+")?;
    /// let all = re.matches("a1b22c333");
    /// let values: Vec<&str> = all.iter().map(|m| m.value()).collect();
    /// assert_eq!(values, ["1", "22", "333"]);
    /// # Ok::<(), dotnet_regex::Error>(())
    /// ```
    pub fn matches(&self, subject: &str) -> Vec<Match> {
        let mut all = Vec::new();
        let mut at = 0;
        while at < subject.len() {
            let m = self.find_at(subject, at);
            if !m.success() {
                break;
            }
            // Success guarantees a recorded offset.
            let end = m.index().unwrap() + m.len();
            all.push(m);
            at = if end > at { end } else { bump(subject, end) };
        }
        all
    }

    /// Replaces every match in `subject` with the replacement and returns
    /// the result. Equivalent to [`Regex::replacen`] without a limit.
    ///
    /// The replacement may be a fixed value or an evaluator; see
    /// [`Replacer`]. Passing `None::<&str>` (or any absent replacer)
    /// returns the subject unchanged.
    ///
    /// ```
    /// use dotnet_regex::Regex;
    ///
    /// let re = Regex::new("[0-9]+")?;
    /// assert_eq!(re.replace("a1b22", "#"), "a#b#");
    /// assert_eq!(re.replace("a1b22", None::<&str>), "a1b22");
    /// # Ok::<(), dotnet_regex::Error>(())
    /// ```
    pub fn replace<'h, R: Replacer>(
        &self,
        subject: &'h str,
        rep: R,
    ) -> Cow<'h, str> {
        self.replacen(subject, usize::MAX, rep)
    }

    /// Replaces at most `limit` matches in `subject` with the replacement
    /// and returns the result.
    ///
    /// An empty subject, an absent replacer or a `limit` of 0 all return
    /// the subject unchanged (and borrowed — a new string is only built
    /// when at least one replacement happens).
    ///
    /// ```
    /// use dotnet_regex::Regex;
    ///
    /// let re = Regex::new("[0-9]+")?;
    /// assert_eq!(re.replacen("a1b22c333", 2, "#"), "a#b#c333");
    /// assert_eq!(re.replacen("a1b22c333", 0, "#"), "a1b22c333");
    /// # Ok::<(), dotnet_regex::Error>(())
    /// ```
    pub fn replacen<'h, R: Replacer>(
        &self,
        subject: &'h str,
        limit: usize,
        mut rep: R,
    ) -> Cow<'h, str> {
        if subject.is_empty() || limit == 0 || rep.is_absent() {
            return Cow::Borrowed(subject);
        }
        let mut new = String::with_capacity(subject.len());
        // `at` is the search cursor; `last` is where the unmatched slice
        // waiting to be copied begins. They only diverge after a
        // zero-length match bumps the cursor.
        let mut at = 0;
        let mut last = 0;
        let mut done = 0;
        while done < limit && at < subject.len() {
            let m = self.find_at(subject, at);
            if !m.success() {
                break;
            }
            // Success guarantees a recorded offset.
            let index = m.index().unwrap();
            let end = index + m.len();
            new.push_str(&subject[last..index]);
            rep.replace_append(&m, done, &mut new);
            done += 1;
            last = end;
            at = if end > at { end } else { bump(subject, end) };
        }
        if done == 0 {
            return Cow::Borrowed(subject);
        }
        new.push_str(&subject[last..]);
        Cow::Owned(new)
    }
}

/// Returns the offset one character past `at`, for stepping over a
/// zero-length match.
fn bump(subject: &str, at: usize) -> usize {
    at + subject[at..].chars().next().map_or(1, char::len_utf8)
}

/// Compiles `pattern` with `options` and tests `subject` against it in one
/// step. The transient `Regex` is not cached across calls.
///
/// Agrees with the instance method for every valid pattern:
/// `Regex::with_options(p, o)?.is_match(s)` and `is_match(s, p, o)?` are
/// always the same value.
///
/// ```
/// use dotnet_regex::{is_match, Flag};
///
/// assert!(is_match("ABCDE", "[a-e]+", Flag::IgnoreCase)?);
/// assert!(!is_match("ZYXWV", "[a-e]+", Flag::IgnoreCase)?);
/// # Ok::<(), dotnet_regex::Error>(())
/// ```
pub fn is_match<O: Into<Options>>(
    subject: &str,
    pattern: &str,
    options: O,
) -> Result<bool, Error> {
    Ok(Regex::with_options(pattern, options)?.is_match(subject))
}

/// Compiles `pattern` with `options` and replaces every match in `subject`
/// in one step. The transient `Regex` is not cached across calls.
///
/// ```
/// use dotnet_regex::{replace, Options};
///
/// let out = replace("a1b22", "[0-9]+", "#", Options::new())?;
/// assert_eq!(out, "a#b#");
/// # Ok::<(), dotnet_regex::Error>(())
/// ```
pub fn replace<'h, R: Replacer, O: Into<Options>>(
    subject: &'h str,
    pattern: &str,
    rep: R,
    options: O,
) -> Result<Cow<'h, str>, Error> {
    Ok(Regex::with_options(pattern, options)?.replace(subject, rep))
}
