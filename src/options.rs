use core::{ops::BitOr, str::FromStr};

use crate::error::Error;

/// A single regex option, in the style of `RegexOptions` from .NET.
///
/// Flags compose into an [`Options`] value with `|`, and most constructors
/// accept anything that converts into `Options`: a single flag, an array or
/// slice of flags, or a parsed flag string.
///
/// ```
/// use dotnet_regex::{Flag, Options, Regex};
///
/// let opts: Options = Flag::IgnoreCase | Flag::MultiLine;
/// assert!(opts.get_ignore_case());
///
/// // Equivalent spellings at a construction site.
/// let a = Regex::with_options("(?<w>\\w+)", Flag::IgnoreCase)?;
/// let b = Regex::with_options("(?<w>\\w+)", [Flag::IgnoreCase])?;
/// let c = Regex::with_flags("(?<w>\\w+)", "i")?;
/// assert_eq!(a.options(), b.options());
/// assert_eq!(b.options(), c.options());
/// # Ok::<(), dotnet_regex::Error>(())
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Flag {
    /// Case-insensitive matching, i.e. the `i` flag.
    IgnoreCase,
    /// `^` and `$` match at line boundaries, i.e. the `m` flag.
    MultiLine,
    /// Unicode-aware matching, i.e. the `u` flag. The underlying engine is
    /// Unicode-aware by default, so this flag only forces the mode back on
    /// after [`Options::unicode`] disabled it.
    Unicode,
    /// Matches must start exactly at the search position, i.e. the `y`
    /// flag.
    Sticky,
    /// Whitespace inside the pattern matches any run of whitespace in the
    /// subject (including none), i.e. the `w` flag.
    IgnorePatternWhitespace,
}

impl Flag {
    /// Returns the flag corresponding to the given character, if any. Input
    /// is treated case-insensitively.
    fn from_char(ch: char) -> Option<Flag> {
        match ch.to_ascii_lowercase() {
            'i' => Some(Flag::IgnoreCase),
            'm' => Some(Flag::MultiLine),
            'u' => Some(Flag::Unicode),
            'y' => Some(Flag::Sticky),
            'w' => Some(Flag::IgnorePatternWhitespace),
            _ => None,
        }
    }
}

/// A set of regex options, collapsed to one canonical representation.
///
/// Every constructor-facing shape (a single [`Flag`], a sequence of flags,
/// a flag string) converts into this one type before a pattern is compiled,
/// so there is exactly one place where flags take effect.
///
/// The setters use the by-value builder style and can be chained:
///
/// ```
/// use dotnet_regex::Options;
///
/// let opts = Options::new().ignore_case(true).multi_line(true);
/// assert!(opts.get_ignore_case() && opts.get_multi_line());
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Options {
    pub(crate) ignore_case: bool,
    pub(crate) multi_line: bool,
    pub(crate) unicode: bool,
    pub(crate) sticky: bool,
    pub(crate) ignore_whitespace: bool,
}

impl Default for Options {
    /// Everything off, except Unicode mode, which the underlying engine
    /// enables by default.
    fn default() -> Options {
        Options {
            ignore_case: false,
            multi_line: false,
            unicode: true,
            sticky: false,
            ignore_whitespace: false,
        }
    }
}

impl Options {
    /// Returns the default set of options.
    pub fn new() -> Options {
        Options::default()
    }

    /// Enables or disables case-insensitive matching.
    pub fn ignore_case(mut self, yes: bool) -> Options {
        self.ignore_case = yes;
        self
    }

    /// Enables or disables matching `^` and `$` at line boundaries.
    pub fn multi_line(mut self, yes: bool) -> Options {
        self.multi_line = yes;
        self
    }

    /// Enables or disables Unicode-aware matching. This is enabled by
    /// default. Note that disabling it restricts the pattern to constructs
    /// that cannot match outside ASCII-compatible positions, and the engine
    /// rejects patterns that would violate that.
    pub fn unicode(mut self, yes: bool) -> Options {
        self.unicode = yes;
        self
    }

    /// Enables or disables sticky matching, where a match must begin
    /// exactly at the search position rather than anywhere after it.
    pub fn sticky(mut self, yes: bool) -> Options {
        self.sticky = yes;
        self
    }

    /// Enables or disables whitespace-insensitive patterns. When enabled,
    /// every run of whitespace in the pattern is treated as "any amount of
    /// whitespace, including none".
    pub fn ignore_whitespace(mut self, yes: bool) -> Options {
        self.ignore_whitespace = yes;
        self
    }

    /// Returns true if case-insensitive matching is enabled.
    pub fn get_ignore_case(&self) -> bool {
        self.ignore_case
    }

    /// Returns true if multi-line mode is enabled.
    pub fn get_multi_line(&self) -> bool {
        self.multi_line
    }

    /// Returns true if Unicode mode is enabled.
    pub fn get_unicode(&self) -> bool {
        self.unicode
    }

    /// Returns true if sticky matching is enabled.
    pub fn get_sticky(&self) -> bool {
        self.sticky
    }

    /// Returns true if whitespace-insensitive patterns are enabled.
    pub fn get_ignore_whitespace(&self) -> bool {
        self.ignore_whitespace
    }

    /// Returns the union of `self` and `other`.
    pub fn union(self, other: Options) -> Options {
        Options {
            ignore_case: self.ignore_case || other.ignore_case,
            multi_line: self.multi_line || other.multi_line,
            unicode: self.unicode || other.unicode,
            sticky: self.sticky || other.sticky,
            ignore_whitespace: self.ignore_whitespace
                || other.ignore_whitespace,
        }
    }

    fn set(mut self, flag: Flag) -> Options {
        match flag {
            Flag::IgnoreCase => self.ignore_case = true,
            Flag::MultiLine => self.multi_line = true,
            Flag::Unicode => self.unicode = true,
            Flag::Sticky => self.sticky = true,
            Flag::IgnorePatternWhitespace => self.ignore_whitespace = true,
        }
        self
    }
}

impl From<Flag> for Options {
    fn from(flag: Flag) -> Options {
        Options::new().set(flag)
    }
}

impl<const N: usize> From<[Flag; N]> for Options {
    fn from(flags: [Flag; N]) -> Options {
        flags.into_iter().collect()
    }
}

impl From<&[Flag]> for Options {
    fn from(flags: &[Flag]) -> Options {
        flags.iter().copied().collect()
    }
}

impl FromIterator<Flag> for Options {
    fn from_iter<I: IntoIterator<Item = Flag>>(it: I) -> Options {
        it.into_iter().fold(Options::new(), Options::set)
    }
}

impl FromStr for Options {
    type Err = Error;

    /// Parses a flag string such as `"im"` or `"IW"`.
    ///
    /// Characters are matched case-insensitively. A `g` is accepted and
    /// silently dropped, since iteration is always driven by this crate.
    /// Any other unsupported character is an error.
    fn from_str(flags: &str) -> Result<Options, Error> {
        let mut opts = Options::new();
        for ch in flags.chars() {
            if ch.to_ascii_lowercase() == 'g' {
                continue;
            }
            match Flag::from_char(ch) {
                Some(flag) => opts = opts.set(flag),
                None => return Err(Error::UnknownFlag(ch)),
            }
        }
        Ok(opts)
    }
}

impl BitOr for Flag {
    type Output = Options;

    fn bitor(self, rhs: Flag) -> Options {
        Options::new().set(self).set(rhs)
    }
}

impl BitOr<Options> for Flag {
    type Output = Options;

    fn bitor(self, rhs: Options) -> Options {
        rhs.set(self)
    }
}

impl BitOr<Flag> for Options {
    type Output = Options;

    fn bitor(self, rhs: Flag) -> Options {
        self.set(rhs)
    }
}

impl BitOr for Options {
    type Output = Options;

    fn bitor(self, rhs: Options) -> Options {
        self.union(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_string_round_trips() {
        let opts: Options = "im".parse().unwrap();
        assert!(opts.get_ignore_case());
        assert!(opts.get_multi_line());
        assert!(!opts.get_sticky());
        assert!(!opts.get_ignore_whitespace());
    }

    #[test]
    fn flag_string_is_case_insensitive() {
        let lower: Options = "iw".parse().unwrap();
        let upper: Options = "IW".parse().unwrap();
        assert_eq!(lower, upper);
    }

    #[test]
    fn global_flag_is_dropped() {
        let opts: Options = "gi".parse().unwrap();
        assert_eq!(opts, Options::from(Flag::IgnoreCase));
        let none: Options = "g".parse().unwrap();
        assert_eq!(none, Options::new());
    }

    #[test]
    fn unknown_flag_is_an_error() {
        assert!(matches!(
            "is".parse::<Options>(),
            Err(Error::UnknownFlag('s'))
        ));
    }

    #[test]
    fn shapes_collapse_to_the_same_options() {
        let single = Options::from(Flag::IgnoreCase);
        let array = Options::from([Flag::IgnoreCase]);
        let slice = Options::from(&[Flag::IgnoreCase][..]);
        let parsed: Options = "i".parse().unwrap();
        let ored = Flag::IgnoreCase | Options::new();
        assert_eq!(single, array);
        assert_eq!(array, slice);
        assert_eq!(slice, parsed);
        assert_eq!(parsed, ored);
    }

    #[test]
    fn unicode_defaults_on() {
        assert!(Options::new().get_unicode());
        assert!(!Options::new().unicode(false).get_unicode());
    }
}
