use core::fmt;

/// An error that can occur when constructing a [`Regex`](crate::Regex).
///
/// Searching never produces an error: an unsuccessful search is an ordinary
/// result (an unsuccessful [`Match`](crate::Match), an empty `Vec`, `false`
/// or an unchanged subject).
#[derive(Clone, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The pattern string given at construction was empty.
    ///
    /// An empty pattern is rejected outright rather than compiled into a
    /// regex that matches the empty string everywhere.
    EmptyPattern,
    /// A flag string contained a character that does not correspond to any
    /// supported option.
    ///
    /// The supported characters are `i`, `m`, `u`, `y` and `w`, compared
    /// case-insensitively. A `g` is accepted and ignored, since iteration
    /// is handled by this crate rather than by an engine-level global mode.
    UnknownFlag(char),
    /// The rewritten pattern was rejected by the underlying engine.
    ///
    /// The engine's error is carried unchanged and is also available via
    /// [`std::error::Error::source`].
    Syntax(regex::Error),
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            Error::Syntax(ref err) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Error::EmptyPattern => {
                write!(f, "pattern cannot be empty")
            }
            Error::UnknownFlag(ch) => {
                write!(f, "unrecognized option flag: {:?}", ch)
            }
            Error::Syntax(ref err) => err.fmt(f),
        }
    }
}

impl From<regex::Error> for Error {
    fn from(err: regex::Error) -> Error {
        Error::Syntax(err)
    }
}
