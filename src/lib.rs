/*!
This crate provides a .NET-flavored regular expression facade on top of the
[`regex`] crate. It does not implement any matching itself. Instead, it
rewrites patterns that use the `(?<name>...)` named group syntax into the
engine's plain positional syntax, keeps its own ordinal-to-name table, and
wraps every engine result into self-contained [`Capture`]/[`Group`]/[`Match`]
values with absolute byte offsets.

The pieces that make this feel like `System.Text.RegularExpressions` rather
than a thin re-export:

* [`Regex::find_at`] resumes a search from an arbitrary byte offset and
  reports offsets relative to the *original* subject, not the searched
  slice.
* [`Regex::matches`] eagerly collects every non-overlapping match, left to
  right, restarting immediately after each match.
* [`Regex::replace`] accepts either a fixed value or a per-match evaluator
  (anything implementing [`Replacer`]), with an optional replacement count
  limit via [`Regex::replacen`].
* Options are composable typed flags ([`Flag`], [`Options`]) instead of a
  raw flag string, though a flag string is accepted too.
* [`escape`] makes an arbitrary string safe to embed as a literal inside a
  larger pattern.

# Example: named groups and offsets

```
use dotnet_regex::{Flag, Regex};

let subject = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
let re = Regex::with_options("(?<first>[A-E]+)", Flag::IgnoreCase)?;

let m = re.find_at(subject, 20);
assert!(m.success());
assert_eq!(m.value(), "abcde");
assert_eq!(m.index(), Some(26));
assert_eq!(m.name("first").map(|g| g.value()), Some("abcde"));
# Ok::<(), dotnet_regex::Error>(())
```

# Example: replacement with an evaluator

```
use dotnet_regex::{Match, Regex};

let re = Regex::new("[0-9]+")?;
let out = re.replace("a1b22c333", |m: &Match, i: usize| {
    format!("<{}:{}>", i, m.value())
});
assert_eq!(out, "a<0:1>b<1:22>c<2:333>");
# Ok::<(), dotnet_regex::Error>(())
```

# Searching does not mean success

A search that finds nothing is not an error. [`Regex::find`] returns a
`Match` whose [`success`](Group::success) is false, [`Regex::matches`]
returns an
empty `Vec` and [`Regex::is_match`] returns `false`. Errors are reserved
for construction: an empty pattern, an unrecognized flag character or a
pattern the engine rejects.
*/

#![forbid(unsafe_code)]
#![warn(missing_debug_implementations)]
#![deny(missing_docs)]

#[macro_use]
mod macros;

pub use crate::{
    captures::{Capture, Group, Groups, Match, NamedGroups},
    compile::escape,
    error::Error,
    options::{Flag, Options},
    replacer::Replacer,
    string::{is_match, replace, Regex},
};

mod captures;
mod compile;
mod error;
mod options;
mod replacer;
mod string;
