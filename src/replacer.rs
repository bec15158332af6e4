use std::{borrow::Cow, fmt, fmt::Write};

use crate::captures::Match;

/// A trait for values that produce the replacement text for each match
/// during [`Regex::replace`](crate::Regex::replace).
///
/// In the original .NET shape this is "a primitive value or a match
/// evaluator". Here the two collapse into one trait:
///
/// * Fixed values: `&str`, `String`, `Cow<str>`, `char`, `bool` and the
///   common numeric types insert the same text for every occurrence.
/// * Evaluators: any `FnMut(&Match, usize) -> impl Display` closure is
///   invoked once per occurrence with the match and the 0-based count of
///   replacements performed so far.
///
/// Replacement text is inserted verbatim; there is no `$1`-style capture
/// interpolation. An evaluator that wants capture text reads it off the
/// [`Match`] it is handed.
///
/// ```
/// use dotnet_regex::{Match, Regex};
///
/// let re = Regex::new("[aeiou]")?;
/// assert_eq!(re.replace("banana", "_"), "b_n_n_");
/// assert_eq!(re.replace("banana", |_: &Match, i: usize| i), "b0n1n2");
/// # Ok::<(), dotnet_regex::Error>(())
/// ```
pub trait Replacer {
    /// Appends the replacement text for `m` to `dst`. `occurrence` is the
    /// 0-based count of replacements performed before this one.
    fn replace_append(
        &mut self,
        m: &Match,
        occurrence: usize,
        dst: &mut String,
    );

    /// Returns true when this replacer stands for no replacement at all,
    /// in which case the whole replace operation leaves the subject
    /// unchanged. The blanket [`Option`] implementation is the intended
    /// way to express this.
    fn is_absent(&self) -> bool {
        false
    }
}

impl<'a> Replacer for &'a str {
    fn replace_append(&mut self, _: &Match, _: usize, dst: &mut String) {
        dst.push_str(self);
    }
}

impl<'a> Replacer for &'a String {
    fn replace_append(
        &mut self,
        m: &Match,
        occurrence: usize,
        dst: &mut String,
    ) {
        self.as_str().replace_append(m, occurrence, dst);
    }
}

impl Replacer for String {
    fn replace_append(&mut self, _: &Match, _: usize, dst: &mut String) {
        dst.push_str(self);
    }
}

impl<'a> Replacer for Cow<'a, str> {
    fn replace_append(&mut self, _: &Match, _: usize, dst: &mut String) {
        dst.push_str(self.as_ref());
    }
}

impl<'a> Replacer for &'a Cow<'a, str> {
    fn replace_append(&mut self, _: &Match, _: usize, dst: &mut String) {
        dst.push_str(self.as_ref());
    }
}

impl Replacer for char {
    fn replace_append(&mut self, _: &Match, _: usize, dst: &mut String) {
        dst.push(*self);
    }
}

macro_rules! replacer_for_primitive {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Replacer for $ty {
                fn replace_append(
                    &mut self,
                    _: &Match,
                    _: usize,
                    dst: &mut String,
                ) {
                    // Formatting into a String cannot fail.
                    let _ = write!(dst, "{}", self);
                }
            }
        )*
    };
}

replacer_for_primitive!(
    bool, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize,
    f32, f64,
);

impl<F, T> Replacer for F
where
    F: FnMut(&Match, usize) -> T,
    T: fmt::Display,
{
    fn replace_append(
        &mut self,
        m: &Match,
        occurrence: usize,
        dst: &mut String,
    ) {
        // Formatting into a String cannot fail.
        let _ = write!(dst, "{}", (self)(m, occurrence));
    }
}

/// `None` requests no replacement at all: the subject comes back unchanged,
/// which is not the same as replacing every match with the empty string.
impl<R: Replacer> Replacer for Option<R> {
    fn replace_append(
        &mut self,
        m: &Match,
        occurrence: usize,
        dst: &mut String,
    ) {
        if let Some(rep) = self {
            rep.replace_append(m, occurrence, dst);
        }
    }

    fn is_absent(&self) -> bool {
        match self {
            None => true,
            Some(rep) => rep.is_absent(),
        }
    }
}
