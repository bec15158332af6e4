use std::{
    fmt,
    ops::{Deref, Index, Range},
    sync::{Arc, OnceLock},
};

use crate::compile::CaptureNames;

/// A single captured span of text: the text itself plus the absolute byte
/// offset where it starts in the original subject.
///
/// A capture either participated in a match (its [`index`](Capture::index)
/// is `Some`) or did not (`None`). A zero-length capture, such as one
/// produced by a boundary assertion, still participates and carries a real
/// offset; only a group that never engaged at all is absent.
///
/// Captures own their text, so they remain valid after the subject string
/// is gone. They are immutable from the moment they are created.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Capture {
    value: Box<str>,
    index: Option<usize>,
}

impl Capture {
    fn new(value: &str, index: usize) -> Capture {
        Capture { value: Box::from(value), index: Some(index) }
    }

    fn absent() -> Capture {
        Capture { value: Box::from(""), index: None }
    }

    /// Returns the captured text. Empty when the capture did not
    /// participate, but also possibly empty for a real zero-length capture;
    /// use [`Capture::index`] to tell the two apart.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns the absolute byte offset of this capture in the original
    /// subject, or `None` if the capture did not participate in the match.
    ///
    /// The offset is absolute even when the search began at a non-zero
    /// start position.
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Returns the length of the captured text in bytes, `0` when nothing
    /// was captured.
    pub fn len(&self) -> usize {
        self.value.len()
    }

    /// Returns true if the captured text is empty.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Returns the byte range this capture occupies in the original
    /// subject, or `None` if the capture did not participate.
    pub fn range(&self) -> Option<Range<usize>> {
        self.index.map(|start| start..start + self.value.len())
    }
}

/// A [`Capture`] slot in a match: either one of the pattern's capturing
/// groups or the whole match itself.
///
/// `Group` derefs to `Capture`, so the text, offset and length accessors
/// are available directly. What it adds is [`success`](Group::success):
/// whether this slot participated in the match at all.
#[derive(Clone, Eq, PartialEq)]
pub struct Group {
    capture: Capture,
}

static EMPTY_GROUP: OnceLock<Group> = OnceLock::new();

impl Group {
    pub(crate) fn new(value: &str, index: usize) -> Group {
        Group { capture: Capture::new(value, index) }
    }

    /// Returns the shared group that stands for "this slot did not
    /// participate".
    ///
    /// This is a single process-wide instance: every non-participating slot
    /// in every match refers to it, so comparing against "no match" by
    /// identity (`std::ptr::eq`) is cheap and consistent.
    pub fn empty() -> &'static Group {
        EMPTY_GROUP.get_or_init(|| Group { capture: Capture::absent() })
    }

    /// Returns true if this group participated in the match.
    pub fn success(&self) -> bool {
        self.capture.index().is_some()
    }
}

impl Deref for Group {
    type Target = Capture;

    fn deref(&self) -> &Capture {
        &self.capture
    }
}

impl fmt::Debug for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.success() {
            f.debug_struct("Group")
                .field("value", &self.value())
                .field("index", &self.capture.index())
                .finish()
        } else {
            write!(f, "Group(<none>)")
        }
    }
}

static EMPTY_MATCH: OnceLock<Match> = OnceLock::new();

/// The result of a single match attempt: the whole-match span plus every
/// capture group, looked up by ordinal or by name.
///
/// `Match` derefs to the whole-match [`Group`] (ordinal 0), so
/// `m.value()`, `m.index()` and `m.len()` describe the full matched span.
/// Ordinals follow the engine's positional numbering; names come from the
/// `(?<name>...)` syntax in the source pattern.
///
/// A failed search is represented by an unsuccessful `Match` rather than
/// an error; see [`Match::empty`] and [`success`](Group::success).
///
/// ```
/// use dotnet_regex::Regex;
///
/// let re = Regex::new(r"(?<word>[a-z]+)([0-9]+)?")?;
/// let m = re.find("see spot42 run");
/// assert_eq!(m.value(), "see");
/// assert_eq!(&m["word"], "see");
/// assert!(!m.group(2).unwrap().success());
/// # Ok::<(), dotnet_regex::Error>(())
/// ```
#[derive(Clone, Eq, PartialEq)]
pub struct Match {
    /// Slot 0 is the whole match; `None` marks a group that did not
    /// participate.
    slots: Vec<Option<Group>>,
    /// Shared with the `Regex` that produced this match.
    names: Arc<CaptureNames>,
}

impl Match {
    pub(crate) fn new(
        slots: Vec<Option<Group>>,
        names: Arc<CaptureNames>,
    ) -> Match {
        Match { slots, names }
    }

    /// Returns the shared match that stands for "no match found".
    ///
    /// Like [`Group::empty`], this is a single process-wide instance: its
    /// value is empty, it has no offset, no groups and no names.
    pub fn empty() -> &'static Match {
        EMPTY_MATCH.get_or_init(|| Match {
            slots: Vec::new(),
            names: Arc::new(CaptureNames::default()),
        })
    }

    /// Returns the group at `ord`, where ordinal 0 is the whole match.
    ///
    /// Returns `None` only when `ord` is out of bounds for the compiled
    /// pattern. A group that exists but did not participate yields the
    /// [`Group::empty`] singleton instead.
    pub fn group(&self, ord: usize) -> Option<&Group> {
        match self.slots.get(ord) {
            None => None,
            Some(Some(group)) => Some(group),
            Some(None) => Some(Group::empty()),
        }
    }

    /// Returns the group the pattern declared under `name`, or `None` when
    /// the pattern has no such name.
    ///
    /// The reference returned is the same group [`Match::group`] returns
    /// for the ordinal that `name` was declared at.
    pub fn name(&self, name: &str) -> Option<&Group> {
        let ord = self.names.to_index(name)?;
        self.group(ord)
    }

    /// Returns an ordered iterator over all groups, whole match first.
    ///
    /// The iterator's length equals the engine's capture count for the
    /// pattern, including the whole match.
    pub fn groups(&self) -> Groups<'_> {
        Groups { m: self, ord: 0 }
    }

    /// Returns an iterator over `(name, group)` pairs for the named groups,
    /// in order of declaration.
    ///
    /// Only named ordinals appear. If a name was declared more than once,
    /// only the declaration that wins name lookup is yielded.
    pub fn named_groups(&self) -> NamedGroups<'_> {
        NamedGroups { m: self, ord: 0 }
    }
}

impl Deref for Match {
    type Target = Group;

    fn deref(&self) -> &Group {
        match self.slots.first() {
            Some(Some(group)) => group,
            _ => Group::empty(),
        }
    }
}

/// Looks up a group's text by ordinal.
///
/// # Panics
///
/// Panics if there is no group at the given ordinal.
impl Index<usize> for Match {
    type Output = str;

    fn index(&self, ord: usize) -> &str {
        self.group(ord)
            .unwrap_or_else(|| panic!("no group at ordinal {}", ord))
            .value()
    }
}

/// Looks up a group's text by name.
///
/// # Panics
///
/// Panics if the pattern declared no group under the given name.
impl Index<&str> for Match {
    type Output = str;

    fn index(&self, name: &str) -> &str {
        self.name(name)
            .unwrap_or_else(|| panic!("no group named {:?}", name))
            .value()
    }
}

impl fmt::Debug for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.success() {
            return write!(f, "Match(<none>)");
        }
        // Keys are rendered as `ord` or `ord/name` so that named slots are
        // recognizable at a glance.
        struct Key<'a>(usize, Option<&'a str>);

        impl<'a> fmt::Debug for Key<'a> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self.1 {
                    None => write!(f, "{}", self.0),
                    Some(name) => write!(f, "{}/{}", self.0, name),
                }
            }
        }

        let mut map = f.debug_map();
        for (ord, group) in self.groups().enumerate() {
            let name = self.names.get(ord);
            if group.success() {
                map.entry(&Key(ord, name), &group.value());
            } else {
                map.entry(&Key(ord, name), &None::<&str>);
            }
        }
        map.finish()
    }
}

/// An ordered iterator over the groups of a [`Match`], created by
/// [`Match::groups`].
#[derive(Debug)]
pub struct Groups<'m> {
    m: &'m Match,
    ord: usize,
}

impl<'m> Iterator for Groups<'m> {
    type Item = &'m Group;

    fn next(&mut self) -> Option<&'m Group> {
        let group = self.m.group(self.ord)?;
        self.ord += 1;
        Some(group)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.m.slots.len().saturating_sub(self.ord);
        (left, Some(left))
    }
}

impl<'m> ExactSizeIterator for Groups<'m> {}

/// An iterator over the named groups of a [`Match`], created by
/// [`Match::named_groups`].
#[derive(Debug)]
pub struct NamedGroups<'m> {
    m: &'m Match,
    ord: usize,
}

impl<'m> Iterator for NamedGroups<'m> {
    type Item = (&'m str, &'m Group);

    fn next(&mut self) -> Option<(&'m str, &'m Group)> {
        while self.ord < self.m.names.len() {
            self.ord += 1;
            let name = match self.m.names.get(self.ord) {
                None => continue,
                Some(name) => name,
            };
            // Skip declarations shadowed by a later duplicate.
            if self.m.names.to_index(name) != Some(self.ord) {
                continue;
            }
            match self.m.group(self.ord) {
                None => continue,
                Some(group) => return Some((name, group)),
            }
        }
        None
    }
}
