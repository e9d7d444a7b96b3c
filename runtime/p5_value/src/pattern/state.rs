//! Caller-owned match progress.

use std::rc::Rc;

use smallvec::SmallVec;

use crate::value::Value;

/// Character range of a match or capture group, end exclusive.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    #[inline]
    pub fn len(self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.start == self.end
    }
}

pub(crate) type Captures = SmallVec<[Option<Span>; 4]>;

/// Subject text indexed for character/byte conversion.
///
/// Built once per subject and shared by every step of a match stream, so
/// converting a position costs a table lookup instead of a rescan.
#[derive(Debug, Default)]
pub(crate) struct Subject {
    text: String,
    /// Byte offset of every character. Empty for ASCII text, where the two
    /// coincide.
    offsets: Vec<usize>,
}

impl Subject {
    pub(crate) fn new(text: String) -> Self {
        let offsets = if text.is_ascii() {
            Vec::new()
        } else {
            text.char_indices().map(|(byte, _)| byte).collect()
        };
        Subject { text, offsets }
    }

    #[inline]
    pub(crate) fn text(&self) -> &str {
        &self.text
    }

    pub(crate) fn char_len(&self) -> usize {
        if self.offsets.is_empty() {
            self.text.len()
        } else {
            self.offsets.len()
        }
    }

    /// Byte offset of character `index`; the end of the text for
    /// `char_len()`, `None` past it.
    pub(crate) fn byte_at(&self, index: usize) -> Option<usize> {
        if index == self.char_len() {
            Some(self.text.len())
        } else if self.offsets.is_empty() {
            (index < self.text.len()).then_some(index)
        } else {
            self.offsets.get(index).copied()
        }
    }

    /// Character index of the character boundary at `byte`.
    pub(crate) fn char_at(&self, byte: usize) -> usize {
        if self.offsets.is_empty() {
            byte
        } else {
            self.offsets.partition_point(|&offset| offset < byte)
        }
    }

    /// Characters `start..end`, clamped to the text.
    pub(crate) fn slice(&self, start: usize, end: usize) -> &str {
        let len = self.char_len();
        let from = self.byte_at(start.min(len)).unwrap_or(self.text.len());
        let to = self
            .byte_at(end.min(len))
            .unwrap_or(self.text.len())
            .max(from);
        &self.text[from..to]
    }
}

/// Whether a global match stream can continue.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum MatchStatus {
    #[default]
    Ready,
    /// The last global step found nothing. Sticky until [`MatchState::reset`].
    Exhausted,
}

/// Progress of one match stream: position, captures and continuation.
#[derive(Clone, Debug, Default)]
pub struct MatchState {
    pub(crate) pos: Option<usize>,
    pub(crate) captures: Captures,
    pub(crate) status: MatchStatus,
    /// Position of the last zero-length global match.
    pub(crate) zero_length_at: Option<usize>,
    /// Subject of the last successful match, for reading captures back.
    pub(crate) subject: Rc<Subject>,
}

impl MatchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh state resuming from `value`'s `pos`.
    pub fn from_subject(value: &Value) -> Self {
        MatchState {
            pos: value.pos(),
            ..Self::default()
        }
    }

    /// Store the position back into `value` (`pos($x)`).
    pub fn commit_pos(&self, value: &Value) {
        value.set_pos(self.pos);
    }

    /// Position in characters, `None` when unset.
    #[inline]
    pub fn pos(&self) -> Option<usize> {
        self.pos
    }

    /// Move the position. Clears exhaustion and the zero-length guard.
    pub fn set_pos(&mut self, pos: Option<usize>) {
        self.pos = pos;
        self.status = MatchStatus::Ready;
        self.zero_length_at = None;
    }

    #[inline]
    pub fn status(&self) -> MatchStatus {
        self.status
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.status == MatchStatus::Exhausted
    }

    /// Forget everything.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Spans of the last successful match; index 0 is the whole match.
    #[inline]
    pub fn captures(&self) -> &[Option<Span>] {
        &self.captures
    }

    pub fn group_span(&self, group: usize) -> Option<Span> {
        self.captures.get(group).copied().flatten()
    }

    /// Text of capture `group` (`$1`...), `$&` for group 0.
    pub fn group(&self, group: usize) -> Option<String> {
        let span = self.group_span(group)?;
        Some(self.slice(span.start, span.end))
    }

    /// Text before the last match (`` $` ``).
    pub fn pre_match(&self) -> Option<String> {
        let span = self.group_span(0)?;
        Some(self.slice(0, span.start))
    }

    /// Text after the last match (`$'`).
    pub fn post_match(&self) -> Option<String> {
        let span = self.group_span(0)?;
        Some(self.slice(span.end, usize::MAX))
    }

    fn slice(&self, start: usize, end: usize) -> String {
        self.subject.slice(start, end).to_string()
    }

    /// Indexed form of `text`, reusing the recorded subject when the text
    /// is unchanged.
    pub(crate) fn subject_for<S>(&self, text: S) -> Rc<Subject>
    where
        S: AsRef<str> + Into<String>,
    {
        if self.subject.text() == text.as_ref() {
            Rc::clone(&self.subject)
        } else {
            Rc::new(Subject::new(text.into()))
        }
    }

    pub(crate) fn record(&mut self, subject: &Rc<Subject>, captures: Captures) {
        if !Rc::ptr_eq(&self.subject, subject) {
            self.subject = Rc::clone(subject);
        }
        self.captures = captures;
    }
}
