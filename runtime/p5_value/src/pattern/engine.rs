//! Single, global and string-position matching.

use std::rc::Rc;

use tracing::trace;

use super::state::{Captures, MatchStatus, Subject};
use super::{CompiledRegex, MatchState, RegexBody, RegexFlags, Span};
use crate::context::Context;
use crate::runtime::Runtime;
use crate::value::{Coercible, Value};

/// Result of a match, shaped by context.
#[derive(Clone, Debug)]
pub enum MatchOutcome {
    /// Scalar or void context: success indicator.
    Scalar(bool),
    /// List context: captured groups, or the matched text when the pattern
    /// has no groups. Empty on failure.
    List(Vec<Value>),
}

impl MatchOutcome {
    pub fn is_match(&self) -> bool {
        match self {
            MatchOutcome::Scalar(matched) => *matched,
            MatchOutcome::List(values) => !values.is_empty(),
        }
    }

    /// The result as a runtime value: `1` or `""` for scalar outcomes, an
    /// array for list outcomes.
    pub fn into_value(self) -> Value {
        match self {
            MatchOutcome::Scalar(true) => Value::int(1),
            MatchOutcome::Scalar(false) => Value::string(""),
            MatchOutcome::List(values) => {
                Value::array(values.iter().map(Value::scalar_content))
            }
        }
    }

    fn failure(context: Context) -> Self {
        if context.is_list() {
            MatchOutcome::List(Vec::new())
        } else {
            MatchOutcome::Scalar(false)
        }
    }
}

/// Character spans of byte-offset groups.
fn char_spans(
    subject: &Subject,
    groups: impl Iterator<Item = Option<(usize, usize)>>,
) -> Captures {
    groups
        .map(|group| {
            group.map(|(start, end)| Span {
                start: subject.char_at(start),
                end: subject.char_at(end),
            })
        })
        .collect()
}

/// Search `subject` from character `start`.
///
/// With `allow_zero` false a zero-length match at `start` is not reported:
/// the longest non-empty match beginning at `start` is taken instead, and
/// failing that the search resumes one character later.
fn search(
    regex: &CompiledRegex,
    subject: &Subject,
    start: usize,
    allow_zero: bool,
) -> Option<Captures> {
    let text = subject.text();
    let from = subject.byte_at(start)?;
    let mut found = regex.program().captures_at(text, from)?;
    let whole = found.get(0)?;
    if !allow_zero && whole.is_empty() && whole.start() == from {
        if let Some(groups) = regex.nonempty_at(text, from) {
            trace!(start, "non-empty retry at the same position");
            return Some(char_spans(subject, groups.into_iter()));
        }
        let next = from + text[from..].chars().next()?.len_utf8();
        found = regex.program().captures_at(text, next)?;
    }
    trace!(start, allow_zero, "match attempt succeeded");
    let groups = found.iter().map(|group| group.map(|m| (m.start(), m.end())));
    Some(char_spans(subject, groups))
}

/// Text of each capture group (undef when it did not participate), or of
/// the whole match when there are no groups.
fn group_values(subject: &Subject, captures: &Captures) -> Vec<Value> {
    let text = |span: Span| Value::string(subject.slice(span.start, span.end));
    if captures.len() <= 1 {
        return captures
            .first()
            .copied()
            .flatten()
            .map(text)
            .into_iter()
            .collect();
    }
    captures[1..]
        .iter()
        .map(|group| group.map_or_else(Value::undef, text))
        .collect()
}

impl RegexBody {
    /// Match against the string form of `value`.
    ///
    /// Without `/g` (in `flags` or the compiled modifiers) the whole subject
    /// is searched and the state's position is left alone; list context
    /// yields the capture groups, or `(1)` when the pattern has none. With
    /// `/g` this is [`match_global`](Self::match_global).
    pub fn match_value(
        &self,
        rt: &Runtime,
        value: &Value,
        flags: RegexFlags,
        context: Context,
        state: &mut MatchState,
    ) -> MatchOutcome {
        if (flags | self.compiled.flags()).contains(RegexFlags::GLOBAL) {
            return self.match_global(rt, value, flags, context, state);
        }
        let subject = state.subject_for(value.as_string(rt));
        let Some(captures) = search(&self.compiled, &subject, 0, true) else {
            return MatchOutcome::failure(context);
        };
        let outcome = if context.is_list() {
            let groups = if captures.len() <= 1 {
                vec![Value::int(1)]
            } else {
                group_values(&subject, &captures)
            };
            MatchOutcome::List(groups)
        } else {
            MatchOutcome::Scalar(true)
        };
        state.record(&subject, captures);
        outcome
    }

    /// Global match resuming from the state's position.
    ///
    /// In scalar context each call finds the next match and moves the
    /// position past it; when nothing is left the state becomes exhausted
    /// and the position is cleared (kept under `/c`). In list context every
    /// remaining match is collected at once and the state ends exhausted.
    /// An exhausted state reports no match until it is reset.
    #[tracing::instrument(level = "trace", skip_all, fields(pattern = %self.compiled.source()))]
    pub fn match_global(
        &self,
        rt: &Runtime,
        value: &Value,
        flags: RegexFlags,
        context: Context,
        state: &mut MatchState,
    ) -> MatchOutcome {
        if state.status == MatchStatus::Exhausted {
            return MatchOutcome::failure(context);
        }
        let keep_pos = (flags | self.compiled.flags()).contains(RegexFlags::KEEP_POS);
        let subject = state.subject_for(value.as_string(rt));

        if !context.is_list() {
            return MatchOutcome::Scalar(self.global_step(&subject, keep_pos, state));
        }

        let mut collected = Vec::new();
        while self.global_step(&subject, keep_pos, state) {
            collected.extend(group_values(&subject, &state.captures));
        }
        MatchOutcome::List(collected)
    }

    fn global_step(&self, subject: &Rc<Subject>, keep_pos: bool, state: &mut MatchState) -> bool {
        let start = state.pos.unwrap_or(0);
        let allow_zero = state.zero_length_at != Some(start);
        match search(&self.compiled, subject, start, allow_zero) {
            Some(captures) => {
                let whole = captures.first().copied().flatten().unwrap_or(Span {
                    start,
                    end: start,
                });
                state.pos = Some(whole.end);
                state.zero_length_at = whole.is_empty().then_some(whole.end);
                state.record(subject, captures);
                true
            }
            None => {
                trace!(start, "global match exhausted");
                state.status = MatchStatus::Exhausted;
                state.zero_length_at = None;
                if !keep_pos {
                    state.pos = None;
                }
                false
            }
        }
    }

    /// Boolean match of `subject` starting at character `pos`.
    ///
    /// With `allow_zero` false a zero-length match exactly at `pos` does not
    /// count. On success the state's position moves to the end of the match
    /// and the captures are recorded; on failure the state is untouched.
    pub fn match_string(
        &self,
        subject: &str,
        pos: usize,
        allow_zero: bool,
        state: &mut MatchState,
    ) -> bool {
        let subject = state.subject_for(subject);
        let Some(captures) = search(&self.compiled, &subject, pos, allow_zero) else {
            return false;
        };
        state.pos = captures.first().copied().flatten().map(|span| span.end);
        state.record(&subject, captures);
        true
    }
}
