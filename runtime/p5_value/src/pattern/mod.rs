//! Compiled patterns and the match engine interface.
//!
//! A compiled pattern holds no match progress. Every match call takes a
//! caller-owned [`MatchState`], so one pattern can drive any number of
//! independent global-match streams.
//!
//! Pattern compilation is delegated to the `regex` crate, whose engine runs
//! in linear time; the only cost bound needed here is the program size cap
//! from [`RuntimeConfig`](crate::RuntimeConfig). A second, longest-match
//! program over the same source is built from `regex-automata` the first
//! time a global match has to step past a zero-length match.

mod engine;
mod state;

use std::cell::OnceCell;
use std::fmt;

use bitflags::bitflags;
use regex::{Regex, RegexBuilder};
use regex_automata::nfa::thompson::{self, pikevm::PikeVM};
use regex_automata::util::syntax;
use regex_automata::{Anchored, Input, MatchKind};
use tracing::debug;

pub use engine::MatchOutcome;
pub use state::{MatchState, MatchStatus, Span};

use crate::runtime::Runtime;
use crate::stash::StashId;

bitflags! {
    /// Pattern modifiers.
    #[derive(Copy, Clone, Default, Eq, PartialEq, Hash, Debug)]
    pub struct RegexFlags: u8 {
        /// `/i`
        const CASE_INSENSITIVE = 1 << 0;
        /// `/m`: `^` and `$` match at line boundaries.
        const MULTI_LINE = 1 << 1;
        /// `/s`: `.` matches newline.
        const SINGLE_LINE = 1 << 2;
        /// `/x`
        const EXTENDED = 1 << 3;
        /// `/g`: resume from the match state's position.
        const GLOBAL = 1 << 4;
        /// `/c`: keep the position when a global match fails.
        const KEEP_POS = 1 << 5;
    }
}

impl RegexFlags {
    /// Parse modifier letters (`"gimsxc"`). Unknown letters are ignored.
    pub fn from_modifiers(modifiers: &str) -> Self {
        modifiers.chars().fold(RegexFlags::empty(), |flags, c| {
            flags
                | match c {
                    'i' => RegexFlags::CASE_INSENSITIVE,
                    'm' => RegexFlags::MULTI_LINE,
                    's' => RegexFlags::SINGLE_LINE,
                    'x' => RegexFlags::EXTENDED,
                    'g' => RegexFlags::GLOBAL,
                    'c' => RegexFlags::KEEP_POS,
                    _ => RegexFlags::empty(),
                }
        })
    }

    /// The compile-time modifiers in canonical `msix` order.
    pub fn modifiers(self) -> String {
        [
            (RegexFlags::MULTI_LINE, 'm'),
            (RegexFlags::SINGLE_LINE, 's'),
            (RegexFlags::CASE_INSENSITIVE, 'i'),
            (RegexFlags::EXTENDED, 'x'),
        ]
        .into_iter()
        .filter(|(flag, _)| self.contains(*flag))
        .map(|(_, c)| c)
        .collect()
    }
}

/// Byte spans of each group of one match, group 0 first.
pub(crate) type ByteGroups = Vec<Option<(usize, usize)>>;

/// Source text, modifiers and the compiled program.
#[derive(Clone, Debug)]
pub struct CompiledRegex {
    source: String,
    flags: RegexFlags,
    program: Regex,
    size_limit: usize,
    /// Longest-match program; `None` inside when it could not be built.
    longest: OnceCell<Option<PikeVM>>,
}

impl CompiledRegex {
    /// Pattern text as written.
    #[inline]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[inline]
    pub fn flags(&self) -> RegexFlags {
        self.flags
    }

    #[inline]
    pub(crate) fn program(&self) -> &Regex {
        &self.program
    }

    /// Number of capture groups, not counting the whole match.
    pub fn group_count(&self) -> usize {
        self.program.captures_len().saturating_sub(1)
    }

    /// Groups of the longest non-empty match starting exactly at byte
    /// `from`, if there is one.
    pub(crate) fn nonempty_at(&self, haystack: &str, from: usize) -> Option<ByteGroups> {
        let vm = self.longest.get_or_init(|| self.build_longest()).as_ref()?;
        let mut cache = vm.create_cache();
        let mut caps = vm.create_captures();
        let input = Input::new(haystack).range(from..).anchored(Anchored::Yes);
        vm.search(&mut cache, &input, &mut caps);
        let whole = caps.get_match()?;
        if whole.is_empty() {
            return None;
        }
        Some(
            (0..caps.group_len())
                .map(|group| caps.get_group(group).map(|span| (span.start, span.end)))
                .collect(),
        )
    }

    fn build_longest(&self) -> Option<PikeVM> {
        let syntax = syntax::Config::new()
            .case_insensitive(self.flags.contains(RegexFlags::CASE_INSENSITIVE))
            .multi_line(self.flags.contains(RegexFlags::MULTI_LINE))
            .dot_matches_new_line(self.flags.contains(RegexFlags::SINGLE_LINE))
            .ignore_whitespace(self.flags.contains(RegexFlags::EXTENDED));
        PikeVM::builder()
            .syntax(syntax)
            .thompson(thompson::Config::new().nfa_size_limit(Some(self.size_limit)))
            .configure(PikeVM::config().match_kind(MatchKind::All))
            .build(&self.source)
            .map_err(|error| {
                debug!(%error, source = %self.source, "no longest-match program");
            })
            .ok()
    }
}

/// `(?^flags:source)`, Perl's stringification of `qr//`.
impl fmt::Display for CompiledRegex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(?^{}:{})", self.flags.modifiers(), self.source)
    }
}

/// Body of a Regex value.
#[derive(Clone, Debug)]
pub struct RegexBody {
    pub(crate) compiled: CompiledRegex,
    pub(crate) blessed: Option<StashId>,
}

impl RegexBody {
    /// Compile `source` with `flags` under the runtime's size limit.
    pub fn compile(rt: &Runtime, source: &str, flags: RegexFlags) -> Result<Self, regex::Error> {
        let size_limit = rt.config().regex_size_limit;
        let program = RegexBuilder::new(source)
            .case_insensitive(flags.contains(RegexFlags::CASE_INSENSITIVE))
            .multi_line(flags.contains(RegexFlags::MULTI_LINE))
            .dot_matches_new_line(flags.contains(RegexFlags::SINGLE_LINE))
            .ignore_whitespace(flags.contains(RegexFlags::EXTENDED))
            .size_limit(size_limit)
            .build()?;
        Ok(RegexBody {
            compiled: CompiledRegex {
                source: source.to_string(),
                flags,
                program,
                size_limit,
                longest: OnceCell::new(),
            },
            blessed: None,
        })
    }

    #[inline]
    pub fn compiled(&self) -> &CompiledRegex {
        &self.compiled
    }

    /// Source text for introspection. Never used for matching.
    #[inline]
    pub fn original(&self) -> &str {
        &self.compiled.source
    }

    #[inline]
    pub fn flags(&self) -> RegexFlags {
        self.compiled.flags
    }
}
