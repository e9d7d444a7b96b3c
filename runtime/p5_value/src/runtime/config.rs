//! `RuntimeBuilder` for creating runtimes with various configurations.

use super::{Runtime, WarningSink};

/// Default compiled-pattern size cap, matching the regex crate's own default.
const DEFAULT_REGEX_SIZE_LIMIT: usize = 10 * (1 << 20);

/// Perl's limit on inheritance depth.
const DEFAULT_MAX_ISA_DEPTH: usize = 100;

/// Per-runtime settings. There is no global configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Deliver warnings to the sink (`-w`). Off by default.
    pub warnings: bool,
    /// Size cap handed to the pattern compiler.
    pub regex_size_limit: usize,
    /// Deepest inheritance chain a method walk follows.
    pub max_isa_depth: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        RuntimeConfig {
            warnings: false,
            regex_size_limit: DEFAULT_REGEX_SIZE_LIMIT,
            max_isa_depth: DEFAULT_MAX_ISA_DEPTH,
        }
    }
}

/// Builder for [`Runtime`].
#[derive(Debug, Default)]
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    sink: Option<WarningSink>,
}

impl RuntimeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable warnings.
    #[must_use]
    pub fn warnings(mut self, enabled: bool) -> Self {
        self.config.warnings = enabled;
        self
    }

    #[must_use]
    pub fn regex_size_limit(mut self, limit: usize) -> Self {
        self.config.regex_size_limit = limit;
        self
    }

    #[must_use]
    pub fn max_isa_depth(mut self, depth: usize) -> Self {
        self.config.max_isa_depth = depth;
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Where warnings go. Defaults to stderr.
    #[must_use]
    pub fn warning_sink(mut self, sink: WarningSink) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn build(self) -> Runtime {
        Runtime::from_parts(self.config, self.sink.unwrap_or_default())
    }
}
