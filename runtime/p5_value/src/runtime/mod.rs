//! The explicit host context.
//!
//! A [`Runtime`] owns everything an operation may need beyond its operands:
//! the symbol-table registry, the dynamic-scope stack used by `local`, the
//! warning sink and the configuration. Operations take it as an argument;
//! independent runtimes share nothing.

mod config;
mod scope_guard;
mod warnings;

pub use config::{RuntimeBuilder, RuntimeConfig};
pub use scope_guard::ScopedRuntime;
pub use warnings::{BufferWarningSink, Warning, WarningSink};

use crate::local::DynamicScope;
use crate::stash::SymbolTable;

/// Host execution context for the value core.
#[derive(Debug)]
pub struct Runtime {
    config: RuntimeConfig,
    symbols: SymbolTable,
    warnings: WarningSink,
    pub(crate) dynamic: DynamicScope,
}

impl Runtime {
    /// A runtime with default configuration and warnings to stderr.
    pub fn new() -> Self {
        RuntimeBuilder::new().build()
    }

    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    pub(crate) fn from_parts(config: RuntimeConfig, warnings: WarningSink) -> Self {
        let symbols = SymbolTable::new(config.max_isa_depth);
        Runtime {
            config,
            symbols,
            warnings,
            dynamic: DynamicScope::default(),
        }
    }

    #[inline]
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// The symbol-table registry.
    #[inline]
    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    #[inline]
    pub fn symbols_mut(&mut self) -> &mut SymbolTable {
        &mut self.symbols
    }

    #[inline]
    pub fn warning_sink(&self) -> &WarningSink {
        &self.warnings
    }

    /// Report a warning if warnings are enabled.
    pub fn warn(&self, warning: Warning) {
        if self.config.warnings {
            self.warnings.report(warning);
        }
    }

    /// Number of open dynamic scopes.
    pub fn local_depth(&self) -> usize {
        self.dynamic.depth()
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}
