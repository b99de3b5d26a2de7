use std::time::Duration;

use crate::host_table::HostTable;

/// Clone git submodules unless told otherwise.
pub const DEFAULT_SUBMODULES: bool = true;

/// Arbitrary, but finite, time budget for git commands.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(27);

/// Static inputs of the parser: the host table and the option defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    pub host_table: HostTable,
    pub default_submodules: bool,
    pub default_timeout: Duration,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            host_table: HostTable::default(),
            default_submodules: DEFAULT_SUBMODULES,
            default_timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ParserConfig {
    pub fn with_host_table(mut self, host_table: HostTable) -> Self {
        self.host_table = host_table;
        self
    }

    pub fn with_default_submodules(mut self, submodules: bool) -> Self {
        self.default_submodules = submodules;
        self
    }

    /// A zero timeout is ignored, the same way a zero `timeout=` query is.
    pub fn with_default_timeout(mut self, timeout: Duration) -> Self {
        if !timeout.is_zero() {
            self.default_timeout = timeout;
        }
        self
    }
}
