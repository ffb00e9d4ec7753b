use std::fmt;

/// Numeric log-level gate in the style of klog's `-v` flag.
///
/// Messages tagged with level `n` are emitted only when the configured
/// verbosity is at least `n`. Carried by the server rather than held in a
/// global so several servers can run side by side with different levels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Verbosity(pub u8);

impl Verbosity {
    /// Completion trace after a response has been written
    pub const RESPONDED: u8 = 4;
    /// Full request dumps and per-request filter traces
    pub const REQUEST_DUMP: u8 = 5;

    /// Create a verbosity gate
    pub fn new(level: u8) -> Self {
        Self(level)
    }

    /// Whether messages at `level` should be emitted
    pub fn enabled(self, level: u8) -> bool {
        self.0 >= level
    }
}

impl fmt::Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u8> for Verbosity {
    fn from(level: u8) -> Self {
        Self(level)
    }
}
