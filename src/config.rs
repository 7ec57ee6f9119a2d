/// Deepest allowed nesting of subroutine calls.
pub const MAX_CALL_DEPTH: usize = 1500;
/// Loop iterations between two cooperative yields to the host.
pub const YIELD_INTERVAL: usize = 128;
/// Most memory a single array declaration may allocate for its slots.
pub const MAX_ARRAY_BYTES: usize = 64 * 1024 * 1024;
/// Remaining stack below which recursive evaluation moves to a new segment.
pub const STACK_RED_ZONE: usize = 128 * 1024;
/// Size of each stack segment allocated once the red zone is reached.
pub const STACK_GROW_SIZE: usize = 4 * 1024 * 1024;

/// Runtime limits of an interpreter context.
///
/// The defaults are the language's own limits; hosts normally only tune how
/// often long-running loops yield.
///
/// # Example
/// ```
/// use ocr_erl::config::{Config, MAX_CALL_DEPTH};
///
/// let config = Config::default().with_yield_interval(16);
/// assert_eq!(config.max_call_depth, MAX_CALL_DEPTH);
/// assert_eq!(config.yield_interval, 16);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Calls nested deeper than this fail with an evaluation error.
    pub max_call_depth: usize,
    /// Number of loop iterations between calls to the host's `pause`.
    pub yield_interval: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self { max_call_depth: MAX_CALL_DEPTH,
               yield_interval: YIELD_INTERVAL, }
    }
}

impl Config {
    /// Sets the yield interval. Zero is raised to one.
    #[must_use]
    pub fn with_yield_interval(mut self, iterations: usize) -> Self {
        self.yield_interval = iterations.max(1);
        self
    }

    #[must_use]
    pub const fn with_max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }
}
