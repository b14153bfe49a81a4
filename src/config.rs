//! Engine configuration.

/// Options recognized by the execution engine.
///
/// # Examples
///
/// ```
/// use cpu6502::Config;
///
/// // A test harness that treats BRK as "program finished" on a 2A03-style core
/// let config = Config::default()
///     .with_break_is_fatal(true)
///     .with_decimal_mode(false);
///
/// assert!(config.break_is_fatal);
/// assert!(!config.decimal_mode);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    /// When true, fetching BRK (0x00) stops execution with
    /// [`Halt::BreakExecuted`](crate::Halt::BreakExecuted) instead of running
    /// the software interrupt.
    pub break_is_fatal: bool,

    /// When true, ADC and SBC honour the Decimal flag (NMOS BCD arithmetic).
    /// When false the flag is still stored but arithmetic is always binary.
    pub decimal_mode: bool,
}

impl Config {
    /// Sets [`Config::break_is_fatal`].
    pub fn with_break_is_fatal(mut self, break_is_fatal: bool) -> Self {
        self.break_is_fatal = break_is_fatal;
        self
    }

    /// Sets [`Config::decimal_mode`].
    pub fn with_decimal_mode(mut self, decimal_mode: bool) -> Self {
        self.decimal_mode = decimal_mode;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            break_is_fatal: false,
            decimal_mode: true,
        }
    }
}
