//! Transition states and program steps

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Visual state of one logical stream (main or secondary street)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TransitionState {
    /// All lamps dark
    #[default]
    None,
    Green,
    Yellow,
    Red,
    /// Red and yellow together, announcing green
    RedYellow,
}

impl TransitionState {
    /// Parse the numeric code used on the serial console (0-4)
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::None),
            1 => Some(Self::Green),
            2 => Some(Self::Yellow),
            3 => Some(Self::Red),
            4 => Some(Self::RedYellow),
            _ => None,
        }
    }

    /// Numeric console code
    pub fn code(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Green => 1,
            Self::Yellow => 2,
            Self::Red => 3,
            Self::RedYellow => 4,
        }
    }
}

/// One interval of constant transition state within a program table
///
/// Times are milliseconds relative to the start of the cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProgramStep {
    /// State shown on the main street
    pub main_state: TransitionState,
    /// State shown on the side street
    pub secondary_state: TransitionState,
    /// Offset from cycle start
    pub begin_ms: u32,
    /// Length of the step, strictly positive
    pub duration_ms: u32,
    /// Marks the wraparound point of the cycle
    pub is_final_step: bool,
}

impl ProgramStep {
    /// Create a regular (non-final) step
    pub const fn new(
        main_state: TransitionState,
        secondary_state: TransitionState,
        begin_ms: u32,
        duration_ms: u32,
    ) -> Self {
        Self {
            main_state,
            secondary_state,
            begin_ms,
            duration_ms,
            is_final_step: false,
        }
    }

    /// Mark this step as the last one of the cycle
    pub const fn final_step(mut self) -> Self {
        self.is_final_step = true;
        self
    }

    /// End of the step (exclusive)
    ///
    /// Saturates instead of wrapping; a table whose steps would overflow
    /// is rejected at validation anyway.
    pub const fn end_ms(&self) -> u32 {
        self.begin_ms.saturating_add(self.duration_ms)
    }

    /// Check whether `t_ms` falls inside `[begin, end)`
    pub const fn contains(&self, t_ms: u32) -> bool {
        t_ms >= self.begin_ms && t_ms < self.end_ms()
    }
}
