//! Program tables and step resolution
//!
//! A program table is the repeating schedule of one fixture behavior.
//! Tables are validated once when they are built; after that every
//! instant of the cycle maps to exactly one step.

use heapless::Vec;

use super::step::{ProgramStep, TransitionState};

/// Maximum steps per program table
pub const MAX_STEPS: usize = 16;

/// Ways a program table can be malformed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TableError {
    /// Table has no steps
    Empty,
    /// More than [`MAX_STEPS`] steps
    TooManySteps,
    /// First step does not begin at the start of the cycle
    NotStartingAtZero,
    /// Step has a zero duration
    ZeroDuration { index: u8 },
    /// Step begins after the previous one ended
    Gap { index: u8 },
    /// Step begins before the previous one ended (also covers out-of-order steps)
    Overlap { index: u8 },
    /// No step is marked as final
    MissingFinalStep,
    /// A step other than the last one is marked as final
    FinalStepNotLast { index: u8 },
    /// Step times do not fit into 32-bit milliseconds
    Overflow,
}

/// Length of one schedule time unit
///
/// Schedules are written once in abstract units and stretched by the
/// scale when a table is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeScale {
    /// Milliseconds per schedule unit
    pub unit_ms: u32,
}

impl TimeScale {
    /// 10 ms per unit: the regular street timing
    pub const STANDARD: Self = Self { unit_ms: 10 };

    /// 100 ms per unit: ten times slower, for bench demonstrations
    pub const SLOW: Self = Self { unit_ms: 100 };

    /// Create a scale with a custom unit
    pub const fn from_unit_ms(unit_ms: u32) -> Self {
        Self { unit_ms }
    }
}

impl Default for TimeScale {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// A step expressed in schedule units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepSpec {
    pub main: TransitionState,
    pub secondary: TransitionState,
    /// Begin, in units
    pub begin: u32,
    /// Duration, in units
    pub duration: u32,
    pub is_final: bool,
}

impl StepSpec {
    pub const fn new(
        main: TransitionState,
        secondary: TransitionState,
        begin: u32,
        duration: u32,
    ) -> Self {
        Self {
            main,
            secondary,
            begin,
            duration,
            is_final: false,
        }
    }

    pub const fn final_step(mut self) -> Self {
        self.is_final = true;
        self
    }

    fn scaled(&self, scale: TimeScale) -> Result<ProgramStep, TableError> {
        let begin_ms = self
            .begin
            .checked_mul(scale.unit_ms)
            .ok_or(TableError::Overflow)?;
        let duration_ms = self
            .duration
            .checked_mul(scale.unit_ms)
            .ok_or(TableError::Overflow)?;

        let step = ProgramStep::new(self.main, self.secondary, begin_ms, duration_ms);
        Ok(if self.is_final { step.final_step() } else { step })
    }
}

/// Named, validated, immutable schedule
#[derive(Debug, Clone)]
pub struct ProgramTable {
    name: &'static str,
    steps: Vec<ProgramStep, MAX_STEPS>,
    cycle_ms: u32,
}

impl ProgramTable {
    /// Build a table from steps in milliseconds
    ///
    /// Fails if the steps do not tile the cycle exactly once.
    pub fn new(name: &'static str, steps: &[ProgramStep]) -> Result<Self, TableError> {
        let cycle_ms = validate(steps)?;

        let mut stored = Vec::new();
        stored
            .extend_from_slice(steps)
            .map_err(|_| TableError::TooManySteps)?;

        Ok(Self {
            name,
            steps: stored,
            cycle_ms,
        })
    }

    /// Build a table from a schedule written in units
    pub fn from_units(
        name: &'static str,
        units: &[StepSpec],
        scale: TimeScale,
    ) -> Result<Self, TableError> {
        if units.len() > MAX_STEPS {
            return Err(TableError::TooManySteps);
        }

        let mut steps: Vec<ProgramStep, MAX_STEPS> = Vec::new();
        for s in units {
            steps
                .push(s.scaled(scale)?)
                .map_err(|_| TableError::TooManySteps)?;
        }

        Self::new(name, &steps)
    }

    /// Table name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Steps in cycle order
    pub fn steps(&self) -> &[ProgramStep] {
        &self.steps
    }

    /// Number of steps
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always false for a validated table
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Length of one full cycle
    pub fn cycle_length_ms(&self) -> u32 {
        self.cycle_ms
    }

    /// Resolve the step active at `t_ms` after cycle start
    ///
    /// Returns `None` if `t_ms` lies outside `[0, cycle_length)`.
    pub fn step_at(&self, t_ms: u32) -> Option<(usize, &ProgramStep)> {
        if t_ms >= self.cycle_ms {
            return None;
        }
        let index = self.index_at(t_ms);
        Some((index, &self.steps[index]))
    }

    /// Resolve the step active at `t_ms`, wrapping around the cycle
    pub fn step_at_wrapped(&self, t_ms: u32) -> (usize, &ProgramStep) {
        let index = self.index_at(t_ms % self.cycle_ms);
        (index, &self.steps[index])
    }

    /// Index of the last step beginning at or before `t_ms`
    ///
    /// The first step begins at 0, so the partition point is at least 1.
    fn index_at(&self, t_ms: u32) -> usize {
        self.steps.partition_point(|s| s.begin_ms <= t_ms) - 1
    }
}

/// Check coverage and ordering, returning the cycle length
fn validate(steps: &[ProgramStep]) -> Result<u32, TableError> {
    if steps.is_empty() {
        return Err(TableError::Empty);
    }
    if steps.len() > MAX_STEPS {
        return Err(TableError::TooManySteps);
    }
    if steps[0].begin_ms != 0 {
        return Err(TableError::NotStartingAtZero);
    }

    let last = steps.len() - 1;
    let mut expected_begin = 0u32;

    for (i, step) in steps.iter().enumerate() {
        let index = i as u8;

        if step.duration_ms == 0 {
            return Err(TableError::ZeroDuration { index });
        }
        if step.begin_ms > expected_begin {
            return Err(TableError::Gap { index });
        }
        if step.begin_ms < expected_begin {
            return Err(TableError::Overlap { index });
        }
        if step.is_final_step && i != last {
            return Err(TableError::FinalStepNotLast { index });
        }

        expected_begin = step
            .begin_ms
            .checked_add(step.duration_ms)
            .ok_or(TableError::Overflow)?;
    }

    if !steps[last].is_final_step {
        return Err(TableError::MissingFinalStep);
    }

    Ok(expected_begin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use TransitionState::*;

    fn two_step() -> [ProgramStep; 2] {
        [
            ProgramStep::new(None, Yellow, 0, 1000),
            ProgramStep::new(None, None, 1000, 1000).final_step(),
        ]
    }

    #[test]
    fn test_valid_table() {
        let table = ProgramTable::new("blink", &two_step()).unwrap();

        assert_eq!(table.name(), "blink");
        assert_eq!(table.len(), 2);
        assert_eq!(table.cycle_length_ms(), 2000);
    }

    #[test]
    fn test_step_lookup_boundaries() {
        let table = ProgramTable::new("blink", &two_step()).unwrap();

        assert_eq!(table.step_at(0).unwrap().0, 0);
        assert_eq!(table.step_at(999).unwrap().0, 0);
        assert_eq!(table.step_at(1000).unwrap().0, 1);
        assert_eq!(table.step_at(1999).unwrap().0, 1);
        assert!(table.step_at(2000).is_none());
    }

    #[test]
    fn test_wrapped_lookup() {
        let table = ProgramTable::new("blink", &two_step()).unwrap();

        assert_eq!(table.step_at_wrapped(2000).0, 0);
        assert_eq!(table.step_at_wrapped(3500).0, 1);
        assert_eq!(table.step_at_wrapped(u32::MAX).0, (u32::MAX % 2000 / 1000) as usize);
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(ProgramTable::new("x", &[]).unwrap_err(), TableError::Empty);
    }

    #[test]
    fn test_gap_detected() {
        let steps = [
            ProgramStep::new(None, Red, 0, 200),
            ProgramStep::new(None, Green, 250, 100).final_step(),
        ];
        assert_eq!(
            ProgramTable::new("x", &steps).unwrap_err(),
            TableError::Gap { index: 1 }
        );
    }

    #[test]
    fn test_overlap_and_order_detected() {
        let overlapping = [
            ProgramStep::new(None, Red, 0, 200),
            ProgramStep::new(None, Green, 150, 100).final_step(),
        ];
        assert_eq!(
            ProgramTable::new("x", &overlapping).unwrap_err(),
            TableError::Overlap { index: 1 }
        );

        let unordered = [
            ProgramStep::new(None, Red, 0, 200),
            ProgramStep::new(None, Green, 400, 100),
            ProgramStep::new(None, Yellow, 200, 200).final_step(),
        ];
        assert_eq!(
            ProgramTable::new("x", &unordered).unwrap_err(),
            TableError::Gap { index: 1 }
        );
    }

    #[test]
    fn test_final_marker_rules() {
        let missing = [
            ProgramStep::new(None, Red, 0, 200),
            ProgramStep::new(None, Green, 200, 100),
        ];
        assert_eq!(
            ProgramTable::new("x", &missing).unwrap_err(),
            TableError::MissingFinalStep
        );

        let duplicate = [
            ProgramStep::new(None, Red, 0, 200).final_step(),
            ProgramStep::new(None, Green, 200, 100).final_step(),
        ];
        assert_eq!(
            ProgramTable::new("x", &duplicate).unwrap_err(),
            TableError::FinalStepNotLast { index: 0 }
        );
    }

    #[test]
    fn test_zero_duration_and_offset_start() {
        let zero = [ProgramStep::new(None, Red, 0, 0).final_step()];
        assert_eq!(
            ProgramTable::new("x", &zero).unwrap_err(),
            TableError::ZeroDuration { index: 0 }
        );

        let offset = [ProgramStep::new(None, Red, 10, 100).final_step()];
        assert_eq!(
            ProgramTable::new("x", &offset).unwrap_err(),
            TableError::NotStartingAtZero
        );
    }

    #[test]
    fn test_scaled_units() {
        let units = [
            StepSpec::new(Green, Red, 0, 125),
            StepSpec::new(Red, Green, 125, 75).final_step(),
        ];

        let standard = ProgramTable::from_units("x", &units, TimeScale::STANDARD).unwrap();
        assert_eq!(standard.cycle_length_ms(), 2000);
        assert_eq!(standard.steps()[1].begin_ms, 1250);

        let slow = ProgramTable::from_units("x", &units, TimeScale::SLOW).unwrap();
        assert_eq!(slow.cycle_length_ms(), 20_000);
    }

    #[test]
    fn test_scaled_units_overflow() {
        let units = [StepSpec::new(Green, Red, 0, u32::MAX).final_step()];
        assert_eq!(
            ProgramTable::from_units("x", &units, TimeScale::STANDARD).unwrap_err(),
            TableError::Overflow
        );
    }
}
