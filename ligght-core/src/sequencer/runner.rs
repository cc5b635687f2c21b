//! Step sequencer
//!
//! Called once per tick with the current time. Resolves which step of the
//! active program is showing and reports it only when it changed, so the
//! bus is written once per step instead of once per tick.

use crate::bus::RoleFlags;
use crate::program::{ProgramTable, Programs, TransitionState};
use crate::state::{Event, LightState};

/// States to send down the chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepOutput {
    /// Main street
    pub main: TransitionState,
    /// Side street
    pub secondary: TransitionState,
    /// Name of the program the step came from
    pub program: &'static str,
    /// Step index within the program (None for synthetic steps)
    pub index: Option<u8>,
}

impl StepOutput {
    /// Lights dark
    pub const fn dark() -> Self {
        Self {
            main: TransitionState::None,
            secondary: TransitionState::None,
            program: "off",
            index: None,
        }
    }

    /// States forced from the console
    pub const fn forced(main: TransitionState, secondary: TransitionState) -> Self {
        Self {
            main,
            secondary,
            program: "debug",
            index: None,
        }
    }
}

/// Sequencer errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SequencerError {
    /// Forced transitions are only accepted in debug mode
    NotInDebugMode,
}

/// Identity of the active step, used to detect step changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StepKey {
    Dark,
    Table { mode: LightState, index: u8 },
    Forced { generation: u16 },
    /// Debug mode before the first forced transition
    Held,
}

/// Drives the lights from the program tables
#[derive(Debug)]
pub struct Sequencer<'a> {
    /// Built-in tables
    programs: &'a Programs,
    /// Role of this controller
    roles: RoleFlags,
    /// Current operating mode
    mode: LightState,
    /// Cycle origin is reset on the next tick
    restart_pending: bool,
    /// Time the current cycle started (ms since boot)
    cycle_start_ms: u64,
    /// Step reported on the previous change
    last_key: Option<StepKey>,
    /// Most recently emitted output
    last_output: Option<StepOutput>,
    /// States forced in debug mode
    forced: Option<(TransitionState, TransitionState)>,
    /// Bumped on every forced transition
    forced_generation: u16,
}

impl<'a> Sequencer<'a> {
    /// Create a sequencer; lights start dark
    pub fn new(programs: &'a Programs, roles: RoleFlags) -> Self {
        Self {
            programs,
            roles,
            mode: LightState::Off,
            restart_pending: true,
            cycle_start_ms: 0,
            last_key: None,
            last_output: None,
            forced: None,
            forced_generation: 0,
        }
    }

    /// Current operating mode
    pub fn mode(&self) -> LightState {
        self.mode
    }

    /// Last output reported by [`tick`](Self::tick)
    pub fn current(&self) -> Option<StepOutput> {
        self.last_output
    }

    /// Table used while the mode is [`LightState::On`]
    pub fn operating_table(&self) -> &'a ProgramTable {
        self.programs.operating(self.roles.is_simple_traffic_light)
    }

    /// Apply an event
    pub fn handle_event(&mut self, event: Event) -> Result<(), SequencerError> {
        match event {
            Event::ForceTransition { main, secondary } => self.force_transition(main, secondary),
            other => {
                self.select_mode(self.mode.transition(other));
                Ok(())
            }
        }
    }

    /// Switch operating mode
    ///
    /// Takes effect on the next tick, which starts a new cycle.
    /// Selecting the mode already active changes nothing.
    pub fn select_mode(&mut self, mode: LightState) {
        if mode == self.mode {
            return;
        }
        if self.mode == LightState::Debug {
            self.forced = None;
        }
        self.mode = mode;
        self.restart_pending = true;
    }

    /// Show fixed states until replaced
    pub fn force_transition(
        &mut self,
        main: TransitionState,
        secondary: TransitionState,
    ) -> Result<(), SequencerError> {
        if !self.mode.accepts_forced_transitions() {
            return Err(SequencerError::NotInDebugMode);
        }
        self.forced = Some((main, secondary));
        self.forced_generation = self.forced_generation.wrapping_add(1);
        Ok(())
    }

    /// Advance to `now_ms`, milliseconds since boot
    ///
    /// Returns the new step's states if the active step changed since the
    /// previous tick, `None` otherwise.
    pub fn tick(&mut self, now_ms: u64) -> Option<StepOutput> {
        if self.restart_pending {
            self.cycle_start_ms = now_ms;
            self.restart_pending = false;
        }
        let elapsed_ms = now_ms.saturating_sub(self.cycle_start_ms);

        let (key, output) = match self.mode {
            LightState::Off => (StepKey::Dark, Some(StepOutput::dark())),
            LightState::Maintenance => {
                Self::table_step(self.mode, &self.programs.maintenance, elapsed_ms)
            }
            LightState::On => Self::table_step(self.mode, self.operating_table(), elapsed_ms),
            LightState::Debug => match self.forced {
                Some((main, secondary)) => (
                    StepKey::Forced {
                        generation: self.forced_generation,
                    },
                    Some(StepOutput::forced(main, secondary)),
                ),
                None => (StepKey::Held, None),
            },
        };

        if self.last_key == Some(key) {
            return None;
        }
        self.last_key = Some(key);

        if output.is_some() {
            self.last_output = output;
        }
        output
    }

    fn table_step(
        mode: LightState,
        table: &ProgramTable,
        elapsed_ms: u64,
    ) -> (StepKey, Option<StepOutput>) {
        // Reduce in u64 so the phase never jumps when uptime passes 2^32 ms
        let phase_ms = (elapsed_ms % u64::from(table.cycle_length_ms())) as u32;
        let (index, step) = table.step_at_wrapped(phase_ms);
        let index = index as u8;
        (
            StepKey::Table { mode, index },
            Some(StepOutput {
                main: step.main_state,
                secondary: step.secondary_state,
                program: table.name(),
                index: Some(index),
            }),
        )
    }
}
