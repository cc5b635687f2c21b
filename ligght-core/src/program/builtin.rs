//! Built-in light programs
//!
//! Schedules are written in units of [`TimeScale`]. With the standard
//! 10 ms unit a four-way junction cycle lasts 4.65 s and a pedestrian
//! light cycle 7.1 s.

use super::step::TransitionState::{self, *};
use super::table::{ProgramTable, StepSpec, TableError, TimeScale};

const fn step(main: TransitionState, secondary: TransitionState, begin: u32, duration: u32) -> StepSpec {
    StepSpec::new(main, secondary, begin, duration)
}

/// Blinking yellow on the side street
pub const MAINTENANCE: &[StepSpec] = &[
    step(None, Yellow, 0, 100),
    step(None, None, 100, 100).final_step(),
];

/// Single-stream light, e.g. a pedestrian crossing
pub const SIMPLE_LIGHT: &[StepSpec] = &[
    step(None, Green, 0, 200),
    step(None, Yellow, 200, 30),
    step(None, Red, 230, 260),
    step(None, RedYellow, 490, 20),
    step(None, Green, 510, 200).final_step(),
];

/// Two crossing streams
pub const FOUR_WAY_JUNCTION: &[StepSpec] = &[
    step(Green, Red, 0, 200),
    step(Yellow, Red, 200, 30),
    step(Red, Red, 230, 20),
    step(Red, RedYellow, 250, 20),
    step(Red, Green, 270, 125),
    step(Red, Yellow, 395, 30),
    step(Red, Red, 425, 20),
    step(RedYellow, Red, 445, 20).final_step(),
];

/// The set of tables a controller runs
///
/// Built once at startup and kept for the lifetime of the firmware.
#[derive(Debug, Clone)]
pub struct Programs {
    pub maintenance: ProgramTable,
    pub simple_light: ProgramTable,
    pub four_way_junction: ProgramTable,
}

impl Programs {
    /// Build and validate all built-in tables
    pub fn builtin(scale: TimeScale) -> Result<Self, TableError> {
        Ok(Self {
            maintenance: ProgramTable::from_units("maintenance", MAINTENANCE, scale)?,
            simple_light: ProgramTable::from_units("simpleLight", SIMPLE_LIGHT, scale)?,
            four_way_junction: ProgramTable::from_units(
                "fourWayJunction",
                FOUR_WAY_JUNCTION,
                scale,
            )?,
        })
    }

    /// Table shown in normal operation for the given fixture kind
    pub fn operating(&self, is_simple_traffic_light: bool) -> &ProgramTable {
        if is_simple_traffic_light {
            &self.simple_light
        } else {
            &self.four_way_junction
        }
    }
}
