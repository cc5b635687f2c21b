//! Light programs
//!
//! A program is a table of steps that repeats forever. Each step says
//! what the main and the side street show and for how long.

pub mod builtin;
pub mod step;
pub mod table;

pub use builtin::Programs;
pub use step::{ProgramStep, TransitionState};
pub use table::{ProgramTable, StepSpec, TableError, TimeScale, MAX_STEPS};
