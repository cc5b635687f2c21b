//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod console;
pub mod controller;
pub mod inputs;
pub mod tick;

pub use console::console_task;
pub use controller::controller_task;
pub use inputs::button_task;
pub use tick::tick_task;
