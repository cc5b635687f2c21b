//! Console help and version text

use core::fmt::Write;
use heapless::String;

/// Firmware version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build identifier, set through `LIGGHT_BUILD` at compile time
pub const BUILD: &str = match option_env!("LIGGHT_BUILD") {
    Some(build) => build,
    None => "development",
};

/// Output of the `help` command
pub const HELP_TEXT: &str = "\
\"help\"
 - Displays this help dialog
\"set_state <n>\"
 - Sets the state of all connected traffic lights (0:Off, 1:Maintenance, 2:On, 3:Debug)
\"set_transition_state <main> [<secondary>]\"
 - Sets the transition state of all connected traffic lights (0:None, 1:Green, 2:Yellow, 3:Red, 4:RedYellow); requires debug mode
\"version\"
 - Prints version information
";

/// Output of the `version` command
pub fn version_info() -> String<96> {
    let mut out = String::new();
    // Capacity covers the fixed text plus generous version/build strings
    let _ = write!(out, "Ligght CLI\nVersion {}\nBuild {}\n", VERSION, BUILD);
    out
}
