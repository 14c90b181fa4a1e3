//! Terminal helpers - progress spinners, styled output and logging

mod logging;
mod progress;
mod styling;

pub use logging::*;
pub use progress::*;
pub use styling::*;
