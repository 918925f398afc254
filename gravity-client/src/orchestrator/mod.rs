mod orchestrator;
mod orchestrator_command;
mod orchestrator_handle;
mod peer_observer;

pub use orchestrator::*;
pub use orchestrator_command::*;
pub use orchestrator_handle::*;
pub use peer_observer::*;
