mod registration;
mod registry;
mod relay;
mod relay_command;

pub use registration::*;
pub use registry::*;
pub use relay::*;
pub use relay_command::*;
