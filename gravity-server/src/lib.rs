mod config;
mod relay;
mod server;
mod signaling;

pub use config::RelayConfig;
pub use relay::*;
pub use server::{router, serve, serve_on, spawn_relay};
pub use signaling::*;
