use std::net::SocketAddr;
use std::path::PathBuf;

/// Settings for the signaling relay process.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Address the HTTP/WebSocket listener binds to.
    pub bind_address: SocketAddr,
    /// Directory with the browser client, served for every non-`/ws` path.
    pub static_dir: Option<PathBuf>,
    /// Capacity of the relay command queue.
    pub command_buffer: usize,
}

impl RelayConfig {
    pub const DEFAULT_PORT: u16 = 3000;

    pub fn with_port(port: u16) -> Self {
        Self {
            bind_address: SocketAddr::from(([0, 0, 0, 0], port)),
            ..Self::default()
        }
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([0, 0, 0, 0], Self::DEFAULT_PORT)),
            static_dir: None,
            command_buffer: 256,
        }
    }
}
