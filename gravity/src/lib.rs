pub use gravity_core::{PeerId, RoomId, SignalMessage};

pub mod model {
    pub use gravity_core::*;
}

#[cfg(feature = "server")]
pub mod server {
    pub use gravity_server::*;
}

#[cfg(feature = "client")]
pub mod client {
    pub use gravity_client::*;
}
