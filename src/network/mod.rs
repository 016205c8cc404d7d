pub mod config;
pub mod network;
pub mod persist;

pub use config::NetworkConfig;
pub use network::Network;
pub use persist::FORMAT_VERSION;
