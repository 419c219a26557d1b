//! Connection settings for the game-server client.

use std::time::Duration;

use crate::board::Side;

/// Server port for the white player.
pub const WHITE_PORT: u16 = 5800;

/// Server port for the black player.
pub const BLACK_PORT: u16 = 5801;

/// Default connect/read/write timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Where and how the client connects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub host: String,
    pub port: u16,
    /// The side this player controls.
    pub side: Side,
    /// Applies to connecting as well as to each read and write.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Default settings for a side, on that side's standard port.
    pub fn for_side(side: Side) -> Self {
        ClientConfig {
            side,
            port: Self::default_port(side),
            ..ClientConfig::default()
        }
    }

    /// The server's standard port for a side.
    pub const fn default_port(side: Side) -> u16 {
        match side {
            Side::Defender => WHITE_PORT,
            Side::Attacker => BLACK_PORT,
        }
    }

    /// `host:port` string for resolution.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            host: "localhost".to_string(),
            port: WHITE_PORT,
            side: Side::Defender,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}
