//! Blocking TCP client for the game server.
//!
//! Sends one JSON move object per turn and reads one JSON state object per
//! server update. The evaluation core does not depend on this module.

use std::io::{self, BufReader, Write};
use std::net::{Shutdown, TcpStream, ToSocketAddrs};

use serde::Deserialize;

use super::message::{Move, StateMessage};
use crate::board::{BoardError, BoardState};
use crate::config::ClientConfig;

/// Errors surfaced by the client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("failed to connect to {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error("client is not connected to the server")]
    NotConnected,

    #[error("failed to encode move: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("failed to send move: {0}")]
    Send(#[source] io::Error),

    #[error("failed to receive game state: {0}")]
    Receive(#[source] io::Error),

    #[error("failed to decode game state: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("server sent an invalid board: {0}")]
    InvalidState(#[from] BoardError),

    #[error("server closed the connection")]
    Closed,
}

struct Connection {
    reader: BufReader<TcpStream>,
    writer: TcpStream,
}

/// A player's connection to the game server.
pub struct TablutClient {
    config: ClientConfig,
    conn: Option<Connection>,
}

impl TablutClient {
    /// Creates a disconnected client.
    pub fn new(config: ClientConfig) -> Self {
        TablutClient { config, conn: None }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn is_connected(&self) -> bool {
        self.conn.is_some()
    }

    /// Opens the connection, trying each resolved address in turn.
    pub fn connect(&mut self) -> Result<(), ClientError> {
        let addr = self.config.address();
        let connect_err = |source: io::Error| ClientError::Connect {
            addr: addr.clone(),
            source,
        };

        let mut last_err = io::Error::new(io::ErrorKind::NotFound, "no addresses resolved");
        let mut stream = None;
        for sock in addr.to_socket_addrs().map_err(connect_err)? {
            match TcpStream::connect_timeout(&sock, self.config.timeout) {
                Ok(s) => {
                    stream = Some(s);
                    break;
                }
                Err(e) => last_err = e,
            }
        }
        let stream = stream.ok_or_else(|| connect_err(last_err))?;

        stream
            .set_read_timeout(Some(self.config.timeout))
            .map_err(connect_err)?;
        stream
            .set_write_timeout(Some(self.config.timeout))
            .map_err(connect_err)?;
        let writer = stream.try_clone().map_err(connect_err)?;

        tracing::info!(
            addr = %addr,
            side = self.config.side.color_name(),
            "connected to game server"
        );
        self.conn = Some(Connection {
            reader: BufReader::new(stream),
            writer,
        });
        Ok(())
    }

    /// Sends a move as a single UTF-8 JSON object.
    pub fn send_move(&mut self, mv: &Move) -> Result<(), ClientError> {
        let conn = self.conn.as_mut().ok_or(ClientError::NotConnected)?;
        let payload = serde_json::to_vec(mv).map_err(ClientError::Encode)?;
        conn.writer.write_all(&payload).map_err(ClientError::Send)?;
        conn.writer.flush().map_err(ClientError::Send)?;
        tracing::debug!(from = %mv.from, to = %mv.to, "sent move");
        Ok(())
    }

    /// Blocks until the server sends the next game state.
    ///
    /// A `Decode` error leaves the stream partway through a document, so the
    /// connection is closed and later calls return `NotConnected`.
    pub fn receive_state(&mut self) -> Result<BoardState, ClientError> {
        let decoded = {
            let conn = self.conn.as_mut().ok_or(ClientError::NotConnected)?;
            let mut de = serde_json::Deserializer::from_reader(&mut conn.reader);
            StateMessage::deserialize(&mut de)
        };
        let msg = match decoded {
            Ok(msg) => msg,
            Err(e) if e.is_eof() => return Err(ClientError::Closed),
            Err(e) if e.is_io() => return Err(ClientError::Receive(e.into())),
            Err(e) => {
                tracing::warn!("undecodable state from server: {}", e);
                self.close();
                return Err(ClientError::Decode(e));
            }
        };
        let state = BoardState::try_from(msg)?;
        tracing::debug!(turn = state.turn().code(), "received game state");
        Ok(state)
    }

    /// Shuts the connection down. Closing a disconnected client is a no-op.
    pub fn close(&mut self) {
        if let Some(conn) = self.conn.take() {
            let _ = conn.writer.shutdown(Shutdown::Both);
            tracing::info!("disconnected from game server");
        }
    }
}

impl Drop for TablutClient {
    fn drop(&mut self) {
        self.close();
    }
}
