//! Error types for the RAPT link layer.

use std::io;

use thiserror::Error;

/// Errors that can occur while encoding a payload into packets.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// Payload exceeds the maximum size the encoder can frame.
    #[error("payload exceeds maximum encodable size ({size} > {max})")]
    PayloadTooLarge {
        /// Actual payload size in bytes.
        size: usize,
        /// Maximum the encoder supports.
        max: usize,
    },

    /// Payload rejected by the encoder.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),
}

/// Errors that can occur while delivering packets over the link.
///
/// The command sender classifies these into two groups: connection-fatal
/// errors, where the transport itself is unusable and retrying is futile,
/// and recoverable errors, which are retried up to the attempt budget.
/// See [`LinkError::is_connection_fatal`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LinkError {
    /// No device is present on the link.
    #[error("no device connected")]
    NotConnected,

    /// The connection dropped during the operation.
    #[error("connection closed")]
    ConnectionClosed,

    /// The connection was never opened.
    #[error("connection has not been opened")]
    ConnectionNotOpen,

    /// The packet write failed, or the device rejected the packet (NACK).
    #[error("packet write failed: {0}")]
    WriteFailed(String),

    /// No acknowledgment arrived within the version's timeout.
    #[error("timed out waiting for device acknowledgment")]
    WriteTimeout,

    /// Fallback for unclassified communication failures.
    #[error("communication failure: {0}")]
    Unknown(String),

    /// The payload could not be encoded into packets.
    #[error("encoding failed: {0}")]
    Encode(#[from] EncodeError),
}

impl LinkError {
    /// Whether this error means the transport itself is unusable.
    ///
    /// Connection-fatal errors short-circuit the command sender's retry
    /// budget and abort the remaining packets of the operation.
    pub fn is_connection_fatal(&self) -> bool {
        matches!(
            self,
            Self::NotConnected | Self::ConnectionClosed | Self::ConnectionNotOpen
        )
    }

    /// Whether the command sender may retry after this error.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::WriteFailed(_) | Self::WriteTimeout | Self::Unknown(_)
        )
    }
}

/// Classification of I/O failures reported by a connection implementation.
///
/// Connections that speak `std::io` map their write errors through this so
/// the command sender sees the right retry class: a vanished device surfaces
/// as connection-fatal, everything else as a recoverable write failure.
impl From<io::Error> for LinkError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotConnected => Self::NotConnected,
            io::ErrorKind::BrokenPipe
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::ConnectionReset => Self::ConnectionClosed,
            _ => Self::WriteFailed(err.to_string()),
        }
    }
}
