//! # RAPT Protocol
//!
//! **R**eliable **A**cknowledged **P**acket **T**ransfer
//!
//! RAPT is a stop-and-wait delivery protocol for sending variable-length
//! application payloads to a hardware device over an unreliable, half-duplex
//! byte-stream connection (e.g., serial). It provides:
//!
//! - **Ordering**: packets are transmitted strictly in encoder order; a
//!   packet's acknowledgment outcome is always known before the next write
//! - **Bounded waits**: every acknowledgment wait is capped by the protocol
//!   version's timeout table
//! - **Retry policy**: recoverable failures are retried per packet, while
//!   connection-fatal failures abort the whole operation immediately
//! - **Clean settlement**: one outcome per packet attempt, with no timers or
//!   event subscriptions outliving it
//!
//! The connection and the packet-framing scheme are external collaborators,
//! consumed through the [`core::Connection`] and [`core::PacketEncoder`]
//! traits. RAPT only orchestrates transmission and acknowledgment.
//!
//! ## Modules
//!
//! - [`core`]: version tables, error taxonomy, packet unit, collaborator traits
//! - [`transport`]: single-packet transmission with acknowledgment
//! - [`command`]: sequential command delivery with retry policy
//! - [`link`]: high-level [`DeviceLink`] handle
//!
//! ## Example Usage
//!
//! ```no_run
//! use rapt_protocol::prelude::*;
//! use tokio::sync::broadcast;
//!
//! // A connection backed by your serial transport.
//! struct SerialPort {
//!     events: broadcast::Sender<LinkEvent>,
//! }
//!
//! impl Connection for SerialPort {
//!     fn is_connected(&self) -> bool {
//!         true
//!     }
//!
//!     async fn write(&self, data: &[u8]) -> Result<(), LinkError> {
//!         // Hand the bytes to the transport here.
//!         let _ = data;
//!         Ok(())
//!     }
//!
//!     fn subscribe(&self) -> broadcast::Receiver<LinkEvent> {
//!         self.events.subscribe()
//!     }
//! }
//!
//! // An encoder framing payloads into fixed-size packets.
//! struct FixedFrameEncoder {
//!     frame: usize,
//! }
//!
//! impl PacketEncoder for FixedFrameEncoder {
//!     fn encode(
//!         &self,
//!         payload: &[u8],
//!         _command: u8,
//!         _version: ProtocolVersion,
//!     ) -> Result<Vec<Packet>, EncodeError> {
//!         Ok(payload
//!             .chunks(self.frame)
//!             .map(|chunk| Packet::new(chunk.to_vec()))
//!             .collect())
//!     }
//! }
//!
//! async fn run(port: SerialPort) -> Result<(), LinkError> {
//!     let link = DeviceLink::new(port, FixedFrameEncoder { frame: 64 })
//!         .with_version(ProtocolVersion::V2);
//!     link.send(0x15, b"application payload").await
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod command;
pub mod core;
pub mod link;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::command::*;
    pub use crate::core::*;
    pub use crate::link::*;
    pub use crate::transport::*;
}

// Re-export commonly used items at crate root
pub use crate::command::CommandSender;
pub use crate::core::{
    AckRecord, CONTROL_COMMAND, CommandCodes, Connection, DEFAULT_MAX_TRIES, EncodeError,
    LinkConstants, LinkError, LinkEvent, Packet, PacketEncoder, ProtocolVersion,
};
pub use crate::link::DeviceLink;
pub use crate::transport::write_packet;
