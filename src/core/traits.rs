//! Core traits for the RAPT protocol.
//!
//! These traits are the seams to the two external collaborators: the
//! half-duplex connection carrying bytes to the device, and the encoder
//! that frames payloads into wire packets.

use std::future::Future;

use tokio::sync::broadcast;

use super::constants::ProtocolVersion;
use super::error::{EncodeError, LinkError};
use super::packet::Packet;

/// A decoded acknowledgment record received from the device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AckRecord {
    /// Command code carried by the acknowledgment. Compared against the
    /// version's ACK/NACK table to classify the reply.
    pub command: u8,
    /// Any bytes accompanying the acknowledgment.
    pub data: Vec<u8>,
}

impl AckRecord {
    /// Create an acknowledgment record with no accompanying bytes.
    pub fn new(command: u8) -> Self {
        Self {
            command,
            data: Vec::new(),
        }
    }
}

/// A notification emitted by the connection's event stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkEvent {
    /// The device sent an acknowledgment-type record.
    Ack(AckRecord),
    /// The connection closed, optionally with a reason.
    Closed(Option<String>),
}

/// A half-duplex byte-stream connection to a device.
///
/// The protocol core holds a connection only for the duration of one send
/// operation. It reads connectivity, writes packet bytes, and subscribes to
/// the event stream; it never opens or closes the connection itself.
///
/// # Event stream
///
/// [`Connection::subscribe`] returns a fresh [`broadcast::Receiver`] that
/// observes only events emitted after the call. The packet transport
/// subscribes once per write attempt, before issuing the write, and drops
/// the receiver when the attempt settles. That scoping is what correlates
/// acknowledgments with the in-flight packet: a stale reply to an earlier
/// packet can never reach a later attempt's receiver.
///
/// # Errors
///
/// `write` reports failures as [`LinkError`] so implementations can
/// distinguish a dead transport ([`LinkError::ConnectionNotOpen`],
/// [`LinkError::NotConnected`]) from a recoverable write fault.
/// Implementations backed by `std::io` can lean on
/// `From<std::io::Error> for LinkError` for the classification.
pub trait Connection {
    /// Whether a device is currently connected.
    fn is_connected(&self) -> bool;

    /// Write raw packet bytes to the device.
    fn write(&self, data: &[u8]) -> impl Future<Output = Result<(), LinkError>> + Send;

    /// Subscribe to the connection's event stream.
    fn subscribe(&self) -> broadcast::Receiver<LinkEvent>;
}

/// Frames a payload into an ordered list of wire packets.
///
/// Encoding is pure: the same inputs always produce the same packet list,
/// and no I/O happens here. The packet wire layout is entirely the
/// encoder's business; the transport treats each [`Packet`] as an opaque
/// blob to write verbatim.
pub trait PacketEncoder {
    /// Encode `payload` for `command` under `version`.
    ///
    /// The returned order is the transmission order.
    fn encode(
        &self,
        payload: &[u8],
        command: u8,
        version: ProtocolVersion,
    ) -> Result<Vec<Packet>, EncodeError>;
}
