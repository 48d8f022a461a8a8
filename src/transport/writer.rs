//! Single-packet transmission with acknowledgment.
//!
//! [`write_packet`] is the leaf operation of the protocol: it writes one
//! already-encoded packet and resolves only once the device has settled it,
//! with exactly one of acknowledgment, rejection, close, or timeout. It never
//! retries; retry policy belongs to the command sender.

use tokio::sync::broadcast::error::RecvError;
use tokio::time::{Instant, timeout_at};
use tracing::{debug, trace, warn};

use crate::core::{Connection, LinkError, LinkEvent, Packet, ProtocolVersion};

/// Write one packet and wait for the device to acknowledge it.
///
/// The wait is bounded by the version's acknowledgment timeout and settles
/// on the first of:
///
/// - an acknowledgment carrying the version's ACK code → success;
/// - an acknowledgment carrying the NACK code → [`LinkError::WriteFailed`];
/// - a close notification → [`LinkError::ConnectionClosed`];
/// - a write failure → the connection's error, verbatim;
/// - the timeout elapsing → [`LinkError::WriteTimeout`].
///
/// Acknowledgments with any other command code are not settlement signals
/// and are ignored; the wait stays bounded by the timeout.
///
/// If the connection reports itself disconnected, this fails with
/// [`LinkError::ConnectionClosed`] before issuing any write.
///
/// One invocation produces exactly one outcome. The event subscription is
/// scoped to this call and dropped on every return path, so a reply arriving
/// after settlement lands nowhere and can never be misattributed to a later
/// packet.
pub async fn write_packet<C: Connection>(
    conn: &C,
    packet: &Packet,
    version: ProtocolVersion,
) -> Result<(), LinkError> {
    if !conn.is_connected() {
        return Err(LinkError::ConnectionClosed);
    }

    let constants = version.constants();
    let codes = version.command_codes();

    // Subscribe before writing so a reply racing the write is buffered
    // rather than lost.
    let mut events = conn.subscribe();
    let deadline = Instant::now() + constants.ack_timeout;

    trace!(len = packet.len(), version = ?version, "writing packet");
    conn.write(packet.as_bytes()).await?;

    loop {
        let event = match timeout_at(deadline, events.recv()).await {
            Err(_elapsed) => return Err(LinkError::WriteTimeout),
            Ok(Err(RecvError::Closed)) => return Err(LinkError::ConnectionClosed),
            Ok(Err(RecvError::Lagged(skipped))) => {
                warn!(skipped, "event stream lagged while awaiting acknowledgment");
                continue;
            }
            Ok(Ok(event)) => event,
        };

        match event {
            LinkEvent::Ack(ack) if ack.command == codes.ack => {
                trace!("packet acknowledged");
                return Ok(());
            }
            LinkEvent::Ack(ack) if ack.command == codes.nack => {
                return Err(LinkError::WriteFailed(
                    "device rejected packet (NACK)".into(),
                ));
            }
            // Unrecognized acknowledgment codes are not settlement signals.
            LinkEvent::Ack(ack) => {
                trace!(command = ack.command, "ignoring unrecognized acknowledgment code");
            }
            LinkEvent::Closed(reason) => {
                debug!(?reason, "connection closed while awaiting acknowledgment");
                return Err(LinkError::ConnectionClosed);
            }
        }
    }
}
