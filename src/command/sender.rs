//! Command delivery: payload → packets → sequential acknowledged writes.
//!
//! All retry policy lives here. The packet transport below never retries;
//! each [`write_packet`] call is exactly one attempt.

use tracing::{debug, trace, warn};

use crate::core::{
    CONTROL_COMMAND, Connection, DEFAULT_MAX_TRIES, LinkError, Packet, PacketEncoder,
    ProtocolVersion,
};
use crate::transport::write_packet;

/// Sends complete commands to the device, packet by packet.
///
/// A send operation is all-or-nothing: it resolves with success once every
/// packet has been acknowledged, or with the first terminal error. Packets
/// are transmitted strictly in encoder order; a packet's outcome is always
/// known before the next write begins.
#[derive(Debug, Clone)]
pub struct CommandSender {
    /// Per-packet attempt budget.
    max_tries: u32,
}

impl CommandSender {
    /// Create a sender with the default attempt budget.
    pub fn new() -> Self {
        Self {
            max_tries: DEFAULT_MAX_TRIES,
        }
    }

    /// Create a sender with a custom per-packet attempt budget.
    ///
    /// A budget of zero is treated as one attempt.
    pub fn with_max_tries(max_tries: u32) -> Self {
        Self {
            max_tries: max_tries.max(1),
        }
    }

    /// The configured per-packet attempt budget.
    pub fn max_tries(&self) -> u32 {
        self.max_tries
    }

    /// Encode `payload` for `command` and deliver every packet in order.
    ///
    /// Recoverable failures (timeout, write error, NACK) are retried up to
    /// the attempt budget; if a packet exhausts its budget, the first error
    /// it saw is propagated. Connection-fatal failures abort immediately:
    /// no further attempts for the current packet, no subsequent packets.
    ///
    /// [`CONTROL_COMMAND`] is assumed non-idempotent and is never retried,
    /// regardless of the configured budget.
    pub async fn send_data<C, E>(
        &self,
        conn: &C,
        encoder: &E,
        command: u8,
        payload: &[u8],
        version: ProtocolVersion,
    ) -> Result<(), LinkError>
    where
        C: Connection,
        E: PacketEncoder,
    {
        let packets = encoder.encode(payload, command, version)?;
        debug!(command, count = packets.len(), "encoded payload into packets");

        let budget = if command == CONTROL_COMMAND {
            1
        } else {
            self.max_tries
        };

        for (index, packet) in packets.iter().enumerate() {
            if let Err(err) = deliver_packet(conn, packet, version, budget).await {
                warn!(command, index, error = %err, "send aborted");
                return Err(err);
            }
        }

        debug!(command, "all packets delivered");
        Ok(())
    }
}

impl Default for CommandSender {
    fn default() -> Self {
        Self::new()
    }
}

/// Retry fold for a single packet.
///
/// Folds over the attempt budget, accumulating the first error seen. Later
/// attempts after a failure tend to produce derivative errors (a timeout
/// caused by the same drop), so the first one is the diagnostically useful
/// one. Connection-fatal errors short-circuit the fold and propagate
/// themselves.
async fn deliver_packet<C: Connection>(
    conn: &C,
    packet: &Packet,
    version: ProtocolVersion,
    budget: u32,
) -> Result<(), LinkError> {
    let mut first_error: Option<LinkError> = None;

    for attempt in 1..=budget {
        match write_packet(conn, packet, version).await {
            Ok(()) => return Ok(()),
            Err(err) if err.is_connection_fatal() => {
                debug!(attempt, error = %err, "connection-fatal failure, abandoning retries");
                return Err(err);
            }
            Err(err) => {
                trace!(attempt, budget, error = %err, "packet attempt failed");
                first_error.get_or_insert(err);
            }
        }
    }

    Err(first_error.unwrap_or(LinkError::WriteTimeout))
}
