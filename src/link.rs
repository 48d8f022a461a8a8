//! High-level device link handle.

use tokio::sync::Mutex;

use crate::command::CommandSender;
use crate::core::{Connection, LinkError, PacketEncoder, ProtocolVersion};

/// A handle pairing a connection with an encoder and a protocol version.
///
/// The underlying protocol is half-duplex with one outstanding packet at a
/// time, so a link supports one send operation at a time. Overlapping
/// [`DeviceLink::send`] calls are queued, never interleaved.
///
/// # Example
///
/// ```ignore
/// let link = DeviceLink::new(port, encoder).with_version(ProtocolVersion::V2);
/// link.send(0x15, b"application payload").await?;
/// ```
#[derive(Debug)]
pub struct DeviceLink<C, E> {
    conn: C,
    encoder: E,
    version: ProtocolVersion,
    sender: CommandSender,
    /// Serializes send operations on the half-duplex link.
    op_guard: Mutex<()>,
}

impl<C, E> DeviceLink<C, E>
where
    C: Connection,
    E: PacketEncoder,
{
    /// Create a link speaking the baseline protocol version.
    pub fn new(conn: C, encoder: E) -> Self {
        Self {
            conn,
            encoder,
            version: ProtocolVersion::default(),
            sender: CommandSender::new(),
            op_guard: Mutex::new(()),
        }
    }

    /// Select the protocol version for this link.
    pub fn with_version(mut self, version: ProtocolVersion) -> Self {
        self.version = version;
        self
    }

    /// Override the per-packet attempt budget.
    pub fn with_max_tries(mut self, max_tries: u32) -> Self {
        self.sender = CommandSender::with_max_tries(max_tries);
        self
    }

    /// The protocol version this link speaks.
    pub fn version(&self) -> ProtocolVersion {
        self.version
    }

    /// The underlying connection.
    pub fn connection(&self) -> &C {
        &self.conn
    }

    /// Send a command payload to the device.
    ///
    /// Resolves with success once every packet of the encoded payload has
    /// been acknowledged, or with the first terminal error. If another send
    /// is in flight on this link, this one waits for it to finish first.
    pub async fn send(&self, command: u8, payload: &[u8]) -> Result<(), LinkError> {
        let _op = self.op_guard.lock().await;
        self.sender
            .send_data(&self.conn, &self.encoder, command, payload, self.version)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ChunkEncoder, ScriptedConnection};

    #[tokio::test]
    async fn test_send_through_link() {
        let conn = ScriptedConnection::new();
        conn.push_ack();
        conn.push_ack();

        let link = DeviceLink::new(conn, ChunkEncoder::new(2));
        let result = link.send(21, &[0x10, 0x20, 0x30]).await;

        assert_eq!(result, Ok(()));
        assert_eq!(link.connection().write_count(), 2);
    }

    #[tokio::test]
    async fn test_overlapping_sends_are_serialized() {
        let conn = ScriptedConnection::new();
        for _ in 0..4 {
            conn.push_ack();
        }

        let link = DeviceLink::new(conn, ChunkEncoder::new(2));
        let (a, b) = tokio::join!(
            link.send(21, &[0x01, 0x02, 0x03]),
            link.send(22, &[0x04, 0x05, 0x06]),
        );

        assert_eq!(a, Ok(()));
        assert_eq!(b, Ok(()));
        // Both packets of the first operation hit the wire before any packet
        // of the second.
        assert_eq!(
            link.connection().written(),
            vec![
                vec![0x01, 0x02],
                vec![0x03],
                vec![0x04, 0x05],
                vec![0x06],
            ]
        );
    }

    #[tokio::test]
    async fn test_builder_configuration() {
        let conn = ScriptedConnection::new();
        let link = DeviceLink::new(conn, ChunkEncoder::new(2))
            .with_version(ProtocolVersion::V2)
            .with_max_tries(3);

        assert_eq!(link.version(), ProtocolVersion::V2);
    }
}
