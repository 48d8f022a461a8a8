//! The opaque wire packet unit.

/// One already-encoded unit of wire data.
///
/// Produced by a [`PacketEncoder`](super::traits::PacketEncoder) and written
/// to the device verbatim. The transport never inspects the contents.
#[derive(Clone, PartialEq, Eq)]
pub struct Packet(Vec<u8>);

impl Packet {
    /// Wrap encoded bytes as a packet.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// The raw bytes to put on the wire.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Packet length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the packet is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for Packet {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Packet {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Debug for Packet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Packet").field(&hex_preview(&self.0)).finish()
    }
}

fn hex_preview(bytes: &[u8]) -> String {
    if bytes.len() <= 8 {
        bytes.iter().map(|b| format!("{:02x}", b)).collect()
    } else {
        format!(
            "{}..{}b",
            bytes[..4]
                .iter()
                .map(|b| format!("{:02x}", b))
                .collect::<String>(),
            bytes.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packet_bytes() {
        let packet = Packet::new(vec![0x10, 0x20, 0x30]);
        assert_eq!(packet.as_bytes(), &[0x10, 0x20, 0x30]);
        assert_eq!(packet.len(), 3);
        assert!(!packet.is_empty());
    }

    #[test]
    fn test_debug_preview_is_bounded() {
        let short = Packet::new(vec![0xAB; 4]);
        assert_eq!(format!("{:?}", short), "Packet(\"abababab\")");

        let long = Packet::new(vec![0xCD; 64]);
        let rendered = format!("{:?}", long);
        assert!(rendered.contains("cdcdcdcd.."));
        assert!(rendered.len() < 40);
    }
}
