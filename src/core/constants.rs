//! Protocol constants and per-version tables.
//!
//! Each protocol version carries its own timing and command-code table.
//! Tables are immutable and resolved by a match over the closed
//! [`ProtocolVersion`] set, never by runtime lookup in a mutable map.

use std::time::Duration;

// =============================================================================
// COMMANDS
// =============================================================================

/// Reserved control/administrative command.
///
/// Control commands are assumed non-idempotent or time-sensitive, so the
/// command sender disables retries for them (a single attempt per packet).
pub const CONTROL_COMMAND: u8 = 0xFF;

/// Default per-packet attempt budget for the command sender.
pub const DEFAULT_MAX_TRIES: u32 = 5;

// =============================================================================
// PROTOCOL VERSIONS
// =============================================================================

/// Protocol version selector.
///
/// Chooses which constants and command-code table apply to an exchange.
/// The set is closed; an unrecognized wire discriminant falls back to the
/// baseline [`ProtocolVersion::V1`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProtocolVersion {
    /// Baseline protocol version.
    #[default]
    V1,
    /// Extended protocol version with a longer acknowledgment window.
    V2,
}

impl ProtocolVersion {
    /// Resolve a version from its wire discriminant.
    ///
    /// Unknown discriminants resolve to [`ProtocolVersion::V1`].
    pub fn from_wire(byte: u8) -> Self {
        match byte {
            2 => Self::V2,
            _ => Self::V1,
        }
    }

    /// Wire discriminant for this version.
    pub fn as_wire(self) -> u8 {
        match self {
            Self::V1 => 1,
            Self::V2 => 2,
        }
    }

    /// Timing constants for this version.
    pub const fn constants(self) -> &'static LinkConstants {
        match self {
            Self::V1 => &V1_CONSTANTS,
            Self::V2 => &V2_CONSTANTS,
        }
    }

    /// Acknowledgment command codes for this version.
    pub const fn command_codes(self) -> &'static CommandCodes {
        match self {
            Self::V1 => &V1_COMMAND_CODES,
            Self::V2 => &V2_COMMAND_CODES,
        }
    }
}

// =============================================================================
// PER-VERSION TABLES
// =============================================================================

/// Timing constants for one protocol version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkConstants {
    /// How long to wait for a device acknowledgment after writing a packet.
    pub ack_timeout: Duration,
}

/// Acknowledgment command codes for one protocol version.
///
/// These are the wire values carried in the command-code field of a device
/// acknowledgment record. Any other code is not a settlement signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandCodes {
    /// Positive acknowledgment.
    pub ack: u8,
    /// Negative acknowledgment (device rejected the packet).
    pub nack: u8,
}

/// Version 1 timing table.
pub const V1_CONSTANTS: LinkConstants = LinkConstants {
    ack_timeout: Duration::from_millis(2000),
};

/// Version 2 timing table. V2 devices process larger packets and are given a
/// wider acknowledgment window.
pub const V2_CONSTANTS: LinkConstants = LinkConstants {
    ack_timeout: Duration::from_millis(3500),
};

/// Version 1 command codes (ASCII ACK / NAK).
pub const V1_COMMAND_CODES: CommandCodes = CommandCodes { ack: 0x06, nack: 0x15 };

/// Version 2 command codes.
pub const V2_COMMAND_CODES: CommandCodes = CommandCodes { ack: 0x06, nack: 0x15 };
