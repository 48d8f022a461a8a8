//! RAPT Protocol - Command Sender Layer
//!
//! Turns a raw payload into an ordered packet list via the external encoder
//! and drives the packet transport over it sequentially, applying the
//! per-packet retry policy.

mod sender;

pub use sender::*;
