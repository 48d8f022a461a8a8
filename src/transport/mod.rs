//! RAPT Protocol - Packet Transport Layer
//!
//! Sends one already-encoded packet at a time and resolves only after the
//! device acknowledges it or a failure/timeout occurs. This is the only
//! layer that touches the connection directly.
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          Command Sender                 │
//! ├─────────────────────────────────────────┤
//! │         Packet Transport                │  ← This module
//! │   write, scoped ack wait, timeout       │
//! ├─────────────────────────────────────────┤
//! │      Connection (half-duplex link)      │
//! └─────────────────────────────────────────┘
//! ```

mod writer;

pub use writer::*;
