//! RAPT Protocol - Core Layer
//!
//! Version tables, the error taxonomy, the opaque packet unit, and the
//! traits that connect the protocol to its two external collaborators
//! (the device connection and the packet encoder).

mod constants;
mod error;
mod packet;
mod traits;

pub use constants::*;
pub use error::*;
pub use packet::*;
pub use traits::*;
