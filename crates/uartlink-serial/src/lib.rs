//! Serial line adapter for uartlink.
//!
//! Wraps a platform serial port as a pair of byte streams with fixed 8/N/1
//! line parameters. Purely a capability layer: no knowledge of the command
//! protocol lives here.

pub mod error;
pub mod session;

pub use error::{Result, SerialError};
pub use session::{SerialStream, Session, PORT_TIMEOUT};
