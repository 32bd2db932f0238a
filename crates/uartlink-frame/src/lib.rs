//! Opcode-prefixed, length-delimited command framing for uartlink.
//!
//! Every outbound command is framed with:
//! - A 1-byte opcode identifying the command class
//! - A 4-byte big-endian payload length, equal to the payload byte count
//!   exactly
//!
//! The inbound direction of the bridge is deliberately unframed (device
//! output is opaque bytes); decoding exists for tests and tooling.

pub mod codec;
pub mod error;
pub mod opcode;
pub mod writer;

pub use codec::{decode_frame, encode_frame, Frame, HEADER_SIZE, MAX_PAYLOAD};
pub use error::{FrameError, Result};
pub use opcode::SEND_FILE;
pub use writer::FrameWriter;
