use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::{FrameError, Result};

/// Frame header: opcode (1) + payload length (4) = 5 bytes.
pub const HEADER_SIZE: usize = 5;

/// The length field is an unsigned 32-bit integer, so a payload can carry
/// at most this many bytes.
pub const MAX_PAYLOAD: usize = u32::MAX as usize;

/// A framed outbound command.
#[derive(Debug, Clone)]
pub struct Frame {
    /// The command class this frame carries.
    pub opcode: u8,
    /// The command payload.
    pub payload: Bytes,
}

impl Frame {
    /// Create a new frame.
    pub fn new(opcode: u8, payload: impl Into<Bytes>) -> Self {
        Self {
            opcode,
            payload: payload.into(),
        }
    }

    /// The total wire size of this frame (header + payload).
    pub fn wire_size(&self) -> usize {
        HEADER_SIZE + self.payload.len()
    }
}

/// Encode a frame into the wire format.
///
/// Wire format:
/// ```text
/// ┌──────────────┬────────────┬──────────────────┐
/// │ Opcode (1B)  │ Length     │ Payload          │
/// │              │ (4B BE)    │ (Length bytes)   │
/// └──────────────┴────────────┴──────────────────┘
/// ```
///
/// The length field always equals the payload byte count exactly.
pub fn encode_frame(opcode: u8, payload: &[u8], dst: &mut BytesMut) -> Result<()> {
    if payload.len() > MAX_PAYLOAD {
        return Err(FrameError::PayloadTooLarge {
            size: payload.len(),
            max: MAX_PAYLOAD,
        });
    }
    dst.reserve(HEADER_SIZE + payload.len());
    dst.put_u8(opcode);
    dst.put_u32(payload.len() as u32);
    dst.put_slice(payload);
    Ok(())
}

/// Decode a frame from a buffer.
///
/// Returns `None` if the buffer doesn't contain a complete frame yet.
/// On success, consumes the frame bytes from the buffer. Every header is
/// decodable — the opcode space has no invalid values on the wire.
pub fn decode_frame(src: &mut BytesMut) -> Option<Frame> {
    if src.len() < HEADER_SIZE {
        return None; // Need more data
    }

    let opcode = src[0];
    let payload_len = u32::from_be_bytes([src[1], src[2], src[3], src[4]]) as usize;

    let total = HEADER_SIZE + payload_len;
    if src.len() < total {
        return None; // Need more data
    }

    src.advance(HEADER_SIZE);
    let payload = src.split_to(payload_len).freeze();

    Some(Frame { opcode, payload })
}
