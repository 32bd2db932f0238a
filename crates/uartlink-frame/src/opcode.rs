//! The outbound opcode table.
//!
//! One byte of opcode space; a single command is allocated today and the
//! rest is reserved for future device commands.

/// Send the contents of a local file to the device.
pub const SEND_FILE: u8 = 0x01;

/// Returns a human-readable name for an opcode.
pub fn opcode_name(opcode: u8) -> &'static str {
    match opcode {
        SEND_FILE => "SEND_FILE",
        _ => "RESERVED",
    }
}

/// Returns true if the opcode has no command assigned yet.
pub fn is_reserved(opcode: u8) -> bool {
    opcode != SEND_FILE
}
