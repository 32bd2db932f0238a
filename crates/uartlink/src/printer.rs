use std::io::{ErrorKind, Read, Write};

use tracing::debug;

const READ_CHUNK_SIZE: usize = 4 * 1024;

/// Drain inbound device bytes and render each as two lowercase hex digits
/// on `out`, with no separators and no line breaks.
///
/// Timeouts mean "nothing ready yet" and keep the loop polling; a zero-byte
/// read is end-of-stream and ends the pump cleanly. Any other I/O error is
/// returned to the caller, which treats a broken serial link as fatal.
pub fn pump<R: Read, W: Write>(mut source: R, mut out: W) -> std::io::Result<()> {
    let mut chunk = [0u8; READ_CHUNK_SIZE];
    loop {
        match source.read(&mut chunk) {
            Ok(0) => {
                debug!("inbound stream ended");
                return Ok(());
            }
            Ok(n) => {
                out.write_all(hex::encode(&chunk[..n]).as_bytes())?;
                out.flush()?;
            }
            Err(err)
                if matches!(
                    err.kind(),
                    ErrorKind::TimedOut | ErrorKind::WouldBlock | ErrorKind::Interrupted
                ) =>
            {
                continue;
            }
            Err(err) => return Err(err),
        }
    }
}
