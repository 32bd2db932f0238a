/// Errors that can occur while encoding or writing frames.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The payload exceeds what the 32-bit length field (or a configured
    /// cap) can describe.
    #[error("payload too large ({size} bytes, max {max})")]
    PayloadTooLarge { size: usize, max: usize },

    /// An I/O error occurred while writing a frame.
    #[error("frame I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The sink stopped accepting bytes mid-frame.
    #[error("connection closed (incomplete frame)")]
    ConnectionClosed,
}

pub type Result<T> = std::result::Result<T, FrameError>;
