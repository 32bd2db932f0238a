/// Errors that can occur while locating or opening the serial port.
#[derive(Debug, thiserror::Error)]
pub enum SerialError {
    /// Enumerating the system's serial ports failed.
    #[error("failed to enumerate serial ports: {0}")]
    Enumerate(#[source] serialport::Error),

    /// No port with the requested identifier exists.
    #[error("serial port {name} not found")]
    PortNotFound { name: String },

    /// Another process holds the port open.
    #[error("serial port {name} is in use: {source}")]
    PortBusy {
        name: String,
        source: serialport::Error,
    },

    /// The driver rejected the 8/N/1 line parameters or the baud rate.
    #[error("serial port {name} rejected line parameters: {source}")]
    BadLineParams {
        name: String,
        source: serialport::Error,
    },

    /// Opening the port failed for another reason.
    #[error("failed to open serial port {name}: {source}")]
    Open {
        name: String,
        source: serialport::Error,
    },

    /// An I/O error occurred on the open port.
    #[error("serial I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SerialError>;
