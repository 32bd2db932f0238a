use std::io::{Read, Write};
use std::time::Duration;

use serialport::{DataBits, FlowControl, Parity, SerialPort, StopBits};
use tracing::{debug, info};

use crate::error::{Result, SerialError};

/// Read/write timeout applied to the open port. Reads wake up at this
/// cadence when the device is quiet; data arriving earlier is returned
/// immediately.
pub const PORT_TIMEOUT: Duration = Duration::from_secs(8);

/// One half of the full-duplex serial port — implements Read + Write.
///
/// Cloning duplicates the underlying handle so one half can drain inbound
/// bytes while the other writes frames, without any shared locking.
pub struct SerialStream {
    inner: Box<dyn SerialPort>,
}

impl SerialStream {
    fn new(inner: Box<dyn SerialPort>) -> Self {
        Self { inner }
    }

    /// Duplicate the underlying port handle.
    pub fn try_clone(&self) -> Result<Self> {
        let cloned = self
            .inner
            .try_clone()
            .map_err(|err| SerialError::Io(err.into()))?;
        Ok(Self::new(cloned))
    }

    /// The port identifier, if the driver reports one.
    pub fn port_name(&self) -> Option<String> {
        self.inner.name()
    }
}

impl Read for SerialStream {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.inner.read(buf)
    }
}

impl Write for SerialStream {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.inner.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}

impl std::fmt::Debug for SerialStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerialStream")
            .field("port", &self.inner.name())
            .finish()
    }
}

/// An open serial session: the port split into an inbound source and an
/// outbound sink. At most one session exists per process.
///
/// Teardown is by drop; dropping the sink first and the source last closes
/// the descriptor after the final half goes away.
pub struct Session {
    source: SerialStream,
    sink: SerialStream,
    port_name: String,
}

impl Session {
    /// Locate and open `name` at `baud` with 8 data bits, 1 stop bit, no
    /// parity, and no flow control.
    ///
    /// The port must appear in the system enumeration under exactly this
    /// identifier; a missing port is `PortNotFound`, a held port is
    /// `PortBusy`, and a driver that rejects the line parameters is
    /// `BadLineParams`.
    pub fn open(name: &str, baud: u32) -> Result<Self> {
        let ports = serialport::available_ports().map_err(SerialError::Enumerate)?;
        if !ports.iter().any(|p| p.port_name == name) {
            return Err(SerialError::PortNotFound { name: name.into() });
        }
        info!(port = %name, baud, "found serial port");

        let port = serialport::new(name, baud)
            .data_bits(DataBits::Eight)
            .stop_bits(StopBits::One)
            .parity(Parity::None)
            .flow_control(FlowControl::None)
            .timeout(PORT_TIMEOUT)
            .open()
            .map_err(|err| map_open_error(name, err))?;

        let source = SerialStream::new(port);
        let sink = source.try_clone()?;
        debug!(port = %name, "serial port opened and split");

        Ok(Self {
            source,
            sink,
            port_name: name.into(),
        })
    }

    /// The identifier this session was opened with.
    pub fn port_name(&self) -> &str {
        &self.port_name
    }

    /// Split into `(source, sink)`: the inbound byte source and the
    /// outbound byte sink.
    pub fn into_split(self) -> (SerialStream, SerialStream) {
        (self.source, self.sink)
    }
}

fn map_open_error(name: &str, err: serialport::Error) -> SerialError {
    match err.kind() {
        serialport::ErrorKind::NoDevice => SerialError::PortBusy {
            name: name.into(),
            source: err,
        },
        serialport::ErrorKind::InvalidInput => SerialError::BadLineParams {
            name: name.into(),
            source: err,
        },
        serialport::ErrorKind::Io(kind)
            if matches!(
                kind,
                std::io::ErrorKind::PermissionDenied | std::io::ErrorKind::ResourceBusy
            ) =>
        {
            SerialError::PortBusy {
                name: name.into(),
                source: err,
            }
        }
        _ => SerialError::Open {
            name: name.into(),
            source: err,
        },
    }
}
