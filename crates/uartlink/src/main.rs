mod command;
mod exit;
mod logging;
mod printer;
mod sender;

use std::io;
use std::sync::mpsc;
use std::thread;

use clap::error::ErrorKind as ClapErrorKind;
use clap::Parser;
use tracing::{debug, info};
use uartlink_frame::FrameWriter;
use uartlink_serial::Session;

use crate::command::Request;
use crate::exit::{CliResult, FATAL, SUCCESS};
use crate::logging::{init_logging, LogFormat, LogLevel};

#[derive(Parser, Debug)]
#[command(
    name = "uartlink",
    version,
    about = "Host-side UART bridge: frames operator commands for a device and hex-dumps its replies"
)]
struct Cli {
    /// Serial port to open (e.g. /dev/ttyUSB0).
    port: String,

    /// Baud rate. Line parameters are fixed at 8 data bits, 1 stop bit,
    /// no parity.
    baud: u32,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(long, value_name = "LEVEL", default_value = "warn")]
    log_level: LogLevel,
}

fn main() {
    let cli = parse_args();
    init_logging(cli.log_format, cli.log_level);

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

fn parse_args() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if err.kind() == ClapErrorKind::MissingRequiredArgument => {
            eprintln!("You need two arguments: the port name, and the baud rate!");
            std::process::exit(FATAL);
        }
        Err(err) => err.exit(),
    }
}

fn run(cli: Cli) -> CliResult<i32> {
    let session = Session::open(&cli.port, cli.baud)
        .map_err(|err| exit::serial_error("failed to open serial port", err))?;
    info!(port = %cli.port, baud = cli.baud, "serial session established");

    let (source, sink) = session.into_split();
    let (requests, worker_requests) = mpsc::sync_channel::<Request>(1);

    // Inbound drain. Detached: a broken link exits the process from inside
    // the thread, and clean shutdown leaves it blocked on the port.
    thread::Builder::new()
        .name("uartlink-printer".into())
        .spawn(move || {
            let stdout = io::stdout();
            if let Err(err) = printer::pump(source, stdout.lock()) {
                eprintln!(
                    "Error occurred reading data from the device, or the device was disconnected: {err}\nStopping..."
                );
                std::process::exit(FATAL);
            }
        })
        .map_err(|err| exit::io_error("failed to start inbound printer", err))?;

    let worker = thread::Builder::new()
        .name("uartlink-sender".into())
        .spawn(move || sender::run(worker_requests, FrameWriter::new(sink)))
        .map_err(|err| exit::io_error("failed to start sending worker", err))?;

    let stdin = io::stdin();
    let parsed = command::run(stdin.lock(), &requests);

    // End-of-input: closing the request channel lets the worker finish the
    // request it holds and exit. In-flight inbound bytes are not drained.
    drop(requests);
    let _ = worker.join();
    debug!("shutdown complete");

    parsed.map_err(|err| exit::io_error("failed reading standard input", err))?;
    Ok(SUCCESS)
}
