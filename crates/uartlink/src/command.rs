use std::io::BufRead;
use std::sync::mpsc::{SyncSender, TrySendError};

use tracing::{debug, warn};

/// A decoded operator command, handed to the sending worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    SendFile { path: String },
}

/// Operator mistakes. The `Display` wording is part of the interface and is
/// printed to stderr verbatim.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Not a valid command!")]
    UnknownVerb,

    #[error("You need to supply a file path to the 'sendfile' command! (No spaces)")]
    MissingPath,
}

/// Parse one input line into a request.
///
/// Lines are tokenised on single ASCII spaces; the first token is the verb.
/// A `sendfile` path containing spaces is truncated at the first space
/// (documented limitation, not an error).
pub fn parse_line(line: &str) -> Result<Request, CommandError> {
    let mut tokens = line.split(' ');
    match tokens.next() {
        Some("sendfile") => match tokens.next() {
            Some(path) if !path.is_empty() => Ok(Request::SendFile { path: path.into() }),
            _ => Err(CommandError::MissingPath),
        },
        _ => Err(CommandError::UnknownVerb),
    }
}

/// Read commands line by line until end-of-input.
///
/// Valid requests go into the single-slot request channel; if the previous
/// request has not been picked up yet the new one is dropped. Operator
/// errors are reported and reading continues. Returning `Ok` means stdin
/// reached EOF, which signals shutdown.
pub fn run<R: BufRead>(input: R, requests: &SyncSender<Request>) -> std::io::Result<()> {
    for line in input.lines() {
        let line = line?;
        let line = line.strip_suffix('\r').unwrap_or(&line);

        match parse_line(line) {
            Ok(request) => match requests.try_send(request) {
                Ok(()) => {}
                Err(TrySendError::Full(request)) => {
                    warn!(?request, "previous send still in flight; request dropped");
                }
                Err(TrySendError::Disconnected(_)) => {
                    debug!("request channel closed; stopping parser");
                    break;
                }
            },
            Err(err) => eprintln!("{err}"),
        }
    }
    Ok(())
}
