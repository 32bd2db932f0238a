use std::fs;
use std::io::Write;
use std::sync::mpsc::Receiver;

use tracing::debug;
use uartlink_frame::{FrameWriter, SEND_FILE};

use crate::command::Request;

/// The outbound worker. Blocks on the request channel when idle; exits when
/// the parser drops its end of the channel.
///
/// Per-command failures (unreadable file, oversized payload, write error)
/// are reported and abandoned — only session teardown stops this loop.
pub fn run<W: Write>(requests: Receiver<Request>, mut writer: FrameWriter<W>) {
    while let Ok(request) = requests.recv() {
        match request {
            Request::SendFile { path } => send_file(&mut writer, &path),
        }
    }
    debug!("request channel closed; sender exiting");
}

/// Frame a file's contents under the send-file opcode and commit the frame
/// to the sink as one contiguous write.
fn send_file<W: Write>(writer: &mut FrameWriter<W>, path: &str) {
    let payload = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) => {
            debug!(path, %err, "file read failed");
            eprintln!("Error sending file \"{path}\"!");
            return;
        }
    };

    match writer.send(SEND_FILE, &payload) {
        Ok(()) => debug!(path, bytes = payload.len(), "file sent"),
        Err(err) => {
            debug!(path, %err, "frame write failed");
            eprintln!("Error sending file \"{path}\"!");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::path::PathBuf;
    use std::sync::mpsc::sync_channel;
    use std::sync::{Arc, Mutex};

    use super::*;

    fn temp_file(tag: &str, contents: &[u8]) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "uartlink-sender-{tag}-{}-{}",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .expect("time should be after epoch")
                .as_nanos()
        ));
        std::fs::write(&path, contents).expect("temp file should be writable");
        path
    }

    #[test]
    fn frames_file_contents_exactly() {
        let path = temp_file("hello", b"Hello");
        let mut writer = FrameWriter::new(Cursor::new(Vec::new()));

        send_file(&mut writer, path.to_str().unwrap());

        assert_eq!(
            writer.into_inner().into_inner(),
            vec![0x01, 0x00, 0x00, 0x00, 0x05, 0x48, 0x65, 0x6C, 0x6C, 0x6F]
        );
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn empty_file_frames_as_header_only() {
        let path = temp_file("empty", b"");
        let mut writer = FrameWriter::new(Cursor::new(Vec::new()));

        send_file(&mut writer, path.to_str().unwrap());

        assert_eq!(
            writer.into_inner().into_inner(),
            vec![0x01, 0x00, 0x00, 0x00, 0x00]
        );
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn missing_file_writes_nothing() {
        let mut writer = FrameWriter::new(Cursor::new(Vec::new()));

        send_file(&mut writer, "/definitely/does-not-exist.bin");

        assert!(writer.into_inner().into_inner().is_empty());
    }

    #[test]
    fn oversized_payload_is_abandoned() {
        let path = temp_file("big", b"too big for the cap");
        let mut writer = FrameWriter::with_max_payload(Cursor::new(Vec::new()), 4);

        send_file(&mut writer, path.to_str().unwrap());

        assert!(writer.into_inner().into_inner().is_empty());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn bridge_survives_a_failed_send() {
        let good = temp_file("good", &[0xDE, 0xAD]);
        let mut writer = FrameWriter::new(Cursor::new(Vec::new()));

        send_file(&mut writer, "/definitely/does-not-exist.bin");
        send_file(&mut writer, good.to_str().unwrap());

        assert_eq!(
            writer.into_inner().into_inner(),
            vec![0x01, 0x00, 0x00, 0x00, 0x02, 0xDE, 0xAD]
        );
        let _ = std::fs::remove_file(&good);
    }

    #[test]
    fn run_consumes_requests_in_order_until_channel_closes() {
        let first = temp_file("first", b"a");
        let second = temp_file("second", b"bc");
        let sink = SharedSink::default();
        let wire = Arc::clone(&sink.data);
        let (tx, rx) = sync_channel(1);

        let worker = std::thread::spawn(move || run(rx, FrameWriter::new(sink)));

        tx.send(Request::SendFile {
            path: first.to_string_lossy().into_owned(),
        })
        .unwrap();
        tx.send(Request::SendFile {
            path: second.to_string_lossy().into_owned(),
        })
        .unwrap();
        drop(tx);
        worker.join().unwrap();

        assert_eq!(
            *wire.lock().unwrap(),
            vec![
                0x01, 0x00, 0x00, 0x00, 0x01, b'a', // first
                0x01, 0x00, 0x00, 0x00, 0x02, b'b', b'c', // second
            ]
        );
        let _ = std::fs::remove_file(&first);
        let _ = std::fs::remove_file(&second);
    }

    #[derive(Default)]
    struct SharedSink {
        data: Arc<Mutex<Vec<u8>>>,
    }

    impl Write for SharedSink {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.data.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }
}
