//! Helpers shared by the unit tests.

use std::io;
use std::sync::{Arc, Mutex};

use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` with every event on this thread, down to `TRACE`, formatted into
/// a buffer. Returns the closure's result and the captured log text.
pub(crate) fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, String) {
    let buffer = SharedBuffer::default();
    let writer = buffer.clone();

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_level(true)
            .with_target(true),
    );

    let result = ::tracing::subscriber::with_default(subscriber, f);
    let logs = String::from_utf8_lossy(&buffer.0.lock().unwrap()).into_owned();
    (result, logs)
}
