//! Shared test helpers.

use std::{
    io,
    sync::{Arc, Mutex, PoisonError},
};
use tracing::Level;

///
/// CapturedWriter
/// `io::Write` sink that appends into a shared buffer.
///

#[derive(Clone, Default)]
struct CapturedWriter(Arc<Mutex<Vec<u8>>>);

impl io::Write for CapturedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);

        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` with a thread-local subscriber at DEBUG and return every
/// formatted event it emitted.
pub(crate) fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, String) {
    let writer = CapturedWriter::default();
    let buffer = Arc::clone(&writer.0);

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_ansi(false)
        .without_time()
        .with_writer(move || writer.clone())
        .finish();

    let result = tracing::subscriber::with_default(subscriber, f);
    let bytes = buffer.lock().unwrap_or_else(PoisonError::into_inner).clone();

    (result, String::from_utf8_lossy(&bytes).into_owned())
}
