//! Routes `tracing` output to the browser console.

use std::io::{self, Write};

use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;
use web_sys::console;
use webterm_config::schema::LogLevel;

/// Buffers one formatted event and logs it as a single console line.
#[derive(Default)]
pub struct ConsoleWriter {
    buf: Vec<u8>,
}

impl Write for ConsoleWriter {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.buf.is_empty() {
            let line = String::from_utf8_lossy(&self.buf);
            console::log_1(&line.trim_end().into());
            self.buf.clear();
        }
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

#[derive(Clone, Copy, Default)]
pub struct MakeConsoleWriter;

impl<'a> MakeWriter<'a> for MakeConsoleWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter::default()
    }
}

/// Install the console subscriber. Later calls are no-ops.
pub fn init(level: LogLevel) {
    console_error_panic_hook::set_once();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level.as_directive()))
        .with_writer(MakeConsoleWriter)
        .with_ansi(false)
        .without_time()
        .try_init();
}
