//! The headless event loop.
//!
//! Output chunks from the reader go through the session; a periodic tick
//! advances the timer queue to wall-clock time so overlay messages expire;
//! window-change signals re-run the fit cycle.

use std::io;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::debug;
use webterm_common::{Result, WebtermError};

use crate::boot::Booted;

const READ_BUF_SIZE: usize = 8192;
const TICK: Duration = Duration::from_millis(50);

/// Pump `reader` into the session until EOF, then close it.
pub async fn run<R>(booted: Booted, mut reader: R) -> Result<()>
where
    R: AsyncRead + Unpin,
{
    let Booted {
        mut session,
        timers,
        viewport,
        ..
    } = booted;

    let start = Instant::now();
    let mut tick = time::interval(TICK);
    tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut window_change = WindowChange::new()?;
    let mut buf = vec![0u8; READ_BUF_SIZE];

    loop {
        tokio::select! {
            read = reader.read(&mut buf) => {
                let n = read?;
                if n == 0 {
                    debug!("output stream ended");
                    break;
                }
                session
                    .output(&buf[..n])
                    .map_err(|e| WebtermError::Session(e.to_string()))?;
            }
            _ = tick.tick() => {
                timers.advance_to(start.elapsed());
            }
            Some(()) = window_change.recv() => {
                debug!("window change");
                viewport.emit();
            }
        }
    }

    session
        .flush_output()
        .map_err(|e| WebtermError::Session(e.to_string()))?;
    timers.advance_to(start.elapsed());
    session.close();
    Ok(())
}

#[cfg(unix)]
struct WindowChange(tokio::signal::unix::Signal);

#[cfg(unix)]
impl WindowChange {
    fn new() -> io::Result<Self> {
        use tokio::signal::unix::{signal, SignalKind};
        Ok(Self(signal(SignalKind::window_change())?))
    }

    async fn recv(&mut self) -> Option<()> {
        self.0.recv().await
    }
}

#[cfg(not(unix))]
struct WindowChange;

#[cfg(not(unix))]
impl WindowChange {
    fn new() -> io::Result<Self> {
        Ok(Self)
    }

    async fn recv(&mut self) -> Option<()> {
        std::future::pending().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boot::boot;
    use webterm_common::PixelSize;
    use webterm_config::WebtermConfig;
    use webterm_session::headless::SharedBuffer;

    fn booted() -> (Booted, SharedBuffer) {
        let buffer = SharedBuffer::new();
        let booted = boot(
            &WebtermConfig::default(),
            PixelSize::new(720.0, 432.0),
            Box::new(buffer.clone()),
        );
        (booted, buffer)
    }

    #[tokio::test(flavor = "current_thread")]
    async fn pumps_stream_to_widget_then_closes() {
        let (booted, buffer) = booted();
        let viewport = booted.viewport.clone();
        let input: &[u8] = "héllo → wörld\r\n".as_bytes();

        run(booted, input).await.unwrap();

        assert_eq!(buffer.contents(), "héllo → wörld\r\n");
        assert_eq!(viewport.listener_count(), 0);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn truncated_stream_ends_with_replacement() {
        let (booted, buffer) = booted();
        let input: &[u8] = b"ok\xe2\x82";

        run(booted, input).await.unwrap();

        assert_eq!(buffer.contents(), "ok\u{fffd}");
    }
}
