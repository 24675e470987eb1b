//! Session assembly for the headless binary.

use std::fs;
use std::io::Write;
use std::path::Path;
use std::rc::Rc;

use serde_json::Value;
use tracing::{info, warn};
use webterm_common::{PixelSize, Result, WebtermError};
use webterm_config::WebtermConfig;
use webterm_session::headless::{HeadlessHost, HeadlessWidget};
use webterm_session::{ResizeSignal, SessionHost, SessionOptions, TerminalSession, TimerQueue};

/// A running session plus the host pieces the event loop drives.
pub struct Booted {
    pub session: TerminalSession,
    pub host: Rc<HeadlessHost>,
    pub timers: Rc<TimerQueue>,
    pub viewport: Rc<ResizeSignal>,
}

/// Open a headless session over a container of `container` pixels whose
/// widget writes to `sink`.
pub fn boot(config: &WebtermConfig, container: PixelSize, sink: Box<dyn Write>) -> Booted {
    let host = Rc::new(HeadlessHost::new(container));
    let timers = Rc::new(TimerQueue::new());
    let viewport = Rc::new(ResizeSignal::new());
    let widget = Rc::new(HeadlessWidget::new(Rc::clone(&host), sink));

    let session = TerminalSession::open(
        widget,
        SessionHost::new(host.clone(), viewport.clone(), timers.clone()),
        SessionOptions::from_config(config),
    );
    session.on_resize(|cols, rows| info!(cols, rows, "grid resized"));

    Booted {
        session,
        host,
        timers,
        viewport,
    }
}

/// Read a preference bag from a JSON file.
pub fn load_preferences(path: &Path) -> Result<Value> {
    let text = fs::read_to_string(path)?;
    serde_json::from_str(&text)
        .map_err(|e| WebtermError::Other(format!("{}: invalid JSON: {e}", path.display())))
}

/// Apply a preference file to the session, logging what was skipped.
pub fn apply_preferences_file(session: &mut TerminalSession, path: &Path) -> Result<()> {
    let bag = load_preferences(path)?;
    let report = session.set_preferences(&bag)?;
    for key in &report.ignored {
        warn!(key = %key, "unknown preference ignored");
    }
    info!(
        path = %path.display(),
        applied = report.len(),
        rejected = report.rejected.len(),
        "preferences loaded"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
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

    #[test]
    fn boot_opens_and_shows_size() {
        let (booted, _) = booted();
        assert_eq!(booted.session.info().to_string(), "80x24");
        assert_eq!(booted.host.overlay_text(), "80x24");
        assert_eq!(booted.viewport.listener_count(), 1);
        assert_eq!(booted.timers.pending(), 1);
    }

    #[test]
    fn preferences_file_is_applied() {
        let (mut booted, _) = booted();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(
            &path,
            json!({ "width": 100, "foreground-color": "#ddd", "mystery": 1 }).to_string(),
        )
        .unwrap();

        apply_preferences_file(&mut booted.session, &path).unwrap();
        assert_eq!(booted.session.info().columns, 100);
        assert_eq!(booted.session.theme().foreground.as_deref(), Some("#ddd"));
    }

    #[test]
    fn missing_preferences_file_is_io_error() {
        let (mut booted, _) = booted();
        let err = apply_preferences_file(&mut booted.session, Path::new("/nonexistent/p.json"))
            .unwrap_err();
        assert!(matches!(err, WebtermError::Io(_)));
    }

    #[test]
    fn non_object_preferences_file_is_rejected() {
        let (mut booted, _) = booted();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "[1, 2]").unwrap();

        let err = apply_preferences_file(&mut booted.session, &path).unwrap_err();
        assert!(matches!(err, WebtermError::Preference(_)));
    }
}
