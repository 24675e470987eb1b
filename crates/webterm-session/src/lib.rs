//! Terminal session management for webterm.
//!
//! Wraps an xterm-like widget with:
//! - Open/close lifecycle bound to a host container
//! - Fit-and-notify on every viewport resize (size shown in an overlay)
//! - Overlay messages with a single auto-hide timer
//! - Streaming UTF-8 decoding of session output
//! - Preference bags mapped onto widget options and one assembled theme
//!
//! The widget and the host are collaborators behind traits, so the same
//! session drives a browser terminal or the in-memory [`headless`] one.

pub mod decoder;
pub mod headless;
pub mod host;
pub mod overlay;
pub mod session;
pub mod theme;
pub mod timer;
pub mod viewport;
pub mod widget;

pub use decoder::Utf8StreamDecoder;
pub use host::{HostSurface, ListenerId, Scheduler, SessionHost, TimerId, ViewportSignal};
pub use overlay::Overlay;
pub use session::{SessionError, SessionOptions, TerminalSession};
pub use theme::{Theme, ThemeBuffers};
pub use timer::TimerQueue;
pub use viewport::ResizeSignal;
pub use widget::{Addon, TerminalWidget, WidgetError, WidgetOption};
