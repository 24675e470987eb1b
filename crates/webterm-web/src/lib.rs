#![forbid(unsafe_code)]

//! Browser front end for webterm.
//!
//! Exposes `WebTerminal` to JavaScript. It wraps a [`webterm_session::TerminalSession`]
//! around an xterm.js `Terminal`, with the overlay node, window resize
//! listener and timers provided by the DOM.
//!
//! The value conversions used at the JS boundary live in [`convert`] and
//! build on every target, so they are tested natively.

pub mod convert;

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::WebTerminal;
