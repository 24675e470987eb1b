//! wasm-bindgen surface.

mod dom;
mod events;
mod logging;
mod xterm;

use std::rc::Rc;

use js_sys::{Function, JSON};
use serde_json::{json, Value};
use tracing::warn;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;
use webterm_common::WebtermError;
use webterm_session::{SessionHost, SessionOptions, TerminalSession};

use crate::convert::{binary_string_to_bytes, config_from_json, timeout_from_millis};
use dom::DomHost;
use events::{WindowResizeSignal, WindowScheduler};
use xterm::{json_to_js, XtermWidget};

#[cfg(test)]
wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// JSON text of a JS value, or `None` for `undefined`.
fn stringify(value: &JsValue) -> Result<Option<String>, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(None);
    }
    Ok(JSON::stringify(value)?.as_string())
}

/// A terminal session rendered by xterm.js inside a container element.
#[wasm_bindgen]
pub struct WebTerminal {
    session: Option<TerminalSession>,
}

#[wasm_bindgen]
impl WebTerminal {
    /// Open a terminal in `container`. `config` is an optional object with
    /// the same sections as the TOML config file.
    #[wasm_bindgen(constructor)]
    pub fn new(container: HtmlElement, config: JsValue) -> Result<WebTerminal, JsValue> {
        let config = config_from_json(stringify(&config)?.as_deref()).map_err(js_error)?;
        logging::init(config.logging.level);

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
        let surface = DomHost::new(container.clone(), &config.overlay.class_name)?;
        let host = SessionHost::new(
            Rc::new(surface),
            Rc::new(WindowResizeSignal::new(window)),
            Rc::new(WindowScheduler::new()),
        );
        let widget = Rc::new(XtermWidget::new(container));

        let session = TerminalSession::open(widget, host, SessionOptions::from_config(&config));
        Ok(Self {
            session: Some(session),
        })
    }

    fn session(&self) -> Result<&TerminalSession, JsValue> {
        self.session
            .as_ref()
            .ok_or_else(|| js_error(WebtermError::Session("terminal is closed".into())))
    }

    fn session_mut(&mut self) -> Result<&mut TerminalSession, JsValue> {
        self.session
            .as_mut()
            .ok_or_else(|| js_error(WebtermError::Session("terminal is closed".into())))
    }

    /// `{ columns, rows }` of the current grid.
    pub fn info(&self) -> Result<JsValue, JsValue> {
        let dims = self.session()?.info();
        json_to_js(&json!({ "columns": dims.columns, "rows": dims.rows }))
    }

    /// Write a chunk of raw output bytes.
    pub fn output(&mut self, data: &[u8]) -> Result<(), JsValue> {
        self.session_mut()?.output(data).map_err(js_error)
    }

    /// Write output delivered as a binary string (one byte per char).
    #[wasm_bindgen(js_name = outputBinaryString)]
    pub fn output_binary_string(&mut self, data: &str) -> Result<(), JsValue> {
        let bytes = binary_string_to_bytes(data);
        self.session_mut()?.output(&bytes).map_err(js_error)
    }

    /// Show `message` over the terminal. A timeout of zero or less keeps it
    /// up until it is replaced or removed.
    #[wasm_bindgen(js_name = showMessage)]
    pub fn show_message(&self, message: &str, timeout: f64) -> Result<(), JsValue> {
        self.session()?
            .show_message(message, timeout_from_millis(timeout));
        Ok(())
    }

    #[wasm_bindgen(js_name = removeMessage)]
    pub fn remove_message(&self) -> Result<(), JsValue> {
        self.session()?.remove_message();
        Ok(())
    }

    #[wasm_bindgen(js_name = setWindowTitle)]
    pub fn set_window_title(&self, title: &str) -> Result<(), JsValue> {
        self.session()?.set_window_title(title);
        Ok(())
    }

    /// Apply a preference object. Returns `{ applied, ignored, rejected }`;
    /// an error thrown by the terminal while setting an option is rethrown.
    #[wasm_bindgen(js_name = setPreferences)]
    pub fn set_preferences(&mut self, value: JsValue) -> Result<JsValue, JsValue> {
        let text = stringify(&value)?.unwrap_or_else(|| "null".into());
        let bag: Value = serde_json::from_str(&text).map_err(js_error)?;
        let report = self.session_mut()?.set_preferences(&bag).map_err(js_error)?;

        let rejected: Vec<String> = report.rejected.iter().map(ToString::to_string).collect();
        json_to_js(&json!({
            "applied": report.len(),
            "ignored": report.ignored,
            "rejected": rejected,
        }))
    }

    /// Call `callback(data)` for every unit of keystroke or paste data.
    #[wasm_bindgen(js_name = onInput)]
    pub fn on_input(&self, callback: Function) -> Result<(), JsValue> {
        self.session()?.on_input(move |data| {
            if let Err(e) = callback.call1(&JsValue::NULL, &JsValue::from_str(data)) {
                warn!(error = ?e, "input callback threw");
            }
        });
        Ok(())
    }

    /// Call `callback(columns, rows)` whenever the grid size changes.
    #[wasm_bindgen(js_name = onResize)]
    pub fn on_resize(&self, callback: Function) -> Result<(), JsValue> {
        self.session()?.on_resize(move |cols, rows| {
            let result = callback.call2(
                &JsValue::NULL,
                &JsValue::from(cols),
                &JsValue::from(rows),
            );
            if let Err(e) = result {
                warn!(error = ?e, "resize callback threw");
            }
        });
        Ok(())
    }

    pub fn deactivate(&self) -> Result<(), JsValue> {
        self.session()?.deactivate();
        Ok(())
    }

    pub fn reset(&self) -> Result<(), JsValue> {
        self.session()?.reset();
        Ok(())
    }

    /// Remove the window resize listener and dispose the terminal.
    pub fn close(&mut self) {
        if let Some(session) = self.session.take() {
            session.close();
        }
    }
}
