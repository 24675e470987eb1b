//! xterm.js bindings and the [`TerminalWidget`] implementation over them.

use std::cell::RefCell;

use js_sys::{Object, Reflect, JSON};
use serde_json::Value;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;
use webterm_common::Dimensions;
use webterm_session::widget::{DataCallback, ResizeCallback};
use webterm_session::{Addon, TerminalWidget, WidgetError, WidgetOption};

#[wasm_bindgen(module = "@xterm/xterm")]
extern "C" {
    pub type Terminal;

    #[wasm_bindgen(constructor)]
    pub fn new() -> Terminal;

    #[wasm_bindgen(method, js_name = loadAddon)]
    fn load_addon(this: &Terminal, addon: &JsValue);

    #[wasm_bindgen(method)]
    fn open(this: &Terminal, parent: &HtmlElement);

    #[wasm_bindgen(method)]
    fn focus(this: &Terminal);

    #[wasm_bindgen(method)]
    fn blur(this: &Terminal);

    #[wasm_bindgen(method, js_name = scrollToBottom)]
    fn scroll_to_bottom(this: &Terminal);

    #[wasm_bindgen(method, getter)]
    fn cols(this: &Terminal) -> u16;

    #[wasm_bindgen(method, getter)]
    fn rows(this: &Terminal) -> u16;

    #[wasm_bindgen(method, catch)]
    fn write(this: &Terminal, data: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch)]
    fn resize(this: &Terminal, cols: u16, rows: u16) -> Result<(), JsValue>;

    #[wasm_bindgen(method)]
    fn clear(this: &Terminal);

    #[wasm_bindgen(method, getter)]
    fn options(this: &Terminal) -> Object;

    #[wasm_bindgen(method, js_name = onData)]
    fn on_data(this: &Terminal, listener: &Closure<dyn FnMut(String)>) -> JsValue;

    #[wasm_bindgen(method, js_name = onResize)]
    fn on_resize(this: &Terminal, listener: &Closure<dyn FnMut(JsValue)>) -> JsValue;

    #[wasm_bindgen(method)]
    fn dispose(this: &Terminal);
}

#[wasm_bindgen(module = "@xterm/addon-fit")]
extern "C" {
    pub type FitAddon;

    #[wasm_bindgen(constructor)]
    fn new() -> FitAddon;

    #[wasm_bindgen(method)]
    fn fit(this: &FitAddon);
}

#[wasm_bindgen(module = "@xterm/addon-web-links")]
extern "C" {
    pub type WebLinksAddon;

    #[wasm_bindgen(constructor)]
    fn new() -> WebLinksAddon;
}

#[wasm_bindgen(module = "@xterm/addon-webgl")]
extern "C" {
    pub type WebglAddon;

    #[wasm_bindgen(constructor)]
    fn new() -> WebglAddon;
}

/// Convert a JSON value to the equivalent JS value.
pub fn json_to_js(value: &Value) -> Result<JsValue, JsValue> {
    JSON::parse(&value.to_string())
}

/// An xterm.js terminal bound to its container.
pub struct XtermWidget {
    terminal: Terminal,
    fit: FitAddon,
    container: HtmlElement,
    data_listeners: RefCell<Vec<Closure<dyn FnMut(String)>>>,
    resize_listeners: RefCell<Vec<Closure<dyn FnMut(JsValue)>>>,
}

impl XtermWidget {
    pub fn new(container: HtmlElement) -> Self {
        Self {
            terminal: Terminal::new(),
            fit: FitAddon::new(),
            container,
            data_listeners: RefCell::new(Vec::new()),
            resize_listeners: RefCell::new(Vec::new()),
        }
    }
}

fn host_error(e: JsValue) -> WidgetError {
    WidgetError::Host(format!("{e:?}"))
}

fn grid_field(event: &JsValue, name: &str) -> u16 {
    Reflect::get(event, &JsValue::from_str(name))
        .ok()
        .and_then(|v| v.as_f64())
        .map_or(0, |n| n.clamp(0.0, f64::from(u16::MAX)) as u16)
}

impl TerminalWidget for XtermWidget {
    fn load_addon(&self, addon: Addon) {
        match addon {
            Addon::Fit => self.terminal.load_addon(&self.fit),
            Addon::WebLinks => self.terminal.load_addon(&WebLinksAddon::new()),
            Addon::WebGl => self.terminal.load_addon(&WebglAddon::new()),
        }
    }

    fn open(&self) {
        self.terminal.open(&self.container);
    }

    fn focus(&self) {
        self.terminal.focus();
    }

    fn blur(&self) {
        self.terminal.blur();
    }

    fn fit(&self) {
        self.fit.fit();
    }

    fn scroll_to_bottom(&self) {
        self.terminal.scroll_to_bottom();
    }

    fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.terminal.cols(), self.terminal.rows())
    }

    fn write(&self, text: &str) -> Result<(), WidgetError> {
        self.terminal.write(text).map_err(host_error)
    }

    fn clear(&self) {
        self.terminal.clear();
    }

    /// `cols` and `rows` are constructor-only options in xterm.js 5, so they
    /// go through `resize` instead of the options object.
    fn set_option(&self, option: WidgetOption) -> Result<(), WidgetError> {
        let result = match option {
            WidgetOption::Cols(cols) => self.terminal.resize(cols, self.terminal.rows()),
            WidgetOption::Rows(rows) => self.terminal.resize(self.terminal.cols(), rows),
            option => json_to_js(&option.value()).and_then(|value| {
                let name = JsValue::from_str(option.name());
                Reflect::set(&self.terminal.options(), &name, &value).map(drop)
            }),
        };
        result.map_err(host_error)
    }

    fn on_data(&self, mut callback: DataCallback) {
        let listener =
            Closure::wrap(Box::new(move |data: String| callback(&data)) as Box<dyn FnMut(String)>);
        self.terminal.on_data(&listener);
        self.data_listeners.borrow_mut().push(listener);
    }

    fn on_resize(&self, mut callback: ResizeCallback) {
        let listener = Closure::wrap(Box::new(move |event: JsValue| {
            callback(Dimensions::new(
                grid_field(&event, "cols"),
                grid_field(&event, "rows"),
            ))
        }) as Box<dyn FnMut(JsValue)>);
        self.terminal.on_resize(&listener);
        self.resize_listeners.borrow_mut().push(listener);
    }

    /// Listener closures stay alive until the widget itself is dropped, so
    /// disposing from inside an input callback is safe.
    fn dispose(&self) {
        self.terminal.dispose();
    }
}
