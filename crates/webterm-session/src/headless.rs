//! In-memory widget and host.
//!
//! [`HeadlessWidget`] keeps the grid size, options and theme in memory and
//! forwards written text to any [`std::io::Write`] sink. Fit follows the
//! same rule as the browser fit add-on: floor the container's pixel size by
//! the cell size, with a floor of 2 columns and 1 row. [`HeadlessHost`] is
//! the matching container surface.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::io::{self, Write};
use std::rc::Rc;

use serde_json::Value;
use tracing::{debug, info};
use webterm_common::{Dimensions, PixelSize};

use crate::host::HostSurface;
use crate::theme::Theme;
use crate::widget::{
    Addon, DataCallback, ResizeCallback, TerminalWidget, WidgetError, WidgetOption,
};

pub const DEFAULT_FONT_SIZE: f64 = 15.0;
pub const DEFAULT_DIMENSIONS: Dimensions = Dimensions {
    columns: 80,
    rows: 24,
};
const MIN_COLUMNS: u16 = 2;
const MIN_ROWS: u16 = 1;

/// Pixel size of one character cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMetrics {
    pub width: f64,
    pub height: f64,
}

impl CellMetrics {
    /// Approximate monospace metrics: 0.6em wide, 1.2em tall, rounded up to
    /// whole pixels.
    pub fn for_font_size(size: f64) -> Self {
        Self {
            width: (size * 0.6).ceil().max(1.0),
            height: (size * 1.2).ceil().max(1.0),
        }
    }

    /// Grid size that fits in `container`.
    pub fn fit(&self, container: PixelSize) -> Dimensions {
        let cols = (container.width / self.width).floor();
        let rows = (container.height / self.height).floor();
        Dimensions::new(clamp_cells(cols, MIN_COLUMNS), clamp_cells(rows, MIN_ROWS))
    }
}

fn clamp_cells(n: f64, min: u16) -> u16 {
    if n.is_nan() || n < f64::from(min) {
        min
    } else if n > f64::from(u16::MAX) {
        u16::MAX
    } else {
        n as u16
    }
}

// =============================================================================
// Host
// =============================================================================

/// Container surface that records overlay and title state.
pub struct HeadlessHost {
    container: Cell<PixelSize>,
    overlay_text: RefCell<String>,
    overlay_attached: Cell<bool>,
    title: RefCell<String>,
}

impl HeadlessHost {
    pub fn new(container: PixelSize) -> Self {
        Self {
            container: Cell::new(container),
            overlay_text: RefCell::new(String::new()),
            overlay_attached: Cell::new(false),
            title: RefCell::new(String::new()),
        }
    }

    pub fn container_size(&self) -> PixelSize {
        self.container.get()
    }

    /// Change the container's pixel size. Takes effect on the next fit.
    pub fn set_container_size(&self, size: PixelSize) {
        self.container.set(size);
    }

    pub fn overlay_text(&self) -> String {
        self.overlay_text.borrow().clone()
    }

    pub fn title(&self) -> String {
        self.title.borrow().clone()
    }
}

impl HostSurface for HeadlessHost {
    fn set_overlay_text(&self, text: &str) {
        *self.overlay_text.borrow_mut() = text.to_string();
    }

    fn attach_overlay(&self) {
        self.overlay_attached.set(true);
        info!(text = %self.overlay_text.borrow(), "overlay");
    }

    fn detach_overlay(&self) {
        self.overlay_attached.set(false);
        debug!("overlay hidden");
    }

    fn overlay_attached(&self) -> bool {
        self.overlay_attached.get()
    }

    fn set_document_title(&self, title: &str) {
        *self.title.borrow_mut() = title.to_string();
        info!(title, "window title");
    }
}

// =============================================================================
// Widget
// =============================================================================

struct WidgetState {
    dims: Dimensions,
    metrics: CellMetrics,
    opened: bool,
    disposed: bool,
    focused: bool,
    addons: Vec<Addon>,
    options: BTreeMap<&'static str, Value>,
    theme: Option<Theme>,
    theme_set_count: usize,
    fit_count: usize,
    scroll_to_bottom_count: usize,
    clear_count: usize,
    dispose_count: usize,
}

/// Widget that renders by writing text to a sink.
pub struct HeadlessWidget {
    container: Rc<HeadlessHost>,
    sink: RefCell<Box<dyn Write>>,
    state: RefCell<WidgetState>,
    data_callbacks: RefCell<Vec<DataCallback>>,
    resize_callbacks: RefCell<Vec<ResizeCallback>>,
}

impl HeadlessWidget {
    pub fn new(container: Rc<HeadlessHost>, sink: Box<dyn Write>) -> Self {
        Self {
            container,
            sink: RefCell::new(sink),
            state: RefCell::new(WidgetState {
                dims: DEFAULT_DIMENSIONS,
                metrics: CellMetrics::for_font_size(DEFAULT_FONT_SIZE),
                opened: false,
                disposed: false,
                focused: false,
                addons: Vec::new(),
                options: BTreeMap::new(),
                theme: None,
                theme_set_count: 0,
                fit_count: 0,
                scroll_to_bottom_count: 0,
                clear_count: 0,
                dispose_count: 0,
            }),
            data_callbacks: RefCell::new(Vec::new()),
            resize_callbacks: RefCell::new(Vec::new()),
        }
    }

    /// Feed user input as if it had been typed into the widget.
    pub fn input(&self, data: &str) {
        if self.state.borrow().disposed {
            return;
        }
        let mut callbacks = self.data_callbacks.take();
        for callback in callbacks.iter_mut() {
            callback(data);
        }
        restore(&self.data_callbacks, callbacks);
    }

    pub fn is_open(&self) -> bool {
        self.state.borrow().opened
    }

    pub fn is_disposed(&self) -> bool {
        self.state.borrow().disposed
    }

    pub fn is_focused(&self) -> bool {
        self.state.borrow().focused
    }

    pub fn addons(&self) -> Vec<Addon> {
        self.state.borrow().addons.clone()
    }

    /// Last value set for a widget option, by widget option name.
    pub fn option(&self, name: &str) -> Option<Value> {
        self.state.borrow().options.get(name).cloned()
    }

    pub fn theme(&self) -> Option<Theme> {
        self.state.borrow().theme.clone()
    }

    /// How many times the theme option has been set.
    pub fn theme_updates(&self) -> usize {
        self.state.borrow().theme_set_count
    }

    pub fn fit_count(&self) -> usize {
        self.state.borrow().fit_count
    }

    pub fn scroll_to_bottom_count(&self) -> usize {
        self.state.borrow().scroll_to_bottom_count
    }

    pub fn clear_count(&self) -> usize {
        self.state.borrow().clear_count
    }

    pub fn dispose_count(&self) -> usize {
        self.state.borrow().dispose_count
    }

    fn resize(&self, dims: Dimensions) {
        {
            let mut state = self.state.borrow_mut();
            if state.dims == dims {
                return;
            }
            state.dims = dims;
        }
        debug!(cols = dims.columns, rows = dims.rows, "widget resized");

        let mut callbacks = self.resize_callbacks.take();
        for callback in callbacks.iter_mut() {
            callback(dims);
        }
        restore(&self.resize_callbacks, callbacks);
    }
}

/// Put callbacks back, keeping any registered while they were running.
fn restore<T>(slot: &RefCell<Vec<T>>, mut callbacks: Vec<T>) {
    let mut current = slot.borrow_mut();
    callbacks.append(&mut current);
    *current = callbacks;
}

impl TerminalWidget for HeadlessWidget {
    fn load_addon(&self, addon: Addon) {
        debug!(?addon, "addon loaded");
        self.state.borrow_mut().addons.push(addon);
    }

    fn open(&self) {
        self.state.borrow_mut().opened = true;
    }

    fn focus(&self) {
        self.state.borrow_mut().focused = true;
    }

    fn blur(&self) {
        self.state.borrow_mut().focused = false;
    }

    fn fit(&self) {
        let dims = {
            let mut state = self.state.borrow_mut();
            if state.disposed || !state.opened {
                return;
            }
            state.fit_count += 1;
            state.metrics.fit(self.container.container_size())
        };
        self.resize(dims);
    }

    fn scroll_to_bottom(&self) {
        self.state.borrow_mut().scroll_to_bottom_count += 1;
    }

    fn dimensions(&self) -> Dimensions {
        self.state.borrow().dims
    }

    fn write(&self, text: &str) -> Result<(), WidgetError> {
        if self.state.borrow().disposed {
            return Err(WidgetError::Disposed);
        }
        let mut sink = self.sink.borrow_mut();
        sink.write_all(text.as_bytes())?;
        sink.flush()?;
        Ok(())
    }

    fn clear(&self) {
        self.state.borrow_mut().clear_count += 1;
    }

    fn set_option(&self, option: WidgetOption) -> Result<(), WidgetError> {
        let name = option.name();
        let value = option.value();
        let mut resize_to = None;
        {
            let mut state = self.state.borrow_mut();
            if state.disposed {
                return Err(WidgetError::Disposed);
            }
            match &option {
                WidgetOption::FontSize(size) => {
                    state.metrics = CellMetrics::for_font_size(*size);
                }
                WidgetOption::Cols(cols) => {
                    resize_to = Some(Dimensions::new((*cols).max(MIN_COLUMNS), state.dims.rows));
                }
                WidgetOption::Rows(rows) => {
                    resize_to = Some(Dimensions::new(state.dims.columns, (*rows).max(MIN_ROWS)));
                }
                WidgetOption::Theme(theme) => {
                    state.theme = Some(theme.clone());
                    state.theme_set_count += 1;
                }
                _ => {}
            }
            state.options.insert(name, value);
        }
        if let Some(dims) = resize_to {
            self.resize(dims);
        }
        Ok(())
    }

    fn on_data(&self, callback: DataCallback) {
        self.data_callbacks.borrow_mut().push(callback);
    }

    fn on_resize(&self, callback: ResizeCallback) {
        self.resize_callbacks.borrow_mut().push(callback);
    }

    fn dispose(&self) {
        {
            let mut state = self.state.borrow_mut();
            state.disposed = true;
            state.dispose_count += 1;
        }
        self.data_callbacks.borrow_mut().clear();
        self.resize_callbacks.borrow_mut().clear();
    }
}

/// Cloneable in-memory sink, handy for reading back what a widget wrote.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use webterm_config::CursorStyle;

    fn widget(width: f64, height: f64) -> (Rc<HeadlessHost>, HeadlessWidget, SharedBuffer) {
        let host = Rc::new(HeadlessHost::new(PixelSize::new(width, height)));
        let buffer = SharedBuffer::new();
        let widget = HeadlessWidget::new(Rc::clone(&host), Box::new(buffer.clone()));
        widget.open();
        (host, widget, buffer)
    }

    #[test]
    fn default_metrics_fit_an_80x24_container() {
        let metrics = CellMetrics::for_font_size(DEFAULT_FONT_SIZE);
        assert_eq!(metrics, CellMetrics { width: 9.0, height: 18.0 });
        assert_eq!(
            metrics.fit(PixelSize::new(720.0, 432.0)),
            Dimensions::new(80, 24)
        );
    }

    #[test]
    fn fit_floors_partial_cells() {
        let metrics = CellMetrics::for_font_size(DEFAULT_FONT_SIZE);
        assert_eq!(
            metrics.fit(PixelSize::new(728.9, 449.0)),
            Dimensions::new(80, 24)
        );
    }

    #[test]
    fn fit_has_a_minimum_grid() {
        let metrics = CellMetrics::for_font_size(DEFAULT_FONT_SIZE);
        assert_eq!(metrics.fit(PixelSize::new(0.0, 0.0)), Dimensions::new(2, 1));
        assert_eq!(
            metrics.fit(PixelSize::new(f64::NAN, -5.0)),
            Dimensions::new(2, 1)
        );
    }

    #[test]
    fn fit_resizes_and_notifies_once_per_change() {
        let (host, widget, _) = widget(720.0, 432.0);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = Rc::clone(&seen);
        widget.on_resize(Box::new(move |d| s.borrow_mut().push(d)));

        widget.fit();
        assert_eq!(widget.dimensions(), Dimensions::new(80, 24));
        assert!(seen.borrow().is_empty(), "80x24 is already the size");

        host.set_container_size(PixelSize::new(900.0, 540.0));
        widget.fit();
        widget.fit();
        assert_eq!(*seen.borrow(), vec![Dimensions::new(100, 30)]);
        assert_eq!(widget.fit_count(), 3);
    }

    #[test]
    fn font_size_changes_the_next_fit() {
        let (_host, widget, _) = widget(720.0, 432.0);
        widget.set_option(WidgetOption::FontSize(30.0)).unwrap();
        widget.fit();
        assert_eq!(widget.dimensions(), Dimensions::new(40, 12));
    }

    #[test]
    fn cols_and_rows_options_resize() {
        let (_host, widget, _) = widget(720.0, 432.0);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = Rc::clone(&seen);
        widget.on_resize(Box::new(move |d| s.borrow_mut().push(d)));

        widget.set_option(WidgetOption::Cols(132)).unwrap();
        widget.set_option(WidgetOption::Rows(43)).unwrap();
        assert_eq!(
            *seen.borrow(),
            vec![Dimensions::new(132, 24), Dimensions::new(132, 43)]
        );
    }

    #[test]
    fn writes_and_options_fail_once_disposed() {
        let (_host, widget, buffer) = widget(720.0, 432.0);
        widget.write("hello").unwrap();
        assert_eq!(buffer.contents(), "hello");

        widget.dispose();
        assert!(matches!(widget.write("x"), Err(WidgetError::Disposed)));
        assert!(matches!(
            widget.set_option(WidgetOption::FontSize(12.0)),
            Err(WidgetError::Disposed)
        ));
        assert_eq!(buffer.contents(), "hello");
    }

    #[test]
    fn input_reaches_data_callbacks_in_order() {
        let (_host, widget, _) = widget(720.0, 432.0);
        let seen = Rc::new(RefCell::new(Vec::new()));
        for tag in ["a", "b"] {
            let s = Rc::clone(&seen);
            widget.on_data(Box::new(move |d: &str| s.borrow_mut().push(format!("{tag}:{d}"))));
        }

        widget.input("ls\r");
        assert_eq!(*seen.borrow(), vec!["a:ls\r", "b:ls\r"]);

        widget.dispose();
        widget.input("ignored");
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn options_are_recorded_by_widget_name() {
        let (_host, widget, _) = widget(720.0, 432.0);
        widget.set_option(WidgetOption::CursorStyle(CursorStyle::Bar)).unwrap();
        widget.set_option(WidgetOption::Scrollback(5000)).unwrap();
        assert_eq!(widget.option("cursorStyle"), Some(Value::from("bar")));
        assert_eq!(widget.option("scrollback"), Some(Value::from(5000)));
        assert_eq!(widget.option("fontFamily"), None);
    }

    #[test]
    fn host_records_overlay_and_title() {
        let host = HeadlessHost::new(PixelSize::new(1.0, 1.0));
        host.set_overlay_text("80x24");
        host.attach_overlay();
        assert!(host.overlay_attached());
        assert_eq!(host.overlay_text(), "80x24");

        host.detach_overlay();
        assert!(!host.overlay_attached());

        host.set_document_title("vim");
        assert_eq!(host.title(), "vim");
    }
}
