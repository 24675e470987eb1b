//! The DOM side of the session host: container, overlay node, document.

use tracing::warn;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement};
use webterm_session::HostSurface;

pub struct DomHost {
    document: Document,
    container: HtmlElement,
    overlay: HtmlElement,
}

impl DomHost {
    /// Create the (detached) overlay node in the container's document.
    pub fn new(container: HtmlElement, class_name: &str) -> Result<Self, JsValue> {
        let document = match container.owner_document() {
            Some(doc) => doc,
            None => web_sys::window()
                .and_then(|w| w.document())
                .ok_or_else(|| JsValue::from_str("container has no owning document"))?,
        };
        let overlay = document
            .create_element("div")?
            .dyn_into::<HtmlElement>()
            .map_err(|_| JsValue::from_str("overlay node is not an HtmlElement"))?;
        overlay.set_class_name(class_name);

        Ok(Self {
            document,
            container,
            overlay,
        })
    }
}

impl HostSurface for DomHost {
    fn set_overlay_text(&self, text: &str) {
        self.overlay.set_text_content(Some(text));
    }

    fn attach_overlay(&self) {
        if let Err(e) = self.container.append_child(&self.overlay) {
            warn!(error = ?e, "failed to attach overlay");
        }
    }

    fn detach_overlay(&self) {
        if let Err(e) = self.container.remove_child(&self.overlay) {
            warn!(error = ?e, "failed to detach overlay");
        }
    }

    fn overlay_attached(&self) -> bool {
        self.overlay
            .parent_node()
            .is_some_and(|parent| parent.is_same_node(Some(&self.container)))
    }

    fn set_document_title(&self, title: &str) {
        self.document.set_title(title);
    }
}
