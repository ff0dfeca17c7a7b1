//! Browser glue (feature `web`): logging setup and a DOM-backed
//! [`Overlay`].

use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlElement;

use crate::confidence::ResidueConfidence;
use crate::options::ColorOptions;
use crate::selection::{tooltip_text, Overlay, PointerPosition, ResidueDetails};
use crate::util::score_color::rgb_to_hex;

/// Route panics and `log` output to the browser console. Safe to call more
/// than once.
pub fn init() {
    console_error_panic_hook::set_once();
    // Err only means a logger is already installed.
    let _ = console_log::init_with_level(log::Level::Info);
}

/// [`Overlay`] drawing into two existing DOM elements.
///
/// Both elements are plain text containers; content is set through
/// `textContent`, so residue names from the model file are never
/// interpreted as markup.
#[derive(Debug)]
pub struct DomOverlay {
    tooltip: HtmlElement,
    popup: HtmlElement,
    palette: ColorOptions,
}

impl DomOverlay {
    /// Bind to the elements with ids `tooltip_id` and `popup_id`.
    /// Returns `None` if there is no document or either element is missing.
    #[must_use]
    pub fn new(
        tooltip_id: &str,
        popup_id: &str,
        palette: ColorOptions,
    ) -> Option<Self> {
        let document = web_sys::window()?.document()?;
        let find = |id: &str| {
            document
                .get_element_by_id(id)
                .and_then(|e| e.dyn_into::<HtmlElement>().ok())
        };
        let overlay = Self {
            tooltip: find(tooltip_id)?,
            popup: find(popup_id)?,
            palette,
        };
        overlay.style(&overlay.popup, "white-space", "pre-line");
        overlay.style(&overlay.tooltip, "position", "absolute");
        Some(overlay)
    }

    fn style(&self, element: &HtmlElement, property: &str, value: &str) {
        if let Err(e) = element.style().set_property(property, value) {
            log_js_error("style overlay", &e);
        }
    }
}

fn log_js_error(action: &str, error: &JsValue) {
    log::error!("Failed to {action}: {error:?}");
}

impl Overlay for DomOverlay {
    fn show_tooltip(&mut self, residue: &ResidueConfidence, at: PointerPosition) {
        self.tooltip.set_text_content(Some(&tooltip_text(residue)));
        self.style(&self.tooltip, "left", &format!("{:.0}px", at.x + 12.0));
        self.style(&self.tooltip, "top", &format!("{:.0}px", at.y + 12.0));
        self.style(&self.tooltip, "display", "block");
    }

    fn hide_tooltip(&mut self) {
        self.style(&self.tooltip, "display", "none");
    }

    fn show_detail_popup(&mut self, details: &ResidueDetails) {
        let color = self
            .palette
            .confidence_color(details.residue.confidence_level());
        self.popup.set_text_content(Some(&details.popup_text()));
        self.style(
            &self.popup,
            "border-left",
            &format!("6px solid {}", rgb_to_hex(color)),
        );
        self.style(&self.popup, "display", "block");
    }

    fn hide_detail_popup(&mut self) {
        self.style(&self.popup, "display", "none");
    }
}
