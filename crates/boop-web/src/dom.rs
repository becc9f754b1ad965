//! `web-sys` element host
//!
//! Wraps an `HtmlElement` so the engine can resolve, measure and style it.
//! Geometry comes from `getBoundingClientRect`, which reports client
//! coordinates, the same space as `PointerEvent.clientX/Y`.

use boop_core::{BoopError, Rect, Result, TiltElement};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlElement, Node};

/// Element handle over a live DOM node
///
/// # Examples
///
/// ```no_run
/// use boop_core::TiltElement;
/// use boop_web::dom::DomElement;
/// use web_sys::HtmlElement;
///
/// # fn example(node: HtmlElement) -> Result<(), boop_core::BoopError> {
/// let card = DomElement::new(node);
/// let face = card.query_selector(".face")?;
/// assert!(face.is_some());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomElement(HtmlElement);

impl DomElement {
    #[must_use]
    pub const fn new(element: HtmlElement) -> Self {
        Self(element)
    }

    #[must_use]
    pub const fn as_html(&self) -> &HtmlElement {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> HtmlElement {
        self.0
    }
}

impl From<HtmlElement> for DomElement {
    fn from(element: HtmlElement) -> Self {
        Self(element)
    }
}

impl TiltElement for DomElement {
    fn query_selector(&self, selector: &str) -> Result<Option<Self>> {
        let found = self
            .0
            .query_selector(selector)
            .map_err(|e| BoopError::invalid_selector(selector, js_error_message(&e)))?;

        found
            .map(|element| {
                element.dyn_into::<HtmlElement>().map(Self).map_err(|_| {
                    BoopError::invalid_config(format!(
                        "element matched by '{selector}' is not an HTML element"
                    ))
                })
            })
            .transpose()
    }

    fn bounding_rect(&self) -> Rect {
        let rect = self.0.get_bounding_client_rect();
        Rect::new(rect.x(), rect.y(), rect.width(), rect.height())
    }

    fn set_style_property(&self, property: &str, value: &str) -> Result<()> {
        self.0
            .style()
            .set_property(property, value)
            .map_err(|e| BoopError::style_write(property, js_error_message(&e)))
    }

    fn is_same_node(&self, other: &Self) -> bool {
        let other: &Node = other.0.as_ref();
        self.0.is_same_node(Some(other))
    }
}

/// Best-effort readable message from a thrown JS value.
pub(crate) fn js_error_message(value: &JsValue) -> String {
    value
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{value:?}"))
}
