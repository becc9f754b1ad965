//! DOM pointer listeners
//!
//! One `wasm-bindgen` closure per pointer kind, created up front and
//! added/removed on the bound element as the engine switches subscriptions.
//! The closures translate `web_sys::PointerEvent` into core events and hand
//! them to a sink; they hold no strong reference to the engine.

use std::fmt;

use boop_core::{BoopError, ListenerRegistry, Point, PointerEvent, PointerKind, Result};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen::closure::Closure;
use web_sys::HtmlElement;

use crate::dom::js_error_message;

type PointerClosure = Closure<dyn FnMut(web_sys::PointerEvent)>;

/// Listener registry over an element's pointer events
pub struct DomListeners {
    element: HtmlElement,
    enter: PointerClosure,
    moving: PointerClosure,
    leave: PointerClosure,
}

impl DomListeners {
    /// Build the three closures; nothing is attached until `listen`.
    pub fn new<F>(element: HtmlElement, sink: F) -> Self
    where
        F: Fn(PointerEvent) + Clone + 'static,
    {
        Self {
            element,
            enter: pointer_closure(sink.clone(), |_| PointerEvent::Enter),
            moving: pointer_closure(sink.clone(), |event| {
                PointerEvent::Move(client_point(event))
            }),
            leave: pointer_closure(sink, |_| PointerEvent::Leave),
        }
    }

    const fn closure(&self, kind: PointerKind) -> &PointerClosure {
        match kind {
            PointerKind::Enter => &self.enter,
            PointerKind::Move => &self.moving,
            PointerKind::Leave => &self.leave,
        }
    }
}

impl ListenerRegistry for DomListeners {
    fn listen(&mut self, kind: PointerKind) -> Result<()> {
        self.element
            .add_event_listener_with_callback(
                kind.event_name(),
                self.closure(kind).as_ref().unchecked_ref(),
            )
            .map_err(|e| BoopError::listener(kind, js_error_message(&e)))
    }

    fn unlisten(&mut self, kind: PointerKind) {
        if let Err(e) = self.element.remove_event_listener_with_callback(
            kind.event_name(),
            self.closure(kind).as_ref().unchecked_ref(),
        ) {
            tracing::warn!(%kind, error = %js_error_message(&e), "failed to remove pointer listener");
        }
    }
}

impl fmt::Debug for DomListeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DomListeners")
            .field("element", &self.element)
            .finish_non_exhaustive()
    }
}

/// Pointer position in client coordinates.
///
/// `clientX`/`clientY` are doubles in current browsers but typed as integers
/// by `web-sys`, so they are read as JS numbers to keep sub-pixel precision.
#[must_use]
pub fn client_point(event: &web_sys::PointerEvent) -> Point {
    Point::new(
        coordinate(event, "clientX").unwrap_or_else(|| f64::from(event.client_x())),
        coordinate(event, "clientY").unwrap_or_else(|| f64::from(event.client_y())),
    )
}

fn coordinate(event: &web_sys::PointerEvent, name: &str) -> Option<f64> {
    js_sys::Reflect::get(event.as_ref(), &JsValue::from_str(name))
        .ok()
        .and_then(|value| value.as_f64())
}

fn pointer_closure<F, C>(sink: F, convert: C) -> PointerClosure
where
    F: Fn(PointerEvent) + 'static,
    C: Fn(&web_sys::PointerEvent) -> PointerEvent + 'static,
{
    Closure::wrap(Box::new(move |event: web_sys::PointerEvent| {
        sink(convert(&event));
    }) as Box<dyn FnMut(web_sys::PointerEvent)>)
}
