//! Attaching the tilt behavior to a DOM element
//!
//! [`boop`] binds the engine to an `HtmlElement` and returns a [`BoopHandle`]
//! for updates and teardown. [`BoopAction`] exposes the same contract to
//! JavaScript as `boop(node, params) -> { update(params), destroy() }`.
//!
//! # Re-entrancy
//!
//! Pointer events are dispatched while the engine is mutably borrowed. A
//! transform callback that calls [`BoopHandle::deactivate`] therefore cannot
//! tear down immediately; the request is recorded and honored as soon as the
//! current event finishes. [`BoopHandle::configure`] called from inside a
//! handler fails with [`BoopError::EngineBusy`].

use std::cell::{OnceCell, RefCell};
use std::rc::{Rc, Weak};

use boop_core::{
    BoopConfig, BoopError, Cancellation, PointerEvent, Result, Rotation, TiltEngine,
};
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use crate::dom::{DomElement, js_error_message};
use crate::listeners::DomListeners;

/// Engine bound to a live DOM element.
pub type DomEngine = TiltEngine<DomElement, DomListeners>;

type EngineSlot = Rc<OnceCell<Weak<RefCell<DomEngine>>>>;

/// Handle returned by [`boop`]
///
/// Dropping the handle deactivates the behavior.
pub struct BoopHandle {
    engine: Rc<RefCell<DomEngine>>,
    cancellation: Cancellation,
}

/// Attach the tilt behavior to `node`.
///
/// # Errors
///
/// Returns an error if:
/// - `config.selector` matches no descendant or is not a valid selector
/// - The initial style cannot be written
/// - The pointer-enter listener cannot be added
///
/// # Example
///
/// ```no_run
/// use boop_core::BoopConfig;
/// use boop_web::action::boop;
/// use web_sys::HtmlElement;
///
/// # fn example(card: HtmlElement) -> Result<(), boop_core::BoopError> {
/// let handle = boop(card, BoopConfig::new().with_selector(".face"))?;
/// // ... later, when the element goes away ...
/// handle.deactivate();
/// # Ok(())
/// # }
/// ```
pub fn boop(node: HtmlElement, config: BoopConfig) -> Result<BoopHandle> {
    let slot: EngineSlot = Rc::new(OnceCell::new());
    let sink = {
        let slot = Rc::clone(&slot);
        move |event: PointerEvent| deliver(&slot, event)
    };

    let listeners = DomListeners::new(node.clone(), sink);
    let engine = TiltEngine::activate(DomElement::new(node), config, listeners)?;
    let cancellation = engine.cancellation();

    let engine = Rc::new(RefCell::new(engine));
    // The slot is fresh, so this cannot already be set
    let _ = slot.set(Rc::downgrade(&engine));

    Ok(BoopHandle {
        engine,
        cancellation,
    })
}

fn deliver(slot: &OnceCell<Weak<RefCell<DomEngine>>>, event: PointerEvent) {
    let Some(engine) = slot.get().and_then(Weak::upgrade) else {
        return;
    };
    match engine.try_borrow_mut() {
        Ok(mut engine) => engine.dispatch(event),
        Err(_) => tracing::trace!(kind = %event.kind(), "nested pointer event dropped"),
    }
}

impl BoopHandle {
    /// Re-resolve the target and re-apply the initial style.
    ///
    /// # Errors
    ///
    /// - [`BoopError::EngineBusy`] when called from inside a pointer handler
    /// - [`BoopError::Inactive`] after [`BoopHandle::deactivate`]
    /// - Target resolution and style errors from [`TiltEngine::configure`]
    pub fn configure(&self, config: BoopConfig) -> Result<()> {
        self.engine
            .try_borrow_mut()
            .map_err(|_| BoopError::EngineBusy)?
            .configure(config)
    }

    /// Install a callback receiving the rotated element and each new rotation.
    ///
    /// # Errors
    ///
    /// Returns [`BoopError::EngineBusy`] when called from inside a pointer handler.
    pub fn on_transform<F>(&self, mut transform: F) -> Result<()>
    where
        F: FnMut(&HtmlElement, Rotation) + 'static,
    {
        self.engine
            .try_borrow_mut()
            .map_err(|_| BoopError::EngineBusy)?
            .on_transform(move |target: &DomElement, rotation| {
                transform(target.as_html(), rotation);
            });
        Ok(())
    }

    /// Remove the transform callback.
    ///
    /// # Errors
    ///
    /// Returns [`BoopError::EngineBusy`] when called from inside a pointer handler.
    pub fn clear_transform(&self) -> Result<()> {
        self.engine
            .try_borrow_mut()
            .map_err(|_| BoopError::EngineBusy)?
            .clear_transform();
        Ok(())
    }

    /// Remove all listeners and zero the rotation. Safe to call repeatedly
    /// and from inside a transform callback.
    pub fn deactivate(&self) {
        match self.engine.try_borrow_mut() {
            Ok(mut engine) => engine.deactivate(),
            Err(_) => self.cancellation.request(),
        }
    }

    /// Current rotation, or `None` while an event is being dispatched.
    #[must_use]
    pub fn rotation(&self) -> Option<Rotation> {
        self.engine.try_borrow().ok().map(|engine| engine.rotation())
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.cancellation.is_requested()
            && self
                .engine
                .try_borrow()
                .map_or(true, |engine| engine.is_active())
    }
}

impl Drop for BoopHandle {
    fn drop(&mut self) {
        self.deactivate();
    }
}

/// JavaScript action object: `const action = boop(node, params)`
#[wasm_bindgen(js_name = Boop)]
pub struct BoopAction {
    handle: BoopHandle,
}

/// Attach the tilt behavior from JavaScript.
///
/// `params` is `undefined`/`null` or an object
/// `{ selector?, variablesOnNode?, initialStyle? }`.
///
/// # Errors
///
/// Throws a JS `Error` if `params` is malformed or attaching fails.
#[wasm_bindgen(js_name = boop)]
pub fn boop_action(node: HtmlElement, params: JsValue) -> std::result::Result<BoopAction, JsValue> {
    BoopAction::new(node, params)
}

#[wasm_bindgen(js_class = Boop)]
impl BoopAction {
    /// # Errors
    ///
    /// Throws a JS `Error` if `params` is malformed or attaching fails.
    #[wasm_bindgen(constructor)]
    pub fn new(node: HtmlElement, params: JsValue) -> std::result::Result<Self, JsValue> {
        let config = parse_params(params).map_err(to_js_error)?;
        let handle = boop(node, config).map_err(to_js_error)?;
        Ok(Self { handle })
    }

    /// # Errors
    ///
    /// Throws a JS `Error` if `params` is malformed or the update fails.
    pub fn update(&self, params: JsValue) -> std::result::Result<(), JsValue> {
        let config = parse_params(params).map_err(to_js_error)?;
        self.handle.configure(config).map_err(to_js_error)
    }

    pub fn destroy(&self) {
        self.handle.deactivate();
    }

    /// Set or clear `(target, rotX, rotY) => void`.
    ///
    /// # Errors
    ///
    /// Throws a JS `Error` when called from inside the callback itself.
    #[wasm_bindgen(js_name = setTransform)]
    pub fn set_transform(
        &self,
        transform: Option<js_sys::Function>,
    ) -> std::result::Result<(), JsValue> {
        let result = match transform {
            None => self.handle.clear_transform(),
            Some(function) => self.handle.on_transform(move |target, rotation| {
                let called = function.call3(
                    &JsValue::NULL,
                    target.as_ref(),
                    &JsValue::from_f64(rotation.rot_x),
                    &JsValue::from_f64(rotation.rot_y),
                );
                if let Err(e) = called {
                    tracing::warn!(error = %js_error_message(&e), "transform callback threw");
                }
            }),
        };
        result.map_err(to_js_error)
    }
}

/// Parse JS action params; `undefined` and `null` mean defaults.
///
/// # Errors
///
/// Returns [`BoopError::InvalidConfig`] if a field has the wrong type.
pub fn parse_params(params: JsValue) -> Result<BoopConfig> {
    if params.is_undefined() || params.is_null() {
        return Ok(BoopConfig::default());
    }
    serde_wasm_bindgen::from_value(params).map_err(|e| BoopError::invalid_config(e.to_string()))
}

fn to_js_error(error: BoopError) -> JsValue {
    js_sys::Error::new(&error.to_string()).into()
}
