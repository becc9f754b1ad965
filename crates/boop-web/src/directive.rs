//! Leptos directives
//!
//! ```ignore
//! view! { <div class="card" use:boop_directive=BoopConfig::new().with_selector(".face")>...</div> }
//! ```
//!
//! The behavior lives as long as the owning reactive scope; `on_cleanup`
//! deactivates it when the element is unmounted.

use std::rc::Rc;

use boop_core::{BoopConfig, ResultExt};
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use crate::action::{BoopHandle, boop};

/// Attach the tilt behavior with a fixed configuration.
///
/// Attach failures are logged and leave the element untouched.
pub fn boop_directive(el: web_sys::Element, config: BoopConfig) {
    let Some(handle) = attach(el, config) else {
        return;
    };
    let handle = StoredValue::new_local(handle);
    on_cleanup(move || {
        handle.try_with_value(BoopHandle::deactivate);
    });
}

/// Attach the tilt behavior and re-configure whenever `config` changes.
///
/// The effect tracks the configuration last applied to the engine, so a
/// change that lands before the effect first runs is still applied, and a
/// failed update leaves the previous configuration in force.
pub fn boop_reactive(el: web_sys::Element, config: Signal<BoopConfig>) {
    let attached = config.get_untracked();
    let Some(handle) = attach(el, attached.clone()) else {
        return;
    };
    let handle = Rc::new(handle);

    let tracked = Rc::clone(&handle);
    Effect::new(move |applied: Option<BoopConfig>| {
        let applied = applied.unwrap_or_else(|| attached.clone());
        let next = config.get();
        if next == applied {
            return applied;
        }
        match tracked.configure(next.clone()) {
            Ok(()) => next,
            Err(e) => {
                tracing::warn!(error = %e, "failed to re-configure tilt");
                applied
            }
        }
    });

    let handle = StoredValue::new_local(handle);
    on_cleanup(move || {
        handle.try_with_value(|h| h.deactivate());
    });
}

fn attach(el: web_sys::Element, config: BoopConfig) -> Option<BoopHandle> {
    let Ok(node) = el.dyn_into::<HtmlElement>() else {
        tracing::warn!("tilt directive applied to a non-HTML element");
        return None;
    };
    boop(node, config).into_option_logged("failed to attach tilt")
}
