//! Browser binding for the boop tilt behavior
//!
//! Connects [`boop_core::TiltEngine`] to live DOM elements through `web-sys`
//! and exposes it three ways: the Rust [`boop`] function, the
//! JavaScript `boop(node, params)` action, and Leptos directives.
//!
//! ## Module Structure
//! - `dom`: [`DomElement`], the `web-sys` element host
//! - `listeners`: [`DomListeners`], pointer listener closures
//! - `action`: [`boop`], [`BoopHandle`] and the JS-facing [`BoopAction`]
//! - `directive`: `use:` directives for Leptos views

#![forbid(unsafe_code)]

pub mod action;
pub mod directive;
pub mod dom;
pub mod listeners;

pub use action::{BoopAction, BoopHandle, DomEngine, boop};
pub use boop_core::{BoopConfig, BoopError, Rotation};
pub use directive::{boop_directive, boop_reactive};
pub use dom::DomElement;
pub use listeners::DomListeners;

use wasm_bindgen::prelude::*;

/// Route Rust panics to the browser console. Safe to call more than once.
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging() {
    console_error_panic_hook::set_once();
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_test;
