//! Pointer-driven 3D tilt behavior, independent of any UI host
//!
//! A tilt behavior binds to one element. While the pointer is over it, the
//! element (or a descendant picked by selector) rotates around its center
//! toward the pointer; when the pointer leaves, it returns to rest.
//!
//! ## Module Structure
//! - `engine`: the session state machine ([`TiltEngine`])
//! - `element`: host seams ([`TiltElement`], [`ListenerRegistry`])
//! - `config`: [`BoopConfig`] and its JSON schema
//! - `geometry`: rotation math
//! - `style`: rotation variables and style payloads
//! - `memory`: an in-memory host
//! - `error`, `result`: error types

#![forbid(unsafe_code)]

pub mod config;
pub mod element;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod memory;
pub mod result;
pub mod style;

pub use config::{BoopConfig, StyleMap};
pub use element::{ListenerRegistry, PointerEvent, PointerKind, TiltElement};
pub use engine::{Cancellation, Session, TiltEngine, TransformFn};
pub use error::BoopError;
pub use geometry::{Point, Rect, Rotation};
pub use result::{Result, ResultExt};
