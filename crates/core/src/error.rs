//! Error types for tilt interaction operations.
//!
//! Configuration errors surface to the caller of `activate`/`configure`.
//! Geometry anomalies are produced here but absorbed by the engine.

use thiserror::Error;

use crate::element::PointerKind;

/// Error type for boop operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BoopError {
    // Configuration errors
    #[error("failed to locate child by selector: {selector}")]
    TargetResolution { selector: String },

    #[error("invalid selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    // Geometry
    #[error("degenerate bounding box {width}x{height}: cannot normalize pointer offset")]
    DegenerateGeometry { width: f64, height: f64 },

    // Host errors
    #[error("failed to set style property '{property}': {reason}")]
    StyleWrite { property: String, reason: String },

    #[error("failed to subscribe {kind} listener: {reason}")]
    Listener { kind: PointerKind, reason: String },

    // Lifecycle
    #[error("engine is busy dispatching a pointer event")]
    EngineBusy,

    #[error("engine has been deactivated")]
    Inactive,
}

impl BoopError {
    /// Create a target resolution error.
    pub fn target_resolution(selector: impl Into<String>) -> Self {
        Self::TargetResolution {
            selector: selector.into(),
        }
    }

    /// Create an invalid selector error.
    pub fn invalid_selector(selector: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSelector {
            selector: selector.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Create a style write error.
    pub fn style_write(property: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::StyleWrite {
            property: property.into(),
            reason: reason.into(),
        }
    }

    /// Create a listener subscription error.
    pub fn listener(kind: PointerKind, reason: impl Into<String>) -> Self {
        Self::Listener {
            kind,
            reason: reason.into(),
        }
    }
}
