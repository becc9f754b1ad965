//! Host seams consumed by the engine
//!
//! A host provides two things: element handles that can be queried, measured
//! and styled ([`TiltElement`]), and a place to switch pointer listeners on the
//! bound element on and off ([`ListenerRegistry`]). The engine never owns the
//! underlying nodes.

use std::fmt;

use crate::geometry::{Point, Rect};
use crate::result::Result;

/// Pointer event kinds the engine subscribes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PointerKind {
    Enter,
    Move,
    Leave,
}

impl PointerKind {
    /// All kinds, in subscription order.
    pub const ALL: [Self; 3] = [Self::Enter, Self::Move, Self::Leave];

    /// DOM event name for this kind.
    #[must_use]
    pub const fn event_name(self) -> &'static str {
        match self {
            Self::Enter => "pointerenter",
            Self::Move => "pointermove",
            Self::Leave => "pointerleave",
        }
    }
}

impl fmt::Display for PointerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.event_name())
    }
}

/// A pointer event as delivered by the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Enter,
    Move(Point),
    Leave,
}

impl PointerEvent {
    #[must_use]
    pub const fn kind(&self) -> PointerKind {
        match self {
            Self::Enter => PointerKind::Enter,
            Self::Move(_) => PointerKind::Move,
            Self::Leave => PointerKind::Leave,
        }
    }
}

/// An element handle the engine can resolve, measure and style
///
/// Handles are cheap clones referring to the same underlying node; style writes
/// go through `&self`.
pub trait TiltElement: Clone {
    /// First descendant matching `selector` in document order.
    ///
    /// # Errors
    ///
    /// Returns [`crate::BoopError::InvalidSelector`] if the host rejects the
    /// selector syntax.
    fn query_selector(&self, selector: &str) -> Result<Option<Self>>;

    /// Current bounding box in client coordinates.
    fn bounding_rect(&self) -> Rect;

    /// Set one inline style property (CSS name, including custom properties).
    ///
    /// # Errors
    ///
    /// Returns [`crate::BoopError::StyleWrite`] if the host refuses the write.
    fn set_style_property(&self, property: &str, value: &str) -> Result<()>;

    /// Whether both handles refer to the same node.
    fn is_same_node(&self, other: &Self) -> bool;
}

/// Listener switchboard for the bound element
///
/// The engine tracks which kinds are on and only calls `listen`/`unlisten` on
/// a state change, so implementations need not be idempotent.
pub trait ListenerRegistry {
    /// Start delivering `kind` events to the engine.
    ///
    /// # Errors
    ///
    /// Returns [`crate::BoopError::Listener`] if the host cannot subscribe.
    fn listen(&mut self, kind: PointerKind) -> Result<()>;

    /// Stop delivering `kind` events. Never fails.
    fn unlisten(&mut self, kind: PointerKind);
}
