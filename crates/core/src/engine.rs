//! Tilt interaction engine
//!
//! Owns the pointer session state machine for one bound element:
//!
//! ```text
//!            activate                 enter                    leave
//!   (none) ──────────► Idle ─────────────────► Tracking ─────────────► Idle
//!                       ▲  listens: enter       listens: enter,         │
//!                       │                        move, leave            │
//!                       └───────────────────────────────────────────────┘
//!   deactivate (from any state): all listeners off, rotation zeroed
//! ```
//!
//! All work happens synchronously inside [`TiltEngine::dispatch`], in the
//! order the host delivers events. Output goes to two style variables and an
//! optional transform callback.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use crate::config::BoopConfig;
use crate::element::{ListenerRegistry, PointerEvent, PointerKind, TiltElement};
use crate::error::BoopError;
use crate::geometry::{Frame, Point, Rotation};
use crate::result::{Result, ResultExt};
use crate::style::{CONTEXT_STYLE, DEFAULT_TARGET_STYLE, css_property_name, rotation_variables};

/// Caller-supplied output hook, invoked with the resolved target on every
/// rotation change.
pub type TransformFn<E> = Box<dyn FnMut(&E, Rotation)>;

/// Deferred deactivation request
///
/// Lets code running inside a handler (typically a transform callback) cancel
/// the engine that is currently dispatching to it. The engine honors the
/// request as soon as the current event has been handled.
#[derive(Debug, Clone, Default)]
pub struct Cancellation(Rc<Cell<bool>>);

impl Cancellation {
    pub fn request(&self) {
        self.0.set(true);
    }

    #[must_use]
    pub fn is_requested(&self) -> bool {
        self.0.get()
    }
}

/// Pointer session state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Session {
    /// No pointer over the element
    Idle,
    /// Pointer over the element, normalizing against this frame
    Tracking(Frame),
    /// Pointer over a zero-sized element; moves are skipped
    Degenerate,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Subscriptions {
    enter: bool,
    moving: bool,
    leave: bool,
}

impl Subscriptions {
    const fn is_on(self, kind: PointerKind) -> bool {
        match kind {
            PointerKind::Enter => self.enter,
            PointerKind::Move => self.moving,
            PointerKind::Leave => self.leave,
        }
    }

    const fn flag_mut(&mut self, kind: PointerKind) -> &mut bool {
        match kind {
            PointerKind::Enter => &mut self.enter,
            PointerKind::Move => &mut self.moving,
            PointerKind::Leave => &mut self.leave,
        }
    }
}

/// Tilt behavior attached to one element
///
/// Created by [`TiltEngine::activate`], reconfigured by
/// [`TiltEngine::configure`], torn down by [`TiltEngine::deactivate`] (or on
/// drop). The host feeds pointer events through [`TiltEngine::dispatch`].
pub struct TiltEngine<E: TiltElement, L: ListenerRegistry> {
    element: E,
    target: E,
    listeners: L,
    config: BoopConfig,
    session: Session,
    rotation: Rotation,
    subscriptions: Subscriptions,
    transform: Option<TransformFn<E>>,
    cancellation: Cancellation,
    active: bool,
}

impl<E: TiltElement, L: ListenerRegistry> TiltEngine<E, L> {
    /// Bind the behavior to `element`.
    ///
    /// Resolves the target, applies the initial style and subscribes the
    /// pointer-enter listener. Rotation starts at rest.
    ///
    /// # Errors
    ///
    /// - [`BoopError::TargetResolution`] / [`BoopError::InvalidSelector`] if
    ///   the selector does not resolve; nothing is written in that case
    /// - [`BoopError::StyleWrite`] if the host refuses the initial style
    /// - [`BoopError::Listener`] if pointer-enter cannot be subscribed
    pub fn activate(element: E, config: BoopConfig, listeners: L) -> Result<Self> {
        let target = resolve_target(&element, &config)?;
        apply_initial_style(&element, &target, &config)?;

        let mut engine = Self {
            element,
            target,
            listeners,
            config,
            session: Session::Idle,
            rotation: Rotation::ZERO,
            subscriptions: Subscriptions::default(),
            transform: None,
            cancellation: Cancellation::default(),
            active: true,
        };
        engine.set_subscription(PointerKind::Enter, true)?;

        tracing::debug!(
            selector = ?engine.config.selector(),
            variables_on_node = engine.config.variables_on_node,
            "boop activated"
        );
        Ok(engine)
    }

    /// Apply a new configuration without re-binding.
    ///
    /// Re-resolves the target and re-applies the initial style. In-flight
    /// rotation is kept; the next output lands wherever the new configuration
    /// says.
    ///
    /// # Errors
    ///
    /// - [`BoopError::Inactive`] after [`TiltEngine::deactivate`]
    /// - [`BoopError::TargetResolution`] / [`BoopError::InvalidSelector`]:
    ///   target, configuration and style are left untouched
    /// - [`BoopError::StyleWrite`] if the host refuses the style payload
    pub fn configure(&mut self, config: BoopConfig) -> Result<()> {
        if !self.active {
            return Err(BoopError::Inactive);
        }

        let target = resolve_target(&self.element, &config)?;
        apply_initial_style(&self.element, &target, &config)?;

        tracing::debug!(
            selector = ?config.selector(),
            variables_on_node = config.variables_on_node,
            "boop reconfigured"
        );
        self.target = target;
        self.config = config;
        Ok(())
    }

    /// Tear down all listeners and zero the rotation.
    ///
    /// Styles are left as they are. Calling it again is a no-op.
    pub fn deactivate(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;

        for kind in PointerKind::ALL {
            // Unsubscribing never fails
            let _ = self.set_subscription(kind, false);
        }
        self.session = Session::Idle;
        self.rotation = Rotation::ZERO;
        tracing::debug!("boop deactivated");
    }

    /// Handle one pointer event from the host.
    ///
    /// Events of a kind that is not currently subscribed are ignored, so a
    /// move delivered after its session's leave has no effect.
    pub fn dispatch(&mut self, event: PointerEvent) {
        if !self.subscriptions.is_on(event.kind()) {
            tracing::trace!(kind = %event.kind(), "ignoring unsubscribed pointer event");
            return;
        }

        match event {
            PointerEvent::Enter => self.on_enter(),
            PointerEvent::Move(pointer) => self.on_move(pointer),
            PointerEvent::Leave => self.on_leave(),
        }

        if self.cancellation.is_requested() {
            self.deactivate();
        }
    }

    /// Install the transform callback, replacing any previous one.
    pub fn on_transform(&mut self, transform: impl FnMut(&E, Rotation) + 'static) {
        self.transform = Some(Box::new(transform));
    }

    pub fn clear_transform(&mut self) {
        self.transform = None;
    }

    /// Handle for requesting deactivation from inside a handler.
    #[must_use]
    pub fn cancellation(&self) -> Cancellation {
        self.cancellation.clone()
    }

    #[must_use]
    pub const fn rotation(&self) -> Rotation {
        self.rotation
    }

    #[must_use]
    pub const fn session(&self) -> Session {
        self.session
    }

    #[must_use]
    pub const fn is_tracking(&self) -> bool {
        !matches!(self.session, Session::Idle)
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    #[must_use]
    pub const fn is_subscribed(&self, kind: PointerKind) -> bool {
        self.subscriptions.is_on(kind)
    }

    #[must_use]
    pub const fn config(&self) -> &BoopConfig {
        &self.config
    }

    /// The bound element.
    #[must_use]
    pub const fn element(&self) -> &E {
        &self.element
    }

    /// The element being rotated.
    #[must_use]
    pub const fn target(&self) -> &E {
        &self.target
    }

    fn on_enter(&mut self) {
        let rect = self.element.bounding_rect();
        self.session = match Frame::from_rect(rect) {
            Ok(frame) => Session::Tracking(frame),
            Err(e) => {
                tracing::warn!(error = %e, "skipping rotation for this pointer session");
                Session::Degenerate
            }
        };

        let subscribed = self
            .set_subscription(PointerKind::Move, true)
            .and_then(|()| self.set_subscription(PointerKind::Leave, true))
            .into_option_logged("failed to start pointer session");
        if subscribed.is_none() {
            self.end_session();
            return;
        }

        tracing::debug!(?rect, "pointer session started");
    }

    fn on_move(&mut self, pointer: Point) {
        let Session::Tracking(frame) = self.session else {
            tracing::trace!("move in degenerate session skipped");
            return;
        };
        if !pointer.is_finite() {
            tracing::warn!(?pointer, "non-finite pointer position skipped");
            return;
        }

        self.rotation = frame.rotation_at(pointer);
        tracing::trace!(
            rot_x = self.rotation.rot_x,
            rot_y = self.rotation.rot_y,
            "rotation updated"
        );
        self.apply_output();
    }

    fn on_leave(&mut self) {
        self.end_session();
        self.rotation = Rotation::ZERO;
        self.apply_output();
        tracing::debug!("pointer session ended");
    }

    fn end_session(&mut self) {
        self.set_subscription(PointerKind::Move, false)
            .and_then(|()| self.set_subscription(PointerKind::Leave, false))
            .into_option_logged("failed to end pointer session");
        self.session = Session::Idle;
    }

    fn apply_output(&mut self) {
        let destination = if self.config.variables_on_node {
            &self.element
        } else {
            &self.target
        };
        for (name, value) in rotation_variables(self.rotation) {
            destination
                .set_style_property(name, &value)
                .into_option_logged("failed to write rotation variable");
        }

        if let Some(transform) = self.transform.as_mut() {
            transform(&self.target, self.rotation);
        }
    }

    fn set_subscription(&mut self, kind: PointerKind, on: bool) -> Result<()> {
        let flag = self.subscriptions.flag_mut(kind);
        if *flag == on {
            return Ok(());
        }
        if on {
            self.listeners.listen(kind)?;
        } else {
            self.listeners.unlisten(kind);
        }
        *flag = on;
        Ok(())
    }
}

impl<E: TiltElement, L: ListenerRegistry> Drop for TiltEngine<E, L> {
    fn drop(&mut self) {
        self.deactivate();
    }
}

impl<E: TiltElement, L: ListenerRegistry> fmt::Debug for TiltEngine<E, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TiltEngine")
            .field("config", &self.config)
            .field("session", &self.session)
            .field("rotation", &self.rotation)
            .field("subscriptions", &self.subscriptions)
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}

/// Locate the element to rotate. Performs no writes.
fn resolve_target<E: TiltElement>(element: &E, config: &BoopConfig) -> Result<E> {
    match config.selector() {
        None => Ok(element.clone()),
        Some(selector) => element
            .query_selector(selector)?
            .ok_or_else(|| BoopError::target_resolution(selector)),
    }
}

fn apply_initial_style<E: TiltElement>(element: &E, target: &E, config: &BoopConfig) -> Result<()> {
    match &config.initial_style {
        Some(style) => {
            for (key, value) in style {
                target.set_style_property(&css_property_name(key), value)?;
            }
        }
        None => {
            for (property, value) in DEFAULT_TARGET_STYLE {
                target.set_style_property(property, value)?;
            }
        }
    }

    if !target.is_same_node(element) {
        for (property, value) in CONTEXT_STYLE {
            element.set_style_property(property, value)?;
        }
    }
    Ok(())
}
