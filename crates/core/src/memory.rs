//! In-memory host: element tree and listener log
//!
//! Implements the engine seams without a browser. Useful for headless hosts
//! that render rotation themselves and for exercising the engine in tests.
//!
//! Selector lookup goes through `scraper`: the whole tree is rendered as an
//! HTML fragment, parsed, and matched with a [`scraper::Selector`], so the
//! in-memory host accepts the same selector grammar as `querySelector`
//! (combinators, attribute selectors, pseudo-classes, selector lists).
//!
//! # Examples
//!
//! ```
//! use boop_core::memory::{MemoryListeners, MemoryNode};
//! use boop_core::{BoopConfig, PointerEvent, PointerKind, TiltEngine};
//! use boop_core::geometry::{Point, Rect};
//!
//! let card = MemoryNode::new("div").with_class("card");
//! card.set_rect(Rect::new(0.0, 0.0, 100.0, 100.0));
//! let listeners = MemoryListeners::default();
//!
//! let mut engine = TiltEngine::activate(card.clone(), BoopConfig::new(), listeners.clone())?;
//! assert!(listeners.is_listening(PointerKind::Enter));
//!
//! engine.dispatch(PointerEvent::Enter);
//! engine.dispatch(PointerEvent::Move(Point::new(100.0, 50.0)));
//! assert_eq!(card.style("--rotY").as_deref(), Some("1rad"));
//! # Ok::<(), boop_core::BoopError>(())
//! ```

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{self, Write as _};
use std::rc::{Rc, Weak};

use scraper::{Html, Selector};

use crate::config::StyleMap;
use crate::element::{ListenerRegistry, PointerKind, TiltElement};
use crate::error::BoopError;
use crate::geometry::Rect;
use crate::result::Result;

/// Attribute carrying a node's preorder index in the rendered fragment
const NODE_KEY: &str = "data-boop-node";

struct NodeData {
    tag: String,
    attributes: RefCell<BTreeMap<String, String>>,
    rect: Cell<Rect>,
    style: RefCell<StyleMap>,
    style_writes: Cell<usize>,
    read_only: Cell<bool>,
    parent: RefCell<Weak<NodeData>>,
    children: RefCell<Vec<MemoryNode>>,
}

/// Shared handle to a node of an in-memory element tree
#[derive(Clone)]
pub struct MemoryNode(Rc<NodeData>);

impl MemoryNode {
    /// Create a detached node with a zero-sized bounding box.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self(Rc::new(NodeData {
            tag: tag.into(),
            attributes: RefCell::new(BTreeMap::new()),
            rect: Cell::new(Rect::default()),
            style: RefCell::new(StyleMap::new()),
            style_writes: Cell::new(0),
            read_only: Cell::new(false),
            parent: RefCell::new(Weak::new()),
            children: RefCell::new(Vec::new()),
        }))
    }

    #[must_use]
    pub fn with_id(self, id: impl Into<String>) -> Self {
        self.with_attribute("id", id)
    }

    #[must_use]
    pub fn with_class(self, class: impl Into<String>) -> Self {
        let class = class.into();
        self.0
            .attributes
            .borrow_mut()
            .entry("class".to_string())
            .and_modify(|classes| {
                classes.push(' ');
                classes.push_str(&class);
            })
            .or_insert_with(|| class.clone());
        self
    }

    /// Set an attribute, replacing any previous value.
    #[must_use]
    pub fn with_attribute(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.0
            .attributes
            .borrow_mut()
            .insert(name.into().to_ascii_lowercase(), value.into());
        self
    }

    #[must_use]
    pub fn with_rect(self, rect: Rect) -> Self {
        self.set_rect(rect);
        self
    }

    /// Append `child` as the last child of this node.
    pub fn append_child(&self, child: &Self) {
        *child.0.parent.borrow_mut() = Rc::downgrade(&self.0);
        self.0.children.borrow_mut().push(child.clone());
    }

    /// Detach `child` if it is a direct child of this node.
    pub fn remove_child(&self, child: &Self) {
        let mut children = self.0.children.borrow_mut();
        let before = children.len();
        children.retain(|c| !Rc::ptr_eq(&c.0, &child.0));
        if children.len() != before {
            *child.0.parent.borrow_mut() = Weak::new();
        }
    }

    pub fn set_rect(&self, rect: Rect) {
        self.0.rect.set(rect);
    }

    /// Refuse all further style writes, as a host with a sealed style would.
    pub fn set_read_only(&self, read_only: bool) {
        self.0.read_only.set(read_only);
    }

    #[must_use]
    pub fn tag(&self) -> &str {
        &self.0.tag
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<String> {
        self.0.attributes.borrow().get(name).cloned()
    }

    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.0.parent.borrow().upgrade().map(Self)
    }

    /// Current inline value of a style property.
    #[must_use]
    pub fn style(&self, property: &str) -> Option<String> {
        self.0.style.borrow().get(property).cloned()
    }

    /// Snapshot of all inline style properties.
    #[must_use]
    pub fn styles(&self) -> StyleMap {
        self.0.style.borrow().clone()
    }

    /// Number of successful style writes so far.
    #[must_use]
    pub fn style_writes(&self) -> usize {
        self.0.style_writes.get()
    }

    fn root(&self) -> Self {
        let mut node = self.clone();
        while let Some(parent) = node.parent() {
            node = parent;
        }
        node
    }

    fn is_descendant_of(&self, ancestor: &Self) -> bool {
        let mut current = self.parent();
        while let Some(node) = current {
            if Rc::ptr_eq(&node.0, &ancestor.0) {
                return true;
            }
            current = node.parent();
        }
        false
    }

    /// Render this subtree as HTML, recording each node at its preorder index.
    fn render(&self, markup: &mut String, nodes: &mut Vec<Self>) {
        let index = nodes.len();
        nodes.push(self.clone());

        let _ = write!(markup, "<{} {NODE_KEY}=\"{index}\"", self.0.tag);
        for (name, value) in self.0.attributes.borrow().iter() {
            let _ = write!(markup, " {name}=\"{}\"", escape_attribute(value));
        }
        markup.push('>');
        for child in self.0.children.borrow().iter() {
            child.render(markup, nodes);
        }
        let _ = write!(markup, "</{}>", self.0.tag);
    }
}

fn escape_attribute(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
}

impl fmt::Debug for MemoryNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryNode")
            .field("tag", &self.0.tag)
            .field("attributes", &self.0.attributes.borrow())
            .finish_non_exhaustive()
    }
}

impl TiltElement for MemoryNode {
    /// First strict descendant matching `selector`, in document order.
    ///
    /// As with `querySelector`, the selector is matched against the whole
    /// tree, so ancestors outside this node may satisfy its combinators.
    fn query_selector(&self, selector: &str) -> Result<Option<Self>> {
        let parsed = Selector::parse(selector)
            .map_err(|e| BoopError::invalid_selector(selector, e.to_string()))?;

        let mut markup = String::new();
        let mut nodes = Vec::new();
        self.root().render(&mut markup, &mut nodes);
        let fragment = Html::parse_fragment(&markup);

        let found = fragment
            .select(&parsed)
            .filter_map(|element| element.value().attr(NODE_KEY))
            .filter_map(|index| index.parse::<usize>().ok())
            .filter_map(|index| nodes.get(index))
            .find(|node| node.is_descendant_of(self))
            .cloned();
        Ok(found)
    }

    fn bounding_rect(&self) -> Rect {
        self.0.rect.get()
    }

    fn set_style_property(&self, property: &str, value: &str) -> Result<()> {
        if self.0.read_only.get() {
            return Err(BoopError::style_write(property, "style is read-only"));
        }
        self.0
            .style
            .borrow_mut()
            .insert(property.to_string(), value.to_string());
        self.0.style_writes.set(self.0.style_writes.get() + 1);
        Ok(())
    }

    fn is_same_node(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

#[derive(Debug, Default)]
struct ListenerLog {
    active: BTreeSet<PointerKind>,
    refused: BTreeSet<PointerKind>,
    listen_calls: usize,
    unlisten_calls: usize,
}

/// Listener registry that records subscriptions
///
/// Clones share the same log, so a test can keep one copy while the engine
/// owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryListeners(Rc<RefCell<ListenerLog>>);

impl MemoryListeners {
    #[must_use]
    pub fn is_listening(&self, kind: PointerKind) -> bool {
        self.0.borrow().active.contains(&kind)
    }

    /// Currently subscribed kinds.
    #[must_use]
    pub fn active(&self) -> Vec<PointerKind> {
        self.0.borrow().active.iter().copied().collect()
    }

    #[must_use]
    pub fn listen_calls(&self) -> usize {
        self.0.borrow().listen_calls
    }

    #[must_use]
    pub fn unlisten_calls(&self) -> usize {
        self.0.borrow().unlisten_calls
    }

    /// Make future `listen(kind)` calls fail.
    pub fn refuse(&self, kind: PointerKind) {
        self.0.borrow_mut().refused.insert(kind);
    }
}

impl ListenerRegistry for MemoryListeners {
    fn listen(&mut self, kind: PointerKind) -> Result<()> {
        let mut log = self.0.borrow_mut();
        log.listen_calls += 1;
        if log.refused.contains(&kind) {
            return Err(BoopError::listener(kind, "refused by host"));
        }
        log.active.insert(kind);
        Ok(())
    }

    fn unlisten(&mut self, kind: PointerKind) {
        let mut log = self.0.borrow_mut();
        log.unlisten_calls += 1;
        log.active.remove(&kind);
    }
}
