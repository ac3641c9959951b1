use alloc::rc::Rc;
use alloc::string::String;
use core::fmt;

use crate::{NodeId, SlotRef};

/// What a content producer hands to the coordinator.
///
/// A `Cell` is a composite wrapper whose inner node is what actually gets laid out; the
/// wrapper is remembered so lookups can return it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Built {
    Node(NodeId),
    Cell { wrapper: NodeId, content: NodeId },
}

impl Built {
    /// The node that is placed inside the slot.
    pub fn content(&self) -> NodeId {
        match *self {
            Self::Node(node) => node,
            Self::Cell { content, .. } => content,
        }
    }

    pub fn wrapper(&self) -> Option<NodeId> {
        match *self {
            Self::Node(_) => None,
            Self::Cell { wrapper, .. } => Some(wrapper),
        }
    }
}

impl From<NodeId> for Built {
    fn from(node: NodeId) -> Self {
        Self::Node(node)
    }
}

/// A zero-argument content producer. It receives the host so it can create nodes.
pub type Factory<H> = Rc<dyn Fn(&mut H) -> Built>;

/// Content accepted by append/insert, resolved once at the call boundary.
pub enum Content<H> {
    /// Ready-built content. It lives as long as its element.
    Static(Built),
    /// Disposable content: built now, and rebuilt by the factory whenever the slot
    /// re-enters the visible window.
    Factory(Factory<H>),
    /// A slot previously built by [`crate::ListView::disposable_view`].
    Recycled(SlotRef),
}

impl<H> Content<H> {
    pub fn node(node: NodeId) -> Self {
        Self::Static(Built::Node(node))
    }

    pub fn cell(wrapper: NodeId, content: NodeId) -> Self {
        Self::Static(Built::Cell { wrapper, content })
    }

    pub fn factory(factory: impl Fn(&mut H) -> Built + 'static) -> Self {
        Self::Factory(Rc::new(factory))
    }
}

impl<H> From<NodeId> for Content<H> {
    fn from(node: NodeId) -> Self {
        Self::node(node)
    }
}

impl<H> From<Built> for Content<H> {
    fn from(built: Built) -> Self {
        Self::Static(built)
    }
}

impl<H> From<SlotRef> for Content<H> {
    fn from(slot: SlotRef) -> Self {
        Self::Recycled(slot)
    }
}

impl<H> fmt::Debug for Content<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(built) => f.debug_tuple("Static").field(built).finish(),
            Self::Factory(_) => f.write_str("Factory(..)"),
            Self::Recycled(slot) => f.debug_tuple("Recycled").field(slot).finish(),
        }
    }
}

/// Names an existing element for insert/delete.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reference {
    /// First element (in sequence order) carrying this identifier.
    Identifier(String),
    /// The wrapper of a cell element.
    Wrapper(NodeId),
    Slot(SlotRef),
    /// A content node currently placed inside a slot.
    Node(NodeId),
    /// The viewport itself: "after" means at the very start, "before" at the very end.
    Viewport,
}

impl From<&str> for Reference {
    fn from(identifier: &str) -> Self {
        Self::Identifier(identifier.into())
    }
}

impl From<String> for Reference {
    fn from(identifier: String) -> Self {
        Self::Identifier(identifier)
    }
}

impl From<SlotRef> for Reference {
    fn from(slot: SlotRef) -> Self {
        Self::Slot(slot)
    }
}
