//! A headless coordinator for vertically stacked, anchor-laid-out lists.
//!
//! For adapter-level utilities (tweened hosts, scroll anchoring), see the
//! `anchorlist-adapter` crate.
//!
//! The coordinator keeps an ordered sequence of elements inside a scrollable viewport. Each
//! element's content sits in a slot, and adjacent slots are joined by a chain of top/bottom
//! relations running from the viewport's top edge to its bottom edge. On top of that it
//! provides:
//! - append, insert after/before, and delete with grow/collapse transitions
//! - batched updates with three commit policies
//! - disposable (factory-built) content that is discarded outside a visible window and
//!   rebuilt when it scrolls back in
//!
//! It is UI-agnostic. The platform is expected to implement [`LayoutHost`]: create nodes,
//! store relations, resolve them into frames, and report when animated passes finish.
//! [`SimHost`] is a small reference implementation.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod attributes;
mod batch;
mod chain;
mod content;
mod coordinator;
mod element;
mod error;
mod host;
mod list_view;
mod mutation;
mod options;
mod sim;
mod transition;
mod types;
mod virtualize;


pub use attributes::Attributes;
pub use content::{Built, Content, Factory, Reference};
pub use coordinator::{Completion, Coordinator, ElementInfo};
pub use error::ListError;
pub use host::LayoutHost;
pub use list_view::ListView;
pub use mutation::Placement;
pub use options::{DEFAULT_RELATION_PRIORITY, ListOptions};
pub use sim::SimHost;
pub use types::{
    AnimationId, Attribute, Insets, Item, NodeId, Rect, Relation, RelationId, SlotRef,
    UpdatePolicy, VisibleWindow,
};
