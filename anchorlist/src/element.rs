use alloc::string::String;
use alloc::vec::Vec;

use crate::{
    Attribute, Built, Factory, Insets, Item, LayoutHost, NodeId, Relation, RelationId, SlotRef,
};

/// Relations binding a content node to the four edges of its slot.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct ContentEdges {
    pub leading: Option<RelationId>,
    pub trailing: Option<RelationId>,
    pub top: Option<RelationId>,
    /// Detached while the slot height is held by a transition.
    pub bottom: Option<RelationId>,
}

/// A holder node in the chain together with the relations it owns.
pub(crate) struct Slot<H> {
    pub node: NodeId,
    pub content: Option<NodeId>,
    pub edges: ContentEdges,
    /// Width/leading/trailing bindings to the viewport.
    pub frame: Vec<RelationId>,
    /// Fixed height standing in for natural sizing (transitions, dematerialized content).
    pub height_hold: Option<RelationId>,
    pub factory: Option<Factory<H>>,
}

impl<H: LayoutHost> Slot<H> {
    pub fn new(host: &mut H, clips: bool) -> Self {
        let node = host.create_slot();
        host.set_clips_to_bounds(node, clips);
        Self {
            node,
            content: None,
            edges: ContentEdges::default(),
            frame: Vec::new(),
            height_hold: None,
            factory: None,
        }
    }

    pub fn slot_ref(&self) -> SlotRef {
        SlotRef(self.node)
    }

    pub fn is_disposable(&self) -> bool {
        self.factory.is_some()
    }

    /// Places `built` inside the slot without binding it yet. Returns the wrapper, if any.
    pub fn place(&mut self, host: &mut H, built: Built) -> Option<NodeId> {
        let content = built.content();
        host.add_child(Item::Node(self.node), content);
        self.content = Some(content);
        built.wrapper()
    }

    pub fn bind_content(&mut self, host: &mut H, insets: Insets, priority: u16) {
        let Some(content) = self.content else {
            return;
        };
        let (content, slot) = (Item::Node(content), Item::Node(self.node));
        self.edges = ContentEdges {
            leading: Some(host.add_relation(Relation::between(
                content,
                Attribute::Leading,
                slot,
                Attribute::Leading,
                insets.left,
                priority,
            ))),
            trailing: Some(host.add_relation(Relation::between(
                content,
                Attribute::Trailing,
                slot,
                Attribute::Trailing,
                -insets.right,
                priority,
            ))),
            top: Some(host.add_relation(Relation::between(
                content,
                Attribute::Top,
                slot,
                Attribute::Top,
                insets.top,
                priority,
            ))),
            bottom: None,
        };
        self.bind_bottom(host, insets, priority);
    }

    /// (Re)installs the content-bottom relation so the slot follows its content's size.
    pub fn bind_bottom(&mut self, host: &mut H, insets: Insets, priority: u16) {
        let Some(content) = self.content else {
            return;
        };
        if self.edges.bottom.is_some() {
            return;
        }
        self.edges.bottom = Some(host.add_relation(Relation::between(
            Item::Node(content),
            Attribute::Bottom,
            Item::Node(self.node),
            Attribute::Bottom,
            -insets.bottom,
            priority,
        )));
    }

    pub fn detach_bottom(&mut self, host: &mut H) {
        if let Some(bottom) = self.edges.bottom.take() {
            host.deactivate(bottom);
        }
    }

    pub fn unbind_content(&mut self, host: &mut H) {
        let edges = core::mem::take(&mut self.edges);
        for relation in [edges.leading, edges.trailing, edges.top, edges.bottom]
            .into_iter()
            .flatten()
        {
            host.deactivate(relation);
        }
    }

    /// Retunes the content-edge constants in place.
    pub fn apply_insets(&mut self, host: &mut H, insets: Insets) {
        if let Some(r) = self.edges.leading {
            host.set_constant(r, insets.left);
        }
        if let Some(r) = self.edges.trailing {
            host.set_constant(r, -insets.right);
        }
        if let Some(r) = self.edges.top {
            host.set_constant(r, insets.top);
        }
        if let Some(r) = self.edges.bottom {
            host.set_constant(r, -insets.bottom);
        }
    }

    /// Attaches the slot to the viewport and binds its horizontal extent.
    pub fn attach(&mut self, host: &mut H, priority: u16) {
        host.add_child(Item::Viewport, self.node);
        let slot = Item::Node(self.node);
        for attribute in [Attribute::Width, Attribute::Leading, Attribute::Trailing] {
            self.frame.push(host.add_relation(Relation::between(
                slot,
                attribute,
                Item::Viewport,
                attribute,
                0.0,
                priority,
            )));
        }
    }

    pub fn hold_height(&mut self, host: &mut H, height: f64, priority: u16) -> RelationId {
        match self.height_hold {
            Some(hold) => {
                host.set_constant(hold, height);
                hold
            }
            None => {
                let hold = host.add_relation(Relation::fixed_height(self.node, height, priority));
                self.height_hold = Some(hold);
                hold
            }
        }
    }

    pub fn release_height(&mut self, host: &mut H) {
        if let Some(hold) = self.height_hold.take() {
            host.deactivate(hold);
        }
    }

    /// Removes the content node from the slot, dropping its bindings.
    pub fn discard_content(&mut self, host: &mut H) -> Option<NodeId> {
        self.unbind_content(host);
        let content = self.content.take()?;
        host.remove_from_parent(content);
        Some(content)
    }

    /// Detaches the slot from the viewport and drops every relation it owns.
    pub fn detach(&mut self, host: &mut H) {
        self.unbind_content(host);
        self.release_height(host);
        for relation in self.frame.drain(..) {
            host.deactivate(relation);
        }
        host.remove_from_parent(self.node);
    }
}

/// One entry of the sequence.
pub(crate) struct Element<H> {
    pub slot: Slot<H>,
    pub insets: Insets,
    pub identifier: Option<String>,
    pub deleting: bool,
    pub inserting: bool,
    /// Gap left behind once this element is deleted.
    pub remain_spacing: f64,
}

impl<H> Element<H> {
    pub fn new(slot: Slot<H>, insets: Insets) -> Self {
        Self {
            slot,
            insets,
            identifier: None,
            deleting: false,
            inserting: false,
            remain_spacing: 0.0,
        }
    }

    pub fn node(&self) -> NodeId {
        self.slot.node
    }
}
