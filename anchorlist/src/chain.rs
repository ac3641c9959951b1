use alloc::vec::Vec;

use crate::{Attribute, Item, LayoutHost, NodeId, Relation, RelationId};

/// One end of a chain link: a slot, or the viewport edge when the link sits at the start
/// or end of the chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum End {
    Viewport,
    Slot(NodeId),
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct Link {
    /// Supplies its bottom edge (viewport: top edge).
    pub above: End,
    /// Supplies its top edge (viewport: bottom edge).
    pub below: End,
    pub relation: RelationId,
}

/// The top/bottom relations stacking slots between the viewport edges.
///
/// A healthy chain has exactly one link starting at the viewport, exactly one ending at it,
/// and one link per adjacent pair in between.
#[derive(Debug, Default)]
pub(crate) struct Chain {
    links: Vec<Link>,
}

impl Chain {
    #[cfg(test)]
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Installs `below.top == above.bottom + spacing`. A viewport-to-viewport link is a
    /// no-op: an empty list has no chain.
    pub fn link<H: LayoutHost>(
        &mut self,
        host: &mut H,
        above: End,
        below: End,
        spacing: f64,
        priority: u16,
    ) -> Option<RelationId> {
        let relation = match (above, below) {
            (End::Viewport, End::Viewport) => return None,
            (End::Viewport, End::Slot(slot)) => Relation::between(
                Item::Node(slot),
                Attribute::Top,
                Item::Viewport,
                Attribute::Top,
                spacing,
                priority,
            ),
            (End::Slot(slot), End::Viewport) => Relation::between(
                Item::Viewport,
                Attribute::Bottom,
                Item::Node(slot),
                Attribute::Bottom,
                spacing,
                priority,
            ),
            (End::Slot(upper), End::Slot(lower)) => Relation::between(
                Item::Node(lower),
                Attribute::Top,
                Item::Node(upper),
                Attribute::Bottom,
                spacing,
                priority,
            ),
        };
        let relation = host.add_relation(relation);
        self.links.push(Link {
            above,
            below,
            relation,
        });
        Some(relation)
    }

    /// Removes the link directly joining `above` to `below`, if present.
    pub fn unlink<H: LayoutHost>(&mut self, host: &mut H, above: End, below: End) -> bool {
        let Some(pos) = self
            .links
            .iter()
            .position(|l| l.above == above && l.below == below)
        else {
            return false;
        };
        let link = self.links.remove(pos);
        host.deactivate(link.relation);
        true
    }

    /// Removes the chain-end link (`last.bottom -> viewport.bottom`).
    pub fn unlink_end<H: LayoutHost>(&mut self, host: &mut H) {
        self.links.retain(|l| {
            if l.below == End::Viewport {
                host.deactivate(l.relation);
                false
            } else {
                true
            }
        });
    }

    /// Removes every link touching `slot`.
    pub fn unlink_slot<H: LayoutHost>(&mut self, host: &mut H, slot: NodeId) {
        let end = End::Slot(slot);
        self.links.retain(|l| {
            if l.above == end || l.below == end {
                host.deactivate(l.relation);
                false
            } else {
                true
            }
        });
    }

    pub fn clear<H: LayoutHost>(&mut self, host: &mut H) {
        for link in self.links.drain(..) {
            host.deactivate(link.relation);
        }
    }

    #[cfg(test)]
    pub fn start(&self) -> Option<&Link> {
        self.links.iter().find(|l| l.above == End::Viewport)
    }

    #[cfg(test)]
    pub fn between(&self, above: End, below: End) -> Option<&Link> {
        self.links
            .iter()
            .find(|l| l.above == above && l.below == below)
    }
}
