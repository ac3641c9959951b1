use alloc::boxed::Box;
use alloc::format;

use crate::chain::End;
use crate::coordinator::Completion;
use crate::element::{Element, Slot};
use crate::transition::Queued;
use crate::{Content, Coordinator, Factory, LayoutHost, ListError, Reference, SlotRef};

/// Where an inserted element goes relative to its reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    After,
    Before,
}

impl<H: LayoutHost> Coordinator<H> {
    /// Builds a disposable slot: its content comes from `factory` now and again whenever the
    /// slot re-enters the visible window. Pass the returned slot to append/insert as
    /// [`Content::Recycled`].
    pub fn disposable_view(&mut self, host: &mut H, factory: Factory<H>) -> SlotRef {
        let mut slot = Slot::new(host, self.options.global_clips_to_bounds);
        let built = factory(host);
        if let Some(wrapper) = slot.place(host, built) {
            self.wrappers.insert(slot.node, wrapper);
        }
        slot.factory = Some(factory);
        let slot_ref = slot.slot_ref();
        self.staged.push(slot);
        slot_ref
    }

    /// Appends `content` below the last element.
    pub fn append(&mut self, host: &mut H, content: Content<H>) -> Result<SlotRef, ListError> {
        self.ensure_idle()?;
        let mut slot = self.build_slot(host, content)?;
        let priority = self.options.relation_priority;
        let insets = self.options.insets_for_new(self.elements.is_empty());

        self.chain.unlink_end(host);
        slot.bind_content(host, insets, priority);
        slot.attach(host, priority);
        let above = self
            .elements
            .last()
            .map_or(End::Viewport, |e| End::Slot(e.node()));
        let node = slot.node;
        self.chain.link(host, above, End::Slot(node), 0.0, priority);
        self.chain.link(host, End::Slot(node), End::Viewport, 0.0, priority);

        let mut element = Element::new(slot, insets);
        element.inserting = self.batch.is_some();
        self.elements.push(element);
        ltrace!(slot = node.0, len = self.elements.len(), "append");
        Ok(SlotRef(node))
    }

    /// Inserts `content` after or before the element named by `reference`.
    ///
    /// Outside a batch the new slot grows in through an insertion transition.
    pub fn insert(
        &mut self,
        host: &mut H,
        content: Content<H>,
        placement: Placement,
        reference: &Reference,
    ) -> Result<SlotRef, ListError> {
        self.ensure_idle()?;
        let anchor = self.resolve_reference(reference)?;
        let (previous, next, index) = self.boundaries(anchor, placement);
        let mut slot = self.build_slot(host, content)?;
        let priority = self.options.relation_priority;
        let insets = self.options.insets_for_new(index == 0);
        if index == 0 {
            if let Some(first) = self.elements.first_mut() {
                first.insets.top = self.options.global_spacing;
                let displaced = first.insets;
                first.slot.apply_insets(host, displaced);
            }
        }

        self.chain.unlink(host, previous, next);
        slot.bind_content(host, insets, priority);
        slot.attach(host, priority);
        let node = slot.node;
        self.chain.link(host, previous, End::Slot(node), 0.0, priority);
        self.chain.link(host, End::Slot(node), next, 0.0, priority);

        let mut element = Element::new(slot, insets);
        element.inserting = true;
        self.elements.insert(index, element);
        ltrace!(slot = node.0, index, ?placement, "insert");

        if self.batch.is_none() {
            self.queued
                .push_back(Queued::Insertion(self.options.transition_duration));
            self.drive(host);
        }
        Ok(SlotRef(node))
    }

    /// Marks the element named by `reference` for deletion, leaving `remain_spacing` between
    /// its surviving neighbours.
    ///
    /// Marking is idempotent: deleting an element that is already being deleted keeps its
    /// original spacing and only attaches `completion` to the pending removal.
    pub fn delete(
        &mut self,
        host: &mut H,
        reference: &Reference,
        remain_spacing: f64,
        completion: Option<Completion>,
    ) -> Result<(), ListError> {
        let End::Slot(slot) = self.resolve_reference(reference)? else {
            lwarn!("the viewport cannot be deleted");
            return Err(ListError::InvalidReference(format!("{reference:?}")));
        };
        let Some(index) = self.index_of(slot) else {
            return Err(ListError::InvalidReference(format!("{reference:?}")));
        };

        if self.is_transitioning() {
            if self.elements[index].deleting {
                self.completions.extend(completion);
                return Ok(());
            }
            return self.ensure_idle();
        }

        let element = &mut self.elements[index];
        if !element.deleting {
            element.deleting = true;
            element.inserting = false;
            element.remain_spacing = remain_spacing;
        }
        ltrace!(slot = slot.0, remain_spacing, batched = self.batch.is_some(), "delete");

        if self.batch.is_some() {
            if let Some(completion) = completion {
                completion();
            }
            return Ok(());
        }
        self.completions.extend(completion);
        self.queued
            .push_back(Queued::Deletion(self.options.transition_duration));
        self.drive(host);
        Ok(())
    }

    /// Removes every element immediately, without animation, cancelling any transition in
    /// flight. Pending completions are dropped without firing.
    pub fn delete_all(&mut self, host: &mut H) {
        ldebug!(len = self.elements.len(), "delete_all");
        self.active = None;
        self.queued.clear();
        self.completions.clear();
        self.chain.clear(host);
        for mut element in self.elements.drain(..) {
            element.slot.detach(host);
        }
        let staged = &self.staged;
        self.wrappers
            .retain(|slot, _| staged.iter().any(|s| s.node == *slot));
    }

    /// Resolves `content` into a slot holding it, not yet attached to the viewport.
    fn build_slot(&mut self, host: &mut H, content: Content<H>) -> Result<Slot<H>, ListError> {
        match content {
            Content::Static(built) => {
                let mut slot = Slot::new(host, self.options.global_clips_to_bounds);
                if let Some(wrapper) = slot.place(host, built) {
                    self.wrappers.insert(slot.node, wrapper);
                }
                Ok(slot)
            }
            Content::Factory(factory) => {
                let slot = self.disposable_view(host, factory);
                self.take_staged(host, slot)
            }
            Content::Recycled(slot) => self.take_staged(host, slot),
        }
    }

    fn take_staged(&mut self, host: &mut H, slot: SlotRef) -> Result<Slot<H>, ListError> {
        let Some(pos) = self.staged.iter().position(|s| s.node == slot.node()) else {
            lwarn!(slot = slot.0.0, "recycled slot was not built by disposable_view");
            return Err(ListError::InvalidReference(format!("{slot:?}")));
        };
        let mut staged = self.staged.remove(pos);
        if staged.content.is_none() {
            let Some(factory) = staged.factory.clone() else {
                return Err(ListError::EmptySlot);
            };
            let built = factory(host);
            if let Some(wrapper) = staged.place(host, built) {
                self.wrappers.insert(staged.node, wrapper);
            }
        }
        Ok(staged)
    }

    /// Neighbours of the insertion point and the index the new element takes.
    fn boundaries(&self, anchor: End, placement: Placement) -> (End, End, usize) {
        let at = |i: usize| {
            self.elements
                .get(i)
                .map_or(End::Viewport, |e| End::Slot(e.node()))
        };
        match (placement, anchor) {
            (Placement::After, End::Viewport) => (End::Viewport, at(0), 0),
            (Placement::Before, End::Viewport) => {
                let len = self.elements.len();
                let previous = len.checked_sub(1).map_or(End::Viewport, at);
                (previous, End::Viewport, len)
            }
            (Placement::After, End::Slot(slot)) => {
                let i = self.index_of(slot).unwrap_or(0);
                (End::Slot(slot), at(i + 1), i + 1)
            }
            (Placement::Before, End::Slot(slot)) => {
                let i = self.index_of(slot).unwrap_or(0);
                let previous = i.checked_sub(1).map_or(End::Viewport, at);
                (previous, End::Slot(slot), i)
            }
        }
    }

    /// Convenience for callers that hold a plain closure.
    pub fn delete_with(
        &mut self,
        host: &mut H,
        reference: &Reference,
        remain_spacing: f64,
        completion: impl FnOnce() + 'static,
    ) -> Result<(), ListError> {
        self.delete(host, reference, remain_spacing, Some(Box::new(completion)))
    }
}
