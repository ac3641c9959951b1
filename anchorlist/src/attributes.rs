use alloc::string::String;

use crate::{Coordinator, Insets, LayoutHost, SlotRef};

/// Fluent post-configuration of a freshly appended or inserted element.
///
/// ```ignore
/// list.append(Content::node(title))?
///     .identifier("title")
///     .insets(Insets::uniform(8.0));
/// ```
pub struct Attributes<'a, H> {
    coordinator: &'a mut Coordinator<H>,
    host: &'a mut H,
    slot: SlotRef,
}

impl<'a, H: LayoutHost> Attributes<'a, H> {
    pub(crate) fn new(coordinator: &'a mut Coordinator<H>, host: &'a mut H, slot: SlotRef) -> Self {
        Self {
            coordinator,
            host,
            slot,
        }
    }

    pub fn slot(&self) -> SlotRef {
        self.slot
    }

    pub fn identifier(mut self, identifier: impl Into<String>) -> Self {
        if let Some(element) = self.coordinator.element_mut(self.slot.node()) {
            element.identifier = Some(identifier.into());
        }
        self
    }

    /// Replaces the content-to-slot margins.
    pub fn insets(mut self, insets: Insets) -> Self {
        self.retune(|current| *current = insets);
        self
    }

    /// Replaces the gap to the previous element (the top margin).
    pub fn spacing(mut self, spacing: f64) -> Self {
        self.retune(|current| current.top = spacing);
        self
    }

    fn retune(&mut self, f: impl FnOnce(&mut Insets)) {
        let node = self.slot.node();
        let Some(element) = self.coordinator.element_mut(node) else {
            return;
        };
        f(&mut element.insets);
        let insets = element.insets;
        let inserting = element.inserting;
        element.slot.apply_insets(self.host, insets);
        if inserting {
            self.coordinator.retarget_insertion(self.host, node, insets);
        }
    }

    pub fn clips_to_bounds(mut self, clips: bool) -> Self {
        self.host.set_clips_to_bounds(self.slot.node(), clips);
        self
    }
}

impl<H> core::fmt::Debug for Attributes<'_, H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Attributes")
            .field("slot", &self.slot)
            .finish_non_exhaustive()
    }
}
