use alloc::boxed::Box;
use alloc::collections::{BTreeMap, VecDeque};
use alloc::format;
use alloc::vec::Vec;

use crate::chain::{Chain, End};
use crate::element::{Element, Slot};
use crate::transition::{Queued, Transition};
use crate::{Insets, LayoutHost, ListError, ListOptions, NodeId, Reference, SlotRef, UpdatePolicy};

/// Fired once the mutation it was attached to has fully settled.
pub type Completion = Box<dyn FnOnce()>;

/// Read-only view of one element, in sequence order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ElementInfo<'a> {
    pub slot: SlotRef,
    pub identifier: Option<&'a str>,
    pub insets: Insets,
    pub inserting: bool,
    pub deleting: bool,
    pub disposable: bool,
    /// `false` while a disposable slot is parked at its cached height.
    pub materialized: bool,
}

/// Per-viewport list state: the ordered elements, the anchor chain that stacks their slots,
/// and the transition currently driving the host.
///
/// Every operation borrows the host for its duration; the coordinator itself holds no UI
/// objects, only [`NodeId`]/[`crate::RelationId`] handles. Most callers use it through
/// [`crate::ListView`], which owns both.
pub struct Coordinator<H> {
    pub(crate) options: ListOptions,
    pub(crate) elements: Vec<Element<H>>,
    /// Disposable slots built by `disposable_view` and not yet placed in the sequence.
    pub(crate) staged: Vec<Slot<H>>,
    /// slot -> cell wrapper. Identity only; the wrapper belongs to the caller.
    pub(crate) wrappers: BTreeMap<NodeId, NodeId>,
    pub(crate) chain: Chain,
    pub(crate) batch: Option<UpdatePolicy>,
    pub(crate) active: Option<Transition>,
    pub(crate) queued: VecDeque<Queued>,
    pub(crate) completions: Vec<Completion>,
}

impl<H: LayoutHost> Coordinator<H> {
    pub fn new(options: ListOptions) -> Self {
        ldebug!(
            spacing = options.global_spacing,
            duration_ms = options.transition_duration.as_millis() as u64,
            "Coordinator::new"
        );
        Self {
            options,
            elements: Vec::new(),
            staged: Vec::new(),
            wrappers: BTreeMap::new(),
            chain: Chain::default(),
            batch: None,
            active: None,
            queued: VecDeque::new(),
            completions: Vec::new(),
        }
    }

    pub fn options(&self) -> &ListOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: ListOptions) {
        self.options = options;
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn is_batching(&self) -> bool {
        self.batch.is_some()
    }

    /// `true` while a transition is waiting on the host (or queued behind one).
    pub fn is_transitioning(&self) -> bool {
        self.active.is_some() || !self.queued.is_empty()
    }

    pub fn slots(&self) -> Vec<SlotRef> {
        self.elements.iter().map(|e| e.slot.slot_ref()).collect()
    }

    pub fn elements(&self) -> impl Iterator<Item = ElementInfo<'_>> + '_ {
        self.elements.iter().map(|e| ElementInfo {
            slot: e.slot.slot_ref(),
            identifier: e.identifier.as_deref(),
            insets: e.insets,
            inserting: e.inserting,
            deleting: e.deleting,
            disposable: e.slot.is_disposable(),
            materialized: e.slot.content.is_some(),
        })
    }

    pub fn element_info(&self, slot: SlotRef) -> Option<ElementInfo<'_>> {
        self.elements().find(|info| info.slot == slot)
    }

    /// Content of the first element tagged `identifier`: the cell wrapper if it has one,
    /// otherwise the node inside the slot.
    ///
    /// Identifiers are not unique; the first match in sequence order wins.
    pub fn get_element(&self, identifier: &str) -> Option<NodeId> {
        let element = self
            .elements
            .iter()
            .find(|e| e.identifier.as_deref() == Some(identifier))?;
        self.visible_content(element)
    }

    /// Content of every disposable element that is currently materialized.
    pub fn visible_disposable_elements(&self) -> Vec<NodeId> {
        self.elements
            .iter()
            .filter(|e| e.slot.is_disposable())
            .filter_map(|e| self.visible_content(e))
            .collect()
    }

    /// Content of the `index`-th disposable element, if it is materialized.
    pub fn disposable_element(&self, index: usize) -> Option<NodeId> {
        let element = self
            .elements
            .iter()
            .filter(|e| e.slot.is_disposable())
            .nth(index)?;
        self.visible_content(element)
    }

    pub fn disposable_count(&self) -> usize {
        self.elements
            .iter()
            .filter(|e| e.slot.is_disposable())
            .count()
    }

    /// The cell wrapper recorded for `slot`, if its content came from a cell.
    pub fn wrapper_of(&self, slot: SlotRef) -> Option<NodeId> {
        self.wrappers.get(&slot.node()).copied()
    }

    fn visible_content(&self, element: &Element<H>) -> Option<NodeId> {
        self.wrappers
            .get(&element.node())
            .copied()
            .or(element.slot.content)
    }

    pub(crate) fn index_of(&self, slot: NodeId) -> Option<usize> {
        self.elements.iter().position(|e| e.node() == slot)
    }

    pub(crate) fn element_mut(&mut self, slot: NodeId) -> Option<&mut Element<H>> {
        self.elements.iter_mut().find(|e| e.node() == slot)
    }

    /// Resolves `reference` to the slot it names, or to the viewport.
    pub(crate) fn resolve_reference(&self, reference: &Reference) -> Result<End, ListError> {
        let found = match reference {
            Reference::Viewport => return Ok(End::Viewport),
            Reference::Identifier(identifier) => self
                .elements
                .iter()
                .find(|e| e.identifier.as_deref() == Some(identifier.as_str()))
                .map(Element::node),
            Reference::Wrapper(wrapper) => self
                .wrappers
                .iter()
                .find(|&(_, w)| w == wrapper)
                .map(|(&slot, _)| slot)
                .filter(|&slot| self.index_of(slot).is_some()),
            Reference::Slot(slot) => self.index_of(slot.node()).map(|_| slot.node()),
            Reference::Node(node) => self
                .elements
                .iter()
                .find(|e| e.slot.content == Some(*node) || e.node() == *node)
                .map(Element::node),
        };
        match found {
            Some(slot) => Ok(End::Slot(slot)),
            None => {
                lwarn!(?reference, "unresolved element reference");
                Err(ListError::InvalidReference(format!("{reference:?}")))
            }
        }
    }

    pub(crate) fn ensure_idle(&self) -> Result<(), ListError> {
        if self.is_transitioning() {
            lwarn!("mutation rejected while a transition is in flight");
            return Err(ListError::TransitionInFlight);
        }
        Ok(())
    }

    pub(crate) fn clear_inserting(&mut self) {
        for element in &mut self.elements {
            element.inserting = false;
        }
    }

    /// Refreshes virtualization and fires every pending completion.
    pub(crate) fn settle(&mut self, host: &mut H) {
        self.refresh_disposables(host);
        for completion in core::mem::take(&mut self.completions) {
            completion();
        }
    }
}

impl<H> core::fmt::Debug for Coordinator<H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Coordinator")
            .field("options", &self.options)
            .field("len", &self.elements.len())
            .field("staged", &self.staged.len())
            .field("batch", &self.batch)
            .field("transitioning", &self.active.is_some())
            .finish_non_exhaustive()
    }
}
