use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;

use crate::coordinator::ElementInfo;
use crate::mutation::Placement;
use crate::{
    AnimationId, Attributes, Built, Content, Coordinator, LayoutHost, ListError, ListOptions,
    NodeId, Reference, SlotRef, UpdatePolicy,
};

/// A scrollable viewport together with the list coordinator that stacks its children.
///
/// The coordinator is created lazily on first use, so a `ListView` that never receives
/// content costs nothing beyond its host.
///
/// Adapters drive it by:
/// - calling the mutation methods (`append`, `insert_*`, `delete*`, batches)
/// - reporting scroll changes through `set_content_offset`
/// - calling `pump` (or `layout_finished`) when the host finishes an animated pass
pub struct ListView<H: LayoutHost> {
    host: H,
    options: ListOptions,
    coordinator: Option<Coordinator<H>>,
}

impl<H: LayoutHost> ListView<H> {
    pub fn new(host: H) -> Self {
        Self::with_options(host, ListOptions::default())
    }

    pub fn with_options(host: H, options: ListOptions) -> Self {
        Self {
            host,
            options,
            coordinator: None,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub fn options(&self) -> &ListOptions {
        &self.options
    }

    /// Clones the current options, applies `f`, and hands the result to the coordinator.
    pub fn update_options(&mut self, f: impl FnOnce(&mut ListOptions)) {
        f(&mut self.options);
        if let Some(coordinator) = &mut self.coordinator {
            coordinator.set_options(self.options.clone());
        }
    }

    /// The coordinator, if any content has been added yet.
    pub fn coordinator(&self) -> Option<&Coordinator<H>> {
        self.coordinator.as_ref()
    }

    fn parts(&mut self) -> (&mut Coordinator<H>, &mut H) {
        let options = &self.options;
        let coordinator = self
            .coordinator
            .get_or_insert_with(|| Coordinator::new(options.clone()));
        (coordinator, &mut self.host)
    }

    pub fn append(
        &mut self,
        content: impl Into<Content<H>>,
    ) -> Result<Attributes<'_, H>, ListError> {
        let (coordinator, host) = self.parts();
        let slot = coordinator.append(host, content.into())?;
        Ok(Attributes::new(coordinator, host, slot))
    }

    pub fn insert_after(
        &mut self,
        content: impl Into<Content<H>>,
        reference: impl Into<Reference>,
    ) -> Result<Attributes<'_, H>, ListError> {
        self.insert(content.into(), Placement::After, reference.into())
    }

    pub fn insert_before(
        &mut self,
        content: impl Into<Content<H>>,
        reference: impl Into<Reference>,
    ) -> Result<Attributes<'_, H>, ListError> {
        self.insert(content.into(), Placement::Before, reference.into())
    }

    fn insert(
        &mut self,
        content: Content<H>,
        placement: Placement,
        reference: Reference,
    ) -> Result<Attributes<'_, H>, ListError> {
        let (coordinator, host) = self.parts();
        let slot = coordinator.insert(host, content, placement, &reference)?;
        Ok(Attributes::new(coordinator, host, slot))
    }

    pub fn delete(
        &mut self,
        reference: impl Into<Reference>,
        remain_spacing: f64,
    ) -> Result<(), ListError> {
        let (coordinator, host) = self.parts();
        coordinator.delete(host, &reference.into(), remain_spacing, None)
    }

    /// Like [`ListView::delete`], firing `completion` once the element is gone.
    pub fn delete_with(
        &mut self,
        reference: impl Into<Reference>,
        remain_spacing: f64,
        completion: impl FnOnce() + 'static,
    ) -> Result<(), ListError> {
        let (coordinator, host) = self.parts();
        coordinator.delete_with(host, &reference.into(), remain_spacing, completion)
    }

    pub fn delete_all(&mut self) {
        let (coordinator, host) = self.parts();
        coordinator.delete_all(host);
    }

    pub fn begin_updates(&mut self, policy: UpdatePolicy) {
        self.parts().0.begin_updates(policy);
    }

    pub fn end_updates(&mut self) -> Result<(), ListError> {
        let (coordinator, host) = self.parts();
        coordinator.end_updates(host, None)
    }

    pub fn end_updates_with(
        &mut self,
        completion: impl FnOnce() + 'static,
    ) -> Result<(), ListError> {
        let (coordinator, host) = self.parts();
        coordinator.end_updates(host, Some(Box::new(completion)))
    }

    /// Builds a disposable slot from `factory`; see [`Coordinator::disposable_view`].
    pub fn disposable_view(&mut self, factory: impl Fn(&mut H) -> Built + 'static) -> SlotRef {
        let (coordinator, host) = self.parts();
        coordinator.disposable_view(host, Rc::new(factory))
    }

    pub fn get_element(&self, identifier: &str) -> Option<NodeId> {
        self.coordinator.as_ref()?.get_element(identifier)
    }

    pub fn visible_disposable_elements(&self) -> Vec<NodeId> {
        self.coordinator
            .as_ref()
            .map(Coordinator::visible_disposable_elements)
            .unwrap_or_default()
    }

    pub fn disposable_element(&self, index: usize) -> Option<NodeId> {
        self.coordinator.as_ref()?.disposable_element(index)
    }

    pub fn slots(&self) -> Vec<SlotRef> {
        self.coordinator
            .as_ref()
            .map(Coordinator::slots)
            .unwrap_or_default()
    }

    pub fn element_info(&self, slot: SlotRef) -> Option<ElementInfo<'_>> {
        self.coordinator.as_ref()?.element_info(slot)
    }

    pub fn len(&self) -> usize {
        self.coordinator.as_ref().map_or(0, Coordinator::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_transitioning(&self) -> bool {
        self.coordinator
            .as_ref()
            .is_some_and(Coordinator::is_transitioning)
    }

    /// Scrolls the viewport and re-evaluates which disposable slots hold content.
    pub fn set_content_offset(&mut self, offset: f64) {
        self.host.set_content_offset(offset);
        self.refresh_disposables();
    }

    pub fn refresh_disposables(&mut self) {
        if let Some(coordinator) = &mut self.coordinator {
            coordinator.refresh_disposables(&mut self.host);
        }
    }

    pub fn reload_disposable_data(&mut self) {
        if let Some(coordinator) = &mut self.coordinator {
            coordinator.reload_disposable_data(&mut self.host);
        }
    }

    /// Forces a synchronous layout pass.
    pub fn layout_if_needed(&mut self) {
        self.host.resolve();
    }

    /// Hands a finished animated pass back to the coordinator.
    pub fn layout_finished(&mut self, id: AnimationId) {
        if let Some(coordinator) = &mut self.coordinator {
            coordinator.layout_finished(&mut self.host, id);
        }
    }

    /// Delivers every completion the host has queued, including ones produced while
    /// delivering (a transition's next phase). Returns how many were delivered.
    pub fn pump(&mut self) -> usize {
        let mut delivered = 0;
        while let Some(id) = self.host.poll_finished() {
            self.layout_finished(id);
            delivered += 1;
        }
        delivered
    }
}

impl<H: LayoutHost + core::fmt::Debug> core::fmt::Debug for ListView<H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ListView")
            .field("host", &self.host)
            .field("coordinator", &self.coordinator)
            .finish()
    }
}
