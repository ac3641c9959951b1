use anchorlist::{LayoutHost, ListOptions, ListView, SlotRef};

use crate::{Easing, ScrollAnchor, Tween, TweenHost, apply_anchor, capture_first_visible_anchor};

/// A framework-neutral controller that wraps a `ListView<TweenHost>` and provides common
/// adapter workflows (completion pumping, anchoring, tween-driven scrolling).
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `on_viewport_size` / `on_scroll` when UI events occur
/// - `tick(now_ms)` each frame/timer tick (layout animations and tween scrolling)
///
/// Mutations go through [`Controller::list_mut`]; draw with
/// [`TweenHost::presented_frame`].
#[derive(Debug)]
pub struct Controller {
    list: ListView<TweenHost>,
    tween: Option<Tween>,
}

impl Controller {
    pub fn new(host: TweenHost, options: ListOptions) -> Self {
        Self::from_list(ListView::with_options(host, options))
    }

    pub fn from_list(list: ListView<TweenHost>) -> Self {
        Self { list, tween: None }
    }

    pub fn list(&self) -> &ListView<TweenHost> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut ListView<TweenHost> {
        &mut self.list
    }

    pub fn into_list(self) -> ListView<TweenHost> {
        self.list
    }

    pub fn host(&self) -> &TweenHost {
        self.list.host()
    }

    /// `true` while a scroll tween or a layout animation is running.
    pub fn is_animating(&self) -> bool {
        self.tween.is_some() || self.list.host().is_animating()
    }

    pub fn cancel_scroll(&mut self) {
        self.tween = None;
    }

    pub fn scroll_offset(&self) -> f64 {
        self.list.host().content_offset()
    }

    pub fn max_scroll_offset(&self) -> f64 {
        let host = self.list.host();
        (host.content_height() - host.viewport_bounds().height).max(0.0)
    }

    pub fn clamp_scroll_offset(&self, offset: f64) -> f64 {
        offset.clamp(0.0, self.max_scroll_offset())
    }

    pub fn on_viewport_size(&mut self, width: f64, height: f64) {
        self.list.host_mut().set_viewport_size(width, height);
        self.list.layout_if_needed();
        self.list.refresh_disposables();
    }

    /// Call this when the UI reports a scroll offset change (e.g. user wheel/drag).
    ///
    /// This cancels any active tween.
    pub fn on_scroll(&mut self, offset: f64) {
        self.cancel_scroll();
        let offset = self.clamp_scroll_offset(offset);
        self.list.set_content_offset(offset);
    }

    /// Advances the controller.
    ///
    /// Finished layout passes are handed to the list first (which may start the next phase
    /// of a transition at `now_ms`). If a scroll tween is active, updates the content offset
    /// and returns it.
    pub fn tick(&mut self, now_ms: u64) -> Option<f64> {
        if self.list.host_mut().tick(now_ms) > 0 {
            self.list.pump();
        }

        let tween = self.tween?;
        let offset = self.clamp_scroll_offset(tween.sample(now_ms));
        self.list.set_content_offset(offset);
        if tween.is_done(now_ms) {
            self.tween = None;
        }
        Some(offset)
    }

    /// Top edge of the first element tagged `identifier`, in content coordinates.
    pub fn element_offset(&self, identifier: &str) -> Option<f64> {
        let slot = self.slot_of(identifier)?;
        Some(self.list.host().frame(slot.node()).min_y())
    }

    fn slot_of(&self, identifier: &str) -> Option<SlotRef> {
        self.list
            .coordinator()?
            .elements()
            .find(|e| e.identifier == Some(identifier))
            .map(|e| e.slot)
    }

    /// Scrolls the element's top edge to the top of the viewport immediately.
    ///
    /// Returns the applied (clamped) offset.
    pub fn scroll_to_element(&mut self, identifier: &str) -> Option<f64> {
        let offset = self.clamp_scroll_offset(self.element_offset(identifier)?);
        self.on_scroll(offset);
        Some(offset)
    }

    /// Starts a tween that brings the element to the top of the viewport.
    ///
    /// Returns the clamped target offset.
    pub fn start_tween_to_element(
        &mut self,
        identifier: &str,
        now_ms: u64,
        duration_ms: u64,
        easing: Easing,
    ) -> Option<f64> {
        let to = self.element_offset(identifier)?;
        Some(self.start_tween_to_offset(to, now_ms, duration_ms, easing))
    }

    /// Starts a tween to an offset. Retargets smoothly if one is already running.
    ///
    /// Returns the clamped target offset.
    pub fn start_tween_to_offset(
        &mut self,
        offset: f64,
        now_ms: u64,
        duration_ms: u64,
        easing: Easing,
    ) -> f64 {
        let to = self.clamp_scroll_offset(offset);
        match &mut self.tween {
            Some(tween) => tween.retarget(now_ms, to, duration_ms),
            None => {
                let from = self.scroll_offset();
                self.tween = Some(Tween::new(from, to, now_ms, duration_ms, easing));
            }
        }
        to
    }

    pub fn capture_first_visible_anchor(&self) -> Option<ScrollAnchor> {
        capture_first_visible_anchor(&self.list)
    }

    /// Lays the list out and applies a previously captured anchor.
    ///
    /// This cancels any active tween.
    pub fn apply_anchor(&mut self, anchor: &ScrollAnchor) -> bool {
        self.cancel_scroll();
        self.list.layout_if_needed();
        apply_anchor(&mut self.list, anchor)
    }
}
