use alloc::collections::{BTreeMap, VecDeque};
use alloc::vec::Vec;
use core::time::Duration;

use anchorlist::{
    AnimationId, Built, Item, LayoutHost, NodeId, Rect, Relation, RelationId, SimHost,
};

use crate::{Easing, Tween, lerp_rect};

#[derive(Clone, Debug)]
struct Running {
    id: AnimationId,
    progress: Tween,
    /// Presented frames when the pass started.
    from: BTreeMap<NodeId, Rect>,
}

/// A [`LayoutHost`] whose animated passes take wall-clock time.
///
/// Layout itself is delegated to [`SimHost`]: the coordinator always sees the resolved
/// (target) frames, while [`TweenHost::presented_frame`] interpolates from where each node
/// was drawn when the pass started. Passes are reported finished by
/// [`LayoutHost::poll_finished`] once [`TweenHost::tick`] moves past their duration.
#[derive(Clone, Debug)]
pub struct TweenHost {
    inner: SimHost,
    easing: Easing,
    now_ms: u64,
    next_animation: u64,
    running: Vec<Running>,
    finished: VecDeque<AnimationId>,
}

impl TweenHost {
    pub fn new(width: f64, height: f64) -> Self {
        Self::from_sim(SimHost::new(width, height))
    }

    pub fn from_sim(inner: SimHost) -> Self {
        Self {
            inner,
            easing: Easing::default(),
            now_ms: 0,
            next_animation: 1,
            running: Vec::new(),
            finished: VecDeque::new(),
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn sim(&self) -> &SimHost {
        &self.inner
    }

    pub fn sim_mut(&mut self) -> &mut SimHost {
        &mut self.inner
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn is_animating(&self) -> bool {
        !self.running.is_empty()
    }

    pub fn create_node(&mut self, label: &str, height: f64) -> NodeId {
        self.inner.create_node(label, height)
    }

    pub fn create_cell(&mut self, label: &str, height: f64) -> Built {
        self.inner.create_cell(label, height)
    }

    pub fn set_viewport_size(&mut self, width: f64, height: f64) {
        self.inner.set_viewport_size(width, height);
    }

    pub fn content_height(&self) -> f64 {
        self.inner.content_height()
    }

    /// Where `node` is drawn right now.
    pub fn presented_frame(&self, node: NodeId) -> Rect {
        let target = self.inner.frame(node);
        let Some(running) = self
            .running
            .iter()
            .rev()
            .find(|r| r.from.contains_key(&node))
        else {
            return target;
        };
        let from = running.from.get(&node).copied().unwrap_or(target);
        lerp_rect(from, target, running.progress.sample(self.now_ms))
    }

    /// Advances the clock. Passes that ran to completion become available through
    /// `poll_finished`. Returns how many finished.
    pub fn tick(&mut self, now_ms: u64) -> usize {
        self.now_ms = self.now_ms.max(now_ms);
        let now = self.now_ms;
        let before = self.finished.len();
        let finished = &mut self.finished;
        self.running.retain(|r| {
            if r.progress.is_done(now) {
                finished.push_back(r.id);
                false
            } else {
                true
            }
        });
        let count = self.finished.len() - before;
        if count > 0 {
            atrace!(now_ms = now, count, "TweenHost::tick");
        }
        count
    }
}

impl LayoutHost for TweenHost {
    fn viewport_bounds(&self) -> Rect {
        self.inner.viewport_bounds()
    }

    fn content_offset(&self) -> f64 {
        self.inner.content_offset()
    }

    fn set_content_offset(&mut self, offset: f64) {
        self.inner.set_content_offset(offset);
    }

    fn create_slot(&mut self) -> NodeId {
        self.inner.create_slot()
    }

    fn add_child(&mut self, parent: Item, child: NodeId) {
        self.inner.add_child(parent, child);
    }

    fn remove_from_parent(&mut self, node: NodeId) {
        self.inner.remove_from_parent(node);
    }

    fn set_clips_to_bounds(&mut self, node: NodeId, clips: bool) {
        self.inner.set_clips_to_bounds(node, clips);
    }

    fn add_relation(&mut self, relation: Relation) -> RelationId {
        self.inner.add_relation(relation)
    }

    fn set_constant(&mut self, relation: RelationId, constant: f64) {
        self.inner.set_constant(relation, constant);
    }

    fn deactivate(&mut self, relation: RelationId) {
        self.inner.deactivate(relation);
    }

    fn resolve(&mut self) {
        self.inner.resolve();
    }

    fn resolve_animated(&mut self, duration: Duration) -> AnimationId {
        let from = self
            .inner
            .nodes()
            .map(|node| (node, self.presented_frame(node)))
            .collect();
        self.inner.resolve();

        let id = AnimationId(self.next_animation);
        self.next_animation += 1;
        let duration_ms = duration.as_millis() as u64;
        adebug!(id = id.0, duration_ms, now_ms = self.now_ms, "TweenHost::resolve_animated");
        self.running.push(Running {
            id,
            progress: Tween::progress(self.now_ms, duration_ms, self.easing),
            from,
        });
        id
    }

    fn poll_finished(&mut self) -> Option<AnimationId> {
        self.finished.pop_front()
    }

    fn frame(&self, node: NodeId) -> Rect {
        self.inner.frame(node)
    }
}
