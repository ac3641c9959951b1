use core::time::Duration;

use crate::{AnimationId, Item, NodeId, Rect, Relation, RelationId};

/// The boundary between the coordinator and the platform: a scrollable viewport plus the
/// anchor-relation solver that lays out its children.
///
/// The coordinator never computes geometry itself. It adds, retunes and deactivates
/// relations, asks the host to resolve them, and reads back frames.
///
/// Animated passes are asynchronous: [`LayoutHost::resolve_animated`] returns immediately
/// with an [`AnimationId`] and the host later hands that id back through
/// [`LayoutHost::poll_finished`] (or the adapter calls
/// [`crate::ListView::layout_finished`] directly).
pub trait LayoutHost {
    /// Size of the visible area. `x`/`y` are ignored by the coordinator.
    fn viewport_bounds(&self) -> Rect;

    /// Vertical content offset of the viewport.
    fn content_offset(&self) -> f64;

    fn set_content_offset(&mut self, offset: f64);

    /// Creates an empty holder node. It is not attached anywhere yet.
    fn create_slot(&mut self) -> NodeId;

    /// Attaches `child` to `parent`, detaching it from any previous parent first.
    fn add_child(&mut self, parent: Item, child: NodeId);

    /// Detaches `node` from its parent. Hosts are free to drop relations that reference it.
    fn remove_from_parent(&mut self, node: NodeId);

    fn set_clips_to_bounds(&mut self, node: NodeId, clips: bool);

    fn add_relation(&mut self, relation: Relation) -> RelationId;

    fn set_constant(&mut self, relation: RelationId, constant: f64);

    /// Deactivating an unknown or already inactive relation is a no-op.
    fn deactivate(&mut self, relation: RelationId);

    /// Synchronous layout pass.
    fn resolve(&mut self);

    /// Starts an animated layout pass over `duration`.
    fn resolve_animated(&mut self, duration: Duration) -> AnimationId;

    /// Pops the next animated pass that has completed, if any.
    fn poll_finished(&mut self) -> Option<AnimationId>;

    /// Resolved frame of `node` in content coordinates as of the last layout pass.
    fn frame(&self, node: NodeId) -> Rect;
}
