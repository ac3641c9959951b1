//! A headless reference host.
//!
//! [`SimHost`] implements [`LayoutHost`] with a tiny solver that understands exactly the
//! relation shapes a vertical list needs: edge-to-edge offsets, fixed heights, and
//! content-fitted slots. Content nodes carry an intrinsic height chosen by the caller.
//!
//! Animated passes resolve immediately and are reported finished on the next
//! [`LayoutHost::poll_finished`]; the requested durations are recorded so callers can
//! assert on them. `anchorlist-adapter` wraps it with time-based interpolation.

use alloc::collections::{BTreeMap, VecDeque};
use alloc::string::String;
use alloc::vec::Vec;
use core::time::Duration;

use crate::{
    AnimationId, Attribute, Built, Item, LayoutHost, NodeId, Rect, Relation, RelationId,
};

#[derive(Clone, Debug)]
struct SimNode {
    label: String,
    intrinsic_height: Option<f64>,
    parent: Option<Item>,
    children: Vec<NodeId>,
    clips: bool,
}

impl SimNode {
    fn new(label: String, intrinsic_height: Option<f64>) -> Self {
        Self {
            label,
            intrinsic_height,
            parent: None,
            children: Vec::new(),
            clips: false,
        }
    }
}

type EdgeIndex = BTreeMap<(NodeId, Attribute), Vec<(Item, Attribute, f64)>>;

#[derive(Clone, Debug)]
pub struct SimHost {
    width: f64,
    height: f64,
    offset: f64,
    nodes: BTreeMap<NodeId, SimNode>,
    viewport_children: Vec<NodeId>,
    relations: BTreeMap<RelationId, Relation>,
    frames: BTreeMap<NodeId, Rect>,
    content_height: f64,
    next_id: u64,
    finished: VecDeque<AnimationId>,
    animations: Vec<Duration>,
    passes: usize,
}

impl SimHost {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            offset: 0.0,
            nodes: BTreeMap::new(),
            viewport_children: Vec::new(),
            relations: BTreeMap::new(),
            frames: BTreeMap::new(),
            content_height: 0.0,
            next_id: 1,
            finished: VecDeque::new(),
            animations: Vec::new(),
            passes: 0,
        }
    }

    fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Creates a content node with a fixed intrinsic height.
    pub fn create_node(&mut self, label: impl Into<String>, height: f64) -> NodeId {
        let id = NodeId(self.next_id());
        self.nodes
            .insert(id, SimNode::new(label.into(), Some(height)));
        id
    }

    /// Creates a cell: a wrapper that is never laid out, and its inner content node.
    pub fn create_cell(&mut self, label: impl Into<String>, height: f64) -> Built {
        let label = label.into();
        let wrapper = NodeId(self.next_id());
        let mut wrapper_label = String::from("cell:");
        wrapper_label.push_str(&label);
        self.nodes
            .insert(wrapper, SimNode::new(wrapper_label, None));
        let content = self.create_node(label, height);
        Built::Cell { wrapper, content }
    }

    pub fn set_intrinsic_height(&mut self, node: NodeId, height: f64) {
        if let Some(n) = self.nodes.get_mut(&node) {
            n.intrinsic_height = Some(height);
        }
    }

    pub fn set_viewport_size(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    pub fn label(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(&node).map(|n| n.label.as_str())
    }

    pub fn parent(&self, node: NodeId) -> Option<Item> {
        self.nodes.get(&node)?.parent
    }

    pub fn children(&self, item: Item) -> &[NodeId] {
        match item {
            Item::Viewport => &self.viewport_children,
            Item::Node(node) => self
                .nodes
                .get(&node)
                .map_or(&[][..], |n| n.children.as_slice()),
        }
    }

    pub fn clips_to_bounds(&self, node: NodeId) -> bool {
        self.nodes.get(&node).is_some_and(|n| n.clips)
    }

    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    pub fn relations(&self) -> impl Iterator<Item = (RelationId, &Relation)> + '_ {
        self.relations.iter().map(|(&id, r)| (id, r))
    }

    pub fn relation(&self, id: RelationId) -> Option<&Relation> {
        self.relations.get(&id)
    }

    /// Active relations where `item` appears on either side.
    pub fn relations_involving(&self, item: Item) -> Vec<Relation> {
        self.relations
            .values()
            .filter(|r| r.involves(item))
            .copied()
            .collect()
    }

    /// Total scroll extent as of the last layout pass.
    pub fn content_height(&self) -> f64 {
        self.content_height
    }

    /// Durations requested through `resolve_animated`, in call order.
    pub fn animations(&self) -> &[Duration] {
        &self.animations
    }

    pub fn layout_passes(&self) -> usize {
        self.passes
    }

    fn detach(&mut self, node: NodeId) {
        let Some(parent) = self.nodes.get_mut(&node).and_then(|n| n.parent.take()) else {
            return;
        };
        match parent {
            Item::Viewport => self.viewport_children.retain(|&c| c != node),
            Item::Node(parent) => {
                if let Some(p) = self.nodes.get_mut(&parent) {
                    p.children.retain(|&c| c != node);
                }
            }
        }
    }

    fn edge_index(&self) -> EdgeIndex {
        let mut index = EdgeIndex::new();
        for r in self.relations.values() {
            let (Item::Node(first), Some((other, attr))) = (r.first, r.second) else {
                continue;
            };
            index
                .entry((first, r.first_attr))
                .or_default()
                .push((other, attr, r.constant));
        }
        index
    }

    fn solve_heights(&self, index: &EdgeIndex) -> BTreeMap<NodeId, f64> {
        let mut held = BTreeMap::new();
        for r in self.relations.values() {
            if let (Item::Node(node), Attribute::Height, None) = (r.first, r.first_attr, r.second)
            {
                held.insert(node, r.constant);
            }
        }
        let natural = |id: NodeId| -> f64 {
            held.get(&id)
                .copied()
                .or_else(|| self.nodes.get(&id).and_then(|n| n.intrinsic_height))
                .unwrap_or(0.0)
        };
        let edge = |child: NodeId, attr: Attribute, slot: NodeId| {
            index.get(&(child, attr)).and_then(|edges| {
                edges
                    .iter()
                    .find(|&&(other, a, _)| other == Item::Node(slot) && a == attr)
                    .map(|&(_, _, c)| c)
            })
        };

        let mut heights = BTreeMap::new();
        for (&id, node) in &self.nodes {
            let height = if let Some(&h) = held.get(&id) {
                h
            } else if let Some(h) = node.intrinsic_height {
                h
            } else {
                node.children
                    .iter()
                    .find_map(|&child| {
                        let top = edge(child, Attribute::Top, id)?;
                        let bottom = edge(child, Attribute::Bottom, id)?;
                        Some(top + natural(child) - bottom)
                    })
                    .unwrap_or(0.0)
            };
            heights.insert(id, height);
        }
        heights
    }

    fn solve_tops(&self, heights: &BTreeMap<NodeId, f64>) -> BTreeMap<NodeId, f64> {
        let vertical: Vec<(NodeId, Item, Attribute, f64)> = self
            .relations
            .values()
            .filter_map(|r| match (r.first, r.first_attr, r.second) {
                (Item::Node(node), Attribute::Top, Some((other, attr))) => {
                    Some((node, other, attr, r.constant))
                }
                _ => None,
            })
            .collect();

        let mut tops = BTreeMap::new();
        loop {
            let mut progressed = false;
            for &(node, other, attr, constant) in &vertical {
                if tops.contains_key(&node) {
                    continue;
                }
                let base = match (other, attr) {
                    (Item::Viewport, Attribute::Top) => Some(0.0),
                    (Item::Node(o), Attribute::Top) => tops.get(&o).copied(),
                    (Item::Node(o), Attribute::Bottom) => tops
                        .get(&o)
                        .map(|t| t + heights.get(&o).copied().unwrap_or(0.0)),
                    _ => None,
                };
                if let Some(base) = base {
                    tops.insert(node, base + constant);
                    progressed = true;
                }
            }
            if !progressed {
                return tops;
            }
        }
    }

    fn solve_horizontal(&self, index: &EdgeIndex) -> BTreeMap<NodeId, (f64, f64)> {
        let mut left: BTreeMap<NodeId, f64> = BTreeMap::new();
        let mut right: BTreeMap<NodeId, f64> = BTreeMap::new();
        let width = self.width;
        let resolve = |map: &BTreeMap<NodeId, f64>, item: Item, viewport: f64| match item {
            Item::Viewport => Some(viewport),
            Item::Node(n) => map.get(&n).copied(),
        };
        loop {
            let mut progressed = false;
            for (&(node, attr), edges) in index {
                for &(other, _, constant) in edges {
                    let target = match attr {
                        Attribute::Leading => &mut left,
                        Attribute::Trailing => &mut right,
                        _ => continue,
                    };
                    if target.contains_key(&node) {
                        continue;
                    }
                    let viewport = if attr == Attribute::Leading { 0.0 } else { width };
                    if let Some(base) = resolve(target, other, viewport) {
                        target.insert(node, base + constant);
                        progressed = true;
                    }
                }
            }
            if !progressed {
                break;
            }
        }
        left.iter()
            .map(|(&node, &x)| {
                let w = right.get(&node).map_or(0.0, |&r| (r - x).max(0.0));
                (node, (x, w))
            })
            .collect()
    }

    fn solve(&mut self) {
        let index = self.edge_index();
        let heights = self.solve_heights(&index);
        let tops = self.solve_tops(&heights);
        let horizontal = self.solve_horizontal(&index);

        self.frames.clear();
        for (&node, &height) in &heights {
            let (x, width) = horizontal.get(&node).copied().unwrap_or((0.0, 0.0));
            let y = tops.get(&node).copied().unwrap_or(0.0);
            self.frames.insert(node, Rect::new(x, y, width, height));
        }

        let bottom = |node: NodeId| {
            tops.get(&node).copied().unwrap_or(0.0) + heights.get(&node).copied().unwrap_or(0.0)
        };
        let mut content_height: f64 = 0.0;
        for r in self.relations.values() {
            let extent = match (r.first, r.first_attr, r.second) {
                (Item::Viewport, Attribute::Bottom, Some((Item::Node(n), Attribute::Bottom))) => {
                    bottom(n) + r.constant
                }
                (Item::Node(n), Attribute::Bottom, Some((Item::Viewport, Attribute::Bottom))) => {
                    bottom(n) - r.constant
                }
                _ => continue,
            };
            content_height = content_height.max(extent);
        }
        self.content_height = content_height;
        self.passes += 1;
    }
}

impl LayoutHost for SimHost {
    fn viewport_bounds(&self) -> Rect {
        Rect::new(0.0, self.offset, self.width, self.height)
    }

    fn content_offset(&self) -> f64 {
        self.offset
    }

    fn set_content_offset(&mut self, offset: f64) {
        self.offset = offset;
    }

    fn create_slot(&mut self) -> NodeId {
        let id = NodeId(self.next_id());
        self.nodes.insert(id, SimNode::new(String::from("slot"), None));
        id
    }

    fn add_child(&mut self, parent: Item, child: NodeId) {
        if !self.nodes.contains_key(&child) {
            return;
        }
        self.detach(child);
        match parent {
            Item::Viewport => self.viewport_children.push(child),
            Item::Node(parent) => {
                let Some(p) = self.nodes.get_mut(&parent) else {
                    return;
                };
                p.children.push(child);
            }
        }
        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = Some(parent);
        }
    }

    fn remove_from_parent(&mut self, node: NodeId) {
        self.detach(node);
        self.relations.retain(|_, r| !r.involves(Item::Node(node)));
    }

    fn set_clips_to_bounds(&mut self, node: NodeId, clips: bool) {
        if let Some(n) = self.nodes.get_mut(&node) {
            n.clips = clips;
        }
    }

    fn add_relation(&mut self, relation: Relation) -> RelationId {
        let id = RelationId(self.next_id());
        self.relations.insert(id, relation);
        id
    }

    fn set_constant(&mut self, relation: RelationId, constant: f64) {
        if let Some(r) = self.relations.get_mut(&relation) {
            r.constant = constant;
        }
    }

    fn deactivate(&mut self, relation: RelationId) {
        self.relations.remove(&relation);
    }

    fn resolve(&mut self) {
        self.solve();
    }

    fn resolve_animated(&mut self, duration: Duration) -> AnimationId {
        self.solve();
        let id = AnimationId(self.next_id());
        self.animations.push(duration);
        self.finished.push_back(id);
        id
    }

    fn poll_finished(&mut self) -> Option<AnimationId> {
        self.finished.pop_front()
    }

    fn frame(&self, node: NodeId) -> Rect {
        self.frames.get(&node).copied().unwrap_or_default()
    }
}
