/// Opaque handle to a node owned by the layout host (viewport children, slots, content).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub u64);

/// Opaque handle to an active anchor relation inside the layout host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RelationId(pub u64);

/// Identifies one animated layout pass. The host reports it back once the pass completes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnimationId(pub u64);

/// A slot in the chain. Slots are the only nodes the coordinator creates itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlotRef(pub NodeId);

impl SlotRef {
    pub fn node(self) -> NodeId {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Item {
    Viewport,
    Node(NodeId),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Attribute {
    Top,
    Bottom,
    Leading,
    Trailing,
    Width,
    Height,
}

/// `first.first_attr == second.attr + constant`, or `first.first_attr == constant` when
/// `second` is `None` (fixed dimensions).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Relation {
    pub first: Item,
    pub first_attr: Attribute,
    pub second: Option<(Item, Attribute)>,
    pub constant: f64,
    pub priority: u16,
}

impl Relation {
    pub fn between(
        first: Item,
        first_attr: Attribute,
        second: Item,
        second_attr: Attribute,
        constant: f64,
        priority: u16,
    ) -> Self {
        Self {
            first,
            first_attr,
            second: Some((second, second_attr)),
            constant,
            priority,
        }
    }

    pub fn fixed_height(node: NodeId, height: f64, priority: u16) -> Self {
        Self {
            first: Item::Node(node),
            first_attr: Attribute::Height,
            second: None,
            constant: height,
            priority,
        }
    }

    pub fn involves(&self, item: Item) -> bool {
        self.first == item || self.second.is_some_and(|(other, _)| other == item)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn min_y(&self) -> f64 {
        self.y
    }

    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }
}

/// Content-to-slot margins. `top` doubles as the spacing to the previous element.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Insets {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl Insets {
    pub const ZERO: Self = Self {
        top: 0.0,
        left: 0.0,
        bottom: 0.0,
        right: 0.0,
    };

    pub fn new(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    pub fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    pub fn with_top(mut self, top: f64) -> Self {
        self.top = top;
        self
    }

    /// Sum of the vertical margins, i.e. how much taller the slot is than its content.
    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }
}

/// How [`crate::ListView::end_updates`] commits the mutations collected since
/// [`crate::ListView::begin_updates`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UpdatePolicy {
    /// Grow inserted slots, then collapse deleted ones.
    #[default]
    AnimatedLayout,
    /// Rewire the chain and resolve once, without animation.
    LayoutOnly,
    /// Commit the sequence only. The caller owns the resulting geometry.
    NoLayout,
}

/// The scroll window in which disposable content stays materialized.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibleWindow {
    pub start: f64,
    /// Exclusive.
    pub end: f64,
}

impl VisibleWindow {
    /// `margin` is measured in viewport heights on each side of the visible bounds.
    pub fn around(offset: f64, viewport_height: f64, margin: f64) -> Self {
        let pad = viewport_height * margin;
        Self {
            start: offset - pad,
            end: offset + viewport_height + pad,
        }
    }

    pub fn intersects(&self, frame: &Rect) -> bool {
        frame.min_y() < self.end && frame.max_y() > self.start
    }
}
