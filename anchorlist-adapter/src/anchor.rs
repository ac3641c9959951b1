use anchorlist::{LayoutHost, ListView, SlotRef};

/// A scroll anchor that can be used to preserve visual position across list mutations.
///
/// Typical use cases:
/// - chat/timeline "prepend" (insert older messages above) without content jumping
/// - deleting or resizing elements above the viewport
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollAnchor {
    pub slot: SlotRef,
    /// The distance from the anchor slot's top edge to the viewport's content offset.
    pub offset_in_viewport: f64,
}

/// Captures an anchor for the first slot visible at the top of the viewport.
///
/// Elements being deleted are skipped. Returns `None` for an empty list.
pub fn capture_first_visible_anchor<H: LayoutHost>(list: &ListView<H>) -> Option<ScrollAnchor> {
    let offset = list.host().content_offset();
    let coordinator = list.coordinator()?;
    let (slot, frame) = coordinator
        .elements()
        .filter(|e| !e.deleting)
        .map(|e| (e.slot, list.host().frame(e.slot.node())))
        .find(|(_, frame)| frame.max_y() > offset)?;
    Some(ScrollAnchor {
        slot,
        offset_in_viewport: offset - frame.min_y(),
    })
}

/// Applies a previously captured anchor by adjusting the content offset.
///
/// Lay the list out first so the anchor slot's frame is current. Returns `false` when the
/// slot is no longer in the list.
pub fn apply_anchor<H: LayoutHost>(list: &mut ListView<H>, anchor: &ScrollAnchor) -> bool {
    if list.element_info(anchor.slot).is_none() {
        return false;
    }
    let start = list.host().frame(anchor.slot.node()).min_y();
    list.set_content_offset(start + anchor.offset_in_viewport);
    true
}
