use alloc::string::String;

/// Errors surfaced by list mutations.
///
/// Absent lookups (for example [`crate::ListView::get_element`] with an unknown identifier)
/// are not errors; they return `None`.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ListError {
    /// An insert/delete reference did not resolve to any slot in the sequence.
    #[error("invalid element reference: {0}")]
    InvalidReference(String),
    /// A transition is still waiting on the layout host; the mutation was rejected.
    #[error("a transition is in flight; mutations are serialized until it completes")]
    TransitionInFlight,
    /// A recycled slot has no content and no factory to rebuild it from.
    #[error("slot has no content to lay out")]
    EmptySlot,
}
