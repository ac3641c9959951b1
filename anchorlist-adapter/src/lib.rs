//! Adapter utilities for the `anchorlist` crate.
//!
//! The `anchorlist` crate is UI-agnostic and leaves geometry and animation timing to its
//! [`anchorlist::LayoutHost`]. This crate provides small, framework-neutral helpers commonly
//! needed by adapters:
//!
//! - A time-driven host whose animated layout passes finish on `tick`
//! - A controller that pumps transition completions and tween-scrolls to elements
//! - Scroll anchoring (e.g. prepend in chat/timelines without visual jumps)
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod anchor;
mod controller;
mod host;
mod tween;

#[cfg(test)]
mod tests;

pub use anchor::{ScrollAnchor, apply_anchor, capture_first_visible_anchor};
pub use controller::Controller;
pub use host::TweenHost;
pub use tween::{Easing, Tween, lerp_rect};
