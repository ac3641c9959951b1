use core::time::Duration;

use crate::Insets;

/// Priority used for every relation the coordinator installs ("default high" + 1).
pub const DEFAULT_RELATION_PRIORITY: u16 = 751;

/// Configuration for [`crate::Coordinator`] / [`crate::ListView`].
///
/// Global insets and spacing only affect elements added after the change; existing elements
/// keep the values they were built with unless retuned through [`crate::Attributes`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ListOptions {
    /// Content-to-slot margins applied to new elements.
    pub global_insets: Insets,
    /// Top margin of every element except the first one.
    pub global_spacing: f64,
    pub global_clips_to_bounds: bool,
    /// Duration of insert/delete transitions. Zero resolves synchronously.
    pub transition_duration: Duration,
    /// Viewport heights kept materialized above and below the visible bounds.
    pub window_margin: f64,
    pub relation_priority: u16,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            global_insets: Insets::ZERO,
            global_spacing: 0.0,
            global_clips_to_bounds: true,
            transition_duration: Duration::from_millis(300),
            window_margin: 1.0,
            relation_priority: DEFAULT_RELATION_PRIORITY,
        }
    }
}

impl ListOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_global_insets(mut self, insets: Insets) -> Self {
        self.global_insets = insets;
        self
    }

    pub fn with_global_spacing(mut self, spacing: f64) -> Self {
        self.global_spacing = spacing;
        self
    }

    pub fn with_global_clips_to_bounds(mut self, clips: bool) -> Self {
        self.global_clips_to_bounds = clips;
        self
    }

    pub fn with_transition_duration(mut self, duration: Duration) -> Self {
        self.transition_duration = duration;
        self
    }

    /// Disables transition animations entirely.
    pub fn without_animation(self) -> Self {
        self.with_transition_duration(Duration::ZERO)
    }

    pub fn with_window_margin(mut self, margin: f64) -> Self {
        self.window_margin = margin;
        self
    }

    pub fn with_relation_priority(mut self, priority: u16) -> Self {
        self.relation_priority = priority;
        self
    }

    /// Insets for a new element. The first element uses the global top inset; every later
    /// one uses the global spacing in its place.
    pub(crate) fn insets_for_new(&self, sequence_is_empty: bool) -> Insets {
        let top = if sequence_is_empty {
            self.global_insets.top
        } else {
            self.global_spacing
        };
        self.global_insets.with_top(top)
    }
}
