//! Two-phase grow/shrink transitions.
//!
//! The host only reports sizes after a layout pass, so every transition is measure-then-
//! animate: pin the affected slots with fixed-height relations, resolve, retune the heights,
//! then resolve again (animated). Each transition is a small state machine advanced by
//! [`Coordinator::layout_finished`]; only one runs at a time and later ones wait in a queue.

use alloc::vec::Vec;
use core::time::Duration;

use crate::chain::End;
use crate::{AnimationId, Coordinator, Insets, LayoutHost, NodeId, RelationId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Queued {
    Insertion(Duration),
    Deletion(Duration),
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct GrowHold {
    pub slot: NodeId,
    pub content: NodeId,
    pub relation: RelationId,
    /// Content-edge constants folded into the target height.
    pub offset: f64,
}

/// A gap left by a maximal run of deleted elements, and the relation that will close it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Run {
    pub above: End,
    pub below: End,
    pub spacing: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum DeletionPhase {
    /// Deleted slots shrinking from their measured height to zero.
    Collapse,
    /// Survivor relations installed; spacing animating to its final value.
    Settle,
}

#[derive(Debug)]
pub(crate) enum Transition {
    Insertion {
        holds: Vec<GrowHold>,
        duration: Duration,
        awaiting: AnimationId,
    },
    Deletion {
        runs: Vec<Run>,
        settle: Duration,
        phase: DeletionPhase,
        awaiting: AnimationId,
    },
}

impl Transition {
    fn awaiting(&self) -> AnimationId {
        match self {
            Self::Insertion { awaiting, .. } | Self::Deletion { awaiting, .. } => *awaiting,
        }
    }
}

pub(crate) enum Step {
    Await(Transition),
    Done,
}

impl<H: LayoutHost> Coordinator<H> {
    /// Reports that the animated pass `id` finished. Unknown or stale ids are ignored, which
    /// is how completions of cancelled transitions become no-ops.
    pub fn layout_finished(&mut self, host: &mut H, id: AnimationId) {
        let Some(transition) = self.active.take() else {
            ltrace!(id = id.0, "layout_finished without an active transition");
            return;
        };
        if transition.awaiting() != id {
            ltrace!(id = id.0, "layout_finished for a stale animation");
            self.active = Some(transition);
            return;
        }
        match self.advance(host, transition) {
            Step::Await(next) => self.active = Some(next),
            Step::Done => self.drive(host),
        }
    }

    /// Starts queued transitions until one has to wait on the host. When nothing is left,
    /// settles the list.
    pub(crate) fn drive(&mut self, host: &mut H) {
        while self.active.is_none() {
            let Some(next) = self.queued.pop_front() else {
                self.settle(host);
                return;
            };
            let step = match next {
                Queued::Insertion(duration) => self.begin_insertion(host, duration),
                Queued::Deletion(duration) => self.begin_deletion(host, duration),
            };
            if let Step::Await(transition) = step {
                self.active = Some(transition);
            }
        }
    }

    fn advance(&mut self, host: &mut H, transition: Transition) -> Step {
        match transition {
            Transition::Insertion { holds, .. } => {
                self.end_insertion(host, &holds);
                Step::Done
            }
            Transition::Deletion {
                runs,
                settle,
                phase: DeletionPhase::Collapse,
                ..
            } => {
                self.rewire_deleted(host, &runs);
                if settle.is_zero() {
                    host.resolve();
                    return Step::Done;
                }
                let awaiting = host.resolve_animated(settle);
                Step::Await(Transition::Deletion {
                    runs,
                    settle,
                    phase: DeletionPhase::Settle,
                    awaiting,
                })
            }
            Transition::Deletion {
                phase: DeletionPhase::Settle,
                ..
            } => Step::Done,
        }
    }

    fn begin_insertion(&mut self, host: &mut H, duration: Duration) -> Step {
        let priority = self.options.relation_priority;
        let mut holds = Vec::new();
        for element in self.elements.iter_mut().filter(|e| e.inserting) {
            let Some(content) = element.slot.content else {
                continue;
            };
            element.slot.detach_bottom(host);
            let relation = element.slot.hold_height(host, 0.0, priority);
            holds.push(GrowHold {
                slot: element.node(),
                content,
                relation,
                offset: element.insets.vertical(),
            });
        }
        ldebug!(
            slots = holds.len(),
            duration_ms = duration.as_millis() as u64,
            "insertion: hold"
        );
        host.resolve();

        for hold in &holds {
            let height = host.frame(hold.content).height + hold.offset;
            host.set_constant(hold.relation, height);
        }
        if duration.is_zero() {
            host.resolve();
            self.end_insertion(host, &holds);
            return Step::Done;
        }
        let awaiting = host.resolve_animated(duration);
        Step::Await(Transition::Insertion {
            holds,
            duration,
            awaiting,
        })
    }

    /// Retargets the grow hold of `slot` after its insets changed mid-insertion. The pass in
    /// flight is superseded by a new one; its completion then arrives as a stale id.
    pub(crate) fn retarget_insertion(&mut self, host: &mut H, slot: NodeId, insets: Insets) {
        let Some(Transition::Insertion {
            holds,
            duration,
            awaiting,
        }) = &mut self.active
        else {
            return;
        };
        let Some(hold) = holds.iter_mut().find(|h| h.slot == slot) else {
            return;
        };
        hold.offset = insets.vertical();
        host.set_constant(hold.relation, host.frame(hold.content).height + hold.offset);
        *awaiting = host.resolve_animated(*duration);
        ltrace!(slot = slot.0, awaiting = awaiting.0, "insertion: retarget");
    }

    fn end_insertion(&mut self, host: &mut H, holds: &[GrowHold]) {
        let priority = self.options.relation_priority;
        for hold in holds {
            let Some(element) = self.element_mut(hold.slot) else {
                continue;
            };
            element.slot.release_height(host);
            let insets = element.insets;
            element.slot.bind_bottom(host, insets, priority);
        }
        self.clear_inserting();
        host.resolve();
        ldebug!(slots = holds.len(), "insertion: done");
    }

    fn begin_deletion(&mut self, host: &mut H, duration: Duration) -> Step {
        let runs = self.deletion_runs();
        if runs.is_empty() {
            return Step::Done;
        }
        let priority = self.options.relation_priority;
        host.resolve();
        for element in self.elements.iter_mut().filter(|e| e.deleting) {
            let height = host.frame(element.node()).height;
            element.slot.detach_bottom(host);
            element.slot.hold_height(host, height, priority);
        }
        host.resolve();

        for element in self.elements.iter_mut().filter(|e| e.deleting) {
            element.slot.hold_height(host, 0.0, priority);
        }
        ldebug!(
            runs = runs.len(),
            duration_ms = duration.as_millis() as u64,
            "deletion: collapse"
        );
        if duration.is_zero() {
            host.resolve();
            self.rewire_deleted(host, &runs);
            host.resolve();
            return Step::Done;
        }
        let collapse = duration - duration / 4;
        let awaiting = host.resolve_animated(collapse);
        Step::Await(Transition::Deletion {
            runs,
            settle: duration - collapse,
            phase: DeletionPhase::Collapse,
            awaiting,
        })
    }

    /// One entry per maximal run of deleting elements, carrying the summed remain-spacing.
    /// A list where everything is deleted yields a single viewport-to-viewport run.
    pub(crate) fn deletion_runs(&self) -> Vec<Run> {
        let mut runs = Vec::new();
        let mut above = End::Viewport;
        let mut in_run = false;
        let mut spacing = 0.0;
        for element in &self.elements {
            if element.deleting {
                in_run = true;
                spacing += element.remain_spacing;
                continue;
            }
            if in_run {
                runs.push(Run {
                    above,
                    below: End::Slot(element.node()),
                    spacing,
                });
                in_run = false;
                spacing = 0.0;
            }
            above = End::Slot(element.node());
        }
        if in_run {
            runs.push(Run {
                above,
                below: End::Viewport,
                spacing,
            });
        }
        runs
    }

    /// Closes every run with a single survivor relation, then drops the deleted elements.
    pub(crate) fn rewire_deleted(&mut self, host: &mut H, runs: &[Run]) {
        let priority = self.options.relation_priority;
        for element in self.elements.iter().filter(|e| e.deleting) {
            self.chain.unlink_slot(host, element.node());
        }
        for run in runs {
            self.chain
                .link(host, run.above, run.below, run.spacing, priority);
        }
        self.remove_deleting(host);
    }

    /// Detaches deleted slots and drops their elements and wrapper entries.
    pub(crate) fn remove_deleting(&mut self, host: &mut H) {
        let wrappers = &mut self.wrappers;
        let chain = &mut self.chain;
        self.elements.retain_mut(|element| {
            if !element.deleting {
                return true;
            }
            chain.unlink_slot(host, element.node());
            element.slot.detach(host);
            wrappers.remove(&element.node());
            false
        });
    }
}
