use alloc::collections::BTreeMap;

use crate::element::Element;
use crate::{Coordinator, LayoutHost, NodeId, VisibleWindow};

impl<H: LayoutHost> Coordinator<H> {
    /// The window (in content coordinates) where disposable content stays materialized.
    pub fn visible_window(&self, host: &H) -> VisibleWindow {
        VisibleWindow::around(
            host.content_offset(),
            host.viewport_bounds().height,
            self.options.window_margin,
        )
    }

    /// Materializes disposable slots that intersect the visible window and parks the ones
    /// that left it at their last measured height.
    ///
    /// Deferred while a transition is in flight; its completion runs it again.
    pub fn refresh_disposables(&mut self, host: &mut H) {
        if self.is_transitioning() {
            ltrace!("refresh_disposables deferred");
            return;
        }
        let window = self.visible_window(host);
        let priority = self.options.relation_priority;
        let mut materialized = 0usize;
        let mut parked = 0usize;
        for element in &mut self.elements {
            if !element.slot.is_disposable() || element.deleting || element.inserting {
                continue;
            }
            let frame = host.frame(element.node());
            let has_content = element.slot.content.is_some();
            if window.intersects(&frame) {
                if !has_content {
                    materialize(element, host, &mut self.wrappers, priority);
                    materialized += 1;
                }
            } else if has_content {
                dematerialize(element, host, &mut self.wrappers, frame.height, priority);
                parked += 1;
            }
        }
        if materialized + parked > 0 {
            ltrace!(
                materialized,
                parked,
                start = window.start,
                end = window.end,
                "refresh_disposables"
            );
            host.resolve();
        }
    }

    /// Throws away all disposable content and rebuilds whatever is inside the window.
    pub fn reload_disposable_data(&mut self, host: &mut H) {
        let priority = self.options.relation_priority;
        for element in &mut self.elements {
            if !element.slot.is_disposable() || element.slot.content.is_none() {
                continue;
            }
            let height = host.frame(element.node()).height;
            dematerialize(element, host, &mut self.wrappers, height, priority);
        }
        host.resolve();
        self.refresh_disposables(host);
    }
}

fn materialize<H: LayoutHost>(
    element: &mut Element<H>,
    host: &mut H,
    wrappers: &mut BTreeMap<NodeId, NodeId>,
    priority: u16,
) {
    let Some(factory) = element.slot.factory.clone() else {
        return;
    };
    let built = factory(host);
    if let Some(wrapper) = element.slot.place(host, built) {
        wrappers.insert(element.node(), wrapper);
    }
    element.slot.bind_content(host, element.insets, priority);
    element.slot.release_height(host);
}

fn dematerialize<H: LayoutHost>(
    element: &mut Element<H>,
    host: &mut H,
    wrappers: &mut BTreeMap<NodeId, NodeId>,
    height: f64,
    priority: u16,
) {
    element.slot.hold_height(host, height, priority);
    element.slot.discard_content(host);
    wrappers.remove(&element.node());
}
