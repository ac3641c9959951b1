use crate::coordinator::Completion;
use crate::transition::Queued;
use crate::{Coordinator, LayoutHost, ListError, UpdatePolicy};

impl<H: LayoutHost> Coordinator<H> {
    /// Starts collecting mutations. Until [`Coordinator::end_updates`], appends and inserts
    /// are wired into the chain but not animated, and deletes are only marked.
    pub fn begin_updates(&mut self, policy: UpdatePolicy) {
        ldebug!(?policy, "begin_updates");
        self.batch = Some(policy);
    }

    /// Commits the collected mutations according to the policy given to `begin_updates`
    /// (`AnimatedLayout` when no batch was open).
    ///
    /// `completion` fires once the commit has fully settled.
    pub fn end_updates(
        &mut self,
        host: &mut H,
        completion: Option<Completion>,
    ) -> Result<(), ListError> {
        self.ensure_idle()?;
        let policy = self.batch.take().unwrap_or_default();
        let inserting = self.elements.iter().any(|e| e.inserting);
        let deleting = self.elements.iter().any(|e| e.deleting);
        ldebug!(?policy, inserting, deleting, "end_updates");

        match policy {
            UpdatePolicy::NoLayout => {
                // Deleted slots leave without a survivor relation; the chain keeps a gap
                // there until the caller lays the list out again.
                self.remove_deleting(host);
                self.clear_inserting();
                if let Some(completion) = completion {
                    completion();
                }
            }
            UpdatePolicy::LayoutOnly => {
                let runs = self.deletion_runs();
                self.rewire_deleted(host, &runs);
                host.resolve();
                self.clear_inserting();
                self.completions.extend(completion);
                self.settle(host);
            }
            UpdatePolicy::AnimatedLayout => {
                self.completions.extend(completion);
                let duration = self.options.transition_duration;
                match (inserting, deleting) {
                    (true, true) => {
                        self.queued.push_back(Queued::Insertion(duration / 2));
                        self.queued.push_back(Queued::Deletion(duration / 2));
                    }
                    (true, false) => self.queued.push_back(Queued::Insertion(duration)),
                    (false, true) => self.queued.push_back(Queued::Deletion(duration)),
                    (false, false) => {}
                }
                self.drive(host);
            }
        }
        Ok(())
    }
}
