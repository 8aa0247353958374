use crate::{CommitPipeline, Key, LayoutEffectRegistration};

/// Remembered state of one component's layout effect.
///
/// The effect is registered on first use and stays registered, so it also
/// runs after layout-changing commits. A change in the dependency key marks
/// it due on the next commit.
#[derive(Default)]
pub struct LayoutEffectState {
    key: Option<Key>,
    registration: Option<LayoutEffectRegistration>,
}

impl LayoutEffectState {
    pub fn should_run(&self, key: Key) -> bool {
        match self.key {
            Some(current) => current != key,
            None => true,
        }
    }

    fn set_key(&mut self, key: Key) {
        self.key = Some(key);
    }

    /// Records the dependency key of the current render. `make_effect` is
    /// only called when a new registration is needed: on first use, or when
    /// the component moved to another pipeline.
    pub fn sync<F>(
        &mut self,
        pipeline: &CommitPipeline,
        key: Key,
        make_effect: impl FnOnce() -> F,
    ) where
        F: FnMut() + 'static,
    {
        let registered = self
            .registration
            .as_ref()
            .is_some_and(|registration| registration.belongs_to(pipeline));
        if !registered {
            self.cancel();
            self.registration = Some(pipeline.register_layout_effect(make_effect()));
            self.set_key(key);
            return;
        }
        if self.should_run(key) {
            self.set_key(key);
            if let Some(registration) = &self.registration {
                registration.invalidate();
            }
        }
    }

    pub fn is_registered(&self) -> bool {
        self.registration
            .as_ref()
            .is_some_and(LayoutEffectRegistration::is_active)
    }

    pub fn cancel(&mut self) {
        self.key = None;
        if let Some(registration) = self.registration.take() {
            registration.cancel();
        }
    }
}

impl Drop for LayoutEffectState {
    fn drop(&mut self) {
        self.cancel();
    }
}
