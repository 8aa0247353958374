//! Commit pipeline with "after layout, before paint" effects.
//!
//! A host drives one [`CommitPipeline::commit`] per frame once its layout
//! pass has settled. Layout effects registered by components run inside that
//! call, after geometry is final and before the supplied paint step.
//!
//! Each registration owns one slot. A slot runs on a commit when it was
//! invalidated since the previous run (its dependencies changed) or when the
//! commit reports that layout geometry may have moved. Invalidating a slot
//! twice before a commit still yields a single run.

use crate::CommitScheduler;
use smallvec::SmallVec;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

type EffectFn = Box<dyn FnMut()>;

/// What the host knows about the commit it is about to finish.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CommitInfo {
    /// Layout geometry of at least one node may have changed in this commit.
    pub layout_changed: bool,
}

impl CommitInfo {
    pub const fn layout_changed() -> Self {
        Self {
            layout_changed: true,
        }
    }

    pub const fn unchanged() -> Self {
        Self {
            layout_changed: false,
        }
    }
}

struct EffectSlot {
    id: u64,
    dirty: bool,
    // Taken out while the effect runs so it may touch the pipeline.
    effect: Option<EffectFn>,
}

#[derive(Default)]
struct PipelineState {
    next_id: u64,
    slots: SmallVec<[EffectSlot; 4]>,
    commits: u64,
}

impl PipelineState {
    fn slot_mut(&mut self, id: u64) -> Option<&mut EffectSlot> {
        self.slots.iter_mut().find(|slot| slot.id == id)
    }
}

struct PipelineInner {
    state: RefCell<PipelineState>,
    scheduler: Option<Rc<dyn CommitScheduler>>,
}

impl PipelineInner {
    fn request_commit(&self) {
        if let Some(scheduler) = &self.scheduler {
            scheduler.schedule_commit();
        }
    }
}

#[derive(Clone)]
pub struct CommitPipeline {
    inner: Rc<PipelineInner>,
}

impl Default for CommitPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl CommitPipeline {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(PipelineInner {
                state: RefCell::new(PipelineState::default()),
                scheduler: None,
            }),
        }
    }

    /// Pipeline that notifies `scheduler` whenever a layout effect becomes due.
    pub fn with_scheduler(scheduler: Rc<dyn CommitScheduler>) -> Self {
        Self {
            inner: Rc::new(PipelineInner {
                state: RefCell::new(PipelineState::default()),
                scheduler: Some(scheduler),
            }),
        }
    }

    /// Registers `effect` to run after the next commit and after every
    /// later commit that changes layout, until the registration is dropped.
    pub fn register_layout_effect(
        &self,
        effect: impl FnMut() + 'static,
    ) -> LayoutEffectRegistration {
        let id = {
            let mut state = self.inner.state.borrow_mut();
            state.next_id += 1;
            let id = state.next_id;
            state.slots.push(EffectSlot {
                id,
                dirty: true,
                effect: Some(Box::new(effect)),
            });
            id
        };
        log::trace!("registered layout effect {id}");
        self.inner.request_commit();
        LayoutEffectRegistration {
            pipeline: Rc::downgrade(&self.inner),
            id: Some(id),
        }
    }

    /// Finishes a commit: runs every due layout effect in registration
    /// order, then `paint`. Returns how many effects ran.
    pub fn commit(&self, info: CommitInfo, paint: impl FnOnce()) -> usize {
        let due: SmallVec<[u64; 4]> = {
            let mut state = self.inner.state.borrow_mut();
            state.commits += 1;
            state
                .slots
                .iter_mut()
                .filter(|slot| slot.dirty || info.layout_changed)
                .map(|slot| {
                    slot.dirty = false;
                    slot.id
                })
                .collect()
        };

        let mut ran = 0;
        for id in due {
            let effect = {
                let mut state = self.inner.state.borrow_mut();
                state.slot_mut(id).and_then(|slot| slot.effect.take())
            };
            // Cancelled by an earlier effect in this same commit.
            let Some(mut effect) = effect else {
                continue;
            };
            effect();
            ran += 1;
            if let Some(slot) = self.inner.state.borrow_mut().slot_mut(id) {
                slot.effect = Some(effect);
            }
        }
        log::trace!("commit ran {ran} layout effect(s), layout_changed={}", info.layout_changed);
        paint();
        ran
    }

    /// Number of registered effects that will run on the next commit even
    /// if layout does not change.
    pub fn pending_effects(&self) -> usize {
        self.inner
            .state
            .borrow()
            .slots
            .iter()
            .filter(|slot| slot.dirty)
            .count()
    }

    pub fn registered_effects(&self) -> usize {
        self.inner.state.borrow().slots.len()
    }

    pub fn commit_count(&self) -> u64 {
        self.inner.state.borrow().commits
    }
}

/// Keeps a layout effect registered; dropping it unregisters the effect.
pub struct LayoutEffectRegistration {
    pipeline: Weak<PipelineInner>,
    id: Option<u64>,
}

impl LayoutEffectRegistration {
    /// Marks the effect due on the next commit regardless of layout changes.
    pub fn invalidate(&self) {
        let (Some(id), Some(pipeline)) = (self.id, self.pipeline.upgrade()) else {
            return;
        };
        let marked = match pipeline.state.borrow_mut().slot_mut(id) {
            Some(slot) => {
                slot.dirty = true;
                true
            }
            None => false,
        };
        if marked {
            pipeline.request_commit();
        }
    }

    pub fn is_active(&self) -> bool {
        self.id.is_some() && self.pipeline.strong_count() > 0
    }

    /// Returns `true` if this registration belongs to `pipeline`.
    pub fn belongs_to(&self, pipeline: &CommitPipeline) -> bool {
        std::ptr::eq(self.pipeline.as_ptr(), Rc::as_ptr(&pipeline.inner))
    }

    pub fn cancel(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let (Some(id), Some(pipeline)) = (self.id.take(), self.pipeline.upgrade()) {
            // The effect is dropped outside the borrow; it may own registrations.
            let removed = {
                let mut state = pipeline.state.borrow_mut();
                let index = state.slots.iter().position(|slot| slot.id == id);
                index.map(|index| state.slots.remove(index))
            };
            drop(removed);
            log::trace!("unregistered layout effect {id}");
        }
    }
}

impl Drop for LayoutEffectRegistration {
    fn drop(&mut self) {
        self.release();
    }
}
