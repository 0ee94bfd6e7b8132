use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use indexmap::IndexMap;

/// Identifier of a scheduled task on the host event loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// Cancellable timers and animation frames on the host event loop.
///
/// Fired tasks are routed back to the card through `WeatherCard::on_timer`.
/// Intervals keep firing under the same id until cancelled.
pub trait Scheduler {
    fn set_timeout(&mut self, delay: Duration) -> TimerId;
    fn set_interval(&mut self, period: Duration) -> TimerId;
    fn request_animation_frame(&mut self) -> TimerId;
    /// Cancelling an unknown or already fired id is a no-op.
    fn cancel(&mut self, id: TimerId);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduledKind {
    Timeout(Duration),
    Interval(Duration),
    AnimationFrame,
}

#[derive(Debug, Default)]
struct ManualSchedulerState {
    next_id: u64,
    pending: IndexMap<TimerId, ScheduledKind>,
    cancelled: Vec<TimerId>,
}

/// Scheduler that never fires on its own.
///
/// Clones share state, so a test or headless host can keep a handle, inspect
/// pending tasks and fire them explicitly.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    state: Rc<RefCell<ManualSchedulerState>>,
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn schedule(&self, kind: ScheduledKind) -> TimerId {
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        let id = TimerId(state.next_id);
        state.pending.insert(id, kind);
        id
    }

    #[must_use]
    pub fn pending(&self) -> Vec<(TimerId, ScheduledKind)> {
        self.state
            .borrow()
            .pending
            .iter()
            .map(|(id, kind)| (*id, *kind))
            .collect()
    }

    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.state.borrow().pending.len()
    }

    #[must_use]
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.state.borrow().pending.contains_key(&id)
    }

    #[must_use]
    pub fn kind_of(&self, id: TimerId) -> Option<ScheduledKind> {
        self.state.borrow().pending.get(&id).copied()
    }

    #[must_use]
    pub fn cancelled(&self) -> Vec<TimerId> {
        self.state.borrow().cancelled.clone()
    }

    /// Marks a task as fired. Timeouts and frames are consumed; intervals stay pending.
    ///
    /// Returns `false` when the id is not pending.
    pub fn fire(&self, id: TimerId) -> bool {
        let mut state = self.state.borrow_mut();
        match state.pending.get(&id).copied() {
            Some(ScheduledKind::Interval(_)) => true,
            Some(_) => {
                state.pending.shift_remove(&id);
                true
            }
            None => false,
        }
    }
}

impl Scheduler for ManualScheduler {
    fn set_timeout(&mut self, delay: Duration) -> TimerId {
        self.schedule(ScheduledKind::Timeout(delay))
    }

    fn set_interval(&mut self, period: Duration) -> TimerId {
        self.schedule(ScheduledKind::Interval(period))
    }

    fn request_animation_frame(&mut self) -> TimerId {
        self.schedule(ScheduledKind::AnimationFrame)
    }

    fn cancel(&mut self, id: TimerId) {
        let mut state = self.state.borrow_mut();
        if state.pending.shift_remove(&id).is_some() {
            state.cancelled.push(id);
        }
    }
}
