use std::time::Instant;

/// Handle to an armed timer, used to cancel it or to recognise it when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug)]
struct Armed<A> {
    id: TimerId,
    at: Instant,
    action: A,
}

/// Single-shot timers driven by the event loop. Nothing runs on its own:
/// the loop calls [`Scheduler::fire_due`] and dispatches what it returns.
#[derive(Debug)]
pub struct Scheduler<A> {
    next_id: u64,
    armed: Vec<Armed<A>>,
}

impl<A> Default for Scheduler<A> {
    fn default() -> Self {
        Scheduler {
            next_id: 0,
            armed: Vec::new(),
        }
    }
}

impl<A> Scheduler<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a timer that fires at `at`
    pub fn schedule(&mut self, at: Instant, action: A) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.armed.push(Armed { id, at, action });
        id
    }

    /// Disarm a timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.armed.len();
        self.armed.retain(|t| t.id != id);
        self.armed.len() != before
    }

    /// Remove and return every timer due at `now`, earliest first
    pub fn fire_due(&mut self, now: Instant) -> Vec<(TimerId, A)> {
        let mut due = Vec::new();
        let mut i = 0;
        while i < self.armed.len() {
            if self.armed[i].at <= now {
                due.push(self.armed.remove(i));
            } else {
                i += 1;
            }
        }
        due.sort_by_key(|t| (t.at, t.id.0));
        due.into_iter().map(|t| (t.id, t.action)).collect()
    }

    /// When the earliest armed timer is due
    pub fn next_deadline(&self) -> Option<Instant> {
        self.armed.iter().map(|t| t.at).min()
    }

    pub fn len(&self) -> usize {
        self.armed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.armed.is_empty()
    }
}
