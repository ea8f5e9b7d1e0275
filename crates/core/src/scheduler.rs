//! Scheduler module - deterministic timers driven by elapsed time
//!
//! The engine never reads a clock. The host advances a [`TimerQueue`] by the
//! milliseconds that passed, and due timers come back out in deadline order.
//! Cancelling a token guarantees its timer will never be returned again.

/// Handle for a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerToken(u64);

/// A timer returned by [`TimerQueue::pop_due`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired<T> {
    pub token: TimerToken,
    pub deadline_ms: u64,
    pub timer: T,
}

/// Capability to schedule and cancel timers.
pub trait Scheduler<T> {
    /// Current time of the scheduler's clock in milliseconds.
    fn now_ms(&self) -> u64;

    /// Fire `timer` once, `delay_ms` from now.
    fn schedule_after(&mut self, delay_ms: u32, timer: T) -> TimerToken;

    /// Fire `timer` every `interval_ms`, first after one interval.
    fn schedule_every(&mut self, interval_ms: u32, timer: T) -> TimerToken;

    /// Cancel a pending timer. Returns false if it already fired or was cancelled.
    fn cancel(&mut self, token: TimerToken) -> bool;

    /// Cancel every pending timer.
    fn cancel_all(&mut self);
}

#[derive(Debug, Clone)]
struct Entry<T> {
    token: TimerToken,
    deadline_ms: u64,
    interval_ms: Option<u32>,
    timer: T,
}

/// Manual-clock timer queue.
#[derive(Debug, Clone)]
pub struct TimerQueue<T> {
    now_ms: u64,
    next_token: u64,
    entries: Vec<Entry<T>>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            next_token: 0,
            entries: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_pending(&self, token: TimerToken) -> bool {
        self.entries.iter().any(|e| e.token == token)
    }

    /// Deadline of the earliest pending timer.
    pub fn next_deadline_ms(&self) -> Option<u64> {
        self.entries.iter().map(|e| e.deadline_ms).min()
    }

    fn push(&mut self, deadline_ms: u64, interval_ms: Option<u32>, timer: T) -> TimerToken {
        self.next_token += 1;
        let token = TimerToken(self.next_token);
        self.entries.push(Entry {
            token,
            deadline_ms,
            interval_ms,
            timer,
        });
        token
    }

    /// Move the clock forward without firing anything.
    ///
    /// Timers whose deadline is passed stay pending until popped; use
    /// [`TimerQueue::pop_due`] to drain them.
    pub fn set_now(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }
}

impl<T: Clone> TimerQueue<T> {
    /// Pop the earliest timer due at or before `until_ms`.
    ///
    /// The clock moves to the popped timer's deadline. Recurring timers are
    /// re-armed (same token) before being returned, so the caller may cancel
    /// them while handling the fire. Ties fire in scheduling order.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<Fired<T>> {
        let idx = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.deadline_ms <= until_ms)
            .min_by_key(|(_, e)| (e.deadline_ms, e.token))
            .map(|(i, _)| i)?;

        let deadline_ms = self.entries[idx].deadline_ms;
        self.now_ms = self.now_ms.max(deadline_ms);

        let fired = match self.entries[idx].interval_ms {
            Some(interval) => {
                let entry = &mut self.entries[idx];
                entry.deadline_ms = deadline_ms + interval.max(1) as u64;
                Fired {
                    token: entry.token,
                    deadline_ms,
                    timer: entry.timer.clone(),
                }
            }
            None => {
                let entry = self.entries.swap_remove(idx);
                Fired {
                    token: entry.token,
                    deadline_ms,
                    timer: entry.timer,
                }
            }
        };
        Some(fired)
    }

    /// Advance the clock by `elapsed_ms`, returning every timer that came due in order.
    pub fn advance(&mut self, elapsed_ms: u32) -> Vec<Fired<T>> {
        let until = self.now_ms + elapsed_ms as u64;
        let mut out = Vec::new();
        while let Some(fired) = self.pop_due(until) {
            out.push(fired);
        }
        self.set_now(until);
        out
    }
}

impl<T> Scheduler<T> for TimerQueue<T> {
    fn now_ms(&self) -> u64 {
        self.now_ms
    }

    fn schedule_after(&mut self, delay_ms: u32, timer: T) -> TimerToken {
        let deadline = self.now_ms + delay_ms as u64;
        self.push(deadline, None, timer)
    }

    fn schedule_every(&mut self, interval_ms: u32, timer: T) -> TimerToken {
        let interval = interval_ms.max(1);
        let deadline = self.now_ms + interval as u64;
        self.push(deadline, Some(interval), timer)
    }

    fn cancel(&mut self, token: TimerToken) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.token != token);
        self.entries.len() != before
    }

    fn cancel_all(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_shot_fires_once_at_deadline() {
        let mut q: TimerQueue<&str> = TimerQueue::new();
        q.schedule_after(300, "wrong");

        assert!(q.advance(299).is_empty());
        let fired = q.advance(1);
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].timer, "wrong");
        assert_eq!(fired[0].deadline_ms, 300);
        assert!(q.advance(1000).is_empty());
    }

    #[test]
    fn recurring_timer_rearms() {
        let mut q: TimerQueue<u8> = TimerQueue::new();
        q.schedule_every(100, 1);

        let fired = q.advance(350);
        let deadlines: Vec<u64> = fired.iter().map(|f| f.deadline_ms).collect();
        assert_eq!(deadlines, vec![100, 200, 300]);
        assert_eq!(q.next_deadline_ms(), Some(400));
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut q: TimerQueue<u8> = TimerQueue::new();
        let a = q.schedule_after(50, 1);
        let b = q.schedule_every(20, 2);

        assert!(q.cancel(a));
        assert!(!q.cancel(a));
        assert!(q.is_pending(b));
        q.cancel_all();
        assert!(q.is_empty());
        assert!(q.advance(1000).is_empty());
    }

    #[test]
    fn ties_fire_in_scheduling_order() {
        let mut q: TimerQueue<u8> = TimerQueue::new();
        q.schedule_after(10, 1);
        q.schedule_after(10, 2);
        q.schedule_after(5, 3);

        let order: Vec<u8> = q.advance(10).into_iter().map(|f| f.timer).collect();
        assert_eq!(order, vec![3, 1, 2]);
    }

    #[test]
    fn pop_due_moves_clock_to_deadline() {
        let mut q: TimerQueue<u8> = TimerQueue::new();
        q.schedule_after(40, 1);

        let fired = q.pop_due(100).unwrap();
        assert_eq!(fired.deadline_ms, 40);
        assert_eq!(q.now_ms(), 40);

        // Scheduling during handling is relative to the fired deadline.
        q.schedule_after(10, 2);
        assert_eq!(q.next_deadline_ms(), Some(50));
    }

    #[test]
    fn clock_never_moves_backwards() {
        let mut q: TimerQueue<u8> = TimerQueue::new();
        q.advance(100);
        q.set_now(50);
        assert_eq!(q.now_ms(), 100);
    }
}
