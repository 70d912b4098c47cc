/// Single-threaded timer wheel on a virtual clock.
///
/// The frame loop feeds measured wall time into the scheduler, then pulls
/// due timers one at a time with [`Scheduler::next_due`].  Handlers run
/// between pulls, so a handler that cancels or replaces a timer is seen by
/// every later delivery of the same advance.  Only one timer of each
/// [`TimerKind`] exists at a time: scheduling a kind again replaces it.

use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Once per second: decrements the level clock.
    Countdown,
    /// Advances the pop animation of hit balloons.
    PopAnimation,
    /// Steps the bow through its draw frames after a shot.
    BowDraw,
    /// Inter-level pause before the next level is set up.
    LevelAdvance,
}

#[derive(Clone, Debug)]
struct Timer {
    kind: TimerKind,
    period: Duration,
    due: Duration,
    /// `None` repeats forever.
    remaining: Option<u32>,
    seq: u64,
}

#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    now: Duration,
    timers: Vec<Timer>,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    /// Fire `kind` every `period`, starting one period from now.
    pub fn every(&mut self, kind: TimerKind, period: Duration) {
        self.insert(kind, period, None);
    }

    /// Fire `kind` `times` times, `period` apart.
    pub fn repeat(&mut self, kind: TimerKind, period: Duration, times: u32) {
        if times == 0 {
            self.cancel(kind);
            return;
        }
        self.insert(kind, period, Some(times));
    }

    /// Fire `kind` once after `delay`.
    pub fn once(&mut self, kind: TimerKind, delay: Duration) {
        self.repeat(kind, delay, 1);
    }

    pub fn cancel(&mut self, kind: TimerKind) {
        self.timers.retain(|t| t.kind != kind);
    }

    pub fn cancel_all(&mut self) {
        self.timers.clear();
    }

    pub fn is_active(&self, kind: TimerKind) -> bool {
        self.timers.iter().any(|t| t.kind == kind)
    }

    pub fn active_count(&self) -> usize {
        self.timers.len()
    }

    /// Pop the earliest timer due at or before `deadline`, moving the clock
    /// to its due time.  Ties go to the timer scheduled first.
    pub fn next_due(&mut self, deadline: Duration) -> Option<TimerKind> {
        let idx = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= deadline)
            .min_by_key(|(_, t)| (t.due, t.seq))
            .map(|(i, _)| i)?;

        let Timer { kind, due, period, remaining, .. } = self.timers[idx].clone();
        self.now = self.now.max(due);
        match remaining {
            Some(1) => {
                self.timers.remove(idx);
            }
            Some(n) => {
                let timer = &mut self.timers[idx];
                timer.remaining = Some(n - 1);
                timer.due += period;
            }
            None => self.timers[idx].due += period,
        }
        Some(kind)
    }

    /// Move the clock to `deadline` once every due timer has been pulled.
    pub fn settle(&mut self, deadline: Duration) {
        self.now = self.now.max(deadline);
    }

    fn insert(&mut self, kind: TimerKind, period: Duration, remaining: Option<u32>) {
        if self.is_active(kind) {
            log::debug!("Replacing {:?} timer", kind);
            self.cancel(kind);
        }
        // A zero period would fire forever within one advance.
        let period = period.max(Duration::from_millis(1));
        self.timers.push(Timer {
            kind,
            period,
            due: self.now + period,
            remaining,
            seq: self.next_seq,
        });
        self.next_seq += 1;
    }
}
