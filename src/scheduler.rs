//! # Sample Scheduling
//!
//! Fixed-interval due-check for the measurement loop. The firmware owns the
//! clock and the sleep; this type only answers "is a cycle due at this
//! instant". The first check after construction is always due, so a freshly
//! booted device uplinks immediately instead of waiting out a full interval
//! with no proof of life.

/// Decides when the next measurement cycle should run.
///
/// Each due check re-arms the interval from the check time rather than a
/// fixed grid, so a cycle delayed by a slow radio join pushes the next one
/// out instead of firing two back to back.
#[derive(Debug)]
pub struct SampleScheduler {
    interval_s: i64,
    next_due_s: Option<i64>,
}

impl SampleScheduler {
    /// Create a scheduler firing every `interval_s` seconds
    pub fn new(interval_s: i64) -> Self {
        SampleScheduler {
            interval_s,
            next_due_s: None,
        }
    }

    /// Check whether a cycle is due at `now_s` (monotonic seconds).
    ///
    /// Returns `true` on the first call and whenever `now_s` has reached the
    /// re-armed deadline; otherwise `false` without side effects.
    pub fn is_due(&mut self, now_s: i64) -> bool {
        match self.next_due_s {
            None => {
                self.next_due_s = Some(now_s + self.interval_s);
                true
            }
            Some(next_due_s) if now_s < next_due_s => false,
            Some(_) => {
                self.next_due_s = Some(now_s + self.interval_s);
                true
            }
        }
    }
}
