//! Leading-and-trailing rate limiter for move samples
//!
//! The limiter never runs anything itself. It decides whether a call may
//! proceed now, and otherwise keeps the most recent arguments until the
//! host polls past the deadline. Time is passed in explicitly so the
//! limiter works the same on any event loop and in tests.

#[derive(Debug, Clone)]
struct Pending<T> {
    due_ms: i64,
    args: T,
}

/// Limits a handler to one invocation per `interval_ms`
///
/// - The first call after a quiet period runs immediately.
/// - Calls inside the interval are deferred; only the latest is kept.
/// - The deferred call runs once, with the latest arguments, when polled
///   at or after its deadline.
#[derive(Debug, Clone)]
pub struct RateLimiter<T> {
    interval_ms: i64,
    /// Time of the last call that was allowed through
    previous_ms: Option<i64>,
    pending: Option<Pending<T>>,
}

impl<T> RateLimiter<T> {
    /// Create a limiter; an interval of 0 lets every call through
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms: i64::try_from(interval_ms).unwrap_or(i64::MAX),
            previous_ms: None,
            pending: None,
        }
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms as u64
    }

    /// Submit a call at `now_ms`
    ///
    /// Returns the arguments back if the call should run now, or `None` if
    /// it was deferred.
    pub fn submit(&mut self, now_ms: i64, args: T) -> Option<T> {
        let remaining = match self.previous_ms {
            Some(previous) => self.interval_ms.saturating_sub(now_ms.saturating_sub(previous)),
            None => 0,
        };

        // A clock that went backwards also counts as a quiet period.
        if remaining <= 0 || remaining > self.interval_ms {
            self.pending = None;
            self.previous_ms = Some(now_ms);
            return Some(args);
        }

        match &mut self.pending {
            Some(pending) => pending.args = args,
            None => {
                self.pending = Some(Pending {
                    due_ms: now_ms.saturating_add(remaining),
                    args,
                });
            }
        }
        None
    }

    /// Release the deferred call if its deadline has passed
    pub fn poll(&mut self, now_ms: i64) -> Option<T> {
        match &self.pending {
            Some(pending) if now_ms >= pending.due_ms => {
                self.previous_ms = Some(now_ms);
                self.pending.take().map(|p| p.args)
            }
            _ => None,
        }
    }

    /// Release the deferred call regardless of its deadline
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.args)
    }

    /// When the deferred call becomes due, if there is one
    pub fn deadline(&self) -> Option<i64> {
        self.pending.as_ref().map(|p| p.due_ms)
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drop any deferred call and forget the last invocation time
    pub fn reset(&mut self) {
        self.pending = None;
        self.previous_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_huge_interval_saturates_deadline() {
        let mut limiter = RateLimiter::new(u64::MAX);
        assert_eq!(limiter.submit(1000, 'a'), Some('a'));
        assert_eq!(limiter.submit(1001, 'b'), None);
        assert_eq!(limiter.submit(1002, 'c'), None);

        assert_eq!(limiter.deadline(), Some(i64::MAX));
        assert_eq!(limiter.poll(2000), None);
        assert_eq!(limiter.flush(), Some('c'));
    }

    #[test]
    fn test_first_call_runs_immediately() {
        let mut limiter = RateLimiter::new(16);
        assert_eq!(limiter.submit(1000, 'a'), Some('a'));
        assert!(!limiter.has_pending());
    }

    #[test]
    fn test_calls_within_interval_are_deferred() {
        let mut limiter = RateLimiter::new(16);
        limiter.submit(1000, 'a');

        assert_eq!(limiter.submit(1005, 'b'), None);
        assert_eq!(limiter.deadline(), Some(1016));
        assert_eq!(limiter.poll(1010), None);
        assert_eq!(limiter.poll(1016), Some('b'));
        assert_eq!(limiter.poll(1030), None);
    }

    #[test]
    fn test_latest_deferred_args_win() {
        let mut limiter = RateLimiter::new(16);
        limiter.submit(1000, 'a');
        limiter.submit(1004, 'b');
        limiter.submit(1008, 'c');

        // Deadline is fixed by the first deferred call
        assert_eq!(limiter.deadline(), Some(1016));
        assert_eq!(limiter.poll(1020), Some('c'));
        assert!(!limiter.has_pending());
    }

    #[test]
    fn test_call_after_interval_replaces_pending() {
        let mut limiter = RateLimiter::new(16);
        limiter.submit(1000, 'a');
        limiter.submit(1005, 'b');

        // Host never polled; the next call is past the interval and runs
        assert_eq!(limiter.submit(1020, 'c'), Some('c'));
        assert!(!limiter.has_pending());
    }

    #[test]
    fn test_poll_restarts_interval() {
        let mut limiter = RateLimiter::new(16);
        limiter.submit(1000, 'a');
        limiter.submit(1001, 'b');
        assert_eq!(limiter.poll(1016), Some('b'));

        assert_eq!(limiter.submit(1020, 'c'), None);
        assert_eq!(limiter.deadline(), Some(1032));
    }

    #[test]
    fn test_zero_interval_passes_everything() {
        let mut limiter = RateLimiter::new(0);
        assert_eq!(limiter.submit(1000, 1), Some(1));
        assert_eq!(limiter.submit(1000, 2), Some(2));
        assert_eq!(limiter.submit(1001, 3), Some(3));
    }

    #[test]
    fn test_clock_going_backwards_runs_immediately() {
        let mut limiter = RateLimiter::new(16);
        limiter.submit(1000, 'a');
        assert_eq!(limiter.submit(900, 'b'), Some('b'));
    }

    #[test]
    fn test_flush_and_reset() {
        let mut limiter = RateLimiter::new(16);
        limiter.submit(1000, 'a');
        limiter.submit(1001, 'b');
        assert_eq!(limiter.flush(), Some('b'));
        assert_eq!(limiter.flush(), None);

        limiter.submit(1002, 'c');
        limiter.reset();
        assert!(!limiter.has_pending());
        assert_eq!(limiter.submit(1003, 'd'), Some('d'));
    }
}
