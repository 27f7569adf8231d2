//! Pausable stopwatch driven by caller-supplied instants.

use std::time::{Duration, Instant};

/// Measures elapsed time between `start` and `stop`, excluding paused spans.
///
/// Every operation takes the current instant explicitly so the stopwatch can be
/// driven by a simulated clock in tests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stopwatch {
    state: State,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum State {
    #[default]
    Stopped,
    Running {
        since: Instant,
        carried: Duration,
    },
    Paused {
        elapsed: Duration,
    },
}

impl Stopwatch {
    /// Creates a stopped stopwatch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts (or restarts) timing from zero.
    pub fn start(&mut self, now: Instant) {
        self.state = State::Running {
            since: now,
            carried: Duration::ZERO,
        };
    }

    /// Stops timing and discards the accumulated time.
    pub fn stop(&mut self) {
        self.state = State::Stopped;
    }

    /// Freezes the elapsed time. Has no effect unless running.
    pub fn pause(&mut self, now: Instant) {
        if let State::Running { .. } = self.state {
            self.state = State::Paused {
                elapsed: self.elapsed(now),
            };
        }
    }

    /// Resumes timing after a pause. Has no effect unless paused.
    pub fn unpause(&mut self, now: Instant) {
        if let State::Paused { elapsed } = self.state {
            self.state = State::Running {
                since: now,
                carried: elapsed,
            };
        }
    }

    /// Time accumulated while running; zero when stopped.
    #[must_use]
    pub fn elapsed(&self, now: Instant) -> Duration {
        match self.state {
            State::Stopped => Duration::ZERO,
            State::Running { since, carried } => {
                carried.saturating_add(now.saturating_duration_since(since))
            }
            State::Paused { elapsed } => elapsed,
        }
    }

    /// Reports whether the stopwatch is running or paused.
    #[must_use]
    pub fn is_started(&self) -> bool {
        !matches!(self.state, State::Stopped)
    }

    /// Reports whether the stopwatch is paused.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        matches!(self.state, State::Paused { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paused_span_is_excluded_from_elapsed_time() {
        let t0 = Instant::now();
        let mut stopwatch = Stopwatch::new();
        stopwatch.start(t0);
        stopwatch.pause(t0 + Duration::from_millis(300));
        assert!(stopwatch.is_paused());
        assert_eq!(
            stopwatch.elapsed(t0 + Duration::from_secs(10)),
            Duration::from_millis(300)
        );

        stopwatch.unpause(t0 + Duration::from_secs(1));
        assert_eq!(
            stopwatch.elapsed(t0 + Duration::from_millis(1_200)),
            Duration::from_millis(500)
        );
    }

    #[test]
    fn stopped_stopwatch_reports_zero() {
        let t0 = Instant::now();
        let mut stopwatch = Stopwatch::new();
        assert_eq!(stopwatch.elapsed(t0), Duration::ZERO);

        stopwatch.start(t0);
        stopwatch.stop();
        assert!(!stopwatch.is_started());
        assert_eq!(stopwatch.elapsed(t0 + Duration::from_secs(3)), Duration::ZERO);
    }

    #[test]
    fn pause_and_unpause_are_ignored_in_the_wrong_state() {
        let t0 = Instant::now();
        let mut stopwatch = Stopwatch::new();
        stopwatch.pause(t0);
        assert!(!stopwatch.is_started());

        stopwatch.start(t0);
        stopwatch.unpause(t0 + Duration::from_secs(5));
        assert_eq!(
            stopwatch.elapsed(t0 + Duration::from_secs(2)),
            Duration::from_secs(2)
        );
    }
}
