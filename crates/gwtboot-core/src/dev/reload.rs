use std::time::{Duration, Instant};

/// Line the app server logs once (re)started
pub const RESTART_MARKER: &str = "Started Application in";

/// Measures time from a successful build to the server's restart line
#[derive(Debug, Default, Clone)]
pub struct ReloadTracker {
    build_finished: Option<Instant>,
}

impl ReloadTracker {
    pub fn build_succeeded(&mut self, now: Instant) {
        self.build_finished = Some(now);
    }

    pub fn awaiting_restart(&self) -> bool {
        self.build_finished.is_some()
    }

    /// Elapsed reload time, once the marker shows up after a build
    pub fn observe(&mut self, line: &str, now: Instant) -> Option<Duration> {
        if !line.contains(RESTART_MARKER) {
            return None;
        }
        self.build_finished
            .take()
            .map(|finished| now.saturating_duration_since(finished))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STARTED: &str = "INFO  c.acme.Application : Started Application in 1.92 seconds (process running for 2.3)";

    #[test]
    fn test_initial_start_is_not_a_reload() {
        let mut tracker = ReloadTracker::default();
        assert_eq!(tracker.observe(STARTED, Instant::now()), None);
    }

    #[test]
    fn test_reload_measured_once() {
        let t0 = Instant::now();
        let mut tracker = ReloadTracker::default();
        tracker.build_succeeded(t0);
        assert!(tracker.awaiting_restart());

        assert_eq!(tracker.observe("Tomcat started", t0 + Duration::from_secs(1)), None);
        assert_eq!(
            tracker.observe(STARTED, t0 + Duration::from_millis(2500)),
            Some(Duration::from_millis(2500))
        );
        assert!(!tracker.awaiting_restart());
        assert_eq!(tracker.observe(STARTED, t0 + Duration::from_secs(9)), None);
    }
}
