use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Number of strategy calls timed by this process, for debugging.
pub static TIMED_RUNS: AtomicU64 = AtomicU64::new(0);

/// Wall-clock timer around a single strategy call.
pub struct Timer {
    started: Instant,
}

impl Timer {
    pub fn start() -> Self {
        Timer { started: Instant::now() }
    }

    /// Elapsed time since `start`.
    pub fn stop(self) -> Duration {
        TIMED_RUNS.fetch_add(1, Ordering::Relaxed);
        self.started.elapsed()
    }
}

/// Strategy calls timed so far by this process.
pub fn timed_runs() -> u64 {
    TIMED_RUNS.load(Ordering::Relaxed)
}

/// Formats a duration as seconds with ten decimal places, e.g. `0.0000123456`.
pub fn format_seconds(elapsed: Duration) -> String {
    format!("{:.10}", elapsed.as_secs_f64())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_ten_decimals() {
        assert_eq!(format_seconds(Duration::from_micros(12)), "0.0000120000");
        assert_eq!(format_seconds(Duration::from_secs(2)), "2.0000000000");
    }

    #[test]
    fn timer_counts_runs() {
        let before = timed_runs();
        let _ = Timer::start().stop();
        assert!(timed_runs() > before);
    }
}
