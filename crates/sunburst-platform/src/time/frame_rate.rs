use std::time::{Duration, Instant};

/// Counts presented frames and reports frames-per-second over windows of at
/// least `interval` (one second by default).
#[derive(Debug, Clone)]
pub struct FrameRateCounter {
    window_start: Option<Instant>,
    frames: u32,
    interval: Duration,
}

impl FrameRateCounter {
    pub fn new() -> Self {
        Self::with_interval(Duration::from_secs(1))
    }

    pub fn with_interval(interval: Duration) -> Self {
        debug_assert!(!interval.is_zero());
        Self {
            window_start: None,
            frames: 0,
            interval,
        }
    }

    /// Records one frame; returns the rate when a reporting window closes.
    pub fn tick(&mut self) -> Option<f64> {
        self.tick_at(Instant::now())
    }

    /// Same as [`tick`](Self::tick) with an explicit timestamp.
    pub fn tick_at(&mut self, now: Instant) -> Option<f64> {
        let start = *self.window_start.get_or_insert(now);
        self.frames = self.frames.saturating_add(1);

        let elapsed = now.saturating_duration_since(start);
        if elapsed < self.interval {
            return None;
        }

        let fps = f64::from(self.frames) / elapsed.as_secs_f64();
        self.frames = 0;
        self.window_start = Some(now);
        Some(fps)
    }
}

impl Default for FrameRateCounter {
    fn default() -> Self {
        Self::new()
    }
}
