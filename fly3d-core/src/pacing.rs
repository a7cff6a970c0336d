/// Frame timing on a monotonic clock
///
/// Each frame has a deadline one period after the previous one. Frames that
/// overrun their deadline restart the schedule from "now" instead of trying to
/// catch up, and the reported delta time is clamped so a stall does not turn
/// into a huge movement step.
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct FramePacer {
    period: Duration,
    max_delta: Duration,
    last_frame: Instant,
    deadline: Instant,
}

impl FramePacer {
    pub fn new(fps: u32, now: Instant) -> Self {
        let period = Duration::from_secs(1) / fps.max(1);
        Self {
            period,
            max_delta: Duration::from_millis(100),
            last_frame: now,
            deadline: now + period,
        }
    }

    pub fn with_max_delta(mut self, max_delta: Duration) -> Self {
        self.max_delta = max_delta;
        self
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Marks the start of a frame and returns the elapsed seconds since the
    /// previous one, clamped to the configured maximum
    pub fn begin_frame(&mut self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.last_frame);
        self.last_frame = now;
        elapsed.min(self.max_delta).as_secs_f32()
    }

    /// Time left until the current frame's deadline, zero if already past it
    pub fn remaining(&self, now: Instant) -> Duration {
        self.deadline.saturating_duration_since(now)
    }

    /// Moves the deadline to the next frame
    pub fn advance(&mut self, now: Instant) {
        if now > self.deadline {
            log::trace!("frame overran its deadline by {:?}", now - self.deadline);
            self.deadline = now + self.period;
        } else {
            self.deadline += self.period;
        }
    }

    /// Blocks until the current deadline, then schedules the next one
    pub fn wait(&mut self) {
        let remaining = self.remaining(Instant::now());
        if !remaining.is_zero() {
            std::thread::sleep(remaining);
        }
        self.advance(Instant::now());
    }
}
