//! Frame timing of the demo loop.

use std::time::{Duration, Instant};

/// Count of frames averaged by the FPS tracker.
pub const FPS_WINDOW: u32 = 50;

/// Measures real time passed between frames.
#[derive(Debug)]
pub struct FrameClock {
    started: Instant,
    previous: Instant,
}

impl FrameClock {
    /// Starts the clock right now.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            started: now,
            previous: now,
        }
    }

    /// Time passed since the previous lap (or since start, for the first one).
    pub fn lap(&mut self) -> Duration {
        let now = Instant::now();
        let delta = now - self.previous;
        self.previous = now;
        delta
    }

    /// Time passed since the clock was started.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

/// Averages frame times over [`FPS_WINDOW`] frames.
#[derive(Debug, Default)]
pub struct FpsTracker {
    sum: Duration,
    frames: u32,
}

impl FpsTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records time of one frame.
    ///
    /// Returns average frames per second once the window is full, then starts over.
    ///
    pub fn record(&mut self, frame_time: Duration) -> Option<f32> {
        self.sum += frame_time;
        self.frames += 1;
        if self.frames < FPS_WINDOW {
            return None;
        }

        let average = self.sum.as_secs_f32() / self.frames as f32;
        self.sum = Duration::ZERO;
        self.frames = 0;
        if average > 0.0 {
            Some(1.0 / average)
        } else {
            Some(f32::INFINITY)
        }
    }
}
