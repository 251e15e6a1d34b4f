//! Configuration of the demo application.

use std::time::Duration;

use log::LevelFilter;
use semver::Version;

/// This struct represents configuration of the demo frame loop.
#[derive(Debug, Clone)]
pub struct Config {
    name: String,
    version: Version,
    frames: u32,
    delta_time: f32,
    frame_delay: Duration,
    render: bool,
    measure_time: bool,
    log_level: LevelFilter,
}

impl Config {
    /// Creates new configuration with given name and version of the application.
    pub fn new(name: String, version: Version) -> Self {
        Self {
            name,
            version,
            frames: 5,
            delta_time: 1.0,
            frame_delay: Duration::ZERO,
            render: true,
            measure_time: false,
            log_level: if cfg!(debug_assertions) {
                LevelFilter::Debug
            } else {
                LevelFilter::Info
            },
        }
    }

    /// Name of the application.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Semver version of the application.
    pub fn version(&self) -> &Version {
        &self.version
    }

    /// Count of frames to run.
    pub fn frames(&self) -> u32 {
        self.frames
    }

    /// Fixed time step of every frame, in seconds.
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Real time to wait after each frame.
    pub fn frame_delay(&self) -> Duration {
        self.frame_delay
    }

    /// If the text grid will be printed each frame.
    pub fn render(&self) -> bool {
        self.render
    }

    /// If frames are advanced by measured real time instead of [`delta_time`](Self::delta_time).
    pub fn measure_time(&self) -> bool {
        self.measure_time
    }

    /// Maximal level of log messages.
    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    /// Replaces count of frames to run.
    pub fn with_frames(mut self, frames: u32) -> Self {
        self.frames = frames;
        self
    }

    /// Replaces fixed time step of every frame.
    pub fn with_delta_time(mut self, delta_time: f32) -> Self {
        self.delta_time = delta_time;
        self
    }

    /// Replaces real time to wait after each frame.
    pub fn with_frame_delay(mut self, frame_delay: Duration) -> Self {
        self.frame_delay = frame_delay;
        self
    }

    /// Enables or disables printing of the text grid.
    pub fn with_render(mut self, render: bool) -> Self {
        self.render = render;
        self
    }

    /// Enables or disables measured real time frame step.
    pub fn with_measured_time(mut self, measure_time: bool) -> Self {
        self.measure_time = measure_time;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new("Sparse ECS demo".to_string(), Version::new(0, 0, 0))
    }
}
