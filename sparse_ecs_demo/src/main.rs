//! Terminal demo driving the `sparse_ecs` store frame by frame.

use std::env;
use std::error::Error;
use std::thread;
use std::time::Duration;

use sparse_ecs::config::{ENGINE_NAME, ENGINE_VERSION};
use sparse_ecs::EntityComponentManager;

use clock::{FpsTracker, FrameClock};
use config::Config;

mod clock;
mod components;
mod config;
mod logger;
mod scene;
mod systems;

const APP_NAME: &str = env!("CARGO_CRATE_NAME", "binary must be compiled by Cargo");
const APP_VERSION_STR: &str = env!("CARGO_PKG_VERSION", "binary must be compiled by Cargo");

const FRAMES: u32 = 12;
const DELTA_TIME: f32 = 1.0;
const FRAME_DELAY: Duration = Duration::from_millis(250);

/// Command line flag which advances frames by measured real time.
const MEASURE_TIME_FLAG: &str = "--measure-time";

/// Entry point of the demo
fn main() -> Result<(), Box<dyn Error + Send + Sync + 'static>> {
    let version = APP_VERSION_STR.parse()?;
    let config = Config::new(APP_NAME.to_string(), version)
        .with_frames(FRAMES)
        .with_delta_time(DELTA_TIME)
        .with_frame_delay(FRAME_DELAY)
        .with_render(true)
        .with_measured_time(env::args().skip(1).any(|arg| arg == MEASURE_TIME_FLAG));

    let _handle = logger::init(config.log_level())?;
    log::info!("logger initialized successfully");
    log::info!(
        "{} {} running on {} {}",
        config.name(),
        config.version(),
        ENGINE_NAME,
        *ENGINE_VERSION,
    );

    let mut ecm = EntityComponentManager::new();
    let mut schedule = systems::schedule(&mut ecm, config.render());
    scene::spawn(&mut ecm);

    let mut clock = FrameClock::new();
    let mut fps_tracker = FpsTracker::new();
    for frame in 0..config.frames() {
        let frame_time = clock.lap();
        if let Some(fps) = fps_tracker.record(frame_time) {
            log::info!("FPS: {:.1}", fps);
        }
        let delta_time = if config.measure_time() {
            frame_time.as_secs_f32()
        } else {
            config.delta_time()
        };

        if config.render() {
            println!(
                "Frame number: {} | Time (s): {:.3}",
                frame,
                clock.elapsed().as_secs_f32(),
            );
        }
        schedule.run_frame(&mut ecm, delta_time)?;
        log::debug!("frame {} finished, {} entities alive", frame, ecm.entity_count());

        if !config.frame_delay().is_zero() {
            thread::sleep(config.frame_delay());
        }
    }

    log::info!("closing this application");
    Ok(())
}
