//! Process-wide, read-mostly-once-a-run engine configuration.

use std::time::Duration;

/// The PCM sample rate the whole engine assumes.
pub const FRAMERATE: f64 = 44_100.0;

/// One scrape emission: 100ms at [`FRAMERATE`].
pub const SCRAPE_SAMPLES_PER_CHUNK: usize = 4410;

/// Surface-profile pixel pitch used to derive `dsdx`/`d2sdx2` and to map a
/// scrape speed to a sample count.
pub const SCRAPE_SURFACE_PITCH_M: f64 = 1_394.068e-9;

/// Number of modal components synthesized per object.
pub const DEFAULT_MODE_COUNT: usize = 10;

/// A single configuration record constructed once at engine startup and
/// held by shared reference by the multiplexer and every `AudioEvent`.
///
/// Stable for the duration of a tick; reconfiguration is only meaningful
/// between ticks.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Global amplitude multiplier applied to every event's `initial_amp`.
    pub simulation_amp: f64,
    /// When set, clamps synthesized impact amplitude to `0.99`.
    pub prevent_distortion: bool,
    /// When set, clamps impact contact time to 2ms.
    pub clamp_contact_time: bool,
    /// Collision speed below which the physics layer wouldn't even route
    /// an event here; retained so hosts can validate before calling in.
    pub min_speed: f64,
    /// Scrape speeds are clamped to this ceiling.
    pub scrape_max_speed: f64,
    /// Minimum gap between successive impact hits in one series.
    pub min_time_between_impacts: Duration,
    /// Gap beyond which an impact series is considered over.
    pub max_time_between_impacts: Duration,
    /// Bound on how many join iterations `Multiplexer::tick` will wait for
    /// outstanding workers before raising a diagnostic timeout.
    pub join_timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            simulation_amp: 0.5,
            prevent_distortion: true,
            clamp_contact_time: true,
            min_speed: 0.0,
            scrape_max_speed: 5.0,
            min_time_between_impacts: Duration::from_millis(25),
            max_time_between_impacts: Duration::from_secs(3),
            join_timeout: Duration::from_secs(5),
        }
    }
}
