/// Frame timing for the render loop.
///
/// The loop calls [`FrameClock::tick`] once at the start of every frame and
/// feeds the returned delta into the scene. Deltas are clamped so a stalled
/// terminal (suspended process, slow SSH link) does not finish a layer turn
/// in a single jump.
use std::time::{Duration, Instant};

/// Longest frame delta handed to the scene, in seconds
pub const MAX_DELTA: f32 = 0.1;

pub struct FrameClock {
    last_tick: Instant,
    window_start: Instant,
    window_frames: u32,
    fps: f32,
    frame_count: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    fn starting_at(now: Instant) -> Self {
        Self {
            last_tick: now,
            window_start: now,
            window_frames: 0,
            fps: 0.0,
            frame_count: 0,
        }
    }

    /// Advance by one frame and return the clamped delta in seconds.
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> f32 {
        let raw_dt = now.saturating_duration_since(self.last_tick).as_secs_f32();
        self.last_tick = now;
        self.frame_count += 1;

        // Average over roughly one second
        self.window_frames += 1;
        let window = now.saturating_duration_since(self.window_start);
        if window >= Duration::from_secs(1) {
            self.fps = self.window_frames as f32 / window.as_secs_f32();
            self.window_frames = 0;
            self.window_start = now;
        }

        raw_dt.min(MAX_DELTA)
    }

    /// Frames per second measured over the last full second
    pub fn fps(&self) -> f32 {
        self.fps
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Time budget of one frame at `fps` frames per second
pub fn frame_budget(fps: u32) -> Duration {
    Duration::from_secs_f64(1.0 / fps.max(1) as f64)
}
