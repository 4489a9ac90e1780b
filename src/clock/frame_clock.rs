use anyhow::Result;
use log::warn;

use super::time::{SystemTimeProvider, TimeProvider};

/// Nominal frame interval at the 60 Hz target cadence.
const NOMINAL_FRAME_US: i64 = 16_667;
/// Real gaps longer than this are treated as stalls and clamped.
const STALL_THRESHOLD_US: i64 = 100_000;
/// How often the FPS estimate is refreshed.
const FPS_REFRESH_US: i64 = 1_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockState {
    Stopped,
    Running,
    Paused,
}

/// One delivered frame: virtual game time plus the measured (clamped)
/// delta since the previous tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub game_time_ms: i64,
    pub delta_seconds: f32,
}

/// Monotonic virtual game clock. Game time is wall time since `start`
/// minus every paused span, so gameplay timing survives pause/resume and
/// irregular tick delivery.
///
/// The host owns the cadence: it calls `tick` (or `tick_with`) once per
/// frame and forwards the returned game time to the engine.
pub struct FrameClock<T: TimeProvider = SystemTimeProvider> {
    time: T,
    state: ClockState,
    start_us: i64,
    last_tick_us: i64,
    pause_started_us: i64,
    paused_total_us: i64,
    game_time_ms: i64,
    frame_count: u32,
    fps: f32,
    fps_window_start_us: i64,
}

impl FrameClock<SystemTimeProvider> {
    pub fn new() -> Self {
        Self::with_provider(SystemTimeProvider::new())
    }
}

impl Default for FrameClock<SystemTimeProvider> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TimeProvider> FrameClock<T> {
    pub fn with_provider(time: T) -> Self {
        Self {
            time,
            state: ClockState::Stopped,
            start_us: 0,
            last_tick_us: 0,
            pause_started_us: 0,
            paused_total_us: 0,
            game_time_ms: 0,
            frame_count: 0,
            fps: 0.0,
            fps_window_start_us: 0,
        }
    }

    /// Start the clock from zero game time. No-op unless stopped.
    pub fn start(&mut self) {
        if self.state != ClockState::Stopped {
            return;
        }
        let now = self.time.now_us();
        self.state = ClockState::Running;
        self.start_us = now;
        self.last_tick_us = now;
        self.paused_total_us = 0;
        self.game_time_ms = 0;
        self.frame_count = 0;
        self.fps = 0.0;
        self.fps_window_start_us = now;
    }

    pub fn stop(&mut self) {
        self.state = ClockState::Stopped;
    }

    /// Suspend game time. No-op unless running.
    pub fn pause(&mut self) {
        if self.state != ClockState::Running {
            return;
        }
        self.state = ClockState::Paused;
        self.pause_started_us = self.time.now_us();
    }

    /// Resume after a pause, folding the paused span out of game time.
    /// No-op unless paused.
    pub fn resume(&mut self) {
        if self.state != ClockState::Paused {
            return;
        }
        let now = self.time.now_us();
        self.paused_total_us += now - self.pause_started_us;
        self.last_tick_us = now;
        self.state = ClockState::Running;
    }

    /// Advance the clock by one frame using measured elapsed time.
    /// Returns `None` while stopped or paused.
    pub fn tick(&mut self) -> Option<Tick> {
        if self.state != ClockState::Running {
            return None;
        }
        let now = self.time.now_us();
        let mut delta_us = now - self.last_tick_us;
        self.last_tick_us = now;

        // A long real gap means the host stalled, not that the game
        // world moved that far.
        if delta_us > STALL_THRESHOLD_US {
            delta_us = NOMINAL_FRAME_US;
        }

        self.game_time_ms = (now - self.start_us - self.paused_total_us) / 1000;
        self.update_fps(now);

        Some(Tick {
            game_time_ms: self.game_time_ms,
            delta_seconds: delta_us as f32 / 1_000_000.0,
        })
    }

    /// Tick and hand the frame to a fallible consumer. A failing handler
    /// is reported and the clock keeps delivering ticks.
    pub fn tick_with<F>(&mut self, mut handler: F) -> Option<Tick>
    where
        F: FnMut(Tick) -> Result<()>,
    {
        let tick = self.tick()?;
        if let Err(err) = handler(tick) {
            warn!("tick handler failed: {err:#}");
        }
        Some(tick)
    }

    fn update_fps(&mut self, now_us: i64) {
        self.frame_count += 1;
        let elapsed = now_us - self.fps_window_start_us;
        if elapsed >= FPS_REFRESH_US {
            self.fps = self.frame_count as f32 * 1_000_000.0 / elapsed as f32;
            self.frame_count = 0;
            self.fps_window_start_us = now_us;
        }
    }

    /// Game time of the most recent tick, in milliseconds.
    pub fn game_time_ms(&self) -> i64 {
        self.game_time_ms
    }

    /// Rolling frames-per-second estimate, refreshed about once a second.
    pub fn fps(&self) -> f32 {
        self.fps
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == ClockState::Running
    }

    pub fn is_paused(&self) -> bool {
        self.state == ClockState::Paused
    }
}
