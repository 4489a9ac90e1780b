mod frame_clock;
mod time;

pub use frame_clock::{ClockState, FrameClock, Tick};
pub use time::{MockTimeProvider, SystemTimeProvider, TimeProvider};
