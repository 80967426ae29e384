use std::time::{Duration, Instant};

use crate::error::ConfigError;

/// Highest accepted frame rate. Above it `1000 / fps` rounds to zero.
pub const MAX_FPS: u32 = 1000;

/// Millisecond time source used to pace the frame loop.
pub trait Clock {
    /// Milliseconds since an arbitrary, fixed origin. Must not go backwards.
    fn now_ms(&mut self) -> u64;
    fn sleep_ms(&mut self, ms: u64);
}

/// Wall clock backed by [`Instant`] and [`std::thread::sleep`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clock for SystemClock {
    fn now_ms(&mut self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }

    fn sleep_ms(&mut self, ms: u64) {
        if ms > 0 {
            std::thread::sleep(Duration::from_millis(ms));
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum FrameAction {
    Render,
    /// Run update only; rendering pays back one frame of timing debt.
    Skip,
}

/// Fixed-interval frame pacing with render skipping.
///
/// An overrun of the target interval is converted into skip credits: each
/// whole or partial interval of overrun skips the render step of one later
/// frame. Credits are spent one per frame so the render rate degrades
/// gradually instead of stalling.
#[derive(Debug, Clone)]
pub struct FramePacer {
    interval_ms: u64,
    skips: u32,
}

impl FramePacer {
    pub fn new(fps: u32) -> Result<Self, ConfigError> {
        if fps == 0 || fps > MAX_FPS {
            return Err(ConfigError::InvalidFps(fps));
        }
        Ok(Self {
            interval_ms: u64::from(1000 / fps),
            skips: 0,
        })
    }

    /// Target frame duration, `1000 / fps` with integer division.
    #[inline]
    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    #[inline]
    pub fn pending_skips(&self) -> u32 {
        self.skips
    }

    /// Drops any outstanding skip credits.
    pub fn reset(&mut self) {
        self.skips = 0;
    }

    /// Decides whether the current frame renders, spending one skip credit
    /// if any are outstanding.
    pub fn begin_frame(&mut self) -> FrameAction {
        if self.skips > 0 {
            self.skips -= 1;
            FrameAction::Skip
        } else {
            FrameAction::Render
        }
    }

    /// Records how long a rendered frame took and returns how long to sleep
    /// before the next one.
    pub fn end_frame(&mut self, elapsed_ms: u64) -> u64 {
        let interval = self.interval_ms as i64;
        let mut delay = interval - elapsed_ms as i64;
        while delay < 0 {
            self.skips += 1;
            delay += interval;
        }
        delay as u64
    }
}
