use crate::backend::Backend;
use crate::color::Color;
use crate::config::EngineConfig;
use crate::error::ConfigError;
use crate::event::{EventTranslator, Translation};
use crate::input::InputState;
use crate::surface::PixelSurface;
use crate::timing::{Clock, FrameAction, FramePacer, SystemClock};

#[cfg(test)]
mod tests;

/// Counters collected over one call to [`Engine::run`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Loop iterations. Update ran exactly once in each.
    pub frames: u64,
    pub rendered: u64,
    pub skipped: u64,
    pub present_failures: u64,
}

/// A fixed-size pixel surface driven by a fixed-rate update/render loop.
pub struct Engine {
    config: EngineConfig,
    surface: PixelSurface,
    input: InputState,
    translator: EventTranslator,
    pacer: FramePacer,
    backend: Box<dyn Backend>,
    clock: Box<dyn Clock>,
    running: bool,
}

impl Engine {
    pub fn new(config: EngineConfig, backend: impl Backend + 'static) -> Result<Self, ConfigError> {
        Self::with_clock(config, backend, SystemClock::new())
    }

    pub fn with_clock(
        config: EngineConfig,
        backend: impl Backend + 'static,
        clock: impl Clock + 'static,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let pacer = FramePacer::new(config.fps)?;
        let translator = EventTranslator::new(backend.key_map());
        Ok(Self {
            surface: PixelSurface::new(config.width, config.height),
            input: InputState::new(),
            translator,
            pacer,
            backend: Box::new(backend),
            clock: Box::new(clock),
            running: false,
            config,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn title(&self) -> &str {
        &self.config.title
    }

    pub fn width(&self) -> u32 {
        self.config.width
    }

    pub fn height(&self) -> u32 {
        self.config.height
    }

    pub fn scale(&self) -> u32 {
        self.config.scale
    }

    pub fn fps(&self) -> u32 {
        self.config.fps
    }

    pub fn interval_ms(&self) -> u64 {
        self.pacer.interval_ms()
    }

    pub fn surface(&self) -> &PixelSurface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut PixelSurface {
        &mut self.surface
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Writes one pixel, dropping writes that fall outside the surface.
    pub fn draw(&mut self, x: i32, y: i32, color: Color) {
        if let Err(err) = self.surface.set_pixel(x, y, color) {
            log::trace!("discarding draw: {}", err);
        }
    }

    /// Stops the loop once the current frame is done.
    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Runs the frame loop until a quit event arrives or a callback calls
    /// [`Engine::quit`].
    ///
    /// `update` runs every frame. `render` and presentation are skipped for
    /// as many frames as needed to pay back any time a frame ran over the
    /// target interval.
    pub fn run<U, R>(&mut self, mut update: U, mut render: R) -> FrameStats
    where
        U: FnMut(&mut Engine),
        R: FnMut(&mut Engine),
    {
        let interval = self.pacer.interval_ms();
        let mut stats = FrameStats::default();
        // Skip debt belongs to a single run.
        self.pacer.reset();
        self.running = true;
        log::info!(
            "{}: running {}x{} at {} fps ({} ms/frame)",
            self.config.title,
            self.config.width,
            self.config.height,
            self.config.fps,
            interval
        );

        while self.running {
            let before = self.clock.now_ms();
            self.poll_events();

            update(self);
            stats.frames += 1;

            if self.pacer.begin_frame() == FrameAction::Skip {
                stats.skipped += 1;
                log::debug!("frame skip ({} pending)", self.pacer.pending_skips());
                if self.running {
                    self.clock.sleep_ms(interval);
                }
                continue;
            }

            render(self);
            stats.rendered += 1;
            if let Err(err) = self.backend.present(&self.surface) {
                stats.present_failures += 1;
                log::warn!("failed to present frame {}: {:#}", stats.frames, err);
            }

            let after = self.clock.now_ms();
            let delay = self.pacer.end_frame(after.saturating_sub(before));
            if self.running {
                self.clock.sleep_ms(delay);
            }
        }

        log::info!(
            "{}: stopped after {} frames ({} rendered, {} skipped)",
            self.config.title,
            stats.frames,
            stats.rendered,
            stats.skipped
        );
        stats
    }

    fn poll_events(&mut self) {
        while let Some(event) = self.backend.poll_event() {
            match self.translator.translate(event, &mut self.input) {
                Translation::Quit => {
                    log::debug!("quit requested");
                    self.running = false;
                }
                Translation::Changed { key, pressed } => {
                    log::trace!("{} {}", key, if pressed { "down" } else { "up" });
                }
                Translation::Unchanged(_) | Translation::Ignored => {}
            }
        }
    }
}
