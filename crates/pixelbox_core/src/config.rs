use typed_builder::TypedBuilder;

use crate::error::ConfigError;
use crate::timing::MAX_FPS;

/// Window sides and surface bytes must fit the `i32` sizes SDL works with.
const MAX_EXTENT: u64 = i32::MAX as u64;

/// Construction parameters of an [`crate::Engine`].
///
/// `title` and `scale` only matter to the backend; `width`, `height` and
/// `fps` are fixed for the lifetime of the engine.
#[derive(TypedBuilder, Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    #[builder(setter(into))]
    pub title: String,
    pub width: u32,
    pub height: u32,
    #[builder(default = 1)]
    pub scale: u32,
    #[builder(default = 60)]
    pub fps: u32,
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 {
            return Err(ConfigError::ZeroWidth);
        }
        if self.height == 0 {
            return Err(ConfigError::ZeroHeight);
        }
        if self.scale == 0 {
            return Err(ConfigError::ZeroScale);
        }
        if self.fps == 0 || self.fps > MAX_FPS {
            return Err(ConfigError::InvalidFps(self.fps));
        }

        let (width, height, scale) = (
            u64::from(self.width),
            u64::from(self.height),
            u64::from(self.scale),
        );
        let fits = |n: Option<u64>| n.is_some_and(|n| n <= MAX_EXTENT);
        if !fits(width.checked_mul(scale))
            || !fits(height.checked_mul(scale))
            || !fits(width.checked_mul(height).and_then(|n| n.checked_mul(3)))
        {
            return Err(ConfigError::SurfaceTooLarge {
                width: self.width,
                height: self.height,
                scale: self.scale,
            });
        }
        Ok(())
    }

    /// Window size in screen pixels. Only meaningful for a validated config.
    pub fn window_size(&self) -> (u32, u32) {
        (self.width * self.scale, self.height * self.scale)
    }
}
