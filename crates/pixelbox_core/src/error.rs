use thiserror::Error;

/// Rejected [`crate::EngineConfig`] values. Raised before any backend exists.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("surface width must be at least 1 pixel")]
    ZeroWidth,
    #[error("surface height must be at least 1 pixel")]
    ZeroHeight,
    #[error("display scale must be at least 1")]
    ZeroScale,
    #[error("target fps must be within 1..=1000, got {0}")]
    InvalidFps(u32),
    #[error("{width}x{height} surface at scale {scale} is too large")]
    SurfaceTooLarge { width: u32, height: u32, scale: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PixelError {
    #[error("pixel ({x}, {y}) is outside the {width}x{height} surface")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
    },
}
