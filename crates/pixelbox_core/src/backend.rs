use anyhow::Result;

use crate::event::{KeyMap, RawEvent};
use crate::surface::PixelSurface;

/// The window/renderer side of the engine.
///
/// A backend owns the platform window and event queue. Creating one is
/// fallible and happens before the engine exists; dropping it tears the
/// window down.
pub trait Backend {
    /// Next pending event, or `None` once the queue is drained. Never blocks.
    fn poll_event(&mut self) -> Option<RawEvent>;

    /// Native key code table used to translate this backend's key events.
    fn key_map(&self) -> KeyMap;

    /// Uploads the surface to a displayable frame and shows it.
    ///
    /// A failure only affects the current frame.
    fn present(&mut self, surface: &PixelSurface) -> Result<()>;
}
