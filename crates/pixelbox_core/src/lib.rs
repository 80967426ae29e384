pub mod backend;
pub mod color;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod input;
pub mod key;
pub mod surface;
pub mod timing;

pub use backend::Backend;
pub use color::Color;
pub use config::EngineConfig;
pub use engine::{Engine, FrameStats};
pub use error::{ConfigError, PixelError};
pub use event::{EventTranslator, KeyMap, RawEvent, Translation};
pub use input::InputState;
pub use key::Key;
pub use surface::PixelSurface;
pub use timing::{Clock, FrameAction, FramePacer, SystemClock, MAX_FPS};
