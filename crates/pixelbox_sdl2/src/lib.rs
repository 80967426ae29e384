use anyhow::{anyhow, Result};
use lazy_static::lazy_static;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;
use sdl2::rect::Rect;
use sdl2::render::{TextureCreator, WindowCanvas};
use sdl2::video::WindowContext;

use pixelbox_core::{Backend, EngineConfig, Key, KeyMap, PixelSurface, RawEvent};
pub use sdl2;

lazy_static! {
    /// SDL keycodes for every [`Key`]. Keypad digits alias the number row.
    static ref KEY_TABLE: Vec<(i32, Key)> = {
        let table = [
            (Keycode::A, Key::A),
            (Keycode::B, Key::B),
            (Keycode::C, Key::C),
            (Keycode::D, Key::D),
            (Keycode::E, Key::E),
            (Keycode::F, Key::F),
            (Keycode::G, Key::G),
            (Keycode::H, Key::H),
            (Keycode::I, Key::I),
            (Keycode::J, Key::J),
            (Keycode::K, Key::K),
            (Keycode::L, Key::L),
            (Keycode::M, Key::M),
            (Keycode::N, Key::N),
            (Keycode::O, Key::O),
            (Keycode::P, Key::P),
            (Keycode::Q, Key::Q),
            (Keycode::R, Key::R),
            (Keycode::S, Key::S),
            (Keycode::T, Key::T),
            (Keycode::U, Key::U),
            (Keycode::V, Key::V),
            (Keycode::W, Key::W),
            (Keycode::X, Key::X),
            (Keycode::Y, Key::Y),
            (Keycode::Z, Key::Z),
            (Keycode::Num0, Key::Num0),
            (Keycode::Num1, Key::Num1),
            (Keycode::Num2, Key::Num2),
            (Keycode::Num3, Key::Num3),
            (Keycode::Num4, Key::Num4),
            (Keycode::Num5, Key::Num5),
            (Keycode::Num6, Key::Num6),
            (Keycode::Num7, Key::Num7),
            (Keycode::Num8, Key::Num8),
            (Keycode::Num9, Key::Num9),
            (Keycode::Kp0, Key::Num0),
            (Keycode::Kp1, Key::Num1),
            (Keycode::Kp2, Key::Num2),
            (Keycode::Kp3, Key::Num3),
            (Keycode::Kp4, Key::Num4),
            (Keycode::Kp5, Key::Num5),
            (Keycode::Kp6, Key::Num6),
            (Keycode::Kp7, Key::Num7),
            (Keycode::Kp8, Key::Num8),
            (Keycode::Kp9, Key::Num9),
            (Keycode::Space, Key::Space),
            (Keycode::Comma, Key::Comma),
            (Keycode::Period, Key::Period),
            (Keycode::Slash, Key::Slash),
            (Keycode::Semicolon, Key::Semicolon),
            (Keycode::Quote, Key::Quote),
            (Keycode::LeftBracket, Key::LeftBracket),
            (Keycode::RightBracket, Key::RightBracket),
            (Keycode::Backslash, Key::Backslash),
            (Keycode::Minus, Key::Minus),
            (Keycode::Equals, Key::Equals),
            (Keycode::Backquote, Key::Backquote),
            (Keycode::LShift, Key::LeftShift),
            (Keycode::RShift, Key::RightShift),
            (Keycode::LCtrl, Key::LeftCtrl),
            (Keycode::RCtrl, Key::RightCtrl),
            (Keycode::LAlt, Key::LeftAlt),
            (Keycode::RAlt, Key::RightAlt),
            (Keycode::Up, Key::Up),
            (Keycode::Down, Key::Down),
            (Keycode::Left, Key::Left),
            (Keycode::Right, Key::Right),
            (Keycode::Return, Key::Return),
            (Keycode::Escape, Key::Escape),
            (Keycode::Backspace, Key::Backspace),
            (Keycode::Tab, Key::Tab),
            (Keycode::Delete, Key::Delete),
            (Keycode::Insert, Key::Insert),
            (Keycode::Home, Key::Home),
            (Keycode::End, Key::End),
            (Keycode::PageUp, Key::PageUp),
            (Keycode::PageDown, Key::PageDown),
        ];
        table
            .into_iter()
            .map(|(keycode, key)| (keycode as i32, key))
            .collect()
    };
}

/// Default key table for SDL keyboard events.
pub fn key_map() -> KeyMap {
    KeyMap::from_table(&KEY_TABLE)
}

/// Reduces an SDL event to the ones the engine handles.
pub fn map_event(event: Event) -> Option<RawEvent> {
    match event {
        Event::Quit { .. } => Some(RawEvent::Quit),
        Event::KeyDown {
            keycode: Some(keycode),
            repeat,
            ..
        } => Some(RawEvent::KeyDown {
            code: keycode as i32,
            repeat,
        }),
        Event::KeyUp {
            keycode: Some(keycode),
            repeat,
            ..
        } => Some(RawEvent::KeyUp {
            code: keycode as i32,
            repeat,
        }),
        _ => None,
    }
}

/// SDL2 window, renderer and event pump for one engine.
///
/// Every presented frame goes through a fresh streaming RGB24 texture the
/// size of the surface; the canvas render scale does the magnification.
pub struct SdlBackend {
    texture_creator: TextureCreator<WindowContext>,
    canvas: WindowCanvas,
    event_pump: sdl2::EventPump,
    _sdl_context: sdl2::Sdl,
}

impl SdlBackend {
    pub fn new(config: &EngineConfig) -> Result<Self> {
        config.validate()?;
        let sdl_context = sdl2::init().map_err(|e| anyhow!(e))?;
        let video_subsystem = sdl_context.video().map_err(|e| anyhow!(e))?;

        let (window_width, window_height) = config.window_size();
        let window = video_subsystem
            .window(&config.title, window_width, window_height)
            .position_centered()
            .build()?;
        let mut canvas = window.into_canvas().accelerated().build()?;
        canvas
            .set_scale(config.scale as f32, config.scale as f32)
            .map_err(|e| anyhow!(e))?;
        let texture_creator = canvas.texture_creator();
        let event_pump = sdl_context.event_pump().map_err(|e| anyhow!(e))?;

        log::info!(
            "SDL window '{}' created ({}x{}, scale {})",
            config.title,
            window_width,
            window_height,
            config.scale
        );

        Ok(Self {
            texture_creator,
            canvas,
            event_pump,
            _sdl_context: sdl_context,
        })
    }
}

impl Backend for SdlBackend {
    fn poll_event(&mut self) -> Option<RawEvent> {
        while let Some(event) = self.event_pump.poll_event() {
            if let Some(raw) = map_event(event) {
                return Some(raw);
            }
        }
        None
    }

    fn key_map(&self) -> KeyMap {
        key_map()
    }

    fn present(&mut self, surface: &PixelSurface) -> Result<()> {
        let (width, height) = (surface.width(), surface.height());
        let mut texture = self
            .texture_creator
            .create_texture_streaming(PixelFormatEnum::RGB24, width, height)?;
        texture.update(None, surface.as_bytes(), surface.pitch())?;

        self.canvas.set_draw_color(sdl2::pixels::Color::RGB(0, 0, 0));
        self.canvas.clear();
        let rect = Rect::new(0, 0, width, height);
        self.canvas
            .copy(&texture, rect, rect)
            .map_err(|e| anyhow!(e))?;
        self.canvas.present();
        Ok(())
    }
}

impl Drop for SdlBackend {
    fn drop(&mut self) {
        log::info!("closing SDL window");
    }
}
