use std::cell::RefCell;

use pixelbox_core::{Color, Engine, FrameStats, InputState, Key};

const PALETTE: [Color; 6] = [
    Color::WHITE,
    Color::RED,
    Color::GREEN,
    Color::BLUE,
    Color::YELLOW,
    Color::MAGENTA,
];

/// Arrow keys move a brush around the surface. The surface is never cleared,
/// so the brush leaves a trail. Space cycles the palette, Escape quits.
pub fn run(engine: &mut Engine) -> FrameStats {
    let brush = RefCell::new(Brush::new(engine.width(), engine.height()));
    engine.run(
        |e| {
            if e.input().is_pressed(Key::Escape) {
                e.quit();
            }
            brush.borrow_mut().step(e.input(), e.width(), e.height());
        },
        |e| {
            let brush = brush.borrow();
            e.draw(brush.x, brush.y, brush.color());
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Brush {
    pub x: i32,
    pub y: i32,
    palette_index: usize,
    space_held: bool,
}

impl Brush {
    /// A white brush centred on the surface.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            x: width as i32 / 2,
            y: height as i32 / 2,
            palette_index: 0,
            space_held: false,
        }
    }

    pub fn color(&self) -> Color {
        PALETTE[self.palette_index]
    }

    /// Moves one pixel per held arrow, wrapping at the edges, and advances
    /// the palette once per Space press.
    pub fn step(&mut self, input: &InputState, width: u32, height: u32) {
        let (width, height) = (width as i32, height as i32);
        if input.is_pressed(Key::Left) {
            self.x -= 1;
        }
        if input.is_pressed(Key::Right) {
            self.x += 1;
        }
        if input.is_pressed(Key::Up) {
            self.y -= 1;
        }
        if input.is_pressed(Key::Down) {
            self.y += 1;
        }
        self.x = self.x.rem_euclid(width);
        self.y = self.y.rem_euclid(height);

        let space = input.is_pressed(Key::Space);
        if space && !self.space_held {
            self.palette_index = (self.palette_index + 1) % PALETTE.len();
        }
        self.space_held = space;
    }
}
