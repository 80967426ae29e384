use pixelbox_core::{Color, Engine, FrameStats, Key, PixelSurface};
use rand::Rng;

/// Scatters `width * height` random pixels per frame. Escape quits.
pub fn run(engine: &mut Engine) -> FrameStats {
    engine.run(update, render)
}

fn update(engine: &mut Engine) {
    if engine.input().is_pressed(Key::Escape) {
        engine.quit();
    }
}

fn render(engine: &mut Engine) {
    scatter(engine.surface_mut(), &mut rand::thread_rng());
}

/// Writes `width * height` random pixels and returns how many landed.
fn scatter(surface: &mut PixelSurface, rng: &mut impl Rng) -> usize {
    let (width, height) = (surface.width(), surface.height());
    let count = width as usize * height as usize;
    let mut written = 0;
    for _ in 0..count {
        // Validated configs keep both sides within i32.
        let x = rng.gen_range(0..width) as i32;
        let y = rng.gen_range(0..height) as i32;
        let color = Color::new(rng.gen(), rng.gen(), rng.gen());
        match surface.set_pixel(x, y, color) {
            Ok(()) => written += 1,
            Err(err) => log::trace!("discarding noise pixel: {}", err),
        }
    }
    written
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn scatter_writes_one_pixel_per_cell_in_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut surface = PixelSurface::new(30, 20);
        assert_eq!(scatter(&mut surface, &mut rng), 600);
        assert!(surface.as_bytes().iter().any(|b| *b != 0));
    }

    #[test]
    fn scatter_handles_wide_surfaces() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut surface = PixelSurface::new(70_000, 1);
        assert_eq!(scatter(&mut surface, &mut rng), 70_000);
    }
}
