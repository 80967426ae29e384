use crate::color::Color;
use crate::error::PixelError;

const BYTES_PER_PIXEL: usize = 3;

/// Fixed-size RGB24 pixel grid written by render callbacks.
///
/// The surface is never cleared by the engine: pixels keep their last
/// written color until overwritten, so trails and accumulation effects
/// fall out naturally. Writes outside the grid are rejected with
/// [`PixelError::OutOfBounds`] and leave the surface untouched.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct PixelSurface {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelSurface {
    /// Creates an all-black surface.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0u8; width as usize * height as usize * BYTES_PER_PIXEL],
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes per row, as expected by texture uploads.
    #[inline]
    pub fn pitch(&self) -> usize {
        self.width as usize * BYTES_PER_PIXEL
    }

    /// Row-major RGB24 bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) -> Result<(), PixelError> {
        let index = self.offset(x, y).ok_or(PixelError::OutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        })?;
        self.data[index..index + BYTES_PER_PIXEL].copy_from_slice(&color.to_rgb24());
        Ok(())
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        let index = self.offset(x, y)?;
        let px = &self.data[index..index + BYTES_PER_PIXEL];
        Some(Color::new(px[0], px[1], px[2]))
    }

    fn offset(&self, x: i32, y: i32) -> Option<usize> {
        if !self.contains(x, y) {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL)
    }
}
