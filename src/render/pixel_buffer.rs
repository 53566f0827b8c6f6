use glam::DVec2;

use super::surface::{Rgba, Surface};

/// In-memory RGBA8 framebuffer implementing [`Surface`] in software.
///
/// Pixel `(x, y)` covers `[x, x + 1) × [y, y + 1)`; shapes cover the pixels whose
/// centres they contain.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 4]>,
}

impl PixelBuffer {
    /// Creates an opaque black buffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0, 0, 0, 255]; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(self.offset(x, y)).copied()
    }

    /// Raw row-major RGBA bytes, e.g. for uploading to a texture.
    pub fn as_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flatten().copied().collect()
    }

    pub fn fill(&mut self, color: Rgba) {
        let rgba = color.to_rgba8();
        self.pixels.iter_mut().for_each(|pixel| *pixel = rgba);
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    fn blend(&mut self, x: u32, y: u32, color: Rgba) {
        let offset = self.offset(x, y);
        let dst = Rgba::from_rgba8(self.pixels[offset]);
        let a = color.a.clamp(0.0, 1.0);
        let out_a = a + dst.a * (1.0 - a);
        let mix = |src: f32, dst: f32| src * a + dst * (1.0 - a);
        self.pixels[offset] = Rgba::new(
            mix(color.r, dst.r),
            mix(color.g, dst.g),
            mix(color.b, dst.b),
            out_a,
        )
        .to_rgba8();
    }

    /// Pixel index range whose centres fall in `[start, end)`.
    fn span(start: f64, end: f64, limit: u32) -> (u32, u32) {
        let lo = (start - 0.5).ceil().max(0.0);
        let hi = (end - 0.5).ceil().min(limit as f64);
        if hi <= lo {
            return (0, 0);
        }
        (lo as u32, hi as u32)
    }
}

impl Surface for PixelBuffer {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Resizing discards the contents, like a canvas.
    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels = vec![[0, 0, 0, 0]; width as usize * height as usize];
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgba) {
        let (x0, x1) = Self::span(x, x + width, self.width);
        let (y0, y1) = Self::span(y, y + height, self.height);
        for py in y0..y1 {
            for px in x0..x1 {
                self.blend(px, py, color);
            }
        }
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba) {
        if radius.is_nan() || radius <= 0.0 || !center.is_finite() {
            return;
        }
        let (x0, x1) = Self::span(center.x - radius, center.x + radius, self.width);
        let (y0, y1) = Self::span(center.y - radius, center.y + radius, self.height);
        let radius_sq = radius * radius;
        for py in y0..y1 {
            let dy = py as f64 + 0.5 - center.y;
            for px in x0..x1 {
                let dx = px as f64 + 0.5 - center.x;
                if dx * dx + dy * dy <= radius_sq {
                    self.blend(px, py, color);
                }
            }
        }
    }
}
