//! Rendering: the host surface abstraction, colours, and a software framebuffer.

pub mod color;
pub mod pixel_buffer;
pub mod renderer;
pub mod surface;

pub use color::{Hsl, SpeedPalette};
pub use pixel_buffer::PixelBuffer;
pub use renderer::Renderer;
pub use surface::{Rgba, Surface};
