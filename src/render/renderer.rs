use crate::{config::SimulationConfig, world::ParticleWorld};

use super::{
    color::SpeedPalette,
    surface::{Rgba, Surface},
};

/// Draws the world as speed-coloured discs over a fading trail.
#[derive(Debug, Clone)]
pub struct Renderer {
    pub trail_alpha: f32,
    pub palette: SpeedPalette,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::from_config(&SimulationConfig::default())
    }
}

impl Renderer {
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self {
            trail_alpha: config.trail_alpha,
            palette: SpeedPalette::new(config.hue, config.lightness_base, config.lightness_gain),
        }
    }

    /// Darkens the previous frame instead of clearing it, leaving motion streaks.
    pub fn fade<S: Surface + ?Sized>(&self, surface: &mut S) {
        let (width, height) = surface.size();
        surface.fill_rect(
            0.0,
            0.0,
            width as f64,
            height as f64,
            Rgba::BLACK.with_alpha(self.trail_alpha),
        );
    }

    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S, world: &ParticleWorld) {
        self.fade(surface);

        let radius = world.radius();
        for (index, particle) in world.particles().iter().enumerate() {
            let color = self.palette.color(world.observed_speed(index));
            surface.fill_circle(particle.position, radius, color);
        }
    }
}
