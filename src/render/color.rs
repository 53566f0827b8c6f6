use super::surface::Rgba;

/// Hue in degrees, saturation and lightness in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub hue: f64,
    pub saturation: f64,
    pub lightness: f64,
}

impl Hsl {
    pub fn new(hue: f64, saturation: f64, lightness: f64) -> Self {
        Self {
            hue,
            saturation,
            lightness,
        }
    }

    /// Converts to an opaque colour. Saturation and lightness clamp to `[0, 100]`.
    pub fn to_rgba(self) -> Rgba {
        let h = self.hue.rem_euclid(360.0) / 360.0;
        let s = (self.saturation / 100.0).clamp(0.0, 1.0);
        let l = (self.lightness / 100.0).clamp(0.0, 1.0);

        if s == 0.0 {
            let v = l as f32;
            return Rgba::new(v, v, v, 1.0);
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;

        Rgba::new(
            hue_to_channel(p, q, h + 1.0 / 3.0) as f32,
            hue_to_channel(p, q, h) as f32,
            hue_to_channel(p, q, h - 1.0 / 3.0) as f32,
            1.0,
        )
    }
}

fn hue_to_channel(p: f64, q: f64, t: f64) -> f64 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

/// Maps a particle speed to its display colour: brighter when faster.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedPalette {
    pub hue: f64,
    pub lightness_base: f64,
    pub lightness_gain: f64,
}

impl SpeedPalette {
    pub fn new(hue: f64, lightness_base: f64, lightness_gain: f64) -> Self {
        Self {
            hue,
            lightness_base,
            lightness_gain,
        }
    }

    pub fn hsl(&self, speed: f64) -> Hsl {
        Hsl::new(
            self.hue,
            100.0,
            self.lightness_base + speed * self.lightness_gain,
        )
    }

    pub fn color(&self, speed: f64) -> Rgba {
        self.hsl(speed).to_rgba()
    }
}
