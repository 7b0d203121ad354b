//! Top-down rose: a dense spiral bud inside layered five-lobed rings.

use std::f32::consts::{PI, TAU};

use rand::{Rng, RngCore};

use crate::color::gradient;
use crate::field::{glyph_below, unit, FieldInput, PointField};
use crate::palette::Palette;
use crate::point::Point;

const LOBES: u32 = 5;

/// Glyphs are drawn from the first row of the atlas only.
const ROSE_GLYPHS: u16 = 16;

#[derive(Debug, Clone, PartialEq)]
pub struct RoseField {
    pub spiral_points: usize,
    pub rings: usize,
    /// Angular samples per ring before lobe filtering.
    pub ring_samples: usize,
    pub scatter_points: usize,
}

impl RoseField {
    pub const fn classic() -> Self {
        Self { spiral_points: 250, rings: 7, ring_samples: 300, scatter_points: 400 }
    }

    /// Lobe strength at `theta`, `0` between lobes.
    fn lobe_factor(theta: f32) -> f32 {
        (LOBES as f32 * theta).cos().max(0.0).powf(0.6)
    }

    fn ring_angles(&self) -> impl Iterator<Item = (f32, f32)> + '_ {
        (0..self.ring_samples).filter_map(move |i| {
            let theta = i as f32 / self.ring_samples as f32 * TAU;
            let factor = Self::lobe_factor(theta);
            (factor > 0.1).then_some((theta, factor))
        })
    }

    fn spiral(&self, input: &FieldInput, palette: &Palette, rng: &mut dyn RngCore, out: &mut Vec<Point>) {
        let s = input.scale;
        let n = self.spiral_points.max(1) as f32;
        for i in 0..self.spiral_points {
            let t = i as f32 / n;
            let theta = t * PI * 10.0;
            let r = (3.0 + t * 32.0) * s;
            out.push(Point {
                x: input.center_x + r * theta.cos() + (unit(rng) - 0.5) * 4.0 * s,
                y: input.center_y + r * theta.sin() + (unit(rng) - 0.5) * 4.0 * s,
                // The bud sits on top of every ring.
                z: 1.0 + t,
                color: gradient(palette.petals(), 0.1 + t * 0.4),
                size: (2.0 + t * 3.0) * s,
                opacity: 0.75 + t * 0.2,
                glyph: glyph_below(rng, ROSE_GLYPHS),
            });
        }
    }

    fn rings(&self, input: &FieldInput, palette: &Palette, rng: &mut dyn RngCore, out: &mut Vec<Point>) {
        let s = input.scale;
        for layer in 0..self.rings {
            let base = (35.0 + layer as f32 * 20.0) * s;
            let tone = layer as f32 / self.rings as f32;
            for (theta, factor) in self.ring_angles() {
                let r = base * (0.6 + 0.4 * factor);
                let spread = (1.0 - factor) * 8.0 * s;
                out.push(Point {
                    x: input.center_x + r * theta.cos() + (unit(rng) - 0.5) * spread,
                    y: input.center_y + r * theta.sin() + (unit(rng) - 0.5) * spread,
                    // Outer rings are painted first.
                    z: -(layer as f32),
                    color: gradient(palette.petals(), tone + factor * 0.2),
                    size: (2.0 + unit(rng) * 3.0) * s,
                    opacity: 0.55 + factor * 0.4,
                    glyph: glyph_below(rng, ROSE_GLYPHS),
                });
            }
        }
    }

    fn scatter(&self, input: &FieldInput, palette: &Palette, rng: &mut dyn RngCore, out: &mut Vec<Point>) {
        let s = input.scale;
        // Half-width of a lobe where cos(5θ) > 0.2, in units of 5θ.
        let half_lobe = 0.2f32.acos();
        for _ in 0..self.scatter_points {
            let lobe = rng.gen_range(0..LOBES) as f32;
            let theta = (lobe * TAU + (unit(rng) * 2.0 - 1.0) * half_lobe) / LOBES as f32;
            let r = (20.0 + unit(rng) * 100.0) * s;
            out.push(Point {
                x: input.center_x + r * theta.cos() + (unit(rng) - 0.5) * 10.0,
                y: input.center_y + r * theta.sin() + (unit(rng) - 0.5) * 10.0,
                z: -(self.rings as f32),
                color: gradient(palette.petals(), unit(rng)),
                size: (2.0 + unit(rng) * 2.0) * s,
                opacity: 0.4 + unit(rng) * 0.4,
                glyph: glyph_below(rng, ROSE_GLYPHS),
            });
        }
    }
}

impl Default for RoseField {
    fn default() -> Self {
        Self::classic()
    }
}

impl PointField for RoseField {
    fn generate(&self, input: &FieldInput, palette: &Palette, rng: &mut dyn RngCore) -> Vec<Point> {
        let input = input.sanitized();
        let mut out = Vec::with_capacity(self.point_count(palette));
        self.spiral(&input, palette, rng, &mut out);
        self.rings(&input, palette, rng, &mut out);
        self.scatter(&input, palette, rng, &mut out);
        out
    }

    fn point_count(&self, _palette: &Palette) -> usize {
        self.spiral_points + self.rings * self.ring_angles().count() + self.scatter_points
    }
}
