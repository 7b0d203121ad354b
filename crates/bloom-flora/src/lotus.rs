//! Lotus on still water: a glowing heart, four rings of lifted petals, their
//! reflections and a tilted pond disk.

use std::f32::consts::{PI, TAU};

use rand::RngCore;

use crate::color::{gradient, Rgb};
use crate::field::{glyph_below, unit, FieldInput, PointField};
use crate::palette::{Palette, Role};
use crate::point::{Point, REFLECTION_GLYPH};

/// Forward pitch (radians) applied to petals and the pond plane.
const PITCH: f32 = 0.6;

const POND_COLOR: Rgb = [0.2, 0.4, 0.6];

/// One ring of petals.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PetalLayer {
    pub count: usize,
    /// Distance from the heart where petals start (reference px).
    pub base_distance: f32,
    pub length: f32,
    pub width: f32,
    /// Lift angle of the petal in radians.
    pub tilt: f32,
    /// Extra lift concentrated near the tip.
    pub curl: f32,
    /// Gradient position of the petal base.
    pub color_bias: f32,
}

impl PetalLayer {
    const fn new(
        count: usize,
        base_distance: f32,
        length: f32,
        width: f32,
        tilt: f32,
        curl: f32,
        color_bias: f32,
    ) -> Self {
        Self { count, base_distance, length, width, tilt, curl, color_bias }
    }
}

const CLASSIC_LAYERS: [PetalLayer; 4] = [
    PetalLayer::new(6, 10.0, 50.0, 25.0, 1.2, 5.0, 0.1),
    PetalLayer::new(8, 20.0, 70.0, 35.0, 0.9, 10.0, 0.3),
    PetalLayer::new(12, 30.0, 90.0, 45.0, 0.6, 15.0, 0.5),
    PetalLayer::new(16, 40.0, 110.0, 55.0, 0.3, 10.0, 0.7),
];

/// Lotus generator. Also the geometry for flowers without a dedicated one.
#[derive(Debug, Clone, PartialEq)]
pub struct LotusField {
    pub layers: &'static [PetalLayer],
    pub center_points: usize,
    pub samples_per_petal: usize,
    /// Share of petal samples mirrored below the water line.
    pub reflection_fraction: f32,
    /// Only emitted for palettes with a `stem` role.
    pub stem_points: usize,
    pub pond_points: usize,
}

impl LotusField {
    pub const fn classic() -> Self {
        Self {
            layers: &CLASSIC_LAYERS,
            center_points: 200,
            samples_per_petal: 120,
            reflection_fraction: 0.4,
            stem_points: 160,
            pond_points: 600,
        }
    }

    fn reflections_per_petal(&self) -> usize {
        let f = if self.reflection_fraction.is_finite() {
            self.reflection_fraction.clamp(0.0, 1.0)
        } else {
            0.0
        };
        ((self.samples_per_petal as f32 * f).floor() as usize).min(self.samples_per_petal)
    }

    fn petal_count(&self) -> usize {
        self.layers.iter().map(|l| l.count).sum()
    }

    fn heart(&self, input: &FieldInput, center: &[Rgb], rng: &mut dyn RngCore, out: &mut Vec<Point>) {
        let s = input.scale;
        for _ in 0..self.center_points {
            let theta = unit(rng) * TAU;
            let r = unit(rng).powf(1.5) * 20.0 * s;
            let dy = (unit(rng) - 0.5) * 10.0 * s;
            out.push(Point {
                x: input.center_x + r * theta.cos(),
                y: input.center_y + dy,
                z: r * theta.sin() * 0.5,
                color: gradient(center, unit(rng)),
                size: (3.0 + unit(rng) * 3.0) * s,
                opacity: 0.8 + unit(rng) * 0.2,
                glyph: glyph_below(rng, 23),
            });
        }
    }

    fn petal(
        &self,
        input: &FieldInput,
        layer: &PetalLayer,
        angle: f32,
        petals: &[Rgb],
        rng: &mut dyn RngCore,
        out: &mut Vec<Point>,
    ) {
        let s = input.scale;
        let (cx, cy) = (input.center_x, input.center_y);
        let (sin_a, cos_a) = angle.sin_cos();
        let (sin_p, cos_p) = PITCH.sin_cos();
        let water = cy + 70.0 * s;

        let n = self.samples_per_petal;
        let reflections = self.reflections_per_petal();

        for i in 0..n {
            let u = unit(rng);
            let v = (unit(rng) - 0.5) * 2.0;

            // Pointed at both ends, widest a little past the middle.
            let profile = (u * PI).sin() * u.sqrt();
            let half_width = layer.width * profile * s * 0.8 * 0.5;

            let r = layer.base_distance * s + u * layer.length * s;
            let lift = u * layer.length * s * layer.tilt.sin() + u * u * layer.curl * s;
            let side = v * half_width;

            let px = r * cos_a - side * sin_a;
            let pz = r * sin_a + side * cos_a;
            let rot_y = lift * cos_p - pz * sin_p;
            let rot_z = lift * sin_p + pz * cos_p;

            let x = cx + px;
            let y = cy - rot_y;
            let color = gradient(petals, layer.color_bias + u * 0.3);

            out.push(Point {
                x: x + (unit(rng) - 0.5) * 2.0,
                y: y + (unit(rng) - 0.5) * 2.0,
                z: rot_z,
                color,
                size: (4.0 + unit(rng) * 4.0) * s,
                opacity: 0.85 + unit(rng) * 0.15,
                glyph: glyph_below(rng, 200),
            });

            // Evenly strided so the reflection count never depends on the rng.
            if (i + 1) * reflections / n != i * reflections / n {
                let ripple = (x * 0.05 + rot_z * 0.05).sin() * 5.0 * s;
                out.push(Point {
                    x: x + ripple,
                    y: water + (water - y) * 0.9,
                    z: rot_z,
                    color,
                    size: (3.0 + unit(rng) * 4.0) * s,
                    opacity: 0.1 * (1.0 - u) + 0.05,
                    glyph: REFLECTION_GLYPH,
                });
            }
        }
    }

    fn stem(&self, input: &FieldInput, stem: &[Rgb], rng: &mut dyn RngCore, out: &mut Vec<Point>) {
        let s = input.scale;
        for _ in 0..self.stem_points {
            let t = unit(rng);
            out.push(Point {
                x: input.center_x + (unit(rng) - 0.5) * 4.0 * s,
                y: input.center_y + t * 70.0 * s,
                z: -1.0 - t,
                color: gradient(stem, unit(rng)),
                size: (2.0 + unit(rng) * 2.0) * s,
                opacity: 0.6 + unit(rng) * 0.3,
                glyph: glyph_below(rng, 23),
            });
        }
    }

    fn pond(&self, input: &FieldInput, rng: &mut dyn RngCore, out: &mut Vec<Point>) {
        let s = input.scale;
        let radius = 250.0 * s;
        let stretch = (input.width * 0.5 / radius).max(1.0);
        let water = input.center_y + 60.0 * s;
        let (sin_p, cos_p) = PITCH.sin_cos();

        for _ in 0..self.pond_points {
            let angle = unit(rng) * TAU;
            let r = unit(rng).sqrt() * radius;
            let px = r * angle.cos() * stretch;
            let pz = r * angle.sin();

            // Flat plane (height 0) pitched about the X axis.
            let rot_y = -pz * sin_p;
            let rot_z = pz * cos_p;

            out.push(Point {
                x: input.center_x + px,
                y: water - rot_y,
                z: rot_z,
                color: POND_COLOR,
                size: (4.0 + unit(rng) * 6.0) * s,
                opacity: 0.1 + unit(rng) * 0.1,
                glyph: REFLECTION_GLYPH,
            });
        }
    }
}

impl Default for LotusField {
    fn default() -> Self {
        Self::classic()
    }
}

impl PointField for LotusField {
    fn generate(&self, input: &FieldInput, palette: &Palette, rng: &mut dyn RngCore) -> Vec<Point> {
        let input = input.sanitized();
        let mut out = Vec::with_capacity(self.point_count(palette));

        self.heart(&input, palette.center(), rng, &mut out);

        for (idx, layer) in self.layers.iter().enumerate() {
            if layer.count == 0 {
                continue;
            }
            let step = TAU / layer.count as f32;
            // Odd rings sit half a step over so petals interleave.
            let offset = (idx % 2) as f32 * (PI / layer.count as f32);
            for i in 0..layer.count {
                let angle = i as f32 * step + offset;
                self.petal(&input, layer, angle, palette.petals(), rng, &mut out);
            }
        }

        if let Some(stem) = palette.stops(Role::Stem) {
            self.stem(&input, stem, rng, &mut out);
        }

        self.pond(&input, rng, &mut out);
        out
    }

    fn point_count(&self, palette: &Palette) -> usize {
        let stem = if palette.stops(Role::Stem).is_some() { self.stem_points } else { 0 };
        self.center_points
            + self.petal_count() * (self.samples_per_petal + self.reflections_per_petal())
            + stem
            + self.pond_points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::PaletteTable;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn lotus_palette() -> Palette {
        PaletteTable::builtin().get("lotus").cloned().unwrap()
    }

    #[test]
    fn classic_point_count() {
        let field = LotusField::classic();
        // 200 heart + 42 petals * (120 samples + 48 reflections) + 600 pond
        assert_eq!(field.point_count(&lotus_palette()), 200 + 42 * 168 + 600);
    }

    #[test]
    fn stem_only_with_stem_role() {
        let field = LotusField::classic();
        let lavender = PaletteTable::builtin().get("lavender").cloned().unwrap();
        assert_eq!(
            field.point_count(&lavender),
            field.point_count(&lotus_palette()) + field.stem_points
        );
    }

    #[test]
    fn reflections_use_ripple_glyph_below_water() {
        let field = LotusField::classic();
        let input = FieldInput::for_surface(450.0, 450.0);
        let points = field.generate(&input, &lotus_palette(), &mut StdRng::seed_from_u64(3));

        // Petal glyphs are drawn from [0, 200) and may land on the ripple slot too.
        let dim_ripples = points
            .iter()
            .filter(|p| p.glyph == REFLECTION_GLYPH && p.opacity <= 0.2 + 1e-6)
            .count();
        assert_eq!(dim_ripples, 42 * 48 + 600);
    }

    #[test]
    fn heart_stays_near_center() {
        let field = LotusField { layers: &[], pond_points: 0, ..LotusField::classic() };
        let input = FieldInput::for_surface(450.0, 450.0);
        let points = field.generate(&input, &lotus_palette(), &mut StdRng::seed_from_u64(11));

        assert_eq!(points.len(), 200);
        for p in &points {
            assert!((p.x - 225.0).abs() <= 20.0 + 1e-3);
            assert!((p.y - 225.0).abs() <= 5.0 + 1e-3);
            assert!(p.glyph < 23);
        }
    }

    #[test]
    fn reflections_per_petal_round_down() {
        // 120 * 0.33 = 39.6
        let field = LotusField { reflection_fraction: 0.33, ..LotusField::classic() };
        assert_eq!(field.reflections_per_petal(), 39);
        assert_eq!(LotusField::classic().reflections_per_petal(), 48);
    }

    #[test]
    fn reflection_fraction_is_clamped() {
        let field = LotusField { reflection_fraction: 3.0, ..LotusField::classic() };
        assert_eq!(field.reflections_per_petal(), 120);
        let field = LotusField { reflection_fraction: f32::NAN, ..LotusField::classic() };
        assert_eq!(field.reflections_per_petal(), 0);
    }

    #[test]
    fn non_positive_scale_still_has_positive_sizes() {
        let field = LotusField::classic();
        let input = FieldInput { center_x: 10.0, center_y: 10.0, scale: -1.0, width: 0.0, height: 0.0 };
        let points = field.generate(&input, &lotus_palette(), &mut StdRng::seed_from_u64(5));
        assert_eq!(points.len(), field.point_count(&lotus_palette()));
        assert!(points.iter().all(|p| p.size > 0.0));
    }
}
