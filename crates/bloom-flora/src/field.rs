//! Generator capability, generation input and the flower registry.

use rand::{Rng, RngCore};

use crate::lotus::LotusField;
use crate::palette::{Catalog, Palette};
use crate::point::{depth_sort, Point};
use crate::rose::RoseField;

/// Lower bound applied to `scale` so degenerate input still yields
/// positive sprite sizes.
pub const MIN_SCALE: f32 = 1.0e-3;

/// Inputs of one generation.
///
/// `scale` keeps the composition resolution independent; see
/// [`FieldInput::for_surface`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FieldInput {
    pub center_x: f32,
    pub center_y: f32,
    pub scale: f32,
    pub width: f32,
    pub height: f32,
}

impl FieldInput {
    /// Side length (px) at which a composition renders at `scale = 1`.
    pub const REFERENCE_SIZE: f32 = 450.0;

    /// Centered composition for a surface of the given size.
    pub fn for_surface(width: f32, height: f32) -> Self {
        let width = finite_non_negative(width);
        let height = finite_non_negative(height);
        Self {
            center_x: width * 0.5,
            center_y: height * 0.5,
            scale: width.min(height) / Self::REFERENCE_SIZE,
            width,
            height,
        }
    }

    /// Copy with non-finite or negative fields replaced and `scale` clamped
    /// to [`MIN_SCALE`].
    pub fn sanitized(&self) -> Self {
        let scale = if self.scale.is_finite() { self.scale.max(MIN_SCALE) } else { MIN_SCALE };
        Self {
            center_x: finite_or_zero(self.center_x),
            center_y: finite_or_zero(self.center_y),
            scale,
            width: finite_non_negative(self.width),
            height: finite_non_negative(self.height),
        }
    }
}

fn finite_or_zero(v: f32) -> f32 {
    if v.is_finite() { v } else { 0.0 }
}

fn finite_non_negative(v: f32) -> f32 {
    finite_or_zero(v).max(0.0)
}

/// Uniform sample in `[0, 1)`.
#[inline]
pub(crate) fn unit(rng: &mut dyn RngCore) -> f32 {
    rng.gen_range(0.0..1.0)
}

/// Uniform glyph index in `[0, upper)`.
#[inline]
pub(crate) fn glyph_below(rng: &mut dyn RngCore, upper: u16) -> u16 {
    rng.gen_range(0..upper.max(1))
}

// ── generator capability ─────────────────────────────────────────────────

/// A procedural flower.
///
/// Implementations must be pure functions of their arguments: every random
/// draw goes through `rng`, and the number of returned points must not
/// depend on the values drawn. Output order is unspecified; callers sort.
pub trait PointField {
    fn generate(&self, input: &FieldInput, palette: &Palette, rng: &mut dyn RngCore) -> Vec<Point>;

    /// Number of points `generate` returns for this palette.
    fn point_count(&self, palette: &Palette) -> usize;
}

static LOTUS: LotusField = LotusField::classic();
static ROSE: RoseField = RoseField::classic();

/// Flowers known to the renderer. Each selects a palette of the same name.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum FlowerKind {
    Lotus,
    Rose,
    Sunflower,
    Dahlia,
    Orchid,
    Cherry,
    Iris,
    Peony,
    Tulip,
    Lavender,
}

impl FlowerKind {
    pub const ALL: [FlowerKind; 10] = [
        FlowerKind::Lotus,
        FlowerKind::Rose,
        FlowerKind::Sunflower,
        FlowerKind::Dahlia,
        FlowerKind::Orchid,
        FlowerKind::Cherry,
        FlowerKind::Iris,
        FlowerKind::Peony,
        FlowerKind::Tulip,
        FlowerKind::Lavender,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FlowerKind::Lotus => "lotus",
            FlowerKind::Rose => "rose",
            FlowerKind::Sunflower => "sunflower",
            FlowerKind::Dahlia => "dahlia",
            FlowerKind::Orchid => "orchid",
            FlowerKind::Cherry => "cherry",
            FlowerKind::Iris => "iris",
            FlowerKind::Peony => "peony",
            FlowerKind::Tulip => "tulip",
            FlowerKind::Lavender => "lavender",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name().eq_ignore_ascii_case(name.trim()))
    }

    /// Generator used for this flower.
    ///
    /// Only lotus and rose have dedicated geometry. Every other flower is
    /// drawn with the lotus geometry in its own palette.
    pub fn generator(self) -> &'static dyn PointField {
        match self {
            FlowerKind::Lotus => &LOTUS,
            FlowerKind::Rose => &ROSE,
            FlowerKind::Sunflower
            | FlowerKind::Dahlia
            | FlowerKind::Orchid
            | FlowerKind::Cherry
            | FlowerKind::Iris
            | FlowerKind::Peony
            | FlowerKind::Tulip
            | FlowerKind::Lavender => &LOTUS,
        }
    }
}

/// Generates the full, depth-sorted point list for `kind`.
pub fn generate_field(
    kind: FlowerKind,
    input: &FieldInput,
    catalog: &Catalog,
    rng: &mut dyn RngCore,
) -> Vec<Point> {
    let palette = catalog.palette_for(kind);
    let mut points = kind.generator().generate(input, palette, rng);
    depth_sort(&mut points);

    log::debug!(
        "generated {} points for {} (scale {:.3}, surface {}x{})",
        points.len(),
        kind.name(),
        input.scale,
        input.width,
        input.height,
    );
    points
}
