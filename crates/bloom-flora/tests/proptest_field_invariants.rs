//! Property-based invariants for the flower generators.
//!
//! 1. Every generated point is finite and in range (colour, opacity, size, glyph).
//! 2. `generate_field` output is sorted back to front.
//! 3. The point count never depends on the seed.
//! 4. Degenerate surfaces (zero, negative, NaN) never panic.
//! 5. Gradients hit their end stops exactly.

use bloom_flora::{
    generate_field, gradient, Catalog, FieldInput, FlowerKind, PointField, GLYPH_SLOTS,
};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

// ── Helpers ─────────────────────────────────────────────────────────────

fn kind_strategy() -> impl Strategy<Value = FlowerKind> {
    (0usize..FlowerKind::ALL.len()).prop_map(|i| FlowerKind::ALL[i])
}

fn surface_strategy() -> impl Strategy<Value = (f32, f32)> {
    (1.0f32..2560.0, 1.0f32..1600.0)
}

/// Unit interval with room for interpolation rounding.
fn in_unit(v: f32) -> bool {
    (-1e-5..=1.0 + 1e-5).contains(&v)
}

fn rgb_strategy() -> impl Strategy<Value = [f32; 3]> {
    [0.0f32..=1.0, 0.0f32..=1.0, 0.0f32..=1.0]
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Value ranges
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn points_are_finite_and_in_range(
        kind in kind_strategy(),
        (w, h) in surface_strategy(),
        seed in any::<u64>(),
    ) {
        let catalog = Catalog::builtin();
        let input = FieldInput::for_surface(w, h);
        let points = generate_field(kind, &input, &catalog, &mut StdRng::seed_from_u64(seed));

        for p in &points {
            prop_assert!(p.x.is_finite() && p.y.is_finite() && p.z.is_finite(), "{:?}", p);
            prop_assert!(p.size > 0.0, "size {}", p.size);
            prop_assert!((0.0..=1.0).contains(&p.opacity), "opacity {}", p.opacity);
            prop_assert!(p.color.iter().all(|c| in_unit(*c)), "color {:?}", p.color);
            prop_assert!(p.glyph < GLYPH_SLOTS);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Depth order
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn output_is_depth_sorted(kind in kind_strategy(), seed in any::<u64>()) {
        let catalog = Catalog::builtin();
        let input = FieldInput::for_surface(500.0, 600.0);
        let points = generate_field(kind, &input, &catalog, &mut StdRng::seed_from_u64(seed));
        prop_assert!(points.windows(2).all(|w| w[0].z <= w[1].z));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Count is seed independent
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn count_ignores_seed(kind in kind_strategy(), a in any::<u64>(), b in any::<u64>()) {
        let catalog = Catalog::builtin();
        let input = FieldInput::for_surface(640.0, 480.0);
        let first = generate_field(kind, &input, &catalog, &mut StdRng::seed_from_u64(a));
        let second = generate_field(kind, &input, &catalog, &mut StdRng::seed_from_u64(b));
        prop_assert_eq!(first.len(), second.len());
        prop_assert_eq!(first.len(), kind.generator().point_count(catalog.palette_for(kind)));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Degenerate surfaces
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn degenerate_input_never_panics(
        kind in kind_strategy(),
        scale in prop_oneof![Just(0.0f32), Just(-3.0), Just(f32::NAN), Just(f32::INFINITY)],
        seed in any::<u64>(),
    ) {
        let catalog = Catalog::builtin();
        let input = FieldInput { center_x: 0.0, center_y: 0.0, scale, width: 0.0, height: 0.0 };
        let points = generate_field(kind, &input, &catalog, &mut StdRng::seed_from_u64(seed));
        prop_assert!(!points.is_empty());
        prop_assert!(points.iter().all(|p| p.size > 0.0 && p.x.is_finite() && p.y.is_finite()));
    }
}

#[test]
fn zero_sized_surface_generates() {
    let catalog = Catalog::builtin();
    let input = FieldInput::for_surface(0.0, 0.0);
    let points = generate_field(FlowerKind::Lotus, &input, &catalog, &mut StdRng::seed_from_u64(1));
    assert_eq!(points.len(), FlowerKind::Lotus.generator().point_count(catalog.palette_for(FlowerKind::Lotus)));
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Gradient endpoints
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn gradient_hits_end_stops(stops in prop::collection::vec(rgb_strategy(), 1..6)) {
        prop_assert_eq!(gradient(&stops, 0.0), stops[0]);
        prop_assert_eq!(gradient(&stops, 1.0), stops[stops.len() - 1]);
    }

    #[test]
    fn gradient_stays_inside_unit_cube(
        stops in prop::collection::vec(rgb_strategy(), 1..6),
        t in -2.0f32..3.0,
    ) {
        let c = gradient(&stops, t);
        prop_assert!(c.iter().all(|v| in_unit(*v)), "{:?}", c);
    }
}
