/// Straight RGB triple, each channel in `[0, 1]`.
pub type Rgb = [f32; 3];

/// Per-channel linear interpolation from `a` (t = 0) to `b` (t = 1).
#[inline]
pub fn lerp(a: Rgb, b: Rgb, t: f32) -> Rgb {
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
    ]
}

/// Samples an evenly spaced multi-stop gradient.
///
/// `t` is clamped to `[0, 1]` and mapped onto the stop index range
/// `[0, len - 1]`; the two bracketing stops are blended by the fractional
/// remainder. The endpoints return the first / last stop exactly.
///
/// A single stop is returned unchanged for every `t`. An empty slice yields
/// black; a non-finite `t` samples the first stop.
pub fn gradient(stops: &[Rgb], t: f32) -> Rgb {
    let Some(&first) = stops.first() else {
        return [0.0; 3];
    };
    if stops.len() == 1 || !t.is_finite() {
        return first;
    }

    let last = stops.len() - 1;
    let idx = t.clamp(0.0, 1.0) * last as f32;
    let lower = (idx.floor() as usize).min(last);
    let upper = (lower + 1).min(last);

    lerp(stops[lower], stops[upper], idx - lower as f32)
}
