//! Target face geometry for reading holdover against the scoring rings.

/// Ring diameters on the target face, innermost first [m].
pub const RING_DIAMETERS: [f64; 4] = [0.2, 0.4, 0.6, 0.8];

/// Closed polyline of a ring centred on the aim point, `segments + 1` points.
pub fn ring_outline(diameter: f64, segments: usize) -> Vec<[f64; 2]> {
    let r = diameter / 2.0;
    let n = segments.max(3);
    (0..=n)
        .map(|i| {
            let a = i as f64 / n as f64 * std::f64::consts::TAU;
            [r * a.cos(), r * a.sin()]
        })
        .collect()
}

/// Smallest ring that contains a point `holdover` metres above the aim
/// point, or `None` when it falls off the face.
pub fn ring_hit(holdover: f64) -> Option<f64> {
    RING_DIAMETERS
        .iter()
        .copied()
        .find(|d| holdover.abs() <= d / 2.0)
}
