//! Colour scales for charts and map

use plotters::style::RGBColor;

/// Fill for districts without an index value
pub const MISSING: RGBColor = RGBColor(230, 230, 230);

/// Background of RED rows in the variation table
pub const ALERT_ROW: RGBColor = RGBColor(255, 205, 210);

/// Background of the table header
pub const HEADER_ROW: RGBColor = RGBColor(220, 220, 220);

const VIRIDIS: [(f64, RGBColor); 5] = [
    (0.0, RGBColor(68, 1, 84)),
    (0.25, RGBColor(59, 82, 139)),
    (0.5, RGBColor(33, 145, 140)),
    (0.75, RGBColor(94, 201, 98)),
    (1.0, RGBColor(253, 231, 37)),
];

fn lerp(a: u8, b: u8, t: f64) -> u8 {
    let v = f64::from(a) + (f64::from(b) - f64::from(a)) * t;
    v.round().clamp(0.0, 255.0) as u8
}

/// Viridis colour for `value` on the fixed [0, 1] scale
///
/// Values outside the scale are clamped; NaN maps to [`MISSING`].
#[must_use]
pub fn viridis(value: f64) -> RGBColor {
    if value.is_nan() {
        return MISSING;
    }
    let t = value.clamp(0.0, 1.0);
    for pair in VIRIDIS.windows(2) {
        let (t0, RGBColor(r0, g0, b0)) = pair[0];
        let (t1, RGBColor(r1, g1, b1)) = pair[1];
        if t <= t1 {
            let local = (t - t0) / (t1 - t0);
            return RGBColor(lerp(r0, r1, local), lerp(g0, g1, local), lerp(b0, b1, local));
        }
    }
    VIRIDIS[VIRIDIS.len() - 1].1
}
