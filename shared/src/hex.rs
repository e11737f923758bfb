//! Axial hex coordinates and the pointy-top pixel layout.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MapError;

/// Hex circumradius in world pixels.
pub const HEX_SIZE: f64 = 70.0;
/// Flat-to-flat width of a pointy-top hex.
pub const HEX_WIDTH: f64 = HEX_SIZE * SQRT_3;
/// Vertex-to-vertex height of a pointy-top hex.
pub const HEX_HEIGHT: f64 = HEX_SIZE * 2.0;

const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// A cell on the infinite axial grid. The cube coordinate `s` is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HexCoord {
    pub q: i32,
    pub r: i32,
}

impl HexCoord {
    pub const ORIGIN: Self = Self { q: 0, r: 0 };

    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    pub const fn s(&self) -> i32 {
        -self.q - self.r
    }

    /// Textual `"q,r"` key used by the persisted document formats.
    pub fn key(&self) -> String {
        self.to_string()
    }

    /// Parse a `"q,r"` key back into a coordinate.
    pub fn parse_key(key: &str) -> Result<Self, MapError> {
        let (q, r) = key
            .split_once(',')
            .ok_or_else(|| MapError::malformed(format!("tile key `{key}` is not `q,r`")))?;
        let q = q
            .trim()
            .parse::<i32>()
            .map_err(|_| MapError::malformed(format!("tile key `{key}` has a non-integer q")))?;
        let r = r
            .trim()
            .parse::<i32>()
            .map_err(|_| MapError::malformed(format!("tile key `{key}` has a non-integer r")))?;
        Ok(Self { q, r })
    }

    /// Center of this cell in world pixels.
    pub fn center(&self, size: f64) -> (f64, f64) {
        hex_to_pixel(self.q, self.r, size)
    }
}

impl fmt::Display for HexCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.q, self.r)
    }
}

impl FromStr for HexCoord {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_key(s)
    }
}

/// Center of axial cell `(q, r)` for hexes of circumradius `size`.
pub fn hex_to_pixel(q: i32, r: i32, size: f64) -> (f64, f64) {
    let q = q as f64;
    let r = r as f64;
    (size * SQRT_3 * (q + r / 2.0), size * 1.5 * r)
}

/// The cell containing world point `(x, y)`.
pub fn pixel_to_hex(x: f64, y: f64, size: f64) -> HexCoord {
    let q = (SQRT_3 / 3.0 * x - y / 3.0) / size;
    let r = (2.0 / 3.0 * y) / size;
    round_hex(q, r)
}

/// Round fractional axial coordinates to the nearest valid cell.
///
/// All three cube axes are rounded independently; the axis that moved the
/// furthest is then recomputed from the other two so `q + r + s == 0` holds.
/// Exact halves round toward positive infinity.
pub fn round_hex(q: f64, r: f64) -> HexCoord {
    let s = -q - r;
    let mut rq = round_half_up(q);
    let mut rr = round_half_up(r);
    let rs = round_half_up(s);

    let q_diff = (rq - q).abs();
    let r_diff = (rr - r).abs();
    let s_diff = (rs - s).abs();

    if q_diff > r_diff && q_diff > s_diff {
        rq = -rr - rs;
    } else if r_diff > s_diff {
        rr = -rq - rs;
    }

    HexCoord::new(rq as i32, rr as i32)
}

fn round_half_up(x: f64) -> f64 {
    let rounded = x.round();
    if x - rounded == 0.5 {
        rounded + 1.0
    } else {
        rounded
    }
}

/// Polygon corners of a pointy-top hex, starting at -30° and turning clockwise
/// in screen space.
pub fn hex_corners(center: (f64, f64), size: f64) -> [(f64, f64); 6] {
    let (cx, cy) = center;
    std::array::from_fn(|i| {
        let angle = (60.0 * i as f64 - 30.0).to_radians();
        (cx + size * angle.cos(), cy + size * angle.sin())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn assert_close(actual: f64, expected: f64) {
        let diff = (actual - expected).abs();
        assert!(
            diff < 1e-9,
            "expected {expected}, got {actual} (diff: {diff})"
        );
    }

    fn planar_dist2(q: f64, r: f64, cell: HexCoord) -> f64 {
        let dq = q - cell.q as f64;
        let dr = r - cell.r as f64;
        let dx = SQRT_3 * (dq + dr / 2.0);
        let dy = 1.5 * dr;
        dx * dx + dy * dy
    }

    #[test]
    fn origin_maps_to_origin() {
        assert_eq!(hex_to_pixel(0, 0, HEX_SIZE), (0.0, 0.0));
        assert_eq!(pixel_to_hex(0.0, 0.0, HEX_SIZE), HexCoord::ORIGIN);
    }

    #[test]
    fn pointy_top_layout_offsets() {
        let (x, y) = hex_to_pixel(1, 0, 10.0);
        assert_close(x, 10.0 * SQRT_3);
        assert_close(y, 0.0);

        let (x, y) = hex_to_pixel(0, 1, 10.0);
        assert_close(x, 5.0 * SQRT_3);
        assert_close(y, 15.0);

        let (x, y) = hex_to_pixel(-2, 3, 10.0);
        assert_close(x, 10.0 * SQRT_3 * -0.5);
        assert_close(y, 45.0);
    }

    #[test]
    fn layout_constants_match_size() {
        assert_close(HEX_WIDTH, 70.0 * 3f64.sqrt());
        assert_close(HEX_HEIGHT, 140.0);
    }

    #[test]
    fn point_near_center_resolves_to_that_cell() {
        let (x, y) = hex_to_pixel(4, -7, HEX_SIZE);
        assert_eq!(pixel_to_hex(x + 20.0, y - 15.0, HEX_SIZE), HexCoord::new(4, -7));
    }

    #[test]
    fn round_hex_fixes_largest_error_axis() {
        // Per-axis rounding of (0.4, 0.4) lands on (0, 0), which is further away
        // than both (0, 1) and (1, 0).
        assert_eq!(round_hex(0.4, 0.4), HexCoord::new(0, 1));
        assert_eq!(round_hex(0.6, 0.3), HexCoord::new(1, 0));
        assert_eq!(round_hex(0.3, 0.6), HexCoord::new(0, 1));
    }

    #[test]
    fn ties_round_toward_positive_infinity() {
        assert_eq!(round_half_up(-0.5), 0.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-0.6), -1.0);

        // Edge midpoints between two cells resolve toward +q.
        assert_eq!(round_hex(-0.5, 0.0), HexCoord::ORIGIN);
        assert_eq!(round_hex(0.5, 0.0), HexCoord::new(1, 0));
        assert_eq!(round_hex(0.0, -0.5), HexCoord::ORIGIN);
    }

    #[test]
    fn key_round_trips_through_text() {
        let coord = HexCoord::new(-12, 7);
        assert_eq!(coord.key(), "-12,7");
        assert_eq!(HexCoord::parse_key("-12,7"), Ok(coord));
        assert_eq!(" 3 , -4".parse::<HexCoord>(), Ok(HexCoord::new(3, -4)));
    }

    #[test]
    fn malformed_keys_are_rejected() {
        for key in ["", "1", "1;2", "a,2", "1,b", "1.5,2", "1,2,3"] {
            assert!(
                matches!(HexCoord::parse_key(key), Err(MapError::MalformedDocument(_))),
                "key {key:?} should be rejected"
            );
        }
    }

    #[test]
    fn derived_s_balances_cube_coordinates() {
        let coord = HexCoord::new(5, -9);
        assert_eq!(coord.q + coord.r + coord.s(), 0);
    }

    #[test]
    fn corners_sit_on_the_circumradius() {
        let corners = hex_corners((10.0, -5.0), 30.0);
        for (x, y) in corners {
            let d = ((x - 10.0).powi(2) + (y + 5.0).powi(2)).sqrt();
            assert_close(d, 30.0);
        }
        // Pointy top: corner 5 sits straight above the center.
        assert_close(corners[5].0, 10.0);
        assert_close(corners[5].1, -35.0);
    }

    proptest! {
        #[test]
        fn pixel_to_hex_inverts_exact_centers(
            q in -500i32..500,
            r in -500i32..500,
            size in 1.0f64..200.0,
        ) {
            let (x, y) = hex_to_pixel(q, r, size);
            prop_assert_eq!(pixel_to_hex(x, y, size), HexCoord::new(q, r));
        }

        #[test]
        fn round_hex_returns_the_nearest_cell(q in -100.0f64..100.0, r in -100.0f64..100.0) {
            let rounded = round_hex(q, r);
            prop_assert_eq!(rounded.q + rounded.r + rounded.s(), 0);

            let best = planar_dist2(q, r, rounded);
            let (fq, fr) = (q.floor() as i32, r.floor() as i32);
            for dq in -1..=2 {
                for dr in -1..=2 {
                    let candidate = HexCoord::new(fq + dq, fr + dr);
                    prop_assert!(best <= planar_dist2(q, r, candidate) + 1e-9);
                }
            }
        }
    }
}
