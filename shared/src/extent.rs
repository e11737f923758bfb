use serde::{Deserialize, Serialize};

use crate::error::MapError;
use crate::hex::HexCoord;

/// Cells added to both width and height when painting near the edge.
pub const GROW_STEP: u32 = 5;
/// How close (in cells) to the half-extent a paint must land to trigger growth.
pub const GROW_MARGIN: f64 = 1.0;
/// Unpainted ring drawn around the declared extent on the working canvas.
pub const RENDER_PADDING: i32 = 5;
/// Largest width or height a map may declare. Loads above it are refused and
/// growth stops here.
pub const MAX_DIMENSION: u32 = 2_000;

/// Declared map size in hex counts, centered on the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridExtent {
    pub width: u32,
    pub height: u32,
}

impl Default for GridExtent {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Per-side deltas for a manual expansion.
///
/// North and south widen the height, east and west widen the width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expansion {
    pub north: i32,
    pub south: i32,
    pub east: i32,
    pub west: i32,
}

impl Default for Expansion {
    fn default() -> Self {
        Self {
            north: 5,
            south: 5,
            east: 5,
            west: 5,
        }
    }
}

impl GridExtent {
    pub const DEFAULT: Self = Self {
        width: 20,
        height: 20,
    };

    /// Build an extent, refusing zero-sized axes and axes above [`MAX_DIMENSION`].
    pub fn new(width: u32, height: u32) -> Option<Self> {
        let valid = 1..=MAX_DIMENSION;
        (valid.contains(&width) && valid.contains(&height)).then_some(Self { width, height })
    }

    pub fn half_width(&self) -> f64 {
        self.width as f64 / 2.0
    }

    pub fn half_height(&self) -> f64 {
        self.height as f64 / 2.0
    }

    /// Whether painting `coord` lands within [`GROW_MARGIN`] of the declared edge.
    pub fn should_grow(&self, coord: HexCoord) -> bool {
        (coord.q.unsigned_abs() as f64) >= self.half_width() - GROW_MARGIN
            || (coord.r.unsigned_abs() as f64) >= self.half_height() - GROW_MARGIN
    }

    /// Widen both axes by [`GROW_STEP`], stopping at [`MAX_DIMENSION`].
    pub fn grow(self) -> Self {
        Self {
            width: capped_add(self.width, GROW_STEP),
            height: capped_add(self.height, GROW_STEP),
        }
    }

    pub fn expand(self, by: Expansion) -> Result<Self, MapError> {
        let Expansion {
            north,
            south,
            east,
            west,
        } = by;
        if north < 0 || south < 0 || east < 0 || west < 0 {
            tracing::warn!(north, south, east, west, "rejected negative expansion");
            return Err(MapError::InvalidExpansion {
                north,
                south,
                east,
                west,
            });
        }
        Ok(Self {
            width: capped_add(capped_add(self.width, east.unsigned_abs()), west.unsigned_abs()),
            height: capped_add(capped_add(self.height, north.unsigned_abs()), south.unsigned_abs()),
        })
    }

    /// Inclusive cell range covering the declared extent plus `padding` cells
    /// on every side.
    pub fn hex_range(&self, padding: i32) -> HexRange {
        // ceil(n / 2) on each side; floor(-n / 2) == -ceil(n / 2).
        let half_q = (i64::from(self.width) + 1) / 2 + i64::from(padding);
        let half_r = (i64::from(self.height) + 1) / 2 + i64::from(padding);
        HexRange {
            min_q: saturate_i32(-half_q),
            max_q: saturate_i32(half_q),
            min_r: saturate_i32(-half_r),
            max_r: saturate_i32(half_r),
        }
    }
}

fn capped_add(value: u32, delta: u32) -> u32 {
    value.saturating_add(delta).min(MAX_DIMENSION.max(value))
}

fn saturate_i32(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Rectangular block of axial coordinates, bounds inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexRange {
    pub min_q: i32,
    pub max_q: i32,
    pub min_r: i32,
    pub max_r: i32,
}

impl HexRange {
    pub fn contains(&self, coord: HexCoord) -> bool {
        (self.min_q..=self.max_q).contains(&coord.q) && (self.min_r..=self.max_r).contains(&coord.r)
    }

    pub fn cell_count(&self) -> usize {
        let cols = (i64::from(self.max_q) - i64::from(self.min_q) + 1).max(0) as u64;
        let rows = (i64::from(self.max_r) - i64::from(self.min_r) + 1).max(0) as u64;
        usize::try_from(cols.saturating_mul(rows)).unwrap_or(usize::MAX)
    }

    /// Row-major scan: r outer, q inner.
    pub fn iter(&self) -> impl Iterator<Item = HexCoord> + use<> {
        let HexRange {
            min_q,
            max_q,
            min_r,
            max_r,
        } = *self;
        (min_r..=max_r).flat_map(move |r| (min_q..=max_q).map(move |q| HexCoord::new(q, r)))
    }
}
