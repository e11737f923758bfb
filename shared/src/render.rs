//! Projection of map state onto a 2D drawing surface.
//!
//! Nothing here mutates the map: every function takes shared references and
//! only issues drawing calls.

use crate::extent::{GridExtent, HexRange, RENDER_PADDING};
use crate::hex::{HEX_HEIGHT, HEX_SIZE, HEX_WIDTH, HexCoord, hex_corners};
use crate::store::TileStore;
use crate::terrain::{PatternKind, Terrain, TerrainCatalog};
use crate::tool::Tool;
use crate::viewport::Viewport;

/// Outline style for a polygon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke<'a> {
    pub color: &'a str,
    pub width: f64,
}

pub const PAINTED_STROKE: Stroke<'static> = Stroke {
    color: "#555",
    width: 1.0,
};
pub const EMPTY_STROKE: Stroke<'static> = Stroke {
    color: "#bbb",
    width: 0.5,
};
pub const PAINT_HIGHLIGHT: Stroke<'static> = Stroke {
    color: "#3b82f6",
    width: 3.0,
};
pub const ERASE_HIGHLIGHT: Stroke<'static> = Stroke {
    color: "#ef4444",
    width: 3.0,
};
pub const EXPORT_PAINTED_STROKE: Stroke<'static> = Stroke {
    color: "#333",
    width: 2.0,
};
pub const EXPORT_EMPTY_STROKE: Stroke<'static> = Stroke {
    color: "#ccc",
    width: 1.0,
};
pub const SWATCH_STROKE: Stroke<'static> = Stroke {
    color: "#555",
    width: 2.0,
};
pub const EXPORT_BACKGROUND: &str = "#ffffff";

/// Cells of border the export bitmap reserves around the declared extent.
const EXPORT_MARGIN_CELLS: u32 = 2;

/// Minimal 2D drawing backend. Mirrors the subset of the canvas API the
/// renderer needs; transforms compose like the canvas transform stack.
pub trait Surface {
    fn clear(&mut self, width: f64, height: f64);
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: &str);
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, x: f64, y: f64);
    fn scale(&mut self, factor: f64);
    fn polygon(&mut self, points: &[(f64, f64)], fill: Option<&str>, stroke: Option<Stroke<'_>>);
}

/// Per-terrain ornamentation drawn over the fill.
pub trait Decorator<S: Surface + ?Sized> {
    fn decorate(&self, surface: &mut S, pattern: PatternKind, center: (f64, f64), size: f64);
}

/// Decorator that draws nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDecoration;

impl<S: Surface + ?Sized> Decorator<S> for NoDecoration {
    fn decorate(&self, _surface: &mut S, _pattern: PatternKind, _center: (f64, f64), _size: f64) {}
}

/// Everything one frame of the working canvas depends on.
#[derive(Debug, Clone, Copy)]
pub struct SceneInput<'a> {
    pub tiles: &'a TileStore,
    pub extent: GridExtent,
    pub viewport: Viewport,
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub catalog: &'a TerrainCatalog,
    pub hover: Option<HexCoord>,
    pub tool: Tool,
    pub erasing: bool,
    pub show_grid: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Cells in the padded range. Only rows and columns near the canvas are
    /// actually visited.
    pub scanned: usize,
    /// Cells that survived off-screen culling.
    pub drawn: usize,
}

/// Draw the working canvas: padded declared extent, painted and empty cells,
/// and the hover highlight.
pub fn render_scene<S, D>(surface: &mut S, decorator: &D, input: SceneInput<'_>) -> RenderStats
where
    S: Surface + ?Sized,
    D: Decorator<S> + ?Sized,
{
    let SceneInput {
        tiles,
        extent,
        viewport,
        canvas_width,
        canvas_height,
        catalog,
        hover,
        tool,
        erasing,
        show_grid,
    } = input;

    let center = (canvas_width / 2.0, canvas_height / 2.0);
    surface.clear(canvas_width, canvas_height);
    surface.save();
    surface.translate(center.0 + viewport.pan_x, center.1 + viewport.pan_y);
    surface.scale(viewport.scale);

    let hover = hover.filter(|_| tool.highlights_grid());
    let highlight = if erasing {
        ERASE_HIGHLIGHT
    } else {
        PAINT_HIGHLIGHT
    };
    let cull_radius = (HEX_SIZE + highlight.width) * viewport.scale;

    let range = extent.hex_range(RENDER_PADDING);
    let mut stats = RenderStats {
        scanned: range.cell_count(),
        drawn: 0,
    };

    let margin = cull_radius / viewport.scale;
    for coord in candidate_cells(range, viewport, center, canvas_width, canvas_height, margin) {
        let world = coord.center(HEX_SIZE);
        let (sx, sy) = viewport.world_to_screen(world.0, world.1, center);
        if sx + cull_radius < 0.0
            || sy + cull_radius < 0.0
            || sx - cull_radius > canvas_width
            || sy - cull_radius > canvas_height
        {
            continue;
        }
        stats.drawn += 1;

        let corners = hex_corners(world, HEX_SIZE);
        match tiles.get(coord) {
            Some(tile) => {
                if let Some(terrain) = catalog.find(&tile.terrain) {
                    let stroke = show_grid.then_some(PAINTED_STROKE);
                    draw_terrain(surface, decorator, terrain, world, &corners, stroke);
                }
            }
            None if show_grid => surface.polygon(&corners, None, Some(EMPTY_STROKE)),
            None => {}
        }

        if hover == Some(coord) {
            surface.polygon(&corners, None, Some(highlight));
        }
    }

    surface.restore();
    stats
}

/// Cells of `range` whose centers may lie within `margin` world pixels of the
/// canvas. Rows and columns outside that window are never visited.
fn candidate_cells(
    range: HexRange,
    viewport: Viewport,
    center: (f64, f64),
    width: f64,
    height: f64,
    margin: f64,
) -> impl Iterator<Item = HexCoord> {
    let (x0, y0) = viewport.screen_to_world(0.0, 0.0, center);
    let (x1, y1) = viewport.screen_to_world(width, height, center);
    let row_height = HEX_SIZE * 1.5;
    let r_lo = clamp_index(((y0 - margin) / row_height).floor(), range.min_r, range.max_r);
    let r_hi = clamp_index(((y1 + margin) / row_height).ceil(), range.min_r, range.max_r);
    (r_lo..=r_hi).flat_map(move |r| {
        let shift = r as f64 / 2.0;
        let q_lo = clamp_index(((x0 - margin) / HEX_WIDTH - shift).floor(), range.min_q, range.max_q);
        let q_hi = clamp_index(((x1 + margin) / HEX_WIDTH - shift).ceil(), range.min_q, range.max_q);
        (q_lo..=q_hi).map(move |q| HexCoord::new(q, r))
    })
}

fn clamp_index(value: f64, lo: i32, hi: i32) -> i32 {
    if value.is_nan() {
        lo
    } else {
        value.clamp(lo as f64, hi as f64) as i32
    }
}

/// Pixel size of the exported bitmap for `extent`.
pub fn export_size(extent: GridExtent) -> (u32, u32) {
    let cols = extent.width.saturating_add(EXPORT_MARGIN_CELLS) as f64;
    let rows = extent.height.saturating_add(EXPORT_MARGIN_CELLS) as f64;
    ((cols * HEX_WIDTH) as u32, (rows * HEX_HEIGHT * 0.75) as u32)
}

/// Draw the declared extent only, on a white background, with no hover state.
/// The surface is expected to be exactly [`export_size`] pixels.
pub fn render_export<S, D>(
    surface: &mut S,
    decorator: &D,
    tiles: &TileStore,
    extent: GridExtent,
    catalog: &TerrainCatalog,
) where
    S: Surface + ?Sized,
    D: Decorator<S> + ?Sized,
{
    let (width, height) = export_size(extent);
    let (width, height) = (width as f64, height as f64);
    surface.fill_rect(0.0, 0.0, width, height, EXPORT_BACKGROUND);
    surface.save();
    surface.translate(width / 2.0, height / 2.0);

    for coord in extent.hex_range(0).iter() {
        let world = coord.center(HEX_SIZE);
        let corners = hex_corners(world, HEX_SIZE);
        match tiles.get(coord) {
            Some(tile) => {
                if let Some(terrain) = catalog.find(&tile.terrain) {
                    draw_terrain(
                        surface,
                        decorator,
                        terrain,
                        world,
                        &corners,
                        Some(EXPORT_PAINTED_STROKE),
                    );
                }
            }
            None => surface.polygon(
                &corners,
                Some(EXPORT_BACKGROUND),
                Some(EXPORT_EMPTY_STROKE),
            ),
        }
    }

    surface.restore();
}

/// Draw a single terrain hex centered in a square `side`-pixel surface, for
/// the tile library.
pub fn render_swatch<S, D>(surface: &mut S, decorator: &D, terrain: &Terrain, side: f64)
where
    S: Surface + ?Sized,
    D: Decorator<S> + ?Sized,
{
    surface.clear(side, side);
    surface.save();
    surface.translate(side / 2.0, side / 2.0);
    surface.scale(side / (HEX_SIZE * 3.0));
    let corners = hex_corners((0.0, 0.0), HEX_SIZE);
    draw_terrain(
        surface,
        decorator,
        terrain,
        (0.0, 0.0),
        &corners,
        Some(SWATCH_STROKE),
    );
    surface.restore();
}

fn draw_terrain<S, D>(
    surface: &mut S,
    decorator: &D,
    terrain: &Terrain,
    center: (f64, f64),
    corners: &[(f64, f64); 6],
    stroke: Option<Stroke<'_>>,
) where
    S: Surface + ?Sized,
    D: Decorator<S> + ?Sized,
{
    surface.polygon(corners, Some(terrain.color), stroke);
    if !terrain.pattern.is_solid() {
        decorator.decorate(surface, terrain.pattern, center, HEX_SIZE);
    }
}
