use std::f64::consts::{FRAC_PI_2, TAU};

use hexmap_shared::hex::HEX_SIZE;
use hexmap_shared::render::Decorator;
use hexmap_shared::PatternKind;
use web_sys::CanvasRenderingContext2d;

use crate::surface::CanvasSurface;

const INK: &str = "#000";
const FURROW: &str = "#8B6914";
const SNOW: &str = "#fff";
const LAVA: &str = "#ff4500";
const SPRAY: &str = "#87CEEB";
const INK_ALPHA: f64 = 0.4;
const LINE_WIDTH: f64 = 2.0;
/// Pattern artwork is laid out on a grid 1.3x smaller than a hex of `HEX_SIZE`.
const ARTWORK_SCALE: f64 = 1.3;

const TREES: &[(f64, f64)] = &[
    (-25.0, -10.0),
    (-8.0, -18.0),
    (8.0, -10.0),
    (25.0, -2.0),
    (-17.0, 8.0),
    (0.0, 3.0),
    (17.0, 8.0),
    (-8.0, 20.0),
    (8.0, 20.0),
];

const DENSE_TREES: &[(f64, f64)] = &[
    (-28.0, -15.0),
    (-14.0, -20.0),
    (0.0, -24.0),
    (14.0, -20.0),
    (28.0, -15.0),
    (-21.0, -5.0),
    (-7.0, -8.0),
    (7.0, -8.0),
    (21.0, -5.0),
    (-14.0, 5.0),
    (0.0, 2.0),
    (14.0, 5.0),
    (-21.0, 15.0),
    (-7.0, 18.0),
    (7.0, 18.0),
    (21.0, 15.0),
    (-14.0, 25.0),
    (0.0, 28.0),
    (14.0, 25.0),
];

const DOTS: &[(f64, f64)] = &[
    (-20.0, -20.0),
    (0.0, -13.0),
    (20.0, -20.0),
    (-27.0, 0.0),
    (-7.0, 7.0),
    (13.0, 0.0),
    (27.0, 7.0),
    (-13.0, 20.0),
    (7.0, 24.0),
];

/// Ornamentation for each terrain pattern, drawn in translucent ink over the
/// hex fill.
#[derive(Clone, Copy, Default)]
pub(crate) struct PatternBrush;

impl Decorator<CanvasSurface> for PatternBrush {
    fn decorate(&self, surface: &mut CanvasSurface, pattern: PatternKind, center: (f64, f64), size: f64) {
        let ctx = surface.ctx();
        let k = ARTWORK_SCALE * size / HEX_SIZE;
        ctx.save();
        ctx.translate(center.0, center.1).ok();
        ctx.scale(k, k).ok();
        ctx.set_stroke_style_str(INK);
        ctx.set_fill_style_str(INK);
        ctx.set_line_width(LINE_WIDTH / k);
        ctx.set_global_alpha(INK_ALPHA);

        match pattern {
            PatternKind::Solid => {}
            PatternKind::Farmland => farmland(ctx, k),
            PatternKind::Trees => TREES.iter().for_each(|&at| tree(ctx, at)),
            PatternKind::DenseTrees => DENSE_TREES.iter().for_each(|&at| tree(ctx, at)),
            PatternKind::Wavy => wavy(ctx),
            PatternKind::Peaks => peaks(ctx),
            PatternKind::LargePeak => large_peak(ctx),
            PatternKind::Volcano => volcano(ctx),
            PatternKind::Waves => ripples(ctx, 3, 20.0, -30.0, 3, 20.0, 5.0),
            PatternKind::ShallowWaves => ripples(ctx, 2, 26.0, -33.0, 3, 22.0, 4.0),
            PatternKind::RoughWaves => {
                ctx.set_stroke_style_str(SPRAY);
                ripples(ctx, 4, 13.0, -33.0, 5, 13.0, 6.0);
            }
            PatternKind::Dots => {
                for &(x, y) in DOTS {
                    ctx.begin_path();
                    ctx.arc(x, y, 2.0, 0.0, TAU).ok();
                    ctx.fill();
                }
            }
            PatternKind::Reeds => reeds(ctx),
        }

        ctx.restore();
    }
}

fn stroke_path(ctx: &CanvasRenderingContext2d, points: &[(f64, f64)]) {
    let Some((&(x0, y0), rest)) = points.split_first() else {
        return;
    };
    ctx.begin_path();
    ctx.move_to(x0, y0);
    for &(x, y) in rest {
        ctx.line_to(x, y);
    }
    ctx.stroke();
}

fn farmland(ctx: &CanvasRenderingContext2d, k: f64) {
    ctx.set_stroke_style_str(FURROW);
    ctx.set_line_width(2.5 / k);
    let plots = [
        (-15.0, -15.0, 0.0),
        (15.0, -15.0, FRAC_PI_2),
        (-15.0, 15.0, FRAC_PI_2),
        (15.0, 15.0, 0.0),
    ];
    for (cx, cy, rotation) in plots {
        ctx.save();
        ctx.translate(cx, cy).ok();
        ctx.rotate(rotation).ok();
        for row in -1..=1 {
            let y = row as f64 * 6.0;
            stroke_path(ctx, &[(-12.0, y), (12.0, y)]);
        }
        ctx.restore();
    }
}

fn tree(ctx: &CanvasRenderingContext2d, (x, y): (f64, f64)) {
    ctx.begin_path();
    ctx.move_to(x - 5.0, y + 8.0);
    ctx.line_to(x, y - 8.0);
    ctx.line_to(x + 5.0, y + 8.0);
    ctx.close_path();
    ctx.fill();
}

fn peak(ctx: &CanvasRenderingContext2d, x: f64, y: f64) {
    stroke_path(ctx, &[(x - 10.0, y + 10.0), (x, y - 10.0), (x + 10.0, y + 10.0)]);
}

fn peaks(ctx: &CanvasRenderingContext2d) {
    for i in 0..3 {
        peak(ctx, -26.0 + i as f64 * 26.0, 18.0);
    }
    for i in 0..2 {
        peak(ctx, -13.0 + i as f64 * 26.0, -15.0);
    }
}

fn large_peak(ctx: &CanvasRenderingContext2d) {
    stroke_path(ctx, &[(-30.0, 25.0), (0.0, -25.0), (30.0, 25.0)]);
    ctx.begin_path();
    ctx.move_to(-10.0, -10.0);
    ctx.line_to(0.0, -25.0);
    ctx.line_to(10.0, -10.0);
    ctx.close_path();
    ctx.set_fill_style_str(SNOW);
    ctx.set_global_alpha(0.6);
    ctx.fill();
}

fn volcano(ctx: &CanvasRenderingContext2d) {
    stroke_path(ctx, &[(-28.0, 20.0), (-8.0, -20.0), (8.0, -20.0), (28.0, 20.0)]);
    stroke_path(ctx, &[(-8.0, -20.0), (-5.0, -15.0), (5.0, -15.0), (8.0, -20.0)]);
    ctx.set_fill_style_str(LAVA);
    ctx.set_global_alpha(0.3);
    ctx.fill_rect(-5.0, -20.0, 10.0, 5.0);
}

fn wavy(ctx: &CanvasRenderingContext2d) {
    for i in 0..2 {
        let y = -13.0 + i as f64 * 26.0;
        ctx.begin_path();
        ctx.move_to(-33.0, y);
        ctx.quadratic_curve_to(-20.0, y - 7.0, -7.0, y);
        ctx.quadratic_curve_to(7.0, y + 7.0, 20.0, y);
        ctx.quadratic_curve_to(33.0, y - 7.0, 40.0, y);
        ctx.stroke();
    }
}

/// Rows of S-curves. Each segment spans `period` and swings `amplitude`.
fn ripples(
    ctx: &CanvasRenderingContext2d,
    rows: u32,
    row_gap: f64,
    left: f64,
    segments: u32,
    period: f64,
    amplitude: f64,
) {
    let top = if rows == 2 { -13.0 } else { -20.0 };
    let half = period / 2.0;
    for i in 0..rows {
        let y = top + i as f64 * row_gap;
        ctx.begin_path();
        ctx.move_to(left, y);
        for j in 0..segments {
            let x = left + j as f64 * period;
            ctx.quadratic_curve_to(x + half * 0.7, y - amplitude, x + half, y);
            ctx.quadratic_curve_to(x + half * 1.3, y + amplitude, x + period, y);
        }
        ctx.stroke();
    }
}

fn reeds(ctx: &CanvasRenderingContext2d) {
    for x in [-20.0, -7.0, 7.0, 20.0] {
        stroke_path(ctx, &[(x, 20.0), (x, -20.0)]);
        stroke_path(ctx, &[(x, -13.0), (x - 4.0, -7.0)]);
    }
}
