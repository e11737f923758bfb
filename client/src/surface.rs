use hexmap_shared::render::{Stroke, Surface};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// `Surface` over a browser 2D context.
pub(crate) struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn for_canvas(canvas: &HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())?;
        Some(Self { ctx })
    }

    pub fn ctx(&self) -> &CanvasRenderingContext2d {
        &self.ctx
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, width: f64, height: f64) {
        self.ctx.clear_rect(0.0, 0.0, width, height);
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(x, y, width, height);
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn translate(&mut self, x: f64, y: f64) {
        self.ctx.translate(x, y).ok();
    }

    fn scale(&mut self, factor: f64) {
        self.ctx.scale(factor, factor).ok();
    }

    fn polygon(&mut self, points: &[(f64, f64)], fill: Option<&str>, stroke: Option<Stroke<'_>>) {
        let Some((&(x0, y0), rest)) = points.split_first() else {
            return;
        };
        let ctx = &self.ctx;
        ctx.begin_path();
        ctx.move_to(x0, y0);
        for &(x, y) in rest {
            ctx.line_to(x, y);
        }
        ctx.close_path();
        if let Some(color) = fill {
            ctx.set_fill_style_str(color);
            ctx.fill();
        }
        if let Some(Stroke { color, width }) = stroke {
            ctx.set_stroke_style_str(color);
            ctx.set_line_width(width);
            ctx.stroke();
        }
    }
}
