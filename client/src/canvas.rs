use std::cell::Cell;
use std::rc::Rc;

use hexmap_shared::render::{SceneInput, render_scene};
use hexmap_shared::tool::{PressAction, press_action};
use hexmap_shared::{HexCoord, Tool};
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, PointerEvent, WheelEvent};

use crate::app::{ActiveTool, CATALOG, Erasing, HoveredHex, PanHeld, SelectedTerrain, Session, ShowGrid};
use crate::brush::PatternBrush;
use crate::listeners::bind_window;
use crate::render_loop::RedrawScheduler;
use crate::surface::CanvasSurface;

const ERASER_CURSOR: &str = "url('data:image/svg+xml;utf8,<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"24\" height=\"24\" viewBox=\"0 0 24 24\" fill=\"none\" stroke=\"black\" stroke-width=\"2\"><path d=\"M20 20H7L2 15l9-9 9 9-2 2M7 20v-4\"/></svg>') 4 20, auto";

/// Pointer position relative to the canvas, in canvas pixels.
fn local_point(canvas: &HtmlCanvasElement, client_x: i32, client_y: i32) -> (f64, f64) {
    let rect = canvas.get_bounding_client_rect();
    (client_x as f64 - rect.left(), client_y as f64 - rect.top())
}

/// Canvas cursor for the current tool state.
fn cursor_style(tool: Tool, pan_held: bool, erasing: bool, dragging: bool) -> &'static str {
    if dragging {
        "grabbing"
    } else if tool == Tool::Hand || pan_held {
        "grab"
    } else if erasing {
        ERASER_CURSOR
    } else {
        "crosshair"
    }
}

#[component]
pub fn MapCanvas() -> impl IntoView {
    let Session(session) = expect_context();
    let ActiveTool(tool) = expect_context();
    let SelectedTerrain(terrain) = expect_context();
    let Erasing(erasing) = expect_context();
    let ShowGrid(show_grid) = expect_context();
    let HoveredHex(hovered) = expect_context();
    let PanHeld(pan_held) = expect_context();

    let canvas_ref = NodeRef::<leptos::html::Canvas>::new();

    // Last client position while a pan drag is in progress.
    let drag_from: Rc<Cell<Option<(f64, f64)>>> = Rc::new(Cell::new(None));
    let dragging = RwSignal::new(false);

    let scheduler = Rc::new(RedrawScheduler::new(move || {
        let Some(canvas) = canvas_ref.get_untracked() else {
            return;
        };
        let canvas: &HtmlCanvasElement = &canvas;
        let Some(parent) = canvas.parent_element() else {
            return;
        };
        let w = parent.client_width().max(0) as u32;
        let h = parent.client_height().max(0) as u32;
        if w == 0 || h == 0 {
            return;
        }
        if canvas.width() != w || canvas.height() != h {
            canvas.set_width(w);
            canvas.set_height(h);
        }
        let Some(mut surface) = CanvasSurface::for_canvas(canvas) else {
            return;
        };
        let hover = hovered.get_untracked();
        let tool = tool.get_untracked();
        let erasing = erasing.get_untracked();
        let show_grid = show_grid.get_untracked();
        session.try_with_untracked(|s| {
            render_scene(
                &mut surface,
                &PatternBrush,
                SceneInput {
                    tiles: s.tiles(),
                    extent: s.extent(),
                    viewport: s.viewport(),
                    canvas_width: w as f64,
                    canvas_height: h as f64,
                    catalog: &CATALOG,
                    hover,
                    tool,
                    erasing,
                    show_grid,
                },
            );
        });
    }));

    let sched_state = scheduler.clone();
    Effect::new(move || {
        session.track();
        tool.track();
        erasing.track();
        show_grid.track();
        hovered.track();
        sched_state.request_redraw();
    });

    let sched_resize = scheduler.clone();
    Effect::new(move || {
        let sched = sched_resize.clone();
        bind_window("resize", move |_| sched.request_redraw());
    });

    let hex_under = move |e: &PointerEvent| -> Option<HexCoord> {
        let canvas = canvas_ref.get_untracked()?;
        let (sx, sy) = local_point(&canvas, e.client_x(), e.client_y());
        let (w, h) = (canvas.width() as f64, canvas.height() as f64);
        session.try_with_untracked(|s| s.hex_at_screen(sx, sy, w, h))
    };

    // --- Input handlers ---

    let on_pointer_down = {
        let drag_from = drag_from.clone();
        move |e: PointerEvent| {
            if e.button() != 0 {
                return;
            }
            let action = press_action(
                tool.get_untracked(),
                erasing.get_untracked(),
                pan_held.get_untracked(),
            );
            match action {
                PressAction::Pan => {
                    drag_from.set(Some((e.client_x() as f64, e.client_y() as f64)));
                    if let Some(target) = e.target()
                        && let Ok(el) = target.dyn_into::<web_sys::Element>()
                    {
                        el.set_pointer_capture(e.pointer_id()).ok();
                    }
                    dragging.set(true);
                }
                PressAction::Paint => {
                    let Some(coord) = hex_under(&e) else {
                        return;
                    };
                    let id = terrain.get_untracked();
                    session.update(|s| {
                        if let Err(err) = s.paint_at(coord, id, &CATALOG) {
                            web_sys::console::warn_1(&format!("paint rejected: {err}").into());
                        }
                    });
                }
                PressAction::Erase => {
                    let Some(coord) = hex_under(&e) else {
                        return;
                    };
                    let painted = session.with_untracked(|s| s.tiles().get(coord).is_some());
                    if painted {
                        session.update(|s| {
                            s.erase_at(coord);
                        });
                    }
                }
                PressAction::Nothing => {}
            }
        }
    };

    let on_pointer_move = {
        let drag_from = drag_from.clone();
        move |e: PointerEvent| {
            if let Some((last_x, last_y)) = drag_from.get() {
                let (x, y) = (e.client_x() as f64, e.client_y() as f64);
                drag_from.set(Some((x, y)));
                session.update(|s| s.pan(x - last_x, y - last_y));
            } else if tool.get_untracked().highlights_grid() {
                let hit = hex_under(&e);
                if hit != hovered.get_untracked() {
                    hovered.set(hit);
                }
            }
        }
    };

    let on_pointer_up = {
        let drag_from = drag_from.clone();
        move |_: PointerEvent| {
            if drag_from.take().is_some() {
                dragging.set(false);
            }
        }
    };

    let on_pointer_leave = {
        let drag_from = drag_from.clone();
        move |_: PointerEvent| {
            if drag_from.take().is_some() {
                dragging.set(false);
            }
            if hovered.get_untracked().is_some() {
                hovered.set(None);
            }
        }
    };

    let on_wheel = move |e: WheelEvent| {
        e.prevent_default();
        let zoom = e.ctrl_key() || e.meta_key();
        session.update(|s| s.apply_wheel(e.delta_x(), e.delta_y(), zoom));
    };

    let cursor = move || cursor_style(tool.get(), pan_held.get(), erasing.get(), dragging.get());

    view! {
        <canvas
            node_ref=canvas_ref
            style="position: absolute; inset: 0; width: 100%; height: 100%; touch-action: none; background: #fff;"
            style:cursor=cursor
            on:pointerdown=on_pointer_down
            on:pointermove=on_pointer_move
            on:pointerup=on_pointer_up
            on:pointerleave=on_pointer_leave
            on:wheel=on_wheel
        />
    }
}
