use hexmap_shared::render::render_swatch;
use hexmap_shared::{Terrain, Tool};
use leptos::prelude::*;

use crate::app::{ActiveTool, CATALOG, Erasing, LibraryColumns, MAX_LIBRARY_COLUMNS, SelectedTerrain};
use crate::brush::PatternBrush;
use crate::surface::CanvasSurface;

/// Backing-store size of a swatch canvas; drawn at half size for crisp edges.
const SWATCH_PX: u32 = 100;
const COLUMN_WIDTH_PX: u32 = 128;

const TAB_STYLE: &str = "padding: 12px 8px; background: #fff; border: 1px solid #d1d5db; border-right: none; border-radius: 8px 0 0 8px; box-shadow: 0 4px 12px rgba(0,0,0,0.1); cursor: pointer;";

fn erase_title(tool: Tool) -> &'static str {
    match tool {
        Tool::Feature => "Erase Features",
        Tool::Road => "Erase Roads",
        Tool::River => "Erase Rivers",
        Tool::Tile | Tool::Hand => "Erase Tiles",
    }
}

fn placeholder(tool: Tool) -> &'static str {
    match tool {
        Tool::Feature => "Feature library coming soon",
        Tool::Road => "Road library coming soon",
        Tool::River => "River library coming soon",
        Tool::Tile | Tool::Hand => "",
    }
}

#[component]
fn Swatch(terrain: &'static Terrain) -> impl IntoView {
    let SelectedTerrain(selected) = expect_context();
    let Erasing(erasing) = expect_context();
    let canvas_ref = NodeRef::<leptos::html::Canvas>::new();

    Effect::new(move || {
        let Some(canvas) = canvas_ref.get() else {
            return;
        };
        canvas.set_width(SWATCH_PX);
        canvas.set_height(SWATCH_PX);
        if let Some(mut surface) = CanvasSurface::for_canvas(&canvas) {
            render_swatch(&mut surface, &PatternBrush, terrain, SWATCH_PX as f64);
        }
    });

    let active = move || selected.get() == terrain.id && !erasing.get();

    view! {
        <button
            style="display: flex; flex-direction: column; align-items: center; padding: 8px; border-radius: 6px; border: 2px solid; background: #fff; cursor: pointer;"
            style:border-color={move || if active() { "#3b82f6" } else { "#d1d5db" }}
            style:background={move || if active() { "#eff6ff" } else { "#fff" }}
            on:click=move |_| {
                selected.set(terrain.id);
                erasing.set(false);
            }
        >
            <canvas node_ref=canvas_ref style="width: 64px; height: 64px;" />
            <span style="font-size: 0.75rem; margin-top: 4px; text-align: center; line-height: 1.2;">
                {terrain.name}
            </span>
        </button>
    }
}

/// Right-hand palette for the active tool, with the eraser toggle.
#[component]
pub fn TileLibrary() -> impl IntoView {
    let ActiveTool(tool) = expect_context();
    let Erasing(erasing) = expect_context();
    let LibraryColumns(columns) = expect_context();

    let widen = move |_: leptos::ev::MouseEvent| columns.update(|c| *c = (*c + 1).min(MAX_LIBRARY_COLUMNS));
    let narrow = move |_: leptos::ev::MouseEvent| columns.update(|c| *c = c.saturating_sub(1));

    view! {
        <div style="display: flex; position: relative;">
            <div style="position: absolute; left: 0; top: 50%; transform: translate(-100%, -50%); display: flex; flex-direction: column; gap: 4px; z-index: 10;">
                <button
                    title="Expand Library"
                    style=TAB_STYLE
                    style:color={move || if columns.get() >= MAX_LIBRARY_COLUMNS { "#d1d5db" } else { "#374151" }}
                    disabled=move || columns.get() >= MAX_LIBRARY_COLUMNS
                    on:click=widen
                >
                    "\u{2039}"
                </button>
                <button
                    title="Collapse Library"
                    style=TAB_STYLE
                    style:color={move || if columns.get() == 0 { "#d1d5db" } else { "#374151" }}
                    disabled=move || columns.get() == 0
                    on:click=narrow
                >
                    "\u{203A}"
                </button>
            </div>
            <div
                style="background: #fff; border-left: 1px solid #d1d5db; display: flex; flex-direction: column; transition: width 0.3s;"
                style:width=move || format!("{}px", columns.get() as u32 * COLUMN_WIDTH_PX)
            >
                <div style="padding: 8px; border-bottom: 1px solid #d1d5db; display: flex; justify-content: flex-end;">
                    <button
                        title=move || erase_title(tool.get())
                        style="padding: 8px; border: none; border-radius: 6px; cursor: pointer;"
                        style:background={move || if erasing.get() { "#ef4444" } else { "transparent" }}
                        style:color={move || if erasing.get() { "#fff" } else { "#374151" }}
                        on:click=move |_| erasing.update(|v| *v = !*v)
                    >
                        "\u{232B}"
                    </button>
                </div>
                {move || {
                    if columns.get() == 0 {
                        return ().into_any();
                    }
                    if tool.get() != Tool::Tile {
                        return view! {
                            <div style="font-size: 0.75rem; color: #6b7280; text-align: center; padding: 16px;">
                                {placeholder(tool.get())}
                            </div>
                        }
                        .into_any();
                    }
                    view! {
                        <div style="flex: 1; overflow-y: auto; padding: 8px;">
                            <div
                                style="display: grid; gap: 8px;"
                                style:grid-template-columns=move || format!("repeat({}, minmax(0, 1fr))", columns.get())
                            >
                                {CATALOG.iter().map(|terrain| view! { <Swatch terrain=terrain /> }).collect_view()}
                            </div>
                        </div>
                    }
                    .into_any()
                }}
            </div>
        </div>
    }
}
