use hexmap_shared::Tool;
use hexmap_shared::viewport::BUTTON_ZOOM_STEP;
use leptos::prelude::*;

use crate::app::{ActiveTool, Session};

const BUTTON_STYLE: &str = "width: 44px; height: 44px; border: none; border-radius: 6px; cursor: pointer; display: flex; align-items: center; justify-content: center; font-size: 1.1rem;";

fn glyph(tool: Tool) -> &'static str {
    match tool {
        Tool::Tile => "\u{2B22}",
        Tool::Feature => "\u{2302}",
        Tool::Road => "\u{2261}",
        Tool::River => "\u{2248}",
        Tool::Hand => "\u{270B}",
    }
}

#[component]
fn ToolButton(tool: Tool) -> impl IntoView {
    let ActiveTool(active) = expect_context();
    let selected = move || active.get() == tool;

    view! {
        <button
            title=tool.label()
            style=BUTTON_STYLE
            style:background={move || if selected() { "#3b82f6" } else { "transparent" }}
            style:color={move || if selected() { "#fff" } else { "#374151" }}
            on:click=move |_| active.set(tool)
        >
            {glyph(tool)}
        </button>
    }
}

/// Left-hand tool strip: editing tools, then view controls.
#[component]
pub fn Toolbar() -> impl IntoView {
    let Session(session) = expect_context();

    view! {
        <div style="width: 64px; background: #fff; border-right: 1px solid #d1d5db; display: flex; flex-direction: column; align-items: center; padding: 16px 0; gap: 8px;">
            <ToolButton tool=Tool::Tile />
            <ToolButton tool=Tool::Feature />
            <ToolButton tool=Tool::Road />
            <ToolButton tool=Tool::River />
            <div style="border-top: 1px solid #d1d5db; width: 100%; margin: 8px 0;" />
            <ToolButton tool=Tool::Hand />
            <button
                title="Zoom In"
                style=BUTTON_STYLE
                on:click=move |_| session.update(|s| s.zoom_step(BUTTON_ZOOM_STEP))
            >
                "+"
            </button>
            <button
                title="Zoom Out"
                style=BUTTON_STYLE
                on:click=move |_| session.update(|s| s.zoom_step(-BUTTON_ZOOM_STEP))
            >
                "\u{2212}"
            </button>
            <button
                title="Reset View"
                style=BUTTON_STYLE
                on:click=move |_| session.update(|s| s.reset_view())
            >
                "\u{21BA}"
            </button>
        </div>
    }
}
