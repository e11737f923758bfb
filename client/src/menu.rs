use hexmap_shared::MapError;
use hexmap_shared::viewport::BUTTON_ZOOM_STEP;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

use crate::app::{ExpandDialogOpen, Session, ShowGrid};
use crate::files;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Menu {
    File,
    View,
}

const ITEM_STYLE: &str = "display: block; width: 100%; padding: 8px 16px; text-align: left; white-space: nowrap; background: none; border: none; cursor: pointer; font: inherit;";
const DROPDOWN_STYLE: &str = "position: absolute; top: 100%; left: 0; margin-top: 4px; background: #fff; border: 1px solid #d1d5db; border-radius: 4px; box-shadow: 0 10px 15px rgba(0,0,0,0.1); z-index: 50; min-width: 220px;";

fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        window.alert_with_message(message).ok();
    }
}

fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

#[component]
fn Divider() -> impl IntoView {
    view! { <div style="border-top: 1px solid #e5e7eb;" /> }
}

/// File and View menus across the top of the editor.
#[component]
pub fn MenuBar() -> impl IntoView {
    let Session(session) = expect_context();
    let ShowGrid(show_grid) = expect_context();
    let ExpandDialogOpen(expand_open) = expect_context();
    let open: RwSignal<Option<Menu>> = RwSignal::new(None);

    let toggle = move |menu: Menu| open.update(|m| *m = if *m == Some(menu) { None } else { Some(menu) });

    let on_new = move |_| {
        open.set(None);
        if confirm("Are you sure you want to clear the entire map? This cannot be undone.") {
            session.update(|s| s.clear());
        }
    };

    let on_save = move |_| {
        open.set(None);
        if let Err(e) = session.with_untracked(files::save_map) {
            web_sys::console::warn_1(&e);
        }
    };

    let on_export = move |_| {
        open.set(None);
        if let Err(e) = session.with_untracked(files::export_png) {
            web_sys::console::warn_1(&e);
        }
    };

    let on_open = move |e: web_sys::Event| {
        open.set(None);
        let Some(input) = e
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        else {
            return;
        };
        let Some(file) = input.files().and_then(|list| list.get(0)) else {
            return;
        };
        // Allow reopening the same file later.
        input.set_value("");
        wasm_bindgen_futures::spawn_local(async move {
            let text = match files::read_text(file).await {
                Ok(text) => text,
                Err(e) => {
                    web_sys::console::warn_1(&e);
                    alert("Failed to load map file");
                    return;
                }
            };
            let Some(mut next) = session.try_get_untracked() else {
                return;
            };
            match next.load_document(&text) {
                Ok(()) => session.set(next),
                Err(err) => {
                    web_sys::console::warn_1(&format!("{err}").into());
                    if matches!(err, MapError::MalformedDocument(_)) {
                        alert("Failed to load map file");
                    }
                }
            }
        });
    };

    let on_expand = move |_| {
        open.set(None);
        expand_open.set(true);
    };

    view! {
        <div style="background: #fff; border-bottom: 1px solid #d1d5db; padding: 8px 16px; display: flex; gap: 16px; position: relative;">
            <div style="position: relative;">
                <button style="padding: 4px 12px; border: none; background: none; cursor: pointer; font: inherit;" on:click=move |_| toggle(Menu::File)>
                    "File \u{25BC}"
                </button>
                <Show when=move || open.get() == Some(Menu::File)>
                    <div style=DROPDOWN_STYLE>
                        <button style=ITEM_STYLE on:click=on_new>"New Map"</button>
                        <Divider />
                        <label style=ITEM_STYLE>
                            "Open Map"
                            <input type="file" accept=".json" style="display: none;" on:change=on_open />
                        </label>
                        <button style=ITEM_STYLE on:click=on_save>"Save Map"</button>
                        <Divider />
                        <button style=ITEM_STYLE on:click=on_export>"Export as PNG"</button>
                        <Divider />
                        <button style=ITEM_STYLE on:click=on_expand>"Expand Map..."</button>
                    </div>
                </Show>
            </div>
            <div style="position: relative;">
                <button style="padding: 4px 12px; border: none; background: none; cursor: pointer; font: inherit;" on:click=move |_| toggle(Menu::View)>
                    "View \u{25BC}"
                </button>
                <Show when=move || open.get() == Some(Menu::View)>
                    <div style=DROPDOWN_STYLE>
                        <button style=ITEM_STYLE on:click=move |_| show_grid.update(|v| *v = !*v)>
                            {move || if show_grid.get() { "\u{2713} Show Grid" } else { "\u{2003} Show Grid" }}
                        </button>
                        <Divider />
                        <button style=ITEM_STYLE on:click=move |_| session.update(|s| s.zoom_step(BUTTON_ZOOM_STEP))>
                            "Zoom In"
                        </button>
                        <button style=ITEM_STYLE on:click=move |_| session.update(|s| s.zoom_step(-BUTTON_ZOOM_STEP))>
                            "Zoom Out"
                        </button>
                        <button
                            style=ITEM_STYLE
                            on:click=move |_| {
                                open.set(None);
                                session.update(|s| s.reset_view());
                            }
                        >
                            "Reset View"
                        </button>
                    </div>
                </Show>
            </div>
        </div>
    }
}
