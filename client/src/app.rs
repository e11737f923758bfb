use std::cell::RefCell;
use std::rc::Rc;

use chrono::Utc;
use gloo_storage::{LocalStorage, Storage};
use gloo_timers::callback::Timeout;
use hexmap_shared::viewport::BUTTON_ZOOM_STEP;
use hexmap_shared::{
    AUTOSAVE_DEBOUNCE_MS, AUTOSAVE_KEY, DEFAULT_TERRAIN, HexCoord, MapSession, TerrainCatalog,
    Tool,
};
use leptos::prelude::*;
use wasm_bindgen::JsCast;

use crate::canvas::MapCanvas;
use crate::dialog::ExpandDialog;
use crate::library::TileLibrary;
use crate::listeners::bind_window;
use crate::menu::MenuBar;
use crate::toolbar::Toolbar;

pub(crate) const CATALOG: TerrainCatalog = TerrainCatalog::standard();
pub(crate) const MAX_LIBRARY_COLUMNS: u8 = 3;
const SETTINGS_KEY: &str = "hexmap_settings";

/// Newtype wrappers so that signals of the same type get distinct context slots.
#[derive(Clone, Copy)]
pub(crate) struct Session(pub RwSignal<MapSession>);
#[derive(Clone, Copy)]
pub(crate) struct ActiveTool(pub RwSignal<Tool>);
#[derive(Clone, Copy)]
pub(crate) struct SelectedTerrain(pub RwSignal<&'static str>);
#[derive(Clone, Copy)]
pub(crate) struct Erasing(pub RwSignal<bool>);
#[derive(Clone, Copy)]
pub(crate) struct ShowGrid(pub RwSignal<bool>);
#[derive(Clone, Copy)]
pub(crate) struct LibraryColumns(pub RwSignal<u8>);
#[derive(Clone, Copy)]
pub(crate) struct HoveredHex(pub RwSignal<Option<HexCoord>>);
/// Space is held: presses pan instead of painting.
#[derive(Clone, Copy)]
pub(crate) struct PanHeld(pub RwSignal<bool>);
#[derive(Clone, Copy)]
pub(crate) struct ExpandDialogOpen(pub RwSignal<bool>);

#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default)]
struct Settings {
    show_grid: bool,
    library_columns: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_grid: true,
            library_columns: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Shortcut {
    SelectTool(Tool),
    ToggleEraser,
    ToggleGrid,
    ZoomIn,
    ZoomOut,
    ResetView,
    HoldPan,
}

pub(crate) fn shortcut_for(key: &str) -> Option<Shortcut> {
    let shortcut = match key {
        "h" | "H" => Shortcut::SelectTool(Tool::Hand),
        "t" | "T" => Shortcut::SelectTool(Tool::Tile),
        "e" | "E" => Shortcut::ToggleEraser,
        "g" | "G" => Shortcut::ToggleGrid,
        "+" | "=" => Shortcut::ZoomIn,
        "-" | "_" => Shortcut::ZoomOut,
        "0" => Shortcut::ResetView,
        " " => Shortcut::HoldPan,
        _ => return None,
    };
    Some(shortcut)
}

fn typing_in_field(e: &web_sys::KeyboardEvent) -> bool {
    e.target()
        .and_then(|t| t.dyn_into::<web_sys::HtmlElement>().ok())
        .map(|el| matches!(el.tag_name().as_str(), "INPUT" | "TEXTAREA" | "SELECT"))
        .unwrap_or(false)
}

fn restore_session() -> MapSession {
    let mut session = MapSession::new();
    let stored = LocalStorage::raw().get_item(AUTOSAVE_KEY).ok().flatten();
    if let Some(text) = stored {
        match session.restore_autosave(&text) {
            Ok(()) => web_sys::console::info_1(
                &format!("restored autosave with {} tiles", session.tiles().len()).into(),
            ),
            Err(e) => web_sys::console::warn_1(&format!("ignoring autosave: {e}").into()),
        }
    }
    session
}

#[component]
pub fn App() -> impl IntoView {
    let saved: Settings = LocalStorage::get(SETTINGS_KEY).unwrap_or_default();
    let session: RwSignal<MapSession> = RwSignal::new(restore_session());
    let tool: RwSignal<Tool> = RwSignal::new(Tool::Tile);
    let terrain: RwSignal<&'static str> = RwSignal::new(DEFAULT_TERRAIN);
    let erasing: RwSignal<bool> = RwSignal::new(false);
    let show_grid: RwSignal<bool> = RwSignal::new(saved.show_grid);
    let library_columns: RwSignal<u8> =
        RwSignal::new(saved.library_columns.min(MAX_LIBRARY_COLUMNS));
    let hovered: RwSignal<Option<HexCoord>> = RwSignal::new(None);
    let pan_held: RwSignal<bool> = RwSignal::new(false);
    let expand_open: RwSignal<bool> = RwSignal::new(false);

    provide_context(Session(session));
    provide_context(ActiveTool(tool));
    provide_context(SelectedTerrain(terrain));
    provide_context(Erasing(erasing));
    provide_context(ShowGrid(show_grid));
    provide_context(LibraryColumns(library_columns));
    provide_context(HoveredHex(hovered));
    provide_context(PanHeld(pan_held));
    provide_context(ExpandDialogOpen(expand_open));

    Effect::new(move || {
        let settings = Settings {
            show_grid: show_grid.get(),
            library_columns: library_columns.get(),
        };
        let _ = LocalStorage::set(SETTINGS_KEY, &settings);
    });

    // Autosave once edits settle. Each change restarts the quiet period.
    let pending_autosave = Rc::new(RefCell::new(None::<Timeout>));
    Effect::new(move || {
        session.track();
        if let Some(timeout) = pending_autosave.borrow_mut().take() {
            timeout.cancel();
        }
        let timeout = Timeout::new(AUTOSAVE_DEBOUNCE_MS, move || {
            let Some(snapshot) = session.try_with_untracked(|s| s.autosave_snapshot(Utc::now()))
            else {
                return;
            };
            if let Err(e) = LocalStorage::set(AUTOSAVE_KEY, &snapshot) {
                web_sys::console::warn_1(&format!("autosave failed: {e}").into());
            }
        });
        *pending_autosave.borrow_mut() = Some(timeout);
    });

    // Global keyboard shortcuts
    Effect::new(move || {
        bind_window("keydown", move |e: web_sys::Event| {
            let Ok(e) = e.dyn_into::<web_sys::KeyboardEvent>() else {
                return;
            };
            if typing_in_field(&e) || e.ctrl_key() || e.meta_key() || e.alt_key() {
                return;
            }
            let Some(shortcut) = shortcut_for(&e.key()) else {
                return;
            };
            e.prevent_default();
            match shortcut {
                Shortcut::SelectTool(next) => tool.set(next),
                Shortcut::ToggleEraser => erasing.update(|v| *v = !*v),
                Shortcut::ToggleGrid => show_grid.update(|v| *v = !*v),
                Shortcut::ZoomIn => session.update(|s| s.zoom_step(BUTTON_ZOOM_STEP)),
                Shortcut::ZoomOut => session.update(|s| s.zoom_step(-BUTTON_ZOOM_STEP)),
                Shortcut::ResetView => session.update(|s| s.reset_view()),
                Shortcut::HoldPan => {
                    if !pan_held.get_untracked() {
                        pan_held.set(true);
                    }
                }
            }
        });
        bind_window("keyup", move |e: web_sys::Event| {
            let Ok(e) = e.dyn_into::<web_sys::KeyboardEvent>() else {
                return;
            };
            if e.key() == " " {
                pan_held.set(false);
            }
        });
        bind_window("blur", move |_| pan_held.set(false));
    });

    view! {
        <div style="display: flex; flex-direction: column; height: 100vh; background: #f9fafb; font-family: system-ui, sans-serif; color: #111827;">
            <MenuBar />
            <div style="display: flex; flex: 1; overflow: hidden;">
                <Toolbar />
                <div style="flex: 1; position: relative;">
                    <MapCanvas />
                </div>
                {move || {
                    if tool.get().highlights_grid() {
                        view! { <TileLibrary /> }.into_any()
                    } else {
                        ().into_any()
                    }
                }}
            </div>
            <StatusBar />
            {move || {
                if expand_open.get() {
                    view! { <ExpandDialog /> }.into_any()
                } else {
                    ().into_any()
                }
            }}
        </div>
    }
}

/// Declared map size and zoom level.
#[component]
fn StatusBar() -> impl IntoView {
    let Session(session) = expect_context();
    let extent = Memo::new(move |_| session.with(|s| s.extent()));
    let zoom = Memo::new(move |_| session.with(|s| (s.viewport().scale * 100.0).round() as i64));

    view! {
        <div style="background: #fff; border-top: 1px solid #d1d5db; padding: 8px 16px; display: flex; gap: 24px; font-size: 0.875rem; color: #4b5563;">
            <div>{move || {
                let e = extent.get();
                format!("Map: {}\u{00D7}{}", e.width, e.height)
            }}</div>
            <div>{move || format!("Zoom: {}%", zoom.get())}</div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letter_shortcuts_ignore_case() {
        assert_eq!(shortcut_for("h"), Some(Shortcut::SelectTool(Tool::Hand)));
        assert_eq!(shortcut_for("H"), Some(Shortcut::SelectTool(Tool::Hand)));
        assert_eq!(shortcut_for("T"), Some(Shortcut::SelectTool(Tool::Tile)));
        assert_eq!(shortcut_for("e"), Some(Shortcut::ToggleEraser));
        assert_eq!(shortcut_for("g"), Some(Shortcut::ToggleGrid));
    }

    #[test]
    fn zoom_keys_accept_unshifted_variants() {
        assert_eq!(shortcut_for("="), Some(Shortcut::ZoomIn));
        assert_eq!(shortcut_for("+"), Some(Shortcut::ZoomIn));
        assert_eq!(shortcut_for("-"), Some(Shortcut::ZoomOut));
        assert_eq!(shortcut_for("0"), Some(Shortcut::ResetView));
        assert_eq!(shortcut_for(" "), Some(Shortcut::HoldPan));
        assert_eq!(shortcut_for("x"), None);
        assert_eq!(shortcut_for("Enter"), None);
    }

    #[test]
    fn settings_fill_missing_fields() {
        let s: Settings = serde_json::from_str(r#"{"show_grid": false}"#).unwrap();
        assert!(!s.show_grid);
        assert_eq!(s.library_columns, 1);
    }
}
