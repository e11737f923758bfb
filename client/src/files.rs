use chrono::Utc;
use hexmap_shared::document::{DEFAULT_MAP_NAME, json_file_name, png_file_name};
use hexmap_shared::render::{export_size, render_export};
use hexmap_shared::MapSession;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, File, HtmlAnchorElement, HtmlCanvasElement, Url};

use crate::app::CATALOG;
use crate::brush::PatternBrush;
use crate::surface::CanvasSurface;

fn document() -> Result<web_sys::Document, JsValue> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))
}

/// Offer `blob` to the user as a download named `name`.
fn download_blob(blob: &Blob, name: &str) -> Result<(), JsValue> {
    let url = Url::create_object_url_with_blob(blob)?;
    let anchor: HtmlAnchorElement = document()?.create_element("a")?.dyn_into()?;
    anchor.set_href(&url);
    anchor.set_download(name);
    anchor.click();
    Url::revoke_object_url(&url)
}

fn download_text(name: &str, text: &str, mime: &str) -> Result<(), JsValue> {
    let parts = js_sys::Array::of1(&JsValue::from_str(text));
    let options = BlobPropertyBag::new();
    options.set_type(mime);
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;
    download_blob(&blob, name)
}

/// Write the map as a `hexmap-<ms>.json` download.
pub(crate) fn save_map(session: &MapSession) -> Result<(), JsValue> {
    let now = Utc::now();
    let json = session
        .to_document(DEFAULT_MAP_NAME, now)
        .to_json_pretty()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    download_text(&json_file_name(now), &json, "application/json")
}

pub(crate) async fn read_text(file: File) -> Result<String, JsValue> {
    JsFuture::from(file.text())
        .await?
        .as_string()
        .ok_or_else(|| JsValue::from_str("file contents are not text"))
}

/// Rasterize the declared extent off-screen and download it as PNG.
pub(crate) fn export_png(session: &MapSession) -> Result<(), JsValue> {
    let (width, height) = export_size(session.extent());
    let canvas: HtmlCanvasElement = document()?.create_element("canvas")?.dyn_into()?;
    canvas.set_width(width);
    canvas.set_height(height);
    let mut surface =
        CanvasSurface::for_canvas(&canvas).ok_or_else(|| JsValue::from_str("no 2d context"))?;
    render_export(
        &mut surface,
        &PatternBrush,
        session.tiles(),
        session.extent(),
        &CATALOG,
    );

    let name = png_file_name(Utc::now());
    let on_blob = wasm_bindgen::closure::Closure::once_into_js(move |blob: JsValue| {
        let Ok(blob) = blob.dyn_into::<Blob>() else {
            web_sys::console::warn_1(&"PNG encoding produced no data".into());
            return;
        };
        if let Err(e) = download_blob(&blob, &name) {
            web_sys::console::warn_1(&e);
        }
    });
    canvas.to_blob(on_blob.unchecked_ref())
}
