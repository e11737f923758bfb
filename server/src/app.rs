use std::path::Path;

use axum::{
    Json, Router,
    extract::Request,
    http::{HeaderValue, header},
    middleware::{self, Next},
    response::Response,
};
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;

pub(crate) fn build_app(dist_dir: &Path) -> Router {
    let static_assets = Router::new()
        .fallback_service(
            ServeDir::new(dist_dir)
                .precompressed_br()
                .precompressed_gzip(),
        )
        .layer(middleware::from_fn(set_static_cache_control));

    Router::new()
        .route("/api/health", axum::routing::get(health))
        .layer(CompressionLayer::new())
        .fallback_service(static_assets)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn set_static_cache_control(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_owned();
    let mut response = next.run(request).await;

    if response.status().is_success()
        && let Some(cache_control) = cache_control_for_path(&path)
    {
        response.headers_mut().insert(
            header::CACHE_CONTROL,
            HeaderValue::from_static(cache_control),
        );
    }

    response
}

fn cache_control_for_path(path: &str) -> Option<&'static str> {
    if is_hashed_bundle_asset(path) {
        return Some("public, max-age=31536000, immutable");
    }

    if path.starts_with("/icons/") {
        return Some("public, max-age=86400");
    }

    None
}

/// Trunk names bundle outputs `<crate>-<hash>.<ext>`; only those are safe to pin.
fn is_hashed_bundle_asset(path: &str) -> bool {
    let Some(ext) = Path::new(path).extension().and_then(|ext| ext.to_str()) else {
        return false;
    };

    if !matches!(ext, "wasm" | "js" | "css") {
        return false;
    }

    let Some(filename) = Path::new(path).file_name().and_then(|name| name.to_str()) else {
        return false;
    };

    filename
        .split(['-', '_', '.'])
        .any(|segment| segment.len() >= 8 && segment.chars().all(|c| c.is_ascii_hexdigit()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::StatusCode;
    use std::path::PathBuf;
    use tower::ServiceExt;

    fn scratch_dist(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("hexmap-server-{name}-{}", std::process::id()));
        std::fs::create_dir_all(dir.join("icons")).unwrap();
        std::fs::write(dir.join("index.html"), "<!doctype html><title>Hex Map</title>").unwrap();
        std::fs::write(dir.join("hexmap-client-71578f6b278221f3.js"), "export {};").unwrap();
        std::fs::write(dir.join("icons").join("eraser.svg"), "<svg/>").unwrap();
        dir
    }

    fn get(uri: &str) -> Request {
        axum::http::Request::builder()
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    #[test]
    fn immutable_cache_for_hashed_bundle_assets() {
        assert_eq!(
            cache_control_for_path("/hexmap-client-71578f6b278221f3_bg.wasm"),
            Some("public, max-age=31536000, immutable")
        );
        assert_eq!(
            cache_control_for_path("/input-a93762ff3bf6d63a.css"),
            Some("public, max-age=31536000, immutable")
        );
    }

    #[test]
    fn short_cache_for_icons() {
        assert_eq!(
            cache_control_for_path("/icons/eraser.svg"),
            Some("public, max-age=86400")
        );
    }

    #[test]
    fn no_cache_header_override_for_html_or_unhashed_scripts() {
        assert_eq!(cache_control_for_path("/"), None);
        assert_eq!(cache_control_for_path("/index.html"), None);
        assert_eq!(cache_control_for_path("/app.js"), None);
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let app = build_app(Path::new("does-not-exist"));
        let response = app.oneshot(get("/api/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn serves_bundle_with_cache_headers() {
        let dist = scratch_dist("bundle");
        let app = build_app(&dist);

        let response = app
            .clone()
            .oneshot(get("/hexmap-client-71578f6b278221f3.js"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL).unwrap(),
            "public, max-age=31536000, immutable"
        );

        let response = app.clone().oneshot(get("/icons/eraser.svg")).await.unwrap();
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL).unwrap(),
            "public, max-age=86400"
        );

        let response = app.oneshot(get("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(header::CACHE_CONTROL).is_none());

        std::fs::remove_dir_all(dist).ok();
    }

    #[tokio::test]
    async fn missing_asset_is_not_cached() {
        let dist = scratch_dist("missing");
        let app = build_app(&dist);

        let response = app
            .oneshot(get("/hexmap-client-deadbeefdeadbeef.js"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.headers().get(header::CACHE_CONTROL).is_none());

        std::fs::remove_dir_all(dist).ok();
    }
}
