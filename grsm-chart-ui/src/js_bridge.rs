//! Browser interop: fetching datasets and measuring containers.
//!
//! Everything here needs a live `window`; the panel models only see the
//! results (`String` bodies, `Size` values) so they stay testable natively.

use grsm_charts::viewport::{Margin, Size, ViewportProvider};
use grsm_data::{DatasetKind, DatasetPaths, LoadError};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

/// GET `url` and return the body as text.
pub async fn fetch_text(url: &str) -> Result<String, String> {
    let window = web_sys::window().ok_or_else(|| "window not available".to_string())?;
    let response_value = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| format!("fetch failed: {:?}", e))?;

    let response: web_sys::Response = response_value
        .dyn_into()
        .map_err(|_| "failed to cast fetch response".to_string())?;

    if !response.ok() {
        return Err(format!("HTTP {} while fetching {}", response.status(), url));
    }

    let text_promise = response
        .text()
        .map_err(|e| format!("response.text() failed: {:?}", e))?;
    let text_value = JsFuture::from(text_promise)
        .await
        .map_err(|e| format!("await response text failed: {:?}", e))?;
    text_value
        .as_string()
        .ok_or_else(|| "response text was not a string".to_string())
}

/// Fetch one dataset relative to `paths`.
pub async fn fetch_dataset(paths: &DatasetPaths, kind: DatasetKind) -> Result<String, LoadError> {
    let url = paths.resolve(kind);
    log::info!("[GRSM] fetching {}", url);
    fetch_text(&url)
        .await
        .map_err(|e| LoadError::fetch(kind, e))
}

/// Measures containers with `getBoundingClientRect`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebViewport;

impl ViewportProvider for WebViewport {
    fn container_size(&self, container_id: &str) -> Option<Size> {
        let document = web_sys::window()?.document()?;
        let rect = document
            .get_element_by_id(container_id)?
            .get_bounding_client_rect();
        (rect.width() > 0.0).then(|| Size::new(rect.width(), rect.height()))
    }
}

/// Client coordinates to plot coordinates inside `container_id`'s chart.
///
/// The plot group is translated by the margin, so the container's top-left
/// corner plus the margin is the plot origin.
pub fn plot_point(container_id: &str, margin: Margin, client_x: f64, client_y: f64) -> (f64, f64) {
    let origin = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(container_id))
        .map(|el| {
            let rect = el.get_bounding_client_rect();
            (rect.left(), rect.top())
        })
        .unwrap_or((0.0, 0.0));
    (
        client_x - origin.0 - margin.left,
        client_y - origin.1 - margin.top,
    )
}
