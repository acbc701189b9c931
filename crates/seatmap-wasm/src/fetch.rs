use seatmap_viewer::{FetchError, Fetcher};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

/// `window.fetch` loader for venue maps.
pub struct WebFetcher;

impl Fetcher for WebFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        let window =
            web_sys::window().ok_or_else(|| FetchError::Network("no window".to_string()))?;
        let value = JsFuture::from(window.fetch_with_str(url))
            .await
            .map_err(network)?;
        let response: Response = value.dyn_into().map_err(network)?;
        if !response.ok() {
            return Err(FetchError::Status {
                status: response.status(),
                status_text: response.status_text(),
            });
        }
        let body = JsFuture::from(response.text().map_err(network)?)
            .await
            .map_err(network)?;
        body.as_string()
            .ok_or_else(|| FetchError::Network("response body is not text".to_string()))
    }
}

fn network(err: JsValue) -> FetchError {
    FetchError::Network(crate::describe(&err))
}
