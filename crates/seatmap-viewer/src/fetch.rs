use crate::error::FetchError;

/// Retrieves venue map markup. The only suspension point in the viewer.
///
/// Futures need not be `Send`; browser fetches live on the page's event
/// loop.
#[allow(async_fn_in_trait)]
pub trait Fetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError>;
}
