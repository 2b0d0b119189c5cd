mod basic;
mod client;

pub use basic::BasicClient;
pub use client::HttpClient;

use tracing::debug;

use crate::error::{FeedError, FeedResult};

/// Issues a GET for `url` and returns the body.
///
/// # Errors
///
/// Returns [`FeedError::Network`] if `url` is not a valid URL, on transport
/// failure, or on a non-success status.
pub async fn fetch_bytes<C: HttpClient + ?Sized>(client: &C, url: &str) -> FeedResult<Vec<u8>> {
    let parsed = url
        .parse::<reqwest::Url>()
        .map_err(|e| FeedError::network(url, format!("invalid URL: {e}")))?;
    let req = reqwest::Request::new(reqwest::Method::GET, parsed);

    let resp = client
        .execute(req)
        .await
        .map_err(|e| FeedError::network(url, e))?;

    let status = resp.status();
    if !status.is_success() {
        return Err(FeedError::network(url, format!("HTTP status {status}")));
    }

    let bytes = resp.bytes().await.map_err(|e| FeedError::network(url, e))?;
    debug!(url, bytes = bytes.len(), "Feed body received");
    Ok(bytes.to_vec())
}
