use photo_model::PhotoSet;
use reqwest::{Client, StatusCode};

use crate::error::Error;

/// Shared HTTP client for both the adapter's upstream calls and the viewer's
/// adapter fetch.
pub fn http_client() -> reqwest::Result<Client> {
    Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Fetches the photo set from the adapter. Anything but `200 OK` is ignored
/// by the caller, so it is an error here. Both response shapes decode.
pub async fn fetch_photo_set(client: &Client, url: &str) -> Result<PhotoSet, Error> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if status != StatusCode::OK {
        return Err(Error::Status(status));
    }
    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}
