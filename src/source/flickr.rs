//! Adapter over the Flickr REST API: one fixed `photosets.getPhotos` call,
//! reshaped into a [`PhotoSet`].

use photo_model::{PhotoItem, PhotoSet};
use reqwest::Url;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::UpstreamConfig;
use crate::error::Error;

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    stat: Option<String>,
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    photoset: Option<UpstreamPhotoset>,
}

#[derive(Debug, Deserialize)]
struct UpstreamPhotoset {
    #[serde(default)]
    photo: Option<Vec<UpstreamPhoto>>,
}

#[derive(Debug, Deserialize)]
struct UpstreamPhoto {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    url_o: Option<String>,
    #[serde(default)]
    title: String,
}

#[derive(Debug, Clone)]
pub struct FlickrSource {
    client: reqwest::Client,
    upstream: UpstreamConfig,
}

impl FlickrSource {
    pub fn new(client: reqwest::Client, upstream: UpstreamConfig) -> Self {
        Self { client, upstream }
    }

    pub fn request_url(&self) -> Result<Url, Error> {
        Url::parse_with_params(&self.upstream.endpoint, query_pairs(&self.upstream))
            .map_err(|err| Error::Endpoint(format!("{}: {err}", self.upstream.endpoint)))
    }

    /// Issues one upstream request. No caching and no retry.
    pub async fn fetch(&self) -> Result<PhotoSet, Error> {
        let url = self.request_url()?;
        debug!(
            photoset_id = %self.upstream.photoset_id,
            method = %self.upstream.method,
            "requesting upstream photo set"
        );
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status(status));
        }
        let body = response.text().await?;
        parse_photo_set(&body)
    }
}

/// Query parameters in the order the API documents them.
pub fn query_pairs(upstream: &UpstreamConfig) -> [(&'static str, &str); 6] {
    [
        ("api_key", upstream.api_key.as_str()),
        ("method", upstream.method.as_str()),
        ("photoset_id", upstream.photoset_id.as_str()),
        ("format", "json"),
        ("nojsoncallback", "1"),
        ("extras", upstream.extras.as_str()),
    ]
}

/// Maps an upstream response body to photos. A missing photoset or photo
/// list is an empty set; the `stat: fail` envelope is an error.
pub fn parse_photo_set(body: &str) -> Result<PhotoSet, Error> {
    let envelope: Envelope = serde_json::from_str(body)?;
    if envelope.stat.as_deref() == Some("fail") {
        return Err(Error::UpstreamFailure {
            code: envelope.code.unwrap_or_default(),
            message: envelope.message.unwrap_or_default(),
        });
    }

    let photos = envelope
        .photoset
        .and_then(|set| set.photo)
        .unwrap_or_default();

    Ok(photos
        .into_iter()
        .filter_map(|photo| match photo.url_o {
            Some(src) if !src.is_empty() => Some(PhotoItem::new(src, photo.title)),
            _ => {
                warn!(id = ?photo.id, title = %photo.title, "skipping photo without original url");
                None
            }
        })
        .collect())
}
