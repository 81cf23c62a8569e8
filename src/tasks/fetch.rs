use anyhow::Result;
use reqwest::Client;
use tokio::select;
use tokio::sync::mpsc::Sender;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::client::fetch_photo_set;
use crate::events::ViewerInput;

/// Fetches the photo set once and hands it to the viewer.
///
/// There is no retry and no timeout. On failure nothing is delivered and the
/// viewer keeps its fetching state.
pub async fn run(
    client: Client,
    url: String,
    to_viewer: Sender<ViewerInput>,
    cancel: CancellationToken,
) -> Result<()> {
    let fetched = select! {
        _ = cancel.cancelled() => return Ok(()),
        fetched = fetch_photo_set(&client, &url) => fetched,
    };

    match fetched {
        Ok(photos) => {
            info!(%url, count = photos.len(), "fetched photo set");
            if to_viewer
                .send(ViewerInput::PhotoSetLoaded(photos))
                .await
                .is_err()
            {
                warn!("viewer gone before the photo set arrived");
            }
        }
        Err(err) => warn!(%url, error = %err, "photo set fetch failed; viewer stays unavailable"),
    }
    Ok(())
}
