use anyhow::Result;
use tokio::select;
use tokio::sync::mpsc::Receiver;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::events::ViewerInput;
use crate::viewer::timer::expired;
use crate::viewer::{Surface, Viewer};

/// Drives one viewer until cancelled or until its input channel closes.
///
/// Everything runs on this task: UI input, the photo set delivery, and the
/// close-delay and idle-hide deadlines. Deadlines are re-read on every turn,
/// so a re-armed timer replaces the old one instead of stacking.
pub async fn run<S: Surface>(
    mut viewer: Viewer<S>,
    mut inputs: Receiver<ViewerInput>,
    cancel: CancellationToken,
) -> Result<Viewer<S>> {
    loop {
        let close_at = viewer.close_deadline();
        let idle_at = viewer.idle_deadline();
        select! {
            _ = cancel.cancelled() => break,

            maybe_input = inputs.recv() => match maybe_input {
                Some(input) => viewer.handle(input),
                None => {
                    debug!("viewer input channel closed");
                    break;
                }
            },

            _ = expired(close_at) => viewer.finish_close(),

            _ = expired(idle_at) => viewer.hide_idle_controls(),
        }
    }
    Ok(viewer)
}
