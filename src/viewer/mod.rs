//! The lightbox widget: a thumbnail trigger plus an overlay that pages
//! through one photo set.
//!
//! [`Viewer`] is synchronous and owns all widget state. Time enters only
//! through its two [`Deadline`]s, which the task loop in
//! [`crate::tasks::viewer`] waits on.

pub mod state;
pub mod surface;
pub mod timer;

use std::time::Duration;

use photo_model::{PhotoItem, PhotoSet};
use tokio::time::Instant;
use tracing::{debug, info, trace, warn};

use crate::config::ViewerConfig;
use crate::events::{Key, Target, ViewerInput};

pub use state::{LoadState, ViewerState};
pub use surface::{Control, Element, Overlay, Presentation, SharedPresentation, Surface};
pub use timer::Deadline;

pub struct Viewer<S> {
    surface: S,
    photos: LoadState,
    state: ViewerState,
    overlay: Overlay,
    thumbnail_index: usize,
    placeholder: String,
    close_delay: Duration,
    idle_hide: Duration,
    close_timer: Deadline,
    idle_timer: Deadline,
    controls_hidden: bool,
    description_exposed: bool,
}

impl<S: Surface> Viewer<S> {
    pub fn new(surface: S, config: &ViewerConfig) -> Self {
        Self {
            surface,
            photos: LoadState::NotLoaded,
            state: ViewerState::default(),
            overlay: Overlay::Closed,
            thumbnail_index: config.thumbnail_index,
            placeholder: config.placeholder_caption.clone(),
            close_delay: config.close_delay,
            idle_hide: config.idle_hide,
            close_timer: Deadline::default(),
            idle_timer: Deadline::default(),
            controls_hidden: false,
            description_exposed: false,
        }
    }

    pub fn handle(&mut self, input: ViewerInput) {
        match input {
            ViewerInput::PhotoSetLoaded(photos) => self.photo_set_loaded(photos),
            ViewerInput::Click(Target::Thumbnail) => {
                self.open();
            }
            ViewerInput::Click(Target::Mask | Target::Close) | ViewerInput::Key(Key::Escape) => {
                self.close()
            }
            ViewerInput::Click(Target::Previous) | ViewerInput::Key(Key::Left) => {
                self.previous();
            }
            ViewerInput::Click(Target::Next) | ViewerInput::Key(Key::Right) => {
                self.next();
            }
            ViewerInput::PointerMoved => self.pointer_moved(),
            ViewerInput::ImageHover(hovering) => self.image_hovered(hovering),
        }
    }

    /// Consumes the one-time fetch result and binds the thumbnail.
    pub fn photo_set_loaded(&mut self, photos: PhotoSet) {
        if self.photos.is_loaded() {
            warn!("photo set already loaded; ignoring repeat delivery");
            return;
        }
        info!(count = photos.len(), "photo set loaded");
        match photos.get(self.thumbnail_index) {
            Some(item) => self.surface.bind_thumbnail(item),
            None => warn!(
                thumbnail_index = self.thumbnail_index,
                count = photos.len(),
                "no photo for the thumbnail; viewer stays unavailable"
            ),
        }
        self.photos = LoadState::Loaded(photos);
    }

    /// Opening is allowed once the thumbnail has been bound.
    pub fn is_ready(&self) -> bool {
        self.photos
            .photos()
            .is_some_and(|photos| photos.get(self.thumbnail_index).is_some())
    }

    /// Shows the overlay at the first photo. Returns `false` while fetching.
    pub fn open(&mut self) -> bool {
        if !self.is_ready() {
            debug!("open ignored while the photo set is fetching");
            return false;
        }
        self.close_timer.cancel();
        self.render(0);
        self.preload(1);
        self.overlay = Overlay::Open;
        self.surface.set_overlay(Overlay::Open);
        debug!("viewer opened");
        true
    }

    /// Starts the exit transition. Repeating it restarts the close delay.
    pub fn close(&mut self) {
        if self.overlay == Overlay::Closed {
            return;
        }
        self.overlay = Overlay::Closing;
        self.surface.set_overlay(Overlay::Closing);
        self.idle_timer.cancel();
        self.description_exposed = false;
        self.surface.set_description_exposed(false);
        self.close_timer.arm(self.close_delay);
        debug!(delay = ?self.close_delay, "viewer closing");
    }

    /// Close delay elapsed: take the overlay off the interactive layer.
    pub fn finish_close(&mut self) {
        if !self.close_timer.take() {
            return;
        }
        self.overlay = Overlay::Closed;
        self.surface.set_overlay(Overlay::Closed);
        debug!("viewer closed");
    }

    pub fn previous(&mut self) -> bool {
        if self.overlay != Overlay::Open || self.state.previous_disabled() {
            return false;
        }
        let Some(target) = self.state.current_index().checked_sub(1) else {
            return false;
        };
        if !self.render(target) {
            return false;
        }
        if let Some(ahead) = target.checked_sub(1) {
            self.preload(ahead);
        }
        true
    }

    pub fn next(&mut self) -> bool {
        if self.overlay != Overlay::Open || self.state.next_disabled() {
            return false;
        }
        let target = self.state.current_index() + 1;
        if !self.render(target) {
            return false;
        }
        self.preload(target + 1);
        true
    }

    /// Shows photo `index` and commits it as current. Out-of-range indices
    /// and an unloaded set are absorbed.
    pub fn render(&mut self, index: usize) -> bool {
        let Some(photos) = self.photos.photos() else {
            return false;
        };
        let Some(item) = photos.get(index) else {
            trace!(index, count = photos.len(), "render index out of range");
            return false;
        };
        let caption = if item.title.is_empty() {
            self.placeholder.as_str()
        } else {
            item.title.as_str()
        };
        self.surface.show_photo(item, caption);

        let state = ViewerState::at(index, photos.len());
        self.surface
            .set_control_disabled(Control::Previous, state.previous_disabled());
        self.surface
            .set_control_disabled(Control::Next, state.next_disabled());
        self.state = state;
        trace!(index, src = %item.src, "rendered photo");
        true
    }

    /// Warms the cache for photo `index`; a no-op when there is none.
    pub fn preload(&mut self, index: usize) -> bool {
        let Some(item) = self.photos.photos().and_then(|photos| photos.get(index)) else {
            return false;
        };
        trace!(index, src = %item.src, "preloading photo");
        self.surface.preload(&item.src);
        true
    }

    /// Shows the controls and restarts the idle countdown.
    pub fn pointer_moved(&mut self) {
        if self.overlay != Overlay::Open {
            return;
        }
        self.idle_timer.cancel();
        self.controls_hidden = false;
        self.surface.set_controls_hidden(false);
        self.idle_timer.arm(self.idle_hide);
    }

    pub fn hide_idle_controls(&mut self) {
        if !self.idle_timer.take() {
            return;
        }
        self.controls_hidden = true;
        self.surface.set_controls_hidden(true);
    }

    /// Mouse-over only exposes the description while open; mouse-out always
    /// clears it.
    pub fn image_hovered(&mut self, hovering: bool) {
        if hovering && self.overlay != Overlay::Open {
            return;
        }
        self.description_exposed = hovering;
        self.surface.set_description_exposed(hovering);
    }

    pub fn state(&self) -> ViewerState {
        self.state
    }

    pub fn overlay(&self) -> Overlay {
        self.overlay
    }

    pub fn photos(&self) -> Option<&PhotoSet> {
        self.photos.photos()
    }

    pub fn current_photo(&self) -> Option<&PhotoItem> {
        if self.overlay == Overlay::Closed {
            return None;
        }
        self.photos()?.get(self.state.current_index())
    }

    pub fn controls_hidden(&self) -> bool {
        self.controls_hidden
    }

    pub fn description_exposed(&self) -> bool {
        self.description_exposed
    }

    pub fn close_deadline(&self) -> Option<Instant> {
        self.close_timer.at()
    }

    pub fn idle_deadline(&self) -> Option<Instant> {
        self.idle_timer.at()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}
