pub mod client;
pub mod config;
pub mod error;
pub mod events;
pub mod logging;
pub mod source;
pub mod viewer;
pub mod web;
pub mod tasks {
    pub mod fetch;
    pub mod viewer;
}

pub use photo_model::{PhotoItem, PhotoSet};
