//! The viewer's view of its markup. A [`Surface`] is the set of named UI
//! regions resolved once at construction; [`Presentation`] is the plain value
//! implementation used by the headless driver and the tests.

use std::sync::Arc;

use parking_lot::Mutex;
use photo_model::PhotoItem;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Overlay {
    #[default]
    Closed,
    Open,
    /// Exit transition running; still on the interactive layer.
    Closing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Previous,
    Next,
}

/// Elements of the markup contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Element {
    Viewer,
    Mask,
    Image,
    Previous,
    Next,
    Description,
    Controls,
    Close,
    Thumbnail,
}

impl Element {
    pub const ALL: [Element; 9] = [
        Element::Thumbnail,
        Element::Viewer,
        Element::Mask,
        Element::Image,
        Element::Previous,
        Element::Next,
        Element::Description,
        Element::Controls,
        Element::Close,
    ];

    /// CSS selector the element is looked up by. The thumbnail is handed to
    /// the viewer directly and has none.
    pub fn selector(self) -> Option<&'static str> {
        match self {
            Element::Viewer => Some("#slackin-viewer"),
            Element::Mask => Some(".mask"),
            Element::Image => Some(".image"),
            Element::Previous => Some(".previous"),
            Element::Next => Some(".next"),
            Element::Description => Some(".description"),
            Element::Controls => Some(".controls"),
            Element::Close => Some(".close"),
            Element::Thumbnail => None,
        }
    }
}

pub trait Surface {
    /// Fills the thumbnail trigger and clears its fetching marker.
    fn bind_thumbnail(&mut self, item: &PhotoItem);
    fn show_photo(&mut self, item: &PhotoItem, caption: &str);
    fn set_control_disabled(&mut self, control: Control, disabled: bool);
    fn set_overlay(&mut self, overlay: Overlay);
    fn set_controls_hidden(&mut self, hidden: bool);
    fn set_description_exposed(&mut self, exposed: bool);
    /// Warms the image cache with an off-screen load.
    fn preload(&mut self, src: &str);
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImageRegion {
    pub src: Option<String>,
    pub alt: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Presentation {
    pub thumbnail: ImageRegion,
    pub fetching: bool,
    pub overlay: Overlay,
    pub image: ImageRegion,
    pub description: String,
    pub description_exposed: bool,
    pub previous_disabled: bool,
    pub next_disabled: bool,
    pub controls_hidden: bool,
    pub preloaded: Option<String>,
}

impl Default for Presentation {
    fn default() -> Self {
        Self {
            thumbnail: ImageRegion::default(),
            fetching: true,
            overlay: Overlay::Closed,
            image: ImageRegion::default(),
            description: String::new(),
            description_exposed: false,
            previous_disabled: false,
            next_disabled: false,
            controls_hidden: false,
            preloaded: None,
        }
    }
}

impl Presentation {
    /// Selector and state classes of every element that currently carries
    /// at least one class. The thumbnail is reported as `thumbnail`.
    pub fn class_summary(&self) -> Vec<(&'static str, Vec<&'static str>)> {
        Element::ALL
            .into_iter()
            .map(|element| (element.selector().unwrap_or("thumbnail"), self.classes(element)))
            .filter(|(_, classes)| !classes.is_empty())
            .collect()
    }

    /// State classes the element would carry in the markup.
    pub fn classes(&self, element: Element) -> Vec<&'static str> {
        let mut classes = Vec::new();
        match element {
            Element::Viewer => match self.overlay {
                Overlay::Closed => {}
                Overlay::Open => classes.push("active"),
                Overlay::Closing => classes.extend(["active", "stealth"]),
            },
            Element::Previous if self.previous_disabled => classes.push("disabled"),
            Element::Next if self.next_disabled => classes.push("disabled"),
            Element::Description if self.description_exposed => classes.push("exposed"),
            Element::Controls if self.controls_hidden => classes.push("stealth"),
            Element::Thumbnail if self.fetching => classes.push("fetching"),
            _ => {}
        }
        classes
    }
}

impl Surface for Presentation {
    fn bind_thumbnail(&mut self, item: &PhotoItem) {
        self.thumbnail = ImageRegion {
            src: Some(item.src.clone()),
            alt: Some(item.title.clone()),
        };
        self.fetching = false;
    }

    fn show_photo(&mut self, item: &PhotoItem, caption: &str) {
        self.image = ImageRegion {
            src: Some(item.src.clone()),
            alt: Some(item.title.clone()),
        };
        self.description = caption.to_string();
    }

    fn set_control_disabled(&mut self, control: Control, disabled: bool) {
        match control {
            Control::Previous => self.previous_disabled = disabled,
            Control::Next => self.next_disabled = disabled,
        }
    }

    fn set_overlay(&mut self, overlay: Overlay) {
        self.overlay = overlay;
    }

    fn set_controls_hidden(&mut self, hidden: bool) {
        self.controls_hidden = hidden;
    }

    fn set_description_exposed(&mut self, exposed: bool) {
        self.description_exposed = exposed;
    }

    fn preload(&mut self, src: &str) {
        self.preloaded = Some(src.to_string());
    }
}

/// Cloneable handle onto a [`Presentation`] so a driver can watch a viewer
/// that runs on another task.
#[derive(Debug, Clone, Default)]
pub struct SharedPresentation(Arc<Mutex<Presentation>>);

impl SharedPresentation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Presentation {
        self.0.lock().clone()
    }
}

impl Surface for SharedPresentation {
    fn bind_thumbnail(&mut self, item: &PhotoItem) {
        self.0.lock().bind_thumbnail(item);
    }

    fn show_photo(&mut self, item: &PhotoItem, caption: &str) {
        self.0.lock().show_photo(item, caption);
    }

    fn set_control_disabled(&mut self, control: Control, disabled: bool) {
        self.0.lock().set_control_disabled(control, disabled);
    }

    fn set_overlay(&mut self, overlay: Overlay) {
        self.0.lock().set_overlay(overlay);
    }

    fn set_controls_hidden(&mut self, hidden: bool) {
        self.0.lock().set_controls_hidden(hidden);
    }

    fn set_description_exposed(&mut self, exposed: bool) {
        self.0.lock().set_description_exposed(exposed);
    }

    fn preload(&mut self, src: &str) {
        self.0.lock().preload(src);
    }
}
