use photo_model::PhotoSet;

/// Clickable regions of the viewer markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Thumbnail,
    Mask,
    Close,
    Previous,
    Next,
}

/// Keyboard shortcuts. Listened for globally, not only while the overlay
/// has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Left,
    Right,
}

impl Key {
    pub const ESCAPE_CODE: u32 = 27;
    pub const LEFT_CODE: u32 = 37;
    pub const RIGHT_CODE: u32 = 39;

    /// Maps a browser `keyCode`; every other key is ignored.
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            Self::ESCAPE_CODE => Some(Self::Escape),
            Self::LEFT_CODE => Some(Self::Left),
            Self::RIGHT_CODE => Some(Self::Right),
            _ => None,
        }
    }
}

/// Everything that can drive a viewer: user input plus the one-time photo
/// set delivery.
#[derive(Debug, Clone)]
pub enum ViewerInput {
    Click(Target),
    Key(Key),
    PointerMoved,
    /// `true` on mouse-over of the main image, `false` on mouse-out.
    ImageHover(bool),
    PhotoSetLoaded(PhotoSet),
}

impl ViewerInput {
    /// Parses one command of the line-oriented `view` driver.
    pub fn from_command(line: &str) -> Option<Self> {
        let input = match line.trim().to_ascii_lowercase().as_str() {
            "open" | "thumbnail" => Self::Click(Target::Thumbnail),
            "close" => Self::Click(Target::Close),
            "mask" => Self::Click(Target::Mask),
            "prev" | "previous" => Self::Click(Target::Previous),
            "next" => Self::Click(Target::Next),
            "left" => Self::Key(Key::Left),
            "right" => Self::Key(Key::Right),
            "esc" | "escape" => Self::Key(Key::Escape),
            "move" => Self::PointerMoved,
            "hover" => Self::ImageHover(true),
            "leave" => Self::ImageHover(false),
            other => {
                let code = other.strip_prefix("key ")?.trim().parse().ok()?;
                Self::Key(Key::from_code(code)?)
            }
        };
        Some(input)
    }
}
