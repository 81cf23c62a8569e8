use photo_model::PhotoSet;

/// Navigation state. Only ever built through [`ViewerState::at`], so the
/// boundary flags always agree with the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewerState {
    current_index: usize,
    previous_disabled: bool,
    next_disabled: bool,
}

impl ViewerState {
    /// State after rendering `index` out of `len` photos.
    pub fn at(index: usize, len: usize) -> Self {
        Self {
            current_index: index,
            previous_disabled: index == 0,
            next_disabled: index + 1 >= len,
        }
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn previous_disabled(&self) -> bool {
        self.previous_disabled
    }

    pub fn next_disabled(&self) -> bool {
        self.next_disabled
    }
}

/// The photo set is fetched once and then never changes.
#[derive(Debug, Clone, Default)]
pub enum LoadState {
    #[default]
    NotLoaded,
    Loaded(PhotoSet),
}

impl LoadState {
    pub fn photos(&self) -> Option<&PhotoSet> {
        match self {
            LoadState::NotLoaded => None,
            LoadState::Loaded(photos) => Some(photos),
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadState::Loaded(_))
    }
}
