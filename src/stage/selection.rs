use std::cell::Cell;

/// The application's sole piece of state: which canned animation should
/// currently be playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    None,
    Wave,
    Jump,
}

impl Selection {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Selection::None => "none",
            Selection::Wave => "wave",
            Selection::Jump => "jump",
        }
    }
}

/// Version-counted selection cell.
///
/// Single writer (the control surface's buttons), single reader (the stage
/// host's sync). Every `set` bumps the version, including writes of the
/// value already stored: a repeated button tap re-triggers the host's
/// idempotent sync, matching the source behavior.
#[derive(Debug, Default)]
pub struct SelectionCell {
    selection: Cell<Selection>,
    version: Cell<u64>,
}

impl SelectionCell {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, selection: Selection) {
        self.selection.set(selection);
        self.version.set(self.version.get().wrapping_add(1));
    }

    #[must_use]
    pub fn get(&self) -> Selection {
        self.selection.get()
    }

    /// Monotonic change counter. Observers remember the last version they
    /// acted on and sync when it moves.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version.get()
    }
}
