//! Translation between a row-drag gesture and a grid reorder.
//!
//! The view reports what the user did with the grabbed row; this layer
//! turns that into a [`StateGrid`] transformation. A gesture without a
//! destination (the grab was aborted) leaves the grid unchanged.

use super::model::{GridError, StateGrid};

/// The outcome of a row-drag gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowDrag {
    /// Display position the row was grabbed from.
    pub source: usize,
    /// Display position it was dropped at, or `None` when the gesture was
    /// aborted without a valid drop target.
    pub destination: Option<usize>,
}

impl RowDrag {
    /// A gesture that dropped the row at `destination`.
    pub fn dropped(source: usize, destination: usize) -> Self {
        Self {
            source,
            destination: Some(destination),
        }
    }

    /// A gesture that was aborted before a drop.
    pub fn aborted(source: usize) -> Self {
        Self {
            source,
            destination: None,
        }
    }
}

impl StateGrid {
    /// Apply a row-drag gesture.
    ///
    /// An absent destination is a no-op, not an error; a present one uses
    /// remove-then-insert reorder semantics and rejects out-of-range
    /// indices like [`StateGrid::reorder_rows`].
    pub fn apply_drag(&self, drag: RowDrag) -> Result<StateGrid, GridError> {
        match drag.destination {
            Some(destination) => self.reorder_rows(drag.source, destination),
            None => Ok(self.clone()),
        }
    }
}
