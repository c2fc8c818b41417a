//! The in-memory table of states and variants.
//!
//! This is the only state the application owns: the mutation API derives
//! new snapshots, and the drag translation maps reorder gestures onto it.

mod model;
mod reorder;

pub use model::{ColumnKey, GridError, ImageRef, RowId, StateGrid, StateRow, FIXED_COLUMNS};
pub use reorder::RowDrag;
