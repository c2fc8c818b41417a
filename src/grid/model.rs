//! The table data model: states (rows), variants (columns), and cells.
//!
//! Every mutation derives a new [`StateGrid`] from the current one instead
//! of writing fields in place. The view layer always holds a consistent
//! snapshot, and the mutation rules are testable without any rendering.

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;
use tracing::debug;

/// The first variant number handed out for user-added columns.
///
/// The fixed layout ends at Variant 3, so dynamic columns count up from 4.
const FIRST_DYNAMIC_VARIANT: u32 = 4;

/// Identifier for a state row.
///
/// Ids are allocated from a monotonic counter owned by the grid and stay
/// stable across reorders. An id is never reused, even after its row is
/// deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(u64);

impl RowId {
    /// The raw id value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An opaque image reference: a file name, path, or URL.
///
/// The grid never interprets the contents; resolution happens at the
/// edges (the picker catalog and the external viewer).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageRef(String);

impl ImageRef {
    /// Create an image reference from any string-like value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The raw reference value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// A short name suitable for a table cell: the final path component.
    pub fn display_name(&self) -> &str {
        self.0
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(self.0.as_str())
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ImageRef {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// A column that can hold images.
///
/// `Primary`, `Variant(2)`, and `Variant(3)` are the fixed columns; every
/// `Variant(n)` with `n >= 4` is dynamic (user-added, deletable). The
/// leading "Product Filter" descriptor column never holds a cell and is
/// handled entirely by the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKey {
    /// The primary variant column.
    Primary,
    /// A numbered variant column.
    Variant(u32),
}

/// The fixed image columns, in display order.
pub const FIXED_COLUMNS: [ColumnKey; 3] = [
    ColumnKey::Primary,
    ColumnKey::Variant(2),
    ColumnKey::Variant(3),
];

impl ColumnKey {
    /// Whether this column is part of the fixed layout.
    pub fn is_fixed(&self) -> bool {
        match self {
            ColumnKey::Primary => true,
            ColumnKey::Variant(n) => *n < FIRST_DYNAMIC_VARIANT,
        }
    }

    /// Whether this column is user-added (and therefore deletable).
    pub fn is_dynamic(&self) -> bool {
        !self.is_fixed()
    }

    /// The header label, e.g. "Primary Variant" or "Variant 4".
    pub fn label(&self) -> String {
        match self {
            ColumnKey::Primary => "Primary Variant".to_string(),
            ColumnKey::Variant(n) => format!("Variant {}", n),
        }
    }

    /// The stable lowercase key, e.g. "primary" or "variant4".
    pub fn key(&self) -> String {
        match self {
            ColumnKey::Primary => "primary".to_string(),
            ColumnKey::Variant(n) => format!("variant{}", n),
        }
    }
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// One editable row of the table: a stable id plus its cell contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateRow {
    id: RowId,
    cells: HashMap<ColumnKey, ImageRef>,
}

impl StateRow {
    fn new(id: RowId) -> Self {
        Self {
            id,
            cells: HashMap::new(),
        }
    }

    /// The row's stable identifier.
    pub fn id(&self) -> RowId {
        self.id
    }

    /// The image assigned to the given column, if any.
    pub fn cell(&self, key: ColumnKey) -> Option<&ImageRef> {
        self.cells.get(&key)
    }

    /// The cell contents, for comparisons in tests and diffing.
    pub fn cells(&self) -> &HashMap<ColumnKey, ImageRef> {
        &self.cells
    }
}

/// Error from a grid mutation.
///
/// Only rejected reorder indices surface as errors; every other mutation
/// treats a missing target as a no-op so a UI session never aborts
/// mid-interaction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    /// A reorder index fell outside the current row sequence.
    #[error("row index {index} out of range for {len} rows")]
    RowIndexOutOfRange { index: usize, len: usize },
}

/// The table of states and variants.
///
/// Row order is display order. Both counters are monotonic: a row id or a
/// dynamic variant number is never handed out twice, even after deletions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateGrid {
    rows: Vec<StateRow>,
    dynamic: Vec<ColumnKey>,
    next_row: u64,
    next_variant: u32,
}

impl StateGrid {
    /// Create a grid with the given number of empty rows and no dynamic
    /// columns.
    pub fn new(row_count: usize) -> Self {
        let rows = (0..row_count)
            .map(|n| StateRow::new(RowId(n as u64 + 1)))
            .collect();
        Self {
            rows,
            dynamic: Vec::new(),
            next_row: row_count as u64 + 1,
            next_variant: FIRST_DYNAMIC_VARIANT,
        }
    }

    /// The default launch grid: five sample rows with images in the fixed
    /// columns and one empty dynamic column, Variant 4.
    pub fn seeded() -> Self {
        let mut grid = Self::new(5);
        for (index, row) in grid.rows.iter_mut().enumerate() {
            // Alternate the two sample image sets across rows.
            let images: [&str; 3] = if index % 2 == 0 {
                ["img1.jpg", "img2.jpg", "img3.jpg"]
            } else {
                ["img4.jpg", "img5.jpg", "img6.jpg"]
            };
            for (key, image) in FIXED_COLUMNS.iter().zip(images) {
                row.cells.insert(*key, ImageRef::new(image));
            }
        }
        grid.dynamic.push(ColumnKey::Variant(FIRST_DYNAMIC_VARIANT));
        grid.next_variant = FIRST_DYNAMIC_VARIANT + 1;
        grid
    }

    // ========================================================================
    // Mutations: each derives a new grid from the current snapshot
    // ========================================================================

    /// Append a new empty row with a fresh id.
    pub fn add_row(&self) -> StateGrid {
        let mut next = self.clone();
        next.rows.push(StateRow::new(RowId(next.next_row)));
        next.next_row += 1;
        next
    }

    /// Append a new dynamic column with a fresh variant number.
    ///
    /// Existing rows read as empty for the new column until populated.
    pub fn add_column(&self) -> StateGrid {
        let mut next = self.clone();
        next.dynamic.push(ColumnKey::Variant(next.next_variant));
        next.next_variant += 1;
        next
    }

    /// Remove the row with the given id, keeping the remaining order.
    ///
    /// A missing id is a no-op.
    pub fn delete_row(&self, id: RowId) -> StateGrid {
        if !self.contains_row(id) {
            debug!(row = %id, "delete_row: no such row");
            return self.clone();
        }
        let mut next = self.clone();
        next.rows.retain(|row| row.id != id);
        next
    }

    /// Remove a dynamic column and its cell in every row.
    ///
    /// A fixed or non-live key is a no-op.
    pub fn delete_column(&self, key: ColumnKey) -> StateGrid {
        if !self.dynamic.contains(&key) {
            debug!(column = %key, "delete_column: not a live dynamic column");
            return self.clone();
        }
        let mut next = self.clone();
        next.dynamic.retain(|live| *live != key);
        for row in &mut next.rows {
            row.cells.remove(&key);
        }
        next
    }

    /// Move the row at `from` to `to`, shifting the rows in between.
    ///
    /// Remove-then-insert semantics, not a swap. `from == to` is a no-op.
    /// Out-of-range indices are rejected with the grid unchanged rather
    /// than clamped.
    pub fn reorder_rows(&self, from: usize, to: usize) -> Result<StateGrid, GridError> {
        let len = self.rows.len();
        if from >= len {
            return Err(GridError::RowIndexOutOfRange { index: from, len });
        }
        if to >= len {
            return Err(GridError::RowIndexOutOfRange { index: to, len });
        }
        let mut next = self.clone();
        if from != to {
            let row = next.rows.remove(from);
            next.rows.insert(to, row);
        }
        Ok(next)
    }

    /// Set or clear the cell at (`id`, `key`).
    ///
    /// Last write wins. A missing row, or a key that is neither fixed nor
    /// a live dynamic column, is a no-op.
    pub fn set_cell(&self, id: RowId, key: ColumnKey, image: Option<ImageRef>) -> StateGrid {
        if !self.is_live_column(key) {
            debug!(column = %key, "set_cell: no such column");
            return self.clone();
        }
        let Some(position) = self.rows.iter().position(|row| row.id == id) else {
            debug!(row = %id, "set_cell: no such row");
            return self.clone();
        };
        let mut next = self.clone();
        match image {
            Some(image) => {
                next.rows[position].cells.insert(key, image);
            }
            None => {
                next.rows[position].cells.remove(&key);
            }
        }
        next
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// The rows in display order.
    pub fn rows(&self) -> &[StateRow] {
        &self.rows
    }

    /// The row with the given id.
    pub fn row(&self, id: RowId) -> Option<&StateRow> {
        self.rows.iter().find(|row| row.id == id)
    }

    /// The row at the given display position.
    pub fn row_at(&self, index: usize) -> Option<&StateRow> {
        self.rows.get(index)
    }

    /// The image at (`id`, `key`), if the row exists and the cell is set.
    pub fn cell(&self, id: RowId, key: ColumnKey) -> Option<&ImageRef> {
        self.row(id).and_then(|row| row.cell(key))
    }

    /// Whether a row with the given id exists.
    pub fn contains_row(&self, id: RowId) -> bool {
        self.rows.iter().any(|row| row.id == id)
    }

    /// The number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Whether the grid has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The live dynamic columns, in display order.
    pub fn dynamic_columns(&self) -> &[ColumnKey] {
        &self.dynamic
    }

    /// All image columns in display order: fixed first, then dynamic.
    pub fn columns(&self) -> impl Iterator<Item = ColumnKey> + '_ {
        FIXED_COLUMNS.iter().copied().chain(self.dynamic.iter().copied())
    }

    /// The number of image columns, fixed plus dynamic.
    pub fn column_count(&self) -> usize {
        FIXED_COLUMNS.len() + self.dynamic.len()
    }

    /// Whether the key addresses a fixed column or a live dynamic one.
    fn is_live_column(&self, key: ColumnKey) -> bool {
        key.is_fixed() || self.dynamic.contains(&key)
    }
}

impl Default for StateGrid {
    fn default() -> Self {
        Self::seeded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn img(name: &str) -> ImageRef {
        ImageRef::new(name)
    }

    #[test]
    fn test_new_grid() {
        let grid = StateGrid::new(5);
        assert_eq!(grid.row_count(), 5);
        assert!(grid.dynamic_columns().is_empty());
        assert_eq!(grid.column_count(), 3);
    }

    #[test]
    fn test_new_grid_ids_unique() {
        let grid = StateGrid::new(5);
        let mut ids: Vec<u64> = grid.rows().iter().map(|r| r.id().value()).collect();
        ids.dedup();
        assert_eq!(ids.len(), 5);
    }

    #[test]
    fn test_seeded_grid() {
        let grid = StateGrid::seeded();
        assert_eq!(grid.row_count(), 5);
        assert_eq!(grid.dynamic_columns(), &[ColumnKey::Variant(4)]);

        let first = grid.rows()[0].id();
        assert_eq!(grid.cell(first, ColumnKey::Primary), Some(&img("img1.jpg")));
        assert_eq!(
            grid.cell(first, ColumnKey::Variant(2)),
            Some(&img("img2.jpg"))
        );

        let second = grid.rows()[1].id();
        assert_eq!(
            grid.cell(second, ColumnKey::Primary),
            Some(&img("img4.jpg"))
        );

        // The dynamic column starts empty for every row.
        for row in grid.rows() {
            assert_eq!(row.cell(ColumnKey::Variant(4)), None);
        }
    }

    #[test]
    fn test_add_row_appends_with_fresh_id() {
        let grid = StateGrid::new(2);
        let next = grid.add_row();

        assert_eq!(next.row_count(), 3);
        let new_row = &next.rows()[2];
        assert!(new_row.cells().is_empty());
        assert!(!grid.contains_row(new_row.id()));
    }

    #[test]
    fn test_add_row_leaves_original_untouched() {
        let grid = StateGrid::new(2);
        let _ = grid.add_row();
        assert_eq!(grid.row_count(), 2);
    }

    #[test]
    fn test_add_then_delete_row_round_trips() {
        let grid = StateGrid::seeded();
        let added = grid.add_row();
        let new_id = added.rows().last().unwrap().id();

        let restored = added.delete_row(new_id);
        assert_eq!(restored.rows(), grid.rows());
    }

    #[test]
    fn test_row_ids_not_reused_after_delete() {
        let grid = StateGrid::new(3);
        let last = grid.rows()[2].id();
        let next = grid.delete_row(last).add_row();
        assert_ne!(next.rows().last().unwrap().id(), last);
    }

    #[test]
    fn test_delete_row_missing_is_noop() {
        let grid = StateGrid::new(3);
        let next = grid.delete_row(RowId(999));
        assert_eq!(next.rows(), grid.rows());
    }

    #[test]
    fn test_delete_row_preserves_order() {
        let grid = StateGrid::new(4);
        let second = grid.rows()[1].id();
        let next = grid.delete_row(second);

        let expected: Vec<RowId> = grid
            .rows()
            .iter()
            .map(|r| r.id())
            .filter(|id| *id != second)
            .collect();
        let actual: Vec<RowId> = next.rows().iter().map(|r| r.id()).collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_add_column_generates_variant4_first() {
        let grid = StateGrid::new(5);
        let next = grid.add_column();

        let keys: Vec<String> = next.dynamic_columns().iter().map(|c| c.key()).collect();
        assert_eq!(keys, vec!["variant4"]);
    }

    #[test]
    fn test_add_column_does_not_touch_rows() {
        let grid = StateGrid::seeded();
        let next = grid.add_column();
        assert_eq!(next.rows(), grid.rows());

        let new_key = *next.dynamic_columns().last().unwrap();
        for row in next.rows() {
            assert_eq!(row.cell(new_key), None);
        }
    }

    #[test]
    fn test_add_then_delete_column_round_trips() {
        let grid = StateGrid::seeded();
        let added = grid.add_column();
        let new_key = *added.dynamic_columns().last().unwrap();

        let restored = added.delete_column(new_key);
        assert_eq!(restored.rows(), grid.rows());
        assert_eq!(restored.dynamic_columns(), grid.dynamic_columns());
    }

    #[test]
    fn test_column_keys_not_reused_after_delete() {
        // Interleaved add/delete must keep generating fresh numbers; the
        // length-derived naming this replaces could collide here.
        let grid = StateGrid::new(1).add_column().add_column();
        assert_eq!(grid.dynamic_columns().len(), 2);

        let first = grid.dynamic_columns()[0];
        let next = grid.delete_column(first).add_column();

        let keys: Vec<String> = next.dynamic_columns().iter().map(|c| c.key()).collect();
        assert_eq!(keys, vec!["variant5", "variant6"]);
    }

    #[test]
    fn test_delete_column_cascades_to_all_rows() {
        let mut grid = StateGrid::seeded();
        let key = ColumnKey::Variant(4);
        for id in grid.rows().iter().map(|r| r.id()).collect::<Vec<_>>() {
            grid = grid.set_cell(id, key, Some(img("x.png")));
        }
        for row in grid.rows() {
            assert!(row.cell(key).is_some());
        }

        let next = grid.delete_column(key);
        assert!(next.dynamic_columns().is_empty());
        for row in next.rows() {
            assert_eq!(row.cell(key), None);
        }
    }

    #[test]
    fn test_delete_column_fixed_is_noop() {
        let grid = StateGrid::seeded();
        let next = grid.delete_column(ColumnKey::Primary);
        assert_eq!(next.rows(), grid.rows());
        assert_eq!(next.dynamic_columns(), grid.dynamic_columns());
    }

    #[test]
    fn test_delete_column_dead_key_is_noop() {
        let grid = StateGrid::seeded();
        let next = grid.delete_column(ColumnKey::Variant(9));
        assert_eq!(next.dynamic_columns(), grid.dynamic_columns());
    }

    #[test]
    fn test_reorder_moves_first_to_last() {
        let grid = StateGrid::new(5);
        let ids: Vec<RowId> = grid.rows().iter().map(|r| r.id()).collect();

        let next = grid.reorder_rows(0, 4).unwrap();
        let moved: Vec<RowId> = next.rows().iter().map(|r| r.id()).collect();

        // The first row lands at the end; the middle rows each shift down.
        assert_eq!(moved, vec![ids[1], ids[2], ids[3], ids[4], ids[0]]);
    }

    #[test]
    fn test_reorder_moves_last_to_first() {
        let grid = StateGrid::new(3);
        let ids: Vec<RowId> = grid.rows().iter().map(|r| r.id()).collect();

        let next = grid.reorder_rows(2, 0).unwrap();
        let moved: Vec<RowId> = next.rows().iter().map(|r| r.id()).collect();
        assert_eq!(moved, vec![ids[2], ids[0], ids[1]]);
    }

    #[test]
    fn test_reorder_preserves_ids_and_length() {
        let grid = StateGrid::new(5);
        for from in 0..5 {
            for to in 0..5 {
                let next = grid.reorder_rows(from, to).unwrap();
                assert_eq!(next.row_count(), 5);

                let mut ids: Vec<RowId> = next.rows().iter().map(|r| r.id()).collect();
                ids.sort();
                let mut expected: Vec<RowId> = grid.rows().iter().map(|r| r.id()).collect();
                expected.sort();
                assert_eq!(ids, expected);
            }
        }
    }

    #[test]
    fn test_reorder_same_index_is_noop() {
        let grid = StateGrid::seeded();
        let next = grid.reorder_rows(2, 2).unwrap();
        assert_eq!(next.rows(), grid.rows());
    }

    #[test]
    fn test_reorder_does_not_mutate_row_content() {
        let grid = StateGrid::seeded();
        let moved_id = grid.rows()[0].id();
        let before = grid.rows()[0].clone();

        let next = grid.reorder_rows(0, 3).unwrap();
        assert_eq!(next.row(moved_id), Some(&before));
    }

    #[test]
    fn test_reorder_out_of_range_rejected() {
        let grid = StateGrid::new(3);

        let err = grid.reorder_rows(3, 0).unwrap_err();
        assert_eq!(err, GridError::RowIndexOutOfRange { index: 3, len: 3 });

        let err = grid.reorder_rows(0, 7).unwrap_err();
        assert_eq!(err, GridError::RowIndexOutOfRange { index: 7, len: 3 });
    }

    #[test]
    fn test_set_cell_then_get() {
        let grid = StateGrid::new(5).add_column();
        let id = grid.rows()[2].id();
        let key = grid.dynamic_columns()[0];

        let next = grid.set_cell(id, key, Some(img("img7")));
        assert_eq!(next.cell(id, key), Some(&img("img7")));

        // All other rows still read as empty.
        for row in next.rows().iter().filter(|r| r.id() != id) {
            assert_eq!(row.cell(key), None);
        }
    }

    #[test]
    fn test_set_cell_last_write_wins() {
        let grid = StateGrid::new(2).add_column();
        let id = grid.rows()[0].id();
        let key = grid.dynamic_columns()[0];

        let next = grid
            .set_cell(id, key, Some(img("first.png")))
            .set_cell(id, key, Some(img("second.png")));
        assert_eq!(next.cell(id, key), Some(&img("second.png")));
    }

    #[test]
    fn test_set_cell_clear() {
        let grid = StateGrid::seeded();
        let id = grid.rows()[0].id();

        let next = grid.set_cell(id, ColumnKey::Primary, None);
        assert_eq!(next.cell(id, ColumnKey::Primary), None);

        // Neighbouring cells in the same row are untouched.
        assert_eq!(
            next.cell(id, ColumnKey::Variant(2)),
            grid.cell(id, ColumnKey::Variant(2))
        );
    }

    #[test]
    fn test_set_cell_missing_row_is_noop() {
        let grid = StateGrid::seeded();
        let next = grid.set_cell(RowId(999), ColumnKey::Primary, Some(img("x")));
        assert_eq!(next.rows(), grid.rows());
    }

    #[test]
    fn test_set_cell_dead_column_is_noop() {
        let grid = StateGrid::new(2);
        let id = grid.rows()[0].id();
        let next = grid.set_cell(id, ColumnKey::Variant(4), Some(img("x")));
        assert_eq!(next.rows(), grid.rows());
    }

    #[test]
    fn test_end_to_end_add_column_and_assign() {
        // Five rows, no dynamic columns; the first added column is
        // variant4 and an assignment touches exactly one row.
        let grid = StateGrid::new(5);
        let with_column = grid.add_column();

        let keys: Vec<String> = with_column
            .dynamic_columns()
            .iter()
            .map(|c| c.key())
            .collect();
        assert_eq!(keys, vec!["variant4"]);

        let row3 = with_column.rows()[2].id();
        let key = with_column.dynamic_columns()[0];
        let assigned = with_column.set_cell(row3, key, Some(img("img7")));

        assert_eq!(assigned.cell(row3, key), Some(&img("img7")));
        for row in assigned.rows().iter().filter(|r| r.id() != row3) {
            assert_eq!(row.cell(key), None);
        }
    }

    #[test]
    fn test_columns_iterates_fixed_then_dynamic() {
        let grid = StateGrid::new(1).add_column().add_column();
        let labels: Vec<String> = grid.columns().map(|c| c.label()).collect();
        assert_eq!(
            labels,
            vec![
                "Primary Variant",
                "Variant 2",
                "Variant 3",
                "Variant 4",
                "Variant 5"
            ]
        );
    }

    #[test]
    fn test_column_key_fixed_and_dynamic() {
        assert!(ColumnKey::Primary.is_fixed());
        assert!(ColumnKey::Variant(2).is_fixed());
        assert!(ColumnKey::Variant(3).is_fixed());
        assert!(ColumnKey::Variant(4).is_dynamic());
        assert!(ColumnKey::Variant(17).is_dynamic());
    }

    #[test]
    fn test_image_ref_display_name() {
        assert_eq!(ImageRef::new("img1.jpg").display_name(), "img1.jpg");
        assert_eq!(
            ImageRef::new("/library/shoes/img2.png").display_name(),
            "img2.png"
        );
        assert_eq!(
            ImageRef::new("C:\\library\\img3.png").display_name(),
            "img3.png"
        );
    }

    #[test]
    fn test_grid_error_display() {
        let err = GridError::RowIndexOutOfRange { index: 9, len: 3 };
        assert_eq!(err.to_string(), "row index 9 out of range for 3 rows");
    }
}
