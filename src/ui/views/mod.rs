//! Application views (screens).

mod grid;

pub use grid::{GridAction, GridView};
