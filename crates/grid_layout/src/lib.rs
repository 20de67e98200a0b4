//! Constrained grid-packing layout engine.
//!
//! Packs rectangular items into a matrix of cells without overlap, honoring
//! pinned positions, margins and reserved regions, then sizes the result in
//! pixels and CSS for a viewport.

pub mod dimensions;
pub mod engine;
pub mod items;
pub mod matrix;
pub mod position;
pub mod responsive;

pub use dimensions::{ItemPlacement, LayoutDimensions};
pub use engine::{generate_grid_layout, GridLayoutData, GridLayoutEngine, GridLayoutOptions, PlacedItem};
pub use items::{normalize, GridItem, ItemId, RawGridItem, DEFAULT_ITEM_SIZE};
pub use matrix::{CellState, FillKind, Matrix};
pub use position::{find_position, Placement, PlacementRequest};
pub use responsive::{remap, remap_for_breakpoint, ResponsiveSize};
