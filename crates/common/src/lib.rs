//! Common types shared by the grid layout engine and its consumers.

pub mod geometry;
pub mod error;
pub mod units;

pub use geometry::{Axis, CellPosition, Dimensions, GridSize};
pub use error::{GridError, GridResult};
pub use units::{Breakpoint, CellMetrics, CssLength, Px, Viewport};
