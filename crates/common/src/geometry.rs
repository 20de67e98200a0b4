//! Grid geometry primitives.
//!
//! All coordinates and extents are expressed in whole grid cells.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The packing axis.
///
/// Items are scanned along this axis, which is also the one allowed to grow
/// to fit content. The orthogonal axis is bounded by the layout options.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    #[default]
    X,
    Y,
}

impl Axis {
    /// The orthogonal axis.
    #[inline]
    pub fn cross(self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }

    /// Extent of `size` along this axis.
    #[inline]
    pub fn extent(self, size: GridSize) -> u32 {
        match self {
            Axis::X => size.width,
            Axis::Y => size.height,
        }
    }

    /// Pick the component of an `(x, y)` pair lying on this axis.
    #[inline]
    pub fn pick<T>(self, x: T, y: T) -> T {
        match self {
            Axis::X => x,
            Axis::Y => y,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
        }
    }
}

/// A size in grid cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSize {
    pub width: u32,
    pub height: u32,
}

impl GridSize {
    pub const ZERO: GridSize = GridSize { width: 0, height: 0 };

    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Swap width and height.
    #[inline]
    pub fn transpose(&self) -> GridSize {
        GridSize::new(self.height, self.width)
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A cell coordinate, `x` being the column and `y` the row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellPosition {
    pub x: u32,
    pub y: u32,
}

impl CellPosition {
    pub const ORIGIN: CellPosition = CellPosition { x: 0, y: 0 };

    #[inline]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn transpose(&self) -> CellPosition {
        CellPosition::new(self.y, self.x)
    }
}

/// A positioned rectangle of cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    #[inline]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    #[inline]
    pub fn from_position_size(position: CellPosition, size: GridSize) -> Self {
        Self {
            x: position.x,
            y: position.y,
            width: size.width,
            height: size.height,
        }
    }

    #[inline]
    pub fn position(&self) -> CellPosition {
        CellPosition::new(self.x, self.y)
    }

    #[inline]
    pub fn size(&self) -> GridSize {
        GridSize::new(self.width, self.height)
    }

    /// Exclusive right edge.
    #[inline]
    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.width)
    }

    /// Exclusive bottom edge.
    #[inline]
    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.height)
    }

    #[inline]
    pub fn intersects(&self, other: &Dimensions) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    #[inline]
    pub fn contains_cell(&self, cell: CellPosition) -> bool {
        cell.x >= self.x && cell.x < self.right() && cell.y >= self.y && cell.y < self.bottom()
    }

    /// Whether the rectangle lies entirely inside a grid of `size`.
    #[inline]
    pub fn fits_within(&self, size: GridSize) -> bool {
        self.right() <= size.width && self.bottom() <= size.height
    }

    /// The part of the rectangle inside a grid of `size`, if any.
    pub fn clip(&self, size: GridSize) -> Option<Dimensions> {
        if self.x >= size.width || self.y >= size.height {
            return None;
        }
        let clipped = Dimensions::new(
            self.x,
            self.y,
            self.right().min(size.width) - self.x,
            self.bottom().min(size.height) - self.y,
        );
        (!clipped.size().is_empty()).then_some(clipped)
    }

    /// Extent of the rectangle along `axis`, including its offset.
    #[inline]
    pub fn far_edge(&self, axis: Axis) -> u32 {
        axis.pick(self.right(), self.bottom())
    }

    #[inline]
    pub fn transpose(&self) -> Dimensions {
        Dimensions::new(self.y, self.x, self.height, self.width)
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}@({}, {})", self.width, self.height, self.x, self.y)
    }
}
