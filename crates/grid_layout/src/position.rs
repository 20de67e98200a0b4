//! First-fit placement search.
//!
//! Scanning always starts at the origin and proceeds line by line along the
//! packing axis, so identical inputs yield identical positions.

use crate::matrix::{CellState, Matrix};
use common::{Axis, CellPosition, Dimensions, GridSize};

/// Everything the search needs to know about one item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlacementRequest {
    pub size: GridSize,
    pub margin_x: u32,
    pub margin_y: u32,
    pub axis: Axis,
    pub given_x: Option<u32>,
    pub given_y: Option<u32>,
}

impl PlacementRequest {
    pub fn new(size: GridSize, axis: Axis) -> Self {
        Self {
            size,
            margin_x: 0,
            margin_y: 0,
            axis,
            given_x: None,
            given_y: None,
        }
    }

    pub fn with_margins(mut self, margin_x: u32, margin_y: u32) -> Self {
        self.margin_x = margin_x;
        self.margin_y = margin_y;
        self
    }

    pub fn with_hint(mut self, given_x: Option<u32>, given_y: Option<u32>) -> Self {
        self.given_x = given_x;
        self.given_y = given_y;
        self
    }

    fn region(&self, position: CellPosition) -> Dimensions {
        Dimensions::from_position_size(position, self.size)
    }

    fn fits(&self, matrix: &Matrix, position: CellPosition) -> bool {
        matrix.is_region_free(&self.region(position), self.margin_x, self.margin_y)
    }
}

/// A chosen origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    pub position: CellPosition,
    /// Every coordinate the caller supplied was honored.
    pub pinned: bool,
}

impl Placement {
    fn searched(position: CellPosition) -> Self {
        Self {
            position,
            pinned: false,
        }
    }

    fn pinned(position: CellPosition) -> Self {
        Self {
            position,
            pinned: true,
        }
    }
}

/// Find where an item can land in the current matrix.
///
/// A fully pinned position is taken as is when free. Otherwise the matrix is
/// searched; a single pinned coordinate then overrides the matching search
/// coordinate if the mixed position is free. Returns `None` when nothing
/// fits within the matrix bounds.
pub fn find_position(matrix: &Matrix, request: &PlacementRequest) -> Option<Placement> {
    if let (Some(x), Some(y)) = (request.given_x, request.given_y) {
        let given = CellPosition::new(x, y);
        if request.fits(matrix, given) {
            return Some(Placement::pinned(given));
        }
    }

    let found = search(matrix, request)?;

    let mixed = match (request.given_x, request.given_y) {
        (Some(x), None) if x.saturating_add(request.size.width) <= matrix.width() => {
            Some(CellPosition::new(x, found.y))
        }
        (None, Some(y)) if y.saturating_add(request.size.height) <= matrix.height() => {
            Some(CellPosition::new(found.x, y))
        }
        _ => None,
    };

    match mixed {
        Some(position) if request.fits(matrix, position) => Some(Placement::pinned(position)),
        _ => Some(Placement::searched(found)),
    }
}

/// Pure first-fit search, ignoring any hint.
///
/// Items flow along the packing axis first: with `Axis::X` each row is
/// scanned left to right before moving down, with `Axis::Y` each column is
/// scanned top to bottom before moving right.
///
/// The packing axis is sized for every item laid end to end, so unpinned
/// items on `Axis::X` form a strip along the top rows and only wrap below
/// once a row runs out of room; on `Axis::Y` they stack down the first
/// columns. Pin items or use `Axis::Y` for a denser fill of the bounded
/// axis.
pub fn search(matrix: &Matrix, request: &PlacementRequest) -> Option<CellPosition> {
    match request.axis {
        Axis::Y => scan_columns(matrix, request),
        Axis::X => {
            let transposed = PlacementRequest {
                size: request.size.transpose(),
                margin_x: request.margin_y,
                margin_y: request.margin_x,
                axis: Axis::Y,
                given_x: None,
                given_y: None,
            };
            scan_columns(&matrix.transpose(), &transposed).map(|p| p.transpose())
        }
    }
}

/// Walk columns left to right; within a column try each run of free cells
/// tall enough for the item, top to bottom, and accept the first one whose
/// whole footprint is free.
fn scan_columns(matrix: &Matrix, request: &PlacementRequest) -> Option<CellPosition> {
    let size = request.size;
    if size.is_empty() || size.width > matrix.width() || size.height > matrix.height() {
        return None;
    }

    for x in 0..=(matrix.width() - size.width) {
        let column = matrix.column(x);
        let mut start = 0;
        while let Some(y) = fit_length_in_line(column, size.height, start) {
            let position = CellPosition::new(x, y);
            if request.fits(matrix, position) {
                return Some(position);
            }
            start = y + 1;
        }
    }
    None
}

/// Start of the first run of `length` free cells at or after `start`.
fn fit_length_in_line(line: &[CellState], length: u32, start: u32) -> Option<u32> {
    let mut run_start = start;
    let mut count = 0;
    for (i, cell) in line.iter().enumerate().skip(start as usize) {
        if cell.is_free() {
            count += 1;
        } else {
            run_start = i as u32 + 1;
            count = 0;
        }
        if count == length {
            return Some(run_start);
        }
    }
    None
}
