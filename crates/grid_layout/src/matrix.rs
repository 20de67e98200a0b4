//! Occupancy matrix for one pack run.

use common::{Axis, CellPosition, Dimensions, GridError, GridResult, GridSize};
use serde::{Deserialize, Serialize};
use std::fmt;

/// State of a single grid cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CellState {
    #[default]
    Free,
    Occupied,
    PinnedOccupied,
    Margin,
    Reserved,
}

impl CellState {
    /// Free or margin. Margins are soft: two items' margins may overlap.
    #[inline]
    pub fn is_free(self) -> bool {
        matches!(self, CellState::Free | CellState::Margin)
    }

    /// Covered by an item body.
    #[inline]
    pub fn is_item(self) -> bool {
        matches!(self, CellState::Occupied | CellState::PinnedOccupied)
    }

    /// Hard occupancy, which a margin ring never overwrites.
    #[inline]
    pub fn is_hard(self) -> bool {
        matches!(
            self,
            CellState::Occupied | CellState::PinnedOccupied | CellState::Reserved
        )
    }

    fn symbol(self) -> char {
        match self {
            CellState::Free => '.',
            CellState::Occupied => '#',
            CellState::PinnedOccupied => '@',
            CellState::Margin => '+',
            CellState::Reserved => 'x',
        }
    }
}

/// What a fill writes into the inner rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FillKind {
    Occupied,
    Pinned,
    Reserved,
}

impl FillKind {
    #[inline]
    pub fn cell_state(self) -> CellState {
        match self {
            FillKind::Occupied => CellState::Occupied,
            FillKind::Pinned => CellState::PinnedOccupied,
            FillKind::Reserved => CellState::Reserved,
        }
    }
}

/// A rectangular grid of cell states.
///
/// Stored as a single column-major buffer: the cell at column `x`, row `y`
/// lives at `x * height + y`, so a column is a contiguous line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Matrix {
    size: GridSize,
    cells: Vec<CellState>,
}

impl Matrix {
    /// Create a matrix with every cell free.
    pub fn new(size: GridSize) -> GridResult<Self> {
        if size.is_empty() {
            return Err(GridError::invalid_option(format!(
                "matrix size must be positive, got {}",
                size
            )));
        }
        Ok(Self {
            size,
            cells: vec![CellState::Free; size.area()],
        })
    }

    #[inline]
    pub fn size(&self) -> GridSize {
        self.size
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.size.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.size.height
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        x as usize * self.size.height as usize + y as usize
    }

    #[inline]
    fn in_bounds(&self, pos: CellPosition) -> bool {
        pos.x < self.size.width && pos.y < self.size.height
    }

    pub fn get(&self, pos: CellPosition) -> Option<CellState> {
        if !self.in_bounds(pos) {
            return None;
        }
        Some(self.cells[self.index(pos.x, pos.y)])
    }

    /// Whether the cell may receive an item. Out-of-bounds cells never can.
    pub fn is_free_cell(&self, pos: CellPosition) -> bool {
        self.get(pos).map(CellState::is_free).unwrap_or(false)
    }

    /// All rows of column `x`.
    pub fn column(&self, x: u32) -> &[CellState] {
        let start = self.index(x, 0);
        &self.cells[start..start + self.size.height as usize]
    }

    /// Iterate over every cell with its position, column by column.
    pub fn cells(&self) -> impl Iterator<Item = (CellPosition, CellState)> + '_ {
        let height = self.size.height.max(1);
        self.cells.iter().enumerate().map(move |(i, state)| {
            let i = i as u32;
            (CellPosition::new(i / height, i % height), *state)
        })
    }

    /// Cell range of `region` grown by the margins and clamped to bounds.
    fn margin_bounds(&self, region: &Dimensions, margin_x: u32, margin_y: u32) -> (u32, u32, u32, u32) {
        let x0 = region.x.saturating_sub(margin_x);
        let y0 = region.y.saturating_sub(margin_y);
        let x1 = region.right().saturating_add(margin_x).min(self.size.width);
        let y1 = region.bottom().saturating_add(margin_y).min(self.size.height);
        (x0, y0, x1, y1)
    }

    /// Whether an item body could be placed on `region` with the given
    /// margins. The body must lie inside the matrix; the margin ring may hang
    /// over the edges. Every in-bounds cell of the grown rectangle must be
    /// free or margin.
    pub fn is_region_free(&self, region: &Dimensions, margin_x: u32, margin_y: u32) -> bool {
        if region.size().is_empty() || !region.fits_within(self.size) {
            return false;
        }
        let (x0, y0, x1, y1) = self.margin_bounds(region, margin_x, margin_y);
        (x0..x1).all(|x| {
            let column = self.column(x);
            column[y0 as usize..y1 as usize].iter().all(|c| c.is_free())
        })
    }

    /// Mark `region` with `kind` and surround it with a margin ring.
    ///
    /// The ring is clamped to the matrix and never overwrites hard
    /// occupancy. The inner rectangle itself must be in bounds, and an item
    /// body may not land on a hard cell.
    pub fn fill(
        &mut self,
        region: &Dimensions,
        margin_x: u32,
        margin_y: u32,
        kind: FillKind,
    ) -> GridResult<()> {
        if region.size().is_empty() {
            return Err(GridError::invalid_item(format!("cannot fill empty region {}", region)));
        }
        if !region.fits_within(self.size) {
            return Err(GridError::out_of_bounds(format!(
                "region {} exceeds matrix {}",
                region, self.size
            )));
        }

        let state = kind.cell_state();
        if kind != FillKind::Reserved {
            for x in region.x..region.right() {
                let column = self.column(x);
                if column[region.y as usize..region.bottom() as usize]
                    .iter()
                    .any(|c| c.is_hard())
                {
                    return Err(GridError::conflict(format!(
                        "region {} overlaps occupied cells in column {}",
                        region, x
                    )));
                }
            }
        }

        let (x0, y0, x1, y1) = self.margin_bounds(region, margin_x, margin_y);
        for x in x0..x1 {
            for y in y0..y1 {
                let index = self.index(x, y);
                let cell = &mut self.cells[index];
                if region.contains_cell(CellPosition::new(x, y)) {
                    if !cell.is_item() {
                        *cell = state;
                    }
                } else if !cell.is_hard() {
                    *cell = CellState::Margin;
                }
            }
        }
        Ok(())
    }

    /// A copy with rows and columns swapped.
    pub fn transpose(&self) -> Matrix {
        let size = self.size.transpose();
        let mut cells = Vec::with_capacity(self.cells.len());
        for y in 0..self.size.height {
            for x in 0..self.size.width {
                cells.push(self.cells[self.index(x, y)]);
            }
        }
        Matrix { size, cells }
    }

    fn line_has_item(&self, axis: Axis, line: u32) -> bool {
        match axis {
            Axis::X => self.column(line).iter().any(|c| c.is_item()),
            Axis::Y => (0..self.size.width).any(|x| self.cells[self.index(x, line)].is_item()),
        }
    }

    /// Number of lines along `axis` up to and including the last one that
    /// holds an item body.
    pub fn occupied_extent(&self, axis: Axis) -> u32 {
        let lines = axis.extent(self.size);
        (0..lines)
            .rev()
            .find(|&line| self.line_has_item(axis, line))
            .map(|line| line + 1)
            .unwrap_or(0)
    }

    /// Drop trailing lines along `axis` that hold no item body.
    pub fn trim(&mut self, axis: Axis) {
        let extent = self.occupied_extent(axis);
        self.resize_along(axis, extent);
    }

    /// Append `lines` free lines along `axis`.
    pub fn extend(&mut self, axis: Axis, lines: u32) {
        let extent = axis.extent(self.size) + lines;
        self.resize_along(axis, extent);
    }

    fn resize_along(&mut self, axis: Axis, extent: u32) {
        match axis {
            Axis::X => {
                self.size.width = extent;
                self.cells.resize(self.size.area(), CellState::Free);
            }
            Axis::Y => {
                let old_height = self.size.height as usize;
                let new_height = extent as usize;
                let keep = old_height.min(new_height);
                let mut cells = vec![CellState::Free; self.size.width as usize * new_height];
                for x in 0..self.size.width as usize {
                    let from = x * old_height;
                    let to = x * new_height;
                    cells[to..to + keep].copy_from_slice(&self.cells[from..from + keep]);
                }
                self.size.height = extent;
                self.cells = cells;
            }
        }
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.size.height {
            let line: String = (0..self.size.width)
                .map(|x| self.cells[self.index(x, y)].symbol())
                .collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(width: u32, height: u32) -> Matrix {
        Matrix::new(GridSize::new(width, height)).unwrap()
    }

    #[test]
    fn test_create() {
        let m = matrix(4, 3);
        assert_eq!(m.size(), GridSize::new(4, 3));
        assert!(m.cells().all(|(_, c)| c == CellState::Free));
        assert!(Matrix::new(GridSize::new(0, 3)).is_err());
        assert!(Matrix::new(GridSize::new(3, 0)).is_err());
    }

    #[test]
    fn test_rows_are_not_aliased() {
        let mut m = matrix(3, 3);
        m.fill(&Dimensions::new(0, 0, 1, 1), 0, 0, FillKind::Occupied).unwrap();
        assert_eq!(m.get(CellPosition::new(0, 0)), Some(CellState::Occupied));
        assert_eq!(m.get(CellPosition::new(1, 0)), Some(CellState::Free));
        assert_eq!(m.get(CellPosition::new(2, 0)), Some(CellState::Free));
    }

    #[test]
    fn test_fill_with_margin_ring() {
        let mut m = matrix(6, 5);
        m.fill(&Dimensions::new(1, 1, 2, 2), 1, 1, FillKind::Pinned).unwrap();

        assert_eq!(m.get(CellPosition::new(1, 1)), Some(CellState::PinnedOccupied));
        assert_eq!(m.get(CellPosition::new(2, 2)), Some(CellState::PinnedOccupied));
        assert_eq!(m.get(CellPosition::new(0, 0)), Some(CellState::Margin));
        assert_eq!(m.get(CellPosition::new(3, 3)), Some(CellState::Margin));
        assert_eq!(m.get(CellPosition::new(4, 1)), Some(CellState::Free));
    }

    #[test]
    fn test_fill_clamps_margin_at_edges() {
        let mut m = matrix(5, 3);
        m.fill(&Dimensions::new(0, 0, 5, 3), 2, 2, FillKind::Occupied).unwrap();
        assert!(m.cells().all(|(_, c)| c == CellState::Occupied));
    }

    #[test]
    fn test_margin_never_overwrites_hard_cells() {
        let mut m = matrix(6, 2);
        m.fill(&Dimensions::new(0, 0, 2, 2), 0, 0, FillKind::Reserved).unwrap();
        m.fill(&Dimensions::new(2, 0, 2, 2), 1, 0, FillKind::Occupied).unwrap();

        assert_eq!(m.get(CellPosition::new(1, 0)), Some(CellState::Reserved));
        assert_eq!(m.get(CellPosition::new(4, 1)), Some(CellState::Margin));
    }

    #[test]
    fn test_fill_rejects_out_of_bounds_and_overlap() {
        let mut m = matrix(5, 3);
        let err = m.fill(&Dimensions::new(3, 0, 3, 1), 0, 0, FillKind::Occupied);
        assert!(matches!(err, Err(GridError::OutOfBounds(_))));

        m.fill(&Dimensions::new(0, 0, 2, 2), 0, 0, FillKind::Occupied).unwrap();
        let err = m.fill(&Dimensions::new(1, 1, 2, 2), 0, 0, FillKind::Occupied);
        assert!(matches!(err, Err(GridError::Conflict(_))));
    }

    #[test]
    fn test_margin_counts_as_free() {
        let mut m = matrix(8, 2);
        m.fill(&Dimensions::new(0, 0, 2, 2), 1, 0, FillKind::Occupied).unwrap();

        assert!(m.is_free_cell(CellPosition::new(2, 0)));
        assert!(!m.is_free_cell(CellPosition::new(1, 0)));
        assert!(!m.is_free_cell(CellPosition::new(8, 0)));

        // Margin rings may overlap, bodies may not.
        assert!(m.is_region_free(&Dimensions::new(3, 0, 2, 2), 1, 0));
        assert!(!m.is_region_free(&Dimensions::new(2, 0, 2, 2), 1, 0));
    }

    #[test]
    fn test_region_free_requires_body_in_bounds() {
        let m = matrix(5, 3);
        assert!(m.is_region_free(&Dimensions::new(0, 0, 5, 3), 1, 1));
        assert!(!m.is_region_free(&Dimensions::new(1, 0, 5, 3), 0, 0));
        assert!(!m.is_region_free(&Dimensions::new(0, 0, 0, 3), 0, 0));
    }

    #[test]
    fn test_transpose() {
        let mut m = matrix(4, 2);
        m.fill(&Dimensions::new(3, 1, 1, 1), 0, 0, FillKind::Occupied).unwrap();
        let t = m.transpose();
        assert_eq!(t.size(), GridSize::new(2, 4));
        assert_eq!(t.get(CellPosition::new(1, 3)), Some(CellState::Occupied));
        assert_eq!(t.transpose(), m);
    }

    #[test]
    fn test_trim_columns() {
        let mut m = matrix(10, 3);
        m.fill(&Dimensions::new(2, 0, 3, 1), 1, 1, FillKind::Occupied).unwrap();
        m.trim(Axis::X);
        assert_eq!(m.size(), GridSize::new(5, 3));
        assert_eq!(m.get(CellPosition::new(4, 0)), Some(CellState::Occupied));
    }

    #[test]
    fn test_trim_rows() {
        let mut m = matrix(3, 10);
        m.fill(&Dimensions::new(0, 4, 2, 2), 0, 1, FillKind::Occupied).unwrap();
        m.fill(&Dimensions::new(0, 8, 3, 2), 0, 0, FillKind::Reserved).unwrap();
        m.trim(Axis::Y);
        assert_eq!(m.size(), GridSize::new(3, 6));
        assert_eq!(m.get(CellPosition::new(1, 5)), Some(CellState::Occupied));
        assert_eq!(m.get(CellPosition::new(2, 5)), Some(CellState::Free));
    }

    #[test]
    fn test_trim_empty_matrix() {
        let mut m = matrix(4, 4);
        m.trim(Axis::X);
        assert_eq!(m.size(), GridSize::new(0, 4));
        assert_eq!(m.occupied_extent(Axis::X), 0);
    }

    #[test]
    fn test_extend() {
        let mut m = matrix(2, 2);
        m.fill(&Dimensions::new(0, 0, 2, 2), 0, 0, FillKind::Occupied).unwrap();
        m.extend(Axis::Y, 1);
        assert_eq!(m.size(), GridSize::new(2, 3));
        assert_eq!(m.get(CellPosition::new(1, 1)), Some(CellState::Occupied));
        assert_eq!(m.get(CellPosition::new(1, 2)), Some(CellState::Free));
    }

    #[test]
    fn test_display() {
        let mut m = matrix(3, 2);
        m.fill(&Dimensions::new(0, 0, 1, 1), 1, 0, FillKind::Pinned).unwrap();
        assert_eq!(m.to_string(), "@+.\n...\n");
    }
}
