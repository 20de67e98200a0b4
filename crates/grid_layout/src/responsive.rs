//! Rescaling sizes between breakpoint grids.
//!
//! Sizes are authored on the editor grid and rescaled for the grid of the
//! active breakpoint. The rounding function differs per target tier; using
//! another one shows up as overlapping boxes at breakpoint transitions.

use common::{Breakpoint, Dimensions, GridError, GridResult, GridSize};
use serde::{Deserialize, Serialize};

/// A size with an optional origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponsiveSize {
    pub width: u32,
    pub height: u32,
    pub x: Option<u32>,
    pub y: Option<u32>,
}

impl ResponsiveSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            x: None,
            y: None,
        }
    }

    pub const fn at(mut self, x: u32, y: u32) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    /// The positioned rectangle, when both coordinates are known.
    pub fn dimensions(&self) -> Option<Dimensions> {
        match (self.x, self.y) {
            (Some(x), Some(y)) => Some(Dimensions::new(x, y, self.width, self.height)),
            _ => None,
        }
    }
}

impl From<Dimensions> for ResponsiveSize {
    fn from(d: Dimensions) -> Self {
        ResponsiveSize::new(d.width, d.height).at(d.x, d.y)
    }
}

impl From<GridSize> for ResponsiveSize {
    fn from(s: GridSize) -> Self {
        ResponsiveSize::new(s.width, s.height)
    }
}

/// The grid sizes are authored on in the project editor: the default grid
/// minus its two navigation columns.
pub fn editor_grid() -> GridSize {
    GridSize::new(
        Breakpoint::Default.columns() - 2,
        Breakpoint::Default.rows(),
    )
}

/// The grid of a breakpoint.
pub fn breakpoint_grid(breakpoint: Breakpoint) -> GridSize {
    GridSize::new(breakpoint.columns(), breakpoint.rows())
}

/// Rescale `size` from grid `from` to grid `to` (both columns × rows).
///
/// Sizes pass through untouched when both grids share a width. Widths and
/// x coordinates round down on the mobile grid and to nearest elsewhere;
/// a positioned height is corrected by the row ratio before rounding.
pub fn remap(size: ResponsiveSize, from: GridSize, to: GridSize) -> GridResult<ResponsiveSize> {
    if from.is_empty() || to.is_empty() {
        return Err(GridError::invalid_option(format!(
            "cannot remap between grids {} and {}",
            from, to
        )));
    }
    if to.width == from.width {
        return Ok(size);
    }

    let is_mobile = to.width == Breakpoint::Mobile.columns();
    let round_fn: fn(f64) -> f64 = if is_mobile { f64::floor } else { js_round };

    let from_width = from.width as f64;
    let from_height = from.height as f64;
    let to_width = to.width as f64;
    let to_height = to.height as f64;

    let responsive_width = to_width * (size.width as f64 / from_width);
    let responsive_height = from_height * (size.height as f64 / to_height);

    let remapped = match (size.x, size.y) {
        (Some(x), Some(y)) => {
            let width_fn: fn(f64) -> f64 = if is_mobile { js_round } else { f64::floor };
            let height_correction = from_height / to_height;
            ResponsiveSize {
                width: to_cells(width_fn(responsive_width)).max(1),
                height: to_cells(js_round(responsive_height - height_correction)).max(1),
                x: Some(to_cells(round_fn(to_width * (x as f64 / from_width)))),
                y: Some(to_cells((to_width * (y as f64 / from_width)).ceil())),
            }
        }
        _ => ResponsiveSize {
            width: to_cells(round_fn(responsive_width)).max(1),
            height: to_cells(round_fn(responsive_height)).max(1),
            x: None,
            y: None,
        },
    };
    Ok(remapped)
}

/// Rescale a size authored on the editor grid for `breakpoint`.
pub fn remap_for_breakpoint(size: ResponsiveSize, breakpoint: Breakpoint) -> GridResult<ResponsiveSize> {
    remap(size, editor_grid(), breakpoint_grid(breakpoint))
}

/// Round half up, as browsers do.
fn js_round(value: f64) -> f64 {
    (value + 0.5).floor()
}

fn to_cells(value: f64) -> u32 {
    if value <= 0.0 {
        0
    } else {
        value as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_round() {
        assert_eq!(js_round(2.5), 3.0);
        assert_eq!(js_round(2.49), 2.0);
        assert_eq!(js_round(-0.5), 0.0);
    }

    #[test]
    fn test_same_width_is_identity() {
        let size = ResponsiveSize::new(5, 3).at(2, 1);
        assert_eq!(remap(size, editor_grid(), GridSize::new(17, 20)).unwrap(), size);
    }

    #[test]
    fn test_size_only_tablet() {
        // 15 * 5/17 = 4.41 -> 4 ; 12 * 3/14 = 2.57 -> 3
        let size = remap_for_breakpoint(ResponsiveSize::new(5, 3), Breakpoint::Tablet).unwrap();
        assert_eq!(size, ResponsiveSize::new(4, 3));
    }

    #[test]
    fn test_size_only_mobile_floors() {
        // 10 * 9/17 = 5.29 -> 5 ; 12 * 6/17 = 4.24 -> 4
        let size = remap_for_breakpoint(ResponsiveSize::new(9, 6), Breakpoint::Mobile).unwrap();
        assert_eq!(size, ResponsiveSize::new(5, 4));
    }

    #[test]
    fn test_positioned_default() {
        // width: floor(19 * 5/17 = 5.59) = 5
        // height: round(12 * 6/12 - 12/12 = 5) = 5
        // x: round(19 * 8/17 = 8.94) = 9 ; y: ceil(19 * 2/17 = 2.24) = 3
        let size = ResponsiveSize::new(5, 6).at(8, 2);
        let remapped = remap_for_breakpoint(size, Breakpoint::Default).unwrap();
        assert_eq!(remapped, ResponsiveSize::new(5, 5).at(9, 3));
    }

    #[test]
    fn test_positioned_mobile() {
        // width: round(10 * 5/17 = 2.94) = 3
        // height: round(12 * 6/17 - 12/17 = 3.53) = 4
        // x: floor(10 * 8/17 = 4.71) = 4 ; y: ceil(10 * 2/17 = 1.18) = 2
        let size = ResponsiveSize::new(5, 6).at(8, 2);
        let remapped = remap_for_breakpoint(size, Breakpoint::Mobile).unwrap();
        assert_eq!(remapped, ResponsiveSize::new(3, 4).at(4, 2));
    }

    #[test]
    fn test_sizes_never_collapse() {
        let remapped = remap_for_breakpoint(ResponsiveSize::new(1, 1).at(0, 0), Breakpoint::Mobile).unwrap();
        assert_eq!(remapped.width, 1);
        assert_eq!(remapped.height, 1);
    }

    #[test]
    fn test_invalid_grid() {
        let err = remap(ResponsiveSize::new(1, 1), GridSize::ZERO, editor_grid());
        assert!(err.is_err());
    }

    #[test]
    fn test_dimensions_conversion() {
        let size: ResponsiveSize = Dimensions::new(1, 2, 3, 4).into();
        assert_eq!(size.dimensions(), Some(Dimensions::new(1, 2, 3, 4)));
        assert_eq!(ResponsiveSize::new(3, 4).dimensions(), None);
    }
}
