//! Pixel and CSS sizing of a computed layout.

use common::{CellMetrics, CssLength, Dimensions, GridSize};
use serde::{Deserialize, Serialize};

/// Rendered size of the whole layout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayoutDimensions {
    pub width: CssLength,
    pub height: CssLength,
}

impl LayoutDimensions {
    pub fn new(matrix_size: GridSize, metrics: &CellMetrics) -> Self {
        Self {
            width: metrics.width(matrix_size.width),
            height: metrics.height(matrix_size.height),
        }
    }
}

/// Absolute placement of one item box.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ItemPlacement {
    pub left: CssLength,
    pub top: CssLength,
    pub width: CssLength,
    pub height: CssLength,
}

impl ItemPlacement {
    pub fn new(dimensions: &Dimensions, metrics: &CellMetrics) -> Self {
        Self {
            left: metrics.left(dimensions.x),
            top: metrics.top(dimensions.y),
            width: metrics.width(dimensions.width),
            height: metrics.height(dimensions.height),
        }
    }

    /// CSS `translate()` moving a box to this placement.
    pub fn css_translate(&self) -> String {
        format!("translate({}, {})", self.left.css, self.top.css)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{Px, Viewport};

    #[test]
    fn test_layout_dimensions() {
        let metrics = Viewport::new(1912.0, 1080.0).metrics();
        let dims = LayoutDimensions::new(GridSize::new(10, 3), &metrics);
        assert_eq!(dims.width.px, Px(10.0 * 88.0 + 9.0 * 12.0));
        assert_eq!(dims.height.px, Px(3.0 * 77.0 + 2.0 * 12.0));
        assert!(dims.width.css.starts_with("calc(((100vw"));
    }

    #[test]
    fn test_adjacent_items_do_not_overlap() {
        let metrics = Viewport::new(1912.0, 1080.0).metrics();
        let a = ItemPlacement::new(&Dimensions::new(0, 0, 5, 3), &metrics);
        let b = ItemPlacement::new(&Dimensions::new(5, 0, 5, 3), &metrics);
        assert!(a.left.px + a.width.px < b.left.px);
        assert_eq!(b.left.px - (a.left.px + a.width.px), Px(metrics.unit));
    }

    #[test]
    fn test_translate() {
        let metrics = Viewport::new(1920.0, 1080.0).metrics();
        let placement = ItemPlacement::new(&Dimensions::new(0, 1, 1, 1), &metrics);
        assert_eq!(
            placement.css_translate(),
            "translate(calc(((100vw - 12px) / 19 - 12px) * 0 + 12px * 0), \
             calc(((var(--app-height) - 12px) / 12 - 12px) * 1 + 12px * 0 + 12px))"
        );
    }
}
