//! Responsive breakpoints and grid-cell unit conversion.
//!
//! Converts integer cell counts into concrete pixel lengths and into CSS
//! `calc()` expressions that compute the same length from live viewport
//! variables, so rendered boxes can follow a resize without a new layout.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// An absolute length in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Px(pub f32);

impl Px {
    pub const ZERO: Px = Px(0.0);
}

impl Add for Px {
    type Output = Px;
    fn add(self, rhs: Px) -> Px {
        Px(self.0 + rhs.0)
    }
}

impl Sub for Px {
    type Output = Px;
    fn sub(self, rhs: Px) -> Px {
        Px(self.0 - rhs.0)
    }
}

impl fmt::Display for Px {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}px", self.0)
    }
}

/// A viewport-size tier driving responsive cell sizing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    Mobile,
    Tablet,
    #[default]
    Default,
}

impl Breakpoint {
    /// Upper bound (inclusive) of the viewport width for this tier.
    pub fn max_width(self) -> f32 {
        match self {
            Breakpoint::Mobile => 700.0,
            Breakpoint::Tablet => 1300.0,
            Breakpoint::Default => 1920.0,
        }
    }

    /// Select the tier for a viewport width.
    pub fn from_width(width: f32) -> Self {
        if width <= Breakpoint::Mobile.max_width() {
            Breakpoint::Mobile
        } else if width <= Breakpoint::Tablet.max_width() {
            Breakpoint::Tablet
        } else {
            Breakpoint::Default
        }
    }

    /// Margin unit between cells, in pixels.
    pub fn unit(self) -> u32 {
        match self {
            Breakpoint::Mobile => 8,
            Breakpoint::Tablet | Breakpoint::Default => 12,
        }
    }

    /// Number of grid columns across the viewport.
    pub fn columns(self) -> u32 {
        match self {
            Breakpoint::Mobile => 10,
            Breakpoint::Tablet => 15,
            Breakpoint::Default => 19,
        }
    }

    /// Number of grid rows down the viewport.
    pub fn rows(self) -> u32 {
        match self {
            Breakpoint::Mobile => 17,
            Breakpoint::Tablet => 14,
            Breakpoint::Default => 12,
        }
    }

    /// Pick the value matching this tier.
    pub fn select<T>(self, mobile: T, tablet: T, default: T) -> T {
        match self {
            Breakpoint::Mobile => mobile,
            Breakpoint::Tablet => tablet,
            Breakpoint::Default => default,
        }
    }
}

impl fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Breakpoint::Mobile => write!(f, "mobile"),
            Breakpoint::Tablet => write!(f, "tablet"),
            Breakpoint::Default => write!(f, "default"),
        }
    }
}

/// Viewport size in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn breakpoint(&self) -> Breakpoint {
        Breakpoint::from_width(self.width)
    }

    /// Cell metrics for the breakpoint this viewport falls into.
    pub fn metrics(&self) -> CellMetrics {
        CellMetrics::new(*self, self.breakpoint())
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1920.0, 1080.0)
    }
}

/// A length known both as resolved pixels and as a live CSS expression.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CssLength {
    pub px: Px,
    pub css: String,
}

/// Concrete cell sizing for one viewport and breakpoint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellMetrics {
    pub breakpoint: Breakpoint,
    pub columns: u32,
    pub rows: u32,
    pub unit: f32,
    pub cell_width: f32,
    pub cell_height: f32,
}

impl CellMetrics {
    pub fn new(viewport: Viewport, breakpoint: Breakpoint) -> Self {
        let columns = breakpoint.columns();
        let rows = breakpoint.rows();
        let unit = breakpoint.unit() as f32;
        Self {
            breakpoint,
            columns,
            rows,
            unit,
            cell_width: (viewport.width - unit) / columns as f32 - unit,
            cell_height: (viewport.height - unit) / rows as f32 - unit,
        }
    }

    /// Pixel width spanned by `cells` columns.
    pub fn width_px(&self, cells: u32) -> Px {
        span_px(cells, self.cell_width, self.unit)
    }

    /// Pixel height spanned by `cells` rows.
    pub fn height_px(&self, cells: u32) -> Px {
        span_px(cells, self.cell_height, self.unit)
    }

    /// Horizontal pixel offset of column `x`.
    pub fn left_px(&self, x: u32) -> Px {
        offset_px(x, self.cell_width, self.unit)
    }

    /// Vertical pixel offset of row `y`.
    pub fn top_px(&self, y: u32) -> Px {
        offset_px(y, self.cell_height, self.unit)
    }

    pub fn css_width(&self, cells: u32, is_position: bool) -> String {
        css_span("100vw", self.columns, self.unit, cells, is_position)
    }

    pub fn css_height(&self, cells: u32, is_position: bool) -> String {
        css_span("var(--app-height)", self.rows, self.unit, cells, is_position)
    }

    pub fn width(&self, cells: u32) -> CssLength {
        CssLength {
            px: self.width_px(cells),
            css: self.css_width(cells, false),
        }
    }

    pub fn height(&self, cells: u32) -> CssLength {
        CssLength {
            px: self.height_px(cells),
            css: self.css_height(cells, false),
        }
    }

    pub fn left(&self, x: u32) -> CssLength {
        CssLength {
            px: self.left_px(x),
            css: self.css_width(x, true),
        }
    }

    pub fn top(&self, y: u32) -> CssLength {
        CssLength {
            px: self.top_px(y),
            css: self.css_height(y, true),
        }
    }
}

fn span_px(cells: u32, cell: f32, unit: f32) -> Px {
    if cells == 0 {
        return Px::ZERO;
    }
    Px(cells as f32 * cell + (cells - 1) as f32 * unit)
}

fn offset_px(cells: u32, cell: f32, unit: f32) -> Px {
    if cells == 0 {
        return Px::ZERO;
    }
    span_px(cells, cell, unit) + Px(unit)
}

fn css_span(extent: &str, tracks: u32, unit: f32, cells: u32, is_position: bool) -> String {
    let gaps = cells.saturating_sub(1);
    let lead = if is_position && cells > 0 {
        format!(" + {}px", unit)
    } else {
        String::new()
    };
    format!(
        "calc((({extent} - {unit}px) / {tracks} - {unit}px) * {cells} + {unit}px * {gaps}{lead})"
    )
}
