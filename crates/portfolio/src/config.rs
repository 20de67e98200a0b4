//! Portfolio configuration.

use common::{Axis, Breakpoint, GridResult, Viewport};
use grid_layout::GridLayoutOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Portfolio configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PortfolioConfig {
    /// Viewport width.
    pub viewport_width: f32,
    /// Viewport height.
    pub viewport_height: f32,
    /// Horizontal margin between items, in cells.
    pub margin_x: u32,
    /// Vertical margin between items, in cells.
    pub margin_y: u32,
    /// Packing axis of media pages.
    pub axis: Axis,
    /// Whether layouts span at least the whole viewport.
    pub fill_available: bool,
    /// Whether archived projects appear in the project grid.
    pub show_archived: bool,
}

impl PortfolioConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mobile configuration.
    pub fn mobile() -> Self {
        Self {
            viewport_width: 375.0,
            viewport_height: 812.0,
            axis: Axis::Y,
            ..Self::default()
        }
    }

    /// Create a tablet configuration.
    pub fn tablet() -> Self {
        Self {
            viewport_width: 1024.0,
            viewport_height: 768.0,
            ..Self::default()
        }
    }

    /// Load a configuration from a JSON file. Missing keys keep defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> GridResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> GridResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Set viewport size.
    pub fn with_viewport(mut self, width: f32, height: f32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    /// Set item margins.
    pub fn with_margins(mut self, margin_x: u32, margin_y: u32) -> Self {
        self.margin_x = margin_x;
        self.margin_y = margin_y;
        self
    }

    /// Set packing axis.
    pub fn with_axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.viewport_width, self.viewport_height)
    }

    pub fn breakpoint(&self) -> Breakpoint {
        self.viewport().breakpoint()
    }

    /// Layout options for the grid of `breakpoint`.
    pub fn layout_options(&self, breakpoint: Breakpoint) -> GridLayoutOptions {
        GridLayoutOptions::for_breakpoint(breakpoint)
            .with_margins(self.margin_x, self.margin_y)
            .with_axis(self.axis)
            .with_fill_available(self.fill_available)
    }
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        Self {
            viewport_width: 1920.0,
            viewport_height: 1080.0,
            margin_x: 0,
            margin_y: 0,
            axis: Axis::X,
            fill_available: false,
            show_archived: false,
        }
    }
}
