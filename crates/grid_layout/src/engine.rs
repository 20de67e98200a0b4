//! Layout driver: sorts, sizes, packs and trims.

use crate::dimensions::{ItemPlacement, LayoutDimensions};
use crate::items::{normalize, GridItem, ItemId, RawGridItem};
use crate::matrix::{FillKind, Matrix};
use crate::position::{find_position, PlacementRequest};
use common::{Axis, Breakpoint, CellMetrics, Dimensions, GridError, GridResult, GridSize, Viewport};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use tracing::{debug, trace, warn};

/// Options for one layout computation.
///
/// Missing fields deserialize to their defaults, so partial option objects
/// can be supplied.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridLayoutOptions {
    pub rows: u32,
    pub columns: u32,
    pub margin_x: u32,
    pub margin_y: u32,
    /// Packing axis. The other axis is bounded by `rows`/`columns`.
    pub axis: Axis,
    /// Regions kept clear of items.
    pub reserved_space: Vec<Dimensions>,
    /// Never trim the free axis below its declared `columns`/`rows`.
    pub fill_available: bool,
    /// Append one empty line along the free axis after trimming.
    pub bottom_padding: bool,
}

impl GridLayoutOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults sized to a breakpoint's grid.
    pub fn for_breakpoint(breakpoint: Breakpoint) -> Self {
        Self {
            rows: breakpoint.rows(),
            columns: breakpoint.columns(),
            ..Self::default()
        }
    }

    pub fn with_grid(mut self, columns: u32, rows: u32) -> Self {
        self.columns = columns;
        self.rows = rows;
        self
    }

    pub fn with_margins(mut self, margin_x: u32, margin_y: u32) -> Self {
        self.margin_x = margin_x;
        self.margin_y = margin_y;
        self
    }

    pub fn with_axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    pub fn with_reserved(mut self, reserved_space: Vec<Dimensions>) -> Self {
        self.reserved_space = reserved_space;
        self
    }

    pub fn with_fill_available(mut self, fill_available: bool) -> Self {
        self.fill_available = fill_available;
        self
    }

    pub fn with_bottom_padding(mut self, bottom_padding: bool) -> Self {
        self.bottom_padding = bottom_padding;
        self
    }

    /// The declared extent of the grid along `axis`.
    pub fn declared_extent(&self, axis: Axis) -> u32 {
        axis.pick(self.columns, self.rows)
    }

    /// Extent of the bounded (non-packing) axis.
    pub fn bounded_extent(&self) -> u32 {
        self.declared_extent(self.axis.cross())
    }

    pub fn validate(&self) -> GridResult<()> {
        if self.rows == 0 {
            return Err(GridError::invalid_option("rows must be positive"));
        }
        if self.columns == 0 {
            return Err(GridError::invalid_option("columns must be positive"));
        }
        let cross = self.axis.cross();
        for space in &self.reserved_space {
            if space.size().is_empty() {
                return Err(GridError::invalid_option(format!(
                    "reserved space {} is empty",
                    space
                )));
            }
            if space.far_edge(cross) > self.bounded_extent() {
                return Err(GridError::reserved_out_of_bounds(format!(
                    "{} exceeds the {} {} of the grid",
                    space,
                    self.bounded_extent(),
                    cross.pick("columns", "rows")
                )));
            }
        }
        Ok(())
    }
}

impl Default for GridLayoutOptions {
    fn default() -> Self {
        Self {
            rows: Breakpoint::Default.rows(),
            columns: Breakpoint::Default.columns(),
            margin_x: 0,
            margin_y: 0,
            axis: Axis::X,
            reserved_space: Vec::new(),
            fill_available: false,
            bottom_padding: false,
        }
    }
}

/// An item after packing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedItem<T> {
    pub id: ItemId,
    pub width: u32,
    pub height: u32,
    pub x: u32,
    pub y: u32,
    /// Coordinates the caller asked for, echoed for diffing.
    pub pinned_x: Option<u32>,
    pub pinned_y: Option<u32>,
    pub is_pinned: bool,
    pub extra_data: Option<T>,
}

impl<T> PlacedItem<T> {
    #[inline]
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.x, self.y, self.width, self.height)
    }
}

/// Result of a layout computation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridLayoutData<T> {
    pub items: Vec<PlacedItem<T>>,
    pub matrix: Matrix,
    pub matrix_size: GridSize,
    pub layout_dimensions: LayoutDimensions,
    /// Items that found no room, in placement order.
    pub dropped: Vec<GridItem<T>>,
}

impl<T> GridLayoutData<T> {
    pub fn item(&self, id: &ItemId) -> Option<&PlacedItem<T>> {
        self.items.iter().find(|item| &item.id == id)
    }

    pub fn is_complete(&self) -> bool {
        self.dropped.is_empty()
    }
}

/// Packs grid items for a fixed viewport.
#[derive(Clone, Debug)]
pub struct GridLayoutEngine {
    metrics: CellMetrics,
}

impl GridLayoutEngine {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            metrics: viewport.metrics(),
        }
    }

    pub fn metrics(&self) -> &CellMetrics {
        &self.metrics
    }

    /// Compute a layout.
    pub fn layout<T>(
        &self,
        items: Vec<RawGridItem<T>>,
        options: &GridLayoutOptions,
    ) -> GridResult<GridLayoutData<T>> {
        options.validate()?;

        let mut items = normalize(items)?;
        sort_by_pinning(&mut items);

        let max_size = matrix_max_size(&items, options);
        let mut matrix = Matrix::new(max_size)?;
        prefill_reserved_space(&mut matrix, &options.reserved_space)?;
        debug!(
            items = items.len(),
            reserved = options.reserved_space.len(),
            axis = %options.axis,
            "packing into {} matrix",
            max_size
        );

        let (placed, dropped) = place_all_items(&mut matrix, items, options)?;

        matrix.trim(options.axis);
        if options.fill_available {
            let available = options.declared_extent(options.axis);
            let current = options.axis.extent(matrix.size());
            if current < available {
                matrix.extend(options.axis, available - current);
            }
        }
        if options.bottom_padding {
            matrix.extend(options.axis, 1);
        }
        let matrix_size = matrix.size();
        debug!(
            placed = placed.len(),
            dropped = dropped.len(),
            "layout trimmed to {}",
            matrix_size
        );

        Ok(GridLayoutData {
            items: placed,
            layout_dimensions: LayoutDimensions::new(matrix_size, &self.metrics),
            matrix,
            matrix_size,
            dropped,
        })
    }

    /// CSS placement of one packed item.
    pub fn placement<T>(&self, item: &PlacedItem<T>) -> ItemPlacement {
        ItemPlacement::new(&item.dimensions(), &self.metrics)
    }
}

/// Compute a layout for `viewport`.
pub fn generate_grid_layout<T>(
    items: Vec<RawGridItem<T>>,
    options: &GridLayoutOptions,
    viewport: Viewport,
) -> GridResult<GridLayoutData<T>> {
    GridLayoutEngine::new(viewport).layout(items, options)
}

/// Most pinned first; stable within a weight.
fn sort_by_pinning<T>(items: &mut [GridItem<T>]) {
    items.sort_by_key(|item| Reverse(item.pinning_weight()));
}

/// Upper bound for the matrix: the bounded axis as declared, the packing
/// axis long enough to lay every item and reserved block end to end after
/// the farthest pinned or reserved edge.
///
/// Edges past the larger of that serial reach and the declared extent are
/// ignored, so a far-off pin cannot size the allocation; such an item falls
/// back to search.
fn matrix_max_size<T>(items: &[GridItem<T>], options: &GridLayoutOptions) -> GridSize {
    let axis = options.axis;
    let margin = axis.pick(options.margin_x, options.margin_y);

    let item_extent = items.iter().fold(0u32, |sum, item| {
        sum.saturating_add(axis.extent(item.size()).saturating_add(margin))
    });
    let reserved_extent = options
        .reserved_space
        .iter()
        .fold(0u32, |sum, space| sum.saturating_add(axis.extent(space.size())));
    let reach = item_extent.saturating_add(reserved_extent);
    let edge_limit = reach.max(options.declared_extent(axis));

    let pinned_edge = items
        .iter()
        .filter_map(|item| {
            axis.pick(item.x, item.y)
                .map(|start| start.saturating_add(axis.extent(item.size())))
        })
        .chain(options.reserved_space.iter().map(|space| space.far_edge(axis)))
        .filter(|&edge| edge <= edge_limit)
        .max()
        .unwrap_or(0);

    let free = reach.saturating_add(pinned_edge).max(1);
    let bounded = options.bounded_extent();
    match axis {
        Axis::X => GridSize::new(free, bounded),
        Axis::Y => GridSize::new(bounded, free),
    }
}

/// Reserved blocks are clipped to the matrix; a block lying wholly past the
/// packing bound cannot touch any item.
fn prefill_reserved_space(matrix: &mut Matrix, reserved_space: &[Dimensions]) -> GridResult<()> {
    let size = matrix.size();
    for space in reserved_space.iter().filter_map(|space| space.clip(size)) {
        matrix.fill(&space, 0, 0, FillKind::Reserved)?;
    }
    Ok(())
}

fn place_all_items<T>(
    matrix: &mut Matrix,
    items: Vec<GridItem<T>>,
    options: &GridLayoutOptions,
) -> GridResult<(Vec<PlacedItem<T>>, Vec<GridItem<T>>)> {
    let mut placed = Vec::with_capacity(items.len());
    let mut dropped = Vec::new();

    for item in items {
        let request = PlacementRequest::new(item.size(), options.axis)
            .with_margins(options.margin_x, options.margin_y)
            .with_hint(item.x, item.y);

        let Some(placement) = find_position(matrix, &request) else {
            warn!(id = %item.id, size = %item.size(), "no room left for grid item, dropping it");
            dropped.push(item);
            continue;
        };

        let region = Dimensions::from_position_size(placement.position, item.size());
        let kind = if placement.pinned {
            FillKind::Pinned
        } else {
            FillKind::Occupied
        };
        matrix.fill(&region, options.margin_x, options.margin_y, kind)?;
        trace!(id = %item.id, pinned = placement.pinned, "placed at {}", region);

        placed.push(PlacedItem {
            id: item.id,
            width: item.width,
            height: item.height,
            x: region.x,
            y: region.y,
            pinned_x: item.x,
            pinned_y: item.y,
            is_pinned: placement.pinned,
            extra_data: item.extra_data,
        });
    }

    Ok((placed, dropped))
}
