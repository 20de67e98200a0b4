//! Portfolio grid - packs grid items read as JSON and prints the layout.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use common::{Axis, GridSize};
use grid_layout::{
    GridLayoutEngine, GridLayoutOptions, ItemId, ItemPlacement, LayoutDimensions, PlacedItem,
    RawGridItem,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use portfolio::PortfolioConfig;

/// Portfolio grid - pack items onto a responsive cell grid
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input JSON file, or "-" for stdin
    #[arg(default_value = "-")]
    input: String,

    /// Portfolio configuration file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Packing axis (x or y)
    #[arg(long, value_parser = parse_axis)]
    axis: Option<Axis>,

    /// Number of grid rows
    #[arg(long)]
    rows: Option<u32>,

    /// Number of grid columns
    #[arg(long)]
    columns: Option<u32>,

    /// Horizontal margin between items, in cells
    #[arg(long)]
    margin_x: Option<u32>,

    /// Vertical margin between items, in cells
    #[arg(long)]
    margin_y: Option<u32>,

    /// Viewport width
    #[arg(long)]
    width: Option<f32>,

    /// Viewport height
    #[arg(long)]
    height: Option<f32>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Pretty-print the output
    #[arg(long)]
    pretty: bool,
}

fn parse_axis(value: &str) -> Result<Axis, String> {
    match value.to_ascii_lowercase().as_str() {
        "x" => Ok(Axis::X),
        "y" => Ok(Axis::Y),
        other => Err(format!("unknown axis '{}', expected x or y", other)),
    }
}

/// Either a bare item list or a document carrying options.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum LayoutInput {
    Items(Vec<RawGridItem<Value>>),
    Document {
        items: Vec<RawGridItem<Value>>,
        #[serde(default)]
        options: Option<GridLayoutOptions>,
    },
}

impl LayoutInput {
    fn into_parts(self) -> (Vec<RawGridItem<Value>>, Option<GridLayoutOptions>) {
        match self {
            LayoutInput::Items(items) => (items, None),
            LayoutInput::Document { items, options } => (items, options),
        }
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct OutputItem {
    #[serde(flatten)]
    item: PlacedItem<Value>,
    placement: ItemPlacement,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct LayoutOutput {
    items: Vec<OutputItem>,
    matrix_size: GridSize,
    layout_dimensions: LayoutDimensions,
    dropped: Vec<ItemId>,
}

impl Args {
    fn portfolio_config(&self) -> Result<PortfolioConfig> {
        let mut config = match &self.config {
            Some(path) => PortfolioConfig::from_json_file(path)
                .with_context(|| format!("reading config {}", path.display()))?,
            None => PortfolioConfig::default(),
        };
        if let Some(width) = self.width {
            config.viewport_width = width;
        }
        if let Some(height) = self.height {
            config.viewport_height = height;
        }
        Ok(config)
    }

    /// Apply command-line overrides on top of `options`.
    fn apply(&self, mut options: GridLayoutOptions) -> GridLayoutOptions {
        if let Some(axis) = self.axis {
            options.axis = axis;
        }
        if let Some(rows) = self.rows {
            options.rows = rows;
        }
        if let Some(columns) = self.columns {
            options.columns = columns;
        }
        if let Some(margin_x) = self.margin_x {
            options.margin_x = margin_x;
        }
        if let Some(margin_y) = self.margin_y {
            options.margin_y = margin_y;
        }
        options
    }

    fn read_input(&self) -> Result<String> {
        if self.input == "-" {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text).context("reading stdin")?;
            Ok(text)
        } else {
            fs::read_to_string(&self.input).with_context(|| format!("reading {}", self.input))
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr, stdout carries the layout
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    debug!("Portfolio grid v{}", portfolio::VERSION);

    let config = args.portfolio_config()?;
    let breakpoint = config.breakpoint();
    let input: LayoutInput =
        serde_json::from_str(&args.read_input()?).context("parsing layout input")?;
    let (items, options) = input.into_parts();
    let options = args.apply(options.unwrap_or_else(|| config.layout_options(breakpoint)));

    info!(
        items = items.len(),
        %breakpoint,
        axis = %options.axis,
        "computing layout"
    );

    let engine = GridLayoutEngine::new(config.viewport());
    let layout = engine.layout(items, &options)?;
    if !layout.is_complete() {
        warn!(dropped = layout.dropped.len(), "some items did not fit");
    }

    let output = LayoutOutput {
        items: layout
            .items
            .iter()
            .map(|item| OutputItem {
                placement: engine.placement(item),
                item: item.clone(),
            })
            .collect(),
        matrix_size: layout.matrix_size,
        layout_dimensions: layout.layout_dimensions,
        dropped: layout.dropped.into_iter().map(|item| item.id).collect(),
    };

    let text = if args.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{}", text);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_default() {
        let args = Args::parse_from(["portfolio-grid"]);
        assert_eq!(args.input, "-");
        assert!(args.axis.is_none());
        assert!(!args.pretty);
    }

    #[test]
    fn test_args_axis() {
        let args = Args::parse_from(["portfolio-grid", "items.json", "--axis", "Y"]);
        assert_eq!(args.input, "items.json");
        assert_eq!(args.axis, Some(Axis::Y));
        assert!(Args::try_parse_from(["portfolio-grid", "--axis", "z"]).is_err());
    }

    #[test]
    fn test_overrides_applied() {
        let args = Args::parse_from([
            "portfolio-grid",
            "--rows",
            "8",
            "--margin-x",
            "1",
            "--width",
            "600",
        ]);
        let config = args.portfolio_config().unwrap();
        assert_eq!(config.breakpoint(), common::Breakpoint::Mobile);

        let options = args.apply(GridLayoutOptions::default());
        assert_eq!(options.rows, 8);
        assert_eq!(options.margin_x, 1);
        assert_eq!(options.columns, 19);
    }

    #[test]
    fn test_input_shapes() {
        let bare: LayoutInput = serde_json::from_str(r#"[{"width": 2, "height": 2}]"#).unwrap();
        let (items, options) = bare.into_parts();
        assert_eq!(items.len(), 1);
        assert!(options.is_none());

        let doc: LayoutInput = serde_json::from_str(
            r#"{"items": [{"id": "a", "width": 2, "height": 2}], "options": {"rows": 6}}"#,
        )
        .unwrap();
        let (items, options) = doc.into_parts();
        assert_eq!(items[0].id, Some(ItemId::from("a")));
        assert_eq!(options.unwrap().rows, 6);
    }
}
