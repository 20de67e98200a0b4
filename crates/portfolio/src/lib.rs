//! Portfolio grid - project and media layout on a responsive cell grid.
//!
//! This crate ties the layout engine to the portfolio data:
//! - Configuration of viewport and packing options
//! - Project media as stored by the CMS
//! - A shared project store computing per-breakpoint layouts

pub mod config;
pub mod media;
pub mod store;

pub use config::PortfolioConfig;
pub use media::{
    all_fetched, format_media_size, persisted_sizes, Media, MediaKind, MediaPayload, MediaSize,
    MediaSizeUpdate, PersistedSize, ProjectMedia,
};
pub use store::{Project, ProjectPayload, ProjectStore, ResponsiveState, StoreError, StoreResult};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
