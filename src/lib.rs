//! palmares
//!
//! A lightweight Rust library for the data side of a two-rider comparison
//! dashboard: it loads one JSON dataset over HTTP, derives per-rider color
//! palettes and legend text, builds declarative bar-chart configurations
//! (gradient fills, axis bounds, staggered reveal animation), and keeps live
//! chart instances in sync with the load lifecycle.
//!
//! ### Features
//! - Load orchestration with request generations: a superseded fetch can
//!   resolve late without touching newer state
//! - Pure derivation: palettes, legends, and chart configs are functions of
//!   the dataset alone
//! - Chart lifecycle guarantees: at most one live instance per surface,
//!   disposed before replacement, untouched when inputs are unchanged
//! - A bundled ECharts/SVG backend; any [`lifecycle::ChartBackend`] works
//!
//! ### Example
//! ```no_run
//! use palmares::{Client, Dashboard, render::SvgBackend};
//!
//! let source = Client::new("https://example.com/data.json");
//! let mut backend = SvgBackend::new("out", 800, 400);
//! let mut board = Dashboard::new();
//! board.reload(&source, &mut backend)?;
//! for card in board.cards() {
//!     println!("{} {}", card.name, card.era);
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod api;
pub mod board;
pub mod config;
pub mod legend;
pub mod lifecycle;
pub mod load;
pub mod models;
pub mod palette;
pub mod render;

pub use api::{Client, DataSource, LoadError};
pub use board::Dashboard;
pub use config::{ChartConfig, build_config};
pub use lifecycle::{ChartBackend, ChartSync, SurfaceId, SyncOutcome};
pub use load::{LoadState, Loader};
pub use models::{Dataset, Metric, Rider};
pub use palette::{PaletteEntry, PaletteMap, derive_palette};
