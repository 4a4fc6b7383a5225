//! Dashboard assembly: ties the loader, config builder, and chart lifecycle
//! together, and derives the text the presentation shell writes into its
//! named slots.
//!
//! The shell owns markup and styling; this module only produces data. Rider
//! cards and metric legends are explicit view structs bound to dataset rows,
//! never looked up by position in rendered output.

use crate::api::DataSource;
use crate::config::build_config;
use crate::legend::{legend_line, unit_label};
use crate::lifecycle::{ChartBackend, ChartSync, SurfaceId, SyncOutcome};
use crate::load::{LoadState, Loader};
use crate::models::{Dataset, Metric};
use anyhow::Result;
use std::sync::Arc;

/// Text for one rider intro card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiderCard {
    pub name: String,
    /// Nickname in quotes, e.g. `"The Cannibal"`; empty when absent.
    pub nickname: String,
    /// `"{country} | Active: {active}"`; empty when both fields are absent.
    pub era: String,
}

/// Legend block under one metric chart: one line per rider plus the
/// optional footnote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricLegend {
    pub lines: Vec<String>,
    pub note: Option<String>,
}

/// Derive intro-card text for every rider, in dataset order.
pub fn rider_cards(dataset: &Dataset) -> Vec<RiderCard> {
    dataset
        .riders
        .iter()
        .map(|r| RiderCard {
            name: r.name.clone(),
            nickname: r
                .nickname
                .as_deref()
                .map(|n| format!("\"{n}\""))
                .unwrap_or_default(),
            era: match (r.country.as_deref(), r.active.as_deref()) {
                (Some(c), Some(a)) => format!("{c} | Active: {a}"),
                (Some(c), None) => c.to_string(),
                (None, Some(a)) => format!("Active: {a}"),
                (None, None) => String::new(),
            },
        })
        .collect()
}

/// Derive the legend block for one metric: `"{name}: {value} {unit}"` per
/// rider, unit classified from the metric title. Riders without a value for
/// this metric are skipped rather than shown with a hole.
pub fn metric_legend(dataset: &Dataset, metric: &Metric) -> MetricLegend {
    let unit = unit_label(&metric.title);
    let lines = dataset
        .riders
        .iter()
        .filter_map(|r| metric.value_for(&r.id).map(|v| legend_line(&r.name, v, unit)))
        .collect();
    MetricLegend {
        lines,
        note: metric.note.clone(),
    }
}

/// The full pipeline: load orchestration plus per-metric chart lifecycle.
pub struct Dashboard<B: ChartBackend> {
    loader: Loader,
    charts: ChartSync<B>,
}

impl<B: ChartBackend> Default for Dashboard<B> {
    fn default() -> Self {
        Self {
            loader: Loader::new(),
            charts: ChartSync::new(),
        }
    }
}

impl<B: ChartBackend> Dashboard<B> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn loader(&self) -> &Loader {
        &self.loader
    }

    pub fn loader_mut(&mut self) -> &mut Loader {
        &mut self.loader
    }

    pub fn state(&self) -> &LoadState {
        self.loader.state()
    }

    /// Number of live chart instances across all surfaces.
    pub fn live_charts(&self) -> usize {
        self.charts.live_count()
    }

    /// Drive one load attempt, then reconcile every chart surface with the
    /// outcome.
    pub fn reload(&mut self, source: &dyn DataSource, backend: &mut B) -> Result<&LoadState> {
        self.loader.load(source);
        self.refresh(backend)?;
        Ok(self.loader.state())
    }

    /// Reconcile chart instances with the loader's current state.
    ///
    /// While `Ready`, each metric gets a config built from the dataset and
    /// palette and is synced to the surface named after the metric id;
    /// surfaces whose metric is absent from the current dataset are synced
    /// to `None` first. In any other state every live instance is torn
    /// down; an error screen shows zero charts.
    pub fn refresh(&mut self, backend: &mut B) -> Result<Vec<(SurfaceId, SyncOutcome)>> {
        let (dataset, palette) = match (self.loader.dataset(), self.loader.palette()) {
            (Some(d), Some(p)) => (Arc::clone(d), p.clone()),
            _ => {
                self.charts.clear(backend);
                return Ok(Vec::new());
            }
        };

        let mut outcomes = Vec::with_capacity(dataset.metrics.len());

        // Surfaces from a previous dataset whose metric is gone must be
        // torn down; a chart never outlives the dataset that produced it.
        for surface in self.charts.live_surfaces() {
            if !dataset.metrics.iter().any(|m| m.id == surface.as_str()) {
                let outcome = self.charts.sync(backend, &surface, None)?;
                outcomes.push((surface, outcome));
            }
        }

        for metric in &dataset.metrics {
            let surface = SurfaceId(metric.id.clone());
            let config = build_config(metric, &dataset.riders, &palette);
            let outcome = self.charts.sync(backend, &surface, Some(&config))?;
            outcomes.push((surface, outcome));
        }
        Ok(outcomes)
    }

    /// Rider intro cards for the current dataset; empty until `Ready`.
    pub fn cards(&self) -> Vec<RiderCard> {
        self.loader
            .dataset()
            .map(|d| rider_cards(d))
            .unwrap_or_default()
    }

    /// Legend blocks per metric, in metric order; empty until `Ready`.
    pub fn legends(&self) -> Vec<MetricLegend> {
        self.loader
            .dataset()
            .map(|d| d.metrics.iter().map(|m| metric_legend(d, m)).collect())
            .unwrap_or_default()
    }

    /// Tear down every live chart instance.
    pub fn teardown(&mut self, backend: &mut B) {
        self.charts.clear(backend);
    }
}
