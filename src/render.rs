//! Bundled chart backend: renders a [`ChartConfig`] to an SVG file per
//! surface using ECharts via `charming`.
//!
//! This is one implementation of the drawing capability the lifecycle
//! manager drives; anything implementing [`ChartBackend`] works. Gradients
//! are materialized here, at mount time, so a remounted surface always gets
//! fresh fills. The staggered-reveal animation policy has no meaning in a
//! static SVG and is not mapped; it stays in the config for interactive
//! consumers.

use crate::config::{BarSeriesEntry, ChartConfig, TooltipPolicy};
use crate::lifecycle::{ChartBackend, SurfaceId};
use anyhow::{Context, Result, anyhow};
use charming::{
    Chart, ImageRenderer,
    component::{Axis, Grid, Title},
    datatype::{DataPoint, DataPointItem},
    element::{AxisType, Color, ColorStop, ItemStyle, TextStyle, Tooltip, Trigger},
    series::Bar,
};
use std::fs;
use std::path::{Path, PathBuf};

const COLOR_TEXT: &str = "#4a4a5e";

/// Handle to one rendered chart file. Disposal deletes the file, so a
/// surface never shows a chart built from a dataset that is gone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedChart {
    pub path: PathBuf,
}

/// Renders each surface to `{out_dir}/{surface}.svg`.
pub struct SvgBackend {
    out_dir: PathBuf,
    width: u32,
    height: u32,
}

impl SvgBackend {
    pub fn new(out_dir: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        Self {
            out_dir: out_dir.into(),
            width,
            height,
        }
    }

    fn surface_path(&self, surface: &SurfaceId) -> PathBuf {
        self.out_dir.join(format!("{}.svg", surface.as_str()))
    }
}

impl ChartBackend for SvgBackend {
    type Instance = RenderedChart;

    fn mount(&mut self, surface: &SurfaceId, config: &ChartConfig) -> Result<Self::Instance> {
        let chart = assemble_chart(config);
        let mut renderer = ImageRenderer::new(self.width, self.height);
        let svg = renderer
            .render(&chart)
            .map_err(|e| anyhow!("render chart for surface {surface}: {e}"))?;
        fs::create_dir_all(&self.out_dir)
            .with_context(|| format!("create {}", self.out_dir.display()))?;
        let path = self.surface_path(surface);
        fs::write(&path, svg).with_context(|| format!("write {}", path.display()))?;
        log::debug!("rendered {}", path.display());
        Ok(RenderedChart { path })
    }

    fn unmount(&mut self, _surface: &SurfaceId, instance: Self::Instance) {
        // Best effort: a missing file just means nothing was on screen.
        let _ = fs::remove_file(&instance.path);
    }
}

/// Map the declarative config onto an ECharts chart.
fn assemble_chart(config: &ChartConfig) -> Chart {
    // Riders without a value for this metric get neither a bar nor a
    // category slot.
    let present: Vec<&BarSeriesEntry> = config.entries.iter().filter(|e| e.value.is_some()).collect();
    let labels: Vec<String> = present.iter().map(|e| e.label.clone()).collect();
    let data: Vec<DataPoint> = present
        .iter()
        .map(|entry| bar_item(entry, config))
        .collect();

    Chart::new()
        .title(
            Title::new()
                .text(config.title.clone())
                .left("center")
                .text_style(TextStyle::new().color(COLOR_TEXT).font_size(18)),
        )
        .grid(Grid::new().left("8%").right("4%").bottom("8%").contain_label(true))
        .tooltip(tooltip(config))
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .min(0.0)
                .max(config.axis.max)
                .interval(config.axis.step),
        )
        .series(
            Bar::new()
                .name(config.title.clone())
                .bar_width(config.bar.thickness)
                .data(data),
        )
}

/// One bar with its rider-specific fill and border.
fn bar_item(entry: &BarSeriesEntry, config: &ChartConfig) -> DataPoint {
    let mut style = ItemStyle::new()
        .border_width(config.bar.border_width)
        .border_radius(config.bar.corner_radius);
    if let Some(gradient) = &entry.fill {
        style = style.color(Color::LinearGradient {
            x: 0.0,
            y: 0.0,
            x2: 0.0,
            y2: 1.0,
            color_stops: vec![
                ColorStop::new(0.0, gradient.start.clone()),
                ColorStop::new(1.0, gradient.end.clone()),
            ],
        });
    }
    if let Some(border) = &entry.border_color {
        style = style.border_color(border.clone());
    }
    // Guarded by the `present` filter in assemble_chart.
    let value = entry.value.unwrap_or_default();
    DataPointItem::new(value).item_style(style).into()
}

/// Hover text per the config's tooltip policy: `"{label}: {value}"`, with
/// the chart title prepended when the policy asks for one. The string
/// template never draws a color swatch, so `display_colors` is inherently
/// off in this backend.
fn tooltip(config: &ChartConfig) -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Item)
        .formatter(tooltip_formatter(&config.tooltip))
}

fn tooltip_formatter(policy: &TooltipPolicy) -> &'static str {
    if policy.show_title {
        "{a}\n{b}: {c}"
    } else {
        "{b}: {c}"
    }
}

/// Remove every rendered surface file under a directory (shell teardown
/// helper for full-page reloads).
pub fn clean_output_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        return Ok(());
    }
    for entry in fs::read_dir(dir).with_context(|| format!("read {}", dir.display()))? {
        let path = entry?.path();
        if path.extension().and_then(|s| s.to_str()) == Some("svg") {
            fs::remove_file(&path).with_context(|| format!("remove {}", path.display()))?;
        }
    }
    Ok(())
}
