//! Declarative chart configuration: gradients, animation policy, axis and
//! bar styling, tooltip behavior.
//!
//! A [`ChartConfig`] is a pure function of (metric, riders, palette). It
//! carries no handles to live surfaces, which keeps it comparable: the
//! lifecycle manager skips rebuilds when the config for a surface has not
//! changed.

use crate::models::{Metric, Rider};
use crate::palette::PaletteMap;

/// Vertical span, in surface units, that every bar-fill gradient covers.
pub const GRADIENT_SPAN: u32 = 300;

/// Total reveal-animation duration in milliseconds.
pub const ANIMATION_DURATION_MS: u64 = 2000;

/// A linear fill from `start` (top) to `end` (bottom) over [`GRADIENT_SPAN`]
/// units. Declarative: backends materialize it against a live surface at
/// mount time, so a recreated surface gets a fresh fill.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Gradient {
    pub start: String,
    pub end: String,
    pub span: u32,
}

/// Build the fill gradient for one rider from its primary and light colors.
/// Either color missing means no gradient; the bar renders unfilled rather
/// than failing the chart.
pub fn build_gradient(start: Option<&str>, end: Option<&str>) -> Option<Gradient> {
    Some(Gradient {
        start: start?.to_string(),
        end: end?.to_string(),
        span: GRADIENT_SPAN,
    })
}

/// What kind of animation a delay request is for. Only default-mode data
/// reveals are staggered; hover and other interaction animations run
/// immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationContext {
    /// Initial reveal of a data element.
    DataReveal,
    /// Hover/tooltip and any other interaction-driven animation.
    Interaction,
}

/// Staggered reveal policy: fixed total duration, per-element delay computed
/// from (element index, series index).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationPolicy {
    pub duration_ms: u64,
}

impl Default for AnimationPolicy {
    fn default() -> Self {
        Self {
            duration_ms: ANIMATION_DURATION_MS,
        }
    }
}

impl AnimationPolicy {
    /// Delay for one element of one series, in milliseconds:
    /// `element * 300 + series * 100`. This is the bar-by-bar reveal.
    pub fn stagger_delay(element_index: usize, series_index: usize) -> u64 {
        element_index as u64 * 300 + series_index as u64 * 100
    }

    /// Delay honoring the context rule: interaction animations are never
    /// staggered.
    pub fn delay_for(&self, context: AnimationContext, element_index: usize, series_index: usize) -> u64 {
        match context {
            AnimationContext::DataReveal => Self::stagger_delay(element_index, series_index),
            AnimationContext::Interaction => 0,
        }
    }
}

/// Value-axis policy: zero-based, capped at exactly the metric's declared
/// maximum (no auto-scaling), ticks every `step`.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisPolicy {
    pub max: f64,
    pub step: f64,
    pub zero_based: bool,
}

/// Bar styling shared by every series in a chart.
#[derive(Debug, Clone, PartialEq)]
pub struct BarStyle {
    pub border_width: f64,
    pub corner_radius: f64,
    pub thickness: f64,
}

impl Default for BarStyle {
    fn default() -> Self {
        Self {
            border_width: 3.0,
            corner_radius: 8.0,
            thickness: 80.0,
        }
    }
}

/// Tooltip behavior: `"{label}: {value}"` on hover, no title line, no color
/// swatch next to the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TooltipPolicy {
    pub show_title: bool,
    pub display_colors: bool,
}

impl Default for TooltipPolicy {
    fn default() -> Self {
        Self {
            show_title: false,
            display_colors: false,
        }
    }
}

impl TooltipPolicy {
    /// The hover line for one bar.
    pub fn line(label: &str, value: f64) -> String {
        format!("{}: {}", label, crate::legend::fmt_value(value))
    }
}

/// One bar of the single data series: the rider's display label, value, and
/// visual encoding.
#[derive(Debug, Clone, PartialEq)]
pub struct BarSeriesEntry {
    pub label: String,
    /// Missing per-rider value renders as an absent bar, not a failure.
    pub value: Option<f64>,
    pub fill: Option<Gradient>,
    pub border_color: Option<String>,
}

/// Complete declarative description of one rendered chart. Pure data, no
/// hidden state; two configs built from equal inputs compare equal.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    /// Surface this chart targets, by convention the metric id.
    pub metric_id: String,
    pub title: String,
    /// One entry per rider, in dataset declaration order.
    pub entries: Vec<BarSeriesEntry>,
    pub axis: AxisPolicy,
    pub bar: BarStyle,
    pub animation: AnimationPolicy,
    pub tooltip: TooltipPolicy,
}

impl ChartConfig {
    /// Category labels in declared order.
    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.label.as_str()).collect()
    }

    /// Series values in declared order (`None` for riders without data).
    pub fn values(&self) -> Vec<Option<f64>> {
        self.entries.iter().map(|e| e.value).collect()
    }
}

/// Assemble the chart configuration for one metric.
///
/// `riders` must be the dataset's riders in declaration order; the palette
/// is the one derived from the same dataset. Riders missing from the palette
/// or missing color fields degrade to entries without fill or border.
pub fn build_config(metric: &Metric, riders: &[Rider], palette: &PaletteMap) -> ChartConfig {
    let entries = riders
        .iter()
        .map(|rider| {
            let colors = palette.get(&rider.id);
            let fill = colors.and_then(|c| {
                build_gradient(c.primary.as_deref(), c.light.as_deref())
            });
            let border_color = colors.and_then(|c| c.secondary.clone());
            BarSeriesEntry {
                label: rider.name.clone(),
                value: metric.value_for(&rider.id),
                fill,
                border_color,
            }
        })
        .collect();

    ChartConfig {
        metric_id: metric.id.clone(),
        title: metric.title.clone(),
        entries,
        axis: AxisPolicy {
            max: metric.max_value,
            step: metric.step_size,
            zero_based: true,
        },
        bar: BarStyle::default(),
        animation: AnimationPolicy::default(),
        tooltip: TooltipPolicy::default(),
    }
}
