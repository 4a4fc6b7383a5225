//! Per-rider color palettes derived from dataset fields.

use crate::models::{Dataset, RiderId};
use std::collections::BTreeMap;

/// Primary/secondary/light color triple for one rider.
///
/// Fields mirror the dataset's `colorPrimary`/`colorSecondary`/`colorLight`;
/// a missing field stays `None` and the corresponding visual (gradient fill,
/// border) is simply absent downstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteEntry {
    pub primary: Option<String>,
    pub secondary: Option<String>,
    pub light: Option<String>,
}

/// Map from rider id to its palette entry, recomputed per dataset.
pub type PaletteMap = BTreeMap<RiderId, PaletteEntry>;

/// Derive the palette for every rider in the dataset.
///
/// Pure and deterministic: the same dataset always yields a structurally
/// equal map. The palette lives and dies with the dataset that produced it.
pub fn derive_palette(dataset: &Dataset) -> PaletteMap {
    dataset
        .riders
        .iter()
        .map(|r| {
            (
                r.id.clone(),
                PaletteEntry {
                    primary: r.color_primary.clone(),
                    secondary: r.color_secondary.clone(),
                    light: r.color_light.clone(),
                },
            )
        })
        .collect()
}
