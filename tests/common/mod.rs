//! Shared fixtures for integration tests: canned datasets, a scripted data
//! source, and a counting chart backend.

#![allow(dead_code)]

use anyhow::{Result, bail};
use palmares::api::{DataSource, LoadError};
use palmares::config::ChartConfig;
use palmares::lifecycle::{ChartBackend, SurfaceId};
use palmares::models::Dataset;
use std::collections::HashSet;

/// A minimal two-rider, one-metric document (the end-to-end scenario).
pub const TWO_RIDER_DOC: &str = r##"{
  "riders": {
    "a": { "name": "A", "nickname": "Alpha", "country": "BE", "active": "1965-1978",
           "colorPrimary": "#FF6B6B", "colorSecondary": "#C0392B", "colorLight": "#FFB3B3" },
    "b": { "name": "B", "nickname": "Bravo", "country": "SI", "active": "2019-present",
           "colorPrimary": "#4ECDC4", "colorSecondary": "#16A085", "colorLight": "#B3F0EB" }
  },
  "metrics": [
    { "id": "m1", "title": "Grand Tour Wins", "a": 5, "b": 5, "maxValue": 6, "stepSize": 1 }
  ]
}"##;

/// A fuller document exercising multiple metrics, a note, and a rider with
/// missing color fields.
pub const FULL_DOC: &str = r##"{
  "riders": {
    "merckx": { "name": "Eddy Merckx", "nickname": "The Cannibal", "country": "Belgium",
                "active": "1965-1978", "colorPrimary": "#FF6B6B",
                "colorSecondary": "#C0392B", "colorLight": "#FFB3B3" },
    "pogacar": { "name": "Tadej Pogacar", "nickname": "Pogi", "country": "Slovenia",
                 "active": "2019-present", "colorPrimary": "#4ECDC4" }
  },
  "metrics": [
    { "id": "tdf", "title": "Tour de France Wins", "merckx": 5, "pogacar": 4,
      "maxValue": 6, "stepSize": 1 },
    { "id": "stages", "title": "Tour de France Stage Wins", "merckx": 34, "pogacar": 21,
      "maxValue": 40, "stepSize": 5 },
    { "id": "career", "title": "Career Victories", "merckx": 525, "pogacar": 88,
      "maxValue": 600, "stepSize": 100,
      "note": "Pogacar's statistics are still being written" }
  ]
}"##;

pub fn two_rider_dataset() -> Dataset {
    Dataset::from_json(TWO_RIDER_DOC).expect("fixture parses")
}

pub fn full_dataset() -> Dataset {
    Dataset::from_json(FULL_DOC).expect("fixture parses")
}

/// Data source returning one scripted result per call.
pub enum Scripted {
    Ok(&'static str),
    Status(u16),
}

impl DataSource for Scripted {
    fn fetch(&self) -> Result<Dataset, LoadError> {
        match self {
            Scripted::Ok(doc) => Ok(Dataset::from_json(doc)?),
            Scripted::Status(code) => Err(LoadError::Status(*code)),
        }
    }
}

/// Chart backend that draws nothing and counts everything. Panics if the
/// at-most-one-instance invariant is ever violated.
#[derive(Default)]
pub struct MockBackend {
    pub mounts: usize,
    pub unmounts: usize,
    pub fail_next_mount: bool,
    live: HashSet<String>,
    next_id: u64,
    pub mounted_configs: Vec<ChartConfig>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live_surfaces(&self) -> usize {
        self.live.len()
    }
}

impl ChartBackend for MockBackend {
    type Instance = u64;

    fn mount(&mut self, surface: &SurfaceId, config: &ChartConfig) -> Result<u64> {
        if self.fail_next_mount {
            self.fail_next_mount = false;
            bail!("mock mount failure");
        }
        assert!(
            self.live.insert(surface.as_str().to_string()),
            "second live instance mounted on surface {surface}"
        );
        self.mounts += 1;
        self.next_id += 1;
        self.mounted_configs.push(config.clone());
        Ok(self.next_id)
    }

    fn unmount(&mut self, surface: &SurfaceId, _instance: u64) {
        assert!(
            self.live.remove(surface.as_str()),
            "unmount for surface {surface} with no live instance"
        );
        self.unmounts += 1;
    }
}
