//! Application configuration: detector settings plus the engine setup

use crate::error::{CounterError, Result};
use blobtrack::EngineConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Region of interest in pixels. Blobs whose centroid falls outside are
/// ignored by the detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roi {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Roi {
    pub fn contains(&self, x: i32, y: i32) -> bool {
        let (x, y) = (i64::from(x), i64::from(y));
        let (left, top) = (i64::from(self.x), i64::from(self.y));
        left <= x && x <= left + i64::from(self.w) && top <= y && y <= top + i64::from(self.h)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Blobs with an area at or below this are dropped
    pub min_area: f64,
    pub roi: Option<Roi>,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            min_area: 500.0,
            roi: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CounterConfig {
    pub detector: DetectorConfig,
    pub engine: EngineConfig,
}

impl CounterConfig {
    /// Load and validate a JSON configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: CounterConfig = serde_json::from_str(&content)?;
        config.validate()?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.detector.min_area.is_finite() || self.detector.min_area < 0.0 {
            return Err(CounterError::config(format!(
                "min_area must be a non-negative number, got {}",
                self.detector.min_area
            )));
        }
        if let Some(roi) = &self.detector.roi {
            if roi.w < 0 || roi.h < 0 {
                return Err(CounterError::config("roi width and height must be non-negative"));
            }
        }
        self.engine.validate()?;
        Ok(())
    }
}
