// src/city/config.rs

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::bsp::{PartitionLimits, Rectangle};
use crate::error::{CityError, Result};

/// Extra room around a house when deriving block limits from house widths.
pub const STREET_MARGIN: f64 = 8.0;

/// A `(min, max)` pair as entered by the user.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub fn new(min: f64, max: f64) -> Self {
        Range { min, max }
    }
}

/// User-facing settings for one generated city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CityConfig {
    pub name: String,
    /// Extent of the footprint along x.
    pub width: f64,
    /// Extent of the footprint along z.
    pub depth: f64,
    pub house_height: Range,
    pub house_width: Range,
    /// Fixed seed for reproducible layouts; drawn from entropy when absent.
    pub seed: Option<u64>,
}

impl Default for CityConfig {
    fn default() -> Self {
        CityConfig {
            name: "city".to_string(),
            width: 100.0,
            depth: 100.0,
            house_height: Range::new(4.0, 30.0),
            house_width: Range::new(5.0, 20.0),
            seed: None,
        }
    }
}

impl CityConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: CityConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| CityError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.width.is_finite() && self.depth.is_finite()) || self.width <= 0.0 || self.depth <= 0.0 {
            return Err(CityError::invalid(format!(
                "city size must be positive, got {}x{}",
                self.width, self.depth
            )));
        }
        let Range { min, max } = self.house_height;
        if !(min.is_finite() && max.is_finite()) || min <= 0.0 || min > max {
            return Err(CityError::invalid(format!(
                "house height range {min}..{max} is invalid"
            )));
        }
        let Range { min, max } = self.house_width;
        if !(min.is_finite() && max.is_finite()) || min <= 0.0 || min > max {
            return Err(CityError::invalid(format!(
                "house width range {min}..{max} is invalid"
            )));
        }
        Ok(())
    }

    /// The city footprint, centered on the origin.
    pub fn footprint(&self) -> Rectangle {
        Rectangle::centered(self.width, self.depth)
    }

    /// Block limits: a block must fit the widest house plus the street margin,
    /// and no street may leave less than the narrowest house plus the margin.
    pub fn partition_limits(&self) -> Result<PartitionLimits> {
        PartitionLimits::new(
            self.house_width.max + STREET_MARGIN,
            self.house_width.min + STREET_MARGIN,
        )
    }
}
