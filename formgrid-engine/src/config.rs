//! Grid configuration.
//!
//! Hosts usually hand configuration over as JSON props, so every type here
//! deserializes from camelCase keys and falls back to the defaults below for
//! anything omitted.

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};
use crate::geometry::column_width;
use crate::responsive::ResponsiveConfig;

/// How far down the placement cursor may offer new cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RowLimit {
    /// Grids grow downward without limit.
    #[default]
    Unbounded,
    /// Candidates must lie within the rows already covered by content.
    /// An empty grid still offers its first row.
    ContentHeight,
}

/// Metrics for one grid instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GridConfig {
    /// Number of columns. Overridden by the breakpoint table in responsive mode.
    pub columns: u32,
    /// Height of one row in pixels.
    pub row_height: f32,
    /// Gap between items, `[x, y]`.
    pub margin: [f32; 2],
    /// Inset between the container edge and the first cell, `[x, y]`.
    pub container_padding: [f32; 2],
    /// Measured container width in pixels.
    pub container_width: f32,
    pub row_limit: RowLimit,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns: 4,
            row_height: 60.0,
            margin: [10.0, 10.0],
            container_padding: [10.0, 10.0],
            container_width: 1200.0,
            row_limit: RowLimit::Unbounded,
        }
    }
}

impl GridConfig {
    pub fn with_columns(mut self, columns: u32) -> Self {
        self.columns = columns;
        self
    }

    pub fn with_width(mut self, container_width: f32) -> Self {
        self.container_width = container_width;
        self
    }

    pub fn with_row_limit(mut self, row_limit: RowLimit) -> Self {
        self.row_limit = row_limit;
        self
    }

    /// Reject metrics the geometry cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.columns == 0 {
            return Err(GridError::config("column count must be at least 1"));
        }
        if !(self.row_height.is_finite() && self.row_height > 0.0) {
            return Err(GridError::config(format!(
                "row height must be positive, got {}",
                self.row_height
            )));
        }
        if !(self.container_width.is_finite() && self.container_width > 0.0) {
            return Err(GridError::config(format!(
                "container width must be positive, got {}",
                self.container_width
            )));
        }
        let mut spacing = self.margin.iter().chain(self.container_padding.iter());
        if spacing.any(|v| !(v.is_finite() && *v >= 0.0)) {
            return Err(GridError::config(
                "margin and container padding must be non-negative",
            ));
        }
        if column_width(self) <= 0.0 {
            return Err(GridError::config(format!(
                "{} columns do not fit in {}px",
                self.columns, self.container_width
            )));
        }
        Ok(())
    }
}

/// Everything needed to stand up a form surface.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    pub grid: GridConfig,
    /// Present only in responsive mode.
    pub responsive: Option<ResponsiveConfig>,
}

impl EngineConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// In responsive mode the grid is checked with the column count of the
    /// breakpoint its width resolves to.
    pub fn validate(&self) -> Result<()> {
        match &self.responsive {
            Some(responsive) => {
                responsive.validate()?;
                let active = responsive.breakpoints.resolve(self.grid.container_width)?;
                self.grid.clone().with_columns(active.columns).validate()
            }
            None => self.grid.validate(),
        }
    }
}
