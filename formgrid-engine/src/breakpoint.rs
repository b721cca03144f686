//! Responsive breakpoints.
//!
//! A breakpoint activates once the container is at least `min_width` pixels
//! wide. The active breakpoint is the one with the greatest `min_width` that
//! still fits; below every threshold the narrowest breakpoint applies.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Breakpoint {
    pub min_width: f32,
    pub columns: u32,
}

impl Breakpoint {
    pub const fn new(min_width: f32, columns: u32) -> Self {
        Self { min_width, columns }
    }
}

/// The breakpoint chosen for a container width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedBreakpoint {
    pub name: String,
    pub columns: u32,
}

/// Named breakpoints in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BreakpointTable {
    entries: IndexMap<String, Breakpoint>,
}

impl BreakpointTable {
    /// Build and validate a table.
    pub fn new<N: Into<String>>(entries: impl IntoIterator<Item = (N, Breakpoint)>) -> Result<Self> {
        let table = Self {
            entries: entries
                .into_iter()
                .map(|(name, bp)| (name.into(), bp))
                .collect(),
        };
        table.validate()?;
        Ok(table)
    }

    pub fn validate(&self) -> Result<()> {
        if self.entries.is_empty() {
            return Err(GridError::config("breakpoint table is empty"));
        }
        for (name, bp) in &self.entries {
            if bp.columns == 0 {
                return Err(GridError::config(format!(
                    "breakpoint {name:?} has no columns"
                )));
            }
            if !bp.min_width.is_finite() {
                return Err(GridError::config(format!(
                    "breakpoint {name:?} has a non-finite minimum width"
                )));
            }
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Breakpoint> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Breakpoint)> {
        self.entries.iter().map(|(name, bp)| (name.as_str(), bp))
    }

    /// Pick the breakpoint for `container_width`.
    ///
    /// Thresholds are inclusive. Equal thresholds resolve to the entry
    /// declared first. Fails only on an empty table.
    pub fn resolve(&self, container_width: f32) -> Result<ResolvedBreakpoint> {
        let fitting = self
            .entries
            .iter()
            .filter(|(_, bp)| bp.min_width <= container_width)
            .fold(None, |best: Option<(&String, &Breakpoint)>, entry| match best {
                Some(b) if b.1.min_width >= entry.1.min_width => Some(b),
                _ => Some(entry),
            });

        let chosen = match fitting {
            Some(entry) => entry,
            None => self
                .entries
                .iter()
                .fold(None, |best: Option<(&String, &Breakpoint)>, entry| match best {
                    Some(b) if b.1.min_width <= entry.1.min_width => Some(b),
                    _ => Some(entry),
                })
                .ok_or_else(|| GridError::config("breakpoint table is empty"))?,
        };

        Ok(ResolvedBreakpoint {
            name: chosen.0.clone(),
            columns: chosen.1.columns,
        })
    }
}
