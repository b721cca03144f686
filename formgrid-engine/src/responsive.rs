//! Responsive mode: column counts and layouts that follow the container width.

use std::collections::HashMap;

use formgrid_api::GridRect;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::breakpoint::{BreakpointTable, ResolvedBreakpoint};
use crate::error::{GridError, Result};
use crate::layout_store::LayoutStore;

/// What happens to the top-level layout when the breakpoint changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BreakpointPolicy {
    /// Reset to the configured default layout of the new breakpoint.
    #[default]
    Reset,
    /// Remember each breakpoint's layout and restore it on return.
    Preserve,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResponsiveConfig {
    pub breakpoints: BreakpointTable,
    /// Default top-level layout per breakpoint name.
    pub default_layouts: IndexMap<String, Vec<GridRect>>,
    pub policy: BreakpointPolicy,
}

impl ResponsiveConfig {
    pub fn validate(&self) -> Result<()> {
        self.breakpoints.validate()?;
        if let Some(name) = self
            .default_layouts
            .keys()
            .find(|name| self.breakpoints.get(name).is_none())
        {
            return Err(GridError::config(format!(
                "default layout for unknown breakpoint {name:?}"
            )));
        }
        Ok(())
    }
}

/// The outcome of crossing a breakpoint threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct BreakpointSwitch {
    pub from: String,
    pub to: ResolvedBreakpoint,
    /// The top-level layout to adopt, in the current store order.
    pub layout: Vec<GridRect>,
}

#[derive(Debug, Clone)]
pub(crate) struct ResponsiveState {
    config: ResponsiveConfig,
    active: ResolvedBreakpoint,
    saved: HashMap<String, Vec<GridRect>>,
}

impl ResponsiveState {
    pub fn new(config: ResponsiveConfig, container_width: f32) -> Result<Self> {
        config.validate()?;
        let active = config.breakpoints.resolve(container_width)?;
        Ok(Self {
            config,
            active,
            saved: HashMap::new(),
        })
    }

    pub fn active(&self) -> &ResolvedBreakpoint {
        &self.active
    }

    /// Column count `container_width` would resolve to, without switching.
    pub fn columns_for(&self, container_width: f32) -> Result<u32> {
        Ok(self.config.breakpoints.resolve(container_width)?.columns)
    }

    /// The top-level layout to mount with: the active breakpoint's default
    /// layout where it has entries, everything fitted into its columns.
    pub fn initial_layout(&self, current: &[GridRect]) -> Result<Vec<GridRect>> {
        let base = self.config.default_layouts.get(&self.active.name);
        relayout(base.map(Vec::as_slice), current, self.active.columns)
    }

    /// Re-resolve for a new width. `current` is the live top-level layout.
    pub fn width_changed(
        &mut self,
        container_width: f32,
        current: &[GridRect],
    ) -> Result<Option<BreakpointSwitch>> {
        let resolved = self.config.breakpoints.resolve(container_width)?;
        if resolved.name == self.active.name {
            return Ok(None);
        }

        if self.config.policy == BreakpointPolicy::Preserve {
            self.saved.insert(self.active.name.clone(), current.to_vec());
        }
        let base = match self.config.policy {
            BreakpointPolicy::Reset => self.config.default_layouts.get(&resolved.name),
            BreakpointPolicy::Preserve => self
                .saved
                .get(&resolved.name)
                .or_else(|| self.config.default_layouts.get(&resolved.name)),
        };
        let layout = relayout(base.map(Vec::as_slice), current, resolved.columns)?;

        tracing::debug!(
            from = %self.active.name,
            to = %resolved.name,
            columns = resolved.columns,
            policy = ?self.config.policy,
            "breakpoint changed"
        );
        let from = std::mem::replace(&mut self.active, resolved.clone());
        Ok(Some(BreakpointSwitch {
            from: from.name,
            to: resolved,
            layout,
        }))
    }
}

/// Take each item's rectangle from `base` when it has one, keep the current
/// one otherwise, then fit everything into `columns`.
fn relayout(
    base: Option<&[GridRect]>,
    current: &[GridRect],
    columns: u32,
) -> Result<Vec<GridRect>> {
    let rects = current.iter().map(|rect| {
        base.and_then(|base| base.iter().find(|b| b.id == rect.id))
            .unwrap_or(rect)
            .clone()
    });
    let mut store = LayoutStore::from_rects(rects)?;
    store.clamp_to_columns(columns);
    Ok(store.all())
}
