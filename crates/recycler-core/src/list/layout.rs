use serde::Serialize;

use crate::config::LayoutSettings;
use crate::{Error, Result};

/// Immutable geometry of the list: viewport, item height and spacing
///
/// Every derived quantity is a pure function of this config and the item
/// count, so nothing goes stale after an edit or a resize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    viewport_height: f32,
    item_height: f32,
    spacing: f32,
    fit_tolerance: f32,
}

/// Derived layout quantities for a given item count
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayoutMetrics {
    /// Item height plus spacing
    pub unit_size: f32,
    /// Offset at which the top slot is fully visible
    pub start_y: f32,
    /// Offset at which the top slot is about to leave the viewport
    pub end_y: f32,
    /// Offset at which the last item's bottom meets the viewport bottom
    pub end_pos_y: f32,
    /// Slots needed to cover the viewport
    pub visible_slots: usize,
    /// Deepest reachable top index
    pub max_reach_index: usize,
    /// Number of slots the pool must hold
    pub pool_size: usize,
}

impl LayoutConfig {
    pub const DEFAULT_FIT_TOLERANCE: f32 = 0.1;
    /// Upper bound on slots covering the viewport; caps the pool allocation
    pub const MAX_VISIBLE_SLOTS: usize = 4096;

    /// Validate and build a layout; rejects geometry that would divide by zero
    pub fn new(viewport_height: f32, item_height: f32, spacing: f32) -> Result<Self> {
        let layout = Self {
            viewport_height,
            item_height,
            spacing,
            fit_tolerance: Self::DEFAULT_FIT_TOLERANCE,
        };
        layout.validate()?;
        Ok(layout)
    }

    pub fn from_settings(settings: &LayoutSettings) -> Result<Self> {
        Self::new(settings.viewport_height, settings.item_height, settings.spacing)?
            .with_fit_tolerance(settings.fit_tolerance)
    }

    /// Same geometry with another viewport height
    pub fn with_viewport(self, viewport_height: f32) -> Result<Self> {
        let layout = Self {
            viewport_height,
            ..self
        };
        layout.validate()?;
        Ok(layout)
    }

    pub fn with_fit_tolerance(self, fit_tolerance: f32) -> Result<Self> {
        if !fit_tolerance.is_finite() {
            return Err(Error::InvalidLayout(format!(
                "fit tolerance must be finite, got {fit_tolerance}"
            )));
        }
        Ok(Self {
            fit_tolerance,
            ..self
        })
    }

    fn validate(&self) -> Result<()> {
        let fields = [
            ("viewport height", self.viewport_height),
            ("item height", self.item_height),
            ("spacing", self.spacing),
        ];
        if let Some((name, value)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(Error::InvalidLayout(format!("{name} must be finite, got {value}")));
        }
        if self.item_height <= 0.0 {
            return Err(Error::InvalidLayout(format!(
                "item height must be positive, got {}",
                self.item_height
            )));
        }
        if self.spacing < 0.0 {
            return Err(Error::InvalidLayout(format!(
                "spacing must not be negative, got {}",
                self.spacing
            )));
        }
        if self.viewport_height <= 0.0 {
            return Err(Error::InvalidLayout(format!(
                "viewport height must be positive, got {}",
                self.viewport_height
            )));
        }
        let unit = self.unit_size();
        if !unit.is_finite() {
            return Err(Error::InvalidLayout(format!(
                "item height plus spacing must be finite, got {unit}"
            )));
        }
        if self.viewport_height / unit >= Self::MAX_VISIBLE_SLOTS as f32 {
            return Err(Error::InvalidLayout(format!(
                "viewport {} holds more than {} items of size {unit}",
                self.viewport_height,
                Self::MAX_VISIBLE_SLOTS
            )));
        }
        Ok(())
    }

    #[inline]
    pub fn viewport_height(&self) -> f32 {
        self.viewport_height
    }

    #[inline]
    pub fn item_height(&self) -> f32 {
        self.item_height
    }

    #[inline]
    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    #[inline]
    pub fn fit_tolerance(&self) -> f32 {
        self.fit_tolerance
    }

    #[inline]
    pub fn unit_size(&self) -> f32 {
        self.item_height + self.spacing
    }

    #[inline]
    pub fn start_y(&self) -> f32 {
        self.unit_size() - self.spacing
    }

    #[inline]
    pub fn end_y(&self) -> f32 {
        self.start_y() + self.unit_size()
    }

    pub fn visible_slots(&self) -> usize {
        (self.viewport_height / self.unit_size()).floor() as usize + 1
    }

    /// True when every item fits on screen and scrolling is disabled
    pub fn fits(&self, count: usize) -> bool {
        count < self.visible_slots()
    }

    pub fn max_reach_index(&self, count: usize) -> usize {
        let visible = self.visible_slots();
        let slack = self.viewport_height - self.unit_size() * visible as f32 - self.spacing;
        if slack < self.fit_tolerance {
            (count + 1).saturating_sub(visible)
        } else {
            count.saturating_sub(visible)
        }
    }

    pub fn end_pos_y(&self) -> f32 {
        let unit = self.unit_size();
        let visible = self.visible_slots();
        let remainder = self.viewport_height - (visible - 1) as f32 * unit - self.spacing;
        (unit - remainder).rem_euclid(unit) + self.start_y()
    }

    /// Slots needed: one extra padding slot for short lists, otherwise one
    /// partially scrolled slot above and below the visible window
    pub fn pool_size(&self, count: usize) -> usize {
        let visible = self.visible_slots();
        if count < visible {
            count + 1
        } else {
            visible + 2
        }
    }

    pub fn metrics(&self, count: usize) -> LayoutMetrics {
        LayoutMetrics {
            unit_size: self.unit_size(),
            start_y: self.start_y(),
            end_y: self.end_y(),
            end_pos_y: self.end_pos_y(),
            visible_slots: self.visible_slots(),
            max_reach_index: self.max_reach_index(count),
            pool_size: self.pool_size(count),
        }
    }
}
