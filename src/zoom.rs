//! Font zoom state
//!
//! Scales a base font size by a multiplicative factor. Every change alters
//! the font metrics the pages are laid out with, so callers must repaginate
//! after any of the mutating methods.

use crate::viewport::FontMetrics;

/// Point size of the text font at zoom factor 1.0
pub const DEFAULT_BASE_FONT_SIZE: u32 = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct ZoomController {
    /// Current zoom factor (1.0 = 100%)
    factor: f32,

    /// Font size the factor is applied to
    base_font_size: u32,

    /// Lowest factor this display can show
    min_factor: f32,
}

impl Default for ZoomController {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_FONT_SIZE)
    }
}

impl ZoomController {
    /// Zoom rate multiplier per step - 10%
    pub const ZOOM_STEP: f32 = 1.1;
    /// Minimum allowed zoom factor
    pub const MIN_SCALE: f32 = 0.1;
    /// Maximum allowed zoom factor
    pub const MAX_SCALE: f32 = 10.0;

    pub fn new(base_font_size: u32) -> Self {
        Self {
            factor: 1.0,
            base_font_size: base_font_size.max(1),
            min_factor: Self::MIN_SCALE,
        }
    }

    /// Raise the lower bound, e.g. for displays that cannot draw glyphs
    /// smaller than their base cell.
    pub fn with_min_factor(mut self, min_factor: f32) -> Self {
        self.min_factor = if min_factor.is_finite() {
            min_factor.clamp(Self::MIN_SCALE, Self::MAX_SCALE)
        } else {
            Self::MIN_SCALE
        };
        self.factor = self.clamp_factor(self.factor);
        self
    }

    /// Returns the current zoom factor
    pub fn factor(&self) -> f32 {
        self.factor
    }

    pub fn base_font_size(&self) -> u32 {
        self.base_font_size
    }

    /// Zoom in by one step
    pub fn zoom_in(&mut self) -> bool {
        self.set_factor(self.factor * Self::ZOOM_STEP)
    }

    /// Zoom out by one step
    pub fn zoom_out(&mut self) -> bool {
        self.set_factor(self.factor / Self::ZOOM_STEP)
    }

    /// Back to 100%
    pub fn reset(&mut self) -> bool {
        self.set_factor(1.0)
    }

    /// Returns true when the factor actually changed.
    pub fn set_factor(&mut self, factor: f32) -> bool {
        let clamped = self.clamp_factor(factor);
        let changed = clamped != self.factor;
        self.factor = clamped;
        changed
    }

    /// Font size after zoom, rounded to whole points and never zero.
    pub fn font_size(&self) -> u32 {
        ((self.base_font_size as f32 * self.factor).round() as u32).max(1)
    }

    pub fn font_metrics(&self) -> FontMetrics {
        FontMetrics::for_point_size(self.font_size())
    }

    /// Zoom as a whole percentage for status lines
    pub fn percent(&self) -> u32 {
        (self.factor * 100.0).round() as u32
    }

    /// Clamp factor to valid range, handling NaN/Inf
    fn clamp_factor(&self, factor: f32) -> f32 {
        if !factor.is_finite() {
            1.0_f32.max(self.min_factor)
        } else {
            factor.clamp(self.min_factor, Self::MAX_SCALE)
        }
    }
}
