//! Playground configuration.

use serde::{Deserialize, Serialize};

use crate::{CanvasError, CanvasResult, Size};

/// Default viewport width in pixels.
pub const DEFAULT_VIEWPORT_WIDTH: f64 = 800.0;

/// Default viewport height in pixels.
pub const DEFAULT_VIEWPORT_HEIGHT: f64 = 600.0;

/// Settings for a playground session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaygroundConfig {
    /// Canvas width in pixels.
    pub viewport_width: f64,
    /// Canvas height in pixels.
    pub viewport_height: f64,
    /// Size given to newly dropped elements.
    pub element_size: Size,
    /// Keep dragged elements inside the viewport.
    pub contain_drag: bool,
}

impl Default for PlaygroundConfig {
    fn default() -> Self {
        Self {
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
            element_size: Size::default(),
            contain_drag: true,
        }
    }
}

impl PlaygroundConfig {
    /// Set the viewport size.
    #[must_use]
    pub fn with_viewport(mut self, width: f64, height: f64) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    /// Set the size given to newly dropped elements.
    #[must_use]
    pub fn with_element_size(mut self, size: Size) -> Self {
        self.element_size = size;
        self
    }

    /// Check that the viewport and element size are usable.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::InvalidValue`] if the viewport is not finite
    /// and positive, or the element size is not finite and non-negative.
    pub fn validate(&self) -> CanvasResult<()> {
        let viewport_ok = [self.viewport_width, self.viewport_height]
            .iter()
            .all(|d| d.is_finite() && *d > 0.0);
        if !viewport_ok {
            return Err(CanvasError::InvalidValue {
                property: "viewport".to_string(),
                reason: format!(
                    "{}x{} is not a positive finite size",
                    self.viewport_width, self.viewport_height
                ),
            });
        }
        if !self.element_size.is_valid() {
            return Err(CanvasError::InvalidValue {
                property: "element_size".to_string(),
                reason: format!(
                    "{}x{} is not a non-negative finite size",
                    self.element_size.width, self.element_size.height
                ),
            });
        }
        Ok(())
    }

    /// Enable or disable drag containment.
    #[must_use]
    pub fn with_contain_drag(mut self, contain: bool) -> Self {
        self.contain_drag = contain;
        self
    }
}
