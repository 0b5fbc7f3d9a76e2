//! Error types for playground operations.

use thiserror::Error;

use crate::ElementType;

/// Result type for playground operations.
pub type CanvasResult<T> = Result<T, CanvasError>;

/// Errors that can occur in playground operations.
///
/// None of these leave an element partially modified: a failed edit
/// leaves the target exactly as it was.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CanvasError {
    /// The host asked for an element type outside the closed set.
    #[error("Unknown element type: {0}")]
    UnknownElementType(String),

    /// The property is not declared for this element type.
    #[error("Property '{property}' does not apply to {element_type} elements")]
    UnknownProperty {
        /// Type of the element the edit targeted.
        element_type: ElementType,
        /// Name of the rejected property.
        property: String,
    },

    /// The raw value could not be coerced to the property's kind.
    #[error("Invalid value for '{property}': {reason}")]
    InvalidValue {
        /// Name of the property being edited.
        property: String,
        /// Why coercion failed.
        reason: String,
    },

    /// Element not found on the canvas.
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// A field change arrived while nothing was selected.
    #[error("No element is selected")]
    NoSelection,
}

impl CanvasError {
    /// Whether the host can simply drop the edit and carry on.
    ///
    /// `UnknownElementType` and `ElementNotFound` point at a bug in the
    /// host glue rather than at user input.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::UnknownProperty { .. } | Self::InvalidValue { .. } | Self::NoSelection
        )
    }
}
