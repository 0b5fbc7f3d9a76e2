//! Events delivered by the host UI and drag layer.

use serde::{Deserialize, Serialize};

use crate::{ElementId, RawValue};

/// All inbound events the playground handles.
///
/// The host's drag/drop library and form controls produce these; the
/// playground processes them one at a time, in delivery order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum HostEvent {
    /// A palette template was dropped onto the canvas.
    Drop {
        /// Template type name (`text`, `image`, `shape`).
        #[serde(rename = "type")]
        element_type: String,
        /// Drop X in canvas coordinates.
        x: f64,
        /// Drop Y in canvas coordinates.
        y: f64,
    },

    /// A placed element is being dragged.
    DragMove {
        /// Element being dragged.
        id: ElementId,
        /// New X in canvas coordinates.
        x: f64,
        /// New Y in canvas coordinates.
        y: f64,
    },

    /// An element was clicked.
    Select {
        /// Element that was clicked.
        id: ElementId,
    },

    /// A property form control changed.
    FieldChange {
        /// Property the control edits.
        property: String,
        /// Raw control value.
        value: RawValue,
    },

    /// An element was deleted.
    Remove {
        /// Element to delete.
        id: ElementId,
    },
}

impl HostEvent {
    /// Short event name for logging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Drop { .. } => "drop",
            Self::DragMove { .. } => "dragMove",
            Self::Select { .. } => "select",
            Self::FieldChange { .. } => "fieldChange",
            Self::Remove { .. } => "remove",
        }
    }
}
