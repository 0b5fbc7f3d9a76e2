//! Single-element selection state.

use serde::{Deserialize, Serialize};

use crate::ElementId;

/// Which element, if any, the property form is bound to.
///
/// Selecting overwrites the previous choice; there is no multi-select and
/// no intermediate state between two selections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    active: Option<ElementId>,
}

impl Selection {
    /// Create an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `id` the active element, returning the previously active one.
    pub fn select(&mut self, id: ElementId) -> Option<ElementId> {
        self.active.replace(id)
    }

    /// The active element.
    #[must_use]
    pub fn active(&self) -> Option<ElementId> {
        self.active
    }

    /// Whether `id` is the active element.
    #[must_use]
    pub fn is_selected(&self, id: ElementId) -> bool {
        self.active == Some(id)
    }

    /// Drop the selection if it points at `id`. Returns whether it did.
    pub fn release(&mut self, id: ElementId) -> bool {
        if self.is_selected(id) {
            self.active = None;
            true
        } else {
            false
        }
    }
}
