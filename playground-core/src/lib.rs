//! # Playground Core
//!
//! Element model and property synchronization for a drag-and-drop canvas
//! editor. Compiles to WASM so the browser host can drive it directly.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                  playground-core                     │
//! ├──────────────────────────────────────────────────────┤
//! │  Playground (controller)                             │
//! │  - drop / drag-move / select / field-change handlers │
//! │  - Selection    - Canvas (insertion-ordered)         │
//! ├───────────────────────────┬──────────────────────────┤
//! │  Form Generator           │  Property Applier        │
//! │  element -> form fields   │  raw value -> coerced    │
//! ├───────────────────────────┴──────────────────────────┤
//! │  Schema Registry  (per-type property descriptors)    │
//! ├──────────────────────────────────────────────────────┤
//! │  Element Model    │  Render projection (per type)    │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! The element model is the only source of property values. Forms and
//! visuals are both derived from it and never read back.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod applier;
pub mod canvas;
pub mod config;
pub mod element;
pub mod error;
pub mod event;
pub mod form;
pub mod playground;
pub mod render;
pub mod schema;
pub mod selection;
pub mod value;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use applier::{apply_property, coerce, PropertyChange};
pub use canvas::Canvas;
pub use config::PlaygroundConfig;
pub use element::{create_element, Element, ElementId, ElementType, Position, Size};
pub use error::{CanvasError, CanvasResult};
pub use event::HostEvent;
pub use form::{generate_form, FieldDescriptor, FormDescription};
pub use playground::{Playground, RenderHost};
pub use render::{render_element, VisualContent, VisualNode};
pub use schema::{
    schema_for, Constraints, ControlKind, DefaultValue, PropertyDescriptor, ValueKind,
};
pub use selection::Selection;
pub use value::{PropertyMap, PropertyValue, RawValue};

/// Playground core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
