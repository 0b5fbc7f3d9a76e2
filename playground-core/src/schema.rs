//! Property schema registry.
//!
//! One static, ordered table of [`PropertyDescriptor`]s per element type.
//! The form generator renders from these tables and the property applier
//! validates against them, so they are the only place property names,
//! kinds, ranges and defaults are declared.
//!
//! | Type  | Properties                                          |
//! |-------|-----------------------------------------------------|
//! | Text  | `fontFamily`, `fontSize`, `bold`, `italic`, `underline` |
//! | Image | `src`                                               |
//! | Shape | `pathData`, `fill`, `stroke`, `strokeWidth`         |
//!
//! `width` and `height` are common to every type and live in the element's
//! size rather than its property map.

use serde::Serialize;

use crate::element::ElementType;
use crate::value::{PropertyMap, PropertyValue};

/// Font families offered for text elements.
pub const FONT_FAMILIES: &[&str] = &["Arial", "Times New Roman", "Verdana", "Courier New"];

/// Smallest allowed text size in pixels.
pub const MIN_FONT_SIZE: f64 = 8.0;

/// Largest allowed text size in pixels.
pub const MAX_FONT_SIZE: f64 = 72.0;

/// Placeholder image for freshly dropped image elements.
pub const DEFAULT_IMAGE_SRC: &str = "https://placehold.co/600x400";

/// Diamond outline used for freshly dropped shapes.
pub const DEFAULT_PATH_DATA: &str = "M50 0 L100 50 L50 100 L0 50 Z";

/// The kind of value a property holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    /// Real or whole number.
    Number,
    /// Free-form string.
    String,
    /// Boolean flag.
    Boolean,
    /// One of a fixed list of members.
    Enum,
    /// CSS color string.
    Color,
}

/// Limits on the values a property accepts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Constraints {
    /// Anything of the right kind.
    None,
    /// Numeric bounds; values outside are clamped, not rejected.
    Range {
        /// Inclusive lower bound.
        min: Option<f64>,
        /// Inclusive upper bound.
        max: Option<f64>,
        /// Round to the nearest whole number before clamping.
        integer: bool,
    },
    /// Allowed enum members.
    Members {
        /// Member names, in display order.
        options: &'static [&'static str],
    },
}

impl Constraints {
    /// Whether `value` is one of the declared members. Always true for
    /// non-enum constraints.
    #[must_use]
    pub fn allows_member(&self, value: &str) -> bool {
        match self {
            Self::Members { options } => options.contains(&value),
            Self::None | Self::Range { .. } => true,
        }
    }
}

/// Widget the host should render for a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlKind {
    /// Numeric text input.
    Number,
    /// Bounded slider.
    Slider,
    /// Checkbox.
    Checkbox,
    /// Drop-down of enum members.
    Select,
    /// Single-line text input.
    Text,
    /// URL input.
    Url,
    /// Color picker.
    Color,
}

/// Schema default, kept `Copy` so the tables can be `static`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DefaultValue {
    /// Whole-number default.
    Integer(i64),
    /// Real-number default.
    Number(f64),
    /// Boolean default.
    Boolean(bool),
    /// String, enum member, or color default.
    Text(&'static str),
}

impl DefaultValue {
    /// Materialize as an owned property value.
    #[must_use]
    pub fn to_value(self) -> PropertyValue {
        match self {
            Self::Integer(n) => PropertyValue::Integer(n),
            Self::Number(n) => PropertyValue::Number(n),
            Self::Boolean(b) => PropertyValue::Boolean(b),
            Self::Text(s) => PropertyValue::Text(s.to_string()),
        }
    }
}

/// Declaration of one editable property.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PropertyDescriptor {
    /// Property name as used by the host (`fontSize`, `strokeWidth`, ...).
    pub name: &'static str,
    /// Human-readable label for the form.
    pub label: &'static str,
    /// Value kind used for coercion.
    pub kind: ValueKind,
    /// Range or membership limits.
    pub constraints: Constraints,
    /// Widget hint for the form.
    pub control: ControlKind,
    /// Value given to new elements.
    pub default: DefaultValue,
}

/// Which dimension of an element's size a common property edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    /// `size.width`
    Width,
    /// `size.height`
    Height,
}

/// Where a property name resolves to for a given element type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropertySlot {
    /// One of the common size fields.
    Dimension(Dimension, &'static PropertyDescriptor),
    /// A type-specific entry in the property map.
    Property(&'static PropertyDescriptor),
}

impl PropertySlot {
    /// The descriptor behind this slot.
    #[must_use]
    pub fn descriptor(&self) -> &'static PropertyDescriptor {
        match self {
            Self::Dimension(_, descriptor) | Self::Property(descriptor) => descriptor,
        }
    }
}

const NON_NEGATIVE: Constraints = Constraints::Range {
    min: Some(0.0),
    max: None,
    integer: false,
};

static COMMON_PROPERTIES: [PropertyDescriptor; 2] = [
    PropertyDescriptor {
        name: "width",
        label: "Width",
        kind: ValueKind::Number,
        constraints: NON_NEGATIVE,
        control: ControlKind::Number,
        default: DefaultValue::Number(crate::element::DEFAULT_ELEMENT_SIZE),
    },
    PropertyDescriptor {
        name: "height",
        label: "Height",
        kind: ValueKind::Number,
        constraints: NON_NEGATIVE,
        control: ControlKind::Number,
        default: DefaultValue::Number(crate::element::DEFAULT_ELEMENT_SIZE),
    },
];

const fn flag(name: &'static str, label: &'static str) -> PropertyDescriptor {
    PropertyDescriptor {
        name,
        label,
        kind: ValueKind::Boolean,
        constraints: Constraints::None,
        control: ControlKind::Checkbox,
        default: DefaultValue::Boolean(false),
    }
}

static TEXT_PROPERTIES: [PropertyDescriptor; 5] = [
    PropertyDescriptor {
        name: "fontFamily",
        label: "Font Family",
        kind: ValueKind::Enum,
        constraints: Constraints::Members {
            options: FONT_FAMILIES,
        },
        control: ControlKind::Select,
        default: DefaultValue::Text("Arial"),
    },
    PropertyDescriptor {
        name: "fontSize",
        label: "Font Size",
        kind: ValueKind::Number,
        constraints: Constraints::Range {
            min: Some(MIN_FONT_SIZE),
            max: Some(MAX_FONT_SIZE),
            integer: true,
        },
        control: ControlKind::Slider,
        default: DefaultValue::Integer(16),
    },
    flag("bold", "Bold"),
    flag("italic", "Italic"),
    flag("underline", "Underline"),
];

static IMAGE_PROPERTIES: [PropertyDescriptor; 1] = [PropertyDescriptor {
    name: "src",
    label: "Image URL",
    kind: ValueKind::String,
    constraints: Constraints::None,
    control: ControlKind::Url,
    default: DefaultValue::Text(DEFAULT_IMAGE_SRC),
}];

static SHAPE_PROPERTIES: [PropertyDescriptor; 4] = [
    PropertyDescriptor {
        name: "pathData",
        label: "SVG Path Data",
        kind: ValueKind::String,
        constraints: Constraints::None,
        control: ControlKind::Text,
        default: DefaultValue::Text(DEFAULT_PATH_DATA),
    },
    PropertyDescriptor {
        name: "fill",
        label: "Fill Color",
        kind: ValueKind::Color,
        constraints: Constraints::None,
        control: ControlKind::Color,
        default: DefaultValue::Text("#dddddd"),
    },
    PropertyDescriptor {
        name: "stroke",
        label: "Stroke Color",
        kind: ValueKind::Color,
        constraints: Constraints::None,
        control: ControlKind::Color,
        default: DefaultValue::Text("#000000"),
    },
    PropertyDescriptor {
        name: "strokeWidth",
        label: "Stroke Width",
        kind: ValueKind::Number,
        constraints: NON_NEGATIVE,
        control: ControlKind::Number,
        default: DefaultValue::Number(1.0),
    },
];

/// The ordered type-specific properties of `element_type`.
#[must_use]
pub fn schema_for(element_type: ElementType) -> &'static [PropertyDescriptor] {
    match element_type {
        ElementType::Text => &TEXT_PROPERTIES,
        ElementType::Image => &IMAGE_PROPERTIES,
        ElementType::Shape => &SHAPE_PROPERTIES,
    }
}

/// The `width` and `height` descriptors shared by every type.
#[must_use]
pub fn common_properties() -> &'static [PropertyDescriptor] {
    &COMMON_PROPERTIES
}

/// Find a type-specific descriptor by name.
#[must_use]
pub fn descriptor(element_type: ElementType, name: &str) -> Option<&'static PropertyDescriptor> {
    schema_for(element_type).iter().find(|d| d.name == name)
}

/// Resolve `name` against the common size fields and then the type's
/// schema. `None` means the property does not apply to this type.
#[must_use]
pub fn lookup(element_type: ElementType, name: &str) -> Option<PropertySlot> {
    match name {
        "width" => Some(PropertySlot::Dimension(Dimension::Width, &COMMON_PROPERTIES[0])),
        "height" => Some(PropertySlot::Dimension(Dimension::Height, &COMMON_PROPERTIES[1])),
        _ => descriptor(element_type, name).map(PropertySlot::Property),
    }
}

/// A property map holding every default for `element_type`.
#[must_use]
pub fn defaults_for(element_type: ElementType) -> PropertyMap {
    schema_for(element_type)
        .iter()
        .map(|d| (d.name.to_string(), d.default.to_value()))
        .collect()
}
