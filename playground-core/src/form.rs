//! Property form generation.
//!
//! A [`FormDescription`] is the declarative input to the host's property
//! panel: one field per editable property, pre-populated from the element
//! model. Rendering actual controls is left to the host.

use serde::Serialize;

use crate::element::{Element, ElementId, ElementType};
use crate::schema::{self, Constraints, ControlKind, PropertyDescriptor};
use crate::value::PropertyValue;

/// One field of the property form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDescriptor {
    /// Property the field edits; the host echoes it back on change.
    pub property: &'static str,
    /// Label shown next to the control.
    pub label: &'static str,
    /// Widget to render.
    pub control: ControlKind,
    /// Value to pre-populate the control with.
    pub current_value: PropertyValue,
    /// Limits the control should enforce (slider bounds, select options).
    pub constraints: Constraints,
}

impl FieldDescriptor {
    fn new(descriptor: &'static PropertyDescriptor, current_value: PropertyValue) -> Self {
        Self {
            property: descriptor.name,
            label: descriptor.label,
            control: descriptor.control,
            current_value,
            constraints: descriptor.constraints,
        }
    }
}

/// The full property form for one element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormDescription {
    /// Element the form edits.
    pub element_id: ElementId,
    /// Type of that element.
    pub element_type: ElementType,
    /// Fields in display order: `width`, `height`, then the type's schema.
    pub fields: Vec<FieldDescriptor>,
}

impl FormDescription {
    /// Find a field by property name.
    #[must_use]
    pub fn field(&self, property: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.property == property)
    }
}

/// Build the property form for `element`.
///
/// Pure: the result depends only on the element's type, size and stored
/// properties, so an unmodified element always yields an identical form.
#[must_use]
pub fn generate_form(element: &Element) -> FormDescription {
    let schema = schema::schema_for(element.element_type());
    let mut fields = Vec::with_capacity(schema.len() + 2);

    let [width, height] = common_fields();
    fields.push(FieldDescriptor::new(
        width,
        PropertyValue::Number(element.size.width),
    ));
    fields.push(FieldDescriptor::new(
        height,
        PropertyValue::Number(element.size.height),
    ));

    for descriptor in schema {
        let current = element
            .property(descriptor.name)
            .cloned()
            .unwrap_or_else(|| descriptor.default.to_value());
        fields.push(FieldDescriptor::new(descriptor, current));
    }

    FormDescription {
        element_id: element.id(),
        element_type: element.element_type(),
        fields,
    }
}

fn common_fields() -> [&'static PropertyDescriptor; 2] {
    let common = schema::common_properties();
    [&common[0], &common[1]]
}
