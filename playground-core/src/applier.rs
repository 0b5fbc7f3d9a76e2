//! Applying form edits back onto elements.
//!
//! Every edit goes through three steps: resolve the property against the
//! schema, coerce the raw control value to the declared kind, then store
//! it. A failure in either of the first two leaves the element untouched.

use serde::Serialize;

use crate::element::{Element, ElementId};
use crate::schema::{self, Constraints, Dimension, PropertyDescriptor, PropertySlot, ValueKind};
use crate::value::{PropertyValue, RawValue};
use crate::{CanvasError, CanvasResult};

/// Outcome of a successful edit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyChange {
    /// Element that was edited.
    pub element_id: ElementId,
    /// Property that was edited.
    pub property: &'static str,
    /// The coerced value now stored.
    pub value: PropertyValue,
    /// Whether the stored value differs from before. `false` for repeats.
    pub changed: bool,
    /// Whether coercion altered the input (clamping or rounding), so the
    /// host control no longer shows what is stored.
    pub adjusted: bool,
}

/// Validate, coerce and store one property edit.
///
/// `width` and `height` update the element's size; every other name must
/// be declared by the schema for the element's type.
///
/// # Errors
///
/// Returns [`CanvasError::UnknownProperty`] if `property` does not apply to
/// this element type, or [`CanvasError::InvalidValue`] if `raw` cannot be
/// coerced. The element is unchanged in both cases.
pub fn apply_property(
    element: &mut Element,
    property: &str,
    raw: &RawValue,
) -> CanvasResult<PropertyChange> {
    let slot = schema::lookup(element.element_type(), property).ok_or_else(|| {
        CanvasError::UnknownProperty {
            element_type: element.element_type(),
            property: property.to_string(),
        }
    })?;
    let descriptor = slot.descriptor();

    let (value, changed, adjusted) = match slot {
        PropertySlot::Dimension(dimension, descriptor) => {
            let (parsed, pixels) = coerce_number(descriptor, raw)?;
            let target = match dimension {
                Dimension::Width => &mut element.size.width,
                Dimension::Height => &mut element.size.height,
            };
            let changed = !same_number(*target, pixels);
            *target = pixels;
            (PropertyValue::Number(pixels), changed, !same_number(parsed, pixels))
        }
        PropertySlot::Property(descriptor) if descriptor.kind == ValueKind::Number => {
            let (parsed, stored) = coerce_number(descriptor, raw)?;
            let value = number_value(&descriptor.constraints, stored);
            let changed = element.set_property(descriptor.name, value.clone());
            (value, changed, !same_number(parsed, stored))
        }
        PropertySlot::Property(descriptor) => {
            let value = coerce(descriptor, raw)?;
            let changed = element.set_property(descriptor.name, value.clone());
            (value, changed, false)
        }
    };

    tracing::debug!(
        element = %element.id(),
        property = descriptor.name,
        value = %value,
        changed,
        "Applied property"
    );

    Ok(PropertyChange {
        element_id: element.id(),
        property: descriptor.name,
        value,
        changed,
        adjusted,
    })
}

/// Convert a raw control value into the descriptor's kind.
///
/// Numbers are parsed (surrounding whitespace ignored), rounded when the
/// range is integer-valued, and clamped into the declared bounds. Booleans
/// accept `true`/`false` text as well as checkbox state. Strings and colors
/// are stored verbatim; enum values must be a declared member.
///
/// # Errors
///
/// Returns [`CanvasError::InvalidValue`] if the value cannot be converted.
pub fn coerce(descriptor: &PropertyDescriptor, raw: &RawValue) -> CanvasResult<PropertyValue> {
    match descriptor.kind {
        ValueKind::Number => {
            let (_, stored) = coerce_number(descriptor, raw)?;
            Ok(number_value(&descriptor.constraints, stored))
        }
        ValueKind::Boolean => match raw {
            RawValue::Bool(b) => Ok(PropertyValue::Boolean(*b)),
            RawValue::Text(text) => match text.trim() {
                "true" => Ok(PropertyValue::Boolean(true)),
                "false" => Ok(PropertyValue::Boolean(false)),
                _ => Err(invalid(descriptor, format!("'{text}' is not a boolean"))),
            },
        },
        ValueKind::String | ValueKind::Color => match raw {
            RawValue::Text(text) => Ok(PropertyValue::Text(text.clone())),
            RawValue::Bool(_) => Err(invalid(descriptor, "expected text, got a boolean".to_string())),
        },
        ValueKind::Enum => match raw {
            RawValue::Text(text) if descriptor.constraints.allows_member(text) => {
                Ok(PropertyValue::Text(text.clone()))
            }
            RawValue::Text(text) => Err(invalid(descriptor, format!("'{text}' is not an option"))),
            RawValue::Bool(_) => Err(invalid(descriptor, "expected an option, got a boolean".to_string())),
        },
    }
}

/// Parse a numeric control value, returning the parsed number and the
/// rounded, clamped number to store.
fn coerce_number(descriptor: &PropertyDescriptor, raw: &RawValue) -> CanvasResult<(f64, f64)> {
    let RawValue::Text(text) = raw else {
        return Err(invalid(descriptor, "expected a number, got a boolean".to_string()));
    };
    let parsed: f64 = text
        .trim()
        .parse()
        .map_err(|_| invalid(descriptor, format!("'{text}' is not a number")))?;
    if !parsed.is_finite() {
        return Err(invalid(descriptor, format!("'{text}' is not a finite number")));
    }
    Ok((parsed, clamp_number(&descriptor.constraints, parsed)))
}

fn clamp_number(constraints: &Constraints, value: f64) -> f64 {
    let Constraints::Range { min, max, integer } = *constraints else {
        return value;
    };
    let mut value = if integer { value.round() } else { value };
    if let Some(min) = min {
        value = value.max(min);
    }
    if let Some(max) = max {
        value = value.min(max);
    }
    value
}

#[allow(clippy::cast_possible_truncation)]
fn number_value(constraints: &Constraints, value: f64) -> PropertyValue {
    match constraints {
        // Bounded by the range; `as` saturates otherwise.
        Constraints::Range { integer: true, .. } => PropertyValue::Integer(value as i64),
        _ => PropertyValue::Number(value),
    }
}

/// Exact equality; rounding and clamping are deterministic.
fn same_number(a: f64, b: f64) -> bool {
    a.to_bits() == b.to_bits()
}

fn invalid(descriptor: &PropertyDescriptor, reason: String) -> CanvasError {
    CanvasError::InvalidValue {
        property: descriptor.name.to_string(),
        reason,
    }
}
