//! Canvas elements - the building blocks of the playground.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schema;
use crate::value::{PropertyMap, PropertyValue};
use crate::CanvasError;

/// Default element width and height in pixels.
pub const DEFAULT_ELEMENT_SIZE: f64 = 100.0;

/// Unique identifier for an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementId(Uuid);

impl ElementId {
    /// Create a new unique element ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an ID from its string form.
    ///
    /// # Errors
    ///
    /// Returns an error if `s` is not a valid UUID.
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(s).map(Self)
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The closed set of element types a template can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    /// Styled text block.
    Text,
    /// Image loaded from a URL.
    Image,
    /// SVG path shape.
    Shape,
}

impl ElementType {
    /// Every element type, in palette order.
    pub const ALL: [Self; 3] = [Self::Text, Self::Image, Self::Shape];

    /// The lowercase name the host uses for this type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Shape => "shape",
        }
    }
}

impl std::fmt::Display for ElementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElementType {
    type Err = CanvasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CanvasError::UnknownElementType(s.to_string()))
    }
}

/// Canvas-local position of an element's top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Pixels from the left edge of the canvas.
    pub x: f64,
    /// Pixels from the top edge of the canvas.
    pub y: f64,
}

impl Position {
    /// Create a position.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Element dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Size {
    /// Create a size.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether both dimensions are finite and non-negative.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        [self.width, self.height]
            .iter()
            .all(|d| d.is_finite() && *d >= 0.0)
    }

    /// Negative dimensions become 0; non-finite ones fall back to
    /// [`DEFAULT_ELEMENT_SIZE`].
    #[must_use]
    pub fn sanitized(self) -> Self {
        let fix = |d: f64| {
            if d.is_finite() {
                d.max(0.0)
            } else {
                DEFAULT_ELEMENT_SIZE
            }
        };
        Self::new(fix(self.width), fix(self.height))
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::new(DEFAULT_ELEMENT_SIZE, DEFAULT_ELEMENT_SIZE)
    }
}

/// A placed element: type, geometry and typed property values.
///
/// The id, type and property map are only reachable through accessors so
/// the property map can never hold a key outside the type's schema.
/// Position and size are plain data; drag handlers and the property
/// applier write them directly.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    id: ElementId,
    #[serde(rename = "type")]
    element_type: ElementType,
    /// Top-left corner in canvas coordinates.
    pub position: Position,
    /// Width and height.
    pub size: Size,
    properties: PropertyMap,
}

impl Element {
    /// Create an element of the given type at `(x, y)` with default size
    /// and the schema defaults for every property.
    #[must_use]
    pub fn create(element_type: ElementType, x: f64, y: f64) -> Self {
        Self {
            id: ElementId::new(),
            element_type,
            position: Position::new(x, y),
            size: Size::default(),
            properties: schema::defaults_for(element_type),
        }
    }

    /// Override the initial size. The size is [sanitized](Size::sanitized)
    /// so it always satisfies the width/height schema bounds.
    #[must_use]
    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size.sanitized();
        self
    }

    /// The element's identifier.
    #[must_use]
    pub fn id(&self) -> ElementId {
        self.id
    }

    /// The element's type.
    #[must_use]
    pub fn element_type(&self) -> ElementType {
        self.element_type
    }

    /// All stored property values, keyed by property name.
    #[must_use]
    pub fn properties(&self) -> &PropertyMap {
        &self.properties
    }

    /// The stored value of one property.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }

    /// The stored value of a schema property, or its declared default if
    /// nothing is stored. `None` when the type does not declare `name`.
    #[must_use]
    pub fn value_of(&self, name: &str) -> Option<PropertyValue> {
        let descriptor = schema::descriptor(self.element_type, name)?;
        Some(
            self.properties
                .get(name)
                .cloned()
                .unwrap_or_else(|| descriptor.default.to_value()),
        )
    }

    /// Store a property value, returning whether it differed from the
    /// previous one. Callers must have validated `name` against the schema.
    pub(crate) fn set_property(&mut self, name: &'static str, value: PropertyValue) -> bool {
        let changed = self.properties.get(name) != Some(&value);
        self.properties.insert(name.to_string(), value);
        changed
    }

    /// Check if a point (in canvas coordinates) is within this element.
    #[must_use]
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        let Position { x: left, y: top } = self.position;
        x >= left && x <= left + self.size.width && y >= top && y <= top + self.size.height
    }
}

/// Construct a new element with schema defaults. See [`Element::create`].
#[must_use]
pub fn create_element(element_type: ElementType, x: f64, y: f64) -> Element {
    Element::create(element_type, x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_text_element_defaults() {
        let element = create_element(ElementType::Text, 50.0, 80.0);

        assert_eq!(element.element_type(), ElementType::Text);
        assert_eq!(element.position, Position::new(50.0, 80.0));
        assert_eq!(element.size, Size::new(100.0, 100.0));
        assert_eq!(
            element.property("fontFamily"),
            Some(&PropertyValue::Text("Arial".to_string()))
        );
        assert_eq!(element.property("fontSize"), Some(&PropertyValue::Integer(16)));
        assert_eq!(element.property("bold"), Some(&PropertyValue::Boolean(false)));
    }

    #[test]
    fn test_properties_only_hold_schema_keys() {
        for element_type in ElementType::ALL {
            let element = create_element(element_type, 0.0, 0.0);
            let declared: Vec<_> = schema::schema_for(element_type)
                .iter()
                .map(|d| d.name)
                .collect();
            for key in element.properties().keys() {
                assert!(
                    declared.contains(&key.as_str()),
                    "{key} leaked into {element_type}"
                );
            }
            assert_eq!(element.properties().len(), declared.len());
        }
    }

    #[test]
    fn test_ids_are_unique() {
        let a = create_element(ElementType::Image, 0.0, 0.0);
        let b = create_element(ElementType::Image, 0.0, 0.0);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_element_id_parse_roundtrip() {
        let id = ElementId::new();
        let parsed = ElementId::parse(&id.to_string()).expect("valid uuid");
        assert_eq!(id, parsed);
        assert!(ElementId::parse("not-a-uuid").is_err());
    }

    #[test]
    fn test_element_type_from_str() {
        assert_eq!("text".parse::<ElementType>(), Ok(ElementType::Text));
        assert_eq!(" Shape ".parse::<ElementType>(), Ok(ElementType::Shape));
        assert_eq!(
            "video".parse::<ElementType>(),
            Err(CanvasError::UnknownElementType("video".to_string()))
        );
    }

    #[test]
    fn test_value_of_falls_back_to_default() {
        let element = create_element(ElementType::Shape, 0.0, 0.0);
        assert_eq!(
            element.value_of("stroke"),
            Some(PropertyValue::Text("#000000".to_string()))
        );
        assert_eq!(element.value_of("fontSize"), None);
    }

    #[test]
    fn test_with_size_sanitizes() {
        let element =
            create_element(ElementType::Text, 0.0, 0.0).with_size(Size::new(-50.0, f64::NAN));
        assert_eq!(element.size, Size::new(0.0, DEFAULT_ELEMENT_SIZE));
        assert!(element.size.is_valid());
        assert!(!Size::new(-1.0, 10.0).is_valid());
        assert!(!Size::new(10.0, f64::INFINITY).is_valid());
    }

    #[test]
    fn test_contains_point() {
        let element = create_element(ElementType::Shape, 10.0, 10.0);
        assert!(element.contains_point(60.0, 60.0));
        assert!(element.contains_point(110.0, 110.0));
        assert!(!element.contains_point(5.0, 60.0));
        assert!(!element.contains_point(60.0, 111.0));
    }
}
