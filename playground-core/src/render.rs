//! Projection from the element model to what the host paints.
//!
//! Rendering only ever reads the model. Each element type has one content
//! renderer, picked by [`renderer_for`]; the host turns the resulting
//! [`VisualNode`] into DOM, SVG or anything else.

use serde::Serialize;

use crate::element::{Element, ElementId, ElementType};

/// Placeholder shown inside freshly dropped text elements.
pub const PLACEHOLDER_TEXT: &str = "Sample Text";

/// Shape path coordinates are authored against this box.
pub const SHAPE_VIEW_BOX: &str = "0 0 100 100";

/// Border color applied to the selected element.
pub const SELECTION_BORDER_COLOR: &str = "#60a5fa";

/// Type-specific visual content.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum VisualContent {
    /// Styled text block.
    Text {
        /// Text to display.
        text: String,
        /// CSS `font-family`.
        font_family: String,
        /// Font size in pixels.
        font_size: f64,
        /// CSS `font-weight`.
        font_weight: &'static str,
        /// CSS `font-style`.
        font_style: &'static str,
        /// CSS `text-decoration`.
        text_decoration: &'static str,
    },
    /// Image scaled to fit its box.
    Image {
        /// Image URL.
        src: String,
        /// CSS `object-fit`.
        object_fit: &'static str,
    },
    /// Inline SVG path.
    Shape {
        /// SVG `viewBox`.
        view_box: &'static str,
        /// SVG path `d` attribute.
        path: String,
        /// Fill color.
        fill: String,
        /// Stroke color.
        stroke: String,
        /// Stroke width in view-box units.
        stroke_width: f64,
    },
}

impl VisualContent {
    /// Inline SVG markup for shapes; `None` for other content.
    #[must_use]
    pub fn svg_markup(&self) -> Option<String> {
        let Self::Shape {
            view_box,
            path,
            fill,
            stroke,
            stroke_width,
        } = self
        else {
            return None;
        };
        Some(format!(
            r#"<svg viewBox="{view_box}" width="100%" height="100%"><path d="{}" fill="{}" stroke="{}" stroke-width="{stroke_width}"/></svg>"#,
            escape_attr(path),
            escape_attr(fill),
            escape_attr(stroke),
        ))
    }
}

/// Everything the host needs to paint one element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisualNode {
    /// Element being painted.
    pub id: ElementId,
    /// Its type.
    pub element_type: ElementType,
    /// Left offset in pixels.
    pub left: f64,
    /// Top offset in pixels.
    pub top: f64,
    /// Box width in pixels.
    pub width: f64,
    /// Box height in pixels.
    pub height: f64,
    /// Whether to draw the selection highlight.
    pub selected: bool,
    /// Type-specific content.
    pub content: VisualContent,
}

impl VisualNode {
    /// CSS declarations for the element's wrapper box.
    #[must_use]
    pub fn css_declarations(&self) -> Vec<(&'static str, String)> {
        let mut css = vec![
            ("position", "absolute".to_string()),
            ("left", format!("{}px", self.left)),
            ("top", format!("{}px", self.top)),
            ("width", format!("{}px", self.width)),
            ("height", format!("{}px", self.height)),
        ];
        if self.selected {
            css.push(("border-color", SELECTION_BORDER_COLOR.to_string()));
        }
        if let VisualContent::Text {
            font_family,
            font_size,
            font_weight,
            font_style,
            text_decoration,
            ..
        } = &self.content
        {
            css.push(("font-family", font_family.clone()));
            css.push(("font-size", format!("{font_size}px")));
            css.push(("font-weight", (*font_weight).to_string()));
            css.push(("font-style", (*font_style).to_string()));
            css.push(("text-decoration", (*text_decoration).to_string()));
        }
        css
    }
}

/// Renders the type-specific part of an element.
pub type ContentRenderer = fn(&Element) -> VisualContent;

/// The content renderer for each element type.
#[must_use]
pub const fn renderer_for(element_type: ElementType) -> ContentRenderer {
    match element_type {
        ElementType::Text => render_text,
        ElementType::Image => render_image,
        ElementType::Shape => render_shape,
    }
}

/// Project an element to its visual representation.
#[must_use]
pub fn render_element(element: &Element, selected: bool) -> VisualNode {
    let content = renderer_for(element.element_type())(element);
    tracing::trace!(
        element = %element.id(),
        x = element.position.x,
        y = element.position.y,
        "Render {}",
        element.element_type()
    );
    VisualNode {
        id: element.id(),
        element_type: element.element_type(),
        left: element.position.x,
        top: element.position.y,
        width: element.size.width,
        height: element.size.height,
        selected,
        content,
    }
}

fn render_text(element: &Element) -> VisualContent {
    VisualContent::Text {
        text: PLACEHOLDER_TEXT.to_string(),
        font_family: text(element, "fontFamily"),
        font_size: number(element, "fontSize"),
        font_weight: if flag(element, "bold") { "bold" } else { "normal" },
        font_style: if flag(element, "italic") { "italic" } else { "normal" },
        text_decoration: if flag(element, "underline") {
            "underline"
        } else {
            "none"
        },
    }
}

fn render_image(element: &Element) -> VisualContent {
    VisualContent::Image {
        src: text(element, "src"),
        object_fit: "contain",
    }
}

fn render_shape(element: &Element) -> VisualContent {
    VisualContent::Shape {
        view_box: SHAPE_VIEW_BOX,
        path: text(element, "pathData"),
        fill: text(element, "fill"),
        stroke: text(element, "stroke"),
        stroke_width: number(element, "strokeWidth"),
    }
}

// The applier only stores coerced values, so these lookups always hit the
// declared kind; the fallbacks cover a name missing from the schema.
fn text(element: &Element, name: &str) -> String {
    element
        .value_of(name)
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_default()
}

fn number(element: &Element, name: &str) -> f64 {
    element
        .value_of(name)
        .and_then(|v| v.as_f64())
        .unwrap_or_default()
}

fn flag(element: &Element, name: &str) -> bool {
    element
        .value_of(name)
        .and_then(|v| v.as_bool())
        .unwrap_or_default()
}

fn escape_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
