//! The canvas element collection.

use std::collections::HashMap;

use crate::{CanvasError, CanvasResult, Element, ElementId, Position};

/// All placed elements, in insertion order.
///
/// Insertion order doubles as paint order: later elements sit on top.
#[derive(Debug, Clone, Default)]
pub struct Canvas {
    /// All elements on the canvas, indexed by ID.
    elements: HashMap<ElementId, Element>,
    /// Element IDs in insertion order.
    order: Vec<ElementId>,
    /// Viewport width in pixels.
    pub viewport_width: f64,
    /// Viewport height in pixels.
    pub viewport_height: f64,
}

impl Canvas {
    /// Create an empty canvas with the given viewport size.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            elements: HashMap::new(),
            order: Vec::new(),
            viewport_width: width,
            viewport_height: height,
        }
    }

    /// Add an element to the canvas.
    pub fn add_element(&mut self, element: Element) -> ElementId {
        let id = element.id();
        if self.elements.insert(id, element).is_none() {
            self.order.push(id);
        }
        id
    }

    /// Remove an element from the canvas.
    ///
    /// # Errors
    ///
    /// Returns an error if the element is not found.
    pub fn remove_element(&mut self, id: ElementId) -> CanvasResult<Element> {
        let element = self
            .elements
            .remove(&id)
            .ok_or_else(|| CanvasError::ElementNotFound(id.to_string()))?;
        self.order.retain(|&eid| eid != id);
        Ok(element)
    }

    /// Get an element by ID.
    #[must_use]
    pub fn get_element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(&id)
    }

    /// Get a mutable reference to an element by ID.
    pub fn get_element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(&id)
    }

    /// All elements, bottom to top.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.order.iter().filter_map(|id| self.elements.get(id))
    }

    /// Get the number of elements on the canvas.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Check if the canvas is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Find the topmost element at the given canvas coordinates.
    #[must_use]
    pub fn element_at(&self, x: f64, y: f64) -> Option<ElementId> {
        self.order
            .iter()
            .rev()
            .filter_map(|id| self.elements.get(id))
            .find(|e| e.contains_point(x, y))
            .map(Element::id)
    }

    /// Set an element's position verbatim.
    ///
    /// # Errors
    ///
    /// Returns an error if the element is not found.
    pub fn move_element(&mut self, id: ElementId, position: Position) -> CanvasResult<()> {
        let element = self
            .elements
            .get_mut(&id)
            .ok_or_else(|| CanvasError::ElementNotFound(id.to_string()))?;
        element.position = position;
        Ok(())
    }

    /// Clamp a proposed position so `element` stays inside the viewport.
    ///
    /// An element larger than the viewport is pinned to the top/left edge.
    #[must_use]
    pub fn contain(&self, element: &Element, position: Position) -> Position {
        let max_x = (self.viewport_width - element.size.width).max(0.0);
        let max_y = (self.viewport_height - element.size.height).max(0.0);
        Position::new(position.x.clamp(0.0, max_x), position.y.clamp(0.0, max_y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_element, ElementType, Size};

    #[test]
    fn test_canvas_add_remove() {
        let mut canvas = Canvas::new(800.0, 600.0);
        assert!(canvas.is_empty());

        let id = canvas.add_element(create_element(ElementType::Text, 0.0, 0.0));
        assert_eq!(canvas.element_count(), 1);
        assert!(canvas.get_element(id).is_some());

        canvas.remove_element(id).expect("should remove");
        assert!(canvas.is_empty());
        assert_eq!(canvas.elements().count(), 0);
        assert!(canvas.remove_element(id).is_err());
    }

    #[test]
    fn test_elements_in_insertion_order() {
        let mut canvas = Canvas::new(800.0, 600.0);
        let ids: Vec<_> = ElementType::ALL
            .into_iter()
            .map(|t| canvas.add_element(create_element(t, 0.0, 0.0)))
            .collect();
        let listed: Vec<_> = canvas.elements().map(Element::id).collect();
        assert_eq!(listed, ids);
    }

    #[test]
    fn test_element_at_prefers_topmost() {
        let mut canvas = Canvas::new(800.0, 600.0);
        let below = canvas.add_element(create_element(ElementType::Shape, 0.0, 0.0));
        let above = canvas.add_element(create_element(ElementType::Image, 50.0, 50.0));

        assert_eq!(canvas.element_at(75.0, 75.0), Some(above));
        assert_eq!(canvas.element_at(10.0, 10.0), Some(below));
        assert_eq!(canvas.element_at(500.0, 500.0), None);
    }

    #[test]
    fn test_move_element() {
        let mut canvas = Canvas::new(800.0, 600.0);
        let id = canvas.add_element(create_element(ElementType::Text, 0.0, 0.0));
        canvas
            .move_element(id, Position::new(30.0, 40.0))
            .expect("move");
        assert_eq!(
            canvas.get_element(id).map(|e| e.position),
            Some(Position::new(30.0, 40.0))
        );
        assert!(canvas
            .move_element(ElementId::new(), Position::new(0.0, 0.0))
            .is_err());
    }

    #[test]
    fn test_contain_clamps_to_viewport() {
        let canvas = Canvas::new(800.0, 600.0);
        let element = create_element(ElementType::Shape, 0.0, 0.0);

        assert_eq!(
            canvas.contain(&element, Position::new(-20.0, 650.0)),
            Position::new(0.0, 500.0)
        );
        assert_eq!(
            canvas.contain(&element, Position::new(120.0, 80.0)),
            Position::new(120.0, 80.0)
        );

        let wide = element.with_size(Size::new(1000.0, 100.0));
        assert_eq!(
            canvas.contain(&wide, Position::new(50.0, 10.0)),
            Position::new(0.0, 10.0)
        );
    }
}
