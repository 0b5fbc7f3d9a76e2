//! The playground controller: canvas, selection and host callbacks.
//!
//! [`Playground`] owns the element collection and the selection, and is the
//! only thing that mutates either. Each `on_*` handler runs to completion
//! and pushes its visible consequences to the [`RenderHost`] before
//! returning.

use crate::{
    apply_property, generate_form, render_element, Canvas, CanvasError, CanvasResult, Element,
    ElementId, ElementType, FormDescription, HostEvent, PlaygroundConfig, Position,
    PropertyChange, RawValue, Selection, VisualNode,
};

/// Outbound interface to whatever paints the canvas and the property panel.
pub trait RenderHost {
    /// Paint (or repaint) one element.
    fn render_element(&mut self, node: &VisualNode);

    /// Show the property form for the selected element.
    fn render_form(&mut self, form: &FormDescription);

    /// Take a removed element off the canvas.
    fn remove_element(&mut self, _id: ElementId) {}

    /// Hide the property form because nothing is selected.
    fn clear_form(&mut self) {}
}

/// A canvas editing session.
#[derive(Debug)]
pub struct Playground<H> {
    canvas: Canvas,
    selection: Selection,
    config: PlaygroundConfig,
    host: H,
}

impl<H: RenderHost> Playground<H> {
    /// Create an empty playground.
    #[must_use]
    pub fn new(config: PlaygroundConfig, host: H) -> Self {
        Self {
            canvas: Canvas::new(config.viewport_width, config.viewport_height),
            selection: Selection::new(),
            config,
            host,
        }
    }

    /// The element collection.
    #[must_use]
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// The selection state.
    #[must_use]
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// The session configuration.
    #[must_use]
    pub fn config(&self) -> &PlaygroundConfig {
        &self.config
    }

    /// The render host.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the render host.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Consume the playground, returning the render host.
    #[must_use]
    pub fn into_host(self) -> H {
        self.host
    }

    /// The selected element.
    #[must_use]
    pub fn current(&self) -> Option<&Element> {
        self.selection
            .active()
            .and_then(|id| self.canvas.get_element(id))
    }

    /// The property form for the selected element.
    #[must_use]
    pub fn current_form(&self) -> Option<FormDescription> {
        self.current().map(generate_form)
    }

    /// Route one host event to its handler.
    ///
    /// # Errors
    ///
    /// Returns whatever the handler returns.
    pub fn dispatch(&mut self, event: HostEvent) -> CanvasResult<()> {
        tracing::trace!(event = event.name(), "Dispatch");
        match event {
            HostEvent::Drop { element_type, x, y } => self.on_drop(&element_type, x, y).map(drop),
            HostEvent::DragMove { id, x, y } => self.on_drag_move(id, x, y).map(drop),
            HostEvent::Select { id } => self.on_select(id),
            HostEvent::FieldChange { property, value } => {
                self.on_field_change(&property, &value).map(drop)
            }
            HostEvent::Remove { id } => self.on_remove(id).map(drop),
        }
    }

    /// Create an element from a dropped template and select it.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::UnknownElementType`] if `type_name` is not a
    /// known template, or [`CanvasError::InvalidValue`] if the drop point is
    /// not finite.
    pub fn on_drop(&mut self, type_name: &str, x: f64, y: f64) -> CanvasResult<ElementId> {
        let element_type: ElementType = type_name.parse().inspect_err(|_| {
            tracing::warn!("Dropped unknown element type '{type_name}'");
        })?;
        finite_position(x, y)?;
        let element = Element::create(element_type, x, y).with_size(self.config.element_size);
        let id = self.canvas.add_element(element);
        tracing::debug!(element = %id, "Created {element_type} at ({x}, {y})");

        // Selecting paints the new element.
        self.on_select(id)?;
        Ok(id)
    }

    /// Move an element during a drag.
    ///
    /// With `contain_drag` set, the position is clamped into the viewport.
    /// Returns the position actually applied.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::ElementNotFound`] if `id` is not on the canvas,
    /// or [`CanvasError::InvalidValue`] if the target is not finite.
    pub fn on_drag_move(&mut self, id: ElementId, x: f64, y: f64) -> CanvasResult<Position> {
        let requested = finite_position(x, y)?;
        let element = self
            .canvas
            .get_element(id)
            .ok_or_else(|| CanvasError::ElementNotFound(id.to_string()))?;
        let position = if self.config.contain_drag {
            self.canvas.contain(element, requested)
        } else {
            requested
        };
        self.canvas.move_element(id, position)?;
        self.refresh_element(id);
        Ok(position)
    }

    /// Make `id` the active element and show its form.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::ElementNotFound`] if `id` is not on the
    /// canvas; the selection is left as it was.
    pub fn on_select(&mut self, id: ElementId) -> CanvasResult<()> {
        let Some(element) = self.canvas.get_element(id) else {
            tracing::warn!(element = %id, "Select of element not on canvas");
            return Err(CanvasError::ElementNotFound(id.to_string()));
        };
        let form = generate_form(element);
        let previous = self.selection.select(id);
        tracing::debug!(element = %id, "Selected");

        if let Some(previous) = previous.filter(|&p| p != id) {
            self.refresh_element(previous);
        }
        self.refresh_element(id);
        self.host.render_form(&form);
        Ok(())
    }

    /// Apply a form edit to the selected element.
    ///
    /// The element is repainted when the stored value changed. The form is
    /// re-sent when coercion adjusted the input or rejected it, so the
    /// control shows what is actually stored.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::NoSelection`] when nothing is selected, or the
    /// applier's [`CanvasError::UnknownProperty`] /
    /// [`CanvasError::InvalidValue`]. The element is unchanged on error.
    pub fn on_field_change(
        &mut self,
        property: &str,
        raw: &RawValue,
    ) -> CanvasResult<PropertyChange> {
        let id = self.selection.active().ok_or(CanvasError::NoSelection)?;
        let element = self
            .canvas
            .get_element_mut(id)
            .ok_or_else(|| CanvasError::ElementNotFound(id.to_string()))?;

        match apply_property(element, property, raw) {
            Ok(change) => {
                if change.changed {
                    self.refresh_element(id);
                }
                if change.adjusted {
                    self.refresh_form();
                }
                Ok(change)
            }
            Err(err) => {
                tracing::warn!(element = %id, "Rejected edit: {err}");
                if matches!(err, CanvasError::InvalidValue { .. }) {
                    self.refresh_form();
                }
                Err(err)
            }
        }
    }

    /// Delete an element, clearing the selection if it was active.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::ElementNotFound`] if `id` is not on the canvas.
    pub fn on_remove(&mut self, id: ElementId) -> CanvasResult<Element> {
        let element = self.canvas.remove_element(id)?;
        self.host.remove_element(id);
        if self.selection.release(id) {
            self.host.clear_form();
        }
        tracing::debug!(element = %id, "Removed");
        Ok(element)
    }

    fn refresh_element(&mut self, id: ElementId) {
        if let Some(element) = self.canvas.get_element(id) {
            let node = render_element(element, self.selection.is_selected(id));
            self.host.render_element(&node);
        }
    }

    fn refresh_form(&mut self) {
        if let Some(form) = self.current_form() {
            self.host.render_form(&form);
        }
    }
}

fn finite_position(x: f64, y: f64) -> CanvasResult<Position> {
    if x.is_finite() && y.is_finite() {
        Ok(Position::new(x, y))
    } else {
        Err(CanvasError::InvalidValue {
            property: "position".to_string(),
            reason: format!("({x}, {y}) is not a finite point"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PropertyValue, Size};

    #[derive(Debug, Default)]
    struct Recorder {
        nodes: Vec<VisualNode>,
        forms: Vec<FormDescription>,
        removed: Vec<ElementId>,
        cleared: usize,
    }

    impl RenderHost for Recorder {
        fn render_element(&mut self, node: &VisualNode) {
            self.nodes.push(node.clone());
        }

        fn render_form(&mut self, form: &FormDescription) {
            self.forms.push(form.clone());
        }

        fn remove_element(&mut self, id: ElementId) {
            self.removed.push(id);
        }

        fn clear_form(&mut self) {
            self.cleared += 1;
        }
    }

    fn playground() -> Playground<Recorder> {
        Playground::new(PlaygroundConfig::default(), Recorder::default())
    }

    #[test]
    fn test_drop_creates_and_selects() {
        let mut pg = playground();
        let id = pg.on_drop("text", 50.0, 80.0).expect("drop");

        assert_eq!(pg.canvas().element_count(), 1);
        assert_eq!(pg.current().map(Element::id), Some(id));
        let form = pg.host().forms.last().expect("form rendered");
        assert_eq!(form.element_id, id);
        let last = pg.host().nodes.last().expect("element rendered");
        assert!(last.selected);
    }

    #[test]
    fn test_drop_unknown_type() {
        let mut pg = playground();
        let err = pg.on_drop("video", 0.0, 0.0).unwrap_err();
        assert_eq!(err, CanvasError::UnknownElementType("video".to_string()));
        assert!(pg.canvas().is_empty());
        assert!(pg.host().forms.is_empty());
    }

    #[test]
    fn test_select_moves_highlight() {
        let mut pg = playground();
        let a = pg.on_drop("shape", 0.0, 0.0).expect("drop");
        let b = pg.on_drop("image", 200.0, 0.0).expect("drop");
        pg.host_mut().nodes.clear();

        pg.on_select(a).expect("select");
        let nodes = &pg.host().nodes;
        assert_eq!(nodes.len(), 2);
        assert_eq!((nodes[0].id, nodes[0].selected), (b, false));
        assert_eq!((nodes[1].id, nodes[1].selected), (a, true));
    }

    #[test]
    fn test_select_missing_keeps_selection() {
        let mut pg = playground();
        let a = pg.on_drop("shape", 0.0, 0.0).expect("drop");
        assert!(matches!(
            pg.on_select(ElementId::new()),
            Err(CanvasError::ElementNotFound(_))
        ));
        assert_eq!(pg.selection().active(), Some(a));
    }

    #[test]
    fn test_field_change_without_selection() {
        let mut pg = playground();
        assert_eq!(
            pg.on_field_change("bold", &RawValue::Bool(true)),
            Err(CanvasError::NoSelection)
        );
    }

    #[test]
    fn test_field_change_repaints_only_on_change() {
        let mut pg = playground();
        pg.on_drop("text", 0.0, 0.0).expect("drop");
        pg.host_mut().nodes.clear();

        pg.on_field_change("bold", &RawValue::Bool(true)).expect("apply");
        assert_eq!(pg.host().nodes.len(), 1);
        pg.on_field_change("bold", &RawValue::Bool(true)).expect("apply");
        assert_eq!(pg.host().nodes.len(), 1);
    }

    #[test]
    fn test_clamped_edit_resends_form() {
        let mut pg = playground();
        pg.on_drop("text", 0.0, 0.0).expect("drop");
        let forms_before = pg.host().forms.len();

        let change = pg.on_field_change("fontSize", &"999".into()).expect("apply");
        assert_eq!(change.value, PropertyValue::Integer(72));
        assert_eq!(pg.host().forms.len(), forms_before + 1);
        let form = pg.host().forms.last().expect("form");
        assert_eq!(
            form.field("fontSize").map(|f| f.current_value.clone()),
            Some(PropertyValue::Integer(72))
        );
    }

    #[test]
    fn test_rejected_edit_resends_form_and_keeps_value() {
        let mut pg = playground();
        pg.on_drop("shape", 0.0, 0.0).expect("drop");
        let forms_before = pg.host().forms.len();
        let nodes_before = pg.host().nodes.len();

        assert!(pg.on_field_change("strokeWidth", &"abc".into()).is_err());
        assert_eq!(pg.host().forms.len(), forms_before + 1);
        assert_eq!(pg.host().nodes.len(), nodes_before);
        assert_eq!(
            pg.current().and_then(|e| e.property("strokeWidth")),
            Some(&PropertyValue::Number(1.0))
        );
    }

    #[test]
    fn test_drag_move_contained() {
        let mut pg = playground();
        let id = pg.on_drop("image", 0.0, 0.0).expect("drop");

        let applied = pg.on_drag_move(id, 790.0, -40.0).expect("move");
        assert_eq!(applied, Position::new(700.0, 0.0));
        assert_eq!(pg.current().map(|e| e.position), Some(applied));
    }

    #[test]
    fn test_drag_move_uncontained() {
        let config = PlaygroundConfig::default().with_contain_drag(false);
        let mut pg = Playground::new(config, Recorder::default());
        let id = pg.on_drop("image", 0.0, 0.0).expect("drop");

        let applied = pg.on_drag_move(id, 790.0, -40.0).expect("move");
        assert_eq!(applied, Position::new(790.0, -40.0));
    }

    #[test]
    fn test_negative_element_size_is_sanitized() {
        let config = PlaygroundConfig::default().with_element_size(Size::new(-50.0, -50.0));
        let mut pg = Playground::new(config, Recorder::default());
        let id = pg.on_drop("text", 0.0, 0.0).expect("drop");

        let form = pg.current_form().expect("form");
        assert_eq!(
            form.field("width").map(|f| f.current_value.clone()),
            Some(PropertyValue::Number(0.0))
        );

        let applied = pg.on_drag_move(id, 5000.0, 5000.0).expect("move");
        assert_eq!(applied, Position::new(800.0, 600.0));
    }

    #[test]
    fn test_non_finite_points_rejected() {
        let mut pg = playground();
        assert!(matches!(
            pg.on_drop("shape", f64::NAN, 0.0),
            Err(CanvasError::InvalidValue { .. })
        ));
        assert!(pg.canvas().is_empty());

        let id = pg.on_drop("shape", 10.0, 20.0).expect("drop");
        assert!(matches!(
            pg.on_drag_move(id, 0.0, f64::INFINITY),
            Err(CanvasError::InvalidValue { .. })
        ));
        assert_eq!(pg.current().map(|e| e.position), Some(Position::new(10.0, 20.0)));
    }

    #[test]
    fn test_remove_selected_clears_form() {
        let mut pg = playground();
        let a = pg.on_drop("text", 0.0, 0.0).expect("drop");
        let b = pg.on_drop("shape", 0.0, 0.0).expect("drop");

        pg.on_remove(a).expect("remove unselected");
        assert_eq!(pg.host().cleared, 0);
        assert_eq!(pg.selection().active(), Some(b));

        pg.on_remove(b).expect("remove selected");
        assert_eq!(pg.host().cleared, 1);
        assert!(pg.current().is_none());
        assert_eq!(pg.host().removed, vec![a, b]);
    }

    #[test]
    fn test_dispatch_routes_events() {
        let mut pg = playground();
        pg.dispatch(HostEvent::Drop {
            element_type: "text".to_string(),
            x: 5.0,
            y: 5.0,
        })
        .expect("drop");
        pg.dispatch(HostEvent::FieldChange {
            property: "underline".to_string(),
            value: RawValue::Bool(true),
        })
        .expect("field change");

        assert_eq!(
            pg.current().and_then(|e| e.property("underline")),
            Some(&PropertyValue::Boolean(true))
        );
    }
}
