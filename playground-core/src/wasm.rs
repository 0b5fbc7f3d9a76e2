//! WebAssembly bindings for playground-core.
//!
//! This module provides JavaScript-callable functions when compiled to WASM.
//! The page's drag/drop library and form controls call the `on*` methods;
//! renders come back through the callbacks given to the constructor as JSON
//! strings.

use js_sys::Function;
use wasm_bindgen::prelude::*;

use crate::{
    ElementId, FormDescription, Playground, PlaygroundConfig, RawValue, RenderHost, VisualNode,
};

/// Initialize the playground WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages
    console_error_panic_hook::set_once();
}

/// Forwards renders to JavaScript callbacks.
struct JsHost {
    render_element: Function,
    render_form: Function,
    remove_element: Option<Function>,
}

impl JsHost {
    fn call(callback: &Function, arg: &JsValue) {
        if let Err(err) = callback.call1(&JsValue::NULL, arg) {
            tracing::warn!("Render callback threw: {err:?}");
        }
    }
}

impl RenderHost for JsHost {
    fn render_element(&mut self, node: &VisualNode) {
        let json = serde_json::to_string(node).unwrap_or_default();
        Self::call(&self.render_element, &JsValue::from_str(&json));
    }

    fn render_form(&mut self, form: &FormDescription) {
        let json = serde_json::to_string(form).unwrap_or_default();
        Self::call(&self.render_form, &JsValue::from_str(&json));
    }

    fn remove_element(&mut self, id: ElementId) {
        if let Some(callback) = &self.remove_element {
            Self::call(callback, &JsValue::from_str(&id.to_string()));
        }
    }

    fn clear_form(&mut self) {
        Self::call(&self.render_form, &JsValue::NULL);
    }
}

/// Playground instance for WASM.
#[wasm_bindgen]
pub struct WasmPlayground {
    inner: Playground<JsHost>,
}

#[wasm_bindgen]
impl WasmPlayground {
    /// Create a playground with the given viewport size.
    ///
    /// `render_element` receives a `VisualNode` as JSON; `render_form`
    /// receives a `FormDescription` as JSON, or `null` when the form should
    /// be hidden; `remove_element` receives the removed element's id.
    ///
    /// # Errors
    ///
    /// Returns an error string if the viewport is not a positive finite size.
    #[wasm_bindgen(constructor)]
    pub fn new(
        width: f64,
        height: f64,
        render_element: Function,
        render_form: Function,
        remove_element: Option<Function>,
    ) -> Result<WasmPlayground, String> {
        let config = PlaygroundConfig::default().with_viewport(width, height);
        config.validate().map_err(|e| e.to_string())?;
        let host = JsHost {
            render_element,
            render_form,
            remove_element,
        };
        Ok(Self {
            inner: Playground::new(config, host),
        })
    }

    /// A palette template was dropped. Returns the new element's id.
    ///
    /// # Errors
    ///
    /// Returns an error string if `element_type` is unknown.
    #[wasm_bindgen(js_name = onDrop)]
    pub fn on_drop(&mut self, element_type: &str, x: f64, y: f64) -> Result<String, String> {
        self.inner
            .on_drop(element_type, x, y)
            .map(|id| id.to_string())
            .map_err(|e| e.to_string())
    }

    /// An element was dragged to `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns an error string if the id is malformed or not on the canvas.
    #[wasm_bindgen(js_name = onDragMove)]
    pub fn on_drag_move(&mut self, id: &str, x: f64, y: f64) -> Result<(), String> {
        let id = parse_id(id)?;
        self.inner
            .on_drag_move(id, x, y)
            .map(drop)
            .map_err(|e| e.to_string())
    }

    /// An element was clicked.
    ///
    /// # Errors
    ///
    /// Returns an error string if the id is malformed or not on the canvas.
    #[wasm_bindgen(js_name = onSelect)]
    pub fn on_select(&mut self, id: &str) -> Result<(), String> {
        let id = parse_id(id)?;
        self.inner.on_select(id).map_err(|e| e.to_string())
    }

    /// A form control changed. `value` is a boolean for checkboxes and a
    /// string for every other control. Returns the applied change as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error string if nothing is selected, the property does not
    /// apply, or the value is rejected.
    #[wasm_bindgen(js_name = onFieldChange)]
    pub fn on_field_change(&mut self, property: &str, value: JsValue) -> Result<String, String> {
        let raw = raw_value(&value)?;
        let change = self
            .inner
            .on_field_change(property, &raw)
            .map_err(|e| e.to_string())?;
        serde_json::to_string(&change).map_err(|e| e.to_string())
    }

    /// An element was deleted.
    ///
    /// # Errors
    ///
    /// Returns an error string if the id is malformed or not on the canvas.
    #[wasm_bindgen(js_name = onRemove)]
    pub fn on_remove(&mut self, id: &str) -> Result<(), String> {
        let id = parse_id(id)?;
        self.inner.on_remove(id).map(drop).map_err(|e| e.to_string())
    }

    /// The selected element's form as JSON, or `null`.
    #[wasm_bindgen(js_name = getFormJson)]
    #[must_use]
    pub fn get_form_json(&self) -> String {
        serde_json::to_string(&self.inner.current_form()).unwrap_or_default()
    }

    /// Every element as JSON, in paint order.
    #[wasm_bindgen(js_name = getElementsJson)]
    #[must_use]
    pub fn get_elements_json(&self) -> String {
        let elements: Vec<_> = self.inner.canvas().elements().collect();
        serde_json::to_string(&elements).unwrap_or_default()
    }
}

fn parse_id(id: &str) -> Result<ElementId, String> {
    ElementId::parse(id).map_err(|e| e.to_string())
}

fn raw_value(value: &JsValue) -> Result<RawValue, String> {
    if let Some(b) = value.as_bool() {
        Ok(RawValue::Bool(b))
    } else if let Some(s) = value.as_string() {
        Ok(RawValue::Text(s))
    } else if let Some(n) = value.as_f64() {
        Ok(RawValue::Text(n.to_string()))
    } else {
        Err("field value must be a boolean, string or number".to_string())
    }
}
