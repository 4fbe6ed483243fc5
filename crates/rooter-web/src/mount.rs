use crate::error::{describe_js, window};
use rooter_core::{MountPoint, RouterError, RouterResult};
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

/// [`MountPoint`] that writes inline styles on an element.
#[derive(Debug, Clone)]
pub struct ElementMount {
	element: HtmlElement,
}

impl ElementMount {
	/// Wraps `element`.
	pub fn new(element: HtmlElement) -> Self {
		Self { element }
	}

	/// Looks up the element with id `id` in the current document.
	///
	/// Returns `Ok(None)` if there is no such element.
	///
	/// # Errors
	///
	/// Returns [`RouterError::Host`] outside a browsing context, or if the
	/// element is not an HTML element.
	pub fn by_id(id: &str) -> RouterResult<Option<Self>> {
		let document = window()?
			.document()
			.ok_or_else(|| RouterError::host("document", "no document object"))?;
		let Some(element) = document.get_element_by_id(id) else {
			return Ok(None);
		};

		element
			.dyn_into::<HtmlElement>()
			.map(|element| Some(Self::new(element)))
			.map_err(|_| RouterError::host("getElementById", format!("#{} is not an HTML element", id)))
	}

	/// Returns the wrapped element.
	pub fn element(&self) -> &HtmlElement {
		&self.element
	}

	fn set_style(&self, property: &str, value: &str) {
		if let Err(err) = self.element.style().set_property(property, value) {
			tracing::warn!(property, value, error = %describe_js(&err), "failed to set style");
		}
	}
}

impl MountPoint for ElementMount {
	fn set_opacity(&self, opacity: f32) {
		self.set_style("opacity", &opacity.to_string());
	}

	fn set_transition(&self, declaration: &str) {
		self.set_style("transition", declaration);
	}
}
