//! Conversions between router errors and JavaScript values.

use js_sys::{Array, Error, TypeError};
use rooter_core::RouterError;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

/// Converts a router error into a JavaScript exception value.
///
/// Argument-shape errors become `TypeError`; everything else a plain
/// `Error`.
pub fn into_js_error(err: RouterError) -> JsValue {
	let message = err.to_string();
	match err {
		RouterError::InvalidArgument { .. } => TypeError::new(&message).into(),
		_ => Error::new(&message).into(),
	}
}

/// Renders a thrown JavaScript value as text.
pub fn describe_js(value: &JsValue) -> String {
	if let Some(message) = value.as_string() {
		return message;
	}
	if let Some(error) = value.dyn_ref::<Error>() {
		return String::from(error.message());
	}
	format!("{:?}", value)
}

/// Returns the JavaScript type of `value` for argument errors.
///
/// Like `typeof`, but reports `null` and arrays by name.
pub fn js_type_name(value: &JsValue) -> String {
	if value.is_null() {
		"null".to_string()
	} else if Array::is_array(value) {
		"array".to_string()
	} else {
		value
			.js_typeof()
			.as_string()
			.unwrap_or_else(|| "unknown".to_string())
	}
}

pub(crate) fn window() -> Result<web_sys::Window, RouterError> {
	web_sys::window().ok_or_else(|| RouterError::host("window", "no global window"))
}
