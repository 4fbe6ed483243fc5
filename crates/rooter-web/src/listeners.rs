//! Document click and window `popstate` listeners.
//!
//! Listener closures are leaked: the router lives as long as the page.

use crate::error::into_js_error;
use rooter_core::Router;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, EventTarget, HtmlAnchorElement, PopStateEvent, Window};

/// Installs both listeners for `router`.
///
/// # Errors
///
/// Returns the JavaScript error raised by `addEventListener`.
pub fn install(router: &Router, window: &Window, document: &Document) -> Result<(), JsValue> {
	install_click(router, document)?;
	install_pop_state(router, window)
}

/// Intercepts clicks on same-origin links.
///
/// The listener walks from the event target up to the nearest `<a>` and
/// hands its resolved `href` to the router. Links the router accepts have
/// their default navigation suppressed before the route runs. `target` is
/// normally the document; any ancestor of the links works.
///
/// # Errors
///
/// Returns the JavaScript error raised by `addEventListener`.
pub fn install_click(router: &Router, target: &EventTarget) -> Result<(), JsValue> {
	let router = router.clone();
	let link_handler = Closure::wrap(Box::new(move |event: Event| -> Result<(), JsValue> {
		let Some(anchor) = event
			.target()
			.and_then(|target| target.dyn_into::<Element>().ok())
			.and_then(nearest_anchor)
		else {
			return Ok(());
		};

		let Some(path) = router.link_target(&anchor.href()) else {
			return Ok(());
		};

		event.prevent_default();
		router.go_to(&path).map_err(into_js_error)
	}) as Box<dyn FnMut(_) -> Result<(), JsValue>>);

	target.add_event_listener_with_callback("click", link_handler.as_ref().unchecked_ref())?;
	link_handler.forget();
	Ok(())
}

/// Resolves back/forward navigation from the entry state.
///
/// # Errors
///
/// Returns the JavaScript error raised by `addEventListener`.
pub fn install_pop_state(router: &Router, window: &Window) -> Result<(), JsValue> {
	let router = router.clone();
	let popstate_handler = Closure::wrap(Box::new(move |event: Event| -> Result<(), JsValue> {
		let state = event
			.dyn_ref::<PopStateEvent>()
			.and_then(|event| event.state().as_string());
		router.pop_state(state.as_deref()).map_err(into_js_error)
	}) as Box<dyn FnMut(_) -> Result<(), JsValue>>);

	window.add_event_listener_with_callback("popstate", popstate_handler.as_ref().unchecked_ref())?;
	popstate_handler.forget();
	Ok(())
}

fn nearest_anchor(element: Element) -> Option<HtmlAnchorElement> {
	let mut current = Some(element);
	while let Some(el) = current {
		if el.tag_name().eq_ignore_ascii_case("a") {
			return el.dyn_into::<HtmlAnchorElement>().ok();
		}
		current = el.parent_element();
	}
	None
}
