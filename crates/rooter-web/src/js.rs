//! The `Router` JavaScript class.
//!
//! ```js
//! import { Router } from "rooter";
//!
//! const router = new Router("app");
//! router
//! 	.when("/", () => render("home"))
//! 	.whenWith("/secret", [authGate], () => render("secret"))
//! 	.when("/me/:name", ({ name }) => render(`hello ${name}`))
//! 	.notFound(() => render("404"));
//! router.start();
//! ```
//!
//! Arguments are checked when the call is made; a value of the wrong shape
//! throws `TypeError("Expected function, got number")` and friends.
//!
//! Static routes call their handler with `null`; parametric routes with an
//! object of decoded parameters. An exception thrown by middleware or a
//! handler stops the navigation and is rethrown to the caller.

use crate::error::{describe_js, into_js_error, js_type_name};
use crate::launcher::BrowserRouter;
use js_sys::{Array, Function, TypeError};
use rooter_core::{
	Handler, Middleware, Params, RouterError, RouterOptions, TransitionConfig,
};
use serde::Serialize;
use serde_wasm_bindgen::Serializer;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

/// JavaScript handle to a [`BrowserRouter`].
#[wasm_bindgen(js_name = Router)]
#[derive(Debug, Clone)]
pub struct JsRouter {
	browser: BrowserRouter,
}

#[wasm_bindgen(js_class = Router)]
impl JsRouter {
	/// Creates a router animating the element with id `rootId`.
	///
	/// `options` is an optional object such as
	/// `{ transition: { time: 400, effect: "ease-in", applyAfter: 200 }, strictMiddleware: false }`.
	#[wasm_bindgen(constructor)]
	pub fn new(root_id: Option<String>, options: JsValue) -> Result<JsRouter, JsValue> {
		#[cfg(feature = "console_error_panic_hook")]
		console_error_panic_hook::set_once();

		let options = if options.is_undefined() || options.is_null() {
			RouterOptions::default()
		} else {
			serde_wasm_bindgen::from_value(options)
				.map_err(|err| JsValue::from(TypeError::new(&format!("Invalid router options: {}", err))))?
		};

		let browser = BrowserRouter::with_options(root_id.as_deref(), options).map_err(into_js_error)?;
		Ok(Self { browser })
	}

	/// Registers `handler` for `pattern`.
	///
	/// The three-argument form `when(pattern, middleware, handler)` is the
	/// same as `whenWith`.
	pub fn when(
		&self,
		pattern: JsValue,
		handler_or_middleware: JsValue,
		handler: JsValue,
	) -> Result<JsRouter, JsValue> {
		if !handler.is_undefined() {
			return self.when_with(pattern, handler_or_middleware, handler);
		}

		let pattern = expect_string(&pattern)?;
		let handler = route_handler(expect_function(handler_or_middleware)?);
		self.browser
			.router()
			.add_route(&pattern, None, handler)
			.map_err(into_js_error)?;
		Ok(self.clone())
	}

	/// Registers `handler` for `pattern` behind an array of middleware.
	#[wasm_bindgen(js_name = whenWith)]
	pub fn when_with(
		&self,
		pattern: JsValue,
		middleware: JsValue,
		handler: JsValue,
	) -> Result<JsRouter, JsValue> {
		let pattern = expect_string(&pattern)?;
		let entries = middleware
			.dyn_into::<Array>()
			.map_err(|value| type_error("array", &value))?;
		let handler = route_handler(expect_function(handler)?);

		let middleware = entries.iter().map(middleware_entry).collect();
		self.browser
			.router()
			.add_route(&pattern, Some(middleware), handler)
			.map_err(into_js_error)?;
		Ok(self.clone())
	}

	/// Prefixes routes registered afterwards with `prefix`.
	pub fn namespace(&self, prefix: JsValue) -> Result<JsRouter, JsValue> {
		let prefix = expect_string(&prefix)?;
		self.browser.router().namespace(prefix);
		Ok(self.clone())
	}

	/// Sets the handler for unmatched paths.
	#[wasm_bindgen(js_name = notFound)]
	pub fn not_found(&self, handler: JsValue) -> Result<JsRouter, JsValue> {
		let function = expect_function(handler)?;
		self.browser.router().not_found(move || {
			function
				.call0(&JsValue::NULL)
				.map(|_| ())
				.map_err(|err| anyhow::anyhow!(describe_js(&err)))
		});
		Ok(self.clone())
	}

	/// Removes routes by template or by a path they match; returns how many.
	pub fn remove(&self, pattern: JsValue) -> Result<u32, JsValue> {
		let pattern = expect_string(&pattern)?;
		let removed = self.browser.router().remove(&pattern);
		Ok(u32::try_from(removed).unwrap_or(u32::MAX))
	}

	/// Clears routes, namespace and not-found handler.
	pub fn flush(&self) {
		self.browser.router().flush();
	}

	/// Installs listeners and resolves the current location.
	pub fn start(&self) -> Result<(), JsValue> {
		self.browser.start_js()
	}

	/// Pushes `path` onto history and navigates to it.
	#[wasm_bindgen(js_name = goTo)]
	pub fn go_to(&self, path: JsValue) -> Result<(), JsValue> {
		let path = expect_string(&path)?;
		self.browser.router().go_to(&path).map_err(into_js_error)
	}

	/// Alias of `goTo`.
	pub fn redirect(&self, path: JsValue) -> Result<(), JsValue> {
		self.go_to(path)
	}

	/// Returns the registered patterns in priority order.
	#[wasm_bindgen(js_name = getRoutes)]
	pub fn get_routes(&self) -> Array {
		self.browser
			.router()
			.routes()
			.iter()
			.map(|route| JsValue::from_str(route.pattern().pattern()))
			.collect()
	}

	/// Returns `{ time, effect, applyAfter }`.
	#[wasm_bindgen(js_name = getTransitionConfig)]
	pub fn get_transition_config(&self) -> Result<JsValue, JsValue> {
		self.browser
			.router()
			.transition_config()
			.serialize(&Serializer::json_compatible())
			.map_err(JsValue::from)
	}

	/// Replaces the transition timing; omitted fields take their defaults.
	#[wasm_bindgen(js_name = setTransitionConfig)]
	pub fn set_transition_config(&self, config: JsValue) -> Result<(), JsValue> {
		let config: TransitionConfig = serde_wasm_bindgen::from_value(config)
			.map_err(|err| JsValue::from(TypeError::new(&format!("Invalid transition config: {}", err))))?;
		self.browser.router().set_transition_config(config);
		Ok(())
	}

	/// The path most recently resolved, if any.
	#[wasm_bindgen(getter, js_name = currentPath)]
	pub fn current_path(&self) -> Option<String> {
		self.browser.router().current_path()
	}
}

impl JsRouter {
	/// Returns the wrapped browser router.
	pub fn browser(&self) -> &BrowserRouter {
		&self.browser
	}
}

fn type_error(expected: &'static str, actual: &JsValue) -> JsValue {
	into_js_error(RouterError::invalid_argument(expected, js_type_name(actual)))
}

fn expect_string(value: &JsValue) -> Result<String, JsValue> {
	value.as_string().ok_or_else(|| type_error("string", value))
}

fn expect_function(value: JsValue) -> Result<Function, JsValue> {
	value
		.dyn_into::<Function>()
		.map_err(|value| type_error("function", &value))
}

fn route_handler(function: Function) -> Handler {
	Handler::new(move |params: Option<&Params>| {
		let argument = match params {
			Some(params) => params
				.serialize(&Serializer::json_compatible())
				.map_err(|err| anyhow::anyhow!("failed to convert params: {}", err))?,
			None => JsValue::NULL,
		};
		function
			.call1(&JsValue::NULL, &argument)
			.map(|_| ())
			.map_err(|err| anyhow::anyhow!(describe_js(&err)))
	})
}

fn middleware_entry(entry: JsValue) -> Middleware {
	match entry.dyn_into::<Function>() {
		Ok(function) => Middleware::new(move || {
			function
				.call0(&JsValue::NULL)
				.map(|_| ())
				.map_err(|err| anyhow::anyhow!(describe_js(&err)))
		}),
		Err(entry) => Middleware::inert(js_type_name(&entry)),
	}
}
