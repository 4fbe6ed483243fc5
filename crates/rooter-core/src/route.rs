//! Route definitions: pattern, optional middleware and handler.

use crate::error::RouterResult;
use crate::pattern::{Params, PathPattern};
use std::rc::Rc;

/// Signature of a route handler.
///
/// Static routes receive `None`; parametric routes receive the decoded
/// parameters of the matched path.
pub type HandlerFn = dyn Fn(Option<&Params>) -> anyhow::Result<()>;

/// Signature of the not-found handler.
pub type NotFoundFn = dyn Fn() -> anyhow::Result<()>;

/// Signature of a middleware callback.
pub type MiddlewareFn = dyn Fn() -> anyhow::Result<()>;

/// A cloneable route handler.
#[derive(Clone)]
pub struct Handler {
	inner: Rc<HandlerFn>,
}

impl Handler {
	/// Wraps a closure as a handler.
	pub fn new<F>(f: F) -> Self
	where
		F: Fn(Option<&Params>) -> anyhow::Result<()> + 'static,
	{
		Self { inner: Rc::new(f) }
	}

	/// Invokes the handler.
	pub fn call(&self, params: Option<&Params>) -> anyhow::Result<()> {
		(self.inner)(params)
	}
}

impl std::fmt::Debug for Handler {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str("Handler")
	}
}

/// The handler invoked when no route matches.
#[derive(Clone)]
pub struct NotFoundHandler {
	inner: Rc<NotFoundFn>,
}

impl NotFoundHandler {
	/// Wraps a closure as the not-found handler.
	pub fn new<F>(f: F) -> Self
	where
		F: Fn() -> anyhow::Result<()> + 'static,
	{
		Self { inner: Rc::new(f) }
	}

	/// A handler that does nothing.
	pub fn noop() -> Self {
		Self::new(|| Ok(()))
	}

	/// Invokes the handler.
	pub fn call(&self) -> anyhow::Result<()> {
		(self.inner)()
	}
}

impl Default for NotFoundHandler {
	fn default() -> Self {
		Self::noop()
	}
}

impl std::fmt::Debug for NotFoundHandler {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str("NotFoundHandler")
	}
}

/// One entry of a route's middleware list.
///
/// Middleware runs synchronously before the handler. It does not
/// short-circuit navigation on its own: only an error it returns, or a
/// navigation it starts, keeps the handler from running. Entries coming from dynamically typed callers
/// may be *inert* (not callable); those are skipped at navigation time, or
/// rejected at registration when strict middleware checking is enabled.
#[derive(Clone)]
pub struct Middleware {
	callback: Option<Rc<MiddlewareFn>>,
	/// Describes what was supplied for an inert entry.
	kind: String,
}

impl Middleware {
	/// Wraps a closure as middleware.
	pub fn new<F>(f: F) -> Self
	where
		F: Fn() -> anyhow::Result<()> + 'static,
	{
		Self {
			callback: Some(Rc::new(f)),
			kind: "function".to_string(),
		}
	}

	/// An entry that is not callable; `kind` names what was supplied instead.
	pub fn inert(kind: impl Into<String>) -> Self {
		Self {
			callback: None,
			kind: kind.into(),
		}
	}

	/// Returns whether this entry can be invoked.
	pub fn is_callable(&self) -> bool {
		self.callback.is_some()
	}

	/// Returns the kind of value this entry was built from.
	pub fn kind(&self) -> &str {
		&self.kind
	}

	/// Runs the callback; returns `None` for inert entries.
	pub fn run(&self) -> Option<anyhow::Result<()>> {
		self.callback.as_ref().map(|callback| callback())
	}
}

impl std::fmt::Debug for Middleware {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Middleware").field("kind", &self.kind).finish()
	}
}

/// A single route definition.
#[derive(Clone)]
pub struct Route {
	pattern: PathPattern,
	middleware: Option<Vec<Middleware>>,
	handler: Handler,
}

impl std::fmt::Debug for Route {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Route")
			.field("pattern", &self.pattern.pattern())
			.field("is_parametric", &self.pattern.is_parametric())
			.field("param_names", &self.pattern.param_names())
			.field("middleware", &self.middleware)
			.finish()
	}
}

impl Route {
	/// Compiles `pattern` and builds a route.
	///
	/// # Errors
	///
	/// Returns [`crate::RouterError::InvalidPattern`] if the pattern cannot
	/// be compiled.
	pub fn new(
		pattern: &str,
		middleware: Option<Vec<Middleware>>,
		handler: Handler,
	) -> RouterResult<Self> {
		Ok(Self {
			pattern: PathPattern::new(pattern)?,
			middleware,
			handler,
		})
	}

	/// Returns the compiled pattern.
	pub fn pattern(&self) -> &PathPattern {
		&self.pattern
	}

	/// Returns whether the route captures parameters.
	pub fn is_parametric(&self) -> bool {
		self.pattern.is_parametric()
	}

	/// Returns the parameter names in pattern order.
	pub fn param_names(&self) -> &[String] {
		self.pattern.param_names()
	}

	/// Returns the middleware list, if one was registered.
	pub fn middleware(&self) -> Option<&[Middleware]> {
		self.middleware.as_deref()
	}

	/// Returns the handler.
	pub fn handler(&self) -> &Handler {
		&self.handler
	}

	/// Checks whether this route accepts `path`.
	pub fn matches(&self, path: &str) -> bool {
		self.pattern.is_match(path)
	}

	/// Builds the argument passed to the handler for `path`.
	///
	/// Static routes get `None`.
	pub fn params_for(&self, path: &str) -> Option<Params> {
		self.is_parametric()
			.then(|| self.pattern.extract_params(path))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::cell::Cell;

	fn ok_handler() -> Handler {
		Handler::new(|_| Ok(()))
	}

	#[rstest]
	fn test_static_route_passes_no_params() {
		let route = Route::new("/about", None, ok_handler()).unwrap();
		assert!(!route.is_parametric());
		assert_eq!(route.params_for("/about"), None);
	}

	#[rstest]
	fn test_parametric_route_passes_params() {
		let route = Route::new("/me/:name", None, ok_handler()).unwrap();
		let params = route.params_for("/me/Alice").unwrap();
		assert_eq!(params["name"], "Alice");
	}

	#[rstest]
	fn test_middleware_run_reports_callability() {
		// Arrange
		let hits = Rc::new(Cell::new(0));
		let counter = {
			let hits = Rc::clone(&hits);
			Middleware::new(move || {
				hits.set(hits.get() + 1);
				Ok(())
			})
		};
		let inert = Middleware::inert("number");

		// Act
		let ran = counter.run();
		let skipped = inert.run();

		// Assert
		assert!(matches!(ran, Some(Ok(()))));
		assert!(skipped.is_none());
		assert_eq!(hits.get(), 1);
		assert_eq!(inert.kind(), "number");
		assert!(!inert.is_callable());
	}

	#[rstest]
	fn test_middleware_error_is_returned() {
		let failing = Middleware::new(|| Err(anyhow::anyhow!("denied")));

		let result = failing.run();

		assert_eq!(result.unwrap().unwrap_err().to_string(), "denied");
	}

	#[rstest]
	fn test_handler_error_is_returned() {
		let handler = Handler::new(|_| Err(anyhow::anyhow!("boom")));
		assert_eq!(handler.call(None).unwrap_err().to_string(), "boom");
	}

	#[rstest]
	fn test_not_found_default_is_noop() {
		assert!(NotFoundHandler::default().call().is_ok());
	}

	#[rstest]
	fn test_route_debug_mentions_pattern() {
		let route = Route::new("/me/:name", Some(vec![Middleware::inert("null")]), ok_handler())
			.unwrap();
		let debug = format!("{:?}", route);
		assert!(debug.contains("/me/:name"));
		assert!(debug.contains("null"));
	}
}
