//! The ordered route table.
//!
//! Insertion order is match priority: the first route whose matcher accepts
//! a path wins. Exact routes registered twice for the same literal are both
//! kept, and the later one shadows the earlier during resolution.

use crate::error::{RouterError, RouterResult};
use crate::route::{Handler, Middleware, NotFoundHandler, Route};
use std::rc::Rc;

/// Outcome of resolving a path against the table.
#[derive(Debug, Clone)]
pub enum Resolved {
	/// A registered route accepted the path.
	Route(Rc<Route>),
	/// Nothing matched; carries the current not-found handler.
	NotFound(NotFoundHandler),
}

impl Resolved {
	/// Returns the matched route, if any.
	pub fn route(&self) -> Option<&Rc<Route>> {
		match self {
			Self::Route(route) => Some(route),
			Self::NotFound(_) => None,
		}
	}

	/// Returns `true` when resolution fell back to the not-found handler.
	pub fn is_not_found(&self) -> bool {
		matches!(self, Self::NotFound(_))
	}
}

/// Registered routes plus the not-found fallback and namespace prefix.
#[derive(Debug, Default)]
pub struct RouteTable {
	routes: Vec<Rc<Route>>,
	not_found: NotFoundHandler,
	namespace: Option<String>,
	strict_middleware: bool,
}

impl RouteTable {
	/// Creates an empty table.
	pub fn new() -> Self {
		Self::default()
	}

	/// Enables or disables rejection of non-callable middleware entries.
	pub fn set_strict_middleware(&mut self, strict: bool) {
		self.strict_middleware = strict;
	}

	/// Registers a route.
	///
	/// The active namespace prefix is applied to `pattern` before it is
	/// compiled.
	///
	/// # Errors
	///
	/// Returns [`RouterError::InvalidPattern`] for patterns the matcher
	/// rejects, and [`RouterError::InvalidArgument`] for a non-callable
	/// middleware entry while strict middleware checking is enabled.
	pub fn add(
		&mut self,
		pattern: &str,
		middleware: Option<Vec<Middleware>>,
		handler: Handler,
	) -> RouterResult<Rc<Route>> {
		if self.strict_middleware
			&& let Some(inert) = middleware
				.iter()
				.flatten()
				.find(|entry| !entry.is_callable())
		{
			return Err(RouterError::invalid_argument("function", inert.kind()));
		}

		let full_pattern = prefix_path(pattern, self.namespace.as_deref());
		let route = Rc::new(Route::new(&full_pattern, middleware, handler)?);
		tracing::debug!(
			pattern = %full_pattern,
			parametric = route.is_parametric(),
			"route registered"
		);
		self.routes.push(Rc::clone(&route));
		Ok(route)
	}

	/// Removes every route whose pattern text equals `pattern`, or whose
	/// parametric matcher accepts `pattern` as a concrete path.
	///
	/// Returns the number of routes removed.
	pub fn remove(&mut self, pattern: &str) -> usize {
		let before = self.routes.len();
		self.routes.retain(|route| {
			let by_match = route.is_parametric() && route.matches(pattern);
			let by_text = route.pattern().pattern() == pattern;
			!(by_match || by_text)
		});
		before - self.routes.len()
	}

	/// Resolves `path` to a route, or to the not-found handler.
	pub fn resolve(&self, path: &str) -> Resolved {
		let Some(index) = self.routes.iter().position(|route| route.matches(path)) else {
			return Resolved::NotFound(self.not_found.clone());
		};

		let first = &self.routes[index];
		if first.is_parametric() {
			return Resolved::Route(Rc::clone(first));
		}

		// Later duplicates of the same literal shadow earlier ones.
		let literal = first.pattern().pattern();
		let winner = self.routes[index..]
			.iter()
			.rev()
			.find(|route| !route.is_parametric() && route.pattern().pattern() == literal)
			.unwrap_or(first);
		Resolved::Route(Rc::clone(winner))
	}

	/// Sets the prefix applied to subsequently registered patterns.
	pub fn set_namespace(&mut self, prefix: Option<String>) {
		self.namespace = prefix;
	}

	/// Returns the active namespace prefix.
	pub fn namespace(&self) -> Option<&str> {
		self.namespace.as_deref()
	}

	/// Replaces the not-found handler.
	pub fn set_not_found(&mut self, handler: NotFoundHandler) {
		self.not_found = handler;
	}

	/// Clears all routes, the namespace and the not-found handler.
	pub fn flush(&mut self) {
		self.routes.clear();
		self.namespace = None;
		self.not_found = NotFoundHandler::noop();
	}

	/// Returns the registered routes in priority order.
	pub fn routes(&self) -> &[Rc<Route>] {
		&self.routes
	}

	/// Returns the number of registered routes.
	pub fn len(&self) -> usize {
		self.routes.len()
	}

	/// Returns `true` if no route is registered.
	pub fn is_empty(&self) -> bool {
		self.routes.is_empty()
	}
}

/// Applies a namespace prefix to a route pattern.
///
/// A prefix without any `/` gets a leading one. A pattern of `/` adds
/// nothing after the prefix.
pub fn prefix_path(path: &str, prefix: Option<&str>) -> String {
	let Some(prefix) = prefix else {
		return path.to_string();
	};

	let rest = if path == "/" { "" } else { path };
	if prefix.contains('/') {
		format!("{}{}", prefix, rest)
	} else {
		format!("/{}{}", prefix, rest)
	}
}
