//! The router context.
//!
//! A [`Router`] owns the route table, navigation state, transition
//! sequencer and history collaborator. It is a cheap [`Clone`] handle around
//! shared state so that listeners and deferred callbacks can hold it; all
//! clones see the same routes. The router is single-threaded (`!Send`) and
//! meant to be built once per mounted application.

use crate::config::{RouterOptions, TransitionConfig};
use crate::error::RouterResult;
use crate::history::{History, MemoryHistory};
use crate::navigation::NavigationController;
use crate::pattern::Params;
use crate::route::{Handler, Middleware, NotFoundHandler, Route};
use crate::table::{Resolved, RouteTable};
use crate::transition::{ImmediateScheduler, MountPoint, Scheduler, TransitionSequencer};
use std::cell::Cell;
use std::rc::Rc;

pub(crate) struct RouterInner {
	pub(crate) controller: NavigationController,
	pub(crate) history: Rc<dyn History>,
	pub(crate) started: Cell<bool>,
}

/// A client-side router.
///
/// # Example
///
/// ```
/// use rooter_core::{MemoryHistory, Router};
/// use std::rc::Rc;
///
/// let history = Rc::new(MemoryHistory::new("/"));
/// let router = Router::builder().history(history).build();
///
/// router
/// 	.when("/", |_| Ok(()))?
/// 	.when("/me/:name", |params| {
/// 		assert_eq!(params.unwrap()["name"], "Alice");
/// 		Ok(())
/// 	})?;
///
/// router.start()?;
/// router.go_to("/me/Alice")?;
/// # Ok::<(), rooter_core::RouterError>(())
/// ```
#[derive(Clone)]
pub struct Router {
	pub(crate) inner: Rc<RouterInner>,
}

impl std::fmt::Debug for Router {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let table = self.inner.controller.table();
		f.debug_struct("Router")
			.field("routes_count", &table.len())
			.field("namespace", &table.namespace())
			.field("current_path", &self.inner.controller.current_path())
			.field("started", &self.inner.started.get())
			.finish()
	}
}

impl Default for Router {
	fn default() -> Self {
		Self::builder().build()
	}
}

impl Router {
	/// Starts building a router.
	pub fn builder() -> RouterBuilder {
		RouterBuilder::default()
	}

	/// Registers a route without middleware.
	///
	/// Returns `&Self` so registrations chain with `?`.
	///
	/// # Errors
	///
	/// Returns [`crate::RouterError::InvalidPattern`] if the pattern is
	/// rejected.
	pub fn when<F>(&self, pattern: &str, handler: F) -> RouterResult<&Self>
	where
		F: Fn(Option<&Params>) -> anyhow::Result<()> + 'static,
	{
		self.add_route(pattern, None, Handler::new(handler))?;
		Ok(self)
	}

	/// Registers a route whose middleware runs, in order, before `handler`.
	///
	/// # Errors
	///
	/// As [`Router::when`]; additionally
	/// [`crate::RouterError::InvalidArgument`] for a non-callable entry when
	/// strict middleware checking is enabled.
	pub fn when_with<F>(
		&self,
		pattern: &str,
		middleware: Vec<Middleware>,
		handler: F,
	) -> RouterResult<&Self>
	where
		F: Fn(Option<&Params>) -> anyhow::Result<()> + 'static,
	{
		self.add_route(pattern, Some(middleware), Handler::new(handler))?;
		Ok(self)
	}

	/// Registers a prebuilt handler with optional middleware and returns the
	/// stored route.
	///
	/// # Errors
	///
	/// As [`Router::when_with`].
	pub fn add_route(
		&self,
		pattern: &str,
		middleware: Option<Vec<Middleware>>,
		handler: Handler,
	) -> RouterResult<Rc<Route>> {
		self.inner
			.controller
			.table_mut()
			.add(pattern, middleware, handler)
	}

	/// Prefixes every route registered after this call with `prefix`.
	pub fn namespace(&self, prefix: impl Into<String>) -> &Self {
		self.inner
			.controller
			.table_mut()
			.set_namespace(Some(prefix.into()));
		self
	}

	/// Stops prefixing subsequently registered routes.
	pub fn clear_namespace(&self) -> &Self {
		self.inner.controller.table_mut().set_namespace(None);
		self
	}

	/// Sets the handler invoked when no route matches.
	pub fn not_found<F>(&self, handler: F) -> &Self
	where
		F: Fn() -> anyhow::Result<()> + 'static,
	{
		self.inner
			.controller
			.table_mut()
			.set_not_found(NotFoundHandler::new(handler));
		self
	}

	/// Removes routes by template or by a path they match.
	///
	/// Returns the number of routes removed.
	pub fn remove(&self, pattern: &str) -> usize {
		let removed = self.inner.controller.table_mut().remove(pattern);
		tracing::debug!(pattern, removed, "routes removed");
		removed
	}

	/// Clears all routes, the namespace, the not-found handler and the
	/// navigation state, and cancels any pending transition.
	pub fn flush(&self) {
		self.inner.controller.table_mut().flush();
		self.inner.controller.reset();
		self.inner.controller.sequencer().cancel();
		tracing::debug!("router flushed");
	}

	/// Returns the registered routes in priority order.
	pub fn routes(&self) -> Vec<Rc<Route>> {
		self.inner.controller.table().routes().to_vec()
	}

	/// Resolves `path` without navigating.
	pub fn resolve(&self, path: &str) -> Resolved {
		self.inner.controller.table().resolve(path)
	}

	/// Returns the transition timing.
	pub fn transition_config(&self) -> TransitionConfig {
		self.inner.controller.sequencer().config()
	}

	/// Replaces the transition timing.
	pub fn set_transition_config(&self, config: TransitionConfig) {
		self.inner.controller.sequencer().set_config(config);
	}

	/// Returns the path most recently resolved.
	pub fn current_path(&self) -> Option<String> {
		self.inner.controller.current_path()
	}

	/// Returns whether a transition is waiting on its deferred handler.
	pub fn is_transitioning(&self) -> bool {
		self.inner.controller.sequencer().is_in_flight()
	}

	/// Returns whether [`Router::start`] has run.
	pub fn is_started(&self) -> bool {
		self.inner.started.get()
	}

	/// Returns the history collaborator.
	pub fn history(&self) -> &Rc<dyn History> {
		&self.inner.history
	}
}

/// Builder for [`Router`].
#[derive(Default)]
pub struct RouterBuilder {
	history: Option<Rc<dyn History>>,
	mount: Option<Rc<dyn MountPoint>>,
	scheduler: Option<Rc<dyn Scheduler>>,
	options: RouterOptions,
}

impl RouterBuilder {
	/// Sets the history collaborator. Defaults to a [`MemoryHistory`] at `/`.
	pub fn history(mut self, history: Rc<dyn History>) -> Self {
		self.history = Some(history);
		self
	}

	/// Sets the mount point whose visibility is animated.
	pub fn mount(mut self, mount: Rc<dyn MountPoint>) -> Self {
		self.mount = Some(mount);
		self
	}

	/// Sets the mount point when one is available.
	pub fn maybe_mount(mut self, mount: Option<Rc<dyn MountPoint>>) -> Self {
		self.mount = mount;
		self
	}

	/// Sets the scheduler for deferred handler invocation. Defaults to
	/// [`ImmediateScheduler`].
	pub fn scheduler(mut self, scheduler: Rc<dyn Scheduler>) -> Self {
		self.scheduler = Some(scheduler);
		self
	}

	/// Sets the router options.
	pub fn options(mut self, options: RouterOptions) -> Self {
		self.options = options;
		self
	}

	/// Sets only the transition timing.
	pub fn transition(mut self, transition: TransitionConfig) -> Self {
		self.options.transition = transition;
		self
	}

	/// Builds the router.
	pub fn build(self) -> Router {
		let history = self
			.history
			.unwrap_or_else(|| Rc::new(MemoryHistory::default()));
		let scheduler = self
			.scheduler
			.unwrap_or_else(|| Rc::new(ImmediateScheduler));

		let mut table = RouteTable::new();
		table.set_strict_middleware(self.options.strict_middleware);
		let sequencer = TransitionSequencer::new(self.mount, scheduler, self.options.transition);

		Router {
			inner: Rc::new(RouterInner {
				controller: NavigationController::new(table, sequencer),
				history,
				started: Cell::new(false),
			}),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::RouterError;
	use rstest::rstest;

	#[rstest]
	fn test_registration_chains() {
		let router = Router::default();
		router
			.when("/", |_| Ok(()))
			.unwrap()
			.when("/about", |_| Ok(()))
			.unwrap()
			.when_with("/secret", vec![Middleware::new(|| Ok(()))], |_| Ok(()))
			.unwrap();

		let patterns: Vec<String> = router
			.routes()
			.iter()
			.map(|route| route.pattern().pattern().to_string())
			.collect();
		assert_eq!(patterns, vec!["/", "/about", "/secret"]);
	}

	#[rstest]
	fn test_namespace_is_chainable() {
		let router = Router::default();
		router.namespace("hello").when("/", |_| Ok(())).unwrap();
		router.clear_namespace().when("/plain", |_| Ok(())).unwrap();

		assert!(router.resolve("/hello").route().is_some());
		assert!(router.resolve("/plain").route().is_some());
		assert!(router.resolve("/").is_not_found());
	}

	#[rstest]
	fn test_strict_option_reaches_table() {
		let router = Router::builder()
			.options(RouterOptions::default().with_strict_middleware(true))
			.build();

		let result = router.when_with("/x", vec![Middleware::inert("null")], |_| Ok(()));

		assert!(matches!(
			result,
			Err(RouterError::InvalidArgument { expected: "function", .. })
		));
	}

	#[rstest]
	fn test_transition_config_roundtrip() {
		let router = Router::builder()
			.transition(TransitionConfig {
				time: 10,
				effect: "linear".to_string(),
				apply_after: 5,
			})
			.build();
		assert_eq!(router.transition_config().time, 10);

		router.set_transition_config(TransitionConfig::default());

		assert_eq!(router.transition_config(), TransitionConfig::default());
	}

	#[rstest]
	fn test_clones_share_state() {
		let router = Router::default();
		let other = router.clone();

		other.when("/shared", |_| Ok(())).unwrap();

		assert_eq!(router.routes().len(), 1);
	}

	#[rstest]
	fn test_debug_output() {
		let router = Router::default();
		router.when("/", |_| Ok(())).unwrap();

		let debug = format!("{:?}", router);

		assert!(debug.contains("routes_count: 1"));
		assert!(debug.contains("started: false"));
	}
}
