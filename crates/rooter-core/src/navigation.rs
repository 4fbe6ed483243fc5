//! Navigation controller: dedupe, resolve, middleware, transition.

use crate::error::{RouterError, RouterResult};
use crate::history::NavigationType;
use crate::table::{Resolved, RouteTable};
use crate::transition::TransitionSequencer;
use std::cell::{Cell, Ref, RefCell, RefMut};

/// In-memory navigation state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationState {
	/// The path most recently resolved; `None` until the first navigation.
	pub current_path: Option<String>,
}

/// Resolves paths against the route table and drives the transition.
#[derive(Debug)]
pub struct NavigationController {
	table: RefCell<RouteTable>,
	state: RefCell<NavigationState>,
	sequencer: TransitionSequencer,
	// Bumped by every navigation that gets past dedupe.
	generation: Cell<u64>,
}

impl NavigationController {
	/// Creates a controller over `table`.
	pub fn new(table: RouteTable, sequencer: TransitionSequencer) -> Self {
		Self {
			table: RefCell::new(table),
			state: RefCell::new(NavigationState::default()),
			sequencer,
			generation: Cell::new(0),
		}
	}

	/// Borrows the route table.
	pub fn table(&self) -> Ref<'_, RouteTable> {
		self.table.borrow()
	}

	/// Mutably borrows the route table.
	pub fn table_mut(&self) -> RefMut<'_, RouteTable> {
		self.table.borrow_mut()
	}

	/// Returns the transition sequencer.
	pub fn sequencer(&self) -> &TransitionSequencer {
		&self.sequencer
	}

	/// Returns the path most recently resolved.
	pub fn current_path(&self) -> Option<String> {
		self.state.borrow().current_path.clone()
	}

	/// Forgets the current path so the next navigation always resolves.
	pub fn reset(&self) {
		*self.state.borrow_mut() = NavigationState::default();
	}

	/// Navigates to `path`.
	///
	/// A path equal to the one last resolved is ignored, except for the
	/// initial resolution. Middleware of the matched route runs in order
	/// before the handler is handed to the transition sequencer; an
	/// unmatched path invokes the not-found handler synchronously.
	///
	/// No table or state borrow is held while application callbacks run, so
	/// they may navigate or register routes themselves.
	///
	/// # Errors
	///
	/// Returns [`RouterError::Handler`] if middleware or a handler invoked
	/// synchronously fails, or a scheduling error from the transition.
	pub fn navigate(&self, path: &str, kind: NavigationType) -> RouterResult<()> {
		{
			let mut state = self.state.borrow_mut();
			if kind != NavigationType::Initial && state.current_path.as_deref() == Some(path) {
				tracing::debug!(path, ?kind, "navigation to current path ignored");
				return Ok(());
			}
			state.current_path = Some(path.to_string());
		}
		let generation = self.generation.get().wrapping_add(1);
		self.generation.set(generation);

		let resolved = self.table.borrow().resolve(path);
		match resolved {
			Resolved::NotFound(handler) => {
				tracing::debug!(path, ?kind, "no route matched; invoking not-found handler");
				self.sequencer.cancel();
				handler.call().map_err(|source| RouterError::Handler {
					path: path.to_string(),
					source,
				})
			}
			Resolved::Route(route) => {
				tracing::debug!(path, ?kind, pattern = %route.pattern(), "route matched");
				for entry in route.middleware().unwrap_or_default() {
					match entry.run() {
						None => {
							tracing::debug!(path, kind = entry.kind(), "non-callable middleware skipped");
						}
						Some(Err(source)) => {
							if self.generation.get() == generation {
								self.sequencer.cancel();
							}
							return Err(RouterError::Handler {
								path: path.to_string(),
								source,
							});
						}
						Some(Ok(())) => {}
					}
					if self.generation.get() != generation {
						tracing::debug!(path, "superseded by a navigation started in middleware");
						return Ok(());
					}
				}
				let params = route.params_for(path);
				self.sequencer.run(route, params, path)
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::TransitionConfig;
	use crate::route::{Handler, Middleware, NotFoundHandler};
	use crate::transition::ImmediateScheduler;
	use rstest::{fixture, rstest};
	use std::cell::RefCell;
	use std::rc::Rc;

	type Log = Rc<RefCell<Vec<String>>>;

	#[fixture]
	fn log() -> Log {
		Rc::new(RefCell::new(Vec::new()))
	}

	fn controller() -> NavigationController {
		NavigationController::new(
			RouteTable::new(),
			TransitionSequencer::new(None, Rc::new(ImmediateScheduler), TransitionConfig::default()),
		)
	}

	fn logging_handler(log: &Log, tag: &'static str) -> Handler {
		let log = Rc::clone(log);
		Handler::new(move |params| {
			let name = params.and_then(|p| p.get("name").cloned()).unwrap_or_default();
			log.borrow_mut().push(format!("{}{}", tag, name));
			Ok(())
		})
	}

	fn logging_middleware(log: &Log, tag: &'static str) -> Middleware {
		let log = Rc::clone(log);
		Middleware::new(move || {
			log.borrow_mut().push(tag.to_string());
			Ok(())
		})
	}

	#[rstest]
	fn test_same_path_twice_resolves_once(log: Log) {
		// Arrange
		let nav = controller();
		nav.table_mut().add("/about", None, logging_handler(&log, "about")).unwrap();

		// Act
		nav.navigate("/about", NavigationType::Push).unwrap();
		nav.navigate("/about", NavigationType::Pop).unwrap();

		// Assert
		assert_eq!(*log.borrow(), vec!["about"]);
		assert_eq!(nav.current_path().as_deref(), Some("/about"));
	}

	#[rstest]
	fn test_initial_navigation_bypasses_dedupe(log: Log) {
		let nav = controller();
		nav.table_mut().add("/", None, logging_handler(&log, "home")).unwrap();

		nav.navigate("/", NavigationType::Initial).unwrap();
		nav.navigate("/", NavigationType::Initial).unwrap();

		assert_eq!(log.borrow().len(), 2);
	}

	#[rstest]
	fn test_middleware_runs_in_order_before_handler(log: Log) {
		// Arrange
		let nav = controller();
		nav.table_mut()
			.add(
				"/secret",
				Some(vec![
					logging_middleware(&log, "mw1"),
					Middleware::inert("string"),
					logging_middleware(&log, "mw2"),
				]),
				logging_handler(&log, "secret"),
			)
			.unwrap();

		// Act
		nav.navigate("/secret", NavigationType::Push).unwrap();

		// Assert
		assert_eq!(*log.borrow(), vec!["mw1", "mw2", "secret"]);
	}

	#[rstest]
	fn test_middleware_error_stops_navigation(log: Log) {
		// Arrange
		let nav = controller();
		nav.table_mut()
			.add(
				"/secret",
				Some(vec![
					Middleware::new(|| Err(anyhow::anyhow!("session expired"))),
					logging_middleware(&log, "after"),
				]),
				logging_handler(&log, "secret"),
			)
			.unwrap();

		// Act
		let err = nav.navigate("/secret", NavigationType::Push).unwrap_err();

		// Assert
		assert_eq!(err.to_string(), "Handler for '/secret' failed: session expired");
		assert!(log.borrow().is_empty());
	}

	#[rstest]
	fn test_params_are_passed_to_handler(log: Log) {
		let nav = controller();
		nav.table_mut().add("/me/:name", None, logging_handler(&log, "me:")).unwrap();

		nav.navigate("/me/Jane%20Doe", NavigationType::Push).unwrap();

		assert_eq!(*log.borrow(), vec!["me:Jane Doe"]);
	}

	#[rstest]
	fn test_not_found_invoked_once_and_nothing_else(log: Log) {
		// Arrange
		let nav = controller();
		nav.table_mut().add("/", None, logging_handler(&log, "home")).unwrap();
		let not_found_log = Rc::clone(&log);
		nav.table_mut().set_not_found(NotFoundHandler::new(move || {
			not_found_log.borrow_mut().push("404".to_string());
			Ok(())
		}));

		// Act
		nav.navigate("/missing", NavigationType::Push).unwrap();

		// Assert
		assert_eq!(*log.borrow(), vec!["404"]);
	}

	#[rstest]
	fn test_not_found_error_propagates() {
		let nav = controller();
		nav.table_mut()
			.set_not_found(NotFoundHandler::new(|| Err(anyhow::anyhow!("no 404 page"))));

		let err = nav.navigate("/missing", NavigationType::Push).unwrap_err();

		assert_eq!(err.to_string(), "Handler for '/missing' failed: no 404 page");
	}

	#[rstest]
	fn test_handler_error_propagates_without_mount() {
		let nav = controller();
		nav.table_mut()
			.add("/", None, Handler::new(|_| Err(anyhow::anyhow!("bug"))))
			.unwrap();

		assert!(matches!(
			nav.navigate("/", NavigationType::Push),
			Err(RouterError::Handler { .. })
		));
	}

	#[rstest]
	fn test_reset_allows_same_path_again(log: Log) {
		let nav = controller();
		nav.table_mut().add("/about", None, logging_handler(&log, "about")).unwrap();

		nav.navigate("/about", NavigationType::Push).unwrap();
		nav.reset();
		nav.navigate("/about", NavigationType::Push).unwrap();

		assert_eq!(log.borrow().len(), 2);
		assert_eq!(nav.current_path().as_deref(), Some("/about"));
	}
}
