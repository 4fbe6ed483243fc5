//! History bridge: keeps history and navigation in step.
//!
//! Every bookmarkable path change updates history first and only then
//! resolves the route. Back/forward notifications carry the path as the
//! entry state and resolve without pushing.

use crate::error::RouterResult;
use crate::history::NavigationType;
use crate::router::Router;
use url::Url;

impl Router {
	/// Resolves the host's current path once.
	///
	/// Host bindings install their click and back/forward listeners before
	/// calling this. Calling it again is a no-op.
	///
	/// # Errors
	///
	/// Returns handler or scheduling errors from the initial resolution.
	pub fn start(&self) -> RouterResult<()> {
		if self.inner.started.replace(true) {
			tracing::warn!("router already started; ignoring");
			return Ok(());
		}

		let path = self.inner.history.current_path();
		tracing::info!(path = %path, routes = self.routes().len(), "router started");
		self.inner
			.controller
			.navigate(&path, NavigationType::Initial)
	}

	/// Pushes `path` onto history, then navigates to it.
	///
	/// # Errors
	///
	/// Returns [`crate::RouterError::Host`] if history refuses the push (no
	/// navigation happens then), or handler and scheduling errors.
	pub fn go_to(&self, path: &str) -> RouterResult<()> {
		self.inner.history.push(path)?;
		self.inner
			.controller
			.navigate(path, NavigationType::Push)
	}

	/// Alias of [`Router::go_to`].
	///
	/// # Errors
	///
	/// As [`Router::go_to`].
	pub fn redirect(&self, path: &str) -> RouterResult<()> {
		self.go_to(path)
	}

	/// Returns the in-app path a link points to, or `None` if the link
	/// leaves the application.
	pub fn link_target(&self, href: &str) -> Option<String> {
		link_target(href, &self.inner.history.host())
	}

	/// Handles a click on a link with absolute URL `href`.
	///
	/// Returns `true` when the router took over the navigation, in which case
	/// the caller must suppress the host's default navigation.
	///
	/// # Errors
	///
	/// As [`Router::go_to`].
	pub fn follow_link(&self, href: &str) -> RouterResult<bool> {
		let Some(path) = self.link_target(href) else {
			tracing::trace!(href, "link leaves the application");
			return Ok(false);
		};

		self.inner.history.push(&path)?;
		self.inner
			.controller
			.navigate(&path, NavigationType::Push)?;
		Ok(true)
	}

	/// Handles a back/forward notification carrying `state`.
	///
	/// An entry without state falls back to the host's current path.
	///
	/// # Errors
	///
	/// Returns handler or scheduling errors.
	pub fn pop_state(&self, state: Option<&str>) -> RouterResult<()> {
		let path = match state {
			Some(path) => path.to_string(),
			None => self.inner.history.current_path(),
		};
		self.inner
			.controller
			.navigate(&path, NavigationType::Pop)
	}
}

/// Returns the path of `href` if it is an http(s) URL on `host`.
///
/// `host` uses the location form `name[:port]`, where the port is omitted
/// for the scheme default. Query and fragment are dropped.
pub fn link_target(href: &str, host: &str) -> Option<String> {
	let url = Url::parse(href).ok()?;
	if !matches!(url.scheme(), "http" | "https") {
		return None;
	}

	let link_host = match (url.host_str(), url.port()) {
		(Some(name), Some(port)) => format!("{}:{}", name, port),
		(Some(name), None) => name.to_string(),
		(None, _) => return None,
	};

	link_host
		.eq_ignore_ascii_case(host)
		.then(|| url.path().to_string())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::history::{History, MemoryHistory};
	use rstest::rstest;
	use std::cell::RefCell;
	use std::rc::Rc;

	#[rstest]
	#[case("http://localhost/about", "localhost", Some("/about"))]
	#[case("https://example.com/me/Jane%20Doe", "example.com", Some("/me/Jane%20Doe"))]
	#[case("http://localhost:8080/a?q=1#top", "localhost:8080", Some("/a"))]
	#[case("https://EXAMPLE.com/", "example.com", Some("/"))]
	#[case("https://example.com:443/x", "example.com", Some("/x"))]
	#[case("http://localhost:8080/a", "localhost", None)]
	#[case("https://other.org/about", "example.com", None)]
	#[case("mailto:someone@example.com", "example.com", None)]
	#[case("/relative", "example.com", None)]
	fn test_link_target(#[case] href: &str, #[case] host: &str, #[case] expected: Option<&str>) {
		assert_eq!(link_target(href, host).as_deref(), expected);
	}

	fn recording_router(history: Rc<MemoryHistory>) -> (Router, Rc<RefCell<Vec<String>>>) {
		let seen = Rc::new(RefCell::new(Vec::new()));
		let router = Router::builder().history(history).build();
		for pattern in ["/", "/a", "/b"] {
			let seen = Rc::clone(&seen);
			router
				.when(pattern, move |_| {
					seen.borrow_mut().push(pattern.to_string());
					Ok(())
				})
				.unwrap();
		}
		(router, seen)
	}

	#[rstest]
	fn test_start_resolves_current_location_once() {
		// Arrange
		let history = Rc::new(MemoryHistory::new("/a"));
		let (router, seen) = recording_router(history);

		// Act
		router.start().unwrap();
		router.start().unwrap();

		// Assert
		assert!(router.is_started());
		assert_eq!(*seen.borrow(), vec!["/a"]);
	}

	#[rstest]
	fn test_go_to_pushes_before_navigating() {
		// Arrange
		let history = Rc::new(MemoryHistory::new("/"));
		let (router, _) = recording_router(Rc::clone(&history));
		let observed = Rc::new(RefCell::new(None));
		{
			let history = Rc::clone(&history);
			let observed = Rc::clone(&observed);
			router
				.when("/check", move |_| {
					*observed.borrow_mut() = Some(history.current_path());
					Ok(())
				})
				.unwrap();
		}

		// Act
		router.go_to("/check").unwrap();

		// Assert
		assert_eq!(observed.borrow().as_deref(), Some("/check"));
	}

	#[rstest]
	fn test_follow_link_handles_same_origin_only() {
		let history = Rc::new(MemoryHistory::with_host("/", "example.com"));
		let (router, seen) = recording_router(Rc::clone(&history));

		assert!(router.follow_link("https://example.com/a").unwrap());
		assert!(!router.follow_link("https://elsewhere.net/b").unwrap());

		assert_eq!(*seen.borrow(), vec!["/a"]);
		assert_eq!(history.entries(), vec!["/", "/a"]);
	}

	#[rstest]
	fn test_duplicate_click_pushes_but_resolves_once() {
		let history = Rc::new(MemoryHistory::new("/"));
		let (router, seen) = recording_router(Rc::clone(&history));

		router.follow_link("http://localhost/b").unwrap();
		router.follow_link("http://localhost/b").unwrap();

		assert_eq!(*seen.borrow(), vec!["/b"]);
		assert_eq!(history.len(), 3);
	}

	#[rstest]
	fn test_pop_state_resolves_without_pushing() {
		// Arrange
		let history = Rc::new(MemoryHistory::new("/"));
		let (router, seen) = recording_router(Rc::clone(&history));
		router.start().unwrap();
		router.go_to("/a").unwrap();
		router.go_to("/b").unwrap();

		// Act
		let state = history.back();
		router.pop_state(state.as_deref()).unwrap();

		// Assert
		assert_eq!(*seen.borrow(), vec!["/", "/a", "/b", "/a"]);
		assert_eq!(history.len(), 3);
		assert_eq!(router.current_path().as_deref(), Some("/a"));
	}

	#[rstest]
	fn test_pop_state_without_state_uses_location() {
		let history = Rc::new(MemoryHistory::new("/"));
		let (router, seen) = recording_router(Rc::clone(&history));
		router.go_to("/a").unwrap();
		history.back();

		router.pop_state(None).unwrap();

		assert_eq!(*seen.borrow(), vec!["/a", "/"]);
	}

	#[rstest]
	fn test_redirect_is_go_to() {
		let history = Rc::new(MemoryHistory::new("/"));
		let (router, seen) = recording_router(Rc::clone(&history));

		router.redirect("/b").unwrap();

		assert_eq!(*seen.borrow(), vec!["/b"]);
		assert_eq!(history.current_path(), "/b");
	}
}
