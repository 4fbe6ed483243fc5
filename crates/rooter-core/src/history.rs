//! Navigation history collaborator.
//!
//! The router never infers "where are we" from a navigation in flight; it
//! asks the [`History`] implementation, which is the source of truth.

use crate::error::RouterResult;
use std::cell::{Cell, RefCell};

/// How a navigation was triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationType {
	/// Resolution of the host's location at `start()`.
	Initial,
	/// A new entry was pushed (link click or programmatic navigation).
	Push,
	/// The user moved through existing entries (back/forward).
	Pop,
}

/// A navigation history the router can push entries onto.
///
/// Entry state is the path string itself.
pub trait History {
	/// Returns the path of the current entry.
	fn current_path(&self) -> String;

	/// Returns the `host[:port]` of the current location, used to decide
	/// whether a link stays inside the application.
	fn host(&self) -> String;

	/// Pushes a new entry whose state and URL are `path`.
	///
	/// # Errors
	///
	/// Returns [`crate::RouterError::Host`] if the host refuses the update.
	fn push(&self, path: &str) -> RouterResult<()>;
}

/// An in-memory history stack.
///
/// Used by non-browser hosts and by tests. [`MemoryHistory::back`] and
/// [`MemoryHistory::forward`] return the state of the entry moved to, which
/// is what a back/forward notification hands to the router.
#[derive(Debug)]
pub struct MemoryHistory {
	entries: RefCell<Vec<String>>,
	index: Cell<usize>,
	host: String,
}

impl MemoryHistory {
	/// Creates a history whose only entry is `initial_path` on `localhost`.
	pub fn new(initial_path: impl Into<String>) -> Self {
		Self::with_host(initial_path, "localhost")
	}

	/// Creates a history with an explicit host.
	pub fn with_host(initial_path: impl Into<String>, host: impl Into<String>) -> Self {
		Self {
			entries: RefCell::new(vec![initial_path.into()]),
			index: Cell::new(0),
			host: host.into(),
		}
	}

	/// Moves one entry back, returning its state.
	pub fn back(&self) -> Option<String> {
		let index = self.index.get().checked_sub(1)?;
		self.index.set(index);
		self.entries.borrow().get(index).cloned()
	}

	/// Moves one entry forward, returning its state.
	pub fn forward(&self) -> Option<String> {
		let index = self.index.get() + 1;
		let entry = self.entries.borrow().get(index).cloned()?;
		self.index.set(index);
		Some(entry)
	}

	/// Returns all entries, oldest first.
	pub fn entries(&self) -> Vec<String> {
		self.entries.borrow().clone()
	}

	/// Returns the number of entries.
	pub fn len(&self) -> usize {
		self.entries.borrow().len()
	}

	/// Always `false`: a history has at least its initial entry.
	pub fn is_empty(&self) -> bool {
		self.entries.borrow().is_empty()
	}
}

impl Default for MemoryHistory {
	fn default() -> Self {
		Self::new("/")
	}
}

impl History for MemoryHistory {
	fn current_path(&self) -> String {
		self.entries
			.borrow()
			.get(self.index.get())
			.cloned()
			.unwrap_or_else(|| "/".to_string())
	}

	fn host(&self) -> String {
		self.host.clone()
	}

	fn push(&self, path: &str) -> RouterResult<()> {
		let mut entries = self.entries.borrow_mut();
		// Pushing discards any forward entries.
		entries.truncate(self.index.get() + 1);
		entries.push(path.to_string());
		self.index.set(entries.len() - 1);
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_push_moves_current_entry() {
		let history = MemoryHistory::new("/");
		history.push("/about").unwrap();

		assert_eq!(history.current_path(), "/about");
		assert_eq!(history.entries(), vec!["/", "/about"]);
	}

	#[rstest]
	fn test_back_and_forward_return_state() {
		// Arrange
		let history = MemoryHistory::new("/");
		history.push("/a").unwrap();
		history.push("/b").unwrap();

		// Act & Assert
		assert_eq!(history.back().as_deref(), Some("/a"));
		assert_eq!(history.back().as_deref(), Some("/"));
		assert_eq!(history.back(), None);
		assert_eq!(history.forward().as_deref(), Some("/a"));
		assert_eq!(history.current_path(), "/a");
	}

	#[rstest]
	fn test_push_truncates_forward_entries() {
		let history = MemoryHistory::new("/");
		history.push("/a").unwrap();
		history.push("/b").unwrap();
		history.back();

		history.push("/c").unwrap();

		assert_eq!(history.entries(), vec!["/", "/a", "/c"]);
		assert_eq!(history.forward(), None);
	}

	#[rstest]
	fn test_host_defaults_to_localhost() {
		assert_eq!(MemoryHistory::default().host(), "localhost");
		assert_eq!(MemoryHistory::with_host("/", "example.com:8080").host(), "example.com:8080");
	}
}
