//! View transition sequencing.
//!
//! With a mount point configured, a transition hides the mount point,
//! invokes the handler after [`TransitionConfig::apply_after`] milliseconds,
//! then shows it again with the fade-in declaration. Every new navigation
//! takes a fresh token; a deferred callback holding an older token does
//! nothing when it fires, so the latest requested view wins.

use crate::config::TransitionConfig;
use crate::error::{RouterError, RouterResult};
use crate::pattern::Params;
use crate::route::Route;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

/// The element whose content handlers swap.
pub trait MountPoint {
	/// Sets the visual opacity (`0.0` hidden, `1.0` visible).
	fn set_opacity(&self, opacity: f32);

	/// Sets the CSS transition declaration.
	fn set_transition(&self, declaration: &str);
}

/// A deferred unit of work. Its error is reported by the scheduler.
pub type Task = Box<dyn FnOnce() -> RouterResult<()>>;

/// Runs tasks after a delay on the host's event loop.
pub trait Scheduler {
	/// Schedules `task` to run once after `delay`.
	///
	/// Implementations that run the task before returning propagate its
	/// result; deferring implementations return `Ok(())` once the task is
	/// queued.
	///
	/// # Errors
	///
	/// Returns [`RouterError::Host`] if the task cannot be scheduled, or the
	/// task's own error when it runs synchronously.
	fn schedule(&self, delay: Duration, task: Task) -> RouterResult<()>;
}

/// Runs every task immediately, ignoring the delay.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImmediateScheduler;

impl Scheduler for ImmediateScheduler {
	fn schedule(&self, _delay: Duration, task: Task) -> RouterResult<()> {
		task()
	}
}

/// Sequences hide → handler → show around handler invocation.
#[derive(Clone)]
pub struct TransitionSequencer {
	mount: Option<Rc<dyn MountPoint>>,
	scheduler: Rc<dyn Scheduler>,
	config: Rc<RefCell<TransitionConfig>>,
	token: Rc<Cell<u64>>,
	in_flight: Rc<Cell<bool>>,
}

impl std::fmt::Debug for TransitionSequencer {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("TransitionSequencer")
			.field("has_mount", &self.mount.is_some())
			.field("config", &self.config.borrow())
			.field("token", &self.token.get())
			.field("in_flight", &self.in_flight.get())
			.finish()
	}
}

impl TransitionSequencer {
	/// Creates a sequencer.
	pub fn new(
		mount: Option<Rc<dyn MountPoint>>,
		scheduler: Rc<dyn Scheduler>,
		config: TransitionConfig,
	) -> Self {
		Self {
			mount,
			scheduler,
			config: Rc::new(RefCell::new(config)),
			token: Rc::new(Cell::new(0)),
			in_flight: Rc::new(Cell::new(false)),
		}
	}

	/// Returns whether a mount point is configured.
	pub fn has_mount(&self) -> bool {
		self.mount.is_some()
	}

	/// Returns a copy of the transition timing.
	pub fn config(&self) -> TransitionConfig {
		self.config.borrow().clone()
	}

	/// Replaces the transition timing. Pending transitions pick up the new
	/// fade-in declaration when they show.
	pub fn set_config(&self, config: TransitionConfig) {
		*self.config.borrow_mut() = config;
	}

	/// Returns whether the mount point is hidden awaiting a deferred handler.
	pub fn is_in_flight(&self) -> bool {
		self.in_flight.get()
	}

	/// Returns the token of the most recent transition.
	pub fn current_token(&self) -> u64 {
		self.token.get()
	}

	fn next_token(&self) -> u64 {
		let token = self.token.get().wrapping_add(1);
		self.token.set(token);
		token
	}

	/// Invalidates any pending transition without starting a new one.
	///
	/// If the mount point was hidden by the superseded transition it is made
	/// visible again.
	pub fn cancel(&self) {
		self.next_token();
		if self.in_flight.replace(false)
			&& let Some(mount) = &self.mount
		{
			tracing::debug!("pending transition cancelled; restoring mount point");
			mount.set_opacity(1.0);
		}
	}

	/// Invokes `route`'s handler for `path`, wrapped in a transition when a
	/// mount point is configured.
	///
	/// # Errors
	///
	/// Returns [`RouterError::Handler`] when the handler fails synchronously
	/// (no mount point, or a scheduler that runs tasks immediately), or a
	/// scheduling failure.
	pub fn run(&self, route: Rc<Route>, params: Option<Params>, path: &str) -> RouterResult<()> {
		let token = self.next_token();

		let Some(mount) = self.mount.clone() else {
			return invoke(&route, params.as_ref(), path);
		};

		mount.set_opacity(0.0);
		self.in_flight.set(true);

		let delay = self.config.borrow().apply_after_delay();
		let sequencer = self.clone();
		let path = path.to_string();
		tracing::trace!(path = %path, token, delay_ms = delay.as_millis() as u64, "transition scheduled");

		self.scheduler.schedule(
			delay,
			Box::new(move || {
				if sequencer.token.get() != token {
					tracing::debug!(path = %path, token, "stale transition skipped");
					return Ok(());
				}

				let result = invoke(&route, params.as_ref(), &path);

				// The handler itself navigated; the newer transition owns the
				// show phase.
				if sequencer.token.get() != token {
					return result;
				}

				sequencer.in_flight.set(false);
				result?;

				let declaration = sequencer.config.borrow().transition_declaration();
				mount.set_opacity(1.0);
				mount.set_transition(&declaration);
				Ok(())
			}),
		)
	}
}

fn invoke(route: &Route, params: Option<&Params>, path: &str) -> RouterResult<()> {
	route
		.handler()
		.call(params)
		.map_err(|source| RouterError::Handler {
			path: path.to_string(),
			source,
		})
}
