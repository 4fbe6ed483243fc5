//! Deterministic collaborators for tests.
//!
//! [`ManualScheduler`] is a fake clock: tasks run only when the test calls
//! [`ManualScheduler::advance`]. [`RecordingMount`] records every style
//! change the sequencer makes.

use crate::error::{RouterError, RouterResult};
use crate::transition::{MountPoint, Scheduler, Task};
use std::cell::{Cell, RefCell};
use std::time::Duration;

struct Pending {
	due: Duration,
	seq: u64,
	task: Task,
}

/// A scheduler driven by an explicit virtual clock.
#[derive(Default)]
pub struct ManualScheduler {
	now: Cell<Duration>,
	next_seq: Cell<u64>,
	queue: RefCell<Vec<Pending>>,
}

impl std::fmt::Debug for ManualScheduler {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ManualScheduler")
			.field("now", &self.now.get())
			.field("pending", &self.pending())
			.finish()
	}
}

impl ManualScheduler {
	/// Creates a scheduler at virtual time zero.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the virtual time.
	pub fn now(&self) -> Duration {
		self.now.get()
	}

	/// Returns the number of queued tasks.
	pub fn pending(&self) -> usize {
		self.queue.borrow().len()
	}

	/// Advances the clock by `by`, running every task that falls due, in
	/// due-time then scheduling order. Tasks scheduled while advancing run
	/// too if they fall inside the window.
	///
	/// Returns the number of tasks run.
	///
	/// # Errors
	///
	/// Returns the first error reported by a task; later due tasks still run.
	pub fn advance(&self, by: Duration) -> RouterResult<usize> {
		let target = self.now.get() + by;
		let mut ran = 0;
		let mut first_error: Option<RouterError> = None;

		while let Some(pending) = self.pop_due(target) {
			if pending.due > self.now.get() {
				self.now.set(pending.due);
			}
			// The queue is not borrowed here; tasks may schedule more work.
			if let Err(err) = (pending.task)() {
				first_error.get_or_insert(err);
			}
			ran += 1;
		}

		self.now.set(target);
		first_error.map_or(Ok(ran), Err)
	}

	/// Advances the clock until the queue is empty.
	///
	/// # Errors
	///
	/// Returns the first error reported by a task.
	pub fn run_until_idle(&self) -> RouterResult<usize> {
		let mut total = 0;
		loop {
			let latest = self.queue.borrow().iter().map(|p| p.due).max();
			let Some(latest) = latest else {
				return Ok(total);
			};
			let by = latest.saturating_sub(self.now.get());
			total += self.advance(by)?;
		}
	}

	fn pop_due(&self, target: Duration) -> Option<Pending> {
		let mut queue = self.queue.borrow_mut();
		let index = queue
			.iter()
			.enumerate()
			.filter(|(_, p)| p.due <= target)
			.min_by_key(|(_, p)| (p.due, p.seq))
			.map(|(index, _)| index)?;
		Some(queue.remove(index))
	}
}

impl Scheduler for ManualScheduler {
	fn schedule(&self, delay: Duration, task: Task) -> RouterResult<()> {
		let seq = self.next_seq.get();
		self.next_seq.set(seq + 1);
		self.queue.borrow_mut().push(Pending {
			due: self.now.get() + delay,
			seq,
			task,
		});
		Ok(())
	}
}

/// A style change applied to a [`RecordingMount`].
#[derive(Debug, Clone, PartialEq)]
pub enum MountEvent {
	/// `set_opacity` was called.
	Opacity(f32),
	/// `set_transition` was called.
	Transition(String),
}

/// A mount point that records the changes applied to it.
#[derive(Debug, Default)]
pub struct RecordingMount {
	events: RefCell<Vec<MountEvent>>,
}

impl RecordingMount {
	/// Creates an empty recorder.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns every recorded change in order.
	pub fn events(&self) -> Vec<MountEvent> {
		self.events.borrow().clone()
	}

	/// Returns the recorded opacity values in order.
	pub fn opacities(&self) -> Vec<f32> {
		self.events
			.borrow()
			.iter()
			.filter_map(|event| match event {
				MountEvent::Opacity(value) => Some(*value),
				MountEvent::Transition(_) => None,
			})
			.collect()
	}

	/// Returns the last opacity set, if any.
	pub fn opacity(&self) -> Option<f32> {
		self.opacities().last().copied()
	}

	/// Returns the last transition declaration set, if any.
	pub fn last_transition(&self) -> Option<String> {
		self.events.borrow().iter().rev().find_map(|event| match event {
			MountEvent::Transition(value) => Some(value.clone()),
			MountEvent::Opacity(_) => None,
		})
	}

	/// Forgets recorded changes.
	pub fn clear(&self) {
		self.events.borrow_mut().clear();
	}
}

impl MountPoint for RecordingMount {
	fn set_opacity(&self, opacity: f32) {
		self.events.borrow_mut().push(MountEvent::Opacity(opacity));
	}

	fn set_transition(&self, declaration: &str) {
		self.events
			.borrow_mut()
			.push(MountEvent::Transition(declaration.to_string()));
	}
}
