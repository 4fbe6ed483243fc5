use crate::error::{describe_js, into_js_error, window};
use rooter_core::{RouterError, RouterResult, Scheduler, Task};
use std::time::Duration;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Window;

/// [`Scheduler`] backed by `window.setTimeout`.
///
/// A task error is thrown into the JavaScript host from the timer callback,
/// where it surfaces as an uncaught exception.
#[derive(Debug, Clone)]
pub struct TimeoutScheduler {
	window: Window,
}

impl TimeoutScheduler {
	/// Binds to the global window.
	///
	/// # Errors
	///
	/// Returns [`RouterError::Host`] outside a browsing context.
	pub fn new() -> RouterResult<Self> {
		Ok(Self { window: window()? })
	}
}

impl Scheduler for TimeoutScheduler {
	fn schedule(&self, delay: Duration, task: Task) -> RouterResult<()> {
		let callback = Closure::once_into_js(move || -> Result<(), JsValue> { task().map_err(into_js_error) });
		let timeout = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);

		self.window
			.set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), timeout)
			.map(|_| ())
			.map_err(|err| RouterError::host("setTimeout", describe_js(&err)))
	}
}
