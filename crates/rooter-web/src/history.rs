use crate::error::{describe_js, window};
use rooter_core::{History, RouterError, RouterResult};
use wasm_bindgen::JsValue;
use web_sys::Window;

/// [`History`] backed by `window.history` and `window.location`.
///
/// Each pushed entry stores its path as the entry state, which is what the
/// `popstate` listener hands back to the router.
#[derive(Debug, Clone)]
pub struct BrowserHistory {
	window: Window,
}

impl BrowserHistory {
	/// Binds to the global window.
	///
	/// # Errors
	///
	/// Returns [`RouterError::Host`] outside a browsing context.
	pub fn new() -> RouterResult<Self> {
		Ok(Self { window: window()? })
	}

	/// Binds to `window`.
	pub fn from_window(window: Window) -> Self {
		Self { window }
	}
}

impl History for BrowserHistory {
	fn current_path(&self) -> String {
		self.window
			.location()
			.pathname()
			.unwrap_or_else(|_| "/".to_string())
	}

	fn host(&self) -> String {
		self.window.location().host().unwrap_or_default()
	}

	fn push(&self, path: &str) -> RouterResult<()> {
		self.window
			.history()
			.and_then(|history| history.push_state_with_url(&JsValue::from_str(path), "", Some(path)))
			.map_err(|err| RouterError::host("history.pushState", describe_js(&err)))
	}
}
