use crate::error::{into_js_error, window};
use crate::history::BrowserHistory;
use crate::listeners;
use crate::mount::ElementMount;
use crate::timer::TimeoutScheduler;
use rooter_core::{MountPoint, Router, RouterError, RouterOptions, RouterResult};
use std::rc::Rc;

/// A [`Router`] wired to the browser.
///
/// # Example
///
/// ```ignore
/// use rooter_web::BrowserRouter;
///
/// let app = BrowserRouter::new(Some("app"))?;
/// app.router()
/// 	.when("/", |_| Ok(()))?
/// 	.when("/me/:name", |params| {
/// 		tracing::info!(?params, "profile");
/// 		Ok(())
/// 	})?;
/// app.start()?;
/// ```
#[derive(Debug, Clone)]
pub struct BrowserRouter {
	router: Router,
}

impl BrowserRouter {
	/// Creates a router animating the element with id `root_id`, if any.
	///
	/// A missing element disables the transition; handlers then run
	/// synchronously.
	///
	/// # Errors
	///
	/// Returns [`RouterError::Host`] outside a browsing context.
	pub fn new(root_id: Option<&str>) -> RouterResult<Self> {
		Self::with_options(root_id, RouterOptions::default())
	}

	/// Creates a router with explicit options.
	///
	/// # Errors
	///
	/// As [`BrowserRouter::new`].
	pub fn with_options(root_id: Option<&str>, options: RouterOptions) -> RouterResult<Self> {
		let mount = match root_id {
			Some(id) => {
				let mount = ElementMount::by_id(id)?;
				if mount.is_none() {
					tracing::warn!(id, "mount element not found; transitions disabled");
				}
				mount.map(|mount| Rc::new(mount) as Rc<dyn MountPoint>)
			}
			None => None,
		};

		let router = Router::builder()
			.history(Rc::new(BrowserHistory::new()?))
			.maybe_mount(mount)
			.scheduler(Rc::new(TimeoutScheduler::new()?))
			.options(options)
			.build();

		Ok(Self { router })
	}

	/// Returns the underlying router for registration and navigation.
	pub fn router(&self) -> &Router {
		&self.router
	}

	/// Installs the link and back/forward listeners, then resolves the
	/// current location.
	///
	/// A second call does nothing.
	///
	/// # Errors
	///
	/// Returns [`RouterError::Host`] if listeners cannot be installed, or
	/// the error of the initial route handler.
	pub fn start(&self) -> RouterResult<()> {
		if !self.router.is_started() {
			let window = window()?;
			let document = window
				.document()
				.ok_or_else(|| RouterError::host("document", "no document object"))?;
			listeners::install(&self.router, &window, &document)
				.map_err(|err| RouterError::host("addEventListener", crate::describe_js(&err)))?;
		}
		self.router.start()
	}

	/// Like [`BrowserRouter::start`], with the error converted for
	/// JavaScript.
	pub(crate) fn start_js(&self) -> Result<(), wasm_bindgen::JsValue> {
		self.start().map_err(into_js_error)
	}
}
