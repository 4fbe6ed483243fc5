//! # Rooter
//!
//! A minimal client-side router for single-page applications.
//!
//! Rooter intercepts same-origin link clicks and back/forward navigation,
//! matches the path against a table of static and `/:name` parameterized
//! patterns, runs the route's middleware and hands the handler to a fade
//! transition.
//!
//! ## Crates
//!
//! - [`core`] (`rooter-core`): host-independent matching, navigation and
//!   transitions, plus in-memory test doubles
//! - [`web`] (`rooter-web`, `web` feature, wasm32 only): `web-sys`
//!   bindings and the JavaScript `Router` class
//!
//! ## Feature Flags
//!
//! - `web` (default) - Browser bindings
//! - `console_error_panic_hook` - Readable panic messages in the browser console
//! - `testing` - Deterministic scheduler and mount point doubles for application tests
//!
//! ## Quick Example
//!
//! ```
//! use rooter::prelude::*;
//! use std::rc::Rc;
//!
//! let history = Rc::new(MemoryHistory::new("/"));
//! let router = Router::builder().history(history.clone()).build();
//!
//! router
//! 	.when("/", |_| Ok(()))?
//! 	.when("/me/:name", |params| {
//! 		let name = params.map(|p| p["name"].clone()).unwrap_or_default();
//! 		println!("hello {}", name);
//! 		Ok(())
//! 	})?;
//! router.not_found(|| Ok(()));
//!
//! router.start()?;
//! router.go_to("/me/Jane%20Doe")?;
//! assert_eq!(history.current_path(), "/me/Jane%20Doe");
//! # Ok::<(), rooter::RouterError>(())
//! ```

pub use rooter_core as core;
#[cfg(feature = "web")]
pub use rooter_web as web;

pub use rooter_core::{
	Handler, History, MemoryHistory, Middleware, MountPoint, NavigationType, Params, PathPattern,
	Route, Router, RouterBuilder, RouterError, RouterOptions, RouterResult, Scheduler,
	TransitionConfig,
};

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub use rooter_web::{BrowserHistory, BrowserRouter, ElementMount, JsRouter, TimeoutScheduler};

pub mod prelude {
	pub use crate::{
		Handler, History, MemoryHistory, Middleware, Params, Router, RouterError, RouterOptions,
		RouterResult, TransitionConfig,
	};

	#[cfg(all(feature = "web", target_arch = "wasm32"))]
	pub use crate::BrowserRouter;
}
