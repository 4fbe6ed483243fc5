//! Host-independent core of the rooter client-side router.
//!
//! This crate owns path matching, the route table, navigation and the
//! fade transition. Browser specifics sit behind three small traits:
//!
//! - [`History`]: where the current path lives and how new entries are pushed
//! - [`MountPoint`]: the element whose opacity is animated between views
//! - [`Scheduler`]: deferred task execution for the transition delay
//!
//! The `rooter-web` crate implements them on top of `web-sys`; the
//! `testing` module (behind the `testing` feature) provides deterministic
//! in-memory versions.
//!
//! ## Route patterns
//!
//! Patterns are literal paths with `/:name` placeholders. A placeholder
//! matches one non-empty segment and binds its percent-decoded value:
//!
//! ```
//! use rooter_core::PathPattern;
//!
//! let pattern = PathPattern::new("/me/:name")?;
//! let params = pattern.extract_params("/me/Jane%20Doe");
//! assert_eq!(params["name"], "Jane Doe");
//! # Ok::<(), rooter_core::RouterError>(())
//! ```

pub mod bridge;
pub mod config;
pub mod error;
pub mod history;
pub mod navigation;
pub mod pattern;
pub mod route;
pub mod router;
pub mod table;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod transition;

pub use bridge::link_target;
pub use config::{RouterOptions, TransitionConfig};
pub use error::{RouterError, RouterResult};
pub use history::{History, MemoryHistory, NavigationType};
pub use navigation::{NavigationController, NavigationState};
pub use pattern::{Params, PathPattern};
pub use route::{Handler, Middleware, NotFoundHandler, Route};
pub use router::{Router, RouterBuilder};
pub use table::{Resolved, RouteTable};
pub use transition::{ImmediateScheduler, MountPoint, Scheduler, Task, TransitionSequencer};
