//! Browser bindings for rooter.
//!
//! Implements the `rooter-core` collaborator traits on top of `web-sys`:
//!
//! - [`BrowserHistory`]: `window.history` and `window.location`
//! - [`ElementMount`]: inline `opacity`/`transition` styles on an element
//! - [`TimeoutScheduler`]: `window.setTimeout`
//!
//! [`BrowserRouter`] wires them together and installs the document click
//! and window `popstate` listeners. The `Router` JavaScript class exposes
//! the same registration API to JavaScript callers.
//!
//! Everything here is compiled for `wasm32` only; on other targets the
//! crate is empty.

#[cfg(target_arch = "wasm32")]
mod error;
#[cfg(target_arch = "wasm32")]
mod history;
#[cfg(target_arch = "wasm32")]
pub mod js;
#[cfg(target_arch = "wasm32")]
mod launcher;
#[cfg(target_arch = "wasm32")]
pub mod listeners;
#[cfg(target_arch = "wasm32")]
mod mount;
#[cfg(target_arch = "wasm32")]
mod timer;

#[cfg(target_arch = "wasm32")]
pub use error::{describe_js, into_js_error, js_type_name};
#[cfg(target_arch = "wasm32")]
pub use history::BrowserHistory;
#[cfg(target_arch = "wasm32")]
pub use js::JsRouter;
#[cfg(target_arch = "wasm32")]
pub use launcher::BrowserRouter;
#[cfg(target_arch = "wasm32")]
pub use mount::ElementMount;
#[cfg(target_arch = "wasm32")]
pub use timer::TimeoutScheduler;
