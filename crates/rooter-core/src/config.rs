//! Router configuration.
//!
//! Both structs deserialize from camelCase JSON with every field optional:
//!
//! ```json
//! { "transition": { "time": 400, "effect": "ease-in", "applyAfter": 200 },
//!   "strictMiddleware": false }
//! ```

use crate::error::RouterResult;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default fade-in duration in milliseconds.
pub const DEFAULT_FADE_MS: u64 = 400;

/// Default delay between hiding the mount point and invoking the handler.
pub const DEFAULT_APPLY_AFTER_MS: u64 = 200;

/// Default easing function of the fade-in.
pub const DEFAULT_EFFECT: &str = "ease-in";

/// Timing of the hide → handler → show view transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransitionConfig {
	/// Fade-in duration in milliseconds, written into the transition
	/// declaration of the show phase.
	pub time: u64,
	/// CSS easing name (`"ease-in"`, `"linear"`, ...).
	pub effect: String,
	/// Milliseconds between hiding the mount point and invoking the handler.
	pub apply_after: u64,
}

impl Default for TransitionConfig {
	fn default() -> Self {
		Self {
			time: DEFAULT_FADE_MS,
			effect: DEFAULT_EFFECT.to_string(),
			apply_after: DEFAULT_APPLY_AFTER_MS,
		}
	}
}

impl TransitionConfig {
	/// Returns the hide → handler delay.
	pub fn apply_after_delay(&self) -> Duration {
		Duration::from_millis(self.apply_after)
	}

	/// Returns the fade-in duration.
	pub fn fade_duration(&self) -> Duration {
		Duration::from_millis(self.time)
	}

	/// Returns the CSS `transition` value applied when showing the view.
	pub fn transition_declaration(&self) -> String {
		format!("opacity {}ms {}", self.time, self.effect)
	}
}

/// Options fixed when a router is built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RouterOptions {
	/// Initial transition timing; replaceable later at runtime.
	pub transition: TransitionConfig,
	/// Reject non-callable middleware entries at registration instead of
	/// skipping them during navigation.
	pub strict_middleware: bool,
}

impl RouterOptions {
	/// Parses options from JSON.
	///
	/// # Errors
	///
	/// Returns [`crate::RouterError::Config`] on malformed input.
	pub fn from_json(json: &str) -> RouterResult<Self> {
		Ok(serde_json::from_str(json)?)
	}

	/// Sets the transition timing.
	pub fn with_transition(mut self, transition: TransitionConfig) -> Self {
		self.transition = transition;
		self
	}

	/// Sets strict middleware checking.
	pub fn with_strict_middleware(mut self, strict: bool) -> Self {
		self.strict_middleware = strict;
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::RouterError;
	use rstest::rstest;

	#[rstest]
	fn test_transition_defaults() {
		let config = TransitionConfig::default();
		assert_eq!(config.time, 400);
		assert_eq!(config.effect, "ease-in");
		assert_eq!(config.apply_after, 200);
		assert_eq!(config.transition_declaration(), "opacity 400ms ease-in");
		assert_eq!(config.apply_after_delay(), Duration::from_millis(200));
	}

	#[rstest]
	fn test_transition_serde_uses_camel_case() {
		// Arrange
		let config = TransitionConfig {
			time: 250,
			effect: "linear".to_string(),
			apply_after: 0,
		};

		// Act
		let json = serde_json::to_value(&config).unwrap();

		// Assert
		assert_eq!(
			json,
			serde_json::json!({ "time": 250, "effect": "linear", "applyAfter": 0 })
		);
	}

	#[rstest]
	fn test_options_from_partial_json() {
		let options =
			RouterOptions::from_json(r#"{ "transition": { "applyAfter": 50 }, "strictMiddleware": true }"#)
				.unwrap();

		assert!(options.strict_middleware);
		assert_eq!(options.transition.apply_after, 50);
		assert_eq!(options.transition.time, DEFAULT_FADE_MS);
		assert_eq!(options.transition.effect, DEFAULT_EFFECT);
	}

	#[rstest]
	fn test_options_from_empty_json_are_defaults() {
		assert_eq!(RouterOptions::from_json("{}").unwrap(), RouterOptions::default());
	}

	#[rstest]
	#[case(r#"{ "transition": { "time": -1 } }"#)]
	#[case(r#"{ "strictMiddleware": "yes" }"#)]
	#[case("not json")]
	fn test_options_reject_malformed_json(#[case] json: &str) {
		let err = RouterOptions::from_json(json).unwrap_err();
		assert!(matches!(err, RouterError::Config(_)));
	}
}
