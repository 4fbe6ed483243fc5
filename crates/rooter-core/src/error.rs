//! Error types for client-side routing.

use thiserror::Error;

/// Error type for router operations.
///
/// Registration mistakes are reported synchronously when a route is added.
/// An unmatched path is never an error: it resolves to the not-found route.
#[derive(Debug, Error)]
pub enum RouterError {
	/// A registration argument had the wrong shape.
	#[error("Expected {expected}, got {actual}")]
	InvalidArgument {
		/// The kind of value that was expected (`"string"`, `"function"`, ...).
		expected: &'static str,
		/// A description of the value actually supplied.
		actual: String,
	},
	/// A route pattern was rejected by the matcher.
	#[error("Invalid route pattern '{pattern}': {reason}")]
	InvalidPattern {
		/// The offending pattern.
		pattern: String,
		/// Why it was rejected.
		reason: String,
	},
	/// A route or not-found handler returned an error.
	#[error("Handler for '{path}' failed: {source}")]
	Handler {
		/// The path being navigated when the handler failed.
		path: String,
		/// The application error.
		#[source]
		source: anyhow::Error,
	},
	/// Router options could not be parsed.
	#[error("Invalid router options: {0}")]
	Config(#[from] serde_json::Error),
	/// A host collaborator (history, timers, DOM) reported a failure.
	#[error("{operation} failed: {message}")]
	Host {
		/// The host operation that failed.
		operation: &'static str,
		/// The message reported by the host.
		message: String,
	},
}

impl RouterError {
	/// Creates an [`RouterError::InvalidArgument`].
	pub fn invalid_argument(expected: &'static str, actual: impl Into<String>) -> Self {
		Self::InvalidArgument {
			expected,
			actual: actual.into(),
		}
	}

	/// Creates a [`RouterError::Host`].
	pub fn host(operation: &'static str, message: impl Into<String>) -> Self {
		Self::Host {
			operation,
			message: message.into(),
		}
	}

	/// Returns `true` for errors raised while registering routes.
	pub fn is_registration_error(&self) -> bool {
		matches!(
			self,
			Self::InvalidArgument { .. } | Self::InvalidPattern { .. }
		)
	}
}

/// Result alias used throughout the router.
pub type RouterResult<T> = Result<T, RouterError>;

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(RouterError::invalid_argument("string", "number"), "Expected string, got number")]
	#[case(RouterError::invalid_argument("function", "undefined"), "Expected function, got undefined")]
	#[case(RouterError::host("history.pushState", "SecurityError"), "history.pushState failed: SecurityError")]
	fn test_router_error_display(#[case] err: RouterError, #[case] expected: &str) {
		assert_eq!(err.to_string(), expected);
	}

	#[rstest]
	fn test_handler_error_keeps_source() {
		// Arrange
		let err = RouterError::Handler {
			path: "/me/Alice".to_string(),
			source: anyhow::anyhow!("template missing"),
		};

		// Act
		let source = std::error::Error::source(&err).map(|s| s.to_string());

		// Assert
		assert_eq!(err.to_string(), "Handler for '/me/Alice' failed: template missing");
		assert_eq!(source.as_deref(), Some("template missing"));
	}

	#[rstest]
	fn test_registration_error_classification() {
		assert!(RouterError::invalid_argument("array", "object").is_registration_error());
		assert!(
			RouterError::InvalidPattern {
				pattern: "/x".to_string(),
				reason: "too long".to_string(),
			}
			.is_registration_error()
		);
		assert!(!RouterError::host("setTimeout", "no window").is_registration_error());
	}
}
