//! Path pattern compilation and matching.
//!
//! A pattern containing one or more `/:name` segments is *parametric*: each
//! such segment captures exactly one path segment. Every other pattern is
//! *exact* and matches only the identical path string.

use crate::error::{RouterError, RouterResult};
use regex::{Regex, RegexBuilder};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Path parameters extracted from a matched path, keyed by parameter name.
pub type Params = HashMap<String, String>;

/// Maximum allowed length for a route pattern string in bytes.
const MAX_PATTERN_LENGTH: usize = 1024;

/// Maximum allowed number of path segments in a route pattern.
const MAX_PATH_SEGMENTS: usize = 32;

/// Maximum allowed size for a compiled pattern regex (in bytes).
const MAX_REGEX_SIZE: usize = 1 << 20; // 1 MiB

// A `/:name` segment; the name runs up to the next slash.
static PLACEHOLDER: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"/:[^/]+").expect("PLACEHOLDER: invalid regex pattern"));

/// How a compiled pattern is compared against a path.
#[derive(Debug, Clone)]
enum Matcher {
	/// Literal string equality.
	Exact,
	/// Anchored positional capture.
	Parametric(Regex),
}

/// A route pattern compiled once at registration time.
///
/// # Example
///
/// ```
/// use rooter_core::pattern::PathPattern;
///
/// let pattern = PathPattern::new("/me/:name").unwrap();
/// assert!(pattern.is_parametric());
/// assert_eq!(pattern.extract_params("/me/Jane%20Doe")["name"], "Jane Doe");
/// ```
#[derive(Debug, Clone)]
pub struct PathPattern {
	/// The pattern text as registered (namespace prefix included).
	pattern: String,
	matcher: Matcher,
	/// Parameter names in left-to-right order.
	param_names: Vec<String>,
}

impl PathPattern {
	/// Compiles a pattern.
	///
	/// # Errors
	///
	/// Returns [`RouterError::InvalidPattern`] if the pattern exceeds the
	/// length or segment limits, or if the generated regex is too large.
	pub fn new(pattern: &str) -> RouterResult<Self> {
		if pattern.len() > MAX_PATTERN_LENGTH {
			return Err(invalid(
				pattern,
				format!(
					"length {} exceeds maximum allowed length of {} bytes",
					pattern.len(),
					MAX_PATTERN_LENGTH
				),
			));
		}

		let segment_count = pattern.split('/').count();
		if segment_count > MAX_PATH_SEGMENTS {
			return Err(invalid(
				pattern,
				format!(
					"{} path segments, exceeding maximum of {}",
					segment_count, MAX_PATH_SEGMENTS
				),
			));
		}

		if !PLACEHOLDER.is_match(pattern) {
			return Ok(Self {
				pattern: pattern.to_string(),
				matcher: Matcher::Exact,
				param_names: Vec::new(),
			});
		}

		let (regex_str, param_names) = Self::compile_pattern(pattern);
		let regex = RegexBuilder::new(&regex_str)
			.size_limit(MAX_REGEX_SIZE)
			.build()
			.map_err(|e| invalid(pattern, format!("failed to compile pattern regex: {}", e)))?;

		Ok(Self {
			pattern: pattern.to_string(),
			matcher: Matcher::Parametric(regex),
			param_names,
		})
	}

	/// Builds the anchored regex source and the ordered parameter names.
	fn compile_pattern(pattern: &str) -> (String, Vec<String>) {
		let mut regex_str = String::from("^");
		let mut param_names = Vec::new();
		let mut last = 0;

		for segment in PLACEHOLDER.find_iter(pattern) {
			regex_str.push_str(&regex::escape(&pattern[last..segment.start()]));
			regex_str.push_str("/([^/]+)");
			// Skip the leading "/:".
			param_names.push(segment.as_str()[2..].to_string());
			last = segment.end();
		}

		regex_str.push_str(&regex::escape(&pattern[last..]));
		regex_str.push('$');
		(regex_str, param_names)
	}

	/// Returns the pattern text.
	pub fn pattern(&self) -> &str {
		&self.pattern
	}

	/// Returns the parameter names in the order they appear.
	pub fn param_names(&self) -> &[String] {
		&self.param_names
	}

	/// Returns whether this pattern captures parameters.
	pub fn is_parametric(&self) -> bool {
		matches!(self.matcher, Matcher::Parametric(_))
	}

	/// Checks whether `path` is accepted by this pattern.
	pub fn is_match(&self, path: &str) -> bool {
		match &self.matcher {
			Matcher::Exact => self.pattern == path,
			Matcher::Parametric(regex) => regex.is_match(path),
		}
	}

	/// Returns the raw (still percent-encoded) captured segments, in pattern
	/// order, or `None` if `path` does not match.
	///
	/// Exact patterns yield an empty capture list on a match.
	pub fn captures(&self, path: &str) -> Option<Vec<String>> {
		match &self.matcher {
			Matcher::Exact => (self.pattern == path).then(Vec::new),
			Matcher::Parametric(regex) => regex.captures(path).map(|caps| {
				caps.iter()
					.skip(1)
					.map(|m| m.map(|m| m.as_str().to_string()).unwrap_or_default())
					.collect()
			}),
		}
	}

	/// Extracts decoded parameters from `path`.
	///
	/// Captured values are zipped positionally with the parameter names and
	/// percent-decoded. A path that does not match yields an empty map.
	pub fn extract_params(&self, path: &str) -> Params {
		let Some(values) = self.captures(path) else {
			return Params::new();
		};

		self.param_names
			.iter()
			.zip(values)
			.map(|(name, raw)| (name.clone(), decode_segment(&raw)))
			.collect()
	}
}

impl PartialEq for PathPattern {
	fn eq(&self, other: &Self) -> bool {
		self.pattern == other.pattern
	}
}

impl Eq for PathPattern {}

impl std::fmt::Display for PathPattern {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.pattern)
	}
}

/// Returns whether `pattern` would compile to a parametric matcher.
pub fn is_parametric_pattern(pattern: &str) -> bool {
	PLACEHOLDER.is_match(pattern)
}

/// Percent-decodes one captured segment.
///
/// Segments that do not decode to valid UTF-8 are returned unchanged.
pub fn decode_segment(raw: &str) -> String {
	match urlencoding::decode(raw) {
		Ok(decoded) => decoded.into_owned(),
		Err(err) => {
			tracing::warn!(segment = raw, error = %err, "path segment is not valid UTF-8 once decoded; keeping raw value");
			raw.to_string()
		}
	}
}

fn invalid(pattern: &str, reason: String) -> RouterError {
	RouterError::InvalidPattern {
		pattern: pattern.to_string(),
		reason,
	}
}
