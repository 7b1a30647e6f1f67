//! URL path pattern compilation and matching.
//!
//! Route paths compile into anchored regexes once, when the table is
//! built. Supported syntax:
//!
//! - `/dataframe` - literal match
//! - `/frames/{id}` - `{name}` captures a single path segment
//! - `/assets/{rest:*}` - `{name:*}` captures the remainder of the path,
//!   including separators

use std::collections::HashMap;

/// Maximum allowed length for a pattern string in bytes.
const MAX_PATTERN_LENGTH: usize = 1024;

/// Maximum allowed number of path segments in a pattern.
const MAX_PATH_SEGMENTS: usize = 32;

/// Maximum allowed size for the compiled regex in bytes.
const MAX_REGEX_SIZE: usize = 1 << 20;

/// A compiled route path pattern.
#[derive(Debug, Clone)]
pub struct PathPattern {
	/// The original pattern string.
	pattern: String,
	/// Anchored regex the pattern compiles to.
	regex: regex::Regex,
	/// Parameter names in the order they appear.
	param_names: Vec<String>,
}

impl PathPattern {
	/// Compiles a pattern string.
	///
	/// # Errors
	///
	/// Returns a reason string if the pattern exceeds the length or
	/// segment limits, or does not compile into a valid regex. Callers
	/// wrap this into [`crate::RouterError::InvalidPattern`].
	pub fn new(pattern: &str) -> Result<Self, String> {
		if pattern.len() > MAX_PATTERN_LENGTH {
			return Err(format!(
				"pattern is {} bytes, limit is {}",
				pattern.len(),
				MAX_PATTERN_LENGTH
			));
		}

		let segment_count = pattern.split('/').count();
		if segment_count > MAX_PATH_SEGMENTS {
			return Err(format!(
				"pattern has {} segments, limit is {}",
				segment_count, MAX_PATH_SEGMENTS
			));
		}

		let (regex_src, param_names) = compile(pattern);

		let regex = regex::RegexBuilder::new(&regex_src)
			.size_limit(MAX_REGEX_SIZE)
			.build()
			.map_err(|e| format!("regex compilation failed: {}", e))?;

		Ok(Self {
			pattern: pattern.to_string(),
			regex,
			param_names,
		})
	}

	/// Returns the original pattern string.
	pub fn pattern(&self) -> &str {
		&self.pattern
	}

	/// Returns the parameter names in pattern order.
	pub fn param_names(&self) -> &[String] {
		&self.param_names
	}

	/// Returns whether the pattern captures no parameters.
	pub fn is_exact(&self) -> bool {
		self.param_names.is_empty()
	}

	/// Matches a concrete path, returning the captured parameters.
	pub fn matches(&self, path: &str) -> Option<HashMap<String, String>> {
		self.regex.captures(path).map(|caps| {
			self.param_names
				.iter()
				.filter_map(|name| {
					caps.name(name)
						.map(|m| (name.clone(), m.as_str().to_string()))
				})
				.collect()
		})
	}

	/// Returns whether the pattern matches the path, without capturing.
	pub fn is_match(&self, path: &str) -> bool {
		self.regex.is_match(path)
	}

	/// Substitutes parameters back into the pattern, producing a path.
	///
	/// # Errors
	///
	/// Returns the name of the first parameter missing from `params`.
	pub fn reverse(&self, params: &HashMap<String, String>) -> Result<String, String> {
		let mut out = String::with_capacity(self.pattern.len());
		let mut chars = self.pattern.chars().peekable();

		while let Some(c) = chars.next() {
			if c != '{' {
				out.push(c);
				continue;
			}
			let mut name = String::new();
			for inner in chars.by_ref() {
				if inner == '}' {
					break;
				}
				name.push(inner);
			}
			// Strip a wildcard marker so `{rest:*}` reverses like `{rest}`.
			let name = name.strip_suffix(":*").unwrap_or(&name);
			match params.get(name) {
				Some(value) => out.push_str(value),
				None => return Err(name.to_string()),
			}
		}

		Ok(out)
	}
}

/// Compiles a pattern into an anchored regex source plus parameter names.
fn compile(pattern: &str) -> (String, Vec<String>) {
	let mut regex_src = String::from("^");
	let mut param_names = Vec::new();
	let mut chars = pattern.chars().peekable();

	while let Some(c) = chars.next() {
		match c {
			'{' => {
				let mut name = String::new();
				let mut wildcard = false;
				while let Some(&next) = chars.peek() {
					if next == '}' {
						chars.next();
						break;
					}
					if next == ':' {
						chars.next();
						if chars.peek() == Some(&'*') {
							chars.next();
							wildcard = true;
						}
						continue;
					}
					name.push(next);
					chars.next();
				}

				if wildcard {
					// Matches across path separators; callers validate
					// captured values before using them for anything
					// filesystem-like.
					regex_src.push_str(&format!("(?P<{}>.*)", name));
				} else {
					regex_src.push_str(&format!("(?P<{}>[^/]+)", name));
				}
				param_names.push(name);
			}
			'/' | '.' | '+' | '*' | '?' | '(' | ')' | '[' | ']' | '^' | '$' | '|' | '\\' => {
				regex_src.push('\\');
				regex_src.push(c);
			}
			_ => regex_src.push(c),
		}
	}

	regex_src.push('$');
	(regex_src, param_names)
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

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_literal_pattern() {
		let pattern = PathPattern::new("/dataframe").unwrap();
		assert!(pattern.is_exact());
		assert!(pattern.is_match("/dataframe"));
		assert!(!pattern.is_match("/dataframe/42"));
		assert!(!pattern.is_match("/unknown"));
	}

	#[test]
	fn test_single_param() {
		let pattern = PathPattern::new("/frames/{id}").unwrap();
		assert!(!pattern.is_exact());

		let params = pattern.matches("/frames/42").unwrap();
		assert_eq!(params.get("id"), Some(&"42".to_string()));
		assert!(pattern.matches("/frames").is_none());
		assert!(pattern.matches("/frames/42/cells").is_none());
	}

	#[test]
	fn test_multiple_params() {
		let pattern = PathPattern::new("/frames/{frame_id}/cells/{cell_id}").unwrap();
		let params = pattern.matches("/frames/7/cells/3").unwrap();
		assert_eq!(params.get("frame_id"), Some(&"7".to_string()));
		assert_eq!(params.get("cell_id"), Some(&"3".to_string()));
		assert_eq!(pattern.param_names(), &["frame_id", "cell_id"]);
	}

	#[test]
	fn test_wildcard_param() {
		let pattern = PathPattern::new("/assets/{rest:*}").unwrap();
		let params = pattern.matches("/assets/css/site/main.css").unwrap();
		assert_eq!(params.get("rest"), Some(&"css/site/main.css".to_string()));
	}

	#[test]
	fn test_special_chars_escaped() {
		let pattern = PathPattern::new("/api/v1.0").unwrap();
		assert!(pattern.is_match("/api/v1.0"));
		assert!(!pattern.is_match("/api/v1X0"));
	}

	#[test]
	fn test_reverse() {
		let pattern = PathPattern::new("/frames/{id}").unwrap();
		let mut params = HashMap::new();
		params.insert("id".to_string(), "42".to_string());
		assert_eq!(pattern.reverse(&params).unwrap(), "/frames/42");
	}

	#[test]
	fn test_reverse_missing_param() {
		let pattern = PathPattern::new("/frames/{id}").unwrap();
		assert_eq!(pattern.reverse(&HashMap::new()), Err("id".to_string()));
	}

	#[test]
	fn test_reverse_wildcard() {
		let pattern = PathPattern::new("/assets/{rest:*}").unwrap();
		let mut params = HashMap::new();
		params.insert("rest".to_string(), "css/main.css".to_string());
		assert_eq!(pattern.reverse(&params).unwrap(), "/assets/css/main.css");
	}

	#[test]
	fn test_rejects_excessive_length() {
		let long = "/".to_string() + &"a".repeat(1025);
		let result = PathPattern::new(&long);
		assert!(result.unwrap_err().contains("limit"));
	}

	#[test]
	fn test_rejects_excessive_segments() {
		let segments: Vec<&str> = (0..40).map(|_| "seg").collect();
		let pattern = format!("/{}", segments.join("/"));
		let result = PathPattern::new(&pattern);
		assert!(result.unwrap_err().contains("segments"));
	}

	#[test]
	fn test_display_and_eq() {
		let a = PathPattern::new("/frames/{id}").unwrap();
		let b = PathPattern::new("/frames/{id}").unwrap();
		let c = PathPattern::new("/frames/{frame}").unwrap();
		assert_eq!(format!("{}", a), "/frames/{id}");
		assert_eq!(a, b);
		assert_ne!(a, c);
	}

	#[test]
	fn test_root_pattern() {
		let pattern = PathPattern::new("/").unwrap();
		assert!(pattern.is_match("/"));
		assert!(!pattern.is_match("/dataframe"));
	}
}
