//! Router configuration.
//!
//! The base URL prefix is a build-time input: the build system exports
//! `WAYFINDER_BASE_URL` and the value is baked into the binary. Everything
//! else is set explicitly on the builder.

use crate::history::HistoryMode;

/// Base URL prefix exported by the build system, if any.
const BUILD_BASE_URL: Option<&str> = option_env!("WAYFINDER_BASE_URL");

/// Base path and history mode for a router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterConfig {
	base: String,
	mode: HistoryMode,
}

impl RouterConfig {
	/// Creates a config with base `/` and [`HistoryMode::BrowserPath`].
	pub fn new() -> Self {
		Self {
			base: "/".to_string(),
			mode: HistoryMode::default(),
		}
	}

	/// Creates a config from the build-time `WAYFINDER_BASE_URL` value.
	///
	/// An unset or empty value falls back to `/`.
	pub fn from_build_env() -> Self {
		Self::new().with_base(BUILD_BASE_URL.unwrap_or("/"))
	}

	/// Overrides the base path. The value is normalized: leading slash
	/// added, trailing slashes removed (the root itself stays `/`).
	pub fn with_base(mut self, base: &str) -> Self {
		self.base = normalize_base(base);
		self
	}

	/// Overrides the history mode.
	pub fn with_mode(mut self, mode: HistoryMode) -> Self {
		self.mode = mode;
		self
	}

	/// The normalized base path.
	pub fn base(&self) -> &str {
		&self.base
	}

	/// The selected history mode.
	pub fn mode(&self) -> HistoryMode {
		self.mode
	}
}

impl Default for RouterConfig {
	fn default() -> Self {
		Self::new()
	}
}

fn normalize_base(raw: &str) -> String {
	let trimmed = raw.trim();
	if trimmed.is_empty() || trimmed == "/" {
		return "/".to_string();
	}

	let mut base = String::with_capacity(trimmed.len() + 1);
	if !trimmed.starts_with('/') {
		base.push('/');
	}
	base.push_str(trimmed);
	while base.len() > 1 && base.ends_with('/') {
		base.pop();
	}
	base
}
