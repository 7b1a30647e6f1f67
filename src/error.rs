//! Error types for route table construction and navigation.

use thiserror::Error;

/// Error raised when a deferred view fails to load.
///
/// Loaders produce this directly; the router wraps it together with the
/// path that triggered the load.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("view load failed: {0}")]
pub struct ViewLoadError(pub String);

impl ViewLoadError {
	/// Creates a load error from any displayable reason.
	pub fn new(reason: impl std::fmt::Display) -> Self {
		Self(reason.to_string())
	}
}

/// Error type for router operations.
///
/// The `Duplicate*`, `AbsoluteChildPath` and `InvalidPattern` variants are
/// construction errors: they surface from [`crate::RouteTable::new`] or
/// [`crate::RouterBuilder::build`] before any navigation happens. The rest
/// propagate to the application shell at runtime; the crate performs no
/// recovery of its own.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
	/// No registered route matches the given path.
	#[error("no route matches path: {0}")]
	NoMatch(String),
	/// The same route name was declared twice in one table.
	#[error("duplicate route name: {0}")]
	DuplicateRouteName(String),
	/// Two children of the same parent declare the same path.
	#[error("duplicate path '{path}' under '{parent}'")]
	DuplicatePath { parent: String, path: String },
	/// A child route declared an absolute path.
	#[error("child path must be relative, got '{0}'")]
	AbsoluteChildPath(String),
	/// A route path failed to compile into a pattern.
	#[error("invalid route pattern '{pattern}': {reason}")]
	InvalidPattern { pattern: String, reason: String },
	/// Reverse lookup for a name that is not in the table.
	#[error("unknown route name: {0}")]
	UnknownRouteName(String),
	/// Reverse lookup without a value for one of the pattern's parameters.
	#[error("missing parameter '{param}' for route '{name}'")]
	MissingParameter { name: String, param: String },
	/// A deferred view failed to load during resolution.
	#[error("view load failed for '{path}': {source}")]
	ViewLoad {
		path: String,
		source: ViewLoadError,
	},
	/// Writing the history entry failed.
	#[error("navigation failed: {0}")]
	Navigation(String),
}

/// Convenience alias used throughout the crate.
pub type RouterResult<T> = Result<T, RouterError>;
