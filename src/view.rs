//! The view seam and deferred view loading.
//!
//! View modules live outside this crate; routes reference them through
//! loader closures. [`LazyView`] is the cache in front of a loader: it
//! starts unresolved, resolves on first navigation, and keeps the loaded
//! view for the rest of the session. A failed load is not cached, so the
//! next navigation runs the loader again.

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::error::ViewLoadError;

/// A renderable unit of user-interface content.
///
/// The application shell implements this for whatever it mounts; the
/// router only holds views behind `Arc<dyn View>` and never inspects them.
pub trait View: Send + Sync {
	/// Renders the view for the given navigation context.
	fn render(&self, ctx: &ViewContext) -> String;
}

/// Navigation context handed to a view when it is mounted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewContext {
	path: String,
	params: HashMap<String, String>,
}

impl ViewContext {
	/// Creates a context for a concrete path and its captured parameters.
	pub fn new(path: impl Into<String>, params: HashMap<String, String>) -> Self {
		Self {
			path: path.into(),
			params,
		}
	}

	/// The app-relative path the view was mounted for.
	pub fn path(&self) -> &str {
		&self.path
	}

	/// All captured path parameters.
	pub fn params(&self) -> &HashMap<String, String> {
		&self.params
	}

	/// A single captured parameter by name.
	pub fn param(&self, name: &str) -> Option<&str> {
		self.params.get(name).map(String::as_str)
	}
}

/// Deferred reference to a view module.
pub type ViewLoader = Arc<dyn Fn() -> Result<Arc<dyn View>, ViewLoadError> + Send + Sync>;

/// A view reference resolved on first navigation and cached for the session.
pub struct LazyView {
	loader: ViewLoader,
	resolved: OnceCell<Arc<dyn View>>,
}

impl LazyView {
	/// Wraps an existing loader reference.
	pub fn new(loader: ViewLoader) -> Self {
		Self {
			loader,
			resolved: OnceCell::new(),
		}
	}

	/// Wraps a loader closure.
	pub fn from_fn<F>(loader: F) -> Self
	where
		F: Fn() -> Result<Arc<dyn View>, ViewLoadError> + Send + Sync + 'static,
	{
		Self::new(Arc::new(loader))
	}

	/// Returns whether the view has been loaded this session.
	pub fn is_resolved(&self) -> bool {
		self.resolved.get().is_some()
	}

	/// Resolves the view, running the loader at most once.
	///
	/// # Errors
	///
	/// Propagates the loader's [`ViewLoadError`]. Failures are not
	/// memoized; a later call retries the loader.
	pub fn resolve(&self) -> Result<Arc<dyn View>, ViewLoadError> {
		self.resolved
			.get_or_try_init(|| (self.loader)())
			.map(Arc::clone)
	}
}

impl std::fmt::Debug for LazyView {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("LazyView")
			.field("resolved", &self.is_resolved())
			.finish()
	}
}

/// Wraps a render closure in a [`View`] implementation.
pub fn view_fn<F>(render: F) -> Arc<dyn View>
where
	F: Fn(&ViewContext) -> String + Send + Sync + 'static,
{
	struct FnView<F>(F);

	impl<F> View for FnView<F>
	where
		F: Fn(&ViewContext) -> String + Send + Sync,
	{
		fn render(&self, ctx: &ViewContext) -> String {
			(self.0)(ctx)
		}
	}

	Arc::new(FnView(render))
}
