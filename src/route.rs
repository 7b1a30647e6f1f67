//! Route definitions and the nested route tree.

use std::sync::Arc;

use crate::error::ViewLoadError;
use crate::table::RouteMatch;
use crate::view::{LazyView, View};

/// Guard function deciding whether a matched route is usable.
pub type RouteGuard = Arc<dyn Fn(&RouteMatch) -> bool + Send + Sync>;

/// A single route definition.
///
/// A route owns a path segment (relative under its parent; roots may be
/// absolute), an optional table-unique name, an optional deferred view,
/// and child routes. A route without a view is a grouping node: it shapes
/// paths but is never a navigation target.
pub struct Route {
	path: String,
	name: Option<String>,
	view: Option<LazyView>,
	guard: Option<RouteGuard>,
	children: Vec<Route>,
}

impl Route {
	/// Creates a route for a path segment, with no view and no children.
	pub fn new(path: impl Into<String>) -> Self {
		Self {
			path: path.into(),
			name: None,
			view: None,
			guard: None,
			children: Vec::new(),
		}
	}

	/// Assigns the route's name. Names must be unique across the table;
	/// the duplicate check runs when the table is built.
	pub fn named(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());
		self
	}

	/// Attaches a deferred view loader. The loader is not run here; it
	/// runs on the first navigation that resolves this route.
	pub fn view<F>(mut self, loader: F) -> Self
	where
		F: Fn() -> Result<Arc<dyn View>, ViewLoadError> + Send + Sync + 'static,
	{
		self.view = Some(LazyView::from_fn(loader));
		self
	}

	/// Attaches a guard. A route whose guard rejects is skipped during
	/// matching, as if it were not in the table.
	pub fn guarded<G>(mut self, guard: G) -> Self
	where
		G: Fn(&RouteMatch) -> bool + Send + Sync + 'static,
	{
		self.guard = Some(Arc::new(guard));
		self
	}

	/// Appends a child route.
	pub fn child(mut self, route: Route) -> Self {
		self.children.push(route);
		self
	}

	/// Appends several child routes in order.
	pub fn children(mut self, routes: impl IntoIterator<Item = Route>) -> Self {
		self.children.extend(routes);
		self
	}

	/// The declared path segment.
	pub fn path(&self) -> &str {
		&self.path
	}

	/// The route name, if any.
	pub fn name(&self) -> Option<&str> {
		self.name.as_deref()
	}

	/// Whether this route carries a view (is a navigation target).
	pub fn has_view(&self) -> bool {
		self.view.is_some()
	}

	pub(crate) fn into_parts(
		self,
	) -> (
		String,
		Option<String>,
		Option<LazyView>,
		Option<RouteGuard>,
		Vec<Route>,
	) {
		(self.path, self.name, self.view, self.guard, self.children)
	}
}

impl std::fmt::Debug for Route {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Route")
			.field("path", &self.path)
			.field("name", &self.name)
			.field("has_view", &self.view.is_some())
			.field("has_guard", &self.guard.is_some())
			.field("children", &self.children)
			.finish()
	}
}
