//! The router handle.
//!
//! [`RouterBuilder`] turns a config plus a route tree into a [`Router`]:
//! an owned value the application shell injects wherever navigation is
//! needed (wrap it in `Arc` to hand views programmatic navigation).
//! Nothing is registered process-wide.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::config::RouterConfig;
use crate::error::{RouterError, RouterResult, ViewLoadError};
use crate::history::{HistoryState, NavigationKind, SessionHistory};
use crate::route::Route;
use crate::table::{RouteMatch, RouteTable};
use crate::view::{LazyView, View, ViewContext};

/// The router's current location.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
	path: String,
	route_name: Option<String>,
	params: HashMap<String, String>,
}

impl Location {
	/// The current app-relative path.
	pub fn path(&self) -> &str {
		&self.path
	}

	/// Name of the currently matched route, if any.
	pub fn route_name(&self) -> Option<&str> {
		self.route_name.as_deref()
	}

	/// Parameters captured by the current match.
	pub fn params(&self) -> &HashMap<String, String> {
		&self.params
	}
}

/// A resolved view together with the context it should render under.
pub struct ResolvedView {
	view: Arc<dyn View>,
	context: ViewContext,
}

impl ResolvedView {
	/// The loaded view.
	pub fn view(&self) -> &Arc<dyn View> {
		&self.view
	}

	/// The navigation context of the resolution.
	pub fn context(&self) -> &ViewContext {
		&self.context
	}

	/// Renders the view under its context.
	pub fn render(&self) -> String {
		self.view.render(&self.context)
	}
}

impl std::fmt::Debug for ResolvedView {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ResolvedView")
			.field("context", &self.context)
			.finish()
	}
}

/// Builder for [`Router`].
pub struct RouterBuilder {
	config: RouterConfig,
	roots: Vec<Route>,
	fallback: Option<LazyView>,
}

impl RouterBuilder {
	/// Creates a builder with the default config and an empty table.
	pub fn new() -> Self {
		Self {
			config: RouterConfig::new(),
			roots: Vec::new(),
			fallback: None,
		}
	}

	/// Sets the whole config at once.
	pub fn config(mut self, config: RouterConfig) -> Self {
		self.config = config;
		self
	}

	/// Overrides the base path on the current config.
	pub fn base(mut self, base: &str) -> Self {
		self.config = self.config.with_base(base);
		self
	}

	/// Overrides the history mode on the current config.
	pub fn history_mode(mut self, mode: crate::history::HistoryMode) -> Self {
		self.config = self.config.with_mode(mode);
		self
	}

	/// Appends a root route.
	pub fn route(mut self, route: Route) -> Self {
		self.roots.push(route);
		self
	}

	/// Appends several root routes in order.
	pub fn routes(mut self, routes: impl IntoIterator<Item = Route>) -> Self {
		self.roots.extend(routes);
		self
	}

	/// Sets the application-supplied view for unmatched paths. Without
	/// it, resolving an unmatched path yields [`RouterError::NoMatch`].
	pub fn fallback<F>(mut self, loader: F) -> Self
	where
		F: Fn() -> Result<Arc<dyn View>, ViewLoadError> + Send + Sync + 'static,
	{
		self.fallback = Some(LazyView::from_fn(loader));
		self
	}

	/// Validates the table and produces the router handle.
	///
	/// # Errors
	///
	/// Construction errors from [`RouteTable::new`]: duplicate names,
	/// duplicate sibling paths, absolute child paths, invalid patterns.
	pub fn build(self) -> RouterResult<Router> {
		let table = RouteTable::new(self.roots)?;
		let history = SessionHistory::new(self.config.mode(), self.config.base().to_string());

		let initial_path = history.current_path().unwrap_or_else(|| "/".to_string());
		let current = location_for(&table, &initial_path);

		Ok(Router {
			config: self.config,
			table,
			fallback: self.fallback,
			history,
			current: RwLock::new(current),
		})
	}
}

impl Default for RouterBuilder {
	fn default() -> Self {
		Self::new()
	}
}

/// A constructed router: immutable table, session history, current
/// location, and the memoized lazy views.
#[derive(Debug)]
pub struct Router {
	config: RouterConfig,
	table: RouteTable,
	fallback: Option<LazyView>,
	history: SessionHistory,
	current: RwLock<Location>,
}

impl Router {
	/// Starts building a router.
	pub fn builder() -> RouterBuilder {
		RouterBuilder::new()
	}

	/// The config the router was built with.
	pub fn config(&self) -> &RouterConfig {
		&self.config
	}

	/// Matches a path without navigating.
	pub fn match_path(&self, path: &str) -> Option<RouteMatch> {
		self.table.match_path(path)
	}

	/// Navigates to a path, adding a history entry.
	pub fn push(&self, path: &str) -> RouterResult<()> {
		self.navigate(path, NavigationKind::Push)
	}

	/// Navigates to a path, rewriting the current history entry.
	pub fn replace(&self, path: &str) -> RouterResult<()> {
		self.navigate(path, NavigationKind::Replace)
	}

	fn navigate(&self, path: &str, kind: NavigationKind) -> RouterResult<()> {
		let route_match = self.table.match_path(path);

		let state = HistoryState::new(path)
			.with_route_name(route_match.as_ref().and_then(|m| m.name.clone()))
			.with_params(
				route_match
					.as_ref()
					.map(|m| m.params.clone())
					.unwrap_or_default(),
			);

		self.history
			.navigate(&state, kind)
			.map_err(RouterError::Navigation)?;

		*self.current.write() = Location {
			path: state.path,
			route_name: state.route_name,
			params: state.params,
		};

		tracing::debug!(
			path,
			matched = route_match.is_some(),
			kind = ?kind,
			"navigated"
		);
		Ok(())
	}

	/// The current location.
	pub fn current(&self) -> Location {
		self.current.read().clone()
	}

	/// Matches a path and resolves its view through the lazy cache.
	///
	/// The matched route's loader runs at most once per session; an
	/// unmatched path resolves to the fallback view if one was
	/// configured, otherwise [`RouterError::NoMatch`].
	pub fn resolve(&self, path: &str) -> RouterResult<ResolvedView> {
		match self.table.match_path(path) {
			Some(route_match) => {
				let entry = self.table.entry(route_match.index);
				// match_path only returns view-bearing entries.
				let lazy = entry
					.view
					.as_ref()
					.expect("matched entry carries a view");
				let view = lazy.resolve().map_err(|source| {
					tracing::warn!(path, error = %source, "view load failed");
					RouterError::ViewLoad {
						path: path.to_string(),
						source,
					}
				})?;
				Ok(ResolvedView {
					view,
					context: ViewContext::new(path, route_match.params),
				})
			}
			None => match &self.fallback {
				Some(fallback) => {
					let view = fallback.resolve().map_err(|source| {
						tracing::warn!(path, error = %source, "fallback view load failed");
						RouterError::ViewLoad {
							path: path.to_string(),
							source,
						}
					})?;
					Ok(ResolvedView {
						view,
						context: ViewContext::new(path, HashMap::new()),
					})
				}
				None => Err(RouterError::NoMatch(path.to_string())),
			},
		}
	}

	/// Resolves the view for the current location.
	pub fn resolve_current(&self) -> RouterResult<ResolvedView> {
		let path = self.current.read().path.clone();
		self.resolve(&path)
	}

	/// Generates the path for a named route.
	pub fn reverse(&self, name: &str, params: &[(&str, &str)]) -> RouterResult<String> {
		self.table.reverse(name, params)
	}

	/// Number of navigation targets in the table.
	pub fn route_count(&self) -> usize {
		self.table.len()
	}

	/// Whether a route name exists in the table.
	pub fn has_route(&self, name: &str) -> bool {
		self.table.has_route(name)
	}

	/// Keeps the current location in sync with browser back/forward.
	///
	/// The listener lives for the page session. Only has an effect on
	/// wasm32; elsewhere it is a no-op so shell code stays portable.
	#[cfg(target_arch = "wasm32")]
	pub fn attach_popstate_listener(self: &Arc<Self>) -> RouterResult<()> {
		let router = Arc::clone(self);
		crate::history::attach_popstate(move |state| {
			let restored = match state {
				Some(state) => Location {
					path: state.path,
					route_name: state.route_name,
					params: state.params,
				},
				None => {
					let path = router
						.history
						.current_path()
						.unwrap_or_else(|| "/".to_string());
					location_for(&router.table, &path)
				}
			};
			*router.current.write() = restored;
		})
		.map_err(RouterError::Navigation)
	}

	/// Non-wasm32 no-op counterpart of the popstate listener.
	#[cfg(not(target_arch = "wasm32"))]
	pub fn attach_popstate_listener(self: &Arc<Self>) -> RouterResult<()> {
		Ok(())
	}
}

fn location_for(table: &RouteTable, path: &str) -> Location {
	match table.match_path(path) {
		Some(m) => Location {
			path: path.to_string(),
			route_name: m.name,
			params: m.params,
		},
		None => Location {
			path: path.to_string(),
			route_name: None,
			params: HashMap::new(),
		},
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::view::view_fn;

	fn dataframe_router() -> Router {
		Router::builder()
			.route(
				Route::new("/").child(
					Route::new("dataframe")
						.named("DataFrame")
						.view(|| Ok(view_fn(|_| "<DataFrame/>".to_string()))),
				),
			)
			.build()
			.unwrap()
	}

	#[test]
	fn test_builder_produces_handle() {
		let router = dataframe_router();
		assert_eq!(router.route_count(), 1);
		assert!(router.has_route("DataFrame"));
	}

	#[test]
	fn test_initial_location_is_root() {
		let router = dataframe_router();
		assert_eq!(router.current().path(), "/");
		assert!(router.current().route_name().is_none());
	}

	#[test]
	fn test_push_updates_current() {
		let router = dataframe_router();
		router.push("/dataframe").unwrap();

		let current = router.current();
		assert_eq!(current.path(), "/dataframe");
		assert_eq!(current.route_name(), Some("DataFrame"));
	}

	#[test]
	fn test_push_unmatched_still_moves() {
		let router = dataframe_router();
		router.push("/unknown").unwrap();

		assert_eq!(router.current().path(), "/unknown");
		assert!(router.current().route_name().is_none());
	}

	#[test]
	fn test_resolve_unmatched_without_fallback() {
		let router = dataframe_router();
		assert_eq!(
			router.resolve("/unknown").unwrap_err(),
			RouterError::NoMatch("/unknown".to_string())
		);
	}

	#[test]
	fn test_resolve_renders_view() {
		let router = dataframe_router();
		router.push("/dataframe").unwrap();

		let resolved = router.resolve_current().unwrap();
		assert_eq!(resolved.render(), "<DataFrame/>");
		assert_eq!(resolved.context().path(), "/dataframe");
	}

	#[test]
	fn test_attach_popstate_listener_is_noop_off_wasm() {
		let router = Arc::new(dataframe_router());
		assert!(router.attach_popstate_listener().is_ok());
	}
}
