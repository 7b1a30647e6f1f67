//! The ordered, validated route table.
//!
//! [`RouteTable::new`] consumes a route tree, validates the invariants
//! that must hold before the application starts (unique names, unique
//! sibling paths, relative children, compilable patterns), and flattens
//! the tree into compiled entries in declaration order. Matching walks
//! the entries in that order; the first view-bearing entry whose pattern
//! matches and whose guard accepts wins.

use std::collections::{HashMap, HashSet};

use crate::error::{RouterError, RouterResult};
use crate::pattern::PathPattern;
use crate::route::{Route, RouteGuard};
use crate::view::LazyView;

/// A matched route with its captured parameters.
#[derive(Debug, Clone)]
pub struct RouteMatch {
	/// The concrete path that matched.
	pub path: String,
	/// The full pattern of the matched route.
	pub pattern: String,
	/// Name of the matched route, if it has one.
	pub name: Option<String>,
	/// Parameters captured from the path.
	pub params: HashMap<String, String>,
	/// Index of the matched entry, used for view resolution.
	pub(crate) index: usize,
}

/// One flattened route: full pattern plus what the tree node carried.
pub(crate) struct CompiledRoute {
	pub(crate) full_path: String,
	pub(crate) pattern: PathPattern,
	pub(crate) name: Option<String>,
	pub(crate) view: Option<LazyView>,
	pub(crate) guard: Option<RouteGuard>,
}

impl std::fmt::Debug for CompiledRoute {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("CompiledRoute")
			.field("full_path", &self.full_path)
			.field("name", &self.name)
			.field("has_view", &self.view.is_some())
			.finish()
	}
}

/// An immutable, validated route table.
#[derive(Debug)]
pub struct RouteTable {
	entries: Vec<CompiledRoute>,
	named: HashMap<String, usize>,
}

impl RouteTable {
	/// Builds a table from root routes.
	///
	/// # Errors
	///
	/// - [`RouterError::DuplicateRouteName`] if a name appears twice
	/// - [`RouterError::DuplicatePath`] if two siblings share a path
	/// - [`RouterError::AbsoluteChildPath`] if a child path starts with `/`
	/// - [`RouterError::InvalidPattern`] if a full path fails to compile
	pub fn new(roots: Vec<Route>) -> RouterResult<Self> {
		let mut table = Self {
			entries: Vec::new(),
			named: HashMap::new(),
		};

		let mut seen_roots = HashSet::new();
		for root in roots {
			let segment = normalize_root(root.path());
			if !seen_roots.insert(segment.clone()) {
				return Err(RouterError::DuplicatePath {
					parent: String::new(),
					path: segment,
				});
			}
			table.flatten(root, None)?;
		}

		tracing::debug!(
			routes = table.entries.iter().filter(|e| e.view.is_some()).count(),
			named = table.named.len(),
			"route table compiled"
		);
		Ok(table)
	}

	fn flatten(&mut self, route: Route, parent: Option<&str>) -> RouterResult<()> {
		let (path, name, view, guard, children) = route.into_parts();

		let full_path = match parent {
			None => normalize_root(&path),
			Some(parent_path) => {
				let segment = normalize_child(&path)?;
				join(parent_path, &segment)
			}
		};

		let pattern =
			PathPattern::new(&full_path).map_err(|reason| RouterError::InvalidPattern {
				pattern: full_path.clone(),
				reason,
			})?;

		if let Some(ref name) = name {
			if self.named.contains_key(name) {
				return Err(RouterError::DuplicateRouteName(name.clone()));
			}
			self.named.insert(name.clone(), self.entries.len());
		}

		self.entries.push(CompiledRoute {
			full_path: full_path.clone(),
			pattern,
			name,
			view,
			guard,
		});

		let mut seen = HashSet::new();
		for child in &children {
			let segment = normalize_child(child.path())?;
			if !seen.insert(segment.clone()) {
				return Err(RouterError::DuplicatePath {
					parent: full_path.clone(),
					path: segment,
				});
			}
		}
		for child in children {
			self.flatten(child, Some(&full_path))?;
		}

		Ok(())
	}

	/// Matches a path against the table in declaration order.
	///
	/// Grouping entries (no view) never match; entries whose guard
	/// rejects are skipped.
	pub fn match_path(&self, path: &str) -> Option<RouteMatch> {
		for (index, entry) in self.entries.iter().enumerate() {
			if entry.view.is_none() {
				continue;
			}
			let Some(params) = entry.pattern.matches(path) else {
				continue;
			};

			let route_match = RouteMatch {
				path: path.to_string(),
				pattern: entry.full_path.clone(),
				name: entry.name.clone(),
				params,
				index,
			};

			let allowed = entry
				.guard
				.as_ref()
				.map(|guard| guard(&route_match))
				.unwrap_or(true);
			if allowed {
				return Some(route_match);
			}
		}
		None
	}

	/// Generates the path for a named route.
	pub fn reverse(&self, name: &str, params: &[(&str, &str)]) -> RouterResult<String> {
		let index = self
			.named
			.get(name)
			.ok_or_else(|| RouterError::UnknownRouteName(name.to_string()))?;

		let params: HashMap<String, String> = params
			.iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect();

		self.entries[*index]
			.pattern
			.reverse(&params)
			.map_err(|param| RouterError::MissingParameter {
				name: name.to_string(),
				param,
			})
	}

	/// Number of navigation targets (entries with a view).
	pub fn len(&self) -> usize {
		self.entries.iter().filter(|e| e.view.is_some()).count()
	}

	/// Whether the table has no navigation targets.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Whether a route name exists in the table.
	pub fn has_route(&self, name: &str) -> bool {
		self.named.contains_key(name)
	}

	pub(crate) fn entry(&self, index: usize) -> &CompiledRoute {
		&self.entries[index]
	}
}

fn normalize_root(raw: &str) -> String {
	let trimmed = raw.trim();
	if trimmed.is_empty() || trimmed == "/" {
		return "/".to_string();
	}

	let mut path = String::with_capacity(trimmed.len() + 1);
	if !trimmed.starts_with('/') {
		path.push('/');
	}
	path.push_str(trimmed);
	while path.len() > 1 && path.ends_with('/') {
		path.pop();
	}
	path
}

fn normalize_child(raw: &str) -> RouterResult<String> {
	let trimmed = raw.trim();
	if trimmed.starts_with('/') {
		return Err(RouterError::AbsoluteChildPath(trimmed.to_string()));
	}

	let mut segment = trimmed.to_string();
	while segment.ends_with('/') {
		segment.pop();
	}
	Ok(segment)
}

fn join(parent: &str, segment: &str) -> String {
	if segment.is_empty() {
		return parent.to_string();
	}
	if parent == "/" {
		format!("/{}", segment)
	} else {
		format!("{}/{}", parent, segment)
	}
}
