//! Navigation-state representation.
//!
//! [`HistoryMode`] selects how client-side navigation shows up in the
//! address bar: the real URL path, or a fragment after `#`. On wasm32 the
//! session history is the browser's History API; elsewhere a small
//! in-process entry list stands in, which is what the tests drive.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[cfg(not(target_arch = "wasm32"))]
use parking_lot::Mutex;

/// How navigation state is reflected in the browser's address bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryMode {
	/// Navigation uses the real URL path (pushState/replaceState).
	#[default]
	BrowserPath,
	/// Navigation is encoded in the URL fragment after `#`.
	Fragment,
}

/// State payload written into each history entry.
///
/// Restoring it on back/forward gives the router the matched route and
/// parameters without re-running the match.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HistoryState {
	/// App-relative path of the entry.
	pub path: String,
	/// Name of the matched route, if it had one.
	pub route_name: Option<String>,
	/// Parameters captured by the matched route.
	pub params: HashMap<String, String>,
}

impl HistoryState {
	/// Creates a state for a path with no match information.
	pub fn new(path: impl Into<String>) -> Self {
		Self {
			path: path.into(),
			route_name: None,
			params: HashMap::new(),
		}
	}

	/// Attaches the matched route name.
	pub fn with_route_name(mut self, name: Option<String>) -> Self {
		self.route_name = name;
		self
	}

	/// Attaches the captured parameters.
	pub fn with_params(mut self, params: HashMap<String, String>) -> Self {
		self.params = params;
		self
	}
}

/// Whether a navigation adds an entry or rewrites the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NavigationKind {
	Push,
	Replace,
}

/// Per-router session history.
///
/// Owned by the router so two handles built from the same definitions do
/// not share navigation state off-browser.
#[derive(Debug)]
pub(crate) struct SessionHistory {
	mode: HistoryMode,
	base: String,
	#[cfg(not(target_arch = "wasm32"))]
	entries: Mutex<Vec<(String, HistoryState)>>,
}

impl SessionHistory {
	pub(crate) fn new(mode: HistoryMode, base: impl Into<String>) -> Self {
		Self {
			mode,
			base: base.into(),
			#[cfg(not(target_arch = "wasm32"))]
			entries: Mutex::new(Vec::new()),
		}
	}

	/// The address-bar form of an app-relative path under this mode/base.
	pub(crate) fn href_for(&self, path: &str) -> String {
		match self.mode {
			HistoryMode::BrowserPath => {
				if self.base == "/" {
					path.to_string()
				} else {
					format!("{}{}", self.base, path)
				}
			}
			HistoryMode::Fragment => {
				if self.base == "/" {
					format!("/#{}", path)
				} else {
					format!("{}#{}", self.base, path)
				}
			}
		}
	}

	/// Recovers the app-relative path from an address-bar path.
	#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
	pub(crate) fn strip_base(&self, full: &str) -> String {
		if self.base == "/" {
			return full.to_string();
		}
		match full.strip_prefix(&self.base) {
			Some("") => "/".to_string(),
			Some(rest) => rest.to_string(),
			None => full.to_string(),
		}
	}
}

#[cfg(not(target_arch = "wasm32"))]
impl SessionHistory {
	/// Writes a history entry.
	pub(crate) fn navigate(
		&self,
		state: &HistoryState,
		kind: NavigationKind,
	) -> Result<(), String> {
		let href = self.href_for(&state.path);
		let mut entries = self.entries.lock();
		match kind {
			NavigationKind::Push => entries.push((href, state.clone())),
			NavigationKind::Replace => {
				entries.pop();
				entries.push((href, state.clone()));
			}
		}
		Ok(())
	}

	/// App-relative path of the current entry, if any navigation happened.
	pub(crate) fn current_path(&self) -> Option<String> {
		self.entries
			.lock()
			.last()
			.map(|(_, state)| state.path.clone())
	}

	#[cfg(test)]
	pub(crate) fn len(&self) -> usize {
		self.entries.lock().len()
	}

	#[cfg(test)]
	pub(crate) fn last_href(&self) -> Option<String> {
		self.entries.lock().last().map(|(href, _)| href.clone())
	}
}

#[cfg(target_arch = "wasm32")]
impl SessionHistory {
	/// Writes a history entry through the browser History API.
	pub(crate) fn navigate(
		&self,
		state: &HistoryState,
		kind: NavigationKind,
	) -> Result<(), String> {
		let window = web_sys::window().ok_or("window object not available")?;
		let history = window
			.history()
			.map_err(|_| "history object not available")?;

		let payload = serde_wasm_bindgen::to_value(state)
			.map_err(|e| format!("history state serialization failed: {}", e))?;
		let href = self.href_for(&state.path);

		let result = match kind {
			NavigationKind::Push => history.push_state_with_url(&payload, "", Some(&href)),
			NavigationKind::Replace => history.replace_state_with_url(&payload, "", Some(&href)),
		};
		result.map_err(|_| "history write rejected".to_string())
	}

	/// App-relative path read back from the address bar.
	pub(crate) fn current_path(&self) -> Option<String> {
		let location = web_sys::window()?.location();
		match self.mode {
			HistoryMode::BrowserPath => {
				let pathname = location.pathname().ok()?;
				Some(self.strip_base(&pathname))
			}
			HistoryMode::Fragment => {
				let hash = location.hash().ok()?;
				let path = hash.trim_start_matches('#');
				if path.is_empty() {
					Some("/".to_string())
				} else {
					Some(path.to_string())
				}
			}
		}
	}
}

/// Registers a popstate listener so browser back/forward reaches the router.
///
/// The closure is leaked with `.forget()`; it lives for the page session,
/// which is the lifetime of the router itself.
#[cfg(target_arch = "wasm32")]
pub(crate) fn attach_popstate<F>(on_popstate: F) -> Result<(), String>
where
	F: Fn(Option<HistoryState>) + 'static,
{
	use wasm_bindgen::JsCast;
	use wasm_bindgen::closure::Closure;

	let window = web_sys::window().ok_or("window object not available")?;
	let closure = Closure::wrap(Box::new(move |event: web_sys::PopStateEvent| {
		let state = serde_wasm_bindgen::from_value::<HistoryState>(event.state()).ok();
		on_popstate(state);
	}) as Box<dyn FnMut(web_sys::PopStateEvent)>);

	window
		.add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref())
		.map_err(|_| "popstate listener registration rejected".to_string())?;
	closure.forget();
	Ok(())
}
