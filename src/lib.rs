//! # Wayfinder
//!
//! Client-side route table and navigation for single-page applications:
//!
//! - **Declarative route tree**: nested parent/child routes with
//!   construction-time validation (unique names, unique sibling paths)
//! - **Lazy views**: a route's view loads on first navigation and is
//!   cached for the session; failed loads retry on the next navigation
//! - **History modes**: real URL path or fragment-based, with the base
//!   prefix sourced from the build environment
//! - **Programmatic navigation**: `push`/`replace`, named-route reverse
//!   resolution, and an optional fallback view for unmatched paths
//!
//! The router is an explicit value: build it once at startup and inject
//! it into the application shell. Nothing is registered process-wide.
//!
//! # Example
//!
//! ```
//! use wayfinder::{Route, Router, RouterConfig, view_fn};
//!
//! let router = Router::builder()
//! 	.config(RouterConfig::from_build_env())
//! 	.route(
//! 		Route::new("/").child(
//! 			Route::new("dataframe")
//! 				.named("DataFrame")
//! 				.view(|| Ok(view_fn(|_| "<DataFrame/>".to_string()))),
//! 		),
//! 	)
//! 	.build()
//! 	.unwrap();
//!
//! router.push("/dataframe").unwrap();
//! let resolved = router.resolve_current().unwrap();
//! assert_eq!(resolved.render(), "<DataFrame/>");
//!
//! assert!(router.match_path("/unknown").is_none());
//! assert_eq!(router.reverse("DataFrame", &[]).unwrap(), "/dataframe");
//! ```

mod config;
mod error;
mod history;
mod pattern;
mod route;
mod router;
mod table;
mod view;

pub use config::RouterConfig;
pub use error::{RouterError, RouterResult, ViewLoadError};
pub use history::{HistoryMode, HistoryState};
pub use pattern::PathPattern;
pub use route::{Route, RouteGuard};
pub use router::{Location, ResolvedView, Router, RouterBuilder};
pub use table::{RouteMatch, RouteTable};
pub use view::{LazyView, View, ViewContext, ViewLoader, view_fn};
