// Route matching through the public router API, including the original
// single-leaf table: an unnamed root with one "dataframe" child.

use wayfinder::{Route, Router, RouterConfig, view_fn};

fn leaf(path: &str, marker: &str) -> Route {
	let marker = marker.to_string();
	Route::new(path).view(move || {
		let marker = marker.clone();
		Ok(view_fn(move |_| marker.clone()))
	})
}

fn dataframe_router() -> Router {
	Router::builder()
		.config(RouterConfig::new().with_base("/"))
		.route(Route::new("/").child(leaf("dataframe", "<DataFrame/>").named("DataFrame")))
		.build()
		.expect("valid table")
}

#[test]
fn test_dataframe_path_resolves_to_dataframe_view() {
	let router = dataframe_router();

	let m = router.match_path("/dataframe").expect("route matches");
	assert_eq!(m.name.as_deref(), Some("DataFrame"));
	assert_eq!(m.pattern, "/dataframe");
	assert!(m.params.is_empty());

	let resolved = router.resolve("/dataframe").unwrap();
	assert_eq!(resolved.render(), "<DataFrame/>");
}

#[test]
fn test_undefined_path_matches_nothing() {
	let router = dataframe_router();

	assert!(router.match_path("/unknown").is_none());
	assert!(router.match_path("/dataframe/extra").is_none());
	assert!(router.match_path("/DATAFRAME").is_none());
}

#[test]
fn test_unnamed_root_is_not_a_target() {
	let router = dataframe_router();
	assert!(router.match_path("/").is_none());
	assert_eq!(router.route_count(), 1);
}

#[test]
fn test_parameterized_routes_capture_values() {
	let router = Router::builder()
		.route(
			Route::new("/").child(
				Route::new("frames")
					.child(leaf("{id}", "frame").named("frame-detail"))
					.child(leaf("{id}/cells/{cell}", "cell").named("cell-detail")),
			),
		)
		.build()
		.unwrap();

	let m = router.match_path("/frames/42").unwrap();
	assert_eq!(m.params.get("id"), Some(&"42".to_string()));

	let m = router.match_path("/frames/42/cells/7").unwrap();
	assert_eq!(m.name.as_deref(), Some("cell-detail"));
	assert_eq!(m.params.get("id"), Some(&"42".to_string()));
	assert_eq!(m.params.get("cell"), Some(&"7".to_string()));
}

#[test]
fn test_first_declared_route_wins() {
	let router = Router::builder()
		.route(
			Route::new("/")
				.child(leaf("frames/{id}", "by-id").named("by-id"))
				.child(leaf("frames/latest", "latest").named("latest")),
		)
		.build()
		.unwrap();

	let m = router.match_path("/frames/latest").unwrap();
	assert_eq!(m.name.as_deref(), Some("by-id"));
}

#[test]
fn test_guarded_route_is_invisible_when_rejected() {
	let router = Router::builder()
		.route(
			Route::new("/")
				.child(leaf("admin", "admin").guarded(|_| false))
				.child(leaf("public", "public")),
		)
		.build()
		.unwrap();

	assert!(router.match_path("/admin").is_none());
	assert!(router.match_path("/public").is_some());
}

#[test]
fn test_guard_sees_captured_params() {
	let router = Router::builder()
		.route(Route::new("/").child(
			leaf("frames/{id}", "frame").guarded(|m| m.params.get("id") != Some(&"0".to_string())),
		))
		.build()
		.unwrap();

	assert!(router.match_path("/frames/0").is_none());
	assert!(router.match_path("/frames/1").is_some());
}

#[test]
fn test_sibling_roots_match_independently() {
	let router = Router::builder()
		.route(Route::new("/").child(leaf("dataframe", "df")))
		.route(leaf("/about", "about").named("About"))
		.build()
		.unwrap();

	assert!(router.match_path("/dataframe").is_some());
	assert_eq!(
		router.match_path("/about").unwrap().name.as_deref(),
		Some("About")
	);
	assert!(router.match_path("/contact").is_none());
}
