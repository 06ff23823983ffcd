//! Integration tests for heritage-router
//!
//! Tests are organized by feature area and cover:
//! - Table construction and validation
//! - Resolution (static, named, optional segments, first-match-wins)
//! - Base paths, query strings and normalization
//! - Named URL generation

use heritage_router::*;
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::collections::HashMap;

fn table() -> RouteTable {
    RouteTable::new([
        Route::eager("/", "home", "HomeView"),
        Route::eager("/trace/:id?", "trace", "TraceView").with_props(),
        Route::deferred("/products", "products", "products"),
        Route::deferred("/product/:id", "product-detail", "product-detail").with_props(),
    ])
    .unwrap()
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_duplicate_names_fail_fast() {
    let result = RouteTable::new([
        Route::eager("/", "home", "HomeView"),
        Route::eager("/start", "home", "StartView"),
    ]);

    assert_eq!(
        result.unwrap_err(),
        ConfigurationError::DuplicateName("home".to_string())
    );
}

#[rstest]
#[case("about")]
#[case("/about/")]
#[case("/a//b")]
#[case("/product/:")]
#[case("/product/:9id")]
#[case("/product/:id/:id")]
#[case("/faq?")]
fn test_invalid_patterns_fail_fast(#[case] pattern: &str) {
    let result = RouteTable::new([Route::eager(pattern, "broken", "BrokenView")]);
    assert!(matches!(
        result,
        Err(ConfigurationError::InvalidPattern { .. })
    ));
}

#[test]
fn test_empty_name_rejected() {
    let result = RouteTable::new([Route::eager("/", " ", "HomeView")]);
    assert!(matches!(result, Err(ConfigurationError::EmptyName(_))));
}

#[test]
fn test_configuration_error_converts_to_router_error() {
    let err: RouterError = RouteTable::new([
        Route::eager("/", "x", "A"),
        Route::eager("/b", "x", "B"),
    ])
    .unwrap_err()
    .into();

    assert!(matches!(err, RouterError::Configuration(_)));
}

#[test]
fn test_routes_keep_declaration_order() {
    let table = table();
    let names: Vec<&str> = table.routes().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["home", "trace", "products", "product-detail"]);
}

// ============================================================================
// Resolution
// ============================================================================

#[rstest]
#[case("/", "home")]
#[case("/trace", "trace")]
#[case("/trace/123", "trace")]
#[case("/products", "products")]
#[case("/product/42", "product-detail")]
fn test_resolves_declared_paths(#[case] path: &str, #[case] name: &str) {
    let table = table();
    assert_eq!(table.resolve(path).unwrap().route.name, name);
}

#[test]
fn test_optional_segment_present_and_absent() {
    let table = table();

    let with_id = table.resolve("/trace/123").unwrap();
    assert_eq!(with_id.params.get("id"), Some(&"123".to_string()));

    let without_id = table.resolve("/trace").unwrap();
    assert!(!without_id.params.contains_key("id"));
    assert_eq!(without_id.props, Some(HashMap::new()));
}

#[test]
fn test_props_only_when_forwarding() {
    let table = table();

    let detail = table.resolve("/product/42").unwrap();
    assert_eq!(detail.props.unwrap().get("id"), Some(&"42".to_string()));

    let home = table.resolve("/").unwrap();
    assert_eq!(home.props, None);
}

#[rstest]
#[case("/does-not-exist")]
#[case("/product")]
#[case("/product/1/2")]
#[case("/trace/1/2")]
#[case("/products/extra")]
fn test_unmatched_paths_are_not_found(#[case] path: &str) {
    let table = table();
    assert!(matches!(table.resolve(path), Err(RouterError::NotFound(_))));
}

#[test]
fn test_first_match_wins() {
    let table = RouteTable::new([
        Route::eager("/product/:id", "by-id", "ById"),
        Route::eager("/product/featured", "featured", "Featured"),
    ])
    .unwrap();

    assert_eq!(table.resolve("/product/featured").unwrap().route.name, "by-id");
}

#[test]
fn test_optional_backtracks_to_following_static() {
    let table = RouteTable::new([Route::eager("/trace/:id?/history", "history", "HistoryView")]).unwrap();

    let m = table.resolve("/trace/history").unwrap();
    assert!(m.params.is_empty());

    let m = table.resolve("/trace/MH-7/history").unwrap();
    assert_eq!(m.params["id"], "MH-7");
}

#[test]
fn test_params_are_percent_decoded() {
    let table = table();
    let m = table.resolve("/trace/%E8%8B%97%20001").unwrap();
    assert_eq!(m.params["id"], "苗 001");
}

#[test]
fn test_case_insensitive_by_default() {
    let table = table();
    assert_eq!(table.resolve("/PRODUCTS").unwrap().route.name, "products");
    assert_eq!(table.resolve("/Product/AbC").unwrap().params["id"], "AbC");
}

#[test]
fn test_case_sensitive_when_configured() {
    let table = RouteTable::builder()
        .with_case_sensitivity(false)
        .with_route(Route::deferred("/products", "products", "products"))
        .build()
        .unwrap();

    assert!(table.resolve("/PRODUCTS").is_err());
    assert!(table.resolve("/products").is_ok());
}

#[test]
fn test_normalizes_sloppy_paths() {
    let table = table();
    assert_eq!(table.resolve("/trace/").unwrap().route.name, "trace");
    assert_eq!(table.resolve("//product//42/").unwrap().params["id"], "42");
    assert_eq!(table.resolve("").unwrap().route.name, "home");
}

#[test]
fn test_query_and_hash_are_split_off() {
    let table = table();
    let m = table.resolve("/trace/9?from=qr&lang=zh#map").unwrap();
    assert_eq!(m.route.name, "trace");
    assert_eq!(m.params["id"], "9");
    assert_eq!(m.location.query["from"], "qr");
    assert_eq!(m.location.query["lang"], "zh");
    assert_eq!(m.location.hash.as_deref(), Some("map"));
}

// ============================================================================
// Base Path
// ============================================================================

fn based_table() -> RouteTable {
    RouteTable::builder()
        .with_config(&RoutingConfig {
            base_path: "/heritage/".to_string(),
            case_insensitive: true,
        })
        .with_routes([
            Route::eager("/", "home", "HomeView"),
            Route::eager("/trace/:id?", "trace", "TraceView").with_props(),
        ])
        .build()
        .unwrap()
}

#[test]
fn test_base_is_stripped_before_matching() {
    let table = based_table();
    assert_eq!(table.base(), "/heritage");
    assert_eq!(table.resolve("/heritage").unwrap().route.name, "home");
    assert_eq!(table.resolve("/heritage/").unwrap().route.name, "home");
    assert_eq!(table.resolve("/heritage/trace/5").unwrap().params["id"], "5");
}

#[test]
fn test_paths_outside_base_are_matched_as_is() {
    let table = based_table();
    assert_eq!(table.resolve("/trace/5").unwrap().route.name, "trace");
    assert!(table.resolve("/heritagex").is_err());
}

#[test]
fn test_base_respects_case_sensitivity() {
    let table = RouteTable::builder()
        .with_config(&RoutingConfig {
            base_path: "/heritage".to_string(),
            case_insensitive: false,
        })
        .with_route(Route::eager("/trace/:id?", "trace", "TraceView"))
        .build()
        .unwrap();

    assert_eq!(table.resolve("/heritage/trace/5").unwrap().params["id"], "5");
    assert_eq!(
        table.resolve("/Heritage/trace/5").unwrap_err(),
        RouterError::NotFound("/Heritage/trace/5".to_string())
    );
}

// ============================================================================
// Named URLs
// ============================================================================

#[test]
fn test_url_for_named_routes() {
    let table = table();

    assert_eq!(table.url_for_params("home", &[]).unwrap(), "/");
    assert_eq!(table.url_for_params("trace", &[]).unwrap(), "/trace");
    assert_eq!(table.url_for_params("trace", &[("id", "7")]).unwrap(), "/trace/7");
    assert_eq!(
        table.url_for_params("product-detail", &[("id", "a/b")]).unwrap(),
        "/product/a%2Fb"
    );
    assert_eq!(table.url_for_params("product-detail", &[]), None);
    assert_eq!(table.url_for_params("product-detail", &[("id", "")]), None);
    assert_eq!(table.url_for_params("trace", &[("id", "")]).unwrap(), "/trace");
    assert_eq!(table.url_for_params("missing", &[]), None);
}

#[test]
fn test_href_includes_base() {
    let table = based_table();
    let mut params = HashMap::new();
    params.insert("id".to_string(), "12".to_string());

    assert_eq!(table.href("trace", &params).unwrap(), "/heritage/trace/12");
}

#[test]
fn test_generated_url_resolves_back() {
    let table = table();
    let url = table.url_for_params("trace", &[("id", "MH 2024/01")]).unwrap();
    let m = table.resolve(&url).unwrap();
    assert_eq!(m.params["id"], "MH 2024/01");
}
