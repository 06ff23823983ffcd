//! The heritage site's route table

use heritage_router::{ConfigurationError, Route, RouteTable, RoutingConfig};

/// Views bound at startup
pub const HOME_VIEW: &str = "HomeView";
pub const TRACE_VIEW: &str = "TraceView";

/// All routes of the site, in matching order
///
/// `home` and `trace` are bound eagerly; the rest are fetched from their chunk
/// on first navigation.
pub fn heritage_routes() -> Vec<Route> {
    vec![
        Route::eager("/", "home", HOME_VIEW).with_meta("title", "Home"),
        Route::eager("/trace/:id?", "trace", TRACE_VIEW)
            .with_props()
            .with_meta("title", "Trace an item"),
        Route::deferred("/products", "products", "products").with_meta("title", "Products"),
        Route::deferred("/product/:id", "product-detail", "product-detail")
            .with_props()
            .with_meta("title", "Product detail"),
        Route::deferred("/ai-identification", "ai-identification", "ai-identification")
            .with_meta("title", "AI identification"),
        Route::deferred("/about", "about", "about").with_meta("title", "About"),
    ]
}

/// Builds the heritage route table rooted at the configured base
pub fn build_table(config: &RoutingConfig) -> Result<RouteTable, ConfigurationError> {
    RouteTable::builder()
        .with_config(config)
        .with_routes(heritage_routes())
        .build()
}
