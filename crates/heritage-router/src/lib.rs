//! # Heritage Router
//!
//! An ordered route table for history-mode single page applications with support for:
//! - Static routes (`/about`)
//! - Named parameters (`/product/:id`)
//! - Optional parameters (`/trace/:id?`)
//! - Eager and deferred (lazily fetched, cached) views
//! - Named routes for URL generation
//! - A deployment base path all patterns are rooted at
//!
//! ## Matching
//!
//! Routes are tested in declaration order and the first match wins. The table is
//! validated once at construction and is immutable afterwards, so it can be shared
//! behind an `Arc` and handed to a [`Navigator`].
//!
//! ## Path Normalization
//!
//! Incoming locations are split into path, query and hash, the base path is stripped,
//! and common mistakes are normalized:
//! - Trailing slashes: `/path/` → `/path`
//! - Double slashes: `/path//to` → `/path/to`
//! - Backslashes: `\path\to` → `/path/to`
//!
//! ## Example
//!
//! ```
//! use heritage_router::{Route, RouteTable};
//!
//! let table = RouteTable::builder()
//!     .with_route(Route::eager("/", "home", "HomeView"))
//!     .with_route(Route::eager("/trace/:id?", "trace", "TraceView").with_props())
//!     .with_route(Route::deferred("/product/:id", "product-detail", "product-detail").with_props())
//!     .build()
//!     .unwrap();
//!
//! let route_match = table.resolve("/product/42").unwrap();
//! assert_eq!(route_match.route.name, "product-detail");
//! assert_eq!(route_match.params.get("id"), Some(&"42".to_string()));
//! ```

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// Module Declarations
// ============================================================================

pub mod config;
pub mod error;
pub mod loader;
pub mod navigation;
pub mod path;
pub mod route;

pub use config::RoutingConfig;
pub use error::{ConfigurationError, Result, RouterError};
pub use loader::{LoadState, LoadedModule, LoaderStats, ModuleCache, ModuleLoader};
pub use navigation::{NavigationOutcome, Navigator, ResolvedView, ViewMount};
pub use path::{normalize_base, normalize_path, strip_base, strip_base_with_options, Location};
pub use route::pattern::{classify_segment, PatternSegmentType};

/// Parameter mapping captured from a path
pub type Params = HashMap<String, String>;

// ============================================================================
// Core Types
// ============================================================================

/// Identifier of a mountable view
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewId(String);

impl ViewId {
    pub fn new(id: impl Into<String>) -> Self {
        ViewId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ViewId {
    fn from(id: &str) -> Self {
        ViewId::new(id)
    }
}

impl From<String> for ViewId {
    fn from(id: String) -> Self {
        ViewId(id)
    }
}

/// How a route's view is obtained
#[derive(Debug, Clone, PartialEq)]
pub enum Component {
    /// View bound at startup
    Eager(ViewId),
    /// View fetched from the named chunk on first navigation
    Deferred { chunk: String },
}

/// A single route: pattern, unique name, component and parameter forwarding
#[derive(Debug, Clone)]
pub struct Route {
    /// Declared pattern like "/trace/:id?"
    pub pattern: String,
    /// Unique route name
    pub name: String,
    /// Eager view or deferred chunk
    pub component: Component,
    /// Whether captured params are exposed as view inputs
    pub props_from_params: bool,
    /// List of parameter names
    pub params: Vec<String>,
    /// List of optional parameter names
    pub optional_params: Vec<String>,
    /// Arbitrary metadata for the route (titles, permissions, etc.)
    pub metadata: HashMap<String, String>,
    segments: Vec<PatternSegmentType>,
}

/// Result of resolving a location against the route table
#[derive(Debug, Clone)]
pub struct RouteMatch<'a> {
    /// The matched route
    pub route: &'a Route,
    /// Extracted parameters from the path
    pub params: Params,
    /// View inputs, present only when the route forwards params
    pub props: Option<Params>,
    /// The parsed location that was resolved
    pub location: Location,
}

// ============================================================================
// Route Implementation
// ============================================================================

impl Route {
    /// Creates a route from a declared pattern
    ///
    /// The pattern is parsed here and validated when the route is added to a
    /// [`RouteTable`].
    ///
    /// # Examples
    ///
    /// ```
    /// use heritage_router::{Component, Route};
    ///
    /// let route = Route::new("/trace/:id?", "trace", Component::Eager("TraceView".into()));
    /// assert_eq!(route.params, vec!["id"]);
    /// assert_eq!(route.optional_params, vec!["id"]);
    /// ```
    pub fn new(pattern: impl Into<String>, name: impl Into<String>, component: Component) -> Self {
        let pattern = pattern.into();
        let parsed = route::parse_pattern(&pattern);

        Route {
            pattern,
            name: name.into(),
            component,
            props_from_params: false,
            params: parsed.params,
            optional_params: parsed.optional_params,
            metadata: HashMap::new(),
            segments: parsed.segments,
        }
    }

    /// Creates a route whose view is bound at startup
    pub fn eager(pattern: impl Into<String>, name: impl Into<String>, view: impl Into<ViewId>) -> Self {
        Self::new(pattern, name, Component::Eager(view.into()))
    }

    /// Creates a route whose view is fetched from `chunk` on first navigation
    pub fn deferred(
        pattern: impl Into<String>,
        name: impl Into<String>,
        chunk: impl Into<String>,
    ) -> Self {
        Self::new(pattern, name, Component::Deferred { chunk: chunk.into() })
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self.component, Component::Deferred { .. })
    }

    /// Typed segments of the pattern
    pub fn segments(&self) -> &[PatternSegmentType] {
        &self.segments
    }

    /// Matches this route against a normalized path (case-sensitive)
    pub fn matches(&self, path: &str) -> Option<Params> {
        self.matches_with_options(path, false)
    }

    /// Matches this route against a normalized path with options
    ///
    /// Walks pattern and path segments together. Optional parameters first try
    /// to consume the current path segment and fall back to matching without it.
    /// Captured values are percent-decoded.
    ///
    /// # Examples
    ///
    /// ```
    /// use heritage_router::Route;
    ///
    /// let route = Route::eager("/trace/:id?", "trace", "TraceView");
    /// assert!(route.matches("/trace").unwrap().is_empty());
    /// assert_eq!(route.matches("/trace/123").unwrap()["id"], "123");
    /// assert!(route.matches("/trace/1/2").is_none());
    /// ```
    pub fn matches_with_options(&self, path: &str, case_insensitive: bool) -> Option<Params> {
        let path_segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        fn match_segments(
            pattern: &[PatternSegmentType],
            path: &[&str],
            params: Params,
            case_insensitive: bool,
        ) -> Option<Params> {
            let Some((segment, rest)) = pattern.split_first() else {
                // Success only if we also consumed all path segments
                return path.is_empty().then_some(params);
            };

            match segment {
                PatternSegmentType::Optional(name) => {
                    if let Some((value, remaining)) = path.split_first() {
                        let mut with_value = params.clone();
                        with_value.insert(name.clone(), crate::path::decode_component(value));
                        if let Some(found) =
                            match_segments(rest, remaining, with_value, case_insensitive)
                        {
                            return Some(found);
                        }
                    }
                    match_segments(rest, path, params, case_insensitive)
                }
                PatternSegmentType::Required(name) => {
                    let (value, remaining) = path.split_first()?;
                    let mut params = params;
                    params.insert(name.clone(), crate::path::decode_component(value));
                    match_segments(rest, remaining, params, case_insensitive)
                }
                PatternSegmentType::Static(expected) => {
                    let (actual, remaining) = path.split_first()?;
                    let matches = if case_insensitive {
                        expected.eq_ignore_ascii_case(actual)
                    } else {
                        expected == actual
                    };
                    if !matches {
                        return None;
                    }
                    match_segments(rest, remaining, params, case_insensitive)
                }
            }
        }

        match_segments(&self.segments, &path_segments, HashMap::new(), case_insensitive)
    }

    // ========================================================================
    // Functional Builder Methods
    // ========================================================================

    /// Forwards captured params to the view as inputs
    pub fn with_props(self) -> Self {
        self.with_props_from_params(true)
    }

    pub fn with_props_from_params(mut self, enabled: bool) -> Self {
        self.props_from_params = enabled;
        self
    }

    /// Sets a metadata key-value pair
    ///
    /// # Examples
    ///
    /// ```
    /// use heritage_router::Route;
    ///
    /// let route = Route::deferred("/about", "about", "about")
    ///     .with_meta("title", "About the collection");
    ///
    /// assert_eq!(route.get_meta("title"), Some(&"About the collection".to_string()));
    /// assert_eq!(route.get_meta("missing"), None);
    /// ```
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn get_meta(&self, key: &str) -> Option<&String> {
        self.metadata.get(key)
    }

    /// Generates a URL for this route by substituting parameters
    ///
    /// Required parameters must be present and non-empty; absent or empty
    /// optional parameters are dropped. Values are percent-encoded.
    ///
    /// # Examples
    ///
    /// ```
    /// use heritage_router::Route;
    /// use std::collections::HashMap;
    ///
    /// let route = Route::eager("/trace/:id?", "trace", "TraceView");
    /// assert_eq!(route.generate_url(&HashMap::new()).unwrap(), "/trace");
    ///
    /// let mut params = HashMap::new();
    /// params.insert("id".to_string(), "MH 001".to_string());
    /// assert_eq!(route.generate_url(&params).unwrap(), "/trace/MH%20001");
    /// ```
    pub fn generate_url(&self, params: &Params) -> Option<String> {
        let result_segments: Option<Vec<String>> = self
            .segments
            .iter()
            .filter_map(|segment| match segment {
                PatternSegmentType::Static(text) => Some(Some(text.clone())),
                PatternSegmentType::Required(name) => Some(
                    params
                        .get(name)
                        .filter(|v| !v.is_empty())
                        .map(|v| urlencoding::encode(v).into_owned()),
                ),
                PatternSegmentType::Optional(name) => params
                    .get(name)
                    .filter(|v| !v.is_empty())
                    .map(|v| Some(urlencoding::encode(v).into_owned())),
            })
            .collect();

        result_segments.map(|segs| format!("/{}", segs.join("/")))
    }
}

// ============================================================================
// Route Table
// ============================================================================

/// Ordered, validated, immutable collection of routes
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
    named_routes: HashMap<String, usize>,
    base: String,
    case_insensitive: bool,
}

/// Builder for [`RouteTable`]
#[derive(Debug, Clone)]
pub struct RouteTableBuilder {
    routes: Vec<Route>,
    base: String,
    case_insensitive: bool,
}

impl Default for RouteTableBuilder {
    fn default() -> Self {
        let config = RoutingConfig::default();
        Self {
            routes: Vec::new(),
            base: config.base_path,
            case_insensitive: config.case_insensitive,
        }
    }
}

impl RouteTableBuilder {
    pub fn with_route(mut self, route: Route) -> Self {
        self.routes.push(route);
        self
    }

    pub fn with_routes<I>(mut self, routes: I) -> Self
    where
        I: IntoIterator<Item = Route>,
    {
        self.routes.extend(routes);
        self
    }

    /// Sets the base path all patterns are rooted at
    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = base.into();
        self
    }

    pub fn with_case_sensitivity(mut self, case_insensitive: bool) -> Self {
        self.case_insensitive = case_insensitive;
        self
    }

    /// Applies base path and case sensitivity from configuration
    pub fn with_config(self, config: &RoutingConfig) -> Self {
        self.with_base(config.base_path.clone())
            .with_case_sensitivity(config.case_insensitive)
    }

    /// Validates every route and freezes the table
    ///
    /// Fails on the first empty name, invalid pattern or duplicate name.
    pub fn build(self) -> std::result::Result<RouteTable, ConfigurationError> {
        let mut named_routes = HashMap::with_capacity(self.routes.len());
        let mut routes = Vec::with_capacity(self.routes.len());

        for (index, mut route) in self.routes.into_iter().enumerate() {
            if route.name.trim().is_empty() {
                return Err(ConfigurationError::EmptyName(route.pattern));
            }

            let parsed = crate::route::validate_pattern(&route.pattern)?;
            route.segments = parsed.segments;
            route.params = parsed.params;
            route.optional_params = parsed.optional_params;

            if named_routes.insert(route.name.clone(), index).is_some() {
                return Err(ConfigurationError::DuplicateName(route.name));
            }
            routes.push(route);
        }

        tracing::debug!(routes = routes.len(), base = %self.base, "route table built");

        Ok(RouteTable {
            routes,
            named_routes,
            base: normalize_base(&self.base),
            case_insensitive: self.case_insensitive,
        })
    }
}

impl RouteTable {
    /// Builds a table rooted at `/` with default options
    pub fn new<I>(routes: I) -> std::result::Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = Route>,
    {
        Self::builder().with_routes(routes).build()
    }

    pub fn builder() -> RouteTableBuilder {
        RouteTableBuilder::default()
    }

    /// Normalized base path ("" for the root)
    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn is_case_insensitive(&self) -> bool {
        self.case_insensitive
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn get_route_by_name(&self, name: &str) -> Option<&Route> {
        self.named_routes.get(name).map(|&index| &self.routes[index])
    }

    /// Resolves a location to the first matching route
    ///
    /// # Examples
    ///
    /// ```
    /// use heritage_router::{Route, RouteTable, RouterError};
    ///
    /// let table = RouteTable::new([Route::eager("/trace/:id?", "trace", "TraceView").with_props()]).unwrap();
    ///
    /// let m = table.resolve("/trace/123?from=qr").unwrap();
    /// assert_eq!(m.props.unwrap().get("id"), Some(&"123".to_string()));
    /// assert_eq!(m.location.query.get("from"), Some(&"qr".to_string()));
    ///
    /// assert!(matches!(table.resolve("/nope"), Err(RouterError::NotFound(_))));
    /// ```
    pub fn resolve(&self, location: &str) -> Result<RouteMatch<'_>> {
        let location = Location::parse_with_options(location, &self.base, self.case_insensitive);

        let found = self.routes.iter().find_map(|route| {
            route
                .matches_with_options(&location.path, self.case_insensitive)
                .map(|params| (route, params))
        });

        match found {
            Some((route, params)) => {
                tracing::debug!(path = %location.path, route = %route.name, "route resolved");
                let props = route.props_from_params.then(|| params.clone());
                Ok(RouteMatch {
                    route,
                    params,
                    props,
                    location,
                })
            }
            None => {
                tracing::debug!(path = %location.path, "no route matched");
                Err(RouterError::NotFound(location.path))
            }
        }
    }

    /// Generates the base-relative path for a named route
    ///
    /// ```
    /// use heritage_router::{Route, RouteTable};
    ///
    /// let table = RouteTable::new([Route::deferred("/product/:id", "product-detail", "product-detail")]).unwrap();
    /// assert_eq!(table.url_for_params("product-detail", &[("id", "42")]).unwrap(), "/product/42");
    /// assert_eq!(table.url_for_params("product-detail", &[]), None);
    /// ```
    pub fn url_for(&self, name: &str, params: &Params) -> Option<String> {
        self.get_route_by_name(name)
            .and_then(|route| route.generate_url(params))
    }

    pub fn url_for_params(&self, name: &str, params: &[(&str, &str)]) -> Option<String> {
        let param_map: Params = params
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        self.url_for(name, &param_map)
    }

    /// Generates the full history URL (base included) for a named route
    ///
    /// ```
    /// use heritage_router::{Route, RouteTable};
    ///
    /// let table = RouteTable::builder()
    ///     .with_base("/heritage/")
    ///     .with_route(Route::eager("/", "home", "HomeView"))
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(table.href("home", &Default::default()).unwrap(), "/heritage/");
    /// ```
    pub fn href(&self, name: &str, params: &Params) -> Option<String> {
        self.url_for(name, params)
            .map(|path| format!("{}{}", self.base, path))
    }
}
