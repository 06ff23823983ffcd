//! Navigation tests: deferred loading, caching, failure handling and
//! last-navigation-wins ordering.

use async_trait::async_trait;
use heritage_router::*;
use pretty_assertions::assert_eq;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Loader that counts fetches, fails on `broken` and parks on `slow` until released
#[derive(Default)]
struct TestLoader {
    calls: AtomicUsize,
    slow_started: Notify,
    release_slow: Notify,
}

#[async_trait]
impl ModuleLoader for TestLoader {
    async fn load(&self, chunk: &str) -> anyhow::Result<ViewId> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match chunk {
            "broken" => anyhow::bail!("network error while fetching `{chunk}`"),
            "slow" => {
                self.slow_started.notify_one();
                self.release_slow.notified().await;
                Ok(ViewId::new("SlowView"))
            }
            other => Ok(ViewId::new(format!("{other}-view"))),
        }
    }
}

/// Mount that records what it was asked to display
#[derive(Default)]
struct RecordingMount {
    mounted: Mutex<Vec<String>>,
    not_found: Mutex<Vec<String>>,
}

impl ViewMount for RecordingMount {
    fn mount(&self, view: &ResolvedView) {
        self.mounted.lock().unwrap().push(view.view.to_string());
    }

    fn not_found(&self, location: &str) {
        self.not_found.lock().unwrap().push(location.to_string());
    }
}

fn navigator() -> (Arc<TestLoader>, Navigator<RecordingMount>) {
    let table = RouteTable::new([
        Route::eager("/", "home", "HomeView"),
        Route::eager("/trace/:id?", "trace", "TraceView").with_props(),
        Route::deferred("/products", "products", "products"),
        Route::deferred("/product/:id", "product-detail", "product-detail").with_props(),
        Route::deferred("/slow", "slow", "slow"),
        Route::deferred("/broken", "broken", "broken"),
    ])
    .unwrap();

    let loader = Arc::new(TestLoader::default());
    let modules = Arc::new(ModuleCache::new(loader.clone()));
    let navigator = Navigator::new(Arc::new(table), modules, RecordingMount::default());
    (loader, navigator)
}

#[tokio::test]
async fn test_eager_route_needs_no_fetch() {
    let (loader, navigator) = navigator();

    let outcome = navigator.navigate("/trace/123").await.unwrap();
    let view = outcome.mounted().unwrap();

    assert_eq!(view.view, ViewId::new("TraceView"));
    assert_eq!(view.props.as_ref().unwrap()["id"], "123");
    assert_eq!(loader.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_deferred_route_fetched_once() {
    let (loader, navigator) = navigator();

    navigator.navigate("/products").await.unwrap();
    navigator.navigate("/").await.unwrap();
    navigator.navigate("/products").await.unwrap();

    assert_eq!(loader.calls.load(Ordering::SeqCst), 1);
    assert_eq!(navigator.modules().state("products").await, LoadState::Loaded);
    assert_eq!(
        *navigator.view_mount().mounted.lock().unwrap(),
        vec!["products-view", "HomeView", "products-view"]
    );
}

#[tokio::test]
async fn test_cache_is_keyed_by_route_not_params() {
    let (loader, navigator) = navigator();

    navigator.navigate("/product/1").await.unwrap();
    let outcome = navigator.navigate("/product/2").await.unwrap();

    assert_eq!(outcome.mounted().unwrap().params["id"], "2");
    assert_eq!(loader.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_not_found_reaches_mount() {
    let (_, navigator) = navigator();

    navigator.navigate("/").await.unwrap();
    let err = navigator.navigate("/does-not-exist").await.unwrap_err();

    assert_eq!(err, RouterError::NotFound("/does-not-exist".to_string()));
    assert_eq!(
        *navigator.view_mount().not_found.lock().unwrap(),
        vec!["/does-not-exist"]
    );
    assert_eq!(navigator.current().await, None);
}

#[tokio::test]
async fn test_load_failure_is_surfaced_and_isolated() {
    let (loader, navigator) = navigator();

    navigator.navigate("/").await.unwrap();
    let err = navigator.navigate("/broken").await.unwrap_err();

    assert!(matches!(err, RouterError::LoadFailure { ref route, .. } if route == "broken"));
    assert_eq!(loader.calls.load(Ordering::SeqCst), 1);
    assert_eq!(navigator.current().await.unwrap().route, "home");

    let products = navigator.navigate("/products").await.unwrap();
    assert_eq!(products.mounted().unwrap().route, "products");
}

#[tokio::test]
async fn test_last_navigation_wins() {
    let (loader, navigator) = navigator();

    let (slow, fast) = tokio::join!(navigator.navigate("/slow"), async {
        loader.slow_started.notified().await;
        let fast = navigator.navigate("/products").await;
        loader.release_slow.notify_one();
        fast
    });

    assert!(matches!(
        slow.unwrap(),
        NavigationOutcome::Superseded { generation: 1, latest: 2 }
    ));
    assert_eq!(fast.unwrap().mounted().unwrap().route, "products");
    assert_eq!(navigator.current().await.unwrap().route, "products");
    assert_eq!(
        *navigator.view_mount().mounted.lock().unwrap(),
        vec!["products-view"]
    );

    // The superseded fetch still completed and is cached for later navigations
    assert_eq!(navigator.modules().state("slow").await, LoadState::Loaded);
    let again = navigator.navigate("/slow").await.unwrap();
    assert_eq!(again.mounted().unwrap().view, ViewId::new("SlowView"));
}

#[tokio::test]
async fn test_module_is_loading_while_fetch_is_parked() {
    let (loader, navigator) = navigator();
    assert_eq!(navigator.modules().state("slow").await, LoadState::Unloaded);

    let (slow, observed) = tokio::join!(navigator.navigate("/slow"), async {
        loader.slow_started.notified().await;
        let observed = navigator.modules().state("slow").await;
        loader.release_slow.notify_one();
        observed
    });

    assert_eq!(observed, LoadState::Loading);
    assert_eq!(slow.unwrap().mounted().unwrap().view, ViewId::new("SlowView"));
    assert_eq!(navigator.modules().state("slow").await, LoadState::Loaded);
}
