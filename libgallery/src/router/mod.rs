//! Client-side router
//!
//! Maps locations to views. Routes are kept in registration order; an exact
//! route matches only its literal path, a non-exact route matches segment by
//! segment with `:name` capturing a parameter. Resolution tries every exact
//! route first, then every non-exact route, then falls back to the not-found
//! view.
//!
//! Mounting a view tears the previous one down first, then awaits the route's
//! factory and resets the shared [`Viewport`] to the top. A failing factory is
//! logged and replaced by the not-found view.
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//! use libgallery::router::{Mountable, RouteContext, Router, Viewport};
//! use libgallery::store::Store;
//!
//! struct Screen(String);
//! impl Mountable for Screen {}
//!
//! # tokio_test_block_on(async {
//! let viewport = Rc::new(Store::new(Viewport::default()));
//! let mut router: Router<Screen> =
//!     Router::new("http://localhost", viewport, |_| Box::new(Screen("missing".into()))).unwrap();
//!
//! router.add_route("/item/:id", |ctx: RouteContext| async move {
//!     Ok(Box::new(Screen(ctx.param("id").unwrap_or_default().to_string())))
//! }, false);
//!
//! router.navigate("/item/42").await;
//! assert_eq!(router.current_view().map(|s| s.0.as_str()), Some("42"));
//! assert_eq!(router.get_param("id"), Some("42".to_string()));
//! # });
//! # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

pub mod history;
pub mod link;
pub mod pattern;
pub mod viewport;

pub use history::SessionHistory;
pub use link::{intercept_link, LinkClick, MouseButton};
pub use pattern::{Params, RoutePattern};
pub use viewport::Viewport;

use std::future::Future;
use std::rc::Rc;

use futures::future::{FutureExt, LocalBoxFuture};
use reqwest::Url;

use crate::error::{ConfigError, Result};
use crate::store::Store;

/// Something the router can mount
pub trait Mountable {
    /// Release subscriptions and listeners before the view is dropped
    fn teardown(&mut self) {}
}

pub type ViewFuture<V> = LocalBoxFuture<'static, Result<Box<V>>>;
pub type ViewFactory<V> = Rc<dyn Fn(RouteContext) -> ViewFuture<V>>;
pub type NotFoundFactory<V> = Rc<dyn Fn(RouteContext) -> Box<V>>;

/// Where the router is, as seen by a view factory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteContext {
    pub location: Url,
    /// Registered path of the matched route, `None` when nothing matched
    pub route: Option<String>,
    pub params: Params,
}

impl RouteContext {
    pub fn path(&self) -> &str {
        self.location.path()
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn query_param(&self, name: &str) -> Option<String> {
        self.location
            .query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }
}

struct Route<V: ?Sized> {
    pattern: RoutePattern,
    factory: ViewFactory<V>,
    exact: bool,
}

pub struct Router<V: Mountable + ?Sized> {
    routes: Vec<Route<V>>,
    not_found: NotFoundFactory<V>,
    history: SessionHistory,
    origin: Url,
    viewport: Rc<Store<Viewport>>,
    current: Option<Box<V>>,
    context: Option<RouteContext>,
}

impl<V: Mountable + ?Sized + 'static> Router<V> {
    /// Build an empty router for `origin`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` when `origin` is not an absolute URL.
    pub fn new<F>(origin: &str, viewport: Rc<Store<Viewport>>, not_found: F) -> Result<Self>
    where
        F: Fn(RouteContext) -> Box<V> + 'static,
    {
        let origin = Url::parse(origin).map_err(|e| ConfigError::InvalidValue {
            field: "ui.origin".to_string(),
            message: e.to_string(),
        })?;

        Ok(Self {
            routes: Vec::new(),
            not_found: Rc::new(not_found),
            history: SessionHistory::new("/"),
            origin,
            viewport,
            current: None,
            context: None,
        })
    }

    /// Register a route; earlier registrations win among equals
    pub fn add_route<F, Fut>(&mut self, path: &str, factory: F, exact: bool)
    where
        F: Fn(RouteContext) -> Fut + 'static,
        Fut: Future<Output = Result<Box<V>>> + 'static,
    {
        let factory: ViewFactory<V> = Rc::new(move |context| factory(context).boxed_local());
        self.routes.push(Route {
            pattern: RoutePattern::parse(path),
            factory,
            exact,
        });
    }

    /// Begin a session at `location` and mount its view
    pub async fn start(&mut self, location: &str) {
        self.history.reset(location);
        self.resolve().await;
    }

    /// Push `location` onto the history and mount its view
    pub async fn navigate(&mut self, location: &str) {
        tracing::debug!(location, "Navigating");
        self.history.push(location);
        self.resolve().await;
    }

    /// Step back in history; `false` when already at the first entry
    pub async fn back(&mut self) -> bool {
        if !self.history.back() {
            return false;
        }
        self.resolve().await;
        true
    }

    /// Step forward in history; `false` when already at the last entry
    pub async fn forward(&mut self) -> bool {
        if !self.history.forward() {
            return false;
        }
        self.resolve().await;
        true
    }

    /// Path of an in-app link, `None` for links the router leaves alone
    pub fn intercept(&self, click: &LinkClick) -> Option<String> {
        intercept_link(&self.origin, click)
    }

    /// Navigate if `click` is an in-app link; reports whether it was
    pub async fn follow_link(&mut self, click: &LinkClick) -> bool {
        match self.intercept(click) {
            Some(path) => {
                self.navigate(&path).await;
                true
            }
            None => false,
        }
    }

    /// Value of `:name` in the current non-exact route
    pub fn get_param(&self, name: &str) -> Option<String> {
        self.context
            .as_ref()
            .and_then(|context| context.param(name))
            .map(str::to_string)
    }

    /// Value of `name` in the current location's query string
    pub fn get_query_param(&self, name: &str) -> Option<String> {
        self.context.as_ref().and_then(|context| context.query_param(name))
    }

    /// Path of the current location
    pub fn current_path(&self) -> &str {
        match &self.context {
            Some(context) => context.path(),
            None => self.history.current(),
        }
    }

    pub fn context(&self) -> Option<&RouteContext> {
        self.context.as_ref()
    }

    pub fn current_view(&self) -> Option<&V> {
        self.current.as_deref()
    }

    pub fn current_view_mut(&mut self) -> Option<&mut V> {
        self.current.as_deref_mut()
    }

    pub fn history(&self) -> &SessionHistory {
        &self.history
    }

    pub fn viewport(&self) -> &Rc<Store<Viewport>> {
        &self.viewport
    }

    /// Tear down the mounted view, leaving nothing mounted
    pub fn unmount(&mut self) {
        if let Some(mut view) = self.current.take() {
            view.teardown();
        }
    }

    /// Find the route for `path` and its captured parameters
    fn find_route(&self, path: &str) -> Option<(usize, Params)> {
        let exact = self
            .routes
            .iter()
            .position(|route| route.exact && route.pattern.matches_exact(path));
        if let Some(index) = exact {
            return Some((index, Vec::new()));
        }

        self.routes.iter().enumerate().find_map(|(index, route)| {
            if route.exact {
                return None;
            }
            route.pattern.match_segments(path).map(|params| (index, params))
        })
    }

    async fn resolve(&mut self) {
        let location = match self.origin.join(self.history.current()) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!("Unparseable location {}: {}", self.history.current(), e);
                self.origin.clone()
            }
        };

        let matched = self.find_route(location.path());
        let (factory, route, params) = match matched {
            Some((index, params)) => {
                let route = &self.routes[index];
                (
                    Some(Rc::clone(&route.factory)),
                    Some(route.pattern.as_str().to_string()),
                    params,
                )
            }
            None => (None, None, Vec::new()),
        };
        let context = RouteContext {
            location,
            route,
            params,
        };

        self.unmount();

        let view = match factory {
            Some(factory) => match factory(context.clone()).await {
                Ok(view) => view,
                Err(e) => {
                    tracing::error!("Failed to render route {}: {}", context.path(), e);
                    (self.not_found)(context.clone())
                }
            },
            None => {
                tracing::debug!(path = context.path(), "No route matched");
                (self.not_found)(context.clone())
            }
        };

        self.current = Some(view);
        self.context = Some(context);
        self.viewport.set_state(Viewport::scrolled_to_top);
    }
}

impl<V: Mountable + ?Sized> Drop for Router<V> {
    fn drop(&mut self) {
        if let Some(mut view) = self.current.take() {
            view.teardown();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GalleryError;
    use std::cell::RefCell;

    struct TestView {
        name: String,
        log: Rc<RefCell<Vec<String>>>,
    }

    impl Mountable for TestView {
        fn teardown(&mut self) {
            self.log.borrow_mut().push(format!("teardown {}", self.name));
        }
    }

    fn router(log: &Rc<RefCell<Vec<String>>>) -> Router<TestView> {
        let viewport = Rc::new(Store::new(Viewport::default()));
        let not_found_log = Rc::clone(log);
        let mut router = Router::new("http://localhost", viewport, move |_| {
            Box::new(TestView {
                name: "not-found".to_string(),
                log: Rc::clone(&not_found_log),
            })
        })
        .unwrap();

        for (path, name, exact) in [
            ("/", "home", true),
            ("/image/:id", "detail", false),
            ("/favorites", "favorites", true),
        ] {
            let log = Rc::clone(log);
            router.add_route(
                path,
                move |_ctx| {
                    let view = TestView {
                        name: name.to_string(),
                        log: Rc::clone(&log),
                    };
                    async move { Ok(Box::new(view)) }
                },
                exact,
            );
        }

        let log = Rc::clone(log);
        router.add_route(
            "/broken/:id",
            move |_ctx| {
                log.borrow_mut().push("factory broken".to_string());
                async move { Err::<Box<TestView>, _>(GalleryError::View("boom".to_string())) }
            },
            false,
        );
        router
    }

    fn mounted(router: &Router<TestView>) -> &str {
        router.current_view().map(|view| view.name.as_str()).unwrap_or("")
    }

    #[tokio::test]
    async fn test_exact_and_param_routes() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut router = router(&log);

        router.start("/").await;
        assert_eq!(mounted(&router), "home");
        assert_eq!(router.get_param("id"), None);

        router.navigate("/image/42").await;
        assert_eq!(mounted(&router), "detail");
        assert_eq!(router.get_param("id"), Some("42".to_string()));
        assert_eq!(router.get_param("other"), None);
    }

    #[tokio::test]
    async fn test_unmatched_paths_mount_not_found() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut router = router(&log);

        router.start("/image/42/extra").await;
        assert_eq!(mounted(&router), "not-found");
        assert_eq!(router.get_param("id"), None);

        // Exact routes do not match a trailing slash.
        router.navigate("/favorites/").await;
        assert_eq!(mounted(&router), "not-found");
    }

    #[tokio::test]
    async fn test_previous_view_torn_down_before_mount() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut router = router(&log);

        router.start("/").await;
        router.navigate("/broken/1").await;

        assert_eq!(
            *log.borrow(),
            vec!["teardown home".to_string(), "factory broken".to_string()]
        );
        assert_eq!(mounted(&router), "not-found");
    }

    #[tokio::test]
    async fn test_back_and_forward_resolve() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut router = router(&log);

        router.start("/").await;
        router.navigate("/favorites").await;

        assert!(router.back().await);
        assert_eq!(mounted(&router), "home");
        assert!(!router.back().await);

        assert!(router.forward().await);
        assert_eq!(mounted(&router), "favorites");
    }

    #[tokio::test]
    async fn test_mount_resets_scroll() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut router = router(&log);
        router.start("/").await;

        router.viewport().set_state(|_| Viewport {
            scroll_top: 30,
            client_height: 10,
            scroll_height: 80,
        });
        router.navigate("/favorites").await;

        assert_eq!(router.viewport().get_state().scroll_top, 0);
        assert_eq!(router.viewport().get_state().scroll_height, 80);
    }

    #[tokio::test]
    async fn test_query_param() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut router = router(&log);

        router.start("/?page=3&q=cats").await;
        assert_eq!(mounted(&router), "home");
        assert_eq!(router.get_query_param("page"), Some("3".to_string()));
        assert_eq!(router.get_query_param("missing"), None);
    }

    #[tokio::test]
    async fn test_follow_link() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut router = router(&log);
        router.start("/").await;

        assert!(router.follow_link(&LinkClick::primary("/image/9")).await);
        assert_eq!(router.get_param("id"), Some("9".to_string()));

        let external = LinkClick::primary("https://picsum.photos/id/9/800/600");
        assert!(!router.follow_link(&external).await);
        assert_eq!(router.current_path(), "/image/9");
    }
}
