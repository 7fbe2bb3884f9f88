//! The application: configuration, shell cache, router, and the per-request
//! pipeline.
//!
//! [`App::new`] does the one blocking startup step — reading and splitting
//! the shell document — and fails fast if that is not possible. After that
//! the app is immutable and shared across every in-flight request.
//!
//! [`App::handle`] is the whole pipeline for one request, in order:
//!
//! 1. classification (already done — it happened when the [`Request`] was
//!    built),
//! 2. short-circuits that never reach a handler: CORS preflight, push-route
//!    synthesis,
//! 3. routing → handler, or the fallbacks (asset file, bare shell, 404),
//! 4. composition (pass / append deep-link tail / wrap in the shell),
//! 5. CORS decoration.

use http::{Method, StatusCode};
use tracing::{debug, info};

use crate::assets;
use crate::classify::RenderMode;
use crate::compose::{self, ComposeContext};
use crate::config::Config;
use crate::cors;
use crate::error::Error;
use crate::handler::Handler;
use crate::navigate;
use crate::request::Request;
use crate::response::Response;
use crate::router::Router;
use crate::shell::ShellDocument;

/// A progressive-serving application. Build once, pass to
/// [`Server::serve`](crate::Server::serve).
pub struct App {
    config: Config,
    router: Router,
    shell: ShellDocument,
}

impl App {
    /// Builds the app and its shell cache from `{dist}/index.html`.
    ///
    /// Errors here are configuration errors — the caller should propagate
    /// them and let the process exit before it ever accepts traffic.
    pub fn new(config: Config) -> Result<Self, Error> {
        let source = config.dist.join("index.html");
        let shell = ShellDocument::from_file(&source, &config.main_selector)?;
        info!(
            shell = %source.display(),
            selector = %config.main_selector,
            "document shell cached"
        );
        Ok(Self {
            config,
            router: Router::new(),
            shell,
        })
    }

    /// Register a handler for a method + path pair. Returns `self` for
    /// chaining. Path parameters use `{name}` syntax.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler) -> Self {
        self.router = self.router.on(method, path, handler);
        self
    }

    pub fn get(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::GET, path, handler)
    }

    pub fn post(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::POST, path, handler)
    }

    pub fn put(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::PUT, path, handler)
    }

    pub fn patch(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::PATCH, path, handler)
    }

    pub fn delete(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::DELETE, path, handler)
    }

    /// Runs one request through the full pipeline and returns the finished
    /// response. Transport-independent: [`Server`](crate::Server) calls this
    /// once per request, and embedders and tests can call it directly.
    pub async fn handle(&self, req: Request) -> Response {
        let res = self.dispatch(req).await;
        match &self.config.origin {
            Some(origin) => cors::apply(res, origin),
            None => res,
        }
    }

    async fn dispatch(&self, req: Request) -> Response {
        if req.method() == Method::OPTIONS {
            if let Some(origin) = &self.config.origin {
                return cors::preflight(origin);
            }
        }

        if let Some(destination) = navigate::push_target(req.path()) {
            debug!(destination, "push-route synthesis");
            return navigate::push_response(destination);
        }

        // The handler consumes the request; capture what composition needs
        // first. The composer runs exactly once, here.
        let ctx = ComposeContext::of(&req);
        let res = match self.router.lookup(req.method(), req.path()) {
            Some((handler, params)) => handler.call(req.with_params(params)).await,
            None => self.fallback(&req).await,
        };
        compose::compose(&self.shell, &self.config, &ctx, res)
    }

    /// What happens when no route matches.
    async fn fallback(&self, req: &Request) -> Response {
        match req.mode() {
            // Asset-shaped GETs go to the dist directory.
            RenderMode::Passthrough if req.method() == Method::GET => {
                match assets::serve(&self.config.dist, req.path()).await {
                    Some(res) => res,
                    None => Response::status(StatusCode::NOT_FOUND),
                }
            }
            // A partial request for a missing route is a real miss.
            RenderMode::Passthrough | RenderMode::Fragment => {
                Response::status(StatusCode::NOT_FOUND)
            }
            // A full navigation always gets the shell; the composer wraps
            // the empty body into the bare document and the client app takes
            // over routing.
            RenderMode::FullDocument => Response::status(StatusCode::OK),
        }
    }
}
