//! Crate configuration.
//!
//! A plain builder with defaults, consumed once by [`App::new`](crate::App::new).
//! Only `dist` is required; everything else has a conventional value.

use std::path::PathBuf;

/// Configuration for an [`App`](crate::App).
///
/// ```rust
/// use shellac::Config;
///
/// let config = Config::new("vite/dist")
///     .origin("http://localhost:3001")
///     .app_url("/app")
///     .main_selector("#main");
/// ```
pub struct Config {
    /// Directory containing the built client: static assets plus the
    /// `index.html` shell document.
    pub(crate) dist: PathBuf,
    /// Permitted cross-origin dev client. The CORS layer is active only
    /// when this is set.
    pub(crate) origin: Option<String>,
    /// Deep-link path: a request to `{app_url}?url=/foo` loads the app
    /// fragment and then triggers a follow-up fetch of `/foo`.
    pub(crate) app_url: String,
    /// Id selector of the mount element — both the injection point inside
    /// the shell and the client-side target region of the deep-link tail.
    pub(crate) main_selector: String,
}

impl Config {
    pub fn new(dist: impl Into<PathBuf>) -> Self {
        Self {
            dist: dist.into(),
            origin: None,
            app_url: "/app".to_owned(),
            main_selector: "#main".to_owned(),
        }
    }

    /// Allow cross-origin requests from `origin` (the app dev server).
    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Override the deep-link path (default `/app`).
    pub fn app_url(mut self, app_url: impl Into<String>) -> Self {
        self.app_url = app_url.into();
        self
    }

    /// Override the mount selector (default `#main`).
    pub fn main_selector(mut self, selector: impl Into<String>) -> Self {
        self.main_selector = selector.into();
        self
    }
}
