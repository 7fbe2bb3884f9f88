//! Built-in health-check handlers.
//!
//! Register them on your app if your deploy target probes for them:
//!
//! ```rust,no_run
//! use shellac::{App, Config, health};
//!
//! # fn main() -> Result<(), shellac::Error> {
//! let app = App::new(Config::new("vite/dist"))?
//!     .get("/healthz", health::liveness)
//!     .get("/readyz", health::readiness);
//! # Ok(())
//! # }
//! ```
//!
//! Because the shell cache is built before [`Server::serve`](crate::Server::serve)
//! accepts its first connection, a process that answers at all is a process
//! that can compose responses — readiness has nothing extra to verify.
//! Override `readiness` with your own handler if the rest of your app gates
//! on dependencies (a database, a downstream service).

use crate::{Request, Response};

/// Liveness probe handler. Always `200 OK` with body `"ok"`.
pub async fn liveness(_req: Request) -> Response {
    Response::text("ok")
}

/// Readiness probe handler. Always `200 OK` with body `"ready"` — the shell
/// cache either exists or the process never started.
pub async fn readiness(_req: Request) -> Response {
    Response::text("ready")
}
