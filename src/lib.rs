//! # shellac
//!
//! Progressive HTML delivery for htmx single-page apps. Full documents on
//! normal navigation, fragments on partial updates, both cut from one cached
//! shell. Nothing more. Nothing less.
//!
//! ## The contract
//!
//! Your handlers emit fragments. shellac decides, per request, what leaves
//! the process:
//!
//! - a **full navigation** (no `hx-request` header, or a history restore, or
//!   a boosted link) gets the fragment wrapped in your built client's
//!   `index.html`, split once at startup around the mount element;
//! - a **partial update** (`hx-request`) gets the fragment as-is;
//! - an **asset-shaped path** (`.js`, `.css`, …) is never touched — it is
//!   served from `dist` byte-identical.
//!
//! Redirects are mode-aware for the same reason: a partial update gets an
//! `hx-redirect` header the client router follows without a reload; a full
//! navigation gets a real `302` that curl and non-JS clients understand.
//!
//! The shell is parsed exactly once, before the server accepts traffic.
//! A missing mount element fails startup — there is no degraded mode.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use shellac::{redirect, App, Config, Request, Response, Server};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), shellac::Error> {
//!     let config = Config::new("vite/dist").origin("http://localhost:3001");
//!
//!     let app = App::new(config)?
//!         .get("/orders", list_orders)
//!         .get("/orders/{id}", order_detail)
//!         .post("/orders", create_order);
//!
//!     Server::bind("0.0.0.0:3000").serve(app).await
//! }
//!
//! async fn list_orders(_req: Request) -> Response {
//!     Response::html("<ul><li><a href=\"/orders/42\">Order 42</a></li></ul>")
//! }
//!
//! async fn order_detail(req: Request) -> Response {
//!     let id = req.param("id").unwrap_or("unknown");
//!     Response::html(format!("<article><h1>Order {id}</h1></article>"))
//! }
//!
//! async fn create_order(req: Request) -> Response {
//!     // Client-side redirect for htmx, 302 for everyone else.
//!     redirect(&req, "/orders/42")
//! }
//! ```

mod app;
mod assets;
mod classify;
mod compose;
mod config;
mod cors;
mod error;
mod handler;
mod navigate;
mod request;
mod response;
mod router;
mod server;
mod shell;

pub mod health;

pub use app::App;
pub use classify::{Classification, RenderMode, HX_BOOSTED, HX_HISTORY_RESTORE_REQUEST, HX_REQUEST};
pub use config::Config;
pub use error::Error;
pub use handler::Handler;
pub use http::{Method, StatusCode};
pub use navigate::{redirect, HX_PUSH, HX_REDIRECT};
pub use request::Request;
pub use response::{ContentType, IntoResponse, Response};
pub use server::Server;
pub use shell::ShellDocument;
