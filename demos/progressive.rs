//! Progressive-serving demo — fragment handlers over a cached shell.
//!
//! Expects a built client under `vite/dist` with a `<main id="main">` mount
//! element in its `index.html`.
//!
//! Run with:
//!   RUST_LOG=debug cargo run --example progressive
//!
//! Try:
//!   curl http://localhost:3000/orders/42                        # full document
//!   curl http://localhost:3000/orders/42 -H 'HX-Request: true'  # bare fragment
//!   curl -i http://localhost:3000/push/orders/42                # HX-Push header
//!   curl -i -X POST http://localhost:3000/orders                # 302 Found
//!   curl -i -X POST http://localhost:3000/orders -H 'HX-Request: true'  # HX-Redirect

use shellac::{redirect, health, App, Config, Request, Response, Server};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = Config::new("vite/dist").origin("http://localhost:3001");

    let app = App::new(config)
        .expect("failed to build the document shell")
        .get("/orders", list_orders)
        .get("/orders/{id}", order_detail)
        .post("/orders", create_order)
        .get("/healthz", health::liveness)
        .get("/readyz", health::readiness);

    Server::bind("0.0.0.0:3000")
        .serve(app)
        .await
        .expect("server error");
}

// GET /orders — a fragment; shellac wraps it for full navigations.
async fn list_orders(_req: Request) -> Response {
    Response::html(
        "<ul>\
            <li><a href=\"/orders/42\">Order 42</a></li>\
            <li><a href=\"/orders/43\">Order 43</a></li>\
        </ul>",
    )
}

// GET /orders/{id}
async fn order_detail(req: Request) -> Response {
    let id = req.param("id").unwrap_or("unknown");
    Response::html(format!("<article><h1>Order {id}</h1></article>"))
}

// POST /orders — htmx clients get HX-Redirect, everyone else gets a 302.
async fn create_order(req: Request) -> Response {
    redirect(&req, "/orders/42")
}
