//! The response composer.
//!
//! Runs once per request, after the handler has produced its complete body
//! and before the response is converted for the transport. The classifier
//! already decided everything; the composer only executes the decision:
//! pass a fragment or asset through, or wrap a full navigation in the
//! cached shell. No streaming, no diffing, one structural transform.

use http::StatusCode;
use tracing::debug;

use crate::classify::RenderMode;
use crate::config::Config;
use crate::navigate;
use crate::request::Request;
use crate::response::Response;
use crate::shell::ShellDocument;

/// What the composer needs to know about a request, captured before the
/// request value moves into the handler.
pub(crate) struct ComposeContext {
    mode: RenderMode,
    path: String,
    /// Decoded `url` query parameter — the deep-link target, if any.
    deep_link: Option<String>,
}

impl ComposeContext {
    pub(crate) fn of(req: &Request) -> Self {
        Self {
            mode: req.mode(),
            path: req.path().to_owned(),
            deep_link: req.query_param("url"),
        }
    }
}

/// Applies the render-mode decision to a finished response. Idempotent: a
/// response that has already been composed passes through unchanged.
pub(crate) fn compose(
    shell: &ShellDocument,
    config: &Config,
    ctx: &ComposeContext,
    mut res: Response,
) -> Response {
    if res.composed {
        return res;
    }
    res.composed = true;

    match ctx.mode {
        RenderMode::Passthrough => res,
        RenderMode::Fragment => {
            if wants_deep_link_tail(config, ctx, &res) {
                if let Some(url) = &ctx.deep_link {
                    let tail = format!(
                        r#"<div hx-get="{}" hx-trigger="load" hx-target="{}" hx-swap="innerHTML"></div>"#,
                        attr_escape(url),
                        attr_escape(&config.main_selector),
                    );
                    debug!(url = %url, "appending deep-link tail");
                    res.body.extend_from_slice(tail.as_bytes());
                }
            }
            res
        }
        RenderMode::FullDocument => {
            // Bodiless statuses stay bodiless: a protocol redirect must leave
            // as a plain protocol redirect.
            if res.status.is_redirection()
                || res.status == StatusCode::NO_CONTENT
                || res.status == StatusCode::NOT_MODIFIED
            {
                return res;
            }
            res.body = shell.wrap(&res.body);
            res.set_content_type("text/html; charset=utf-8");
            res
        }
    }
}

/// The deep-link tail applies only to successful fragments of the app shell
/// itself, and never when the response already redirects the client.
fn wants_deep_link_tail(config: &Config, ctx: &ComposeContext, res: &Response) -> bool {
    ctx.path == config.app_url
        && res.status.is_success()
        && res.header(navigate::HX_REDIRECT).is_none()
}

fn attr_escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use http::{HeaderMap, HeaderValue, Method};

    const SHELL: &str =
        r#"<html><head></head><body><main id="main">spinner</main></body></html>"#;

    fn shell() -> ShellDocument {
        ShellDocument::from_html(SHELL, "#main").unwrap()
    }

    fn ctx(method: Method, target: &str, partial: bool) -> ComposeContext {
        let mut headers = HeaderMap::new();
        if partial {
            headers.insert("hx-request", HeaderValue::from_static("true"));
        }
        ComposeContext::of(&Request::new(method, target, headers, Bytes::new()))
    }

    #[test]
    fn passthrough_leaves_the_body_byte_identical() {
        let body = b"var x = 1;".to_vec();
        let res = Response::with_type("text/javascript", body.clone());
        let res = compose(&shell(), &Config::new("dist"), &ctx(Method::GET, "/app.js", false), res);
        assert_eq!(res.body(), body.as_slice());
        assert_eq!(res.header("content-type"), Some("text/javascript"));
    }

    #[test]
    fn fragment_leaves_the_body_untouched() {
        let res = Response::html("<p>fragment</p>");
        let res = compose(&shell(), &Config::new("dist"), &ctx(Method::GET, "/orders", true), res);
        assert_eq!(res.body(), b"<p>fragment</p>");
    }

    #[test]
    fn full_document_wraps_and_forces_html() {
        let sh = shell();
        let res = Response::json(b"<p>not json after all</p>".to_vec());
        let res = compose(&sh, &Config::new("dist"), &ctx(Method::GET, "/orders", false), res);

        let expected = format!("{}<p>not json after all</p>{}", sh.prefix(), sh.suffix());
        assert_eq!(res.body(), expected.as_bytes());
        assert_eq!(res.header("content-type"), Some("text/html; charset=utf-8"));
    }

    #[test]
    fn empty_body_wraps_to_the_bare_shell() {
        let sh = shell();
        let res = Response::status(StatusCode::OK);
        let res = compose(&sh, &Config::new("dist"), &ctx(Method::GET, "/", false), res);
        let expected = format!("{}{}", sh.prefix(), sh.suffix());
        assert_eq!(res.body(), expected.as_bytes());
    }

    #[test]
    fn composing_twice_is_a_no_op() {
        let sh = shell();
        let config = Config::new("dist");
        let context = ctx(Method::GET, "/orders", false);

        let once = compose(&sh, &config, &context, Response::html("<p>x</p>"));
        let body_after_once = once.body().to_vec();
        let twice = compose(&sh, &config, &context, once);
        assert_eq!(twice.body(), body_after_once.as_slice());
    }

    #[test]
    fn protocol_redirects_are_not_wrapped() {
        let res = Response::builder()
            .status(StatusCode::FOUND)
            .header("location", "/orders/42")
            .no_body();
        let res = compose(&shell(), &Config::new("dist"), &ctx(Method::GET, "/old", false), res);
        assert!(res.body().is_empty());
        assert_eq!(res.header("location"), Some("/orders/42"));
        assert_eq!(res.status_code(), StatusCode::FOUND);
    }

    #[test]
    fn deep_link_fragment_gets_the_tail() {
        let res = Response::html("<div id=\"app-root\"></div>");
        let res = compose(
            &shell(),
            &Config::new("dist"),
            &ctx(Method::GET, "/app?url=%2Forders%2F42", true),
            res,
        );
        let body = String::from_utf8(res.body().to_vec()).unwrap();
        assert!(body.starts_with("<div id=\"app-root\"></div>"));
        assert!(body.ends_with(
            r##"<div hx-get="/orders/42" hx-trigger="load" hx-target="#main" hx-swap="innerHTML"></div>"##
        ));
    }

    #[test]
    fn deep_link_tail_escapes_the_url() {
        let res = Response::html("");
        let res = compose(
            &shell(),
            &Config::new("dist"),
            &ctx(Method::GET, "/app?url=/a%22b%3Cc%26d", true),
            res,
        );
        let body = String::from_utf8(res.body().to_vec()).unwrap();
        assert!(body.contains(r#"hx-get="/a&quot;b&lt;c&amp;d""#));
    }

    #[test]
    fn deep_link_needs_the_app_path_and_the_url_param() {
        let config = Config::new("dist");
        // Wrong path: no tail.
        let res = compose(
            &shell(),
            &config,
            &ctx(Method::GET, "/other?url=%2Ffoo", true),
            Response::html("<p>x</p>"),
        );
        assert_eq!(res.body(), b"<p>x</p>");
        // App path without the param: no tail.
        let res = compose(
            &shell(),
            &config,
            &ctx(Method::GET, "/app", true),
            Response::html("<p>x</p>"),
        );
        assert_eq!(res.body(), b"<p>x</p>");
    }
}
