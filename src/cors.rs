//! Cross-origin negotiation for the app dev server.
//!
//! Active only when an `origin` is configured. The allow and expose lists
//! are the htmx vocabulary: the client sends its marker headers cross-origin
//! during development, and must be able to read the navigation headers back.

use http::StatusCode;

use crate::response::Response;

const ALLOW_METHODS: &str = "GET, PUT, POST, DELETE, PATCH, HEAD";

const ALLOW_HEADERS: &str = "Content-Type, Authorization, HX-Boosted, \
    HX-Current-URL, HX-History-Restore-Request, HX-Prompt, HX-Request, \
    HX-Target, HX-Trigger, HX-Trigger-Name";

const EXPOSE_HEADERS: &str = "HX-Push, HX-Redirect, HX-Refresh, HX-Retarget, \
    HX-Trigger, HX-Trigger-After-Swap, HX-Trigger-After-Settle";

/// Answers an OPTIONS preflight.
pub(crate) fn preflight(origin: &str) -> Response {
    Response::builder()
        .status(StatusCode::NO_CONTENT)
        .header("access-control-allow-origin", origin)
        .header("access-control-allow-methods", ALLOW_METHODS)
        .header("access-control-allow-headers", ALLOW_HEADERS)
        .header("access-control-allow-credentials", "true")
        .no_body()
}

/// Decorates an outgoing response so the dev client can read it.
pub(crate) fn apply(mut res: Response, origin: &str) -> Response {
    if res.header("access-control-allow-origin").is_some() {
        return res;
    }
    for (name, value) in [
        ("access-control-allow-origin", origin),
        ("access-control-allow-credentials", "true"),
        ("access-control-expose-headers", EXPOSE_HEADERS),
        ("vary", "origin"),
    ] {
        res.headers.push((name.to_owned(), value.to_owned()));
    }
    res
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preflight_carries_the_allow_lists() {
        let res = preflight("http://localhost:3001");
        assert_eq!(res.status_code(), StatusCode::NO_CONTENT);
        assert_eq!(
            res.header("access-control-allow-origin"),
            Some("http://localhost:3001")
        );
        assert!(res
            .header("access-control-allow-headers")
            .unwrap()
            .contains("HX-Request"));
        assert!(res.body().is_empty());
    }

    #[test]
    fn apply_exposes_the_navigation_headers() {
        let res = apply(Response::html("<p>x</p>"), "http://localhost:3001");
        assert!(res
            .header("access-control-expose-headers")
            .unwrap()
            .contains("HX-Push"));
        assert_eq!(res.header("vary"), Some("origin"));
    }

    #[test]
    fn apply_does_not_double_decorate() {
        let res = apply(preflight("http://localhost:3001"), "http://localhost:3001");
        let count = res
            .headers
            .iter()
            .filter(|(key, _)| key == "access-control-allow-origin")
            .count();
        assert_eq!(count, 1);
    }
}
