//! Client-side navigation signaling.
//!
//! Two request-triggered behaviors, both keyed on the classifier:
//!
//! - **Push-route synthesis** — `GET /push/orders/42` never reaches a
//!   handler; it answers immediately with `hx-push: /orders/42` and an empty
//!   body, telling the client router to update its visible URL.
//! - **Mode-aware redirect** — [`redirect`] picks between an `hx-redirect`
//!   header (partial-update requests: the client router navigates without a
//!   reload) and a protocol-level `302 Found` (full navigations: non-scripted
//!   clients follow `Location`). Picking the wrong variant either strands
//!   non-JS clients on an ignored header or shoves a protocol redirect into a
//!   fragment swap; this bifurcation is the whole point.

use http::StatusCode;

use crate::request::Request;
use crate::response::Response;

/// Response header: push this path into the client's browser history.
pub const HX_PUSH: &str = "hx-push";

/// Response header: perform a client-side redirect to this path.
pub const HX_REDIRECT: &str = "hx-redirect";

/// Reserved path prefix for push-route synthesis.
pub(crate) const PUSH_PREFIX: &str = "/push";

/// Returns the push destination when `path` is a push route. The prefix
/// alone maps to root; `/pushx` is not a push route.
pub(crate) fn push_target(path: &str) -> Option<&str> {
    let rest = path.strip_prefix(PUSH_PREFIX)?;
    if rest.is_empty() {
        Some("/")
    } else if rest.starts_with('/') {
        Some(rest)
    } else {
        None
    }
}

/// The synthesized push acknowledgement: empty body, destination in the
/// [`HX_PUSH`] header. Bypasses the composer.
pub(crate) fn push_response(destination: &str) -> Response {
    Response::builder().header(HX_PUSH, destination).no_body()
}

/// Redirects to `location` in whichever way the current request can follow.
///
/// ```rust
/// use shellac::{redirect, Request, Response};
///
/// async fn create_order(req: Request) -> Response {
///     // ... persist the order ...
///     redirect(&req, "/orders/42")
/// }
/// ```
pub fn redirect(req: &Request, location: &str) -> Response {
    if req.is_partial() {
        Response::builder().header(HX_REDIRECT, location).no_body()
    } else {
        Response::builder()
            .status(StatusCode::FOUND)
            .header("location", location)
            .no_body()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use http::{HeaderMap, HeaderValue, Method};

    #[test]
    fn push_target_strips_the_prefix() {
        assert_eq!(push_target("/push/orders/42"), Some("/orders/42"));
        assert_eq!(push_target("/push/"), Some("/"));
    }

    #[test]
    fn push_prefix_alone_maps_to_root() {
        assert_eq!(push_target("/push"), Some("/"));
    }

    #[test]
    fn similar_paths_are_not_push_routes() {
        assert_eq!(push_target("/pushx"), None);
        assert_eq!(push_target("/pus"), None);
        assert_eq!(push_target("/orders/push"), None);
    }

    #[test]
    fn push_response_is_empty_with_the_header() {
        let res = push_response("/orders/42");
        assert_eq!(res.status_code(), StatusCode::OK);
        assert_eq!(res.header(HX_PUSH), Some("/orders/42"));
        assert!(res.body().is_empty());
    }

    #[test]
    fn partial_request_gets_a_client_redirect() {
        let mut headers = HeaderMap::new();
        headers.insert("hx-request", HeaderValue::from_static("true"));
        let req = Request::new(Method::GET, "/orders", headers, Bytes::new());

        let res = redirect(&req, "/orders/42");
        assert_eq!(res.status_code(), StatusCode::OK);
        assert_eq!(res.header(HX_REDIRECT), Some("/orders/42"));
        assert_eq!(res.header("location"), None);
        assert!(res.body().is_empty());
    }

    #[test]
    fn full_navigation_gets_a_protocol_redirect() {
        let req = Request::new(Method::GET, "/orders", HeaderMap::new(), Bytes::new());

        let res = redirect(&req, "/orders/42");
        assert_eq!(res.status_code(), StatusCode::FOUND);
        assert_eq!(res.header("location"), Some("/orders/42"));
        assert_eq!(res.header(HX_REDIRECT), None);
    }

    #[test]
    fn partial_form_post_still_gets_the_client_redirect() {
        let mut headers = HeaderMap::new();
        headers.insert("hx-request", HeaderValue::from_static("true"));
        let req = Request::new(Method::POST, "/orders", headers, Bytes::new());

        let res = redirect(&req, "/orders/42");
        assert_eq!(res.header(HX_REDIRECT), Some("/orders/42"));
    }
}
