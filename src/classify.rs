//! Request classification.
//!
//! Every request maps to exactly one [`RenderMode`] — the decision the
//! composer and the redirect operation key on. Classification is a pure
//! function of method, path, and three htmx marker headers; it runs once,
//! when the [`Request`](crate::Request) is constructed, and the result rides
//! on the request for its lifetime.
//!
//! The three reserved request headers:
//!
//! | Header | Meaning |
//! |---|---|
//! | [`HX_REQUEST`] | the client asks for a fragment, not a full navigation |
//! | [`HX_HISTORY_RESTORE_REQUEST`] | the client replays local history and needs the full document again |
//! | [`HX_BOOSTED`] | a boosted navigation — carries `hx-request`, still wants the full document |

use std::sync::LazyLock;

use http::{HeaderMap, Method};
use regex::Regex;

/// Marker header: this is a partial-update request.
pub const HX_REQUEST: &str = "hx-request";

/// Marker header: the client is restoring a prior state from its local
/// history cache.
pub const HX_HISTORY_RESTORE_REQUEST: &str = "hx-history-restore-request";

/// Marker header: a boosted navigation. Forces full-document treatment even
/// though the request also carries [`HX_REQUEST`].
pub const HX_BOOSTED: &str = "hx-boosted";

/// Trailing dot-extension on the last path segment (`.js`, `.css`, `.png`).
/// Purely syntactic — no content-type lookup.
static ASSET_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.\w+$").expect("asset pattern"));

/// How the response body for a request must be treated on its way out.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RenderMode {
    /// Wrap the handler output in the cached shell.
    FullDocument,
    /// The handler output already is the final payload.
    Fragment,
    /// Do not inspect or rewrite the body at all.
    Passthrough,
}

/// The classifier result, computed once per request.
#[derive(Clone, Copy, Debug)]
pub struct Classification {
    pub mode: RenderMode,
    /// The request carries the partial-update marker. Also set on non-GET
    /// requests, where it drives redirect decoration but never wrapping.
    pub is_partial: bool,
    /// The request carries the history-restore marker.
    pub is_history_restore: bool,
}

/// Classifies one request. Total: absent or malformed headers read as their
/// false interpretation — presence of the marker header is what counts.
pub(crate) fn classify(method: &Method, path: &str, headers: &HeaderMap) -> Classification {
    let is_get = method == Method::GET;
    let is_asset = ASSET_PATTERN.is_match(path);
    let is_partial = headers.contains_key(HX_REQUEST);
    let is_history_restore = headers.contains_key(HX_HISTORY_RESTORE_REQUEST);
    let is_boosted = headers.contains_key(HX_BOOSTED);

    // One decision table, first match wins. Precedence: only GET bodies are
    // ever rewritten; a static-asset path beats any header; a partial request
    // stays a fragment only if it is neither a history replay nor boosted.
    let mode = match (is_get, is_asset, is_partial, is_history_restore, is_boosted) {
        (false, ..) => RenderMode::Passthrough,
        (true, true, ..) => RenderMode::Passthrough,
        (true, false, true, false, false) => RenderMode::Fragment,
        (true, false, ..) => RenderMode::FullDocument,
    };

    Classification { mode, is_partial, is_history_restore }
}
