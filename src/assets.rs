//! Static asset responder.
//!
//! Serves built client files straight out of `dist` for Passthrough GET
//! requests that no route claims. Media types come from a syntactic
//! extension table — the same judgement the classifier already made.

use std::path::Path;

use tracing::debug;

use crate::response::Response;

/// Reads `dist/{path}` and builds a response for it. `None` when the file
/// does not exist, is unreadable, or the path tries to escape `dist`.
pub(crate) async fn serve(dist: &Path, path: &str) -> Option<Response> {
    let relative = path.trim_start_matches('/');
    // Reject parent-directory traversal outright.
    if relative.split('/').any(|segment| segment == "..") {
        return None;
    }

    let file = dist.join(relative);
    let body = tokio::fs::read(&file).await.ok()?;
    debug!(file = %file.display(), bytes = body.len(), "serving asset");
    Some(Response::with_type(media_type_for(&file), body))
}

fn media_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match extension.as_str() {
        "css" => "text/css",
        "gif" => "image/gif",
        "html" => "text/html; charset=utf-8",
        "ico" => "image/x-icon",
        "jpeg" | "jpg" => "image/jpeg",
        "js" | "mjs" => "text/javascript",
        "json" | "map" => "application/json",
        "png" => "image/png",
        "svg" => "image/svg+xml",
        "txt" => "text/plain; charset=utf-8",
        "wasm" => "application/wasm",
        "webp" => "image/webp",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn media_types_by_extension() {
        assert_eq!(media_type_for(&PathBuf::from("app.js")), "text/javascript");
        assert_eq!(media_type_for(&PathBuf::from("site.CSS")), "text/css");
        assert_eq!(media_type_for(&PathBuf::from("logo.svg")), "image/svg+xml");
        assert_eq!(
            media_type_for(&PathBuf::from("blob.bin")),
            "application/octet-stream"
        );
    }

    #[tokio::test]
    async fn serves_a_file_with_its_media_type() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("app.js"), b"var x = 1;").unwrap();

        let res = serve(dir.path(), "/app.js").await.unwrap();
        assert_eq!(res.body(), b"var x = 1;");
        assert_eq!(res.header("content-type"), Some("text/javascript"));
    }

    #[tokio::test]
    async fn missing_files_are_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(serve(dir.path(), "/nope.js").await.is_none());
    }

    #[tokio::test]
    async fn parent_traversal_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("secret.txt"), b"x").unwrap();
        assert!(serve(dir.path(), "/../secret.txt").await.is_none());
        assert!(serve(dir.path(), "/a/../../secret.txt").await.is_none());
    }
}
