//! The cached document shell.
//!
//! Built exactly once per process, before the server accepts traffic: read
//! the client's `index.html`, locate the mount element, replace its content
//! with a one-off marker, split the document on the marker, discard the
//! marker. After that the shell is two immutable strings, and composing a
//! full document is two concatenations — no per-request parsing, ever.
//!
//! A missing or unreadable shell is a configuration error; both surface as
//! startup failures from [`App::new`](crate::App::new), never as per-request
//! conditions.

use std::fs;
use std::path::Path;

use regex::Regex;
use tracing::debug;
use uuid::Uuid;

use crate::error::Error;

/// The parsed static document, split at the injection point.
///
/// Invariant: `prefix + body + suffix` is a structurally valid document for
/// any `body`. Shared read-only across all in-flight requests; write-once at
/// startup means no synchronization is needed.
#[derive(Debug)]
pub struct ShellDocument {
    prefix: String,
    suffix: String,
}

impl ShellDocument {
    /// Reads and splits the shell document. The single blocking read of the
    /// whole core — it happens before any request is accepted.
    pub fn from_file(path: &Path, selector: &str) -> Result<Self, Error> {
        let html = fs::read_to_string(path).map_err(|source| Error::ShellRead {
            path: path.to_owned(),
            source,
        })?;
        let shell = Self::from_html(&html, selector)?;
        debug!(
            path = %path.display(),
            prefix = shell.prefix.len(),
            suffix = shell.suffix.len(),
            "shell document split"
        );
        Ok(shell)
    }

    /// Splits an already-loaded document around the element whose `id`
    /// matches `selector` (`#main` and `main` are equivalent).
    ///
    /// The mount element must be a container element (`<main>`, `<div>`, …)
    /// that is explicitly closed.
    pub fn from_html(html: &str, selector: &str) -> Result<Self, Error> {
        let id = selector.strip_prefix('#').unwrap_or(selector);
        let missing = || Error::MountNotFound { selector: selector.to_owned() };

        let open_tag = Regex::new(&format!(
            r#"<([A-Za-z][A-Za-z0-9-]*)\b[^>]*\bid\s*=\s*["']{}["'][^>]*>"#,
            regex::escape(id)
        ))
        .expect("mount selector pattern");

        let caps = open_tag.captures(html).ok_or_else(missing)?;
        let (Some(whole), Some(tag)) = (caps.get(0), caps.get(1)) else {
            return Err(missing());
        };
        let content_start = whole.end();
        let content_end =
            element_end(html, tag.as_str(), content_start).ok_or_else(missing)?;

        // Stand the marker in for the element's content, then split the
        // serialized result on it. The marker never survives the split.
        let marker = format!("shellac-slot-{}", Uuid::new_v4());
        let staged = format!("{}{marker}{}", &html[..content_start], &html[content_end..]);
        let Some((prefix, suffix)) = staged.split_once(&marker) else {
            return Err(missing());
        };

        Ok(Self {
            prefix: prefix.to_owned(),
            suffix: suffix.to_owned(),
        })
    }

    /// `prefix + body + suffix` — the entire per-request composition cost.
    pub fn wrap(&self, body: &[u8]) -> Vec<u8> {
        let mut document =
            Vec::with_capacity(self.prefix.len() + body.len() + self.suffix.len());
        document.extend_from_slice(self.prefix.as_bytes());
        document.extend_from_slice(body);
        document.extend_from_slice(self.suffix.as_bytes());
        document
    }

    /// Everything before the injection point.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Everything after the injection point.
    pub fn suffix(&self) -> &str {
        &self.suffix
    }
}

/// Finds where the content of the element opened just before `start` ends,
/// skipping nested same-name elements. Returns the byte offset of the
/// matching `</tag>`.
fn element_end(html: &str, tag: &str, start: usize) -> Option<usize> {
    let open = format!("<{tag}");
    let close = format!("</{tag}>");
    let mut depth = 1usize;
    let mut cursor = start;
    loop {
        let rest = &html[cursor..];
        let next_close = rest.find(&close)?;

        // Same-name elements opened before that close deepen the nesting.
        let mut from = 0;
        while let Some(found) = rest[..next_close].get(from..).and_then(|s| s.find(&open)) {
            let after = from + found + open.len();
            let boundary = rest[after..]
                .chars()
                .next()
                .is_none_or(|c| !c.is_ascii_alphanumeric() && c != '-');
            if boundary {
                depth += 1;
            }
            from = after;
        }

        depth -= 1;
        if depth == 0 {
            return Some(cursor + next_close);
        }
        cursor += next_close + close.len();
    }
}
