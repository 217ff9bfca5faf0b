//! Static file serving module
//!
//! Maps request paths to files under the serve root, with percent-decoding,
//! a traversal guard, index-file lookup, and Range support.

use crate::handler::listing;
use crate::handler::RequestContext;
use crate::http::{self, mime, range::RangeOutcome};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Index files tried when a directory is requested, in order.
const INDEX_FILES: &[&str] = &["index.html", "index.htm"];

/// Serve a GET/HEAD request from the given root directory.
pub async fn serve(ctx: &RequestContext<'_>, root: &Path) -> Response<Full<Bytes>> {
    let Some(decoded) = percent_decode(ctx.path) else {
        return http::build_404_response();
    };

    let Some(fs_path) = resolve_under_root(root, &decoded) else {
        return http::build_404_response();
    };

    if fs_path.is_dir() {
        // Browsers resolve relative links against the directory only when
        // the URL ends with a slash, so redirect first.
        if !ctx.path.ends_with('/') {
            return http::build_redirect_response(&format!("{}/", ctx.path));
        }

        for index_file in INDEX_FILES {
            let index_path = fs_path.join(index_file);
            if index_path.is_file() {
                return serve_file(ctx, &index_path).await;
            }
        }

        return serve_listing(ctx, &fs_path, &decoded).await;
    }

    serve_file(ctx, &fs_path).await
}

/// Resolve a decoded request path to a canonical location under `root`.
///
/// `..` segments never climb above the root, and the canonicalized result
/// must stay inside the canonicalized root (symlinks included). Missing
/// files fail canonicalization and resolve to `None` (404).
fn resolve_under_root(root: &Path, decoded_path: &str) -> Option<PathBuf> {
    if decoded_path.contains('\0') {
        return None;
    }

    let mut fs_path = root.to_path_buf();
    let mut depth: usize = 0;
    for segment in decoded_path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if depth > 0 {
                    fs_path.pop();
                    depth -= 1;
                }
            }
            name => {
                fs_path.push(name);
                depth += 1;
            }
        }
    }

    let root_canonical = match root.canonicalize() {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Serve root not found or inaccessible '{}': {e}",
                root.display()
            ));
            return None;
        }
    };

    let canonical = fs_path.canonicalize().ok()?;
    if !canonical.starts_with(&root_canonical) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {} -> {}",
            decoded_path,
            canonical.display()
        ));
        return None;
    }

    Some(canonical)
}

/// Serve a regular file, honoring a single-range `Range` header.
async fn serve_file(ctx: &RequestContext<'_>, file_path: &Path) -> Response<Full<Bytes>> {
    let content = match fs::read(file_path).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read file '{}': {e}",
                file_path.display()
            ));
            return http::build_404_response();
        }
    };

    let content_type = mime::get_content_type(file_path.extension().and_then(|e| e.to_str()));
    let total_size = content.len();

    match http::parse_range_header(ctx.range_header.as_deref(), total_size) {
        RangeOutcome::Satisfiable(range) => {
            let start = range.start;
            let end = range.end_position(total_size);
            let body = Bytes::from(content[start..=end].to_vec());
            http::build_partial_response(body, content_type, start, end, total_size, ctx.is_head)
        }
        RangeOutcome::Unsatisfiable => http::build_416_response(total_size),
        RangeOutcome::Ignored => {
            http::build_file_response(Bytes::from(content), content_type, ctx.is_head)
        }
    }
}

/// Serve an HTML listing of a directory without an index file.
async fn serve_listing(
    ctx: &RequestContext<'_>,
    dir_path: &Path,
    request_path: &str,
) -> Response<Full<Bytes>> {
    match listing::collect_entries(dir_path).await {
        Ok(entries) => {
            let html = listing::render(request_path, &entries);
            http::build_html_response(html, ctx.is_head)
        }
        Err(e) => {
            logger::log_error(&format!(
                "Failed to list directory '{}': {e}",
                dir_path.display()
            ));
            http::build_404_response()
        }
    }
}

/// Decode `%XX` escapes; `None` when an escape is malformed or the result
/// is not valid UTF-8.
fn percent_decode(input: &str) -> Option<String> {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hi = hex_digit(*bytes.get(i + 1)?)?;
            let lo = hex_digit(*bytes.get(i + 2)?)?;
            out.push(hi * 16 + lo);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).ok()
}

const fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
