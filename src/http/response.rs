//! HTTP response building module
//!
//! Builders for the status codes the file server emits. None of these set
//! cache headers; the no-cache hook appends those to every response after
//! the handler returns.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

/// Build 200 response for a full file body
pub fn build_file_response(data: Bytes, content_type: &str, is_head: bool) -> Response<Full<Bytes>> {
    let content_length = data.len();
    let body = if is_head { Bytes::new() } else { data };

    Response::builder()
        .status(200)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .header("Accept-Ranges", "bytes")
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 206 Partial Content response
pub fn build_partial_response(
    data: Bytes,
    content_type: &str,
    start: usize,
    end: usize,
    total_size: usize,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let content_length = end - start + 1;
    let body = if is_head { Bytes::new() } else { data };

    Response::builder()
        .status(206)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .header("Content-Range", format!("bytes {start}-{end}/{total_size}"))
        .header("Accept-Ranges", "bytes")
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("206", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build generic HTML response (directory listings)
pub fn build_html_response(content: String, is_head: bool) -> Response<Full<Bytes>> {
    let content_length = content.len();
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(content)
    };

    Response::builder()
        .status(200)
        .header("Content-Type", "text/html; charset=utf-8")
        .header("Content-Length", content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("HTML", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 301 redirect response (directory requested without trailing slash)
pub fn build_redirect_response(target: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(301)
        .header("Location", target)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("Moved Permanently")))
        .unwrap_or_else(|e| {
            log_build_error("301", &e);
            Response::new(Full::new(Bytes::from("Moved Permanently")))
        })
}

/// Build 404 Not Found response
pub fn build_404_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(404)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("404 Not Found")))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            Response::new(Full::new(Bytes::from("404 Not Found")))
        })
}

/// Build 405 Method Not Allowed response
pub fn build_405_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(405)
        .header("Content-Type", "text/plain")
        .header("Allow", "GET, HEAD")
        .body(Full::new(Bytes::from("405 Method Not Allowed")))
        .unwrap_or_else(|e| {
            log_build_error("405", &e);
            Response::new(Full::new(Bytes::from("405 Method Not Allowed")))
        })
}

/// Build 416 Range Not Satisfiable response
pub fn build_416_response(file_size: usize) -> Response<Full<Bytes>> {
    Response::builder()
        .status(416)
        .header("Content-Type", "text/plain")
        .header("Content-Range", format!("bytes */{file_size}"))
        .body(Full::new(Bytes::from("Range Not Satisfiable")))
        .unwrap_or_else(|e| {
            log_build_error("416", &e);
            Response::new(Full::new(Bytes::from("Range Not Satisfiable")))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_response_head_drops_body() {
        let resp = build_file_response(Bytes::from_static(b"hello"), "text/plain", true);
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers().get("Content-Length").unwrap(), "5");
        assert_eq!(resp.headers().get("Accept-Ranges").unwrap(), "bytes");
    }

    #[test]
    fn partial_response_has_content_range() {
        let resp =
            build_partial_response(Bytes::from_static(b"ell"), "text/plain", 1, 3, 5, false);
        assert_eq!(resp.status(), 206);
        assert_eq!(resp.headers().get("Content-Range").unwrap(), "bytes 1-3/5");
        assert_eq!(resp.headers().get("Content-Length").unwrap(), "3");
    }

    #[test]
    fn redirect_sets_location() {
        let resp = build_redirect_response("/subdir/");
        assert_eq!(resp.status(), 301);
        assert_eq!(resp.headers().get("Location").unwrap(), "/subdir/");
    }

    #[test]
    fn not_allowed_lists_methods() {
        let resp = build_405_response();
        assert_eq!(resp.status(), 405);
        assert_eq!(resp.headers().get("Allow").unwrap(), "GET, HEAD");
    }
}
