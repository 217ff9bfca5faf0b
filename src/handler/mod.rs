//! Request handler module
//!
//! Entry point for HTTP request processing: method validation, static file
//! resolution, and the no-cache decorator applied to every response.

pub mod listing;
pub mod static_files;

use crate::http;
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    pub path: &'a str,
    pub is_head: bool,
    pub range_header: Option<String>,
}

/// Serve a request and unconditionally append the no-cache headers.
///
/// This is the decorator the server mounts: the base handler produces a
/// response for any request (success or error), and the triplet is appended
/// after its headers, exactly once, with no exempt code path.
pub async fn serve_no_cache<B>(
    req: Request<B>,
    root: Arc<PathBuf>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let mut response = handle_request(req, root, peer_addr).await?;
    http::nocache::apply(&mut response);
    Ok(response)
}

/// Base file-server behavior: map the path to a file, directory listing,
/// or error response. Sets no cache headers itself.
pub async fn handle_request<B>(
    req: Request<B>,
    root: Arc<PathBuf>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method().clone();
    let version = req.version();
    let path = req.uri().path().to_string();
    let is_head = method == Method::HEAD;

    let response = if matches!(method, Method::GET | Method::HEAD) {
        let ctx = RequestContext {
            path: &path,
            is_head,
            range_header: req
                .headers()
                .get("range")
                .and_then(|v| v.to_str().ok())
                .map(ToString::to_string),
        };
        static_files::serve(&ctx, &root).await
    } else {
        logger::log_warning(&format!("Method not allowed: {method}"));
        http::build_405_response()
    };

    let body_bytes = response
        .headers()
        .get("Content-Length")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);
    logger::log_request(
        &peer_addr,
        &method,
        &path,
        version,
        response.status().as_u16(),
        body_bytes,
    );

    Ok(response)
}
