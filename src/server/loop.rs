// Server loop module
// Sequential accept/serve loop: one connection is served to completion
// before the next is accepted, so waiting clients queue in the OS backlog.

use std::path::PathBuf;
use std::sync::Arc;

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::net::{TcpListener, TcpStream};

use crate::handler;
use crate::logger;

/// Accept and serve connections forever.
///
/// Never returns under normal operation; termination is an external signal.
/// Accept errors are logged and the loop continues.
pub async fn serve(listener: TcpListener, root: Arc<PathBuf>) {
    loop {
        match listener.accept().await {
            Ok((stream, peer_addr)) => handle_connection(stream, peer_addr, &root).await,
            Err(e) => logger::log_accept_error(&e),
        }
    }
}

/// Serve a single connection to completion with hyper HTTP/1.x.
async fn handle_connection(
    stream: TcpStream,
    peer_addr: std::net::SocketAddr,
    root: &Arc<PathBuf>,
) {
    let io = TokioIo::new(stream);
    let root = Arc::clone(root);

    let conn = http1::Builder::new().serve_connection(
        io,
        service_fn(move |req| {
            let root = Arc::clone(&root);
            async move { handler::serve_no_cache(req, root, peer_addr).await }
        }),
    );

    if let Err(err) = conn.await {
        logger::log_connection_error(&err);
    }
}
