//! Logger module
//!
//! Startup banner, per-request access lines, and error output. Access lines
//! follow the Common Log Format with local timestamps.

use chrono::Local;
use std::net::SocketAddr;

/// Announce the bound address and the caching behavior.
///
/// Exactly two lines on stdout; this is the server's only startup output.
pub fn log_server_start(addr: &SocketAddr) {
    println!(
        "Serving HTTP on {} port {} (http://{addr}/) ...",
        addr.ip(),
        addr.port()
    );
    println!("Cache-Control headers disabled for development");
}

/// Log one completed request in Common Log Format.
///
/// `$remote_addr - - [$time_local] "$method $path HTTP/$version" $status $bytes`
pub fn log_request(
    peer_addr: &SocketAddr,
    method: &hyper::Method,
    path: &str,
    version: hyper::Version,
    status: u16,
    body_bytes: usize,
) {
    let version = match version {
        hyper::Version::HTTP_10 => "1.0",
        hyper::Version::HTTP_2 => "2",
        _ => "1.1",
    };
    println!(
        "{} - - [{}] \"{} {} HTTP/{}\" {} {}",
        peer_addr.ip(),
        Local::now().format("%d/%b/%Y:%H:%M:%S %z"),
        method,
        path,
        version,
        status,
        body_bytes,
    );
}

pub fn log_accept_error(err: &std::io::Error) {
    eprintln!("[ERROR] Failed to accept connection: {err}");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    eprintln!("[ERROR] Failed to serve connection: {err:?}");
}

pub fn log_error(message: &str) {
    eprintln!("[ERROR] {message}");
}

pub fn log_warning(message: &str) {
    eprintln!("[WARN] {message}");
}
