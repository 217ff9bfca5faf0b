//! Development static file server with client-side caching disabled.
//!
//! Serves the current working directory over HTTP on a fixed port and
//! appends no-cache headers to every response, so a browser pointed at
//! locally edited files never shows a stale copy.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

pub mod handler;
pub mod http;
pub mod logger;
pub mod server;

/// Fixed listening port. Not configurable by design.
pub const PORT: u16 = 9000;

/// Which interfaces the listener binds to.
///
/// The two deployment variants of this server differ only in bind scope;
/// everything else is identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindScope {
    /// Bind `0.0.0.0`, reachable from any interface.
    Wildcard,
    /// Bind `127.0.0.1`, reachable from this machine only.
    Loopback,
}

impl BindScope {
    /// Socket address for this variant on the fixed port.
    #[must_use]
    pub const fn socket_addr(self) -> SocketAddr {
        let ip = match self {
            Self::Wildcard => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            Self::Loopback => IpAddr::V4(Ipv4Addr::LOCALHOST),
        };
        SocketAddr::new(ip, PORT)
    }
}
