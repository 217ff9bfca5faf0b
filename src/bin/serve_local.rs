//! Loopback variant: serves the current working directory on `127.0.0.1:9000`,
//! reachable from this machine only.

use nocache_serve::{server, BindScope};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    server::run(BindScope::Loopback)
}
