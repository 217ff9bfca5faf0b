//! Wildcard variant: serves the current working directory on `0.0.0.0:9000`,
//! reachable from any network interface.

use nocache_serve::{server, BindScope};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    server::run(BindScope::Wildcard)
}
