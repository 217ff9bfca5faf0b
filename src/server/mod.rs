// Server module entry point
// Listener creation and the blocking run loop for one bind variant.

pub mod listener;

// `loop` is a keyword, so the module gets an explicit path.
#[path = "loop.rs"]
pub mod serve_loop;

pub use listener::create_listener;
pub use serve_loop::serve;

use crate::{logger, BindScope};
use std::sync::Arc;

/// Run one server variant to completion.
///
/// Serves the current working directory on the variant's fixed address.
/// Returns only on a fatal startup error (bind failure, missing cwd); the
/// steady state is the unbounded serve loop.
pub fn run(scope: BindScope) -> Result<(), Box<dyn std::error::Error>> {
    let root = std::env::current_dir()?;

    // Sequential, connection-at-a-time serving: a single-threaded runtime
    // is all the concurrency this server has.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async move {
        let listener = create_listener(scope.socket_addr())?;
        logger::log_server_start(&listener.local_addr()?);
        serve(listener, Arc::new(root)).await;
        Ok(())
    })
}
