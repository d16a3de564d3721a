//! HTTP server layer.
//!
//! A thin CORS-enabled static file server over one root directory. File
//! service (GET/HEAD, byte ranges, path sanitization) comes from
//! `tower_http::services::ServeDir`; this module adds the cross-origin
//! contract the hosted viewer needs and an explicit start/stop lifecycle.

pub mod routes;

pub use routes::create_router;

use std::net::SocketAddr;
use std::path::Path;

use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::error::ServerError;

// =============================================================================
// Server Handle
// =============================================================================

/// Handle to a running server, returned by [`start_server`].
///
/// Owning the handle is owning the server: there is no process-wide registry,
/// so several servers can run independently in one process (e.g. under test).
/// [`ServerHandle::stop`] shuts down gracefully and waits; dropping the
/// handle also triggers shutdown, without waiting.
#[derive(Debug)]
pub struct ServerHandle {
    addr: SocketAddr,
    shutdown_tx: oneshot::Sender<()>,
    task: JoinHandle<Result<(), std::io::Error>>,
}

impl ServerHandle {
    /// The address the server is actually bound to.
    ///
    /// Useful when the requested port was 0 and the OS picked one.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Stop accepting connections, close the listening socket and wait for
    /// the server task to finish.
    pub async fn stop(self) {
        let _ = self.shutdown_tx.send(());
        let _ = self.task.await;
        debug!("server stopped");
    }
}

// =============================================================================
// Startup
// =============================================================================

/// Bind `host:port` and start serving `root` in a background task.
///
/// The bind itself is the port-availability check: an `AddrInUse` failure is
/// reported as [`ServerError::PortInUse`] and no listener is left behind.
/// There is no separate probe, so there is no probe-to-bind race window.
pub async fn start_server(
    root: &Path,
    host: &str,
    port: u16,
    enable_tracing: bool,
) -> Result<ServerHandle, ServerError> {
    let addr = format!("{}:{}", host, port);

    let listener = TcpListener::bind(&addr).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::AddrInUse {
            ServerError::PortInUse { addr: addr.clone() }
        } else {
            ServerError::Bind {
                addr: addr.clone(),
                source: e,
            }
        }
    })?;

    let local_addr = listener.local_addr().map_err(|e| ServerError::Bind {
        addr: addr.clone(),
        source: e,
    })?;

    let router = create_router(root, enable_tracing);
    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    let task = tokio::spawn(async move {
        axum::serve(listener, router)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await
    });

    info!("Serving {} on http://{}", root.display(), local_addr);

    Ok(ServerHandle {
        addr: local_addr,
        shutdown_tx,
        task,
    })
}
