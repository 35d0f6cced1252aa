//! HTTP server implementation
//!
//! hyper http1 with TokioIo, one task per connection, manual method/path
//! dispatch. The server owns nothing domain-shaped: it hands requests to
//! the route layer, which reads and mutates through the archive service.

use bytes::Bytes;
use http_body_util::Full;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response};
use hyper_util::rt::TokioIo;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

use crate::archive::ArchiveService;
use crate::config::Args;
use crate::routes;
use crate::types::Result;

/// Shared application state
pub struct AppState {
    pub args: Args,
    /// Reconciliation service holding the current snapshot
    pub archive: Arc<ArchiveService>,
    /// Server start time for uptime reporting
    pub started_at: Instant,
}

impl AppState {
    /// Create state around an archive service
    pub fn new(args: Args, archive: Arc<ArchiveService>) -> Self {
        Self {
            args,
            archive,
            started_at: Instant::now(),
        }
    }
}

/// Start the HTTP server
pub async fn run(state: Arc<AppState>) -> Result<()> {
    let listener = TcpListener::bind(state.args.listen).await?;

    info!("Diiwaan listening on {}", state.args.listen);
    if state.args.dev_mode {
        warn!("Development mode enabled - admin authentication disabled");
    }

    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                let state = Arc::clone(&state);
                tokio::spawn(async move {
                    let io = TokioIo::new(stream);

                    let service = service_fn(move |req| {
                        let state = Arc::clone(&state);
                        async move { handle_request(state, req).await }
                    });

                    if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                        error!("Error serving connection from {}: {:?}", addr, err);
                    }
                });
            }
            Err(e) => {
                error!("Error accepting connection: {:?}", e);
            }
        }
    }
}

/// Route incoming HTTP requests
async fn handle_request(
    state: Arc<AppState>,
    req: Request<Incoming>,
) -> std::result::Result<Response<Full<Bytes>>, hyper::Error> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let query = req.uri().query().unwrap_or("").to_string();

    debug!(%method, %path, "request");

    let response = match (method.clone(), path.as_str()) {
        // Liveness probe
        (Method::GET, "/health") | (Method::GET, "/healthz") => {
            routes::health_check(Arc::clone(&state)).await
        }

        // Admin mutation API (consumes the request body)
        _ if path.starts_with("/api/v1/admin") => {
            routes::handle_admin_request(Arc::clone(&state), req).await
        }

        // Public read API
        _ if path.starts_with("/api/v1/") => {
            routes::handle_api_request(Arc::clone(&state), &method, &path, &query).await
        }

        _ => routes::not_found_response(&path),
    };

    Ok(response)
}
