//! HTTP front end for the rack service
//!
//! | Route | Method | Description |
//! |-------|--------|-------------|
//! | `/v1/api/rack?weight=N` | GET | Load `N` lb using the configured equipment |
//! | `/v1/api/rack` | POST | Load `desiredWeight` using the plates in the JSON body |
//! | `/`, `/health`, `/status`, `/v1/api/health` | GET | Liveness |

pub mod http;
pub mod routes;

pub use http::{Request, Response};
pub use routes::route;

use crate::error::{RackError, RackResult};
use crate::service::RackService;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::io::{AsyncRead, AsyncWrite, BufReader};
use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

/// How long a client may take to send its request
pub const READ_TIMEOUT: Duration = Duration::from_secs(10);

/// Bound listener plus the shared service
pub struct Server {
    listener: TcpListener,
    service: Arc<RackService>,
}

impl Server {
    /// Bind to `addr` (`host:port`; port 0 picks a free one)
    pub async fn bind(addr: &str, service: Arc<RackService>) -> RackResult<Self> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| RackError::io(format!("binding {}", addr), e))?;
        Ok(Self { listener, service })
    }

    pub fn local_addr(&self) -> RackResult<SocketAddr> {
        self.listener
            .local_addr()
            .map_err(|e| RackError::io("reading listener address", e))
    }

    /// Serve until Ctrl-C
    pub async fn run(self) -> RackResult<()> {
        self.run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("Failed to listen for shutdown signal: {}", e);
                std::future::pending::<()>().await;
            }
        })
        .await
    }

    /// Serve until `shutdown` resolves
    pub async fn run_until(self, shutdown: impl Future<Output = ()>) -> RackResult<()> {
        info!("Listening on {}", self.local_addr()?);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Shutting down");
                    return Ok(());
                }
                accepted = self.listener.accept() => match accepted {
                    Ok((stream, peer)) => {
                        let service = Arc::clone(&self.service);
                        tokio::spawn(async move {
                            if let Err(e) = handle_connection(stream, service).await {
                                debug!("Connection from {} failed: {}", peer, e);
                            }
                        });
                    }
                    Err(e) => warn!("Accept failed: {}", e),
                },
            }
        }
    }
}

async fn handle_connection<S>(stream: S, service: Arc<RackService>) -> RackResult<()>
where
    S: AsyncRead + AsyncWrite,
{
    let started = Instant::now();
    let (read_half, mut write_half) = tokio::io::split(stream);
    let mut reader = BufReader::new(read_half);

    let read = tokio::time::timeout(READ_TIMEOUT, Request::read_from(&mut reader))
        .await
        .map_err(|_| {
            RackError::Http(format!("no request within {}s", READ_TIMEOUT.as_secs()))
        })?;

    let (label, response) = match read {
        Ok(request) => {
            let label = format!("{} {}", request.method, request.path);
            let response = recover(async move { route(&service, &request).await }).await;
            (label, response)
        }
        Err(e) if e.is_client_error() => ("-".to_string(), Response::bad_request(&e.to_string())),
        Err(e) => return Err(e),
    };

    response.write_to(&mut write_half).await?;
    info!(
        "{} {} in {:.2}ms",
        label,
        response.status,
        started.elapsed().as_secs_f64() * 1000.0
    );
    Ok(())
}

/// Run a handler on its own task so a panic becomes a 500
async fn recover<F>(handler: F) -> Response
where
    F: Future<Output = Response> + Send + 'static,
{
    match tokio::spawn(handler).await {
        Ok(response) => response,
        Err(e) => {
            error!("Handler failed: {}", e);
            Response::internal_error()
        }
    }
}
