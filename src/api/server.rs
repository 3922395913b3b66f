use std::future::{Future, IntoFuture};
use std::io;
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;

use axum::Router;
use thiserror::Error;
use tokio::net::TcpListener;
use tower::Service;

use super::middleware::CorsPolicy;
use super::router::build_router;
use super::shutdown::ShutdownManager;
use super::AppState;
use crate::config::{Config, ConfigError};

/// Errors that stop the server from starting or running.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("try_bind() must be called before run()")]
    NotBound,

    #[error("Server error: {0}")]
    Serve(#[from] io::Error),
}

pub struct ApiServer {
    pub addr: SocketAddr,
    /// Populated by try_bind(), consumed by run().
    listener: Option<TcpListener>,
    router: Router,
    shutdown: Arc<ShutdownManager>,
    grace: Duration,
}

impl ApiServer {
    /// Build a server over a fresh in-memory store.
    pub fn new(config: &Config) -> Result<Self, ServerError> {
        Self::with_state(config, AppState::in_memory())
    }

    pub fn with_state(config: &Config, state: AppState) -> Result<Self, ServerError> {
        let addr = config.bind_addr()?;
        let cors = CorsPolicy::new(&config.server.cors_allowed_origins);
        Ok(Self {
            addr,
            listener: None,
            router: build_router(state, cors),
            shutdown: Arc::new(ShutdownManager::new()),
            grace: Duration::from_secs(config.server.shutdown_grace_seconds),
        })
    }

    /// Bind the configured address and record the actual one.
    ///
    /// Binding port 0 picks a free port; `addr` reflects it afterwards.
    pub async fn try_bind(&mut self) -> Result<SocketAddr, ServerError> {
        let listener = TcpListener::bind(self.addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: self.addr,
                source,
            })?;
        self.addr = listener.local_addr()?;
        self.listener = Some(listener);
        tracing::info!("API bound to {}", self.addr);
        Ok(self.addr)
    }

    pub fn handle(&self) -> ApiHandle {
        ApiHandle {
            shutdown: self.shutdown.clone(),
        }
    }

    /// Serve until shutdown is signaled, then drain connections for at most
    /// the configured grace period.
    pub async fn run(self) -> Result<(), ServerError> {
        let ApiServer {
            addr,
            listener,
            router,
            shutdown,
            grace,
        } = self;
        let listener = listener.ok_or(ServerError::NotBound)?;

        tracing::info!("Starting API server on {}", addr);

        let make_service = TrackConnections {
            inner: router.into_make_service(),
            shutdown: shutdown.clone(),
        };

        let signals = shutdown.clone();
        let serve = axum::serve(listener, make_service)
            .with_graceful_shutdown(async move {
                if let Err(e) = signals.wait_for_shutdown().await {
                    tracing::error!(error = %e, "Failed to install signal handlers");
                    signals.signaled().await;
                }
            })
            .into_future();

        let drain = async {
            shutdown.signaled().await;
            shutdown.wait_for_connections(grace).await;
        };

        tokio::select! {
            result = serve => result?,
            () = drain => {}
        }

        tracing::info!("Shut down gracefully");
        Ok(())
    }
}

/// Cloneable handle used to stop a running server.
#[derive(Clone)]
pub struct ApiHandle {
    shutdown: Arc<ShutdownManager>,
}

impl ApiHandle {
    pub fn shutdown(&self) {
        self.shutdown.signal_shutdown();
    }
}

/// Holds one slot in the active connection count until dropped.
struct ConnectionToken(Arc<ShutdownManager>);

impl ConnectionToken {
    fn acquire(shutdown: &Arc<ShutdownManager>) -> Self {
        shutdown.increment_connections();
        Self(shutdown.clone())
    }
}

impl Clone for ConnectionToken {
    fn clone(&self) -> Self {
        Self::acquire(&self.0)
    }
}

impl Drop for ConnectionToken {
    fn drop(&mut self) {
        self.0.decrement_connections();
    }
}

/// Make-service wrapper that ties each accepted connection's service to a
/// [`ConnectionToken`], so shutdown can wait for them to finish.
#[derive(Clone)]
struct TrackConnections<M> {
    inner: M,
    shutdown: Arc<ShutdownManager>,
}

impl<M, T> Service<T> for TrackConnections<M>
where
    M: Service<T> + Send,
    M::Future: Send + 'static,
    M::Response: Send + 'static,
{
    type Response = Tracked<M::Response>;
    type Error = M::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, target: T) -> Self::Future {
        let token = ConnectionToken::acquire(&self.shutdown);
        let connecting = self.inner.call(target);
        Box::pin(async move {
            let inner = connecting.await?;
            Ok(Tracked {
                inner,
                _token: token,
            })
        })
    }
}

/// Per-connection service; every clone holds its own token.
#[derive(Clone)]
struct Tracked<S> {
    inner: S,
    _token: ConnectionToken,
}

impl<S, Req> Service<Req> for Tracked<S>
where
    S: Service<Req>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Req) -> Self::Future {
        self.inner.call(req)
    }
}
