use anyhow::Result;
use axum::Router;
use std::net::SocketAddr;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::{info, Level};

use crate::routes;
use crate::state::AppState;
use libris_core::record::CollectionId;
use libris_core::storage::{StorageCollectionWrapper, StorageEngine};

pub struct Server {
    bind_address: String,
    state: AppState,
}

impl Server {
    pub fn builder() -> ServerBuilder { ServerBuilder::default() }

    fn app(&self) -> Router {
        routes::router(self.state.clone()).layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                        .on_request(DefaultOnRequest::new().level(Level::INFO))
                        .on_response(DefaultOnResponse::new().level(Level::INFO)),
                )
                // any origin is allowed to call the catalog
                .layer(CorsLayer::permissive())
                .into_inner(),
        )
    }

    /// Bind the listener without serving yet. Tests bind port 0 and read the
    /// assigned address back.
    pub async fn bind(self) -> Result<BoundServer> {
        let app = self.app();
        let listener = tokio::net::TcpListener::bind(&self.bind_address).await?;
        let local_addr = listener.local_addr()?;
        info!("listening on {}", local_addr);

        Ok(BoundServer { listener, app, local_addr })
    }

    pub async fn run(self) -> Result<()> { self.bind().await?.serve().await }
}

pub struct BoundServer {
    listener: tokio::net::TcpListener,
    app: Router,
    local_addr: SocketAddr,
}

impl BoundServer {
    pub fn local_addr(&self) -> SocketAddr { self.local_addr }

    pub async fn serve(self) -> Result<()> {
        axum::serve(self.listener, self.app).await?;
        Ok(())
    }
}

#[derive(Default)]
pub struct ServerBuilder {
    bind_address: Option<String>,
    storage: Option<Box<dyn StorageEngine>>,
}

impl ServerBuilder {
    pub fn bind_address(mut self, addr: impl Into<String>) -> Self {
        self.bind_address = Some(addr.into());
        self
    }

    pub fn with_storage(mut self, storage: impl StorageEngine + 'static) -> Self {
        self.storage = Some(Box::new(storage));
        self
    }

    pub async fn build(self) -> Result<Server> {
        let bind_address = self
            .bind_address
            .ok_or_else(|| anyhow::anyhow!("bind_address is required"))?;

        let storage = self
            .storage
            .ok_or_else(|| anyhow::anyhow!("storage is required"))?;

        let books = storage.collection(&CollectionId::from("books")).await?;
        let state = AppState::new(StorageCollectionWrapper::new(books));

        Ok(Server { bind_address, state })
    }
}
