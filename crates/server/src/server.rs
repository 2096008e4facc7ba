use axum::{
    Router,
    http::Uri,
    routing::get,
};
use tokio::sync::RwLock;

use std::sync::Arc;

use crate::{ServerError, accounts, categories, statistics, transactions, transfers};
use engine::{Engine, EngineError};

#[derive(Clone)]
pub struct ServerState {
    /// Writes take the write lock, so dispatches never interleave.
    pub engine: Arc<RwLock<Engine>>,
}

async fn fallback(uri: Uri) -> ServerError {
    ServerError::Engine(EngineError::NotFound(format!("no route for {}", uri.path())))
}

/// Build the application router around an hydrated engine.
pub fn router(engine: Engine) -> Router {
    let state = ServerState {
        engine: Arc::new(RwLock::new(engine)),
    };

    Router::new()
        .route("/accounts", get(accounts::list).post(accounts::create))
        .route(
            "/accounts/{id}",
            get(accounts::get)
                .patch(accounts::update)
                .delete(accounts::delete),
        )
        .route("/accounts/{id}/balance", get(accounts::balance))
        .route("/categories", get(categories::list).post(categories::create))
        .route(
            "/categories/{id}",
            get(categories::get)
                .patch(categories::update)
                .delete(categories::delete),
        )
        .route(
            "/income",
            get(transactions::list_income).post(transactions::create_income),
        )
        .route(
            "/income/{id}",
            get(transactions::get_income)
                .patch(transactions::update_income)
                .delete(transactions::delete_income),
        )
        .route(
            "/expenses",
            get(transactions::list_expenses).post(transactions::create_expense),
        )
        .route(
            "/expenses/{id}",
            get(transactions::get_expense)
                .patch(transactions::update_expense)
                .delete(transactions::delete_expense),
        )
        .route("/transfers", get(transfers::list).post(transfers::create))
        .route(
            "/transfers/{id}",
            get(transfers::get)
                .patch(transfers::update)
                .delete(transfers::delete),
        )
        .route("/stats", get(statistics::get_stats))
        .fallback(fallback)
        .with_state(state)
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(engine)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
