//! Statistics API endpoints.

use axum::{Json, extract::State};
use engine::Statistics;

use crate::{ServerError, server::ServerState};

/// Global, per account and per category summaries.
pub async fn get_stats(State(state): State<ServerState>) -> Result<Json<Statistics>, ServerError> {
    let engine = state.engine.read().await;
    Ok(Json(engine.statistics()?))
}
