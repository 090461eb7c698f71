use axum::{extract::State, http::StatusCode, Json};
use crate::models::{ErrorResponse, HealthResponse, ReadyResponse};
use crate::state::AppState;
use tracing::{debug, error};

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    debug!("Health check requested");
    Json(HealthResponse {
        status: "ok".to_string(),
        message: "Server is running".to_string(),
    })
}

/// Readiness check endpoint, answers only once the database does
pub async fn ready_check(
    State(state): State<AppState>,
) -> Result<Json<ReadyResponse>, (StatusCode, Json<ErrorResponse>)> {
    debug!("Readiness check requested");

    let counts = async {
        state.db.ping().await?;
        let lists = state.db.count_lists().await?;
        let items = state.db.count_items().await?;
        Ok::<_, sqlx::Error>((lists, items))
    };

    match counts.await {
        Ok((lists, items)) => Ok(Json(ReadyResponse {
            status: "ok".to_string(),
            message: "Service is ready".to_string(),
            lists,
            items,
        })),
        Err(e) => {
            error!("Readiness check failed: {}", e);
            let status = StatusCode::SERVICE_UNAVAILABLE;
            Err((status, Json(ErrorResponse {
                code: status.as_u16(),
                status: "unavailable".to_string(),
                error: format!("Database unavailable: {}", e),
            })))
        }
    }
}
