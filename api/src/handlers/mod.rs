use axum::extract::State;

use crate::{context::ApiContext, error::ApiError};

pub mod users;

#[utoipa::path(
    get,
    path = "/healthz",
    tags = ["meta"],
    responses((status = 200, description = "Service and store are reachable"))
)]
pub async fn health_check(State(ctx): State<ApiContext>) -> Result<&'static str, ApiError> {
    ctx.db.ping().await?;
    Ok("Healthy")
}
