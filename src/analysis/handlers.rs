use axum::{extract::State, routing::post, Json, Router};
use tracing::{info, instrument};

use crate::{error::ApiError, profiles::repo as profiles_repo, state::AppState};

use super::dto::{AnalysisResult, FoodAnalysisRequest};
use super::services::{analyze_food, fill_defaults};

pub fn routes() -> Router<AppState> {
    Router::new().route("/food/analyze", post(analyze))
}

#[instrument(skip(state, payload), fields(user_id = %payload.user_id))]
pub async fn analyze(
    State(state): State<AppState>,
    Json(payload): Json<FoodAnalysisRequest>,
) -> Result<Json<AnalysisResult>, ApiError> {
    profiles_repo::get_profile(&state.db, &payload.user_id)
        .await
        .map_err(ApiError::upstream)?
        .ok_or_else(|| ApiError::not_found("Usuário não encontrado"))?;

    let record = analyze_food(state.vision.as_ref(), &payload.image_base64).await?;
    let result = fill_defaults(record);

    info!(meal_id = %result.meal_id, food_name = %result.food_name, "food analyzed");
    Ok(Json(result))
}
