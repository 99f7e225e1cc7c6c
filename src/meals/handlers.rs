use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post},
    Json, Router,
};
use time::OffsetDateTime;
use tracing::{info, instrument};

use crate::{error::ApiError, state::AppState};

use super::dto::{
    AdjustedValues, DayMealsResponse, DeletedMealResponse, HistoryQuery, HistoryResponse,
    PortionAdjustment, SaveMealRequest, SavedMealResponse,
};
use super::repo::{self, MealRecord};
use super::services::{day_totals, group_history, scale_portion};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/meal/save", post(save_meal))
        .route("/meal/adjust", post(adjust_portion))
        .route("/meal/:meal_id", delete(delete_meal))
        .route("/meals/:user_id/:date", get(meals_by_date))
        .route("/meals/history/:user_id", get(meal_history))
}

#[instrument(skip(state, payload), fields(meal_id = %payload.meal_id))]
pub async fn save_meal(
    State(state): State<AppState>,
    Json(payload): Json<SaveMealRequest>,
) -> Result<Json<SavedMealResponse>, ApiError> {
    let meal = MealRecord {
        meal_id: payload.meal_id,
        user_id: payload.user_id,
        date: payload.date,
        time: payload.time,
        food_name: payload.food_name,
        portion_size: payload.portion_size,
        calories: payload.calories,
        protein: payload.protein,
        carbs: payload.carbs,
        fats: payload.fats,
        image_base64: payload.image_base64,
        created_at: OffsetDateTime::now_utc(),
    };

    repo::insert_meal(&state.db, &meal)
        .await
        .map_err(ApiError::upstream)?;

    info!(meal_id = %meal.meal_id, user_id = %meal.user_id, "meal saved");
    Ok(Json(SavedMealResponse {
        message: "Refeição salva com sucesso".into(),
        meal_id: meal.meal_id,
    }))
}

#[instrument(skip(state))]
pub async fn adjust_portion(
    State(state): State<AppState>,
    Json(adjustment): Json<PortionAdjustment>,
) -> Result<Json<AdjustedValues>, ApiError> {
    let meal = repo::find_meal(&state.db, &adjustment.meal_id)
        .await
        .map_err(ApiError::upstream)?
        .ok_or_else(|| ApiError::not_found("Refeição não encontrada"))?;

    let adjusted = scale_portion(&meal, adjustment.new_portion_size)?;

    let updated = repo::update_meal_portion(
        &state.db,
        &adjustment.meal_id,
        adjusted.portion_size,
        adjusted.calories,
        adjusted.protein,
        adjusted.carbs,
        adjusted.fats,
    )
    .await
    .map_err(ApiError::upstream)?;
    if !updated {
        // The row vanished between find and update; racing delete wins.
        return Err(ApiError::not_found("Refeição não encontrada"));
    }

    Ok(Json(adjusted))
}

#[instrument(skip(state))]
pub async fn meals_by_date(
    State(state): State<AppState>,
    Path((user_id, date)): Path<(String, String)>,
) -> Result<Json<DayMealsResponse>, ApiError> {
    let meals = repo::meals_by_user_and_date(&state.db, &user_id, &date)
        .await
        .map_err(ApiError::upstream)?;
    let totals = day_totals(&meals);
    Ok(Json(DayMealsResponse { meals, totals }))
}

#[instrument(skip(state))]
pub async fn meal_history(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let meals = repo::recent_meals(&state.db, &user_id, query.days)
        .await
        .map_err(ApiError::upstream)?;
    Ok(Json(HistoryResponse {
        history: group_history(meals),
    }))
}

#[instrument(skip(state))]
pub async fn delete_meal(
    State(state): State<AppState>,
    Path(meal_id): Path<String>,
) -> Result<Json<DeletedMealResponse>, ApiError> {
    let deleted = repo::delete_meal(&state.db, &meal_id)
        .await
        .map_err(ApiError::upstream)?;
    if !deleted {
        return Err(ApiError::not_found("Refeição não encontrada"));
    }
    info!(%meal_id, "meal deleted");
    Ok(Json(DeletedMealResponse {
        message: "Refeição deletada com sucesso".into(),
    }))
}
