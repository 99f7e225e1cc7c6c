use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use time::OffsetDateTime;
use tracing::{info, instrument};

use crate::{error::ApiError, state::AppState};

use super::dto::{ProfileRequest, ProfileSavedResponse};
use super::metabolics::{basal_metabolic_rate, daily_calorie_goal, total_daily_energy_expenditure};
use super::repo::{self, UserProfile};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/user/profile", post(save_profile))
        .route("/user/profile/:user_id", get(get_profile))
}

#[instrument(skip(state, payload), fields(user_id = %payload.user_id))]
pub async fn save_profile(
    State(state): State<AppState>,
    Json(payload): Json<ProfileRequest>,
) -> Result<Json<ProfileSavedResponse>, ApiError> {
    let bmr = basal_metabolic_rate(payload.weight, payload.height, payload.age, &payload.gender);
    let tdee = total_daily_energy_expenditure(bmr, &payload.activity_level);
    let goal = daily_calorie_goal(tdee, payload.weight, payload.goal_weight);

    let profile = UserProfile {
        user_id: payload.user_id,
        name: payload.name,
        age: payload.age,
        gender: payload.gender,
        height: payload.height,
        weight: payload.weight,
        activity_level: payload.activity_level,
        goal_weight: payload.goal_weight,
        daily_calorie_goal: Some(goal.round()),
        created_at: OffsetDateTime::now_utc(),
    };

    repo::upsert_profile(&state.db, &profile)
        .await
        .map_err(ApiError::upstream)?;

    info!(user_id = %profile.user_id, goal = goal.round(), "profile saved");
    Ok(Json(ProfileSavedResponse {
        message: "Perfil salvo com sucesso".into(),
        daily_calorie_goal: goal.round(),
        bmr: bmr.round(),
        tdee: tdee.round(),
    }))
}

#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<UserProfile>, ApiError> {
    let profile = repo::get_profile(&state.db, &user_id)
        .await
        .map_err(ApiError::upstream)?
        .ok_or_else(|| ApiError::not_found("Perfil não encontrado"))?;
    Ok(Json(profile))
}
