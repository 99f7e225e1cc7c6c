use serde::{Deserialize, Serialize};

/// Body of POST /api/user/profile. `daily_calorie_goal` is intentionally
/// absent: it is recomputed on every write and never caller-settable.
#[derive(Debug, Deserialize)]
pub struct ProfileRequest {
    pub user_id: String,
    pub name: String,
    pub age: i32,
    pub gender: String,
    pub height: f64,
    pub weight: f64,
    pub activity_level: String,
    pub goal_weight: f64,
}

#[derive(Debug, Serialize)]
pub struct ProfileSavedResponse {
    pub message: String,
    pub daily_calorie_goal: f64,
    pub bmr: f64,
    pub tdee: f64,
}
