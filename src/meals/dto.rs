use serde::{Deserialize, Serialize};

use super::repo::MealRecord;

/// Body of POST /api/meal/save. `created_at` is set server-side.
#[derive(Debug, Deserialize)]
pub struct SaveMealRequest {
    pub meal_id: String,
    pub user_id: String,
    pub date: String,
    pub time: String,
    pub food_name: String,
    pub portion_size: f64,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
    #[serde(default)]
    pub image_base64: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SavedMealResponse {
    pub message: String,
    pub meal_id: String,
}

#[derive(Debug, Deserialize)]
pub struct PortionAdjustment {
    pub meal_id: String,
    pub new_portion_size: f64,
}

/// The scaled columns written back on adjustment, echoed to the caller.
#[derive(Debug, PartialEq, Serialize)]
pub struct AdjustedValues {
    pub portion_size: f64,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
}

#[derive(Debug, Serialize)]
pub struct DayTotals {
    pub total_calories: f64,
    pub total_protein: f64,
    pub total_carbs: f64,
    pub total_fats: f64,
    pub meals_count: usize,
}

#[derive(Debug, Serialize)]
pub struct DayMealsResponse {
    pub meals: Vec<MealRecord>,
    pub totals: DayTotals,
}

/// One history group. Grouping key is the literal date string as stored.
#[derive(Debug, Serialize)]
pub struct DayHistory {
    pub date: String,
    pub meals: Vec<MealRecord>,
    pub total_calories: f64,
    pub total_protein: f64,
    pub total_carbs: f64,
    pub total_fats: f64,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub history: Vec<DayHistory>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    #[serde(default = "default_days")]
    pub days: i64,
}
fn default_days() -> i64 {
    7
}

#[derive(Debug, Serialize)]
pub struct DeletedMealResponse {
    pub message: String,
}
