use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct FoodAnalysisRequest {
    pub image_base64: String,
    pub user_id: String,
}

/// Caller-facing analysis result. The meal_id is freshly generated and not
/// yet persisted; saving is a separate call.
#[derive(Debug, Serialize)]
pub struct AnalysisResult {
    pub meal_id: String,
    pub food_name: String,
    pub portion_size: f64,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
    pub confidence: String,
}
