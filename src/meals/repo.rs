use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

/// Stored meal entry. `date` and `time` are opaque strings: they are never
/// parsed as calendar values, and history grouping compares them literally.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MealRecord {
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
    pub image_base64: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

const MEAL_COLUMNS: &str = "meal_id, user_id, date, time, food_name, portion_size, \
     calories, protein, carbs, fats, image_base64, created_at";

/// Appends a record. meal_id uniqueness is the caller's responsibility.
pub async fn insert_meal(db: &PgPool, meal: &MealRecord) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO meals
            (meal_id, user_id, date, time, food_name, portion_size,
             calories, protein, carbs, fats, image_base64, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        "#,
    )
    .bind(&meal.meal_id)
    .bind(&meal.user_id)
    .bind(&meal.date)
    .bind(&meal.time)
    .bind(&meal.food_name)
    .bind(meal.portion_size)
    .bind(meal.calories)
    .bind(meal.protein)
    .bind(meal.carbs)
    .bind(meal.fats)
    .bind(&meal.image_base64)
    .bind(meal.created_at)
    .execute(db)
    .await?;
    Ok(())
}

pub async fn find_meal(db: &PgPool, meal_id: &str) -> anyhow::Result<Option<MealRecord>> {
    let meal = sqlx::query_as::<_, MealRecord>(&format!(
        "SELECT {MEAL_COLUMNS} FROM meals WHERE meal_id = $1"
    ))
    .bind(meal_id)
    .fetch_optional(db)
    .await?;
    Ok(meal)
}

/// Writes the portion column plus the four scaled nutrients.
/// Returns false when the id does not exist.
pub async fn update_meal_portion(
    db: &PgPool,
    meal_id: &str,
    portion_size: f64,
    calories: f64,
    protein: f64,
    carbs: f64,
    fats: f64,
) -> anyhow::Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE meals
        SET portion_size = $2, calories = $3, protein = $4, carbs = $5, fats = $6
        WHERE meal_id = $1
        "#,
    )
    .bind(meal_id)
    .bind(portion_size)
    .bind(calories)
    .bind(protein)
    .bind(carbs)
    .bind(fats)
    .execute(db)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Returns false when the id does not exist.
pub async fn delete_meal(db: &PgPool, meal_id: &str) -> anyhow::Result<bool> {
    let result = sqlx::query("DELETE FROM meals WHERE meal_id = $1")
        .bind(meal_id)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn meals_by_user_and_date(
    db: &PgPool,
    user_id: &str,
    date: &str,
) -> anyhow::Result<Vec<MealRecord>> {
    let rows = sqlx::query_as::<_, MealRecord>(&format!(
        "SELECT {MEAL_COLUMNS} FROM meals WHERE user_id = $1 AND date = $2 ORDER BY created_at"
    ))
    .bind(user_id)
    .bind(date)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

/// Recent meals sorted by the date string descending. The window is the
/// original heuristic of 10 meals per requested day, not a date predicate.
pub async fn recent_meals(db: &PgPool, user_id: &str, days: i64) -> anyhow::Result<Vec<MealRecord>> {
    let rows = sqlx::query_as::<_, MealRecord>(&format!(
        "SELECT {MEAL_COLUMNS} FROM meals WHERE user_id = $1 ORDER BY date DESC LIMIT $2"
    ))
    .bind(user_id)
    .bind(days * 10)
    .fetch_all(db)
    .await?;
    Ok(rows)
}
