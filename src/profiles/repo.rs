use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserProfile {
    pub user_id: String,
    pub name: String,
    pub age: i32,
    pub gender: String,
    pub height: f64,
    pub weight: f64,
    pub activity_level: String,
    pub goal_weight: f64,
    pub daily_calorie_goal: Option<f64>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Full-replace upsert keyed by user_id.
pub async fn upsert_profile(db: &PgPool, profile: &UserProfile) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO profiles
            (user_id, name, age, gender, height, weight, activity_level,
             goal_weight, daily_calorie_goal, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        ON CONFLICT (user_id) DO UPDATE SET
            name = EXCLUDED.name,
            age = EXCLUDED.age,
            gender = EXCLUDED.gender,
            height = EXCLUDED.height,
            weight = EXCLUDED.weight,
            activity_level = EXCLUDED.activity_level,
            goal_weight = EXCLUDED.goal_weight,
            daily_calorie_goal = EXCLUDED.daily_calorie_goal,
            created_at = EXCLUDED.created_at
        "#,
    )
    .bind(&profile.user_id)
    .bind(&profile.name)
    .bind(profile.age)
    .bind(&profile.gender)
    .bind(profile.height)
    .bind(profile.weight)
    .bind(&profile.activity_level)
    .bind(profile.goal_weight)
    .bind(profile.daily_calorie_goal)
    .bind(profile.created_at)
    .execute(db)
    .await?;
    Ok(())
}

pub async fn get_profile(db: &PgPool, user_id: &str) -> anyhow::Result<Option<UserProfile>> {
    let profile = sqlx::query_as::<_, UserProfile>(
        r#"
        SELECT user_id, name, age, gender, height, weight, activity_level,
               goal_weight, daily_calorie_goal, created_at
        FROM profiles
        WHERE user_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(db)
    .await?;
    Ok(profile)
}
