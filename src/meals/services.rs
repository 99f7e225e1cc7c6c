use crate::error::ApiError;

use super::dto::{AdjustedValues, DayHistory, DayTotals};
use super::repo::MealRecord;

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Scales the four nutrients by new_portion / stored_portion, rounded to one
/// decimal. The stored portion is whatever is in the record right now, so
/// repeated adjustments compound from the latest state.
pub fn scale_portion(meal: &MealRecord, new_portion_size: f64) -> Result<AdjustedValues, ApiError> {
    if meal.portion_size == 0.0 {
        return Err(ApiError::validation(
            "cannot adjust a meal with portion_size of zero",
        ));
    }
    let ratio = new_portion_size / meal.portion_size;
    Ok(AdjustedValues {
        portion_size: new_portion_size,
        calories: round1(meal.calories * ratio),
        protein: round1(meal.protein * ratio),
        carbs: round1(meal.carbs * ratio),
        fats: round1(meal.fats * ratio),
    })
}

pub fn day_totals(meals: &[MealRecord]) -> DayTotals {
    DayTotals {
        total_calories: meals.iter().map(|m| m.calories).sum(),
        total_protein: meals.iter().map(|m| m.protein).sum(),
        total_carbs: meals.iter().map(|m| m.carbs).sum(),
        total_fats: meals.iter().map(|m| m.fats).sum(),
        meals_count: meals.len(),
    }
}

/// Groups meals by the literal date string, first-seen order preserved.
/// "2024-01-01" and "2024-01-1" are two different groups on purpose.
pub fn group_history(meals: Vec<MealRecord>) -> Vec<DayHistory> {
    let mut groups: Vec<DayHistory> = Vec::new();
    for meal in meals {
        let idx = match groups.iter().position(|g| g.date == meal.date) {
            Some(i) => i,
            None => {
                groups.push(DayHistory {
                    date: meal.date.clone(),
                    meals: Vec::new(),
                    total_calories: 0.0,
                    total_protein: 0.0,
                    total_carbs: 0.0,
                    total_fats: 0.0,
                });
                groups.len() - 1
            }
        };
        let group = &mut groups[idx];
        group.total_calories += meal.calories;
        group.total_protein += meal.protein;
        group.total_carbs += meal.carbs;
        group.total_fats += meal.fats;
        group.meals.push(meal);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;

    fn meal(date: &str, calories: f64, portion: f64) -> MealRecord {
        MealRecord {
            meal_id: "m1".into(),
            user_id: "u1".into(),
            date: date.into(),
            time: "12:00".into(),
            food_name: "arroz".into(),
            portion_size: portion,
            calories,
            protein: 4.0,
            carbs: 44.0,
            fats: 0.4,
            image_base64: None,
            created_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn test_scale_portion_ratio() {
        let m = meal("2024-01-01", 200.0, 100.0);
        let adjusted = scale_portion(&m, 150.0).unwrap();
        assert_eq!(adjusted.portion_size, 150.0);
        assert_eq!(adjusted.calories, 300.0);
        assert_eq!(adjusted.protein, 6.0);
        assert_eq!(adjusted.carbs, 66.0);
        assert_eq!(adjusted.fats, 0.6);
    }

    #[test]
    fn test_scale_portion_rounds_to_one_decimal() {
        let mut m = meal("2024-01-01", 100.0, 30.0);
        m.protein = 10.0;
        let adjusted = scale_portion(&m, 10.0).unwrap();
        // 100 / 3 = 33.333... -> 33.3
        assert_eq!(adjusted.calories, 33.3);
        assert_eq!(adjusted.protein, 3.3);
    }

    #[test]
    fn test_scale_portion_zero_original_is_validation_error() {
        let m = meal("2024-01-01", 200.0, 0.0);
        let err = scale_portion(&m, 150.0).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn test_scale_portion_compounds_from_latest_state() {
        let m = meal("2024-01-01", 200.0, 100.0);
        let first = scale_portion(&m, 150.0).unwrap();

        let mut stored = meal("2024-01-01", first.calories, first.portion_size);
        stored.protein = first.protein;
        stored.carbs = first.carbs;
        stored.fats = first.fats;

        // Back to 100g lands on the original values.
        let second = scale_portion(&stored, 100.0).unwrap();
        assert_eq!(second.calories, 200.0);
        assert_eq!(second.portion_size, 100.0);
    }

    #[test]
    fn test_day_totals() {
        let meals = vec![meal("2024-01-01", 200.0, 100.0), meal("2024-01-01", 150.0, 80.0)];
        let totals = day_totals(&meals);
        assert_eq!(totals.total_calories, 350.0);
        assert_eq!(totals.total_protein, 8.0);
        assert_eq!(totals.meals_count, 2);
    }

    #[test]
    fn test_group_history_by_literal_date_string() {
        // Same calendar day spelled two ways stays two groups.
        let meals = vec![
            meal("2024-01-01", 200.0, 100.0),
            meal("2024-01-1", 150.0, 80.0),
            meal("2024-01-01", 100.0, 50.0),
        ];
        let groups = group_history(meals);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].date, "2024-01-01");
        assert_eq!(groups[0].meals.len(), 2);
        assert_eq!(groups[0].total_calories, 300.0);
        assert_eq!(groups[1].date, "2024-01-1");
        assert_eq!(groups[1].total_calories, 150.0);
    }

    #[test]
    fn test_group_history_preserves_input_order() {
        let meals = vec![
            meal("2024-01-03", 1.0, 1.0),
            meal("2024-01-02", 1.0, 1.0),
            meal("2024-01-01", 1.0, 1.0),
        ];
        let groups = group_history(meals);
        let dates: Vec<_> = groups.iter().map(|g| g.date.as_str()).collect();
        assert_eq!(dates, ["2024-01-03", "2024-01-02", "2024-01-01"]);
    }
}
