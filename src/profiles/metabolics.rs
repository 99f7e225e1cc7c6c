//! Harris-Benedict based calorie arithmetic. Pure functions, no error paths:
//! unrecognized gender/activity strings fall back to the feminino
//! coefficients / sedentary multiplier (logged, not rejected).

use tracing::warn;

/// Basal metabolic rate. Coefficient set selected by gender,
/// case-insensitive; anything that is not "masculino" uses the feminino set.
pub fn basal_metabolic_rate(weight: f64, height: f64, age: i32, gender: &str) -> f64 {
    let age = f64::from(age);
    match gender.to_lowercase().as_str() {
        "masculino" => 88.362 + (13.397 * weight) + (4.799 * height) - (5.677 * age),
        "feminino" => 447.593 + (9.247 * weight) + (3.098 * height) - (4.330 * age),
        other => {
            warn!(gender = %other, "unknown gender, using feminino coefficients");
            447.593 + (9.247 * weight) + (3.098 * height) - (4.330 * age)
        }
    }
}

/// Total daily energy expenditure: BMR scaled by the activity multiplier.
/// Unknown activity levels fall back to the sedentary 1.2.
pub fn total_daily_energy_expenditure(bmr: f64, activity_level: &str) -> f64 {
    let multiplier = match activity_level.to_lowercase().as_str() {
        "sedentario" => 1.2,
        "leve" => 1.375,
        "moderado" => 1.55,
        "intenso" => 1.725,
        "muito_intenso" => 1.9,
        other => {
            warn!(activity_level = %other, "unknown activity level, using 1.2");
            1.2
        }
    };
    bmr * multiplier
}

/// Daily calorie goal: 500 kcal deficit to lose, 300 kcal surplus to gain,
/// TDEE unchanged to maintain. No clamping to a physiological minimum.
pub fn daily_calorie_goal(tdee: f64, current_weight: f64, goal_weight: f64) -> f64 {
    if goal_weight < current_weight {
        tdee - 500.0
    } else if goal_weight > current_weight {
        tdee + 300.0
    } else {
        tdee
    }
}
