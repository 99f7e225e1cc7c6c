//! Turns the raw model reply into a single nutrition record. Strict
//! parse-then-validate: every failure is a tagged error, nothing is
//! defaulted here (see `services::fill_defaults`).

use serde_json::Value;

/// Nutrition record as the model reported it; every field optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialNutrition {
    pub food_name: Option<String>,
    pub portion_size: Option<f64>,
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fats: Option<f64>,
    pub confidence: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    #[error("resposta do modelo não é JSON válido: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Nenhum alimento identificado na resposta")]
    NoFood,
}

/// The model reply arrives as a list of text parts; the first part is the
/// payload. Strips markdown fences, parses JSON, and collapses multi-item
/// arrays into one combined record (names joined with " + ", nutrients
/// summed, missing numerics counted as 0).
pub fn normalize(parts: &[String]) -> Result<PartialNutrition, NormalizeError> {
    let raw = parts.first().map(String::as_str).unwrap_or("");
    let mut text = raw.trim().to_string();
    if text.starts_with("```") {
        text = text.replace("```json", "").replace("```", "");
    }

    let value: Value = serde_json::from_str(text.trim())?;

    match &value {
        Value::Array(items) => {
            let first = items.first().ok_or(NormalizeError::NoFood)?;
            let mut record = record_from(first);
            if items.len() > 1 {
                let names: Vec<&str> = items
                    .iter()
                    .map(|i| i.get("food_name").and_then(Value::as_str).unwrap_or(""))
                    .collect();
                record.food_name = Some(names.join(" + "));
                record.portion_size = Some(sum_field(items, "portion_size"));
                record.calories = Some(sum_field(items, "calories"));
                record.protein = Some(sum_field(items, "protein"));
                record.carbs = Some(sum_field(items, "carbs"));
                record.fats = Some(sum_field(items, "fats"));
            }
            Ok(record)
        }
        other => Ok(record_from(other)),
    }
}

fn record_from(value: &Value) -> PartialNutrition {
    PartialNutrition {
        food_name: field_str(value, "food_name"),
        portion_size: field_f64(value, "portion_size"),
        calories: field_f64(value, "calories"),
        protein: field_f64(value, "protein"),
        carbs: field_f64(value, "carbs"),
        fats: field_f64(value, "fats"),
        confidence: field_str(value, "confidence"),
    }
}

fn field_str(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_string)
}

fn field_f64(value: &Value, key: &str) -> Option<f64> {
    value.get(key).and_then(Value::as_f64)
}

fn sum_field(items: &[Value], key: &str) -> f64 {
    items.iter().map(|i| field_f64(i, key).unwrap_or(0.0)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(s: &str) -> Vec<String> {
        vec![s.to_string()]
    }

    #[test]
    fn test_plain_json_object() {
        let record =
            normalize(&parts(r#"{"food_name":"rice","calories":200}"#)).unwrap();
        assert_eq!(record.food_name.as_deref(), Some("rice"));
        assert_eq!(record.calories, Some(200.0));
        assert_eq!(record.protein, None);
    }

    #[test]
    fn test_fenced_json() {
        let record =
            normalize(&parts("```json\n{\"food_name\":\"rice\",\"calories\":200}\n```")).unwrap();
        assert_eq!(record.food_name.as_deref(), Some("rice"));
        assert_eq!(record.calories, Some(200.0));
    }

    #[test]
    fn test_fenced_without_language_tag() {
        let record = normalize(&parts("```\n{\"calories\": 42}\n```")).unwrap();
        assert_eq!(record.calories, Some(42.0));
    }

    #[test]
    fn test_array_of_two_is_merged() {
        let record = normalize(&parts(
            r#"[{"food_name":"A","calories":100,"portion_size":80,"confidence":"alta"},
                {"food_name":"B","calories":150,"portion_size":120}]"#,
        ))
        .unwrap();
        assert_eq!(record.food_name.as_deref(), Some("A + B"));
        assert_eq!(record.calories, Some(250.0));
        assert_eq!(record.portion_size, Some(200.0));
        // Confidence of the first item carries over.
        assert_eq!(record.confidence.as_deref(), Some("alta"));
    }

    #[test]
    fn test_merge_treats_missing_numerics_as_zero() {
        let record = normalize(&parts(
            r#"[{"food_name":"A","calories":100},{"food_name":"B"}]"#,
        ))
        .unwrap();
        assert_eq!(record.calories, Some(100.0));
        assert_eq!(record.fats, Some(0.0));
    }

    #[test]
    fn test_single_element_array_uses_element() {
        let record = normalize(&parts(r#"[{"food_name":"feijão","calories":90}]"#)).unwrap();
        assert_eq!(record.food_name.as_deref(), Some("feijão"));
        assert_eq!(record.calories, Some(90.0));
    }

    #[test]
    fn test_empty_array_is_no_food() {
        let err = normalize(&parts("[]")).unwrap_err();
        assert!(matches!(err, NormalizeError::NoFood));
    }

    #[test]
    fn test_garbage_is_parse_error() {
        let err = normalize(&parts("the dish looks like rice")).unwrap_err();
        assert!(matches!(err, NormalizeError::Parse(_)));
    }

    #[test]
    fn test_empty_reply_is_parse_error() {
        let err = normalize(&[]).unwrap_err();
        assert!(matches!(err, NormalizeError::Parse(_)));
    }
}
