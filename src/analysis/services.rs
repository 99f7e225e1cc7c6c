use tracing::debug;
use uuid::Uuid;

use crate::error::ApiError;
use crate::vision::VisionModel;

use super::dto::AnalysisResult;
use super::normalizer::{normalize, PartialNutrition};

const SYSTEM_INSTRUCTION: &str = "Você é um nutricionista especializado em análise de alimentos.
Analise a imagem e retorne APENAS um JSON válido com a seguinte estrutura:
{
  \"food_name\": \"nome do alimento em português\",
  \"portion_size\": valor_em_gramas,
  \"calories\": valor_numérico,
  \"protein\": valor_numérico,
  \"carbs\": valor_numérico,
  \"fats\": valor_numérico,
  \"confidence\": \"alta/média/baixa\"
}
Não adicione texto adicional, apenas o JSON.";

const USER_PROMPT: &str = "Identifique o alimento nesta imagem e forneça as informações \
nutricionais estimadas em formato JSON.";

/// Runs the model over the image and normalizes its reply. Model invocation
/// failures, a missing API key and unparseable replies all surface as one
/// upstream error carrying the underlying message.
pub async fn analyze_food(
    vision: &dyn VisionModel,
    image_base64: &str,
) -> Result<PartialNutrition, ApiError> {
    let reply = vision
        .describe(SYSTEM_INSTRUCTION, USER_PROMPT, image_base64)
        .await
        .map_err(|e| ApiError::Upstream(format!("Erro ao analisar alimento: {e}")))?;

    debug!(parts = reply.len(), "model reply received");

    normalize(&reply).map_err(|e| ApiError::Upstream(format!("Erro ao analisar alimento: {e}")))
}

/// The single place where analysis defaults are applied, plus the fresh
/// meal_id the caller can later persist with.
pub fn fill_defaults(record: PartialNutrition) -> AnalysisResult {
    AnalysisResult {
        meal_id: Uuid::new_v4().to_string(),
        food_name: record
            .food_name
            .unwrap_or_else(|| "Alimento não identificado".into()),
        portion_size: record.portion_size.unwrap_or(100.0),
        calories: record.calories.unwrap_or(0.0),
        protein: record.protein.unwrap_or(0.0),
        carbs: record.carbs.unwrap_or(0.0),
        fats: record.fats.unwrap_or(0.0),
        confidence: record.confidence.unwrap_or_else(|| "média".into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use axum::async_trait;

    struct ScriptedVision(Vec<String>);

    #[async_trait]
    impl VisionModel for ScriptedVision {
        async fn describe(
            &self,
            _system: &str,
            _prompt: &str,
            _image_base64: &str,
        ) -> anyhow::Result<Vec<String>> {
            Ok(self.0.clone())
        }
    }

    struct FailingVision;

    #[async_trait]
    impl VisionModel for FailingVision {
        async fn describe(
            &self,
            _system: &str,
            _prompt: &str,
            _image_base64: &str,
        ) -> anyhow::Result<Vec<String>> {
            Err(anyhow!("GEMINI_API_KEY não configurada"))
        }
    }

    #[tokio::test]
    async fn test_analyze_food_happy_path() {
        let vision = ScriptedVision(vec![
            "```json\n{\"food_name\":\"arroz\",\"calories\":200,\"confidence\":\"alta\"}\n```"
                .into(),
        ]);
        let record = analyze_food(&vision, "aW1n").await.unwrap();
        assert_eq!(record.food_name.as_deref(), Some("arroz"));
        assert_eq!(record.calories, Some(200.0));
    }

    #[tokio::test]
    async fn test_analyze_food_model_failure_is_upstream() {
        let err = analyze_food(&FailingVision, "aW1n").await.unwrap_err();
        match err {
            ApiError::Upstream(msg) => {
                assert!(msg.contains("GEMINI_API_KEY"));
                assert!(msg.starts_with("Erro ao analisar alimento"));
            }
            other => panic!("expected Upstream, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_analyze_food_non_json_is_upstream() {
        let vision = ScriptedVision(vec!["looks tasty".into()]);
        let err = analyze_food(&vision, "aW1n").await.unwrap_err();
        assert!(matches!(err, ApiError::Upstream(_)));
    }

    #[test]
    fn test_fill_defaults_on_empty_record() {
        let result = fill_defaults(PartialNutrition::default());
        assert_eq!(result.food_name, "Alimento não identificado");
        assert_eq!(result.portion_size, 100.0);
        assert_eq!(result.calories, 0.0);
        assert_eq!(result.confidence, "média");
        assert!(!result.meal_id.is_empty());
    }

    #[test]
    fn test_fill_defaults_keeps_reported_values() {
        let record = PartialNutrition {
            food_name: Some("feijoada".into()),
            portion_size: Some(250.0),
            calories: Some(480.0),
            protein: Some(30.0),
            carbs: Some(40.0),
            fats: Some(20.0),
            confidence: Some("alta".into()),
        };
        let result = fill_defaults(record);
        assert_eq!(result.food_name, "feijoada");
        assert_eq!(result.portion_size, 250.0);
        assert_eq!(result.confidence, "alta");
    }

    #[test]
    fn test_fill_defaults_generates_distinct_meal_ids() {
        let a = fill_defaults(PartialNutrition::default());
        let b = fill_defaults(PartialNutrition::default());
        assert_ne!(a.meal_id, b.meal_id);
    }
}
