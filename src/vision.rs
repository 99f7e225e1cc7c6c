use anyhow::{anyhow, Context};
use axum::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use crate::config::GeminiConfig;

/// Hosted vision-language model. The reply is the list of text parts exactly
/// as the provider returned them; normalization happens downstream.
#[async_trait]
pub trait VisionModel: Send + Sync {
    async fn describe(
        &self,
        system: &str,
        prompt: &str,
        image_base64: &str,
    ) -> anyhow::Result<Vec<String>>;
}

#[derive(Clone)]
pub struct GeminiVision {
    client: Client,
    api_key: Option<String>,
    model: String,
}

impl GeminiVision {
    pub fn new(config: &GeminiConfig) -> Self {
        Self {
            client: Client::new(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }
    }
}

#[async_trait]
impl VisionModel for GeminiVision {
    async fn describe(
        &self,
        system: &str,
        prompt: &str,
        image_base64: &str,
    ) -> anyhow::Result<Vec<String>> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| anyhow!("GEMINI_API_KEY não configurada"))?;

        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent",
            self.model
        );
        let response = self
            .client
            .post(&url)
            .query(&[("key", api_key)])
            .json(&json!({
                "system_instruction": {
                    "parts": [{ "text": system }]
                },
                "contents": [{
                    "role": "user",
                    "parts": [
                        { "text": prompt },
                        {
                            "inline_data": {
                                "mime_type": "image/jpeg",
                                "data": image_base64,
                            }
                        }
                    ]
                }]
            }))
            .send()
            .await
            .context("gemini generateContent")?;

        let body: Value = response.json().await.context("gemini response body")?;

        let parts = body["candidates"][0]["content"]["parts"]
            .as_array()
            .ok_or_else(|| anyhow!("unexpected gemini response shape: {}", body))?;

        Ok(parts
            .iter()
            .filter_map(|p| p["text"].as_str().map(|s| s.to_string()))
            .collect())
    }
}
