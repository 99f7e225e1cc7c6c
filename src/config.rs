use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct GeminiConfig {
    /// Missing key is not a boot failure; analysis calls report it as an
    /// upstream error instead.
    pub api_key: Option<String>,
    pub model: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub gemini: GeminiConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let gemini = GeminiConfig {
            api_key: std::env::var("GEMINI_API_KEY").ok(),
            model: std::env::var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-2.0-flash".into()),
        };
        Ok(Self {
            database_url,
            gemini,
        })
    }
}
