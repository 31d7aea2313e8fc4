//! Hugging Face Inference API adapters.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use mesa_core::config::{DEFAULT_CLASSIFIER_MODEL, DEFAULT_TRANSLATOR_MODEL};
use mesa_core::error::{MesaError, MesaResult};
use mesa_core::traits::{Classification, ModelConfig, TableSchema, TextClassifier, TextToSql};

const HF_INFERENCE_API_URL: &str = "https://api-inference.huggingface.co";

#[derive(Debug, Serialize)]
struct HfInferenceRequest<'a> {
    inputs: &'a str,
}

#[derive(Debug, Deserialize)]
struct HfClassification {
    label: String,
    score: f64,
}

impl From<HfClassification> for Classification {
    fn from(value: HfClassification) -> Self {
        Classification {
            label: value.label,
            score: value.score,
        }
    }
}

#[derive(Debug, Deserialize)]
struct HfGeneratedText {
    generated_text: String,
}

#[derive(Debug, Deserialize)]
struct HfErrorBody {
    error: String,
}

/// Build a reqwest client with the bearer token the API expects.
///
/// The token comes from the config, falling back to `HF_API_TOKEN` and then
/// `HUGGINGFACE_API_KEY` in the environment.
fn build_client(config: &ModelConfig) -> MesaResult<Client> {
    let api_token = config
        .api_token
        .clone()
        .or_else(|| std::env::var("HF_API_TOKEN").ok())
        .or_else(|| std::env::var("HUGGINGFACE_API_KEY").ok())
        .ok_or_else(|| {
            MesaError::Configuration(
                "Hugging Face API token not found. Set HF_API_TOKEN or provide api_token in config."
                    .to_string(),
            )
        })?;

    let mut headers = reqwest::header::HeaderMap::new();
    headers.insert(
        reqwest::header::AUTHORIZATION,
        format!("Bearer {}", api_token)
            .parse()
            .map_err(|_| MesaError::Configuration("Invalid API token format".to_string()))?,
    );
    headers.insert(
        reqwest::header::CONTENT_TYPE,
        "application/json"
            .parse()
            .map_err(|_| MesaError::Configuration("Invalid content type".to_string()))?,
    );

    Client::builder()
        .default_headers(headers)
        .build()
        .map_err(|e| MesaError::Configuration(format!("Failed to create HTTP client: {}", e)))
}

/// Decode the error body the API returns on failure, falling back to the
/// raw body when it is not the expected JSON shape.
fn error_message(body: &str) -> String {
    serde_json::from_str::<HfErrorBody>(body)
        .map(|b| b.error)
        .unwrap_or_else(|_| body.to_string())
}

/// Parse classification results.
///
/// The API wraps results in an extra list for single-input requests
/// (`[[{label, score}]]`); older models return the flat shape.
fn parse_classifications(body: &str) -> Result<Vec<Classification>, String> {
    if let Ok(nested) = serde_json::from_str::<Vec<Vec<HfClassification>>>(body) {
        return Ok(nested.into_iter().flatten().map(Into::into).collect());
    }
    serde_json::from_str::<Vec<HfClassification>>(body)
        .map(|flat| flat.into_iter().map(Into::into).collect())
        .map_err(|e| format!("unexpected response shape: {}", e))
}

/// Parse text-generation results, accepting both the list and single-object
/// shapes the API produces.
fn parse_generated_text(body: &str) -> Result<String, String> {
    if let Ok(candidates) = serde_json::from_str::<Vec<HfGeneratedText>>(body) {
        return candidates
            .into_iter()
            .next()
            .map(|c| c.generated_text)
            .ok_or_else(|| "model returned no candidates".to_string());
    }
    serde_json::from_str::<HfGeneratedText>(body)
        .map(|c| c.generated_text)
        .map_err(|e| format!("unexpected response shape: {}", e))
}

/// Text classifier over the Hugging Face Inference API.
pub struct HfTextClassifier {
    client: Client,
    config: ModelConfig,
    base_url: String,
}

impl HfTextClassifier {
    /// Create a classifier for the model named in `config`.
    pub fn new(config: ModelConfig) -> MesaResult<Self> {
        let client = build_client(&config)?;
        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| HF_INFERENCE_API_URL.to_string());

        let mut config = config;
        if config.model.is_empty() {
            config.model = DEFAULT_CLASSIFIER_MODEL.to_string();
        }

        Ok(Self {
            client,
            config,
            base_url,
        })
    }
}

#[async_trait]
impl TextClassifier for HfTextClassifier {
    async fn classify(&self, text: &str) -> MesaResult<Vec<Classification>> {
        let url = format!("{}/models/{}", self.base_url, self.config.model);
        let response = self
            .client
            .post(&url)
            .json(&HfInferenceRequest { inputs: text })
            .send()
            .await
            .map_err(|e| {
                MesaError::classification(&self.config.model, format!("request failed: {}", e))
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            MesaError::classification(&self.config.model, format!("failed to read response: {}", e))
        })?;

        if !status.is_success() {
            return Err(MesaError::classification(
                &self.config.model,
                format!("HTTP {}: {}", status.as_u16(), error_message(&body)),
            ));
        }

        let results = parse_classifications(&body)
            .map_err(|e| MesaError::classification(&self.config.model, e))?;
        tracing::debug!(
            model = %self.config.model,
            results = results.len(),
            "classification complete"
        );
        Ok(results)
    }

    fn model_id(&self) -> &str {
        &self.config.model
    }
}

/// Natural-language-to-SQL translator over the Hugging Face Inference API.
///
/// The generated statement is returned verbatim; callers own execution and
/// its failure handling.
pub struct HfTextToSql {
    client: Client,
    config: ModelConfig,
    base_url: String,
}

impl HfTextToSql {
    /// Create a translator for the model named in `config`.
    pub fn new(config: ModelConfig) -> MesaResult<Self> {
        let client = build_client(&config)?;
        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| HF_INFERENCE_API_URL.to_string());

        let mut config = config;
        if config.model.is_empty() {
            config.model = DEFAULT_TRANSLATOR_MODEL.to_string();
        }

        Ok(Self {
            client,
            config,
            base_url,
        })
    }

    /// Serialize the question and table schema into the single input string
    /// text-to-SQL models are trained on.
    fn render_prompt(question: &str, table: &TableSchema) -> String {
        format!(
            "{} | {} : {}",
            question,
            table.table,
            table.columns.join(", ")
        )
    }
}

#[async_trait]
impl TextToSql for HfTextToSql {
    async fn translate(&self, question: &str, table: &TableSchema) -> MesaResult<String> {
        let prompt = Self::render_prompt(question, table);
        let url = format!("{}/models/{}", self.base_url, self.config.model);
        let response = self
            .client
            .post(&url)
            .json(&HfInferenceRequest { inputs: &prompt })
            .send()
            .await
            .map_err(|e| {
                MesaError::translation(&self.config.model, format!("request failed: {}", e))
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            MesaError::translation(&self.config.model, format!("failed to read response: {}", e))
        })?;

        if !status.is_success() {
            return Err(MesaError::translation(
                &self.config.model,
                format!("HTTP {}: {}", status.as_u16(), error_message(&body)),
            ));
        }

        let sql = parse_generated_text(&body)
            .map_err(|e| MesaError::translation(&self.config.model, e))?;
        tracing::debug!(model = %self.config.model, %sql, "translation complete");
        Ok(sql.trim().to_string())
    }

    fn model_id(&self) -> &str {
        &self.config.model
    }
}
