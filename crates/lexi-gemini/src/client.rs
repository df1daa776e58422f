//! Gemini analysis client implementation

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::time::timeout;
use tracing::{info, warn};

use lexi_core::{AnalysisResult, DocumentAnalyzer, Error, Result, parse_analysis, response_schema};

use crate::config::GeminiConfig;

/// Persona and output constraints sent with every request
pub const SYSTEM_INSTRUCTION: &str = "\
You are a Senior Legal Consultant & Corporate Governance Expert for LexiGuard.
Your objective is to analyze legal documents (contracts, NDAs, compliance filings) and provide a structured \"Plain English\" summary.

Contextual Expertise:
- Specialist in East African and International Law frameworks.
- Expert in ESG (Environmental, Social, and Governance) and EDGE-certified sustainability reporting.
- Focused on risk mitigation, document accessibility (Lean UX), and regulatory compliance.

Constraint Checklist & Confidence Score:
1. Plain English Summary? Yes.
2. Risk Assessment? Yes.
3. Action Items? Yes.
4. ESG Alignment? Yes.

Output must be strict JSON. Do not provide legal advice; assume a standard AI disclaimer is displayed by the frontend.";

/// Prefix placed before the document text in the user turn
pub const USER_PROMPT_PREFIX: &str = "Analyze the following legal text:\n\n";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub system_instruction: Content,
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_mime_type: String,
    pub response_schema: Value,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

impl Content {
    fn text(role: Option<&str>, text: impl Into<String>) -> Self {
        Self {
            role: role.map(str::to_string),
            parts: vec![Part {
                text: Some(text.into()),
            }],
        }
    }
}

impl GenerateContentRequest {
    /// Build the analysis request for one document
    pub fn for_document(document_text: &str) -> Self {
        Self {
            system_instruction: Content::text(None, SYSTEM_INSTRUCTION),
            contents: vec![Content::text(
                Some("user"),
                format!("{}{}", USER_PROMPT_PREFIX, document_text),
            )],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: response_schema(),
            },
        }
    }
}

impl GenerateContentResponse {
    /// Text of the first candidate, or `None` when it carries no non-blank text
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();

        if text.trim().is_empty() { None } else { Some(text) }
    }
}

/// One request/response exchange with the model service
#[async_trait]
pub trait GenerateTransport: Send + Sync {
    async fn generate(
        &self,
        config: &GeminiConfig,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse>;
}

/// HTTP transport backed by reqwest
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        let client = Client::builder().build().map_err(Error::transport)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl GenerateTransport for HttpTransport {
    async fn generate(
        &self,
        config: &GeminiConfig,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let response = self
            .client
            .post(config.endpoint())
            .header("Content-Type", "application/json")
            .header("x-goog-api-key", &config.api_key)
            .json(request)
            .send()
            .await
            .map_err(Error::transport)?;

        if !response.status().is_success() {
            let status = response.status();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(Error::Service {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<GenerateContentResponse>()
            .await
            .map_err(Error::transport)
    }
}

/// Gemini document analysis client
///
/// The credential is resolved on every call, so a missing key is reported
/// for that call instead of at construction.
pub struct GeminiClient<T: GenerateTransport = HttpTransport> {
    config: Option<GeminiConfig>,
    model: String,
    transport: T,
}

impl GeminiClient<HttpTransport> {
    /// Create a client that reads its configuration from the environment on each call
    pub fn from_env() -> Result<Self> {
        Ok(Self::with_transport(HttpTransport::new()?))
    }

    /// Create a client with a fixed configuration
    pub fn new(config: GeminiConfig) -> Result<Self> {
        Ok(Self::with_transport(HttpTransport::new()?).with_config(config))
    }
}

impl<T: GenerateTransport> GeminiClient<T> {
    pub fn with_transport(transport: T) -> Self {
        Self {
            config: None,
            model: GeminiConfig::model_from_env(),
            transport,
        }
    }

    /// Pin the configuration instead of reading the environment per call
    pub fn with_config(mut self, config: GeminiConfig) -> Self {
        self.model = config.model.clone();
        self.config = Some(config);
        self
    }

    /// Set the model to use for analysis
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn resolve_config(&self) -> Result<GeminiConfig> {
        let mut config = match &self.config {
            Some(config) => config.clone(),
            None => GeminiConfig::from_env()?,
        };
        config.validate()?;
        config.model = self.model.clone();
        Ok(config)
    }

    async fn request_analysis(&self, document_text: &str) -> Result<AnalysisResult> {
        let config = self.resolve_config()?;
        let request = GenerateContentRequest::for_document(document_text);

        info!(
            model = %config.model,
            chars = document_text.chars().count(),
            "Sending document for analysis"
        );

        let response = match timeout(config.timeout(), self.transport.generate(&config, &request)).await {
            Ok(result) => result?,
            Err(_) => return Err(Error::Timeout(config.timeout())),
        };

        let payload = response
            .text()
            .ok_or_else(|| Error::EmptyResponse("No response generated from the model.".to_string()))?;

        parse_analysis(&payload)
    }
}

#[async_trait]
impl<T: GenerateTransport> DocumentAnalyzer for GeminiClient<T> {
    async fn analyze(&self, document_text: &str) -> Result<AnalysisResult> {
        self.request_analysis(document_text)
            .await
            .inspect_err(|e| warn!(kind = ?e.kind(), error = %e, "Analysis failed"))
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}
