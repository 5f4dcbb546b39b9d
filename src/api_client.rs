use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

/// Errors fall into two classes the UI treats differently: `Api` carries a
/// structured `{error}` message from the server and is shown verbatim;
/// everything else is a communication failure and is shown with a generic
/// prefix.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Api(String),
    #[error("communication error: server returned status {status}")]
    Http { status: u16 },
    #[error("communication error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("communication error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ApiError {
    pub fn is_communication(&self) -> bool {
        !matches!(self, ApiError::Api(_))
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum VariableType {
    Integer,
    Number,
    Boolean,
    Select,
    Array,
    Datetime,
    // Unknown type strings degrade to plain string input.
    #[default]
    #[serde(other)]
    String,
}

impl fmt::Display for VariableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VariableType::Integer => "integer",
            VariableType::Number => "number",
            VariableType::Boolean => "boolean",
            VariableType::Select => "select",
            VariableType::Array => "array",
            VariableType::Datetime => "datetime",
            VariableType::String => "string",
        };
        f.write_str(name)
    }
}

/// Schema entry describing one template placeholder, as extracted by the
/// backend from `{#- @variable ... -#}` definitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct VariableSpec {
    pub name: String,
    #[serde(rename = "type", default)]
    pub var_type: VariableType,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub default: Option<Value>,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: i64,
    pub name: String,
    pub template: String,
    #[serde(default)]
    pub variables: Vec<VariableSpec>,
}

/// Response to POST/PUT on a template: the stored name plus the variables
/// the backend re-extracted from the body.
#[derive(Debug, Clone, Deserialize)]
pub struct SavedTemplate {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub variables: Vec<VariableSpec>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeletedTemplate {
    pub message: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
struct RenderedText {
    result: String,
}

#[derive(Debug, Clone, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Serialize)]
struct TemplatePayload<'a> {
    name: &'a str,
    template: &'a str,
}

/// Classify a non-2xx response: a parseable `{error}` body is a business
/// error surfaced verbatim, anything else is a communication failure.
pub(crate) fn error_from_parts(status: u16, body: &str) -> ApiError {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => ApiError::Api(parsed.error),
        Err(_) => ApiError::Http { status },
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn decode<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(error_from_parts(status.as_u16(), &body));
        }
        Ok(serde_json::from_str(&body)?)
    }

    pub async fn list_templates(&self) -> Result<Vec<Template>> {
        let url = self.url("/api/templates");
        log::debug!("GET {url}");
        let response = self.client.get(&url).send().await?;
        Self::decode(response).await
    }

    pub async fn get_template(&self, id: i64) -> Result<Template> {
        let url = self.url(&format!("/api/templates/{id}"));
        log::debug!("GET {url}");
        let response = self.client.get(&url).send().await?;
        Self::decode(response).await
    }

    pub async fn create_template(&self, name: &str, template: &str) -> Result<SavedTemplate> {
        let url = self.url("/api/templates");
        log::debug!("POST {url}");
        let response = self
            .client
            .post(&url)
            .json(&TemplatePayload { name, template })
            .send()
            .await?;
        Self::decode(response).await
    }

    pub async fn update_template(&self, id: i64, name: &str, template: &str) -> Result<SavedTemplate> {
        let url = self.url(&format!("/api/templates/{id}"));
        log::debug!("PUT {url}");
        let response = self
            .client
            .put(&url)
            .json(&TemplatePayload { name, template })
            .send()
            .await?;
        Self::decode(response).await
    }

    pub async fn delete_template(&self, id: i64) -> Result<DeletedTemplate> {
        let url = self.url(&format!("/api/templates/{id}"));
        log::debug!("DELETE {url}");
        let response = self.client.delete(&url).send().await?;
        Self::decode(response).await
    }

    /// Submit raw form inputs for rendering. Values are passed exactly as
    /// collected; type conversion and array splitting happen server-side.
    pub async fn render_template(&self, id: i64, inputs: &Map<String, Value>) -> Result<String> {
        let url = self.url(&format!("/api/templates/{id}/render"));
        log::debug!("POST {url}");
        let response = self.client.post(&url).json(inputs).send().await?;
        let rendered: RenderedText = Self::decode(response).await?;
        Ok(rendered.result)
    }
}
