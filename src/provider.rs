//! Concrete [`ModelClient`] backends.
//!
//! `openai` speaks the chat completions API over reqwest, which also covers
//! local servers such as Ollama. `gemini` goes through rstructor.

use crate::agent::{AgentError, ModelClient};
use crate::config::{AgentConfig, Config, Provider};
use async_trait::async_trait;
use reqwest::Client;
use rstructor::{GeminiClient, GeminiModel, LLMClient};
use serde::{Deserialize, Serialize};

/// User-Agent string sent with model requests
const USER_AGENT: &str = concat!("summa-digest/", env!("CARGO_PKG_VERSION"));

/// Build the client selected by `config.agent.provider`
pub fn from_config(config: &Config) -> Result<Box<dyn ModelClient>, AgentError> {
    let api_key = config.api_key()?;
    let client: Box<dyn ModelClient> = match config.provider()? {
        Provider::OpenAi => Box::new(OpenAiProvider::new(&config.agent, api_key)?),
        Provider::Gemini => {
            // api_key() guarantees a key for gemini
            let key = api_key.unwrap_or_default();
            Box::new(GeminiProvider::new(&config.agent, key))
        }
    };
    tracing::info!(
        provider = %config.agent.provider,
        model = %config.agent.model,
        "model client ready"
    );
    Ok(client)
}

/// OpenAI-compatible chat completions client
pub struct OpenAiProvider {
    client: Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiProvider {
    pub fn new(config: &AgentConfig, api_key: Option<&str>) -> Result<Self, AgentError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| AgentError::RequestFailed(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            model: config.model.clone(),
            api_key: api_key.map(str::to_string),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ModelClient for OpenAiProvider {
    async fn invoke(&self, prompt: &str) -> Result<String, AgentError> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            stream: false,
        };

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AgentError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(AgentError::RequestFailed(format!("HTTP {}: {}", status, detail)));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| AgentError::ParseError(e.to_string()))?;
        reply_text(chat)
    }
}

fn reply_text(chat: ChatResponse) -> Result<String, AgentError> {
    chat.choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| AgentError::ParseError("response has no message content".to_string()))
}

/// Gemini client via rstructor
pub struct GeminiProvider {
    api_key: String,
    model: String,
}

impl GeminiProvider {
    pub fn new(config: &AgentConfig, api_key: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            model: config.model.clone(),
        }
    }
}

#[async_trait]
impl ModelClient for GeminiProvider {
    async fn invoke(&self, prompt: &str) -> Result<String, AgentError> {
        let client = GeminiClient::new(self.api_key.as_str())
            .map_err(|e| AgentError::RequestFailed(e.to_string()))?
            .model(parse_gemini_model(&self.model));

        let result = client
            .generate_with_metadata(prompt)
            .await
            .map_err(|e| AgentError::RequestFailed(e.to_string()))?;

        Ok(result.text)
    }
}

/// Parse a model string into a GeminiModel
fn parse_gemini_model(model: &str) -> GeminiModel {
    match model {
        "gemini-2.5-flash" => GeminiModel::Gemini25Flash,
        "gemini-2.5-pro" => GeminiModel::Gemini25Pro,
        _ => GeminiModel::Gemini20Flash,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_base_url() {
        let mut agent = AgentConfig::default();
        agent.base_url = "http://localhost:11434/v1/".to_string();
        let provider = OpenAiProvider::new(&agent, None).unwrap();
        assert_eq!(provider.endpoint(), "http://localhost:11434/v1/chat/completions");
    }

    #[test]
    fn test_reply_text_reads_first_choice() {
        let chat: ChatResponse = serde_json::from_str(
            r#"{"choices": [{"message": {"role": "assistant", "content": "{\"heading\": \"H\"}"}}]}"#,
        )
        .unwrap();
        assert_eq!(reply_text(chat).unwrap(), "{\"heading\": \"H\"}");
    }

    #[test]
    fn test_reply_text_without_choices() {
        let chat: ChatResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(matches!(reply_text(chat), Err(AgentError::ParseError(_))));
    }

    #[test]
    fn test_from_config_requires_gemini_key() {
        let mut config = Config::default();
        config.agent.provider = "gemini".to_string();
        config.api.gemini_key = None;
        assert!(matches!(
            from_config(&config),
            Err(AgentError::ConfigError(_))
        ));
    }

    #[test]
    fn test_from_config_openai_without_key() {
        let config = Config::default();
        assert!(from_config(&config).is_ok());
    }
}
