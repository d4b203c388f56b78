//! Ollama API provider
//!
//! Implementation of the LLM backend for a locally served Ollama model.
//! Talks to the `/api/generate` endpoint with streaming disabled, so one
//! request maps to one complete reply.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::context::Prompt;
use crate::llm::{Backend, LlmError};

/// Prompt template handed to the model on every turn
const PROMPT_TEMPLATE: &str = "\
Answer the question below:
Previous conversation context: {context}
Question: {question}
Answer:
";

/// Ollama generate request structure
#[derive(Debug, Serialize)]
struct OllamaGenerateRequest {
    model: String,
    prompt: String,
    stream: bool,
}

/// Ollama generate response structure
#[derive(Debug, Deserialize)]
struct OllamaGenerateResponse {
    #[allow(dead_code)]
    #[serde(default)]
    model: String,
    response: String,
    #[allow(dead_code)]
    #[serde(default)]
    done: bool,
}

/// Error body Ollama returns on failed requests
#[derive(Debug, Deserialize)]
struct OllamaErrorResponse {
    error: String,
}

/// Implementation of the LLM backend for Ollama
#[derive(Debug)]
pub struct OllamaBackend {
    client: reqwest::Client,
    endpoint: String,
    model_name: String,
}

impl OllamaBackend {
    /// Create a new Ollama client
    pub fn new(endpoint: String, model_name: String) -> Result<Self, LlmError> {
        if endpoint.trim().is_empty() {
            return Err(LlmError::Config("Ollama endpoint must not be empty".into()));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(180)) // Standard timeout
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            model_name,
        })
    }

    /// Render the prompt payload into the flat template Ollama expects
    fn render_prompt(&self, prompt: &Prompt) -> String {
        PROMPT_TEMPLATE
            .replace("{context}", &prompt.context)
            .replace("{question}", &prompt.question)
    }
}

#[async_trait]
impl Backend for OllamaBackend {
    async fn complete(&self, prompt: &Prompt) -> Result<String, LlmError> {
        let request = OllamaGenerateRequest {
            model: self.model_name.clone(),
            prompt: self.render_prompt(prompt),
            stream: false,
        };

        let api_url = format!("{}/api/generate", self.endpoint);
        let response = self
            .client
            .post(&api_url)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<OllamaErrorResponse>(&body)
                .map(|e| e.error)
                .unwrap_or(body);
            return Err(LlmError::Api(format!("{}: {}", status, detail)));
        }

        let parsed: OllamaGenerateResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Api(format!("unexpected response body: {}", e)))?;

        Ok(parsed.response)
    }

    fn name(&self) -> &str {
        "Ollama"
    }

    fn model(&self) -> &str {
        &self.model_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_context_and_question_into_template() {
        let backend =
            OllamaBackend::new("http://localhost:11434".into(), "llama3.2:latest".into()).unwrap();
        let prompt = Prompt {
            context: "\nUser: hi\nBot: hello".to_string(),
            question: "how are you?".to_string(),
        };

        let rendered = backend.render_prompt(&prompt);
        assert!(rendered.contains("Previous conversation context: \nUser: hi\nBot: hello"));
        assert!(rendered.contains("Question: how are you?"));
        assert!(rendered.trim_end().ends_with("Answer:"));
    }

    #[test]
    fn trailing_slash_is_stripped_from_endpoint() {
        let backend =
            OllamaBackend::new("http://localhost:11434/".into(), "llama3.2:latest".into()).unwrap();
        assert_eq!(backend.endpoint, "http://localhost:11434");
    }

    #[test]
    fn empty_endpoint_is_a_config_error() {
        let err = OllamaBackend::new("  ".into(), "llama3.2:latest".into()).unwrap_err();
        assert!(matches!(err, LlmError::Config(_)));
    }

    #[test]
    fn generate_request_serializes_with_stream_disabled() {
        let request = OllamaGenerateRequest {
            model: "llama3.2:latest".into(),
            prompt: "Answer:".into(),
            stream: false,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "llama3.2:latest");
        assert_eq!(json["stream"], false);
    }
}
