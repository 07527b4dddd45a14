//! Groq chat-completions client, the [`ClassifierGateway`] implementation.
//!
//! Each turn sends two messages (the fixed system instruction plus the
//! user utterance) to the Groq API and returns the model's free-form
//! text. Transport and API failures surface as [`ClassifierError`]
//! values; they are never folded into the reply text.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use dispatcher::{ClassifierError, ClassifierGateway};

const BASE_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// System instruction pinning the assistant to the movie domain.
pub const DEFAULT_SYSTEM_PROMPT: &str = "Você é um assistente de filmes que também orquestra \
     ações com segurança. Não forneça respostas de outros assuntos.";

/// Client for the Groq chat-completions API.
#[derive(Clone)]
pub struct GroqClassifier {
    client: Client,
    api_key: String,
    model: String,
    system_prompt: String,
    base_url: String,
}

impl GroqClassifier {
    /// Create a client with the default model and system prompt.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Read the API key from the `GROQ_API_KEY` environment variable.
    pub fn from_env() -> Result<Self, ClassifierError> {
        let api_key = std::env::var("GROQ_API_KEY").map_err(|_| {
            ClassifierError::Transport("GROQ_API_KEY não definida no ambiente".to_string())
        })?;
        Ok(Self::new(api_key))
    }

    /// Override the model after construction.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the system instruction after construction.
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    /// Point the client at a different endpoint (for tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn build_request(&self, utterance: &str) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: self.system_prompt.clone(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: utterance.to_string(),
                },
            ],
        }
    }
}

#[async_trait]
impl ClassifierGateway for GroqClassifier {
    async fn classify(&self, utterance: &str) -> Result<String, ClassifierError> {
        debug!(model = %self.model, "sending utterance to classifier");

        let response = self
            .client
            .post(&self.base_url)
            .bearer_auth(&self.api_key)
            .json(&self.build_request(utterance))
            .send()
            .await
            .map_err(|e| ClassifierError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), "classifier API returned an error");
            return Err(ClassifierError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let completion: ChatCompletion = response
            .json()
            .await
            .map_err(|e| ClassifierError::Transport(e.to_string()))?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
            .ok_or(ClassifierError::EmptyResponse)
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_carries_system_then_user_message() {
        let classifier = GroqClassifier::new("key");
        let request = classifier.build_request("quero o elenco do filme Dune");

        assert_eq!(request.model, DEFAULT_MODEL);
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, "system");
        assert_eq!(request.messages[0].content, DEFAULT_SYSTEM_PROMPT);
        assert_eq!(request.messages[1].role, "user");
        assert_eq!(request.messages[1].content, "quero o elenco do filme Dune");
    }

    #[test]
    fn builders_override_model_and_prompt() {
        let classifier = GroqClassifier::new("key")
            .with_model("llama-3.1-8b-instant")
            .with_system_prompt("Você é um assistente de filmes.");
        let request = classifier.build_request("oi");

        assert_eq!(request.model, "llama-3.1-8b-instant");
        assert_eq!(request.messages[0].content, "Você é um assistente de filmes.");
    }

    #[test]
    fn completion_decodes_first_choice_content() {
        let raw = r#"{
            "id": "chatcmpl-1",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "o usuário quer o elenco"}}
            ]
        }"#;
        let completion: ChatCompletion = serde_json::from_str(raw).unwrap();
        assert_eq!(
            completion.choices[0].message.content,
            "o usuário quer o elenco"
        );
    }
}
