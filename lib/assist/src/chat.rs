//! OpenAI-compatible chat-completions client
//!
//! One prompt, one reply. Every failure is logged and surfaces to callers as
//! "no match" or an empty summary.

use crate::assistant::{Candidate, QueryResolver, SummaryGenerator, SummaryRequest};
use crate::error::{AssistError, Result};
use async_trait::async_trait;
use prodsim_core::Product;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_API_BASE: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";

/// Sampling settings for one kind of prompt
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sampling {
    pub temperature: f32,
    pub max_tokens: u32,
}

pub const RESOLVE_SAMPLING: Sampling = Sampling {
    temperature: 0.3,
    max_tokens: 100,
};
pub const COMPARISON_SAMPLING: Sampling = Sampling {
    temperature: 0.7,
    max_tokens: 200,
};
pub const EXPLANATION_SAMPLING: Sampling = Sampling {
    temperature: 0.7,
    max_tokens: 150,
};

/// Number of recommended names mentioned in an explanation prompt
const EXPLAINED_RECOMMENDATIONS: usize = 3;

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

pub struct ChatAssistant {
    http: Client,
    api_base: String,
    api_key: String,
    model: String,
    timeout: Duration,
}

impl ChatAssistant {
    pub fn new(
        api_base: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            api_base: api_base.into(),
            api_key: api_key.into(),
            model: model.into(),
            timeout,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.api_base.trim_end_matches('/'))
    }

    /// Send a single user prompt and return the trimmed reply text
    pub async fn complete(&self, prompt: &str, sampling: Sampling) -> Result<String> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: sampling.temperature,
            max_tokens: sampling.max_tokens,
        };

        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AssistError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: ChatCompletionResponse = response.json().await.map_err(|e| self.classify(e))?;
        reply_text(body).ok_or(AssistError::EmptyResponse)
    }

    fn classify(&self, err: reqwest::Error) -> AssistError {
        if err.is_timeout() {
            AssistError::Timeout(self.timeout)
        } else {
            AssistError::Request(err)
        }
    }
}

#[async_trait]
impl QueryResolver for ChatAssistant {
    async fn resolve(&self, query: &str, candidates: &[Candidate]) -> Option<String> {
        let prompt = resolve_prompt(query, candidates);
        match self.complete(&prompt, RESOLVE_SAMPLING).await {
            Ok(reply) => {
                let name = clean_product_name(&reply);
                debug!("Resolver suggested {:?} for {:?}", name, query);
                name
            }
            Err(e) => {
                warn!("Query resolution failed, falling back to substring search: {}", e);
                None
            }
        }
    }
}

#[async_trait]
impl SummaryGenerator for ChatAssistant {
    async fn generate(&self, request: SummaryRequest) -> String {
        let (prompt, sampling) = match &request {
            SummaryRequest::Comparison { products } => {
                if products.is_empty() {
                    return String::new();
                }
                (comparison_prompt(products), COMPARISON_SAMPLING)
            }
            SummaryRequest::Explanation {
                original,
                recommended,
            } => (explanation_prompt(original, recommended), EXPLANATION_SAMPLING),
        };

        match self.complete(&prompt, sampling).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Summary generation failed: {}", e);
                String::new()
            }
        }
    }
}

fn reply_text(response: ChatCompletionResponse) -> Option<String> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
}

/// Strip whitespace and wrapping quotes from a suggested product name
pub fn clean_product_name(reply: &str) -> Option<String> {
    let name = reply
        .trim()
        .trim_matches(|c| c == '"' || c == '\'' || c == '`')
        .trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

pub fn resolve_prompt(query: &str, candidates: &[Candidate]) -> String {
    let product_list = candidates
        .iter()
        .map(|c| format!("{} | {} | {}", c.name, c.category, c.brand))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Given this user query: \"{query}\"\n\n\
         Here are some available products (Name | Category | Brand):\n\
         {product_list}\n\n\
         Based on the query, identify the most relevant product name that matches what the user is looking for.\n\
         Return ONLY the exact product name from the list, nothing else."
    )
}

fn format_rating(rating: Option<f64>) -> String {
    rating.map_or_else(|| "n/a".to_string(), |r| r.to_string())
}

pub fn comparison_prompt(products: &[Product]) -> String {
    let details = products
        .iter()
        .map(|p| {
            format!(
                "- {}: {}, Brand: {}, Rating: {}",
                p.name,
                p.category,
                p.brand,
                format_rating(p.rating)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Compare these products and provide a brief, helpful summary (2-3 sentences) highlighting key differences:\n\n\
         {details}\n\n\
         Keep it concise and consumer-friendly."
    )
}

pub fn explanation_prompt(original: &Product, recommended: &[String]) -> String {
    let names = recommended
        .iter()
        .take(EXPLAINED_RECOMMENDATIONS)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Briefly explain (1-2 sentences) why these products are recommended for someone interested in \"{}\" ({}, {}):\n\n\
         Recommendations: {}\n\n\
         Be specific and helpful.",
        original.name, original.category, original.brand, names
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_prompt_lists_candidates() {
        let candidates = vec![
            Candidate::from(&Product::new("Red Shoe").with_category("Footwear").with_brand("Acme")),
            Candidate::from(&Product::new("Red Hat")),
        ];
        let prompt = resolve_prompt("something red for my feet", &candidates);
        assert!(prompt.contains("\"something red for my feet\""));
        assert!(prompt.contains("Red Shoe | Footwear | Acme\nRed Hat |  | "));
        assert!(prompt.ends_with("nothing else."));
    }

    #[test]
    fn test_comparison_prompt_formats_each_product() {
        let products = vec![
            Product::new("Lamp").with_category("Home").with_brand("Lumo").with_rating(4.5),
            Product::new("Mug"),
        ];
        let prompt = comparison_prompt(&products);
        assert!(prompt.contains("- Lamp: Home, Brand: Lumo, Rating: 4.5\n- Mug: , Brand: , Rating: n/a"));
    }

    #[test]
    fn test_explanation_prompt_mentions_top_three() {
        let original = Product::new("Lamp").with_category("Home").with_brand("Lumo");
        let recommended: Vec<String> = ["A", "B", "C", "D"].iter().map(|s| s.to_string()).collect();
        let prompt = explanation_prompt(&original, &recommended);
        assert!(prompt.contains("\"Lamp\" (Home, Lumo)"));
        assert!(prompt.contains("Recommendations: A, B, C\n"));
        assert!(!prompt.contains(", D"));
    }

    #[test]
    fn test_clean_product_name() {
        assert_eq!(clean_product_name("  \"Red Shoe\"\n"), Some("Red Shoe".to_string()));
        assert_eq!(clean_product_name("`Lamp`"), Some("Lamp".to_string()));
        assert_eq!(clean_product_name("  \"\" "), None);
    }

    #[test]
    fn test_reply_text_parsing() {
        let body: ChatCompletionResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"  Red Shoe \n"}}]}"#,
        )
        .unwrap();
        assert_eq!(reply_text(body), Some("Red Shoe".to_string()));

        let empty: ChatCompletionResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert_eq!(reply_text(empty), None);

        let null: ChatCompletionResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":null}}]}"#).unwrap();
        assert_eq!(reply_text(null), None);
    }

    #[test]
    fn test_request_serialization() {
        let request = ChatCompletionRequest {
            model: DEFAULT_MODEL,
            messages: vec![ChatMessage {
                role: "user",
                content: "hi",
            }],
            temperature: RESOLVE_SAMPLING.temperature,
            max_tokens: RESOLVE_SAMPLING.max_tokens,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "llama-3.1-8b-instant");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["max_tokens"], 100);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_degrades() {
        let assistant = ChatAssistant::new(
            "http://127.0.0.1:9",
            "test-key",
            DEFAULT_MODEL,
            Duration::from_millis(500),
        )
        .unwrap();
        let candidates = vec![Candidate::from(&Product::new("Lamp"))];
        assert_eq!(assistant.resolve("lamp", &candidates).await, None);

        let request = SummaryRequest::Comparison {
            products: vec![Product::new("Lamp")],
        };
        assert_eq!(assistant.generate(request).await, "");
    }
}
