use crate::config::Config;
use crate::types::{RelayError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// System instruction for the translation/summarization call: condense the
/// English abstract into Japanese for an academic audience, ~100 characters,
/// answer 要約なし when no abstract is present.
const SYSTEM_PROMPT: &str = "あなたは高度な英語-日本語翻訳者です。提供された英語の論文要旨を学術的な聴衆に向けて日本語に要約してください。要約は100文字以内に抑え、論文の核心を簡潔に表現してください。文字数の制限は論文の内容の複雑さによって柔軟に調整可能です。要約が不可能な場合、または「Abstract not found.」と入力された場合は、「要約なし」と返してください。論文要旨が短い場合、直接的な日本語訳を提供してください。プロセスの結果として、要約または翻訳されたテキストのみを返すようにしてください。「要旨:」という見出しを付けることは禁止します。";

const ANTHROPIC_VERSION: &str = "vertex-2023-10-16";
const MAX_TOKENS: u32 = 2048;

/// Remote translation/summarization seam. A failure here aborts only the
/// entry being summarized, never the delivery loop.
#[async_trait]
pub trait Summarize: Send + Sync {
    async fn summarize(&self, content: &str, summary: &str) -> Result<String>;
}

/// Claude on Vertex AI, called through the `rawPredict` messages endpoint.
pub struct VertexSummarizer {
    client: reqwest::Client,
    endpoint: String,
    auth_token: String,
    model: String,
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    anthropic_version: &'a str,
    max_tokens: u32,
    temperature: f64,
    system: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    text: String,
}

impl VertexSummarizer {
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()?;

        let endpoint = format!(
            "https://{region}-aiplatform.googleapis.com/v1/projects/{project}/locations/{region}/publishers/anthropic/models/{model}:rawPredict",
            region = config.region,
            project = config.project_id,
            model = config.model,
        );

        Ok(Self {
            client,
            endpoint,
            auth_token: config.auth_token.clone(),
            model: config.model.clone(),
        })
    }
}

#[async_trait]
impl Summarize for VertexSummarizer {
    async fn summarize(&self, content: &str, summary: &str) -> Result<String> {
        let user_message = format!("Content: {}\nSuppl: {}", content, summary);
        debug!(
            "Summarizing {} chars with {}",
            user_message.len(),
            self.model
        );

        let request = MessagesRequest {
            anthropic_version: ANTHROPIC_VERSION,
            max_tokens: MAX_TOKENS,
            temperature: 0.0,
            system: SYSTEM_PROMPT,
            messages: vec![Message {
                role: "user",
                content: &user_message,
            }],
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.auth_token)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(RelayError::Summarizer(format!("HTTP {}: {}", status, body)));
        }

        let body: MessagesResponse = response.json().await?;
        match body.content.first() {
            Some(block) => Ok(block.text.clone()),
            None => Err(RelayError::Summarizer(
                "Empty response content".to_string(),
            )),
        }
    }
}
