//! LLM API 客户端
//!
//! 通过 OpenAI 兼容接口调用生成式模型（Gemini 的 OpenAI 兼容端点等）。
//! 内容可以是文本，也可以是图片；图片以 base64 data URL 形式发送。

use std::time::Duration;

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestMessageContentPartImage,
        ChatCompletionRequestMessageContentPartText, ChatCompletionRequestUserMessageArgs,
        ChatCompletionRequestUserMessageContent, ChatCompletionRequestUserMessageContentPart,
        CreateChatCompletionRequestArgs, ImageDetail, ImageUrl,
    },
    Client,
};
use async_trait::async_trait;
use base64::Engine;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult, LlmError};
use crate::models::PageImage;

/// 发送给模型的一段内容
#[derive(Debug, Clone)]
pub enum ContentPart {
    Text(String),
    Image(PageImage),
}

/// 生成式语言模型
///
/// 返回值是未经校验的自由文本，调用方需要自行解析。
#[async_trait]
pub trait LanguageModel: Send + Sync {
    fn model_name(&self) -> &str;

    async fn generate(&self, prompt: &str, content: &[ContentPart]) -> AppResult<String>;
}

/// OpenAI 兼容接口的 LLM 客户端
pub struct LlmClient {
    client: Client<OpenAIConfig>,
    model_name: String,
    timeout: Duration,
}

impl LlmClient {
    /// 创建新的 LLM 客户端
    ///
    /// 未配置凭证时依然可以创建，调用方在调用前自行检查 `Config::has_credential`。
    pub fn new(config: &Config) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(config.llm_api_key.clone().unwrap_or_default())
            .with_api_base(&config.llm_api_base_url);

        Self {
            client: Client::with_config(openai_config),
            model_name: config.llm_model_name.clone(),
            timeout: Duration::from_secs(config.llm_timeout_secs),
        }
    }

    fn build_user_message(
        &self,
        prompt: &str,
        content: &[ContentPart],
    ) -> AppResult<ChatCompletionRequestMessage> {
        let mut parts: Vec<ChatCompletionRequestUserMessageContentPart> =
            Vec::with_capacity(content.len() + 1);

        parts.push(ChatCompletionRequestUserMessageContentPart::Text(
            ChatCompletionRequestMessageContentPartText {
                text: prompt.to_string(),
            },
        ));

        for part in content {
            let item = match part {
                ContentPart::Text(text) => ChatCompletionRequestUserMessageContentPart::Text(
                    ChatCompletionRequestMessageContentPartText { text: text.clone() },
                ),
                ContentPart::Image(image) => {
                    ChatCompletionRequestUserMessageContentPart::ImageUrl(
                        ChatCompletionRequestMessageContentPartImage {
                            image_url: ImageUrl {
                                url: to_data_url(image),
                                detail: Some(ImageDetail::High),
                            },
                        },
                    )
                }
            };
            parts.push(item);
        }

        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(ChatCompletionRequestUserMessageContent::Array(parts))
            .build()
            .map_err(|e| LlmError::RequestBuildFailed(e.to_string()))?;

        Ok(ChatCompletionRequestMessage::User(user_msg))
    }
}

#[async_trait]
impl LanguageModel for LlmClient {
    fn model_name(&self) -> &str {
        &self.model_name
    }

    async fn generate(&self, prompt: &str, content: &[ContentPart]) -> AppResult<String> {
        let image_count = content
            .iter()
            .filter(|c| matches!(c, ContentPart::Image(_)))
            .count();
        debug!(
            "调用 LLM API，模型: {}，内容 {} 段（图片 {} 张）",
            self.model_name,
            content.len(),
            image_count
        );

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(vec![self.build_user_message(prompt, content)?])
            .temperature(0.1)
            .max_tokens(8192u32)
            .build()
            .map_err(|e| LlmError::RequestBuildFailed(e.to_string()))?;

        let response = tokio::time::timeout(self.timeout, self.client.chat().create(request))
            .await
            .map_err(|_| {
                warn!("LLM API 调用超时: {}秒", self.timeout.as_secs());
                LlmError::Timeout {
                    model: self.model_name.clone(),
                    secs: self.timeout.as_secs(),
                }
            })?
            .map_err(|e| {
                warn!("LLM API 调用失败: {}", e);
                AppError::llm_api_failed(&self.model_name, e)
            })?;

        debug!("LLM API 调用成功");

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| LlmError::EmptyContent {
                model: self.model_name.clone(),
            })?;

        Ok(content.trim().to_string())
    }
}

/// 把页面图片编码为 data URL
pub fn to_data_url(image: &PageImage) -> String {
    format!(
        "data:image/png;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(&image.png)
    )
}
