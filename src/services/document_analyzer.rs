//! 文档分析服务 - 业务能力层
//!
//! 把整份文档（Markdown 文本或页面图片）连同固定的分类+提取提示词发给模型，
//! 解析模型返回的 JSON。任何失败都记录在结果里，不向上抛出。

use std::sync::Arc;

use serde_json::{Map, Value as JsonValue};
use tracing::{debug, info, warn};

use crate::clients::{ContentPart, LanguageModel};
use crate::context::ServiceContext;
use crate::error::{AppResult, LlmError};
use crate::models::category::{DocCategory, UNKNOWN_CATEGORY};
use crate::models::{AnalysisResult, PageImage};
use crate::utils::truncate_text;

/// 文本模式下正文前的标题
const DOCUMENT_HEADER: &str = "\n\nDocument Content (Markdown):\n";

/// 分析输入
#[derive(Debug, Clone, Copy)]
pub enum AnalysisInput<'a> {
    /// 转换器得到的 Markdown 文本
    Text(&'a str),
    /// 视觉模式下的全部页面
    Images(&'a [PageImage]),
}

pub struct DocumentAnalyzer {
    llm: Arc<dyn LanguageModel>,
    has_credential: bool,
    max_text_chars: usize,
}

impl DocumentAnalyzer {
    pub fn new(ctx: &ServiceContext) -> Self {
        Self {
            llm: ctx.llm.clone(),
            has_credential: ctx.has_credential(),
            max_text_chars: ctx.config.max_text_chars,
        }
    }

    /// 分析整份文档
    ///
    /// 未配置凭证时直接返回 "Config Error"，不调用模型。
    pub async fn analyze(&self, input: AnalysisInput<'_>) -> AnalysisResult {
        if !self.has_credential {
            return AnalysisResult::config_error(
                "❌ Error: Server Environment Variable 'GEMINI_API_KEY' not set.",
            );
        }

        match self.try_analyze(input).await {
            Ok(result) => {
                info!("✓ 文档分类: {}", result.doc_type);
                result
            }
            Err(e) => {
                warn!("⚠️ 模型分析失败: {}", e);
                AnalysisResult::error(e)
            }
        }
    }

    async fn try_analyze(&self, input: AnalysisInput<'_>) -> AppResult<AnalysisResult> {
        let content = match input {
            AnalysisInput::Text(text) => {
                let clipped: String = text.chars().take(self.max_text_chars).collect();
                vec![ContentPart::Text(format!("{}{}", DOCUMENT_HEADER, clipped))]
            }
            AnalysisInput::Images(pages) => {
                pages.iter().cloned().map(ContentPart::Image).collect()
            }
        };

        let response = self.llm.generate(&build_prompt(), &content).await?;
        debug!("分析响应: {}", truncate_text(&response, 200));

        let json_text = strip_code_fence(&response);
        let object: Map<String, JsonValue> = serde_json::from_str(json_text)
            .map_err(|source| LlmError::JsonParseFailed { source })?;

        let result = normalize(&object);
        if result.doc_type != UNKNOWN_CATEGORY
            && DocCategory::parse_label(&result.doc_type).is_none()
        {
            warn!("⚠️ 模型返回了未知的文档类别: {}", result.doc_type);
        }
        Ok(result)
    }
}

/// 分类 + 提取提示词
pub fn build_prompt() -> String {
    let categories: Vec<String> = DocCategory::all()
        .map(|c| format!("   {}. {}", c.number(), c.name()))
        .collect();

    format!(
        r#"
You are an intelligent document processing AI. Analyze the provided document content.

Task 1: Classify the document into ONE of these categories:
{}
   (If unsure, use "{}")

Task 2: Extract specific information based on the identified category:
   - If Type 1: {}
   - If Type 2 or 6: {}
   - If Type 3: {}
   - If Type 4: {}
   - Else: Return "No specific info".

Output Requirements:
Return ONLY a valid JSON object with this structure:
{{
    "doc_type": "Number + Category Name",
    "extracted_info": "..."
}}
"#,
        categories.join("\n"),
        UNKNOWN_CATEGORY,
        rule(1),
        rule(2),
        rule(3),
        rule(4),
    )
}

fn rule(number: u8) -> &'static str {
    DocCategory::from_number(number)
        .map(DocCategory::extraction_rule)
        .unwrap_or("Return \"No specific info\".")
}

/// 去掉 Markdown 代码块标记，优先 ```json
pub fn strip_code_fence(text: &str) -> &str {
    let inner = if let Some((_, rest)) = text.split_once("```json") {
        rest.split("```").next().unwrap_or(rest)
    } else if text.contains("```") {
        text.split("```").nth(1).unwrap_or(text)
    } else {
        text
    };
    inner.trim()
}

/// 缺失字段补默认值，非字符串值转成 JSON 文本
fn normalize(object: &Map<String, JsonValue>) -> AnalysisResult {
    let field = |key: &str, default: &str| match object.get(key) {
        Some(JsonValue::String(s)) => s.clone(),
        Some(JsonValue::Null) | None => default.to_string(),
        Some(other) => other.to_string(),
    };
    AnalysisResult::new(field("doc_type", UNKNOWN_CATEGORY), field("extracted_info", "-"))
}
