//! 单页识别流程 - 流程层
//!
//! 流程顺序：
//! 1. 页面图片 + 转写提示词 → 模型
//! 2. 解析响应，取 natural_text（缺失时用原始响应）
//! 3. 分块 → 配对 → 层级
//!
//! 模型调用失败直接向上返回，由编排层决定整份文档是否失败。

use std::sync::Arc;

use tracing::{debug, info};

use crate::clients::{ContentPart, LanguageModel};
use crate::context::ServiceContext;
use crate::error::{AppResult, ConfigError};
use crate::models::{PageImage, PageResult};
use crate::services::{build_hierarchy, build_pairs, extract_blocks, parse_model_response};
use crate::utils::truncate_text;
use crate::workflow::page_ctx::PageCtx;

/// 组织架构图转写提示词
pub const TRANSCRIPTION_PROMPT: &str = concat!(
    "Transcribe the text from this organizational chart image exactly as it appears. ",
    "Maintain the line structure. If possible, output the result as a JSON object with keys ",
    "'natural_text' containing the full text."
);

pub struct PageTask {
    llm: Arc<dyn LanguageModel>,
    has_credential: bool,
}

impl PageTask {
    pub fn new(ctx: &ServiceContext) -> Self {
        Self {
            llm: ctx.llm.clone(),
            has_credential: ctx.has_credential(),
        }
    }

    pub async fn run(&self, page: PageImage, ctx: &PageCtx) -> AppResult<PageResult> {
        if !self.has_credential {
            return Err(ConfigError::MissingCredential {
                var_name: "GEMINI_API_KEY".to_string(),
            }
            .into());
        }

        info!("{} 📝 开始转写", ctx);
        let page_number = page.page_number();
        let response = self
            .llm
            .generate(TRANSCRIPTION_PROMPT, &[ContentPart::Image(page)])
            .await?;

        let raw_text = parse_model_response(&response).natural_text(&response);
        debug!("{} 转写文本: {}", ctx, truncate_text(&raw_text, 100));

        let blocks = extract_blocks(&raw_text);
        let pairs = build_pairs(&blocks);
        let hierarchy = build_hierarchy(&blocks);
        info!(
            "{} ✓ 完成: {} 个文本块, {} 对姓名/职位",
            ctx,
            blocks.len(),
            pairs.len()
        );

        Ok(PageResult {
            page: page_number,
            raw_text,
            blocks,
            pairs,
            hierarchy,
        })
    }
}
