//! OCR 关键字检查
//!
//! 用 tesseract 逐页识别 PDF，检查文件名关键字是否出现在识别文本中。
//! 与主流程的文件名检查使用同一套关键字规则。

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::clients::{OcrEngine, PageRenderer};
use crate::context::ServiceContext;
use crate::error::AppResult;
use crate::services::filename_check::{filename_keywords, keyword_hits};

/// 单个关键字的命中情况
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordHit {
    pub keyword: String,
    pub found: bool,
}

/// 检查结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CheckVerdict {
    Pass,
    Fail,
}

#[derive(Debug, Clone, Serialize)]
pub struct OcrCheckReport {
    pub filename: String,
    pub total_pages: usize,
    pub keywords: Vec<KeywordHit>,
    pub verdict: CheckVerdict,
    pub text: String,
}

pub struct OcrKeywordCheck {
    renderer: Arc<dyn PageRenderer>,
    ocr: Arc<dyn OcrEngine>,
    languages: String,
}

impl OcrKeywordCheck {
    pub fn new(ctx: &ServiceContext) -> Self {
        Self {
            renderer: ctx.renderer.clone(),
            ocr: ctx.ocr.clone(),
            languages: ctx.config.ocr_languages.clone(),
        }
    }

    /// 渲染并识别 PDF 的每一页，然后比对文件名关键字
    ///
    /// `filename` 为用于取关键字的文件名，可以与 `path` 的文件名不同（例如上传的临时文件）。
    pub async fn check(&self, path: &Path, filename: &str) -> AppResult<OcrCheckReport> {
        let pages = self.renderer.render_pdf(path).await?;
        info!("🔍 OCR 检查: {} ({} 页)", filename, pages.len());

        let mut texts = Vec::with_capacity(pages.len());
        for page in &pages {
            let text = self.ocr.ocr(page, &self.languages).await?;
            texts.push(text);
        }
        let text = texts.join("\n");

        Ok(build_report(filename, pages.len(), text))
    }
}

fn build_report(filename: &str, total_pages: usize, text: String) -> OcrCheckReport {
    let keywords: Vec<KeywordHit> = keyword_hits(&text, &filename_keywords(filename))
        .into_iter()
        .map(|(keyword, found)| KeywordHit { keyword, found })
        .collect();

    let verdict = if text.trim().is_empty() {
        warn!("⚠️ OCR 未识别出任何文本: {}", filename);
        CheckVerdict::Fail
    } else if keywords.iter().any(|k| k.found) {
        CheckVerdict::Pass
    } else {
        CheckVerdict::Fail
    };

    OcrCheckReport {
        filename: filename.to_string(),
        total_pages,
        keywords,
        verdict,
        text,
    }
}
