//! 文档提交入口 - 编排层
//!
//! ## 职责
//!
//! 1. **输入校验**：文件名、扩展名、空内容，任何处理开始前拒绝
//! 2. **临时文件**：每次提交独占一个临时文件，任何退出路径都会删除
//! 3. **分派**：完整流程走 `ExtractionFlow`，组织架构图走 `PageOrchestrator`
//! 4. **收尾**：组装记录，配置了索引地址时推送记录

use std::path::{Path, PathBuf};

use serde::Serialize;
use tempfile::{Builder, NamedTempFile};
use tracing::{info, warn};

use crate::clients::{decode_image, renderer::looks_like_pdf, IndexClient, SendReport};
use crate::context::ServiceContext;
use crate::error::{AppError, AppResult, ConfigError, InputError, RenderError};
use crate::models::{
    AnalysisResult, Document, ExtractionMethod, FileKind, FilenameCheck, OrgChartResult,
    ProcessingRecord,
};
use crate::orchestrator::page_orchestrator::PageOrchestrator;
use crate::services::{
    assemble_record, check_filename_consistency, OcrCheckReport, OcrKeywordCheck,
};
use crate::utils::logging::log_record_summary;
use crate::workflow::ExtractionFlow;

/// 完整流程允许的文件类型
pub const DOCUMENT_KINDS: &[FileKind] = &[FileKind::Pdf, FileKind::Docx, FileKind::Xlsx];

/// 组织架构图流程允许的文件类型
pub const ORG_CHART_KINDS: &[FileKind] =
    &[FileKind::Pdf, FileKind::Png, FileKind::Jpg, FileKind::Jpeg];

/// 未配置凭证时写入记录的说明
const MISSING_CREDENTIAL_MESSAGE: &str =
    "❌ Error: Server Environment Variable 'GEMINI_API_KEY' not set.";

/// 校验文件名和扩展名
pub fn validate_extension(filename: &str, allowed: &[FileKind]) -> AppResult<FileKind> {
    if filename.trim().is_empty() {
        return Err(InputError::MissingFilename.into());
    }

    match FileKind::from_filename(filename) {
        Some(kind) if allowed.contains(&kind) => Ok(kind),
        _ => {
            let extension = Path::new(filename)
                .extension()
                .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
                .unwrap_or_default();
            let allowed = allowed
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            Err(InputError::UnsupportedExtension { extension, allowed }.into())
        }
    }
}

/// 渲染器拒绝文件内容属于输入错误，工具缺失等仍是服务端错误
fn invalid_pdf(err: AppError) -> AppError {
    match err {
        AppError::Render(RenderError::Failed(reason)) => InputError::InvalidContent {
            kind: "PDF".to_string(),
            reason,
        }
        .into(),
        AppError::Render(RenderError::Image(e)) => InputError::InvalidContent {
            kind: "PDF".to_string(),
            reason: e.to_string(),
        }
        .into(),
        other => other,
    }
}

/// 一次提交的临时文件，drop 时删除
pub struct TempUpload {
    file: NamedTempFile,
}

impl TempUpload {
    /// 在 `dir` 中创建临时文件并写入内容，保留原扩展名
    pub fn write(dir: &Path, kind: FileKind, bytes: &[u8]) -> AppResult<Self> {
        use std::io::Write;

        let suffix = kind.to_string();
        let mut file = Builder::new()
            .prefix("upload_")
            .suffix(&suffix)
            .tempfile_in(dir)
            .map_err(|e| AppError::file_write_failed(dir.display().to_string(), e))?;
        file.write_all(bytes)
            .and_then(|_| file.flush())
            .map_err(|e| AppError::file_write_failed(file.path().display().to_string(), e))?;

        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn to_path_buf(&self) -> PathBuf {
        self.file.path().to_path_buf()
    }
}

/// 健康检查信息
#[derive(Debug, Clone, Serialize)]
pub struct HealthInfo {
    pub status: &'static str,
    pub model: String,
}

/// 处理管线
pub struct Pipeline {
    ctx: ServiceContext,
    extraction: ExtractionFlow,
    pages: PageOrchestrator,
    ocr_check: OcrKeywordCheck,
    index: IndexClient,
}

impl Pipeline {
    pub fn new(ctx: ServiceContext) -> Self {
        Self {
            extraction: ExtractionFlow::new(&ctx),
            pages: PageOrchestrator::new(&ctx),
            ocr_check: OcrKeywordCheck::new(&ctx),
            index: IndexClient::new(ctx.config.index_url.clone()),
            ctx,
        }
    }

    pub fn health(&self) -> HealthInfo {
        HealthInfo {
            status: "ok",
            model: self.ctx.llm.model_name().to_string(),
        }
    }

    /// 完整流程：提取文本 → 分析 → 组装记录
    ///
    /// 只有输入校验失败会返回错误，其余失败都体现在记录字段里。
    pub async fn process_document(
        &self,
        bytes: &[u8],
        filename: &str,
    ) -> AppResult<ProcessingRecord> {
        let kind = validate_extension(filename, DOCUMENT_KINDS)?;
        if bytes.is_empty() {
            return Err(InputError::EmptyUpload.into());
        }

        let upload = TempUpload::write(&self.ctx.config.temp_dir, kind, bytes)?;
        info!("[文档 {}] 📥 已接收 ({} 字节)", filename, bytes.len());

        let record = if !self.ctx.has_credential() {
            warn!("[文档 {}] ❌ 未配置模型凭证，跳过处理", filename);
            assemble_record(
                filename,
                upload.path(),
                FilenameCheck::Inconsistent,
                ExtractionMethod::Failed,
                AnalysisResult::config_error(MISSING_CREDENTIAL_MESSAGE),
            )
        } else {
            let document = Document::new(filename, upload.to_path_buf(), kind);
            let outcome = self.extraction.run(&document).await;
            let filename_check = check_filename_consistency(filename, &outcome.text);
            assemble_record(
                filename,
                upload.path(),
                filename_check,
                outcome.method,
                outcome.analysis,
            )
        };

        log_record_summary(&record);
        if self.index.is_configured() {
            let outcome = self.index.index(std::slice::from_ref(&record)).await;
            info!("[文档 {}] 索引推送: {:?}", filename, outcome);
        }

        Ok(record)
    }

    /// 组织架构图流程：逐页转写 → 分块 → 配对 → 层级 → 合并
    pub async fn process_org_chart(
        &self,
        bytes: &[u8],
        filename: &str,
    ) -> AppResult<OrgChartResult> {
        let kind = validate_extension(filename, ORG_CHART_KINDS)?;
        if bytes.is_empty() {
            return Err(InputError::EmptyUpload.into());
        }
        if !self.ctx.has_credential() {
            return Err(ConfigError::MissingCredential {
                var_name: "GEMINI_API_KEY".to_string(),
            }
            .into());
        }

        let pages = if kind.is_pdf() {
            if !looks_like_pdf(bytes) {
                return Err(InputError::InvalidContent {
                    kind: "PDF".to_string(),
                    reason: "missing %PDF header".to_string(),
                }
                .into());
            }
            let upload = TempUpload::write(&self.ctx.config.temp_dir, kind, bytes)?;
            self.ctx
                .renderer
                .render_pdf(upload.path())
                .await
                .map_err(invalid_pdf)?
        } else {
            vec![decode_image(bytes)?]
        };

        self.pages.process_pages(filename, pages).await
    }

    /// OCR 关键字检查（仅 PDF）
    pub async fn ocr_check(&self, bytes: &[u8], filename: &str) -> AppResult<OcrCheckReport> {
        let kind = validate_extension(filename, &[FileKind::Pdf])?;
        if bytes.is_empty() {
            return Err(InputError::EmptyUpload.into());
        }
        let upload = TempUpload::write(&self.ctx.config.temp_dir, kind, bytes)?;
        self.ocr_check.check(upload.path(), filename).await
    }

    /// 把 JSON 文件推送到索引服务
    pub async fn send_json(&self, path: &Path) -> AppResult<SendReport> {
        self.index.send_json_file(path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_extension() {
        assert_eq!(
            validate_extension("Report.PDF", DOCUMENT_KINDS).unwrap(),
            FileKind::Pdf
        );
        assert_eq!(
            validate_extension("chart.jpeg", ORG_CHART_KINDS).unwrap(),
            FileKind::Jpeg
        );

        let err = validate_extension("chart.png", DOCUMENT_KINDS).unwrap_err();
        assert!(err.is_client_error());
        assert!(err.to_string().contains(".png"));

        let err = validate_extension("notes.txt", ORG_CHART_KINDS).unwrap_err();
        assert!(err.is_client_error());

        let err = validate_extension("", DOCUMENT_KINDS).unwrap_err();
        assert!(matches!(err, AppError::Input(InputError::MissingFilename)));
    }

    #[test]
    fn test_render_failure_is_invalid_pdf() {
        let err = invalid_pdf(RenderError::Failed("pdftoppm 无法转换".to_string()).into());
        assert!(err.is_client_error());
        assert!(matches!(
            err,
            AppError::Input(InputError::InvalidContent { ref kind, .. }) if kind == "PDF"
        ));

        let err = invalid_pdf(RenderError::ToolNotAvailable("pdftoppm 未安装".to_string()).into());
        assert!(!err.is_client_error());
        assert_eq!(err.kind(), "RenderError");
    }

    #[test]
    fn test_temp_upload_is_removed_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let path = {
            let upload = TempUpload::write(dir.path(), FileKind::Docx, b"PK").unwrap();
            assert!(upload.path().exists());
            assert!(upload.path().to_string_lossy().ends_with(".docx"));
            upload.to_path_buf()
        };
        assert!(!path.exists());
    }
}
