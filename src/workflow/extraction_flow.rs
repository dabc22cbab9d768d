//! 文本提取流程 - 流程层
//!
//! 状态机：
//!
//! ```text
//! TryConverter      --成功-------------------> Done(Converter)
//! TryConverter      --失败, PDF--------------> TryVisionFallback
//! TryConverter      --失败, 非 PDF-----------> Failed
//! TryVisionFallback --得到页面图片-----------> Done(VisionFallback)
//! TryVisionFallback --没有图片 / 渲染失败----> Failed
//! ```
//!
//! 转换器的任何错误和空输出都按失败处理，不区分原因。

use std::sync::Arc;

use tracing::{info, warn};

use crate::clients::{DocumentConverter, PageRenderer};
use crate::context::ServiceContext;
use crate::error::ConverterError;
use crate::models::{AnalysisResult, Document, ExtractionMethod, PageImage};
use crate::services::{AnalysisInput, DocumentAnalyzer};

/// 视觉模式下没有转换器文本时的占位文本
pub const VISION_PLACEHOLDER_TEXT: &str = "(transcribed by vision)";

/// 提取状态
#[derive(Debug)]
pub enum ExtractionState {
    TryConverter,
    TryVisionFallback,
    Done {
        method: ExtractionMethod,
        text: String,
        analysis: AnalysisResult,
    },
    Failed {
        message: String,
    },
}

/// 提取结果
#[derive(Debug, Clone)]
pub struct ExtractionOutcome {
    pub method: ExtractionMethod,
    /// 尽力得到的正文，用于文件名检查
    pub text: String,
    pub analysis: AnalysisResult,
}

pub struct ExtractionFlow {
    converter: Arc<dyn DocumentConverter>,
    renderer: Arc<dyn PageRenderer>,
    analyzer: DocumentAnalyzer,
}

impl ExtractionFlow {
    pub fn new(ctx: &ServiceContext) -> Self {
        Self {
            converter: ctx.converter.clone(),
            renderer: ctx.renderer.clone(),
            analyzer: DocumentAnalyzer::new(ctx),
        }
    }

    /// 运行状态机直到 Done 或 Failed
    pub async fn run(&self, document: &Document) -> ExtractionOutcome {
        let mut state = ExtractionState::TryConverter;
        loop {
            state = match state {
                ExtractionState::TryConverter => self.try_converter(document).await,
                ExtractionState::TryVisionFallback => self.try_vision(document).await,
                ExtractionState::Done {
                    method,
                    text,
                    analysis,
                } => {
                    if analysis.is_error() {
                        warn!(
                            "⚠️ [文档 {}] 文本已提取 ({}), 但分析失败",
                            document.filename, method
                        );
                    }
                    return ExtractionOutcome {
                        method,
                        text,
                        analysis,
                    }
                }
                ExtractionState::Failed { message } => {
                    warn!("❌ [文档 {}] {}", document.filename, message);
                    return ExtractionOutcome {
                        method: ExtractionMethod::Failed,
                        text: String::new(),
                        analysis: AnalysisResult::new("Error", message),
                    };
                }
            };
        }
    }

    async fn try_converter(&self, document: &Document) -> ExtractionState {
        info!("[文档 {}] 📄 使用转换器提取文本...", document.filename);
        let failure = match self.converter.convert(&document.path).await {
            Ok(text) if !text.trim().is_empty() => {
                info!(
                    "[文档 {}] ✓ 转换器提取成功 ({} 字符)",
                    document.filename,
                    text.chars().count()
                );
                let analysis = self.analyzer.analyze(AnalysisInput::Text(&text)).await;
                return ExtractionState::Done {
                    method: ExtractionMethod::Converter,
                    text,
                    analysis,
                };
            }
            Ok(_) => ConverterError::EmptyOutput.to_string(),
            Err(e) => e.to_string(),
        };

        warn!("⚠️ [文档 {}] 转换器失败: {}", document.filename, failure);
        if document.is_pdf() {
            ExtractionState::TryVisionFallback
        } else {
            ExtractionState::Failed {
                message: format!(
                    "Converter failed for {} file and no image fallback available.",
                    document.kind
                ),
            }
        }
    }

    async fn try_vision(&self, document: &Document) -> ExtractionState {
        info!("[文档 {}] 🖼️ 改用视觉模型...", document.filename);
        let pages: Vec<PageImage> = match self.renderer.render_pdf(&document.path).await {
            Ok(pages) => pages,
            Err(e) => {
                warn!("⚠️ [文档 {}] 页面渲染失败: {}", document.filename, e);
                Vec::new()
            }
        };

        if pages.is_empty() {
            return ExtractionState::Failed {
                message: "Failed both converter and vision".to_string(),
            };
        }

        let analysis = self.analyzer.analyze(AnalysisInput::Images(&pages)).await;
        ExtractionState::Done {
            method: ExtractionMethod::VisionFallback,
            text: VISION_PLACEHOLDER_TEXT.to_string(),
            analysis,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::{ContentPart, LanguageModel};
    use crate::config::Config;
    use crate::error::{AppError, AppResult, RenderError};
    use crate::models::FileKind;
    use async_trait::async_trait;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeConverter(Result<&'static str, ()>);

    #[async_trait]
    impl DocumentConverter for FakeConverter {
        async fn convert(&self, _path: &Path) -> AppResult<String> {
            self.0
                .map(str::to_string)
                .map_err(|_| AppError::converter_failed("docling", "exit status 1"))
        }
    }

    #[derive(Default)]
    struct CountingRenderer {
        pages: usize,
        fail: bool,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl PageRenderer for CountingRenderer {
        async fn render_pdf(&self, _path: &Path) -> AppResult<Vec<PageImage>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(RenderError::Failed("corrupt".to_string()).into());
            }
            Ok((0..self.pages)
                .map(|index| PageImage {
                    index,
                    width: 1,
                    height: 1,
                    png: vec![0],
                })
                .collect())
        }
    }

    struct EchoModel;

    #[async_trait]
    impl LanguageModel for EchoModel {
        fn model_name(&self) -> &str {
            "echo"
        }

        async fn generate(&self, _prompt: &str, content: &[ContentPart]) -> AppResult<String> {
            let mode = match content.first() {
                Some(ContentPart::Image(_)) => "images",
                _ => "text",
            };
            Ok(format!(
                r#"{{"doc_type": "Unknown", "extracted_info": "{}:{}"}}"#,
                mode,
                content.len()
            ))
        }
    }

    fn flow(converter: FakeConverter, renderer: Arc<CountingRenderer>) -> ExtractionFlow {
        let config = Config {
            llm_api_key: Some("key".to_string()),
            ..Config::default()
        };
        let ctx = ServiceContext::from_config(config)
            .with_llm(Arc::new(EchoModel))
            .with_converter(Arc::new(converter))
            .with_renderer(renderer);
        ExtractionFlow::new(&ctx)
    }

    fn document(name: &str, kind: FileKind) -> Document {
        Document::new(name, format!("/tmp/{}", name), kind)
    }

    #[tokio::test]
    async fn test_converter_success_skips_renderer() {
        let renderer = Arc::new(CountingRenderer::default());
        let outcome = flow(FakeConverter(Ok("# Report")), renderer.clone())
            .run(&document("report.docx", FileKind::Docx))
            .await;

        assert_eq!(outcome.method, ExtractionMethod::Converter);
        assert_eq!(outcome.text, "# Report");
        assert_eq!(outcome.analysis.extracted_info, "text:1");
        assert_eq!(renderer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_pdf_converter_failure_uses_vision_once() {
        let renderer = Arc::new(CountingRenderer {
            pages: 2,
            ..Default::default()
        });
        let outcome = flow(FakeConverter(Err(())), renderer.clone())
            .run(&document("scan.pdf", FileKind::Pdf))
            .await;

        assert_eq!(outcome.method, ExtractionMethod::VisionFallback);
        assert_eq!(outcome.text, VISION_PLACEHOLDER_TEXT);
        assert_eq!(outcome.analysis.extracted_info, "images:2");
        assert_eq!(renderer.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_blank_converter_output_counts_as_failure() {
        let renderer = Arc::new(CountingRenderer {
            pages: 1,
            ..Default::default()
        });
        let outcome = flow(FakeConverter(Ok("  \n ")), renderer)
            .run(&document("scan.pdf", FileKind::Pdf))
            .await;
        assert_eq!(outcome.method, ExtractionMethod::VisionFallback);
    }

    #[tokio::test]
    async fn test_non_pdf_failure_never_renders() {
        let renderer = Arc::new(CountingRenderer::default());
        let outcome = flow(FakeConverter(Err(())), renderer.clone())
            .run(&document("sheet.xlsx", FileKind::Xlsx))
            .await;

        assert_eq!(outcome.method, ExtractionMethod::Failed);
        assert_eq!(outcome.analysis.doc_type, "Error");
        assert_eq!(
            outcome.analysis.extracted_info,
            "Converter failed for .xlsx file and no image fallback available."
        );
        assert_eq!(renderer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_render_failure_ends_failed() {
        let renderer = Arc::new(CountingRenderer {
            fail: true,
            ..Default::default()
        });
        let outcome = flow(FakeConverter(Err(())), renderer)
            .run(&document("scan.pdf", FileKind::Pdf))
            .await;
        assert_eq!(outcome.method, ExtractionMethod::Failed);
        assert_eq!(
            outcome.analysis.extracted_info,
            "Failed both converter and vision"
        );
    }

    #[tokio::test]
    async fn test_zero_pages_ends_failed() {
        let renderer = Arc::new(CountingRenderer::default());
        let outcome = flow(FakeConverter(Err(())), renderer)
            .run(&document("empty.pdf", FileKind::Pdf))
            .await;
        assert_eq!(outcome.method, ExtractionMethod::Failed);
    }
}
