//! 服务上下文
//!
//! 启动时创建一次，持有配置和所有外部能力，按引用传给分析器和页面任务。

use std::sync::Arc;

use crate::clients::{
    DoclingConverter, DocumentConverter, LanguageModel, LlmClient, OcrEngine, PageRenderer,
    PdftoppmRenderer, TesseractEngine,
};
use crate::config::Config;

pub struct ServiceContext {
    pub config: Config,
    pub llm: Arc<dyn LanguageModel>,
    pub converter: Arc<dyn DocumentConverter>,
    pub renderer: Arc<dyn PageRenderer>,
    pub ocr: Arc<dyn OcrEngine>,
}

impl ServiceContext {
    /// 按配置创建默认实现
    pub fn from_config(config: Config) -> Self {
        Self {
            llm: Arc::new(LlmClient::new(&config)),
            converter: Arc::new(DoclingConverter::new(&config.converter_command)),
            renderer: Arc::new(PdftoppmRenderer::new(
                &config.renderer_command,
                config.render_dpi,
            )),
            ocr: Arc::new(TesseractEngine::new(&config.tesseract_command)),
            config,
        }
    }

    pub fn with_llm(mut self, llm: Arc<dyn LanguageModel>) -> Self {
        self.llm = llm;
        self
    }

    pub fn with_converter(mut self, converter: Arc<dyn DocumentConverter>) -> Self {
        self.converter = converter;
        self
    }

    pub fn with_renderer(mut self, renderer: Arc<dyn PageRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn with_ocr(mut self, ocr: Arc<dyn OcrEngine>) -> Self {
        self.ocr = ocr;
        self
    }

    pub fn has_credential(&self) -> bool {
        self.config.has_credential()
    }
}
