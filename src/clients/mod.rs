//! 外部能力客户端
//!
//! 每个外部服务只暴露一个 trait，核心流程只依赖 trait，便于替换和测试。

pub mod converter;
pub mod index_client;
pub mod llm_client;
pub mod ocr;
pub mod renderer;

pub use converter::{DoclingConverter, DocumentConverter};
pub use index_client::{IndexClient, IndexOutcome, SendReport};
pub use llm_client::{ContentPart, LanguageModel, LlmClient};
pub use ocr::{OcrEngine, TesseractEngine};
pub use renderer::{decode_image, PageRenderer, PdftoppmRenderer};
