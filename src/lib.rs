//! # Doc Pipeline
//!
//! 把上传的文档（PDF / DOCX / XLSX）或组织架构图（PDF / 图片）转成结构化记录的 Rust 程序
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 外部能力层（Clients）
//! - `clients/` - 每个外部服务一个 trait，只暴露能力
//! - `LanguageModel` - 生成式模型（文本 + 图片）
//! - `DocumentConverter` - 版面转换器（docling）
//! - `PageRenderer` / `OcrEngine` - PDF 渲染和 tesseract
//! - `IndexClient` - 搜索索引推送
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，不关心流程顺序
//! - `classifier` / `pairing` / `hierarchy` - 文本块分类、姓名职位配对、层级重建
//! - `response_parser` - 模型响应解析
//! - `DocumentAnalyzer` - 文档分类和信息提取
//! - `record_assembler` / `filename_check` - 记录组装和文件名检查
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一页"和"一份文档"的处理流程
//! - `PageTask` - 单页转写流程（模型 → 解析 → 分块 → 配对 → 层级）
//! - `ExtractionFlow` - 文本提取状态机（转换器 → 视觉回退 → 失败）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/submission` - 提交入口，校验输入、管理临时文件
//! - `orchestrator/page_orchestrator` - 多页并发和按页序合并
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod context;
pub mod error;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use context::ServiceContext;
pub use error::{AppError, AppResult};
pub use models::{OrgChartResult, ProcessingRecord};
pub use orchestrator::{PageOrchestrator, Pipeline};
pub use workflow::{ExtractionFlow, PageTask};
