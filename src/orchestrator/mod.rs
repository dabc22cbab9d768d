//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责接收提交、管理临时文件和页面级并发，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `submission` - 提交入口
//! - 校验文件名、扩展名和内容
//! - 持有每次提交的临时文件（`TempUpload`），任何退出路径都会删除
//! - 分派到完整流程或组织架构图流程
//! - 组装记录，按需推送到索引
//!
//! ### `page_orchestrator` - 多页编排器
//! - 每页一个 `PageTask`，并发执行
//! - 按页序重组结果
//! - 合并 pairs / blocks / 层级
//!
//! ## 层次关系
//!
//! ```text
//! submission (处理一次提交)
//!     ↓
//! page_orchestrator (处理 Vec<PageImage>)   workflow::ExtractionFlow (处理一个 Document)
//!     ↓                                           ↓
//! workflow::PageTask (处理单页)             services::DocumentAnalyzer
//!     ↓
//! services (能力层：分类 / 配对 / 层级 / 解析)
//!     ↓
//! clients (外部能力：模型 / 转换器 / 渲染 / OCR / 索引)
//! ```
//!
//! ## 设计原则
//!
//! 1. **单一职责**：submission 管输入和资源，page_orchestrator 管并发
//! 2. **资源隔离**：只有编排层创建临时文件
//! 3. **向下依赖**：编排层 → workflow → services → clients
//! 4. **无业务逻辑**：只做调度和合并，不做具体业务判断

pub mod page_orchestrator;
pub mod submission;

// 重新导出主要类型
pub use page_orchestrator::PageOrchestrator;
pub use submission::{validate_extension, HealthInfo, Pipeline, TempUpload};
