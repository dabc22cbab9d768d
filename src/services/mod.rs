//! 业务能力层
//!
//! 纯函数（分类、配对、层级、解析、文件名检查）和依赖外部能力的服务
//! （文档分析、OCR 检查）。这里不关心文件从哪里来，也不管流程顺序。

pub mod classifier;
pub mod document_analyzer;
pub mod filename_check;
pub mod hierarchy;
pub mod ocr_check;
pub mod pairing;
pub mod record_assembler;
pub mod response_parser;

pub use classifier::{classify_line, extract_blocks};
pub use document_analyzer::{AnalysisInput, DocumentAnalyzer};
pub use filename_check::check_filename_consistency;
pub use hierarchy::{build_hierarchy, merge_last_page_wins};
pub use ocr_check::{CheckVerdict, OcrCheckReport, OcrKeywordCheck};
pub use pairing::build_pairs;
pub use record_assembler::assemble_record;
pub use response_parser::{parse_model_response, ParsedResponse};
