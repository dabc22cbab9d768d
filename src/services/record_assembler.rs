//! 记录组装
//!
//! 把提取方式、分析结果和文件名检查合成一条不可变的 `ProcessingRecord`。

use std::path::Path;

use chrono::Local;
use uuid::Uuid;

use crate::models::{AnalysisResult, ExtractionMethod, FilenameCheck, ProcessingRecord};

/// 记录 ID 前缀
pub const RECORD_ID_PREFIX: &str = "DL";

/// 组装最终记录
///
/// `filename` 为用户上传时的文件名，`file_path` 为本次处理使用的存储路径，
/// `folder_path` 取其父目录。
pub fn assemble_record(
    filename: &str,
    file_path: &Path,
    filename_check: FilenameCheck,
    method: ExtractionMethod,
    analysis: AnalysisResult,
) -> ProcessingRecord {
    let folder_path = file_path
        .parent()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_default();

    ProcessingRecord {
        id: new_record_id(),
        filename_only: filename.to_string(),
        file_path: file_path.to_string_lossy().to_string(),
        folder_path,
        date: Local::now().to_rfc3339(),
        filename_check,
        doc_type: analysis.doc_type,
        extracted_info: analysis.extracted_info,
        extraction_method: method,
    }
}

/// "DL" + 随机 UUID
pub fn new_record_id() -> String {
    format!("{}{}", RECORD_ID_PREFIX, Uuid::new_v4())
}
