use serde::{Deserialize, Serialize};

/// 最终产生文本的提取方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExtractionMethod {
    /// 版面转换器成功
    Converter,
    /// 转换器失败后改用视觉模型转写（仅 PDF）
    VisionFallback,
    /// 两条路径都没有成功
    Failed,
}

impl ExtractionMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            ExtractionMethod::Converter => "Converter",
            ExtractionMethod::VisionFallback => "VisionFallback",
            ExtractionMethod::Failed => "Failed",
        }
    }
}

impl std::fmt::Display for ExtractionMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 文件名与内容是否一致
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilenameCheck {
    Consistent,
    Inconsistent,
}

impl std::fmt::Display for FilenameCheck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilenameCheck::Consistent => f.write_str("consistent"),
            FilenameCheck::Inconsistent => f.write_str("inconsistent"),
        }
    }
}

/// 模型对整个文档的分类和提取结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub doc_type: String,
    pub extracted_info: String,
}

impl AnalysisResult {
    pub fn new(doc_type: impl Into<String>, extracted_info: impl Into<String>) -> Self {
        Self {
            doc_type: doc_type.into(),
            extracted_info: extracted_info.into(),
        }
    }

    /// 模型调用或解析失败
    pub fn error(message: impl std::fmt::Display) -> Self {
        Self::new("Error", format!("Error: {}", message))
    }

    /// 未配置凭证
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::new("Config Error", message)
    }

    pub fn is_error(&self) -> bool {
        self.doc_type == "Error" || self.doc_type == "Config Error"
    }
}

/// 每个文档最终输出的一条记录，创建后不再修改
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingRecord {
    pub id: String,
    pub filename_only: String,
    pub file_path: String,
    pub folder_path: String,
    /// ISO-8601 时间戳
    pub date: String,
    pub filename_check: FilenameCheck,
    pub doc_type: String,
    pub extracted_info: String,
    pub extraction_method: ExtractionMethod,
}
