use std::path::{Path, PathBuf};

use serde::Serialize;

/// 支持的文件类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Pdf,
    Png,
    Jpg,
    Jpeg,
    Docx,
    Xlsx,
}

impl FileKind {
    /// 从扩展名解析（不区分大小写，可带前导 '.'）
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim_start_matches('.').to_lowercase().as_str() {
            "pdf" => Some(FileKind::Pdf),
            "png" => Some(FileKind::Png),
            "jpg" => Some(FileKind::Jpg),
            "jpeg" => Some(FileKind::Jpeg),
            "docx" => Some(FileKind::Docx),
            "xlsx" => Some(FileKind::Xlsx),
            _ => None,
        }
    }

    /// 从文件名解析
    pub fn from_filename(filename: &str) -> Option<Self> {
        Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    pub fn extension(self) -> &'static str {
        match self {
            FileKind::Pdf => "pdf",
            FileKind::Png => "png",
            FileKind::Jpg => "jpg",
            FileKind::Jpeg => "jpeg",
            FileKind::Docx => "docx",
            FileKind::Xlsx => "xlsx",
        }
    }

    pub fn is_pdf(self) -> bool {
        self == FileKind::Pdf
    }

    pub fn is_image(self) -> bool {
        matches!(self, FileKind::Png | FileKind::Jpg | FileKind::Jpeg)
    }
}

impl std::fmt::Display for FileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, ".{}", self.extension())
    }
}

/// 一个待处理的文档
///
/// `filename` 是用户上传时的原始文件名，`path` 是本次处理使用的存储路径。
#[derive(Debug, Clone)]
pub struct Document {
    pub filename: String,
    pub path: PathBuf,
    pub kind: FileKind,
}

impl Document {
    pub fn new(filename: impl Into<String>, path: impl Into<PathBuf>, kind: FileKind) -> Self {
        Self {
            filename: filename.into(),
            path: path.into(),
            kind,
        }
    }

    pub fn is_pdf(&self) -> bool {
        self.kind.is_pdf()
    }
}
