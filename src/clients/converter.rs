//! 版面转换器客户端
//!
//! 把 PDF / DOCX / XLSX 转成 Markdown。默认实现调用 docling 命令行。

use std::path::{Path, PathBuf};
use std::process::Command;

use async_trait::async_trait;
use tempfile::TempDir;
use tracing::debug;

use crate::error::{AppError, AppResult};

/// 版面感知的文档转换器
///
/// 可能返回错误；返回空白文本由调用方视为失败。
#[async_trait]
pub trait DocumentConverter: Send + Sync {
    async fn convert(&self, path: &Path) -> AppResult<String>;
}

/// docling 命令行转换器
pub struct DoclingConverter {
    command: String,
}

impl DoclingConverter {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    /// 阻塞执行：`docling <file> --to md --output <dir>`，再读取生成的 `<stem>.md`
    fn run_blocking(command: &str, path: &Path) -> AppResult<String> {
        let output_dir = TempDir::new()?;

        let output = Command::new(command)
            .arg(path)
            .args(["--to", "md", "--output"])
            .arg(output_dir.path())
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    AppError::converter_failed(command, format!("{} 未安装", command))
                } else {
                    AppError::converter_failed(command, e.to_string())
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AppError::converter_failed(command, stderr.trim().to_string()));
        }

        let markdown_path = markdown_output_path(output_dir.path(), path);
        debug!("读取转换结果: {}", markdown_path.display());

        std::fs::read_to_string(&markdown_path)
            .map_err(|e| AppError::file_read_failed(markdown_path.display().to_string(), e))
    }
}

#[async_trait]
impl DocumentConverter for DoclingConverter {
    async fn convert(&self, path: &Path) -> AppResult<String> {
        let command = self.command.clone();
        let path = path.to_path_buf();
        tokio::task::spawn_blocking(move || Self::run_blocking(&command, &path)).await?
    }
}

/// docling 输出文件名与输入文件同名，扩展名为 .md
fn markdown_output_path(output_dir: &Path, input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "document".to_string());
    output_dir.join(format!("{}.md", stem))
}
