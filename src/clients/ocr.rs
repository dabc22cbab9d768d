//! OCR 引擎
//!
//! 只识别图片，不认识文档；空字符串表示没有识别出内容。

use std::io::Write;
use std::process::Command;

use async_trait::async_trait;
use tempfile::Builder;

use crate::error::{AppResult, OcrError};
use crate::models::PageImage;

#[async_trait]
pub trait OcrEngine: Send + Sync {
    /// `languages` 使用 tesseract 的写法，例如 "tha+eng"
    async fn ocr(&self, image: &PageImage, languages: &str) -> AppResult<String>;
}

/// tesseract 命令行
pub struct TesseractEngine {
    command: String,
}

impl TesseractEngine {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    fn run_blocking(command: &str, png: &[u8], languages: &str) -> AppResult<String> {
        let mut image_file = Builder::new().suffix(".png").tempfile()?;
        image_file.write_all(png)?;
        image_file.flush()?;

        let output = Command::new(command)
            .arg(image_file.path())
            .arg("stdout")
            .args(["-l", languages])
            .output();

        match output {
            Ok(output) if output.status.success() => {
                Ok(String::from_utf8_lossy(&output.stdout).to_string())
            }
            Ok(output) => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                Err(OcrError::Failed(format!("tesseract failed: {}", stderr.trim())).into())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(OcrError::EngineNotAvailable(
                "tesseract not found (install tesseract-ocr)".to_string(),
            )
            .into()),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl OcrEngine for TesseractEngine {
    async fn ocr(&self, image: &PageImage, languages: &str) -> AppResult<String> {
        let command = self.command.clone();
        let png = image.png.clone();
        let languages = languages.to_string();
        tokio::task::spawn_blocking(move || Self::run_blocking(&command, &png, &languages)).await?
    }
}
