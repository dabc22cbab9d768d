//! 页面渲染
//!
//! PDF 每页渲染为固定 DPI 的 RGB 图片；上传的图片统一转为 RGB。

use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::process::Command;

use async_trait::async_trait;
use image::{DynamicImage, ImageFormat};
use tempfile::TempDir;
use tracing::debug;

use crate::error::{AppResult, InputError, RenderError};
use crate::models::PageImage;

/// PDF 页面渲染器
#[async_trait]
pub trait PageRenderer: Send + Sync {
    /// 渲染全部页面，结果按页序排列
    async fn render_pdf(&self, path: &Path) -> AppResult<Vec<PageImage>>;
}

/// 基于 pdftoppm 的渲染器
pub struct PdftoppmRenderer {
    command: String,
    dpi: u32,
}

impl PdftoppmRenderer {
    pub fn new(command: impl Into<String>, dpi: u32) -> Self {
        Self {
            command: command.into(),
            dpi,
        }
    }

    fn run_blocking(command: &str, dpi: u32, pdf_path: &Path) -> AppResult<Vec<PageImage>> {
        let temp_dir = TempDir::new()?;
        let output_prefix = temp_dir.path().join("page");

        let status = Command::new(command)
            .args(["-png", "-r", &dpi.to_string()])
            .arg(pdf_path)
            .arg(&output_prefix)
            .status();

        match status {
            Ok(s) if s.success() => {}
            Ok(_) => {
                return Err(RenderError::Failed(format!(
                    "{} 无法转换 {}",
                    command,
                    pdf_path.display()
                ))
                .into())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(RenderError::ToolNotAvailable(format!(
                    "{} 未安装 (poppler-utils)",
                    command
                ))
                .into())
            }
            Err(e) => return Err(e.into()),
        }

        let files = collect_page_images(temp_dir.path())?;
        debug!("渲染完成，共 {} 页", files.len());

        files
            .iter()
            .enumerate()
            .map(|(index, file)| {
                let image = image::open(file)?;
                encode_rgb_page(index, image)
            })
            .collect()
    }
}

#[async_trait]
impl PageRenderer for PdftoppmRenderer {
    async fn render_pdf(&self, path: &Path) -> AppResult<Vec<PageImage>> {
        let command = self.command.clone();
        let dpi = self.dpi;
        let path = path.to_path_buf();
        tokio::task::spawn_blocking(move || Self::run_blocking(&command, dpi, &path)).await?
    }
}

/// 找出 pdftoppm 生成的 page-N.png，按页码排序
///
/// 页码补零宽度取决于总页数，所以按解析出的数字排序。
fn collect_page_images(dir: &Path) -> AppResult<Vec<PathBuf>> {
    let mut pages: Vec<(u32, PathBuf)> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter_map(|path| {
            let stem = path.file_stem()?.to_str()?;
            let number = stem.strip_prefix("page-")?.parse::<u32>().ok()?;
            (path.extension()? == "png").then_some((number, path))
        })
        .collect();
    pages.sort_by_key(|(number, _)| *number);
    Ok(pages.into_iter().map(|(_, path)| path).collect())
}

/// 转为 RGB 后重新编码为 PNG
fn encode_rgb_page(index: usize, image: DynamicImage) -> AppResult<PageImage> {
    let rgb = DynamicImage::ImageRgb8(image.to_rgb8());
    let mut png = Vec::new();
    rgb.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
    Ok(PageImage {
        index,
        width: rgb.width(),
        height: rgb.height(),
        png,
    })
}

/// 解码上传的图片（PNG / JPEG），作为第 0 页
///
/// 内容无法解码时属于输入错误。
pub fn decode_image(bytes: &[u8]) -> AppResult<PageImage> {
    let image = image::load_from_memory(bytes).map_err(|e| InputError::InvalidContent {
        kind: "image".to_string(),
        reason: e.to_string(),
    })?;
    encode_rgb_page(0, image)
}

/// 是否以 PDF 文件头开头
pub fn looks_like_pdf(bytes: &[u8]) -> bool {
    bytes.starts_with(b"%PDF")
}
