use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use doc_pipeline::utils::logging;
use doc_pipeline::{Config, Pipeline, ServiceContext};

#[derive(Parser)]
#[command(name = "doc-pipeline")]
#[command(about = "Document classification and org-chart extraction pipeline")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a PDF / DOCX / XLSX document and print its record
    Document { path: PathBuf },
    /// Extract name/position pairs and hierarchy from an org chart (PDF / PNG / JPG)
    OrgChart { path: PathBuf },
    /// OCR every page of a PDF and check its filename keywords
    OcrCheck { path: PathBuf },
    /// Push a JSON file to the search index
    SendJson { path: PathBuf },
    /// Print model and status
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    logging::init();

    let cli = Cli::parse();

    // 加载配置
    let config = Config::load()?;
    logging::log_startup(&config);

    // 初始化并运行
    let pipeline = Pipeline::new(ServiceContext::from_config(config));

    match cli.command {
        Commands::Document { path } => {
            let (bytes, filename) = read_upload(&path).await?;
            print_json(&pipeline.process_document(&bytes, &filename).await?)
        }
        Commands::OrgChart { path } => {
            let (bytes, filename) = read_upload(&path).await?;
            print_json(&pipeline.process_org_chart(&bytes, &filename).await?)
        }
        Commands::OcrCheck { path } => {
            let (bytes, filename) = read_upload(&path).await?;
            print_json(&pipeline.ocr_check(&bytes, &filename).await?)
        }
        Commands::SendJson { path } => print_json(&pipeline.send_json(&path).await?),
        Commands::Health => print_json(&pipeline.health()),
    }
}

async fn read_upload(path: &Path) -> Result<(Vec<u8>, String)> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("读取文件失败: {}", path.display()))?;
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    Ok((bytes, filename))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
