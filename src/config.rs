use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{AppError, AppResult, ConfigError};

/// 默认配置文件名
pub const DEFAULT_CONFIG_FILE: &str = "doc_pipeline.toml";

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    // --- LLM 配置 ---
    /// 模型 API 凭证，缺失时以 "Config Error" 结果降级
    pub llm_api_key: Option<String>,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
    /// 单次模型调用超时（秒）
    pub llm_timeout_secs: u64,
    /// 送入分析模型的最大字符数
    pub max_text_chars: usize,
    // --- 外部工具 ---
    /// 版面转换器命令（docling CLI）
    pub converter_command: String,
    /// PDF 渲染命令（pdftoppm）
    pub renderer_command: String,
    /// 渲染 DPI
    pub render_dpi: u32,
    /// tesseract 命令
    pub tesseract_command: String,
    /// OCR 语言
    pub ocr_languages: String,
    // --- 索引服务 ---
    pub index_url: Option<String>,
    /// 上传文件的临时目录
    pub temp_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm_api_key: None,
            llm_api_base_url: "https://generativelanguage.googleapis.com/v1beta/openai".to_string(),
            llm_model_name: "gemini-2.5-flash".to_string(),
            llm_timeout_secs: 120,
            max_text_chars: 30_000,
            converter_command: "docling".to_string(),
            renderer_command: "pdftoppm".to_string(),
            render_dpi: 300,
            tesseract_command: "tesseract".to_string(),
            ocr_languages: "tha+eng".to_string(),
            index_url: None,
            temp_dir: std::env::temp_dir(),
        }
    }
}

/// 配置文件内容，所有字段可选，只覆盖出现的项
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    llm_api_key: Option<String>,
    llm_api_base_url: Option<String>,
    llm_model_name: Option<String>,
    llm_timeout_secs: Option<u64>,
    max_text_chars: Option<usize>,
    converter_command: Option<String>,
    renderer_command: Option<String>,
    render_dpi: Option<u32>,
    tesseract_command: Option<String>,
    ocr_languages: Option<String>,
    index_url: Option<String>,
    temp_dir: Option<PathBuf>,
}

impl Config {
    /// 默认值 ← 环境变量
    pub fn from_env() -> Self {
        Self::default().with_env()
    }

    /// 默认值 ← 配置文件（如果存在）← 环境变量
    pub fn load() -> AppResult<Self> {
        let path = std::env::var("DOC_PIPELINE_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));

        let base = if path.exists() {
            debug!("加载配置文件: {}", path.display());
            Self::default().with_file(&path)?
        } else {
            Self::default()
        };

        let config = base.with_env();
        if config.llm_api_key.is_none() {
            warn!("❌ 未找到 GEMINI_API_KEY，模型相关步骤将返回 Config Error");
        }
        Ok(config)
    }

    /// 用 TOML 配置文件覆盖当前配置
    pub fn with_file(self, path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;
        let file: FileConfig = toml::from_str(&content).map_err(|e| {
            AppError::Config(ConfigError::FileParseFailed {
                path: path.display().to_string(),
                source: Box::new(e),
            })
        })?;
        Ok(self.merge_file(file))
    }

    fn merge_file(self, file: FileConfig) -> Self {
        Self {
            llm_api_key: file.llm_api_key.or(self.llm_api_key),
            llm_api_base_url: file.llm_api_base_url.unwrap_or(self.llm_api_base_url),
            llm_model_name: file.llm_model_name.unwrap_or(self.llm_model_name),
            llm_timeout_secs: file.llm_timeout_secs.unwrap_or(self.llm_timeout_secs),
            max_text_chars: file.max_text_chars.unwrap_or(self.max_text_chars),
            converter_command: file.converter_command.unwrap_or(self.converter_command),
            renderer_command: file.renderer_command.unwrap_or(self.renderer_command),
            render_dpi: file.render_dpi.unwrap_or(self.render_dpi),
            tesseract_command: file.tesseract_command.unwrap_or(self.tesseract_command),
            ocr_languages: file.ocr_languages.unwrap_or(self.ocr_languages),
            index_url: file.index_url.or(self.index_url),
            temp_dir: file.temp_dir.unwrap_or(self.temp_dir),
        }
    }

    fn with_env(self) -> Self {
        let api_key = std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("LLM_API_KEY"))
            .ok()
            .filter(|k| !k.trim().is_empty());

        Self {
            llm_api_key: api_key.or(self.llm_api_key),
            llm_api_base_url: env_or("LLM_API_BASE_URL", self.llm_api_base_url),
            llm_model_name: env_or("LLM_MODEL_NAME", self.llm_model_name),
            llm_timeout_secs: env_parse_or("LLM_TIMEOUT_SECS", self.llm_timeout_secs),
            max_text_chars: env_parse_or("MAX_TEXT_CHARS", self.max_text_chars),
            converter_command: env_or("CONVERTER_COMMAND", self.converter_command),
            renderer_command: env_or("RENDERER_COMMAND", self.renderer_command),
            render_dpi: env_parse_or("RENDER_DPI", self.render_dpi),
            tesseract_command: env_or("TESSERACT_COMMAND", self.tesseract_command),
            ocr_languages: env_or("OCR_LANGUAGES", self.ocr_languages),
            index_url: std::env::var("INDEX_URL").ok().or(self.index_url),
            temp_dir: std::env::var("DOC_PIPELINE_TEMP_DIR")
                .map(PathBuf::from)
                .unwrap_or(self.temp_dir),
        }
    }

    /// 是否已配置模型凭证
    pub fn has_credential(&self) -> bool {
        self.llm_api_key.is_some()
    }
}

fn env_or(name: &str, default: String) -> String {
    std::env::var(name).unwrap_or(default)
}

/// 无法解析时使用默认值
fn env_parse_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
