use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 配置错误（缺少凭证等）
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 输入错误（文件类型不支持、空上传等）
    #[error("输入错误: {0}")]
    Input(#[from] InputError),
    /// 版面转换器错误
    #[error("转换器错误: {0}")]
    Converter(#[from] ConverterError),
    /// LLM 服务错误
    #[error("LLM错误: {0}")]
    Llm(#[from] LlmError),
    /// 页面渲染错误
    #[error("渲染错误: {0}")]
    Render(#[from] RenderError),
    /// OCR 引擎错误
    #[error("OCR错误: {0}")]
    Ocr(#[from] OcrError),
    /// 索引服务错误
    #[error("索引错误: {0}")]
    Index(#[from] IndexError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 其他错误（用于包装第三方库错误）
    #[error("错误: {0}")]
    Other(String),
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 未配置模型 API 凭证
    #[error("未设置环境变量 {var_name}，无法调用模型")]
    MissingCredential { var_name: String },
    /// 配置文件解析失败
    #[error("配置文件解析失败 ({path}): {source}")]
    FileParseFailed {
        path: String,
        #[source]
        source: BoxError,
    },
}

/// 输入错误，对调用方而言属于客户端错误
#[derive(Debug, Error)]
pub enum InputError {
    /// 不支持的文件类型
    #[error("不支持的文件类型 '{extension}'，允许: {allowed}")]
    UnsupportedExtension { extension: String, allowed: String },
    /// 未提供文件名
    #[error("未上传文件")]
    MissingFilename,
    /// 上传内容为空
    #[error("上传的文件为空")]
    EmptyUpload,
    /// 文件内容无法解析（损坏的 PDF / 图片）
    #[error("无效的 {kind} 文件: {reason}")]
    InvalidContent { kind: String, reason: String },
}

/// 版面转换器错误
#[derive(Debug, Error)]
pub enum ConverterError {
    /// 转换器进程启动或执行失败
    #[error("转换器执行失败 ({command}): {reason}")]
    ExecutionFailed { command: String, reason: String },
    /// 转换器返回空文本
    #[error("转换器返回空文本")]
    EmptyOutput,
}

/// LLM 服务错误
#[derive(Debug, Error)]
pub enum LlmError {
    /// API 调用失败
    #[error("LLM API调用失败 (模型: {model}): {source}")]
    ApiCallFailed {
        model: String,
        #[source]
        source: BoxError,
    },
    /// 返回内容为空
    #[error("LLM返回内容为空 (模型: {model})")]
    EmptyContent { model: String },
    /// 调用超时
    #[error("LLM调用超时 (模型: {model}, {secs}秒)")]
    Timeout { model: String, secs: u64 },
    /// 请求构建失败
    #[error("LLM请求构建失败: {0}")]
    RequestBuildFailed(String),
    /// 返回结果不是合法 JSON
    #[error("无法解析LLM返回的JSON: {source}")]
    JsonParseFailed {
        #[source]
        source: serde_json::Error,
    },
}

/// 页面渲染错误
#[derive(Debug, Error)]
pub enum RenderError {
    /// 渲染工具不可用
    #[error("渲染工具不可用: {0}")]
    ToolNotAvailable(String),
    /// 渲染失败
    #[error("页面渲染失败: {0}")]
    Failed(String),
    /// 图片解码/编码失败
    #[error("图片处理失败: {0}")]
    Image(#[from] image::ImageError),
}

/// OCR 引擎错误
#[derive(Debug, Error)]
pub enum OcrError {
    /// OCR 引擎不可用
    #[error("OCR引擎不可用: {0}")]
    EngineNotAvailable(String),
    /// OCR 执行失败
    #[error("OCR执行失败: {0}")]
    Failed(String),
}

/// 索引服务错误
#[derive(Debug, Error)]
pub enum IndexError {
    /// 未配置索引地址
    #[error("未配置索引服务地址")]
    NotConfigured,
    /// 网络请求失败
    #[error("索引请求失败 ({endpoint}): {source}")]
    RequestFailed {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 文件不存在
    #[error("文件不存在: {path}")]
    NotFound { path: String },
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// ========== 从常见错误类型转换 ==========

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Llm(LlmError::JsonParseFailed { source: err })
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: String::new(),
            source: err,
        })
    }
}

impl From<image::ImageError> for AppError {
    fn from(err: image::ImageError) -> Self {
        AppError::Render(RenderError::Image(err))
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::Config(ConfigError::FileParseFailed {
            path: String::new(), // TOML错误通常不包含路径信息
            source: Box::new(err),
        })
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Index(IndexError::RequestFailed {
            endpoint: err.url().map(|u| u.to_string()).unwrap_or_default(),
            source: err,
        })
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::Other(format!("后台任务执行失败: {}", err))
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建LLM API调用错误
    pub fn llm_api_failed(
        model: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Llm(LlmError::ApiCallFailed {
            model: model.into(),
            source: Box::new(source),
        })
    }

    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建转换器执行错误
    pub fn converter_failed(command: impl Into<String>, reason: impl Into<String>) -> Self {
        AppError::Converter(ConverterError::ExecutionFailed {
            command: command.into(),
            reason: reason.into(),
        })
    }

    /// 是否属于调用方输入问题（对应 4xx）
    pub fn is_client_error(&self) -> bool {
        matches!(self, AppError::Input(_))
    }

    /// 错误类别名称，随服务端错误一起返回给调用方
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Config(_) => "ConfigError",
            AppError::Input(_) => "InputError",
            AppError::Converter(_) => "ConverterFailure",
            AppError::Llm(_) => "ModelError",
            AppError::Render(_) => "RenderError",
            AppError::Ocr(_) => "OcrError",
            AppError::Index(_) => "IndexError",
            AppError::File(_) => "FileError",
            AppError::Other(_) => "InternalError",
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
