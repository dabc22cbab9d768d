//! 搜索索引客户端
//!
//! 把记录批量推送到索引服务（Meilisearch documents 接口）。
//! 推送失败只报告，不重试，也不影响调用方。

use std::path::Path;

use serde::Serialize;
use serde_json::Value as JsonValue;
use tracing::{info, warn};

use crate::error::{AppError, AppResult, FileError, IndexError};

/// 推送结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexOutcome {
    /// 服务返回 200 / 202
    Accepted,
    /// 其他状态码或网络错误
    Rejected { reason: String },
}

impl IndexOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, IndexOutcome::Accepted)
    }
}

/// 推送 JSON 文件的报告
#[derive(Debug, Clone, Serialize)]
pub struct SendReport {
    pub status: String,
    pub message: String,
    pub json_content: JsonValue,
}

pub struct IndexClient {
    http: reqwest::Client,
    url: Option<String>,
}

impl IndexClient {
    pub fn new(url: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            url,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.url.is_some()
    }

    /// 推送一批记录
    pub async fn index<T: Serialize + Sync>(&self, records: &[T]) -> IndexOutcome {
        match self.try_index(records).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("⚠️ 索引推送失败: {}", e);
                IndexOutcome::Rejected {
                    reason: e.to_string(),
                }
            }
        }
    }

    async fn try_index<T: Serialize + Sync>(&self, records: &[T]) -> AppResult<IndexOutcome> {
        let url = self.url.as_deref().ok_or(IndexError::NotConfigured)?;

        let response = self
            .http
            .post(url)
            .json(records)
            .send()
            .await
            .map_err(|e| IndexError::RequestFailed {
                endpoint: url.to_string(),
                source: e,
            })?;

        let status = response.status().as_u16();
        Ok(outcome_for_status(status))
    }

    /// 读取 JSON 文件（对象或数组）并推送
    ///
    /// 单个对象会被包装成只有一个元素的数组。文件不存在返回错误，
    /// 推送失败则体现在报告的 status 中。
    pub async fn send_json_file(&self, path: &Path) -> AppResult<SendReport> {
        if !path.exists() {
            return Err(FileError::NotFound {
                path: path.display().to_string(),
            }
            .into());
        }

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;
        let data: JsonValue = serde_json::from_str(&content)?;
        let batch = as_batch(&data);

        let file_name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        let report = match self.index(&batch).await {
            IndexOutcome::Accepted => {
                info!("✓ 已推送 {} 到索引", file_name);
                SendReport {
                    status: "success".to_string(),
                    message: format!("ส่งไฟล์ {} สำเร็จ!", file_name),
                    json_content: data,
                }
            }
            IndexOutcome::Rejected { reason } => SendReport {
                status: "error".to_string(),
                message: reason,
                json_content: data,
            },
        };
        Ok(report)
    }
}

fn outcome_for_status(status: u16) -> IndexOutcome {
    match status {
        200 | 202 => IndexOutcome::Accepted,
        other => IndexOutcome::Rejected {
            reason: format!("ส่งไม่สำเร็จ ({})", other),
        },
    }
}

fn as_batch(data: &JsonValue) -> Vec<JsonValue> {
    match data {
        JsonValue::Array(items) => items.clone(),
        other => vec![other.clone()],
    }
}
