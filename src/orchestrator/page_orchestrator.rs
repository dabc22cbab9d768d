//! 多页组织架构图编排器 - 编排层
//!
//! ## 职责
//!
//! 1. **并发分发**：每页一个 `PageTask`，同时发出
//! 2. **按页序重组**：结果按页序号排序，与完成顺序无关
//! 3. **合并**：pairs / blocks 按页序拼接，层级按页序浅合并（后页覆盖同名顶层职位）
//!
//! 任何一页失败，整份文档失败，其余页面的任务随之取消。

use futures::future::try_join_all;
use tracing::info;

use crate::context::ServiceContext;
use crate::error::AppResult;
use crate::models::{OrgChartResult, PageImage, PageResult};
use crate::services::merge_last_page_wins;
use crate::workflow::{PageCtx, PageTask};

pub struct PageOrchestrator {
    task: PageTask,
}

impl PageOrchestrator {
    pub fn new(ctx: &ServiceContext) -> Self {
        Self {
            task: PageTask::new(ctx),
        }
    }

    /// 并发处理所有页面并合并结果
    pub async fn process_pages(
        &self,
        document: &str,
        pages: Vec<PageImage>,
    ) -> AppResult<OrgChartResult> {
        let total_pages = pages.len();
        info!("[文档 {}] 🚀 并发处理 {} 页", document, total_pages);

        let futures = pages.into_iter().map(|page| {
            let ctx = PageCtx::new(document, page.index, total_pages);
            async move {
                let index = page.index;
                let result = self.task.run(page, &ctx).await?;
                Ok::<_, crate::error::AppError>((index, result))
            }
        });

        let mut results = try_join_all(futures).await?;
        results.sort_by_key(|(index, _)| *index);
        let pages: Vec<PageResult> = results.into_iter().map(|(_, page)| page).collect();

        let combined = merge_pages(pages);
        info!(
            "[文档 {}] ✓ 合并完成: {} 对姓名/职位",
            document,
            combined.combined_pairs.len()
        );
        Ok(combined)
    }
}

/// 按页序合并，`pages` 必须已经按页序排列
fn merge_pages(pages: Vec<PageResult>) -> OrgChartResult {
    let combined_pairs = pages.iter().flat_map(|p| p.pairs.iter().cloned()).collect();
    let combined_blocks = pages.iter().flat_map(|p| p.blocks.iter().cloned()).collect();
    let combined_hierarchy = merge_last_page_wins(pages.iter().map(|p| p.hierarchy.clone()));

    OrgChartResult {
        total_pages: pages.len(),
        combined_pairs,
        combined_blocks,
        combined_hierarchy,
        pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::{ContentPart, LanguageModel};
    use crate::config::Config;
    use crate::error::AppError;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    /// 按页序号返回固定文本，延迟越小完成越早
    struct ScriptedPages {
        delays_ms: Vec<u64>,
        texts: Vec<&'static str>,
        fail_index: Option<usize>,
        completed: Mutex<Vec<usize>>,
    }

    #[async_trait]
    impl LanguageModel for ScriptedPages {
        fn model_name(&self) -> &str {
            "scripted"
        }

        async fn generate(&self, _prompt: &str, content: &[ContentPart]) -> AppResult<String> {
            let index = match content {
                [ContentPart::Image(page)] => page.index,
                _ => return Err(AppError::Other("expected one image".to_string())),
            };
            tokio::time::sleep(Duration::from_millis(self.delays_ms[index])).await;
            if self.fail_index == Some(index) {
                return Err(AppError::Other(format!("page {} failed", index)));
            }
            self.completed.lock().unwrap().push(index);
            Ok(json!({ "natural_text": self.texts[index] }).to_string())
        }
    }

    fn pages(count: usize) -> Vec<PageImage> {
        (0..count)
            .map(|index| PageImage {
                index,
                width: 1,
                height: 1,
                png: vec![0],
            })
            .collect()
    }

    fn orchestrator(model: Arc<ScriptedPages>) -> PageOrchestrator {
        let config = Config {
            llm_api_key: Some("key".to_string()),
            ..Config::default()
        };
        PageOrchestrator::new(&ServiceContext::from_config(config).with_llm(model))
    }

    #[tokio::test]
    async fn test_results_follow_page_order_not_completion_order() {
        let model = Arc::new(ScriptedPages {
            delays_ms: vec![60, 30, 0],
            texts: vec![
                "CEO\nJohn Smith",
                "Director\nJane Doe",
                "CEO\nMary Major",
            ],
            fail_index: None,
            completed: Mutex::new(Vec::new()),
        });

        let result = orchestrator(model.clone())
            .process_pages("org.pdf", pages(3))
            .await
            .unwrap();

        assert_eq!(*model.completed.lock().unwrap(), vec![2, 1, 0]);
        assert_eq!(result.total_pages, 3);
        let page_numbers: Vec<usize> = result.pages.iter().map(|p| p.page).collect();
        assert_eq!(page_numbers, vec![1, 2, 3]);

        let names: Vec<&str> = result.combined_pairs.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["John Smith", "Jane Doe", "Mary Major"]);
        assert_eq!(result.combined_blocks.len(), 6);

        // 第 3 页的 CEO 覆盖第 1 页，位置保持第一次出现的位置
        assert_eq!(
            serde_json::to_string(&result.combined_hierarchy).unwrap(),
            r#"{"CEO":{},"Director":{}}"#
        );
    }

    #[tokio::test]
    async fn test_one_failed_page_fails_document() {
        let model = Arc::new(ScriptedPages {
            delays_ms: vec![0, 0],
            texts: vec!["CEO", "CTO"],
            fail_index: Some(1),
            completed: Mutex::new(Vec::new()),
        });

        let err = orchestrator(model)
            .process_pages("org.pdf", pages(2))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("page 1 failed"));
    }

    #[tokio::test]
    async fn test_zero_pages_is_empty_result() {
        let model = Arc::new(ScriptedPages {
            delays_ms: vec![],
            texts: vec![],
            fail_index: None,
            completed: Mutex::new(Vec::new()),
        });
        let result = orchestrator(model)
            .process_pages("empty.pdf", Vec::new())
            .await
            .unwrap();
        assert_eq!(result.total_pages, 0);
        assert!(result.combined_hierarchy.is_empty());
    }
}
