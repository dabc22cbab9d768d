//! 页面处理上下文
//!
//! 封装"我正在处理哪个文档的第几页"这一信息，只用于日志。

use std::fmt::Display;

#[derive(Debug, Clone)]
pub struct PageCtx {
    /// 文档名
    pub document: String,

    /// 页序号（从0开始）
    pub page_index: usize,

    /// 总页数
    pub total_pages: usize,
}

impl PageCtx {
    pub fn new(document: impl Into<String>, page_index: usize, total_pages: usize) -> Self {
        Self {
            document: document.into(),
            page_index,
            total_pages,
        }
    }
}

impl Display for PageCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[文档 {} 第{}/{}页]",
            self.document,
            self.page_index + 1,
            self.total_pages
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_uses_page_number() {
        let ctx = PageCtx::new("org.pdf", 0, 2);
        assert_eq!(ctx.to_string(), "[文档 org.pdf 第1/2页]");
    }
}
