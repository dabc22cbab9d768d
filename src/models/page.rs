use serde::Serialize;

use super::block::{NamePositionPair, TextBlock};
use super::hierarchy::HierarchyNode;

/// 渲染后的单页图片（RGB，PNG 编码）
#[derive(Debug, Clone)]
pub struct PageImage {
    /// 页序号，从 0 开始
    pub index: usize,
    pub width: u32,
    pub height: u32,
    pub png: Vec<u8>,
}

impl PageImage {
    /// 页码，从 1 开始
    pub fn page_number(&self) -> usize {
        self.index + 1
    }
}

/// 单页识别结果
#[derive(Debug, Clone, Serialize)]
pub struct PageResult {
    /// 页码，从 1 开始
    pub page: usize,
    pub raw_text: String,
    pub blocks: Vec<TextBlock>,
    pub pairs: Vec<NamePositionPair>,
    pub hierarchy: HierarchyNode,
}

/// 组织架构图的整体识别结果
#[derive(Debug, Clone, Serialize)]
pub struct OrgChartResult {
    pub total_pages: usize,
    pub combined_pairs: Vec<NamePositionPair>,
    pub combined_blocks: Vec<TextBlock>,
    pub combined_hierarchy: HierarchyNode,
    pub pages: Vec<PageResult>,
}
