//! 职位层级重建
//!
//! 用文本块在整个序列中的序号近似嵌套深度：序号 `i` 的职位块先把路径栈
//! 截到长度 `i`，再挂到栈顶节点下（栈空则挂到根）。这是近似算法，
//! 层级质量依赖于每个视觉层级只有一个职位的输入。

use tracing::debug;

pub use crate::models::HierarchyNode;
use crate::models::TextBlock;

/// 从有序文本块重建职位树
///
/// 栈中保存的是从根到当前节点的子节点位置路径。
pub fn build_hierarchy(blocks: &[TextBlock]) -> HierarchyNode {
    let mut root = HierarchyNode::new();
    let mut stack: Vec<usize> = Vec::new();

    for (i, block) in blocks.iter().enumerate() {
        if !block.is_position() {
            continue;
        }

        stack.truncate(i);

        // 栈中路径总是指向已存在的节点
        let Some(parent) = root.descend_mut(&stack) else {
            debug!("层级路径失效，跳过: {}", block.text);
            continue;
        };
        let pos = parent.insert(block.text.clone(), HierarchyNode::new());
        stack.push(pos);
    }

    root
}

/// 多页层级合并：按页序浅合并顶层标签，后一页的同名顶层标签覆盖前一页
pub fn merge_last_page_wins<I>(pages: I) -> HierarchyNode
where
    I: IntoIterator<Item = HierarchyNode>,
{
    let mut merged = HierarchyNode::new();
    for page in pages {
        for (label, node) in page.into_children() {
            merged.insert(label, node);
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BlockType;

    fn position(text: &str) -> TextBlock {
        TextBlock::new(text, BlockType::Position)
    }

    fn other(text: &str) -> TextBlock {
        TextBlock::new(text, BlockType::Other)
    }

    fn to_json(node: &HierarchyNode) -> String {
        serde_json::to_string(node).unwrap()
    }

    #[test]
    fn test_second_position_nests_under_first() {
        let tree = build_hierarchy(&[position("CEO"), position("CTO")]);
        assert_eq!(to_json(&tree), r#"{"CEO":{"CTO":{}}}"#);
    }

    #[test]
    fn test_consecutive_positions_form_a_chain() {
        let tree = build_hierarchy(&[position("CEO"), position("CTO"), position("Manager")]);
        assert_eq!(to_json(&tree), r#"{"CEO":{"CTO":{"Manager":{}}}}"#);
    }

    #[test]
    fn test_index_counts_all_blocks() {
        // CTO 的序号是 2，栈长 1，不截断，仍然挂在 CEO 下
        let tree = build_hierarchy(&[position("CEO"), other("Alice Smith"), position("CTO")]);
        assert_eq!(to_json(&tree), r#"{"CEO":{"CTO":{}}}"#);
    }

    #[test]
    fn test_first_position_after_others_is_root() {
        let tree = build_hierarchy(&[other("header"), other("x"), position("Director")]);
        assert_eq!(to_json(&tree), r#"{"Director":{}}"#);
    }

    #[test]
    fn test_no_positions_gives_empty_tree() {
        assert!(build_hierarchy(&[other("a"), other("b")]).is_empty());
        assert!(build_hierarchy(&[]).is_empty());
    }

    #[test]
    fn test_duplicate_label_under_same_parent_is_reset() {
        let tree = build_hierarchy(&[position("CEO"), position("CEO")]);
        assert_eq!(to_json(&tree), r#"{"CEO":{"CEO":{}}}"#);
    }

    #[test]
    fn test_merge_last_page_wins() {
        let page1 = build_hierarchy(&[position("CEO"), position("CTO")]);
        let page2 = build_hierarchy(&[position("CEO")]);
        let page3 = build_hierarchy(&[position("Director")]);

        let merged = merge_last_page_wins(vec![page1, page2, page3]);
        assert_eq!(to_json(&merged), r#"{"CEO":{},"Director":{}}"#);
    }

    #[test]
    fn test_merge_is_shallow() {
        let page1 = build_hierarchy(&[position("CEO"), position("CTO")]);
        let page2 = build_hierarchy(&[position("CEO"), position("COO")]);

        let merged = merge_last_page_wins(vec![page1, page2]);
        assert_eq!(to_json(&merged), r#"{"CEO":{"COO":{}}}"#);
    }
}
