use serde::ser::{Serialize, SerializeMap, Serializer};

/// 职位层级树的一个节点
///
/// 子节点按插入顺序保存；重复的标签覆盖原值但保留原位置。
/// 序列化为 `{"标签": {...}}` 形式的嵌套对象。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HierarchyNode {
    children: Vec<(String, HierarchyNode)>,
}

impl HierarchyNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn get(&self, label: &str) -> Option<&HierarchyNode> {
        self.children
            .iter()
            .find(|(key, _)| key == label)
            .map(|(_, node)| node)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.children.iter().map(|(key, _)| key.as_str())
    }

    /// 在 `label` 下放入 `node`，已存在时整体替换，返回子节点位置
    pub fn insert(&mut self, label: impl Into<String>, node: HierarchyNode) -> usize {
        let label = label.into();
        match self.children.iter().position(|(key, _)| *key == label) {
            Some(pos) => {
                self.children[pos].1 = node;
                pos
            }
            None => {
                self.children.push((label, node));
                self.children.len() - 1
            }
        }
    }

    /// 按位置取可变子节点
    pub fn child_at_mut(&mut self, pos: usize) -> Option<&mut HierarchyNode> {
        self.children.get_mut(pos).map(|(_, node)| node)
    }

    /// 沿位置路径向下取节点，空路径返回自身
    pub fn descend_mut(&mut self, path: &[usize]) -> Option<&mut HierarchyNode> {
        let mut node = self;
        for &pos in path {
            node = node.child_at_mut(pos)?;
        }
        Some(node)
    }

    pub fn into_children(self) -> impl Iterator<Item = (String, HierarchyNode)> {
        self.children.into_iter()
    }
}

impl Serialize for HierarchyNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.children.len()))?;
        for (label, node) in &self.children {
            map.serialize_entry(label, node)?;
        }
        map.end()
    }
}
