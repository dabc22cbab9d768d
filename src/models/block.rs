use serde::{Deserialize, Serialize};

/// 文本行的分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    /// 人名
    Name,
    /// 职位
    Position,
    /// 其他
    Other,
}

impl BlockType {
    pub fn as_str(self) -> &'static str {
        match self {
            BlockType::Name => "name",
            BlockType::Position => "position",
            BlockType::Other => "other",
        }
    }
}

impl std::fmt::Display for BlockType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 一行文本及其分类，顺序与原文行顺序一致
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextBlock {
    pub text: String,
    #[serde(rename = "type")]
    pub block_type: BlockType,
}

impl TextBlock {
    pub fn new(text: impl Into<String>, block_type: BlockType) -> Self {
        Self {
            text: text.into(),
            block_type,
        }
    }

    pub fn is_position(&self) -> bool {
        self.block_type == BlockType::Position
    }
}

/// 职位与人名的配对
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamePositionPair {
    pub position: String,
    pub name: String,
}
