//! 文档分类表
//!
//! 分析提示词中列出的 7 个固定类别，以及各类别的提取规则

use phf::phf_map;

/// 无法判断类别时模型应返回的标签
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// 类别编号 → 类别名称
static CATEGORY_NAMES: phf::Map<u8, &'static str> = phf_map! {
    1u8 => "ข้อมูลที่เกี่ยวข้องกับการประกอบธุรกิจ บัตรเครดิต",
    2u8 => "ทะเบียนผู้ถือหุ้นของบริษัทฉบับล่าสุด",
    3u8 => "เอกสารแสดงฐานะทางการเงิน",
    4u8 => "มติคณะกรรมการบริษัท / เอกสารอนุมัติ",
    5u8 => "โครงสร้างองค์กร",
    6u8 => "โครงสร้างกลุ่มธุรกิจ",
    7u8 => "นโยบายและคู่มือปฏิบัติงาน",
};

/// 文档类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocCategory(u8);

impl DocCategory {
    /// 按编号顺序返回全部类别
    pub fn all() -> impl Iterator<Item = DocCategory> {
        (1..=7u8).map(DocCategory)
    }

    pub fn from_number(number: u8) -> Option<Self> {
        CATEGORY_NAMES.contains_key(&number).then_some(DocCategory(number))
    }

    pub fn number(self) -> u8 {
        self.0
    }

    pub fn name(self) -> &'static str {
        CATEGORY_NAMES.get(&self.0).copied().unwrap_or(UNKNOWN_CATEGORY)
    }

    /// 该类别需要提取的内容说明
    pub fn extraction_rule(self) -> &'static str {
        match self.0 {
            1 => "Extract \"Time period for customer contact\" (e.g., 09:00-17:00).",
            2 | 6 => "Extract \"Shareholder ratio\" (e.g., 99.99%).",
            3 => "Return \"Financial Status Checked\".",
            4 => "Extract \"License Number\".",
            _ => "Return \"No specific info\".",
        }
    }

    /// 解析模型返回的 doc_type（"Number + Category Name" 格式）
    ///
    /// 先看开头的编号，再看是否包含类别名称。
    pub fn parse_label(label: &str) -> Option<Self> {
        let label = label.trim();
        let digits: String = label.chars().take_while(|c| c.is_ascii_digit()).collect();
        if let Some(category) = digits.parse::<u8>().ok().and_then(Self::from_number) {
            return Some(category);
        }
        Self::all().find(|c| label.contains(c.name()))
    }
}

impl std::fmt::Display for DocCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}. {}", self.0, self.name())
    }
}
