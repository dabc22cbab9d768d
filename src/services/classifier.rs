//! 文本行分类
//!
//! 把一行文本标记为职位、人名或其他，并把整段文本切成有序的文本块。

use std::sync::LazyLock;

use regex::Regex;

use crate::models::{BlockType, TextBlock};

/// 职位关键字，大小写不敏感的子串匹配
const POSITION_KEYWORDS: &[&str] = &[
    "Manager",
    "Director",
    "หัวหน้า",
    "ผู้จัดการ",
    "CEO",
    "CTO",
    "COO",
    "Vice President",
    "Officer",
];

/// 两个由空白分隔的词，每个词 2-50 个拉丁或泰文字母，从行首开始匹配
static NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z\x{0E01}-\x{0E59}]{2,50}\s+[A-Za-z\x{0E01}-\x{0E59}]{2,50}")
        .expect("name pattern is valid")
});

/// 行分隔符：除 `\n` / `\r\n` 外，单独的 `\r`、垂直制表、换页、
/// 文件/组/记录分隔符、NEL 以及 Unicode 行/段分隔符也算换行
static LINE_BREAK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\r\n|[\n\r\x0B\x0C\x1C-\x1E\x{85}\x{2028}\x{2029}]")
        .expect("line break pattern is valid")
});

/// 分类一行文本，职位关键字优先于人名模式
pub fn classify_line(line: &str) -> BlockType {
    let lower = line.to_lowercase();
    if POSITION_KEYWORDS
        .iter()
        .any(|keyword| lower.contains(&keyword.to_lowercase()))
    {
        BlockType::Position
    } else if NAME_PATTERN.is_match(line.trim()) {
        BlockType::Name
    } else {
        BlockType::Other
    }
}

/// 每个非空行生成一个文本块（去掉首尾空白），保持原文顺序
pub fn extract_blocks(text: &str) -> Vec<TextBlock> {
    LINE_BREAK
        .split(text)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| TextBlock::new(line, classify_line(line)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_keywords_case_insensitive() {
        assert_eq!(classify_line("Sales MANAGER"), BlockType::Position);
        assert_eq!(classify_line("chief technology officer"), BlockType::Position);
        assert_eq!(classify_line("ผู้จัดการฝ่ายบัญชี"), BlockType::Position);
        assert_eq!(classify_line("Vice President, Operations"), BlockType::Position);
    }

    #[test]
    fn test_keyword_wins_over_name_pattern() {
        // 同时满足人名模式，但包含职位关键字
        assert_eq!(classify_line("Regional Director"), BlockType::Position);
    }

    #[test]
    fn test_names() {
        assert_eq!(classify_line("Alice Smith"), BlockType::Name);
        assert_eq!(classify_line("สมชาย ใจดี"), BlockType::Name);
        assert_eq!(classify_line("John Ronald Tolkien"), BlockType::Name);
    }

    #[test]
    fn test_other() {
        assert_eq!(classify_line("Alice"), BlockType::Other);
        assert_eq!(classify_line("Q3 2024"), BlockType::Other);
        assert_eq!(classify_line("A B"), BlockType::Other);
        assert_eq!(classify_line("--- ---"), BlockType::Other);
    }

    #[test]
    fn test_classification_is_deterministic() {
        for line in ["Alice Smith", "CEO", "12345", "สมชาย ใจดี"] {
            assert_eq!(classify_line(line), classify_line(line));
        }
    }

    #[test]
    fn test_extract_blocks_drops_blank_lines_and_trims() {
        let blocks = extract_blocks("  CEO  \n\n   \nAlice Smith\r\n42\n");
        assert_eq!(
            blocks,
            vec![
                TextBlock::new("CEO", BlockType::Position),
                TextBlock::new("Alice Smith", BlockType::Name),
                TextBlock::new("42", BlockType::Other),
            ]
        );
    }

    #[test]
    fn test_extract_blocks_splits_on_all_line_breaks() {
        let blocks = extract_blocks("CEO\rAlice Smith");
        assert_eq!(
            blocks,
            vec![
                TextBlock::new("CEO", BlockType::Position),
                TextBlock::new("Alice Smith", BlockType::Name),
            ]
        );

        let text = "CTO\u{2028}Jane Doe\x0bCOO\x0cBob Lee\x1cManager\u{85}Mary Major\u{2029}42";
        let texts: Vec<String> = extract_blocks(text).into_iter().map(|b| b.text).collect();
        assert_eq!(
            texts,
            vec!["CTO", "Jane Doe", "COO", "Bob Lee", "Manager", "Mary Major", "42"]
        );
    }

    #[test]
    fn test_extract_blocks_empty_text() {
        assert!(extract_blocks("").is_empty());
        assert!(extract_blocks("\n \n\t\n").is_empty());
    }
}
