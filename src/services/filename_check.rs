//! 文件名一致性检查
//!
//! 从文件名中取关键字，只要有一个关键字（不区分大小写）出现在正文中，
//! 就认为内容与文件名一致。

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::models::FilenameCheck;

static TOKEN_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s\p{P}]+").expect("separator pattern is valid"));

/// 文件名（去掉目录和扩展名）中的有效关键字
///
/// 丢弃纯数字和单个字符的词。
pub fn filename_keywords(filename: &str) -> Vec<String> {
    let stem = Path::new(filename)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();

    TOKEN_SEPARATOR
        .split(&stem)
        .filter(|token| token.chars().count() > 1)
        .filter(|token| !token.chars().all(char::is_numeric))
        .map(str::to_string)
        .collect()
}

/// 每个关键字是否出现在正文中
pub fn keyword_hits(text: &str, keywords: &[String]) -> Vec<(String, bool)> {
    let text_lower = text.to_lowercase();
    keywords
        .iter()
        .map(|kw| (kw.clone(), text_lower.contains(&kw.to_lowercase())))
        .collect()
}

/// 没有有效关键字时结果为不一致
pub fn check_filename_consistency(filename: &str, text: &str) -> FilenameCheck {
    let keywords = filename_keywords(filename);
    if keyword_hits(text, &keywords).iter().any(|(_, hit)| *hit) {
        FilenameCheck::Consistent
    } else {
        FilenameCheck::Inconsistent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_tokens_are_discarded() {
        assert_eq!(
            filename_keywords("Invoice_2024_Report.pdf"),
            vec!["Invoice".to_string(), "Report".to_string()]
        );
    }

    #[test]
    fn test_consistent_case_insensitive() {
        assert_eq!(
            check_filename_consistency("Invoice_2024_Report.pdf", "annual report for 2024"),
            FilenameCheck::Consistent
        );
    }

    #[test]
    fn test_inconsistent_when_no_keyword_matches() {
        assert_eq!(
            check_filename_consistency("Invoice_2024_Report.pdf", "meeting minutes"),
            FilenameCheck::Inconsistent
        );
    }

    #[test]
    fn test_no_valid_tokens_is_inconsistent() {
        assert!(filename_keywords("2024_01-a.pdf").is_empty());
        assert_eq!(
            check_filename_consistency("2024_01-a.pdf", "2024 01 a"),
            FilenameCheck::Inconsistent
        );
    }

    #[test]
    fn test_thai_filename_with_directory() {
        let keywords = filename_keywords("/data/04_KBank_ครั้งที่ 113.pdf");
        assert_eq!(keywords, vec!["KBank", "ครั้งที่"]);
        assert_eq!(
            check_filename_consistency("/data/04_KBank_ครั้งที่ 113.pdf", "รายงาน kbank"),
            FilenameCheck::Consistent
        );
    }

    #[test]
    fn test_keyword_hits_report_each_keyword() {
        let keywords = filename_keywords("Board-Resolution.docx");
        let hits = keyword_hits("The BOARD met on Monday", &keywords);
        assert_eq!(
            hits,
            vec![("Board".to_string(), true), ("Resolution".to_string(), false)]
        );
    }
}
