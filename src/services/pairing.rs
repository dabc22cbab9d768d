//! 职位-人名配对
//!
//! 人名挂到它之前最近出现的职位上。配对后职位不清空，
//! 一个职位下可以连续挂多个人名（一位主管带多名下属的版式）。

use crate::models::{BlockType, NamePositionPair, TextBlock};

pub fn build_pairs(blocks: &[TextBlock]) -> Vec<NamePositionPair> {
    let mut pairs = Vec::new();
    let mut current_position: Option<&str> = None;

    for block in blocks {
        match block.block_type {
            BlockType::Position => current_position = Some(&block.text),
            BlockType::Name => {
                if let Some(position) = current_position.filter(|p| !p.is_empty()) {
                    pairs.push(NamePositionPair {
                        position: position.to_string(),
                        name: block.text.clone(),
                    });
                }
            }
            BlockType::Other => {}
        }
    }

    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(text: &str) -> TextBlock {
        TextBlock::new(text, BlockType::Position)
    }

    fn name(text: &str) -> TextBlock {
        TextBlock::new(text, BlockType::Name)
    }

    fn pair(position: &str, name: &str) -> NamePositionPair {
        NamePositionPair {
            position: position.to_string(),
            name: name.to_string(),
        }
    }

    #[test]
    fn test_multiple_names_share_position() {
        let blocks = vec![position("Manager"), name("Alice"), name("Bob")];
        assert_eq!(
            build_pairs(&blocks),
            vec![pair("Manager", "Alice"), pair("Manager", "Bob")]
        );
    }

    #[test]
    fn test_name_before_any_position_is_dropped() {
        let blocks = vec![name("Alice Smith"), position("CEO"), name("Bob Jones")];
        assert_eq!(build_pairs(&blocks), vec![pair("CEO", "Bob Jones")]);
    }

    #[test]
    fn test_latest_position_wins_and_other_is_ignored() {
        let blocks = vec![
            position("CEO"),
            TextBlock::new("2024", BlockType::Other),
            position("CTO"),
            TextBlock::new("page 1", BlockType::Other),
            name("Carol White"),
        ];
        assert_eq!(build_pairs(&blocks), vec![pair("CTO", "Carol White")]);
    }

    #[test]
    fn test_positions_only_emit_nothing() {
        let blocks = vec![position("CEO"), position("CTO")];
        assert!(build_pairs(&blocks).is_empty());
    }
}
