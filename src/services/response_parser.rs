//! 模型输出解析
//!
//! 模型返回的是自由文本，里面可能夹着 JSON（前后有说明文字或代码块）。
//! 取第一个 `{` 到最后一个 `}` 之间的内容严格解析；解析不了就把整段文本
//! 当作 `natural_text`。永远不会失败。

use serde_json::{Map, Value as JsonValue};

/// 转写文本在 JSON 中的字段名
pub const NATURAL_TEXT_KEY: &str = "natural_text";

/// 解析结果
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedResponse {
    /// 成功解析出的 JSON 对象
    Object(Map<String, JsonValue>),
    /// 没有可用的 JSON，保留原文
    RawText(String),
}

impl ParsedResponse {
    /// 取转写文本
    ///
    /// 对象中有 `natural_text` 时使用它（非字符串值序列化成文本），
    /// 否则退回整段原始响应。
    pub fn natural_text(&self, raw_response: &str) -> String {
        match self {
            ParsedResponse::RawText(text) => text.clone(),
            ParsedResponse::Object(map) => match map.get(NATURAL_TEXT_KEY) {
                Some(JsonValue::String(text)) => text.clone(),
                Some(other) => other.to_string(),
                None => raw_response.to_string(),
            },
        }
    }

    /// 转成 JSON 对象，原文以 `{"natural_text": ...}` 表示
    pub fn into_value(self) -> JsonValue {
        match self {
            ParsedResponse::Object(map) => JsonValue::Object(map),
            ParsedResponse::RawText(text) => {
                let mut map = Map::new();
                map.insert(NATURAL_TEXT_KEY.to_string(), JsonValue::String(text));
                JsonValue::Object(map)
            }
        }
    }
}

pub fn parse_model_response(text: &str) -> ParsedResponse {
    greedy_brace_span(text)
        .and_then(|span| serde_json::from_str::<Map<String, JsonValue>>(span).ok())
        .map(ParsedResponse::Object)
        .unwrap_or_else(|| ParsedResponse::RawText(text.to_string()))
}

/// 第一个 `{` 到最后一个 `}`（含）
fn greedy_brace_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_with_prose_around() {
        let parsed = parse_model_response(r#"prefix {"a":1} suffix"#);
        assert_eq!(parsed.into_value(), json!({"a": 1}));
    }

    #[test]
    fn test_no_json_falls_back_to_raw_text() {
        let parsed = parse_model_response("no json here");
        assert_eq!(parsed, ParsedResponse::RawText("no json here".to_string()));
        assert_eq!(parsed.into_value(), json!({"natural_text": "no json here"}));
    }

    #[test]
    fn test_code_fence_is_tolerated() {
        let text = "```json\n{\"natural_text\": \"CEO\\nAlice Smith\"}\n```";
        let parsed = parse_model_response(text);
        assert_eq!(parsed.natural_text(text), "CEO\nAlice Smith");
    }

    #[test]
    fn test_greedy_span_with_two_objects_is_invalid() {
        let text = r#"{"a":1} and {"b":2}"#;
        assert_eq!(
            parse_model_response(text),
            ParsedResponse::RawText(text.to_string())
        );
    }

    #[test]
    fn test_reversed_braces() {
        let text = "} oops {";
        assert_eq!(
            parse_model_response(text),
            ParsedResponse::RawText(text.to_string())
        );
    }

    #[test]
    fn test_natural_text_missing_uses_raw_response() {
        let text = r#"{"other": "x"}"#;
        assert_eq!(parse_model_response(text).natural_text(text), text);
    }

    #[test]
    fn test_structured_natural_text_is_stringified() {
        let text = r#"{"natural_text": ["CEO", "Alice Smith"]}"#;
        assert_eq!(
            parse_model_response(text).natural_text(text),
            r#"["CEO","Alice Smith"]"#
        );
    }
}
