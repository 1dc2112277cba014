use serde::{Deserialize, Serialize};

/// 单条查询 (输入列表中的一行或一个逗号分段)
/// 创建后不再修改, index 保持输入顺序
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub original: String,   // 用户原文 (仅去首尾空白)
    pub normalized: String, // 小写 + 压缩空白
    pub index: usize,       // 在输入列表中的位置
}

/// 批量输入: 原始文本或字符串数组
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum BatchInput {
    Text(String),
    List(Vec<String>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_input_accepts_string_or_array() {
        let text: BatchInput = serde_json::from_str(r#""Dipirona 1g, Ibuprofeno""#).unwrap();
        assert!(matches!(text, BatchInput::Text(s) if s == "Dipirona 1g, Ibuprofeno"));

        let list: BatchInput = serde_json::from_str(r#"["Dipirona 1g", "Ibuprofeno"]"#).unwrap();
        assert!(matches!(list, BatchInput::List(v) if v.len() == 2));
    }
}
