use crate::models::{BatchInput, Query};

/// 规整单条文本: 小写, 去首尾空白, 连续空白压缩为单个空格
pub fn normalize(raw: &str) -> String {
    raw.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// 批量拆分产出
#[derive(Debug, Clone)]
pub struct SplitBatch {
    pub queries: Vec<Query>,
    /// 超过准入上限被丢弃的条数 (需回告调用方)
    pub dropped: usize,
}

/// 拆分批量输入为查询列表
/// 分隔优先级: 换行 > 逗号 > 整体视为单条; 空白分段直接丢弃
pub fn split_batch(input: &BatchInput, max_queries: usize) -> SplitBatch {
    let segments: Vec<String> = match input {
        BatchInput::Text(text) => {
            let text = text.trim();
            if text.contains('\n') {
                text.split('\n').map(|s| s.trim().to_string()).collect()
            } else if text.contains(',') {
                text.split(',').map(|s| s.trim().to_string()).collect()
            } else {
                vec![text.to_string()]
            }
        }
        BatchInput::List(items) => items.iter().map(|s| s.trim().to_string()).collect(),
    };

    let mut queries = Vec::new();
    let mut dropped = 0usize;
    for segment in segments.into_iter().filter(|s| !s.is_empty()) {
        if queries.len() >= max_queries {
            dropped += 1;
            continue;
        }
        let normalized = normalize(&segment);
        if normalized.is_empty() {
            continue;
        }
        queries.push(Query {
            original: segment,
            normalized,
            index: queries.len(),
        });
    }

    SplitBatch { queries, dropped }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_lowercases_and_collapses_whitespace() {
        assert_eq!(normalize("  Dipirona   Sódica  1g "), "dipirona sódica 1g");
        assert_eq!(normalize("\tParacetamol\n500mg"), "paracetamol 500mg");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn splits_on_comma_when_no_newline() {
        let input = BatchInput::Text("Dipirona 1g, Ibuprofeno 600mg".to_string());
        let split = split_batch(&input, 100);
        assert_eq!(split.queries.len(), 2);
        assert_eq!(split.queries[0].original, "Dipirona 1g");
        assert_eq!(split.queries[1].original, "Ibuprofeno 600mg");
        assert_eq!(split.dropped, 0);
    }

    #[test]
    fn splits_on_newline_with_priority_over_comma() {
        let input = BatchInput::Text("Dipirona 1g\nIbuprofeno 600mg".to_string());
        let split = split_batch(&input, 100);
        assert_eq!(split.queries.len(), 2);

        // 两种分隔符并存时按换行拆, 逗号留在分段内
        let mixed = BatchInput::Text("Dipirona 1g, 500 un\nIbuprofeno 600mg".to_string());
        let split = split_batch(&mixed, 100);
        assert_eq!(split.queries.len(), 2);
        assert_eq!(split.queries[0].original, "Dipirona 1g, 500 un");
    }

    #[test]
    fn whole_input_is_one_query_without_separators() {
        let input = BatchInput::Text("Paracetamol 500mg".to_string());
        let split = split_batch(&input, 100);
        assert_eq!(split.queries.len(), 1);
        assert_eq!(split.queries[0].normalized, "paracetamol 500mg");
    }

    #[test]
    fn empty_segments_are_silently_dropped() {
        let input = BatchInput::Text("Dipirona\n\n  \nIbuprofeno\n".to_string());
        let split = split_batch(&input, 100);
        assert_eq!(split.queries.len(), 2);

        let list = BatchInput::List(vec![
            " Dipirona ".to_string(),
            "".to_string(),
            "   ".to_string(),
        ]);
        let split = split_batch(&list, 100);
        assert_eq!(split.queries.len(), 1);
        assert_eq!(split.queries[0].original, "Dipirona");
    }

    #[test]
    fn admission_cap_drops_excess_and_reports_count() {
        let lines: Vec<String> = (0..130).map(|i| format!("produto {}", i)).collect();
        let input = BatchInput::Text(lines.join("\n"));
        let split = split_batch(&input, 100);
        assert_eq!(split.queries.len(), 100);
        assert_eq!(split.dropped, 30);
        // 顺序保持: 第一条和第一百条都来自原输入前段
        assert_eq!(split.queries[0].original, "produto 0");
        assert_eq!(split.queries[99].original, "produto 99");
        assert_eq!(split.queries[99].index, 99);
    }
}
