use std::collections::HashSet;

use crate::config::MatchingConfig;

/// 文本相似度 (纯函数, 确定性, 永不失败)
///
/// 完全相等           => 1.0 + exact_match_bonus
/// 一方包含另一方     => 0.8 + component_match_bonus (不考虑包含长度占比)
/// 其余按词重叠       => |共有词| / max(|A|, |B|), 丢弃长度 <= 2 的词
///
/// 词重叠采用集合成员判定: 每个查询词只测一次存在性, 不计出现次数
pub fn similarity(config: &MatchingConfig, query: &str, candidate: &str) -> f64 {
    let a = query.trim().to_lowercase();
    let b = candidate.trim().to_lowercase();

    if a == b {
        return 1.0 + config.exact_match_bonus;
    }
    if a.contains(&b) || b.contains(&a) {
        return 0.8 + config.component_match_bonus;
    }

    let a_words: Vec<&str> = a
        .split_whitespace()
        .filter(|w| w.chars().count() > 2)
        .collect();
    let b_words: Vec<&str> = b
        .split_whitespace()
        .filter(|w| w.chars().count() > 2)
        .collect();
    if a_words.is_empty() || b_words.is_empty() {
        return 0.0;
    }

    let b_set: HashSet<&str> = b_words.iter().copied().collect();
    let common = a_words.iter().filter(|w| b_set.contains(*w)).count();

    common as f64 / a_words.len().max(b_words.len()) as f64
}
